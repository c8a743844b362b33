use std::collections::HashMap;

use argexpand::{ArgValue, Expander, Options, ReferenceSyntax};

fn env_of(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn windows_expand_arguments() {
    let expander = Expander::new(true)
        .with_syntax(ReferenceSyntax::Windows)
        .with_env(env_of(&[("VAR1", "val1"), ("VAR2", "val2")]));
    let mut options = Options::new();
    options.insert("--foo", "%VAR1%");
    options.insert(
        "--bar",
        vec![
            ArgValue::Int(123),
            ArgValue::from("%VAR2%"),
            ArgValue::from("%var1%"),
        ],
    );
    options.insert("--baz", false);
    let arguments = vec!["positional".to_string(), "%VAR2%".to_string()];

    let (options, arguments) = expander.expand(options, arguments);

    assert_eq!(options.get("--foo"), Some(&ArgValue::from("val1")));
    assert_eq!(
        options.get("--bar"),
        Some(&ArgValue::List(vec![
            ArgValue::Int(123),
            ArgValue::from("val2"),
            ArgValue::from("val1"),
        ]))
    );
    assert_eq!(options.get("--baz"), Some(&ArgValue::Bool(false)));
    assert_eq!(arguments, vec!["positional", "val2"]);
}

#[test]
fn non_string_values_pass_through() {
    let expander = Expander::new(false)
        .with_syntax(ReferenceSyntax::Posix)
        .with_env(env_of(&[("X", "1")]));
    let mut options = Options::new();
    options.insert("--ratio", 0.5);
    options.insert("--count", 7i64);
    options.insert(
        "--nested",
        vec![ArgValue::List(vec![ArgValue::from("$X")]), ArgValue::Bool(true)],
    );
    options.insert("--empty", "");

    let (expanded, positionals) = expander.expand(options.clone(), Vec::new());

    assert_eq!(expanded.len(), options.len());
    assert_eq!(
        expanded.keys().collect::<Vec<_>>(),
        options.keys().collect::<Vec<_>>()
    );
    assert_eq!(expanded.get("--ratio"), Some(&ArgValue::Float(0.5)));
    assert_eq!(expanded.get("--count"), Some(&ArgValue::Int(7)));
    assert_eq!(
        expanded.get("--nested"),
        Some(&ArgValue::List(vec![
            ArgValue::List(vec![ArgValue::from("1")]),
            ArgValue::Bool(true),
        ]))
    );
    assert_eq!(expanded.get("--empty"), Some(&ArgValue::from("")));
    assert!(positionals.is_empty());
}

#[test]
fn unresolved_references_are_listed() {
    let expander = Expander::new(false)
        .with_syntax(ReferenceSyntax::Posix)
        .with_env(env_of(&[("FOUND_VAR", "/tmp/found")]));
    let value = "$FOUND_VAR/output.xml:$MISSING_VAR/report.html";
    assert_eq!(
        expander.resolve(value),
        "/tmp/found/output.xml:$MISSING_VAR/report.html"
    );
    assert_eq!(expander.unresolved(value), vec!["$MISSING_VAR"]);
}
