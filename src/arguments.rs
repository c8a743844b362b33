//! Option and positional argument structures handed to the expander.
use crate::error::{ArgError, ArgResult, ErrorKind};

/// A single option value.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    Str(String),
    Bool(bool),
    Int(i64),
    Float(f64),
    List(Vec<ArgValue>),
}

impl From<&str> for ArgValue {
    fn from(value: &str) -> Self {
        ArgValue::Str(value.to_string())
    }
}

impl From<String> for ArgValue {
    fn from(value: String) -> Self {
        ArgValue::Str(value)
    }
}

impl From<bool> for ArgValue {
    fn from(value: bool) -> Self {
        ArgValue::Bool(value)
    }
}

impl From<i64> for ArgValue {
    fn from(value: i64) -> Self {
        ArgValue::Int(value)
    }
}

impl From<f64> for ArgValue {
    fn from(value: f64) -> Self {
        ArgValue::Float(value)
    }
}

impl From<Vec<ArgValue>> for ArgValue {
    fn from(value: Vec<ArgValue>) -> Self {
        ArgValue::List(value)
    }
}

/// Option name to value, in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Options {
    entries: Vec<(String, ArgValue)>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace; a replaced key keeps its original position.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<ArgValue>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(key, _)| *key == name) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&ArgValue> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ArgValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // Repeated value options collect into a list.
    fn accumulate(&mut self, name: &str, value: String) {
        let Some(idx) = self.entries.iter().position(|(key, _)| key == name) else {
            self.entries.push((name.to_string(), ArgValue::Str(value)));
            return;
        };
        let slot = &mut self.entries[idx].1;
        match slot {
            ArgValue::List(items) => items.push(ArgValue::Str(value)),
            _ => {
                let prior = std::mem::replace(slot, ArgValue::Bool(false));
                *slot = ArgValue::List(vec![prior, ArgValue::Str(value)]);
            }
        }
    }
}

impl IntoIterator for Options {
    type Item = (String, ArgValue);
    type IntoIter = std::vec::IntoIter<(String, ArgValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl FromIterator<(String, ArgValue)> for Options {
    fn from_iter<I: IntoIterator<Item = (String, ArgValue)>>(iter: I) -> Self {
        let mut options = Options::new();
        for (name, value) in iter {
            options.insert(name, value);
        }
        options
    }
}

/// Split command-line tokens into options and positionals.
///
/// Names listed in `flags` are booleans; every other option takes a value,
/// either inline (`--name=value`) or as the following token.
pub fn parse_arguments(tokens: Vec<String>, flags: &[&str]) -> ArgResult<(Options, Vec<String>)> {
    let mut options = Options::new();
    let mut positionals = Vec::new();
    let mut iter = tokens.into_iter();

    while let Some(token) = iter.next() {
        if token == "--" {
            positionals.extend(iter.by_ref());
            break;
        }
        if !is_option(&token) {
            positionals.push(token);
            continue;
        }
        let (name, inline) = match token.find('=') {
            Some(idx) if token.starts_with("--") => {
                (token[..idx].to_string(), Some(token[idx + 1..].to_string()))
            }
            _ => (token, None),
        };
        if flags.contains(&name.as_str()) {
            if inline.is_some() {
                return Err(ArgError::new(
                    ErrorKind::Usage,
                    format!("flag '{name}' does not take a value"),
                ));
            }
            options.insert(name, true);
            continue;
        }
        let value = match inline.or_else(|| iter.next()) {
            Some(value) => value,
            None => {
                return Err(ArgError::new(
                    ErrorKind::Usage,
                    format!("option '{name}' requires a value"),
                )
                .with_context(format!("Expected: {name} VALUE")));
            }
        };
        options.accumulate(&name, value);
    }

    Ok((options, positionals))
}

fn is_option(token: &str) -> bool {
    token.len() > 1 && token.starts_with('-')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn insert_replaces_in_place() {
        let mut options = Options::new();
        options.insert("--a", "1");
        options.insert("--b", true);
        options.insert("--a", "2");
        assert_eq!(options.keys().collect::<Vec<_>>(), vec!["--a", "--b"]);
        assert_eq!(options.get("--a"), Some(&ArgValue::from("2")));
    }

    #[test]
    fn values_flags_and_positionals() {
        let (options, positionals) = parse_arguments(
            tokens(&["--loglevel", "DEBUG", "--dryrun", "--output=out.xml", "suite.robot"]),
            &["--dryrun"],
        )
        .unwrap();
        assert_eq!(options.get("--loglevel"), Some(&ArgValue::from("DEBUG")));
        assert_eq!(options.get("--dryrun"), Some(&ArgValue::Bool(true)));
        assert_eq!(options.get("--output"), Some(&ArgValue::from("out.xml")));
        assert_eq!(positionals, vec!["suite.robot"]);
    }

    #[test]
    fn repeated_options_accumulate() {
        let (options, _) =
            parse_arguments(tokens(&["-i", "smoke", "-i", "fast", "-i", "slow"]), &[]).unwrap();
        assert_eq!(
            options.get("-i"),
            Some(&ArgValue::List(vec![
                ArgValue::from("smoke"),
                ArgValue::from("fast"),
                ArgValue::from("slow"),
            ]))
        );
    }

    #[test]
    fn double_dash_ends_options() {
        let (options, positionals) =
            parse_arguments(tokens(&["--", "--not-an-option", "-"]), &[]).unwrap();
        assert!(options.is_empty());
        assert_eq!(positionals, vec!["--not-an-option", "-"]);
    }

    #[test]
    fn missing_value_is_usage_error() {
        let err = parse_arguments(tokens(&["--output"]), &[]).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Usage);
        assert!(err.message.contains("--output"));
    }

    #[test]
    fn flag_with_value_is_usage_error() {
        let err = parse_arguments(tokens(&["--dryrun=yes"]), &["--dryrun"]).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Usage);
    }
}
