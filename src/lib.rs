//! Environment variable expansion for command-line arguments.
//!
//! Option values, positional arguments and argument-file lines may refer to
//! environment variables as `$NAME`/`${NAME}` (POSIX) or `%NAME%` (Windows).
//! `$$` yields a literal `$`. References that do not resolve are kept as-is.

mod argfile;
mod arguments;
mod config;
mod error;
mod expansion;

pub use argfile::{parse_argument_file, process_argument_files, read_argument_file};
pub use arguments::{parse_arguments, ArgValue, Options};
pub use config::{
    apply_config, apply_env_overrides, load_settings, Settings, CONFIG_ENV, IGNORE_CASE_ENV,
    SYNTAX_ENV,
};
pub use error::{ArgError, ArgResult, ErrorKind};
pub use expansion::{Environment, Expander, ProcessEnv, Reference, ReferenceSyntax};

/// Splice argument files, split options from positionals, then expand.
///
/// `flags` names the options that take no value.
pub fn expand_command_line(
    args: Vec<String>,
    flags: &[&str],
    expander: &Expander,
) -> ArgResult<(Options, Vec<String>)> {
    let args = process_argument_files(args)?;
    let (options, positionals) = parse_arguments(args, flags)?;
    Ok(expander.expand(options, positionals))
}

/// Fuzz helper for expansion targets.
pub fn fuzz_resolve_bytes(data: &[u8]) {
    let input = String::from_utf8_lossy(data);
    let env: std::collections::HashMap<String, String> =
        [("A".to_string(), "$B".to_string()), ("b".to_string(), "%A%".to_string())]
            .into_iter()
            .collect();
    for syntax in [ReferenceSyntax::Posix, ReferenceSyntax::Windows] {
        for ignore_case in [false, true] {
            let expander = Expander::new(ignore_case)
                .with_syntax(syntax)
                .with_env(env.clone());
            let _ = expander.resolve(&input);
            let _ = expander.unresolved(&input);
        }
    }
    let tokens = parse_argument_file(&input);
    if let Ok((options, positionals)) = parse_arguments(tokens, &[]) {
        let _ = Expander::new(false).with_env(env).expand(options, positionals);
    }
}
