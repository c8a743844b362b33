use std::env;
use std::fs;
use std::io;
use std::path::PathBuf;

use log::warn;

use crate::error::{ArgError, ErrorKind};
use crate::expansion::{Environment, Expander, ProcessEnv, ReferenceSyntax};

pub const CONFIG_ENV: &str = "ARGEXPAND_CONFIG";
pub const IGNORE_CASE_ENV: &str = "ARGEXPAND_IGNORE_CASE";
pub const SYNTAX_ENV: &str = "ARGEXPAND_SYNTAX";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub ignore_case: bool,
    pub syntax: ReferenceSyntax,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            ignore_case: cfg!(windows),
            syntax: ReferenceSyntax::host(),
        }
    }
}

impl Settings {
    pub fn expander(&self) -> Expander {
        Expander::new(self.ignore_case).with_syntax(self.syntax)
    }
}

/// Defaults, then the rc file, then environment overrides.
pub fn load_settings() -> io::Result<Settings> {
    let mut settings = Settings::default();
    if let Some(path) = config_path() {
        let content = match fs::read_to_string(&path) {
            Ok(content) => Some(content),
            Err(err) if err.kind() == io::ErrorKind::NotFound => None,
            Err(err) => return Err(err),
        };
        if let Some(content) = content {
            for err in apply_config(&mut settings, &content) {
                warn!("{}: {err}", path.display());
            }
        }
    }
    for err in apply_env_overrides(&mut settings, &ProcessEnv) {
        warn!("{err}");
    }
    Ok(settings)
}

fn config_path() -> Option<PathBuf> {
    if let Some(path) = env::var_os(CONFIG_ENV) {
        return Some(PathBuf::from(path));
    }
    let home = env::var_os("HOME")?;
    Some(PathBuf::from(home).join(".argexpandrc"))
}

/// Apply `key=value` lines. Bad lines are skipped and returned as errors.
pub fn apply_config(settings: &mut Settings, content: &str) -> Vec<ArgError> {
    let mut errors = Vec::new();
    for (idx, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            errors.push(
                ArgError::new(ErrorKind::Config, "expected key=value").with_line(idx + 1),
            );
            continue;
        };
        let value = strip_quotes(value.trim());
        if let Err(err) = apply_setting(settings, key.trim(), value) {
            errors.push(err.with_line(idx + 1));
        }
    }
    errors
}

pub fn apply_env_overrides(settings: &mut Settings, env: &dyn Environment) -> Vec<ArgError> {
    let mut errors = Vec::new();
    for (name, key) in [(IGNORE_CASE_ENV, "ignore_case"), (SYNTAX_ENV, "syntax")] {
        let Some(value) = env.var(name) else {
            continue;
        };
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        if let Err(err) = apply_setting(settings, key, value) {
            errors.push(err.with_context(format!("from {name}")));
        }
    }
    errors
}

fn apply_setting(settings: &mut Settings, key: &str, value: &str) -> Result<(), ArgError> {
    match key.to_ascii_lowercase().as_str() {
        "ignore_case" => {
            settings.ignore_case = parse_bool(value).ok_or_else(|| {
                ArgError::new(ErrorKind::Config, format!("invalid boolean '{value}'"))
            })?;
        }
        "syntax" => {
            settings.syntax = ReferenceSyntax::parse(value).ok_or_else(|| {
                ArgError::new(ErrorKind::Config, format!("unknown syntax '{value}'"))
                    .with_context("Expected: posix or windows")
            })?;
        }
        _ => {
            return Err(
                ArgError::new(ErrorKind::Config, format!("unknown key '{key}'"))
                    .with_context("Known keys: ignore_case, syntax"),
            );
        }
    }
    Ok(())
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

fn strip_quotes(input: &str) -> &str {
    let bytes = input.as_bytes();
    if bytes.len() >= 2 {
        let first = bytes[0];
        let last = bytes[bytes.len() - 1];
        if (first == b'"' && last == b'"') || (first == b'\'' && last == b'\'') {
            return &input[1..bytes.len() - 1];
        }
    }
    input
}
