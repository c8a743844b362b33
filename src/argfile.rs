//! Argument files: one option or argument per line, spliced into the
//! command line where `--argumentfile FILE` (or `-A FILE`) appears.
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::{ArgError, ArgResult, ErrorKind};

const LONG_OPTION: &str = "--argumentfile";
const SHORT_OPTION: &str = "-A";
const STDIN_NAME: &str = "STDIN";

/// Turn argument-file content into command-line tokens.
pub fn parse_argument_file(content: &str) -> Vec<String> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut tokens = Vec::new();
    for raw in content.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if line.starts_with('-') {
            tokens.extend(split_option(line));
        } else {
            tokens.push(line.to_string());
        }
    }
    tokens
}

// The earlier of ' ' and '=' separates an option from its value.
fn split_option(line: &str) -> Vec<String> {
    let Some(idx) = line.find([' ', '=']) else {
        return vec![line.to_string()];
    };
    let (option, rest) = line.split_at(idx);
    let value = if rest.starts_with(' ') {
        rest.trim()
    } else {
        &rest[1..]
    };
    vec![option.to_string(), value.to_string()]
}

/// Read an argument file from disk, or from standard input for `STDIN`.
pub fn read_argument_file(path: &Path) -> ArgResult<Vec<String>> {
    let content = if path == Path::new(STDIN_NAME) {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf).map_err(|err| {
            ArgError::new(
                ErrorKind::ArgumentFile,
                format!("reading argument file from stdin failed: {err}"),
            )
        })?;
        buf
    } else {
        fs::read_to_string(path).map_err(|err| {
            ArgError::new(
                ErrorKind::ArgumentFile,
                format!("opening argument file '{}' failed: {err}", path.display()),
            )
        })?
    };
    let tokens = parse_argument_file(&content);
    debug!("argument file {} gave {} tokens", path.display(), tokens.len());
    Ok(tokens)
}

/// Replace every argument-file reference in `args` with the file's tokens.
///
/// Files may reference other files; a file that references itself, directly
/// or through others, is an error.
pub fn process_argument_files(args: Vec<String>) -> ArgResult<Vec<String>> {
    let mut stack = Vec::new();
    splice(args, &mut stack)
}

fn splice(args: Vec<String>, stack: &mut Vec<PathBuf>) -> ArgResult<Vec<String>> {
    let mut out = Vec::with_capacity(args.len());
    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        if arg == "--" {
            out.push(arg);
            out.extend(iter.by_ref());
            break;
        }
        let path = match file_reference(&arg) {
            FileRef::None => {
                out.push(arg);
                continue;
            }
            FileRef::Inline(path) => path,
            FileRef::Next => iter.next().ok_or_else(|| {
                ArgError::new(
                    ErrorKind::ArgumentFile,
                    format!("option '{arg}' requires a file name"),
                )
                .with_context(format!("Expected: {LONG_OPTION} FILE"))
            })?,
        };
        let path = PathBuf::from(path);
        let key = fs::canonicalize(&path).unwrap_or_else(|_| path.clone());
        if stack.contains(&key) {
            return Err(ArgError::new(
                ErrorKind::ArgumentFile,
                format!("argument file '{}' includes itself", path.display()),
            ));
        }
        let tokens = read_argument_file(&path)?;
        stack.push(key);
        out.extend(splice(tokens, stack)?);
        stack.pop();
    }
    Ok(out)
}

enum FileRef {
    None,
    Inline(String),
    Next,
}

fn file_reference(arg: &str) -> FileRef {
    if arg == LONG_OPTION || arg == SHORT_OPTION {
        return FileRef::Next;
    }
    if let Some(path) = arg.strip_prefix(LONG_OPTION).and_then(|r| r.strip_prefix('=')) {
        return FileRef::Inline(path.to_string());
    }
    match arg.strip_prefix(SHORT_OPTION) {
        Some(path) if !path.is_empty() => FileRef::Inline(path.to_string()),
        _ => FileRef::None,
    }
}
