//! Expansion scans left to right: `$$` escapes first, then references in the
//! active syntax, then plain characters. Nothing here can fail; malformed or
//! unresolved references are copied through verbatim.
use log::{debug, warn};

use crate::arguments::{ArgValue, Options};

mod env;
mod syntax;

pub use env::{Environment, ProcessEnv};
pub use syntax::{Reference, ReferenceSyntax};

const ESCAPE: &str = "$$";

pub struct Expander {
    syntax: ReferenceSyntax,
    ignore_case: bool,
    env: Box<dyn Environment>,
}

impl Expander {
    /// Expander for the host syntax, reading the process environment.
    pub fn new(ignore_case: bool) -> Self {
        Expander {
            syntax: ReferenceSyntax::host(),
            ignore_case,
            env: Box::new(ProcessEnv),
        }
    }

    pub fn with_syntax(mut self, syntax: ReferenceSyntax) -> Self {
        self.syntax = syntax;
        self
    }

    pub fn with_env(mut self, env: impl Environment + 'static) -> Self {
        self.env = Box::new(env);
        self
    }

    pub fn syntax(&self) -> ReferenceSyntax {
        self.syntax
    }

    pub fn ignore_case(&self) -> bool {
        self.ignore_case
    }

    /// Replace every resolvable reference in `text` with its value.
    pub fn resolve(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        self.scan(text, |piece| match piece {
            Piece::Text(s) => out.push_str(s),
            Piece::Resolved(reference, value) => {
                debug!("expanded {} ({} bytes)", reference.text, value.len());
                out.push_str(&value);
            }
            Piece::Unresolved(reference) => {
                warn!("environment variable '{}' is not set", reference.name);
                out.push_str(reference.text);
            }
        });
        out
    }

    /// References in `text` that would be left unexpanded, in order.
    pub fn unresolved(&self, text: &str) -> Vec<String> {
        let mut missing = Vec::new();
        self.scan(text, |piece| {
            if let Piece::Unresolved(reference) = piece {
                missing.push(reference.text.to_string());
            }
        });
        missing
    }

    /// Resolve every string inside an argument structure.
    ///
    /// Keys, ordering and list lengths are kept; non-string values are moved
    /// through untouched.
    pub fn expand(&self, options: Options, positionals: Vec<String>) -> (Options, Vec<String>) {
        let options = options
            .into_iter()
            .map(|(name, value)| {
                let value = self.expand_value(value);
                (name, value)
            })
            .collect();
        let positionals = positionals.iter().map(|arg| self.resolve(arg)).collect();
        (options, positionals)
    }

    pub fn expand_value(&self, value: ArgValue) -> ArgValue {
        match value {
            ArgValue::Str(s) => ArgValue::Str(self.resolve(&s)),
            ArgValue::List(items) => {
                ArgValue::List(items.into_iter().map(|v| self.expand_value(v)).collect())
            }
            other => other,
        }
    }

    fn lookup(&self, name: &str) -> Option<String> {
        if self.ignore_case {
            self.env.var_ignore_case(name)
        } else {
            self.env.var(name)
        }
    }

    fn scan<'t, F>(&self, text: &'t str, mut emit: F)
    where
        F: FnMut(Piece<'t>),
    {
        let mut idx = 0;
        while idx < text.len() {
            let rest = &text[idx..];
            if rest.starts_with(ESCAPE) {
                emit(Piece::Text("$"));
                idx += ESCAPE.len();
                continue;
            }
            if let Some(reference) = self.syntax.scan(rest) {
                match self.lookup(reference.name) {
                    Some(value) => emit(Piece::Resolved(reference, value)),
                    None => emit(Piece::Unresolved(reference)),
                }
                idx += reference.text.len();
                continue;
            }
            let width = rest.chars().next().map_or(1, char::len_utf8);
            emit(Piece::Text(&rest[..width]));
            idx += width;
        }
    }
}

impl std::fmt::Debug for Expander {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Expander")
            .field("syntax", &self.syntax)
            .field("ignore_case", &self.ignore_case)
            .finish_non_exhaustive()
    }
}

enum Piece<'t> {
    Text(&'t str),
    Resolved(Reference<'t>, String),
    Unresolved(Reference<'t>),
}
