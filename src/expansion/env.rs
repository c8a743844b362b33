//! Read-only environment lookups.
//!
//! The expander never touches `std::env` directly; it asks an [`Environment`].
//! Tests hand it a map so the real process table stays untouched.
use std::collections::{BTreeMap, HashMap};
use std::env;

pub trait Environment {
    /// Exact-case lookup.
    fn var(&self, name: &str) -> Option<String>;

    /// Every visible entry, used for case-insensitive matching.
    fn vars(&self) -> Vec<(String, String)>;

    /// Case-insensitive lookup. When several names fold to the same key the
    /// smallest original name wins, so each casing sees the same value.
    fn var_ignore_case(&self, name: &str) -> Option<String> {
        let folded = name.to_uppercase();
        self.vars()
            .into_iter()
            .filter(|(key, _)| key.to_uppercase() == folded)
            .min_by(|a, b| a.0.cmp(&b.0))
            .map(|(_, value)| value)
    }
}

/// The live process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        if name.is_empty() || name.contains(['=', '\0']) {
            return None;
        }
        env::var_os(name)?.into_string().ok()
    }

    fn vars(&self) -> Vec<(String, String)> {
        env::vars_os()
            .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
            .collect()
    }
}

impl Environment for HashMap<String, String> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }

    fn vars(&self) -> Vec<(String, String)> {
        self.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }
}

impl Environment for BTreeMap<String, String> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }

    fn vars(&self) -> Vec<(String, String)> {
        self.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }
}
