//! Error types for the layers around the expander.
//!
//! Expansion itself never fails. Errors come from reading argument files,
//! splitting command-line tokens, and loading settings. Each error carries:
//! - Error kind (argument file, usage, config)
//! - Human-readable message
//! - Optional hint about the expected input
//! - Optional 1-based line number in the file being read

use std::fmt;

/// Categorized error types for better diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Argument file missing, unreadable or recursive
    ArgumentFile,
    /// Malformed command-line usage
    Usage,
    /// Error loading/parsing configuration
    Config,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ErrorKind::ArgumentFile => write!(f, "Argument file error"),
            ErrorKind::Usage => write!(f, "Usage error"),
            ErrorKind::Config => write!(f, "Config error"),
        }
    }
}

/// Rich error type with context information
#[derive(Debug, Clone)]
pub struct ArgError {
    pub kind: ErrorKind,
    pub message: String,
    /// Additional context explaining what was expected
    pub context: Option<String>,
    /// Line in the source file where the error occurred
    pub line: Option<usize>,
}

impl ArgError {
    /// Create a new error with just the kind and message
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        ArgError {
            kind,
            message: message.into(),
            context: None,
            line: None,
        }
    }

    /// Add context string (e.g., "Expected: --argumentfile FILE")
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Add the line number the error refers to
    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }
}

impl fmt::Display for ArgError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if let Some(line) = self.line {
            write!(f, " (line {line})")?;
        }
        write!(f, ": {}", self.message)?;
        if let Some(context) = &self.context {
            write!(f, "\n  hint: {context}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ArgError {}

/// Convenience type alias for Results with ArgError
pub type ArgResult<T> = Result<T, ArgError>;
