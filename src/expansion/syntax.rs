/// Reference syntax recognized by an [`Expander`](super::Expander).
///
/// Chosen once per expander; a single resolve never mixes the two forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceSyntax {
    /// `$NAME` and `${NAME}`. A bare name is the longest run of Unicode
    /// alphanumerics and `_`, so `$Aö` names `Aö`; use `${A}ö` to stop early.
    Posix,
    /// `%NAME%`
    Windows,
}

/// A candidate reference found at the start of a slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reference<'a> {
    /// Full reference text, delimiters included.
    pub text: &'a str,
    pub name: &'a str,
}

impl ReferenceSyntax {
    /// Syntax matching the host's environment variable convention.
    pub fn host() -> Self {
        if cfg!(windows) {
            ReferenceSyntax::Windows
        } else {
            ReferenceSyntax::Posix
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "posix" | "unix" => Some(ReferenceSyntax::Posix),
            "windows" | "nt" => Some(ReferenceSyntax::Windows),
            _ => None,
        }
    }

    /// Try to read a reference starting at the first character of `input`.
    ///
    /// Returns `None` when `input` does not open a well-formed reference, in
    /// which case its first character is plain text.
    pub fn scan<'a>(&self, input: &'a str) -> Option<Reference<'a>> {
        match self {
            ReferenceSyntax::Posix => scan_posix(input),
            ReferenceSyntax::Windows => scan_windows(input),
        }
    }
}

fn scan_posix(input: &str) -> Option<Reference<'_>> {
    let rest = input.strip_prefix('$')?;
    if let Some(braced) = rest.strip_prefix('{') {
        let end = braced.find('}')?;
        if end == 0 {
            return None;
        }
        // "${" + name + "}"
        return Some(Reference {
            text: &input[..end + 3],
            name: &braced[..end],
        });
    }
    let end = rest
        .char_indices()
        .find(|(_, ch)| !is_name_char(*ch))
        .map(|(idx, _)| idx)
        .unwrap_or(rest.len());
    if end == 0 {
        return None;
    }
    Some(Reference {
        text: &input[..end + 1],
        name: &rest[..end],
    })
}

fn scan_windows(input: &str) -> Option<Reference<'_>> {
    let rest = input.strip_prefix('%')?;
    let end = rest.find('%')?;
    let name = &rest[..end];
    if name.is_empty() || name.chars().any(|ch| ch.is_whitespace() || ch == '=') {
        return None;
    }
    Some(Reference {
        text: &input[..end + 2],
        name,
    })
}

fn is_name_char(ch: char) -> bool {
    ch == '_' || ch.is_alphanumeric()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(syntax: ReferenceSyntax, input: &str) -> Option<(&str, &str)> {
        syntax.scan(input).map(|r| (r.text, r.name))
    }

    #[test]
    fn posix_bare_takes_longest_name_run() {
        assert_eq!(
            scan(ReferenceSyntax::Posix, "$VAR_1/rest"),
            Some(("$VAR_1", "VAR_1"))
        );
        assert_eq!(scan(ReferenceSyntax::Posix, "$HOME"), Some(("$HOME", "HOME")));
        assert_eq!(scan(ReferenceSyntax::Posix, "$/x"), None);
        assert_eq!(scan(ReferenceSyntax::Posix, "$"), None);
    }

    #[test]
    fn posix_braced_needs_closing_brace() {
        assert_eq!(
            scan(ReferenceSyntax::Posix, "${VAR2}-x"),
            Some(("${VAR2}", "VAR2"))
        );
        assert_eq!(scan(ReferenceSyntax::Posix, "${VAR2-x"), None);
        assert_eq!(scan(ReferenceSyntax::Posix, "${}"), None);
    }

    #[test]
    fn posix_names_may_be_non_ascii() {
        assert_eq!(scan(ReferenceSyntax::Posix, "$ÄÖ.txt"), Some(("$ÄÖ", "ÄÖ")));
    }

    #[test]
    fn windows_needs_symmetric_delimiters() {
        assert_eq!(
            scan(ReferenceSyntax::Windows, "%USERNAME%\\x"),
            Some(("%USERNAME%", "USERNAME"))
        );
        assert_eq!(
            scan(ReferenceSyntax::Windows, "%ProgramFiles(x86)%"),
            Some(("%ProgramFiles(x86)%", "ProgramFiles(x86)"))
        );
        assert_eq!(scan(ReferenceSyntax::Windows, "%USERNAME"), None);
        assert_eq!(scan(ReferenceSyntax::Windows, "%%"), None);
        assert_eq!(scan(ReferenceSyntax::Windows, "% of %"), None);
    }

    #[test]
    fn syntaxes_ignore_each_other() {
        assert_eq!(scan(ReferenceSyntax::Windows, "$HOME"), None);
        assert_eq!(scan(ReferenceSyntax::Posix, "%HOME%"), None);
    }

    #[test]
    fn host_matches_target_os() {
        let expected = if cfg!(windows) {
            ReferenceSyntax::Windows
        } else {
            ReferenceSyntax::Posix
        };
        assert_eq!(ReferenceSyntax::host(), expected);
        let expander = crate::expansion::Expander::new(false);
        assert_eq!(expander.syntax(), ReferenceSyntax::host());
        assert!(!expander.ignore_case());
    }

    #[test]
    fn parse_names() {
        assert_eq!(ReferenceSyntax::parse("POSIX"), Some(ReferenceSyntax::Posix));
        assert_eq!(ReferenceSyntax::parse(" windows "), Some(ReferenceSyntax::Windows));
        assert_eq!(ReferenceSyntax::parse("cmd"), None);
    }
}
