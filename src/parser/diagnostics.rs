//! Diagnostics sink
//!
//! Problems found while reading an expression never abort the parse. They
//! are collected here as `(offset, message)` pairs and handed back to the
//! caller next to the (possibly degraded) tree.

use std::fmt;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// 1-based line and column (in characters) of a byte offset into `source`.
    /// Offsets past the end map to the position just after the last character.
    pub fn from_offset(source: &str, offset: usize) -> Self {
        let mut line = 1;
        let mut column = 1;
        for (i, ch) in source.char_indices() {
            if i >= offset {
                break;
            }
            if ch == '\n' {
                line += 1;
                column = 1;
            } else {
                column += 1;
            }
        }
        Self { line, column }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A single complaint about the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub offset: usize,
    pub message: String,
}

impl Diagnostic {
    pub fn new(offset: usize, message: impl Into<String>) -> Self {
        Self {
            offset,
            message: message.into(),
        }
    }

    pub fn location(&self, source: &str) -> SourceLocation {
        SourceLocation::from_offset(source, self.offset)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "offset {}: {}", self.offset, self.message)
    }
}

/// Ordered list of diagnostics recorded during one parse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a complaint. An exact repeat of the previous entry is dropped.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        if self.entries.last() == Some(&diagnostic) {
            return;
        }
        tracing::debug!(offset = diagnostic.offset, "{}", diagnostic.message);
        self.entries.push(diagnostic);
    }

    pub fn report(&mut self, offset: usize, message: impl Into<String>) {
        self.push(Diagnostic::new(offset, message));
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.entries.iter()
    }

    pub fn first(&self) -> Option<&Diagnostic> {
        self.entries.first()
    }

    /// Orders entries by offset, keeping recording order among equal offsets.
    pub(crate) fn sort(&mut self) {
        self.entries.sort_by_key(|d| d.offset);
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.entries
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_complaint_is_collapsed() {
        let mut diags = Diagnostics::new();
        diags.report(4, "unexpected ')'");
        diags.report(4, "unexpected ')'");
        diags.report(4, "unmatched delimiter");
        diags.report(4, "unexpected ')'");
        assert_eq!(diags.len(), 3);
    }

    #[test]
    fn test_sort_is_stable() {
        let mut diags = Diagnostics::new();
        diags.report(9, "b");
        diags.report(2, "a");
        diags.report(9, "c");
        diags.sort();
        let messages: Vec<_> = diags.iter().map(|d| d.message.as_str()).collect();
        assert_eq!(messages, ["a", "b", "c"]);
    }

    #[test]
    fn test_location_from_offset() {
        let source = "a +\n  (b";
        assert_eq!(SourceLocation::from_offset(source, 0), SourceLocation::new(1, 1));
        assert_eq!(SourceLocation::from_offset(source, 2), SourceLocation::new(1, 3));
        assert_eq!(SourceLocation::from_offset(source, 6), SourceLocation::new(2, 3));
        assert_eq!(SourceLocation::from_offset(source, 99), SourceLocation::new(2, 5));
    }
}
