//! Error types for the group file parser

use std::ops::Range;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for parsing operations
pub type ParseResult<T> = Result<T, ParseError>;

/// Result type for reader operations that may also touch the filesystem
pub type GroupResult<T> = Result<T, GroupError>;

/// Parse error attributed to a source line
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("line {line}: malformed entry `{content}`: expected a key followed by a value")]
    MalformedLine {
        line: usize,
        span: Range<usize>,
        content: String,
    },

    #[error("line {line}: unbalanced braces: {message}")]
    UnbalancedBraces {
        line: usize,
        span: Range<usize>,
        message: String,
    },
}

impl ParseError {
    pub fn malformed_line(line: usize, span: Range<usize>, content: impl Into<String>) -> Self {
        Self::MalformedLine {
            line,
            span,
            content: content.into(),
        }
    }

    pub fn unbalanced_braces(line: usize, span: Range<usize>, message: impl Into<String>) -> Self {
        Self::UnbalancedBraces {
            line,
            span,
            message: message.into(),
        }
    }

    /// 1-based line number the error is attributed to
    pub fn line(&self) -> usize {
        match self {
            ParseError::MalformedLine { line, .. } => *line,
            ParseError::UnbalancedBraces { line, .. } => *line,
        }
    }

    /// Byte range of the offending line in the source
    pub fn span(&self) -> Range<usize> {
        match self {
            ParseError::MalformedLine { span, .. } => span.clone(),
            ParseError::UnbalancedBraces { span, .. } => span.clone(),
        }
    }

    /// Recoverable errors are reported as diagnostics and parsing continues
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ParseError::MalformedLine { .. })
    }
}

/// Path lookup failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("no entry named `{key}` at path position {position}")]
    NotFound { key: String, position: usize },

    #[error("`{path}` is a group, not a key/value entry")]
    NotALeaf { path: String },
}

/// Any failure of a load, lookup or save
#[derive(Debug, Error)]
pub enum GroupError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl GroupError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Diagnostics collected while parsing
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseErrors {
    pub errors: Vec<ParseError>,
}

impl ParseErrors {
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    pub fn push(&mut self, error: ParseError) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ParseError> {
        self.errors.iter()
    }
}

impl From<ParseError> for ParseErrors {
    fn from(error: ParseError) -> Self {
        Self {
            errors: vec![error],
        }
    }
}

impl<'a> IntoIterator for &'a ParseErrors {
    type Item = &'a ParseError;
    type IntoIter = std::slice::Iter<'a, ParseError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

/// Pretty-print errors with source context using ariadne
#[cfg(feature = "pretty-errors")]
pub fn format_errors(source: &str, filename: &str, errors: &ParseErrors) -> String {
    use ariadne::{Color, Label, Report, ReportKind, Source};

    let mut output = Vec::new();

    for error in &errors.errors {
        let span = error.span();
        let kind = if error.is_recoverable() {
            ReportKind::Warning
        } else {
            ReportKind::Error
        };
        let label = match error {
            ParseError::MalformedLine { .. } => "this line was skipped".to_string(),
            ParseError::UnbalancedBraces { message, .. } => message.clone(),
        };

        let report = Report::build(kind, filename, span.start)
            .with_message(error.to_string())
            .with_label(
                Label::new((filename, span.start..span.end))
                    .with_color(Color::Red)
                    .with_message(label),
            )
            .finish();

        if report
            .write((filename, Source::from(source)), &mut output)
            .is_err()
        {
            output.extend_from_slice(format!("{}\n", error).as_bytes());
        }
    }

    String::from_utf8(output).unwrap_or_else(|_| "Error formatting failed".to_string())
}

/// Plain rendering used when ariadne is disabled
#[cfg(not(feature = "pretty-errors"))]
pub fn format_errors(_source: &str, filename: &str, errors: &ParseErrors) -> String {
    errors
        .iter()
        .map(|error| format!("{}: {}\n", filename, error))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_names_line() {
        let error = ParseError::malformed_line(7, 40..46, "lonely");
        assert_eq!(
            error.to_string(),
            "line 7: malformed entry `lonely`: expected a key followed by a value"
        );
        assert_eq!(error.line(), 7);
        assert_eq!(error.span(), 40..46);
        assert!(error.is_recoverable());
    }

    #[test]
    fn test_unbalanced_is_fatal() {
        let error = ParseError::unbalanced_braces(3, 10..11, "`}` without an open group");
        assert!(!error.is_recoverable());
        assert!(error.to_string().starts_with("line 3: unbalanced braces"));
    }

    #[test]
    fn test_format_errors_mentions_message() {
        let source = "Group A\n{\nlonely\n}";
        let errors = ParseErrors::from(ParseError::malformed_line(3, 10..16, "lonely"));
        let rendered = format_errors(source, "sample.txt", &errors);
        assert!(rendered.contains("malformed entry"));
    }
}
