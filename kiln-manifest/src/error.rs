use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for manifest operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Source content and filename carried into error reports.
#[derive(Debug, Clone)]
pub struct SourceContext {
    src: String,
    filename: String,
}

impl SourceContext {
    pub fn new(src: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            filename: filename.into(),
        }
    }

    pub fn src(&self) -> &str {
        &self.src
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Create a NamedSource for miette error reporting.
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.filename, self.src.clone())
    }

    /// Create a parse error from a toml error.
    pub fn parse_error(&self, source: toml::de::Error) -> Box<Error> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::Parse {
            src: self.named_source(),
            span,
            source,
        })
    }

    /// Create a validation error, pointing at `needle` when it can be found.
    pub fn validation_error(&self, message: impl Into<String>, needle: Option<&str>) -> Box<Error> {
        Box::new(Error::Validation {
            src: self.named_source(),
            span: needle.and_then(|n| find_span(&self.src, n)),
            message: message.into(),
        })
    }

    /// Create an error for a goal key that does not apply to that goal.
    pub fn misplaced_key_error(&self, goal: &str, key: &str) -> Box<Error> {
        let header = format!("[goals.{}]", goal);
        let span = self
            .src
            .find(&header)
            .and_then(|start| {
                self.src[start..]
                    .find(key)
                    .map(|offset| SourceSpan::from((start + offset, key.len())))
            })
            .or_else(|| find_span(&self.src, key));
        Box::new(Error::MisplacedGoalKey {
            src: self.named_source(),
            span,
            goal: goal.to_string(),
            key: key.to_string(),
        })
    }
}

/// Find the first occurrence of `needle` in the TOML source.
pub(crate) fn find_span(src: &str, needle: &str) -> Option<SourceSpan> {
    if needle.is_empty() {
        return None;
    }
    let quoted = format!("\"{}\"", needle);
    if let Some(pos) = src.find(&quoted) {
        return Some(SourceSpan::from((pos + 1, needle.len())));
    }
    src.find(needle)
        .map(|pos| SourceSpan::from((pos, needle.len())))
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(help("create a kiln.toml next to your build output or pass --config"))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse kiln.toml")]
    #[diagnostic(code(kiln::parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("{message}")]
    #[diagnostic(code(kiln::validation_error))]
    Validation {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        message: String,
    },

    #[error("'{key}' does not apply to goal '{goal}'")]
    #[diagnostic(
        code(kiln::misplaced_key),
        help("'classes' belongs to [goals.configurer], 'option-markers' to [goals.component] or [goals.urifactory]")
    )]
    MisplacedGoalKey {
        #[source_code]
        src: NamedSource<String>,
        #[label("not used by this goal")]
        span: Option<SourceSpan>,
        goal: String,
        key: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_span_prefers_quoted() {
        let src = "marker = \"x\"\nname = \"marker\"\n";
        let span = find_span(src, "marker").unwrap();
        assert_eq!(span.offset(), src.find("\"marker\"").unwrap() + 1);
        assert_eq!(span.len(), 6);
    }

    #[test]
    fn test_find_span_missing() {
        assert!(find_span("a = 1", "zzz").is_none());
        assert!(find_span("a = 1", "").is_none());
    }
}
