//! Problems reported by a generation pass.

use serde::Serialize;

/// Severity level for a diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Severity {
    /// The goal produced no output.
    Error,
    /// The goal ran but something deserves attention.
    Warning,
}

impl Severity {
    pub fn is_error(&self) -> bool {
        matches!(self, Severity::Error)
    }

    pub fn is_warning(&self) -> bool {
        matches!(self, Severity::Warning)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A message about one goal.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Kind of the goal that produced the diagnostic.
    pub goal: String,
    pub message: String,
    /// Class or file the message is about.
    pub location: Option<String>,
}

impl Diagnostic {
    pub fn error(goal: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, goal, message)
    }

    pub fn warning(goal: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, goal, message)
    }

    fn new(severity: Severity, goal: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity,
            goal: goal.into(),
            message: message.into(),
            location: None,
        }
    }

    pub fn at(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}]: {}", self.severity, self.goal, self.message)?;
        if let Some(loc) = &self.location {
            write!(f, " (at {})", loc)?;
        }
        Ok(())
    }
}
