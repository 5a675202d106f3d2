//! Validation findings and the sink that collects them

use std::fmt;

use serde::Serialize;

/// Severity of a validation finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// The document's shape disagrees with the typedef
    Error,
    /// The document carries fields the typedef does not describe
    Warning,
    /// The typedef references an alias with no definition in scope
    UnknownType,
    /// Alias dereferences looped without consuming any of the document
    RecursionLimitExceeded,
}

impl Severity {
    /// Console glyph for this severity
    pub fn glyph(&self) -> &'static str {
        match self {
            Severity::Error => "❌",
            Severity::Warning => "⚠️",
            Severity::UnknownType => "❗",
            Severity::RecursionLimitExceeded => "⛔",
        }
    }

    /// Whether a finding of this severity fails the run
    pub fn is_failure(&self) -> bool {
        !matches!(self, Severity::Warning)
    }
}

/// One diagnostic produced during validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationFinding {
    pub severity: Severity,
    /// Location in the data document: `""` is the root, `.name` a property, `[i]` an element
    pub path: String,
    pub message: String,
}

impl ValidationFinding {
    pub fn new(severity: Severity, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity,
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn expected(kind: &str, path: &str) -> Self {
        Self::new(Severity::Error, path, format!("expected {} at {}", kind, path))
    }

    pub fn missing_key(name: &str, path: &str) -> Self {
        Self::new(Severity::Error, path, format!("missing key '{}' at {}", name, path))
    }

    pub fn unexpected_field(key: &str, path: &str) -> Self {
        Self::new(
            Severity::Warning,
            path,
            format!("unexpected field '{}' at {}", key, path),
        )
    }

    pub fn unknown_type(path: &str) -> Self {
        Self::new(Severity::UnknownType, path, format!("unknown type at {}", path))
    }

    pub fn recursion_limit(path: &str) -> Self {
        Self::new(
            Severity::RecursionLimitExceeded,
            path,
            format!("alias recursion limit exceeded at {}", path),
        )
    }
}

impl fmt::Display for ValidationFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.severity.glyph(), self.message)
    }
}

/// Append-only collection of findings in discovery order
#[derive(Debug, Default)]
pub struct DiagnosticSink {
    findings: Vec<ValidationFinding>,
}

impl DiagnosticSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, finding: ValidationFinding) {
        tracing::trace!(severity = ?finding.severity, path = %finding.path, "{}", finding.message);
        self.findings.push(finding);
    }

    pub fn all(&self) -> &[ValidationFinding] {
        &self.findings
    }

    pub fn into_report(self) -> ValidationReport {
        ValidationReport {
            findings: self.findings,
        }
    }
}

/// Outcome of validating one document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub findings: Vec<ValidationFinding>,
}

impl ValidationReport {
    /// True when no `Error`, `UnknownType` or recursion findings were recorded
    pub fn passed(&self) -> bool {
        !self.findings.iter().any(|f| f.severity.is_failure())
    }

    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        self.count(Severity::Warning) > 0
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.findings.iter().filter(|f| f.severity == severity).count()
    }

    pub fn errors(&self) -> impl Iterator<Item = &ValidationFinding> {
        self.findings.iter().filter(|f| f.severity.is_failure())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ValidationFinding> {
        self.findings.iter().filter(|f| f.severity == Severity::Warning)
    }
}
