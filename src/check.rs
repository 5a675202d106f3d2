//! Checking typedef/data pairs
//!
//! Parse failures are fatal for the pair they occur in only; a directory
//! run records them and moves on to the next pair.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Serialize;
use serde_json::Value;

use crate::diagnostics::ValidationReport;
use crate::discovery::{discover_pairs, FilePair};
use crate::error::{Result, TypedefError};
use crate::schema::SchemaNode;
use crate::validator::Validator;

/// Parse both documents and validate the data against the typedef
pub fn check_bytes(schema: &[u8], data: &[u8], validator: &Validator) -> Result<ValidationReport> {
    let schema = SchemaNode::from_slice(schema)?;
    let value: Value =
        serde_json::from_slice(data).map_err(|e| TypedefError::MalformedJson(e.to_string()))?;
    Ok(validator.validate(&schema, &value))
}

fn read(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|source| TypedefError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Read and check one pair from disk
pub fn check_pair(pair: &FilePair, validator: &Validator) -> Result<ValidationReport> {
    let schema = read(&pair.typedef)?;
    let data = read(&pair.data)?;
    check_bytes(&schema, &data, validator)
}

/// How a single pair ended
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PairStatus {
    Checked { report: ValidationReport },
    Malformed { error: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct PairOutcome {
    #[serde(flatten)]
    pub pair: FilePairPaths,
    #[serde(flatten)]
    pub status: PairStatus,
}

/// Serializable view of a [`FilePair`]
#[derive(Debug, Clone, Serialize)]
pub struct FilePairPaths {
    pub typedef: String,
    pub data: String,
}

impl From<&FilePair> for FilePairPaths {
    fn from(pair: &FilePair) -> Self {
        Self {
            typedef: pair.typedef.display().to_string(),
            data: pair.data.display().to_string(),
        }
    }
}

impl PairOutcome {
    pub fn report(&self) -> Option<&ValidationReport> {
        match &self.status {
            PairStatus::Checked { report } => Some(report),
            PairStatus::Malformed { .. } => None,
        }
    }

    pub fn passed(&self) -> bool {
        self.report().map(ValidationReport::passed).unwrap_or(false)
    }
}

/// Outcomes of every pair found under a directory, in discovery order
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    pub outcomes: Vec<PairOutcome>,
}

impl RunSummary {
    /// True when every pair parsed and passed validation
    pub fn passed(&self) -> bool {
        self.outcomes.iter().all(PairOutcome::passed)
    }

    pub fn has_warnings(&self) -> bool {
        self.outcomes
            .iter()
            .filter_map(PairOutcome::report)
            .any(ValidationReport::has_warnings)
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.passed()).count()
    }

    pub fn malformed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.report().is_none()).count()
    }

    /// Exit decision for a run: every pair passed, and under
    /// `fail_on_warning` no pair carried unexpected fields either
    pub fn succeeded(&self, fail_on_warning: bool) -> bool {
        self.passed() && !(fail_on_warning && self.has_warnings())
    }

    /// Console rendering with every line starting with `prefix`
    pub fn text<'a>(&'a self, prefix: &'a str) -> TextReport<'a> {
        TextReport {
            summary: self,
            prefix,
        }
    }

    pub fn render_text(&self, prefix: &str) -> String {
        self.text(prefix).to_string()
    }

    /// Machine-readable rendering stamped with the current time
    pub fn json_report(&self) -> serde_json::Result<Value> {
        Ok(serde_json::json!({
            "generated_at": chrono::Utc::now().to_rfc3339(),
            "pairs": self.outcomes.len(),
            "failed": self.failed_count(),
            "malformed": self.malformed_count(),
            "passed": self.passed(),
            "results": serde_json::to_value(&self.outcomes)?,
        }))
    }
}

/// Line-oriented console view of a [`RunSummary`]
pub struct TextReport<'a> {
    summary: &'a RunSummary,
    prefix: &'a str,
}

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = self.prefix;

        for outcome in &self.summary.outcomes {
            let data = &outcome.pair.data;
            writeln!(f, "{}📜 Validating {}", prefix, data)?;

            match &outcome.status {
                PairStatus::Checked { report } => {
                    for finding in &report.findings {
                        writeln!(f, "{}{}", prefix, finding)?;
                    }
                    if report.passed() {
                        writeln!(f, "{}✅ Successfully validated {}", prefix, data)?;
                    } else {
                        writeln!(f, "{}❌ Validation failed for {}", prefix, data)?;
                    }
                }
                PairStatus::Malformed { error } => {
                    writeln!(f, "{}❌ {}", prefix, error)?;
                }
            }
            writeln!(f)?;
        }

        if self.summary.outcomes.is_empty() {
            writeln!(f, "{}No typedef/data pairs found", prefix)?;
        }
        Ok(())
    }
}

/// Check every typedef/data pair under `root`
pub fn check_directory(root: &Path, validator: &Validator) -> Result<RunSummary> {
    let mut summary = RunSummary::default();

    for pair in discover_pairs(root)? {
        tracing::debug!(data = %pair.data.display(), "validating");
        let status = match check_pair(&pair, validator) {
            Ok(report) => PairStatus::Checked { report },
            Err(e) => {
                tracing::warn!(typedef = %pair.typedef.display(), error = %e, "skipping pair");
                PairStatus::Malformed {
                    error: e.to_string(),
                }
            }
        };
        summary.outcomes.push(PairOutcome {
            pair: FilePairPaths::from(&pair),
            status,
        });
    }

    Ok(summary)
}
