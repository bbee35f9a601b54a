//! Severity-classified findings and the collector threaded through validation.
//!
//! Findings are data, not control flow: every validation stage appends to a
//! [`Findings`] collector and keeps going, so one run surfaces the complete
//! defect list. [`Rollup`] caps verbose per-violation output at a fixed count
//! and emits a single aggregate finding for the remainder.

use serde::Serialize;

/// How many violations of one category are reported individually before
/// the remainder collapses into a rollup finding.
pub const DETAIL_CAP: usize = 5;

/// Severity of a finding. Errors block publication; warnings are advisory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => f.write_str("error"),
            Self::Warning => f.write_str("warning"),
        }
    }
}

/// Which validation stage produced a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FindingCategory {
    /// Collection could not be read or parsed.
    Load,
    /// Per-record field, enumeration, or range violation.
    Schema,
    /// Identifier duplication or cross-kind collision.
    Identity,
    /// Edge-level violation (dangling reference, self-loop, duplicate triple).
    Relationship,
}

impl std::fmt::Display for FindingCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Load => f.write_str("load"),
            Self::Schema => f.write_str("schema"),
            Self::Identity => f.write_str("identity"),
            Self::Relationship => f.write_str("relationship"),
        }
    }
}

/// A single validation finding.
#[derive(Debug, Clone, Serialize)]
pub struct Finding {
    pub severity: Severity,
    pub category: FindingCategory,
    /// Identifier of the offending record or edge, when one exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    pub message: String,
}

impl std::fmt::Display for Finding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.subject {
            Some(subject) => write!(
                f,
                "{} [{}] {}: {}",
                self.severity, self.category, subject, self.message
            ),
            None => write!(f, "{} [{}] {}", self.severity, self.category, self.message),
        }
    }
}

/// Ordered accumulator for findings.
///
/// Passed by mutable reference through every validation stage; never ambient
/// global state, so parallel stages can merge their collectors
/// deterministically.
#[derive(Debug, Default)]
pub struct Findings {
    items: Vec<Finding>,
}

impl Findings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, finding: Finding) {
        self.items.push(finding);
    }

    pub fn error(
        &mut self,
        category: FindingCategory,
        subject: Option<&str>,
        message: impl Into<String>,
    ) {
        self.items.push(Finding {
            severity: Severity::Error,
            category,
            subject: subject.map(str::to_string),
            message: message.into(),
        });
    }

    pub fn warning(
        &mut self,
        category: FindingCategory,
        subject: Option<&str>,
        message: impl Into<String>,
    ) {
        self.items.push(Finding {
            severity: Severity::Warning,
            category,
            subject: subject.map(str::to_string),
            message: message.into(),
        });
    }

    /// Append another collector's findings, preserving their order.
    pub fn merge(&mut self, other: Findings) {
        self.items.extend(other.items);
    }

    pub fn error_count(&self) -> usize {
        self.items
            .iter()
            .filter(|f| f.severity == Severity::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.items
            .iter()
            .filter(|f| f.severity == Severity::Warning)
            .count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Finding> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_vec(self) -> Vec<Finding> {
        self.items
    }
}

/// Cap-and-rollup reporter for one violation category.
///
/// The first [`DETAIL_CAP`] violations are reported individually; `flush`
/// emits a single aggregate finding carrying the remaining count.
#[derive(Debug)]
pub struct Rollup {
    severity: Severity,
    category: FindingCategory,
    /// Plural noun for the rollup message, e.g. "dangling source references".
    what: &'static str,
    cap: usize,
    total: usize,
}

impl Rollup {
    pub fn new(severity: Severity, category: FindingCategory, what: &'static str) -> Self {
        Self {
            severity,
            category,
            what,
            cap: DETAIL_CAP,
            total: 0,
        }
    }

    /// Record one violation. Reported individually while under the cap.
    pub fn record(&mut self, findings: &mut Findings, subject: Option<&str>, message: String) {
        if self.total < self.cap {
            findings.push(Finding {
                severity: self.severity,
                category: self.category,
                subject: subject.map(str::to_string),
                message,
            });
        }
        self.total += 1;
    }

    /// Total violations recorded, shown or not.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Emit the aggregate finding if any violations were suppressed.
    pub fn flush(self, findings: &mut Findings) {
        if self.total > self.cap {
            findings.push(Finding {
                severity: self.severity,
                category: self.category,
                subject: None,
                message: format!("{} more {} not shown", self.total - self.cap, self.what),
            });
        }
    }
}
