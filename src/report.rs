//! Report assembly: findings + analytics → a single structured report with a
//! three-way outcome.
//!
//! Presentation (console formatting, exit codes) belongs to the CLI; this
//! module owns only the structured content and the outcome classification.
//! Errors block publication, warnings are advisory, and a warning-free run is
//! distinguished from a warning-bearing one.

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::{DoxaResult, ReportError};
use crate::graph::{
    analytics, ComponentStats, DegreeEntry, DegreeSummary, DistributionBucket, KnowledgeGraph,
};
use crate::validate::{CollectionSummary, Finding, ValidatedDataset};

/// How many nodes the connectivity ranking reports.
pub const TOP_K: usize = 10;

/// How many orphan ids are previewed per kind before eliding to a count.
pub const ORPHAN_PREVIEW: usize = 10;

/// Overall run classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Outcome {
    /// Structural errors present; publication must be blocked.
    #[serde(rename = "fail")]
    Fail,
    /// No errors, but advisory warnings exist.
    #[serde(rename = "pass-with-warnings")]
    PassWithWarnings,
    /// No findings at all.
    #[serde(rename = "clean-pass")]
    CleanPass,
}

impl Outcome {
    pub fn classify(errors: usize, warnings: usize) -> Outcome {
        if errors > 0 {
            Outcome::Fail
        } else if warnings > 0 {
            Outcome::PassWithWarnings
        } else {
            Outcome::CleanPass
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Fail)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fail => "fail",
            Self::PassWithWarnings => "pass-with-warnings",
            Self::CleanPass => "clean-pass",
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Capped orphan listing: a preview plus the full count.
#[derive(Debug, Clone, Serialize)]
pub struct OrphanList {
    pub preview: Vec<String>,
    pub total: usize,
}

impl OrphanList {
    fn capped(mut ids: Vec<String>) -> Self {
        let total = ids.len();
        ids.truncate(ORPHAN_PREVIEW);
        Self {
            preview: ids,
            total,
        }
    }
}

/// The full structured validation report.
#[derive(Debug, Serialize)]
pub struct ValidationReport {
    pub outcome: Outcome,
    pub errors: usize,
    pub warnings: usize,
    pub findings: Vec<Finding>,

    // Dataset totals.
    pub persons: usize,
    pub entities: usize,
    pub relationships: usize,
    /// Edge record counts keyed by collection kind.
    pub relationships_by_kind: IndexMap<String, usize>,
    pub unique_nodes: usize,
    pub collections: Vec<CollectionSummary>,

    // Analytics.
    pub degree_distribution: Vec<DistributionBucket>,
    pub orphan_persons: OrphanList,
    pub orphan_entities: OrphanList,
    pub top_connected: Vec<DegreeEntry>,
    pub degree_summary: DegreeSummary,
    pub components: ComponentStats,
}

impl ValidationReport {
    /// Assemble the report from validation output and the analytics graph.
    pub fn build(validated: ValidatedDataset, kg: &KnowledgeGraph) -> Self {
        let errors = validated.findings.error_count();
        let warnings = validated.findings.warning_count();

        let mut relationships_by_kind: IndexMap<String, usize> = IndexMap::new();
        let mut relationships = 0usize;
        for summary in &validated.collections {
            if summary.kind.is_edge() {
                *relationships_by_kind
                    .entry(summary.kind.as_str().to_string())
                    .or_default() += summary.records;
                relationships += summary.records;
            }
        }

        let person_records: usize = validated
            .collections
            .iter()
            .filter(|c| c.kind == crate::dataset::CollectionKind::Persons)
            .map(|c| c.records)
            .sum();
        let entity_records: usize = validated
            .collections
            .iter()
            .filter(|c| c.kind == crate::dataset::CollectionKind::Entities)
            .map(|c| c.records)
            .sum();

        let orphan_sets = analytics::orphans(kg);

        Self {
            outcome: Outcome::classify(errors, warnings),
            errors,
            warnings,
            persons: person_records,
            entities: entity_records,
            relationships,
            relationships_by_kind,
            unique_nodes: validated.registry.len(),
            degree_distribution: analytics::degree_distribution(kg),
            orphan_persons: OrphanList::capped(orphan_sets.persons),
            orphan_entities: OrphanList::capped(orphan_sets.entities),
            top_connected: analytics::top_connected(kg, TOP_K),
            degree_summary: analytics::degree_summary(kg),
            components: analytics::components(kg),
            collections: validated.collections,
            findings: validated.findings.into_vec(),
        }
    }

    /// Serialize the full report as pretty JSON for external consumers.
    pub fn to_json(&self) -> DoxaResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ReportError::Serialize {
                message: e.to_string(),
            }
            .into()
        })
    }
}
