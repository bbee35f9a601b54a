//! Edge validation: field presence, referential integrity, self-loops,
//! duplicate triples, and conditional type-vocabulary checks.
//!
//! Dangling-reference and duplicate-triple findings are capped per category
//! with a rollup carrying the remaining count, so a dataset with hundreds of
//! broken references still produces a readable report without losing the
//! total-count signal.

use std::collections::HashSet;

use crate::dataset::loader::{truncate_snippet, LoadedCollection};
use crate::dataset::model::{NodeKind, RawRelationship, Relationship};
use crate::validate::findings::{FindingCategory, Findings, Rollup, Severity};
use crate::validate::registry::IdentityRegistry;

// Relationship type vocabularies, one per endpoint-kind pairing.
const PERSON_PERSON_TYPES: &[&str] = &[
    "influenced",
    "taught",
    "opposed",
    "collaborated",
    "contemporary",
    "family",
    "succeeded",
];
const PERSON_ENTITY_TYPES: &[&str] = &[
    "founded",
    "authored",
    "led",
    "member_of",
    "practiced",
    "opposed",
    "influenced",
    "participated_in",
];
const ENTITY_ENTITY_TYPES: &[&str] = &[
    "derived_from",
    "influenced",
    "opposed",
    "part_of",
    "preceded",
    "merged_into",
    "inspired",
];

/// Allowed strength range for weighted relationships.
const STRENGTH_RANGE: std::ops::RangeInclusive<i64> = 1..=3;

/// Result of validating all edge collections.
#[derive(Debug, Default)]
pub struct RelationshipOutcome {
    /// Edges that passed every error-severity check.
    pub valid: Vec<Relationship>,
    /// Endpoint pairs of every edge record carrying both endpoints,
    /// for undirected degree counting and component analysis.
    pub edge_pairs: Vec<(String, String)>,
}

/// Validate every edge in every relationship collection, in collection order.
pub fn validate_relationships(
    collections: &[&LoadedCollection],
    registry: &IdentityRegistry,
    findings: &mut Findings,
) -> RelationshipOutcome {
    let mut outcome = RelationshipOutcome::default();
    let mut seen_triples: HashSet<(String, String, String)> = HashSet::new();

    let mut dangling_sources = Rollup::new(
        Severity::Error,
        FindingCategory::Relationship,
        "dangling source references",
    );
    let mut dangling_targets = Rollup::new(
        Severity::Error,
        FindingCategory::Relationship,
        "dangling target references",
    );
    let mut duplicates = Rollup::new(
        Severity::Warning,
        FindingCategory::Relationship,
        "duplicate relationships",
    );

    for collection in collections {
        let edges = match &collection.records {
            crate::dataset::loader::CollectionRecords::Relationships(edges) => edges,
            _ => continue,
        };
        for raw in edges {
            validate_edge(
                raw,
                registry,
                &mut seen_triples,
                &mut dangling_sources,
                &mut dangling_targets,
                &mut duplicates,
                findings,
                &mut outcome,
            );
        }
    }

    dangling_sources.flush(findings);
    dangling_targets.flush(findings);
    duplicates.flush(findings);
    outcome
}

#[allow(clippy::too_many_arguments)]
fn validate_edge(
    raw: &RawRelationship,
    registry: &IdentityRegistry,
    seen_triples: &mut HashSet<(String, String, String)>,
    dangling_sources: &mut Rollup,
    dangling_targets: &mut Rollup,
    duplicates: &mut Rollup,
    findings: &mut Findings,
    outcome: &mut RelationshipOutcome,
) {
    let subject = edge_subject(raw);
    let mut ok = true;

    // Field presence. Each missing field is its own error.
    for (value, field) in [
        (&raw.source, "source"),
        (&raw.target, "target"),
        (&raw.kind, "type"),
    ] {
        if value.as_deref().is_none_or(|s| s.trim().is_empty()) {
            findings.error(
                FindingCategory::Relationship,
                Some(&subject),
                format!("missing required field: {field}"),
            );
            ok = false;
        }
    }

    let source = raw.source.as_deref().filter(|s| !s.trim().is_empty());
    let target = raw.target.as_deref().filter(|s| !s.trim().is_empty());

    // Self-reference prohibition: always exactly one error, regardless of
    // how presence or referential checks resolved.
    if let (Some(s), Some(t)) = (source, target) {
        outcome.edge_pairs.push((s.to_string(), t.to_string()));
        if s == t {
            findings.error(
                FindingCategory::Relationship,
                Some(s),
                format!("self-referencing relationship: {s}"),
            );
            ok = false;
        }
    }

    // Referential integrity, capped with rollups.
    if let Some(s) = source {
        if !registry.contains(s) {
            dangling_sources.record(
                findings,
                Some(s),
                format!("dangling source reference: \"{s}\""),
            );
            ok = false;
        }
    }
    if let Some(t) = target {
        if !registry.contains(t) {
            dangling_targets.record(
                findings,
                Some(t),
                format!("dangling target reference: \"{t}\""),
            );
            ok = false;
        }
    }

    // Duplicate (source, target, type) triples: each repeat is a warning.
    if let (Some(s), Some(t), Some(k)) = (source, target, raw.kind.as_deref()) {
        let triple = (s.to_string(), t.to_string(), k.to_string());
        if !seen_triples.insert(triple) {
            duplicates.record(
                findings,
                Some(&subject),
                format!("duplicate relationship: {s} -[{k}]-> {t}"),
            );
        }
    }

    // Type vocabulary, conditional on both endpoint kinds being declared.
    // Edges without declared kinds skip this check silently.
    if let (Some(sk), Some(tk), Some(kind)) = (
        raw.source_kind.as_deref().and_then(NodeKind::parse),
        raw.target_kind.as_deref().and_then(NodeKind::parse),
        raw.kind.as_deref(),
    ) {
        let vocabulary = vocabulary_for(sk, tk);
        if !vocabulary.contains(&kind) {
            findings.error(
                FindingCategory::Relationship,
                Some(&subject),
                format!(
                    "relationship type \"{kind}\" not valid for {sk}-{tk} edges \
                     (allowed: {})",
                    vocabulary.join(", ")
                ),
            );
            ok = false;
        }
    }

    // Strength is advisory metadata; out-of-range values are warnings.
    if let Some(strength) = raw.strength {
        if !STRENGTH_RANGE.contains(&strength) {
            findings.warning(
                FindingCategory::Relationship,
                Some(&subject),
                format!("strength {strength} out of range 1..=3"),
            );
        }
    }

    if ok {
        outcome.valid.push(Relationship {
            source: raw.source.clone().unwrap_or_default(),
            target: raw.target.clone().unwrap_or_default(),
            kind: raw.kind.clone().unwrap_or_default(),
            description: raw.description.clone(),
            strength: raw.strength,
        });
    }
}

/// Vocabulary for an endpoint-kind pairing. Mixed pairings share the
/// person-entity vocabulary in either direction.
fn vocabulary_for(source: NodeKind, target: NodeKind) -> &'static [&'static str] {
    match (source, target) {
        (NodeKind::Person, NodeKind::Person) => PERSON_PERSON_TYPES,
        (NodeKind::Entity, NodeKind::Entity) => ENTITY_ENTITY_TYPES,
        _ => PERSON_ENTITY_TYPES,
    }
}

/// Finding subject for an edge: "source -> target" when both are present,
/// otherwise a truncated echo of the record.
fn edge_subject(raw: &RawRelationship) -> String {
    match (&raw.source, &raw.target) {
        (Some(s), Some(t)) => format!("{s} -> {t}"),
        _ => truncate_snippet(&serde_json::to_string(raw).unwrap_or_default()),
    }
}
