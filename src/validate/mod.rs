//! Validation pipeline: schema → identity → relationships.
//!
//! Schema validation runs per collection in parallel; each collection gets its
//! own findings collector and the collectors are merged in manifest order, so
//! the report is deterministic for a given input regardless of scheduling.
//! Identity registration and relationship validation are order-sensitive
//! (first occurrence wins, rollup caps) and run sequentially.

pub mod findings;
pub mod registry;
pub mod relationship;
pub mod schema;

use rayon::prelude::*;
use tracing::debug;

pub use findings::{Finding, FindingCategory, Findings, Rollup, Severity, DETAIL_CAP};
pub use registry::{IdentityRegistry, NodeEntry};
pub use relationship::{validate_relationships, RelationshipOutcome};
pub use schema::{validate_entity, validate_person};

use crate::dataset::loader::{CollectionRecords, LoadedCollection, LoadedDataset};
use crate::dataset::manifest::CollectionKind;
use crate::dataset::model::{Entity, NodeKind, Person, RawName, Relationship};

/// Per-collection record count, kept for the report.
#[derive(Debug, Clone, serde::Serialize)]
pub struct CollectionSummary {
    pub name: String,
    pub kind: CollectionKind,
    pub records: usize,
}

/// Everything validation produces: the complete ordered finding list plus the
/// typed survivors that feed analytics.
#[derive(Debug)]
pub struct ValidatedDataset {
    pub findings: Findings,
    pub persons: Vec<Person>,
    pub entities: Vec<Entity>,
    /// Edges that passed every error-severity check.
    pub relationships: Vec<Relationship>,
    /// Endpoint pairs of all edge records, for degree counting.
    pub edge_pairs: Vec<(String, String)>,
    pub registry: IdentityRegistry,
    pub collections: Vec<CollectionSummary>,
}

/// Run the full validation pipeline over a loaded dataset snapshot.
pub fn validate(dataset: LoadedDataset) -> ValidatedDataset {
    let LoadedDataset {
        collections,
        findings: load_findings,
    } = dataset;

    let mut findings = Findings::new();
    findings.merge(load_findings);

    let summaries: Vec<CollectionSummary> = collections
        .iter()
        .map(|c| CollectionSummary {
            name: c.name.clone(),
            kind: c.kind,
            records: c.records.len(),
        })
        .collect();

    // Schema stage: independent per collection, findings merged in manifest
    // order after the parallel pass.
    let mut persons = Vec::new();
    let mut entities = Vec::new();
    let schema_results: Vec<(Vec<Person>, Vec<Entity>, Findings)> = collections
        .par_iter()
        .map(validate_collection_schema)
        .collect();
    for (mut collection_persons, mut collection_entities, collection_findings) in schema_results {
        persons.append(&mut collection_persons);
        entities.append(&mut collection_entities);
        findings.merge(collection_findings);
    }
    debug!(
        persons = persons.len(),
        entities = entities.len(),
        "schema validation complete"
    );

    // Identity stage: sequential, first occurrence canonical.
    let mut registry = IdentityRegistry::new();
    for collection in &collections {
        match &collection.records {
            CollectionRecords::Persons(list) => {
                for raw in list {
                    if let Some(id) = nonempty(&raw.id) {
                        let display = display_name(raw.name.as_ref(), id);
                        registry.register(id, NodeKind::Person, display, &mut findings);
                    }
                }
            }
            CollectionRecords::Entities(list) => {
                for raw in list {
                    if let Some(id) = nonempty(&raw.id) {
                        let display = display_name(raw.name.as_ref(), id);
                        registry.register(id, NodeKind::Entity, display, &mut findings);
                    }
                }
            }
            CollectionRecords::Relationships(_) => {}
        }
    }
    debug!(known_ids = registry.len(), "identity registry built");

    // Relationship stage: sequential, shares one duplicate set and one
    // rollup per violation category across all edge collections.
    let edge_collections: Vec<&LoadedCollection> = collections
        .iter()
        .filter(|c| c.kind.is_edge())
        .collect();
    let relationship_outcome = validate_relationships(&edge_collections, &registry, &mut findings);

    ValidatedDataset {
        findings,
        persons,
        entities,
        relationships: relationship_outcome.valid,
        edge_pairs: relationship_outcome.edge_pairs,
        registry,
        collections: summaries,
    }
}

fn validate_collection_schema(
    collection: &LoadedCollection,
) -> (Vec<Person>, Vec<Entity>, Findings) {
    let mut local = Findings::new();
    match &collection.records {
        CollectionRecords::Persons(list) => {
            let persons = list
                .iter()
                .filter_map(|raw| schema::validate_person(raw, &mut local))
                .collect();
            (persons, Vec::new(), local)
        }
        CollectionRecords::Entities(list) => {
            let entities = list
                .iter()
                .filter_map(|raw| schema::validate_entity(raw, &mut local))
                .collect();
            (Vec::new(), entities, local)
        }
        CollectionRecords::Relationships(_) => (Vec::new(), Vec::new(), local),
    }
}

fn nonempty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}

/// English name, falling back to Korean, then the identifier itself.
fn display_name(name: Option<&RawName>, id: &str) -> String {
    name.and_then(|n| n.en.clone().or_else(|| n.ko.clone()))
        .unwrap_or_else(|| id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::loader::load_dataset;
    use crate::dataset::manifest::DatasetManifest;

    fn write_dataset(dir: &std::path::Path, persons: &str, entities: &str, relationships: &str) {
        std::fs::write(dir.join("persons.json"), persons).unwrap();
        std::fs::write(dir.join("entities.json"), entities).unwrap();
        std::fs::write(dir.join("relationships.json"), relationships).unwrap();
    }

    fn validate_dir(dir: &std::path::Path) -> ValidatedDataset {
        let manifest = DatasetManifest::conventional(dir);
        validate(load_dataset(&manifest))
    }

    const PERSONS: &str = r#"[
        {"id": "socrates", "name": {"ko": "소크라테스", "en": "Socrates"},
         "era": "ancient", "category": "philosopher",
         "summary": "A classical Greek philosopher."},
        {"id": "plato", "name": {"ko": "플라톤", "en": "Plato"},
         "era": "ancient", "category": "philosopher",
         "summary": "Student of Socrates, founder of the Academy."}
    ]"#;

    const ENTITIES: &str = r#"[
        {"id": "stoicism", "name": {"ko": "스토아 학파", "en": "Stoicism"},
         "type": "ideology", "summary": "A school of Hellenistic philosophy."}
    ]"#;

    #[test]
    fn clean_dataset_produces_no_error_findings() {
        let dir = tempfile::TempDir::new().unwrap();
        write_dataset(
            dir.path(),
            PERSONS,
            ENTITIES,
            r#"[{"source": "socrates", "target": "plato", "type": "taught"}]"#,
        );
        let validated = validate_dir(dir.path());

        assert_eq!(validated.findings.error_count(), 0);
        assert_eq!(validated.persons.len(), 2);
        assert_eq!(validated.entities.len(), 1);
        assert_eq!(validated.relationships.len(), 1);
        assert_eq!(validated.registry.len(), 3);
        // Two of the five conventional files are absent: warnings only.
        assert_eq!(validated.findings.warning_count(), 2);
    }

    #[test]
    fn registry_uses_english_display_with_korean_fallback() {
        let dir = tempfile::TempDir::new().unwrap();
        write_dataset(
            dir.path(),
            PERSONS,
            r#"[{"id": "stoicism", "name": {"ko": "스토아 학파"},
                 "type": "ideology", "summary": "A school of Hellenistic philosophy."}]"#,
            "[]",
        );
        let validated = validate_dir(dir.path());
        assert_eq!(validated.registry.display("socrates"), "Socrates");
        assert_eq!(validated.registry.display("stoicism"), "스토아 학파");
    }

    #[test]
    fn cross_kind_collision_is_detected_across_collections() {
        let dir = tempfile::TempDir::new().unwrap();
        write_dataset(
            dir.path(),
            PERSONS,
            r#"[{"id": "socrates", "name": {"ko": "소크라테스"},
                 "type": "concept", "summary": "An id colliding with a person."}]"#,
            "[]",
        );
        let validated = validate_dir(dir.path());
        let collision = validated
            .findings
            .iter()
            .find(|f| f.message.contains("collision"))
            .expect("collision finding");
        assert_eq!(collision.subject.as_deref(), Some("socrates"));
        // First occurrence (the person) stays canonical.
        assert_eq!(validated.registry.kind_of("socrates"), Some(NodeKind::Person));
    }

    #[test]
    fn schema_findings_follow_manifest_collection_order() {
        let dir = tempfile::TempDir::new().unwrap();
        // Both collections contain one record with a missing summary.
        write_dataset(
            dir.path(),
            r#"[{"id": "a-person", "name": {"ko": "가", "en": "A"},
                 "era": "ancient", "category": "philosopher"}]"#,
            r#"[{"id": "b-entity", "name": {"ko": "나"}, "type": "concept"}]"#,
            "[]",
        );
        let validated = validate_dir(dir.path());
        let subjects: Vec<_> = validated
            .findings
            .iter()
            .filter(|f| f.message.contains("missing required field: summary"))
            .map(|f| f.subject.clone().unwrap())
            .collect();
        // Persons collection precedes entities in the manifest.
        assert_eq!(subjects, vec!["a-person", "b-entity"]);
    }

    #[test]
    fn every_valid_relationship_has_resolved_endpoints() {
        let dir = tempfile::TempDir::new().unwrap();
        write_dataset(
            dir.path(),
            PERSONS,
            ENTITIES,
            r#"[{"source": "socrates", "target": "plato", "type": "taught"},
                {"source": "plato", "target": "ghost", "type": "influenced"},
                {"source": "plato", "target": "stoicism", "type": "influenced"}]"#,
        );
        let validated = validate_dir(dir.path());

        // The dangling edge is excluded; the survivors all resolve.
        assert_eq!(validated.relationships.len(), 2);
        for edge in &validated.relationships {
            assert!(validated.registry.contains(&edge.source));
            assert!(validated.registry.contains(&edge.target));
        }
    }

    #[test]
    fn dangling_reference_to_schema_invalid_record_still_resolves() {
        // A record failing schema validation still contributes its id to the
        // registry, so edges pointing at it are not reported as dangling.
        let dir = tempfile::TempDir::new().unwrap();
        write_dataset(
            dir.path(),
            r#"[{"id": "broken", "name": {"ko": "고장", "en": "Broken"},
                 "era": "mythic", "category": "philosopher",
                 "summary": "Era fails the enumeration check."},
                {"id": "socrates", "name": {"ko": "소크라테스", "en": "Socrates"},
                 "era": "ancient", "category": "philosopher",
                 "summary": "A classical Greek philosopher."}]"#,
            "[]",
            r#"[{"source": "socrates", "target": "broken", "type": "influenced"}]"#,
        );
        let validated = validate_dir(dir.path());
        assert!(validated
            .findings
            .iter()
            .all(|f| !f.message.contains("dangling")));
        assert_eq!(validated.persons.len(), 1);
        assert_eq!(validated.registry.len(), 2);
    }
}
