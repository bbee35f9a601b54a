//! Collection loading: JSON files → permissive raw records.
//!
//! A missing file degrades to an empty collection with a warning so one absent
//! dataset does not block validation of the rest. A file that cannot be parsed
//! into a list at all is isolated the same way but surfaces as an error. A
//! single malformed record inside an otherwise well-formed list costs one
//! finding, not the collection.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info};

use crate::dataset::manifest::{CollectionKind, CollectionSpec, DatasetManifest};
use crate::dataset::model::{RawEntity, RawPerson, RawRelationship};
use crate::validate::findings::{FindingCategory, Findings};

/// Maximum characters of a record echoed back in a finding message.
const SNIPPET_LEN: usize = 60;

/// Records of one loaded collection, typed by the collection's kind.
#[derive(Debug)]
pub enum CollectionRecords {
    Persons(Vec<RawPerson>),
    Entities(Vec<RawEntity>),
    Relationships(Vec<RawRelationship>),
}

impl CollectionRecords {
    pub fn len(&self) -> usize {
        match self {
            Self::Persons(v) => v.len(),
            Self::Entities(v) => v.len(),
            Self::Relationships(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One collection after loading.
#[derive(Debug)]
pub struct LoadedCollection {
    pub name: String,
    pub kind: CollectionKind,
    pub records: CollectionRecords,
}

/// The full dataset snapshot consumed by validation and analytics.
///
/// Immutable for the duration of a run; all defects live in `findings`.
#[derive(Debug)]
pub struct LoadedDataset {
    pub collections: Vec<LoadedCollection>,
    pub findings: Findings,
}

impl LoadedDataset {
    /// Iterate collections of one kind, in manifest order.
    pub fn of_kind(&self, kind: CollectionKind) -> impl Iterator<Item = &LoadedCollection> {
        self.collections.iter().filter(move |c| c.kind == kind)
    }
}

/// Load every collection named by the manifest, in manifest order.
pub fn load_dataset(manifest: &DatasetManifest) -> LoadedDataset {
    let mut findings = Findings::new();
    let mut collections = Vec::with_capacity(manifest.collections.len());

    for spec in &manifest.collections {
        let records = load_collection(spec, &mut findings);
        debug!(
            collection = %spec.name,
            kind = %spec.kind,
            records = records.len(),
            "loaded collection"
        );
        collections.push(LoadedCollection {
            name: spec.name.clone(),
            kind: spec.kind,
            records,
        });
    }

    let total: usize = collections.iter().map(|c| c.records.len()).sum();
    info!(
        collections = collections.len(),
        records = total,
        "dataset loaded"
    );

    LoadedDataset {
        collections,
        findings,
    }
}

fn load_collection(spec: &CollectionSpec, findings: &mut Findings) -> CollectionRecords {
    match spec.kind {
        CollectionKind::Persons => {
            CollectionRecords::Persons(load_records(spec, "person", findings))
        }
        CollectionKind::Entities => {
            CollectionRecords::Entities(load_records(spec, "entity", findings))
        }
        CollectionKind::PersonPerson
        | CollectionKind::PersonEntity
        | CollectionKind::EntityEntity => {
            CollectionRecords::Relationships(load_records(spec, "relationship", findings))
        }
    }
}

/// Read one JSON list file into raw records of type `T`.
///
/// Degradation ladder: missing file → empty + warning; unreadable or
/// unparsable file → empty + error; malformed element → skipped + error.
fn load_records<T: DeserializeOwned>(
    spec: &CollectionSpec,
    what: &str,
    findings: &mut Findings,
) -> Vec<T> {
    let path: &Path = &spec.path;

    if !path.exists() {
        findings.warning(
            FindingCategory::Load,
            None,
            format!(
                "collection \"{}\" missing at {} (treated as empty)",
                spec.name,
                path.display()
            ),
        );
        return Vec::new();
    }

    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            findings.error(
                FindingCategory::Load,
                None,
                format!("failed to read collection \"{}\": {e}", spec.name),
            );
            return Vec::new();
        }
    };

    let values: Vec<Value> = match serde_json::from_str(&content) {
        Ok(values) => values,
        Err(e) => {
            findings.error(
                FindingCategory::Load,
                None,
                format!(
                    "failed to parse collection \"{}\" as a JSON list: {e}",
                    spec.name
                ),
            );
            return Vec::new();
        }
    };

    let mut records = Vec::with_capacity(values.len());
    for value in values {
        match serde_json::from_value::<T>(value.clone()) {
            Ok(record) => records.push(record),
            Err(e) => {
                findings.error(
                    FindingCategory::Schema,
                    None,
                    format!(
                        "malformed {what} record in \"{}\": {} ({e})",
                        spec.name,
                        truncate_snippet(&value.to_string())
                    ),
                );
            }
        }
    }
    records
}

/// Truncate a record echo to a readable length on a char boundary.
pub(crate) fn truncate_snippet(s: &str) -> String {
    if s.chars().count() <= SNIPPET_LEN {
        return s.to_string();
    }
    let cut: String = s.chars().take(SNIPPET_LEN).collect();
    format!("{cut}...")
}
