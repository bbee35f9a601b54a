//! Dataset manifest: which collections to load, parsed from `doxograph.toml`.
//!
//! The manifest maps logical collection names to JSON files and declares each
//! collection's kind. Relative paths resolve against the manifest's directory.
//! When no manifest exists, [`DatasetManifest::conventional`] supplies the
//! standard five-file layout.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ManifestError;

/// What a collection contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CollectionKind {
    /// Person node records.
    Persons,
    /// Entity node records (ideologies, events, texts, ...).
    Entities,
    /// Person → person relationship edges.
    PersonPerson,
    /// Person → entity relationship edges.
    PersonEntity,
    /// Entity → entity relationship edges.
    EntityEntity,
}

impl CollectionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Persons => "persons",
            Self::Entities => "entities",
            Self::PersonPerson => "person-person",
            Self::PersonEntity => "person-entity",
            Self::EntityEntity => "entity-entity",
        }
    }

    /// Whether this collection holds node records (as opposed to edges).
    pub fn is_node(&self) -> bool {
        matches!(self, Self::Persons | Self::Entities)
    }

    pub fn is_edge(&self) -> bool {
        !self.is_node()
    }
}

impl std::fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single collection entry in the manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionSpec {
    /// Logical name used in findings and report sections (e.g., "persons").
    pub name: String,
    /// What the collection contains.
    pub kind: CollectionKind,
    /// JSON file backing the collection.
    pub path: PathBuf,
}

/// The full dataset manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetManifest {
    #[serde(rename = "collection")]
    pub collections: Vec<CollectionSpec>,
}

impl DatasetManifest {
    /// Load and validate a manifest from a TOML file.
    ///
    /// Relative collection paths are resolved against the manifest's directory.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        if !path.exists() {
            return Err(ManifestError::NotFound {
                path: path.display().to_string(),
            });
        }
        let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let mut manifest: DatasetManifest =
            toml::from_str(&content).map_err(|e| ManifestError::Parse {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        manifest.check()?;

        if let Some(base) = path.parent() {
            for spec in &mut manifest.collections {
                if spec.path.is_relative() {
                    spec.path = base.join(&spec.path);
                }
            }
        }
        Ok(manifest)
    }

    /// The conventional layout: five collections under `data_dir`.
    pub fn conventional(data_dir: &Path) -> Self {
        let spec = |name: &str, kind, file: &str| CollectionSpec {
            name: name.to_string(),
            kind,
            path: data_dir.join(file),
        };
        Self {
            collections: vec![
                spec("persons", CollectionKind::Persons, "persons.json"),
                spec("entities", CollectionKind::Entities, "entities.json"),
                spec(
                    "relationships",
                    CollectionKind::PersonPerson,
                    "relationships.json",
                ),
                spec(
                    "person-entity-relationships",
                    CollectionKind::PersonEntity,
                    "person_entity_relationships.json",
                ),
                spec(
                    "entity-relationships",
                    CollectionKind::EntityEntity,
                    "entity_relationships.json",
                ),
            ],
        }
    }

    /// Structural checks: non-empty, unique collection names.
    fn check(&self) -> Result<(), ManifestError> {
        if self.collections.is_empty() {
            return Err(ManifestError::Empty);
        }
        let mut seen = std::collections::HashSet::new();
        for spec in &self.collections {
            if !seen.insert(spec.name.as_str()) {
                return Err(ManifestError::DuplicateCollection {
                    name: spec.name.clone(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conventional_layout_has_five_collections() {
        let manifest = DatasetManifest::conventional(Path::new("data"));
        assert_eq!(manifest.collections.len(), 5);
        assert_eq!(manifest.collections[0].kind, CollectionKind::Persons);
        assert!(manifest.collections[0].path.ends_with("persons.json"));
    }

    #[test]
    fn load_parses_toml_and_resolves_relative_paths() {
        let dir = tempfile::TempDir::new().unwrap();
        let manifest_path = dir.path().join("doxograph.toml");
        std::fs::write(
            &manifest_path,
            r#"
            [[collection]]
            name = "persons"
            kind = "persons"
            path = "nodes/persons.json"

            [[collection]]
            name = "links"
            kind = "person-person"
            path = "edges/links.json"
            "#,
        )
        .unwrap();

        let manifest = DatasetManifest::load(&manifest_path).unwrap();
        assert_eq!(manifest.collections.len(), 2);
        assert_eq!(
            manifest.collections[0].path,
            dir.path().join("nodes/persons.json")
        );
        assert!(manifest.collections[1].kind.is_edge());
    }

    #[test]
    fn load_rejects_duplicate_names() {
        let dir = tempfile::TempDir::new().unwrap();
        let manifest_path = dir.path().join("doxograph.toml");
        std::fs::write(
            &manifest_path,
            r#"
            [[collection]]
            name = "persons"
            kind = "persons"
            path = "a.json"

            [[collection]]
            name = "persons"
            kind = "entities"
            path = "b.json"
            "#,
        )
        .unwrap();

        let err = DatasetManifest::load(&manifest_path).unwrap_err();
        assert!(matches!(err, ManifestError::DuplicateCollection { .. }));
    }

    #[test]
    fn load_missing_manifest_is_not_found() {
        let err = DatasetManifest::load(Path::new("/nonexistent/doxograph.toml")).unwrap_err();
        assert!(matches!(err, ManifestError::NotFound { .. }));
    }
}
