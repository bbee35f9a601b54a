//! Identity registry: the set of known node identifiers with provenance.
//!
//! Insertion order is preserved so downstream ordering (connectivity
//! tie-breaks, orphan previews) is deterministic for a given dataset. The
//! first occurrence of an identifier is canonical; every later occurrence is
//! reported and dropped, so N occurrences of one id yield exactly N−1
//! duplicate errors.

use indexmap::IndexMap;

use crate::dataset::model::NodeKind;
use crate::validate::findings::{FindingCategory, Findings};

/// Registry entry for one known identifier.
#[derive(Debug, Clone)]
pub struct NodeEntry {
    pub kind: NodeKind,
    /// Resolved display name (English, falling back to Korean, then the id).
    pub display: String,
}

/// All known node identifiers across both node kinds.
#[derive(Debug, Default)]
pub struct IdentityRegistry {
    entries: IndexMap<String, NodeEntry>,
}

impl IdentityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an identifier, reporting duplicates and cross-kind collisions.
    pub fn register(
        &mut self,
        id: &str,
        kind: NodeKind,
        display: String,
        findings: &mut Findings,
    ) {
        if let Some(existing) = self.entries.get(id) {
            if existing.kind == kind {
                findings.error(
                    FindingCategory::Identity,
                    Some(id),
                    format!("duplicate {kind} ID: \"{id}\""),
                );
            } else {
                findings.error(
                    FindingCategory::Identity,
                    Some(id),
                    format!(
                        "identifier collision: \"{id}\" appears as both a {} and a {}",
                        existing.kind, kind
                    ),
                );
            }
            return;
        }
        self.entries.insert(id.to_string(), NodeEntry { kind, display });
    }

    /// Membership test for relationship endpoint resolution.
    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn kind_of(&self, id: &str) -> Option<NodeKind> {
        self.entries.get(id).map(|e| e.kind)
    }

    /// Resolve a display name, falling back to the raw identifier.
    pub fn display<'a>(&'a self, id: &'a str) -> &'a str {
        self.entries.get(id).map(|e| e.display.as_str()).unwrap_or(id)
    }

    /// Known identifiers with their entries, in first-appearance order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &NodeEntry)> {
        self.entries.iter().map(|(id, entry)| (id.as_str(), entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry_with(ids: &[(&str, NodeKind)]) -> (IdentityRegistry, Findings) {
        let mut registry = IdentityRegistry::new();
        let mut findings = Findings::new();
        for (id, kind) in ids {
            registry.register(id, *kind, id.to_string(), &mut findings);
        }
        (registry, findings)
    }

    #[test]
    fn registers_distinct_ids_without_findings() {
        let (registry, findings) = registry_with(&[
            ("socrates", NodeKind::Person),
            ("stoicism", NodeKind::Entity),
        ]);
        assert_eq!(registry.len(), 2);
        assert!(findings.is_empty());
        assert_eq!(registry.kind_of("socrates"), Some(NodeKind::Person));
    }

    #[test]
    fn n_occurrences_yield_n_minus_one_duplicates() {
        let (registry, findings) = registry_with(&[
            ("stoicism", NodeKind::Entity),
            ("stoicism", NodeKind::Entity),
            ("stoicism", NodeKind::Entity),
        ]);
        assert_eq!(registry.len(), 1);
        assert_eq!(findings.error_count(), 2);
        assert!(findings.iter().all(|f| f.message.contains("duplicate entity ID")));
    }

    #[test]
    fn cross_kind_collision_is_a_distinct_error() {
        let (registry, findings) = registry_with(&[
            ("stoicism", NodeKind::Person),
            ("stoicism", NodeKind::Entity),
        ]);
        // First occurrence stays canonical.
        assert_eq!(registry.kind_of("stoicism"), Some(NodeKind::Person));
        assert_eq!(findings.error_count(), 1);
        let finding = findings.iter().next().unwrap();
        assert!(finding.message.contains("collision"));
    }

    #[test]
    fn display_falls_back_to_id_for_unknown() {
        let (registry, _) = registry_with(&[("socrates", NodeKind::Person)]);
        assert_eq!(registry.display("socrates"), "socrates");
        assert_eq!(registry.display("atlantis-myth"), "atlantis-myth");
    }
}
