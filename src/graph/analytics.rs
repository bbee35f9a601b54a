//! Graph analytics: degree distribution, orphan sets, connectivity ranking,
//! and component statistics.
//!
//! All functions operate on a [`KnowledgeGraph`] reference and return
//! structured results with deterministic ordering: dataset first-appearance
//! order for ties, ascending degree for the distribution.

use std::collections::BTreeMap;

use petgraph::unionfind::UnionFind;
use petgraph::visit::EdgeRef;
use serde::Serialize;

use crate::dataset::model::NodeKind;

use super::KnowledgeGraph;

// ---------------------------------------------------------------------------
// Degree counts and ranking
// ---------------------------------------------------------------------------

/// Degree measurement for a single node.
#[derive(Debug, Clone, Serialize)]
pub struct DegreeEntry {
    pub id: String,
    pub display: String,
    pub kind: NodeKind,
    /// Relationship records touching this node, counting both endpoint roles.
    pub degree: usize,
}

/// Top-K nodes by degree, descending; ties break by first appearance in the
/// dataset (stable sort over insertion order).
pub fn top_connected(kg: &KnowledgeGraph, k: usize) -> Vec<DegreeEntry> {
    let mut entries: Vec<DegreeEntry> = kg
        .iter()
        .map(|(id, meta, degree)| DegreeEntry {
            id: id.to_string(),
            display: meta.display.clone(),
            kind: meta.kind,
            degree,
        })
        .collect();
    entries.sort_by(|a, b| b.degree.cmp(&a.degree));
    entries.truncate(k);
    entries
}

// ---------------------------------------------------------------------------
// Degree distribution
// ---------------------------------------------------------------------------

/// One bucket of the degree histogram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DistributionBucket {
    pub degree: usize,
    pub nodes: usize,
}

/// Histogram of node counts per degree value, ascending by degree.
pub fn degree_distribution(kg: &KnowledgeGraph) -> Vec<DistributionBucket> {
    let mut histogram: BTreeMap<usize, usize> = BTreeMap::new();
    for (_, _, degree) in kg.iter() {
        *histogram.entry(degree).or_default() += 1;
    }
    histogram
        .into_iter()
        .map(|(degree, nodes)| DistributionBucket { degree, nodes })
        .collect()
}

// ---------------------------------------------------------------------------
// Orphans
// ---------------------------------------------------------------------------

/// Nodes touched by no relationship, split by kind, in dataset order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct OrphanSets {
    pub persons: Vec<String>,
    pub entities: Vec<String>,
}

pub fn orphans(kg: &KnowledgeGraph) -> OrphanSets {
    let mut sets = OrphanSets::default();
    for (id, meta, degree) in kg.iter() {
        if degree > 0 {
            continue;
        }
        match meta.kind {
            NodeKind::Person => sets.persons.push(id.to_string()),
            NodeKind::Entity => sets.entities.push(id.to_string()),
        }
    }
    sets
}

// ---------------------------------------------------------------------------
// Summary statistics
// ---------------------------------------------------------------------------

/// Aggregate degree statistics.
///
/// The median is the element at `floor(n/2)` of the descending-sorted degree
/// list: a "lower median" convention, kept as-is rather than averaging the
/// two middle elements for even n.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DegreeSummary {
    /// Mean degree, rounded to one decimal place.
    pub mean: f64,
    pub median: usize,
    pub max: usize,
}

pub fn degree_summary(kg: &KnowledgeGraph) -> DegreeSummary {
    let mut degrees: Vec<usize> = kg.iter().map(|(_, _, degree)| degree).collect();
    if degrees.is_empty() {
        return DegreeSummary {
            mean: 0.0,
            median: 0,
            max: 0,
        };
    }
    degrees.sort_by(|a, b| b.cmp(a));

    let total: usize = degrees.iter().sum();
    let mean = (total as f64 / degrees.len() as f64 * 10.0).round() / 10.0;
    let median = degrees[degrees.len() / 2];
    let max = degrees[0];

    DegreeSummary { mean, median, max }
}

// ---------------------------------------------------------------------------
// Connected components
// ---------------------------------------------------------------------------

/// Weakly-connected component statistics over the resolved edge structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ComponentStats {
    /// Number of components; every orphan is its own component.
    pub count: usize,
    /// Size of the largest component.
    pub largest: usize,
}

pub fn components(kg: &KnowledgeGraph) -> ComponentStats {
    let graph = kg.petgraph();
    if graph.node_count() == 0 {
        return ComponentStats {
            count: 0,
            largest: 0,
        };
    }

    let mut union = UnionFind::new(graph.node_count());
    for edge in graph.edge_references() {
        union.union(edge.source().index(), edge.target().index());
    }

    let labels = union.into_labeling();
    let mut sizes: BTreeMap<usize, usize> = BTreeMap::new();
    for label in labels {
        *sizes.entry(label).or_default() += 1;
    }

    ComponentStats {
        count: sizes.len(),
        largest: sizes.values().copied().max().unwrap_or(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::findings::Findings;
    use crate::validate::registry::IdentityRegistry;

    fn graph_of(nodes: &[(&str, NodeKind)], edges: &[(&str, &str)]) -> KnowledgeGraph {
        let mut registry = IdentityRegistry::new();
        let mut sink = Findings::new();
        for (id, kind) in nodes {
            registry.register(id, *kind, format!("Display-{id}"), &mut sink);
        }
        let pairs: Vec<(String, String)> = edges
            .iter()
            .map(|(s, t)| (s.to_string(), t.to_string()))
            .collect();
        KnowledgeGraph::build(&registry, &pairs)
    }

    fn star() -> KnowledgeGraph {
        // Hub connects to three spokes; one node floats free.
        graph_of(
            &[
                ("hub", NodeKind::Person),
                ("a", NodeKind::Person),
                ("b", NodeKind::Entity),
                ("c", NodeKind::Person),
                ("loner", NodeKind::Entity),
            ],
            &[("hub", "a"), ("hub", "b"), ("hub", "c")],
        )
    }

    #[test]
    fn top_connected_ranks_hub_first() {
        let ranked = top_connected(&star(), 3);
        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked[0].id, "hub");
        assert_eq!(ranked[0].degree, 3);
        assert_eq!(ranked[0].display, "Display-hub");
        // Degree-1 tie breaks by dataset order.
        assert_eq!(ranked[1].id, "a");
        assert_eq!(ranked[2].id, "b");
    }

    #[test]
    fn distribution_is_ascending_by_degree() {
        let buckets = degree_distribution(&star());
        assert_eq!(
            buckets,
            vec![
                DistributionBucket { degree: 0, nodes: 1 },
                DistributionBucket { degree: 1, nodes: 3 },
                DistributionBucket { degree: 3, nodes: 1 },
            ]
        );
    }

    #[test]
    fn orphan_sets_split_by_kind() {
        let sets = orphans(&star());
        assert!(sets.persons.is_empty());
        assert_eq!(sets.entities, vec!["loner"]);
    }

    #[test]
    fn no_node_with_positive_degree_is_an_orphan() {
        let kg = star();
        let sets = orphans(&kg);
        for (id, _, degree) in kg.iter() {
            if degree > 0 {
                assert!(!sets.persons.iter().any(|o| o == id));
                assert!(!sets.entities.iter().any(|o| o == id));
            }
        }
    }

    #[test]
    fn summary_uses_lower_median_of_descending_list() {
        // Degrees: 3, 1, 1, 1, 0 → descending, median index 5/2 = 2 → 1.
        let summary = degree_summary(&star());
        assert_eq!(summary.median, 1);
        assert_eq!(summary.max, 3);
        // Mean 6/5 = 1.2.
        assert_eq!(summary.mean, 1.2);
    }

    #[test]
    fn lower_median_for_even_length_takes_floor_half_index() {
        // Degrees descending: [2, 2, 1, 1] → index 2 → 1 (not 1.5).
        let kg = graph_of(
            &[
                ("a", NodeKind::Person),
                ("b", NodeKind::Person),
                ("c", NodeKind::Person),
                ("d", NodeKind::Person),
            ],
            &[("a", "b"), ("a", "c"), ("b", "d")],
        );
        let summary = degree_summary(&kg);
        assert_eq!(summary.median, 1);
    }

    #[test]
    fn empty_graph_summary_is_all_zero() {
        let kg = graph_of(&[], &[]);
        let summary = degree_summary(&kg);
        assert_eq!(summary, DegreeSummary { mean: 0.0, median: 0, max: 0 });
        assert_eq!(components(&kg), ComponentStats { count: 0, largest: 0 });
    }

    #[test]
    fn components_count_orphans_as_singletons() {
        let stats = components(&star());
        // {hub, a, b, c} + {loner}.
        assert_eq!(stats.count, 2);
        assert_eq!(stats.largest, 4);
    }
}
