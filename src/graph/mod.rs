//! The immutable analytics graph built from validated nodes and edges.
//!
//! Nodes come from the identity registry in first-appearance order; edges are
//! every relationship record carrying both endpoints. Connectivity counting is
//! undirected: an edge increments the degree of each resolved endpoint
//! independently, and an endpoint that does not resolve contributes nothing.

pub mod analytics;

pub use analytics::{
    components, degree_distribution, degree_summary, orphans, top_connected, ComponentStats,
    DegreeEntry, DegreeSummary, DistributionBucket, OrphanSets,
};

use indexmap::IndexMap;
use petgraph::graph::{NodeIndex, UnGraph};

use crate::dataset::model::NodeKind;
use crate::validate::registry::IdentityRegistry;

#[derive(Debug, Clone)]
pub struct NodeMeta {
    pub kind: NodeKind,
    pub display: String,
}

/// Validated knowledge graph snapshot.
pub struct KnowledgeGraph {
    /// id → metadata, in first-appearance order.
    nodes: IndexMap<String, NodeMeta>,
    /// Undirected structure for component analysis. Parallel edges are kept;
    /// edges with an unresolved endpoint are not represented here.
    graph: UnGraph<(), ()>,
    /// Degree per node, aligned with `nodes` order. Counts every endpoint
    /// occurrence in the edge list, including edges whose other endpoint
    /// does not resolve.
    degrees: Vec<usize>,
}

impl KnowledgeGraph {
    /// Build the graph from the registry's node set and the full edge list.
    pub fn build(registry: &IdentityRegistry, edge_pairs: &[(String, String)]) -> Self {
        let mut nodes = IndexMap::with_capacity(registry.len());
        let mut graph = UnGraph::with_capacity(registry.len(), edge_pairs.len());
        for (id, entry) in registry.iter() {
            nodes.insert(
                id.to_string(),
                NodeMeta {
                    kind: entry.kind,
                    display: entry.display.clone(),
                },
            );
            graph.add_node(());
        }

        let mut degrees = vec![0usize; nodes.len()];
        for (source, target) in edge_pairs {
            let source_pos = nodes.get_index_of(source.as_str());
            let target_pos = nodes.get_index_of(target.as_str());
            if let Some(pos) = source_pos {
                degrees[pos] += 1;
            }
            if let Some(pos) = target_pos {
                degrees[pos] += 1;
            }
            if let (Some(s), Some(t)) = (source_pos, target_pos) {
                if s != t {
                    graph.add_edge(NodeIndex::new(s), NodeIndex::new(t), ());
                }
            }
        }

        Self {
            nodes,
            graph,
            degrees,
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Nodes with their degrees, in first-appearance order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &NodeMeta, usize)> {
        self.nodes
            .iter()
            .zip(self.degrees.iter())
            .map(|((id, meta), degree)| (id.as_str(), meta, *degree))
    }

    pub fn degree_of(&self, id: &str) -> Option<usize> {
        self.nodes.get_index_of(id).map(|pos| self.degrees[pos])
    }

    pub(crate) fn petgraph(&self) -> &UnGraph<(), ()> {
        &self.graph
    }
}
