pub mod error;
pub mod graph;
pub mod lifting;
pub mod mst;
pub mod query;
pub mod union_find;

use tracing::{debug, warn};

pub use error::{GraphError, LiftError, PlanError, QueryError};
pub use graph::{Edge, Graph, MAX_VERTICES};
pub use lifting::LiftingIndex;
pub use mst::{SpanningForest, kruskal};
pub use query::{PathMax, query_replacement};

#[derive(Debug, Clone, Default)]
pub struct PlanConfig {
    /// Fail on the first invalid or duplicate candidate instead of skipping it.
    pub strict_edges: bool,
    /// Fail when the candidates do not connect every vertex.
    pub require_spanning_tree: bool,
}

/// A spanning tree together with its lifting index, ready for replacement queries.
#[derive(Debug, Clone)]
pub struct Plan {
    pub forest: SpanningForest,
    pub index: LiftingIndex,
    /// Candidates dropped as invalid or duplicate.
    pub skipped: usize,
}

impl Plan {
    pub fn tree(&self) -> &[Edge] {
        &self.forest.edges
    }

    pub fn replacement(&self, u: usize, v: usize, w: f64) -> Result<Option<Edge>, QueryError> {
        self.index.replacement(u, v, w)
    }
}

/// Build the graph from `candidates`, run Kruskal and index the resulting tree.
pub fn plan(n: usize, candidates: &[Edge], config: &PlanConfig) -> Result<Plan, PlanError> {
    if n > MAX_VERTICES {
        return Err(GraphError::TooManyVertices {
            vertex_count: n,
            max: MAX_VERTICES,
        }
        .into());
    }
    let mut graph = Graph::new(n);
    let mut skipped = 0;
    for candidate in candidates {
        if let Err(err) = graph.add_edge(candidate.v1, candidate.v2, candidate.weight) {
            if config.strict_edges {
                return Err(err.into());
            }
            debug!(%err, "skipping candidate edge");
            skipped += 1;
        }
    }

    let forest = graph.minimum_spanning_forest();
    if !forest.is_spanning_tree() {
        if config.require_spanning_tree {
            return Err(GraphError::Disconnected {
                components: forest.components,
                edges: forest.edges.len(),
            }
            .into());
        }
        warn!(
            components = forest.components,
            "candidates do not connect every vertex, queries are limited to the component of vertex 1"
        );
    }

    let index = LiftingIndex::build(n, &forest.edges)?;
    Ok(Plan {
        forest,
        index,
        skipped,
    })
}
