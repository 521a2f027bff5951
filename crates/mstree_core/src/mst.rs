use serde::Serialize;
use tracing::debug;

use crate::graph::Edge;
use crate::union_find::UnionFind;

/// Output of Kruskal's algorithm.
///
/// `edges` are in acceptance order (ascending weight). A connected graph on `n`
/// vertices gives exactly `n - 1` edges and `components == 1`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpanningForest {
    pub vertex_count: usize,
    pub edges: Vec<Edge>,
    pub components: usize,
}

impl SpanningForest {
    pub fn is_spanning_tree(&self) -> bool {
        self.components <= 1
    }

    pub fn total_weight(&self) -> f64 {
        self.edges.iter().map(|e| e.weight).sum()
    }
}

/// Kruskal's algorithm over vertices `1..=n`.
///
/// The sort is stable, so among equal weights the edge inserted first is
/// considered first. `total_cmp` gives NaN weights a fixed place at the end.
/// Self-loops and edges naming a vertex outside `1..=n` are skipped.
/// Allocates O(n); [`crate::plan`] bounds `n` before calling this.
pub fn kruskal(n: usize, edges: &[Edge]) -> SpanningForest {
    let mut sorted = edges.to_vec();
    sorted.sort_by(|a, b| a.weight.total_cmp(&b.weight));

    let target = n.saturating_sub(1);
    let mut uf = UnionFind::new(n);
    let mut tree = Vec::with_capacity(target);

    let in_range = |v: usize| (1..=n).contains(&v);
    for edge in sorted {
        if tree.len() == target {
            break;
        }
        if edge.is_loop() || !in_range(edge.v1) || !in_range(edge.v2) {
            continue;
        }
        if uf.union(edge.v1, edge.v2) {
            tree.push(edge);
        }
    }

    let components = uf.set_count();
    debug!(
        vertices = n,
        candidates = edges.len(),
        accepted = tree.len(),
        components,
        "kruskal finished"
    );

    SpanningForest {
        vertex_count: n,
        edges: tree,
        components,
    }
}
