use ndarray::Array2;
use tracing::debug;

use crate::error::LiftError;
use crate::graph::{Edge, MAX_VERTICES};

/// Marks "no parent" / "no edge endpoint" in the tables. Vertex ids start at 1.
pub const NO_VERTEX: usize = 0;
/// Weight recorded where no edge exists (root's parent edge, overshooting jumps).
pub const NO_WEIGHT: f64 = f64::NEG_INFINITY;
/// The tree is always rooted here.
pub const ROOT: usize = 1;

/// Binary-lifting tables over a spanning tree.
///
/// Built once from the tree edges and read-only afterwards. Level `k` of the
/// tables describes a jump of `2^k` parent steps:
/// - `ancestor[[k, v]]` is where the jump lands (`NO_VERTEX` if it overshoots the root)
/// - `max_weight[[k, v]]` is the heaviest edge crossed on the way
/// - `max_vertex[[k, v]]` is the child endpoint of that edge, so the edge itself is
///   `(max_vertex, parent[max_vertex])`
///
/// Vertices not reachable from [`ROOT`] keep their defaults and are marked as
/// unreached; queries reject them.
#[derive(Debug, Clone)]
pub struct LiftingIndex {
    vertex_count: usize,
    levels: usize,
    parent: Vec<usize>,
    depth: Vec<usize>,
    weight_to_parent: Vec<f64>,
    reached: Vec<bool>,
    ancestor: Array2<usize>,
    max_weight: Array2<f64>,
    max_vertex: Array2<usize>,
}

// pending vertex of the depth-first traversal
struct Frame {
    vertex: usize,
    parent: usize,
    depth: usize,
    weight: f64,
}

/// `floor(log2(n)) + 1`, enough levels to cover any depth difference in a tree
/// on `n` vertices.
pub fn level_count(n: usize) -> usize {
    (usize::BITS - n.leading_zeros()).max(1) as usize
}

impl LiftingIndex {
    pub fn build(vertex_count: usize, tree: &[Edge]) -> Result<Self, LiftError> {
        if vertex_count == 0 {
            return Err(LiftError::EmptyGraph);
        }
        if vertex_count > MAX_VERTICES {
            return Err(LiftError::TooManyVertices {
                vertex_count,
                max: MAX_VERTICES,
            });
        }
        let n = vertex_count;

        let mut adjacency: Vec<Vec<(usize, f64)>> = vec![Vec::new(); n + 1];
        for edge in tree {
            let in_range = |v: usize| (1..=n).contains(&v);
            if !in_range(edge.v1) || !in_range(edge.v2) {
                return Err(LiftError::EdgeOutOfRange {
                    a: edge.v1,
                    b: edge.v2,
                    vertex_count: n,
                });
            }
            adjacency[edge.v1].push((edge.v2, edge.weight));
            adjacency[edge.v2].push((edge.v1, edge.weight));
        }

        let mut parent = vec![NO_VERTEX; n + 1];
        let mut depth = vec![0; n + 1];
        let mut weight_to_parent = vec![NO_WEIGHT; n + 1];
        let mut reached = vec![false; n + 1];

        let mut stack = vec![Frame {
            vertex: ROOT,
            parent: NO_VERTEX,
            depth: 0,
            weight: NO_WEIGHT,
        }];
        while let Some(frame) = stack.pop() {
            let v = frame.vertex;
            if reached[v] {
                continue;
            }
            reached[v] = true;
            parent[v] = frame.parent;
            depth[v] = frame.depth;
            weight_to_parent[v] = frame.weight;

            // reversed so neighbours are visited in adjacency order
            for &(next, weight) in adjacency[v].iter().rev() {
                if !reached[next] {
                    stack.push(Frame {
                        vertex: next,
                        parent: v,
                        depth: frame.depth + 1,
                        weight,
                    });
                }
            }
        }

        let levels = level_count(n);
        let mut ancestor = Array2::<usize>::zeros((levels, n + 1));
        let mut max_weight = Array2::<f64>::from_elem((levels, n + 1), NO_WEIGHT);
        let mut max_vertex = Array2::<usize>::zeros((levels, n + 1));

        for v in 1..=n {
            ancestor[[0, v]] = parent[v];
            if parent[v] != NO_VERTEX {
                max_weight[[0, v]] = weight_to_parent[v];
                max_vertex[[0, v]] = v;
            }
        }

        for k in 1..levels {
            for v in 1..=n {
                let mid = ancestor[[k - 1, v]];
                if mid == NO_VERTEX {
                    continue;
                }
                ancestor[[k, v]] = ancestor[[k - 1, mid]];

                // lower half wins ties
                let lower = max_weight[[k - 1, v]];
                let upper = max_weight[[k - 1, mid]];
                if lower >= upper {
                    max_weight[[k, v]] = lower;
                    max_vertex[[k, v]] = max_vertex[[k - 1, v]];
                } else {
                    max_weight[[k, v]] = upper;
                    max_vertex[[k, v]] = max_vertex[[k - 1, mid]];
                }
            }
        }

        let reached_count = reached.iter().filter(|&&r| r).count();
        debug!(
            vertices = n,
            tree_edges = tree.len(),
            levels,
            reached = reached_count,
            "built lifting index"
        );

        Ok(Self {
            vertex_count: n,
            levels,
            parent,
            depth,
            weight_to_parent,
            reached,
            ancestor,
            max_weight,
            max_vertex,
        })
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    pub fn levels(&self) -> usize {
        self.levels
    }

    pub fn parent(&self, v: usize) -> usize {
        self.parent[v]
    }

    pub fn depth(&self, v: usize) -> usize {
        self.depth[v]
    }

    pub fn weight_to_parent(&self, v: usize) -> f64 {
        self.weight_to_parent[v]
    }

    /// Whether `v` lies in the root's component.
    pub fn is_reached(&self, v: usize) -> bool {
        self.reached.get(v).copied().unwrap_or(false)
    }

    pub fn ancestor(&self, level: usize, v: usize) -> usize {
        self.ancestor[[level, v]]
    }

    pub fn max_weight(&self, level: usize, v: usize) -> f64 {
        self.max_weight[[level, v]]
    }

    pub fn max_vertex(&self, level: usize, v: usize) -> usize {
        self.max_vertex[[level, v]]
    }

    /// The tree edge `(v, parent(v))`, or `None` for the root and unreached vertices.
    pub fn edge_to_parent(&self, v: usize) -> Option<Edge> {
        let p = *self.parent.get(v)?;
        if p == NO_VERTEX {
            return None;
        }
        Some(Edge::new(v, p, self.weight_to_parent[v]))
    }
}
