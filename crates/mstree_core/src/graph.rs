use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use crate::error::GraphError;
use crate::mst::{SpanningForest, kruskal};

/// Largest vertex count [`crate::plan`] and [`crate::LiftingIndex::build`] accept.
/// Every vertex costs a column in each lifting table, so this bounds memory.
pub const MAX_VERTICES: usize = 1 << 20;

/// An undirected weighted edge. `(a, b, w)` and `(b, a, w)` describe the same link.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Edge {
    pub v1: usize,
    pub v2: usize,
    pub weight: f64,
}

impl Edge {
    pub fn new(v1: usize, v2: usize, weight: f64) -> Self {
        Self { v1, v2, weight }
    }

    /// Endpoints ordered as `(min, max)`.
    pub fn key(&self) -> (usize, usize) {
        normalized(self.v1, self.v2)
    }

    /// True when both edges connect the same unordered pair with the same weight.
    pub fn same_link(&self, other: &Edge) -> bool {
        self.key() == other.key() && self.weight.total_cmp(&other.weight).is_eq()
    }

    pub fn is_loop(&self) -> bool {
        self.v1 == self.v2
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (a, b) = self.key();
        write!(f, "{} {} {:?}", a, b, self.weight)
    }
}

pub(crate) fn normalized(a: usize, b: usize) -> (usize, usize) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Fixed vertex count plus a deduplicated list of edges.
///
/// Vertices are `1..=vertex_count`. Edges keep their insertion order, which is
/// what makes Kruskal's choice between equal-weight edges deterministic.
#[derive(Debug, Clone)]
pub struct Graph {
    vertex_count: usize,
    edges: Vec<Edge>,
    edge_keys: HashSet<(usize, usize)>,
}

impl Graph {
    pub fn new(vertex_count: usize) -> Self {
        Self {
            vertex_count,
            edges: Vec::new(),
            edge_keys: HashSet::new(),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    fn check_vertex(&self, vertex: usize) -> Result<(), GraphError> {
        if vertex < 1 || vertex > self.vertex_count {
            return Err(GraphError::InvalidVertex {
                vertex,
                vertex_count: self.vertex_count,
            });
        }
        Ok(())
    }

    /// Insert the edge `(a, b)` with weight `w`.
    ///
    /// The first insertion of a pair wins; a later one in either orientation is
    /// rejected and leaves the graph untouched. Weights are not validated.
    pub fn add_edge(&mut self, a: usize, b: usize, w: f64) -> Result<(), GraphError> {
        self.check_vertex(a)?;
        self.check_vertex(b)?;

        let key = normalized(a, b);
        if !self.edge_keys.insert(key) {
            return Err(GraphError::DuplicateEdge { a: key.0, b: key.1 });
        }
        self.edges.push(Edge::new(a, b, w));
        Ok(())
    }

    pub fn try_add_edge(&mut self, a: usize, b: usize, w: f64) -> bool {
        self.add_edge(a, b, w).is_ok()
    }

    pub fn contains_edge(&self, a: usize, b: usize) -> bool {
        self.edge_keys.contains(&normalized(a, b))
    }

    /// Kruskal over the stored edges. Never fails: a disconnected graph yields a
    /// spanning forest with `components > 1`.
    pub fn minimum_spanning_forest(&self) -> SpanningForest {
        kruskal(self.vertex_count, &self.edges)
    }

    pub fn minimum_spanning_tree(&self) -> Result<Vec<Edge>, GraphError> {
        let forest = self.minimum_spanning_forest();
        if !forest.is_spanning_tree() {
            return Err(GraphError::Disconnected {
                components: forest.components,
                edges: forest.edges.len(),
            });
        }
        Ok(forest.edges)
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.vertex_count)?;
        for edge in &self.edges {
            writeln!(f, "{}", edge)?;
        }
        Ok(())
    }
}
