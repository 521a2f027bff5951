use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum GraphError {
    #[error("invalid vertex {vertex} (expected 1..={vertex_count})")]
    InvalidVertex { vertex: usize, vertex_count: usize },

    #[error("edge between {a} and {b} already exists")]
    DuplicateEdge { a: usize, b: usize },

    #[error("graph has {vertex_count} vertices, at most {max} are supported")]
    TooManyVertices { vertex_count: usize, max: usize },

    #[error("graph is disconnected: {components} components, spanning forest has {edges} edges")]
    Disconnected { components: usize, edges: usize },
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum LiftError {
    #[error("cannot build a lifting index over zero vertices")]
    EmptyGraph,

    #[error("cannot index {vertex_count} vertices, at most {max} are supported")]
    TooManyVertices { vertex_count: usize, max: usize },

    #[error("tree edge ({a}, {b}) is out of range (expected 1..={vertex_count})")]
    EdgeOutOfRange {
        a: usize,
        b: usize,
        vertex_count: usize,
    },
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum QueryError {
    #[error("invalid vertex {vertex} (expected 1..={vertex_count})")]
    InvalidVertex { vertex: usize, vertex_count: usize },

    #[error("vertices {u} and {v} are not connected in the spanning tree")]
    Disconnected { u: usize, v: usize },
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PlanError {
    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Lift(#[from] LiftError),
}
