use serde::Serialize;
use tracing::trace;

use crate::error::QueryError;
use crate::graph::Edge;
use crate::lifting::{LiftingIndex, NO_VERTEX, NO_WEIGHT};

/// Heaviest tree edge on a path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PathMax {
    pub weight: f64,
    /// Oriented child first: `(child, parent(child))`.
    pub edge: Edge,
}

// running maximum for one side of the path
#[derive(Debug, Clone, Copy)]
struct Heaviest {
    weight: f64,
    vertex: usize,
}

impl Heaviest {
    const NONE: Self = Self {
        weight: NO_WEIGHT,
        vertex: NO_VERTEX,
    };

    // strict, so the first edge seen keeps a tie
    fn offer(&mut self, weight: f64, vertex: usize) {
        if weight > self.weight {
            self.weight = weight;
            self.vertex = vertex;
        }
    }
}

impl LiftingIndex {
    fn check_pair(&self, u: usize, v: usize) -> Result<(), QueryError> {
        for vertex in [u, v] {
            if vertex < 1 || vertex > self.vertex_count() {
                return Err(QueryError::InvalidVertex {
                    vertex,
                    vertex_count: self.vertex_count(),
                });
            }
        }
        if !self.is_reached(u) || !self.is_reached(v) {
            return Err(QueryError::Disconnected { u, v });
        }
        Ok(())
    }

    // climb `steps` parent links from `v`, feeding every jump into `side`
    fn climb(&self, mut v: usize, steps: usize, side: &mut Heaviest) -> usize {
        for k in 0..self.levels() {
            if steps & (1 << k) != 0 {
                side.offer(self.max_weight(k, v), self.max_vertex(k, v));
                v = self.ancestor(k, v);
            }
        }
        v
    }

    /// Heaviest edge on the tree path between `u` and `v`, `None` when `u == v`.
    ///
    /// On equal weights the edge found on `u`'s side of the path wins, so the
    /// reported edge (not its weight) can depend on the argument order.
    pub fn path_max(&self, u: usize, v: usize) -> Result<Option<PathMax>, QueryError> {
        self.check_pair(u, v)?;

        let mut a = u;
        let mut b = v;
        let mut side_a = Heaviest::NONE;
        let mut side_b = Heaviest::NONE;

        let (depth_a, depth_b) = (self.depth(a), self.depth(b));
        if depth_a > depth_b {
            a = self.climb(a, depth_a - depth_b, &mut side_a);
        } else if depth_b > depth_a {
            b = self.climb(b, depth_b - depth_a, &mut side_b);
        }

        if a != b {
            for k in (0..self.levels()).rev() {
                let (next_a, next_b) = (self.ancestor(k, a), self.ancestor(k, b));
                if next_a != next_b {
                    side_a.offer(self.max_weight(k, a), self.max_vertex(k, a));
                    side_b.offer(self.max_weight(k, b), self.max_vertex(k, b));
                    a = next_a;
                    b = next_b;
                }
            }
            // one step below the lca on both sides
            side_a.offer(self.weight_to_parent(a), a);
            side_b.offer(self.weight_to_parent(b), b);
        }

        let heaviest = if side_a.weight >= side_b.weight {
            side_a
        } else {
            side_b
        };
        if heaviest.vertex == NO_VERTEX {
            return Ok(None);
        }

        let x = heaviest.vertex;
        Ok(Some(PathMax {
            weight: heaviest.weight,
            edge: Edge::new(x, self.parent(x), self.weight_to_parent(x)),
        }))
    }

    /// The tree edge a new edge `(u, v, w)` would replace, if swapping it in makes
    /// the spanning tree strictly lighter.
    pub fn replacement(&self, u: usize, v: usize, w: f64) -> Result<Option<Edge>, QueryError> {
        let heaviest = self.path_max(u, v)?;
        let replaced = heaviest.filter(|max| w < max.weight).map(|max| max.edge);
        trace!(u, v, w, ?replaced, "replacement query");
        Ok(replaced)
    }

    /// Lowest common ancestor of `u` and `v`.
    pub fn lca(&self, u: usize, v: usize) -> Result<usize, QueryError> {
        self.check_pair(u, v)?;

        let mut ignored = Heaviest::NONE;
        let (mut a, mut b) = (u, v);
        if self.depth(a) > self.depth(b) {
            a = self.climb(a, self.depth(a) - self.depth(b), &mut ignored);
        } else {
            b = self.climb(b, self.depth(b) - self.depth(a), &mut ignored);
        }
        if a == b {
            return Ok(a);
        }
        for k in (0..self.levels()).rev() {
            if self.ancestor(k, a) != self.ancestor(k, b) {
                a = self.ancestor(k, a);
                b = self.ancestor(k, b);
            }
        }
        Ok(self.parent(a))
    }
}

/// Free-function form of [`LiftingIndex::replacement`].
pub fn query_replacement(
    index: &LiftingIndex,
    u: usize,
    v: usize,
    w: f64,
) -> Result<Option<Edge>, QueryError> {
    index.replacement(u, v, w)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;
    use proptest::prelude::*;
    use rstest::rstest;

    fn square_index() -> LiftingIndex {
        let mut g = Graph::new(4);
        g.add_edge(1, 2, 1.0).unwrap();
        g.add_edge(2, 3, 2.0).unwrap();
        g.add_edge(3, 4, 3.0).unwrap();
        g.add_edge(1, 4, 10.0).unwrap();
        let tree = g.minimum_spanning_tree().unwrap();
        LiftingIndex::build(4, &tree).unwrap()
    }

    #[test]
    fn test_square_replaces_heaviest_path_edge() {
        let index = square_index();
        let replaced = query_replacement(&index, 1, 4, 2.5).unwrap().unwrap();
        assert!(replaced.same_link(&Edge::new(3, 4, 3.0)));
        assert_eq!(replaced, Edge::new(4, 3, 3.0));
    }

    #[rstest]
    #[case(5.0)]
    #[case(3.0)]
    #[case(f64::INFINITY)]
    #[case(f64::NAN)]
    fn test_square_keeps_tree(#[case] w: f64) {
        let index = square_index();
        assert_eq!(query_replacement(&index, 1, 4, w).unwrap(), None);
        assert_eq!(query_replacement(&index, 4, 1, w).unwrap(), None);
    }

    #[rstest]
    #[case(1, 2, Some(Edge::new(2, 1, 1.0)))]
    #[case(2, 4, Some(Edge::new(4, 3, 3.0)))]
    #[case(4, 2, Some(Edge::new(4, 3, 3.0)))]
    #[case(1, 3, Some(Edge::new(3, 2, 2.0)))]
    fn test_square_path_max(#[case] u: usize, #[case] v: usize, #[case] expected: Option<Edge>) {
        let index = square_index();
        let max = index.path_max(u, v).unwrap();
        assert_eq!(max.map(|m| m.edge), expected);
    }

    #[rstest]
    #[case(1)]
    #[case(3)]
    #[case(4)]
    fn test_same_vertex_never_replaces(#[case] v: usize) {
        let index = square_index();
        assert_eq!(index.path_max(v, v).unwrap(), None);
        assert_eq!(index.replacement(v, v, f64::NEG_INFINITY).unwrap(), None);
        assert_eq!(index.replacement(v, v, -1e300).unwrap(), None);
    }

    #[test]
    fn test_invalid_vertices_are_rejected() {
        let index = square_index();
        assert_eq!(
            index.replacement(0, 2, 1.0),
            Err(QueryError::InvalidVertex {
                vertex: 0,
                vertex_count: 4
            })
        );
        assert_eq!(
            index.replacement(2, 5, 1.0),
            Err(QueryError::InvalidVertex {
                vertex: 5,
                vertex_count: 4
            })
        );
    }

    #[test]
    fn test_other_component_is_rejected() {
        let tree = [Edge::new(1, 2, 1.0), Edge::new(3, 4, 1.0)];
        let index = LiftingIndex::build(4, &tree).unwrap();
        assert_eq!(
            index.replacement(2, 3, 0.0),
            Err(QueryError::Disconnected { u: 2, v: 3 })
        );
        assert_eq!(
            index.lca(4, 3),
            Err(QueryError::Disconnected { u: 4, v: 3 })
        );
    }

    #[test]
    fn test_negative_weights_are_tracked() {
        let tree = [
            Edge::new(1, 2, -7.0),
            Edge::new(2, 3, -3.0),
            Edge::new(1, 4, -9.0),
        ];
        let index = LiftingIndex::build(4, &tree).unwrap();
        assert_eq!(
            index.replacement(3, 4, -5.0).unwrap(),
            Some(Edge::new(3, 2, -3.0))
        );
        assert_eq!(index.replacement(3, 4, -3.0).unwrap(), None);
    }

    #[test]
    fn test_branching_tree() {
        //         1
        //       /   \
        //      2     3
        //     / \     \
        //    4   5     6
        //   /           \
        //  7             8
        let tree = [
            Edge::new(1, 2, 4.0),
            Edge::new(1, 3, 1.0),
            Edge::new(2, 4, 2.0),
            Edge::new(2, 5, 8.0),
            Edge::new(3, 6, 6.0),
            Edge::new(4, 7, 3.0),
            Edge::new(6, 8, 5.0),
        ];
        let index = LiftingIndex::build(8, &tree).unwrap();

        assert_eq!(index.lca(7, 5).unwrap(), 2);
        assert_eq!(index.lca(7, 8).unwrap(), 1);
        assert_eq!(index.lca(6, 8).unwrap(), 6);

        insta::assert_debug_snapshot!(index.path_max(7, 8).unwrap(), @r"
        Some(
            PathMax {
                weight: 6.0,
                edge: Edge {
                    v1: 6,
                    v2: 3,
                    weight: 6.0,
                },
            },
        )
        ");
        assert_eq!(index.replacement(7, 5, 7.9).unwrap(), Some(Edge::new(5, 2, 8.0)));
        assert_eq!(index.replacement(8, 3, 5.5).unwrap(), Some(Edge::new(6, 3, 6.0)));
        assert_eq!(index.replacement(8, 3, 6.5).unwrap(), None);
    }

    #[test]
    fn test_ties_prefer_first_argument_side() {
        // 2 - 1 - 3, both edges weigh 5
        let tree = [Edge::new(1, 2, 5.0), Edge::new(1, 3, 5.0)];
        let index = LiftingIndex::build(3, &tree).unwrap();

        assert_eq!(index.replacement(2, 3, 1.0).unwrap(), Some(Edge::new(2, 1, 5.0)));
        assert_eq!(index.replacement(3, 2, 1.0).unwrap(), Some(Edge::new(3, 1, 5.0)));
    }

    #[test]
    fn test_concurrent_queries_share_index() {
        let index = square_index();
        let answers: Vec<_> = std::thread::scope(|s| {
            let handles: Vec<_> = [0.5, 2.5, 5.0]
                .into_iter()
                .map(|w| {
                    let index = &index;
                    s.spawn(move || index.replacement(1, 4, w).unwrap())
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        assert_eq!(
            answers,
            vec![
                Some(Edge::new(4, 3, 3.0)),
                Some(Edge::new(4, 3, 3.0)),
                None
            ]
        );
    }

    /// Walks parent links one step at a time. Weights are distinct so the heaviest
    /// edge is unique.
    fn naive_path_max(index: &LiftingIndex, mut u: usize, mut v: usize) -> Option<(usize, usize)> {
        let mut best: Option<(f64, (usize, usize))> = None;
        let take = |x: usize, best: &mut Option<(f64, (usize, usize))>| {
            let edge = index.edge_to_parent(x).unwrap();
            if best.is_none_or(|(w, _)| edge.weight > w) {
                *best = Some((edge.weight, edge.key()));
            }
        };
        while index.depth(u) > index.depth(v) {
            take(u, &mut best);
            u = index.parent(u);
        }
        while index.depth(v) > index.depth(u) {
            take(v, &mut best);
            v = index.parent(v);
        }
        while u != v {
            take(u, &mut best);
            take(v, &mut best);
            u = index.parent(u);
            v = index.parent(v);
        }
        best.map(|(_, key)| key)
    }

    // random tree: vertex i (>= 2) hangs under some vertex in 1..i, distinct weights
    fn random_tree() -> impl Strategy<Value = (usize, Vec<Edge>)> {
        (2usize..40).prop_flat_map(|n| {
            let parents: Vec<_> = (2..=n).map(|i| 1..i).collect();
            let weights = Just((0..n as u32).collect::<Vec<_>>()).prop_shuffle();
            (Just(n), parents, weights).prop_map(|(n, parents, weights)| {
                let edges = parents
                    .into_iter()
                    .enumerate()
                    .map(|(i, p)| Edge::new(i + 2, p, weights[i] as f64))
                    .collect();
                (n, edges)
            })
        })
    }

    proptest! {
        #[test]
        fn prop_path_max_matches_naive_walk(
            (n, tree) in random_tree(),
            u_seed in any::<usize>(),
            v_seed in any::<usize>(),
        ) {
            let index = LiftingIndex::build(n, &tree).unwrap();
            let u = 1 + u_seed % n;
            let v = 1 + v_seed % n;

            let fast = index.path_max(u, v).unwrap().map(|m| m.edge.key());
            prop_assert_eq!(fast, naive_path_max(&index, u, v));
        }

        #[test]
        fn prop_replacement_is_symmetric_and_strict(
            (n, tree) in random_tree(),
            u_seed in any::<usize>(),
            v_seed in any::<usize>(),
            w in -2.0f64..45.0,
        ) {
            let index = LiftingIndex::build(n, &tree).unwrap();
            let u = 1 + u_seed % n;
            let v = 1 + v_seed % n;

            let forward = index.replacement(u, v, w).unwrap();
            let backward = index.replacement(v, u, w).unwrap();
            prop_assert_eq!(forward.map(|e| e.key()), backward.map(|e| e.key()));

            match index.path_max(u, v).unwrap() {
                Some(max) if w < max.weight => {
                    prop_assert_eq!(forward, Some(max.edge));
                }
                _ => {
                    prop_assert_eq!(forward, None);
                }
            }
        }
    }
}
