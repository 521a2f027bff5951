#[derive(Debug, Clone)]
pub struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<usize>,
}

impl UnionFind {
    /// Sets for the ids `0..=n`. Graph vertices are 1-based so slot 0 stays a
    /// singleton that nobody touches.
    pub fn new(n: usize) -> Self {
        UnionFind {
            parent: (0..=n).collect(),
            rank: vec![0; n + 1],
        }
    }

    /// Find the representative (root) of the set containing `x`.
    /// Path compression flattens the structure.
    pub fn find(&mut self, x: usize) -> usize {
        if self.parent[x] != x {
            let root = self.find(self.parent[x]);
            self.parent[x] = root; // path compression
        }
        self.parent[x]
    }

    /// Union the sets containing `x` and `y`.
    ///
    /// Returns `false` when they were already in the same set, i.e. the edge
    /// `(x, y)` would close a cycle.
    pub fn union(&mut self, x: usize, y: usize) -> bool {
        let mut root_x = self.find(x);
        let mut root_y = self.find(y);

        if root_x == root_y {
            return false;
        }

        // union by rank, ties hang y's root under x's root
        if self.rank[root_x] < self.rank[root_y] {
            std::mem::swap(&mut root_x, &mut root_y);
        }

        self.parent[root_y] = root_x;

        if self.rank[root_x] == self.rank[root_y] {
            self.rank[root_x] += 1;
        }
        true
    }

    /// Number of disjoint sets among the ids `1..=n`.
    pub fn set_count(&mut self) -> usize {
        (1..self.parent.len()).filter(|&x| self.find(x) == x).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_union_reports_cycle() {
        let mut uf = UnionFind::new(3);
        assert!(uf.union(1, 2));
        assert!(uf.union(2, 3));
        assert!(!uf.union(1, 3));
        assert!(!uf.union(3, 3));
    }

    #[test]
    fn test_union_tie_keeps_first_root() {
        let mut uf = UnionFind::new(4);
        uf.union(1, 2);
        assert_eq!(uf.find(2), 1);

        uf.union(4, 3);
        assert_eq!(uf.find(3), 4);

        // both roots have rank 1 now
        uf.union(3, 2);
        assert_eq!(uf.find(1), 4);
        assert_eq!(uf.find(2), 4);
    }

    #[test]
    fn test_union_by_rank_attaches_smaller_tree() {
        let mut uf = UnionFind::new(4);
        uf.union(1, 2);
        uf.union(3, 1);

        assert_eq!(uf.find(3), 1);
        assert_eq!(uf.find(2), uf.find(3));
        assert_ne!(uf.find(2), uf.find(4));
    }

    #[test]
    fn test_path_compression_points_at_root() {
        let mut uf = UnionFind::new(8);
        uf.union(1, 2);
        uf.union(3, 4);
        uf.union(1, 3);
        uf.union(5, 6);
        uf.union(7, 8);
        uf.union(5, 7);
        uf.union(1, 5);

        let root = uf.find(8);
        for x in 1..=8 {
            uf.find(x);
            assert_eq!(uf.parent[x], root);
        }
    }

    #[test]
    fn test_set_count() {
        let mut uf = UnionFind::new(5);
        assert_eq!(uf.set_count(), 5);
        uf.union(1, 2);
        uf.union(4, 5);
        assert_eq!(uf.set_count(), 3);
        uf.union(2, 5);
        assert_eq!(uf.set_count(), 2);
    }
}
