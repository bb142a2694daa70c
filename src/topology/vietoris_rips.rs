//! Vietoris-Rips Complex Construction
//!
//! The Vietoris-Rips complex VR_ε(X) is a simplicial complex where:
//! - 0-simplices are the points in X
//! - A k-simplex [v₀, ..., vₖ] exists iff d(vᵢ, vⱼ) ≤ ε for all i,j
//!
//! The filtration value (diameter) of a simplex is its longest edge.
//! Simplices above the distance threshold are never materialized, which
//! is what bounds the cost of the homology computation.

use ndarray::Array2;
use std::cmp::Ordering;
use std::collections::HashSet;

use crate::embedding::PointCloud;

/// A simplex with its filtration value
#[derive(Debug, Clone, PartialEq)]
pub struct Simplex {
    /// Vertex indices, strictly increasing
    pub vertices: Vec<usize>,
    /// Longest edge; the scale at which the simplex enters the filtration
    pub diameter: f64,
}

impl Simplex {
    pub fn dimension(&self) -> usize {
        self.vertices.len() - 1
    }

    /// Filtration order: diameter, then dimension, then lexicographic vertices.
    ///
    /// Equal distances are therefore resolved by vertex index, which keeps
    /// the persistence pairing reproducible.
    pub fn filtration_cmp(&self, other: &Simplex) -> Ordering {
        self.diameter
            .total_cmp(&other.diameter)
            .then_with(|| self.dimension().cmp(&other.dimension()))
            .then_with(|| self.vertices.cmp(&other.vertices))
    }
}

/// Vietoris-Rips filtration truncated at a distance threshold
#[derive(Debug, Clone)]
pub struct VietorisRips {
    /// Distance matrix (precomputed)
    distances: Array2<f64>,
    /// Maximum filtration value
    threshold: f64,
}

impl VietorisRips {
    /// Create from a precomputed distance matrix
    pub fn from_distance_matrix(distances: Array2<f64>, threshold: f64) -> Self {
        Self {
            distances,
            threshold,
        }
    }

    /// Create from a point cloud (computes the Euclidean distance matrix)
    pub fn from_cloud(cloud: &PointCloud, threshold: f64) -> Self {
        Self::from_distance_matrix(cloud.distance_matrix(), threshold)
    }

    pub fn distances(&self) -> &Array2<f64> {
        &self.distances
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Number of points
    pub fn n_points(&self) -> usize {
        self.distances.nrows()
    }

    /// All edges with length ≤ epsilon (capped at the threshold), in filtration order
    pub fn edges_within(&self, epsilon: f64) -> Vec<Simplex> {
        let epsilon = epsilon.min(self.threshold);
        let n = self.n_points();
        let mut edges = Vec::new();

        for i in 0..n {
            for j in i + 1..n {
                let d = self.distances[[i, j]];
                if d <= epsilon {
                    edges.push(Simplex {
                        vertices: vec![i, j],
                        diameter: d,
                    });
                }
            }
        }

        edges.sort_by(|a, b| a.filtration_cmp(b));
        edges
    }

    /// Simplices of every dimension up to `max_dim`, grouped by dimension.
    ///
    /// `result[k]` holds the k-simplices sorted in filtration order.
    /// Higher simplices are grown from lower ones by adding a vertex with a
    /// larger index that is within the threshold of every existing vertex.
    /// The output is materialized: with every pair within the threshold
    /// there are C(n, k+1) k-simplices, so memory grows as n^(max_dim+1).
    pub fn simplices(&self, max_dim: usize) -> Vec<Vec<Simplex>> {
        let n = self.n_points();
        let mut by_dim: Vec<Vec<Simplex>> = Vec::with_capacity(max_dim + 1);

        by_dim.push(
            (0..n)
                .map(|i| Simplex {
                    vertices: vec![i],
                    diameter: 0.0,
                })
                .collect(),
        );

        for _ in 1..=max_dim {
            let prev = match by_dim.last() {
                Some(prev) => prev,
                None => break,
            };
            let mut next = Vec::new();

            for simplex in prev {
                let last = simplex.vertices[simplex.vertices.len() - 1];
                'candidate: for v in last + 1..n {
                    let mut diameter = simplex.diameter;
                    for &u in &simplex.vertices {
                        let d = self.distances[[u, v]];
                        if d > self.threshold {
                            continue 'candidate;
                        }
                        diameter = diameter.max(d);
                    }
                    let mut vertices = simplex.vertices.clone();
                    vertices.push(v);
                    next.push(Simplex { vertices, diameter });
                }
            }

            next.sort_by(|a, b| a.filtration_cmp(b));
            by_dim.push(next);
        }

        by_dim
    }

    /// Count connected components at scale epsilon using Union-Find
    pub fn count_components_at(&self, epsilon: f64) -> usize {
        let n = self.n_points();
        let mut sets = UnionFind::new(n);

        for edge in self.edges_within(epsilon) {
            sets.union(edge.vertices[0], edge.vertices[1]);
        }

        let mut roots = HashSet::new();
        for i in 0..n {
            roots.insert(sets.find(i));
        }
        roots.len()
    }
}

/// Disjoint-set forest with path compression and union by rank
#[derive(Debug, Clone)]
pub(crate) struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<usize>,
}

impl UnionFind {
    pub(crate) fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    pub(crate) fn find(&mut self, i: usize) -> usize {
        let mut root = i;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut cur = i;
        while self.parent[cur] != root {
            let next = self.parent[cur];
            self.parent[cur] = root;
            cur = next;
        }
        root
    }

    /// Merge the sets of x and y; returns false if they were already joined
    pub(crate) fn union(&mut self, x: usize, y: usize) -> bool {
        let rx = self.find(x);
        let ry = self.find(y);
        if rx == ry {
            return false;
        }
        match self.rank[rx].cmp(&self.rank[ry]) {
            Ordering::Less => self.parent[rx] = ry,
            Ordering::Greater => self.parent[ry] = rx,
            Ordering::Equal => {
                self.parent[ry] = rx;
                self.rank[rx] += 1;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_triangle() {
        // Equilateral triangle with side 1
        let points = array![[0.0, 0.0], [1.0, 0.0], [0.5, 0.866]];
        let vr = VietorisRips::from_cloud(&PointCloud::from_array(points), 2.0);

        // At ε < 1, three components
        assert_eq!(vr.count_components_at(0.8), 3);

        // At ε ≥ 1, one component
        assert_eq!(vr.count_components_at(1.2), 1);
    }

    #[test]
    fn test_simplices_respect_threshold() {
        // Square with side 1, diagonals sqrt(2)
        let s2 = 2.0_f64.sqrt();
        let dm = array![
            [0.0, 1.0, s2, 1.0],
            [1.0, 0.0, 1.0, s2],
            [s2, 1.0, 0.0, 1.0],
            [1.0, s2, 1.0, 0.0]
        ];

        let vr = VietorisRips::from_distance_matrix(dm.clone(), 1.2);
        let simplices = vr.simplices(2);
        assert_eq!(simplices[0].len(), 4);
        assert_eq!(simplices[1].len(), 4);
        assert!(simplices[2].is_empty());

        let vr = VietorisRips::from_distance_matrix(dm, 2.0);
        let simplices = vr.simplices(3);
        assert_eq!(simplices[1].len(), 6);
        assert_eq!(simplices[2].len(), 4);
        assert_eq!(simplices[3].len(), 1);
        assert!((simplices[2][0].diameter - s2).abs() < 1e-12);
    }

    #[test]
    fn test_simplex_count_bound() {
        // Every pair within the threshold: C(n, k+1) k-simplices
        let n = 12;
        let dm = Array2::from_shape_fn((n, n), |(i, j)| if i == j { 0.0 } else { 1.0 });
        let counts: Vec<usize> = VietorisRips::from_distance_matrix(dm.clone(), 2.0)
            .simplices(2)
            .iter()
            .map(Vec::len)
            .collect();
        assert_eq!(counts, vec![12, 66, 220]);

        // Below every distance only vertices remain
        let counts: Vec<usize> = VietorisRips::from_distance_matrix(dm, 0.5)
            .simplices(2)
            .iter()
            .map(Vec::len)
            .collect();
        assert_eq!(counts, vec![12, 0, 0]);
    }

    #[test]
    fn test_filtration_order_breaks_ties_by_vertices() {
        let dm = array![[0.0, 1.0, 1.0], [1.0, 0.0, 1.0], [1.0, 1.0, 0.0]];
        let vr = VietorisRips::from_distance_matrix(dm, 2.0);
        let edges = vr.edges_within(2.0);
        let order: Vec<Vec<usize>> = edges.into_iter().map(|e| e.vertices).collect();
        assert_eq!(order, vec![vec![0, 1], vec![0, 2], vec![1, 2]]);
    }

    #[test]
    fn test_union_find() {
        let mut uf = UnionFind::new(4);
        assert!(uf.union(0, 1));
        assert!(uf.union(2, 3));
        assert!(!uf.union(1, 0));
        assert!(uf.union(1, 3));
        assert_eq!(uf.find(0), uf.find(2));
    }
}
