//! Exact Persistent Homology via the Standard Algorithm
//!
//! ## Algorithm Overview
//!
//! 1. Build the Vietoris-Rips filtration up to dimension max_dim + 1
//! 2. H0 by union-find over edges in filtration order: an edge that merges
//!    two components kills the younger one, every other edge opens a cycle
//! 3. For k ≥ 1, reduce the boundary columns of the (k+1)-simplices over
//!    Z/2Z; a non-zero column with lowest face σ pairs σ (birth) with the
//!    column's simplex (death)
//! 4. Cycles never killed below the threshold are closed at the threshold
//!
//! Columns of the top dimension are only reduced until every open cycle
//! has been paired; the remaining columns cannot produce new pairs.
//!
//! Every simplex up to dimension max_dim + 1 below the threshold is held in
//! memory. For H1 that is O(n³) triangles when the threshold exceeds most
//! pairwise distances, so long series need a threshold well below the
//! cloud diameter.
//!
//! ## Reference
//!
//! Edelsbrunner, Letscher, Zomorodian (2002). "Topological Persistence
//! and Simplification". Discrete & Computational Geometry.

use ndarray::Array2;
use std::collections::HashMap;

use super::vietoris_rips::{Simplex, UnionFind, VietorisRips};
use super::{PersistenceDiagram, PersistencePair};
use crate::embedding::PointCloud;
use crate::error::{Result, TdaError};

/// Computes a persistence diagram from a point cloud.
///
/// Implementations must be deterministic: the same cloud and parameters
/// always produce the same diagram.
pub trait PersistenceComputer: Send + Sync {
    fn compute(
        &self,
        cloud: &PointCloud,
        max_dimension: usize,
        distance_threshold: f64,
    ) -> Result<PersistenceDiagram>;
}

/// Exact Vietoris-Rips persistence by boundary-matrix reduction
#[derive(Debug, Clone, Copy, Default)]
pub struct RipsPersistence;

impl RipsPersistence {
    pub fn new() -> Self {
        Self
    }

    /// Compute persistence from a precomputed distance matrix
    pub fn compute_from_distances(
        &self,
        distances: &Array2<f64>,
        max_dimension: usize,
        distance_threshold: f64,
    ) -> Result<PersistenceDiagram> {
        let n = distances.nrows();
        if distances.ncols() != n {
            return Err(TdaError::DimensionMismatch {
                expected: n,
                got: distances.ncols(),
            });
        }
        if n < 2 {
            return Err(TdaError::DegenerateCloud { points: n });
        }
        if !distance_threshold.is_finite() || distance_threshold <= 0.0 {
            return Err(TdaError::InvalidParameter(format!(
                "distance_threshold must be positive and finite, got {distance_threshold}"
            )));
        }

        let vr = VietorisRips::from_distance_matrix(distances.clone(), distance_threshold);
        let diagram = reduce(&vr, max_dimension);

        tracing::debug!(
            points = n,
            threshold = distance_threshold,
            max_dimension,
            pairs = diagram.pairs().len(),
            "Computed Rips persistence"
        );

        Ok(diagram)
    }
}

impl PersistenceComputer for RipsPersistence {
    fn compute(
        &self,
        cloud: &PointCloud,
        max_dimension: usize,
        distance_threshold: f64,
    ) -> Result<PersistenceDiagram> {
        if cloud.n_points() < 2 {
            return Err(TdaError::DegenerateCloud {
                points: cloud.n_points(),
            });
        }
        self.compute_from_distances(&cloud.distance_matrix(), max_dimension, distance_threshold)
    }
}

/// Sparse Z/2Z column, rows kept sorted ascending
#[derive(Debug, Clone, Default)]
struct SparseColumn {
    rows: Vec<usize>,
}

impl SparseColumn {
    fn from_indices(mut rows: Vec<usize>) -> Self {
        rows.sort_unstable();
        Self { rows }
    }

    /// Lowest (maximum) non-zero index
    fn low(&self) -> Option<usize> {
        self.rows.last().copied()
    }

    /// Symmetric difference with another column - addition in Z/2Z
    fn add_assign(&mut self, other: &SparseColumn) {
        let mut merged = Vec::with_capacity(self.rows.len() + other.rows.len());
        let (mut i, mut j) = (0, 0);
        while i < self.rows.len() && j < other.rows.len() {
            let (a, b) = (self.rows[i], other.rows[j]);
            if a < b {
                merged.push(a);
                i += 1;
            } else if b < a {
                merged.push(b);
                j += 1;
            } else {
                i += 1;
                j += 1;
            }
        }
        merged.extend_from_slice(&self.rows[i..]);
        merged.extend_from_slice(&other.rows[j..]);
        self.rows = merged;
    }
}

/// Pairs shorter than this fraction of the threshold are rounding noise
const MIN_RELATIVE_PERSISTENCE: f64 = 1e-12;

fn reduce(vr: &VietorisRips, max_dim: usize) -> PersistenceDiagram {
    let threshold = vr.threshold();
    let min_persistence = threshold * MIN_RELATIVE_PERSISTENCE;
    let simplices = vr.simplices(max_dim + 1);
    let mut diagram = PersistenceDiagram::new(max_dim, threshold);

    // H0: vertices are all born at 0
    let n = vr.n_points();
    let mut components = UnionFind::new(n);
    let mut open_cycles: Vec<bool> = vec![false; simplices.get(1).map_or(0, Vec::len)];
    let mut survivors = n;

    if let Some(edges) = simplices.get(1) {
        for (idx, edge) in edges.iter().enumerate() {
            if components.union(edge.vertices[0], edge.vertices[1]) {
                survivors -= 1;
                if edge.diameter > min_persistence {
                    diagram.add(PersistencePair::new(0, 0.0, edge.diameter));
                }
            } else {
                open_cycles[idx] = true;
            }
        }
    }
    for _ in 0..survivors {
        diagram.add(PersistencePair::truncated(0, 0.0, threshold));
    }

    // Hk for k ≥ 1: cofaces of dimension k+1 kill k-cycles
    for k in 1..=max_dim {
        let faces = &simplices[k];
        let cofaces = match simplices.get(k + 1) {
            Some(cofaces) => cofaces,
            None => break,
        };
        let top = k == max_dim;

        let (killed, next_open) =
            reduce_dimension(faces, cofaces, &open_cycles, top, min_persistence, |pair| {
                diagram.add(PersistencePair::new(k, pair.0, pair.1))
            });

        for (idx, face) in faces.iter().enumerate() {
            if open_cycles[idx] && !killed[idx] && threshold - face.diameter > min_persistence {
                diagram.add(PersistencePair::truncated(k, face.diameter, threshold));
            }
        }

        open_cycles = next_open;
    }

    diagram.sort();
    diagram
}

/// Reduce the boundary matrix of `cofaces` against `faces`.
///
/// Returns which faces were killed and which cofaces reduced to zero
/// (the cycles opened in the next dimension). When `top` is set, no
/// next-dimension cycles are needed and the loop stops once every open
/// face has been killed.
fn reduce_dimension(
    faces: &[Simplex],
    cofaces: &[Simplex],
    open: &[bool],
    top: bool,
    min_persistence: f64,
    mut emit: impl FnMut((f64, f64)),
) -> (Vec<bool>, Vec<bool>) {
    let face_index: HashMap<&[usize], usize> = faces
        .iter()
        .enumerate()
        .map(|(idx, s)| (s.vertices.as_slice(), idx))
        .collect();

    let mut killed = vec![false; faces.len()];
    let mut next_open = vec![false; cofaces.len()];
    let mut pivots: HashMap<usize, SparseColumn> = HashMap::new();
    let mut remaining = open.iter().filter(|&&o| o).count();

    for (col_idx, coface) in cofaces.iter().enumerate() {
        if top && remaining == 0 {
            break;
        }

        let mut boundary = SparseColumn::from_indices(
            (0..coface.vertices.len())
                .filter_map(|skip| {
                    let face: Vec<usize> = coface
                        .vertices
                        .iter()
                        .enumerate()
                        .filter(|&(i, _)| i != skip)
                        .map(|(_, &v)| v)
                        .collect();
                    face_index.get(face.as_slice()).copied()
                })
                .collect(),
        );

        while let Some(low) = boundary.low() {
            match pivots.get(&low) {
                Some(pivot) => boundary.add_assign(pivot),
                None => break,
            }
        }

        match boundary.low() {
            Some(low) => {
                killed[low] = true;
                if open[low] {
                    remaining = remaining.saturating_sub(1);
                }
                let birth = faces[low].diameter;
                let death = coface.diameter;
                if death - birth > min_persistence {
                    emit((birth, death));
                }
                pivots.insert(low, boundary);
            }
            None => next_open[col_idx] = true,
        }
    }

    (killed, next_open)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_two_points() {
        // Two points at distance 1
        let dm = array![[0.0, 1.0], [1.0, 0.0]];

        let pd = RipsPersistence.compute_from_distances(&dm, 1, 2.0).unwrap();

        // H0: one interval from 0 to 1 plus the surviving component
        let h0 = pd.dim(0);
        assert_eq!(h0.len(), 2);
        let finite: Vec<_> = h0.iter().filter(|p| !p.truncated).collect();
        assert_eq!(finite.len(), 1);
        assert_relative_eq!(finite[0].birth, 0.0);
        assert_relative_eq!(finite[0].death, 1.0);

        let survivor = h0.iter().find(|p| p.truncated).unwrap();
        assert_relative_eq!(survivor.death, 2.0);
        assert_eq!(pd.count(1), 0);
    }

    #[test]
    fn test_triangle() {
        // Equilateral triangle with side 1: the loop fills as soon as it forms
        let dm = array![[0.0, 1.0, 1.0], [1.0, 0.0, 1.0], [1.0, 1.0, 0.0]];

        let pd = RipsPersistence.compute_from_distances(&dm, 1, 2.0).unwrap();

        assert_eq!(pd.dim(0).iter().filter(|p| !p.truncated).count(), 2);
        assert_eq!(pd.count(1), 0);
    }

    #[test]
    fn test_square_cycle() {
        // Square: edges of length 1, diagonals sqrt(2)
        let s2 = 2.0_f64.sqrt();
        let dm = array![
            [0.0, 1.0, s2, 1.0],
            [1.0, 0.0, 1.0, s2],
            [s2, 1.0, 0.0, 1.0],
            [1.0, s2, 1.0, 0.0]
        ];

        let pd = RipsPersistence.compute_from_distances(&dm, 1, 2.0).unwrap();

        // H1: one cycle born at 1, dies at sqrt(2)
        let h1 = pd.dim(1);
        assert_eq!(h1.len(), 1, "Square should have one H1 cycle");
        assert_relative_eq!(h1[0].birth, 1.0, epsilon = 1e-10);
        assert_relative_eq!(h1[0].death, s2, epsilon = 1e-10);
        assert!(!h1[0].truncated);
    }

    #[test]
    fn test_rounding_length_pairs_dropped() {
        // Diagonals longer than the sides by a few ulps: the loop is born
        // and filled at the same scale up to rounding
        let diag = 1.0 + 4.0 * f64::EPSILON;
        let dm = array![
            [0.0, 1.0, diag, 1.0],
            [1.0, 0.0, 1.0, diag],
            [diag, 1.0, 0.0, 1.0],
            [1.0, diag, 1.0, 0.0]
        ];

        let pd = RipsPersistence.compute_from_distances(&dm, 1, 2.0).unwrap();
        assert_eq!(pd.count(1), 0);
        assert!(pd.pairs().iter().all(|p| p.persistence() > 1e-9));

        // Loop closing a few ulps below the threshold is not reported either
        let s2 = 2.0_f64.sqrt();
        let dm = array![
            [0.0, 1.0, s2, 1.0],
            [1.0, 0.0, 1.0, s2],
            [s2, 1.0, 0.0, 1.0],
            [1.0, s2, 1.0, 0.0]
        ];
        let pd = RipsPersistence
            .compute_from_distances(&dm, 1, 1.0 + f64::EPSILON)
            .unwrap();
        assert_eq!(pd.count(1), 0);
    }

    #[test]
    fn test_cycle_truncated_at_threshold() {
        let s2 = 2.0_f64.sqrt();
        let dm = array![
            [0.0, 1.0, s2, 1.0],
            [1.0, 0.0, 1.0, s2],
            [s2, 1.0, 0.0, 1.0],
            [1.0, s2, 1.0, 0.0]
        ];

        // Diagonals are cut off, so the loop never fills
        let pd = RipsPersistence.compute_from_distances(&dm, 1, 1.2).unwrap();
        let h1 = pd.dim(1);
        assert_eq!(h1.len(), 1);
        assert!(h1[0].truncated);
        assert_relative_eq!(h1[0].death, 1.2);
    }

    #[test]
    fn test_octahedron_void() {
        // Six points ±e_i: a 2-sphere; H2 class born at sqrt(2), dies at 2
        let cloud = PointCloud::from_array(array![
            [1.0, 0.0, 0.0],
            [-1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, -1.0, 0.0],
            [0.0, 0.0, 1.0],
            [0.0, 0.0, -1.0]
        ]);

        let pd = RipsPersistence.compute(&cloud, 2, 3.0).unwrap();
        let h2 = pd.dim(2);
        assert_eq!(h2.len(), 1);
        assert_relative_eq!(h2[0].birth, 2.0_f64.sqrt(), epsilon = 1e-10);
        assert_relative_eq!(h2[0].death, 2.0, epsilon = 1e-10);
        assert_eq!(pd.count(1), 0);
    }

    #[test]
    fn test_degenerate_cloud() {
        let cloud = PointCloud::from_array(array![[1.0, 2.0]]);
        let err = RipsPersistence.compute(&cloud, 1, 1.0).unwrap_err();
        assert_eq!(err, TdaError::DegenerateCloud { points: 1 });
    }

    #[test]
    fn test_invalid_threshold() {
        let dm = array![[0.0, 1.0], [1.0, 0.0]];
        assert!(matches!(
            RipsPersistence.compute_from_distances(&dm, 1, 0.0),
            Err(TdaError::InvalidParameter(_))
        ));
        assert!(matches!(
            RipsPersistence.compute_from_distances(&dm, 1, f64::INFINITY),
            Err(TdaError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_deterministic() {
        let cloud = PointCloud::from_array(array![
            [0.0, 0.0],
            [1.0, 0.0],
            [1.0, 1.0],
            [0.0, 1.0],
            [0.5, 0.5]
        ]);
        let a = RipsPersistence.compute(&cloud, 1, 2.0).unwrap();
        let b = RipsPersistence.compute(&cloud, 1, 2.0).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_sparse_column_xor() {
        let mut a = SparseColumn::from_indices(vec![5, 1, 3]);
        let b = SparseColumn::from_indices(vec![3, 4]);
        a.add_assign(&b);
        assert_eq!(a.rows, vec![1, 4, 5]);
        assert_eq!(a.low(), Some(5));
    }
}
