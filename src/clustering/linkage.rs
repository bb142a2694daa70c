//! Agglomerative clustering with Lance-Williams distance updates.
//!
//! After merging clusters i and j, the distance from the new cluster to
//! every other cluster k is
//!
//!   d(i∪j, k) = αᵢ d(i,k) + αⱼ d(j,k) + β d(i,j) + γ |d(i,k) - d(j,k)|
//!
//! with coefficients depending on the linkage. Ward runs on squared
//! Euclidean distances and reports heights on the distance scale.

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use super::Merge;

/// Inter-cluster distance rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Linkage {
    /// Minimum increase of within-cluster variance
    #[default]
    Ward,
    /// Nearest members
    Single,
    /// Farthest members
    Complete,
    /// Mean distance between members (UPGMA)
    Average,
}

impl Linkage {
    /// Distance from the merged cluster i∪j to cluster k
    fn update(&self, d_ik: f64, d_jk: f64, d_ij: f64, n_i: f64, n_j: f64, n_k: f64) -> f64 {
        match self {
            Linkage::Single => d_ik.min(d_jk),
            Linkage::Complete => d_ik.max(d_jk),
            Linkage::Average => (n_i * d_ik + n_j * d_jk) / (n_i + n_j),
            Linkage::Ward => {
                ((n_i + n_k) * d_ik + (n_j + n_k) * d_jk - n_k * d_ij) / (n_i + n_j + n_k)
            }
        }
    }
}

/// Merge all points of a distance matrix into one cluster.
///
/// Clusters live in slots indexed like the input rows; a merged cluster
/// takes the lower slot of its two children. The closest pair is searched
/// in (lower slot, higher slot) order and only a strictly smaller distance
/// replaces the current best, so equal distances resolve to the pair with
/// the lowest slot indices.
pub(crate) fn agglomerate(distances: &Array2<f64>, linkage: Linkage) -> Vec<Merge> {
    let n = distances.nrows();
    let mut d = distances.clone();
    if linkage == Linkage::Ward {
        d.mapv_inplace(|x| x * x);
    }

    let mut active = vec![true; n];
    let mut size = vec![1usize; n];
    let mut node: Vec<usize> = (0..n).collect();
    let mut merges = Vec::with_capacity(n.saturating_sub(1));

    for step in 0..n.saturating_sub(1) {
        let mut best: Option<(usize, usize, f64)> = None;
        for i in 0..n {
            if !active[i] {
                continue;
            }
            for j in i + 1..n {
                if !active[j] {
                    continue;
                }
                let dij = d[[i, j]];
                if best.map_or(true, |(_, _, b)| dij < b) {
                    best = Some((i, j, dij));
                }
            }
        }

        let (i, j, dij) = match best {
            Some(best) => best,
            None => break,
        };

        let height = match linkage {
            Linkage::Ward => dij.max(0.0).sqrt(),
            _ => dij,
        };
        let (left, right) = (node[i].min(node[j]), node[i].max(node[j]));
        merges.push(Merge {
            left,
            right,
            height,
            size: size[i] + size[j],
        });

        let (n_i, n_j) = (size[i] as f64, size[j] as f64);
        for k in 0..n {
            if !active[k] || k == i || k == j {
                continue;
            }
            let updated = linkage.update(d[[i, k]], d[[j, k]], dij, n_i, n_j, size[k] as f64);
            d[[i, k]] = updated;
            d[[k, i]] = updated;
        }

        active[j] = false;
        size[i] += size[j];
        node[i] = n + step;
    }

    merges
}
