//! Dendrogram: the merge tree of an agglomerative clustering.
//!
//! Stored as a merge list: leaves are numbered 0..N in label order and the
//! k-th merge creates node N + k.

use ndarray::Array2;
use std::collections::BTreeMap;

use crate::error::{Result, TdaError};

/// One merge of two clusters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Merge {
    /// Smaller node id of the two children
    pub left: usize,
    /// Larger node id of the two children
    pub right: usize,
    /// Linkage distance at which the merge happened
    pub height: f64,
    /// Number of leaves under the new node
    pub size: usize,
}

/// Binary merge tree over labelled leaves
#[derive(Debug, Clone, PartialEq)]
pub struct Dendrogram {
    labels: Vec<String>,
    merges: Vec<Merge>,
}

impl Dendrogram {
    /// Build a dendrogram from a merge list.
    ///
    /// Merge k may only join nodes that already exist (ids below N + k),
    /// and every node is merged at most once.
    pub fn new(labels: Vec<String>, merges: Vec<Merge>) -> Result<Self> {
        let n = labels.len();
        if merges.len() >= n.max(1) {
            return Err(TdaError::InvalidParameter(format!(
                "{} merges for {n} leaves",
                merges.len()
            )));
        }

        let mut used = vec![false; n + merges.len()];
        for (k, m) in merges.iter().enumerate() {
            if m.left == m.right || m.left >= n + k || m.right >= n + k {
                return Err(TdaError::InvalidParameter(format!(
                    "merge {k} joins nodes {} and {}, but only {} exist",
                    m.left,
                    m.right,
                    n + k
                )));
            }
            for child in [m.left, m.right] {
                if used[child] {
                    return Err(TdaError::InvalidParameter(format!(
                        "node {child} is merged more than once"
                    )));
                }
                used[child] = true;
            }
        }

        Ok(Self { labels, merges })
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn merges(&self) -> &[Merge] {
        &self.merges
    }

    pub fn n_leaves(&self) -> usize {
        self.labels.len()
    }

    /// Merge heights in merge order
    pub fn heights(&self) -> Vec<f64> {
        self.merges.iter().map(|m| m.height).collect()
    }

    /// Leaves of the subtree rooted at `node`, left to right
    pub fn leaves_under(&self, node: usize) -> Vec<usize> {
        let n = self.n_leaves();
        let mut out = Vec::new();
        let mut stack = vec![node];
        while let Some(id) = stack.pop() {
            if id < n {
                out.push(id);
            } else if let Some(m) = self.merges.get(id - n) {
                stack.push(m.right);
                stack.push(m.left);
            }
        }
        out
    }

    /// Leaf order for drawing the tree
    pub fn leaf_order(&self) -> Vec<usize> {
        let n = self.n_leaves();
        if self.merges.is_empty() {
            return (0..n).collect();
        }
        self.leaves_under(n + self.merges.len() - 1)
    }

    /// Cut the tree into k clusters.
    ///
    /// Returns one cluster id per leaf; ids are numbered by first
    /// appearance in leaf index order.
    pub fn cut(&self, k: usize) -> Result<Vec<usize>> {
        let n = self.n_leaves();
        if k == 0 || k > n {
            return Err(TdaError::InvalidParameter(format!(
                "cannot cut {n} leaves into {k} clusters"
            )));
        }
        Ok(self.assign(n - k))
    }

    /// Cut the tree at a height: merges at or below `height` are kept
    pub fn cut_at_height(&self, height: f64) -> Vec<usize> {
        let applied = self.merges.iter().take_while(|m| m.height <= height).count();
        self.assign(applied)
    }

    /// Cluster ids keyed by label for a k-cluster cut
    pub fn clusters_by_label(&self, k: usize) -> Result<BTreeMap<String, usize>> {
        let ids = self.cut(k)?;
        Ok(self.labels.iter().cloned().zip(ids).collect())
    }

    /// Cophenetic distance: the height at which two leaves first share a cluster
    pub fn cophenetic(&self) -> Array2<f64> {
        let n = self.n_leaves();
        let mut c = Array2::<f64>::zeros((n, n));
        for m in &self.merges {
            let left = self.leaves_under(m.left);
            let right = self.leaves_under(m.right);
            for &a in &left {
                for &b in &right {
                    c[[a, b]] = m.height;
                    c[[b, a]] = m.height;
                }
            }
        }
        c
    }

    /// Apply the first `applied` merges and label the resulting groups
    fn assign(&self, applied: usize) -> Vec<usize> {
        let n = self.n_leaves();
        let mut group: Vec<usize> = (0..n).collect();
        for m in self.merges.iter().take(applied) {
            let members = self.leaves_under(m.left);
            let target = group[members[0]];
            for leaf in self.leaves_under(m.right) {
                group[leaf] = target;
            }
            for leaf in members {
                group[leaf] = target;
            }
        }

        let mut ids: BTreeMap<usize, usize> = BTreeMap::new();
        group
            .iter()
            .map(|g| {
                let next = ids.len();
                *ids.entry(*g).or_insert(next)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ((a, b), (c, d)) with the first pair tighter
    fn sample() -> Dendrogram {
        Dendrogram::new(
            vec!["a".into(), "b".into(), "c".into(), "d".into()],
            vec![
                Merge { left: 0, right: 1, height: 1.0, size: 2 },
                Merge { left: 2, right: 3, height: 2.0, size: 2 },
                Merge { left: 4, right: 5, height: 5.0, size: 4 },
            ],
        )
        .unwrap()
    }

    #[test]
    fn cuts() {
        let d = sample();
        assert_eq!(d.cut(1).unwrap(), vec![0, 0, 0, 0]);
        assert_eq!(d.cut(2).unwrap(), vec![0, 0, 1, 1]);
        assert_eq!(d.cut(3).unwrap(), vec![0, 0, 1, 2]);
        assert_eq!(d.cut(4).unwrap(), vec![0, 1, 2, 3]);
        assert!(d.cut(0).is_err());
        assert!(d.cut(5).is_err());

        assert_eq!(d.cut_at_height(1.5), vec![0, 0, 1, 2]);
        assert_eq!(d.cut_at_height(10.0), vec![0, 0, 0, 0]);

        let by_label = d.clusters_by_label(2).unwrap();
        assert_eq!(by_label["c"], 1);
    }

    #[test]
    fn leaf_order_and_cophenetic() {
        let d = sample();
        assert_eq!(d.leaf_order(), vec![0, 1, 2, 3]);
        assert_eq!(d.leaves_under(5), vec![2, 3]);

        let c = d.cophenetic();
        assert_eq!(c[[0, 1]], 1.0);
        assert_eq!(c[[2, 3]], 2.0);
        assert_eq!(c[[0, 3]], 5.0);
        assert_eq!(c[[3, 0]], 5.0);
        assert_eq!(c[[1, 1]], 0.0);
    }

    #[test]
    fn single_leaf() {
        let d = Dendrogram::new(vec!["only".into()], Vec::new()).unwrap();
        assert_eq!(d.leaf_order(), vec![0]);
        assert_eq!(d.cut(1).unwrap(), vec![0]);
        assert!(d.heights().is_empty());
    }

    #[test]
    fn malformed_merge_lists_rejected() {
        let labels = || vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let merge = |left, right| Merge { left, right, height: 1.0, size: 2 };

        // Node 4 does not exist yet at the first merge
        assert!(Dendrogram::new(labels(), vec![merge(0, 4)]).is_err());
        // Leaf 0 merged twice
        assert!(Dendrogram::new(labels(), vec![merge(0, 1), merge(0, 2)]).is_err());
        // Self-merge
        assert!(Dendrogram::new(labels(), vec![merge(1, 1)]).is_err());
        // More merges than leaves allow
        assert!(
            Dendrogram::new(labels(), vec![merge(0, 1), merge(2, 3), merge(4, 0)]).is_err()
        );

        let ok = Dendrogram::new(labels(), vec![merge(0, 2), merge(1, 3)]).unwrap();
        assert_eq!(ok.cut(2).unwrap(), vec![0, 1, 0]);
    }
}
