//! Persistence Diagrams
//!
//! A persistence pair (b, d) represents a topological feature that is
//! "born" at filtration value b and "dies" at value d.
//!
//! ## Interpretation
//!
//! - Long-lived features (large d-b) represent robust topological structure
//! - Short-lived features may be noise or transient phenomena
//! - The persistence diagram encodes the "topological fingerprint" of the data
//!
//! Features that are still alive when the filtration stops at the distance
//! threshold are closed at the threshold and marked `truncated`.

/// A persistence pair (dimension, birth, death) with birth ≤ death
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PersistencePair {
    pub dimension: usize,
    pub birth: f64,
    pub death: f64,
    /// Death was clamped to the distance threshold
    pub truncated: bool,
}

impl PersistencePair {
    pub fn new(dimension: usize, birth: f64, death: f64) -> Self {
        Self {
            dimension,
            birth,
            death,
            truncated: false,
        }
    }

    pub fn truncated(dimension: usize, birth: f64, threshold: f64) -> Self {
        Self {
            dimension,
            birth,
            death: threshold,
            truncated: true,
        }
    }

    /// Lifetime of the feature
    pub fn persistence(&self) -> f64 {
        self.death - self.birth
    }

    /// Midpoint of the interval, where its landscape tent peaks
    pub fn midpoint(&self) -> f64 {
        (self.birth + self.death) / 2.0
    }
}

/// Persistence diagram: all pairs of one point cloud
#[derive(Debug, Clone, PartialEq)]
pub struct PersistenceDiagram {
    pairs: Vec<PersistencePair>,
    max_dimension: usize,
    threshold: f64,
}

impl PersistenceDiagram {
    pub fn new(max_dimension: usize, threshold: f64) -> Self {
        Self {
            pairs: Vec::new(),
            max_dimension,
            threshold,
        }
    }

    /// Build a diagram from explicit pairs (births and deaths must be ordered)
    pub fn from_pairs(
        pairs: impl IntoIterator<Item = PersistencePair>,
        threshold: f64,
    ) -> Self {
        let mut diagram = Self::new(0, threshold);
        for pair in pairs {
            diagram.add(pair);
        }
        diagram.sort();
        diagram
    }

    pub fn add(&mut self, pair: PersistencePair) {
        debug_assert!(pair.birth <= pair.death);
        if pair.dimension > self.max_dimension {
            self.max_dimension = pair.dimension;
        }
        self.pairs.push(pair);
    }

    /// Order pairs by (dimension, birth, death)
    pub(crate) fn sort(&mut self) {
        self.pairs.sort_by(|a, b| {
            a.dimension
                .cmp(&b.dimension)
                .then_with(|| a.birth.total_cmp(&b.birth))
                .then_with(|| a.death.total_cmp(&b.death))
        });
    }

    pub fn pairs(&self) -> &[PersistencePair] {
        &self.pairs
    }

    pub fn max_dimension(&self) -> usize {
        self.max_dimension
    }

    /// Distance threshold the filtration was truncated at
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// All pairs of homology dimension d
    pub fn dim(&self, d: usize) -> Vec<&PersistencePair> {
        self.pairs.iter().filter(|p| p.dimension == d).collect()
    }

    /// Number of pairs in dimension d
    pub fn count(&self, d: usize) -> usize {
        self.pairs.iter().filter(|p| p.dimension == d).count()
    }

    /// Total persistence in dimension d
    pub fn total_persistence(&self, d: usize) -> f64 {
        self.pairs
            .iter()
            .filter(|p| p.dimension == d)
            .map(|p| p.persistence())
            .sum()
    }

    /// Maximum persistence in dimension d
    pub fn max_persistence(&self, d: usize) -> f64 {
        self.pairs
            .iter()
            .filter(|p| p.dimension == d)
            .map(|p| p.persistence())
            .fold(0.0, f64::max)
    }

    /// Most persistent pair in dimension d
    pub fn dominant(&self, d: usize) -> Option<&PersistencePair> {
        self.pairs
            .iter()
            .filter(|p| p.dimension == d)
            .max_by(|a, b| a.persistence().total_cmp(&b.persistence()))
    }

    /// Number of dimension-d features alive at scale epsilon
    ///
    /// A feature is alive on [birth, death); truncated features stay alive
    /// up to and including the threshold.
    pub fn betti_at(&self, d: usize, epsilon: f64) -> usize {
        self.pairs
            .iter()
            .filter(|p| p.dimension == d && p.birth <= epsilon)
            .filter(|p| epsilon < p.death || (p.truncated && epsilon <= p.death))
            .count()
    }
}
