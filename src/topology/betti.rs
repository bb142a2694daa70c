//! Betti Numbers: Topological Invariants
//!
//! The k-th Betti number βₖ counts the number of k-dimensional
//! "holes" in a topological space:
//!
//! - β₀: Number of connected components
//! - β₁: Number of 1-dimensional loops/cycles
//! - β₂: Number of 2-dimensional voids/cavities
//!
//! Read off a persistence diagram, βₖ(ε) is the number of k-dimensional
//! pairs alive at scale ε.

use super::PersistenceDiagram;

/// Betti numbers at a specific filtration value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BettiNumbers {
    pub beta_0: usize,  // Connected components
    pub beta_1: usize,  // Loops
    pub beta_2: usize,  // Voids
    pub epsilon: f64,   // Filtration scale
}

impl BettiNumbers {
    pub fn new(beta_0: usize, beta_1: usize, beta_2: usize, epsilon: f64) -> Self {
        Self { beta_0, beta_1, beta_2, epsilon }
    }

    /// Betti numbers of the filtration at scale epsilon
    pub fn at_scale(pd: &PersistenceDiagram, epsilon: f64) -> Self {
        Self::new(
            pd.betti_at(0, epsilon),
            pd.betti_at(1, epsilon),
            pd.betti_at(2, epsilon),
            epsilon,
        )
    }

    /// Euler characteristic χ = β₀ - β₁ + β₂
    pub fn euler_characteristic(&self) -> i64 {
        self.beta_0 as i64 - self.beta_1 as i64 + self.beta_2 as i64
    }
}

/// Betti curve: Betti numbers on an even grid over [0, threshold]
#[derive(Debug, Clone)]
pub struct BettiCurve {
    pub values: Vec<BettiNumbers>,
}

impl BettiCurve {
    pub fn compute(pd: &PersistenceDiagram, n_steps: usize) -> Self {
        let n_steps = n_steps.max(1);
        let step = pd.threshold() / n_steps as f64;
        let values = (0..=n_steps)
            .map(|i| BettiNumbers::at_scale(pd, i as f64 * step))
            .collect();

        Self { values }
    }

    /// Get β₁ curve
    pub fn beta_1_curve(&self) -> Vec<(f64, usize)> {
        self.values.iter().map(|b| (b.epsilon, b.beta_1)).collect()
    }

    /// Integrated β₁ (area under curve)
    pub fn integrated_beta_1(&self) -> f64 {
        if self.values.len() < 2 {
            return 0.0;
        }

        let mut integral = 0.0;
        for i in 1..self.values.len() {
            let de = self.values[i].epsilon - self.values[i-1].epsilon;
            let avg = (self.values[i].beta_1 + self.values[i-1].beta_1) as f64 / 2.0;
            integral += de * avg;
        }
        integral
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::PersistencePair;

    #[test]
    fn test_curve_of_single_loop() {
        let pd = PersistenceDiagram::from_pairs(
            [
                PersistencePair::truncated(0, 0.0, 2.0),
                PersistencePair::new(1, 0.5, 1.5),
            ],
            2.0,
        );

        let curve = BettiCurve::compute(&pd, 20);
        assert_eq!(curve.values.len(), 21);

        let mid = BettiNumbers::at_scale(&pd, 1.0);
        assert_eq!(mid, BettiNumbers::new(1, 1, 0, 1.0));
        assert_eq!(mid.euler_characteristic(), 0);

        // Loop alive over a length-1 window
        assert!((curve.integrated_beta_1() - 1.0).abs() < 0.11);
    }
}
