//! Policy record attached to each execution request.

use serde::{Deserialize, Serialize};

use super::{Algorithm, Urgency};

/// Default participation rate for volume-based algorithms.
pub const DEFAULT_PARTICIPATION_RATE: f64 = 0.15;

/// Recognized execution options for one parent request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionPolicy {
    /// Slicing algorithm.
    pub algorithm: Algorithm,
    /// Posture urgency.
    pub urgency: Urgency,
    /// Upper bound on the number of children (at least 1).
    pub max_children: u32,
    /// Fraction of market volume to target, in (0, 1].
    pub participation_rate: f64,
    /// Perturb non-final child sizes.
    pub randomize_slices: bool,
    /// Seed override for the slice perturbation.
    pub seed: Option<u64>,
}

impl Default for ExecutionPolicy {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::Immediate,
            urgency: Urgency::Normal,
            max_children: 1,
            participation_rate: DEFAULT_PARTICIPATION_RATE,
            randomize_slices: true,
            seed: None,
        }
    }
}

impl ExecutionPolicy {
    /// Create a policy for the given algorithm with default options.
    #[must_use]
    pub fn for_algorithm(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            ..Self::default()
        }
    }

    /// Set the child cap.
    #[must_use]
    pub const fn with_max_children(mut self, max_children: u32) -> Self {
        self.max_children = max_children;
        self
    }

    /// Set the urgency.
    #[must_use]
    pub const fn with_urgency(mut self, urgency: Urgency) -> Self {
        self.urgency = urgency;
        self
    }

    /// Set the participation rate.
    #[must_use]
    pub const fn with_participation_rate(mut self, rate: f64) -> Self {
        self.participation_rate = rate;
        self
    }

    /// Enable or disable slice randomization.
    #[must_use]
    pub const fn with_randomize_slices(mut self, randomize: bool) -> Self {
        self.randomize_slices = randomize;
        self
    }

    /// Fix the perturbation seed.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let policy = ExecutionPolicy::default();
        assert_eq!(policy.algorithm, Algorithm::Immediate);
        assert_eq!(policy.urgency, Urgency::Normal);
        assert_eq!(policy.max_children, 1);
        assert!((policy.participation_rate - 0.15).abs() < f64::EPSILON);
        assert!(policy.randomize_slices);
        assert!(policy.seed.is_none());
    }

    #[test]
    fn builder_methods() {
        let policy = ExecutionPolicy::for_algorithm(Algorithm::Twap)
            .with_max_children(4)
            .with_randomize_slices(false)
            .with_seed(7);
        assert_eq!(policy.algorithm, Algorithm::Twap);
        assert_eq!(policy.max_children, 4);
        assert!(!policy.randomize_slices);
        assert_eq!(policy.seed, Some(7));
    }
}
