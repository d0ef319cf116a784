//! Tuning knobs for the team balancer.
//!
//! A configuration can be created programmatically with
//! [`BalancerConfig::new()`] or from environment variables with
//! [`BalancerConfig::from_env()`]. The defaults reproduce the tuning the
//! balancer was calibrated with; change them only to re-tune balance.
//!
//! # Environment Variables
//!
//! All values are optional; an unset or unparseable variable falls back to
//! the default.
//!
//! - `BALANCE_FEMALE_MULTIPLIER` (float) — skill multiplier applied to
//!   female participants during seeding and refinement (default: `0.85`)
//! - `BALANCE_FAMILIARITY_WEIGHT` (float) — weight of the recent-pairing
//!   familiarity term when a history is supplied (default: `0.3`)
//! - `BALANCE_CONVERGENCE_THRESHOLD` (float) — minimum cost improvement a
//!   swap must bring to be applied (default: `0.005`)
//! - `BALANCE_MAX_ITERATIONS` (integer) — hard cap on refinement
//!   iterations (default: `200`)

use std::env;

/// Tuning parameters of [`balance_teams`](crate::balancer::balance_teams).
#[derive(Debug, Clone, Copy)]
pub struct BalancerConfig {
    pub(crate) female_multiplier: f64,
    pub(crate) familiarity_weight: f64,
    pub(crate) convergence_threshold: f64,
    pub(crate) max_iterations: usize,
}

impl BalancerConfig {
    /// Create a configuration with the default tuning.
    ///
    /// By default:
    /// - female participants weigh in at 0.85× their raw composite,
    /// - the familiarity term weighs 0.3 when a pairing history is given,
    /// - refinement stops below a 0.005 improvement,
    /// - refinement runs at most 200 iterations.
    #[must_use]
    pub fn new() -> Self {
        Self {
            female_multiplier: 0.85,
            familiarity_weight: 0.3,
            convergence_threshold: 0.005,
            max_iterations: 200,
        }
    }

    /// Create a configuration from environment variables.
    ///
    /// See the module documentation for the recognized variables. Any other
    /// value (including unset) keeps the default for that field.
    #[must_use]
    pub fn from_env() -> Self {
        fn parse_f64(var: &str, default: f64) -> f64 {
            env::var(var)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default)
        }

        fn parse_usize(var: &str, default: usize) -> usize {
            env::var(var)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default)
        }

        let defaults = Self::new();
        Self {
            female_multiplier: parse_f64("BALANCE_FEMALE_MULTIPLIER", defaults.female_multiplier),
            familiarity_weight: parse_f64("BALANCE_FAMILIARITY_WEIGHT", defaults.familiarity_weight),
            convergence_threshold: parse_f64(
                "BALANCE_CONVERGENCE_THRESHOLD",
                defaults.convergence_threshold,
            ),
            max_iterations: parse_usize("BALANCE_MAX_ITERATIONS", defaults.max_iterations),
        }
    }

    /// Set the skill multiplier applied to female participants.
    pub fn with_female_multiplier(mut self, value: f64) -> Self {
        self.female_multiplier = value;
        self
    }

    /// Set the weight of the familiarity term.
    pub fn with_familiarity_weight(mut self, value: f64) -> Self {
        self.familiarity_weight = value;
        self
    }

    /// Set the minimum improvement a swap must bring to be applied.
    pub fn with_convergence_threshold(mut self, value: f64) -> Self {
        self.convergence_threshold = value;
        self
    }

    /// Set the hard cap on refinement iterations.
    pub fn with_max_iterations(mut self, value: usize) -> Self {
        self.max_iterations = value;
        self
    }
}

impl Default for BalancerConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_calibrated_tuning() {
        let config = BalancerConfig::new();
        assert_eq!(config.female_multiplier, 0.85);
        assert_eq!(config.familiarity_weight, 0.3);
        assert_eq!(config.convergence_threshold, 0.005);
        assert_eq!(config.max_iterations, 200);
    }

    #[test]
    fn builders_are_chainable() {
        let config = BalancerConfig::new()
            .with_female_multiplier(1.0)
            .with_familiarity_weight(0.0)
            .with_max_iterations(10);
        assert_eq!(config.female_multiplier, 1.0);
        assert_eq!(config.familiarity_weight, 0.0);
        assert_eq!(config.max_iterations, 10);
    }
}
