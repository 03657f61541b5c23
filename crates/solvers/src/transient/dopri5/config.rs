use thiserror::Error;

/// Configuration for the Dormand–Prince solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    rel_tol: f64,
    abs_tol: f64,
    max_steps: usize,
}

/// Errors that can occur when validating a Dormand–Prince solver config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("rel_tol must be finite and non-negative")]
    RelTol,

    #[error("abs_tol must be finite and non-negative")]
    AbsTol,

    #[error("rel_tol and abs_tol cannot both be zero")]
    ZeroTolerance,

    #[error("max_steps must be at least one")]
    MaxSteps,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rel_tol: 1e-6,
            abs_tol: 1e-9,
            max_steps: 100_000,
        }
    }
}

impl Config {
    /// Creates a new config with validated tolerances.
    ///
    /// The local error of each component is held below
    /// `abs_tol + rel_tol * |y|`.
    ///
    /// # Errors
    ///
    /// Returns an error if a tolerance is negative or non-finite, if both
    /// tolerances are zero, or if `max_steps` is zero.
    pub fn new(rel_tol: f64, abs_tol: f64, max_steps: usize) -> Result<Self, ConfigError> {
        if !rel_tol.is_finite() || rel_tol < 0.0 {
            return Err(ConfigError::RelTol);
        }
        if !abs_tol.is_finite() || abs_tol < 0.0 {
            return Err(ConfigError::AbsTol);
        }
        if rel_tol == 0.0 && abs_tol == 0.0 {
            return Err(ConfigError::ZeroTolerance);
        }
        if max_steps == 0 {
            return Err(ConfigError::MaxSteps);
        }

        Ok(Self {
            rel_tol,
            abs_tol,
            max_steps,
        })
    }

    /// Returns the relative tolerance.
    #[must_use]
    pub fn rel_tol(&self) -> f64 {
        self.rel_tol
    }

    /// Returns the absolute tolerance.
    #[must_use]
    pub fn abs_tol(&self) -> f64 {
        self.abs_tol
    }

    /// Returns the maximum number of attempted steps, accepted or rejected.
    #[must_use]
    pub fn max_steps(&self) -> usize {
        self.max_steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let config = Config::default();
        assert_eq!(
            Config::new(config.rel_tol(), config.abs_tol(), config.max_steps()),
            Ok(config)
        );
    }

    #[test]
    fn rejects_bad_tolerances() {
        assert_eq!(Config::new(-1e-6, 1e-9, 10), Err(ConfigError::RelTol));
        assert_eq!(Config::new(f64::NAN, 1e-9, 10), Err(ConfigError::RelTol));
        assert_eq!(Config::new(1e-6, f64::INFINITY, 10), Err(ConfigError::AbsTol));
        assert_eq!(Config::new(0.0, 0.0, 10), Err(ConfigError::ZeroTolerance));
    }

    #[test]
    fn rejects_zero_max_steps() {
        assert_eq!(Config::new(1e-6, 1e-9, 0), Err(ConfigError::MaxSteps));
    }

    #[test]
    fn accepts_pure_absolute_tolerance() {
        let config = Config::new(0.0, 1e-8, 10).expect("valid config");
        assert_eq!(config.rel_tol(), 0.0);
        assert_eq!(config.abs_tol(), 1e-8);
    }
}
