use std::f64::consts::TAU;

use swing_solvers::transient::dopri5;
use thiserror::Error;

use crate::PendulumState;

/// Physical parameters of a simple pendulum.
///
/// Both values are finite and strictly positive; use [`PendulumParameters::new`]
/// to construct one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendulumParameters {
    gravity: f64,
    length: f64,
}

/// Simulated time interval, starting at zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeSpan {
    total_time: f64,
}

/// A physical-domain value outside its valid range.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum ParameterError {
    #[error("gravitational acceleration must be finite and positive, got {0}")]
    Gravity(f64),

    #[error("pendulum length must be finite and positive, got {0}")]
    Length(f64),

    #[error("total time must be finite and non-negative, got {0}")]
    TotalTime(f64),

    #[error("initial angle must be finite, got {0}")]
    InitialAngle(f64),

    #[error("initial angular velocity must be finite, got {0}")]
    InitialAngularVelocity(f64),

    #[error("solver tolerance: {0}")]
    Tolerance(#[from] dopri5::ConfigError),
}

impl PendulumParameters {
    /// Creates validated parameters from gravity (m/s²) and rod length (m).
    ///
    /// # Errors
    ///
    /// Returns an error if either value is non-finite, zero, or negative.
    pub fn new(gravity: f64, length: f64) -> Result<Self, ParameterError> {
        if !gravity.is_finite() || gravity <= 0.0 {
            return Err(ParameterError::Gravity(gravity));
        }
        if !length.is_finite() || length <= 0.0 {
            return Err(ParameterError::Length(length));
        }
        Ok(Self { gravity, length })
    }

    /// Returns the gravitational acceleration in m/s².
    #[must_use]
    pub fn gravity(&self) -> f64 {
        self.gravity
    }

    /// Returns the rod length in m.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Returns `√(g/L)` in rad/s.
    #[must_use]
    pub fn natural_frequency(&self) -> f64 {
        (self.gravity / self.length).sqrt()
    }

    /// Returns the linearized period `2π√(L/g)` in s.
    ///
    /// Accurate for small amplitudes; larger swings take longer.
    #[must_use]
    pub fn small_angle_period(&self) -> f64 {
        TAU / self.natural_frequency()
    }

    /// Returns the mechanical energy per unit mass of `state`, in J/kg.
    ///
    /// The zero of potential energy is the bob at rest at the bottom.
    #[must_use]
    pub fn specific_energy(&self, state: &PendulumState) -> f64 {
        let speed = self.length * state.angular_velocity;
        let height = self.length * (1.0 - state.angle.cos());
        0.5 * speed * speed + self.gravity * height
    }
}

impl TimeSpan {
    /// Creates a span `[0, total_time]`.
    ///
    /// A zero span is allowed: every sample then sits at the initial time.
    ///
    /// # Errors
    ///
    /// Returns an error if `total_time` is negative or non-finite.
    pub fn new(total_time: f64) -> Result<Self, ParameterError> {
        if !total_time.is_finite() || total_time < 0.0 {
            return Err(ParameterError::TotalTime(total_time));
        }
        Ok(Self { total_time })
    }

    /// Returns the end of the span in s.
    #[must_use]
    pub fn total_time(&self) -> f64 {
        self.total_time
    }
}
