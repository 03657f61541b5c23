use swing_core::{Components, StepIntegrable};

use crate::ParameterError;

/// Instantaneous motion of the pendulum.
///
/// The angle is measured from the downward vertical in radians and is not
/// wrapped, so a pendulum that loops over the top keeps accumulating angle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PendulumState {
    pub angle: f64,
    pub angular_velocity: f64,
}

/// Time derivative of a [`PendulumState`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PendulumDerivative {
    pub angular_velocity: f64,
    pub angular_acceleration: f64,
}

impl PendulumState {
    #[must_use]
    pub fn new(angle: f64, angular_velocity: f64) -> Self {
        Self {
            angle,
            angular_velocity,
        }
    }

    /// Creates a state from an angle in degrees and an angular velocity in rad/s.
    #[must_use]
    pub fn from_degrees(angle_deg: f64, angular_velocity: f64) -> Self {
        Self::new(angle_deg.to_radians(), angular_velocity)
    }

    /// Checks that the state can seed an integration.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first non-finite component.
    pub fn validate(self) -> Result<Self, ParameterError> {
        if !self.angle.is_finite() {
            return Err(ParameterError::InitialAngle(self.angle));
        }
        if !self.angular_velocity.is_finite() {
            return Err(ParameterError::InitialAngularVelocity(
                self.angular_velocity,
            ));
        }
        Ok(self)
    }
}

impl StepIntegrable<f64> for PendulumState {
    type Derivative = PendulumDerivative;

    fn step(&self, derivative: PendulumDerivative, dt: f64) -> Self {
        Self {
            angle: self.angle + derivative.angular_velocity * dt,
            angular_velocity: self.angular_velocity + derivative.angular_acceleration * dt,
        }
    }
}

impl Components for PendulumState {
    const COUNT: usize = 2;

    fn write_components(&self, out: &mut [f64]) {
        out[0] = self.angle;
        out[1] = self.angular_velocity;
    }

    fn from_components(components: &[f64]) -> Self {
        Self::new(components[0], components[1])
    }
}

impl Components for PendulumDerivative {
    const COUNT: usize = 2;

    fn write_components(&self, out: &mut [f64]) {
        out[0] = self.angular_velocity;
        out[1] = self.angular_acceleration;
    }

    fn from_components(components: &[f64]) -> Self {
        Self {
            angular_velocity: components[0],
            angular_acceleration: components[1],
        }
    }
}
