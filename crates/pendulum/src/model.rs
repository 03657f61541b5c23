use std::convert::Infallible;

use swing_core::{DerivativeOf, Model, OdeProblem};

use crate::{PendulumDerivative, PendulumParameters, PendulumState};

/// Model input: the state at a point in time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendulumInput {
    pub time: f64,
    pub state: PendulumState,
}

/// Equation of motion of an undamped, unforced simple pendulum.
///
/// Maps `(θ, ω)` to `(ω, -(g/L)·sin θ)`. The sine is not linearized, so the
/// period grows with amplitude as it does physically.
#[derive(Debug, Clone, Copy)]
pub struct PendulumModel {
    params: PendulumParameters,
}

/// Connects [`PendulumModel`] to the ODE solvers.
#[derive(Debug, Clone, Copy, Default)]
pub struct PendulumProblem;

impl PendulumModel {
    #[must_use]
    pub fn new(params: PendulumParameters) -> Self {
        Self { params }
    }

    #[must_use]
    pub fn parameters(&self) -> PendulumParameters {
        self.params
    }

    /// Returns the state derivative at `state`.
    #[must_use]
    pub fn derivative(&self, state: &PendulumState) -> PendulumDerivative {
        let ratio = self.params.gravity() / self.params.length();
        PendulumDerivative {
            angular_velocity: state.angular_velocity,
            angular_acceleration: -ratio * state.angle.sin(),
        }
    }
}

impl Model for PendulumModel {
    type Input = PendulumInput;
    type Output = PendulumDerivative;
    type Error = Infallible;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        Ok(self.derivative(&input.state))
    }
}

impl OdeProblem for PendulumProblem {
    type Input = PendulumInput;
    type Output = PendulumDerivative;
    type Delta = f64;
    type State = PendulumState;
    type Error = Infallible;

    fn state(&self, input: &Self::Input) -> Result<Self::State, Self::Error> {
        Ok(input.state)
    }

    fn derivative(
        &self,
        _input: &Self::Input,
        output: &Self::Output,
    ) -> Result<DerivativeOf<Self::State, Self::Delta>, Self::Error> {
        Ok(*output)
    }

    fn build_input(
        &self,
        base: &Self::Input,
        state: &Self::State,
        delta: &Self::Delta,
    ) -> Result<Self::Input, Self::Error> {
        Ok(PendulumInput {
            time: base.time + delta,
            state: *state,
        })
    }
}
