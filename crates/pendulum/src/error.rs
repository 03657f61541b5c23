use swing_solvers::transient::dopri5;
use thiserror::Error;

use crate::ParameterError;

/// Errors that abandon a simulation run.
///
/// A failed run produces no trajectory.
#[derive(Debug, Error)]
pub enum Error {
    /// A parameter was rejected before integration began.
    #[error("invalid parameter: {0}")]
    InvalidParameter(#[from] ParameterError),

    /// The integrator could not advance over the whole span.
    #[error("integration failed: {0}")]
    IntegrationFailure(#[source] dopri5::Error),
}
