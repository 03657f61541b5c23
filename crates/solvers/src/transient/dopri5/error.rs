use std::error::Error as StdError;

/// Errors that can occur during Dormand–Prince integration.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("model error: {0}")]
    Model(#[source] Box<dyn StdError + Send + Sync>),

    #[error("problem error: {0}")]
    Problem(#[source] Box<dyn StdError + Send + Sync>),

    #[error("duration must be finite and non-negative, got {0}")]
    InvalidDuration(f64),

    #[error("output offsets must be ascending and lie within [0, {duration}]")]
    InvalidOutputs { duration: f64 },

    #[error("non-finite derivative at offset {offset}")]
    NonFiniteDerivative { offset: f64 },

    #[error("step size {step_size:e} fell below the resolvable minimum at offset {offset}")]
    StepSizeTooSmall { offset: f64, step_size: f64 },

    #[error("exceeded {max_steps} attempted steps")]
    MaxStepsExceeded { max_steps: usize },
}

impl Error {
    pub(crate) fn model<E: StdError + Send + Sync + 'static>(err: E) -> Self {
        Self::Model(Box::new(err))
    }

    pub(crate) fn problem<E: StdError + Send + Sync + 'static>(err: E) -> Self {
        Self::Problem(Box::new(err))
    }
}
