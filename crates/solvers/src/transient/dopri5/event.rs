use swing_core::Snapshot;

/// Events emitted by the Dormand–Prince solver.
///
/// One event is emitted per attempted step. Offsets are measured from the
/// initial input.
#[derive(Debug)]
pub enum Event<'a, I, O> {
    /// A step met the tolerance and the solution advanced.
    Accepted {
        /// Number of accepted steps so far, starting at 1.
        step: usize,

        /// Offset at the end of the step.
        offset: f64,

        /// Size of the step just taken.
        step_size: f64,

        /// Scaled error norm of the step (below 1).
        error_norm: f64,

        /// Model input and output at the end of the step.
        snapshot: &'a Snapshot<I, O>,
    },

    /// A step exceeded the tolerance and will be retried with a smaller size.
    Rejected {
        /// Offset at the start of the attempted step.
        offset: f64,

        /// Size of the rejected step.
        step_size: f64,

        /// Scaled error norm of the step (1 or above).
        error_norm: f64,
    },
}

impl<I, O> Event<'_, I, O> {
    /// Returns the offset this event refers to.
    #[must_use]
    pub fn offset(&self) -> f64 {
        match self {
            Self::Accepted { offset, .. } | Self::Rejected { offset, .. } => *offset,
        }
    }

    /// Returns the size of the attempted step.
    #[must_use]
    pub fn step_size(&self) -> f64 {
        match self {
            Self::Accepted { step_size, .. } | Self::Rejected { step_size, .. } => *step_size,
        }
    }

    /// Returns the scaled error norm of the attempted step.
    #[must_use]
    pub fn error_norm(&self) -> f64 {
        match self {
            Self::Accepted { error_norm, .. } | Self::Rejected { error_norm, .. } => *error_norm,
        }
    }
}
