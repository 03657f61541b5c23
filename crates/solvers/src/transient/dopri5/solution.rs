use swing_core::Snapshot;

/// Indicates how the solver terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Reached the end of the span and produced every requested sample.
    Complete,

    /// Stopped early due to an observer action.
    StoppedByObserver,
}

/// The solution evaluated at one requested output offset.
#[derive(Debug, Clone)]
pub struct Sample<I, O> {
    /// The requested offset from the initial input.
    pub offset: f64,

    /// Model input and output at that offset.
    pub snapshot: Snapshot<I, O>,
}

/// Work counters for one integration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    /// Number of model calls.
    pub evaluations: usize,

    /// Number of accepted steps.
    pub accepted_steps: usize,

    /// Number of rejected steps.
    pub rejected_steps: usize,
}

/// The result of a Dormand–Prince integration.
#[derive(Debug, Clone)]
pub struct Solution<I, O> {
    /// How the solver terminated.
    pub status: Status,

    /// Samples at the requested offsets, in order.
    ///
    /// Shorter than the request only when stopped by the observer.
    pub samples: Vec<Sample<I, O>>,

    /// Work counters.
    pub stats: Stats,
}
