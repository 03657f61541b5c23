//! Step size control.

use super::tableau::ERROR_ORDER;

const SAFETY: f64 = 0.9;
const MIN_FACTOR: f64 = 0.2;
const MAX_FACTOR: f64 = 10.0;

fn exponent() -> f64 {
    -1.0 / f64::from(ERROR_ORDER + 1)
}

/// Returns the factor applied to an accepted step to size the next one.
///
/// Growth is suppressed right after a rejection so the solver does not
/// oscillate between accepting and rejecting.
pub(super) fn grow(error_norm: f64, after_rejection: bool) -> f64 {
    let factor = if error_norm == 0.0 {
        MAX_FACTOR
    } else {
        (SAFETY * error_norm.powf(exponent())).min(MAX_FACTOR)
    };

    if after_rejection { factor.min(1.0) } else { factor }
}

/// Returns the factor applied to a rejected step before it is retried.
pub(super) fn shrink(error_norm: f64) -> f64 {
    (SAFETY * error_norm.powf(exponent())).max(MIN_FACTOR)
}
