//! Summary measures of a sampled trajectory.
//!
//! These read the samples only; nothing is re-integrated.

use crate::Trajectory;

/// Returns the largest recorded `|θ|`.
#[must_use]
pub fn max_abs_angle(trajectory: &Trajectory) -> f64 {
    trajectory
        .angles()
        .iter()
        .fold(0.0, |peak: f64, angle| peak.max(angle.abs()))
}

/// Returns the times at which the angle changes sign.
///
/// Each crossing is located by linear interpolation between the two samples
/// that straddle it. A sample that lands exactly on zero counts once.
#[must_use]
pub fn zero_crossings(trajectory: &Trajectory) -> Vec<f64> {
    let times = trajectory.times();
    let angles = trajectory.angles();

    (1..angles.len())
        .filter_map(|i| {
            let (a0, a1) = (angles[i - 1], angles[i]);
            let crosses = (a0 < 0.0 && a1 >= 0.0) || (a0 > 0.0 && a1 <= 0.0);
            crosses.then(|| {
                let (t0, t1) = (times[i - 1], times[i]);
                t0 + (t1 - t0) * a0 / (a0 - a1)
            })
        })
        .collect()
}

/// Estimates the oscillation period from zero crossings.
///
/// Successive crossings are half a period apart. Returns `None` when fewer
/// than two full half-periods were recorded, for example when the pendulum is
/// at rest or loops over the top.
#[must_use]
pub fn estimate_period(trajectory: &Trajectory) -> Option<f64> {
    let crossings = zero_crossings(trajectory);
    let (first, last) = (crossings.first()?, crossings.last()?);

    let half_periods = crossings.len().checked_sub(1).filter(|&n| n >= 2)?;

    #[allow(clippy::cast_precision_loss)]
    let half_periods = half_periods as f64;
    Some(2.0 * (last - first) / half_periods)
}

/// Returns the largest deviation of specific energy from its initial value.
///
/// The deviation is relative to the initial energy, or absolute (in J/kg) when
/// the pendulum starts at rest at the bottom.
#[must_use]
pub fn energy_drift(trajectory: &Trajectory) -> f64 {
    let params = trajectory.parameters();
    let mut energies = trajectory
        .states()
        .iter()
        .map(|state| params.specific_energy(state));

    let Some(initial) = energies.next() else {
        return 0.0;
    };
    let scale = if initial > 0.0 { initial } else { 1.0 };

    energies.fold(0.0, |drift: f64, energy| {
        drift.max((energy - initial).abs() / scale)
    })
}
