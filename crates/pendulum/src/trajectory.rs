use std::f64::consts::TAU;

use swing_solvers::transient::dopri5::{self, Event, Stats};
use tracing::{debug, trace};

use crate::{
    Error, Frame, ParameterError, PendulumInput, PendulumModel, PendulumParameters,
    PendulumProblem, PendulumState, TimeSpan,
};

/// Number of evenly spaced samples in every trajectory.
pub const SAMPLE_COUNT: usize = 500;

/// Integrates the pendulum and samples it on a fixed time grid.
///
/// The step cap of the solver config applies per oscillation cycle, so long
/// spans get a proportionally larger budget instead of failing partway.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TrajectorySolver {
    config: dopri5::Config,
}

/// The sampled motion of one simulation run.
///
/// Holds [`SAMPLE_COUNT`] samples at evenly spaced times over the span, the
/// first at zero and the last at the span's end. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    params: PendulumParameters,
    span: TimeSpan,
    times: Vec<f64>,
    angles: Vec<f64>,
    states: Vec<PendulumState>,
    stats: Stats,
}

impl TrajectorySolver {
    #[must_use]
    pub fn new(config: dopri5::Config) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &dopri5::Config {
        &self.config
    }

    /// Integrates from `initial` over `span` and samples the result.
    ///
    /// Runs to completion before returning. Results are reproducible for the
    /// same inputs and solver config.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if the initial state is not finite,
    /// or [`Error::IntegrationFailure`] if the solver cannot reach the end of
    /// the span.
    pub fn solve(
        &self,
        initial: PendulumState,
        span: TimeSpan,
        params: PendulumParameters,
    ) -> Result<Trajectory, Error> {
        let initial = initial.validate()?;
        let total_time = span.total_time();
        let times = sample_times(total_time);

        debug!(
            angle = initial.angle,
            angular_velocity = initial.angular_velocity,
            total_time,
            gravity = params.gravity(),
            length = params.length(),
            "solving pendulum trajectory"
        );

        let max_steps = self.step_budget(&initial, span, params);
        let config =
            dopri5::Config::new(self.config.rel_tol(), self.config.abs_tol(), max_steps)
                .map_err(ParameterError::from)?;

        let model = PendulumModel::new(params);
        let start = PendulumInput {
            time: 0.0,
            state: initial,
        };

        let observer = |event: &Event<'_, _, _>| {
            if let Event::Rejected {
                offset,
                step_size,
                error_norm,
            } = event
            {
                trace!(offset, step_size, error_norm, "rejected step");
            }
            None
        };

        let solution = dopri5::solve(
            &model,
            &PendulumProblem,
            start,
            total_time,
            &times,
            &config,
            observer,
        )
        .map_err(Error::IntegrationFailure)?;

        let states: Vec<_> = solution
            .samples
            .iter()
            .map(|sample| sample.snapshot.input.state)
            .collect();
        let angles = states.iter().map(|state| state.angle).collect();

        let stats = solution.stats;
        debug!(
            accepted = stats.accepted_steps,
            rejected = stats.rejected_steps,
            evaluations = stats.evaluations,
            "trajectory solved"
        );

        Ok(Trajectory {
            params,
            span,
            times,
            angles,
            states,
            stats,
        })
    }

    /// Scales the configured step cap by the number of cycles in the span.
    ///
    /// The phase rate is the faster of the natural frequency and the peak
    /// angular speed, which covers both swinging and looping motion.
    fn step_budget(
        &self,
        initial: &PendulumState,
        span: TimeSpan,
        params: PendulumParameters,
    ) -> usize {
        let ratio = params.gravity() / params.length();
        let peak_speed = (initial.angular_velocity.powi(2)
            + 2.0 * ratio * (1.0 - initial.angle.cos()))
        .sqrt();
        let rate = params.natural_frequency().max(peak_speed);
        let cycles = (span.total_time() * rate / TAU).ceil();

        // Float to int casts saturate, and NaN becomes zero.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let cycles = (cycles as usize).max(1);
        self.config.max_steps().saturating_mul(cycles)
    }
}

impl Trajectory {
    /// Returns the number of samples, which is also the frame count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Always false: a trajectory holds [`SAMPLE_COUNT`] samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    #[must_use]
    pub fn parameters(&self) -> PendulumParameters {
        self.params
    }

    #[must_use]
    pub fn span(&self) -> TimeSpan {
        self.span
    }

    #[must_use]
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    #[must_use]
    pub fn angles(&self) -> &[f64] {
        &self.angles
    }

    #[must_use]
    pub fn states(&self) -> &[PendulumState] {
        &self.states
    }

    /// Returns the integrator's work counters for this run.
    #[must_use]
    pub fn stats(&self) -> Stats {
        self.stats
    }

    /// Returns the renderable view at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`. Drivers iterate `0..len()`; use
    /// [`Trajectory::get_frame`] when the index is not known to be valid.
    #[must_use]
    pub fn frame(&self, index: usize) -> Frame<'_> {
        assert!(
            index < self.len(),
            "frame index {index} out of range for {} frames",
            self.len()
        );
        Frame::new(&self.times, &self.angles, &self.states, index)
    }

    /// Returns the renderable view at `index`, or `None` if it is out of range.
    #[must_use]
    pub fn get_frame(&self, index: usize) -> Option<Frame<'_>> {
        (index < self.len()).then(|| Frame::new(&self.times, &self.angles, &self.states, index))
    }

    /// Iterates over every frame in order.
    pub fn frames(&self) -> impl ExactSizeIterator<Item = Frame<'_>> + '_ {
        (0..self.len()).map(|index| Frame::new(&self.times, &self.angles, &self.states, index))
    }
}

/// Evenly spaced times over `[0, total_time]`, ending exactly at `total_time`.
#[allow(clippy::cast_precision_loss)]
fn sample_times(total_time: f64) -> Vec<f64> {
    let last = (SAMPLE_COUNT - 1) as f64;
    (0..SAMPLE_COUNT)
        .map(|i| total_time * (i as f64 / last))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn solve(initial: PendulumState, total_time: f64) -> Trajectory {
        let span = TimeSpan::new(total_time).expect("valid span");
        let params = PendulumParameters::new(9.81, 1.0).expect("valid parameters");
        TrajectorySolver::default()
            .solve(initial, span, params)
            .expect("should solve")
    }

    #[test]
    fn sample_grid_is_even_and_closed() {
        let times = sample_times(7.3);

        assert_eq!(times.len(), SAMPLE_COUNT);
        assert_eq!(times[0], 0.0);
        assert_eq!(times[SAMPLE_COUNT - 1], 7.3);
        for pair in times.windows(2) {
            assert!(pair[1] > pair[0]);
            assert_relative_eq!(pair[1] - pair[0], 7.3 / 499.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn zero_span_grid_is_all_zero() {
        assert!(sample_times(0.0).iter().all(|&t| t == 0.0));
    }

    #[test]
    fn keeps_run_inputs() {
        let trajectory = solve(PendulumState::from_degrees(10.0, 0.0), 3.0);

        assert_eq!(trajectory.len(), SAMPLE_COUNT);
        assert_eq!(trajectory.span().total_time(), 3.0);
        assert_eq!(trajectory.parameters().gravity(), 9.81);
        assert_eq!(trajectory.states()[0], PendulumState::from_degrees(10.0, 0.0));
        assert!(trajectory.stats().accepted_steps > 0);
    }

    #[test]
    fn angles_mirror_states() {
        let trajectory = solve(PendulumState::new(0.3, 1.0), 4.0);

        for (angle, state) in trajectory.angles().iter().zip(trajectory.states()) {
            assert_eq!(*angle, state.angle);
        }
    }

    #[test]
    fn rejects_non_finite_initial_state() {
        let span = TimeSpan::new(1.0).expect("valid span");
        let params = PendulumParameters::new(9.81, 1.0).expect("valid parameters");

        let result = TrajectorySolver::default().solve(PendulumState::new(f64::NAN, 0.0), span, params);
        assert!(matches!(result, Err(Error::InvalidParameter(_))));
    }

    #[test]
    fn budget_exhaustion_is_an_integration_failure() {
        let config = dopri5::Config::new(1e-10, 1e-12, 5).expect("valid config");
        let span = TimeSpan::new(10.0).expect("valid span");
        let params = PendulumParameters::new(9.81, 1.0).expect("valid parameters");

        let result = TrajectorySolver::new(config).solve(PendulumState::new(1.0, 0.0), span, params);
        assert!(matches!(
            result,
            Err(Error::IntegrationFailure(dopri5::Error::MaxStepsExceeded { .. }))
        ));
    }

    #[test]
    fn step_budget_scales_with_cycles() {
        let solver = TrajectorySolver::default();
        let at_rest = PendulumState::new(0.0, 0.0);
        let span = TimeSpan::new(10.0).expect("valid span");

        // About 5 periods of a 1 m pendulum, and 50 of a 1 cm one.
        let params = PendulumParameters::new(9.81, 1.0).expect("valid parameters");
        assert_eq!(solver.step_budget(&at_rest, span, params), 500_000);

        let params = PendulumParameters::new(9.81, 0.01).expect("valid parameters");
        assert_eq!(solver.step_budget(&at_rest, span, params), 5_000_000);
    }

    #[test]
    fn step_budget_counts_looping_revolutions() {
        let solver = TrajectorySolver::default();
        let span = TimeSpan::new(10.0).expect("valid span");
        let params = PendulumParameters::new(9.81, 1.0).expect("valid parameters");

        let looping = solver.step_budget(&PendulumState::new(0.0, 30.0), span, params);
        assert_eq!(looping, 100_000 * 48);
    }

    #[test]
    fn step_budget_never_drops_below_the_configured_cap() {
        let solver = TrajectorySolver::default();
        let params = PendulumParameters::new(9.81, 1.0).expect("valid parameters");
        let zero = TimeSpan::new(0.0).expect("valid span");

        assert_eq!(
            solver.step_budget(&PendulumState::new(0.0, 0.0), zero, params),
            100_000
        );
    }

    #[test]
    fn non_finite_derivative_is_an_integration_failure() {
        let span = TimeSpan::new(1.0).expect("valid span");
        let params = PendulumParameters::new(1e300, 1e-300).expect("valid parameters");

        let result = TrajectorySolver::default().solve(PendulumState::new(0.5, 0.0), span, params);
        match result {
            Err(Error::IntegrationFailure(dopri5::Error::NonFiniteDerivative { offset })) => {
                assert_eq!(offset, 0.0);
            }
            other => panic!("expected a non-finite derivative failure, got {other:?}"),
        }
    }

    #[test]
    fn frame_lookup_is_bounds_checked() {
        let trajectory = solve(PendulumState::new(0.2, 0.0), 1.0);

        assert!(trajectory.get_frame(SAMPLE_COUNT - 1).is_some());
        assert!(trajectory.get_frame(SAMPLE_COUNT).is_none());
        assert_eq!(trajectory.frames().len(), SAMPLE_COUNT);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn frame_past_the_end_panics() {
        let trajectory = solve(PendulumState::new(0.2, 0.0), 1.0);
        let _ = trajectory.frame(SAMPLE_COUNT);
    }
}
