//! Adaptive Dormand–Prince 5(4) solver for ODE problems.
//!
//! # Algorithm
//!
//! Each step evaluates seven stages and forms two solutions: a fifth-order one
//! that is propagated, and an embedded fourth-order one whose difference
//! estimates the local error. The last stage is evaluated at the new state, so
//! it doubles as the first stage of the next step (FSAL) and each accepted step
//! costs six model calls.
//!
//! A step is accepted when the RMS of the error, scaled component-wise by
//! `abs_tol + rel_tol * max(|y_old|, |y_new|)`, is below one. The next step
//! size follows from the error norm with a safety factor, and growth is held
//! back right after a rejection.
//!
//! # Dense output
//!
//! Callers request the solution at a list of output offsets instead of at the
//! solver's own steps. Offsets that fall inside an accepted step are evaluated
//! with the method's fourth-order continuous extension, so output spacing is
//! independent of step size. An offset equal to the end of the span is hit
//! exactly.
//!
//! # Observer Events
//!
//! The solver emits one [`Event`] per attempted step:
//!
//! - [`Event::Accepted`]: the step met the tolerance
//! - [`Event::Rejected`]: the step will be retried with a smaller size
//!
//! Observers can return [`Action::StopEarly`] to halt with the samples
//! produced so far.
//!
//! # Example
//!
//! ```ignore
//! use swing_solvers::transient::dopri5;
//!
//! let outputs = [0.0, 0.5, 1.0];
//! let solution =
//!     dopri5::solve_unobserved(&model, &problem, initial, 1.0, &outputs, &dopri5::Config::default())?;
//!
//! for sample in &solution.samples {
//!     println!("{}: {:?}", sample.offset, sample.snapshot.output);
//! }
//! ```

mod action;
mod config;
mod controller;
mod error;
mod event;
mod solution;
mod stepper;
mod tableau;


pub use action::Action;
pub use config::{Config, ConfigError};
pub use error::Error;
pub use event::Event;
pub use solution::{Sample, Solution, Stats, Status};

use swing_core::{Components, DerivativeOf, Model, Observer, OdeProblem};

use stepper::Stepper;

/// Integrates an ODE problem over `[0, duration]` and samples it at `outputs`.
///
/// `initial` is the model input at offset zero. `outputs` must be ascending
/// (repeats are allowed) and lie within `[0, duration]`; the solution contains
/// one [`Sample`] per entry. A zero duration, or one too short to resolve a
/// step, takes no steps and repeats the initial snapshot for every output.
///
/// The observer receives an [`Event`] for every attempted step. See the
/// [module docs](self) for details.
///
/// # Errors
///
/// Returns an error if the span or outputs are invalid, if the model or
/// problem fails, if the initial derivative is not finite, if the step size
/// collapses below what the offset can resolve, or if the step budget in
/// `config` runs out.
pub fn solve<M, P, Obs>(
    model: &M,
    problem: &P,
    initial: M::Input,
    duration: f64,
    outputs: &[f64],
    config: &Config,
    mut observer: Obs,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    M::Input: Clone,
    M::Output: Clone,
    P: OdeProblem<Input = M::Input, Output = M::Output, Delta = f64>,
    P::State: Components,
    DerivativeOf<P::State, f64>: Components,
    Obs: for<'a> Observer<Event<'a, M::Input, M::Output>, Action>,
{
    validate_span(duration, outputs)?;

    let mut stepper = Stepper::new(model, problem, config);
    let mut current = stepper.start(initial)?;
    let mut state = problem.state(&current.input).map_err(Error::problem)?;

    let mut samples = Vec::with_capacity(outputs.len());
    let mut pending = outputs.iter().copied().peekable();

    while let Some(offset) = pending.next_if(|&o| o <= 0.0) {
        samples.push(Sample {
            offset,
            snapshot: current.clone(),
        });
    }

    // A span shorter than the smallest resolvable step is treated as zero.
    if duration < 10.0 * spacing(0.0) {
        samples.extend(pending.map(|offset| Sample {
            offset,
            snapshot: current.clone(),
        }));
        return Ok(Solution {
            status: Status::Complete,
            samples,
            stats: stepper.stats,
        });
    }

    let mut offset = 0.0;
    let mut step_size = stepper.initial_step(&current, &state, duration)?;

    while offset < duration {
        let min_step = 10.0 * spacing(offset);
        let mut after_rejection = false;

        let (trial, h, end) = loop {
            let attempted = stepper.stats.accepted_steps + stepper.stats.rejected_steps;
            if attempted >= config.max_steps() {
                return Err(Error::MaxStepsExceeded {
                    max_steps: config.max_steps(),
                });
            }
            if step_size < min_step {
                return Err(Error::StepSizeTooSmall { offset, step_size });
            }

            // Land exactly on the end of the span.
            let (h, end) = if offset + step_size >= duration {
                (duration - offset, duration)
            } else {
                (step_size, offset + step_size)
            };

            match stepper.attempt(&current, &state, h)? {
                Some(trial) if trial.error_norm < 1.0 => {
                    step_size = h * controller::grow(trial.error_norm, after_rejection);
                    break (trial, h, end);
                }
                trial => {
                    let error_norm = trial.map_or(f64::INFINITY, |t| t.error_norm);
                    step_size = h * controller::shrink(error_norm);
                    after_rejection = true;
                    stepper.stats.rejected_steps += 1;

                    let event = Event::Rejected {
                        offset,
                        step_size: h,
                        error_norm,
                    };
                    if let Some(Action::StopEarly) = observer.observe(&event) {
                        return Ok(Solution {
                            status: Status::StoppedByObserver,
                            samples,
                            stats: stepper.stats,
                        });
                    }
                }
            }
        };

        while let Some(target) = pending.next_if(|&o| o <= end) {
            let snapshot = if target >= end {
                trial.snapshot.clone()
            } else {
                stepper.interpolate(&current, &state, h, (target - offset) / h)?
            };
            samples.push(Sample {
                offset: target,
                snapshot,
            });
        }

        stepper.advance();
        stepper.stats.accepted_steps += 1;

        let error_norm = trial.error_norm;
        offset = end;
        current = trial.snapshot;
        state = trial.state;

        let event = Event::Accepted {
            step: stepper.stats.accepted_steps,
            offset,
            step_size: h,
            error_norm,
            snapshot: &current,
        };
        if let Some(Action::StopEarly) = observer.observe(&event) {
            return Ok(Solution {
                status: Status::StoppedByObserver,
                samples,
                stats: stepper.stats,
            });
        }
    }

    Ok(Solution {
        status: Status::Complete,
        samples,
        stats: stepper.stats,
    })
}

/// Integrates an ODE problem without observation.
///
/// This is a convenience wrapper around [`solve`] that discards events.
///
/// # Errors
///
/// Returns an error under the same conditions as [`solve`].
pub fn solve_unobserved<M, P>(
    model: &M,
    problem: &P,
    initial: M::Input,
    duration: f64,
    outputs: &[f64],
    config: &Config,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    M::Input: Clone,
    M::Output: Clone,
    P: OdeProblem<Input = M::Input, Output = M::Output, Delta = f64>,
    P::State: Components,
    DerivativeOf<P::State, f64>: Components,
{
    solve(model, problem, initial, duration, outputs, config, ())
}

fn validate_span(duration: f64, outputs: &[f64]) -> Result<(), Error> {
    if !duration.is_finite() || duration < 0.0 {
        return Err(Error::InvalidDuration(duration));
    }

    let in_span = outputs.iter().all(|o| (0.0..=duration).contains(o));
    let ascending = outputs.windows(2).all(|pair| pair[0] <= pair[1]);
    if !in_span || !ascending {
        return Err(Error::InvalidOutputs { duration });
    }

    Ok(())
}

/// Distance from `x` to the next representable float above `|x|`.
fn spacing(x: f64) -> f64 {
    let x = x.abs();
    f64::from_bits(x.to_bits() + 1) - x
}
