//! Stage evaluation, error estimation, and dense output for a single step.

use swing_core::{Components, DerivativeOf, Model, OdeProblem, Snapshot, StepIntegrable};

use super::{
    Config, Error, Stats,
    tableau::{self, A, B, C, E, ERROR_ORDER, STAGES},
};

type Derivative<P> = DerivativeOf<<P as OdeProblem>::State, f64>;

/// A completed trial step, not yet accepted or rejected.
pub(super) struct Trial<S, I, O> {
    pub(super) state: S,
    pub(super) snapshot: Snapshot<I, O>,
    pub(super) error_norm: f64,
}

/// Workspace for stepping one problem.
///
/// Stage derivatives are kept as flat component vectors. `k[0]` always holds
/// the derivative at the start of the current step.
pub(super) struct Stepper<'a, M, P> {
    model: &'a M,
    problem: &'a P,
    rel_tol: f64,
    abs_tol: f64,
    k: [Vec<f64>; STAGES],
    scratch: Vec<f64>,
    pub(super) stats: Stats,
}

impl<'a, M, P> Stepper<'a, M, P>
where
    M: Model,
    P: OdeProblem<Input = M::Input, Output = M::Output, Delta = f64>,
    P::State: Components,
    Derivative<P>: Components,
{
    pub(super) fn new(model: &'a M, problem: &'a P, config: &Config) -> Self {
        let count = <Derivative<P> as Components>::COUNT;
        Self {
            model,
            problem,
            rel_tol: config.rel_tol(),
            abs_tol: config.abs_tol(),
            k: std::array::from_fn(|_| vec![0.0; count]),
            scratch: vec![0.0; count],
            stats: Stats::default(),
        }
    }

    /// Evaluates the initial input and loads its derivative as the first stage.
    pub(super) fn start(&mut self, initial: M::Input) -> Result<Snapshot<M::Input, M::Output>, Error> {
        let output = self.model.call(&initial).map_err(Error::model)?;
        self.stats.evaluations += 1;

        let snapshot = Snapshot::new(initial, output);
        if !self.load(&snapshot, 0)? {
            return Err(Error::NonFiniteDerivative { offset: 0.0 });
        }
        Ok(snapshot)
    }

    /// Chooses the first step size from the scale of the state and its derivatives.
    ///
    /// Follows Hairer, Nørsett & Wanner, *Solving ODEs I*, §II.4: an explicit
    /// Euler probe estimates the second derivative, and the step is sized so
    /// the leading error term is about one percent of the tolerance.
    pub(super) fn initial_step(
        &mut self,
        current: &Snapshot<M::Input, M::Output>,
        state: &P::State,
        duration: f64,
    ) -> Result<f64, Error> {
        let y0 = state.to_components();
        let scale: Vec<f64> = y0
            .iter()
            .map(|y| self.abs_tol + y.abs() * self.rel_tol)
            .collect();

        let d0 = rms_scaled(y0.iter().copied(), &scale);
        let d1 = rms_scaled(self.k[0].iter().copied(), &scale);

        let h0 = if d0 < 1e-5 || d1 < 1e-5 {
            1e-6
        } else {
            0.01 * d0 / d1
        };
        let h0 = h0.min(duration);

        let probe_state = state.step(self.combine(&[1.0]), h0);
        let probe = self.call_at(&current.input, &probe_state, h0)?;
        if !self.load(&probe, 1)? {
            return Err(Error::NonFiniteDerivative { offset: h0 });
        }

        let slope_change = self.k[1].iter().zip(&self.k[0]).map(|(f1, f0)| f1 - f0);
        let d2 = rms_scaled(slope_change, &scale) / h0;

        let h1 = if d1 <= 1e-15 && d2 <= 1e-15 {
            (h0 * 1e-3).max(1e-6)
        } else {
            (0.01 / d1.max(d2)).powf(1.0 / f64::from(ERROR_ORDER + 1))
        };

        Ok((100.0 * h0).min(h1).min(duration))
    }

    /// Attempts one step of size `h` from `state`, which sits at `offset`.
    ///
    /// Returns `None` when any stage derivative is non-finite; the caller
    /// treats that like an infinitely large error and retries with a smaller
    /// step.
    pub(super) fn attempt(
        &mut self,
        current: &Snapshot<M::Input, M::Output>,
        state: &P::State,
        h: f64,
    ) -> Result<Option<Trial<P::State, M::Input, M::Output>>, Error> {
        for stage in 1..STAGES - 1 {
            let stage_state = state.step(self.combine(A[stage]), h);
            let snapshot = self.call_at(&current.input, &stage_state, C[stage] * h)?;
            if !self.load(&snapshot, stage)? {
                return Ok(None);
            }
        }

        // The last stage is evaluated at the fifth-order solution itself and
        // becomes the first stage of the next step.
        let next_state = state.step(self.combine(&B), h);
        let snapshot = self.call_at(&current.input, &next_state, h)?;
        if !self.load(&snapshot, STAGES - 1)? {
            return Ok(None);
        }

        let error_norm = self.error_norm(state, &next_state, h);
        Ok(Some(Trial {
            state: next_state,
            snapshot,
            error_norm,
        }))
    }

    /// Evaluates the continuous extension of the last attempted step.
    ///
    /// `theta` is the fraction of the step, in `[0, 1]`.
    pub(super) fn interpolate(
        &mut self,
        current: &Snapshot<M::Input, M::Output>,
        state: &P::State,
        h: f64,
        theta: f64,
    ) -> Result<Snapshot<M::Input, M::Output>, Error> {
        let weights = tableau::dense_weights(theta);
        let interpolated = state.step(self.combine(&weights), h);
        self.call_at(&current.input, &interpolated, theta * h)
    }

    /// Makes the last stage of an accepted step the first stage of the next.
    pub(super) fn advance(&mut self) {
        self.k.swap(0, STAGES - 1);
    }

    fn call_at(
        &mut self,
        base: &M::Input,
        state: &P::State,
        delta: f64,
    ) -> Result<Snapshot<M::Input, M::Output>, Error> {
        let input = self
            .problem
            .build_input(base, state, &delta)
            .map_err(Error::problem)?;
        let output = self.model.call(&input).map_err(Error::model)?;
        self.stats.evaluations += 1;
        Ok(Snapshot::new(input, output))
    }

    /// Stores the derivative at `snapshot` in stage `slot`.
    ///
    /// Returns whether every component is finite.
    fn load(&mut self, snapshot: &Snapshot<M::Input, M::Output>, slot: usize) -> Result<bool, Error> {
        let derivative = self
            .problem
            .derivative(&snapshot.input, &snapshot.output)
            .map_err(Error::problem)?;
        derivative.write_components(&mut self.k[slot]);
        Ok(self.k[slot].iter().all(|v| v.is_finite()))
    }

    /// Accumulates `Σ weights[i] · k[i]` into the scratch buffer.
    fn accumulate(&mut self, weights: &[f64]) {
        self.scratch.fill(0.0);
        for (&weight, stage) in weights.iter().zip(&self.k) {
            if weight == 0.0 {
                continue;
            }
            for (acc, value) in self.scratch.iter_mut().zip(stage) {
                *acc += weight * value;
            }
        }
    }

    fn combine(&mut self, weights: &[f64]) -> Derivative<P> {
        self.accumulate(weights);
        <Derivative<P> as Components>::from_components(&self.scratch)
    }

    /// RMS of the local error estimate scaled by the mixed tolerance.
    fn error_norm(&mut self, start: &P::State, end: &P::State, h: f64) -> f64 {
        self.accumulate(&E);
        let y0 = start.to_components();
        let y1 = end.to_components();

        let scale: Vec<f64> = y0
            .iter()
            .zip(&y1)
            .map(|(a, b)| self.abs_tol + a.abs().max(b.abs()) * self.rel_tol)
            .collect();

        rms_scaled(self.scratch.iter().map(|e| e * h), &scale)
    }
}

/// Root mean square of `values[i] / scale[i]`.
fn rms_scaled(values: impl Iterator<Item = f64>, scale: &[f64]) -> f64 {
    if scale.is_empty() {
        return 0.0;
    }

    #[allow(clippy::cast_precision_loss)]
    let count = scale.len() as f64;
    let sum: f64 = values.zip(scale).map(|(v, s)| (v / s).powi(2)).sum();
    (sum / count).sqrt()
}
