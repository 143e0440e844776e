use log::{debug, trace, warn};
use thiserror::Error;

use crate::OdeSystem;
use crate::solution::{IntegrationFailure, OdeSolution, SolverStatus, Stats};
use crate::tableau::{A, B, C, E, ERROR_ESTIMATOR_ORDER, STAGES};

const SAFETY: f64 = 0.9;
const MIN_FACTOR: f64 = 0.2;
const MAX_FACTOR: f64 = 10.0;
const MIN_RTOL: f64 = 100.0 * f64::EPSILON;

/// Relative and absolute error tolerances, applied to every state variable.
///
/// A step is accepted when the RMS of `err_i / (atol + rtol * |y_i|)` is below one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    pub rtol: f64,
    pub atol: f64,
}

impl Tolerances {
    pub const fn new(rtol: f64, atol: f64) -> Self {
        Self { rtol, atol }
    }
}

impl Default for Tolerances {
    fn default() -> Self {
        Self::new(1e-3, 1e-6)
    }
}

/// Knobs for a single call to [`solve`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntegratorOptions {
    pub tolerances: Tolerances,
    /// Size of the first attempted step. Chosen automatically when `None`.
    pub first_step: Option<f64>,
    /// Upper bound on the step size; unbounded by default.
    pub max_step: f64,
}

impl IntegratorOptions {
    pub fn with_tolerances(tolerances: Tolerances) -> Self {
        Self {
            tolerances,
            ..Self::default()
        }
    }
}

impl Default for IntegratorOptions {
    fn default() -> Self {
        Self {
            tolerances: Tolerances::default(),
            first_step: None,
            max_step: f64::INFINITY,
        }
    }
}

/// Configuration rejected before any integration work was done.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolverError {
    #[error("time span bounds must be finite (got {t0} .. {tf})")]
    NonFiniteSpan { t0: f64, tf: f64 },
    #[error("relative tolerance must be finite and non-negative (got {0})")]
    InvalidRelativeTolerance(f64),
    #[error("absolute tolerance must be finite and positive (got {0})")]
    InvalidAbsoluteTolerance(f64),
    #[error("maximum step must be positive (got {0})")]
    InvalidMaxStep(f64),
    #[error("first step must be positive and not exceed the span (got {0})")]
    InvalidFirstStep(f64),
}

/// Integrate `system` from `t_span.0` to `t_span.1` starting at `y0`.
///
/// The span may run backwards. The returned solution always starts with `(t0, y0)`; a
/// zero-length span yields exactly that one sample.
pub fn solve<S, const N: usize>(
    system: &S,
    t_span: (f64, f64),
    y0: &[f64; N],
    options: &IntegratorOptions,
) -> Result<OdeSolution<N>, SolverError>
where
    S: OdeSystem<N> + ?Sized,
{
    let (t0, tf) = t_span;
    let (rtol, atol) = checked_tolerances(t_span, options)?;

    let mut stepper = Stepper {
        system,
        tf,
        direction: if tf == t0 { 1.0 } else { (tf - t0).signum() },
        rtol,
        atol,
        max_step: options.max_step,
        stats: Stats::default(),
        t: t0,
        y: *y0,
        f: [0.0; N],
        h_abs: 0.0,
    };
    let mut t_out = vec![t0];
    let mut y_out = vec![*y0];

    if t0 == tf {
        debug!("zero-length span at t = {t0}, returning the initial state");
        return Ok(stepper.finish(t_out, y_out, SolverStatus::Finished));
    }

    if let Err(failure) = stepper.start(options.first_step) {
        warn!("integration failed before the first step: {failure}");
        return Ok(stepper.finish(t_out, y_out, SolverStatus::Failed(failure)));
    }

    while stepper.direction * (stepper.t - tf) < 0.0 {
        match stepper.step() {
            Ok(()) => {
                t_out.push(stepper.t);
                y_out.push(stepper.y);
            }
            Err(failure) => {
                warn!("integration stopped: {failure}");
                return Ok(stepper.finish(t_out, y_out, SolverStatus::Failed(failure)));
            }
        }
    }

    debug!(
        "integrated {t0} -> {tf} in {} steps ({} rejected, {} evaluations)",
        stepper.stats.accepted_steps, stepper.stats.rejected_steps, stepper.stats.fn_evals
    );
    Ok(stepper.finish(t_out, y_out, SolverStatus::Finished))
}

fn checked_tolerances(
    (t0, tf): (f64, f64),
    options: &IntegratorOptions,
) -> Result<(f64, f64), SolverError> {
    if !t0.is_finite() || !tf.is_finite() {
        return Err(SolverError::NonFiniteSpan { t0, tf });
    }
    let Tolerances { rtol, atol } = options.tolerances;
    if !rtol.is_finite() || rtol < 0.0 {
        return Err(SolverError::InvalidRelativeTolerance(rtol));
    }
    if !atol.is_finite() || atol <= 0.0 {
        return Err(SolverError::InvalidAbsoluteTolerance(atol));
    }
    if options.max_step.is_nan() || options.max_step <= 0.0 {
        return Err(SolverError::InvalidMaxStep(options.max_step));
    }
    if let Some(h) = options.first_step {
        if t0 != tf && !(h > 0.0 && h <= (tf - t0).abs()) {
            return Err(SolverError::InvalidFirstStep(h));
        }
    }
    if rtol < MIN_RTOL {
        warn!("relative tolerance {rtol:e} is too small, using {MIN_RTOL:e}");
        return Ok((MIN_RTOL, atol));
    }
    Ok((rtol, atol))
}

struct Stepper<'a, S: ?Sized, const N: usize> {
    system: &'a S,
    tf: f64,
    direction: f64,
    rtol: f64,
    atol: f64,
    max_step: f64,
    stats: Stats,
    t: f64,
    y: [f64; N],
    f: [f64; N],
    h_abs: f64,
}

impl<S, const N: usize> Stepper<'_, S, N>
where
    S: OdeSystem<N> + ?Sized,
{
    fn eval(&mut self, t: f64, y: &[f64; N], dydt: &mut [f64; N]) {
        self.system.rhs(t, y, dydt);
        self.stats.fn_evals += 1;
    }

    fn start(&mut self, first_step: Option<f64>) -> Result<(), IntegrationFailure> {
        let (t, y) = (self.t, self.y);
        let mut f = [0.0; N];
        self.eval(t, &y, &mut f);
        if !all_finite(&y) || !all_finite(&f) {
            return Err(IntegrationFailure::NonFiniteState { t });
        }
        self.f = f;
        self.h_abs = match first_step {
            Some(h) => h,
            None => self.initial_step(),
        };
        Ok(())
    }

    /// Starting step estimate from the size of the state, its derivative and a probe
    /// derivative one trial step ahead.
    fn initial_step(&mut self) -> f64 {
        let interval = (self.tf - self.t).abs();
        if N == 0 {
            return interval;
        }
        let (t0, y0, f0) = (self.t, self.y, self.f);
        let scale: [f64; N] = std::array::from_fn(|i| self.atol + y0[i].abs() * self.rtol);

        let scaled_y: [f64; N] = std::array::from_fn(|i| y0[i] / scale[i]);
        let scaled_f: [f64; N] = std::array::from_fn(|i| f0[i] / scale[i]);
        let d0 = rms_norm(&scaled_y);
        let d1 = rms_norm(&scaled_f);
        let h0 = if d0 < 1e-5 || d1 < 1e-5 {
            1e-6
        } else {
            0.01 * d0 / d1
        };
        let h0 = h0.min(interval);

        let y1: [f64; N] = std::array::from_fn(|i| y0[i] + h0 * self.direction * f0[i]);
        let mut f1 = [0.0; N];
        self.eval(t0 + h0 * self.direction, &y1, &mut f1);
        let scaled_df: [f64; N] = std::array::from_fn(|i| (f1[i] - f0[i]) / scale[i]);
        let d2 = rms_norm(&scaled_df) / h0;

        let h1 = if d1 <= 1e-15 && d2 <= 1e-15 {
            (h0 * 1e-3).max(1e-6)
        } else {
            (0.01 / d1.max(d2)).powf(1.0 / f64::from(ERROR_ESTIMATOR_ORDER + 1))
        };
        if !h1.is_finite() {
            return h0;
        }
        (100.0 * h0).min(h1).min(interval)
    }

    /// Advance by one accepted step, shrinking the step on rejection.
    fn step(&mut self) -> Result<(), IntegrationFailure> {
        let t = self.t;
        let min_step = 10.0 * spacing(t, self.direction);
        if self.h_abs > self.max_step {
            self.h_abs = self.max_step;
        } else if self.h_abs < min_step {
            self.h_abs = min_step;
        }

        let exponent = -1.0 / f64::from(ERROR_ESTIMATOR_ORDER + 1);
        let mut rejected = false;
        loop {
            if self.h_abs < min_step {
                return Err(IntegrationFailure::StepSizeTooSmall { t });
            }
            let mut t_new = t + self.h_abs * self.direction;
            if self.direction * (t_new - self.tf) > 0.0 {
                t_new = self.tf;
            }
            let h = t_new - t;
            self.h_abs = h.abs();

            let (y_new, f_new, error_norm) = self.rk_step(h);
            if !error_norm.is_finite() || !all_finite(&y_new) || !all_finite(&f_new) {
                return Err(IntegrationFailure::NonFiniteState { t });
            }

            if error_norm < 1.0 {
                let mut factor = if error_norm == 0.0 {
                    MAX_FACTOR
                } else {
                    MAX_FACTOR.min(SAFETY * error_norm.powf(exponent))
                };
                if rejected {
                    factor = factor.min(1.0);
                }
                trace!("accepted h = {h:e} at t = {t} (error {error_norm:.3e})");
                self.h_abs *= factor;
                self.stats.accepted_steps += 1;
                self.t = t_new;
                self.y = y_new;
                self.f = f_new;
                return Ok(());
            }

            trace!("rejected h = {h:e} at t = {t} (error {error_norm:.3e})");
            self.h_abs *= MIN_FACTOR.max(SAFETY * error_norm.powf(exponent));
            self.stats.rejected_steps += 1;
            rejected = true;
        }
    }

    /// One Dormand–Prince step of size `h` from the current point. Returns the new state,
    /// its derivative and the scaled RMS error estimate.
    fn rk_step(&mut self, h: f64) -> ([f64; N], [f64; N], f64) {
        let (t, y) = (self.t, self.y);
        let mut k = [[0.0; N]; STAGES + 1];
        k[0] = self.f;

        for s in 1..STAGES {
            let y_stage: [f64; N] = std::array::from_fn(|i| {
                let dy: f64 = (0..s).map(|j| A[s][j] * k[j][i]).sum();
                y[i] + h * dy
            });
            let mut dydt = [0.0; N];
            self.eval(t + C[s] * h, &y_stage, &mut dydt);
            k[s] = dydt;
        }

        let y_new: [f64; N] = std::array::from_fn(|i| {
            let dy: f64 = (0..STAGES).map(|j| B[j] * k[j][i]).sum();
            y[i] + h * dy
        });
        let mut f_new = [0.0; N];
        self.eval(t + h, &y_new, &mut f_new);
        k[STAGES] = f_new;

        let scaled: [f64; N] = std::array::from_fn(|i| {
            let err: f64 = h * (0..=STAGES).map(|j| E[j] * k[j][i]).sum::<f64>();
            let scale = self.atol + y[i].abs().max(y_new[i].abs()) * self.rtol;
            err / scale
        });
        (y_new, f_new, rms_norm(&scaled))
    }

    fn finish(self, t: Vec<f64>, y: Vec<[f64; N]>, status: SolverStatus) -> OdeSolution<N> {
        OdeSolution {
            t,
            y,
            status,
            stats: self.stats,
        }
    }
}

fn rms_norm<const N: usize>(v: &[f64; N]) -> f64 {
    if N == 0 {
        return 0.0;
    }
    (v.iter().map(|x| x * x).sum::<f64>() / N as f64).sqrt()
}

fn all_finite<const N: usize>(v: &[f64; N]) -> bool {
    v.iter().all(|x| x.is_finite())
}

/// Distance from `t` to the adjacent representable value in the direction of integration.
fn spacing(t: f64, direction: f64) -> f64 {
    if t == 0.0 {
        return f64::from_bits(1);
    }
    let bits = t.to_bits();
    let away_from_zero = (t > 0.0) == (direction > 0.0);
    let next = if away_from_zero {
        f64::from_bits(bits + 1)
    } else {
        f64::from_bits(bits - 1)
    };
    (next - t).abs()
}
