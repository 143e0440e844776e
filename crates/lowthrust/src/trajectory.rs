use astro_ode::{OdeSolution, SolverStatus, Stats};

use crate::propagator::PropagationError;
use crate::state::{STATE_DIM, SpacecraftState};

/// One time point of a propagated trajectory.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrajectorySample {
    pub time_s: f64,
    pub state: SpacecraftState,
}

/// Result of one propagation: the initial sample followed by every accepted integrator step.
///
/// Viewed as a matrix, the trajectory has [`STATE_DIM`] rows (x, y, z, vx, vy, vz, m) and
/// one column per entry of `time_s`.
#[derive(Debug, Clone)]
pub struct Trajectory {
    pub time_s: Vec<f64>,
    pub states: Vec<SpacecraftState>,
    pub status: SolverStatus,
    pub stats: Stats,
}

impl From<OdeSolution<STATE_DIM>> for Trajectory {
    fn from(solution: OdeSolution<STATE_DIM>) -> Self {
        Self {
            states: solution.y.iter().map(SpacecraftState::from_array).collect(),
            time_s: solution.t,
            status: solution.status,
            stats: solution.stats,
        }
    }
}

impl Trajectory {
    /// True when the integrator reached the end of the requested span.
    pub fn success(&self) -> bool {
        self.status.is_success()
    }

    /// Turn a failed status into an error, keeping successful trajectories untouched.
    pub fn into_checked(self) -> Result<Self, PropagationError> {
        match self.status.failure() {
            Some(failure) => Err(failure.into()),
            None => Ok(self),
        }
    }

    pub fn len(&self) -> usize {
        self.time_s.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time_s.is_empty()
    }

    pub fn samples(&self) -> impl Iterator<Item = TrajectorySample> + '_ {
        self.time_s
            .iter()
            .zip(&self.states)
            .map(|(&time_s, &state)| TrajectorySample { time_s, state })
    }

    pub fn initial_sample(&self) -> Option<TrajectorySample> {
        self.samples().next()
    }

    /// Last sample; the end of the span only when [`Trajectory::success`] holds.
    pub fn final_sample(&self) -> Option<TrajectorySample> {
        let time_s = *self.time_s.last()?;
        let state = *self.states.last()?;
        Some(TrajectorySample { time_s, state })
    }

    /// One row of the state matrix, or `None` when `row >= STATE_DIM`.
    pub fn component(&self, row: usize) -> Option<Vec<f64>> {
        (row < STATE_DIM).then(|| self.states.iter().map(|s| s.to_array()[row]).collect())
    }

    /// The full `STATE_DIM × len` state matrix, row-major.
    pub fn matrix(&self) -> [Vec<f64>; STATE_DIM] {
        let mut rows: [Vec<f64>; STATE_DIM] =
            std::array::from_fn(|_| Vec::with_capacity(self.len()));
        for state in &self.states {
            for (row, value) in rows.iter_mut().zip(state.to_array()) {
                row.push(value);
            }
        }
        rows
    }

    /// Propellant consumed between the first and last sample (kg).
    pub fn propellant_used_kg(&self) -> f64 {
        match (self.states.first(), self.states.last()) {
            (Some(first), Some(last)) => first.mass_kg - last.mass_kg,
            _ => 0.0,
        }
    }
}
