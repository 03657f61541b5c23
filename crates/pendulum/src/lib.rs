//! Simple gravity pendulum simulation.
//!
//! A run has three stages:
//!
//! 1. A [`Scenario`] holds validated [`PendulumParameters`], a [`TimeSpan`],
//!    and an initial [`PendulumState`].
//! 2. A [`TrajectorySolver`] integrates the equation of motion once and
//!    samples it at [`SAMPLE_COUNT`] evenly spaced times, producing an
//!    immutable [`Trajectory`].
//! 3. Renderers query [`Trajectory::frame`] for any index, in any order, to get
//!    the bob position, the angle trace so far, and the current-time marker.
//!
//! Parameter collection lives outside the core. [`SimulationConfig`] is the
//! raw, deserializable form and [`randomize`] produces random candidates.

pub mod analysis;

mod bounds;
mod config;
mod error;
mod frame;
mod model;
mod params;
mod randomize;
mod state;
mod trajectory;

pub use bounds::{AxisRange, PlotBounds};
pub use config::{Scenario, SimulationConfig};
pub use error::Error;
pub use frame::{AngleTrace, BobPosition, Frame, TimeMarker};
pub use model::{PendulumInput, PendulumModel, PendulumProblem};
pub use params::{ParameterError, PendulumParameters, TimeSpan};
pub use randomize::{randomize, randomize_seeded};
pub use state::{PendulumDerivative, PendulumState};
pub use trajectory::{SAMPLE_COUNT, Trajectory, TrajectorySolver};
