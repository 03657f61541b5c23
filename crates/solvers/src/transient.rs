//! Solvers for ODE problems: advancing a model's state through time.
//!
//! # Solvers
//!
//! - [`dopri5`]: adaptive Dormand–Prince 5(4) with dense output

pub mod dopri5;
