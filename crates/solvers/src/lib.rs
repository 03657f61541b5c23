//! Numerical solvers for Swing.
//!
//! # Modules
//!
//! - [`transient`]: integrators that advance an [`OdeProblem`] through time
//!
//! [`OdeProblem`]: swing_core::OdeProblem

pub mod transient;
