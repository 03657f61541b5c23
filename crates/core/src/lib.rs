//! Core traits and types for Swing.
//!
//! This crate defines the shared abstractions that solvers and models build on:
//!
//! - [`Model`]: a callable that maps a typed input to a typed output
//! - [`Snapshot`]: a captured input/output pair from a model call
//! - [`Observer`]: receives solver events and optionally returns control actions
//! - [`OdeProblem`]: adapts a model's input and output to an integrable state
//! - [`StepIntegrable`] and [`Components`]: what a state must support to be
//!   advanced by a solver

mod model;
mod observer;
mod problems;
mod step;

pub use observer::Observer;
pub use problems::OdeProblem;
pub use step::{Components, DerivativeOf, StepIntegrable};
pub use {model::Model, model::Snapshot};
