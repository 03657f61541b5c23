//! Animation driver for Swing trajectories.
//!
//! [`Playback`] is the mutable frame cursor a renderer advances with wall-clock
//! time. It knows nothing about drawing, so any display can reuse it.
//!
//! # Features
//!
//! - `animate`: Enables [`show`], which opens an egui window with the
//!   pendulum and its angle-vs-time plot. This feature adds dependencies on
//!   `eframe` and `egui_plot`.

mod playback;

#[cfg(feature = "animate")]
mod animate;

pub use playback::Playback;

#[cfg(feature = "animate")]
pub use animate::{ShowConfig, show};
