//! Viewer state and its operations.

pub mod defaults;
mod state;

pub use state::{Viewer, ViewerState};
