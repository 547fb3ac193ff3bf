//! # Default values
//!
//! Used as initial values.

use crate::render::BlendMode;
use crate::tools::Tool;

pub const BLEND_MODE: BlendMode = BlendMode::Composite;
pub const ACTIVE_TOOL: Tool = Tool::Rotate;
pub const GLOBAL_OPACITY: f32 = 1.0;

// Interaction speeds
// Pixel deltas arrive in viewport units; world-space effects scale with the
// bound volume so the feel is the same for a wrist and a whole-body scan.

/// Degrees of camera rotation per pixel dragged.
pub const ROTATE_SPEED: f32 = 0.5;

/// Fraction of the bounds diagonal panned per pixel dragged.
pub const PAN_FRACTION_PER_PIXEL: f32 = 0.002;

/// Fraction of the focal distance dollied per pixel dragged.
pub const DOLLY_FRACTION_PER_PIXEL: f32 = 0.005;

/// Fraction of the focal distance dollied per wheel unit.
pub const DOLLY_FRACTION_PER_WHEEL: f32 = 0.1;
