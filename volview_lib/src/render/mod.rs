use std::str::FromStr;

use crate::error::UnknownName;
use crate::transfer::{ColorStop, Window};

mod engine;

pub use engine::RenderEngine;

/// Compositing rule along a viewing ray.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendMode {
    /// Accumulate shaded color front to back.
    Composite,
    /// Keep the maximum scalar encountered (MIP).
    MaximumIntensity,
    /// Keep the minimum scalar encountered (MinIP).
    MinimumIntensity,
}

impl FromStr for BlendMode {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "composite" => Ok(BlendMode::Composite),
            "maximumintensity" | "mip" => Ok(BlendMode::MaximumIntensity),
            "minimumintensity" | "minip" => Ok(BlendMode::MinimumIntensity),
            _ => Err(UnknownName::new("blend mode", s)),
        }
    }
}

/// A named bundle of transfer-function state, applied atomically.
///
/// Absent parts leave the corresponding sub-state untouched; present parts
/// replace it wholesale. With no volume bound the whole bundle is skipped.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderPreset {
    pub name: String,
    pub color_stops: Vec<ColorStop>,
    pub window: Option<Window>,
    pub global_opacity: Option<f32>,
}

impl RenderPreset {
    pub fn new(name: impl Into<String>) -> RenderPreset {
        RenderPreset {
            name: name.into(),
            color_stops: Vec::new(),
            window: None,
            global_opacity: None,
        }
    }

    pub fn with_window(mut self, window: Window) -> RenderPreset {
        self.window = Some(window);
        self
    }

    pub fn with_color_stops(mut self, stops: Vec<ColorStop>) -> RenderPreset {
        self.color_stops = stops;
        self
    }

    pub fn with_global_opacity(mut self, opacity: f32) -> RenderPreset {
        self.global_opacity = Some(opacity);
        self
    }
}
