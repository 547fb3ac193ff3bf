//! Prewritten render presets for common clinical use cases.

use std::str::FromStr;

use crate::color;
use crate::common::ValueRange;
use crate::error::UnknownName;
use crate::render::RenderPreset;
use crate::transfer::{ColorStop, Window};

/// Named global-opacity levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpacityPreset {
    Low,
    Medium,
    High,
    Full,
}

impl OpacityPreset {
    pub fn value(&self) -> f32 {
        match self {
            OpacityPreset::Low => 0.25,
            OpacityPreset::Medium => 0.5,
            OpacityPreset::High => 0.75,
            OpacityPreset::Full => 1.0,
        }
    }
}

impl FromStr for OpacityPreset {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(OpacityPreset::Low),
            "medium" => Ok(OpacityPreset::Medium),
            "high" => Ok(OpacityPreset::High),
            "full" => Ok(OpacityPreset::Full),
            _ => Err(UnknownName::new("opacity preset", s)),
        }
    }
}

/// Bone study: wide window centered high, ramp from black through bone white.
pub fn ct_bone() -> RenderPreset {
    RenderPreset::new("ct-bone")
        .with_window(Window::from_parts(2000.0, 300.0))
        .with_color_stops(vec![
            ColorStop::new(-1000.0, color::black()),
            ColorStop::new(150.0, color::new(0.55, 0.45, 0.39)),
            ColorStop::new(2000.0, color::new(0.89, 0.85, 0.79)),
        ])
        .with_global_opacity(1.0)
}

/// Lung study: low center, air down to parenchyma grays.
pub fn ct_lung() -> RenderPreset {
    RenderPreset::new("ct-lung")
        .with_window(Window::from_parts(1500.0, -600.0))
        .with_color_stops(vec![
            ColorStop::new(-1350.0, color::black()),
            ColorStop::new(-600.0, color::new(0.45, 0.55, 0.65)),
            ColorStop::new(150.0, color::white()),
        ])
        .with_global_opacity(0.9)
}

/// Angiography: narrow window over contrast-enhanced vessels.
pub fn ct_angio() -> RenderPreset {
    RenderPreset::new("ct-angio")
        .with_window(Window::from_parts(600.0, 300.0))
        .with_color_stops(vec![
            ColorStop::new(0.0, color::black()),
            ColorStop::new(250.0, color::new(0.75, 0.15, 0.15)),
            ColorStop::new(600.0, color::white()),
        ])
        .with_global_opacity(1.0)
}

/// Neutral grayscale over a scalar range.
///
/// Applied as the default configuration when a volume is bound.
pub fn grayscale(range: ValueRange) -> RenderPreset {
    RenderPreset::new("grayscale")
        .with_window(Window::from_range(range))
        .with_color_stops(vec![
            ColorStop::new(range.low, color::black()),
            ColorStop::new(range.high, color::white()),
        ])
        .with_global_opacity(1.0)
}

#[cfg(test)]
mod test {

    use super::*;

    #[test]
    fn opacity_levels() {
        assert_eq!(OpacityPreset::Low.value(), 0.25);
        assert_eq!(OpacityPreset::Full.value(), 1.0);
        assert_eq!("medium".parse::<OpacityPreset>().unwrap(), OpacityPreset::Medium);
        assert!("opaque".parse::<OpacityPreset>().is_err());
    }

    #[test]
    fn premade_presets_are_complete_bundles() {
        for preset in [ct_bone(), ct_lung(), ct_angio()] {
            assert!(preset.window.is_some());
            assert!(!preset.color_stops.is_empty());
            assert!(preset.global_opacity.is_some());
        }
    }

    #[test]
    fn grayscale_covers_range() {
        let preset = grayscale(ValueRange::new(-1024.0, 3071.0));
        let window = preset.window.unwrap();

        assert_eq!(window.width(), 4095.0);
        assert_eq!(window.center(), 1023.5);
        assert_eq!(preset.color_stops[0].scalar, -1024.0);
    }
}
