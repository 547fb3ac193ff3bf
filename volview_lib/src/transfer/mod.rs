//! Scalar intensity to color and opacity mapping.
//!
//! Color comes from an ordered list of stops, interpolated piecewise-linearly.
//! Opacity comes from a separate ramp, normally the 2-point ramp derived from a
//! [`Window`], scaled by a global multiplier. The two are independent: changing
//! the window never touches the color stops and vice versa.

use crate::color::{self, RGB};
use crate::common::ValueRange;
use crate::error::TransferError;

/// Scalar window, `{width, center}`.
///
/// Spans `center - width/2 .. center + width/2`. Width is always positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Window {
    width: f32,
    center: f32,
}

impl Window {
    pub fn new(width: f32, center: f32) -> Result<Window, TransferError> {
        if width <= 0.0 {
            return Err(TransferError::NonPositiveWindowWidth(width));
        }
        Ok(Window { width, center })
    }

    /// Construction from values already known to be valid.
    pub(crate) fn from_parts(width: f32, center: f32) -> Window {
        debug_assert!(width > 0.0);
        Window { width, center }
    }

    /// Window covering a whole scalar range.
    pub fn from_range(range: ValueRange) -> Window {
        Window {
            width: range.width().max(1.0),
            center: range.midpoint(),
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn center(&self) -> f32 {
        self.center
    }

    pub fn min(&self) -> f32 {
        self.center - self.width * 0.5
    }

    pub fn max(&self) -> f32 {
        self.center + self.width * 0.5
    }
}

impl Default for Window {
    /// CT soft-tissue window.
    fn default() -> Self {
        Window {
            width: 400.0,
            center: 40.0,
        }
    }
}

/// One color stop, `{scalar, rgb}`. Channels in `<0;1>`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub scalar: f32,
    pub color: RGB,
}

impl ColorStop {
    pub fn new(scalar: f32, color: RGB) -> ColorStop {
        ColorStop { scalar, color }
    }
}

/// One opacity ramp point, `{scalar, opacity}`. Opacity in `<0;1>`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OpacityPoint {
    pub scalar: f32,
    pub opacity: f32,
}

impl OpacityPoint {
    pub fn new(scalar: f32, opacity: f32) -> OpacityPoint {
        OpacityPoint { scalar, opacity }
    }
}

/// Transfer function state of the bound volume.
pub struct TransferFunction {
    color_stops: Vec<ColorStop>,
    opacity_points: Vec<OpacityPoint>,
    window: Window,
    global_opacity: f32,
}

impl TransferFunction {
    /// New function with the default window's ramp and no color stops.
    pub fn new() -> TransferFunction {
        let mut tf = TransferFunction {
            color_stops: Vec::new(),
            opacity_points: Vec::new(),
            window: Window::default(),
            global_opacity: 1.0,
        };
        tf.set_window(tf.window);
        tf
    }

    /// Apply a window: clears the opacity ramp and inserts exactly two points,
    /// `(min, 0.0)` and `(max, 1.0)`.
    pub fn set_window(&mut self, window: Window) {
        self.window = window;
        self.opacity_points.clear();
        self.opacity_points
            .push(OpacityPoint::new(window.min(), 0.0));
        self.opacity_points
            .push(OpacityPoint::new(window.max(), 1.0));
    }

    pub fn window(&self) -> Window {
        self.window
    }

    /// Replace all color stops, all-or-nothing.
    ///
    /// The caller is responsible for ascending `scalar` order; stops are not
    /// re-sorted, and out-of-order input yields undefined interpolation.
    pub fn set_color_stops(&mut self, stops: Vec<ColorStop>) {
        self.color_stops = stops;
    }

    pub fn color_stops(&self) -> &[ColorStop] {
        &self.color_stops
    }

    /// Replace the opacity ramp wholesale, bypassing the window.
    ///
    /// Used by tissue-range shading; the stored window is left as is and
    /// re-applies its 2-point ramp on the next [`TransferFunction::set_window`].
    pub fn set_opacity_points(&mut self, points: Vec<OpacityPoint>) {
        self.opacity_points = points;
    }

    pub fn opacity_points(&self) -> &[OpacityPoint] {
        &self.opacity_points
    }

    /// Set the global multiplier, clamped to `<0;1>`.
    pub fn set_global_opacity(&mut self, opacity: f32) {
        self.global_opacity = opacity.clamp(0.0, 1.0);
    }

    pub fn global_opacity(&self) -> f32 {
        self.global_opacity
    }

    /// Color at `scalar`, piecewise-linear between stops, clamped at the ends.
    /// Black when no stops are set.
    pub fn sample_color(&self, scalar: f32) -> RGB {
        let stops = &self.color_stops;

        let first = match stops.first() {
            Some(s) => s,
            None => return color::black(),
        };
        if scalar <= first.scalar {
            return first.color;
        }

        for pair in stops.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if scalar <= b.scalar {
                let span = b.scalar - a.scalar;
                if span <= f32::EPSILON {
                    return b.color;
                }
                let t = (scalar - a.scalar) / span;
                return color::lerp(a.color, b.color, t);
            }
        }

        stops[stops.len() - 1].color
    }

    /// Opacity at `scalar`: ramp interpolation times the global multiplier.
    pub fn sample_opacity(&self, scalar: f32) -> f32 {
        let points = &self.opacity_points;

        let first = match points.first() {
            Some(p) => p,
            None => return 0.0,
        };

        let ramp = if scalar <= first.scalar {
            first.opacity
        } else {
            let mut value = points[points.len() - 1].opacity;
            for pair in points.windows(2) {
                let (a, b) = (pair[0], pair[1]);
                if scalar <= b.scalar {
                    let span = b.scalar - a.scalar;
                    value = if span <= f32::EPSILON {
                        b.opacity
                    } else {
                        a.opacity + (b.opacity - a.opacity) * (scalar - a.scalar) / span
                    };
                    break;
                }
            }
            value
        };

        ramp * self.global_opacity
    }
}

impl Default for TransferFunction {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {

    use super::*;

    #[test]
    fn window_rejects_non_positive_width() {
        assert!(Window::new(0.0, 40.0).is_err());
        assert!(Window::new(-10.0, 40.0).is_err());
        assert!(Window::new(1.0, -500.0).is_ok());
    }

    #[test]
    fn window_bounds() {
        let w = Window::new(2000.0, 300.0).unwrap();

        assert_eq!(w.min(), -700.0);
        assert_eq!(w.max(), 1300.0);
    }

    #[test]
    fn window_builds_two_point_ramp() {
        let mut tf = TransferFunction::new();
        tf.set_window(Window::new(100.0, 50.0).unwrap());

        let points = tf.opacity_points();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0], OpacityPoint::new(0.0, 0.0));
        assert_eq!(points[1], OpacityPoint::new(100.0, 1.0));
    }

    #[test]
    fn opacity_ramp_interpolates() {
        let mut tf = TransferFunction::new();
        tf.set_window(Window::new(100.0, 50.0).unwrap());

        assert_eq!(tf.sample_opacity(-20.0), 0.0);
        assert!((tf.sample_opacity(50.0) - 0.5).abs() < 1e-6);
        assert_eq!(tf.sample_opacity(150.0), 1.0);
    }

    #[test]
    fn global_opacity_multiplies_ramp() {
        let mut tf = TransferFunction::new();
        tf.set_window(Window::new(100.0, 50.0).unwrap());
        tf.set_global_opacity(0.5);

        assert!((tf.sample_opacity(100.0) - 0.5).abs() < 1e-6);
        assert!((tf.sample_opacity(50.0) - 0.25).abs() < 1e-6);
    }

    #[test]
    fn global_opacity_is_clamped() {
        let mut tf = TransferFunction::new();

        tf.set_global_opacity(1.7);
        assert_eq!(tf.global_opacity(), 1.0);

        tf.set_global_opacity(-0.2);
        assert_eq!(tf.global_opacity(), 0.0);
    }

    #[test]
    fn color_sampling_interpolates_between_stops() {
        let mut tf = TransferFunction::new();
        tf.set_color_stops(vec![
            ColorStop::new(0.0, crate::color::black()),
            ColorStop::new(100.0, crate::color::white()),
        ]);

        assert_eq!(tf.sample_color(-10.0), crate::color::black());
        assert_eq!(tf.sample_color(110.0), crate::color::white());

        let mid = tf.sample_color(50.0);
        assert!((mid - crate::color::gray(0.5)).norm() < 1e-6);
    }

    #[test]
    fn no_stops_samples_black() {
        let tf = TransferFunction::new();

        assert_eq!(tf.sample_color(123.0), crate::color::black());
    }

    #[test]
    fn replacing_stops_discards_old_ones() {
        let mut tf = TransferFunction::new();
        tf.set_color_stops(vec![
            ColorStop::new(0.0, crate::color::white()),
            ColorStop::new(10.0, crate::color::white()),
        ]);
        tf.set_color_stops(vec![ColorStop::new(5.0, crate::color::black())]);

        assert_eq!(tf.color_stops().len(), 1);
        assert_eq!(tf.sample_color(0.0), crate::color::black());
    }
}
