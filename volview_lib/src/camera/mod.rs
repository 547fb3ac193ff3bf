use std::str::FromStr;

use crate::error::UnknownName;

mod view_camera;

pub use view_camera::ViewCamera;

/// World axis names for camera rotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl FromStr for Axis {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "x" => Ok(Axis::X),
            "y" => Ok(Axis::Y),
            "z" => Ok(Axis::Z),
            _ => Err(UnknownName::new("axis", s)),
        }
    }
}

/// Named anatomical viewing directions.
///
/// Directions follow the patient coordinate convention where `z` points
/// superior: the four horizontal views keep `z` up, the two vertical views
/// look along `z` with `y` up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnatomicalView {
    Anterior,
    Posterior,
    Left,
    Right,
    Superior,
    Inferior,
}

impl AnatomicalView {
    /// Unit offset from the volume center towards the camera.
    pub fn direction(&self) -> nalgebra::Vector3<f32> {
        use nalgebra::vector;
        match self {
            AnatomicalView::Anterior => vector![0.0, -1.0, 0.0],
            AnatomicalView::Posterior => vector![0.0, 1.0, 0.0],
            AnatomicalView::Left => vector![-1.0, 0.0, 0.0],
            AnatomicalView::Right => vector![1.0, 0.0, 0.0],
            AnatomicalView::Superior => vector![0.0, 0.0, 1.0],
            AnatomicalView::Inferior => vector![0.0, 0.0, -1.0],
        }
    }

    pub fn view_up(&self) -> nalgebra::Vector3<f32> {
        use nalgebra::vector;
        match self {
            AnatomicalView::Superior | AnatomicalView::Inferior => vector![0.0, 1.0, 0.0],
            _ => vector![0.0, 0.0, 1.0],
        }
    }
}

impl FromStr for AnatomicalView {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "anterior" => Ok(AnatomicalView::Anterior),
            "posterior" => Ok(AnatomicalView::Posterior),
            "left" => Ok(AnatomicalView::Left),
            "right" => Ok(AnatomicalView::Right),
            "superior" => Ok(AnatomicalView::Superior),
            "inferior" => Ok(AnatomicalView::Inferior),
            _ => Err(UnknownName::new("view", s)),
        }
    }
}
