pub mod camera;
pub mod common;
mod error;
pub mod premade;
pub mod render;
pub mod test_helpers;
pub mod tools;
pub mod transfer;
pub mod viewer;
pub mod volumetric;

pub use error::{EngineError, TransferError, UnknownName, ViewerError, VolumeError};
pub use viewer::{Viewer, ViewerState};

pub mod color {
    use nalgebra::{vector, Vector3};

    pub type RGB = Vector3<f32>;

    pub fn new(r: f32, g: f32, b: f32) -> RGB {
        vector![r, g, b]
    }

    pub fn black() -> RGB {
        vector![0.0, 0.0, 0.0]
    }

    pub fn white() -> RGB {
        vector![1.0, 1.0, 1.0]
    }

    pub fn gray(v: f32) -> RGB {
        vector![v, v, v]
    }

    /// Componentwise blend, `t` in `<0;1>`.
    pub fn lerp(from: RGB, to: RGB, t: f32) -> RGB {
        from + (to - from) * t
    }
}
