use crate::error::EngineError;
use crate::viewer::ViewerState;
use crate::volumetric::{Volume, VolumeId};

use super::BlendMode;

/// Interface to the external rendering/volume engine.
///
/// The engine owns the voxel grid and the rasterizer; this crate drives it
/// with view state. Every call may fail; failures are logged by the caller and
/// surfaced with the engine's own message, never retried.
pub trait RenderEngine {
    /// One-time setup of the viewport.
    fn initialize(&mut self) -> Result<(), EngineError>;

    /// Upload a freshly built volume and attach it to the viewport.
    fn bind_volume(&mut self, volume: &Volume) -> Result<(), EngineError>;

    /// Remove a volume and free its resources.
    fn evict_volume(&mut self, id: VolumeId) -> Result<(), EngineError>;

    /// Set the blend mode on the volume's mapper.
    fn set_blend_mode(&mut self, mode: BlendMode) -> Result<(), EngineError>;

    /// Re-render with the given view state.
    fn redraw(&mut self, state: &ViewerState) -> Result<(), EngineError>;

    /// Propagate a viewport size change.
    fn resize(&mut self, width: u32, height: u32) -> Result<(), EngineError>;

    /// Tear down the viewport and all engine resources.
    fn destroy(&mut self) -> Result<(), EngineError>;
}
