use nalgebra::{vector, Vector2};

use crate::camera::{AnatomicalView, Axis, ViewCamera};
use crate::common::BoundBox;
use crate::error::{ViewerError, VolumeError};
use crate::premade::presets::{self, OpacityPreset};
use crate::premade::tissues::{self, TissueOpacityMap};
use crate::render::{BlendMode, RenderEngine, RenderPreset};
use crate::tools::{Gesture, Tool, ToolBindings};
use crate::transfer::{ColorStop, TransferFunction, Window};
use crate::volumetric::{LoadProgress, LoaderFront, ScanMetadata, SliceReference, Volume};

use super::defaults;

/// The complete view state of one viewport.
///
/// Owned by [`Viewer`] and passed to the engine on every redraw; operations
/// receive it explicitly instead of reaching for shared globals.
pub struct ViewerState {
    pub camera: ViewCamera,
    pub transfer: TransferFunction,
    pub tools: ToolBindings,
    pub blend_mode: BlendMode,
    /// Display-level roll in degrees, layered on top of the camera.
    pub presentation_rotation: f32,
}

impl ViewerState {
    pub fn new() -> ViewerState {
        ViewerState {
            camera: ViewCamera::new(),
            transfer: TransferFunction::new(),
            tools: ToolBindings::new(),
            blend_mode: defaults::BLEND_MODE,
            presentation_rotation: 0.0,
        }
    }
}

impl Default for ViewerState {
    fn default() -> Self {
        Self::new()
    }
}

/// Volume viewer controller.
///
/// Owns the view state, the single bound volume and the front of the
/// asynchronous volume build, and drives the external engine. All operations
/// run to completion on the caller's thread; the only suspension point is the
/// volume build, collected through [`Viewer::poll_bind`].
pub struct Viewer<E: RenderEngine> {
    engine: E,
    state: ViewerState,
    volume: Option<Volume>,
    loader: LoaderFront,
    initialized: bool,
    rotation_enabled: bool,
}

impl<E: RenderEngine> Viewer<E> {
    pub fn new(engine: E) -> Viewer<E> {
        Viewer {
            engine,
            state: ViewerState::new(),
            volume: None,
            loader: LoaderFront::new(),
            initialized: false,
            rotation_enabled: true,
        }
    }

    /// One-time setup.
    ///
    /// Engine failures here abort startup and must be surfaced to the user by
    /// the caller. Every other operation is rejected until this succeeds.
    pub fn initialize(&mut self) -> Result<(), ViewerError> {
        if self.initialized {
            log::warn!("initialize: viewer already initialized");
            return Ok(());
        }

        self.engine.initialize()?;
        self.state.tools.set_active_tool(defaults::ACTIVE_TOOL);
        self.initialized = true;

        log::info!("viewer initialized");
        Ok(())
    }

    pub fn state(&self) -> &ViewerState {
        &self.state
    }

    pub fn volume(&self) -> Option<&Volume> {
        self.volume.as_ref()
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    // ---- volume lifecycle ----

    /// Start binding a new volume from a slice stack.
    ///
    /// Validates the minimum-slice contract, evicts the current volume and
    /// spawns the asynchronous build. The new volume is not usable until
    /// [`Viewer::poll_bind`] reports completion. A failed bind leaves the
    /// viewer volume-less; the evicted volume is never restored.
    pub fn bind_volume(
        &mut self,
        slices: Vec<SliceReference>,
        metadata: ScanMetadata,
    ) -> Result<(), ViewerError> {
        if !self.initialized {
            return Err(ViewerError::NotInitialized);
        }
        if self.loader.is_pending() {
            return Err(ViewerError::LoadInFlight);
        }
        if slices.len() < 2 {
            return Err(ViewerError::InvalidArgument(format!(
                "a volume needs at least 2 slices, got {}",
                slices.len()
            )));
        }

        self.evict_current();
        self.loader.start_build(slices, metadata);
        Ok(())
    }

    /// Collect a finished volume build, non-blocking.
    ///
    /// `None` while the build is running or none is in flight. On success the
    /// volume is bound to the viewport and the default configuration is
    /// applied: composite blending, camera reset, grayscale transfer function
    /// over the scan's window. On failure the error is returned and the
    /// viewer stays volume-less.
    pub fn poll_bind(&mut self) -> Option<Result<(), ViewerError>> {
        let result = self.loader.try_finish()?;

        let volume = match result {
            Ok(v) => v,
            Err(e) => {
                log::warn!("volume build failed: {e}");
                return Some(Err(e.into()));
            }
        };

        if let Err(e) = self.engine.bind_volume(&volume) {
            log::warn!("engine rejected volume: {e}");
            return Some(Err(ViewerError::Volume(VolumeError::Engine(e))));
        }

        self.state.blend_mode = defaults::BLEND_MODE;
        if let Err(e) = self.engine.set_blend_mode(self.state.blend_mode) {
            log::warn!("set_blend_mode: {e}");
        }

        self.state.camera.reset_to_bounds(&volume.bound_box());
        self.state.presentation_rotation = 0.0;

        let preset = default_preset(&volume);
        self.volume = Some(volume);
        self.apply_preset_parts(&preset);

        self.request_redraw();
        log::info!("volume bound, viewer ready");
        Some(Ok(()))
    }

    pub fn is_load_pending(&self) -> bool {
        self.loader.is_pending()
    }

    pub fn load_progress(&self) -> LoadProgress {
        self.loader.progress()
    }

    // ---- camera ----

    /// Re-frame the camera on the bound volume.
    pub fn reset_camera(&mut self) {
        let bounds = match self.volume_bounds("reset_camera") {
            Some(b) => b,
            None => return,
        };

        self.state.camera.reset_to_bounds(&bounds);
        self.request_redraw();
    }

    /// Rotate about a world axis, holding the focal point fixed.
    pub fn rotate_around_axis(&mut self, axis: Axis, degrees: f32) {
        if self.volume_bounds("rotate_around_axis").is_none() {
            return;
        }

        self.state.camera.rotate_around_axis(axis, degrees);
        self.request_redraw();
    }

    /// Snap to an anatomical view of the bound volume.
    pub fn set_preset_view(&mut self, view: AnatomicalView) {
        let bounds = match self.volume_bounds("set_preset_view") {
            Some(b) => b,
            None => return,
        };

        self.state.camera.preset_view(view, &bounds);
        self.request_redraw();
    }

    /// Set the display-level roll to a random angle in `[0, 360)` degrees.
    ///
    /// Purely presentational; camera position and focal point are untouched.
    pub fn apply_random_rotation(&mut self) {
        if self.volume_bounds("apply_random_rotation").is_none() {
            return;
        }
        if !self.rotation_enabled {
            log::warn!("apply_random_rotation: rotation is disabled");
            return;
        }

        self.state.presentation_rotation = fastrand::f32() * 360.0;
        self.request_redraw();
    }

    /// Enable or disable the presentation rotation. Disabling zeroes it.
    pub fn set_rotation_enabled(&mut self, enabled: bool) {
        self.rotation_enabled = enabled;
        if !enabled {
            self.state.presentation_rotation = 0.0;
            if self.volume.is_some() {
                self.request_redraw();
            }
        }
    }

    // ---- tools ----

    /// Bind a tool to the primary button; the wheel stays on zoom.
    pub fn set_active_tool(&mut self, tool: Tool) {
        if !self.check_initialized("set_active_tool") {
            return;
        }

        self.state.tools.set_active_tool(tool);
        log::debug!("active tool: {tool:?}");
    }

    pub fn active_tool(&self) -> Tool {
        self.state.tools.active(Gesture::PrimaryButton)
    }

    /// Apply a primary-button drag with the active tool.
    pub fn handle_pointer_drag(&mut self, delta: Vector2<f32>) {
        let bounds = match self.volume_bounds("handle_pointer_drag") {
            Some(b) => b,
            None => return,
        };

        let camera = &mut self.state.camera;
        match self.state.tools.active(Gesture::PrimaryButton) {
            Tool::Rotate => {
                camera.rotate_around_axis(Axis::Z, -delta.x * defaults::ROTATE_SPEED);
                camera.rotate_around_axis(Axis::X, delta.y * defaults::ROTATE_SPEED);
            }
            Tool::Pan => {
                let step = bounds.diagonal() * defaults::PAN_FRACTION_PER_PIXEL;
                camera.pan_in_view_plane(vector![-delta.x * step, delta.y * step]);
            }
            Tool::Zoom => {
                let distance = (camera.focal_point() - camera.position()).norm();
                camera.dolly(delta.y * defaults::DOLLY_FRACTION_PER_PIXEL * distance);
            }
        }

        self.request_redraw();
    }

    /// Apply a wheel step; the wheel is always bound to zoom.
    pub fn handle_wheel(&mut self, units: f32) {
        if self.volume_bounds("handle_wheel").is_none() {
            return;
        }

        // the binding is invariant, but dispatch through it anyway
        if let Tool::Zoom = self.state.tools.active(Gesture::Wheel) {
            let camera = &mut self.state.camera;
            let distance = (camera.focal_point() - camera.position()).norm();
            camera.dolly(units * defaults::DOLLY_FRACTION_PER_WHEEL * distance);
        }

        self.request_redraw();
    }

    /// Keyboard surface: `r`/`p`/`z` select the tool, `f` resets the camera,
    /// `1`/`2`/`3` select the blend mode. Other keys are toolkit concerns.
    pub fn handle_key_press(&mut self, ch: char) {
        match ch.to_ascii_lowercase() {
            'r' => self.set_active_tool(Tool::Rotate),
            'p' => self.set_active_tool(Tool::Pan),
            'z' => self.set_active_tool(Tool::Zoom),
            'f' => self.reset_camera(),
            '1' => self.set_rendering_mode(BlendMode::Composite),
            '2' => self.set_rendering_mode(BlendMode::MaximumIntensity),
            '3' => self.set_rendering_mode(BlendMode::MinimumIntensity),
            _ => (),
        }
    }

    // ---- rendering mode & transfer function ----

    /// Set the blend mode on the volume's mapper.
    ///
    /// No-op with a warning when no volume is bound or the mapper is
    /// unavailable.
    pub fn set_rendering_mode(&mut self, mode: BlendMode) {
        if self.volume_bounds("set_rendering_mode").is_none() {
            return;
        }

        if let Err(e) = self.engine.set_blend_mode(mode) {
            log::warn!("set_rendering_mode: {e}");
            return;
        }

        self.state.blend_mode = mode;
        self.request_redraw();
    }

    pub fn rendering_mode(&self) -> BlendMode {
        self.state.blend_mode
    }

    /// Apply a window/level: replaces the opacity ramp with the window's
    /// 2-point ramp. Rejects non-positive widths without touching state.
    pub fn set_window_level(&mut self, width: f32, center: f32) -> Result<(), ViewerError> {
        if !self.initialized {
            return Err(ViewerError::NotInitialized);
        }

        let window = Window::new(width, center)?;

        if self.volume_bounds("set_window_level").is_none() {
            return Ok(());
        }

        self.state.transfer.set_window(window);
        self.request_redraw();
        Ok(())
    }

    pub fn window_level(&self) -> Window {
        self.state.transfer.window()
    }

    /// Replace all color stops, all-or-nothing. Caller supplies ascending
    /// scalar order; stops are not re-sorted.
    pub fn set_rgb_transfer_function(&mut self, stops: Vec<ColorStop>) {
        if self.volume_bounds("set_rgb_transfer_function").is_none() {
            return;
        }

        self.state.transfer.set_color_stops(stops);
        self.request_redraw();
    }

    /// Set the global opacity multiplier, clamped to `<0;1>`.
    pub fn set_volume_opacity(&mut self, opacity: f32) {
        if self.volume_bounds("set_volume_opacity").is_none() {
            return;
        }

        self.state.transfer.set_global_opacity(opacity);
        self.request_redraw();
    }

    pub fn volume_opacity(&self) -> f32 {
        self.state.transfer.global_opacity()
    }

    /// Set the global opacity to a named level.
    pub fn apply_opacity_preset(&mut self, preset: OpacityPreset) {
        self.set_volume_opacity(preset.value());
    }

    /// Shade a tissue selection: rebuilds color stops and opacity points from
    /// the fixed tissue table.
    pub fn set_tissue_opacities(&mut self, opacities: &TissueOpacityMap) {
        if self.volume_bounds("set_tissue_opacities").is_none() {
            return;
        }

        let (stops, points) = tissues::tissue_tables(opacities);
        self.state.transfer.set_color_stops(stops);
        self.state.transfer.set_opacity_points(points);
        self.request_redraw();
    }

    /// Apply a preset bundle atomically: window, then color stops, then
    /// global opacity, then one redraw. With no volume bound the whole
    /// sequence is skipped.
    pub fn apply_preset(&mut self, preset: &RenderPreset) {
        if !self.check_initialized("apply_preset") {
            return;
        }
        if self.volume.is_none() {
            log::warn!("apply_preset: no volume bound, skipping '{}'", preset.name);
            return;
        }

        self.apply_preset_parts(preset);
        self.request_redraw();
    }

    // ---- viewport ----

    /// Propagate a viewport size change to the engine.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), ViewerError> {
        if !self.initialized {
            return Err(ViewerError::NotInitialized);
        }

        self.engine.resize(width, height).map_err(|e| {
            log::warn!("resize: {e}");
            ViewerError::Engine(e)
        })
    }

    /// Tear down: discards any in-flight build, evicts the volume and shuts
    /// the engine down. The viewer must be re-initialized to be used again.
    pub fn destroy(&mut self) -> Result<(), ViewerError> {
        self.loader.abandon();
        self.evict_current();

        let result = self.engine.destroy().map_err(|e| {
            log::warn!("destroy: {e}");
            ViewerError::Engine(e)
        });

        self.initialized = false;
        result
    }

    // ---- internals ----

    /// Stages of a preset, each replacing its own sub-state. Order matters
    /// only for intermediate states; every stage is a full replacement.
    fn apply_preset_parts(&mut self, preset: &RenderPreset) {
        if let Some(window) = preset.window {
            self.state.transfer.set_window(window);
        }
        if !preset.color_stops.is_empty() {
            self.state.transfer.set_color_stops(preset.color_stops.clone());
        }
        if let Some(opacity) = preset.global_opacity {
            self.state.transfer.set_global_opacity(opacity);
        }
    }

    fn evict_current(&mut self) {
        if let Some(volume) = self.volume.take() {
            if let Err(e) = self.engine.evict_volume(volume.id()) {
                // not fatal, the new volume replaces it under the same id
                log::warn!("evict_volume: {e}");
            }
        }
    }

    fn check_initialized(&self, op: &str) -> bool {
        if !self.initialized {
            log::warn!("{op}: viewer not initialized");
            return false;
        }
        true
    }

    /// Bounds of the bound volume, or a logged no-op.
    fn volume_bounds(&self, op: &str) -> Option<BoundBox> {
        if !self.check_initialized(op) {
            return None;
        }
        match &self.volume {
            Some(volume) => Some(volume.bound_box()),
            None => {
                log::warn!("{op}: no volume bound");
                None
            }
        }
    }

    /// Failures here are harmless to skip; the next successful redraw renders
    /// the same state.
    fn request_redraw(&mut self) {
        if let Err(e) = self.engine.redraw(&self.state) {
            log::warn!("redraw: {e}");
        }
    }
}

/// Default configuration applied when a volume is bound: grayscale over the
/// scan's own window when the metadata carries one, else over the full
/// scalar range.
fn default_preset(volume: &Volume) -> RenderPreset {
    let mut preset = presets::grayscale(volume.scalar_range());

    let metadata = volume.metadata();
    if let (Some(center), Some(width)) = (metadata.window_center, metadata.window_width) {
        if let Ok(window) = Window::new(width, center) {
            preset.window = Some(window);
        }
    }

    preset.with_global_opacity(defaults::GLOBAL_OPACITY)
}
