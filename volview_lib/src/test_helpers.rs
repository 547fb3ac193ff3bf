//! Module with helper functions
//! Saves repetition in unit and integration tests

use crate::error::{EngineError, ViewerError};
use crate::render::{BlendMode, RenderEngine};
use crate::viewer::{Viewer, ViewerState};
use crate::volumetric::{ScanMetadata, SliceReference, Volume, VolumeId};

/// One recorded engine invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineCall {
    Initialize,
    BindVolume(VolumeId),
    EvictVolume(VolumeId),
    SetBlendMode(BlendMode),
    Redraw,
    Resize(u32, u32),
    Destroy,
}

/// Engine double that records every call.
///
/// Arm `fail_next` to make the next call report an engine failure.
#[derive(Default)]
pub struct RecordingEngine {
    pub calls: Vec<EngineCall>,
    pub fail_next: Option<String>,
}

impl RecordingEngine {
    pub fn new() -> RecordingEngine {
        RecordingEngine {
            calls: Vec::new(),
            fail_next: None,
        }
    }

    pub fn redraws(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, EngineCall::Redraw))
            .count()
    }

    pub fn last_call(&self) -> Option<EngineCall> {
        self.calls.last().copied()
    }

    fn record(&mut self, call: EngineCall) -> Result<(), EngineError> {
        self.calls.push(call);
        match self.fail_next.take() {
            Some(msg) => Err(EngineError(msg)),
            None => Ok(()),
        }
    }
}

impl RenderEngine for RecordingEngine {
    fn initialize(&mut self) -> Result<(), EngineError> {
        self.record(EngineCall::Initialize)
    }

    fn bind_volume(&mut self, volume: &Volume) -> Result<(), EngineError> {
        self.record(EngineCall::BindVolume(volume.id()))
    }

    fn evict_volume(&mut self, id: VolumeId) -> Result<(), EngineError> {
        self.record(EngineCall::EvictVolume(id))
    }

    fn set_blend_mode(&mut self, mode: BlendMode) -> Result<(), EngineError> {
        self.record(EngineCall::SetBlendMode(mode))
    }

    fn redraw(&mut self, _state: &ViewerState) -> Result<(), EngineError> {
        self.record(EngineCall::Redraw)
    }

    fn resize(&mut self, width: u32, height: u32) -> Result<(), EngineError> {
        self.record(EngineCall::Resize(width, height))
    }

    fn destroy(&mut self) -> Result<(), EngineError> {
        self.record(EngineCall::Destroy)
    }
}

/// Slice stack with instance numbers and regular locations.
pub fn slice_stack(n: usize) -> Vec<SliceReference> {
    (0..n)
        .map(|i| {
            SliceReference::new(format!("slice-{i}"))
                .with_instance_number(i as i32)
                .with_slice_location(i as f32)
        })
        .collect()
}

/// CT metadata for a 100x100 in-plane grid with unit spacing.
pub fn ct_metadata() -> ScanMetadata {
    ScanMetadata {
        patient_name: Some("DOE^JOHN".into()),
        study_date: Some("20220505".into()),
        modality: Some("CT".into()),
        dimensions: (100, 100),
        pixel_spacing: (1.0, 1.0),
        window_center: None,
        window_width: None,
    }
}

/// Drive a pending bind to completion.
pub fn poll_until_bound(viewer: &mut Viewer<RecordingEngine>) -> Result<(), ViewerError> {
    loop {
        if let Some(result) = viewer.poll_bind() {
            return result;
        }
        std::thread::yield_now();
    }
}

/// Initialized viewer with a 100x100x100 CT volume bound.
pub fn ready_viewer() -> Viewer<RecordingEngine> {
    let mut viewer = Viewer::new(RecordingEngine::new());
    viewer.initialize().unwrap();
    viewer.bind_volume(slice_stack(100), ct_metadata()).unwrap();
    poll_until_bound(&mut viewer).unwrap();
    viewer
}
