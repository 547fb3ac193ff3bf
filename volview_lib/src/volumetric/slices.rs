use std::path::PathBuf;

/// Reference to one decoded cross-section, as handed over by the slice loader.
///
/// The image payload stays on the loader side; the reference identifies it and
/// carries the per-slice ordering hints.
#[derive(Debug, Clone, PartialEq)]
pub struct SliceReference {
    /// Opaque handle to the decoded slice image.
    pub image: String,
    /// Acquisition instance number, the primary sort key.
    pub instance_number: Option<i32>,
    /// Position along the scan axis, in world units.
    pub slice_location: Option<f32>,
}

impl SliceReference {
    pub fn new(image: impl Into<String>) -> SliceReference {
        SliceReference {
            image: image.into(),
            instance_number: None,
            slice_location: None,
        }
    }

    pub fn with_instance_number(mut self, n: i32) -> SliceReference {
        self.instance_number = Some(n);
        self
    }

    pub fn with_slice_location(mut self, location: f32) -> SliceReference {
        self.slice_location = Some(location);
        self
    }
}

/// Descriptive fields extracted from the slice files by the loader.
///
/// One representative record describes the whole stack.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanMetadata {
    pub patient_name: Option<String>,
    pub study_date: Option<String>,
    pub modality: Option<String>,
    /// In-plane size, `(columns, rows)`.
    pub dimensions: (u32, u32),
    /// In-plane pixel spacing, world units per pixel.
    pub pixel_spacing: (f32, f32),
    pub window_center: Option<f32>,
    pub window_width: Option<f32>,
}

impl Default for ScanMetadata {
    fn default() -> Self {
        ScanMetadata {
            patient_name: None,
            study_date: None,
            modality: None,
            dimensions: (512, 512),
            pixel_spacing: (1.0, 1.0),
            window_center: None,
            window_width: None,
        }
    }
}

/// One successfully loaded slice.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedSlice {
    pub reference: SliceReference,
    pub metadata: ScanMetadata,
}

/// One slice file the loader could not parse.
#[derive(Debug, Clone, PartialEq)]
pub struct FailedSlice {
    pub name: String,
    pub error: String,
}

/// Result of a slice-loading pass over a set of files.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadOutcome {
    pub successful: Vec<LoadedSlice>,
    pub failed: Vec<FailedSlice>,
}

impl LoadOutcome {
    /// Split the outcome into the inputs of a volume bind: ordered slice
    /// references plus one representative metadata record.
    ///
    /// Returns `None` when nothing loaded successfully.
    pub fn into_bind_inputs(self) -> Option<(Vec<SliceReference>, ScanMetadata)> {
        let metadata = self.successful.first()?.metadata.clone();
        let mut references: Vec<SliceReference> =
            self.successful.into_iter().map(|s| s.reference).collect();
        order_slices(&mut references);

        Some((references, metadata))
    }
}

/// Per-slice file parsing, an external collaborator.
pub trait SliceLoader {
    fn load_slices(&self, files: &[PathBuf]) -> LoadOutcome;
}

/// Order slices for stacking.
///
/// Sorted by instance number when every reference carries one; any missing
/// number keeps the whole stack in input order instead of interleaving
/// guesses. The sort is stable.
pub fn order_slices(slices: &mut [SliceReference]) {
    if slices.iter().all(|s| s.instance_number.is_some()) {
        slices.sort_by_key(|s| s.instance_number);
    }
}
