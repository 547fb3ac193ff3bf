use std::fmt;

use nalgebra::Vector3;

use crate::common::{BoundBox, ValueRange};

use super::ScanMetadata;

/// Identity of a volume in the engine's cache.
///
/// The system holds at most one volume at a time, always under the same
/// process-wide identity; a rebind evicts the old volume first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VolumeId(&'static str);

impl VolumeId {
    pub const CURRENT: VolumeId = VolumeId("volume-current");

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for VolumeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Descriptor of a reconstructed 3D scalar grid.
///
/// Immutable once built. The voxel payload lives in the engine; this side
/// holds the geometry and intensity characteristics every controller needs.
#[derive(Debug, Clone, PartialEq)]
pub struct Volume {
    pub(super) id: VolumeId,
    pub(super) size: Vector3<usize>,
    pub(super) spacing: Vector3<f32>,
    pub(super) scalar_range: ValueRange,
    pub(super) bound_box: BoundBox,
    pub(super) slice_count: usize,
    pub(super) metadata: ScanMetadata,
}

impl Volume {
    pub fn id(&self) -> VolumeId {
        self.id
    }

    /// Grid dimensions in voxels, `(columns, rows, slices)`.
    pub fn size(&self) -> Vector3<usize> {
        self.size
    }

    /// Voxel spacing in world units per axis.
    pub fn spacing(&self) -> Vector3<f32> {
        self.spacing
    }

    pub fn scalar_range(&self) -> ValueRange {
        self.scalar_range
    }

    pub fn bound_box(&self) -> BoundBox {
        self.bound_box
    }

    pub fn slice_count(&self) -> usize {
        self.slice_count
    }

    pub fn metadata(&self) -> &ScanMetadata {
        &self.metadata
    }
}
