use nalgebra::{point, vector};

use crate::common::{BoundBox, ValueRange};
use crate::error::VolumeError;

use super::{order_slices, ScanMetadata, SliceReference, Volume, VolumeId};

/// Fallback spacing along the scan axis when slice locations are missing.
const DEFAULT_SLICE_SPACING: f32 = 1.0;

/// Build a volume descriptor from an ordered slice stack.
///
/// Checks the minimum-slice contract, orders the stack, then derives grid
/// size, voxel spacing, bounds and the scalar range. `progress` is called
/// once per validated slice with `(done, total)`.
pub(super) fn build_with_progress<F>(
    mut slices: Vec<SliceReference>,
    metadata: ScanMetadata,
    mut progress: F,
) -> Result<Volume, VolumeError>
where
    F: FnMut(usize, usize),
{
    let total = slices.len();
    if total < 2 {
        return Err(VolumeError::TooFewSlices(total));
    }

    order_slices(&mut slices);

    for (i, slice) in slices.iter().enumerate() {
        if slice.image.is_empty() {
            return Err(VolumeError::EmptySlice(i));
        }
        progress(i + 1, total);
    }

    let (columns, rows) = metadata.dimensions;
    let size = vector![columns as usize, rows as usize, total];

    let spacing = vector![
        metadata.pixel_spacing.0,
        metadata.pixel_spacing.1,
        slice_spacing(&slices)
    ];

    let dims = vector![
        size.x as f32 * spacing.x,
        size.y as f32 * spacing.y,
        size.z as f32 * spacing.z
    ];
    let bound_box = BoundBox::from_position_dims(point![0.0, 0.0, 0.0], dims);

    Ok(Volume {
        id: VolumeId::CURRENT,
        size,
        spacing,
        scalar_range: scalar_range_for(&metadata),
        bound_box,
        slice_count: total,
        metadata,
    })
}

/// Build a volume descriptor, without progress reporting.
pub fn build_volume(
    slices: Vec<SliceReference>,
    metadata: ScanMetadata,
) -> Result<Volume, VolumeError> {
    build_with_progress(slices, metadata, |_, _| ())
}

/// Spacing along the scan axis.
///
/// First difference of consecutive slice locations of the ordered stack;
/// falls back to a unit step when locations are missing or degenerate.
fn slice_spacing(slices: &[SliceReference]) -> f32 {
    let locations: Vec<f32> = slices.iter().filter_map(|s| s.slice_location).collect();

    if locations.len() == slices.len() {
        let step = (locations[1] - locations[0]).abs();
        if step > f32::EPSILON {
            return step;
        }
    }

    DEFAULT_SLICE_SPACING
}

/// Scalar range by modality.
///
/// CT data is calibrated in Hounsfield units; everything else gets the 12-bit
/// detector range.
fn scalar_range_for(metadata: &ScanMetadata) -> ValueRange {
    match metadata.modality.as_deref() {
        Some("CT") => ValueRange::new(-1024.0, 3071.0),
        _ => ValueRange::new(0.0, 4095.0),
    }
}

#[cfg(test)]
mod test {

    use super::*;

    fn stack(n: usize) -> Vec<SliceReference> {
        (0..n)
            .map(|i| {
                SliceReference::new(format!("slice-{i}"))
                    .with_instance_number(i as i32)
                    .with_slice_location(i as f32 * 2.5)
            })
            .collect()
    }

    fn ct_metadata() -> ScanMetadata {
        ScanMetadata {
            modality: Some("CT".into()),
            dimensions: (512, 512),
            pixel_spacing: (0.7, 0.7),
            ..Default::default()
        }
    }

    #[test]
    fn rejects_single_slice() {
        let result = build_volume(stack(1), ct_metadata());

        assert_eq!(result.unwrap_err(), VolumeError::TooFewSlices(1));
    }

    #[test]
    fn two_slices_build() {
        let volume = build_volume(stack(2), ct_metadata()).unwrap();

        assert_eq!(volume.slice_count(), 2);
        assert_eq!(volume.size(), nalgebra::vector![512, 512, 2]);
    }

    #[test]
    fn spacing_from_slice_locations() {
        let volume = build_volume(stack(4), ct_metadata()).unwrap();

        let spacing = volume.spacing();
        assert_eq!(spacing.x, 0.7);
        assert_eq!(spacing.y, 0.7);
        assert!((spacing.z - 2.5).abs() < 1e-6);
    }

    #[test]
    fn missing_locations_fall_back_to_unit_step() {
        let slices: Vec<_> = (0..3)
            .map(|i| SliceReference::new(format!("s{i}")).with_instance_number(i))
            .collect();

        let volume = build_volume(slices, ct_metadata()).unwrap();

        assert_eq!(volume.spacing().z, 1.0);
    }

    #[test]
    fn bounds_cover_scaled_grid() {
        let volume = build_volume(stack(10), ct_metadata()).unwrap();

        let bbox = volume.bound_box();
        assert_eq!(bbox.lower, point![0.0, 0.0, 0.0]);
        assert!((bbox.upper.x - 512.0 * 0.7).abs() < 1e-3);
        assert!((bbox.upper.z - 25.0).abs() < 1e-3);
    }

    #[test]
    fn scalar_range_by_modality() {
        let ct = build_volume(stack(2), ct_metadata()).unwrap();
        assert_eq!(ct.scalar_range(), ValueRange::new(-1024.0, 3071.0));

        let mr = build_volume(
            stack(2),
            ScanMetadata {
                modality: Some("MR".into()),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(mr.scalar_range(), ValueRange::new(0.0, 4095.0));
    }

    #[test]
    fn empty_image_reference_fails() {
        let mut slices = stack(3);
        slices[1].image.clear();

        let result = build_volume(slices, ct_metadata());

        assert_eq!(result.unwrap_err(), VolumeError::EmptySlice(1));
    }

    #[test]
    fn progress_reaches_total() {
        let mut seen = Vec::new();
        build_with_progress(stack(3), ct_metadata(), |done, total| {
            seen.push((done, total));
        })
        .unwrap();

        assert_eq!(seen.last(), Some(&(3, 3)));
    }
}
