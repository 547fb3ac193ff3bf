mod builder;
mod loader_front;
mod slices;
mod volume;

pub use builder::build_volume;
pub use loader_front::{LoadProgress, LoaderFront};
pub use slices::{
    order_slices, FailedSlice, LoadOutcome, LoadedSlice, ScanMetadata, SliceLoader, SliceReference,
};
pub use volume::{Volume, VolumeId};
