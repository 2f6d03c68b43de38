/// Data model for DiskDetect.
///
/// Re-exports the immutable volume record and its classification.
pub mod volume;

pub use volume::{usage_ratio, VolumeKind, VolumeRecord};
