/// DiskDetect Core — mounted volume enumeration and capacity metrics.
///
/// This crate contains all business logic with zero UI dependencies.
/// Frontends (the `diskdetect` CLI, or anything else) call
/// [`VolumeEnumerator::enumerate`] and render the returned records.
///
/// # Modules
///
/// - [`model`] — `VolumeRecord`, `VolumeKind` and the usage-ratio helper.
/// - [`enumerator`] — Mount resolution, skip policy and id assignment.
/// - [`platform`] — The `VolumeSource` seam and per-OS implementations.
/// - [`config`] — TOML configuration (mount filters, output defaults).
/// - [`error`] — Per-volume probe errors.
pub mod config;
pub mod enumerator;
pub mod error;
pub mod model;
pub mod platform;

pub use config::Config;
pub use enumerator::{EnumerationReport, VolumeEnumerator};
pub use error::ProbeError;
pub use model::{usage_ratio, VolumeKind, VolumeRecord};
pub use platform::{default_source, MountPoint, RawVolume, VolumeSource};
