/// Platform-specific functionality — the `VolumeSource` seam and the
/// per-OS implementations behind it.
///
/// The enumerator never talks to the OS directly. It asks a source for
/// the mount table, then for the attributes of each mount, which lets tests
/// substitute a fake source with fixed data.
use crate::config::FilterConfig;
use crate::error::ProbeError;
use std::path::PathBuf;

#[cfg(target_os = "linux")]
pub mod linux;
#[cfg(target_os = "macos")]
pub mod macos;
#[cfg(windows)]
pub mod win32;

#[cfg(target_os = "linux")]
pub use linux::LinuxSource;
#[cfg(target_os = "macos")]
pub use macos::MacSource;
#[cfg(windows)]
pub use win32::WindowsSource;

/// One entry of the OS mount table, before any per-volume query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountPoint {
    /// Directory the filesystem is mounted at.
    pub path: PathBuf,
    /// Mount source as the mount table reports it ("/dev/sda1", "C:\").
    pub device: String,
    /// Filesystem type ("ext4", "NTFS"). May be empty.
    pub fs_type: String,
}

/// The five per-volume attributes, each of which may be unknown.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawVolume {
    pub name: Option<String>,
    pub removable: Option<bool>,
    pub total_bytes: Option<u64>,
    pub available_bytes: Option<u64>,
    /// Where the volume is mounted from.
    pub origin: Option<String>,
}

/// Read-only access to the host's mounted filesystems.
pub trait VolumeSource: Send + Sync {
    /// The current mount table, in OS order.
    ///
    /// `None` means the table itself could not be obtained.
    fn mount_points(&self) -> Option<Vec<MountPoint>>;

    /// Resolve the attributes of one mount. Attributes the OS does not
    /// know come back as `None`; hard failures come back as `Err`.
    fn probe(&self, mount: &MountPoint) -> Result<RawVolume, ProbeError>;
}

/// A source for targets without a mount-table implementation.
///
/// It always reports the mount table as unavailable, so enumeration
/// yields no volumes.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnsupportedSource;

impl VolumeSource for UnsupportedSource {
    fn mount_points(&self) -> Option<Vec<MountPoint>> {
        tracing::warn!(
            "Volume enumeration is not supported on {}",
            std::env::consts::OS
        );
        None
    }

    fn probe(&self, _mount: &MountPoint) -> Result<RawVolume, ProbeError> {
        Ok(RawVolume::default())
    }
}

/// The source for the platform this binary was built for.
#[cfg(target_os = "linux")]
pub fn default_source(filter: &FilterConfig) -> Box<dyn VolumeSource> {
    Box::new(LinuxSource::new(filter.clone()))
}

/// The source for the platform this binary was built for.
#[cfg(target_os = "macos")]
pub fn default_source(filter: &FilterConfig) -> Box<dyn VolumeSource> {
    Box::new(MacSource::new(filter.clone()))
}

/// The source for the platform this binary was built for.
#[cfg(windows)]
pub fn default_source(_filter: &FilterConfig) -> Box<dyn VolumeSource> {
    Box::new(WindowsSource)
}

/// The source for the platform this binary was built for.
#[cfg(not(any(target_os = "linux", target_os = "macos", windows)))]
pub fn default_source(_filter: &FilterConfig) -> Box<dyn VolumeSource> {
    Box::new(UnsupportedSource)
}
