/// Volume enumeration on macOS.
///
/// Volumes, labels, removability and capacity come from `sysinfo::Disks`.
/// The mount origin ("/dev/disk4s1") comes from `statfs`.
use super::{MountPoint, RawVolume, VolumeSource};
use crate::config::FilterConfig;
use crate::error::ProbeError;
use std::path::Path;
use sysinfo::{Disk, Disks};

/// Mounted volumes as reported by the macOS disk APIs.
#[derive(Debug, Clone)]
pub struct MacSource {
    filter: FilterConfig,
}

impl MacSource {
    pub fn new(filter: FilterConfig) -> Self {
        Self { filter }
    }
}

impl VolumeSource for MacSource {
    fn mount_points(&self) -> Option<Vec<MountPoint>> {
        let disks = Disks::new_with_refreshed_list();
        let mounts = disks
            .list()
            .iter()
            .map(|disk| MountPoint {
                path: disk.mount_point().to_path_buf(),
                device: disk.name().to_string_lossy().into_owned(),
                fs_type: disk.file_system().to_string_lossy().into_owned(),
            })
            .filter(|m| !self.filter.skips(&m.device, &m.path, &m.fs_type))
            .collect();
        Some(mounts)
    }

    fn probe(&self, mount: &MountPoint) -> Result<RawVolume, ProbeError> {
        let disks = Disks::new_with_refreshed_list();
        let Some(disk) = disks.list().iter().find(|d| d.mount_point() == mount.path) else {
            // Unmounted since the table was read.
            tracing::debug!("{} is no longer mounted", mount.path.display());
            return Ok(RawVolume::default());
        };

        Ok(RawVolume {
            name: volume_name(&disk.name().to_string_lossy(), &mount.path),
            removable: Some(disk.is_removable()),
            total_bytes: Some(disk.total_space()),
            available_bytes: Some(disk.available_space()),
            origin: mount_origin(disk),
        })
    }
}

/// The volume label, else the last component of the mount directory.
fn volume_name(label: &str, mount_dir: &Path) -> Option<String> {
    let label = label.trim();
    if !label.is_empty() {
        return Some(label.to_string());
    }
    mount_dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .filter(|n| !n.is_empty())
}

/// The device the volume is mounted from, as `statfs` reports it.
fn mount_origin(disk: &Disk) -> Option<String> {
    match nix::sys::statfs::statfs(disk.mount_point()) {
        Ok(stat) => Some(stat.mount_from().to_string()).filter(|s| !s.is_empty()),
        Err(e) => {
            tracing::debug!("statfs failed for {}: {e}", disk.mount_point().display());
            Some(disk.name().to_string_lossy().into_owned()).filter(|s| !s.is_empty())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volume_name_prefers_label() {
        assert_eq!(
            volume_name("USBStick", Path::new("/Volumes/UNTITLED")).as_deref(),
            Some("USBStick")
        );
    }

    #[test]
    fn test_volume_name_falls_back_to_mount_dir() {
        assert_eq!(
            volume_name("  ", Path::new("/Volumes/Backup")).as_deref(),
            Some("Backup")
        );
        assert_eq!(volume_name("", Path::new("/")), None);
    }

    #[test]
    fn test_root_volume_is_listed_and_resolves() {
        let source = MacSource::new(FilterConfig::default());
        let mounts = source.mount_points().unwrap();
        let root = mounts
            .iter()
            .find(|m| m.path == Path::new("/"))
            .expect("the root volume is always mounted");
        let raw = source.probe(root).unwrap();
        assert!(raw.total_bytes.unwrap() > 0);
        assert!(raw.available_bytes.unwrap() <= raw.total_bytes.unwrap());
        assert_eq!(raw.removable, Some(false));
        assert!(raw.origin.is_some());
    }
}
