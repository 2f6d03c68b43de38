/// Volume enumeration using the Windows API.
///
/// Lists logical drives with their label, removability, total/free space
/// and volume GUID path.
use super::{MountPoint, RawVolume, VolumeSource};
use crate::error::ProbeError;
use std::ffi::OsString;
use std::os::windows::ffi::OsStringExt;
use std::path::PathBuf;
use windows::core::PCWSTR;
use windows::Win32::Storage::FileSystem::{
    GetDiskFreeSpaceExW, GetDriveTypeW, GetLogicalDriveStringsW, GetVolumeInformationW,
    GetVolumeNameForVolumeMountPointW,
};

// Drive type constants from the Windows API.
const DRIVE_REMOVABLE_VAL: u32 = 2;
const DRIVE_REMOTE_VAL: u32 = 4;

/// Logical drives as reported by the Win32 storage API.
#[derive(Debug, Default, Clone, Copy)]
pub struct WindowsSource;

impl VolumeSource for WindowsSource {
    /// Network/remote drives are excluded; only local drives are returned.
    fn mount_points(&self) -> Option<Vec<MountPoint>> {
        // GetLogicalDriveStringsW returns null-separated drive root strings.
        let mut buffer = [0u16; 256];
        let len = unsafe { GetLogicalDriveStringsW(Some(&mut buffer)) };

        if len == 0 {
            tracing::warn!("GetLogicalDriveStringsW returned 0");
            return None;
        }

        let full = OsString::from_wide(&buffer[..len as usize]);
        let full_str = full.to_string_lossy();

        let mounts = full_str
            .split('\0')
            .filter(|s| !s.is_empty())
            .filter(|root| {
                let wide = to_wide(root);
                let raw_type = unsafe { GetDriveTypeW(PCWSTR(wide.as_ptr())) };
                raw_type != DRIVE_REMOTE_VAL
            })
            .map(|root| MountPoint {
                path: PathBuf::from(root),
                device: root.to_string(),
                fs_type: String::new(),
            })
            .collect();
        Some(mounts)
    }

    fn probe(&self, mount: &MountPoint) -> Result<RawVolume, ProbeError> {
        let root_wide = to_wide(&mount.device);
        let root = PCWSTR(root_wide.as_ptr());

        let raw_type = unsafe { GetDriveTypeW(root) };

        // Disk space.
        let mut free_caller: u64 = 0;
        let mut total: u64 = 0;
        let mut free_total: u64 = 0;
        let space = unsafe {
            GetDiskFreeSpaceExW(
                root,
                Some(&mut free_caller as *mut u64),
                Some(&mut total as *mut u64),
                Some(&mut free_total as *mut u64),
            )
        };
        space.map_err(|e| ProbeError::Win32 {
            call: "GetDiskFreeSpaceExW",
            path: mount.path.clone(),
            message: e.message().to_string(),
        })?;

        // Volume label, falling back to the drive letter.
        let mut label_buf = [0u16; 256];
        let has_volume_info = unsafe {
            GetVolumeInformationW(root, Some(&mut label_buf), None, None, None, None).is_ok()
        };
        let label = if has_volume_info {
            from_wide_nul(&label_buf)
        } else {
            String::new()
        };
        let name = if label.is_empty() {
            Some(mount.device.trim_end_matches('\\').to_string())
        } else {
            Some(label)
        };

        // Volume GUID path, e.g. \\?\Volume{...}\
        let mut guid_buf = [0u16; 64];
        let origin = unsafe { GetVolumeNameForVolumeMountPointW(root, &mut guid_buf) }
            .ok()
            .map(|_| from_wide_nul(&guid_buf))
            .filter(|s| !s.is_empty());

        Ok(RawVolume {
            name,
            removable: Some(raw_type == DRIVE_REMOVABLE_VAL),
            total_bytes: Some(total),
            available_bytes: Some(free_caller),
            origin,
        })
    }
}

fn to_wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

fn from_wide_nul(buf: &[u16]) -> String {
    let end = buf.iter().position(|&c| c == 0).unwrap_or(buf.len());
    String::from_utf16_lossy(&buf[..end])
}
