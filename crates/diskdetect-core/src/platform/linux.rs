/// Volume enumeration on Linux.
///
/// The mount table comes from `/proc/self/mounts`, removability from sysfs,
/// labels from the udev `/dev/disk/by-label` links and capacity from
/// `statvfs`. All three roots are configurable so tests can point the
/// source at a temporary tree.
use super::{MountPoint, RawVolume, VolumeSource};
use crate::config::FilterConfig;
use crate::error::ProbeError;
use std::fs;
use std::path::{Path, PathBuf};

const PROC_MOUNTS: &str = "/proc/self/mounts";
const SYS_ROOT: &str = "/sys";
const BY_LABEL_DIR: &str = "/dev/disk/by-label";

/// Mounted volumes as seen by the Linux kernel.
#[derive(Debug, Clone)]
pub struct LinuxSource {
    filter: FilterConfig,
    mounts_file: PathBuf,
    sys_root: PathBuf,
    by_label_dir: PathBuf,
}

impl LinuxSource {
    pub fn new(filter: FilterConfig) -> Self {
        Self::with_roots(filter, PROC_MOUNTS, SYS_ROOT, BY_LABEL_DIR)
    }

    /// Build a source reading from non-standard locations.
    pub fn with_roots(
        filter: FilterConfig,
        mounts_file: impl Into<PathBuf>,
        sys_root: impl Into<PathBuf>,
        by_label_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            filter,
            mounts_file: mounts_file.into(),
            sys_root: sys_root.into(),
            by_label_dir: by_label_dir.into(),
        }
    }

    /// Read the kernel's removable flag for a block device.
    ///
    /// Partitions carry no flag of their own; the parent disk's is used.
    /// A device without a sysfs entry has no known flag.
    fn removable(&self, kernel_name: &str) -> Result<Option<bool>, ProbeError> {
        let Ok(dev_dir) = fs::canonicalize(self.sys_root.join("class/block").join(kernel_name))
        else {
            return Ok(None);
        };
        let own = dev_dir.join("removable");
        if own.exists() {
            return read_flag(&own);
        }
        match dev_dir.parent() {
            Some(disk) if dev_dir.join("partition").exists() => read_flag(&disk.join("removable")),
            _ => Ok(None),
        }
    }

    /// Filesystem label whose by-label link points at `kernel_name`.
    fn label(&self, kernel_name: &str) -> Option<String> {
        let entries = fs::read_dir(&self.by_label_dir).ok()?;
        entries.flatten().find_map(|entry| {
            let target = fs::read_link(entry.path()).ok()?;
            if target.file_name()? != kernel_name {
                return None;
            }
            let label = decode_udev_escapes(&entry.file_name().to_string_lossy());
            (!label.is_empty()).then_some(label)
        })
    }
}

impl VolumeSource for LinuxSource {
    fn mount_points(&self) -> Option<Vec<MountPoint>> {
        let content = match fs::read_to_string(&self.mounts_file) {
            Ok(c) => c,
            Err(e) => {
                tracing::warn!(
                    "Cannot read mount table {}: {e}",
                    self.mounts_file.display()
                );
                return None;
            }
        };

        let mut mounts: Vec<MountPoint> = Vec::new();
        for m in parse_mount_table(&content) {
            if self.filter.skips(&m.device, &m.path, &m.fs_type) {
                tracing::trace!("Filtered {} ({})", m.path.display(), m.fs_type);
                continue;
            }
            // A later mount on the same directory shadows the earlier one.
            mounts.retain(|existing| existing.path != m.path);
            mounts.push(m);
        }
        Some(mounts)
    }

    fn probe(&self, mount: &MountPoint) -> Result<RawVolume, ProbeError> {
        let (total_bytes, available_bytes) = capacity(&mount.path)?;

        let kernel_name = kernel_name(&mount.device);
        let removable = match kernel_name.as_deref() {
            Some(k) => self.removable(k)?,
            None => None,
        };
        let name = kernel_name
            .as_deref()
            .and_then(|k| self.label(k))
            .or_else(|| {
                mount
                    .path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
            })
            .or_else(|| kernel_name.clone());

        let origin = match mount.device.as_str() {
            "" | "none" => None,
            d => Some(d.to_string()),
        };

        Ok(RawVolume {
            name,
            removable,
            total_bytes: Some(total_bytes),
            available_bytes: Some(available_bytes),
            origin,
        })
    }
}

/// Parse `/proc/mounts`-format text into mount points, in file order.
pub fn parse_mount_table(content: &str) -> Vec<MountPoint> {
    content
        .lines()
        .filter_map(|line| {
            let mut fields = line.split_whitespace();
            let device = fields.next()?;
            let dir = fields.next()?;
            let fs_type = fields.next()?;
            Some(MountPoint {
                path: PathBuf::from(decode_octal_escapes(dir)),
                device: decode_octal_escapes(device),
                fs_type: fs_type.to_string(),
            })
        })
        .collect()
}

/// Total and available bytes for the filesystem mounted at `dir`.
fn capacity(dir: &Path) -> Result<(u64, u64), ProbeError> {
    use nix::sys::statvfs::statvfs;
    let stat = statvfs(dir).map_err(|e| ProbeError::Statvfs {
        path: dir.to_path_buf(),
        source: e.into(),
    })?;

    let frsize = stat.fragment_size() as u64;
    let total = blocks_to_bytes(stat.blocks() as u64, frsize);
    let available = blocks_to_bytes(stat.blocks_available() as u64, frsize);
    Ok((total, available))
}

/// Block count times block size, saturating on a nonsensical reply.
fn blocks_to_bytes(blocks: u64, block_size: u64) -> u64 {
    blocks.saturating_mul(block_size)
}

/// Kernel block-device name for a mount source ("sda1" for "/dev/sda1").
///
/// Symlinked sources (`/dev/mapper/*`, `/dev/disk/by-uuid/*`) are resolved
/// first. Sources outside `/dev` have no block device.
fn kernel_name(device: &str) -> Option<String> {
    if !device.starts_with("/dev/") {
        return None;
    }
    let resolved = fs::canonicalize(device).unwrap_or_else(|_| PathBuf::from(device));
    resolved
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
}

fn read_flag(path: &Path) -> Result<Option<bool>, ProbeError> {
    let text = fs::read_to_string(path).map_err(|source| ProbeError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(match text.trim() {
        "1" => Some(true),
        "0" => Some(false),
        _ => None,
    })
}

/// Decode the `\ooo` escapes the kernel uses for whitespace and backslashes.
fn decode_octal_escapes(field: &str) -> String {
    let bytes = field.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'\\' && bytes.get(i + 1..i + 4).is_some_and(is_octal_triplet) {
            let value = bytes[i + 1..i + 4]
                .iter()
                .fold(0u32, |acc, &b| acc * 8 + u32::from(b - b'0'));
            out.push(value as u8);
            i += 4;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn is_octal_triplet(digits: &[u8]) -> bool {
    digits.len() == 3 && digits.iter().all(|b| (b'0'..=b'7').contains(b))
}

/// Decode udev's `\xNN` escapes in by-label link names.
fn decode_udev_escapes(name: &str) -> String {
    let bytes = name.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'\\' && bytes.get(i + 1) == Some(&b'x') {
            let hex = bytes
                .get(i + 2..i + 4)
                .and_then(|h| std::str::from_utf8(h).ok())
                .and_then(|h| u8::from_str_radix(h, 16).ok());
            if let Some(b) = hex {
                out.push(b);
                i += 4;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}
