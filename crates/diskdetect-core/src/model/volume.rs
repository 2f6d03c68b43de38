/// One mounted volume as reported by a single enumeration pass.
///
/// Records are built once by the enumerator and never mutated. The usage
/// ratio is derived on demand from the two stored byte counts.
use serde::{Serialize, Serializer};
use std::path::{Path, PathBuf};

/// Volume classification.
///
/// Derived solely from the OS removability flag. Removable media is treated
/// as "external/USB", which also sweeps in card readers and any other
/// hot-pluggable block device the kernel flags as removable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VolumeKind {
    Removable,
    Internal,
}

impl VolumeKind {
    pub fn from_removable(removable: bool) -> Self {
        if removable {
            Self::Removable
        } else {
            Self::Internal
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Removable => "Removable",
            Self::Internal => "Internal",
        }
    }
}

/// Fraction of capacity in use: `1 - free / total`.
///
/// A zero-capacity volume reports `0.0`. The result is clamped to
/// `[0.0, 1.0]`, so a source reporting more free than total space
/// can never produce a negative ratio.
pub fn usage_ratio(total_bytes: u64, free_bytes: u64) -> f64 {
    if total_bytes == 0 {
        return 0.0;
    }
    (1.0 - free_bytes as f64 / total_bytes as f64).clamp(0.0, 1.0)
}

/// Information about a single mounted volume.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VolumeRecord {
    /// Position in this enumeration's result; not stable across calls.
    id: usize,
    /// Display name (filesystem label, or a fallback derived from the mount).
    name: String,
    kind: VolumeKind,
    /// Total capacity in bytes.
    total_bytes: u64,
    /// Space available to unprivileged users, in bytes.
    free_bytes: u64,
    /// Where the volume is mounted from, e.g. "/dev/sda1".
    mount_path: String,
    /// Directory the volume is mounted at, e.g. "/media/usb".
    #[serde(serialize_with = "serialize_lossy_path")]
    mount_point: PathBuf,
}

impl VolumeRecord {
    pub fn new(
        id: usize,
        name: String,
        kind: VolumeKind,
        total_bytes: u64,
        free_bytes: u64,
        mount_path: String,
        mount_point: PathBuf,
    ) -> Self {
        Self {
            id,
            name,
            kind,
            total_bytes,
            free_bytes,
            mount_path,
            mount_point,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> VolumeKind {
        self.kind
    }

    pub fn total_bytes(&self) -> u64 {
        self.total_bytes
    }

    pub fn free_bytes(&self) -> u64 {
        self.free_bytes
    }

    pub fn used_bytes(&self) -> u64 {
        self.total_bytes.saturating_sub(self.free_bytes)
    }

    pub fn mount_path(&self) -> &str {
        &self.mount_path
    }

    pub fn mount_point(&self) -> &Path {
        &self.mount_point
    }

    pub fn usage_ratio(&self) -> f64 {
        usage_ratio(self.total_bytes, self.free_bytes)
    }

    /// Usage as a percentage (0.0–100.0).
    pub fn usage_percent(&self) -> f64 {
        self.usage_ratio() * 100.0
    }

    /// True when both records describe the same volume state, ignoring `id`.
    pub fn same_volume(&self, other: &Self) -> bool {
        self.name == other.name
            && self.kind == other.kind
            && self.total_bytes == other.total_bytes
            && self.free_bytes == other.free_bytes
            && self.mount_path == other.mount_path
            && self.mount_point == other.mount_point
    }
}

fn serialize_lossy_path<S: Serializer>(path: &Path, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&path.to_string_lossy())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(total: u64, free: u64) -> VolumeRecord {
        VolumeRecord::new(
            0,
            "Data".into(),
            VolumeKind::Internal,
            total,
            free,
            "/dev/sda2".into(),
            PathBuf::from("/data"),
        )
    }

    #[test]
    fn test_usage_ratio_basic() {
        let ratio = usage_ratio(500_000_000_000, 120_000_000_000);
        assert!((ratio - 0.76).abs() < 1e-9, "got {ratio}");
        assert_eq!(usage_ratio(100, 100), 0.0);
        assert_eq!(usage_ratio(100, 0), 1.0);
    }

    /// Zero capacity must not divide; it reports an empty volume.
    #[test]
    fn test_usage_ratio_zero_capacity() {
        assert_eq!(usage_ratio(0, 0), 0.0);
        assert_eq!(usage_ratio(0, 42), 0.0);
    }

    #[test]
    fn test_usage_ratio_free_exceeds_total_is_clamped() {
        assert_eq!(usage_ratio(100, 150), 0.0);
    }

    #[test]
    fn test_kind_from_removable() {
        assert_eq!(VolumeKind::from_removable(true), VolumeKind::Removable);
        assert_eq!(VolumeKind::from_removable(false), VolumeKind::Internal);
        assert_eq!(VolumeKind::Removable.label(), "Removable");
        assert_eq!(VolumeKind::Internal.label(), "Internal");
    }

    #[test]
    fn test_used_bytes_and_percent() {
        let r = record(16_000_000_000, 4_000_000_000);
        assert_eq!(r.used_bytes(), 12_000_000_000);
        assert!((r.usage_percent() - 75.0).abs() < 1e-9);

        // Saturates rather than underflowing.
        assert_eq!(record(10, 20).used_bytes(), 0);
    }

    #[test]
    fn test_same_volume_ignores_id() {
        let a = record(10, 5);
        let mut b = a.clone();
        b.id = 7;
        assert!(a.same_volume(&b));
        assert_ne!(a, b);

        let c = record(10, 4);
        assert!(!a.same_volume(&c));
    }

    #[test]
    fn test_serialize_shape() {
        let json = serde_json::to_value(record(10, 5)).unwrap();
        assert_eq!(json["kind"], "internal");
        assert_eq!(json["mount_point"], "/data");
        assert_eq!(json["total_bytes"], 10);
    }
}
