/// Per-mount validation — turns the optional attributes a source reports
/// into either a complete volume or the reason it was skipped.
use crate::model::VolumeKind;
use crate::platform::RawVolume;
use std::fmt;

/// A mount whose five attributes were all known.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedVolume {
    pub name: String,
    pub kind: VolumeKind,
    pub total_bytes: u64,
    pub free_bytes: u64,
    pub mount_path: String,
}

/// Why a mount was left out of the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    MissingName,
    MissingRemovable,
    MissingTotalCapacity,
    MissingAvailableCapacity,
    MissingOrigin,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let attr = match self {
            Self::MissingName => "volume name",
            Self::MissingRemovable => "removable flag",
            Self::MissingTotalCapacity => "total capacity",
            Self::MissingAvailableCapacity => "available capacity",
            Self::MissingOrigin => "mount origin",
        };
        write!(f, "{attr} unknown")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Resolved(ResolvedVolume),
    Skipped(SkipReason),
}

/// Validate a probed mount. The first missing attribute, in the order
/// name, removable, total, available, origin, decides the skip reason.
pub fn resolve(raw: RawVolume) -> Resolution {
    match try_resolve(raw) {
        Ok(v) => Resolution::Resolved(v),
        Err(reason) => Resolution::Skipped(reason),
    }
}

fn try_resolve(raw: RawVolume) -> Result<ResolvedVolume, SkipReason> {
    let name = raw.name.ok_or(SkipReason::MissingName)?;
    let removable = raw.removable.ok_or(SkipReason::MissingRemovable)?;
    let total_bytes = raw.total_bytes.ok_or(SkipReason::MissingTotalCapacity)?;
    let free_bytes = raw
        .available_bytes
        .ok_or(SkipReason::MissingAvailableCapacity)?;
    let mount_path = raw.origin.ok_or(SkipReason::MissingOrigin)?;

    Ok(ResolvedVolume {
        name,
        kind: VolumeKind::from_removable(removable),
        total_bytes,
        free_bytes,
        mount_path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> RawVolume {
        RawVolume {
            name: Some("USBStick".into()),
            removable: Some(true),
            total_bytes: Some(16_000_000_000),
            available_bytes: Some(4_000_000_000),
            origin: Some("/dev/disk2s1".into()),
        }
    }

    #[test]
    fn test_complete_volume_resolves() {
        let Resolution::Resolved(v) = resolve(complete()) else {
            panic!("complete volume must resolve");
        };
        assert_eq!(v.name, "USBStick");
        assert_eq!(v.kind, VolumeKind::Removable);
        assert_eq!(v.total_bytes, 16_000_000_000);
        assert_eq!(v.free_bytes, 4_000_000_000);
        assert_eq!(v.mount_path, "/dev/disk2s1");
    }

    #[test]
    fn test_each_missing_attribute_skips() {
        let cases: [(fn(&mut RawVolume), SkipReason); 5] = [
            (|r| r.name = None, SkipReason::MissingName),
            (|r| r.removable = None, SkipReason::MissingRemovable),
            (|r| r.total_bytes = None, SkipReason::MissingTotalCapacity),
            (|r| r.available_bytes = None, SkipReason::MissingAvailableCapacity),
            (|r| r.origin = None, SkipReason::MissingOrigin),
        ];
        for (clear, expected) in cases {
            let mut raw = complete();
            clear(&mut raw);
            assert_eq!(resolve(raw), Resolution::Skipped(expected));
        }
    }

    #[test]
    fn test_first_missing_attribute_wins() {
        let raw = RawVolume {
            total_bytes: Some(1),
            ..RawVolume::default()
        };
        assert_eq!(resolve(raw), Resolution::Skipped(SkipReason::MissingName));
    }

    /// Zero is a known value, not a missing one.
    #[test]
    fn test_zero_capacity_still_resolves() {
        let raw = RawVolume {
            total_bytes: Some(0),
            available_bytes: Some(0),
            ..complete()
        };
        assert!(matches!(resolve(raw), Resolution::Resolved(_)));
    }

    #[test]
    fn test_skip_reason_display() {
        assert_eq!(SkipReason::MissingOrigin.to_string(), "mount origin unknown");
        assert_eq!(
            SkipReason::MissingRemovable.to_string(),
            "removable flag unknown"
        );
    }
}
