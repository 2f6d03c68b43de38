/// Volume enumerator — turns the OS mount table into volume records.
///
/// Each call re-queries the source from scratch: nothing is cached and ids
/// are reassigned densely from zero. A mount that cannot be fully resolved
/// is skipped (and logged), never reported as an error, and an unavailable
/// mount table yields an empty list.
pub mod resolve;

use crate::config::Config;
use crate::model::VolumeRecord;
use crate::platform::{self, MountPoint, VolumeSource};
pub use resolve::{resolve, Resolution, ResolvedVolume, SkipReason};

use std::fmt;
use tracing::{debug, warn};

/// Enumerates mounted volumes through an injected [`VolumeSource`].
pub struct VolumeEnumerator {
    source: Box<dyn VolumeSource>,
}

/// Why a particular mount is missing from the result.
#[derive(Debug, Clone, PartialEq)]
pub enum SkipCause {
    /// The source did not know one of the required attributes.
    Unresolved(SkipReason),
    /// The source failed while probing the mount.
    ProbeFailed(String),
}

impl fmt::Display for SkipCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unresolved(reason) => fmt::Display::fmt(reason, f),
            Self::ProbeFailed(message) => f.write_str(message),
        }
    }
}

/// A mount left out of an enumeration, with the cause.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedMount {
    pub mount: MountPoint,
    pub cause: SkipCause,
}

/// Everything one enumeration pass produced.
#[derive(Debug, Clone, Default)]
pub struct EnumerationReport {
    pub volumes: Vec<VolumeRecord>,
    pub skipped: Vec<SkippedMount>,
    /// False when the mount table itself could not be read.
    pub mount_table_available: bool,
}

impl VolumeEnumerator {
    pub fn new(source: impl VolumeSource + 'static) -> Self {
        Self {
            source: Box::new(source),
        }
    }

    pub fn from_boxed(source: Box<dyn VolumeSource>) -> Self {
        Self { source }
    }

    /// An enumerator over the host's own mounts, filtered per `config`.
    pub fn system(config: &Config) -> Self {
        Self::from_boxed(platform::default_source(&config.filter))
    }

    /// Current mounted volumes, in the order the OS reports them.
    pub fn enumerate(&self) -> Vec<VolumeRecord> {
        self.enumerate_with_report().volumes
    }

    /// Like [`enumerate`](Self::enumerate), but also reports which mounts
    /// were skipped and why.
    pub fn enumerate_with_report(&self) -> EnumerationReport {
        let Some(mounts) = self.source.mount_points() else {
            warn!("Mount table unavailable, reporting no volumes");
            return EnumerationReport::default();
        };

        let mut report = EnumerationReport {
            volumes: Vec::with_capacity(mounts.len()),
            skipped: Vec::new(),
            mount_table_available: true,
        };

        for mount in mounts {
            let cause = match self.source.probe(&mount) {
                Ok(raw) => match resolve(raw) {
                    Resolution::Resolved(v) => {
                        report.volumes.push(VolumeRecord::new(
                            report.volumes.len(),
                            v.name,
                            v.kind,
                            v.total_bytes,
                            v.free_bytes,
                            v.mount_path,
                            mount.path,
                        ));
                        continue;
                    }
                    Resolution::Skipped(reason) => {
                        debug!("Skipping {}: {reason}", mount.path.display());
                        SkipCause::Unresolved(reason)
                    }
                },
                Err(e) => {
                    warn!("Error retrieving volume info for {}: {e}", mount.path.display());
                    SkipCause::ProbeFailed(e.to_string())
                }
            };
            report.skipped.push(SkippedMount { mount, cause });
        }

        debug!(
            "Enumerated {} volume(s), skipped {}",
            report.volumes.len(),
            report.skipped.len()
        );
        report
    }
}
