/// Errors raised while probing a single mount.
///
/// None of these ever reach the caller of `enumerate()`: the enumerator
/// logs them against the mount path and moves on to the next volume.
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    /// A file under /sys, /dev or /proc could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// `statvfs` failed for the mount directory.
    #[error("statvfs failed for {}: {source}", .path.display())]
    Statvfs {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A Win32 volume query failed.
    #[error("{call} failed for {}: {message}", .path.display())]
    Win32 {
        call: &'static str,
        path: PathBuf,
        message: String,
    },
}

impl ProbeError {
    /// The mount directory or file the failure relates to.
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Io { path, .. } => path,
            Self::Statvfs { path, .. } => path,
            Self::Win32 { path, .. } => path,
        }
    }
}
