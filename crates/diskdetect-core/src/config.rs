/// DiskDetect configuration — `diskdetect.toml` in the user config dir.
///
/// Every section and field has a default, so a partial file (or none at
/// all) is always usable. A default file is written on first run.
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub filter: FilterConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

/// Which mount-table entries the platform source drops before probing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Filesystem types that never back a physical volume.
    pub skip_fs_types: Vec<String>,
    /// Mount directories under these prefixes are system plumbing.
    pub skip_mount_prefixes: Vec<String>,
    /// Keep loop-mounted images (snaps, ISOs) in the list.
    pub include_loop_devices: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format: "table", "json" or "csv".
    pub format: String,
    /// Width of the usage bar in table output, in characters.
    pub bar_width: usize,
}

// ── Defaults ─────────────────────────────────────────────────────────

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            skip_fs_types: [
                "proc", "sysfs", "devpts", "tmpfs", "devtmpfs", "cgroup", "cgroup2", "pstore",
                "efivarfs", "securityfs", "debugfs", "tracefs", "bpf", "hugetlbfs", "mqueue",
                "fusectl", "configfs", "binfmt_misc", "overlay", "nsfs", "rpc_pipefs", "autofs",
                "squashfs",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            skip_mount_prefixes: ["/proc", "/sys", "/dev", "/run/user", "/snap"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            include_loop_devices: false,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "table".into(),
            bar_width: 20,
        }
    }
}

impl FilterConfig {
    /// Whether a mount-table entry should be dropped before probing.
    pub fn skips(&self, device: &str, mount_dir: &Path, fs_type: &str) -> bool {
        if self.skip_fs_types.iter().any(|t| t == fs_type) {
            return true;
        }
        if self
            .skip_mount_prefixes
            .iter()
            .any(|p| mount_dir.starts_with(p))
        {
            return true;
        }
        !self.include_loop_devices && device.starts_with("/dev/loop")
    }
}

// ── Load / Save ───────────────────────────────────────────────────────

impl Config {
    /// Load the user's config, falling back to defaults.
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Config::default();
        };
        match Self::load_from(&path) {
            Ok(c) => c,
            Err(e) => {
                tracing::debug!("Using default config ({}): {e}", path.display());
                // Write defaults on first run (best-effort).
                if !path.exists() {
                    let _ = write_defaults(&path);
                }
                Config::default()
            }
        }
    }

    /// Parse a config file at an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&text)?;
        Ok(cfg)
    }

    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("diskdetect").join("diskdetect.toml"))
    }
}

fn write_defaults(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let text = toml::to_string_pretty(&Config::default())?;
    fs::write(
        path,
        format!("# DiskDetect configuration\n# Generated on first run, edit freely\n\n{text}"),
    )?;
    Ok(())
}
