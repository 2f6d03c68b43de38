/// Renderers for an enumeration report: text table, JSON and CSV.
///
/// Renderers write to any `io::Write` so tests can capture output in a
/// buffer. Filtering (`--removable-only`) happens here, not in the core.
pub mod csv;
pub mod json;
pub mod table;

use crate::args::OutputFormat;
use diskdetect_core::enumerator::{EnumerationReport, SkippedMount};
use diskdetect_core::{VolumeKind, VolumeRecord};
use serde::Serialize;
use std::io::Write;

/// How a report should be rendered.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub format: OutputFormat,
    pub removable_only: bool,
    pub show_skipped: bool,
    pub bar_width: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            format: OutputFormat::Table,
            removable_only: false,
            show_skipped: false,
            bar_width: 20,
        }
    }
}

/// Flattened, serialisable view of one record, shared by JSON and CSV.
#[derive(Debug, Serialize)]
pub struct VolumeRow<'a> {
    pub id: usize,
    pub name: &'a str,
    pub kind: VolumeKind,
    pub total_bytes: u64,
    pub free_bytes: u64,
    pub used_bytes: u64,
    pub mount_path: &'a str,
    pub mount_point: String,
    /// Rounded to two decimals.
    pub usage_percent: f64,
}

impl<'a> From<&'a VolumeRecord> for VolumeRow<'a> {
    fn from(v: &'a VolumeRecord) -> Self {
        Self {
            id: v.id(),
            name: v.name(),
            kind: v.kind(),
            total_bytes: v.total_bytes(),
            free_bytes: v.free_bytes(),
            used_bytes: v.used_bytes(),
            mount_path: v.mount_path(),
            mount_point: v.mount_point().to_string_lossy().into_owned(),
            usage_percent: (v.usage_percent() * 100.0).round() / 100.0,
        }
    }
}

/// Serialisable view of a skipped mount.
#[derive(Debug, Serialize)]
pub struct SkippedRow {
    pub mount_point: String,
    pub source: String,
    pub reason: String,
}

impl From<&SkippedMount> for SkippedRow {
    fn from(s: &SkippedMount) -> Self {
        Self {
            mount_point: s.mount.path.to_string_lossy().into_owned(),
            source: s.mount.device.clone(),
            reason: s.cause.to_string(),
        }
    }
}

/// Records that pass the render filters, in enumeration order.
pub fn visible<'a>(
    report: &'a EnumerationReport,
    opts: &RenderOptions,
) -> impl Iterator<Item = &'a VolumeRecord> {
    let removable_only = opts.removable_only;
    report
        .volumes
        .iter()
        .filter(move |v| !removable_only || v.kind() == VolumeKind::Removable)
}

/// Render `report` in the selected format.
///
/// Formats that cannot carry the skipped-mount list inline (CSV) write it
/// to `notes` instead.
pub fn render<W: Write, N: Write>(
    report: &EnumerationReport,
    opts: &RenderOptions,
    out: &mut W,
    notes: &mut N,
) -> anyhow::Result<()> {
    match opts.format {
        OutputFormat::Table => table::write_table(report, opts, out),
        OutputFormat::Json => json::write_json(report, opts, out),
        OutputFormat::Csv => csv::write_csv(report, opts, out, notes),
    }
}
