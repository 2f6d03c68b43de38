/// One-shot JSON snapshot of the enumerated volumes.
use super::{visible, RenderOptions, SkippedRow, VolumeRow};
use diskdetect_core::enumerator::EnumerationReport;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct Snapshot<'a> {
    timestamp: String,
    volumes: Vec<VolumeRow<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    skipped: Option<Vec<SkippedRow>>,
}

pub fn write_json<W: Write>(
    report: &EnumerationReport,
    opts: &RenderOptions,
    out: &mut W,
) -> anyhow::Result<()> {
    let snapshot = Snapshot {
        timestamp: chrono::Local::now().to_rfc3339(),
        volumes: visible(report, opts).map(VolumeRow::from).collect(),
        skipped: opts
            .show_skipped
            .then(|| report.skipped.iter().map(SkippedRow::from).collect()),
    };
    serde_json::to_writer_pretty(&mut *out, &snapshot)?;
    writeln!(out)?;
    Ok(())
}
