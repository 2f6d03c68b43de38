/// CSV export: a header row, then one row per volume.
///
/// Skipped mounts never go into the CSV itself; with `show_skipped` they
/// are listed on `notes` (stderr in the binary).
use super::{visible, RenderOptions, VolumeRow};
use diskdetect_core::enumerator::EnumerationReport;
use std::io::Write;

pub fn write_csv<W: Write, N: Write>(
    report: &EnumerationReport,
    opts: &RenderOptions,
    out: &mut W,
    notes: &mut N,
) -> anyhow::Result<()> {
    let mut writer = ::csv::Writer::from_writer(&mut *out);
    let mut wrote_any = false;
    for v in visible(report, opts) {
        writer.serialize(VolumeRow::from(v))?;
        wrote_any = true;
    }
    if !wrote_any {
        // serde only emits the header alongside the first record.
        writer.write_record(HEADER)?;
    }
    writer.flush()?;
    drop(writer);

    if opts.show_skipped {
        for s in &report.skipped {
            writeln!(
                notes,
                "Skipped {} ({}): {}",
                s.mount.path.display(),
                s.mount.device,
                s.cause
            )?;
        }
    }
    Ok(())
}

const HEADER: [&str; 9] = [
    "id",
    "name",
    "kind",
    "total_bytes",
    "free_bytes",
    "used_bytes",
    "mount_path",
    "mount_point",
    "usage_percent",
];
