/// Plain-text table with one row per volume.
use super::{visible, RenderOptions};
use crate::size::{format_percent, format_size, usage_bar};
use diskdetect_core::enumerator::EnumerationReport;
use std::io::Write;

const HEADERS: [&str; 8] = [
    "Name",
    "Type",
    "Size",
    "Source",
    "Mount Point",
    "Free",
    "Full %",
    "Usage",
];

/// Columns that read better right-aligned.
const RIGHT_ALIGNED: [bool; 8] = [false, false, true, false, false, true, true, false];

pub fn write_table<W: Write>(
    report: &EnumerationReport,
    opts: &RenderOptions,
    out: &mut W,
) -> anyhow::Result<()> {
    let rows: Vec<[String; 8]> = visible(report, opts)
        .map(|v| {
            [
                v.name().to_string(),
                v.kind().label().to_string(),
                format_size(v.total_bytes()),
                v.mount_path().to_string(),
                v.mount_point().display().to_string(),
                format_size(v.free_bytes()),
                format_percent(v.usage_ratio()),
                usage_bar(v.usage_ratio(), opts.bar_width),
            ]
        })
        .collect();

    if rows.is_empty() {
        writeln!(out, "No volumes found.")?;
    } else {
        let mut widths = HEADERS.map(|h| h.chars().count());
        for row in &rows {
            for (w, cell) in widths.iter_mut().zip(row) {
                *w = (*w).max(cell.chars().count());
            }
        }

        write_row(out, &HEADERS.map(String::from), &widths)?;
        let rule: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
        writeln!(out, "{}", rule.join("  "))?;
        for row in &rows {
            write_row(out, row, &widths)?;
        }
    }

    if opts.show_skipped && !report.skipped.is_empty() {
        writeln!(out)?;
        writeln!(out, "Skipped {} mount(s):", report.skipped.len())?;
        for s in &report.skipped {
            writeln!(
                out,
                "  {} ({}): {}",
                s.mount.path.display(),
                s.mount.device,
                s.cause
            )?;
        }
    }
    Ok(())
}

fn write_row<W: Write>(
    out: &mut W,
    cells: &[String; 8],
    widths: &[usize; 8],
) -> anyhow::Result<()> {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .zip(RIGHT_ALIGNED)
        .map(|((cell, &w), right)| {
            if right {
                format!("{cell:>w$}")
            } else {
                format!("{cell:<w$}")
            }
        })
        .collect();
    writeln!(out, "{}", padded.join("  ").trim_end())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use diskdetect_core::VolumeRecord;
    use diskdetect_core::VolumeKind;
    use std::path::PathBuf;

    fn report() -> EnumerationReport {
        EnumerationReport {
            volumes: vec![VolumeRecord::new(
                0,
                "USBStick".into(),
                VolumeKind::Removable,
                16_000_000_000,
                4_000_000_000,
                "/dev/sdb1".into(),
                PathBuf::from("/media/usb"),
            )],
            skipped: Vec::new(),
            mount_table_available: true,
        }
    }

    #[test]
    fn test_table_has_header_and_row() {
        let opts = RenderOptions {
            bar_width: 4,
            ..Default::default()
        };
        let mut buf = Vec::new();
        write_table(&report(), &opts, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Name"));
        assert!(lines[1].starts_with("--------"));
        assert!(lines[2].contains("USBStick"));
        assert!(lines[2].contains("Removable"));
        assert!(lines[2].contains("14.90 GB"));
        assert!(lines[2].contains("3.73 GB"));
        assert!(lines[2].contains("75%"));
        assert!(lines[2].ends_with("[###-]"));
    }

    #[test]
    fn test_empty_table() {
        let mut buf = Vec::new();
        let empty = EnumerationReport::default();
        write_table(&empty, &RenderOptions::default(), &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "No volumes found.\n");
    }
}
