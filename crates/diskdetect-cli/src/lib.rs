/// DiskDetect CLI — argument handling and rendering of volume reports.
///
/// The core crate does the enumeration; this crate decides how often to
/// call it and how to show the result.
pub mod args;
pub mod output;
pub mod size;

pub use args::{Cli, OutputFormat};
pub use output::{render, RenderOptions};

use anyhow::Result;
use diskdetect_core::{Config, VolumeEnumerator};
use std::io::Write;
use std::time::Duration;

/// ANSI clear-screen + cursor-home, used between table refreshes.
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Run the CLI with parsed arguments.
pub fn run(cli: &Cli) -> Result<()> {
    let config = Config::load();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let mut notes = std::io::stderr();

    if cli.print_config {
        return print_config(&config, &mut out);
    }

    let opts = render_options(cli, &config);
    let enumerator = VolumeEnumerator::system(&config);

    match cli.watch {
        None => {
            let report = enumerator.enumerate_with_report();
            render(&report, &opts, &mut out, &mut notes)?;
        }
        Some(secs) => {
            let tick = Duration::from_secs(secs.max(1));
            tracing::info!("Refreshing every {}s", tick.as_secs());
            loop {
                let report = enumerator.enumerate_with_report();
                if opts.format == OutputFormat::Table {
                    write!(out, "{CLEAR_SCREEN}")?;
                    writeln!(out, "{}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"))?;
                }
                render(&report, &opts, &mut out, &mut notes)?;
                out.flush()?;
                std::thread::sleep(tick);
            }
        }
    }
    Ok(())
}

/// Merge command-line flags over config-file defaults.
pub fn render_options(cli: &Cli, config: &Config) -> RenderOptions {
    let format = cli
        .format
        .or_else(|| OutputFormat::from_config(&config.output.format))
        .unwrap_or_default();
    RenderOptions {
        format,
        removable_only: cli.removable_only,
        show_skipped: cli.show_skipped,
        bar_width: config.output.bar_width,
    }
}

fn print_config<W: Write>(cfg: &Config, out: &mut W) -> Result<()> {
    let path = Config::config_path()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_else(|| "(unknown)".to_string());
    writeln!(out, "Config: {path}")?;
    writeln!(out)?;
    writeln!(out, "[filter]")?;
    writeln!(out, "  skip_fs_types        = {:?}", cfg.filter.skip_fs_types)?;
    writeln!(out, "  skip_mount_prefixes  = {:?}", cfg.filter.skip_mount_prefixes)?;
    writeln!(out, "  include_loop_devices = {}", cfg.filter.include_loop_devices)?;
    writeln!(out)?;
    writeln!(out, "[output]")?;
    writeln!(out, "  format    = {}", cfg.output.format)?;
    writeln!(out, "  bar_width = {}", cfg.output.bar_width)?;
    Ok(())
}
