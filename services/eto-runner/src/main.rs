//! Daily reference evapotranspiration runner.
//!
//! Scans one run directory of a WRF output archive and computes the
//! FAO-56 daily ETo grid for every `wrfout_d*` domain file it finds.
//! Domains are independent: a failure on one is logged and the rest
//! still run, but a failed domain produces no output files.

mod config;
mod output;
mod pipeline;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;
use walkdir::WalkDir;

use config::RunConfig;
use pipeline::DailyRun;
use wrf_reader::{silence_hdf5_errors, NetcdfWrfSource};

#[derive(Parser, Debug)]
#[command(name = "eto-runner")]
#[command(about = "FAO-56 daily reference evapotranspiration from WRF output")]
struct Args {
    /// Geographic sector identifier
    #[arg(short, long)]
    sector: String,

    /// Run date as YYYYMMDD (default: yesterday)
    #[arg(short, long)]
    rundate: Option<String>,

    /// Also write the daily QC variables file
    #[arg(short = 'd', long = "daily")]
    daily: bool,

    /// Root of the WRF output archive
    #[arg(long, default_value = "/var/lib/wrf/output")]
    archive_root: PathBuf,

    /// Where to write results (default: the run directory)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    silence_hdf5_errors();

    let run_date = match &args.rundate {
        Some(s) => NaiveDate::parse_from_str(s, "%Y%m%d")
            .with_context(|| format!("rundate {s:?} is not YYYYMMDD"))?,
        None => yesterday()?,
    };

    let config = RunConfig {
        report_daily: args.daily,
        archive_root: args.archive_root,
        output_override: args.output_dir,
        sector: args.sector,
        run_date,
    };

    let run_dir = config.run_dir();
    anyhow::ensure!(
        run_dir.is_dir(),
        "run directory {} does not exist",
        run_dir.display()
    );

    let domains = find_domain_files(&run_dir)?;
    if domains.is_empty() {
        anyhow::bail!("no wrfout_d* files in {}", run_dir.display());
    }

    info!(
        sector = %config.sector,
        run_date = %config.run_date,
        domains = domains.len(),
        "starting daily ETo run"
    );

    let mut failures = 0;
    for path in &domains {
        info!(file = %path.display(), "calculating ETo");
        if let Err(e) = process_domain(&config, path) {
            error!(file = %path.display(), error = %e, "domain failed, continuing");
            failures += 1;
        }
    }

    if failures > 0 {
        anyhow::bail!("{failures} of {} domains failed", domains.len());
    }

    info!("daily ETo run complete");
    Ok(())
}

/// Previous calendar day in local time.
fn yesterday() -> Result<NaiveDate> {
    Local::now()
        .date_naive()
        .pred_opt()
        .context("cannot compute yesterday's date")
}

/// All `wrfout_d*` files directly inside `run_dir`, sorted by name.
fn find_domain_files(run_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(run_dir).min_depth(1).max_depth(1) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        if entry
            .file_name()
            .to_string_lossy()
            .starts_with("wrfout_d")
        {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}

/// Run the full pipeline for one domain file and persist its outputs.
fn process_domain(config: &RunConfig, path: &Path) -> Result<()> {
    let source = NetcdfWrfSource::open(path)?;
    let totals = DailyRun::new(&source, config.report_daily).run()?;

    let basename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .with_context(|| format!("{} has no file name", path.display()))?;

    output::persist(&totals, &config.output_dir(), &basename)?;
    Ok(())
}
