//! Run configuration resolved from the command line.

use std::path::PathBuf;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Everything one daily run needs to know, passed into the
/// orchestration explicitly instead of living in globals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Also write the daily QC variables file.
    pub report_daily: bool,

    /// Root of the WRF output archive
    /// (`<archive_root>/<sector>/<run_date>` holds the domain files).
    pub archive_root: PathBuf,

    /// Where to write results; `None` means the run directory itself.
    pub output_override: Option<PathBuf>,

    /// Geographic sector identifier.
    pub sector: String,

    /// Simulation target date.
    pub run_date: NaiveDate,
}

impl RunConfig {
    /// Directory holding the `wrfout_d*` domain files for this run.
    pub fn run_dir(&self) -> PathBuf {
        self.archive_root
            .join(&self.sector)
            .join(self.run_date.format("%Y%m%d").to_string())
    }

    /// Directory results are written to.
    pub fn output_dir(&self) -> PathBuf {
        self.output_override
            .clone()
            .unwrap_or_else(|| self.run_dir())
    }
}
