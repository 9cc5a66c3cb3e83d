//! Persistence of the daily output artifacts.
//!
//! File names embed the source dataset's base name so downstream
//! merge tooling can associate each output with the wrfout file it
//! came from: `ETo_FAO_<basename>.nc` and `DailyVars_<basename>.nc`.

use std::path::{Path, PathBuf};

use eto_common::Result;
use eto_core::DailyTotals;
use wrf_reader::write_fields;

/// Prefix of the accumulated ETo artifact.
pub const ETO_PREFIX: &str = "ETo_FAO_";

/// Prefix of the QC variables artifact.
pub const DAILY_VARS_PREFIX: &str = "DailyVars_";

/// Path of the ETo artifact for `source_basename`.
pub fn eto_path(output_dir: &Path, source_basename: &str) -> PathBuf {
    output_dir.join(format!("{ETO_PREFIX}{source_basename}.nc"))
}

/// Path of the QC artifact for `source_basename`.
pub fn daily_vars_path(output_dir: &Path, source_basename: &str) -> PathBuf {
    output_dir.join(format!("{DAILY_VARS_PREFIX}{source_basename}.nc"))
}

/// Write the run's outputs, all or nothing.
///
/// The ETo grid is written first and the QC bundle second; if the
/// second write fails, the first artifact is removed so a failed run
/// leaves no output at all.
pub fn persist(totals: &DailyTotals, output_dir: &Path, source_basename: &str) -> Result<()> {
    let eto_file = eto_path(output_dir, source_basename);
    write_fields(&eto_file, &[("ETO", &totals.eto_total)])?;

    if let Some(qc) = &totals.qc {
        let named = qc.named_fields();
        let fields: Vec<(&str, _)> = named.iter().map(|(n, f)| (*n, *f)).collect();
        if let Err(e) = write_fields(&daily_vars_path(output_dir, source_basename), &fields) {
            let _ = std::fs::remove_file(&eto_file);
            return Err(e);
        }
    }

    Ok(())
}
