//! netCDF output writing for the daily artifacts.
//!
//! Outputs are 2D float32 variables over the run's grid shape. A
//! failed write removes the partially written file so a run never
//! leaves a truncated artifact behind.

use std::path::Path;

use eto_common::{EtoError, Field, Result};
use tracing::info;

/// Dimension names used for the output grids, matching WRF's own.
const DIM_SOUTH_NORTH: &str = "south_north";
const DIM_WEST_EAST: &str = "west_east";

/// Write the named 2D fields to a new netCDF file at `path`.
///
/// All fields must share one grid shape. On any failure the partial
/// file is removed before the error is returned.
pub fn write_fields(path: &Path, fields: &[(&str, &Field)]) -> Result<()> {
    match write_fields_inner(path, fields) {
        Ok(()) => {
            info!(path = %path.display(), variables = fields.len(), "wrote output grid");
            Ok(())
        }
        Err(e) => {
            let _ = std::fs::remove_file(path);
            Err(e)
        }
    }
}

fn write_fields_inner(path: &Path, fields: &[(&str, &Field)]) -> Result<()> {
    let (_, first) = match fields.first() {
        Some(entry) => *entry,
        None => return Ok(()),
    };
    let shape = first.shape();

    let mut file = netcdf::create(path)
        .map_err(|e| EtoError::output_write(path.display().to_string(), e.to_string()))?;

    file.add_dimension(DIM_SOUTH_NORTH, shape.ny)
        .map_err(|e| EtoError::output_write(path.display().to_string(), e.to_string()))?;
    file.add_dimension(DIM_WEST_EAST, shape.nx)
        .map_err(|e| EtoError::output_write(path.display().to_string(), e.to_string()))?;

    for (name, field) in fields {
        first.check_shape(field)?;
        let mut var = file
            .add_variable::<f32>(name, &[DIM_SOUTH_NORTH, DIM_WEST_EAST])
            .map_err(|e| EtoError::output_write(path.display().to_string(), e.to_string()))?;
        var.put_values(field.data(), (.., ..))
            .map_err(|e| EtoError::output_write(path.display().to_string(), e.to_string()))?;
    }

    Ok(())
}
