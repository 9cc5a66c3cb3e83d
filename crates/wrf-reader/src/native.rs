//! Native WRF file reading using the netcdf library.
//!
//! WRF writes its hourly output as netCDF-4 (HDF5-backed) files with
//! one `Time` record per hour and 2D forecast slices laid out as
//! `(Time, south_north, west_east)`. The static coordinate variables
//! `XLAT`/`XLONG` carry the same layout; the pipeline only ever reads
//! their first record.

use std::path::{Path, PathBuf};
use std::sync::Once;

use eto_common::{EtoError, Field, GridShape, Result};
use netcdf::types::{FloatType, NcVariableType};

use crate::source::WrfSource;

/// Silence HDF5's automatic error printing to stderr.
///
/// The HDF5 C library prints verbose error messages to stderr even
/// when errors are handled gracefully by the Rust code. This disables
/// that output by calling H5Eset_auto2 with null handlers. It only
/// needs to happen once per process but is safe to call repeatedly.
///
/// Call this early in `main()`, before any netCDF operations occur.
pub fn silence_hdf5_errors() {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        // SAFETY: H5Eset_auto2 is thread-safe and null handlers are a
        // documented way to disable error output.
        unsafe {
            hdf5_metno_sys::h5e::H5Eset_auto2(
                hdf5_metno_sys::h5e::H5E_DEFAULT,
                None,
                std::ptr::null_mut(),
            );
        }
    });
}

/// A WRF output file opened read-only through libnetcdf.
pub struct NetcdfWrfSource {
    file: netcdf::File,
    path: PathBuf,
}

impl NetcdfWrfSource {
    /// Open the WRF output file at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        silence_hdf5_errors();

        let path = path.as_ref().to_path_buf();
        let file = netcdf::open(&path)
            .map_err(|e| EtoError::dataset_open(path.display().to_string(), e.to_string()))?;

        Ok(Self { file, path })
    }

    /// Path this source was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl WrfSource for NetcdfWrfSource {
    fn read_slice(&self, variable: &str, time_index: usize) -> Result<Field> {
        let var = self
            .file
            .variable(variable)
            .ok_or_else(|| EtoError::dataset_open(variable, "no such variable"))?;

        // reject anything but float32 before reading any values
        let vartype = var.vartype();
        if !matches!(vartype, NcVariableType::Float(FloatType::F32)) {
            return Err(EtoError::invalid_data_type(variable, format!("{vartype:?}")));
        }

        let dims = var.dimensions();
        let (shape, values) = match dims.len() {
            // (Time, south_north, west_east)
            3 => {
                let steps = dims[0].len();
                if time_index >= steps {
                    return Err(EtoError::TimeIndexOutOfRange {
                        variable: variable.to_string(),
                        index: time_index,
                        steps,
                    });
                }
                let shape = GridShape::new(dims[1].len(), dims[2].len());
                let values = var
                    .get_values::<f32, _>((time_index, .., ..))
                    .map_err(|e| EtoError::dataset_open(variable, e.to_string()))?;
                (shape, values)
            }
            // static 2D variable without a time axis
            2 => {
                let shape = GridShape::new(dims[0].len(), dims[1].len());
                let values = var
                    .get_values::<f32, _>((.., ..))
                    .map_err(|e| EtoError::dataset_open(variable, e.to_string()))?;
                (shape, values)
            }
            n => {
                return Err(EtoError::dataset_open(
                    variable,
                    format!("expected 2 or 3 dimensions, found {n}"),
                ));
            }
        };

        Ok(Field::new(shape, values))
    }
}
