//! WRF netCDF dataset access.
//!
//! This crate covers the dataset-I/O boundary of the pipeline: the
//! [`WrfSource`] trait for time-indexed variable reads, the band
//! extractor that stacks the 22 hourly input slices, the native
//! netCDF implementation backed by libnetcdf/HDF5, and the writer
//! that persists the daily output grids.

pub mod extract;
pub mod native;
pub mod source;
pub mod writer;

pub use extract::{extract_stack, hourly_band_requests, BandRequest, HOURLY_VARIABLES};
pub use native::{silence_hdf5_errors, NetcdfWrfSource};
pub use source::{WrfSource, TIME_STEPS};
pub use writer::write_fields;
