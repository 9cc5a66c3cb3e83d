//! FAO-56 hourly reference evapotranspiration from WRF fields.
//!
//! The pipeline in this crate is purely in-memory and deterministic:
//! [`prepare`] turns the raw 22-band hourly stack into the eleven
//! derived physical fields, [`penman`] applies the FAO-56 hourly
//! Penman-Monteith formula (eq. 53), and [`daily`] accumulates the
//! hourly results into the day totals and quality-control extrema.
//!
//! Dataset access and persistence live in `wrf-reader`; orchestration
//! lives in the runner service.

pub mod daily;
pub mod penman;
pub mod prepare;
pub mod types;

pub use daily::{DailyAccumulator, DailyQc, DailyTotals, HOURS_PER_DAY};
pub use penman::hourly_eto;
pub use prepare::prepare;
pub use types::{Bookend, DerivedFields, HourlyEto, HourlyFields};
