//! The 24-hour orchestration loop for one WRF domain file.
//!
//! Strictly sequential: INIT, then HOUR_0 through HOUR_23, then
//! FINALIZE. Every hour runs extract, prepare and the Penman-Monteith
//! step before folding into the daily accumulator; the accumulator's
//! read-after-write dependency across hours is why the loop never
//! reorders. Any failure aborts the whole run with no output.

use eto_common::Result;
use eto_core::{
    hourly_eto, prepare, DailyAccumulator, DailyTotals, DerivedFields, HourlyEto, HOURS_PER_DAY,
};
use tracing::debug;
use wrf_reader::{extract_stack, hourly_band_requests, WrfSource};

/// WRF's accumulated surface evaporation variable, read for QC
/// comparison only.
pub const ACCUMULATED_EVAP_VARIABLE: &str = "SFCEVP";

/// Time index of the day-total slice of the accumulated variable.
pub const ACCUMULATED_EVAP_INDEX: usize = 24;

/// Drives one source dataset through the full day.
pub struct DailyRun<'a, S: WrfSource> {
    source: &'a S,
    report_daily: bool,
}

impl<'a, S: WrfSource> DailyRun<'a, S> {
    /// Set up a run over `source`.
    pub fn new(source: &'a S, report_daily: bool) -> Self {
        Self {
            source,
            report_daily,
        }
    }

    /// Execute the 24-hour loop and finalize the totals.
    pub fn run(&self) -> Result<DailyTotals> {
        let (derived, hourly) = self.hour_step(0)?;
        let mut accumulator = DailyAccumulator::new(hourly.eto.shape(), self.report_daily);
        accumulator.update(&derived, &hourly)?;

        for hour in 1..HOURS_PER_DAY {
            let (derived, hourly) = self.hour_step(hour)?;
            accumulator.update(&derived, &hourly)?;
        }

        let reference = if self.report_daily {
            Some(
                self.source
                    .read_slice(ACCUMULATED_EVAP_VARIABLE, ACCUMULATED_EVAP_INDEX)?,
            )
        } else {
            None
        };

        accumulator.finalize(reference)
    }

    /// Extract, prepare and compute ETo for one hour.
    fn hour_step(&self, hour: usize) -> Result<(DerivedFields, HourlyEto)> {
        let stack = extract_stack(self.source, &hourly_band_requests(hour))?;
        let derived = prepare(stack)?;
        let hourly = hourly_eto(&derived)?;
        debug!(hour, "computed hourly ETo grid");
        Ok((derived, hourly))
    }
}
