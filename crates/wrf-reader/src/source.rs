//! Read access to time-indexed WRF output variables.

use eto_common::{Field, Result};

/// Number of hourly time steps in one WRF daily run (hours 0 through 24).
pub const TIME_STEPS: usize = 25;

/// A gridded WRF output dataset addressable by (variable, time index).
///
/// Implementations are read-only; the dataset is external state that
/// extraction never modifies.
pub trait WrfSource {
    /// Number of time steps the dataset exposes per forecast variable.
    fn time_steps(&self) -> usize {
        TIME_STEPS
    }

    /// Read the 2D slice of `variable` at `time_index`.
    ///
    /// Fails with `DatasetOpen` if the variable cannot be located,
    /// `TimeIndexOutOfRange` if the index is outside the dataset's
    /// step range, and `InvalidDataType` if the stored values are not
    /// 32-bit floats.
    fn read_slice(&self, variable: &str, time_index: usize) -> Result<Field>;
}
