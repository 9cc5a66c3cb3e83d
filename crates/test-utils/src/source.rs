//! An in-memory WRF source for orchestration tests.

use std::collections::HashMap;

use eto_common::{EtoError, Field, GridShape, Result};
use wrf_reader::{WrfSource, TIME_STEPS};

/// A [`WrfSource`] backed by per-step constant values.
///
/// Each variable maps to one value per time step; a read returns a
/// uniform field over the source's grid shape. Unknown variables fail
/// the same way the netCDF reader does, so the orchestrator's error
/// paths can be exercised without on-disk files.
#[derive(Debug, Clone)]
pub struct MemorySource {
    shape: GridShape,
    time_steps: usize,
    variables: HashMap<String, Vec<f32>>,
}

impl MemorySource {
    /// Create an empty source over `shape` with `time_steps` steps.
    pub fn new(shape: GridShape, time_steps: usize) -> Self {
        Self {
            shape,
            time_steps,
            variables: HashMap::new(),
        }
    }

    /// Register a variable with the same value at every step.
    pub fn with_constant(self, name: &str, value: f32) -> Self {
        self.with_profile(name, move |_| value)
    }

    /// Register a variable whose per-step value comes from `profile`.
    pub fn with_profile(mut self, name: &str, profile: impl Fn(usize) -> f32) -> Self {
        let values = (0..self.time_steps).map(profile).collect();
        self.variables.insert(name.to_string(), values);
        self
    }

    /// A complete synthetic day: every variable the pipeline requests,
    /// with simple diurnal profiles.
    pub fn synthetic_day(shape: GridShape) -> Self {
        let diurnal = |t: usize| (std::f32::consts::PI * t as f32 / 24.0).sin();

        Self::new(shape, TIME_STEPS)
            .with_profile("TSK", move |t| 296.0 + 6.0 * diurnal(t))
            .with_constant("EMISS", 0.96)
            .with_profile("SWDOWN", move |t| 800.0 * diurnal(t).max(0.0))
            .with_constant("GLW", 340.0)
            .with_constant("GRDFLX", 15.0)
            .with_profile("T2", move |t| 290.0 + 8.0 * diurnal(t))
            .with_constant("PSFC", 90_000.0)
            .with_constant("Q2", 0.008)
            .with_profile("U10", |t| 2.0 + 0.05 * t as f32)
            .with_constant("V10", 1.0)
            .with_constant("XLAT", 40.0)
            .with_constant("XLONG", -105.0)
            .with_profile("SFCEVP", |t| 0.2 * t as f32)
    }

    /// Remove a variable, e.g. to simulate a truncated dataset.
    pub fn without(mut self, name: &str) -> Self {
        self.variables.remove(name);
        self
    }
}

impl WrfSource for MemorySource {
    fn time_steps(&self) -> usize {
        self.time_steps
    }

    fn read_slice(&self, variable: &str, time_index: usize) -> Result<Field> {
        let values = self
            .variables
            .get(variable)
            .ok_or_else(|| EtoError::dataset_open(variable, "no such variable"))?;
        let value = values.get(time_index).copied().ok_or_else(|| {
            EtoError::TimeIndexOutOfRange {
                variable: variable.to_string(),
                index: time_index,
                steps: self.time_steps,
            }
        })?;
        Ok(Field::filled(self.shape, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synthetic_day_serves_every_pipeline_variable() {
        let source = MemorySource::synthetic_day(GridShape::new(2, 2));
        for variable in wrf_reader::HOURLY_VARIABLES {
            source.read_slice(variable, 0).unwrap();
            source.read_slice(variable, 24).unwrap();
        }
        source.read_slice("XLAT", 0).unwrap();
        source.read_slice("XLONG", 0).unwrap();
        source.read_slice("SFCEVP", 24).unwrap();
    }

    #[test]
    fn missing_variable_matches_the_netcdf_error_path() {
        let source = MemorySource::synthetic_day(GridShape::new(1, 1)).without("Q2");
        let err = source.read_slice("Q2", 3).unwrap_err();
        assert!(matches!(err, EtoError::DatasetOpen { .. }));
    }
}
