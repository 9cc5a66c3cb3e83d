//! Daily accumulation of hourly ETo and quality-control extrema.

use eto_common::{EtoError, Field, GridShape, Result};

use crate::types::{DerivedFields, HourlyEto};

/// Hours accumulated into one daily total.
pub const HOURS_PER_DAY: usize = 24;

/// Running state for one day of hourly updates.
///
/// Owned exclusively by the orchestration loop: created before hour
/// 0, updated every hour, consumed by [`DailyAccumulator::finalize`]
/// after hour 23.
#[derive(Debug)]
pub struct DailyAccumulator {
    eto_total: Field,
    qc: Option<QcState>,
}

#[derive(Debug)]
struct QcState {
    temp_max: Field,
    temp_min: Field,
    rh_max: Field,
    rh_min: Field,
    wind_mean: Field,
    net_radiation_sum: Field,
    initialized: bool,
}

impl DailyAccumulator {
    /// Create a zeroed accumulator over `shape`, with QC tracking when
    /// `report_daily` is set.
    pub fn new(shape: GridShape, report_daily: bool) -> Self {
        let qc = report_daily.then(|| QcState {
            temp_max: Field::zeros(shape),
            temp_min: Field::zeros(shape),
            rh_max: Field::zeros(shape),
            rh_min: Field::zeros(shape),
            wind_mean: Field::zeros(shape),
            net_radiation_sum: Field::zeros(shape),
            initialized: false,
        });

        Self {
            eto_total: Field::zeros(shape),
            qc,
        }
    }

    /// Fold one hour into the running state.
    ///
    /// The first update seeds the temperature and humidity extrema
    /// from that hour's values; later updates compare element-wise.
    pub fn update(&mut self, derived: &DerivedFields, hourly: &HourlyEto) -> Result<()> {
        self.eto_total.add_assign_field(&hourly.eto)?;

        if let Some(qc) = &mut self.qc {
            if qc.initialized {
                qc.temp_max.max_assign(&derived.mean_temp_c)?;
                qc.temp_min.min_assign(&derived.mean_temp_c)?;
                qc.rh_max.max_assign(&derived.relative_humidity)?;
                qc.rh_min.min_assign(&derived.relative_humidity)?;
            } else {
                qc.temp_max = derived.mean_temp_c.clone();
                qc.temp_min = derived.mean_temp_c.clone();
                qc.rh_max = derived.relative_humidity.clone();
                qc.rh_min = derived.relative_humidity.clone();
                qc.initialized = true;
            }

            qc.wind_mean
                .add_scaled(&derived.wind_speed_2m, 1.0 / HOURS_PER_DAY as f32)?;
            qc.net_radiation_sum.add_assign_field(&derived.net_radiation)?;
        }

        Ok(())
    }

    /// Close out the day.
    ///
    /// `reference_evap` is the model's own accumulated evaporation
    /// field (SFCEVP at the final time index), required whenever QC
    /// reporting is enabled; it is carried alongside the computed
    /// total for comparison.
    pub fn finalize(self, reference_evap: Option<Field>) -> Result<DailyTotals> {
        let qc = match self.qc {
            None => None,
            Some(state) => {
                let reference_evap = reference_evap.ok_or_else(|| {
                    EtoError::dataset_open("SFCEVP", "reference evaporation field missing")
                })?;
                self.eto_total.check_shape(&reference_evap)?;

                Some(DailyQc {
                    temp_max: state.temp_max,
                    temp_min: state.temp_min,
                    rh_max: state.rh_max,
                    rh_min: state.rh_min,
                    wind_mean: state.wind_mean,
                    net_radiation_sum: state.net_radiation_sum,
                    eto_total: self.eto_total.clone(),
                    reference_evap,
                })
            }
        };

        Ok(DailyTotals {
            eto_total: self.eto_total,
            qc,
        })
    }
}

/// Finalized daily output.
#[derive(Debug, Clone)]
pub struct DailyTotals {
    /// Accumulated ETo over the 24 hours, mm.
    pub eto_total: Field,
    /// QC bundle, present when daily reporting was enabled.
    pub qc: Option<DailyQc>,
}

/// The eight QC variables written alongside the ETo total.
#[derive(Debug, Clone)]
pub struct DailyQc {
    /// Daily maximum of the mean hourly temperature, C.
    pub temp_max: Field,
    /// Daily minimum of the mean hourly temperature, C.
    pub temp_min: Field,
    /// Daily maximum relative humidity, 0..1.
    pub rh_max: Field,
    /// Daily minimum relative humidity, 0..1.
    pub rh_min: Field,
    /// Mean 2m wind speed across the day, m/s.
    pub wind_mean: Field,
    /// Accumulated net radiation, MJ/m^2.
    pub net_radiation_sum: Field,
    /// Accumulated ETo, mm (same grid as the standalone output).
    pub eto_total: Field,
    /// The model's accumulated reference evaporation, mm.
    pub reference_evap: Field,
}

impl DailyQc {
    /// Output variable names and fields, in persistence order.
    pub fn named_fields(&self) -> [(&'static str, &Field); 8] {
        [
            ("T2MAX", &self.temp_max),
            ("T2MIN", &self.temp_min),
            ("RHMAX", &self.rh_max),
            ("RHMIN", &self.rh_min),
            ("WS2MEAN", &self.wind_mean),
            ("RNSUM", &self.net_radiation_sum),
            ("ETO", &self.eto_total),
            ("SFCEVP", &self.reference_evap),
        ]
    }
}
