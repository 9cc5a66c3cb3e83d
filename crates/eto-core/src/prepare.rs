//! Derivation of the eleven FAO-56 input fields from the raw hourly
//! WRF bands.
//!
//! Every bookended variable is averaged to a mid-hour value first;
//! the closed-form equations below then run cell by cell across the
//! grid. Nothing is clamped here except relative humidity; physically
//! questionable values propagate and are clipped at the ETo stage
//! only.

use eto_common::{BandStack, Field, Result};
use rayon::prelude::*;

use crate::types::{Bookend, DerivedFields, HourlyFields};

/// Shortwave reflection coefficient for the short-green-grass
/// reference surface.
pub const ALBEDO: f32 = 0.23;

/// Stefan-Boltzmann constant, W/(m^2 K^4).
pub const SIGMA: f32 = 5.67e-8;

/// Kelvin offset used throughout FAO-56 (273.16, not 273.15).
pub const KELVIN_OFFSET: f32 = 273.16;

/// W/m^2 to MJ/(m^2 hr): 3600 seconds per hour over 1e6 J per MJ.
const WM2_TO_MJ_PER_HR: f32 = 3600.0 / 1.0e6;

/// Height of the WRF wind components above ground, m.
const WIND_HEIGHT_M: f32 = 10.0;

/// Turn a 22-band hourly input stack into the derived variable
/// bundle.
///
/// Fails with `InvalidBandCount` unless the stack carries exactly 22
/// bands. The output field order of the original band layout is
/// preserved as named fields on [`DerivedFields`].
pub fn prepare(stack: BandStack) -> Result<DerivedFields> {
    let fields = HourlyFields::from_stack(stack)?;

    let skin_temp = fields.skin_temp.midpoint()?;
    let emissivity = fields.emissivity.midpoint()?;
    let shortwave = fields.shortwave_down.midpoint()?;
    let longwave = fields.longwave_down.midpoint()?;

    let net_radiation = net_radiation(&shortwave, &longwave, &skin_temp, &emissivity)?;

    let ground_flux = fields
        .ground_flux
        .midpoint()?
        .map(|g| g * WM2_TO_MJ_PER_HR);

    let temp_k = fields.temp_2m.midpoint()?;
    let mean_temp_c = temp_k.map(|t| t - KELVIN_OFFSET);

    let vapor_slope = mean_temp_c.map(vapor_pressure_slope);

    let pressure = fields.surface_pressure.midpoint()?;
    let psychrometric = pressure.map(psychrometric_constant);

    let humidity = fields.specific_humidity.midpoint()?;
    let saturation_vapor = mean_temp_c.map(saturation_vapor_pressure);
    let relative_humidity = relative_humidity(&humidity, &temp_k, &pressure)?;
    let actual_vapor = saturation_vapor.zip_with(&relative_humidity, |es, rh| es * rh)?;

    let wind_speed_2m = wind_speed_2m(&fields.wind_u10, &fields.wind_v10)?;

    Ok(DerivedFields {
        net_radiation,
        ground_flux,
        mean_temp_c,
        vapor_slope,
        psychrometric,
        saturation_vapor,
        relative_humidity,
        actual_vapor,
        wind_speed_2m,
        latitude: fields.latitude,
        longitude: fields.longitude,
    })
}

/// Mean hourly net radiation, MJ/(m^2 hr).
///
/// Rn = Rsd*(1 - albedo) + Rld - Rlu, with the upward longwave term
/// from the Stefan-Boltzmann law over the skin temperature and WRF's
/// own emissivity. Radiation toward the surface is positive.
fn net_radiation(
    shortwave: &Field,
    longwave: &Field,
    skin_temp: &Field,
    emissivity: &Field,
) -> Result<Field> {
    shortwave.check_shape(longwave)?;
    shortwave.check_shape(skin_temp)?;
    shortwave.check_shape(emissivity)?;

    let data: Vec<f32> = shortwave
        .data()
        .par_iter()
        .zip(longwave.data().par_iter())
        .zip(skin_temp.data().par_iter())
        .zip(emissivity.data().par_iter())
        .map(|(((&rsd, &rld), &tsk), &emiss)| {
            let rlu = emiss * SIGMA * tsk.powi(4);
            let rn = rsd * (1.0 - ALBEDO) + rld - rlu;
            rn * WM2_TO_MJ_PER_HR
        })
        .collect();

    Ok(Field::new(shortwave.shape(), data))
}

/// Slope of the saturation vapor pressure curve at `temp_c`, kPa/C
/// (FAO-56 eq. 13).
fn vapor_pressure_slope(temp_c: f32) -> f32 {
    let num = 4098.0 * (0.6108 * (17.27 * temp_c / (temp_c + 237.3)).exp());
    let denom = (temp_c + 237.3) * (temp_c + 237.3);
    num / denom
}

/// Psychrometric constant from surface pressure in Pa, kPa/C
/// (FAO-56 eq. 8).
fn psychrometric_constant(pressure_pa: f32) -> f32 {
    0.000665 * pressure_pa / 1000.0
}

/// Saturation vapor pressure at `temp_c`, kPa (FAO-56 eq. 11).
fn saturation_vapor_pressure(temp_c: f32) -> f32 {
    0.6108 * (17.27 * temp_c / (temp_c + 237.3)).exp()
}

/// Relative humidity from mixing ratio (kg/kg), temperature (K) and
/// surface pressure (Pa), clipped to [0, 1].
fn relative_humidity(humidity: &Field, temp_k: &Field, pressure: &Field) -> Result<Field> {
    humidity.check_shape(temp_k)?;
    humidity.check_shape(pressure)?;

    const PQ0: f32 = 379.90516;
    const A2: f32 = 17.2693882;
    const A3: f32 = 273.16;
    const A4: f32 = 35.86;

    let data: Vec<f32> = humidity
        .data()
        .par_iter()
        .zip(temp_k.data().par_iter())
        .zip(pressure.data().par_iter())
        .map(|((&q, &t), &p)| {
            let rh = q / ((PQ0 / p) * (A2 * (t - A3) / (t - A4)).exp());
            rh.clamp(0.0, 1.0)
        })
        .collect();

    Ok(Field::new(humidity.shape(), data))
}

/// Logarithmic wind profile rescaling factor from height `h` down to
/// 2m (FAO-56 eq. 47).
fn wind_profile_factor(h: f32) -> f32 {
    4.87 / (67.8 * h - 5.42).ln()
}

/// Mean hourly wind speed at 2m height.
///
/// Each bookend's components are rescaled to 2m and combined into a
/// magnitude; the two magnitudes are then averaged. Averaging the
/// magnitudes, not the components, is deliberate: opposing endpoint
/// vectors must not cancel into a calm hour.
fn wind_speed_2m(u10: &Bookend, v10: &Bookend) -> Result<Field> {
    let factor = wind_profile_factor(WIND_HEIGHT_M);

    let start = u10
        .start
        .zip_with(&v10.start, |u, v| magnitude(u * factor, v * factor))?;
    let end = u10
        .end
        .zip_with(&v10.end, |u, v| magnitude(u * factor, v * factor))?;

    start.average(&end)
}

fn magnitude(u: f32, v: f32) -> f32 {
    (u * u + v * v).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use eto_common::{EtoError, GridShape};
    use test_utils::SyntheticHour;

    fn scenario_stack() -> BandStack {
        SyntheticHour::default().to_stack(GridShape::new(2, 2))
    }

    #[test]
    fn mean_temp_is_bookend_average_minus_kelvin_offset() {
        let derived = prepare(scenario_stack()).unwrap();
        // (295 + 296) / 2 - 273.16
        let expected = (295.0f32 + 296.0) / 2.0 - 273.16;
        for &t in derived.mean_temp_c.data() {
            assert!((t - expected).abs() < 1e-4, "got {t}, expected {expected}");
        }
    }

    #[test]
    fn twenty_one_bands_fail_with_invalid_band_count() {
        let mut stack = scenario_stack();
        // rebuild without the final longitude band
        let mut short = BandStack::new();
        for i in 0..21 {
            short
                .push(stack.name(i).unwrap().to_string(), stack.band(i).unwrap().clone())
                .unwrap();
        }
        stack = short;
        match prepare(stack) {
            Err(EtoError::InvalidBandCount { expected, found }) => {
                assert_eq!(expected, 22);
                assert_eq!(found, 21);
            }
            other => panic!("expected InvalidBandCount, got {other:?}"),
        }
    }

    #[test]
    fn relative_humidity_is_clamped() {
        let shape = GridShape::new(1, 1);

        let mut dry = SyntheticHour::default();
        dry.specific_humidity = (0.0, 0.0);
        let derived = prepare(dry.to_stack(shape)).unwrap();
        assert_eq!(derived.relative_humidity.data(), &[0.0]);

        let mut soaked = SyntheticHour::default();
        soaked.specific_humidity = (10.0, 10.0);
        let derived = prepare(soaked.to_stack(shape)).unwrap();
        assert_eq!(derived.relative_humidity.data(), &[1.0]);
    }

    #[test]
    fn actual_vapor_is_saturation_times_humidity() {
        let derived = prepare(scenario_stack()).unwrap();
        for i in 0..derived.shape().len() {
            let es = derived.saturation_vapor.data()[i];
            let rh = derived.relative_humidity.data()[i];
            assert_eq!(derived.actual_vapor.data()[i], es * rh);
        }
    }

    #[test]
    fn wind_magnitudes_are_rescaled_then_averaged() {
        let shape = GridShape::new(1, 1);
        let mut hour = SyntheticHour::default();
        hour.wind_u10 = (3.0, 3.0);
        hour.wind_v10 = (4.0, 4.0);
        let derived = prepare(hour.to_stack(shape)).unwrap();

        let factor = 4.87 / (67.8f32 * 10.0 - 5.42).ln();
        let expected = 5.0 * factor;
        let got = derived.wind_speed_2m.data()[0];
        assert!((got - expected).abs() < 1e-5, "got {got}, expected {expected}");
    }

    #[test]
    fn net_radiation_follows_stefan_boltzmann() {
        let shape = GridShape::new(1, 1);
        let mut hour = SyntheticHour::default();
        hour.skin_temp = (300.0, 300.0);
        hour.emissivity = (1.0, 1.0);
        hour.shortwave_down = (0.0, 0.0);
        hour.longwave_down = (0.0, 0.0);
        let derived = prepare(hour.to_stack(shape)).unwrap();

        let rlu = 5.67e-8f32 * 300.0f32.powi(4);
        let expected = -rlu * 3600.0 / 1.0e6;
        let got = derived.net_radiation.data()[0];
        assert!((got - expected).abs() < 1e-5, "got {got}, expected {expected}");
    }

    #[test]
    fn prepare_is_a_pure_function() {
        let a = prepare(scenario_stack()).unwrap();
        let b = prepare(scenario_stack()).unwrap();
        assert_eq!(a, b);
    }
}
