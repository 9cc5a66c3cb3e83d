//! FAO-56 Penman-Monteith hourly reference evapotranspiration
//! (paper 56, chapter 4, eq. 53).

use eto_common::{Field, Result};
use rayon::prelude::*;

use crate::prepare::KELVIN_OFFSET;
use crate::types::{DerivedFields, HourlyEto};

/// Compute the hourly ETo grid from the derived variable bundle.
///
/// Negative raw values correspond to surface dew condensation rather
/// than evapotranspiration; they are clipped to zero, which aligns
/// the accumulated totals with daily-interval reference calculations.
pub fn hourly_eto(vars: &DerivedFields) -> Result<HourlyEto> {
    let rn = &vars.net_radiation;
    rn.check_shape(&vars.ground_flux)?;
    rn.check_shape(&vars.mean_temp_c)?;
    rn.check_shape(&vars.vapor_slope)?;
    rn.check_shape(&vars.psychrometric)?;
    rn.check_shape(&vars.saturation_vapor)?;
    rn.check_shape(&vars.actual_vapor)?;
    rn.check_shape(&vars.wind_speed_2m)?;

    let n = rn.shape().len();
    let data: Vec<f32> = (0..n)
        .into_par_iter()
        .map(|i| {
            cell_eto(
                rn.data()[i],
                vars.ground_flux.data()[i],
                vars.mean_temp_c.data()[i],
                vars.vapor_slope.data()[i],
                vars.psychrometric.data()[i],
                vars.saturation_vapor.data()[i],
                vars.actual_vapor.data()[i],
                vars.wind_speed_2m.data()[i],
            )
        })
        .collect();

    Ok(HourlyEto {
        eto: Field::new(rn.shape(), data),
        latitude: vars.latitude.clone(),
        longitude: vars.longitude.clone(),
    })
}

/// Eq. 53 for one grid cell, clipped at zero.
#[allow(clippy::too_many_arguments)]
fn cell_eto(rn: f32, g_flux: f32, temp_c: f32, slope: f32, gamma: f32, es: f32, ea: f32, w2: f32) -> f32 {
    let radiation_term = 0.408 * slope * (rn - g_flux);
    let aerodynamic_term = gamma * (37.0 / (temp_c + KELVIN_OFFSET)) * w2 * (es - ea);

    let numerator = radiation_term + aerodynamic_term;
    let denominator = slope + gamma * (1.0 + 0.34 * w2);

    (numerator / denominator).max(0.0)
}
