//! End-to-end check of the canonical synthetic hour against
//! independently hand-computed values.
//!
//! Bookends: TSK 300/302 K, EMISS 0.96, SWDOWN 400/420 W/m^2,
//! GLW 350 W/m^2, GRDFLX 20 W/m^2, T2 295/296 K, PSFC 90 kPa,
//! Q2 0.01 kg/kg, U10 2/2.2 m/s, V10 1/1.1 m/s.

use eto_common::GridShape;
use eto_core::{hourly_eto, prepare};
use test_utils::SyntheticHour;

fn assert_uniform(field: &eto_common::Field, expected: f32, tol: f32, what: &str) {
    for &v in field.data() {
        assert!(
            (v - expected).abs() < tol,
            "{what}: got {v}, expected {expected}"
        );
    }
}

#[test]
fn derived_bands_match_hand_computed_values() {
    let shape = GridShape::new(2, 2);
    let derived = prepare(SyntheticHour::default().to_stack(shape)).unwrap();

    // Rlu = 0.96 * 5.67e-8 * 301^4 = 446.81 W/m^2
    // Rn = 410*0.77 + 350 - Rlu = 218.89 W/m^2 -> MJ/(m^2 hr)
    assert_uniform(&derived.net_radiation, 0.78801, 1e-3, "net radiation");
    assert_uniform(&derived.ground_flux, 0.072, 1e-5, "ground flux");
    // (295 + 296)/2 - 273.16
    assert_uniform(&derived.mean_temp_c, 22.34, 1e-4, "mean temp");
    assert_uniform(&derived.vapor_slope, 0.16410, 5e-4, "vapor slope");
    // 0.000665 * 90 kPa
    assert_uniform(&derived.psychrometric, 0.05985, 1e-6, "psychrometric");
    assert_uniform(&derived.saturation_vapor, 2.6992, 2e-3, "saturation vapor");
    assert_uniform(&derived.relative_humidity, 0.53611, 1e-3, "relative humidity");
    assert_uniform(&derived.actual_vapor, 1.4471, 2e-3, "actual vapor");
    assert_uniform(&derived.wind_speed_2m, 1.75609, 1e-3, "wind speed");
    assert_uniform(&derived.latitude, 40.0, 0.0, "latitude");
    assert_uniform(&derived.longitude, -105.0, 0.0, "longitude");
}

#[test]
fn scenario_eto_matches_the_hand_computed_cell() {
    let shape = GridShape::new(2, 2);
    let derived = prepare(SyntheticHour::default().to_stack(shape)).unwrap();
    let hourly = hourly_eto(&derived).unwrap();

    // numerator   = 0.408*0.16410*(0.78801-0.072)
    //             + 0.05985*(37/295.5)*1.75609*(2.6992-1.4471)
    // denominator = 0.16410 + 0.05985*(1 + 0.34*1.75609)
    assert_uniform(&hourly.eto, 0.24806, 1e-3, "hourly ETo");
}

#[test]
fn pipeline_is_deterministic_band_by_band() {
    let shape = GridShape::new(2, 2);
    let first = prepare(SyntheticHour::default().to_stack(shape)).unwrap();
    let second = prepare(SyntheticHour::default().to_stack(shape)).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        hourly_eto(&first).unwrap(),
        hourly_eto(&second).unwrap()
    );
}
