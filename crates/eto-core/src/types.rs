//! Named-field records for the hourly pipeline stages.
//!
//! Bare band offsets exist only at the dataset-I/O boundary; once a
//! stack crosses into this crate it becomes one of these records and
//! every physical quantity is addressed by name.

use eto_common::{BandStack, EtoError, Field, GridShape, Result};

/// One physical variable sampled at both ends of an hour.
#[derive(Debug, Clone)]
pub struct Bookend {
    pub start: Field,
    pub end: Field,
}

impl Bookend {
    /// Mid-hour approximation: the mean of the two endpoint slices.
    pub fn midpoint(&self) -> Result<Field> {
        self.start.average(&self.end)
    }
}

/// The 22-band hourly input, as named fields.
///
/// Wire band order is bookend pairs for TSK, EMISS, SWDOWN, GLW,
/// GRDFLX, T2, PSFC, Q2, U10, V10, then the static XLAT and XLONG
/// slices.
#[derive(Debug, Clone)]
pub struct HourlyFields {
    /// Surface skin temperature (K).
    pub skin_temp: Bookend,
    /// Surface emissivity.
    pub emissivity: Bookend,
    /// Downward shortwave radiation at ground (W/m^2).
    pub shortwave_down: Bookend,
    /// Downward longwave radiation at ground (W/m^2).
    pub longwave_down: Bookend,
    /// Ground heat flux (W/m^2).
    pub ground_flux: Bookend,
    /// Temperature at 2m (K).
    pub temp_2m: Bookend,
    /// Surface pressure (Pa).
    pub surface_pressure: Bookend,
    /// Water vapor mixing ratio at 2m (kg/kg).
    pub specific_humidity: Bookend,
    /// Wind component U at 10m (m/s).
    pub wind_u10: Bookend,
    /// Wind component V at 10m (m/s).
    pub wind_v10: Bookend,
    /// Latitude (decimal degrees).
    pub latitude: Field,
    /// Longitude (decimal degrees).
    pub longitude: Field,
}

impl HourlyFields {
    /// Bands an hourly input stack must carry.
    pub const BAND_COUNT: usize = 22;

    /// Convert from the positional stack the extractor produces.
    ///
    /// Fails with `InvalidBandCount` for anything other than exactly
    /// 22 bands.
    pub fn from_stack(stack: BandStack) -> Result<Self> {
        stack.expect_bands(Self::BAND_COUNT)?;

        let mut bands = stack.into_bands();
        bands.reverse();
        let mut take = || {
            bands.pop().ok_or(EtoError::InvalidBandCount {
                expected: Self::BAND_COUNT,
                found: 0,
            })
        };
        let mut pair = || -> Result<Bookend> {
            Ok(Bookend {
                start: take()?,
                end: take()?,
            })
        };

        Ok(Self {
            skin_temp: pair()?,
            emissivity: pair()?,
            shortwave_down: pair()?,
            longwave_down: pair()?,
            ground_flux: pair()?,
            temp_2m: pair()?,
            surface_pressure: pair()?,
            specific_humidity: pair()?,
            wind_u10: pair()?,
            wind_v10: pair()?,
            latitude: take()?,
            longitude: take()?,
        })
    }
}

/// The eleven derived fields feeding the Penman-Monteith formula.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedFields {
    /// Mean hourly net radiation, MJ/(m^2 hr).
    pub net_radiation: Field,
    /// Mean hourly ground heat flux, MJ/(m^2 hr).
    pub ground_flux: Field,
    /// Mean hourly air temperature, C.
    pub mean_temp_c: Field,
    /// Slope of the saturation vapor pressure curve, kPa/C.
    pub vapor_slope: Field,
    /// Psychrometric constant, kPa/C.
    pub psychrometric: Field,
    /// Saturation vapor pressure at the mean temperature, kPa.
    pub saturation_vapor: Field,
    /// Relative humidity, 0..1.
    pub relative_humidity: Field,
    /// Actual vapor pressure, kPa.
    pub actual_vapor: Field,
    /// Wind speed rescaled to 2m height, m/s.
    pub wind_speed_2m: Field,
    /// Latitude passthrough.
    pub latitude: Field,
    /// Longitude passthrough.
    pub longitude: Field,
}

impl DerivedFields {
    /// Quantities this bundle carries.
    pub const BAND_COUNT: usize = 11;

    /// Grid shape shared by every field in the bundle.
    pub fn shape(&self) -> GridShape {
        self.net_radiation.shape()
    }
}

/// Hourly ETo result with coordinate passthrough.
#[derive(Debug, Clone, PartialEq)]
pub struct HourlyEto {
    /// Reference evapotranspiration for the hour, mm.
    pub eto: Field,
    pub latitude: Field,
    pub longitude: Field,
}
