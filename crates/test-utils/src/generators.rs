//! Synthetic hourly input stacks with predictable values.

use eto_common::{BandStack, Field, GridShape};

/// Bookend values for one synthetic hour of WRF output.
///
/// The defaults are the canonical hour-0 scenario used across the
/// test suite: warm, moderately humid mid-latitude daytime
/// conditions. Every cell of a generated band carries the same value,
/// which makes hand-checking the derived physics trivial.
#[derive(Debug, Clone)]
pub struct SyntheticHour {
    /// Surface skin temperature bookends (K).
    pub skin_temp: (f32, f32),
    /// Surface emissivity bookends.
    pub emissivity: (f32, f32),
    /// Downward shortwave radiation bookends (W/m^2).
    pub shortwave_down: (f32, f32),
    /// Downward longwave radiation bookends (W/m^2).
    pub longwave_down: (f32, f32),
    /// Ground heat flux bookends (W/m^2).
    pub ground_flux: (f32, f32),
    /// 2m temperature bookends (K).
    pub temp_2m: (f32, f32),
    /// Surface pressure bookends (Pa).
    pub surface_pressure: (f32, f32),
    /// Mixing ratio bookends (kg/kg).
    pub specific_humidity: (f32, f32),
    /// 10m wind U component bookends (m/s).
    pub wind_u10: (f32, f32),
    /// 10m wind V component bookends (m/s).
    pub wind_v10: (f32, f32),
    /// Static latitude (decimal degrees).
    pub latitude: f32,
    /// Static longitude (decimal degrees).
    pub longitude: f32,
}

impl Default for SyntheticHour {
    fn default() -> Self {
        Self {
            skin_temp: (300.0, 302.0),
            emissivity: (0.96, 0.96),
            shortwave_down: (400.0, 420.0),
            longwave_down: (350.0, 350.0),
            ground_flux: (20.0, 20.0),
            temp_2m: (295.0, 296.0),
            surface_pressure: (90_000.0, 90_000.0),
            specific_humidity: (0.01, 0.01),
            wind_u10: (2.0, 2.2),
            wind_v10: (1.0, 1.1),
            latitude: 40.0,
            longitude: -105.0,
        }
    }
}

impl SyntheticHour {
    /// Build the 22-band stack in wire order over `shape`.
    pub fn to_stack(&self, shape: GridShape) -> BandStack {
        let pairs: [(&str, (f32, f32)); 10] = [
            ("TSK", self.skin_temp),
            ("EMISS", self.emissivity),
            ("SWDOWN", self.shortwave_down),
            ("GLW", self.longwave_down),
            ("GRDFLX", self.ground_flux),
            ("T2", self.temp_2m),
            ("PSFC", self.surface_pressure),
            ("Q2", self.specific_humidity),
            ("U10", self.wind_u10),
            ("V10", self.wind_v10),
        ];

        let mut stack = BandStack::new();
        for (name, (start, end)) in pairs {
            stack.push(name, Field::filled(shape, start)).unwrap();
            stack.push(name, Field::filled(shape, end)).unwrap();
        }
        stack
            .push("XLAT", Field::filled(shape, self.latitude))
            .unwrap();
        stack
            .push("XLONG", Field::filled(shape, self.longitude))
            .unwrap();

        stack
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_stack_has_the_wire_layout() {
        let stack = SyntheticHour::default().to_stack(GridShape::new(2, 2));
        assert_eq!(stack.len(), 22);
        assert_eq!(stack.name(0), Some("TSK"));
        assert_eq!(stack.band(0).unwrap().get(0, 0), Some(300.0));
        assert_eq!(stack.band(1).unwrap().get(0, 0), Some(302.0));
        assert_eq!(stack.name(21), Some("XLONG"));
        assert_eq!(stack.band(21).unwrap().get(1, 1), Some(-105.0));
    }
}
