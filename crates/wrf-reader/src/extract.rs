//! Band extraction: stacking named time-indexed slices into the
//! 22-band hourly input.

use eto_common::{BandStack, EtoError, Result};

use crate::source::WrfSource;

/// The ten bookended forecast variables, in wire band order.
pub const HOURLY_VARIABLES: [&str; 10] = [
    "TSK", "EMISS", "SWDOWN", "GLW", "GRDFLX", "T2", "PSFC", "Q2", "U10", "V10",
];

/// Static latitude coordinate variable.
pub const LATITUDE_VARIABLE: &str = "XLAT";

/// Static longitude coordinate variable.
pub const LONGITUDE_VARIABLE: &str = "XLONG";

/// One (variable, time index) read request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BandRequest {
    pub variable: String,
    pub time_index: usize,
}

impl BandRequest {
    /// Create a new band request.
    pub fn new(variable: impl Into<String>, time_index: usize) -> Self {
        Self {
            variable: variable.into(),
            time_index,
        }
    }
}

/// Build the fixed 22-request pattern for `hour`.
///
/// Each forecast variable is requested at the bookend indices
/// (hour, hour + 1) for mid-hour averaging; the static latitude and
/// longitude slices close the stack at index 0.
pub fn hourly_band_requests(hour: usize) -> Vec<BandRequest> {
    let mut requests = Vec::with_capacity(22);
    for variable in HOURLY_VARIABLES {
        requests.push(BandRequest::new(variable, hour));
        requests.push(BandRequest::new(variable, hour + 1));
    }
    requests.push(BandRequest::new(LATITUDE_VARIABLE, 0));
    requests.push(BandRequest::new(LONGITUDE_VARIABLE, 0));
    requests
}

/// Read every requested band and stack them in order.
///
/// The first band fixes the grid shape; any later band that disagrees
/// fails with `ShapeMismatch`. A bad variable name or time index
/// aborts the whole stack for this hour; nothing is skipped silently.
pub fn extract_stack<S: WrfSource>(source: &S, requests: &[BandRequest]) -> Result<BandStack> {
    let steps = source.time_steps();
    let mut stack = BandStack::new();

    for request in requests {
        if request.time_index >= steps {
            return Err(EtoError::TimeIndexOutOfRange {
                variable: request.variable.clone(),
                index: request.time_index,
                steps,
            });
        }
        let band = source.read_slice(&request.variable, request.time_index)?;
        stack.push(&request.variable, band)?;
    }

    Ok(stack)
}

#[cfg(test)]
mod tests {
    use super::*;
    use eto_common::{Field, GridShape};

    struct ConstantSource {
        shape: GridShape,
        steps: usize,
    }

    impl WrfSource for ConstantSource {
        fn time_steps(&self) -> usize {
            self.steps
        }

        fn read_slice(&self, variable: &str, time_index: usize) -> Result<Field> {
            if variable == "MISSING" {
                return Err(EtoError::dataset_open(variable, "no such variable"));
            }
            Ok(Field::filled(self.shape, time_index as f32))
        }
    }

    #[test]
    fn hour_pattern_is_bookends_then_coordinates() {
        let requests = hourly_band_requests(10);
        assert_eq!(requests.len(), 22);
        assert_eq!(requests[0], BandRequest::new("TSK", 10));
        assert_eq!(requests[1], BandRequest::new("TSK", 11));
        assert_eq!(requests[18], BandRequest::new("V10", 10));
        assert_eq!(requests[19], BandRequest::new("V10", 11));
        assert_eq!(requests[20], BandRequest::new("XLAT", 0));
        assert_eq!(requests[21], BandRequest::new("XLONG", 0));
    }

    #[test]
    fn extract_stacks_all_bands_in_order() {
        let source = ConstantSource {
            shape: GridShape::new(2, 3),
            steps: 25,
        };
        let stack = extract_stack(&source, &hourly_band_requests(23)).unwrap();
        assert_eq!(stack.len(), 22);
        assert_eq!(stack.shape(), Some(GridShape::new(2, 3)));
        // bookend slices carry their time index as the fill value
        assert_eq!(stack.band(0).unwrap().get(0, 0), Some(23.0));
        assert_eq!(stack.band(1).unwrap().get(0, 0), Some(24.0));
        assert_eq!(stack.band(21).unwrap().get(0, 0), Some(0.0));
    }

    #[test]
    fn out_of_range_index_aborts_extraction() {
        let source = ConstantSource {
            shape: GridShape::new(2, 2),
            steps: 25,
        };
        // hour 24 would need bookend index 25
        let err = extract_stack(&source, &hourly_band_requests(24)).unwrap_err();
        assert!(matches!(
            err,
            EtoError::TimeIndexOutOfRange {
                index: 25,
                steps: 25,
                ..
            }
        ));
    }

    #[test]
    fn unknown_variable_aborts_extraction() {
        let source = ConstantSource {
            shape: GridShape::new(2, 2),
            steps: 25,
        };
        let requests = vec![BandRequest::new("MISSING", 0)];
        let err = extract_stack(&source, &requests).unwrap_err();
        assert!(matches!(err, EtoError::DatasetOpen { .. }));
    }
}
