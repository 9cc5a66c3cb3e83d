//! Positional multi-band stacks at the dataset-I/O boundary.

use crate::error::{EtoError, Result};
use crate::field::{Field, GridShape};

/// An ordered set of named bands sharing one grid shape.
///
/// Band order is the wire contract with the dataset layer; everything
/// past the I/O boundary converts a stack into named-field records
/// instead of indexing by bare integers. The first band pushed fixes
/// the shape, and every later band must match it exactly.
#[derive(Debug, Clone, Default)]
pub struct BandStack {
    names: Vec<String>,
    bands: Vec<Field>,
}

impl BandStack {
    /// Create an empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a band; its shape must match the stack's.
    pub fn push(&mut self, name: impl Into<String>, band: Field) -> Result<()> {
        if let Some(first) = self.bands.first() {
            first.check_shape(&band)?;
        }
        self.names.push(name.into());
        self.bands.push(band);
        Ok(())
    }

    /// Number of bands in the stack.
    pub fn len(&self) -> usize {
        self.bands.len()
    }

    /// Check if the stack holds no bands.
    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }

    /// Grid shape shared by every band, or `None` while empty.
    pub fn shape(&self) -> Option<GridShape> {
        self.bands.first().map(Field::shape)
    }

    /// Band at `index`.
    pub fn band(&self, index: usize) -> Option<&Field> {
        self.bands.get(index)
    }

    /// Name of the band at `index`.
    pub fn name(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    /// Fail with [`EtoError::InvalidBandCount`] unless the stack holds
    /// exactly `expected` bands.
    pub fn expect_bands(&self, expected: usize) -> Result<()> {
        if self.bands.len() != expected {
            return Err(EtoError::InvalidBandCount {
                expected,
                found: self.bands.len(),
            });
        }
        Ok(())
    }

    /// Consume the stack, returning its bands in wire order.
    pub fn into_bands(self) -> Vec<Field> {
        self.bands
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_band_fixes_the_shape() {
        let mut stack = BandStack::new();
        stack
            .push("TSK", Field::zeros(GridShape::new(2, 2)))
            .unwrap();
        let err = stack
            .push("EMISS", Field::zeros(GridShape::new(2, 3)))
            .unwrap_err();
        assert!(matches!(err, EtoError::ShapeMismatch { .. }));
        assert_eq!(stack.len(), 1);
    }

    #[test]
    fn expect_bands_reports_both_counts() {
        let mut stack = BandStack::new();
        for i in 0..21 {
            stack
                .push(format!("band{i}"), Field::zeros(GridShape::new(1, 1)))
                .unwrap();
        }
        match stack.expect_bands(22) {
            Err(EtoError::InvalidBandCount { expected, found }) => {
                assert_eq!(expected, 22);
                assert_eq!(found, 21);
            }
            other => panic!("expected InvalidBandCount, got {other:?}"),
        }
    }

    #[test]
    fn names_track_wire_order() {
        let mut stack = BandStack::new();
        stack
            .push("XLAT", Field::zeros(GridShape::new(1, 1)))
            .unwrap();
        stack
            .push("XLONG", Field::zeros(GridShape::new(1, 1)))
            .unwrap();
        assert_eq!(stack.name(0), Some("XLAT"));
        assert_eq!(stack.name(1), Some("XLONG"));
        assert_eq!(stack.shape(), Some(GridShape::new(1, 1)));
    }
}
