//! 2D gridded fields and their element-wise combinators.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{EtoError, Result};

/// Spatial dimensions of a grid (rows x columns).
///
/// Every grid in a single run shares one shape; any disagreement
/// between two grids used in the same operation is fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridShape {
    /// Number of rows (south-north points).
    pub ny: usize,
    /// Number of columns (west-east points).
    pub nx: usize,
}

impl GridShape {
    /// Create a new grid shape.
    pub fn new(ny: usize, nx: usize) -> Self {
        Self { ny, nx }
    }

    /// Total number of grid cells.
    pub fn len(&self) -> usize {
        self.ny * self.nx
    }

    /// Check if the shape covers no cells.
    pub fn is_empty(&self) -> bool {
        self.ny == 0 || self.nx == 0
    }
}

impl fmt::Display for GridShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.ny, self.nx)
    }
}

/// One 2D grid of `f32` values in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    shape: GridShape,
    data: Vec<f32>,
}

impl Field {
    /// Create a field from row-major data.
    pub fn new(shape: GridShape, data: Vec<f32>) -> Self {
        debug_assert_eq!(shape.len(), data.len());
        Self { shape, data }
    }

    /// Create a field with every cell set to `value`.
    pub fn filled(shape: GridShape, value: f32) -> Self {
        Self::new(shape, vec![value; shape.len()])
    }

    /// Create a zeroed field.
    pub fn zeros(shape: GridShape) -> Self {
        Self::filled(shape, 0.0)
    }

    /// Spatial dimensions of this field.
    pub fn shape(&self) -> GridShape {
        self.shape
    }

    /// Row-major cell values.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Consume the field, returning its row-major values.
    pub fn into_data(self) -> Vec<f32> {
        self.data
    }

    /// Value at a grid position, or `None` if out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<f32> {
        if row >= self.shape.ny || col >= self.shape.nx {
            return None;
        }
        self.data.get(row * self.shape.nx + col).copied()
    }

    /// Fail with [`EtoError::ShapeMismatch`] unless `other` has the
    /// same dimensions as this field.
    pub fn check_shape(&self, other: &Field) -> Result<()> {
        if self.shape != other.shape {
            return Err(EtoError::shape_mismatch(self.shape, other.shape));
        }
        Ok(())
    }

    /// Apply `f` to every cell, producing a new field.
    pub fn map(&self, f: impl Fn(f32) -> f32) -> Field {
        Field::new(self.shape, self.data.iter().map(|&v| f(v)).collect())
    }

    /// Combine two fields cell by cell.
    pub fn zip_with(&self, other: &Field, f: impl Fn(f32, f32) -> f32) -> Result<Field> {
        self.check_shape(other)?;
        let data = self
            .data
            .iter()
            .zip(other.data.iter())
            .map(|(&a, &b)| f(a, b))
            .collect();
        Ok(Field::new(self.shape, data))
    }

    /// Mid-hour approximation: the mean of this field and `other`.
    pub fn average(&self, other: &Field) -> Result<Field> {
        self.zip_with(other, |a, b| (a + b) / 2.0)
    }

    /// Element-wise `self += other`.
    pub fn add_assign_field(&mut self, other: &Field) -> Result<()> {
        self.check_shape(other)?;
        for (a, &b) in self.data.iter_mut().zip(other.data.iter()) {
            *a += b;
        }
        Ok(())
    }

    /// Element-wise `self += other * factor`.
    pub fn add_scaled(&mut self, other: &Field, factor: f32) -> Result<()> {
        self.check_shape(other)?;
        for (a, &b) in self.data.iter_mut().zip(other.data.iter()) {
            *a += b * factor;
        }
        Ok(())
    }

    /// Element-wise `self = max(self, other)`.
    pub fn max_assign(&mut self, other: &Field) -> Result<()> {
        self.check_shape(other)?;
        for (a, &b) in self.data.iter_mut().zip(other.data.iter()) {
            *a = a.max(b);
        }
        Ok(())
    }

    /// Element-wise `self = min(self, other)`.
    pub fn min_assign(&mut self, other: &Field) -> Result<()> {
        self.check_shape(other)?;
        for (a, &b) in self.data.iter_mut().zip(other.data.iter()) {
            *a = a.min(b);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_display_is_rows_by_cols() {
        assert_eq!(GridShape::new(3, 7).to_string(), "3x7");
    }

    #[test]
    fn get_respects_row_major_order() {
        let field = Field::new(GridShape::new(2, 3), vec![0.0, 1.0, 2.0, 10.0, 11.0, 12.0]);
        assert_eq!(field.get(0, 2), Some(2.0));
        assert_eq!(field.get(1, 0), Some(10.0));
        assert_eq!(field.get(2, 0), None);
    }

    #[test]
    fn zip_with_rejects_mismatched_shapes() {
        let a = Field::zeros(GridShape::new(2, 2));
        let b = Field::zeros(GridShape::new(2, 3));
        let err = a.zip_with(&b, |x, y| x + y).unwrap_err();
        assert!(matches!(err, EtoError::ShapeMismatch { .. }));
    }

    #[test]
    fn average_is_elementwise_mean() {
        let shape = GridShape::new(1, 2);
        let a = Field::new(shape, vec![300.0, 302.0]);
        let b = Field::new(shape, vec![302.0, 304.0]);
        let mid = a.average(&b).unwrap();
        assert_eq!(mid.data(), &[301.0, 303.0]);
    }

    #[test]
    fn max_min_assign_track_extrema() {
        let shape = GridShape::new(1, 3);
        let mut hi = Field::new(shape, vec![1.0, 5.0, 3.0]);
        let mut lo = hi.clone();
        let next = Field::new(shape, vec![2.0, 4.0, 3.0]);
        hi.max_assign(&next).unwrap();
        lo.min_assign(&next).unwrap();
        assert_eq!(hi.data(), &[2.0, 5.0, 3.0]);
        assert_eq!(lo.data(), &[1.0, 4.0, 3.0]);
    }

    #[test]
    fn add_scaled_accumulates() {
        let shape = GridShape::new(1, 2);
        let mut acc = Field::zeros(shape);
        let wind = Field::new(shape, vec![24.0, 48.0]);
        acc.add_scaled(&wind, 1.0 / 24.0).unwrap();
        assert_eq!(acc.data(), &[1.0, 2.0]);
    }
}
