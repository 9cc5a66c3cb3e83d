//! Error types for the ETo pipeline.

use thiserror::Error;

use crate::field::GridShape;

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, EtoError>;

/// Errors that abort processing of the current dataset.
///
/// None of these are recoverable for the run in progress: the failing
/// run produces no output at all, and the batch driver logs the error
/// and moves on to the next domain file.
#[derive(Error, Debug)]
pub enum EtoError {
    /// A dataset variable holds something other than 32-bit floats.
    #[error("variable {variable}: wrong data type {found}, should be float32")]
    InvalidDataType { variable: String, found: String },

    /// A pipeline stage received the wrong number of bands.
    #[error("wrong band count: expected {expected}, got {found}")]
    InvalidBandCount { expected: usize, found: usize },

    /// The named variable or time slice could not be located or read.
    #[error("cannot read dataset variable {variable}: {reason}")]
    DatasetOpen { variable: String, reason: String },

    /// A requested time index is outside the dataset's step range.
    #[error("variable {variable}: time index {index} outside [0, {steps})")]
    TimeIndexOutOfRange {
        variable: String,
        index: usize,
        steps: usize,
    },

    /// Two grids used in one operation disagree on spatial dimensions.
    #[error("grid shape mismatch: expected {expected}, got {found}")]
    ShapeMismatch {
        expected: GridShape,
        found: GridShape,
    },

    /// An output artifact could not be written.
    #[error("failed to write {path}: {reason}")]
    OutputWrite { path: String, reason: String },

    /// Filesystem error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl EtoError {
    /// Create an InvalidDataType error.
    pub fn invalid_data_type(variable: impl Into<String>, found: impl Into<String>) -> Self {
        Self::InvalidDataType {
            variable: variable.into(),
            found: found.into(),
        }
    }

    /// Create a DatasetOpen error.
    pub fn dataset_open(variable: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::DatasetOpen {
            variable: variable.into(),
            reason: reason.into(),
        }
    }

    /// Create a ShapeMismatch error.
    pub fn shape_mismatch(expected: GridShape, found: GridShape) -> Self {
        Self::ShapeMismatch { expected, found }
    }

    /// Create an OutputWrite error.
    pub fn output_write(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::OutputWrite {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagnostics_name_the_failing_variable_and_index() {
        let err = EtoError::TimeIndexOutOfRange {
            variable: "TSK".to_string(),
            index: 30,
            steps: 25,
        };
        let msg = err.to_string();
        assert!(msg.contains("TSK"));
        assert!(msg.contains("30"));
        assert!(msg.contains("25"));
    }

    #[test]
    fn shape_mismatch_reports_both_shapes() {
        let err = EtoError::shape_mismatch(GridShape::new(10, 12), GridShape::new(10, 13));
        let msg = err.to_string();
        assert!(msg.contains("10x12"));
        assert!(msg.contains("10x13"));
    }
}
