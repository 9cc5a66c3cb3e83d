//! Shared types for the WRF ETo workspace.
//!
//! This crate holds the grid primitives every other crate works with:
//! the 2D [`Field`] type with its element-wise combinators, the
//! positional [`BandStack`] used at the dataset-I/O boundary, and the
//! [`EtoError`] taxonomy for everything that can abort a run.

pub mod error;
pub mod field;
pub mod stack;

pub use error::{EtoError, Result};
pub use field::{Field, GridShape};
pub use stack::BandStack;
