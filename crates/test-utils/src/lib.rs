//! Shared test utilities for the wrf-eto workspace.
//!
//! This crate provides deterministic synthetic WRF data for the test
//! suites: a band-stack builder with the canonical hour-0 scenario
//! values, and an in-memory [`WrfSource`] fake that serves a full
//! synthetic day without touching libnetcdf.
//!
//! [`WrfSource`]: wrf_reader::WrfSource

pub mod generators;
pub mod source;

pub use generators::SyntheticHour;
pub use source::MemorySource;
