//! Utility types and functions.
//!
//! This module contains fundamental types used throughout the library:
//! - [`Error`] / [`Result`] - Error handling
//! - [`Version`] - Asset semantic version
//! - Math type re-exports from glam

mod error;
mod math;
mod version;

pub use error::*;
pub use math::*;
pub use version::*;
