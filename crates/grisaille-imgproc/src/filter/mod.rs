//! Filter operations
//!
//! This module provides the windowed operator engine and the filters built on it.

/// Filter kernels
pub mod kernels;
pub use kernels::Kernel;

/// Filter operations
mod ops;
pub use ops::*;
