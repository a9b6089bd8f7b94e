//! Filter operations
//!
//! This module provides the 3x3 smoothing and gradient filters of the edge pipeline.

/// Filter kernels
pub mod kernels;

/// Filter operations
mod ops;
pub use ops::*;
