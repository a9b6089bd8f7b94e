#![deny(missing_docs)]
//! Frame and plane types for the canny edge pipeline.

/// Error types for the image module.
pub mod error;

/// RGBA frame representation.
pub mod frame;

/// single channel plane representation.
pub mod plane;

pub use crate::error::ImageError;
pub use crate::frame::Frame;
pub use crate::plane::{EdgePlane, ImageSize, Plane, BACKGROUND_VALUE, EDGE_VALUE};
