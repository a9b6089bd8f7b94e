//! Edge thinning and linking
//!
//! Turns a gradient field into a binary edge plane: non-maximum suppression
//! thins the magnitude to one pixel wide ridges, and hysteresis thresholding
//! keeps the ridge pixels connected to a strong response.

mod hysteresis;
pub use hysteresis::*;

mod nms;
pub use nms::*;
