#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// color reduction module.
pub mod color;

/// edge thinning and linking module.
pub mod edges;

/// Error types for the edge pipeline.
pub mod error;

/// image filtering module.
pub mod filter;

/// module containing parallization utilities.
pub mod parallel;

/// the end to end edge extraction pipeline.
pub mod pipeline;

mod neighborhood;

pub use crate::error::CannyError;
pub use crate::pipeline::{process, EnabledStages, LumaMode, Pipeline, PipelineConfig};
