//! End to end edge extraction.
//!
//! A [`Pipeline`] runs luma reduction, smoothing, gradient computation,
//! non-maximum suppression and hysteresis linking on one frame at a time.
//! Every stage writes a freshly allocated plane; the only state kept between
//! frames is the immutable [`PipelineConfig`].

use std::time::Instant;

use serde::{Deserialize, Serialize};

use canny_image::{EdgePlane, Frame, Plane};

use crate::color;
use crate::edges;
use crate::error::CannyError;
use crate::filter::{self, kernels, GradientField};
use crate::parallel::{self, ExecutionStrategy};

/// Low threshold used by [`PipelineConfig::default`].
pub const DEFAULT_LOW_THRESHOLD: f32 = 20.0;

/// High threshold used by [`PipelineConfig::default`].
pub const DEFAULT_HIGH_THRESHOLD: f32 = 50.0;

/// Switches for the optional stages of the pipeline.
///
/// With `hysteresis` disabled the edge plane is a single threshold
/// binarization of the magnitude at the high threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnabledStages {
    /// Smooth the luma plane before computing the gradient.
    pub blur: bool,
    /// Thin the gradient magnitude with non-maximum suppression.
    pub nms: bool,
    /// Link edges with two thresholds instead of one.
    pub hysteresis: bool,
}

impl Default for EnabledStages {
    fn default() -> Self {
        Self {
            blur: true,
            nms: true,
            hysteresis: true,
        }
    }
}

/// How a frame is reduced to a single intensity channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LumaMode {
    /// `0.299 R + 0.587 G + 0.114 B`
    #[default]
    Weighted,
    /// `(R + G + B) / 3`
    Average,
}

/// Immutable parameters of a [`Pipeline`].
///
/// The thresholds are expressed in gradient magnitude units; the largest
/// Sobel response of an 8-bit frame is about 1443. Every constructor enforces
/// `0 <= low <= high`, so a config value is always valid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPipelineConfig", into = "RawPipelineConfig")]
pub struct PipelineConfig {
    low_threshold: f32,
    high_threshold: f32,
    stages: EnabledStages,
    luma: LumaMode,
    strategy: ExecutionStrategy,
}

impl PipelineConfig {
    /// Create a config with the given thresholds and every stage enabled.
    ///
    /// # Errors
    ///
    /// Returns [`CannyError::InvalidThresholds`] unless both thresholds are
    /// finite and `0 <= low <= high`.
    ///
    /// # Example
    ///
    /// ```
    /// use canny_imgproc::PipelineConfig;
    ///
    /// let config = PipelineConfig::new(50.0, 100.0).unwrap();
    /// assert_eq!(config.low_threshold(), 50.0);
    ///
    /// assert!(PipelineConfig::new(50.0, 20.0).is_err());
    /// ```
    pub fn new(low_threshold: f32, high_threshold: f32) -> Result<Self, CannyError> {
        edges::validate_thresholds(low_threshold, high_threshold)?;
        Ok(Self {
            low_threshold,
            high_threshold,
            stages: EnabledStages::default(),
            luma: LumaMode::default(),
            strategy: ExecutionStrategy::default(),
        })
    }

    /// Channel average followed by a single Sobel pass and one threshold.
    ///
    /// No smoothing, no suppression and no linking take place.
    pub fn simplified(threshold: f32) -> Result<Self, CannyError> {
        Ok(Self::new(threshold, threshold)?
            .with_luma(LumaMode::Average)
            .with_stages(EnabledStages {
                blur: false,
                nms: false,
                hysteresis: false,
            }))
    }

    /// Replace the enabled stages.
    pub fn with_stages(mut self, stages: EnabledStages) -> Self {
        self.stages = stages;
        self
    }

    /// Replace the luma reduction mode.
    pub fn with_luma(mut self, luma: LumaMode) -> Self {
        self.luma = luma;
        self
    }

    /// Replace the execution strategy.
    ///
    /// # Errors
    ///
    /// Returns [`CannyError::Parallel`] for a zero thread count.
    pub fn with_strategy(mut self, strategy: ExecutionStrategy) -> Result<Self, CannyError> {
        strategy.validate()?;
        self.strategy = strategy;
        Ok(self)
    }

    /// Threshold for pixels extending an edge.
    pub fn low_threshold(&self) -> f32 {
        self.low_threshold
    }

    /// Threshold for pixels starting an edge.
    pub fn high_threshold(&self) -> f32 {
        self.high_threshold
    }

    /// The enabled stages.
    pub fn stages(&self) -> EnabledStages {
        self.stages
    }

    /// The luma reduction mode.
    pub fn luma(&self) -> LumaMode {
        self.luma
    }

    /// The execution strategy.
    pub fn strategy(&self) -> ExecutionStrategy {
        self.strategy
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            low_threshold: DEFAULT_LOW_THRESHOLD,
            high_threshold: DEFAULT_HIGH_THRESHOLD,
            stages: EnabledStages::default(),
            luma: LumaMode::default(),
            strategy: ExecutionStrategy::default(),
        }
    }
}

/// Serialized form of [`PipelineConfig`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPipelineConfig {
    low_threshold: f32,
    high_threshold: f32,
    #[serde(default)]
    stages: EnabledStages,
    #[serde(default)]
    luma: LumaMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    num_threads: Option<usize>,
}

impl TryFrom<RawPipelineConfig> for PipelineConfig {
    type Error = CannyError;

    fn try_from(raw: RawPipelineConfig) -> Result<Self, Self::Error> {
        let strategy = match raw.num_threads {
            Some(n) => ExecutionStrategy::Fixed(n),
            None => ExecutionStrategy::ParallelRows,
        };
        PipelineConfig::new(raw.low_threshold, raw.high_threshold)?
            .with_stages(raw.stages)
            .with_luma(raw.luma)
            .with_strategy(strategy)
    }
}

impl From<PipelineConfig> for RawPipelineConfig {
    fn from(config: PipelineConfig) -> Self {
        let num_threads = match config.strategy {
            ExecutionStrategy::ParallelRows => None,
            ExecutionStrategy::Fixed(n) => Some(n),
        };
        Self {
            low_threshold: config.low_threshold,
            high_threshold: config.high_threshold,
            stages: config.stages,
            luma: config.luma,
            num_threads,
        }
    }
}

/// Extracts binary edge maps from RGBA frames.
///
/// # Example
///
/// ```
/// use canny_image::Frame;
/// use canny_imgproc::{Pipeline, PipelineConfig};
///
/// let frame = Frame::from_size_val([8, 6].into(), [90, 120, 30, 255]).unwrap();
/// let pipeline = Pipeline::new(PipelineConfig::default());
///
/// let edges = pipeline.process(&frame).unwrap();
/// assert_eq!(edges.size(), frame.size());
/// assert_eq!(edges.count_edges(), 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    /// Create a pipeline holding the given config.
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// The config of the pipeline.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Extract the edge plane of an RGBA frame.
    ///
    /// # Errors
    ///
    /// Fails before producing any output if a stage receives a plane of the
    /// wrong size or if the execution strategy cannot be honored.
    pub fn process(&self, frame: &Frame) -> Result<EdgePlane, CannyError> {
        parallel::run_with(self.config.strategy, || self.process_frame(frame))?
    }

    /// Extract the edge plane of an intensity plane, skipping luma reduction.
    pub fn process_gray(&self, luma: &Plane<f32>) -> Result<EdgePlane, CannyError> {
        parallel::run_with(self.config.strategy, || self.edges_from_luma(luma))?
    }

    fn process_frame(&self, frame: &Frame) -> Result<EdgePlane, CannyError> {
        let start = Instant::now();
        let mut luma = Plane::from_size_val(frame.size(), 0.0)?;
        match self.config.luma {
            LumaMode::Weighted => color::gray_from_rgba(frame, &mut luma)?,
            LumaMode::Average => color::gray_mean_from_rgba(frame, &mut luma)?,
        }
        log::debug!("luma reduction: {:?}", start.elapsed());

        self.edges_from_luma(&luma)
    }

    fn edges_from_luma(&self, luma: &Plane<f32>) -> Result<EdgePlane, CannyError> {
        let size = luma.size();
        let stages = self.config.stages;

        let blurred = if stages.blur {
            let start = Instant::now();
            let mut blurred = Plane::from_size_val(size, 0.0)?;
            filter::gaussian_blur3(luma, &mut blurred, &kernels::GAUSSIAN_KERNEL3)?;
            log::debug!("gaussian blur: {:?}", start.elapsed());
            Some(blurred)
        } else {
            None
        };

        let start = Instant::now();
        let mut gradient = GradientField::from_size(size)?;
        let (sobel_x, sobel_y) = kernels::sobel_kernel3();
        filter::spatial_gradient(
            blurred.as_ref().unwrap_or(luma),
            &mut gradient,
            &sobel_x,
            &sobel_y,
        )?;
        log::debug!("spatial gradient: {:?}", start.elapsed());

        let suppressed = if stages.nms {
            let start = Instant::now();
            let mut suppressed = Plane::from_size_val(size, 0.0)?;
            edges::non_max_suppression(&gradient, &mut suppressed)?;
            log::debug!("non-maximum suppression: {:?}", start.elapsed());
            suppressed
        } else {
            gradient.magnitude
        };

        let start = Instant::now();
        let mut edge_plane = Plane::from_size_val(size, canny_image::BACKGROUND_VALUE)?;
        if stages.hysteresis {
            edges::hysteresis_threshold(
                &suppressed,
                &mut edge_plane,
                self.config.low_threshold,
                self.config.high_threshold,
            )?;
            log::debug!("hysteresis: {:?}", start.elapsed());
        } else {
            edges::threshold_edges(&suppressed, &mut edge_plane, self.config.high_threshold)?;
            log::debug!("single threshold: {:?}", start.elapsed());
        }

        Ok(edge_plane)
    }
}

/// Extract the edge plane of an RGBA frame with the given config.
///
/// Equivalent to `Pipeline::new(*config).process(frame)`.
pub fn process(frame: &Frame, config: &PipelineConfig) -> Result<EdgePlane, CannyError> {
    Pipeline::new(*config).process(frame)
}
