use canny_image::ImageError;
use thiserror::Error;

use crate::parallel::ParallelError;

/// Errors that can occur while extracting an edge map.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CannyError {
    /// The input frame or a plane at a stage boundary is malformed.
    #[error(transparent)]
    Image(#[from] ImageError),

    /// The hysteresis thresholds are negative, not finite or inverted.
    #[error("invalid thresholds: low ({0}) and high ({1}) must be finite with 0 <= low <= high")]
    InvalidThresholds(f32, f32),

    /// The thread pool requested by the execution strategy is unusable.
    #[error(transparent)]
    Parallel(#[from] ParallelError),
}

impl CannyError {
    /// Whether the error comes from a buffer whose length does not match its size.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            CannyError::Image(ImageError::InvalidChannelShape(..))
                | CannyError::Image(ImageError::InvalidImageSize(..))
        )
    }

    /// Whether the error comes from a zero width or height.
    pub fn is_invalid_dimensions(&self) -> bool {
        matches!(self, CannyError::Image(ImageError::InvalidDimensions(..)))
    }

    /// Whether the error comes from the pipeline configuration.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            CannyError::InvalidThresholds(..) | CannyError::Parallel(..)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::CannyError;
    use crate::parallel::ParallelError;
    use canny_image::ImageError;

    #[test]
    fn classify_errors() {
        let err: CannyError = ImageError::InvalidChannelShape(99, 400).into();
        assert!(err.is_invalid_input());
        assert!(!err.is_configuration_error());

        let err: CannyError = ImageError::InvalidDimensions(0, 3).into();
        assert!(err.is_invalid_dimensions());
        assert!(!err.is_invalid_input());

        let err = CannyError::InvalidThresholds(50.0, 20.0);
        assert!(err.is_configuration_error());

        let err: CannyError = ParallelError::InvalidThreadCount(0).into();
        assert!(err.is_configuration_error());
    }

    #[test]
    fn error_messages() {
        let err: CannyError = ImageError::InvalidChannelShape(99, 400).into();
        assert_eq!(
            err.to_string(),
            "Data length (99) does not match the image size (400)"
        );
    }
}
