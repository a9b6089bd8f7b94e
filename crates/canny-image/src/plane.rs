use crate::error::ImageError;

/// Pixel value of a background sample in an [`EdgePlane`].
pub const BACKGROUND_VALUE: u8 = 0;

/// Pixel value of an edge sample in an [`EdgePlane`].
pub const EDGE_VALUE: u8 = 255;

/// Image size in pixels
///
/// A struct to represent the size of an image in pixels.
///
/// # Examples
///
/// ```
/// use canny_image::ImageSize;
///
/// let image_size = ImageSize {
///   width: 10,
///   height: 20,
/// };
///
/// assert_eq!(image_size.width, 10);
/// assert_eq!(image_size.height, 20);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageSize {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
}

impl ImageSize {
    /// Number of pixels covered by this size.
    ///
    /// Saturates at `usize::MAX` for sizes that [`ImageSize::validate`] rejects.
    pub fn num_pixels(&self) -> usize {
        self.width.saturating_mul(self.height)
    }

    /// Number of samples of a buffer with `channels` interleaved channels, or
    /// `None` if it does not fit in a `usize`.
    pub fn num_samples(&self, channels: usize) -> Option<usize> {
        self.width.checked_mul(self.height)?.checked_mul(channels)
    }

    /// Check that both sides are positive and that the pixel count fits in a `usize`.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::InvalidDimensions`] if the width or the height is
    /// zero, or if their product overflows.
    pub fn validate(&self) -> Result<(), ImageError> {
        if self.width == 0 || self.height == 0 || self.num_samples(1).is_none() {
            return Err(ImageError::InvalidDimensions(self.width, self.height));
        }
        Ok(())
    }
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "ImageSize {{ width: {}, height: {} }}",
            self.width, self.height
        )
    }
}

impl From<[usize; 2]> for ImageSize {
    fn from(size: [usize; 2]) -> Self {
        ImageSize {
            width: size[0],
            height: size[1],
        }
    }
}

/// A single channel image stored row-major.
///
/// The sample at column `x` and row `y` lives at `y * width + x`. Every
/// intermediate product of the edge pipeline is a plane.
#[derive(Clone, Debug, PartialEq)]
pub struct Plane<T> {
    size: ImageSize,
    data: Vec<T>,
}

/// A plane holding only [`BACKGROUND_VALUE`] and [`EDGE_VALUE`] samples.
pub type EdgePlane = Plane<u8>;

impl<T> Plane<T> {
    /// Create a new plane from pixel data.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the plane in pixels.
    /// * `data` - The pixel data of the plane, row-major.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::InvalidDimensions`] for an empty size and
    /// [`ImageError::InvalidChannelShape`] if the length of the data does not
    /// match the size.
    ///
    /// # Examples
    ///
    /// ```
    /// use canny_image::{ImageSize, Plane};
    ///
    /// let plane = Plane::new(
    ///    ImageSize {
    ///       width: 10,
    ///       height: 20,
    ///    },
    ///    vec![0f32; 10 * 20],
    /// ).unwrap();
    ///
    /// assert_eq!(plane.width(), 10);
    /// assert_eq!(plane.height(), 20);
    /// ```
    pub fn new(size: ImageSize, data: Vec<T>) -> Result<Self, ImageError> {
        size.validate()?;

        if data.len() != size.num_pixels() {
            return Err(ImageError::InvalidChannelShape(
                data.len(),
                size.num_pixels(),
            ));
        }

        Ok(Self { size, data })
    }

    /// Create a new plane with the given size filled with `val`.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::InvalidDimensions`] for an empty size.
    pub fn from_size_val(size: ImageSize, val: T) -> Result<Self, ImageError>
    where
        T: Clone,
    {
        size.validate()?;
        Self::new(size, vec![val; size.num_pixels()])
    }

    /// Get the size of the plane in pixels.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Get the width of the plane in pixels.
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// Get the height of the plane in pixels.
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// Get the number of columns of the plane.
    pub fn cols(&self) -> usize {
        self.width()
    }

    /// Get the number of rows of the plane.
    pub fn rows(&self) -> usize {
        self.height()
    }

    /// Get the sample at column `x` and row `y`, or `None` outside the plane.
    pub fn get(&self, x: usize, y: usize) -> Option<&T> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        self.data.get(y * self.width() + x)
    }

    /// Get a row of the plane, or `None` past the last row.
    pub fn row(&self, y: usize) -> Option<&[T]> {
        if y >= self.height() {
            return None;
        }
        let start = y * self.width();
        Some(&self.data[start..start + self.width()])
    }

    /// Get the pixel data of the plane.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Get the mutable pixel data of the plane.
    pub fn as_slice_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consume the plane and return its pixel data.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Check that `other` has the same size as this plane.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::InvalidImageSize`] carrying both sizes otherwise.
    pub fn check_same_size(&self, other: ImageSize) -> Result<(), ImageError> {
        if self.size != other {
            return Err(ImageError::InvalidImageSize(
                other.width,
                other.height,
                self.width(),
                self.height(),
            ));
        }
        Ok(())
    }
}

impl EdgePlane {
    /// Number of samples marked as edge.
    pub fn count_edges(&self) -> usize {
        self.data.iter().filter(|&&v| v == EDGE_VALUE).count()
    }

    /// Whether the sample at column `x` and row `y` is an edge.
    pub fn is_edge(&self, x: usize, y: usize) -> bool {
        self.get(x, y) == Some(&EDGE_VALUE)
    }
}
