use crate::error::ImageError;
use crate::plane::ImageSize;

/// An immutable RGBA8 frame.
///
/// The samples are interleaved per pixel as red, green, blue and alpha, and the
/// pixels are stored row-major, so the buffer holds `width * height * 4` bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    size: ImageSize,
    data: Vec<u8>,
}

impl Frame {
    /// Number of interleaved channels per pixel.
    pub const CHANNELS: usize = 4;

    /// Create a new frame from RGBA pixel data.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the frame in pixels.
    /// * `data` - The interleaved RGBA samples.
    ///
    /// # Errors
    ///
    /// The dimensions are checked first: an empty size, or one whose buffer
    /// length overflows a `usize`, gives [`ImageError::InvalidDimensions`].
    /// A buffer whose length is not `width * height * 4` gives
    /// [`ImageError::InvalidChannelShape`].
    ///
    /// # Examples
    ///
    /// ```
    /// use canny_image::{Frame, ImageSize};
    ///
    /// let frame = Frame::new(
    ///     ImageSize {
    ///         width: 10,
    ///         height: 20,
    ///     },
    ///     vec![0u8; 10 * 20 * 4],
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(frame.width(), 10);
    /// assert_eq!(frame.height(), 20);
    /// ```
    pub fn new(size: ImageSize, data: Vec<u8>) -> Result<Self, ImageError> {
        let expected = Self::buffer_len(size)?;
        if data.len() != expected {
            return Err(ImageError::InvalidChannelShape(data.len(), expected));
        }

        Ok(Self { size, data })
    }

    /// Create a new frame by copying the given slice.
    pub fn from_size_slice(size: ImageSize, data: &[u8]) -> Result<Self, ImageError> {
        Self::new(size, data.to_vec())
    }

    /// Create a new frame where every pixel has the given RGBA value.
    pub fn from_size_val(size: ImageSize, rgba: [u8; 4]) -> Result<Self, ImageError> {
        let len = Self::buffer_len(size)?;
        let data = rgba.iter().copied().cycle().take(len).collect();
        Self::new(size, data)
    }

    /// Expected buffer length of a frame of the given size.
    fn buffer_len(size: ImageSize) -> Result<usize, ImageError> {
        size.validate()?;
        size.num_samples(Self::CHANNELS)
            .ok_or(ImageError::InvalidDimensions(size.width, size.height))
    }

    /// Get the size of the frame in pixels.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Get the width of the frame in pixels.
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// Get the height of the frame in pixels.
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// Get the number of channels in the frame.
    pub fn num_channels(&self) -> usize {
        Self::CHANNELS
    }

    /// Get the RGBA value at column `x` and row `y`, or `None` outside the frame.
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let offset = (y * self.width() + x) * Self::CHANNELS;
        let px = &self.data[offset..offset + Self::CHANNELS];
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Get the interleaved pixel data of the frame.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }
}
