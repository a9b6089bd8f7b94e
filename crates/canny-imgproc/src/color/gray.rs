use rayon::prelude::*;

use crate::parallel;
use canny_image::{EdgePlane, Frame, ImageError, Plane};

/// Define the RGB weights for the grayscale conversion.
const RW: f32 = 0.299;
const GW: f32 = 0.587;
const BW: f32 = 0.114;

/// Alpha written by [`rgba_from_edges`].
const OPAQUE: u8 = 255;

/// Convert an RGBA frame to a luma plane using the formula:
///
/// Y = 0.299 * R + 0.587 * G + 0.114 * B
///
/// The alpha channel is ignored.
///
/// # Arguments
///
/// * `src` - The input RGBA frame.
/// * `dst` - The output luma plane.
///
/// Precondition: the input frame and the output plane must have the same size.
///
/// # Example
///
/// ```
/// use canny_image::{Frame, ImageSize, Plane};
/// use canny_imgproc::color::gray_from_rgba;
///
/// let frame = Frame::new(
///     ImageSize {
///         width: 4,
///         height: 5,
///     },
///     vec![0u8; 4 * 5 * 4],
/// )
/// .unwrap();
///
/// let mut gray = Plane::<f32>::from_size_val(frame.size(), 0.0).unwrap();
///
/// gray_from_rgba(&frame, &mut gray).unwrap();
/// assert_eq!(gray.width(), 4);
/// assert_eq!(gray.height(), 5);
/// ```
pub fn gray_from_rgba(src: &Frame, dst: &mut Plane<f32>) -> Result<(), ImageError> {
    dst.check_same_size(src.size())?;

    // parallelize the grayscale conversion by rows
    parallel::par_iter_rows_frame(src, dst, |src_pixel, dst_pixel| {
        let r = src_pixel[0] as f32;
        let g = src_pixel[1] as f32;
        let b = src_pixel[2] as f32;
        *dst_pixel = RW * r + GW * g + BW * b;
    });

    Ok(())
}

/// Convert an RGBA frame to an intensity plane by averaging the color channels.
///
/// Y = (R + G + B) / 3
///
/// Precondition: the input frame and the output plane must have the same size.
pub fn gray_mean_from_rgba(src: &Frame, dst: &mut Plane<f32>) -> Result<(), ImageError> {
    dst.check_same_size(src.size())?;

    parallel::par_iter_rows_frame(src, dst, |src_pixel, dst_pixel| {
        let sum = src_pixel[0] as u16 + src_pixel[1] as u16 + src_pixel[2] as u16;
        *dst_pixel = sum as f32 / 3.0;
    });

    Ok(())
}

/// Expand an edge plane into an opaque RGBA frame for display.
///
/// Each sample is replicated into the red, green and blue channels and the
/// alpha channel is set to 255.
///
/// # Example
///
/// ```
/// use canny_image::Plane;
/// use canny_imgproc::color::rgba_from_edges;
///
/// let edges = Plane::new([2, 1].into(), vec![0u8, 255]).unwrap();
/// let frame = rgba_from_edges(&edges).unwrap();
///
/// assert_eq!(frame.as_slice(), &[0, 0, 0, 255, 255, 255, 255, 255]);
/// ```
pub fn rgba_from_edges(src: &EdgePlane) -> Result<Frame, ImageError> {
    let size = src.size();
    let len = size
        .num_samples(Frame::CHANNELS)
        .ok_or(ImageError::InvalidDimensions(size.width, size.height))?;
    let mut data = vec![0u8; len];

    data.par_chunks_exact_mut(Frame::CHANNELS)
        .zip(src.as_slice().par_iter())
        .for_each(|(dst_pixel, &v)| {
            dst_pixel.copy_from_slice(&[v, v, v, OPAQUE]);
        });

    Frame::new(size, data)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use canny_image::{Frame, ImageError, ImageSize, Plane};

    #[test]
    fn gray_from_rgba() -> Result<(), ImageError> {
        let frame = Frame::new(
            ImageSize {
                width: 3,
                height: 1,
            },
            vec![255, 0, 0, 7, 0, 255, 0, 7, 0, 0, 255, 7],
        )?;

        let mut gray = Plane::<f32>::from_size_val(frame.size(), 0.0)?;
        super::gray_from_rgba(&frame, &mut gray)?;

        assert_relative_eq!(gray.as_slice()[0], 0.299 * 255.0, epsilon = 1e-3);
        assert_relative_eq!(gray.as_slice()[1], 0.587 * 255.0, epsilon = 1e-3);
        assert_relative_eq!(gray.as_slice()[2], 0.114 * 255.0, epsilon = 1e-3);

        Ok(())
    }

    #[test]
    fn gray_ignores_alpha() -> Result<(), ImageError> {
        let opaque = Frame::from_size_val([2, 2].into(), [10, 20, 30, 255])?;
        let transparent = Frame::from_size_val([2, 2].into(), [10, 20, 30, 0])?;

        let mut gray_opaque = Plane::<f32>::from_size_val(opaque.size(), 0.0)?;
        let mut gray_transparent = Plane::<f32>::from_size_val(opaque.size(), 0.0)?;
        super::gray_from_rgba(&opaque, &mut gray_opaque)?;
        super::gray_from_rgba(&transparent, &mut gray_transparent)?;

        assert_eq!(gray_opaque, gray_transparent);
        Ok(())
    }

    #[test]
    fn gray_size_mismatch() -> Result<(), ImageError> {
        let frame = Frame::from_size_val([4, 4].into(), [0, 0, 0, 255])?;
        let mut gray = Plane::<f32>::from_size_val([4, 3].into(), 0.0)?;
        let res = super::gray_from_rgba(&frame, &mut gray);
        assert_eq!(res, Err(ImageError::InvalidImageSize(4, 4, 4, 3)));
        Ok(())
    }

    #[test]
    fn gray_mean_from_rgba() -> Result<(), ImageError> {
        let frame = Frame::new([2, 1].into(), vec![30, 60, 90, 0, 255, 255, 255, 255])?;
        let mut gray = Plane::<f32>::from_size_val(frame.size(), 0.0)?;
        super::gray_mean_from_rgba(&frame, &mut gray)?;
        assert_relative_eq!(gray.as_slice()[0], 60.0);
        assert_relative_eq!(gray.as_slice()[1], 255.0);
        Ok(())
    }

    #[test]
    fn rgba_from_edges() -> Result<(), ImageError> {
        let edges = Plane::new([1, 2].into(), vec![255u8, 0])?;
        let frame = super::rgba_from_edges(&edges)?;
        assert_eq!(frame.size(), edges.size());
        assert_eq!(frame.pixel(0, 0), Some([255, 255, 255, 255]));
        assert_eq!(frame.pixel(0, 1), Some([0, 0, 0, 255]));
        Ok(())
    }
}
