use canny_image::{ImageError, ImageSize, Plane};

use super::kernels::Kernel3;
use crate::neighborhood::{clamp_index, offset_index};
use crate::parallel;

/// Gradient magnitude and direction of a plane.
///
/// Both planes are co-indexed with the source: `magnitude` holds
/// `sqrt(gx² + gy²)` and `direction` holds `atan2(gy, gx)` in radians, within
/// `(-π, π]`.
#[derive(Clone, Debug, PartialEq)]
pub struct GradientField {
    /// Non-negative gradient magnitude.
    pub magnitude: Plane<f32>,
    /// Gradient direction in radians.
    pub direction: Plane<f32>,
}

impl GradientField {
    /// Create a zeroed gradient field of the given size.
    pub fn from_size(size: ImageSize) -> Result<Self, ImageError> {
        Ok(Self {
            magnitude: Plane::from_size_val(size, 0.0)?,
            direction: Plane::from_size_val(size, 0.0)?,
        })
    }

    /// Get the size of the field in pixels.
    pub fn size(&self) -> ImageSize {
        self.magnitude.size()
    }
}

/// Blur a plane with a 3x3 kernel, renormalizing at the borders.
///
/// Each output sample is the weighted average of the in-bounds taps of its
/// 3x3 neighborhood. Taps falling outside the plane are left out of both the
/// weighted sum and the normalization, so the frame borders are not darkened.
///
/// # Arguments
///
/// * `src` - The source plane.
/// * `dst` - The destination plane.
/// * `kernel` - The kernel weights, e.g. [`super::kernels::GAUSSIAN_KERNEL3`].
///
/// PRECONDITION: `src` and `dst` must have the same size.
/// PRECONDITION: the center weight of `kernel` must be positive.
pub fn gaussian_blur3(
    src: &Plane<f32>,
    dst: &mut Plane<f32>,
    kernel: &Kernel3,
) -> Result<(), ImageError> {
    dst.check_same_size(src.size())?;

    let (cols, rows) = (src.cols(), src.rows());
    let src_data = src.as_slice();

    parallel::par_iter_rows_indexed(dst, |r, dst_row| {
        for (c, dst_pixel) in dst_row.iter_mut().enumerate() {
            let mut sum = 0.0;
            let mut weight = 0.0;
            for (ky, kernel_row) in kernel.iter().enumerate() {
                let Some(row) = offset_index(r, ky as isize - 1, rows) else {
                    continue;
                };
                for (kx, &k) in kernel_row.iter().enumerate() {
                    let Some(col) = offset_index(c, kx as isize - 1, cols) else {
                        continue;
                    };
                    sum += src_data[row * cols + col] * k;
                    weight += k;
                }
            }
            *dst_pixel = sum / weight;
        }
    });

    Ok(())
}

/// Compute the gradient magnitude and direction of a plane with two 3x3 kernels.
///
/// Taps falling outside the plane replicate the nearest border sample, so a
/// constant plane has a zero gradient everywhere, borders included.
///
/// # Arguments
///
/// * `src` - The source plane.
/// * `dst` - The destination gradient field.
/// * `kernel_x` - The horizontal derivative kernel, e.g. [`super::kernels::SOBEL_X_KERNEL3`].
/// * `kernel_y` - The vertical derivative kernel, e.g. [`super::kernels::SOBEL_Y_KERNEL3`].
///
/// PRECONDITION: `src` and `dst` must have the same size.
pub fn spatial_gradient(
    src: &Plane<f32>,
    dst: &mut GradientField,
    kernel_x: &Kernel3,
    kernel_y: &Kernel3,
) -> Result<(), ImageError> {
    dst.magnitude.check_same_size(src.size())?;
    dst.direction.check_same_size(src.size())?;

    let (cols, rows) = (src.cols(), src.rows());
    let src_data = src.as_slice();
    let GradientField {
        magnitude,
        direction,
    } = dst;

    parallel::par_iter_rows_indexed_two(magnitude, direction, |r, mag_row, dir_row| {
        for (c, (mag, dir)) in mag_row.iter_mut().zip(dir_row.iter_mut()).enumerate() {
            let mut gx = 0.0f32;
            let mut gy = 0.0f32;
            for dy in 0..3 {
                let row = clamp_index(r, dy as isize - 1, rows);
                for dx in 0..3 {
                    let col = clamp_index(c, dx as isize - 1, cols);
                    let val = src_data[row * cols + col];
                    gx += val * kernel_x[dy][dx];
                    gy += val * kernel_y[dy][dx];
                }
            }
            *mag = (gx * gx + gy * gy).sqrt();
            *dir = gy.atan2(gx);
        }
    });

    Ok(())
}
