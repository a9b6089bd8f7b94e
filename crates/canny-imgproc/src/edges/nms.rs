use canny_image::{ImageError, Plane};

use crate::filter::GradientField;
use crate::neighborhood::offset_index;
use crate::parallel;

/// Edge orientation bin used to pick the two neighbors compared by NMS.
///
/// Each sector spans 45 degrees centered on its nominal angle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sector {
    /// Gradient close to 0° (horizontal).
    Deg0,
    /// Gradient close to 45°.
    Deg45,
    /// Gradient close to 90° (vertical).
    Deg90,
    /// Gradient close to 135°.
    Deg135,
}

impl Sector {
    /// Quantize a gradient direction in radians.
    ///
    /// The direction is folded into `[0°, 180°)` first since opposite
    /// gradients describe the same edge orientation.
    pub fn from_direction(direction: f32) -> Self {
        let mut angle = direction.to_degrees();
        if angle < 0.0 {
            angle += 180.0;
        }
        if angle >= 180.0 {
            angle -= 180.0;
        }

        if !(22.5..157.5).contains(&angle) {
            Sector::Deg0
        } else if angle < 67.5 {
            Sector::Deg45
        } else if angle < 112.5 {
            Sector::Deg90
        } else {
            Sector::Deg135
        }
    }

    /// The two opposite `(dx, dy)` offsets along the gradient, y pointing down.
    pub fn offsets(&self) -> [(isize, isize); 2] {
        match self {
            Sector::Deg0 => [(-1, 0), (1, 0)],
            Sector::Deg45 => [(-1, -1), (1, 1)],
            Sector::Deg90 => [(0, -1), (0, 1)],
            Sector::Deg135 => [(1, -1), (-1, 1)],
        }
    }
}

/// Thin the gradient magnitude to local maxima along the gradient direction.
///
/// For every pixel the two neighbors along its quantized direction are
/// compared against it; neighbors outside the plane count as zero. The
/// magnitude is kept if it is greater than or equal to both, so plateau
/// ridges survive, and set to zero otherwise.
///
/// # Arguments
///
/// * `src` - The gradient field.
/// * `dst` - The suppressed magnitude plane.
///
/// PRECONDITION: `src` and `dst` must have the same size.
///
/// # Example
///
/// ```
/// use canny_image::Plane;
/// use canny_imgproc::edges::non_max_suppression;
/// use canny_imgproc::filter::GradientField;
///
/// let field = GradientField {
///     magnitude: Plane::new([3, 1].into(), vec![1.0, 3.0, 2.0]).unwrap(),
///     direction: Plane::from_size_val([3, 1].into(), 0.0).unwrap(),
/// };
/// let mut thin = Plane::from_size_val(field.size(), 0.0).unwrap();
///
/// non_max_suppression(&field, &mut thin).unwrap();
/// assert_eq!(thin.as_slice(), &[0.0, 3.0, 0.0]);
/// ```
pub fn non_max_suppression(src: &GradientField, dst: &mut Plane<f32>) -> Result<(), ImageError> {
    src.direction.check_same_size(src.magnitude.size())?;
    dst.check_same_size(src.magnitude.size())?;

    let (cols, rows) = (src.magnitude.cols(), src.magnitude.rows());
    let magnitude = src.magnitude.as_slice();
    let direction = src.direction.as_slice();

    let neighbor = |x: usize, y: usize, (dx, dy): (isize, isize)| -> f32 {
        match (offset_index(x, dx, cols), offset_index(y, dy, rows)) {
            (Some(nx), Some(ny)) => magnitude[ny * cols + nx],
            _ => 0.0,
        }
    };

    parallel::par_iter_rows_indexed(dst, |r, dst_row| {
        for (c, dst_pixel) in dst_row.iter_mut().enumerate() {
            let idx = r * cols + c;
            let current = magnitude[idx];
            let [before, after] = Sector::from_direction(direction[idx]).offsets();

            *dst_pixel = if current >= neighbor(c, r, before) && current >= neighbor(c, r, after) {
                current
            } else {
                0.0
            };
        }
    });

    Ok(())
}
