use canny_image::{EdgePlane, Plane, BACKGROUND_VALUE, EDGE_VALUE};

use crate::error::CannyError;
use crate::neighborhood::{offset_index, NEIGHBORS_8};
use crate::parallel;

/// Check a pair of hysteresis thresholds.
///
/// # Errors
///
/// Returns [`CannyError::InvalidThresholds`] unless both thresholds are
/// finite and `0 <= low <= high`.
pub fn validate_thresholds(low: f32, high: f32) -> Result<(), CannyError> {
    let valid = low.is_finite() && high.is_finite() && low >= 0.0 && low <= high;
    if !valid {
        return Err(CannyError::InvalidThresholds(low, high));
    }
    Ok(())
}

/// Link edge pixels with a double threshold.
///
/// Every pixel with a magnitude of at least `high` seeds a region which then
/// grows through 8-connected neighbors with a magnitude of at least `low`.
/// Pixels reached this way are set to [`EDGE_VALUE`], every other pixel to
/// [`BACKGROUND_VALUE`], whatever its own magnitude.
///
/// The growth uses an explicit stack and a visited map, so the call depth does
/// not depend on the size of a region. The reachable set, and therefore the
/// output, does not depend on the traversal order.
///
/// # Arguments
///
/// * `src` - The suppressed gradient magnitude.
/// * `dst` - The output edge plane.
/// * `low` - The threshold for pixels extending an edge.
/// * `high` - The threshold for pixels starting an edge.
///
/// # Errors
///
/// The thresholds are validated with [`validate_thresholds`] before anything
/// is written. `src` and `dst` must have the same size.
///
/// # Example
///
/// ```
/// use canny_image::Plane;
/// use canny_imgproc::edges::hysteresis_threshold;
///
/// let magnitude = Plane::new([4, 1].into(), vec![60.0, 30.0, 0.0, 30.0]).unwrap();
/// let mut edges = Plane::from_size_val(magnitude.size(), 0u8).unwrap();
///
/// hysteresis_threshold(&magnitude, &mut edges, 20.0, 50.0).unwrap();
/// assert_eq!(edges.as_slice(), &[255, 255, 0, 0]);
/// ```
pub fn hysteresis_threshold(
    src: &Plane<f32>,
    dst: &mut EdgePlane,
    low: f32,
    high: f32,
) -> Result<(), CannyError> {
    validate_thresholds(low, high)?;
    dst.check_same_size(src.size())?;

    let (cols, rows) = (src.cols(), src.rows());
    let magnitude = src.as_slice();
    let edges = dst.as_slice_mut();
    edges.fill(BACKGROUND_VALUE);

    let mut visited = vec![false; cols * rows];
    let mut stack: Vec<(usize, usize)> = Vec::new();
    let mut num_seeds = 0;

    for y in 0..rows {
        for x in 0..cols {
            let idx = y * cols + x;
            let strong = magnitude[idx] >= high;
            if visited[idx] || !strong {
                continue;
            }

            num_seeds += 1;
            visited[idx] = true;
            edges[idx] = EDGE_VALUE;
            stack.push((x, y));

            while let Some((cx, cy)) = stack.pop() {
                for &(dx, dy) in NEIGHBORS_8.iter() {
                    let (Some(nx), Some(ny)) =
                        (offset_index(cx, dx, cols), offset_index(cy, dy, rows))
                    else {
                        continue;
                    };

                    let n_idx = ny * cols + nx;
                    let weak = magnitude[n_idx] >= low;
                    if visited[n_idx] || !weak {
                        continue;
                    }

                    visited[n_idx] = true;
                    edges[n_idx] = EDGE_VALUE;
                    stack.push((nx, ny));
                }
            }
        }
    }

    log::trace!("hysteresis: {} seeds for {}x{} plane", num_seeds, cols, rows);

    Ok(())
}

/// Binarize a magnitude plane with a single threshold.
///
/// Pixels with a magnitude of at least `threshold` become [`EDGE_VALUE`], the
/// others [`BACKGROUND_VALUE`]. No linking is performed.
///
/// # Errors
///
/// The threshold must be finite and non-negative. `src` and `dst` must have
/// the same size.
pub fn threshold_edges(
    src: &Plane<f32>,
    dst: &mut EdgePlane,
    threshold: f32,
) -> Result<(), CannyError> {
    validate_thresholds(threshold, threshold)?;
    dst.check_same_size(src.size())?;

    parallel::par_iter_rows_val(src, dst, |src_pixel, dst_pixel| {
        *dst_pixel = if *src_pixel >= threshold {
            EDGE_VALUE
        } else {
            BACKGROUND_VALUE
        };
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::validate_thresholds;
    use crate::error::CannyError;
    use canny_image::{ImageError, Plane};

    #[test]
    fn thresholds_validation() {
        assert!(validate_thresholds(20.0, 50.0).is_ok());
        assert!(validate_thresholds(50.0, 50.0).is_ok());
        assert!(validate_thresholds(0.0, 0.0).is_ok());
        assert_eq!(
            validate_thresholds(50.0, 20.0),
            Err(CannyError::InvalidThresholds(50.0, 20.0))
        );
        assert!(validate_thresholds(-1.0, 20.0).is_err());
        assert!(validate_thresholds(1.0, f32::INFINITY).is_err());
        assert!(validate_thresholds(f32::NAN, 20.0).is_err());
    }

    #[test]
    fn hysteresis_inverted_thresholds() -> Result<(), CannyError> {
        let src = Plane::from_size_val([3, 3].into(), 100.0f32)?;
        let mut dst = Plane::from_size_val(src.size(), 7u8)?;

        let res = super::hysteresis_threshold(&src, &mut dst, 50.0, 20.0);

        assert_eq!(res, Err(CannyError::InvalidThresholds(50.0, 20.0)));
        // nothing was written
        assert!(dst.as_slice().iter().all(|&v| v == 7));
        Ok(())
    }

    #[test]
    fn hysteresis_links_weak_chain() -> Result<(), CannyError> {
        #[rustfmt::skip]
        let src = Plane::new(
            [5, 3].into(),
            vec![
                60.0, 0.0, 0.0, 0.0, 0.0,
                0.0, 30.0, 0.0, 0.0, 0.0,
                0.0, 0.0, 30.0, 30.0, 10.0,
            ],
        )?;
        let mut dst = Plane::from_size_val(src.size(), 0u8)?;

        super::hysteresis_threshold(&src, &mut dst, 20.0, 50.0)?;

        #[rustfmt::skip]
        let expected = [
            255, 0, 0, 0, 0,
            0, 255, 0, 0, 0,
            0, 0, 255, 255, 0,
        ];
        assert_eq!(dst.as_slice(), &expected);
        Ok(())
    }

    #[test]
    fn hysteresis_drops_isolated_weak() -> Result<(), CannyError> {
        #[rustfmt::skip]
        let src = Plane::new(
            [5, 3].into(),
            vec![
                60.0, 30.0, 0.0, 0.0, 0.0,
                0.0, 0.0, 0.0, 40.0, 45.0,
                0.0, 0.0, 0.0, 49.0, 0.0,
            ],
        )?;
        let mut dst = Plane::from_size_val(src.size(), 0u8)?;

        super::hysteresis_threshold(&src, &mut dst, 20.0, 50.0)?;

        assert!(dst.is_edge(0, 0));
        assert!(dst.is_edge(1, 0));
        assert!(!dst.is_edge(3, 1));
        assert!(!dst.is_edge(4, 1));
        assert!(!dst.is_edge(3, 2));
        assert_eq!(dst.count_edges(), 2);
        Ok(())
    }

    #[test]
    fn hysteresis_does_not_wrap_rows() -> Result<(), CannyError> {
        // (3, 0) is strong and (0, 1) is weak: adjacent in memory, not in the plane
        #[rustfmt::skip]
        let src = Plane::new(
            [4, 2].into(),
            vec![
                0.0, 0.0, 0.0, 90.0,
                30.0, 0.0, 0.0, 0.0,
            ],
        )?;
        let mut dst = Plane::from_size_val(src.size(), 0u8)?;

        super::hysteresis_threshold(&src, &mut dst, 20.0, 50.0)?;

        assert!(dst.is_edge(3, 0));
        assert!(!dst.is_edge(0, 1));
        Ok(())
    }

    #[test]
    fn hysteresis_resets_output() -> Result<(), CannyError> {
        let src = Plane::from_size_val([3, 2].into(), 0.0f32)?;
        let mut dst = Plane::from_size_val(src.size(), 255u8)?;

        super::hysteresis_threshold(&src, &mut dst, 20.0, 50.0)?;

        assert_eq!(dst.count_edges(), 0);
        Ok(())
    }

    #[test]
    fn hysteresis_size_mismatch() -> Result<(), CannyError> {
        let src = Plane::from_size_val([3, 2].into(), 0.0f32)?;
        let mut dst = Plane::from_size_val([2, 3].into(), 0u8)?;

        let res = super::hysteresis_threshold(&src, &mut dst, 20.0, 50.0);

        assert_eq!(
            res,
            Err(CannyError::Image(ImageError::InvalidImageSize(3, 2, 2, 3)))
        );
        Ok(())
    }

    #[test]
    fn threshold_edges() -> Result<(), CannyError> {
        let src = Plane::new([4, 1].into(), vec![10.0, 50.0, 49.9, 80.0])?;
        let mut dst = Plane::from_size_val(src.size(), 0u8)?;

        super::threshold_edges(&src, &mut dst, 50.0)?;

        assert_eq!(dst.as_slice(), &[0, 255, 0, 255]);
        Ok(())
    }
}
