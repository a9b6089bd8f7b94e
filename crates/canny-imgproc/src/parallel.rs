use rayon::prelude::*;
use thiserror::Error;

use canny_image::{Frame, Plane};

/// Errors that can occur during parallel execution.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParallelError {
    /// The thread pool failed to build.
    #[error("failed to build thread pool: {0}")]
    BuildError(String),

    /// The requested thread count is invalid.
    #[error("thread count must be > 0, got {0}")]
    InvalidThreadCount(usize),
}

/// Controls which thread pool runs the row-parallel stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionStrategy {
    /// Use the global Rayon thread pool to process rows in parallel.
    #[default]
    ParallelRows,

    /// Run on a local thread pool with `n` threads.
    ///
    /// `Fixed(1)` runs every stage on a single worker thread.
    ///
    /// # Warning
    /// Creates a new thread pool on every call, which has significant overhead.
    Fixed(usize),
}

impl ExecutionStrategy {
    /// Check that the strategy can be executed.
    pub fn validate(&self) -> Result<(), ParallelError> {
        match self {
            ExecutionStrategy::Fixed(0) => Err(ParallelError::InvalidThreadCount(0)),
            _ => Ok(()),
        }
    }
}

/// Run `op` under the given strategy and return its result.
pub fn run_with<R, F>(strategy: ExecutionStrategy, op: F) -> Result<R, ParallelError>
where
    F: FnOnce() -> R + Send,
    R: Send,
{
    strategy.validate()?;
    match strategy {
        ExecutionStrategy::ParallelRows => Ok(op()),
        ExecutionStrategy::Fixed(n) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(n)
                .build()
                .map_err(|e| ParallelError::BuildError(e.to_string()))?;
            Ok(pool.install(op))
        }
    }
}

/// Apply a function to each RGBA pixel of a frame in parallel by rows.
///
/// PRECONDITION: `src` and `dst` must have the same size.
pub fn par_iter_rows_frame<T>(
    src: &Frame,
    dst: &mut Plane<T>,
    f: impl Fn(&[u8], &mut T) + Send + Sync,
) where
    T: Send + Sync,
{
    let cols = src.width();
    src.as_slice()
        .par_chunks_exact(Frame::CHANNELS * cols)
        .zip(dst.as_slice_mut().par_chunks_exact_mut(cols))
        .for_each(|(src_row, dst_row)| {
            src_row
                .chunks_exact(Frame::CHANNELS)
                .zip(dst_row.iter_mut())
                .for_each(|(src_pixel, dst_pixel)| {
                    f(src_pixel, dst_pixel);
                });
        });
}

/// Apply a function to each pixel of a plane in parallel by rows.
///
/// PRECONDITION: `src` and `dst` must have the same size.
pub fn par_iter_rows_val<T1, T2>(
    src: &Plane<T1>,
    dst: &mut Plane<T2>,
    f: impl Fn(&T1, &mut T2) + Send + Sync,
) where
    T1: Send + Sync,
    T2: Send + Sync,
{
    let cols = src.cols();
    src.as_slice()
        .par_chunks_exact(cols)
        .zip(dst.as_slice_mut().par_chunks_exact_mut(cols))
        .for_each(|(src_row, dst_row)| {
            src_row
                .iter()
                .zip(dst_row.iter_mut())
                .for_each(|(src_pixel, dst_pixel)| {
                    f(src_pixel, dst_pixel);
                });
        });
}

/// Fill the rows of a plane in parallel.
///
/// The closure receives the row index and the mutable row, so it can read any
/// neighborhood of an immutable source while writing only its own row.
pub fn par_iter_rows_indexed<T>(dst: &mut Plane<T>, f: impl Fn(usize, &mut [T]) + Send + Sync)
where
    T: Send + Sync,
{
    let cols = dst.cols();
    dst.as_slice_mut()
        .par_chunks_exact_mut(cols)
        .enumerate()
        .for_each(|(r, dst_row)| f(r, dst_row));
}

/// Fill the rows of two co-indexed planes in parallel.
///
/// PRECONDITION: `dst1` and `dst2` must have the same size.
pub fn par_iter_rows_indexed_two<T1, T2>(
    dst1: &mut Plane<T1>,
    dst2: &mut Plane<T2>,
    f: impl Fn(usize, &mut [T1], &mut [T2]) + Send + Sync,
) where
    T1: Send + Sync,
    T2: Send + Sync,
{
    let cols = dst1.cols();
    dst1.as_slice_mut()
        .par_chunks_exact_mut(cols)
        .zip(dst2.as_slice_mut().par_chunks_exact_mut(cols))
        .enumerate()
        .for_each(|(r, (dst1_row, dst2_row))| f(r, dst1_row, dst2_row));
}
