/// A 3x3 kernel indexed as `kernel[ky][kx]`.
pub type Kernel3 = [[f32; 3]; 3];

/// Integer approximation of a gaussian with sigma close to 0.85.
///
/// The weights sum to 16. Filters using it normalize by the weights of the
/// taps that fall inside the image.
pub const GAUSSIAN_KERNEL3: Kernel3 = [[1.0, 2.0, 1.0], [2.0, 4.0, 2.0], [1.0, 2.0, 1.0]];

/// Sobel kernel for the horizontal derivative.
pub const SOBEL_X_KERNEL3: Kernel3 = [[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]];

/// Sobel kernel for the vertical derivative, with y growing downwards.
pub const SOBEL_Y_KERNEL3: Kernel3 = [[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]];

/// Create the pair of 3x3 sobel kernels.
///
/// # Returns
///
/// The `(kernel_x, kernel_y)` pair.
pub fn sobel_kernel3() -> (Kernel3, Kernel3) {
    (SOBEL_X_KERNEL3, SOBEL_Y_KERNEL3)
}

/// Sum of all the weights of a kernel.
pub fn kernel_sum(kernel: &Kernel3) -> f32 {
    kernel.iter().flatten().sum()
}
