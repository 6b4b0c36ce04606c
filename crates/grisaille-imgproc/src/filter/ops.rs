use grisaille_image::{FloatGrid, Image, ImageError};

use super::kernels::{check_kernel_size, Kernel};
use crate::{normalize, padding, parallel};

/// Size of the gaussian used by [`lowpass`].
const LOWPASS_SIZE: usize = 5;

/// Sigma of the gaussian used by [`lowpass`].
const LOWPASS_SIGMA: f64 = 1.0;

/// Apply a scalar-reducing function over every `size x size` neighborhood.
///
/// The image is reflect padded by `size / 2` pixels first, so every output pixel sees a
/// full window. The window is passed row-major, with the center sample at index
/// `size * size / 2`. Rows are evaluated in parallel.
///
/// # Arguments
///
/// * `src` - The input grayscale image.
/// * `size` - The window size, odd and >= 3.
/// * `op` - The reduction applied to each window.
///
/// # Errors
///
/// Returns [`ImageError::InvalidKernelSize`] if `size` is even or below 3.
///
/// # Example
///
/// ```
/// use grisaille_image::{Image, ImageSize};
/// use grisaille_imgproc::filter::apply_window;
///
/// let image = Image::<u8, 1>::new(ImageSize { width: 3, height: 1 }, vec![0, 10, 20]).unwrap();
/// let maxima = apply_window(&image, 3, |w| w.iter().copied().fold(f64::MIN, f64::max)).unwrap();
///
/// assert_eq!(maxima.as_slice(), &[10.0, 20.0, 20.0]);
/// ```
pub fn apply_window<F>(src: &Image<u8, 1>, size: usize, op: F) -> Result<FloatGrid, ImageError>
where
    F: Fn(&[f64]) -> f64 + Send + Sync,
{
    check_kernel_size(size)?;

    let padded = padding::pad_reflect(&src.cast::<f64>()?, size / 2)?;
    let padded_cols = padded.cols();
    let padded_data = padded.as_slice();

    let mut dst = FloatGrid::from_size_val(src.size(), 0.0)?;

    parallel::par_fill_rows(&mut dst, |row, dst_row| {
        let mut window = vec![0.0f64; size * size];
        for (col, dst_pixel) in dst_row.iter_mut().enumerate() {
            for (ky, window_row) in window.chunks_exact_mut(size).enumerate() {
                let start = (row + ky) * padded_cols + col;
                window_row.copy_from_slice(&padded_data[start..start + size]);
            }
            *dst_pixel = op(&window);
        }
    });

    Ok(dst)
}

/// Convolve a grayscale image with a kernel.
///
/// Each output pixel is the sum of element-wise products between the kernel and the
/// reflect-padded neighborhood centered on the pixel. The kernel is not flipped.
///
/// # Returns
///
/// The unnormalized real-valued response.
///
/// # Example
///
/// ```
/// use grisaille_image::{Image, ImageSize};
/// use grisaille_imgproc::filter::{convolve, Kernel};
///
/// let image = Image::<u8, 1>::from_size_val(ImageSize { width: 4, height: 4 }, 10).unwrap();
/// let response = convolve(&image, &Kernel::highpass()).unwrap();
///
/// assert!(response.as_slice().iter().all(|&v| (v - 10.0).abs() < 1e-4));
/// ```
pub fn convolve(src: &Image<u8, 1>, kernel: &Kernel) -> Result<FloatGrid, ImageError> {
    let weights = kernel.as_slice();
    apply_window(src, kernel.size(), |window| {
        window
            .iter()
            .zip(weights.iter())
            .map(|(&v, &k)| v * k)
            .sum()
    })
}

/// Apply a low-pass filter: a 5x5 gaussian with sigma 1, clip normalized.
pub fn lowpass(src: &Image<u8, 1>) -> Result<Image<u8, 1>, ImageError> {
    let kernel = Kernel::gaussian(LOWPASS_SIZE, LOWPASS_SIGMA)?;
    let response = convolve(src, &kernel)?;
    Ok(normalize::normalize_clip(&response))
}

/// Apply a high-pass filter with the 3x3 sharpening kernel, clip normalized.
pub fn highpass(src: &Image<u8, 1>) -> Result<Image<u8, 1>, ImageError> {
    let response = convolve(src, &Kernel::highpass())?;
    Ok(normalize::normalize_clip(&response))
}

/// Replace every pixel by the median of its `size x size` neighborhood.
///
/// # Errors
///
/// Returns [`ImageError::InvalidKernelSize`] if `size` is even or below 3.
pub fn median_filter(src: &Image<u8, 1>, size: usize) -> Result<Image<u8, 1>, ImageError> {
    let response = apply_window(src, size, |window| {
        let mut samples = window.to_vec();
        let mid = samples.len() / 2;
        let (_, median, _) = samples.select_nth_unstable_by(mid, f64::total_cmp);
        *median
    })?;
    Ok(normalize::normalize_clip(&response))
}
