//! Edge detection operators.
//!
//! The gradient operators ([`sobel`], [`prewitt`], [`kirsch`]) and [`difference`] are
//! clip normalized. The statistical window operators and [`difference_of_gaussians`]
//! produce small, unbounded responses and are min-max rescaled instead.
//!
//! Every windowed read goes through reflect padding, see [`crate::padding`].

use grisaille_image::{FloatGrid, Image, ImageError};

use crate::{
    filter::{self, Kernel},
    normalize, parallel,
};

/// Default window size of the statistical operators.
pub const DEFAULT_WINDOW_SIZE: usize = 3;

/// Combine two gradient responses into their euclidean magnitude.
fn magnitude(gx: &FloatGrid, gy: &FloatGrid) -> Result<FloatGrid, ImageError> {
    let mut dst = FloatGrid::from_size_val(gx.size(), 0.0)?;
    parallel::par_fill_rows(&mut dst, |row, dst_row| {
        let offset = row * dst_row.len();
        let gx_row = &gx.as_slice()[offset..offset + dst_row.len()];
        let gy_row = &gy.as_slice()[offset..offset + dst_row.len()];
        for ((d, &x), &y) in dst_row.iter_mut().zip(gx_row).zip(gy_row) {
            *d = (x * x + y * y).sqrt();
        }
    });
    Ok(dst)
}

fn gradient(src: &Image<u8, 1>, (kx, ky): (Kernel, Kernel)) -> Result<Image<u8, 1>, ImageError> {
    let gx = filter::convolve(src, &kx)?;
    let gy = filter::convolve(src, &ky)?;
    Ok(normalize::normalize_clip(&magnitude(&gx, &gy)?))
}

/// Compute the sobel gradient magnitude `sqrt(gx² + gy²)`, clip normalized.
///
/// # Example
///
/// ```
/// use grisaille_image::{Image, ImageSize};
/// use grisaille_imgproc::edges::sobel;
///
/// let image = Image::<u8, 1>::from_fn(ImageSize { width: 4, height: 3 }, |_, col| {
///     if col < 2 { 0 } else { 50 }
/// }).unwrap();
/// let edges = sobel(&image).unwrap();
///
/// assert_eq!(edges.as_slice()[..4], [0, 200, 200, 0]);
/// ```
pub fn sobel(src: &Image<u8, 1>) -> Result<Image<u8, 1>, ImageError> {
    gradient(src, Kernel::sobel())
}

/// Compute the prewitt gradient magnitude `sqrt(gx² + gy²)`, clip normalized.
pub fn prewitt(src: &Image<u8, 1>) -> Result<Image<u8, 1>, ImageError> {
    gradient(src, Kernel::prewitt())
}

/// Compute the maximum response over the eight kirsch compass kernels, clip normalized.
///
/// Negative maxima clip to 0, so a pixel with no positive directional response is 0.
pub fn kirsch(src: &Image<u8, 1>) -> Result<Image<u8, 1>, ImageError> {
    let kernels = Kernel::kirsch();
    let response = filter::apply_window(src, 3, |window| {
        kernels
            .iter()
            .map(|kernel| {
                window
                    .iter()
                    .zip(kernel.as_slice())
                    .map(|(&v, &k)| v * k)
                    .sum::<f64>()
            })
            .fold(f64::NEG_INFINITY, f64::max)
    })?;
    Ok(normalize::normalize_clip(&response))
}

fn window_range(window: &[f64]) -> f64 {
    let (lo, hi) = window
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    hi - lo
}

fn window_mean(window: &[f64]) -> f64 {
    window.iter().sum::<f64>() / window.len() as f64
}

/// Homogeneity operator: `max - min` of every `size x size` window, min-max rescaled.
///
/// # Errors
///
/// Returns [`ImageError::InvalidKernelSize`] if `size` is even or below 3.
pub fn homogeneity(src: &Image<u8, 1>, size: usize) -> Result<Image<u8, 1>, ImageError> {
    let response = filter::apply_window(src, size, window_range)?;
    Ok(normalize::normalize_min_max(&response))
}

/// Range operator: `max - min` of every `size x size` window, min-max rescaled.
///
/// Shares its reduction with [`homogeneity`]; both are kept as distinct operators.
pub fn range(src: &Image<u8, 1>, size: usize) -> Result<Image<u8, 1>, ImageError> {
    let response = filter::apply_window(src, size, window_range)?;
    Ok(normalize::normalize_min_max(&response))
}

/// Variance operator: population variance of every `size x size` window, min-max rescaled.
pub fn variance(src: &Image<u8, 1>, size: usize) -> Result<Image<u8, 1>, ImageError> {
    let response = filter::apply_window(src, size, |window| {
        let mean = window_mean(window);
        window.iter().map(|&v| (v - mean) * (v - mean)).sum::<f64>() / window.len() as f64
    })?;
    Ok(normalize::normalize_min_max(&response))
}

/// Contrast operator: `|center - mean(window)|`, min-max rescaled.
pub fn contrast(src: &Image<u8, 1>, size: usize) -> Result<Image<u8, 1>, ImageError> {
    let response = filter::apply_window(src, size, |window| {
        (window[window.len() / 2] - window_mean(window)).abs()
    })?;
    Ok(normalize::normalize_min_max(&response))
}

/// Difference operator: the larger of the absolute forward differences to the right
/// neighbour and to the neighbour below, clip normalized.
///
/// The last column has no horizontal difference and the last row no vertical one;
/// a missing difference counts as 0.
///
/// # Example
///
/// ```
/// use grisaille_image::{Image, ImageSize};
/// use grisaille_imgproc::edges::difference;
///
/// let image = Image::<u8, 1>::new(ImageSize { width: 3, height: 1 }, vec![10, 40, 25]).unwrap();
///
/// assert_eq!(difference(&image).unwrap().as_slice(), &[30, 15, 0]);
/// ```
pub fn difference(src: &Image<u8, 1>) -> Result<Image<u8, 1>, ImageError> {
    let (width, height) = (src.width(), src.height());
    let src_data = src.as_slice();

    let mut response = FloatGrid::from_size_val(src.size(), 0.0)?;
    parallel::par_fill_rows(&mut response, |row, dst_row| {
        for (col, dst_pixel) in dst_row.iter_mut().enumerate() {
            let idx = row * width + col;
            let center = src_data[idx] as f64;
            let h = if col + 1 < width {
                (src_data[idx + 1] as f64 - center).abs()
            } else {
                0.0
            };
            let v = if row + 1 < height {
                (src_data[idx + width] as f64 - center).abs()
            } else {
                0.0
            };
            *dst_pixel = h.max(v);
        }
    });

    Ok(normalize::normalize_clip(&response))
}

/// Difference of gaussians: `|g1 * src - g2 * src|`, min-max rescaled.
///
/// Both gaussians share the same `size`; see [`Kernel::gaussian`].
///
/// # Errors
///
/// Returns [`ImageError::InvalidKernelSize`] for an even or too small `size`, and
/// [`ImageError::InvalidSigma`] if either sigma is not strictly positive.
pub fn difference_of_gaussians(
    src: &Image<u8, 1>,
    size: usize,
    sigma1: f64,
    sigma2: f64,
) -> Result<Image<u8, 1>, ImageError> {
    let g1 = Kernel::gaussian(size, sigma1)?;
    let g2 = Kernel::gaussian(size, sigma2)?;

    let smooth1 = filter::convolve(src, &g1)?;
    let smooth2 = filter::convolve(src, &g2)?;

    let mut response = FloatGrid::from_size_val(src.size(), 0.0)?;
    response
        .as_slice_mut()
        .iter_mut()
        .zip(smooth1.as_slice().iter().zip(smooth2.as_slice()))
        .for_each(|(d, (&a, &b))| *d = (a - b).abs());

    Ok(normalize::normalize_min_max(&response))
}
