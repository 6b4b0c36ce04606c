//! Point operations that work on both gray and RGB images.
//!
//! Every sample is transformed independently, so the channel layout is preserved.

use grisaille_image::{Image, ImageError};

use crate::parallel;

/// Invert every sample: `dst = 255 - src`.
///
/// # Example
///
/// ```
/// use grisaille_image::{Image, ImageSize};
/// use grisaille_imgproc::arithmetic::invert;
///
/// let image = Image::<u8, 3>::new(ImageSize { width: 1, height: 1 }, vec![0, 100, 255]).unwrap();
/// assert_eq!(invert(&image).unwrap().as_slice(), &[255, 155, 0]);
/// ```
pub fn invert<const C: usize>(src: &Image<u8, C>) -> Result<Image<u8, C>, ImageError> {
    point_op(src, |v| 255 - v)
}

/// Add the image to a copy of itself, clipping at 255: `dst = min(2 * src, 255)`.
pub fn add_self<const C: usize>(src: &Image<u8, C>) -> Result<Image<u8, C>, ImageError> {
    point_op(src, |v| v.saturating_mul(2))
}

/// Subtract the image from a version brightened by 1.5.
///
/// Computed in floating point as `1.5 * src - src` and truncated, which is
/// `floor(src / 2)` for every 8-bit input.
pub fn subtract_from_brightened<const C: usize>(
    src: &Image<u8, C>,
) -> Result<Image<u8, C>, ImageError> {
    point_op(src, |v| {
        let v = v as f64;
        (v * 1.5 - v).clamp(0.0, 255.0) as u8
    })
}

fn point_op<const C: usize>(
    src: &Image<u8, C>,
    f: impl Fn(u8) -> u8 + Send + Sync,
) -> Result<Image<u8, C>, ImageError> {
    let mut dst = Image::<u8, C>::from_size_val(src.size(), 0)?;
    parallel::par_iter_rows_val(src, &mut dst, |&s, d| *d = f(s));
    Ok(dst)
}
