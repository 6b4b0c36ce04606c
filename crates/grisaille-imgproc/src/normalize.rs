//! Conversion of real-valued operator responses back into 8-bit images.
//!
//! Two policies are available:
//!
//! * **Clip** ([`normalize_clip`]) - values are clamped to `[0, 255]` and truncated.
//! * **Min-Max** ([`normalize_min_max`]) - values are rescaled with
//!   `255 * (v - min) / (max - min)` and truncated.
//!
//! A constant grid has `max == min`; min-max rescale maps it to an all-zero image
//! instead of dividing by zero.

use grisaille_image::{FloatGrid, Image};

/// The policy used to bring a response into `[0, 255]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Normalization {
    /// Clamp to `[0, 255]`.
    Clip,
    /// Rescale the full range of the response onto `[0, 255]`.
    MinMax,
}

/// Normalize a grid with the given policy.
pub fn normalize(src: &FloatGrid, mode: Normalization) -> Image<u8, 1> {
    match mode {
        Normalization::Clip => normalize_clip(src),
        Normalization::MinMax => normalize_min_max(src),
    }
}

/// Clamp every value to `[0, 255]` and truncate toward zero.
///
/// # Example
///
/// ```
/// use grisaille_image::{Image, ImageSize};
/// use grisaille_imgproc::normalize::normalize_clip;
///
/// let grid = Image::<f64, 1>::new(
///     ImageSize { width: 4, height: 1 },
///     vec![-20.0, 12.9, 255.5, 1e6],
/// ).unwrap();
///
/// assert_eq!(normalize_clip(&grid).as_slice(), &[0, 12, 255, 255]);
/// ```
pub fn normalize_clip(src: &FloatGrid) -> Image<u8, 1> {
    src.map(|&v| v.clamp(0.0, 255.0) as u8)
}

/// Rescale the grid so that its minimum maps to 0 and its maximum to 255.
///
/// # Example
///
/// ```
/// use grisaille_image::{Image, ImageSize};
/// use grisaille_imgproc::normalize::normalize_min_max;
///
/// let grid = Image::<f64, 1>::new(
///     ImageSize { width: 3, height: 1 },
///     vec![-1.0, 0.0, 1.0],
/// ).unwrap();
///
/// assert_eq!(normalize_min_max(&grid).as_slice(), &[0, 127, 255]);
/// ```
pub fn normalize_min_max(src: &FloatGrid) -> Image<u8, 1> {
    let (min, max) = min_max(src.as_slice());

    if max == min {
        log::debug!("min-max normalization of a constant grid ({min}), output is zero");
        return src.map(|_| 0u8);
    }

    let range = max - min;
    src.map(|&v| (255.0 * (v - min) / range) as u8)
}

fn min_max(data: &[f64]) -> (f64, f64) {
    data.iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        })
}
