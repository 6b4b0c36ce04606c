//! Global and block-adaptive thresholding.
//!
//! Every operator here produces a binary image with pixels in `{0, 255}`: a pixel is
//! set to 255 when its intensity is strictly greater than the threshold, 0 otherwise.
//! The global operators differ only in how they pick the threshold, and they return
//! the chosen value alongside the image.

use grisaille_image::{Image, ImageError};

use crate::{
    histogram::{compute_histogram, Histogram},
    parallel,
};

/// How a global threshold was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThresholdSource {
    /// The threshold was given by the caller.
    Manual,
    /// The floor of the mean intensity was requested directly.
    Mean,
    /// Midpoint of the two most frequent histogram peaks, in ascending intensity order.
    Peaks(u8, u8),
    /// The deepest histogram valley.
    Valley,
    /// Peak or valley detection found too few candidates; the mean intensity was used.
    MeanFallback,
}

/// A binary image together with the global threshold that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Thresholded {
    /// The binary image, pixels in `{0, 255}`.
    pub image: Image<u8, 1>,
    /// The threshold; pixels strictly above it are 255.
    pub threshold: u8,
    /// How the threshold was chosen.
    pub source: ThresholdSource,
}

/// Segment the image with a fixed threshold: `dst = src > threshold ? 255 : 0`.
///
/// # Example
///
/// ```
/// use grisaille_image::{Image, ImageSize};
/// use grisaille_imgproc::threshold::manual_segmentation;
///
/// let image = Image::<u8, 1>::new(ImageSize { width: 4, height: 1 }, vec![0, 100, 101, 255]).unwrap();
/// let segmented = manual_segmentation(&image, 100).unwrap();
///
/// assert_eq!(segmented.as_slice(), &[0, 0, 255, 255]);
/// ```
pub fn manual_segmentation(src: &Image<u8, 1>, threshold: u8) -> Result<Image<u8, 1>, ImageError> {
    let mut dst = Image::<u8, 1>::from_size_val(src.size(), 0)?;

    // run the thresholding operation in parallel
    parallel::par_iter_rows_val(src, &mut dst, |&s, d| {
        *d = if s > threshold { 255 } else { 0 };
    });

    Ok(dst)
}

/// Floor of the mean intensity over all pixels.
pub fn mean_intensity(src: &Image<u8, 1>) -> u8 {
    let sum = src.as_slice().iter().map(|&v| v as u64).sum::<u64>();
    (sum / src.as_slice().len() as u64) as u8
}

/// Threshold the image at the floor of its mean intensity.
///
/// A uniform image equals its own mean and therefore maps entirely to 0.
pub fn mean_threshold(src: &Image<u8, 1>) -> Result<Thresholded, ImageError> {
    let threshold = mean_intensity(src);
    log::debug!("mean threshold: {threshold}");

    Ok(Thresholded {
        image: manual_segmentation(src, threshold)?,
        threshold,
        source: ThresholdSource::Mean,
    })
}

/// Pick a threshold from the two highest histogram peaks.
///
/// Peaks are ranked by frequency, ties resolved toward the lower intensity. The two
/// winners are sorted by intensity and their integer midpoint is the threshold. With
/// fewer than two peaks the floor of the histogram mean is used instead.
pub fn select_peak_threshold(hist: &Histogram) -> (u8, ThresholdSource) {
    let mut peaks = hist.local_maxima();
    if peaks.len() < 2 {
        return (hist.mean(), ThresholdSource::MeanFallback);
    }

    // stable sort keeps ascending intensity among equal frequencies
    peaks.sort_by(|&a, &b| hist.get(b).cmp(&hist.get(a)));
    let (low, high) = if peaks[0] <= peaks[1] {
        (peaks[0], peaks[1])
    } else {
        (peaks[1], peaks[0])
    };

    let threshold = ((low as u16 + high as u16) / 2) as u8;
    (threshold, ThresholdSource::Peaks(low, high))
}

/// Pick the deepest histogram valley as threshold.
///
/// Among the local minima the one with the lowest frequency wins, ties resolved toward
/// the lower intensity. Without any valley the floor of the histogram mean is used.
pub fn select_valley_threshold(hist: &Histogram) -> (u8, ThresholdSource) {
    let valleys = hist.local_minima();

    // min_by_key returns the first of equal minima, i.e. the lowest intensity
    match valleys.iter().copied().min_by_key(|&v| hist.get(v)) {
        Some(valley) => (valley, ThresholdSource::Valley),
        None => (hist.mean(), ThresholdSource::MeanFallback),
    }
}

/// Segment the image at the midpoint between its two dominant histogram peaks.
///
/// See [`select_peak_threshold`] for how the threshold is chosen.
pub fn peak_segmentation(src: &Image<u8, 1>) -> Result<Thresholded, ImageError> {
    let (threshold, source) = select_peak_threshold(&compute_histogram(src));
    log::debug!("peak threshold: {threshold} ({source:?})");

    Ok(Thresholded {
        image: manual_segmentation(src, threshold)?,
        threshold,
        source,
    })
}

/// Segment the image at the deepest valley of its histogram.
///
/// See [`select_valley_threshold`] for how the threshold is chosen.
pub fn valley_segmentation(src: &Image<u8, 1>) -> Result<Thresholded, ImageError> {
    let (threshold, source) = select_valley_threshold(&compute_histogram(src));
    log::debug!("valley threshold: {threshold} ({source:?})");

    Ok(Thresholded {
        image: manual_segmentation(src, threshold)?,
        threshold,
        source,
    })
}

/// Threshold every block of the image against its own mean.
///
/// The image is split into non-overlapping `block_size x block_size` blocks starting
/// at the top-left corner. The block extent is clamped to the image width along x and
/// to the image height along y, so a block larger than the image covers it whole.
/// On a non-square image with `height < block_size < width` the blocks are therefore
/// `block_size x height` strips rather than `height x height` squares.
/// Blocks on the last row and column are truncated, not padded. A pixel is 255 when
/// it is strictly greater than the real-valued mean of its block.
///
/// # Errors
///
/// Returns [`ImageError::InvalidBlockSize`] if `block_size` is zero.
///
/// # Example
///
/// ```
/// use grisaille_image::{Image, ImageSize};
/// use grisaille_imgproc::threshold::adaptive_segmentation;
///
/// let image = Image::<u8, 1>::new(ImageSize { width: 4, height: 1 }, vec![10, 20, 200, 100]).unwrap();
/// let segmented = adaptive_segmentation(&image, 2).unwrap();
///
/// // blocks [10, 20] and [200, 100], with means 15 and 150
/// assert_eq!(segmented.as_slice(), &[0, 255, 255, 0]);
/// ```
pub fn adaptive_segmentation(
    src: &Image<u8, 1>,
    block_size: usize,
) -> Result<Image<u8, 1>, ImageError> {
    if block_size == 0 {
        return Err(ImageError::InvalidBlockSize(block_size));
    }

    let (width, height) = (src.width(), src.height());
    let (block_w, block_h) = (block_size.min(width), block_size.min(height));
    log::debug!("adaptive segmentation with {block_w}x{block_h} blocks");

    let src_data = src.as_slice();
    let mut dst = Image::<u8, 1>::from_size_val(src.size(), 0)?;
    let dst_data = dst.as_slice_mut();

    for y0 in (0..height).step_by(block_h) {
        let y1 = (y0 + block_h).min(height);
        for x0 in (0..width).step_by(block_w) {
            let x1 = (x0 + block_w).min(width);

            let sum = (y0..y1)
                .flat_map(|y| src_data[y * width + x0..y * width + x1].iter())
                .map(|&v| v as f64)
                .sum::<f64>();
            let mean = sum / ((y1 - y0) * (x1 - x0)) as f64;

            for y in y0..y1 {
                for x in x0..x1 {
                    let idx = y * width + x;
                    dst_data[idx] = if src_data[idx] as f64 > mean { 255 } else { 0 };
                }
            }
        }
    }

    Ok(dst)
}
