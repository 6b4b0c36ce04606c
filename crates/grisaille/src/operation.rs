//! A closed enumeration of every operator the engine offers.
//!
//! Each [`Operation`] variant carries the full parameter set of its operator, so a
//! caller picks an operator and its configuration in one value and hands it to
//! [`apply`] together with a [`RasterBuffer`]. Exhaustive matching keeps the
//! dispatcher in sync with the variants.
//!
//! Operators other than the point arithmetic ones ([`Operation::Invert`],
//! [`Operation::AddSelf`] and [`Operation::SubtractFromBrightened`]) work on
//! luminance: an RGB buffer is converted with
//! [`gray_from_rgb`](grisaille_imgproc::color::gray_from_rgb) first.

use std::borrow::Cow;

use grisaille_image::{Image, ImageError, RasterBuffer};
use grisaille_imgproc::{
    arithmetic, color, edges, filter, halftone, histogram,
    threshold::{self, ThresholdSource, Thresholded},
};

/// Default gaussian size of the difference of gaussians.
pub const DEFAULT_DOG_SIZE: usize = 5;

/// Default sigma of the narrow gaussian.
pub const DEFAULT_DOG_SIGMA1: f64 = 1.0;

/// Default sigma of the wide gaussian.
pub const DEFAULT_DOG_SIGMA2: f64 = 2.0;

/// Default block size of adaptive segmentation.
pub const DEFAULT_BLOCK_SIZE: usize = 16;

/// Default window size of the median filter.
pub const DEFAULT_MEDIAN_SIZE: usize = 5;

/// Parameters of the difference of gaussians.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DogConfig {
    /// Size of both gaussian kernels, odd and >= 3.
    pub size: usize,
    /// Sigma of the first gaussian.
    pub sigma1: f64,
    /// Sigma of the second gaussian.
    pub sigma2: f64,
}

impl Default for DogConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_DOG_SIZE,
            sigma1: DEFAULT_DOG_SIGMA1,
            sigma2: DEFAULT_DOG_SIGMA2,
        }
    }
}

/// The edge detection family.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EdgeMethod {
    /// Sobel gradient magnitude.
    Sobel,
    /// Prewitt gradient magnitude.
    Prewitt,
    /// Maximum kirsch compass response.
    Kirsch,
    /// Window `max - min`.
    Homogeneity,
    /// Forward horizontal and vertical differences.
    Difference,
    /// Window variance.
    Variance,
    /// Window `max - min`.
    Range,
    /// Distance of the center to the window mean.
    Contrast,
    /// Difference of two gaussian blurs.
    DifferenceOfGaussians(DogConfig),
}

/// Parameters of an edge detection.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeConfig {
    /// The operator to run.
    pub method: EdgeMethod,
    /// Window size of the statistical operators, odd and >= 3. Ignored by the others.
    pub window_size: usize,
}

impl Default for EdgeConfig {
    fn default() -> Self {
        Self {
            method: EdgeMethod::Sobel,
            window_size: edges::DEFAULT_WINDOW_SIZE,
        }
    }
}

/// Parameters of error diffusion halftoning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HalftoneConfig {
    /// Accumulated values at or above the threshold become white.
    pub threshold: u8,
}

impl Default for HalftoneConfig {
    fn default() -> Self {
        Self {
            threshold: halftone::DEFAULT_DIFFUSION_THRESHOLD,
        }
    }
}

/// How a segmentation picks its threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SegmentationMethod {
    /// A fixed threshold.
    Manual(u8),
    /// The floor of the mean intensity.
    Mean,
    /// The midpoint of the two dominant histogram peaks.
    Peak,
    /// The deepest histogram valley.
    Valley,
    /// One mean threshold per block.
    Adaptive,
}

/// Parameters of a segmentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SegmentationConfig {
    /// The threshold selection.
    pub method: SegmentationMethod,
    /// Block size of adaptive segmentation, > 0. Ignored by the others.
    pub block_size: usize,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            method: SegmentationMethod::Peak,
            block_size: DEFAULT_BLOCK_SIZE,
        }
    }
}

/// The smoothing and sharpening filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FilterMethod {
    /// 5x5 gaussian blur.
    Lowpass,
    /// 3x3 sharpening.
    Highpass,
    /// Window median.
    Median,
}

/// Parameters of a filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FilterConfig {
    /// The filter to run.
    pub method: FilterMethod,
    /// Window size of the median filter, odd and >= 3. Ignored by the others.
    pub median_size: usize,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            method: FilterMethod::Median,
            median_size: DEFAULT_MEDIAN_SIZE,
        }
    }
}

/// Every operator of the engine, with its configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Operation {
    /// Luminance conversion.
    Grayscale,
    /// `255 - v` on every sample, color preserving.
    Invert,
    /// `min(2v, 255)` on every sample, color preserving.
    AddSelf,
    /// `floor(1.5v - v)` on every sample, color preserving.
    SubtractFromBrightened,
    /// Histogram equalization.
    Equalize,
    /// Edge detection.
    Edges(EdgeConfig),
    /// Mean threshold halftoning.
    SimpleHalftone,
    /// Floyd-Steinberg halftoning.
    ErrorDiffusion(HalftoneConfig),
    /// Threshold based segmentation.
    Segmentation(SegmentationConfig),
    /// Smoothing or sharpening.
    Filter(FilterConfig),
}

/// The result of [`run`].
#[derive(Debug, Clone, PartialEq)]
pub struct Processed {
    /// The output buffer.
    pub buffer: RasterBuffer,
    /// The global threshold, for operators that choose one.
    pub threshold: Option<(u8, ThresholdSource)>,
}

impl Processed {
    fn gray(image: Image<u8, 1>) -> Self {
        Self {
            buffer: RasterBuffer::Gray(image),
            threshold: None,
        }
    }

    fn thresholded(res: Thresholded) -> Self {
        Self {
            buffer: RasterBuffer::Gray(res.image),
            threshold: Some((res.threshold, res.source)),
        }
    }
}

/// Get the luminance of a buffer, borrowing a gray one as is.
pub fn to_gray(src: &RasterBuffer) -> Result<Cow<'_, Image<u8, 1>>, ImageError> {
    match src {
        RasterBuffer::Gray(img) => Ok(Cow::Borrowed(img)),
        RasterBuffer::Rgb(img) => color::gray_from_rgb(img).map(Cow::Owned),
    }
}

fn point_op(
    src: &RasterBuffer,
    gray: impl Fn(&Image<u8, 1>) -> Result<Image<u8, 1>, ImageError>,
    rgb: impl Fn(&Image<u8, 3>) -> Result<Image<u8, 3>, ImageError>,
) -> Result<Processed, ImageError> {
    let buffer = match src {
        RasterBuffer::Gray(img) => RasterBuffer::Gray(gray(img)?),
        RasterBuffer::Rgb(img) => RasterBuffer::Rgb(rgb(img)?),
    };
    Ok(Processed {
        buffer,
        threshold: None,
    })
}

fn run_edges(gray: &Image<u8, 1>, config: &EdgeConfig) -> Result<Image<u8, 1>, ImageError> {
    let size = config.window_size;
    match config.method {
        EdgeMethod::Sobel => edges::sobel(gray),
        EdgeMethod::Prewitt => edges::prewitt(gray),
        EdgeMethod::Kirsch => edges::kirsch(gray),
        EdgeMethod::Homogeneity => edges::homogeneity(gray, size),
        EdgeMethod::Difference => edges::difference(gray),
        EdgeMethod::Variance => edges::variance(gray, size),
        EdgeMethod::Range => edges::range(gray, size),
        EdgeMethod::Contrast => edges::contrast(gray, size),
        EdgeMethod::DifferenceOfGaussians(dog) => {
            edges::difference_of_gaussians(gray, dog.size, dog.sigma1, dog.sigma2)
        }
    }
}

fn run_segmentation(
    gray: &Image<u8, 1>,
    config: &SegmentationConfig,
) -> Result<Processed, ImageError> {
    match config.method {
        SegmentationMethod::Manual(t) => Ok(Processed {
            buffer: RasterBuffer::Gray(threshold::manual_segmentation(gray, t)?),
            threshold: Some((t, ThresholdSource::Manual)),
        }),
        SegmentationMethod::Mean => threshold::mean_threshold(gray).map(Processed::thresholded),
        SegmentationMethod::Peak => threshold::peak_segmentation(gray).map(Processed::thresholded),
        SegmentationMethod::Valley => {
            threshold::valley_segmentation(gray).map(Processed::thresholded)
        }
        SegmentationMethod::Adaptive => {
            threshold::adaptive_segmentation(gray, config.block_size).map(Processed::gray)
        }
    }
}

fn run_filter(gray: &Image<u8, 1>, config: &FilterConfig) -> Result<Image<u8, 1>, ImageError> {
    match config.method {
        FilterMethod::Lowpass => filter::lowpass(gray),
        FilterMethod::Highpass => filter::highpass(gray),
        FilterMethod::Median => filter::median_filter(gray, config.median_size),
    }
}

/// Run an operation and keep the threshold it picked, if any.
///
/// The input buffer is never modified; the output is a freshly allocated buffer.
///
/// # Errors
///
/// Returns the operator's [`ImageError`] for invalid parameters, before any output
/// is produced.
pub fn run(src: &RasterBuffer, op: &Operation) -> Result<Processed, ImageError> {
    log::trace!(
        "apply {op:?} on a {} buffer with {} channel(s)",
        src.size(),
        src.num_channels()
    );

    match op {
        Operation::Invert => point_op(src, arithmetic::invert::<1>, arithmetic::invert::<3>),
        Operation::AddSelf => point_op(src, arithmetic::add_self::<1>, arithmetic::add_self::<3>),
        Operation::SubtractFromBrightened => point_op(
            src,
            arithmetic::subtract_from_brightened::<1>,
            arithmetic::subtract_from_brightened::<3>,
        ),
        Operation::Grayscale => Ok(Processed::gray(to_gray(src)?.into_owned())),
        Operation::Equalize => histogram::equalize(&*to_gray(src)?).map(Processed::gray),
        Operation::Edges(config) => run_edges(&*to_gray(src)?, config).map(Processed::gray),
        Operation::SimpleHalftone => {
            halftone::simple_halftone(&*to_gray(src)?).map(Processed::thresholded)
        }
        Operation::ErrorDiffusion(config) => {
            halftone::error_diffusion_halftone(&*to_gray(src)?, config.threshold)
                .map(Processed::gray)
        }
        Operation::Segmentation(config) => run_segmentation(&*to_gray(src)?, config),
        Operation::Filter(config) => run_filter(&*to_gray(src)?, config).map(Processed::gray),
    }
}

/// Apply an operation to a raster buffer.
///
/// Point arithmetic keeps the channel layout of `src`, every other operation returns
/// a gray buffer.
///
/// # Example
///
/// ```
/// use grisaille::image::{ImageSize, RasterBuffer};
/// use grisaille::operation::{apply, Operation};
///
/// let src = RasterBuffer::from_raw(ImageSize { width: 2, height: 1 }, 3, vec![255, 0, 0, 0, 0, 255]).unwrap();
///
/// let gray = apply(&src, &Operation::Grayscale).unwrap();
/// assert_eq!(gray.as_slice(), &[76, 29]);
///
/// let inverted = apply(&src, &Operation::Invert).unwrap();
/// assert_eq!(inverted.as_slice(), &[0, 255, 255, 255, 255, 0]);
/// ```
pub fn apply(src: &RasterBuffer, op: &Operation) -> Result<RasterBuffer, ImageError> {
    run(src, op).map(|processed| processed.buffer)
}
