#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// point arithmetic on gray and color images.
pub mod arithmetic;

/// color transformations module.
pub mod color;

/// edge detection operators.
pub mod edges;

/// image filtering module.
pub mod filter;

/// error diffusion and threshold halftoning.
pub mod halftone;

/// compute image histogram module.
pub mod histogram;

/// operations to normalize real-valued grids into 8-bit images.
pub mod normalize;

/// border handling for windowed operators.
pub mod padding;

/// module containing parallization utilities.
pub mod parallel;

/// histogram driven thresholding and segmentation.
pub mod threshold;
