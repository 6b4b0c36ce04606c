#![deny(missing_docs)]
//! Image types and errors shared by the grisaille engine

/// image representation for raster processing.
pub mod image;

/// Error types for the image module.
pub mod error;

/// collaborator-facing raster buffers.
pub mod raster;

pub use crate::error::{ErrorKind, ImageError};
pub use crate::image::{Image, ImageSize};
pub use crate::raster::RasterBuffer;

/// An 8-bit single channel image.
pub type GrayImage = Image<u8, 1>;

/// An 8-bit three channel image in RGB order.
pub type RgbImage = Image<u8, 3>;

/// A single channel real-valued image, the intermediate result of windowed operators.
pub type FloatGrid = Image<f64, 1>;
