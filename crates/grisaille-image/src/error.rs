/// Broad class of an [`ImageError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The buffer itself is malformed: empty, wrongly sized or with unsupported channels.
    InvalidBuffer,
    /// An operator parameter is outside its valid domain.
    InvalidParameter,
}

/// An error type for the image and image processing crates.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ImageError {
    /// Error when the image has a zero dimension.
    #[error("Image dimensions must be non-zero, got {0}x{1}")]
    InvalidImageDimensions(usize, usize),

    /// Error when channel and shape are not valid.
    #[error("Data length ({0}) does not match the image size ({1})")]
    InvalidChannelShape(usize, usize),

    /// Error when the number of channels is not supported.
    #[error("Unsupported number of channels {0}, expected 1 or 3")]
    UnsupportedChannelCount(usize),

    /// Error when two images that must match have different sizes.
    #[error("Image size mismatch: {0}x{1} vs {2}x{3}")]
    InvalidImageSize(usize, usize, usize, usize),

    /// Error when a pixel coordinate lies outside the image.
    #[error("Pixel index ({0}, {1}) is out of bounds ({2}x{3})")]
    PixelIndexOutOfBounds(usize, usize, usize, usize),

    /// Error when a kernel or window size is even or smaller than 3.
    #[error("Invalid kernel size {0}, must be odd and >= 3")]
    InvalidKernelSize(usize),

    /// Error when the block size of a block operator is zero.
    #[error("Invalid block size {0}, must be > 0")]
    InvalidBlockSize(usize),

    /// Error when a gaussian sigma is not strictly positive.
    #[error("Invalid sigma {0}, must be a finite value > 0")]
    InvalidSigma(f64),

    /// Error when a pixel value cannot be represented in the target type.
    #[error("Failed to cast image data to {0}")]
    CastError(String),
}

impl ImageError {
    /// Classify the error as a buffer or a parameter problem.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ImageError::InvalidImageDimensions(..)
            | ImageError::InvalidChannelShape(..)
            | ImageError::UnsupportedChannelCount(..)
            | ImageError::InvalidImageSize(..)
            | ImageError::PixelIndexOutOfBounds(..) => ErrorKind::InvalidBuffer,
            ImageError::InvalidKernelSize(..)
            | ImageError::InvalidBlockSize(..)
            | ImageError::InvalidSigma(..)
            | ImageError::CastError(..) => ErrorKind::InvalidParameter,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_kind() {
        assert_eq!(
            ImageError::InvalidImageDimensions(0, 4).kind(),
            ErrorKind::InvalidBuffer
        );
        assert_eq!(
            ImageError::UnsupportedChannelCount(4).kind(),
            ErrorKind::InvalidBuffer
        );
        assert_eq!(
            ImageError::InvalidKernelSize(4).kind(),
            ErrorKind::InvalidParameter
        );
        assert_eq!(
            ImageError::InvalidSigma(-1.0).kind(),
            ErrorKind::InvalidParameter
        );
    }
}
