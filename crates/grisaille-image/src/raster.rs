use crate::{
    error::ImageError,
    image::{Image, ImageSize},
    GrayImage, RgbImage,
};

/// A decoded raster handed over by a codec collaborator.
///
/// The buffer is either single channel grayscale or three channel RGB, with 8-bit
/// samples so every value is within `[0, 255]` by construction.
#[derive(Clone, Debug, PartialEq)]
pub enum RasterBuffer {
    /// Single channel luminance buffer.
    Gray(GrayImage),
    /// Interleaved RGB buffer.
    Rgb(RgbImage),
}

impl RasterBuffer {
    /// Build a buffer from raw interleaved samples.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the raster in pixels.
    /// * `channels` - Samples per pixel, 1 or 3.
    /// * `data` - Row-major interleaved samples.
    ///
    /// # Errors
    ///
    /// Returns an error when the size is empty, `channels` is not 1 or 3, or the
    /// data length does not match.
    ///
    /// # Example
    ///
    /// ```
    /// use grisaille_image::{ImageSize, RasterBuffer};
    ///
    /// let raster = RasterBuffer::from_raw(
    ///     ImageSize { width: 2, height: 1 },
    ///     3,
    ///     vec![255, 0, 0, 0, 0, 255],
    /// ).unwrap();
    ///
    /// assert_eq!(raster.num_channels(), 3);
    /// assert!(RasterBuffer::from_raw(ImageSize { width: 2, height: 1 }, 4, vec![0; 8]).is_err());
    /// ```
    pub fn from_raw(size: ImageSize, channels: usize, data: Vec<u8>) -> Result<Self, ImageError> {
        match channels {
            1 => Ok(RasterBuffer::Gray(Image::new(size, data)?)),
            3 => Ok(RasterBuffer::Rgb(Image::new(size, data)?)),
            n => Err(ImageError::UnsupportedChannelCount(n)),
        }
    }

    /// Get the size of the raster in pixels.
    pub fn size(&self) -> ImageSize {
        match self {
            RasterBuffer::Gray(img) => img.size(),
            RasterBuffer::Rgb(img) => img.size(),
        }
    }

    /// Get the number of samples per pixel.
    pub fn num_channels(&self) -> usize {
        match self {
            RasterBuffer::Gray(_) => 1,
            RasterBuffer::Rgb(_) => 3,
        }
    }

    /// Get the interleaved samples.
    pub fn as_slice(&self) -> &[u8] {
        match self {
            RasterBuffer::Gray(img) => img.as_slice(),
            RasterBuffer::Rgb(img) => img.as_slice(),
        }
    }

    /// Consume the buffer and return the interleaved samples, e.g. for an encoder.
    pub fn into_vec(self) -> Vec<u8> {
        match self {
            RasterBuffer::Gray(img) => img.into_vec(),
            RasterBuffer::Rgb(img) => img.into_vec(),
        }
    }
}

impl From<GrayImage> for RasterBuffer {
    fn from(image: GrayImage) -> Self {
        RasterBuffer::Gray(image)
    }
}

impl From<RgbImage> for RasterBuffer {
    fn from(image: RgbImage) -> Self {
        RasterBuffer::Rgb(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raster_from_raw() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 2,
            height: 2,
        };

        let gray = RasterBuffer::from_raw(size, 1, vec![0, 1, 2, 3])?;
        assert!(matches!(gray, RasterBuffer::Gray(_)));
        assert_eq!(gray.size(), size);

        let rgb = RasterBuffer::from_raw(size, 3, vec![9; 12])?;
        assert!(matches!(rgb, RasterBuffer::Rgb(_)));
        assert_eq!(rgb.num_channels(), 3);
        assert_eq!(rgb.as_slice().len(), 12);

        Ok(())
    }

    #[test]
    fn raster_from_typed_image() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 3,
            height: 1,
        };
        let gray: RasterBuffer = GrayImage::new(size, vec![7, 8, 9])?.into();
        assert_eq!(gray.num_channels(), 1);
        assert_eq!(gray.into_vec(), vec![7, 8, 9]);

        let rgb: RasterBuffer = RgbImage::from_size_val(size, 4)?.into();
        assert_eq!(rgb.size(), size);
        assert_eq!(rgb.into_vec(), vec![4; 9]);
        Ok(())
    }

    #[test]
    fn raster_rejects_invalid() {
        let size = ImageSize {
            width: 2,
            height: 2,
        };
        assert_eq!(
            RasterBuffer::from_raw(size, 2, vec![0; 8]),
            Err(ImageError::UnsupportedChannelCount(2))
        );
        assert_eq!(
            RasterBuffer::from_raw(size, 1, vec![0; 3]),
            Err(ImageError::InvalidChannelShape(3, 4))
        );
        assert_eq!(
            RasterBuffer::from_raw(
                ImageSize {
                    width: 0,
                    height: 2
                },
                1,
                vec![]
            ),
            Err(ImageError::InvalidImageDimensions(0, 2))
        );
    }
}
