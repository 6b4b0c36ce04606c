use crate::parallel;
use grisaille_image::{Image, ImageError};

/// Define the RGB weights for the grayscale conversion.
const RW: f64 = 0.299;
const GW: f64 = 0.587;
const BW: f64 = 0.114;

/// Convert an RGB8 image to grayscale using the formula:
///
/// Y = floor(0.299 * R + 0.587 * G + 0.114 * B)
///
/// The weighted sum is truncated, never rounded up.
///
/// # Arguments
///
/// * `src` - The input RGB image.
///
/// # Returns
///
/// A new single channel image of the same size.
///
/// # Example
///
/// ```
/// use grisaille_image::{Image, ImageSize};
/// use grisaille_imgproc::color::gray_from_rgb;
///
/// let image = Image::<u8, 3>::new(
///     ImageSize {
///         width: 2,
///         height: 1,
///     },
///     vec![255, 255, 255, 10, 20, 30],
/// )
/// .unwrap();
///
/// let gray = gray_from_rgb(&image).unwrap();
/// assert_eq!(gray.num_channels(), 1);
/// assert_eq!(gray.as_slice(), &[255, 18]);
/// ```
pub fn gray_from_rgb(src: &Image<u8, 3>) -> Result<Image<u8, 1>, ImageError> {
    let mut dst = Image::<u8, 1>::from_size_val(src.size(), 0)?;

    // parallelize the grayscale conversion by rows
    parallel::par_iter_rows(src, &mut dst, |src_pixel, dst_pixel| {
        let r = src_pixel[0] as f64;
        let g = src_pixel[1] as f64;
        let b = src_pixel[2] as f64;
        dst_pixel[0] = (RW * r + GW * g + BW * b) as u8;
    });

    Ok(dst)
}
