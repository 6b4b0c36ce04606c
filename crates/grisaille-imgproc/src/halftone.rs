use grisaille_image::{Image, ImageError};

use crate::threshold::{self, ThresholdSource, Thresholded};

/// Default binarization threshold of [`error_diffusion_halftone`].
pub const DEFAULT_DIFFUSION_THRESHOLD: u8 = 128;

/// Floyd-Steinberg weights as `(dx, dy, weight)`, in propagation order.
const FLOYD_STEINBERG: [(isize, usize, f64); 4] = [
    (1, 0, 7.0 / 16.0),
    (-1, 1, 3.0 / 16.0),
    (0, 1, 5.0 / 16.0),
    (1, 1, 1.0 / 16.0),
];

/// Halftone an image against its mean intensity.
///
/// The threshold is the integer floor of the mean over all pixels and a pixel is set
/// to 255 only when strictly greater than it. A uniform image is therefore mapped
/// entirely to 0.
///
/// # Example
///
/// ```
/// use grisaille_image::{Image, ImageSize};
/// use grisaille_imgproc::halftone::simple_halftone;
///
/// let image = Image::<u8, 1>::new(ImageSize { width: 4, height: 1 }, vec![0, 255, 255, 0]).unwrap();
/// let halftone = simple_halftone(&image).unwrap();
///
/// assert_eq!(halftone.threshold, 127);
/// assert_eq!(halftone.image, image);
/// ```
pub fn simple_halftone(src: &Image<u8, 1>) -> Result<Thresholded, ImageError> {
    let threshold = threshold::mean_intensity(src);
    log::debug!("halftone threshold: {threshold}");

    Ok(Thresholded {
        image: threshold::manual_segmentation(src, threshold)?,
        threshold,
        source: ThresholdSource::Mean,
    })
}

/// Halftone an image with Floyd-Steinberg error diffusion.
///
/// Pixels are visited once in raster order. Each pixel's accumulated value is
/// binarized (`>= threshold` gives 255, else 0) and the quantization error is pushed
/// to the not yet visited neighbours: 7/16 right, 3/16 below-left, 5/16 below and
/// 1/16 below-right. Neighbours outside the image are skipped and their share of the
/// error is lost.
///
/// The error is accumulated in a private `f64` copy of the image; `src` is untouched.
///
/// # Arguments
///
/// * `src` - The input grayscale image.
/// * `threshold` - The binarization threshold, usually [`DEFAULT_DIFFUSION_THRESHOLD`].
///
/// # Example
///
/// ```
/// use grisaille_image::{Image, ImageSize};
/// use grisaille_imgproc::halftone::error_diffusion_halftone;
///
/// let image = Image::<u8, 1>::new(ImageSize { width: 3, height: 1 }, vec![200, 100, 100]).unwrap();
/// let halftone = error_diffusion_halftone(&image, 128).unwrap();
///
/// // the error of the first pixel pulls the second one down, the second pushes the third up
/// assert_eq!(halftone.as_slice(), &[255, 0, 255]);
/// ```
pub fn error_diffusion_halftone(
    src: &Image<u8, 1>,
    threshold: u8,
) -> Result<Image<u8, 1>, ImageError> {
    let (width, height) = (src.width(), src.height());
    let threshold = threshold as f64;

    // the working accumulator, the scan is sequential by construction
    let mut acc = src.cast::<f64>()?;
    let acc_data = acc.as_slice_mut();

    let mut dst = Image::<u8, 1>::from_size_val(src.size(), 0)?;
    let dst_data = dst.as_slice_mut();

    for y in 0..height {
        for x in 0..width {
            let idx = y * width + x;
            let old = acc_data[idx];
            let new = if old >= threshold { 255.0 } else { 0.0 };
            dst_data[idx] = new as u8;

            let error = old - new;
            for &(dx, dy, weight) in FLOYD_STEINBERG.iter() {
                let nx = x as isize + dx;
                let ny = y + dy;
                if nx < 0 || nx as usize >= width || ny >= height {
                    continue;
                }
                acc_data[ny * width + nx as usize] += error * weight;
            }
        }
    }

    Ok(dst)
}
