use grisaille_image::{Image, ImageError, ImageSize};

use crate::parallel;

/// Maps index `i` to a valid index within `[0, len)` by mirroring at the borders,
/// starting with the edge sample itself.
///
/// Example: `...d c b a | a b c d...`, so `-1 -> 0`, `-2 -> 1` and `len -> len - 1`.
///
/// # Arguments
///
/// * `i` - The (possibly out-of-range) coordinate index.
/// * `len` - The valid length of the dimension, must be non-zero.
#[inline]
pub fn reflect_index(i: isize, len: usize) -> usize {
    if len == 1 {
        return 0;
    }
    let len = len as isize;
    let mut i = i;
    while i < 0 || i >= len {
        if i < 0 {
            i = -i - 1;
        } else {
            i = 2 * len - i - 1;
        }
    }
    i as usize
}

/// Pad an image by `pad` pixels on every side using reflect border handling.
///
/// The result has size `(width + 2 * pad, height + 2 * pad)`. Pixel `(x, y)` of the
/// source lands at `(x + pad, y + pad)`.
///
/// # Example
///
/// ```
/// use grisaille_image::{Image, ImageSize};
/// use grisaille_imgproc::padding::pad_reflect;
///
/// let image = Image::<u8, 1>::new(ImageSize { width: 3, height: 1 }, vec![1, 2, 3]).unwrap();
/// let padded = pad_reflect(&image, 2).unwrap();
///
/// assert_eq!(padded.width(), 7);
/// assert_eq!(&padded.as_slice()[14..21], &[2, 1, 1, 2, 3, 3, 2]);
/// ```
pub fn pad_reflect<T, const C: usize>(
    src: &Image<T, C>,
    pad: usize,
) -> Result<Image<T, C>, ImageError>
where
    T: Copy + Default + Send + Sync,
{
    let (width, height) = (src.width(), src.height());
    let new_size = ImageSize {
        width: width + 2 * pad,
        height: height + 2 * pad,
    };
    let mut dst = Image::<T, C>::from_size_val(new_size, T::default())?;

    let src_data = src.as_slice();
    parallel::par_fill_rows(&mut dst, |row, dst_row| {
        let src_y = reflect_index(row as isize - pad as isize, height);
        let src_row = &src_data[src_y * width * C..(src_y + 1) * width * C];
        for (x, dst_pixel) in dst_row.chunks_exact_mut(C).enumerate() {
            let src_x = reflect_index(x as isize - pad as isize, width);
            dst_pixel.copy_from_slice(&src_row[src_x * C..(src_x + 1) * C]);
        }
    });

    Ok(dst)
}
