use rayon::prelude::*;

use grisaille_image::Image;

/// Apply a function to each pixel in the image in parallel.
///
/// The closure receives the `C1` samples of a source pixel and the `C2` samples of the
/// matching destination pixel.
///
/// PRECONDITION: `src` and `dst` must have the same size.
pub fn par_iter_rows<T1, const C1: usize, T2, const C2: usize>(
    src: &Image<T1, C1>,
    dst: &mut Image<T2, C2>,
    f: impl Fn(&[T1], &mut [T2]) + Send + Sync,
) where
    T1: Send + Sync,
    T2: Send + Sync,
{
    let cols = src.cols();
    src.as_slice()
        .par_chunks_exact(C1 * cols)
        .zip(dst.as_slice_mut().par_chunks_exact_mut(C2 * cols))
        .for_each(|(src_chunk, dst_chunk)| {
            src_chunk
                .chunks_exact(C1)
                .zip(dst_chunk.chunks_exact_mut(C2))
                .for_each(|(src_pixel, dst_pixel)| {
                    f(src_pixel, dst_pixel);
                });
        });
}

/// Apply a function to each sample in the image in parallel.
///
/// PRECONDITION: `src` and `dst` must have the same size and number of channels.
pub fn par_iter_rows_val<T1, T2, const C: usize>(
    src: &Image<T1, C>,
    dst: &mut Image<T2, C>,
    f: impl Fn(&T1, &mut T2) + Send + Sync,
) where
    T1: Send + Sync,
    T2: Send + Sync,
{
    let cols = src.cols();
    src.as_slice()
        .par_chunks_exact(C * cols)
        .zip(dst.as_slice_mut().par_chunks_exact_mut(C * cols))
        .for_each(|(src_chunk, dst_chunk)| {
            src_chunk
                .iter()
                .zip(dst_chunk.iter_mut())
                .for_each(|(src_pixel, dst_pixel)| {
                    f(src_pixel, dst_pixel);
                });
        });
}

/// Fill each row of the image in parallel.
///
/// The closure receives the row index and the mutable samples of that row. Each row
/// is written by exactly one call, so the result does not depend on scheduling.
pub fn par_fill_rows<T, const C: usize>(
    dst: &mut Image<T, C>,
    f: impl Fn(usize, &mut [T]) + Send + Sync,
) where
    T: Send + Sync,
{
    let cols = dst.cols();
    dst.as_slice_mut()
        .par_chunks_exact_mut(C * cols)
        .enumerate()
        .for_each(|(row, dst_row)| f(row, dst_row));
}

#[cfg(test)]
mod tests {
    use grisaille_image::{Image, ImageError, ImageSize};

    #[test]
    fn par_iter_rows_collapses_channels() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 2,
            height: 2,
        };
        let src = Image::<u8, 3>::new(size, (0..12).collect())?;
        let mut dst = Image::<u8, 1>::from_size_val(size, 0)?;

        super::par_iter_rows(&src, &mut dst, |s, d| d[0] = s[0] + s[1] + s[2]);

        assert_eq!(dst.as_slice(), &[3, 12, 21, 30]);
        Ok(())
    }

    #[test]
    fn par_fill_rows_row_index() -> Result<(), ImageError> {
        let mut dst = Image::<usize, 1>::from_size_val(
            ImageSize {
                width: 3,
                height: 2,
            },
            0,
        )?;

        super::par_fill_rows(&mut dst, |row, samples| {
            samples.iter_mut().enumerate().for_each(|(col, v)| *v = row * 10 + col);
        });

        assert_eq!(dst.as_slice(), &[0, 1, 2, 10, 11, 12]);
        Ok(())
    }
}
