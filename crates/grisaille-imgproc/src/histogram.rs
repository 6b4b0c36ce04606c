use grisaille_image::{Image, ImageError};
use rayon::prelude::*;

use crate::parallel;

/// Number of intensity levels of an 8-bit image.
pub const NUM_BINS: usize = 256;

/// Per-intensity pixel counts of an 8-bit grayscale image.
///
/// The counts always sum to the number of pixels of the image they were computed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    counts: [usize; NUM_BINS],
}

impl Histogram {
    /// Build a histogram from raw counts.
    pub fn from_counts(counts: [usize; NUM_BINS]) -> Self {
        Self { counts }
    }

    /// Get the counts indexed by intensity.
    pub fn counts(&self) -> &[usize; NUM_BINS] {
        &self.counts
    }

    /// Get the count of a single intensity.
    pub fn get(&self, intensity: u8) -> usize {
        self.counts[intensity as usize]
    }

    /// Total number of counted pixels.
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Floor of the mean intensity, or 0 for an empty histogram.
    pub fn mean(&self) -> u8 {
        let total = self.total();
        if total == 0 {
            return 0;
        }
        let weighted = self
            .counts
            .iter()
            .enumerate()
            .map(|(i, &c)| i * c)
            .sum::<usize>();
        (weighted / total) as u8
    }

    /// Running cumulative sum of the counts.
    pub fn cdf(&self) -> [usize; NUM_BINS] {
        let mut cdf = [0usize; NUM_BINS];
        let mut acc = 0;
        for (dst, &count) in cdf.iter_mut().zip(self.counts.iter()) {
            acc += count;
            *dst = acc;
        }
        cdf
    }

    /// Intensities `i` in `1..=254` with `hist[i-1] < hist[i] > hist[i+1]`, ascending.
    pub fn local_maxima(&self) -> Vec<u8> {
        (1..NUM_BINS - 1)
            .filter(|&i| {
                self.counts[i - 1] < self.counts[i] && self.counts[i] > self.counts[i + 1]
            })
            .map(|i| i as u8)
            .collect()
    }

    /// Intensities `i` in `1..=254` with `hist[i-1] > hist[i] < hist[i+1]`, ascending.
    pub fn local_minima(&self) -> Vec<u8> {
        (1..NUM_BINS - 1)
            .filter(|&i| {
                self.counts[i - 1] > self.counts[i] && self.counts[i] < self.counts[i + 1]
            })
            .map(|i| i as u8)
            .collect()
    }
}

/// Compute the pixel intensity histogram of a grayscale image in one pass.
///
/// # Example
///
/// ```
/// use grisaille_image::{Image, ImageSize};
/// use grisaille_imgproc::histogram::compute_histogram;
///
/// let image = Image::<u8, 1>::new(
///   ImageSize {
///     width: 3,
///     height: 3,
///   },
///   vec![0, 2, 4, 128, 130, 132, 254, 255, 255],
/// ).unwrap();
///
/// let histogram = compute_histogram(&image);
/// assert_eq!(histogram.get(255), 2);
/// assert_eq!(histogram.total(), 9);
/// ```
pub fn compute_histogram(src: &Image<u8, 1>) -> Histogram {
    let counts = src
        .as_slice()
        .par_chunks(4096)
        .fold(
            || [0usize; NUM_BINS],
            |mut local, chunk| {
                for &px in chunk {
                    local[px as usize] += 1;
                }
                local
            },
        )
        .reduce(
            || [0usize; NUM_BINS],
            |mut a, b| {
                for (dst, val) in a.iter_mut().zip(b.iter()) {
                    *dst += val;
                }
                a
            },
        );

    Histogram { counts }
}

/// Build the equalization lookup table of a histogram.
///
/// `table[i] = (cdf[i] - cdf_min) * 255 / (cdf_max - cdf_min)` with integer floor
/// division, where `cdf_min` and `cdf_max` are the smallest and largest CDF entries.
/// When the CDF is flat (`cdf_max == cdf_min`) every intensity maps to 0.
///
/// The table is monotonic non-decreasing and within `[0, 255]`.
pub fn equalization_table(hist: &Histogram) -> [u8; NUM_BINS] {
    let cdf = hist.cdf();
    // the cdf is non-decreasing, its extremes sit at both ends
    let cdf_min = cdf[0];
    let cdf_max = cdf[NUM_BINS - 1];

    let mut table = [0u8; NUM_BINS];
    if cdf_max == cdf_min {
        log::debug!("equalization of a degenerate histogram, every level maps to 0");
        return table;
    }

    let range = cdf_max - cdf_min;
    for (dst, &c) in table.iter_mut().zip(cdf.iter()) {
        *dst = ((c - cdf_min) * 255 / range) as u8;
    }
    table
}

/// Perform histogram equalization on a grayscale image.
///
/// # Example
///
/// ```
/// use grisaille_image::{Image, ImageSize};
/// use grisaille_imgproc::histogram::equalize;
///
/// let image = Image::<u8, 1>::new(ImageSize { width: 4, height: 1 }, vec![10, 10, 20, 30]).unwrap();
/// let equalized = equalize(&image).unwrap();
///
/// assert_eq!(equalized.as_slice(), &[127, 127, 191, 255]);
/// ```
pub fn equalize(src: &Image<u8, 1>) -> Result<Image<u8, 1>, ImageError> {
    let table = equalization_table(&compute_histogram(src));

    let mut dst = Image::<u8, 1>::from_size_val(src.size(), 0)?;
    parallel::par_iter_rows_val(src, &mut dst, |&s, d| *d = table[s as usize]);

    Ok(dst)
}

#[cfg(test)]
mod tests {
    use super::*;
    use grisaille_image::ImageSize;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_compute_histogram() -> Result<(), ImageError> {
        let image = Image::new(
            ImageSize {
                width: 3,
                height: 3,
            },
            vec![0, 2, 4, 128, 130, 132, 254, 255, 255],
        )?;

        let histogram = compute_histogram(&image);
        assert_eq!(histogram.get(0), 1);
        assert_eq!(histogram.get(130), 1);
        assert_eq!(histogram.get(255), 2);
        assert_eq!(histogram.get(1), 0);
        assert_eq!(histogram.total(), 9);

        Ok(())
    }

    #[test]
    fn histogram_sums_to_pixel_count() -> Result<(), ImageError> {
        let mut rng = StdRng::seed_from_u64(7);
        for (width, height) in [(1, 1), (17, 3), (64, 80), (301, 29)] {
            let data = (0..width * height).map(|_| rng.random()).collect();
            let image = Image::<u8, 1>::new(ImageSize { width, height }, data)?;
            let histogram = compute_histogram(&image);
            assert_eq!(histogram.total(), width * height);

            let mut expected = [0usize; NUM_BINS];
            image
                .as_slice()
                .iter()
                .for_each(|&v| expected[v as usize] += 1);
            assert_eq!(histogram.counts(), &expected);
        }
        Ok(())
    }

    #[test]
    fn checkerboard_histogram() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::from_fn(
            ImageSize {
                width: 4,
                height: 4,
            },
            |row, col| if (row + col) % 2 == 0 { 0 } else { 255 },
        )?;

        let histogram = compute_histogram(&image);
        assert_eq!(histogram.get(0), 8);
        assert_eq!(histogram.get(255), 8);
        assert_eq!(histogram.total(), 16);
        assert_eq!(histogram.mean(), 127);
        Ok(())
    }

    #[test]
    fn cdf_and_extrema() {
        let mut counts = [0usize; NUM_BINS];
        counts[10] = 5;
        counts[11] = 2;
        counts[12] = 4;
        counts[200] = 9;
        let hist = Histogram::from_counts(counts);

        let cdf = hist.cdf();
        assert_eq!(cdf[9], 0);
        assert_eq!(cdf[10], 5);
        assert_eq!(cdf[12], 11);
        assert_eq!(cdf[255], 20);

        assert_eq!(hist.local_maxima(), vec![10, 12, 200]);
        assert_eq!(hist.local_minima(), vec![11]);
    }

    #[test]
    fn extrema_ignore_plateaus_and_ends() {
        let mut counts = [0usize; NUM_BINS];
        counts[0] = 100;
        counts[50] = 3;
        counts[51] = 3;
        counts[255] = 100;
        let hist = Histogram::from_counts(counts);
        assert!(hist.local_maxima().is_empty());
        assert!(hist.local_minima().is_empty());
    }

    #[test]
    fn equalize_flat_histogram_is_identity() -> Result<(), ImageError> {
        // every intensity appears exactly twice
        let image = Image::<u8, 1>::from_fn(
            ImageSize {
                width: 32,
                height: 16,
            },
            |row, col| ((row * 32 + col) % 256) as u8,
        )?;

        let equalized = equalize(&image)?;
        assert_eq!(equalized, image);

        let twice = equalize(&equalized)?;
        assert_eq!(twice, equalized);
        Ok(())
    }

    #[test]
    fn equalize_degenerate_is_zero() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::from_size_val(
            ImageSize {
                width: 3,
                height: 3,
            },
            0,
        )?;
        let table = equalization_table(&compute_histogram(&image));
        assert!(table.iter().all(|&v| v == 0));
        assert!(equalize(&image)?.as_slice().iter().all(|&v| v == 0));
        Ok(())
    }

    #[test]
    fn equalization_table_monotonic() -> Result<(), ImageError> {
        let mut rng = StdRng::seed_from_u64(3);
        let data = (0..40 * 40).map(|_| rng.random_range(30..90)).collect();
        let image = Image::<u8, 1>::new(
            ImageSize {
                width: 40,
                height: 40,
            },
            data,
        )?;
        let table = equalization_table(&compute_histogram(&image));
        assert!(table.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(table[255], 255);
        assert_eq!(table[0], 0);
        Ok(())
    }
}
