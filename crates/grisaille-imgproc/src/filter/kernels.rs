use grisaille_image::ImageError;

/// Outer ring of a 3x3 kernel, clockwise from the top-left corner.
const RING_3X3: [(usize, usize); 8] = [
    (0, 0),
    (0, 1),
    (0, 2),
    (1, 2),
    (2, 2),
    (2, 1),
    (2, 0),
    (1, 0),
];

/// A square matrix of real-valued weights anchored at its center.
///
/// The size is always odd and at least 3, so the anchor is `(size / 2, size / 2)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    size: usize,
    data: Vec<f64>,
}

/// Check that a kernel or window size is odd and at least 3.
pub fn check_kernel_size(size: usize) -> Result<(), ImageError> {
    if size < 3 || size % 2 == 0 {
        return Err(ImageError::InvalidKernelSize(size));
    }
    Ok(())
}

impl Kernel {
    /// Create a kernel from row-major weights.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::InvalidKernelSize`] if `size` is even or below 3, and
    /// [`ImageError::InvalidChannelShape`] if `data` does not hold `size * size` weights.
    pub fn new(size: usize, data: Vec<f64>) -> Result<Self, ImageError> {
        check_kernel_size(size)?;
        if data.len() != size * size {
            return Err(ImageError::InvalidChannelShape(data.len(), size * size));
        }
        Ok(Self { size, data })
    }

    fn from_rows3(rows: [[f64; 3]; 3]) -> Self {
        Self {
            size: 3,
            data: rows.iter().flatten().copied().collect(),
        }
    }

    /// Create a gaussian kernel `exp(-(x² + y²) / (2σ²))` normalized to sum 1.
    ///
    /// The offsets `x` and `y` are measured from the anchor, so the kernel is symmetric.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the kernel, odd and >= 3.
    /// * `sigma` - The standard deviation, finite and > 0. `2σ²` must also be a normal
    ///   `f64`, so a sigma whose square underflows or overflows is rejected.
    ///
    /// # Example
    ///
    /// ```
    /// use grisaille_imgproc::filter::kernels::Kernel;
    ///
    /// let kernel = Kernel::gaussian(5, 1.0).unwrap();
    /// assert!((kernel.sum() - 1.0).abs() < 1e-6);
    /// assert_eq!(kernel.get(0, 0), kernel.get(4, 4));
    /// ```
    pub fn gaussian(size: usize, sigma: f64) -> Result<Self, ImageError> {
        check_kernel_size(size)?;
        if !(sigma.is_finite() && sigma > 0.0) {
            return Err(ImageError::InvalidSigma(sigma));
        }

        let center = (size / 2) as f64;
        let two_sigma_sq = 2.0 * sigma * sigma;
        if !two_sigma_sq.is_normal() {
            return Err(ImageError::InvalidSigma(sigma));
        }

        let mut data = Vec::with_capacity(size * size);
        for row in 0..size {
            for col in 0..size {
                let y = row as f64 - center;
                let x = col as f64 - center;
                data.push((-(x * x + y * y) / two_sigma_sq).exp());
            }
        }

        // the anchor weight is exp(0) = 1, so norm >= 1
        let norm = data.iter().sum::<f64>();
        data.iter_mut().for_each(|k| *k /= norm);

        Ok(Self { size, data })
    }

    /// Create the horizontal and vertical sobel kernels.
    pub fn sobel() -> (Self, Self) {
        let kernel_x = Self::from_rows3([[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]]);
        let kernel_y = Self::from_rows3([[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]]);
        (kernel_x, kernel_y)
    }

    /// Create the horizontal and vertical prewitt kernels.
    pub fn prewitt() -> (Self, Self) {
        let kernel_x = Self::from_rows3([[-1.0, 0.0, 1.0], [-1.0, 0.0, 1.0], [-1.0, 0.0, 1.0]]);
        let kernel_y = Self::from_rows3([[-1.0, -1.0, -1.0], [0.0, 0.0, 0.0], [1.0, 1.0, 1.0]]);
        (kernel_x, kernel_y)
    }

    /// Create the eight kirsch compass kernels.
    ///
    /// The first kernel is `[5, 5, 5; -3, 0, -3; -3, -3, -3]`, every following one
    /// rotates the outer ring by one position (45 degrees).
    pub fn kirsch() -> [Self; 8] {
        let ring = [5.0, 5.0, 5.0, -3.0, -3.0, -3.0, -3.0, -3.0];
        std::array::from_fn(|rotation| {
            let mut rows = [[0.0f64; 3]; 3];
            for (i, &(row, col)) in RING_3X3.iter().enumerate() {
                rows[row][col] = ring[(i + 8 - rotation) % 8];
            }
            Self::from_rows3(rows)
        })
    }

    /// Create the 3x3 high-pass (sharpening laplacian) kernel.
    pub fn highpass() -> Self {
        Self::from_rows3([[-1.0, -1.0, -1.0], [-1.0, 9.0, -1.0], [-1.0, -1.0, -1.0]])
    }

    /// Get the kernel size.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Get the anchor offset, `size / 2`.
    #[inline]
    pub fn anchor(&self) -> usize {
        self.size / 2
    }

    /// Get the row-major weights.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Get the weight at `(row, col)`.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row < self.size && col < self.size {
            Some(self.data[row * self.size + col])
        } else {
            None
        }
    }

    /// Get the sum of all kernel weights.
    pub fn sum(&self) -> f64 {
        self.data.iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn kernel_rejects_bad_sizes() {
        assert_eq!(
            Kernel::new(4, vec![0.0; 16]),
            Err(ImageError::InvalidKernelSize(4))
        );
        assert_eq!(Kernel::new(1, vec![1.0]), Err(ImageError::InvalidKernelSize(1)));
        assert_eq!(
            Kernel::new(3, vec![0.0; 8]),
            Err(ImageError::InvalidChannelShape(8, 9))
        );
    }

    #[test]
    fn gaussian_kernel() -> Result<(), ImageError> {
        let kernel = Kernel::gaussian(5, 1.0)?;
        assert_eq!(kernel.size(), 5);
        assert_eq!(kernel.anchor(), 2);
        assert_relative_eq!(kernel.sum(), 1.0, epsilon = 1e-6);

        // symmetric and peaked at the anchor
        let center = kernel.get(2, 2).unwrap_or_default();
        assert_eq!(kernel.get(1, 2), kernel.get(3, 2));
        assert_eq!(kernel.get(2, 1), kernel.get(1, 2));
        assert!(kernel.as_slice().iter().all(|&k| k <= center));

        // ratio between neighbours follows exp(-1 / (2 sigma²))
        let ratio = kernel.get(2, 3).unwrap_or_default() / center;
        assert_relative_eq!(ratio, (-0.5f64).exp(), epsilon = 1e-6);
        Ok(())
    }

    #[test]
    fn gaussian_rejects_bad_sigma() {
        assert_eq!(Kernel::gaussian(5, 0.0), Err(ImageError::InvalidSigma(0.0)));
        assert_eq!(Kernel::gaussian(5, -2.0), Err(ImageError::InvalidSigma(-2.0)));
        assert!(Kernel::gaussian(5, f64::NAN).is_err());
        assert_eq!(Kernel::gaussian(6, 1.0), Err(ImageError::InvalidKernelSize(6)));
    }

    #[test]
    fn gaussian_tiny_sigma_is_a_delta() -> Result<(), ImageError> {
        let kernel = Kernel::gaussian(5, 1e-30)?;
        assert!(kernel.as_slice().iter().all(|k| k.is_finite()));
        assert_eq!(kernel.sum(), 1.0);
        assert_eq!(kernel.get(2, 2), Some(1.0));
        assert_eq!(kernel.as_slice().iter().filter(|&&k| k != 0.0).count(), 1);
        Ok(())
    }

    #[test]
    fn gaussian_rejects_degenerate_sigma_square() {
        // 2σ² underflows to zero or a subnormal
        assert_eq!(
            Kernel::gaussian(5, 1e-200),
            Err(ImageError::InvalidSigma(1e-200))
        );
        assert_eq!(
            Kernel::gaussian(3, 1e-160),
            Err(ImageError::InvalidSigma(1e-160))
        );
        // 2σ² overflows
        assert_eq!(
            Kernel::gaussian(3, 1e200),
            Err(ImageError::InvalidSigma(1e200))
        );
    }

    #[test]
    fn sobel_and_prewitt() {
        let (sx, sy) = Kernel::sobel();
        assert_eq!(sx.as_slice(), &[-1.0, 0.0, 1.0, -2.0, 0.0, 2.0, -1.0, 0.0, 1.0]);
        assert_eq!(sy.as_slice(), &[-1.0, -2.0, -1.0, 0.0, 0.0, 0.0, 1.0, 2.0, 1.0]);
        assert_eq!(sx.sum(), 0.0);

        let (px, py) = Kernel::prewitt();
        assert_eq!(px.as_slice(), &[-1.0, 0.0, 1.0, -1.0, 0.0, 1.0, -1.0, 0.0, 1.0]);
        assert_eq!(py.sum(), 0.0);
    }

    #[test]
    fn kirsch_rotations() {
        let kernels = Kernel::kirsch();
        assert_eq!(
            kernels[0].as_slice(),
            &[5.0, 5.0, 5.0, -3.0, 0.0, -3.0, -3.0, -3.0, -3.0]
        );
        assert_eq!(
            kernels[1].as_slice(),
            &[-3.0, 5.0, 5.0, -3.0, 0.0, 5.0, -3.0, -3.0, -3.0]
        );
        assert_eq!(
            kernels[4].as_slice(),
            &[-3.0, -3.0, -3.0, -3.0, 0.0, -3.0, 5.0, 5.0, 5.0]
        );
        for kernel in kernels.iter() {
            assert_eq!(kernel.sum(), 0.0);
            assert_eq!(kernel.get(1, 1), Some(0.0));
        }
        // all eight rotations are distinct
        for i in 0..8 {
            for j in (i + 1)..8 {
                assert_ne!(kernels[i], kernels[j]);
            }
        }
    }

    #[test]
    fn highpass_sums_to_one() {
        assert_eq!(Kernel::highpass().sum(), 1.0);
    }
}
