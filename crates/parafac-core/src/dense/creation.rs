//! Tensor creation and initialization methods
//!
//! Random tensors draw from `scirs2_core::random` (never rand/rand_distr
//! directly). The `_seeded` variants use a `StdRng` so tests and benchmarks
//! can reproduce their inputs.

use super::types::DenseND;
use scirs2_core::ndarray_ext::{Array, IxDyn};
use scirs2_core::numeric::{Num, NumCast};
use scirs2_core::random::{rngs::StdRng, Distribution, RandNormal as Normal, Rng, SeedableRng};

impl<T> DenseND<T>
where
    T: Clone + Num + NumCast,
{
    /// Create a tensor with values from a uniform distribution on `[low, high)`
    ///
    /// # Examples
    ///
    /// ```
    /// use parafac_core::dense::DenseND;
    ///
    /// let tensor = DenseND::<f64>::random_uniform(&[2, 3], 0.0, 1.0);
    /// assert_eq!(tensor.shape(), &[2, 3]);
    /// assert!(tensor.iter().all(|&x| (0.0..1.0).contains(&x)));
    /// ```
    pub fn random_uniform(shape: &[usize], low: f64, high: f64) -> Self
    where
        T: From<f64>,
    {
        use scirs2_core::random::quick::random_f64;
        let total: usize = shape.iter().product();
        let range = high - low;
        let data: Vec<T> = (0..total)
            .map(|_| <T as From<f64>>::from(low + random_f64() * range))
            .collect();
        Self::from_shape_data(shape, data)
    }

    /// Seeded variant of [`DenseND::random_uniform`]
    ///
    /// # Examples
    ///
    /// ```
    /// use parafac_core::dense::DenseND;
    ///
    /// let a = DenseND::<f64>::random_uniform_seeded(&[3, 3], -1.0, 1.0, 7);
    /// let b = DenseND::<f64>::random_uniform_seeded(&[3, 3], -1.0, 1.0, 7);
    /// assert_eq!(a, b);
    /// ```
    pub fn random_uniform_seeded(shape: &[usize], low: f64, high: f64, seed: u64) -> Self
    where
        T: From<f64>,
    {
        let mut rng = StdRng::seed_from_u64(seed);
        let total: usize = shape.iter().product();
        let range = high - low;
        let data: Vec<T> = (0..total)
            .map(|_| <T as From<f64>>::from(low + rng.random::<f64>() * range))
            .collect();
        Self::from_shape_data(shape, data)
    }

    /// Create a tensor with values from `N(mean, std²)` using a seeded `StdRng`
    ///
    /// Returns an error when `std` is negative or not finite.
    pub fn random_normal_seeded(
        shape: &[usize],
        mean: f64,
        std: f64,
        seed: u64,
    ) -> anyhow::Result<Self>
    where
        T: From<f64>,
    {
        let normal = Normal::new(mean, std)
            .map_err(|e| anyhow::anyhow!("Invalid normal distribution N({mean}, {std}²): {e}"))?;
        let mut rng = StdRng::seed_from_u64(seed);
        let total: usize = shape.iter().product();
        let data: Vec<T> = (0..total)
            .map(|_| <T as From<f64>>::from(normal.sample(&mut rng)))
            .collect();
        Ok(Self::from_shape_data(shape, data))
    }
}

impl<T> DenseND<T>
where
    T: Clone + Num,
{
    /// Create a tensor filled with a specific value
    ///
    /// Alias for `from_elem`, kept for NumPy-style call sites.
    ///
    /// # Examples
    ///
    /// ```
    /// use parafac_core::dense::DenseND;
    ///
    /// let tensor = DenseND::full(&[2, 2, 2], 1.0);
    /// assert!(tensor.iter().all(|&x| x == 1.0));
    /// ```
    pub fn full(shape: &[usize], value: T) -> Self {
        Self::from_elem(shape, value)
    }

    /// Build a tensor from row-major data whose length is known to match.
    fn from_shape_data(shape: &[usize], data: Vec<T>) -> Self {
        let mut array = Array::zeros(IxDyn(shape));
        for (slot, value) in array.iter_mut().zip(data) {
            *slot = value;
        }
        Self { data: array }
    }
}
