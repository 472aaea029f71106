//! Shape manipulation: reshape, permute and matricization
//!
//! Matricization turns a tensor into a matrix whose rows are indexed by one
//! mode and whose columns flatten the remaining modes. The column order is a
//! convention, and the CP-ALS update is only valid when it agrees with the
//! order of the Khatri-Rao product it is multiplied with. [`DenseND::unfold`]
//! fixes the conventional increasing order; [`DenseND::matricize`] lets the
//! caller choose.

use super::types::DenseND;
use scirs2_core::ndarray_ext::{Array2, Ix2, IxDyn};
use scirs2_core::numeric::Num;

impl<T> DenseND<T>
where
    T: Clone + Num,
{
    /// Reshape the tensor to a new shape (row-major element order)
    ///
    /// # Examples
    ///
    /// ```
    /// use parafac_core::dense::DenseND;
    ///
    /// let tensor = DenseND::<f64>::zeros(&[2, 3, 4]);
    /// let reshaped = tensor.reshape(&[6, 4]).unwrap();
    /// assert_eq!(reshaped.shape(), &[6, 4]);
    /// ```
    pub fn reshape(&self, new_shape: &[usize]) -> anyhow::Result<Self> {
        let new_size: usize = new_shape.iter().product();
        let old_size = self.len();
        if new_size != old_size {
            anyhow::bail!(
                "Cannot reshape tensor of size {} into shape {:?} (size {})",
                old_size,
                new_shape,
                new_size
            );
        }
        if let Ok(reshaped) = self.data.view().into_shape_with_order(IxDyn(new_shape)) {
            Ok(Self {
                data: reshaped.to_owned(),
            })
        } else {
            // Non-contiguous (e.g. permuted): copy in logical order
            let flat: Vec<T> = self.data.iter().cloned().collect();
            Self::from_vec(flat, new_shape)
        }
    }

    /// Permute (transpose) the axes of the tensor.
    ///
    /// # Examples
    ///
    /// ```
    /// use parafac_core::dense::DenseND;
    ///
    /// let tensor = DenseND::<f64>::zeros(&[2, 3, 4]);
    /// let permuted = tensor.permute(&[2, 0, 1]).unwrap();
    /// assert_eq!(permuted.shape(), &[4, 2, 3]);
    /// ```
    pub fn permute(&self, axes: &[usize]) -> anyhow::Result<Self> {
        if axes.len() != self.rank() {
            anyhow::bail!(
                "Permutation axes length {} does not match tensor rank {}",
                axes.len(),
                self.rank()
            );
        }
        let mut seen = vec![false; self.rank()];
        for &axis in axes {
            if axis >= self.rank() {
                anyhow::bail!("Invalid axis {} for rank {}", axis, self.rank());
            }
            if seen[axis] {
                anyhow::bail!("Duplicate axis {} in permutation", axis);
            }
            seen[axis] = true;
        }
        let permuted = self.data.clone().permuted_axes(IxDyn(axes));
        Ok(Self { data: permuted })
    }

    /// Matricize the tensor with `row_mode` as the row index.
    ///
    /// `col_modes` lists every other mode exactly once; the column index
    /// flattens them row-major in the given order, so the first listed mode
    /// varies slowest and the last listed mode fastest.
    ///
    /// # Arguments
    ///
    /// * `row_mode` - Mode that becomes the row index
    /// * `col_modes` - Remaining modes, slowest to fastest
    ///
    /// # Returns
    ///
    /// Matrix of shape `(shape[row_mode], len / shape[row_mode])`
    ///
    /// # Examples
    ///
    /// ```
    /// use parafac_core::dense::DenseND;
    ///
    /// let data: Vec<f64> = (0..8).map(|x| x as f64).collect();
    /// let tensor = DenseND::from_vec(data, &[2, 2, 2]).unwrap();
    ///
    /// // Columns ordered with mode 2 slowest and mode 1 fastest
    /// let m = tensor.matricize(0, &[2, 1]).unwrap();
    /// assert_eq!(m.shape(), &[2, 4]);
    /// assert_eq!(m[[0, 1]], tensor[&[0, 1, 0]]);
    /// assert_eq!(m[[0, 2]], tensor[&[0, 0, 1]]);
    /// ```
    pub fn matricize(&self, row_mode: usize, col_modes: &[usize]) -> anyhow::Result<Array2<T>> {
        let rank = self.rank();
        if row_mode >= rank {
            anyhow::bail!("Mode {} out of bounds for rank {}", row_mode, rank);
        }
        if col_modes.len() + 1 != rank {
            anyhow::bail!(
                "Column modes {:?} must list the {} modes other than {}",
                col_modes,
                rank - 1,
                row_mode
            );
        }
        if col_modes.contains(&row_mode) {
            anyhow::bail!("Row mode {} repeated in column modes {:?}", row_mode, col_modes);
        }

        let rows = self.shape()[row_mode];
        let cols: usize = col_modes
            .iter()
            .map(|&m| self.shape().get(m).copied().unwrap_or(0))
            .product();

        let mut perm = Vec::with_capacity(rank);
        perm.push(row_mode);
        perm.extend_from_slice(col_modes);

        // permute validates range and duplicates
        let permuted = self.permute(&perm)?;
        let reshaped = permuted.reshape(&[rows, cols])?;

        reshaped
            .data
            .into_dimensionality::<Ix2>()
            .map_err(|e| anyhow::anyhow!("Failed to convert to 2D: {}", e))
    }

    /// Unfold (matricize) the tensor along a mode.
    ///
    /// Mode `mode` becomes the row index; the remaining modes are flattened
    /// into columns in increasing order, the last mode varying fastest.
    ///
    /// # Examples
    ///
    /// ```
    /// use parafac_core::dense::DenseND;
    ///
    /// let tensor = DenseND::<f64>::ones(&[2, 3, 4]);
    /// let unfolded = tensor.unfold(1).unwrap();
    /// assert_eq!(unfolded.shape(), &[3, 8]);
    /// ```
    pub fn unfold(&self, mode: usize) -> anyhow::Result<Array2<T>> {
        if mode >= self.rank() {
            anyhow::bail!("Mode {} out of bounds for rank {}", mode, self.rank());
        }
        let col_modes: Vec<usize> = (0..self.rank()).filter(|&m| m != mode).collect();
        self.matricize(mode, &col_modes)
    }

    /// Fold (tensorize) a matrix back into a tensor.
    ///
    /// Inverse of [`DenseND::unfold`]: `fold(unfold(x, n), shape, n) == x`.
    ///
    /// # Examples
    ///
    /// ```
    /// use parafac_core::dense::DenseND;
    /// use scirs2_core::ndarray_ext::Array2;
    ///
    /// let matrix: Array2<f64> = Array2::zeros((2, 6));
    /// let tensor = DenseND::fold(&matrix, &[2, 3, 2], 0).unwrap();
    /// assert_eq!(tensor.shape(), &[2, 3, 2]);
    /// ```
    pub fn fold(matrix: &Array2<T>, shape: &[usize], mode: usize) -> anyhow::Result<Self> {
        if mode >= shape.len() {
            anyhow::bail!("Mode {} out of bounds for rank {}", mode, shape.len());
        }
        let rows = shape[mode];
        let cols: usize = shape
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != mode)
            .map(|(_, &s)| s)
            .product();
        if matrix.dim() != (rows, cols) {
            anyhow::bail!(
                "Matrix shape {:?} does not match mode-{} unfolding of {:?} ({}x{})",
                matrix.shape(),
                mode,
                shape,
                rows,
                cols
            );
        }

        // Permuted shape: [shape[mode], remaining modes in increasing order]
        let mut permuted_shape = vec![rows];
        permuted_shape.extend(
            shape
                .iter()
                .enumerate()
                .filter(|&(i, _)| i != mode)
                .map(|(_, &s)| s),
        );
        let flat: Vec<T> = matrix.iter().cloned().collect();
        let permuted = Self::from_vec(flat, &permuted_shape)?;

        // Inverse permutation: axis `mode` sits at position 0
        let mut inverse = Vec::with_capacity(shape.len());
        for axis in 0..shape.len() {
            let pos = if axis == mode {
                0
            } else if axis < mode {
                axis + 1
            } else {
                axis
            };
            inverse.push(pos);
        }

        let restored = permuted.permute(&inverse)?;
        // Materialize in standard layout
        restored.reshape(shape)
    }
}
