//! Dense cell×cell distance matrix.

use ndarray::Array2;
use schic_core::{Result, SchicError, Summarizable};

/// Square, symmetric matrix of cell-to-cell distances.
///
/// Entries lie in `[0, 2]` for every method in this crate.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    data: Array2<f64>,
}

impl DistanceMatrix {
    /// Wrap a square array.
    ///
    /// # Errors
    ///
    /// Returns an error if `data` is not square.
    pub fn from_array(data: Array2<f64>) -> Result<Self> {
        if data.nrows() != data.ncols() {
            return Err(SchicError::Shape(format!(
                "distance matrix must be square, got {}x{}",
                data.nrows(),
                data.ncols()
            )));
        }
        Ok(Self { data })
    }

    /// Number of cells.
    pub fn n(&self) -> usize {
        self.data.nrows()
    }

    /// Distance between cells `i` and `j`.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[[i, j]]
    }

    pub fn as_array(&self) -> &Array2<f64> {
        &self.data
    }

    pub fn into_array(self) -> Array2<f64> {
        self.data
    }

    /// Upper triangle (excluding the diagonal) in row-major order.
    ///
    /// For `n` cells the result has `n*(n-1)/2` elements.
    pub fn to_condensed(&self) -> Vec<f64> {
        let n = self.n();
        let mut condensed = Vec::with_capacity(n * n.saturating_sub(1) / 2);
        for i in 0..n {
            for j in (i + 1)..n {
                condensed.push(self.data[[i, j]]);
            }
        }
        condensed
    }

    /// Whether `|d(i,j) - d(j,i)| <= tol` for every pair.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        let n = self.n();
        (0..n).all(|i| ((i + 1)..n).all(|j| (self.data[[i, j]] - self.data[[j, i]]).abs() <= tol))
    }
}

impl Summarizable for DistanceMatrix {
    fn summary(&self) -> String {
        format!("DistanceMatrix: {}x{}", self.n(), self.n())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn from_array_rejects_non_square() {
        assert!(DistanceMatrix::from_array(Array2::zeros((2, 3))).is_err());
    }

    #[test]
    fn accessors() {
        let dm = DistanceMatrix::from_array(array![[0.0, 1.0, 2.0], [1.0, 0.0, 0.5], [2.0, 0.5, 0.0]])
            .unwrap();
        assert_eq!(dm.n(), 3);
        assert_eq!(dm.get(0, 2), 2.0);
        assert_eq!(dm.to_condensed(), vec![1.0, 2.0, 0.5]);
        assert!(dm.is_symmetric(0.0));
        assert_eq!(dm.summary(), "DistanceMatrix: 3x3");
    }

    #[test]
    fn detects_asymmetry() {
        let dm = DistanceMatrix::from_array(array![[0.0, 1.0], [1.1, 0.0]]).unwrap();
        assert!(!dm.is_symmetric(1e-3));
        assert!(dm.is_symmetric(0.2));
    }

    #[test]
    fn single_cell_condensed_is_empty() {
        let dm = DistanceMatrix::from_array(array![[0.0]]).unwrap();
        assert!(dm.to_condensed().is_empty());
    }
}
