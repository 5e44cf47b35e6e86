//! Strata: per-offset contact profiles across cells.
//!
//! A stratum holds the contacts lying on one diagonal offset `k` of every
//! cell's contact map, one row per cell and `n_bins - k` columns. A strata
//! set is the ordered sequence of strata for one chromosome, indexed by `k`.

use ndarray::Array2;

use crate::{Result, SchicError};

/// Contact intensities on one diagonal offset, shape `(n_cells, n_bins - k)`.
pub type Stratum = Array2<f64>;

/// Check that a strata set is usable by the distance engine.
///
/// Requires at least one stratum and the same cell count in every stratum.
/// A set with zero cells is valid and yields an empty distance matrix.
pub fn validate_strata(strata: &[Stratum]) -> Result<()> {
    let first = strata
        .first()
        .ok_or_else(|| SchicError::InvalidInput("strata set must not be empty".into()))?;
    let cells = first.nrows();
    for (k, stratum) in strata.iter().enumerate() {
        if stratum.nrows() != cells {
            return Err(SchicError::Shape(format!(
                "stratum {} has {} cells, expected {}",
                k,
                stratum.nrows(),
                cells
            )));
        }
    }
    Ok(())
}

/// Number of cells (rows) in the set. Zero for an empty set.
pub fn n_cells(strata: &[Stratum]) -> usize {
    strata.first().map_or(0, |s| s.nrows())
}

/// Number of bins on the main diagonal, i.e. the width of stratum 0.
pub fn n_bins(strata: &[Stratum]) -> usize {
    strata.first().map_or(0, |s| s.ncols())
}

/// Total number of columns across all strata.
pub fn total_bins(strata: &[Stratum]) -> usize {
    strata.iter().map(|s| s.ncols()).sum()
}
