//! Pairwise HiCRep (`old_hicrep`): a weighted Pearson correlation for every
//! cell pair and stratum.
//!
//! Quadratic in the number of cells. Each pair is an independent task, so the
//! pair loop can run on a worker pool with results identical to the
//! sequential path.

use ndarray::{Array1, Array2, ArrayView1};
use schic_core::stats::{mean_std, pearson, similarity_to_distance};
use schic_core::{n_cells, Result, Stratum};

use crate::dispatch::Strategy;
use crate::executor::Executor;
use crate::matrix::DistanceMatrix;

/// Pairwise weighted-Pearson HiCRep.
#[derive(Debug, Clone, Copy, Default)]
pub struct LegacyHiCRep;

impl Strategy for LegacyHiCRep {
    /// Similarity matrix with a unit diagonal.
    type Prepared = Array2<f64>;

    fn prepare(&self, strata: &[Stratum], executor: &Executor) -> Result<Array2<f64>> {
        similarity_matrix(strata, executor)
    }

    fn finish(&self, similarity: Array2<f64>) -> Result<DistanceMatrix> {
        DistanceMatrix::from_array(similarity.mapv(similarity_to_distance))
    }
}

/// Correlation and reliability weight of two cells on one stratum.
///
/// Returns `(0, 0)` if either row is constant. Otherwise positions where both
/// cells have zero contacts are dropped, and the weight is
/// `len · std(s1) · std(s2)` over the remaining positions.
pub fn stratum_correlation(s1: ArrayView1<'_, f64>, s2: ArrayView1<'_, f64>) -> Result<(f64, f64)> {
    if mean_std(s1).1 == 0.0 || mean_std(s2).1 == 0.0 {
        return Ok((0.0, 0.0));
    }
    let (a, b): (Vec<f64>, Vec<f64>) = s1
        .iter()
        .zip(s2.iter())
        .filter(|&(&x, &y)| !(x == 0.0 && y == 0.0))
        .map(|(&x, &y)| (x, y))
        .unzip();
    let a = Array1::from(a);
    let b = Array1::from(b);

    let corr = pearson(a.view(), b.view())?;
    let weight = a.len() as f64 * mean_std(a.view()).1 * mean_std(b.view()).1;
    Ok((corr, weight))
}

/// Weighted average of per-stratum correlations between cells `i` and `j`.
///
/// Returns 0 when every stratum carries zero weight.
pub fn pair_similarity(strata: &[Stratum], i: usize, j: usize) -> Result<f64> {
    let mut weighted = 0.0;
    let mut total_weight = 0.0;
    for stratum in strata {
        let (corr, weight) = stratum_correlation(stratum.row(i), stratum.row(j))?;
        let corr = if corr.is_nan() { 0.0 } else { corr };
        weighted += corr * weight;
        total_weight += weight;
    }
    let s = weighted / total_weight;
    Ok(if s.is_nan() { 0.0 } else { s })
}

/// Cell×cell similarity matrix; the diagonal is left at 1.
pub fn similarity_matrix(strata: &[Stratum], executor: &Executor) -> Result<Array2<f64>> {
    let n = n_cells(strata);
    let pairs: Vec<(usize, usize)> = (0..n)
        .flat_map(|i| ((i + 1)..n).map(move |j| (i, j)))
        .collect();

    let scores = executor.map(pairs.len(), |p| {
        let (i, j) = pairs[p];
        pair_similarity(strata, i, j)
    })?;

    let mut similarity = Array2::ones((n, n));
    for (&(i, j), &s) in pairs.iter().zip(&scores) {
        similarity[[i, j]] = s;
        similarity[[j, i]] = s;
    }
    Ok(similarity)
}

/// Pairwise HiCRep distance matrix.
pub fn distance(strata: &[Stratum], executor: &Executor) -> Result<DistanceMatrix> {
    schic_core::validate_strata(strata)?;
    let similarity = LegacyHiCRep.prepare(strata, executor)?;
    LegacyHiCRep.finish(similarity)
}
