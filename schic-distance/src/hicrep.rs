//! Vectorized HiCRep stratum-adjusted correlation.
//!
//! The weighted correlation of HiCRep is expressed as two matrix products:
//! the Gram matrix of the concatenated demeaned strata divided by the Gram
//! matrix of per-stratum weights, `w[c, k] = sqrt(n_bins - k) · std[c, k]`.
//! This avoids the O(n_cells²) pair loop of [`crate::legacy`].
//!
//! The caller's strata are never modified; demeaning produces a fresh set.

use ndarray::{concatenate, Array1, Array2, ArrayView2, Axis};
use schic_core::stats::{row_mean_std, similarity_to_distance};
use schic_core::{n_bins, n_cells, Result, SchicError, Stratum};

use crate::dispatch::Strategy;
use crate::executor::Executor;
use crate::matrix::DistanceMatrix;

/// Added to the weight Gram matrix so all-degenerate cells score 0 instead of NaN.
pub const EPSILON: f64 = 1e-8;

/// Vectorized HiCRep.
#[derive(Debug, Clone, Copy, Default)]
pub struct HiCRep;

/// Demeaned strata and their per-cell weights.
#[derive(Debug, Clone)]
pub struct DemeanedStrata {
    /// Each stratum with its per-cell mean subtracted.
    pub strata: Vec<Stratum>,
    /// Shape `(n_cells, n_strata)`; column `k` weights stratum `k`.
    pub weights: Array2<f64>,
}

impl Strategy for HiCRep {
    type Prepared = DemeanedStrata;

    fn prepare(&self, strata: &[Stratum], executor: &Executor) -> Result<DemeanedStrata> {
        demean_strata(strata, executor)
    }

    fn finish(&self, demeaned: DemeanedStrata) -> Result<DistanceMatrix> {
        let views: Vec<ArrayView2<'_, f64>> = demeaned.strata.iter().map(|s| s.view()).collect();
        let scores = concatenate(Axis(1), &views).map_err(|e| SchicError::Shape(e.to_string()))?;

        let numerator = scores.dot(&scores.t());
        let w = &demeaned.weights;
        let denominator = w.dot(&w.t()) + EPSILON;

        let mut dist = numerator / denominator;
        dist.mapv_inplace(similarity_to_distance);
        dist.diag_mut().fill(0.0);
        DistanceMatrix::from_array(dist)
    }
}

/// Demean every stratum per cell and compute the HiCRep weights.
///
/// One task per stratum is dispatched through `executor`; results are
/// reassembled in stratum order.
pub fn demean_strata(strata: &[Stratum], executor: &Executor) -> Result<DemeanedStrata> {
    let bins = n_bins(strata);
    let cells = n_cells(strata);

    let per_stratum: Vec<(Stratum, Array1<f64>)> = executor.map(strata.len(), |k| {
        let stratum = &strata[k];
        let (mean, std) = row_mean_std(stratum.view());
        let scale = (bins.saturating_sub(k) as f64).sqrt();
        let demeaned = stratum - &mean.view().insert_axis(Axis(1));
        Ok((demeaned, std * scale))
    })?;

    let mut weights = Array2::zeros((cells, strata.len()));
    let mut demeaned = Vec::with_capacity(strata.len());
    for (k, (stratum, weight)) in per_stratum.into_iter().enumerate() {
        weights.column_mut(k).assign(&weight);
        demeaned.push(stratum);
    }
    Ok(DemeanedStrata {
        strata: demeaned,
        weights,
    })
}

/// HiCRep distance matrix, optionally using a worker pool for the
/// per-stratum statistics.
pub fn distance(strata: &[Stratum], executor: &Executor) -> Result<DistanceMatrix> {
    schic_core::validate_strata(strata)?;
    let demeaned = HiCRep.prepare(strata, executor)?;
    HiCRep.finish(demeaned)
}
