//! Inner-product distance on row-standardized strata.
//!
//! Every stratum is z-scored per cell, the standardized strata are
//! concatenated, and the normalized Gram matrix `F·Fᵀ / total_bins` is used
//! as a correlation-like score.

use ndarray::{concatenate, Array2, ArrayView2, Axis};
use schic_core::stats::{similarity_to_distance, z_score_rows};
use schic_core::{total_bins, Result, SchicError, Stratum};

use crate::dispatch::Strategy;
use crate::executor::Executor;
use crate::matrix::DistanceMatrix;

/// Inner product of concatenated z-scores.
#[derive(Debug, Clone, Copy, Default)]
pub struct InnerProduct;

impl Strategy for InnerProduct {
    type Prepared = Array2<f64>;

    fn prepare(&self, strata: &[Stratum], _executor: &Executor) -> Result<Array2<f64>> {
        if total_bins(strata) == 0 {
            return Err(SchicError::InvalidInput(
                "inner product: strata contain no bins".into(),
            ));
        }
        standardized_features(strata)
    }

    fn finish(&self, features: Array2<f64>) -> Result<DistanceMatrix> {
        let mut scores = features.dot(&features.t()) / features.ncols().max(1) as f64;
        scores.mapv_inplace(similarity_to_distance);
        scores.diag_mut().fill(0.0);
        DistanceMatrix::from_array(scores)
    }
}

/// Z-score each stratum row-wise and concatenate along the bin axis.
///
/// Constant rows standardize to zeros. The result has shape
/// `(n_cells, total_bins)`.
pub fn standardized_features(strata: &[Stratum]) -> Result<Array2<f64>> {
    let z: Vec<Array2<f64>> = strata.iter().map(|s| z_score_rows(s.view())).collect();
    let views: Vec<ArrayView2<'_, f64>> = z.iter().map(|a| a.view()).collect();
    concatenate(Axis(1), &views).map_err(|e| SchicError::Shape(e.to_string()))
}

/// Inner-product distance matrix for a strata set.
pub fn distance(strata: &[Stratum]) -> Result<DistanceMatrix> {
    schic_core::validate_strata(strata)?;
    let features = InnerProduct.prepare(strata, &Executor::Sequential)?;
    InnerProduct.finish(features)
}
