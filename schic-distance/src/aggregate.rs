//! Combining per-chromosome distance matrices into one.

use std::str::FromStr;

use ndarray::Array2;
use schic_core::{Result, SchicError};

use crate::matrix::DistanceMatrix;

/// How to combine the same cell pair across chromosomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Aggregation {
    Mean,
    #[default]
    Median,
}

impl FromStr for Aggregation {
    type Err = SchicError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "mean" => Ok(Aggregation::Mean),
            "median" => Ok(Aggregation::Median),
            other => Err(SchicError::InvalidInput(format!(
                "aggregation {:?} not supported; expected \"mean\" or \"median\"",
                other
            ))),
        }
    }
}

/// Element-wise mean or median of same-sized distance matrices.
///
/// # Errors
///
/// Returns an error if `matrices` is empty or their sizes differ.
pub fn aggregate(matrices: &[DistanceMatrix], how: Aggregation) -> Result<DistanceMatrix> {
    let first = matrices.first().ok_or_else(|| {
        SchicError::InvalidInput("aggregate: need at least one distance matrix".into())
    })?;
    let n = first.n();
    if let Some(bad) = matrices.iter().find(|m| m.n() != n) {
        return Err(SchicError::Shape(format!(
            "aggregate: matrix of size {} does not match {}",
            bad.n(),
            n
        )));
    }

    let mut out = Array2::zeros((n, n));
    let mut values = Vec::with_capacity(matrices.len());
    for i in 0..n {
        for j in 0..n {
            values.clear();
            values.extend(matrices.iter().map(|m| m.get(i, j)));
            out[[i, j]] = match how {
                Aggregation::Mean => values.iter().sum::<f64>() / values.len() as f64,
                Aggregation::Median => median(&mut values),
            };
        }
    }
    DistanceMatrix::from_array(out)
}

fn median(values: &mut [f64]) -> f64 {
    values.sort_by(|a, b| a.total_cmp(b));
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) / 2.0
    } else {
        values[mid]
    }
}
