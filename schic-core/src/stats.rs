//! Row statistics used by the distance strategies.
//!
//! All variances are population variances (ddof = 0). Degenerate inputs
//! (empty rows, constant rows) yield neutral zeros instead of NaN.

use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};

use crate::{Result, SchicError};

/// Population mean and standard deviation of `x`.
///
/// Returns `(0.0, 0.0)` for an empty view.
pub fn mean_std(x: ArrayView1<'_, f64>) -> (f64, f64) {
    if x.is_empty() {
        return (0.0, 0.0);
    }
    let n = x.len() as f64;
    let mean = x.sum() / n;
    let var = x.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;
    (mean, var.sqrt())
}

/// Per-row population mean and standard deviation of a matrix.
pub fn row_mean_std(m: ArrayView2<'_, f64>) -> (Array1<f64>, Array1<f64>) {
    let mut means = Array1::zeros(m.nrows());
    let mut stds = Array1::zeros(m.nrows());
    for (i, row) in m.axis_iter(Axis(0)).enumerate() {
        let (mu, sd) = mean_std(row);
        means[i] = mu;
        stds[i] = sd;
    }
    (means, stds)
}

/// Standardize every row to zero mean and unit variance.
///
/// Rows with zero variance become all zeros.
pub fn z_score_rows(m: ArrayView2<'_, f64>) -> Array2<f64> {
    let mut out = m.to_owned();
    for mut row in out.axis_iter_mut(Axis(0)) {
        let (mu, sd) = mean_std(row.view());
        if sd == 0.0 {
            row.fill(0.0);
        } else {
            row.mapv_inplace(|v| (v - mu) / sd);
        }
    }
    out
}

/// Pearson correlation between `x` and `y`.
///
/// Returns 0.0 if either series is constant or has fewer than two points.
pub fn pearson(x: ArrayView1<'_, f64>, y: ArrayView1<'_, f64>) -> Result<f64> {
    if x.len() != y.len() {
        return Err(SchicError::Shape(format!(
            "pearson: x and y must have the same length ({} vs {})",
            x.len(),
            y.len(),
        )));
    }
    if x.len() < 2 {
        return Ok(0.0);
    }

    let n = x.len() as f64;
    let mean_x = x.sum() / n;
    let mean_y = y.sum() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (xi, yi) in x.iter().zip(y.iter()) {
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    let denom = (var_x * var_y).sqrt();
    if denom == 0.0 || !denom.is_finite() {
        return Ok(0.0);
    }
    Ok(cov / denom)
}

/// Clip a similarity score to `[-1, 1]` and map it to `sqrt(2 - 2s)`.
///
/// NaN scores are treated as 0.
pub fn similarity_to_distance(score: f64) -> f64 {
    let s = if score.is_nan() { 0.0 } else { score.clamp(-1.0, 1.0) };
    (2.0 - 2.0 * s).sqrt()
}

// ── Tests ──────────────────────────────────────────────────────────────────
