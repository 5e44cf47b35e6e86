//! Selfish: window-comparison fingerprints with a Gaussian kernel.
//!
//! Contacts are summed over fixed-size windows of the bin axis, every cell
//! gets a binary fingerprint from comparisons between its window sums, and
//! fingerprint distances are turned into similarities with
//! `exp(-sigma · d)`.

use ndarray::{s, Array2, Axis};
use schic_core::stats::similarity_to_distance;
use schic_core::{n_bins, n_cells, Result, SchicError, Stratum};

use crate::config::DistanceConfig;
use crate::dispatch::Strategy;
use crate::executor::Executor;
use crate::matrix::DistanceMatrix;

/// Selfish with a kernel width and window length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selfish {
    pub sigma: f64,
    pub window_size: usize,
}

impl Selfish {
    /// Kernel width and window length taken from `config`.
    pub fn from_config(config: &DistanceConfig) -> Self {
        Self {
            sigma: config.sigma,
            window_size: config.window_size,
        }
    }
}

impl Default for Selfish {
    fn default() -> Self {
        Self::from_config(&DistanceConfig::default())
    }
}

impl Strategy for Selfish {
    type Prepared = Array2<bool>;

    fn prepare(&self, strata: &[Stratum], _executor: &Executor) -> Result<Array2<bool>> {
        if self.window_size == 0 {
            return Err(SchicError::InvalidInput("window_size must be >= 1".into()));
        }
        let windows = window_sums(strata, self.window_size);
        Ok(fingerprint(&windows))
    }

    fn finish(&self, fingerprints: Array2<bool>) -> Result<DistanceMatrix> {
        let n = fingerprints.nrows();
        let mut dist = Array2::zeros((n, n));
        for i in 0..n {
            for j in (i + 1)..n {
                let differing = fingerprints
                    .row(i)
                    .iter()
                    .zip(fingerprints.row(j).iter())
                    .filter(|(a, b)| a != b)
                    .count();
                let d = (differing as f64).sqrt();
                let value = similarity_to_distance((-self.sigma * d).exp());
                dist[[i, j]] = value;
                dist[[j, i]] = value;
            }
        }
        DistanceMatrix::from_array(dist)
    }
}

/// Sum contacts per cell over `n_bins / window_size` windows, across strata.
///
/// For stratum `k` the window `[w·size, (w+1)·size)` loses `k` bins at its
/// upper edge. An edge pushed below zero counts back from the end of the
/// stratum row, so the range becomes `[w·size, ncols - (k - (w+1)·size))`.
/// Ranges reduced to nothing contribute nothing. A trailing partial window
/// is dropped. Returns shape `(n_cells, n_windows)`.
pub fn window_sums(strata: &[Stratum], window_size: usize) -> Array2<f64> {
    let n_windows = n_bins(strata) / window_size.max(1);
    let mut windows = Array2::zeros((n_cells(strata), n_windows));
    for (k, stratum) in strata.iter().enumerate() {
        for w in 0..n_windows {
            let start = w * window_size;
            let end = window_end((w + 1) * window_size, k, stratum.ncols());
            if end <= start {
                continue;
            }
            let sums = stratum.slice(s![.., start..end]).sum_axis(Axis(1));
            let mut column = windows.column_mut(w);
            column += &sums;
        }
    }
    windows
}

/// Upper edge `upper - k`, resolved against a row of `ncols` bins.
fn window_end(upper: usize, k: usize, ncols: usize) -> usize {
    if upper >= k {
        (upper - k).min(ncols)
    } else {
        ncols.saturating_sub(k - upper)
    }
}

/// Binary fingerprint from window-sum comparisons.
///
/// Column order: for `i` in `0..n_windows`, for `j` in `0..n_windows - i - 1`,
/// the column holds `windows[:, i] > windows[:, j]`. Note that `j` indexes
/// windows from the start, not the windows after `i`.
pub fn fingerprint(windows: &Array2<f64>) -> Array2<bool> {
    let (cells, n_windows) = windows.dim();
    let width = n_windows * n_windows.saturating_sub(1) / 2;
    let mut prints = Array2::from_elem((cells, width), false);
    let mut col = 0;
    for i in 0..n_windows {
        for j in 0..(n_windows - i - 1) {
            for c in 0..cells {
                prints[[c, col]] = windows[[c, i]] > windows[[c, j]];
            }
            col += 1;
        }
    }
    prints
}

/// Selfish distance matrix.
pub fn distance(strata: &[Stratum], sigma: f64, window_size: usize) -> Result<DistanceMatrix> {
    schic_core::validate_strata(strata)?;
    let selfish = Selfish { sigma, window_size };
    let prints = selfish.prepare(strata, &Executor::Sequential)?;
    selfish.finish(prints)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    const TOL: f64 = 1e-12;

    #[test]
    fn two_windows_one_column() {
        let strata = vec![array![[1.0, 2.0, 3.0, 4.0], [5.0, 1.0, 0.0, 1.0], [1.0, 1.0, 1.0, 1.0]]];
        let windows = window_sums(&strata, 2);
        assert_eq!(windows, array![[3.0, 7.0], [6.0, 1.0], [2.0, 2.0]]);
        let prints = fingerprint(&windows);
        assert_eq!(prints.dim(), (3, 1));
        // i = 0 is compared against j = 0: never strictly greater
        assert_eq!(prints.column(0).to_vec(), vec![false, false, false]);
    }

    #[test]
    fn fingerprint_pairing_is_pinned() {
        // 4 windows -> 6 columns, pairs (0,0) (0,1) (0,2) (1,0) (1,1) (2,0)
        let windows = array![[4.0, 1.0, 3.0, 2.0]];
        let prints = fingerprint(&windows);
        assert_eq!(prints.dim(), (1, 6));
        assert_eq!(
            prints.row(0).to_vec(),
            vec![false, true, true, false, false, false]
        );
        let windows = array![[1.0, 4.0, 3.0, 0.0]];
        assert_eq!(
            fingerprint(&windows).row(0).to_vec(),
            vec![false, false, false, true, false, true]
        );
    }

    #[test]
    fn farther_strata_trim_window_edges() {
        let strata = vec![
            array![[1.0, 1.0, 1.0, 1.0]],
            array![[10.0, 10.0, 10.0]],
            array![[100.0, 100.0]],
        ];
        // window 0: [0,2) + [0,1) + nothing; window 1: [2,4) + [2,3) + [2,2)
        let windows = window_sums(&strata, 2);
        assert_eq!(windows, array![[12.0, 12.0]]);
    }

    #[test]
    fn negative_edge_counts_from_row_end() {
        // stratum k holds [1, 2, ..] scaled by 10^k
        let strata: Vec<Stratum> = (0..4)
            .map(|k| {
                let width = 6 - k;
                let scale = 10f64.powi(k as i32);
                Array2::from_shape_fn((1, width), |(_, b)| (b + 1) as f64 * scale)
            })
            .collect();
        // window 0 at k = 3 has upper edge 2 - 3 = -1, i.e. bins [0, 2) of a 3-bin row
        let windows = window_sums(&strata, 2);
        assert_eq!(windows, array![[3013.0, 37.0, 61.0]]);
        // (0,0) (0,1) (1,0): window 0 now outweighs window 1
        assert_eq!(fingerprint(&windows).row(0).to_vec(), vec![false, true, false]);
    }

    #[test]
    fn window_end_resolution() {
        assert_eq!(window_end(4, 1, 10), 3);
        assert_eq!(window_end(4, 4, 10), 0);
        assert_eq!(window_end(2, 3, 3), 2);
        assert_eq!(window_end(2, 9, 3), 0);
        assert_eq!(window_end(8, 0, 5), 5);
    }

    #[test]
    fn default_follows_config() {
        let config = DistanceConfig::default();
        let selfish = Selfish::default();
        assert_eq!(selfish.sigma, config.sigma);
        assert_eq!(selfish.window_size, config.window_size);
    }

    #[test]
    fn partial_window_dropped() {
        let strata = vec![array![[1.0, 1.0, 1.0, 1.0, 9.0]]];
        assert_eq!(window_sums(&strata, 2).dim(), (1, 2));
        assert_eq!(window_sums(&strata, 10).dim(), (1, 0));
    }

    #[test]
    fn kernel_distance_values() {
        // 3 windows -> columns (0,0) (0,1) (1,0)
        let strata = vec![array![
            [1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
            [6.0, 5.0, 4.0, 3.0, 2.0, 1.0],
            [1.0, 2.0, 3.0, 4.0, 5.0, 6.0]
        ]];
        let dm = distance(&strata, 0.5, 2).unwrap();
        // cell 0: [F, F, T], cell 1: [F, T, F]
        let d: f64 = 2f64.sqrt();
        let expected = (2.0 - 2.0 * (-0.5 * d).exp()).sqrt();
        assert!((dm.get(0, 1) - expected).abs() < TOL);
        assert!(dm.get(0, 2).abs() < TOL);
        assert_eq!(dm.get(1, 1), 0.0);
        assert!(dm.is_symmetric(0.0));
    }

    #[test]
    fn zero_cells_have_no_nan() {
        let strata = vec![Array2::zeros((2, 6)), Array2::zeros((2, 5))];
        let dm = distance(&strata, 1.0, 3).unwrap();
        assert!(dm.as_array().iter().all(|v| *v == 0.0));
    }

    #[test]
    fn zero_window_rejected() {
        let strata = vec![array![[1.0, 2.0]]];
        assert!(distance(&strata, 0.5, 0).is_err());
    }
}
