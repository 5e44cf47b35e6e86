//! Options for a distance computation.

use schic_core::{Result, SchicError};

/// Configuration for [`compute_distance`](crate::compute_distance) and
/// [`pairwise_distances`](crate::pairwise_distances).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DistanceConfig {
    /// Return setup/compute timings alongside the matrix.
    pub print_time: bool,
    /// Gaussian kernel width for Selfish.
    pub sigma: f64,
    /// Window length in bins for Selfish.
    pub window_size: usize,
    /// Use a worker pool for HiCRep and old_hicrep.
    pub parallelize: bool,
    /// Worker pool size when `parallelize` is set.
    pub n_processes: usize,
}

impl Default for DistanceConfig {
    fn default() -> Self {
        Self {
            print_time: false,
            sigma: 0.5,
            window_size: 10,
            parallelize: false,
            n_processes: 1,
        }
    }
}

impl DistanceConfig {
    /// Return [`Timing`](crate::Timing) alongside the matrix.
    pub fn with_print_time(mut self, print_time: bool) -> Self {
        self.print_time = print_time;
        self
    }

    /// Set the Selfish kernel width.
    pub fn with_sigma(mut self, sigma: f64) -> Self {
        self.sigma = sigma;
        self
    }

    /// Set the Selfish window length.
    pub fn with_window_size(mut self, window_size: usize) -> Self {
        self.window_size = window_size;
        self
    }

    /// Enable the worker pool with `n_processes` threads.
    pub fn with_parallel(mut self, n_processes: usize) -> Self {
        self.parallelize = true;
        self.n_processes = n_processes;
        self
    }

    /// Check numeric options.
    ///
    /// # Errors
    ///
    /// Returns an error if `sigma` is not a positive finite number, or if
    /// `window_size` or `n_processes` is zero.
    pub fn validate(&self) -> Result<()> {
        if !(self.sigma.is_finite() && self.sigma > 0.0) {
            return Err(SchicError::InvalidInput(format!(
                "sigma must be > 0, got {}",
                self.sigma
            )));
        }
        if self.window_size == 0 {
            return Err(SchicError::InvalidInput("window_size must be >= 1".into()));
        }
        if self.n_processes == 0 {
            return Err(SchicError::InvalidInput("n_processes must be >= 1".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = DistanceConfig::default();
        assert!(!c.print_time);
        assert_eq!(c.sigma, 0.5);
        assert_eq!(c.window_size, 10);
        assert!(!c.parallelize);
        assert_eq!(c.n_processes, 1);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn builders() {
        let c = DistanceConfig::default()
            .with_print_time(true)
            .with_sigma(2.0)
            .with_window_size(4)
            .with_parallel(3);
        assert!(c.print_time);
        assert_eq!(c.sigma, 2.0);
        assert_eq!(c.window_size, 4);
        assert!(c.parallelize);
        assert_eq!(c.n_processes, 3);
    }

    #[test]
    fn rejects_bad_sigma() {
        assert!(DistanceConfig::default().with_sigma(0.0).validate().is_err());
        assert!(DistanceConfig::default().with_sigma(-1.0).validate().is_err());
        assert!(DistanceConfig::default().with_sigma(f64::NAN).validate().is_err());
    }

    #[test]
    fn rejects_zero_window_and_processes() {
        assert!(DistanceConfig::default().with_window_size(0).validate().is_err());
        assert!(DistanceConfig::default().with_parallel(0).validate().is_err());
    }
}
