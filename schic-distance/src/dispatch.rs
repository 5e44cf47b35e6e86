//! Method dispatch and timing diagnostics.

use std::time::{Duration, Instant};

use schic_core::{validate_strata, Result, Stratum};
use tracing::debug;

use crate::config::DistanceConfig;
use crate::executor::Executor;
use crate::hicrep::HiCRep;
use crate::inner_product::InnerProduct;
use crate::legacy::LegacyHiCRep;
use crate::matrix::DistanceMatrix;
use crate::method::Method;
use crate::selfish::Selfish;

/// A distance method split into a preparation phase and a final transform.
///
/// The split mirrors the two timings reported by [`Timing`]: `prepare` does
/// the per-stratum or per-pair work, `finish` turns it into distances.
pub trait Strategy {
    /// Intermediate state produced by [`Strategy::prepare`].
    type Prepared;

    /// Per-stratum (or per-pair) work. May use the executor's worker pool.
    fn prepare(&self, strata: &[Stratum], executor: &Executor) -> Result<Self::Prepared>;

    /// Combine prepared state into the final distance matrix.
    fn finish(&self, prepared: Self::Prepared) -> Result<DistanceMatrix>;
}

/// Wall-clock time spent in each phase of a distance computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timing {
    /// Standardization, demeaning, pairwise correlations or window sums.
    pub setup: Duration,
    /// Matrix products and the similarity-to-distance transform.
    pub compute: Duration,
}

impl Timing {
    /// Setup plus compute time.
    pub fn total(&self) -> Duration {
        self.setup + self.compute
    }
}

/// Compute the cell×cell distance matrix for one chromosome.
///
/// `method` is matched case-insensitively against `inner_product`
/// (or `innerproduct`), `hicrep`, `old_hicrep` and `selfish`.
///
/// # Errors
///
/// Returns an error for an unknown method (before touching the strata),
/// an invalid configuration, an empty or inconsistent strata set, or a
/// failed worker task.
pub fn compute_distance(
    strata: &[Stratum],
    method: &str,
    config: &DistanceConfig,
) -> Result<DistanceMatrix> {
    let method: Method = method.parse()?;
    run_method(strata, method, config).map(|(matrix, _)| matrix)
}

/// Like [`compute_distance`], also returning [`Timing`] when
/// `config.print_time` is set.
pub fn pairwise_distances(
    strata: &[Stratum],
    method: &str,
    config: &DistanceConfig,
) -> Result<(DistanceMatrix, Option<Timing>)> {
    let method: Method = method.parse()?;
    let (matrix, timing) = run_method(strata, method, config)?;
    Ok((matrix, config.print_time.then_some(timing)))
}

/// Dispatch an already-parsed [`Method`].
pub fn run_method(
    strata: &[Stratum],
    method: Method,
    config: &DistanceConfig,
) -> Result<(DistanceMatrix, Timing)> {
    config.validate()?;
    validate_strata(strata)?;

    let span = tracing::debug_span!(
        "compute_distance",
        %method,
        n_cells = strata[0].nrows(),
        n_strata = strata.len()
    );
    let _guard = span.enter();

    let executor = if config.parallelize && method.supports_parallel() {
        Executor::with_threads(config.n_processes)?
    } else {
        if config.parallelize {
            debug!("{} has no parallel path; running sequentially", method);
        }
        Executor::Sequential
    };

    match method {
        Method::InnerProduct => run(&InnerProduct, strata, &executor),
        Method::HiCRep => run(&HiCRep, strata, &executor),
        Method::LegacyHiCRep => run(&LegacyHiCRep, strata, &executor),
        Method::Selfish => run(&Selfish::from_config(config), strata, &executor),
    }
}

fn run<S: Strategy>(
    strategy: &S,
    strata: &[Stratum],
    executor: &Executor,
) -> Result<(DistanceMatrix, Timing)> {
    let t0 = Instant::now();
    let prepared = strategy.prepare(strata, executor)?;
    let setup = t0.elapsed();

    let t1 = Instant::now();
    let matrix = strategy.finish(prepared)?;
    let compute = t1.elapsed();

    debug!(
        setup_ms = setup.as_secs_f64() * 1e3,
        compute_ms = compute.as_secs_f64() * 1e3,
        workers = executor.n_threads(),
        "distance matrix ready"
    );
    Ok((matrix, Timing { setup, compute }))
}
