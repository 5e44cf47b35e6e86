//! Shared primitives for single-cell Hi-C distance computation.
//!
//! `schic-core` provides the foundation that the distance engine builds on:
//!
//! - **Error types** — [`SchicError`] and [`Result`] for structured error handling
//! - **Traits** — [`Summarizable`] for one-line descriptions of results
//! - **Strata** — [`Stratum`] and validation helpers for per-chromosome strata sets
//! - **Row statistics** — population mean/std, z-scores and Pearson correlation

pub mod error;
pub mod stats;
pub mod strata;
pub mod traits;

pub use error::{Result, SchicError};
pub use strata::{n_bins, n_cells, total_bins, validate_strata, Stratum};
pub use traits::*;
