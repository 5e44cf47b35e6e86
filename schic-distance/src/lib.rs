//! Cell-to-cell distance matrices from single-cell Hi-C strata.
//!
//! A strata set holds, for one chromosome, the contacts of every cell on each
//! diagonal offset of its contact map. This crate turns such a set into a
//! symmetric cell×cell distance matrix with one of four methods:
//!
//! - **Inner product** — [`inner_product`], z-scored strata and a normalized Gram matrix
//! - **HiCRep** — [`hicrep`], stratum-adjusted correlation as two matrix products
//! - **Pairwise HiCRep** — [`legacy`] (`old_hicrep`), weighted Pearson per cell pair
//! - **Selfish** — [`selfish`], window-comparison fingerprints and a Gaussian kernel
//!
//! Every method maps a similarity score `s` to `sqrt(2 - 2s)`, so distances
//! lie in `[0, 2]`. HiCRep and pairwise HiCRep can run their independent
//! sub-tasks on a fixed-size worker pool (`parallel` feature).
//!
//! ```
//! use ndarray::array;
//! use schic_distance::{compute_distance, DistanceConfig};
//!
//! let strata = vec![
//!     array![[1.0, 2.0, 3.0, 4.0], [4.0, 3.0, 2.0, 1.0], [2.0, 2.0, 2.0, 2.0]],
//!     array![[1.0, 1.0, 1.0], [2.0, 2.0, 2.0], [3.0, 3.0, 3.0]],
//! ];
//! let dm = compute_distance(&strata, "InnerProduct", &DistanceConfig::default()).unwrap();
//! assert_eq!(dm.n(), 3);
//! assert!(dm.get(0, 1) > 1.7);
//! ```

pub mod aggregate;
pub mod config;
pub mod dispatch;
pub mod executor;
pub mod hicrep;
pub mod inner_product;
pub mod legacy;
pub mod matrix;
pub mod method;
pub mod selfish;

pub use aggregate::{aggregate, Aggregation};
pub use config::DistanceConfig;
pub use dispatch::{compute_distance, pairwise_distances, run_method, Strategy, Timing};
pub use executor::Executor;
pub use matrix::DistanceMatrix;
pub use method::Method;
