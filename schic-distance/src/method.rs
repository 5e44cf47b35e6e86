//! Similarity method names and parsing.

use std::fmt;
use std::str::FromStr;

use schic_core::{Result, SchicError};

/// The four interchangeable strategies for turning strata into distances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Method {
    /// Row-standardized inner product across concatenated strata.
    InnerProduct,
    /// Vectorized HiCRep stratum-adjusted correlation.
    HiCRep,
    /// Pairwise weighted Pearson HiCRep (`old_hicrep`), O(n_cells²).
    LegacyHiCRep,
    /// Window-comparison fingerprints with a Gaussian kernel.
    Selfish,
}

impl Method {
    /// Every supported method, in canonical order.
    pub const ALL: [Method; 4] = [
        Method::InnerProduct,
        Method::HiCRep,
        Method::LegacyHiCRep,
        Method::Selfish,
    ];

    /// Canonical lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Method::InnerProduct => "inner_product",
            Method::HiCRep => "hicrep",
            Method::LegacyHiCRep => "old_hicrep",
            Method::Selfish => "selfish",
        }
    }

    /// Whether the method can dispatch work to a worker pool.
    pub fn supports_parallel(self) -> bool {
        matches!(self, Method::HiCRep | Method::LegacyHiCRep)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Method {
    type Err = SchicError;

    /// Parse a method name, ignoring case.
    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "inner_product" | "innerproduct" => Ok(Method::InnerProduct),
            "hicrep" => Ok(Method::HiCRep),
            "old_hicrep" => Ok(Method::LegacyHiCRep),
            "selfish" => Ok(Method::Selfish),
            other => Err(SchicError::InvalidInput(format!(
                "method {:?} not supported; expected one of \"inner_product\", \"hicrep\", \"old_hicrep\", \"selfish\"",
                other
            ))),
        }
    }
}
