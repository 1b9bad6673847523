// SPDX-License-Identifier: AGPL-3.0-only

//! Typed errors for lattice construction and addressing.
//!
//! A proper enum rather than `Result<_, String>` so callers can
//! pattern-match on failure modes (bad shape, out-of-range coordinate,
//! mismatched field sizes). Every variant is raised at construction or
//! lookup time; the operator application paths never return errors.

use std::fmt;

/// Errors arising from layout construction, field construction, or
/// coordinate/index lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LatticeError {
    /// A lattice extent was zero, or the shape was empty.
    InvalidShape { dim: usize, extent: usize },

    /// A coordinate component, site index, array index, or sub-index was
    /// outside its valid bounds.
    OutOfRange { index: usize, bound: usize },

    /// A field size disagreed with its layout (zero site size, or a
    /// volume/shape mismatch between fields).
    SizeMismatch { expected: usize, found: usize },

    /// A per-dimension argument list had the wrong length.
    DimensionMismatch { expected: usize, found: usize },
}

impl fmt::Display for LatticeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidShape { dim, extent } => {
                write!(f, "invalid lattice shape: extent {extent} in dimension {dim}")
            }
            Self::OutOfRange { index, bound } => {
                write!(f, "index {index} out of range (bound {bound})")
            }
            Self::SizeMismatch { expected, found } => {
                write!(f, "size mismatch: expected {expected}, found {found}")
            }
            Self::DimensionMismatch { expected, found } => {
                write!(
                    f,
                    "dimension mismatch: expected {expected} entries, found {found}"
                )
            }
        }
    }
}

impl std::error::Error for LatticeError {}
