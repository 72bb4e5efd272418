//! Error taxonomy shared across the crate.
//!
//! The reconstruction framework distinguishes recoverable conditions
//! (a queried feature is simply absent, an input was never filled, the
//! data is degenerate) from fatal bookkeeping violations. Call sites
//! pattern-match on the kind: [`Error::Failure`] always propagates,
//! every other kind may be converted to an empty or sentinel result
//! where a caller's contract explicitly allows it.

use core::fmt;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Failure kinds of the hierarchy-traversal and geometric-fit engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// A queried feature is absent: no matching view, empty cluster set,
    /// degenerate geometry.
    NotFound(&'static str),
    /// A required input was never provided, e.g. zero reconstructed momentum.
    NotInitialized(&'static str),
    /// Malformed or numerically degenerate input data: zero weight sum,
    /// eigendecomposition failure, inconsistent vertex/parent cardinality.
    InvalidParameter(&'static str),
    /// Internal bookkeeping invariant violated. Never caught locally.
    Failure(&'static str),
}

impl Error {
    /// Whether this error must propagate through every local recovery path.
    #[inline]
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::Failure(_))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NotFound(what) => write!(f, "not found: {what}"),
            Error::NotInitialized(what) => write!(f, "not initialized: {what}"),
            Error::InvalidParameter(what) => write!(f, "invalid parameter: {what}"),
            Error::Failure(what) => write!(f, "internal failure: {what}"),
        }
    }
}

impl std::error::Error for Error {}
