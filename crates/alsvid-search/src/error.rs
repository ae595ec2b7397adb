//! Error types for the search crate.

use alsvid_ir::CircuitError;
use alsvid_sim::SimError;
use thiserror::Error;

/// Errors that can occur while configuring or running a search driver.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SearchError {
    /// The target product does not fit the circuit's input width.
    #[error("target {target} out of range for {bits}-bit factors (max {max})")]
    TargetOutOfRange {
        /// The rejected target.
        target: u64,
        /// The configured input width.
        bits: u32,
        /// The largest representable product, `(2^bits − 1)²`.
        max: u64,
    },

    /// A device operation failed.
    #[error(transparent)]
    Sim(#[from] SimError),

    /// A circuit lookup failed.
    #[error(transparent)]
    Circuit(#[from] CircuitError),
}

/// Result type for search operations.
pub type SearchResult<T> = Result<T, SearchError>;
