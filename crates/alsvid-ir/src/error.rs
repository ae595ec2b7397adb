//! Error types for the IR crate.

use thiserror::Error;

/// Errors that can occur while assembling a circuit.
///
/// All of these indicate programmer error in circuit construction and are
/// reported fatally at the binary boundary.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CircuitError {
    /// A bus with this prefix was already declared.
    #[error("bus {0} already exists")]
    DuplicateBus(String),

    /// A wire with this name was already created.
    #[error("wire {0} already exists")]
    DuplicateWire(String),

    /// An alias with this name was already registered.
    #[error("alias {0} already exists")]
    DuplicateAlias(String),

    /// No bus with this prefix is declared.
    #[error("bus {0} not found")]
    BusNotFound(String),

    /// No wire with this name exists.
    #[error("wire {name} not found{}", format_gate_context(.gate))]
    WireNotFound {
        /// The name that failed to resolve to a wire.
        name: String,
        /// The gate being appended, when the lookup came from a gate tap.
        gate: Option<&'static str>,
    },
}

/// Helper function to format optional gate context.
#[allow(clippy::ref_option)]
fn format_gate_context(gate: &Option<&'static str>) -> String {
    match gate {
        Some(name) => format!(" (gate: {name})"),
        None => String::new(),
    }
}

/// Result type for circuit-assembly operations.
pub type CircuitResult<T> = Result<T, CircuitError>;
