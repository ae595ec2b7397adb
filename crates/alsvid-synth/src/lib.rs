//! Reversible multiplier synthesis.
//!
//! Builds combinational multipliers as reversible circuits over
//! {NOT, CNOT, CCNOT}: partial products from one Toffoli per bit pair,
//! then column-wise compression with reversible half/full adder templates.
//!
//! # Example
//!
//! ```rust
//! use alsvid_synth::{multiplier, full_adder_a1, half_adder_a1};
//!
//! let circuit = multiplier(4, full_adder_a1, half_adder_a1)?;
//! assert_eq!(circuit.bus_width("P")?, 8);
//! # Ok::<(), alsvid_ir::CircuitError>(())
//! ```

pub mod adder;
pub mod multiplier;
pub mod multiplier4;

pub use adder::{
    FullAdder, HalfAdder, full_adder_a1, full_adder_a2, full_adder_a3, half_adder_a1,
    half_adder_a2, half_adder_a3,
};
pub use multiplier::multiplier;
pub use multiplier4::multiplier4;
