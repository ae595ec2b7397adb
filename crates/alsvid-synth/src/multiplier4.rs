//! Hand-scheduled 4-bit multiplier.
//!
//! Same bus layout and adder templates as the generic construction, but with
//! a fixed adder schedule that interleaves the column reductions. Kept as a
//! known-good wiring for the diagnostic grid scan and the preimage probe.

use alsvid_ir::{Circuit, CircuitResult};

use crate::adder::{full_adder_a1, half_adder_a1};

/// Build the fixed 4-bit multiplier: Y·X on buses `Y`, `X` (4 bits each),
/// product on `P` (8 bits), 16 partial products on `A`, 12 scratch carries
/// on `Z`.
pub fn multiplier4() -> CircuitResult<Circuit> {
    let mut circuit = Circuit::new();

    circuit.add_alias_bus("I", 0)?;
    circuit.add_bus("Y", 4, false)?;
    circuit.add_bus("X", 4, false)?;
    circuit.add_bus("A", 16, false)?;
    circuit.add_alias_bus("P", 8)?;
    circuit.add_bus("Z", 12, false)?;
    circuit.add_alias_bus("G", 0)?;

    circuit.add_alias("Y", "I")?;
    circuit.add_alias("X", "I")?;
    circuit.add_alias("Y", "G")?;
    circuit.add_alias("X", "G")?;

    circuit.ccnot("Y0", "X0", "A0")?;
    circuit.ccnot("Y1", "X0", "A1")?;
    circuit.ccnot("Y2", "X0", "A2")?;
    circuit.ccnot("Y3", "X0", "A3")?;

    circuit.ccnot("Y0", "X1", "A4")?;
    circuit.ccnot("Y1", "X1", "A5")?;
    circuit.ccnot("Y2", "X1", "A6")?;
    circuit.ccnot("Y3", "X1", "A7")?;

    circuit.ccnot("Y0", "X2", "A8")?;
    circuit.ccnot("Y1", "X2", "A9")?;
    circuit.ccnot("Y2", "X2", "A10")?;
    circuit.ccnot("Y3", "X2", "A11")?;

    circuit.ccnot("Y0", "X3", "A12")?;
    circuit.ccnot("Y1", "X3", "A13")?;
    circuit.ccnot("Y2", "X3", "A14")?;
    circuit.ccnot("Y3", "X3", "A15")?;

    circuit.add_alias("A0", "P0")?;

    half_adder_a1(&mut circuit, "A1", "A4", "Z0")?;
    circuit.add_alias("A1", "P1")?;
    full_adder_a1(&mut circuit, "A8", "A2", "Z0", "Z1")?;
    full_adder_a1(&mut circuit, "A12", "A3", "Z1", "Z2")?;
    half_adder_a1(&mut circuit, "A7", "Z2", "Z3")?;

    half_adder_a1(&mut circuit, "A9", "A6", "Z4")?;
    full_adder_a1(&mut circuit, "A10", "A13", "Z4", "Z5")?;
    full_adder_a1(&mut circuit, "A14", "A11", "Z5", "Z6")?;

    half_adder_a1(&mut circuit, "A8", "A5", "Z7")?;
    circuit.add_alias("A8", "P2")?;
    full_adder_a1(&mut circuit, "A12", "A9", "Z7", "Z8")?;
    circuit.add_alias("A12", "P3")?;
    full_adder_a1(&mut circuit, "A7", "A10", "Z8", "Z9")?;
    circuit.add_alias("A7", "P4")?;
    full_adder_a1(&mut circuit, "Z3", "A14", "Z9", "Z10")?;
    circuit.add_alias("Z3", "P5")?;
    full_adder_a1(&mut circuit, "Z6", "A15", "Z10", "Z11")?;
    circuit.add_alias("Z6", "P6")?;
    circuit.add_alias("Z11", "P7")?;

    Ok(circuit)
}
