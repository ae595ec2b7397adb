//! Reversible half and full adder templates.
//!
//! Each template is a fixed arrangement of CCNOT/CNOT gates realizing a 3:2
//! (full) or 2:2 (half) compressor. One input wire is repurposed to hold the
//! sum, a fresh scratch wire receives the carry, and the remaining inputs
//! become garbage: they end in a data-dependent state and are aliased into
//! bus `G` so reverse execution can account for them.
//!
//! The three variants are permutations of the same gate pattern with
//! different sum/garbage assignments; a multiplier built from any one of
//! them computes the same product.

use alsvid_ir::{Circuit, CircuitResult};

/// A full-adder template: inputs `(a, b, c)` plus a zeroed carry wire `d`.
/// Returns `(sum, carry)` wire names.
pub type FullAdder = fn(&mut Circuit, &str, &str, &str, &str) -> CircuitResult<(String, String)>;

/// A half-adder template: inputs `(a, b)` plus a zeroed carry wire `d`.
/// Returns `(sum, carry)` wire names.
pub type HalfAdder = fn(&mut Circuit, &str, &str, &str) -> CircuitResult<(String, String)>;

/// Template A1: sum lands on `a`; `b` and `c` become garbage.
pub fn full_adder_a1(
    circuit: &mut Circuit,
    a: &str,
    b: &str,
    c: &str,
    d: &str,
) -> CircuitResult<(String, String)> {
    circuit.ccnot(a, b, d)?;
    circuit.cnot(b, a)?;
    circuit.ccnot(a, c, d)?;
    circuit.cnot(c, a)?;
    circuit.add_alias(b, "G")?;
    circuit.add_alias(c, "G")?;
    Ok((a.to_string(), d.to_string()))
}

/// Half-adder A1: the first two gates of [`full_adder_a1`].
pub fn half_adder_a1(
    circuit: &mut Circuit,
    a: &str,
    b: &str,
    d: &str,
) -> CircuitResult<(String, String)> {
    circuit.ccnot(a, b, d)?;
    circuit.cnot(b, a)?;
    circuit.add_alias(b, "G")?;
    Ok((a.to_string(), d.to_string()))
}

/// Template A2: sum lands on `b`; `a` and `c` become garbage.
pub fn full_adder_a2(
    circuit: &mut Circuit,
    a: &str,
    b: &str,
    c: &str,
    d: &str,
) -> CircuitResult<(String, String)> {
    circuit.ccnot(a, c, d)?;
    circuit.cnot(a, c)?;
    circuit.ccnot(b, c, d)?;
    circuit.cnot(c, b)?;
    circuit.add_alias(a, "G")?;
    circuit.add_alias(c, "G")?;
    Ok((b.to_string(), d.to_string()))
}

/// Half-adder A2: sum lands on `b`; `c` becomes garbage.
pub fn half_adder_a2(
    circuit: &mut Circuit,
    b: &str,
    c: &str,
    d: &str,
) -> CircuitResult<(String, String)> {
    circuit.ccnot(b, c, d)?;
    circuit.cnot(c, b)?;
    circuit.add_alias(c, "G")?;
    Ok((b.to_string(), d.to_string()))
}

/// Template A3: sum lands on `c`; `a` and `b` become garbage.
pub fn full_adder_a3(
    circuit: &mut Circuit,
    a: &str,
    b: &str,
    c: &str,
    d: &str,
) -> CircuitResult<(String, String)> {
    circuit.ccnot(a, c, d)?;
    circuit.cnot(a, c)?;
    circuit.ccnot(b, c, d)?;
    circuit.cnot(b, c)?;
    circuit.add_alias(a, "G")?;
    circuit.add_alias(b, "G")?;
    Ok((c.to_string(), d.to_string()))
}

/// Half-adder A3: sum lands on `c`; `b` becomes garbage.
pub fn half_adder_a3(
    circuit: &mut Circuit,
    b: &str,
    c: &str,
    d: &str,
) -> CircuitResult<(String, String)> {
    circuit.ccnot(b, c, d)?;
    circuit.cnot(b, c)?;
    circuit.add_alias(b, "G")?;
    Ok((c.to_string(), d.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alsvid_ir::Circuit;

    fn scratch_circuit() -> Circuit {
        let mut circuit = Circuit::new();
        circuit.add_bus("W", 4, false).unwrap();
        circuit.add_alias_bus("G", 0).unwrap();
        circuit
    }

    #[test]
    fn full_adder_templates_emit_four_gates() {
        for full in [full_adder_a1, full_adder_a2, full_adder_a3] {
            let mut circuit = scratch_circuit();
            let (sum, carry) = full(&mut circuit, "W0", "W1", "W2", "W3").unwrap();
            assert_eq!(circuit.gates().len(), 4);
            assert_eq!(carry, "W3");
            assert!(["W0", "W1", "W2"].contains(&sum.as_str()));
            // Two inputs sacrificed to garbage.
            assert_eq!(circuit.bus_width("G").unwrap(), 2);
        }
    }

    #[test]
    fn half_adder_templates_emit_two_gates() {
        for half in [half_adder_a1, half_adder_a2, half_adder_a3] {
            let mut circuit = scratch_circuit();
            let (_, carry) = half(&mut circuit, "W0", "W1", "W3").unwrap();
            assert_eq!(circuit.gates().len(), 2);
            assert_eq!(carry, "W3");
            assert_eq!(circuit.bus_width("G").unwrap(), 1);
        }
    }
}
