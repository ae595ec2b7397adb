//! Generic n-bit reversible multiplier synthesis.

use std::collections::VecDeque;

use alsvid_ir::{Circuit, CircuitResult};
use tracing::debug;

use crate::adder::{FullAdder, HalfAdder};

/// Build a reversible circuit computing `P = X · Y` for `size`-bit unsigned
/// inputs, little-endian across buses `X` and `Y`, with the 2·size-bit
/// product on bus `P`.
///
/// Layout:
/// - `A` holds the size² partial products,
/// - `Z` grows one scratch carry wire per adder,
/// - `I` enumerates the input wires (Y then X),
/// - `G` enumerates every wire that ends data-dependent (the inputs plus
///   the adder garbage) and therefore matters to reverse execution.
///
/// Partial products are produced by one CCNOT each and assigned to column
/// `x + y`; every column is then compressed to a single wire with the given
/// adder templates, carries rippling into the next column, and the survivor
/// is aliased as that product bit.
pub fn multiplier(size: u32, full: FullAdder, half: HalfAdder) -> CircuitResult<Circuit> {
    let mut circuit = Circuit::new();

    circuit.add_alias_bus("I", 0)?;
    circuit.add_bus("Y", size, false)?;
    circuit.add_bus("X", size, false)?;
    circuit.add_bus("A", size * size, false)?;
    circuit.add_alias_bus("P", 2 * size)?;
    circuit.add_bus("Z", 0, false)?;
    circuit.add_alias_bus("G", 0)?;

    circuit.add_alias("Y", "I")?;
    circuit.add_alias("X", "I")?;
    circuit.add_alias("Y", "G")?;
    circuit.add_alias("X", "G")?;

    let columns = 2 * size as usize;
    let mut sums: Vec<VecDeque<String>> = vec![VecDeque::new(); columns];
    let mut a = 0u32;
    for x in 0..size {
        for y in 0..size {
            let product = format!("A{a}");
            circuit.ccnot(&format!("Y{y}"), &format!("X{x}"), &product)?;
            sums[(x + y) as usize].push_back(product);
            a += 1;
        }
    }

    for column in 0..columns {
        loop {
            if sums[column].len() > 2 {
                let z = circuit.add_wire("Z", false)?;
                let (w0, w1, w2) = pop3(&mut sums[column]);
                let (sum, carry) = full(&mut circuit, &w0, &w1, &w2, &z)?;
                sums[column].push_front(sum);
                sums[column + 1].push_back(carry);
            } else if sums[column].len() == 2 {
                let z = circuit.add_wire("Z", false)?;
                let (w0, w1) = pop2(&mut sums[column]);
                let (sum, carry) = half(&mut circuit, &w0, &w1, &z)?;
                sums[column].push_front(sum);
                sums[column + 1].push_back(carry);
            } else if let Some(survivor) = sums[column].front() {
                circuit.add_alias(survivor, &format!("P{column}"))?;
                break;
            } else {
                // A 1-bit multiplier leaves its top column empty.
                break;
            }
        }
    }

    debug!(
        size,
        wires = circuit.num_wires(),
        gates = circuit.gates().len(),
        garbage = circuit.bus_width("G")?,
        "synthesized multiplier"
    );

    Ok(circuit)
}

fn pop3(column: &mut VecDeque<String>) -> (String, String, String) {
    let w0 = column.pop_front().expect("column has >2 wires");
    let w1 = column.pop_front().expect("column has >2 wires");
    let w2 = column.pop_front().expect("column has >2 wires");
    (w0, w1, w2)
}

fn pop2(column: &mut VecDeque<String>) -> (String, String) {
    let w0 = column.pop_front().expect("column has 2 wires");
    let w1 = column.pop_front().expect("column has 2 wires");
    (w0, w1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adder::{
        full_adder_a1, full_adder_a2, full_adder_a3, half_adder_a1, half_adder_a2, half_adder_a3,
    };

    #[test]
    fn four_bit_layout() {
        let circuit = multiplier(4, full_adder_a1, half_adder_a1).unwrap();
        assert_eq!(circuit.bus_width("Y").unwrap(), 4);
        assert_eq!(circuit.bus_width("X").unwrap(), 4);
        assert_eq!(circuit.bus_width("A").unwrap(), 16);
        assert_eq!(circuit.bus_width("P").unwrap(), 8);
        // 8 input wires aliased into I, and into G ahead of the adder garbage.
        assert_eq!(circuit.bus_width("I").unwrap(), 8);
        // 8 full adders (2 garbage each) + 4 half adders (1 each) + 8 inputs.
        assert_eq!(circuit.bus_width("G").unwrap(), 28);
        // One scratch carry per adder.
        assert_eq!(circuit.bus_width("Z").unwrap(), 12);
        // 16 partial products + 8·4 + 4·2 adder gates.
        assert_eq!(circuit.gates().len(), 56);
        assert_eq!(circuit.num_wires(), 4 + 4 + 16 + 12);
    }

    #[test]
    fn product_bits_resolve_to_wires() {
        let circuit = multiplier(4, full_adder_a1, half_adder_a1).unwrap();
        for i in 0..8 {
            let name = format!("P{i}");
            assert_ne!(circuit.resolve(&name), name, "P{i} must be an alias");
            assert!(circuit.wire(&name).is_ok());
        }
    }

    #[test]
    fn all_templates_agree_on_shape() {
        let a1 = multiplier(4, full_adder_a1, half_adder_a1).unwrap();
        let a2 = multiplier(4, full_adder_a2, half_adder_a2).unwrap();
        let a3 = multiplier(4, full_adder_a3, half_adder_a3).unwrap();
        assert_eq!(a1.gates().len(), a2.gates().len());
        assert_eq!(a2.gates().len(), a3.gates().len());
        assert_eq!(a1.num_wires(), a3.num_wires());
    }

    #[test]
    fn widths_scale_with_size() {
        let circuit = multiplier(8, full_adder_a1, half_adder_a1).unwrap();
        assert_eq!(circuit.bus_width("A").unwrap(), 64);
        assert_eq!(circuit.bus_width("P").unwrap(), 16);
        assert_eq!(circuit.bus_width("I").unwrap(), 16);
    }
}
