//! Stateful interpreters of a circuit over one scalar type.
//!
//! A [`Device`] borrows its circuit and owns one flat memory cell per wire.
//! The same gate list executes under three interpretations: strict boolean,
//! real-valued relaxation on `[0, 1]`, and dual numbers carrying a
//! forward-mode derivative. Reverse execution iterates the gates
//! last-to-first with the same per-gate rule; in the boolean semiring that
//! undoes a forward execution bit-exactly because every gate in the family
//! is an involution.

use alsvid_dual::Dual;
use alsvid_ir::{Circuit, Gate};

use crate::error::{SimError, SimResult};
use crate::mapping::{GateMapping, Paraboloid};

/// Execution direction over the gate list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// First gate to last.
    Forward,
    /// Last gate to first, same per-gate rule.
    Reverse,
}

/// A memory scalar: how a wire value is stored and thresholded.
pub trait Signal: Copy {
    /// The memory value of a nominal bit.
    fn nominal(bit: bool) -> Self;
    /// Thresholded readback (`> 0.5` for numeric signals).
    fn bit(self) -> bool;
}

impl Signal for bool {
    #[inline]
    fn nominal(bit: bool) -> Self {
        bit
    }

    #[inline]
    fn bit(self) -> bool {
        self
    }
}

impl Signal for f32 {
    #[inline]
    fn nominal(bit: bool) -> Self {
        if bit { 1.0 } else { 0.0 }
    }

    #[inline]
    fn bit(self) -> bool {
        self > 0.5
    }
}

impl Signal for Dual {
    #[inline]
    fn nominal(bit: bool) -> Self {
        if bit { Dual::ONE } else { Dual::ZERO }
    }

    #[inline]
    fn bit(self) -> bool {
        self.val > 0.5
    }
}

/// A device: one circuit, one flat memory array, and (for dual devices) a
/// gate-mapping strategy.
///
/// The circuit is borrowed and never mutated through the device; memory is
/// sized exactly to the wire count at construction and never resized.
#[derive(Debug, Clone)]
pub struct Device<'c, T, M = ()> {
    circuit: &'c Circuit,
    memory: Vec<T>,
    mapping: M,
}

/// Boolean interpreter.
pub type BoolDevice<'c> = Device<'c, bool>;
/// Real-valued interpreter (f32 relaxation).
pub type RealDevice<'c> = Device<'c, f32>;
/// Dual-number interpreter with gate mapping `M`.
pub type DualDevice<'c, M = Paraboloid> = Device<'c, Dual, M>;

fn blank_memory<T: Signal>(circuit: &Circuit) -> Vec<T> {
    let mut memory = vec![T::nominal(false); circuit.num_wires()];
    for wire in circuit.wires() {
        memory[wire.index as usize] = T::nominal(wire.nominal);
    }
    memory
}

impl<'c> Device<'c, bool> {
    /// Create a boolean device in the circuit's blank state.
    pub fn new(circuit: &'c Circuit) -> Self {
        Self {
            circuit,
            memory: blank_memory(circuit),
            mapping: (),
        }
    }

    /// Run the gate list.
    pub fn execute(&mut self, direction: Direction) {
        let gates = self.circuit.gates();
        match direction {
            Direction::Forward => {
                for gate in gates {
                    apply_bool(&mut self.memory, gate);
                }
            }
            Direction::Reverse => {
                for gate in gates.iter().rev() {
                    apply_bool(&mut self.memory, gate);
                }
            }
        }
    }
}

#[inline]
fn apply_bool(memory: &mut [bool], gate: &Gate) {
    match *gate {
        Gate::Not { a } => memory[a as usize] = !memory[a as usize],
        Gate::CNot { control, target } => {
            memory[target as usize] ^= memory[control as usize];
        }
        Gate::CCNot { controls, target } => {
            memory[target as usize] ^=
                memory[controls[0] as usize] & memory[controls[1] as usize];
        }
    }
}

impl<'c> Device<'c, f32> {
    /// Create a real-valued device in the circuit's blank state.
    pub fn new(circuit: &'c Circuit) -> Self {
        Self {
            circuit,
            memory: blank_memory(circuit),
            mapping: (),
        }
    }

    /// Run the gate list under the arithmetized gate forms.
    pub fn execute(&mut self, direction: Direction) {
        let gates = self.circuit.gates();
        match direction {
            Direction::Forward => {
                for gate in gates {
                    apply_real(&mut self.memory, gate);
                }
            }
            Direction::Reverse => {
                for gate in gates.iter().rev() {
                    apply_real(&mut self.memory, gate);
                }
            }
        }
    }
}

#[inline]
fn apply_real(memory: &mut [f32], gate: &Gate) {
    match *gate {
        Gate::Not { a } => memory[a as usize] = 1.0 - memory[a as usize],
        Gate::CNot { control, target } => {
            let a = memory[control as usize];
            let b = memory[target as usize];
            memory[target as usize] = (1.0 - a) * b + (1.0 - b) * a;
        }
        Gate::CCNot { controls, target } => {
            let a = memory[controls[0] as usize];
            let b = memory[controls[1] as usize];
            let c = memory[target as usize];
            memory[target as usize] = (1.0 - a * b) * c + (1.0 - c) * a * b;
        }
    }
}

impl<'c, M: GateMapping> Device<'c, Dual, M> {
    /// Create a dual-number device with the given gate mapping.
    pub fn with_mapping(circuit: &'c Circuit, mapping: M) -> Self {
        Self {
            circuit,
            memory: blank_memory(circuit),
            mapping,
        }
    }

    /// Run the gate list through the mapping strategy.
    pub fn execute(&mut self, direction: Direction) {
        let gates = self.circuit.gates();
        match direction {
            Direction::Forward => {
                for gate in gates {
                    apply_dual(&mut self.memory, &mut self.mapping, gate);
                }
            }
            Direction::Reverse => {
                for gate in gates.iter().rev() {
                    apply_dual(&mut self.memory, &mut self.mapping, gate);
                }
            }
        }
    }
}

impl<'c> Device<'c, Dual, Paraboloid> {
    /// Create a dual-number device with the closed-form mapping.
    pub fn new(circuit: &'c Circuit) -> Self {
        Self::with_mapping(circuit, Paraboloid)
    }
}

#[inline]
fn apply_dual<M: GateMapping>(memory: &mut [Dual], mapping: &mut M, gate: &Gate) {
    match *gate {
        Gate::Not { a } => memory[a as usize] = mapping.not(memory[a as usize]),
        Gate::CNot { control, target } => {
            memory[target as usize] =
                mapping.cnot(memory[control as usize], memory[target as usize]);
        }
        Gate::CCNot { controls, target } => {
            memory[target as usize] = mapping.ccnot(
                memory[controls[0] as usize],
                memory[controls[1] as usize],
                memory[target as usize],
            );
        }
    }
}

impl<'c, T: Signal, M> Device<'c, T, M> {
    /// The circuit this device interprets.
    pub fn circuit(&self) -> &'c Circuit {
        self.circuit
    }

    /// Restore every memory cell to its wire's nominal value.
    pub fn reset(&mut self) {
        for wire in self.circuit.wires() {
            self.memory[wire.index as usize] = T::nominal(wire.nominal);
        }
    }

    /// Write one wire, resolving through aliases.
    pub fn set(&mut self, name: &str, value: T) -> SimResult<()> {
        let index = self.circuit.wire_index(name)?;
        self.memory[index as usize] = value;
        Ok(())
    }

    /// Read one wire, resolving through aliases.
    pub fn get(&self, name: &str) -> SimResult<T> {
        let index = self.circuit.wire_index(name)?;
        Ok(self.memory[index as usize])
    }

    /// Write consecutive bus elements starting at bit 0.
    pub fn set_bus(&mut self, prefix: &str, values: &[T]) -> SimResult<()> {
        for (i, &value) in values.iter().enumerate() {
            self.set(&format!("{prefix}{i}"), value)?;
        }
        Ok(())
    }

    /// Pack an integer little-endian across the bus: bit `i` of `value`
    /// lands on `prefix + i`.
    pub fn set_uint64(&mut self, prefix: &str, mut value: u64) -> SimResult<()> {
        let width = self.packed_width(prefix)?;
        for i in 0..width {
            self.set(&format!("{prefix}{i}"), T::nominal(value & 1 == 1))?;
            value >>= 1;
        }
        Ok(())
    }

    /// Unpack the bus into an integer, thresholding each wire.
    pub fn uint64(&self, prefix: &str) -> SimResult<u64> {
        let width = self.packed_width(prefix)?;
        let mut value = 0u64;
        for i in 0..width {
            if self.get(&format!("{prefix}{i}"))?.bit() {
                value |= 1 << i;
            }
        }
        Ok(value)
    }

    fn packed_width(&self, prefix: &str) -> SimResult<u32> {
        let width = self.circuit.bus_width(prefix)?;
        if width > 64 {
            return Err(SimError::BusTooWide {
                bus: prefix.to_string(),
                width,
            });
        }
        Ok(width)
    }

    /// A 0/1 text image of the bus in bit-index order.
    pub fn string(&self, prefix: &str) -> SimResult<String> {
        let width = self.circuit.bus_width(prefix)?;
        let mut image = String::with_capacity(width as usize);
        for i in 0..width {
            image.push(if self.get(&format!("{prefix}{i}"))?.bit() {
                '1'
            } else {
                '0'
            });
        }
        Ok(image)
    }

    /// Dump the first `count` bus elements to stdout, thresholded.
    pub fn print(&self, prefix: &str, count: u32) -> SimResult<()> {
        for i in 0..count {
            let name = format!("{prefix}{i}");
            let bit = u8::from(self.get(&name)?.bit());
            println!("{name}={bit}");
        }
        Ok(())
    }

    /// Resolved memory indices of every bus element, for hot loops that
    /// must not re-format names per access.
    pub fn bus_indices(&self, prefix: &str) -> SimResult<Vec<usize>> {
        let width = self.circuit.bus_width(prefix)?;
        (0..width)
            .map(|i| Ok(self.circuit.wire_index(&format!("{prefix}{i}"))? as usize))
            .collect()
    }

    /// Read by raw memory index.
    #[inline]
    pub fn get_at(&self, index: usize) -> T {
        self.memory[index]
    }

    /// Write by raw memory index.
    #[inline]
    pub fn set_at(&mut self, index: usize, value: T) {
        self.memory[index] = value;
    }
}

impl<'c, M> Device<'c, Dual, M> {
    /// Allocate a zeroed slice sized to the bus.
    pub fn allocate_slice(&self, prefix: &str) -> SimResult<Vec<Dual>> {
        let width = self.circuit.bus_width(prefix)?;
        Ok(vec![Dual::ZERO; width as usize])
    }

    /// Copy the bus into `slice`.
    pub fn get_slice(&self, prefix: &str, slice: &mut [Dual]) -> SimResult<()> {
        self.check_slice(prefix, slice.len())?;
        for (i, slot) in slice.iter_mut().enumerate() {
            *slot = self.get(&format!("{prefix}{i}"))?;
        }
        Ok(())
    }

    /// Copy `slice` onto the bus.
    pub fn set_slice(&mut self, prefix: &str, slice: &[Dual]) -> SimResult<()> {
        self.check_slice(prefix, slice.len())?;
        for (i, &value) in slice.iter().enumerate() {
            self.set(&format!("{prefix}{i}"), value)?;
        }
        Ok(())
    }

    fn check_slice(&self, prefix: &str, len: usize) -> SimResult<()> {
        let width = self.circuit.bus_width(prefix)? as usize;
        if len != width {
            return Err(SimError::SliceLength {
                bus: prefix.to_string(),
                expected: width,
                got: len,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toy_circuit() -> Circuit {
        let mut circuit = Circuit::new();
        circuit.add_bus("X", 3, false).unwrap();
        circuit.add_bus("Y", 1, true).unwrap();
        circuit
            .cnot("X0", "X1")
            .unwrap()
            .ccnot("X0", "X1", "X2")
            .unwrap();
        circuit
    }

    #[test]
    fn nominals_define_the_blank_state() {
        let circuit = toy_circuit();
        let device = BoolDevice::new(&circuit);
        assert!(!device.get("X0").unwrap());
        assert!(device.get("Y0").unwrap());
        assert_eq!(device.circuit().num_wires(), 4);
    }

    #[test]
    fn reset_restores_nominals() {
        let circuit = toy_circuit();
        let mut device = BoolDevice::new(&circuit);
        device.set("X0", true).unwrap();
        device.set("Y0", false).unwrap();
        device.reset();
        assert!(!device.get("X0").unwrap());
        assert!(device.get("Y0").unwrap());
    }

    #[test]
    fn boolean_gates_apply_in_order() {
        let circuit = toy_circuit();
        let mut device = BoolDevice::new(&circuit);
        device.set("X0", true).unwrap();
        device.execute(Direction::Forward);
        // CNOT sets X1, then CCNOT fires on X0·X1.
        assert!(device.get("X1").unwrap());
        assert!(device.get("X2").unwrap());
    }

    #[test]
    fn forward_then_reverse_is_identity() {
        let circuit = toy_circuit();
        let mut device = BoolDevice::new(&circuit);
        device.set("X0", true).unwrap();
        device.execute(Direction::Forward);
        device.execute(Direction::Reverse);
        assert!(device.get("X0").unwrap());
        assert!(!device.get("X1").unwrap());
        assert!(!device.get("X2").unwrap());
    }

    #[test]
    fn uint64_round_trips_on_every_width() {
        for width in 1..=16u32 {
            let mut circuit = Circuit::new();
            circuit.add_bus("V", width, false).unwrap();
            let mut device = BoolDevice::new(&circuit);
            for value in 0..(1u64 << width) {
                device.set_uint64("V", value).unwrap();
                assert_eq!(device.uint64("V").unwrap(), value);
            }
        }
    }

    #[test]
    fn real_uint64_round_trips_through_threshold() {
        let mut circuit = Circuit::new();
        circuit.add_bus("V", 8, false).unwrap();
        let mut device = RealDevice::new(&circuit);
        for value in 0..256u64 {
            device.set_uint64("V", value).unwrap();
            assert_eq!(device.uint64("V").unwrap(), value);
        }
    }

    #[test]
    fn packing_rejects_wide_buses() {
        let mut circuit = Circuit::new();
        circuit.add_bus("W", 65, false).unwrap();
        let mut device = BoolDevice::new(&circuit);
        assert!(matches!(
            device.set_uint64("W", 1),
            Err(SimError::BusTooWide { width: 65, .. })
        ));
        assert!(matches!(
            device.uint64("W"),
            Err(SimError::BusTooWide { .. })
        ));
    }

    #[test]
    fn unknown_names_are_errors() {
        let circuit = toy_circuit();
        let mut device = BoolDevice::new(&circuit);
        assert!(device.get("Q0").is_err());
        assert!(device.set("Q0", true).is_err());
        assert!(device.uint64("Q").is_err());
    }

    #[test]
    fn aliases_read_and_write_the_same_cell() {
        let mut circuit = Circuit::new();
        circuit.add_bus("X", 2, false).unwrap();
        circuit.add_alias_bus("I", 0).unwrap();
        circuit.add_alias("X", "I").unwrap();
        let mut device = BoolDevice::new(&circuit);
        device.set("I1", true).unwrap();
        assert!(device.get("X1").unwrap());
        assert_eq!(device.uint64("I").unwrap(), device.uint64("X").unwrap());
    }

    #[test]
    fn set_bus_writes_consecutive_bits() {
        let mut circuit = Circuit::new();
        circuit.add_bus("V", 4, false).unwrap();
        let mut device = BoolDevice::new(&circuit);
        device.set_bus("V", &[true, false, true]).unwrap();
        assert_eq!(device.uint64("V").unwrap(), 0b0101);
        assert!(!device.get("V3").unwrap());
    }

    #[test]
    fn string_renders_bit_image() {
        let mut circuit = Circuit::new();
        circuit.add_bus("V", 4, false).unwrap();
        let mut device = BoolDevice::new(&circuit);
        device.set_uint64("V", 0b0101).unwrap();
        assert_eq!(device.string("V").unwrap(), "1010");
    }

    #[test]
    fn print_dumps_without_error() {
        let circuit = toy_circuit();
        let device = BoolDevice::new(&circuit);
        device.print("X", 3).unwrap();
    }

    #[test]
    fn dual_slices_round_trip() {
        let mut circuit = Circuit::new();
        circuit.add_bus("V", 3, false).unwrap();
        let mut device = DualDevice::new(&circuit);
        let mut slice = device.allocate_slice("V").unwrap();
        assert_eq!(slice.len(), 3);
        slice[1] = Dual::ONE;
        device.set_slice("V", &slice).unwrap();
        assert_eq!(device.uint64("V").unwrap(), 2);
        let mut readback = device.allocate_slice("V").unwrap();
        device.get_slice("V", &mut readback).unwrap();
        assert_eq!(readback[1].val, 1.0);
    }

    #[test]
    fn slice_length_is_checked() {
        let mut circuit = Circuit::new();
        circuit.add_bus("V", 3, false).unwrap();
        let mut device = DualDevice::new(&circuit);
        let short = vec![Dual::ZERO; 2];
        assert!(matches!(
            device.set_slice("V", &short),
            Err(SimError::SliceLength {
                expected: 3,
                got: 2,
                ..
            })
        ));
    }

    #[test]
    fn bus_indices_match_name_lookups() {
        let circuit = toy_circuit();
        let mut device = BoolDevice::new(&circuit);
        let indices = device.bus_indices("X").unwrap();
        device.set_at(indices[2], true);
        assert!(device.get("X2").unwrap());
    }
}
