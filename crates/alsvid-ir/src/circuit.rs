//! High-level circuit builder API.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{CircuitError, CircuitResult};
use crate::gate::Gate;
use crate::rank::influence_ranks;
use crate::wire::Wire;

/// A reversible circuit: wires, buses, aliases, and an ordered gate list.
///
/// The gate list is the program; devices interpret it forward or in reverse
/// over a chosen scalar type. A circuit is assembled once and treated as
/// immutable from the moment the first device borrows it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Circuit {
    /// Bus prefix → width. Covers both wired and alias buses.
    buses: FxHashMap<String, u32>,
    /// Wire name → wire. Indices are dense and stable.
    wires: FxHashMap<String, Wire>,
    /// Secondary name → canonical name. At most one hop.
    aliases: FxHashMap<String, String>,
    /// The ordered gate program.
    gates: Vec<Gate>,
}

impl Circuit {
    /// Create a new empty circuit.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Wires and buses
    // =========================================================================

    /// Declare a wired bus: `width` wires named `prefix0 … prefix{width-1}`,
    /// all with the given nominal value.
    ///
    /// A width of zero reserves the prefix; wires are then appended one at a
    /// time through [`add_wire`](Self::add_wire).
    pub fn add_bus(&mut self, prefix: &str, width: u32, nominal: bool) -> CircuitResult<()> {
        if self.buses.contains_key(prefix) {
            return Err(CircuitError::DuplicateBus(prefix.to_string()));
        }
        self.buses.insert(prefix.to_string(), width);
        for i in 0..width {
            self.create_wire(format!("{prefix}{i}"), nominal)?;
        }
        Ok(())
    }

    /// Declare an alias bus: a named enumeration of wires drawn from other
    /// buses. No wires are materialized; `width` is bookkeeping only.
    ///
    /// A width of zero starts an empty enumeration that grows as aliases are
    /// added; a non-zero width reserves slots that are later bound to
    /// explicit names such as `P3`.
    pub fn add_alias_bus(&mut self, prefix: &str, width: u32) -> CircuitResult<()> {
        if self.buses.contains_key(prefix) {
            return Err(CircuitError::DuplicateBus(prefix.to_string()));
        }
        self.buses.insert(prefix.to_string(), width);
        Ok(())
    }

    /// Create one wire and return its (possibly disambiguated) name.
    ///
    /// If `name` is a registered bus prefix the wire lands in the bus's next
    /// free slot, `prefix + width`, and the bus grows by one. Otherwise the
    /// wire is created under `name` as written.
    pub fn add_wire(&mut self, name: &str, nominal: bool) -> CircuitResult<String> {
        let name = if let Some(width) = self.buses.get_mut(name) {
            let slot = format!("{name}{width}");
            *width += 1;
            slot
        } else {
            name.to_string()
        };
        self.create_wire(name.clone(), nominal)?;
        Ok(name)
    }

    fn create_wire(&mut self, name: String, nominal: bool) -> CircuitResult<()> {
        if self.wires.contains_key(&name) {
            return Err(CircuitError::DuplicateWire(name));
        }
        let index = u32::try_from(self.wires.len()).expect("wire index overflow: exceeds u32::MAX");
        self.wires.insert(name.clone(), Wire::new(name, nominal, index));
        Ok(())
    }

    // =========================================================================
    // Aliases
    // =========================================================================

    /// Register a secondary name, returning the created alias names.
    ///
    /// If `name` is a bus prefix, every wire of that bus is aliased into
    /// `alias` element by element (so `alias` should be an alias bus, which
    /// is extended one slot per element). Otherwise a single alias entry is
    /// created; when `alias` is an alias-bus prefix the entry lands at slot
    /// `alias + width` and the bus grows by one.
    pub fn add_alias(&mut self, name: &str, alias: &str) -> CircuitResult<Vec<String>> {
        if let Some(width) = self.buses.get(name).copied() {
            let mut created = Vec::with_capacity(width as usize);
            for i in 0..width {
                created.push(self.alias_one(&format!("{name}{i}"), alias)?);
            }
            Ok(created)
        } else {
            Ok(vec![self.alias_one(name, alias)?])
        }
    }

    fn alias_one(&mut self, canonical: &str, alias: &str) -> CircuitResult<String> {
        let slot = match self.buses.get(alias) {
            Some(width) => format!("{alias}{width}"),
            None => alias.to_string(),
        };
        if self.aliases.contains_key(&slot) {
            return Err(CircuitError::DuplicateAlias(slot));
        }
        if let Some(width) = self.buses.get_mut(alias) {
            *width += 1;
        }
        self.aliases.insert(slot.clone(), canonical.to_string());
        Ok(slot)
    }

    /// Return the canonical name: one alias hop, or `name` unchanged.
    pub fn resolve<'a>(&'a self, name: &'a str) -> &'a str {
        match self.aliases.get(name) {
            Some(canonical) => canonical.as_str(),
            None => name,
        }
    }

    // =========================================================================
    // Gates
    // =========================================================================

    /// Append a NOT gate. The name is looked up as written, not through
    /// aliases.
    pub fn not(&mut self, a: &str) -> CircuitResult<&mut Self> {
        let a = self.tap(a, "not")?;
        self.gates.push(Gate::Not { a });
        Ok(self)
    }

    /// Append a CNOT gate (control, target).
    pub fn cnot(&mut self, control: &str, target: &str) -> CircuitResult<&mut Self> {
        let control = self.tap(control, "cnot")?;
        let target = self.tap(target, "cnot")?;
        self.gates.push(Gate::CNot { control, target });
        Ok(self)
    }

    /// Append a CCNOT (Toffoli) gate (two controls, target).
    pub fn ccnot(&mut self, c0: &str, c1: &str, target: &str) -> CircuitResult<&mut Self> {
        let controls = [self.tap(c0, "ccnot")?, self.tap(c1, "ccnot")?];
        let target = self.tap(target, "ccnot")?;
        self.gates.push(Gate::CCNot { controls, target });
        Ok(self)
    }

    fn tap(&self, name: &str, gate: &'static str) -> CircuitResult<u32> {
        self.wires
            .get(name)
            .map(|w| w.index)
            .ok_or_else(|| CircuitError::WireNotFound {
                name: name.to_string(),
                gate: Some(gate),
            })
    }

    // =========================================================================
    // Ranking
    // =========================================================================

    /// Rank every wire by influence (weighted PageRank over the
    /// control→target graph). Purely diagnostic.
    pub fn compute_ranks(&mut self) {
        let ranks = influence_ranks(self.wires.len(), &self.gates);
        for wire in self.wires.values_mut() {
            wire.rank = ranks[wire.index as usize];
        }
    }

    /// Wires sorted by descending rank.
    pub fn ranked_wires(&self) -> Vec<&Wire> {
        let mut wires: Vec<&Wire> = self.wires.values().collect();
        wires.sort_by(|a, b| b.rank.total_cmp(&a.rank).then(a.index.cmp(&b.index)));
        wires
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Number of wires.
    pub fn num_wires(&self) -> usize {
        self.wires.len()
    }

    /// The ordered gate program.
    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    /// Iterate over all wires (unordered).
    pub fn wires(&self) -> impl Iterator<Item = &Wire> {
        self.wires.values()
    }

    /// Width of a bus.
    pub fn bus_width(&self, prefix: &str) -> CircuitResult<u32> {
        self.buses
            .get(prefix)
            .copied()
            .ok_or_else(|| CircuitError::BusNotFound(prefix.to_string()))
    }

    /// Look up a wire by name, resolving through one alias hop.
    pub fn wire(&self, name: &str) -> CircuitResult<&Wire> {
        let canonical = self.resolve(name);
        self.wires
            .get(canonical)
            .ok_or_else(|| CircuitError::WireNotFound {
                name: name.to_string(),
                gate: None,
            })
    }

    /// Memory index of a wire, resolving through one alias hop.
    pub fn wire_index(&self, name: &str) -> CircuitResult<u32> {
        self.wire(name).map(|w| w.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bus_materializes_wires() {
        let mut circuit = Circuit::new();
        circuit.add_bus("X", 3, false).unwrap();
        assert_eq!(circuit.num_wires(), 3);
        assert_eq!(circuit.wire_index("X0").unwrap(), 0);
        assert_eq!(circuit.wire_index("X2").unwrap(), 2);
        assert_eq!(circuit.bus_width("X").unwrap(), 3);
    }

    #[test]
    fn test_duplicate_bus_rejected() {
        let mut circuit = Circuit::new();
        circuit.add_bus("X", 1, false).unwrap();
        assert!(matches!(
            circuit.add_bus("X", 1, false),
            Err(CircuitError::DuplicateBus(_))
        ));
        assert!(matches!(
            circuit.add_alias_bus("X", 0),
            Err(CircuitError::DuplicateBus(_))
        ));
    }

    #[test]
    fn test_add_wire_grows_bus() {
        let mut circuit = Circuit::new();
        circuit.add_bus("Z", 0, false).unwrap();
        assert_eq!(circuit.add_wire("Z", false).unwrap(), "Z0");
        assert_eq!(circuit.add_wire("Z", false).unwrap(), "Z1");
        assert_eq!(circuit.bus_width("Z").unwrap(), 2);
        assert_eq!(circuit.num_wires(), 2);
    }

    #[test]
    fn test_add_wire_plain_name() {
        let mut circuit = Circuit::new();
        assert_eq!(circuit.add_wire("carry", true).unwrap(), "carry");
        assert!(matches!(
            circuit.add_wire("carry", true),
            Err(CircuitError::DuplicateWire(_))
        ));
    }

    #[test]
    fn test_bus_alias_expansion() {
        let mut circuit = Circuit::new();
        circuit.add_bus("Y", 2, false).unwrap();
        circuit.add_alias_bus("I", 0).unwrap();
        let created = circuit.add_alias("Y", "I").unwrap();
        assert_eq!(created, vec!["I0", "I1"]);
        assert_eq!(circuit.bus_width("I").unwrap(), 2);
        assert_eq!(circuit.resolve("I1"), "Y1");
        assert_eq!(circuit.wire_index("I1").unwrap(), circuit.wire_index("Y1").unwrap());
    }

    #[test]
    fn test_single_alias_appends_to_alias_bus() {
        let mut circuit = Circuit::new();
        circuit.add_bus("X", 2, false).unwrap();
        circuit.add_alias_bus("G", 0).unwrap();
        assert_eq!(circuit.add_alias("X1", "G").unwrap(), vec!["G0"]);
        assert_eq!(circuit.add_alias("X0", "G").unwrap(), vec!["G1"]);
        assert_eq!(circuit.bus_width("G").unwrap(), 2);
        assert_eq!(circuit.resolve("G0"), "X1");
    }

    #[test]
    fn test_alias_to_explicit_slot() {
        let mut circuit = Circuit::new();
        circuit.add_bus("A", 1, false).unwrap();
        circuit.add_alias_bus("P", 2).unwrap();
        // "P0" is not a bus prefix, so the alias lands exactly there.
        assert_eq!(circuit.add_alias("A0", "P0").unwrap(), vec!["P0"]);
        assert_eq!(circuit.resolve("P0"), "A0");
        assert_eq!(circuit.bus_width("P").unwrap(), 2);
    }

    #[test]
    fn test_resolve_unknown_is_identity() {
        let circuit = Circuit::new();
        assert_eq!(circuit.resolve("Q7"), "Q7");
    }

    #[test]
    fn test_gate_taps_are_checked() {
        let mut circuit = Circuit::new();
        circuit.add_bus("X", 2, false).unwrap();
        let err = circuit.cnot("X0", "X9").unwrap_err();
        assert!(matches!(
            err,
            CircuitError::WireNotFound {
                gate: Some("cnot"),
                ..
            }
        ));
    }

    #[test]
    fn test_gates_do_not_resolve_aliases() {
        let mut circuit = Circuit::new();
        circuit.add_bus("X", 1, false).unwrap();
        circuit.add_alias_bus("G", 0).unwrap();
        circuit.add_alias("X0", "G").unwrap();
        // "G0" resolves to X0 for accessors, but gate taps take names as
        // written and G0 is not a wire.
        assert!(circuit.not("G0").is_err());
        assert!(circuit.not("X0").is_ok());
    }

    #[test]
    fn test_fluent_gate_chain() {
        let mut circuit = Circuit::new();
        circuit.add_bus("X", 3, false).unwrap();
        circuit
            .not("X0")
            .unwrap()
            .cnot("X0", "X1")
            .unwrap()
            .ccnot("X0", "X1", "X2")
            .unwrap();
        assert_eq!(circuit.gates().len(), 3);
        assert_eq!(circuit.gates()[2].target(), 2);
    }

    #[test]
    fn test_compute_ranks_populates_wires() {
        let mut circuit = Circuit::new();
        circuit.add_bus("X", 3, false).unwrap();
        circuit.cnot("X0", "X1").unwrap().cnot("X1", "X2").unwrap();
        circuit.compute_ranks();
        let ranked = circuit.ranked_wires();
        assert_eq!(ranked[0].name, "X2");
        assert!(ranked[0].rank > ranked[2].rank);
    }
}
