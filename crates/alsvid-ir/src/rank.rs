//! Influence ranking of wires via weighted PageRank.
//!
//! Each CNOT contributes a control→target edge of weight 1.0 and each CCNOT
//! two control→target edges of weight 0.5; NOT gates contribute nothing.
//! Ranks are computed by damped power iteration where a node's rank flows
//! along its out-edges proportionally to edge weight. petgraph's built-in
//! `page_rank` ignores edge weights, so the iteration is spelled out here
//! over a petgraph [`DiGraph`].

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use tracing::debug;

use crate::gate::Gate;

/// Damping factor of the rank iteration.
const DAMPING: f64 = 0.9;
/// L1 convergence threshold.
const EPSILON: f64 = 1e-6;

/// Rank every wire of a circuit with `num_wires` wires and the given gates.
///
/// Returns one rank per wire index. Wires that never appear in a gate keep
/// the teleport baseline `(1 − d) / n`.
pub(crate) fn influence_ranks(num_wires: usize, gates: &[Gate]) -> Vec<f64> {
    if num_wires == 0 {
        return vec![];
    }

    let mut graph = DiGraph::<(), f64>::with_capacity(num_wires, gates.len() * 2);
    let nodes: Vec<NodeIndex> = (0..num_wires).map(|_| graph.add_node(())).collect();
    for gate in gates {
        match *gate {
            Gate::Not { .. } => {}
            Gate::CNot { control, target } => {
                graph.add_edge(nodes[control as usize], nodes[target as usize], 1.0);
            }
            Gate::CCNot { controls, target } => {
                graph.add_edge(nodes[controls[0] as usize], nodes[target as usize], 0.5);
                graph.add_edge(nodes[controls[1] as usize], nodes[target as usize], 0.5);
            }
        }
    }

    let n = num_wires as f64;
    let out_weight: Vec<f64> = nodes
        .iter()
        .map(|&node| graph.edges(node).map(|e| *e.weight()).sum())
        .collect();

    let mut rank = vec![1.0 / n; num_wires];
    let mut sweeps = 0usize;
    loop {
        let mut next = vec![(1.0 - DAMPING) / n; num_wires];
        let mut dangling = 0.0;
        for (i, &node) in nodes.iter().enumerate() {
            if out_weight[i] == 0.0 {
                dangling += DAMPING * rank[i];
                continue;
            }
            for edge in graph.edges(node) {
                let share = edge.weight() / out_weight[i];
                next[edge.target().index()] += DAMPING * rank[i] * share;
            }
        }
        // Rank held by sink wires teleports uniformly.
        for value in &mut next {
            *value += dangling / n;
        }

        let delta: f64 = rank
            .iter()
            .zip(&next)
            .map(|(old, new)| (old - new).abs())
            .sum();
        rank = next;
        sweeps += 1;
        if delta < EPSILON {
            break;
        }
    }
    debug!(num_wires, sweeps, "influence ranks converged");

    rank
}
