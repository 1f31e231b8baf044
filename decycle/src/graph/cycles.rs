// Copyright (c) The decycle-rs Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Code for handling cycles in slice projections.

use crate::graph::{SliceGraph, SliceIx};
use crate::node::SimpleNode;
use petgraph::algo::kosaraju_scc;
use petgraph::prelude::*;
use std::collections::{HashMap, HashSet, VecDeque};

/// The components of a projection that can carry a cycle: strongly connected
/// groups of two or more slices.
///
/// Self-loops are dropped while the projection is built, so a singleton
/// component can never take part in a cycle; those are discarded right away.
/// What remains is exactly the constraint engine's input — one component per
/// cycle violation — plus a lookup from slice to its component.
#[derive(Clone, Debug)]
pub(super) struct CycleComponents {
    components: Vec<Vec<NodeIndex<SliceIx>>>,
    component_of: HashMap<NodeIndex<SliceIx>, usize>,
}

impl CycleComponents {
    /// Computes the cycle-capable components of a projection.
    ///
    /// The SCC pass is kosaraju's, which petgraph implements iteratively; a
    /// recursive walk could exhaust the stack on long reference chains.
    pub(super) fn new(graph: &Graph<SimpleNode, (), Directed, SliceIx>) -> Self {
        let components: Vec<_> = kosaraju_scc(graph)
            .into_iter()
            .filter(|component| component.len() > 1)
            .collect();
        let mut component_of = HashMap::new();
        for (index, component) in components.iter().enumerate() {
            component_of.extend(component.iter().map(|ix| (*ix, index)));
        }
        Self {
            components,
            component_of,
        }
    }

    fn iter(&self) -> impl Iterator<Item = &[NodeIndex<SliceIx>]> {
        self.components.iter().map(Vec::as_slice)
    }

    /// Returns true if both slices sit in the same cycle-capable component.
    fn in_same_cycle(&self, a: NodeIndex<SliceIx>, b: NodeIndex<SliceIx>) -> bool {
        match (self.component_of.get(&a), self.component_of.get(&b)) {
            (Some(a_component), Some(b_component)) => a_component == b_component,
            _ => false,
        }
    }
}

/// Contains information about reference cycles within a slice projection.
///
/// Constructed through `SliceGraph::cycles`.
pub struct Cycles<'g> {
    slice_graph: &'g SliceGraph,
    components: &'g CycleComponents,
}

impl<'g> Cycles<'g> {
    pub(super) fn new(slice_graph: &'g SliceGraph) -> Self {
        Self {
            slice_graph,
            components: slice_graph.cycle_components(),
        }
    }

    /// Returns true if the two named slices are part of the same cycle.
    pub fn is_cyclic(&self, a: &str, b: &str) -> bool {
        match (
            self.slice_graph.node_ix_by_name(a),
            self.slice_graph.node_ix_by_name(b),
        ) {
            (Some(a_ix), Some(b_ix)) => self.components.in_same_cycle(a_ix, b_ix),
            _ => false,
        }
    }

    /// Returns the members of every cycle of 2 or more slices, sorted within
    /// each cycle and across cycles.
    pub fn all_cycles(&self) -> Vec<Vec<&'g SimpleNode>> {
        let graph = &self.slice_graph.graph;
        let mut cycles: Vec<Vec<&SimpleNode>> = self
            .components
            .iter()
            .map(|component| {
                let mut members: Vec<_> = component.iter().map(|ix| &graph[*ix]).collect();
                members.sort();
                members
            })
            .collect();
        cycles.sort();
        cycles
    }

    /// Returns, for every cycle, a closed walk through its slices: starting
    /// from the lexicographically smallest member, visiting every member at
    /// least once, and returning to the start. Cycles are ordered by their
    /// starting slice, which keeps the output stable across runs.
    pub fn representative_cycles(&self) -> Vec<Vec<(&'g SimpleNode, &'g SimpleNode)>> {
        let mut cycles: Vec<_> = self
            .components
            .iter()
            .map(|component| self.walk(component))
            .collect();
        cycles.sort_by(|a, b| a[0].0.name().cmp(b[0].0.name()));
        cycles
    }

    fn name(&self, ix: NodeIndex<SliceIx>) -> &'g str {
        self.slice_graph.graph[ix].name()
    }

    fn walk(&self, component: &[NodeIndex<SliceIx>]) -> Vec<(&'g SimpleNode, &'g SimpleNode)> {
        let members: HashSet<_> = component.iter().copied().collect();
        let start = component
            .iter()
            .copied()
            .min_by(|a, b| self.name(*a).cmp(self.name(*b)))
            .expect("cycle components have at least two members");

        let mut walk = vec![start];
        let mut remaining = members.clone();
        remaining.remove(&start);
        let mut current = start;
        // Stitch together shortest detours to the nearest unvisited member,
        // then close the walk back at the start.
        while !remaining.is_empty() {
            for ix in self.shortest_path(current, &members, &remaining) {
                remaining.remove(&ix);
                walk.push(ix);
                current = ix;
            }
        }
        let start_set: HashSet<_> = std::iter::once(start).collect();
        walk.extend(self.shortest_path(current, &members, &start_set));

        let graph = &self.slice_graph.graph;
        walk.windows(2)
            .map(|pair| (&graph[pair[0]], &graph[pair[1]]))
            .collect()
    }

    /// BFS restricted to the component, expanding neighbors in name order so
    /// the chosen path is deterministic. Returns the path excluding `from`.
    fn shortest_path(
        &self,
        from: NodeIndex<SliceIx>,
        members: &HashSet<NodeIndex<SliceIx>>,
        targets: &HashSet<NodeIndex<SliceIx>>,
    ) -> Vec<NodeIndex<SliceIx>> {
        let mut queue = VecDeque::new();
        let mut pred: HashMap<NodeIndex<SliceIx>, NodeIndex<SliceIx>> = HashMap::new();
        let mut seen = HashSet::new();
        seen.insert(from);
        queue.push_back(from);
        while let Some(ix) = queue.pop_front() {
            if ix != from && targets.contains(&ix) {
                let mut path = vec![ix];
                let mut cursor = ix;
                while let Some(&parent) = pred.get(&cursor) {
                    if parent == from {
                        break;
                    }
                    path.push(parent);
                    cursor = parent;
                }
                path.reverse();
                return path;
            }
            let mut neighbors: Vec<_> = self
                .slice_graph
                .graph
                .neighbors_directed(ix, Outgoing)
                .filter(|neighbor| members.contains(neighbor))
                .collect();
            neighbors.sort_by(|a, b| self.name(*a).cmp(self.name(*b)));
            for neighbor in neighbors {
                if seen.insert(neighbor) {
                    pred.insert(neighbor, ix);
                    queue.push_back(neighbor);
                }
            }
        }
        unreachable!("component members are mutually reachable")
    }
}
