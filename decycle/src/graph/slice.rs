// Copyright (c) The decycle-rs Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::graph::cycles::CycleComponents;
use crate::graph::{Cycles, DepIx, DependencyGraph, EdgeLabel, SliceIx};
use crate::node::{Node, SimpleNode};
use indexmap::IndexMap;
use once_cell::sync::OnceCell;
use petgraph::prelude::*;
use std::collections::HashSet;
use tracing::debug;

/// Lifts nodes of a dependency graph to their slice group under one slicing.
pub struct SliceNodeFinder<'g> {
    graph: &'g DependencyGraph,
    slicing: &'g str,
}

impl<'g> SliceNodeFinder<'g> {
    /// Creates a finder for the given slicing.
    pub fn new(graph: &'g DependencyGraph, slicing: &'g str) -> Self {
        Self { graph, slicing }
    }

    /// Returns the slice node the given node belongs to, if any.
    pub fn lift(&self, node: &Node) -> Option<&'g SimpleNode> {
        self.graph.node_ix(node).and_then(|ix| self.lift_ix(ix))
    }

    /// Returns true if the node lifts to a slice node under this slicing.
    pub fn is_defined_at(&self, node: &Node) -> bool {
        self.lift(node).is_some()
    }

    pub(super) fn lift_ix(&self, ix: NodeIndex<DepIx>) -> Option<&'g SimpleNode> {
        let mut current = ix;
        // Containment forms a forest, so the walk terminates; the visited set
        // bounds it even for a malformed graph.
        let mut visited = HashSet::new();
        loop {
            match &self.graph.graph[current] {
                Node::Simple(simple) if simple.has_type(self.slicing) => return Some(simple),
                Node::ParentAware(node) => {
                    if let Some(val) = node.for_slicing(self.slicing) {
                        return Some(val);
                    }
                }
                Node::Simple(_) => {}
            }
            let container = self
                .graph
                .graph
                .edges_directed(current, Incoming)
                .find(|edge| *edge.weight() == EdgeLabel::Contains)
                .map(|edge| edge.source())?;
            if !visited.insert(current) {
                return None;
            }
            current = container;
        }
    }
}

/// The projection of a dependency graph onto one slicing.
///
/// Nodes are the slicing's slice nodes; edges are the references between them
/// after lifting both endpoints. Self-loops are dropped during projection and
/// parallel edges are collapsed. Owned by the caller, independent of further
/// use of the underlying graph.
#[derive(Clone, Debug)]
pub struct SliceGraph {
    slicing: String,
    pub(super) graph: Graph<SimpleNode, (), Directed, SliceIx>,
    node_ixs: IndexMap<SimpleNode, NodeIndex<SliceIx>>,
    // The cycle-capable components of the projection, computed on demand.
    components: OnceCell<CycleComponents>,
}

impl SliceGraph {
    pub(super) fn build(graph: &DependencyGraph, slicing: &str) -> Self {
        let mut projection = Self {
            slicing: slicing.to_string(),
            graph: Graph::default(),
            node_ixs: IndexMap::new(),
            components: OnceCell::new(),
        };

        for node in graph.all_nodes() {
            if let Node::Simple(simple) = node {
                if simple.has_type(slicing) {
                    projection.ensure_node(simple);
                }
            }
        }

        let finder = SliceNodeFinder::new(graph, slicing);
        for edge in graph.graph.edge_references() {
            if *edge.weight() != EdgeLabel::References {
                continue;
            }
            let (from, to) = match (finder.lift_ix(edge.source()), finder.lift_ix(edge.target())) {
                (Some(from), Some(to)) => (from, to),
                _ => continue,
            };
            if from == to {
                continue;
            }
            let from_ix = projection.ensure_node(from);
            let to_ix = projection.ensure_node(to);
            if projection.graph.find_edge(from_ix, to_ix).is_none() {
                projection.graph.add_edge(from_ix, to_ix, ());
            }
        }

        debug!(
            slicing,
            nodes = projection.graph.node_count(),
            edges = projection.graph.edge_count(),
            "slice projection built"
        );
        projection
    }

    /// Returns the name of the slicing this projection was built for.
    pub fn slicing(&self) -> &str {
        &self.slicing
    }

    /// Returns an iterator over the slice nodes, in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &SimpleNode> + ExactSizeIterator {
        self.node_ixs.keys()
    }

    /// Returns the number of slice nodes.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the number of projected reference edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Returns an iterator over the projected references, in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (&SimpleNode, &SimpleNode)> {
        self.graph
            .edge_references()
            .map(move |edge| (&self.graph[edge.source()], &self.graph[edge.target()]))
    }

    /// Returns true if the projection contains the reference `from -> to`.
    pub fn contains_edge(&self, from: &SimpleNode, to: &SimpleNode) -> bool {
        match (self.node_ixs.get(from), self.node_ixs.get(to)) {
            (Some(from_ix), Some(to_ix)) => self.graph.find_edge(*from_ix, *to_ix).is_some(),
            _ => false,
        }
    }

    /// Returns information about the reference cycles in this projection.
    pub fn cycles(&self) -> Cycles<'_> {
        Cycles::new(self)
    }

    pub(super) fn cycle_components(&self) -> &CycleComponents {
        self.components
            .get_or_init(|| CycleComponents::new(&self.graph))
    }

    pub(super) fn node_ix_by_name(&self, name: &str) -> Option<NodeIndex<SliceIx>> {
        self.node_ixs
            .iter()
            .find(|(node, _)| node.name() == name)
            .map(|(_, ix)| *ix)
    }

    fn ensure_node(&mut self, node: &SimpleNode) -> NodeIndex<SliceIx> {
        match self.node_ixs.get(node) {
            Some(ix) => *ix,
            None => {
                let ix = self.graph.add_node(node.clone());
                self.node_ixs.insert(node.clone(), ix);
                ix
            }
        }
    }
}
