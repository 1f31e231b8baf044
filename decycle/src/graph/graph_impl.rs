// Copyright (c) The decycle-rs Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::categorizer::{Categorizer, EdgeFilter, NodeFilter};
use crate::graph::{DepIx, EdgeLabel, SliceGraph};
use crate::node::Node;
use indexmap::IndexMap;
use petgraph::prelude::*;
use std::collections::HashSet;

/// A directed multigraph of classes and the slice groups containing them.
///
/// Nodes are added monotonically during the ingest phase through
/// [`add_class`](Self::add_class) and [`connect`](Self::connect); afterwards
/// the graph is read-only. Edges carry an [`EdgeLabel`]: `Contains` edges form
/// the containment forest from slice groups down to classes, `References`
/// edges record class-to-class references.
#[derive(Clone, Debug)]
pub struct DependencyGraph {
    pub(super) graph: Graph<Node, EdgeLabel, Directed, DepIx>,
    pub(super) node_ixs: IndexMap<Node, NodeIndex<DepIx>>,
    // Semantic deduplication of parallel edges with the same label.
    pub(super) edge_set: HashSet<(NodeIndex<DepIx>, NodeIndex<DepIx>, EdgeLabel)>,
    pub(super) categorizer: Categorizer,
    pub(super) node_filter: NodeFilter,
    pub(super) edge_filter: EdgeFilter,
}

impl DependencyGraph {
    /// Creates an empty graph with the given categorizer and filters.
    pub fn new(categorizer: Categorizer, node_filter: NodeFilter, edge_filter: EdgeFilter) -> Self {
        Self {
            graph: Graph::default(),
            node_ixs: IndexMap::new(),
            edge_set: HashSet::new(),
            categorizer,
            node_filter,
            edge_filter,
        }
    }

    /// Returns an iterator over all nodes, in insertion order.
    pub fn all_nodes(&self) -> impl Iterator<Item = &Node> + ExactSizeIterator {
        self.node_ixs.keys()
    }

    /// Returns true if the graph contains this node.
    pub fn contains_node(&self, node: &Node) -> bool {
        self.node_ixs.contains_key(node)
    }

    /// Returns the number of nodes in this graph.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the roots of the containment forest: nodes without an incoming
    /// `Contains` edge, in insertion order.
    pub fn top_nodes(&self) -> Vec<&Node> {
        self.node_ixs
            .values()
            .filter(|ix| {
                self.graph
                    .edges_directed(**ix, Incoming)
                    .all(|edge| *edge.weight() != EdgeLabel::Contains)
            })
            .map(|ix| &self.graph[*ix])
            .collect()
    }

    /// Returns the nodes directly contained in the given slice group.
    pub fn contents_of(&self, node: &Node) -> Vec<&Node> {
        self.out_neighbors(node, EdgeLabel::Contains)
    }

    /// Returns the nodes the given node refers to.
    pub fn connections_of(&self, node: &Node) -> Vec<&Node> {
        self.out_neighbors(node, EdgeLabel::References)
    }

    /// Projects the graph onto one slicing: a freshly owned graph whose nodes
    /// are the slicing's slice nodes and whose edges are the lifted
    /// references.
    pub fn slice(&self, slicing: &str) -> SliceGraph {
        SliceGraph::build(self, slicing)
    }

    pub(super) fn node_ix(&self, node: &Node) -> Option<NodeIndex<DepIx>> {
        self.node_ixs.get(node).copied()
    }

    fn out_neighbors(&self, node: &Node, label: EdgeLabel) -> Vec<&Node> {
        let ix = match self.node_ix(node) {
            Some(ix) => ix,
            None => return Vec::new(),
        };
        // Outgoing edges iterate most-recently-added first; flip them back to
        // insertion order.
        let mut neighbors: Vec<_> = self
            .graph
            .edges_directed(ix, Outgoing)
            .filter(|edge| *edge.weight() == label)
            .map(|edge| &self.graph[edge.target()])
            .collect();
        neighbors.reverse();
        neighbors
    }
}
