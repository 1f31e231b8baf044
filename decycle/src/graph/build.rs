// Copyright (c) The decycle-rs Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::graph::{DepIx, DependencyGraph, EdgeLabel};
use crate::node::Node;
use petgraph::prelude::*;
use std::collections::HashSet;
use tracing::trace;

impl DependencyGraph {
    /// Adds a class to the graph, together with its containment chain.
    ///
    /// Does nothing if the global node filter rejects the class.
    pub fn add_class(&mut self, class_name: &str) {
        if !self.node_filter.accepts(class_name) {
            trace!(class = class_name, "class rejected by node filter");
            return;
        }
        let node = Node::Simple(self.categorizer.class_node(class_name));
        self.add_node(node);
    }

    /// Adds a reference between two classes and seeds both containment chains.
    ///
    /// The reference edge is skipped for self-references, for endpoints
    /// rejected by the node filter, and for pairs suppressed by an ignore
    /// rule.
    pub fn connect(&mut self, from: &str, to: &str) {
        if !(self.node_filter.accepts(from) && self.node_filter.accepts(to)) {
            return;
        }
        let from_node = Node::Simple(self.categorizer.class_node(from));
        let to_node = Node::Simple(self.categorizer.class_node(to));
        if from == to {
            trace!(class = from, "skipping self-reference");
        } else if !self.edge_filter.accepts(from, to) {
            trace!(from, to, "reference suppressed by ignore rule");
        } else {
            let from_ix = self.ensure_node(from_node.clone());
            let to_ix = self.ensure_node(to_node.clone());
            self.add_edge(from_ix, to_ix, EdgeLabel::References);
        }
        self.add_node(from_node);
        self.add_node(to_node);
    }

    /// Inserts the node and walks the categorizer up to its fixpoint, adding a
    /// `Contains` edge per step.
    fn add_node(&mut self, node: Node) {
        let mut current_ix = self.ensure_node(node.clone());
        let mut current = node;
        // The categorizer fixpoint ends the walk; the visited set bounds it
        // even for a miscategorizing setup.
        let mut visited = HashSet::new();
        loop {
            let category = self.categorizer.categorize(&current);
            if category == current {
                break;
            }
            let category_ix = self.ensure_node(category.clone());
            self.add_edge(category_ix, current_ix, EdgeLabel::Contains);
            if !visited.insert(current) {
                break;
            }
            current_ix = category_ix;
            current = category;
        }
    }

    fn ensure_node(&mut self, node: Node) -> NodeIndex<DepIx> {
        match self.node_ixs.get(&node) {
            Some(ix) => *ix,
            None => {
                let ix = self.graph.add_node(node.clone());
                self.node_ixs.insert(node, ix);
                ix
            }
        }
    }

    fn add_edge(&mut self, from: NodeIndex<DepIx>, to: NodeIndex<DepIx>, label: EdgeLabel) {
        // Self-loops are rejected before insertion, parallel edges of the same
        // label are collapsed.
        if from == to {
            return;
        }
        if self.edge_set.insert((from, to, label)) {
            self.graph.add_edge(from, to, label);
        }
    }
}
