// Copyright (c) The decycle-rs Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::graph::SliceGraph;
use crate::node::SimpleNode;
use crate::violations::Violation;

/// Checks that the slices of one slicing are free of reference cycles.
///
/// Every strongly connected component of two or more slices produces one
/// violation whose dependencies form a closed walk through the component.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CycleFree {
    slicing: String,
}

impl CycleFree {
    /// Creates a cycle-free constraint over the given slicing.
    pub fn new(slicing: impl Into<String>) -> Self {
        Self {
            slicing: slicing.into(),
        }
    }

    /// Returns the slicing this constraint is declared over.
    pub fn slicing(&self) -> &str {
        &self.slicing
    }

    pub(crate) fn evaluate(&self, source: &SliceGraph) -> Vec<Violation> {
        source
            .cycles()
            .representative_cycles()
            .into_iter()
            .map(|cycle| {
                let dependencies = cycle
                    .into_iter()
                    .map(|(from, to)| {
                        (
                            SimpleNode::slice(self.slicing.as_str(), from.name()),
                            SimpleNode::slice(self.slicing.as_str(), to.name()),
                        )
                    })
                    .collect();
                Violation::new("cycle-free", self.slicing.as_str(), dependencies)
            })
            .collect()
    }
}
