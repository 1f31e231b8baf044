// Copyright (c) The decycle-rs Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed nodes of the dependency graph.

use itertools::Itertools;
use smallvec::SmallVec;
use std::fmt;

/// The node type marking concrete class nodes.
pub const CLASS_TYPE: &str = "class";

/// A named node together with the set of types it belongs to.
///
/// A concrete class carries the [`CLASS_TYPE`] type plus the name of every
/// slicing in which the class is itself a slice group. A slice group carries
/// exactly the name of its slicing. Two nodes are equal iff both name and
/// types are equal.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct SimpleNode {
    name: String,
    // Kept sorted and deduplicated, so equality and hashing do not depend on
    // the order slicings were declared in.
    types: Box<[String]>,
}

impl SimpleNode {
    /// Creates a node for a concrete class.
    pub fn class(name: impl Into<String>) -> Self {
        Self::with_types(name, vec![CLASS_TYPE.to_string()])
    }

    /// Creates the slice group node for a label within a slicing.
    pub fn slice(slicing: impl Into<String>, label: impl Into<String>) -> Self {
        Self::with_types(label, vec![slicing.into()])
    }

    pub(crate) fn with_types(name: impl Into<String>, mut types: Vec<String>) -> Self {
        types.sort();
        types.dedup();
        Self {
            name: name.into(),
            types: types.into(),
        }
    }

    /// Returns the node's name: a fully qualified class name for class nodes,
    /// a slice label otherwise.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the types this node belongs to, sorted.
    pub fn types(&self) -> &[String] {
        &self.types
    }

    /// Returns true if this node has the given type.
    pub fn has_type(&self, ty: &str) -> bool {
        self.types
            .binary_search_by(|t| t.as_str().cmp(ty))
            .is_ok()
    }

    /// Returns true if this node is a concrete class.
    pub fn is_class(&self) -> bool {
        self.has_type(CLASS_TYPE)
    }
}

impl fmt::Display for SimpleNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// The image of a class under the categorizer when more than one slicing
/// classifies it: one slice node per matching slicing, in declaration order.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ParentAwareNode {
    vals: SmallVec<[SimpleNode; 2]>,
}

impl ParentAwareNode {
    pub(crate) fn new(vals: SmallVec<[SimpleNode; 2]>) -> Self {
        Self { vals }
    }

    /// Returns the slice nodes, one per matching slicing.
    pub fn vals(&self) -> &[SimpleNode] {
        &self.vals
    }

    /// Returns the first slice node belonging to the given slicing.
    pub fn for_slicing(&self, slicing: &str) -> Option<&SimpleNode> {
        self.vals.iter().find(|val| val.has_type(slicing))
    }
}

impl fmt::Display for ParentAwareNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.vals.iter().map(SimpleNode::name).join(" & "))
    }
}

/// A node in the dependency graph.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Node {
    /// A class or slice group node.
    Simple(SimpleNode),
    /// A multi-parent node covering several slicings at once.
    ParentAware(ParentAwareNode),
}

impl Node {
    /// Returns the inner node if this is a simple node.
    pub fn simple(&self) -> Option<&SimpleNode> {
        match self {
            Node::Simple(simple) => Some(simple),
            Node::ParentAware(_) => None,
        }
    }

    /// Returns true if this node is a concrete class.
    pub fn is_class(&self) -> bool {
        match self {
            Node::Simple(simple) => simple.is_class(),
            Node::ParentAware(_) => false,
        }
    }
}

impl From<SimpleNode> for Node {
    fn from(node: SimpleNode) -> Self {
        Node::Simple(node)
    }
}

impl From<ParentAwareNode> for Node {
    fn from(node: ParentAwareNode) -> Self {
        Node::ParentAware(node)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Simple(node) => node.fmt(f),
            Node::ParentAware(node) => node.fmt(f),
        }
    }
}
