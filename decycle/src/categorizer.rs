// Copyright (c) The decycle-rs Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pattern-based classification of classes into slices, plus the filters a
//! check is configured with.

use crate::errors::Error;
use crate::node::{Node, ParentAwareNode, SimpleNode, CLASS_TYPE};
use crate::pattern::Pattern;
use smallvec::SmallVec;
use std::collections::HashSet;

/// A named classification of classes: an ordered list of patterns producing
/// slice labels. The first matching pattern wins.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Slicing {
    name: String,
    patterns: Vec<Pattern>,
}

impl Slicing {
    /// Creates a slicing from compiled patterns.
    pub fn new(name: impl Into<String>, patterns: Vec<Pattern>) -> Self {
        Self {
            name: name.into(),
            patterns,
        }
    }

    /// Compiles pattern strings into a slicing.
    pub fn parse<I, S>(name: impl Into<String>, patterns: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let patterns = patterns
            .into_iter()
            .map(Pattern::parse)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(name, patterns))
    }

    /// Returns the slicing's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the slice label the first matching pattern assigns to the class
    /// name, if any.
    pub fn label_for(&self, class_name: &str) -> Option<String> {
        self.patterns
            .iter()
            .find_map(|pattern| pattern.matches(class_name))
    }
}

/// Drops references whose endpoints match a from/to pattern pair.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IgnoreRule {
    from: Pattern,
    to: Pattern,
}

impl IgnoreRule {
    /// Creates a rule from compiled patterns.
    pub fn new(from: Pattern, to: Pattern) -> Self {
        Self { from, to }
    }

    /// Compiles a from/to pattern pair into a rule.
    pub fn parse(from: impl Into<String>, to: impl Into<String>) -> Result<Self, Error> {
        Ok(Self::new(Pattern::parse(from)?, Pattern::parse(to)?))
    }

    /// Returns true if the rule suppresses the reference `from -> to`.
    pub fn matches(&self, from: &str, to: &str) -> bool {
        self.from.is_match(from) && self.to.is_match(to)
    }
}

/// The global include/exclude filter over class names.
///
/// An empty include list accepts everything; excludes subtract afterwards.
#[derive(Clone, Debug, Default)]
pub struct NodeFilter {
    including: Vec<Pattern>,
    excluding: Vec<Pattern>,
}

impl NodeFilter {
    /// Creates a filter from compiled include and exclude patterns.
    pub fn new(including: Vec<Pattern>, excluding: Vec<Pattern>) -> Self {
        Self {
            including,
            excluding,
        }
    }

    /// Returns true if the class participates in the check.
    pub fn accepts(&self, class_name: &str) -> bool {
        let included = self.including.is_empty()
            || self
                .including
                .iter()
                .any(|pattern| pattern.is_match(class_name));
        included
            && !self
                .excluding
                .iter()
                .any(|pattern| pattern.is_match(class_name))
    }
}

/// The reference filter assembled from ignore rules.
#[derive(Clone, Debug, Default)]
pub struct EdgeFilter {
    ignoring: Vec<IgnoreRule>,
}

impl EdgeFilter {
    /// Creates a filter from ignore rules.
    pub fn new(ignoring: Vec<IgnoreRule>) -> Self {
        Self { ignoring }
    }

    /// Returns true if the reference `from -> to` survives the ignore rules.
    pub fn accepts(&self, from: &str, to: &str) -> bool {
        !self.ignoring.iter().any(|rule| rule.matches(from, to))
    }
}

/// Computes the category of a node across all configured slicings.
///
/// The category of a class node is the slice node containing it (or a
/// [`ParentAwareNode`] when several slicings match). Slice nodes and
/// multi-parent nodes are their own category, which is the fixpoint that
/// terminates graph construction.
#[derive(Clone, Debug)]
pub struct Categorizer {
    slicings: Vec<Slicing>,
}

impl Categorizer {
    /// Creates a categorizer over the given slicings, rejecting duplicate
    /// slicing names.
    pub fn new(slicings: Vec<Slicing>) -> Result<Self, Error> {
        let mut seen = HashSet::new();
        for slicing in &slicings {
            if !seen.insert(slicing.name()) {
                return Err(Error::DuplicateSlicing(slicing.name().to_string()));
            }
        }
        Ok(Self { slicings })
    }

    /// Returns the configured slicings in declaration order.
    pub fn slicings(&self) -> &[Slicing] {
        &self.slicings
    }

    /// Builds the graph node for a concrete class name.
    ///
    /// When a slicing labels the class with its own name, the class is its own
    /// slice and the slicing's name is merged into the class node's types.
    pub fn class_node(&self, class_name: &str) -> SimpleNode {
        let mut types = vec![CLASS_TYPE.to_string()];
        for slicing in &self.slicings {
            if let Some(label) = slicing.label_for(class_name) {
                if label == class_name {
                    types.push(slicing.name().to_string());
                }
            }
        }
        SimpleNode::with_types(class_name, types)
    }

    /// Returns the category of a node: the slice node(s) containing it, or the
    /// node itself when no slicing applies.
    pub fn categorize(&self, node: &Node) -> Node {
        let simple = match node {
            Node::Simple(simple) if simple.is_class() => simple,
            _ => return node.clone(),
        };
        let mut parents: SmallVec<[SimpleNode; 2]> = SmallVec::new();
        for slicing in &self.slicings {
            if let Some(label) = slicing.label_for(simple.name()) {
                if label == simple.name() {
                    // The class is its own slice; class_node already recorded
                    // the slicing in its types.
                    continue;
                }
                parents.push(SimpleNode::slice(slicing.name(), label));
            }
        }
        match parents.len() {
            0 => node.clone(),
            1 => Node::Simple(parents.remove(0)),
            _ => Node::ParentAware(ParentAwareNode::new(parents)),
        }
    }
}
