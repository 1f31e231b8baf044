// Copyright (c) The decycle-rs Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::errors::Error;
use crate::graph::SliceGraph;
use crate::node::SimpleNode;
use crate::violations::Violation;
use itertools::Itertools;
use std::collections::HashMap;

/// The kind of a layer within a layering constraint.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LayerKind {
    /// References between members of the same layer are forbidden.
    Strict,
    /// References between members of the same layer are allowed.
    Lenient,
}

/// One layer of a layering constraint: a kind and the slice names belonging
/// to the layer, in declaration order.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Layer {
    kind: LayerKind,
    members: Vec<String>,
}

impl Layer {
    /// Creates a strict layer: no references between its members.
    pub fn strict<I, S>(members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind: LayerKind::Strict,
            members: members.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates a lenient layer: references between its members are allowed.
    pub fn lenient<I, S>(members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind: LayerKind::Lenient,
            members: members.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the layer's kind.
    pub fn kind(&self) -> LayerKind {
        self.kind
    }

    /// Returns the layer's members in declaration order.
    pub fn members(&self) -> &[String] {
        &self.members
    }

    fn short_description(&self) -> String {
        match (self.kind, self.members.len()) {
            (_, 1) => self.members[0].clone(),
            (LayerKind::Strict, _) => format!("[{}]", self.members.iter().join(", ")),
            (LayerKind::Lenient, _) => format!("({})", self.members.iter().join(", ")),
        }
    }
}

/// References between slices must flow along the declared layer order.
///
/// In the relaxed variant a reference may point from any layer to any later
/// layer; the direct variant additionally forbids skipping layers. References
/// into the first layer from outside the layering, and from the last layer to
/// outside, are always allowed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Layering {
    slicing: String,
    layers: Vec<Layer>,
    direct: bool,
}

impl Layering {
    /// Creates a relaxed layering: references may skip layers.
    pub fn new(slicing: impl Into<String>, layers: Vec<Layer>) -> Self {
        Self {
            slicing: slicing.into(),
            layers,
            direct: false,
        }
    }

    /// Creates a direct layering: references must target the next layer.
    pub fn direct(slicing: impl Into<String>, layers: Vec<Layer>) -> Self {
        Self {
            slicing: slicing.into(),
            layers,
            direct: true,
        }
    }

    /// Returns the slicing this constraint is declared over.
    pub fn slicing(&self) -> &str {
        &self.slicing
    }

    /// Returns true if this is the direct variant.
    pub fn is_direct(&self) -> bool {
        self.direct
    }

    pub(crate) fn constraint_id(&self) -> &'static str {
        if self.direct {
            "direct-layering"
        } else {
            "layering"
        }
    }

    /// Renders the layer order: `a => [b, c] => (d, e)`.
    pub fn short_description(&self) -> String {
        self.layers
            .iter()
            .map(Layer::short_description)
            .join(" => ")
    }

    pub(crate) fn validate(&self) -> Result<(), Error> {
        let mut seen = HashMap::new();
        for (index, layer) in self.layers.iter().enumerate() {
            for member in &layer.members {
                if seen.insert(member.as_str(), index).is_some() {
                    return Err(Error::DuplicateLayerEntry {
                        slicing: self.slicing.clone(),
                        member: member.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    pub(crate) fn evaluate(&self, source: &SliceGraph) -> Vec<Violation> {
        if self.layers.is_empty() {
            return Vec::new();
        }
        let layer_of: HashMap<&str, usize> = self
            .layers
            .iter()
            .enumerate()
            .flat_map(|(index, layer)| {
                layer
                    .members
                    .iter()
                    .map(move |member| (member.as_str(), index))
            })
            .collect();
        let last = self.layers.len() - 1;

        let mut offending = Vec::new();
        for (from, to) in source.edges() {
            let violation = match (layer_of.get(from.name()), layer_of.get(to.name())) {
                // Within one layer only the kind matters.
                (Some(&i), Some(&j)) if i == j => self.layers[i].kind == LayerKind::Strict,
                (Some(&i), Some(&j)) => {
                    if self.direct {
                        i > j || i + 1 < j
                    } else {
                        i > j
                    }
                }
                // Leaving the layering is fine from the last layer only.
                (Some(&i), None) => i != last,
                // Entering the layering is fine into the first layer only.
                (None, Some(&j)) => j != 0,
                (None, None) => false,
            };
            if violation {
                offending.push((
                    SimpleNode::slice(self.slicing.as_str(), from.name()),
                    SimpleNode::slice(self.slicing.as_str(), to.name()),
                ));
            }
        }

        if offending.is_empty() {
            Vec::new()
        } else {
            vec![Violation::new(
                self.constraint_id(),
                self.short_description(),
                offending,
            )]
        }
    }
}
