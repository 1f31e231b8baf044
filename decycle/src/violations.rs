// Copyright (c) The decycle-rs Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Constraint violations and their stable textual form.

use crate::node::SimpleNode;
use itertools::Itertools;
use std::fmt;

/// A single constraint failure: the violated constraint, its short
/// description, and the offending dependencies in evaluation order.
///
/// The `Display` form is one line per violation:
/// `constraintId: shortDescription: from -> to, from -> to`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Violation {
    constraint_id: String,
    short_description: String,
    dependencies: Vec<(SimpleNode, SimpleNode)>,
}

impl Violation {
    pub(crate) fn new(
        constraint_id: impl Into<String>,
        short_description: impl Into<String>,
        dependencies: Vec<(SimpleNode, SimpleNode)>,
    ) -> Self {
        Self {
            constraint_id: constraint_id.into(),
            short_description: short_description.into(),
            dependencies,
        }
    }

    /// Returns the identifier of the violated constraint.
    pub fn constraint_id(&self) -> &str {
        &self.constraint_id
    }

    /// Returns the constraint's short description.
    pub fn short_description(&self) -> &str {
        &self.short_description
    }

    /// Returns the offending dependencies, tagged with the slicing they were
    /// projected under.
    pub fn dependencies(&self) -> &[(SimpleNode, SimpleNode)] {
        &self.dependencies
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}: {}",
            self.constraint_id,
            self.short_description,
            self.dependencies
                .iter()
                .map(|(from, to)| format!("{} -> {}", from.name(), to.name()))
                .join(", ")
        )
    }
}
