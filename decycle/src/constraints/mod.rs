// Copyright (c) The decycle-rs Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Architectural constraints evaluated against slice projections.

use crate::errors::Error;
use crate::graph::SliceGraph;
use crate::violations::Violation;

mod cycle_free;
mod layering;

pub use cycle_free::*;
pub use layering::*;

/// A configured architectural constraint.
///
/// Every constraint is declared over one slicing and is evaluated against
/// that slicing's projection.
#[derive(Clone, Debug)]
pub enum Constraint {
    /// The slices of a slicing must not form reference cycles.
    CycleFree(CycleFree),
    /// References between slices must respect a declared layer order.
    Layering(Layering),
}

impl Constraint {
    /// Convenience constructor for a cycle-free constraint.
    pub fn cycle_free(slicing: impl Into<String>) -> Self {
        Constraint::CycleFree(CycleFree::new(slicing))
    }

    /// Returns the slicing this constraint is declared over.
    pub fn slicing(&self) -> &str {
        match self {
            Constraint::CycleFree(constraint) => constraint.slicing(),
            Constraint::Layering(constraint) => constraint.slicing(),
        }
    }

    /// Returns the constraint identifier used in violation output.
    pub fn constraint_id(&self) -> &'static str {
        match self {
            Constraint::CycleFree(_) => "cycle-free",
            Constraint::Layering(constraint) => constraint.constraint_id(),
        }
    }

    pub(crate) fn validate(&self) -> Result<(), Error> {
        match self {
            Constraint::CycleFree(_) => Ok(()),
            Constraint::Layering(constraint) => constraint.validate(),
        }
    }

    /// Evaluates the constraint against a slice projection.
    pub fn evaluate(&self, source: &SliceGraph) -> Vec<Violation> {
        match self {
            Constraint::CycleFree(constraint) => constraint.evaluate(source),
            Constraint::Layering(constraint) => constraint.evaluate(source),
        }
    }
}

impl From<CycleFree> for Constraint {
    fn from(constraint: CycleFree) -> Self {
        Constraint::CycleFree(constraint)
    }
}

impl From<Layering> for Constraint {
    fn from(constraint: Layering) -> Self {
        Constraint::Layering(constraint)
    }
}
