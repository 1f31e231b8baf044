// Copyright (c) The decycle-rs Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration and orchestration of a dependency check.

use crate::categorizer::{Categorizer, EdgeFilter, IgnoreRule, NodeFilter, Slicing};
use crate::constraints::Constraint;
use crate::errors::Error;
use crate::graph::DependencyGraph;
use crate::ingest::{ClassReader, ClassVisitor};
use crate::pattern::Pattern;
use crate::violations::Violation;
use tracing::debug;

/// Builder for [`Configuration`]. Patterns are compiled and cross-references
/// validated in [`build`](Self::build).
#[derive(Debug, Default)]
pub struct ConfigurationBuilder {
    classpath: Option<String>,
    including: Vec<String>,
    excluding: Vec<String>,
    ignoring: Vec<(String, String)>,
    slicings: Vec<(String, Vec<String>)>,
    constraints: Vec<Constraint>,
}

impl ConfigurationBuilder {
    /// Creates a builder with no filters, slicings or constraints.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a label for the artifact set being checked, carried through to
    /// reports.
    pub fn classpath(mut self, label: impl Into<String>) -> Self {
        self.classpath = Some(label.into());
        self
    }

    /// Adds an include pattern. When any are present, only matching classes
    /// participate.
    pub fn including(mut self, pattern: impl Into<String>) -> Self {
        self.including.push(pattern.into());
        self
    }

    /// Adds an exclude pattern, subtracted after the includes.
    pub fn excluding(mut self, pattern: impl Into<String>) -> Self {
        self.excluding.push(pattern.into());
        self
    }

    /// Adds an ignore rule: references matching the pair are dropped before
    /// constraint evaluation.
    pub fn ignoring(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.ignoring.push((from.into(), to.into()));
        self
    }

    /// Adds a slicing with its ordered pattern list.
    pub fn slicing<I, S>(mut self, name: impl Into<String>, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.slicings.push((
            name.into(),
            patterns.into_iter().map(Into::into).collect(),
        ));
        self
    }

    /// Adds a constraint. Constraints are evaluated in declaration order.
    pub fn constraint(mut self, constraint: impl Into<Constraint>) -> Self {
        self.constraints.push(constraint.into());
        self
    }

    /// Compiles all patterns and validates the configuration.
    pub fn build(self) -> Result<Configuration, Error> {
        let including = self
            .including
            .into_iter()
            .map(Pattern::parse)
            .collect::<Result<Vec<_>, _>>()?;
        let excluding = self
            .excluding
            .into_iter()
            .map(Pattern::parse)
            .collect::<Result<Vec<_>, _>>()?;
        let ignoring = self
            .ignoring
            .into_iter()
            .map(|(from, to)| IgnoreRule::parse(from, to))
            .collect::<Result<Vec<_>, _>>()?;
        let slicings = self
            .slicings
            .into_iter()
            .map(|(name, patterns)| Slicing::parse(name, patterns))
            .collect::<Result<Vec<_>, _>>()?;
        let categorizer = Categorizer::new(slicings)?;

        for constraint in &self.constraints {
            if !categorizer
                .slicings()
                .iter()
                .any(|slicing| slicing.name() == constraint.slicing())
            {
                return Err(Error::UnknownSlicing(constraint.slicing().to_string()));
            }
            constraint.validate()?;
        }

        Ok(Configuration {
            classpath: self.classpath,
            categorizer,
            node_filter: NodeFilter::new(including, excluding),
            edge_filter: EdgeFilter::new(ignoring),
            constraints: self.constraints,
        })
    }
}

/// A validated check configuration.
///
/// [`check`](Self::check) drives the whole pipeline: it ingests the class
/// references, projects each constrained slicing and evaluates the
/// constraints. A `Configuration` is immutable and may be checked any number
/// of times; independent configurations may run on different threads.
#[derive(Clone, Debug)]
pub struct Configuration {
    classpath: Option<String>,
    categorizer: Categorizer,
    node_filter: NodeFilter,
    edge_filter: EdgeFilter,
    constraints: Vec<Constraint>,
}

impl Configuration {
    /// Returns a new builder.
    pub fn builder() -> ConfigurationBuilder {
        ConfigurationBuilder::new()
    }

    /// Returns the classpath label, if one was set.
    pub fn classpath(&self) -> Option<&str> {
        self.classpath.as_deref()
    }

    /// Runs the check against the given class reference source and returns
    /// the violations in constraint declaration order.
    pub fn check(&self, reader: &dyn ClassReader) -> Result<Vec<Violation>, Error> {
        let mut graph = DependencyGraph::new(
            self.categorizer.clone(),
            self.node_filter.clone(),
            self.edge_filter.clone(),
        );
        reader.read(&mut GraphIngest { graph: &mut graph })?;
        debug!(nodes = graph.node_count(), "dependency graph assembled");

        let mut violations = Vec::new();
        for constraint in &self.constraints {
            let projection = graph.slice(constraint.slicing());
            let found = constraint.evaluate(&projection);
            debug!(
                constraint = constraint.constraint_id(),
                slicing = constraint.slicing(),
                violations = found.len(),
                "constraint evaluated"
            );
            violations.extend(found);
        }
        Ok(violations)
    }
}

struct GraphIngest<'a> {
    graph: &'a mut DependencyGraph,
}

impl ClassVisitor for GraphIngest<'_> {
    fn visit_class(&mut self, class_name: &str) {
        self.graph.add_class(class_name);
    }

    fn visit_reference(&mut self, from: &str, to: &str) {
        self.graph.connect(from, to);
    }
}
