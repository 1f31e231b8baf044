// Copyright (c) The decycle-rs Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Detect cyclic dependencies and layering violations between class slices.
//!
//! `decycle` consumes the class references produced by an external bytecode
//! scanner, classifies the classes into user-named slices through glob-like
//! patterns, and checks architectural constraints against the resulting slice
//! graph: freedom from cycles, and declared layer orders.
//!
//! # Examples
//!
//! Find a dependency cycle between two modules:
//!
//! ```
//! use decycle::{ClassRefs, Configuration, constraints::Constraint};
//!
//! // The serialized output of a classpath scan.
//! let scan = ClassRefs::parse_json(
//!     r#"{ "classes": [
//!         { "name": "app.core.Engine", "references": ["app.util.Strings"] },
//!         { "name": "app.util.Strings", "references": ["app.core.Engine"] }
//!     ] }"#,
//! ).unwrap();
//!
//! // Slice the classes by their second package segment and require the
//! // resulting modules to be cycle-free.
//! let configuration = Configuration::builder()
//!     .slicing("module", ["app.(*).**"])
//!     .constraint(Constraint::cycle_free("module"))
//!     .build()
//!     .unwrap();
//!
//! let violations = configuration.check(&scan).unwrap();
//! assert_eq!(violations.len(), 1);
//! assert_eq!(
//!     violations[0].to_string(),
//!     "cycle-free: module: core -> util, util -> core",
//! );
//! ```

#![warn(missing_docs)]

mod categorizer;
mod config;
pub mod constraints;
pub mod errors;
pub mod graph;
mod ingest;
mod node;
mod pattern;
#[cfg(test)]
mod unit_tests;
mod violations;

pub use categorizer::{Categorizer, EdgeFilter, IgnoreRule, NodeFilter, Slicing};
pub use config::{Configuration, ConfigurationBuilder};
pub use errors::Error;
pub use ingest::{ClassReader, ClassRefs, ClassVisitor};
pub use node::{Node, ParentAwareNode, SimpleNode, CLASS_TYPE};
pub use pattern::Pattern;
pub use violations::Violation;
