// Copyright (c) The decycle-rs Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ingest adapter between an external bytecode scanner and the core.
//!
//! Bytecode reading stays outside the core: a scanner walks a classpath and
//! records, for every visited class, the classes it refers to. The core
//! consumes that stream through the [`ClassReader`]/[`ClassVisitor`] contract.
//! [`ClassRefs`] is the bundled adapter, replaying a serialized scan document
//! in order. Class names use dot-separated fully qualified form
//! (`com.example.Foo`), with `$` for nested classes.

use crate::errors::Error;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Receives the classes and references found in a scan.
pub trait ClassVisitor {
    /// Called once for every class visited in the classpath.
    fn visit_class(&mut self, class_name: &str);

    /// Called for every outgoing reference of a visited class.
    fn visit_reference(&mut self, from: &str, to: &str);
}

/// A source of class reference events.
pub trait ClassReader {
    /// Replays the scan into the given visitor.
    fn read(&self, visitor: &mut dyn ClassVisitor) -> Result<(), Error>;
}

/// A parsed class reference scan: the serialized output of an external
/// bytecode scanner.
///
/// ```
/// use decycle::ClassRefs;
///
/// let scan = ClassRefs::parse_json(
///     r#"{ "classes": [
///         { "name": "com.example.Foo", "references": ["com.example.Bar"] },
///         { "name": "com.example.Bar" }
///     ] }"#,
/// ).unwrap();
/// assert_eq!(scan.class_count(), 2);
/// ```
#[derive(Clone, Debug, Deserialize)]
pub struct ClassRefs {
    classes: Vec<ClassEntry>,
}

#[derive(Clone, Debug, Deserialize)]
struct ClassEntry {
    name: String,
    #[serde(default)]
    references: Vec<String>,
}

impl ClassRefs {
    /// Parses a scan document from its JSON form.
    pub fn parse_json(json: impl AsRef<str>) -> Result<Self, Error> {
        serde_json::from_str(json.as_ref()).map_err(Error::ScanParseError)
    }

    /// Reads and parses a scan document from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|err| Error::ScanIoError {
            path: path.display().to_string(),
            err,
        })?;
        Self::parse_json(json)
    }

    /// Returns the number of classes in the scan.
    pub fn class_count(&self) -> usize {
        self.classes.len()
    }
}

impl ClassReader for ClassRefs {
    fn read(&self, visitor: &mut dyn ClassVisitor) -> Result<(), Error> {
        for class in &self.classes {
            visitor.visit_class(&class.name);
            for reference in &class.references {
                visitor.visit_reference(&class.name, reference);
            }
        }
        Ok(())
    }
}
