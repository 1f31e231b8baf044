// Copyright (c) The decycle-rs Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Contains types that describe errors that `decycle` methods can return.

use std::error;
use std::fmt;
use std::io;

use Error::*;

/// Error type describing the sorts of errors `decycle` can return.
#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    /// A pattern string failed to compile.
    InvalidPattern {
        /// The offending pattern string.
        pattern: String,
        /// What is wrong with the pattern.
        message: String,
    },
    /// Two slicings with the same name were configured.
    DuplicateSlicing(String),
    /// A constraint referred to a slicing that was never configured.
    UnknownSlicing(String),
    /// A slice name appeared in more than one layer of the same layering.
    DuplicateLayerEntry {
        /// The slicing the layering is declared over.
        slicing: String,
        /// The slice name that appeared twice.
        member: String,
    },
    /// An error occurred while parsing a class reference scan document.
    ScanParseError(serde_json::Error),
    /// An error occurred while reading a class reference scan from disk.
    ScanIoError {
        /// The path that could not be read.
        path: String,
        /// The underlying I/O error.
        err: io::Error,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidPattern { pattern, message } => {
                write!(f, "Invalid pattern '{}': {}", pattern, message)
            }
            DuplicateSlicing(name) => write!(f, "Duplicate slicing: {}", name),
            UnknownSlicing(name) => write!(f, "Unknown slicing: {}", name),
            DuplicateLayerEntry { slicing, member } => write!(
                f,
                "Slice '{}' appears in more than one layer of the layering over '{}'",
                member, slicing
            ),
            ScanParseError(err) => write!(f, "Error while parsing class reference scan: {}", err),
            ScanIoError { path, err } => {
                write!(f, "Error while reading class reference scan {}: {}", path, err)
            }
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            ScanParseError(err) => Some(err),
            ScanIoError { err, .. } => Some(err),
            InvalidPattern { .. }
            | DuplicateSlicing(_)
            | UnknownSlicing(_)
            | DuplicateLayerEntry { .. } => None,
        }
    }
}
