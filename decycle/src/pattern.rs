// Copyright (c) The decycle-rs Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Glob-like patterns over fully qualified class names.

use crate::errors::Error;
use regex::Regex;
use std::fmt;

/// A compiled name pattern, used to classify classes into slices and to
/// filter or ignore references.
///
/// The pattern grammar treats dots as path separators:
///
/// * `.` matches exactly `.`.
/// * `*` matches one path segment (any characters except `.`).
/// * `**` matches zero or more segments, including the separating dots. Two
///   directly adjacent `**` are illegal.
/// * `(` … `)` marks the part of the match used as the slice label. At most
///   one group per pattern.
/// * A trailing `=name` labels the whole match with `name` instead, and cannot
///   be combined with a group.
/// * Every other character matches itself, so `$` works for nested classes.
///
/// A successful match yields a slice label: the explicit name if present, else
/// the group text, else the entire class name.
#[derive(Clone, Debug)]
pub struct Pattern {
    source: String,
    regex: Regex,
    // Some = the capture group holding the slice label, None = whole match.
    group: Option<usize>,
    explicit_name: Option<String>,
}

impl Pattern {
    /// Compiles a pattern string.
    ///
    /// Fails on an empty pattern, more than one capture group, `=name`
    /// combined with a group, unbalanced parentheses, an empty explicit name,
    /// or more than two adjacent `*`.
    pub fn parse(source: impl Into<String>) -> Result<Self, Error> {
        let source = source.into();
        let invalid = |message: &str| Error::InvalidPattern {
            pattern: source.clone(),
            message: message.to_string(),
        };

        if source.is_empty() {
            return Err(invalid("empty pattern"));
        }
        let (glob, explicit_name) = match source.split_once('=') {
            Some((glob, name)) => {
                if name.is_empty() {
                    return Err(invalid("empty name after '='"));
                }
                if name.contains('=') {
                    return Err(invalid("more than one '='"));
                }
                if glob.is_empty() {
                    return Err(invalid("empty pattern before '='"));
                }
                (glob, Some(name.to_string()))
            }
            None => (source.as_str(), None),
        };

        let chars: Vec<char> = glob.chars().collect();
        let mut regex = String::with_capacity(glob.len() + 16);
        regex.push('^');
        let mut has_group = false;
        let mut open_group = false;
        // Whether the last emitted token was a literal separator. A `**` right
        // after a separator folds the separator into itself, so that `a.**`
        // also matches `a` and `com.**.util` also matches `com.util`.
        let mut prev_separator = false;
        let mut i = 0;
        while i < chars.len() {
            match chars[i] {
                '*' => {
                    let mut stars = 1;
                    while i + stars < chars.len() && chars[i + stars] == '*' {
                        stars += 1;
                    }
                    match stars {
                        1 => regex.push_str("[^.]*"),
                        2 => {
                            if prev_separator {
                                regex.truncate(regex.len() - 2);
                                regex.push_str(r"(?:\.[^.]+)*");
                            } else if i + 2 < chars.len() && chars[i + 2] == '.' {
                                regex.push_str(r"(?:[^.]+\.)*");
                                i += 1;
                            } else {
                                regex.push_str(".*");
                            }
                        }
                        _ => return Err(invalid("more than two adjacent '*'")),
                    }
                    prev_separator = false;
                    i += stars;
                    continue;
                }
                '(' => {
                    if has_group {
                        return Err(invalid("at most one capture group"));
                    }
                    if explicit_name.is_some() {
                        return Err(invalid("'=name' cannot be combined with a capture group"));
                    }
                    has_group = true;
                    open_group = true;
                    regex.push('(');
                    prev_separator = false;
                }
                ')' => {
                    if !open_group {
                        return Err(invalid("unbalanced ')'"));
                    }
                    open_group = false;
                    regex.push(')');
                    prev_separator = false;
                }
                '.' => {
                    regex.push_str(r"\.");
                    prev_separator = true;
                }
                c => {
                    regex.push_str(&regex::escape(&c.to_string()));
                    prev_separator = false;
                }
            }
            i += 1;
        }
        if open_group {
            return Err(invalid("unbalanced '('"));
        }
        regex.push('$');

        let regex = Regex::new(&regex).map_err(|err| Error::InvalidPattern {
            pattern: source.clone(),
            message: err.to_string(),
        })?;
        Ok(Self {
            source,
            regex,
            group: if has_group { Some(1) } else { None },
            explicit_name,
        })
    }

    /// Applies the pattern to a class name, returning the slice label on a
    /// match.
    pub fn matches(&self, class_name: &str) -> Option<String> {
        let captures = self.regex.captures(class_name)?;
        if let Some(name) = &self.explicit_name {
            return Some(name.clone());
        }
        match self.group {
            Some(group) => {
                let text = captures
                    .get(group)
                    .expect("the capture group participates in every match");
                Some(text.as_str().to_string())
            }
            None => Some(class_name.to_string()),
        }
    }

    /// Returns true if the pattern matches the class name.
    pub fn is_match(&self, class_name: &str) -> bool {
        self.regex.is_match(class_name)
    }

    /// Returns the pattern string this was compiled from.
    pub fn source(&self) -> &str {
        &self.source
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for Pattern {}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}
