// Copyright Materialize, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Structured names for schema objects.
//!
//! Every schema object (table, sequence, column, index, ...) carries a
//! [`Name`]: an optionally-qualified identifier parsed from the raw string
//! supplied by the user. The name preserves the casing and quoting of each
//! segment as typed; case folding happens only when computing lookup keys,
//! never when rendering a name back to the user.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::SchemaError;
use crate::parser;
use crate::platform::Platform;

/// One dot-separated segment of an object name, together with whether the
/// segment was quoted in the input.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ident {
    value: String,
    quoted: bool,
}

impl Ident {
    /// Constructs an unquoted segment.
    pub fn unquoted<S>(value: S) -> Ident
    where
        S: Into<String>,
    {
        Ident {
            value: value.into(),
            quoted: false,
        }
    }

    /// Constructs a quoted segment. The value carries no quote delimiters.
    pub fn quoted<S>(value: S) -> Ident
    where
        S: Into<String>,
    {
        Ident {
            value: value.into(),
            quoted: true,
        }
    }

    /// Returns the segment's value, without quote delimiters.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Reports whether the segment was quoted.
    pub fn is_quoted(&self) -> bool {
        self.quoted
    }
}

/// The structured name of a schema object: a local name, an optional
/// namespace qualifier, and the quoting state of the local name.
///
/// A `Name` is either *unnamed* (empty local name, no namespace, unquoted, no
/// segments) or carries one or two segments. Renaming an object replaces its
/// `Name` wholesale; the fields are never mutated piecemeal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Name {
    name: String,
    namespace: Option<String>,
    quoted: bool,
    idents: Vec<Ident>,
}

impl Name {
    /// Parses a raw object name.
    ///
    /// The empty string produces the unnamed state. Fails with
    /// [`SchemaError::InvalidObjectName`] if the name is lexically invalid
    /// and with [`SchemaError::TooManyQualifiers`] if it contains more than
    /// one qualifier.
    pub fn parse(name: &str) -> Result<Name, SchemaError> {
        let mut out = Name::default();
        out.set(name)?;
        Ok(out)
    }

    /// Replaces this name with the parse of `name`.
    ///
    /// On error the name is left unchanged.
    pub fn set(&mut self, name: &str) -> Result<(), SchemaError> {
        let idents = parser::parse(name).map_err(|e| SchemaError::InvalidObjectName {
            name: name.into(),
            source: e,
        })?;
        match idents.as_slice() {
            [] => {
                self.name.clear();
                self.namespace = None;
                self.quoted = false;
            }
            [local] => {
                self.name = local.value().into();
                self.namespace = None;
                self.quoted = local.is_quoted();
            }
            [namespace, local] => {
                self.name = local.value().into();
                self.namespace = Some(namespace.value().into());
                self.quoted = local.is_quoted();
            }
            _ => {
                return Err(SchemaError::TooManyQualifiers {
                    name: name.into(),
                    count: idents.len() - 1,
                })
            }
        }
        self.idents = idents;
        Ok(())
    }

    /// Reports whether this name is in the unnamed state.
    pub fn is_empty(&self) -> bool {
        self.idents.is_empty()
    }

    /// Returns the local (unqualified) part of the name.
    pub fn local_name(&self) -> &str {
        &self.name
    }

    /// Returns the namespace qualifier, if any. `None` means the object
    /// lives in the default namespace.
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Reports whether the local name was quoted.
    pub fn is_quoted(&self) -> bool {
        self.quoted
    }

    /// Returns the parsed segments of the name. The namespace segment
    /// retains its own quoting state here.
    pub fn idents(&self) -> &[Ident] {
        &self.idents
    }

    /// Reports whether this name resolves into the given default namespace,
    /// which is the case when it is unqualified or qualified with exactly
    /// that namespace.
    pub fn is_in_default_namespace(&self, default_namespace: &str) -> bool {
        match &self.namespace {
            Some(namespace) => namespace == default_namespace,
            None => true,
        }
    }

    /// Returns the qualified form of the name: `namespace.local` if a
    /// namespace is present, otherwise just the local name.
    pub fn qualified_name(&self) -> String {
        match &self.namespace {
            Some(namespace) => format!("{}.{}", namespace, self.name),
            None => self.name.clone(),
        }
    }

    /// Returns the lowercased shortest form of the name relative to
    /// `default_namespace`: the local name alone if the namespace equals the
    /// default, otherwise the full qualified name.
    ///
    /// This is also the canonical registry key for the object.
    pub fn shortest_name(&self, default_namespace: Option<&str>) -> String {
        if self.namespace.as_deref() == default_namespace {
            self.name.to_lowercase()
        } else {
            self.qualified_name().to_lowercase()
        }
    }

    /// Renders the name for the given platform, quoting every segment.
    ///
    /// Unquoted segments are first normalized according to the platform's
    /// unquoted-identifier rules; quoted segments are rendered exactly as
    /// typed. Each segment is handled independently, so mixed quoting in the
    /// input produces mixed treatment in the output.
    pub fn quoted_name(&self, platform: &dyn Platform) -> String {
        let parts: Vec<_> = self
            .idents
            .iter()
            .map(|ident| {
                let value = if ident.is_quoted() {
                    ident.value().into()
                } else {
                    platform.normalize_unquoted_identifier(ident.value())
                };
                platform.quote_single_identifier(&value)
            })
            .collect();
        parts.join(".")
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(namespace) = &self.namespace {
            write!(f, "{}.", namespace)?;
        }
        write!(f, "{}", self.name)
    }
}

/// Strips all quote delimiter characters from an identifier, for membership
/// tests that must accept both the quoted and unquoted spelling of a name.
pub fn trim_quotes(identifier: &str) -> String {
    identifier
        .chars()
        .filter(|ch| !matches!(ch, '`' | '"' | '[' | ']'))
        .collect()
}

/// Generates a deterministic identifier from a list of column names that
/// obeys a maximum length.
///
/// Backends with tight identifier limits (most notably Oracle's 30
/// characters) cannot accept the very long names that naturally fall out of
/// concatenating column names for indexes, composite keys, and the like.
/// Instead, each column name is hashed with CRC-32 and rendered as lowercase
/// hex; the concatenated hashes are appended to `prefix` with an underscore,
/// uppercased, and truncated to `max_length` characters.
///
/// The result is a pure function of the inputs, so repeated schema
/// comparisons see the same generated names. Distinct inputs may collide
/// once truncation kicks in; callers accept that risk.
pub fn generate_identifier_name<I, S>(column_names: I, prefix: &str, max_length: usize) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut hash = String::new();
    for column in column_names {
        hash.push_str(&format!("{:x}", crc32fast::hash(column.as_ref().as_bytes())));
    }
    format!("{}_{}", prefix, hash)
        .to_uppercase()
        .chars()
        .take(max_length)
        .collect()
}
