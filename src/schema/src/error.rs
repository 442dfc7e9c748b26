// Copyright Materialize, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Schema model errors.

use std::fmt;

use thiserror::Error;

use crate::parser::ParserError;

/// The kind of schema object an operation was addressing, for error
/// messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Table,
    Sequence,
    Column,
    Namespace,
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            ObjectKind::Table => "table",
            ObjectKind::Sequence => "sequence",
            ObjectKind::Column => "column",
            ObjectKind::Namespace => "namespace",
        })
    }
}

/// An error raised by the schema model.
///
/// All variants are input errors: they surface synchronously to the caller
/// and are never retried or suppressed internally.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// The raw name was lexically malformed.
    #[error("unable to parse object name \"{name}\"")]
    InvalidObjectName {
        name: String,
        #[source]
        source: ParserError,
    },
    /// The raw name carried more than one dot-qualifier.
    #[error("object name \"{name}\" contains {count} qualifiers; at most one is allowed")]
    TooManyQualifiers { name: String, count: usize },
    /// The name is structurally valid but not acceptable for this kind of
    /// object, e.g. an empty table name.
    #[error("invalid {kind} name \"{name}\"")]
    InvalidName { kind: ObjectKind, name: String },
    /// The target key of an add or rename is already occupied.
    #[error("{kind} \"{name}\" already exists")]
    DuplicateObject { kind: ObjectKind, name: String },
    /// The target of a get, rename, or remove is missing.
    #[error("{kind} \"{name}\" does not exist")]
    ObjectNotFound { kind: ObjectKind, name: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SchemaError::TooManyQualifiers {
            name: "a.b.c".into(),
            count: 2,
        };
        assert_eq!(
            err.to_string(),
            "object name \"a.b.c\" contains 2 qualifiers; at most one is allowed"
        );

        let err = SchemaError::ObjectNotFound {
            kind: ObjectKind::Sequence,
            name: "unknown".into(),
        };
        assert_eq!(err.to_string(), "sequence \"unknown\" does not exist");
    }
}
