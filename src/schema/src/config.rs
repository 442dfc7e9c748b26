// Copyright Materialize, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Schema configuration.

/// The default maximum identifier length, matching the common PostgreSQL
/// limit of 63 bytes.
pub const DEFAULT_MAX_IDENTIFIER_LENGTH: usize = 63;

/// Configuration for a [`Schema`](crate::schema::Schema), fixed at
/// construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaConfig {
    /// The namespace objects are resolved against when their name carries no
    /// qualifier. `None` leaves unqualified and qualified names in distinct
    /// key spaces, subject to the compatibility policy.
    pub default_namespace: Option<String>,
    /// The maximum length of auto-generated identifiers, such as index and
    /// foreign key constraint names.
    pub max_identifier_length: usize,
}

impl Default for SchemaConfig {
    fn default() -> SchemaConfig {
        SchemaConfig {
            default_namespace: None,
            max_identifier_length: DEFAULT_MAX_IDENTIFIER_LENGTH,
        }
    }
}
