// Copyright Materialize, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! An in-memory model of schema object names and registries.
//!
//! The model turns raw, possibly dotted and possibly quoted object names
//! into structured identifiers and stores schema objects under that
//! structured identity. Everything else about schema management leans on
//! this layer getting name identity right: lookups are case-insensitive,
//! display forms preserve the casing and quoting the user typed, and
//! qualified and unqualified references are reconciled by an explicit
//! policy instead of ad-hoc string comparison.
//!
//! The pieces, leaf to root:
//!
//! * [`parser`] lexes a raw name into quoted/unquoted segments.
//! * [`name::Name`] is the structured identity of one schema object, with
//!   its name-derived helpers (shortest form, platform-quoted rendering,
//!   deterministic short-identifier generation).
//! * [`registry::ObjectRegistry`] is a case-insensitive, namespace-aware
//!   container of named objects, instantiated once per object kind.
//! * [`schema::Schema`] composes the registries with namespace tracking,
//!   a default-namespace configuration, and the qualified/unqualified
//!   compatibility policy.
//!
//! The model is synchronous, single-threaded, and performs no I/O; a
//! [`schema::Schema`] lives only for the duration of the schema-management
//! operation that owns it.

mod lex;

pub mod config;
pub mod error;
pub mod name;
pub mod parser;
pub mod platform;
pub mod registry;
pub mod schema;
pub mod sequence;
pub mod table;

pub use crate::config::{SchemaConfig, DEFAULT_MAX_IDENTIFIER_LENGTH};
pub use crate::error::{ObjectKind, SchemaError};
pub use crate::name::{generate_identifier_name, trim_quotes, Ident, Name};
pub use crate::parser::ParserError;
pub use crate::platform::Platform;
pub use crate::registry::{ObjectRegistry, SchemaObject};
pub use crate::schema::{
    DeprecationSink, Schema, TracingDeprecationSink, DEPRECATION_QUALIFIED_AFTER_UNQUALIFIED,
    DEPRECATION_UNQUALIFIED_AFTER_QUALIFIED,
};
pub use crate::sequence::Sequence;
pub use crate::table::{Column, ForeignKey, Index, Table};
