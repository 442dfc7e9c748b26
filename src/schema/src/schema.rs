// Copyright Materialize, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! The schema container.
//!
//! A [`Schema`] composes one registry per object kind with a namespace set
//! and a default-namespace configuration. Adding an object with a namespace
//! the schema has not seen before registers that namespace implicitly.
//!
//! # Qualified and unqualified names
//!
//! Historically, objects could be referenced by their unqualified local name
//! regardless of their stored namespace when no default namespace was
//! configured. The container preserves that behavior while steering callers
//! toward namespace-qualified identity: when a qualified and an unqualified
//! name with the same local part meet without a default namespace to
//! disambiguate them, the operation succeeds and a one-time deprecation
//! signal is delivered to the configured [`DeprecationSink`]. Add-time and
//! lookup-time occurrences are tracked separately, so each can signal once
//! per container. With a default namespace configured there is no ambiguity
//! and no signal: qualified and unqualified spellings of a name in the
//! default namespace resolve to the same registry key by construction.
//!
//! Cloning a schema produces a fully independent object graph. All ownership
//! is by value and cross-object references (such as a foreign key naming its
//! target table) are expressed by name, so the clone re-resolves them
//! against its own registries.

use std::cell::Cell;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::config::SchemaConfig;
use crate::error::{ObjectKind, SchemaError};
use crate::name::{trim_quotes, Name};
use crate::registry::{ObjectRegistry, SchemaObject};
use crate::sequence::Sequence;
use crate::table::Table;

/// Identifies the deprecation signaled when a qualified name meets existing
/// unqualified names with the same local part.
pub const DEPRECATION_QUALIFIED_AFTER_UNQUALIFIED: &str = "qualified-names-after-unqualified";

/// Identifies the deprecation signaled when an unqualified name meets
/// existing qualified names with the same local part.
pub const DEPRECATION_UNQUALIFIED_AFTER_QUALIFIED: &str = "unqualified-names-after-qualified";

/// A diagnostics collaborator that receives deprecation signals.
///
/// The identifier passed to [`DeprecationSink::notify_deprecated_usage`] is
/// one of the `DEPRECATION_*` constants in this module and is stable, so
/// sinks can deduplicate across containers or link to documentation.
/// Deprecation signals are never errors and never block the triggering
/// operation.
pub trait DeprecationSink: std::fmt::Debug {
    /// Reports one occurrence of a deprecated usage.
    fn notify_deprecated_usage(&self, identifier: &str);
}

/// The default sink: emits a structured warning.
#[derive(Debug)]
pub struct TracingDeprecationSink;

impl DeprecationSink for TracingDeprecationSink {
    fn notify_deprecated_usage(&self, identifier: &str) {
        tracing::warn!(
            identifier,
            "deprecated mixing of qualified and unqualified object names"
        );
    }
}

/// One-shot flags for the compatibility signals, per category and trigger
/// point. `Cell` so that lookups through `&self` can flip them; the schema
/// model is single-threaded by contract.
#[derive(Debug, Clone, Default)]
struct CompatFlags {
    qualified_add: Cell<bool>,
    qualified_lookup: Cell<bool>,
    unqualified_add: Cell<bool>,
    unqualified_lookup: Cell<bool>,
}

impl CompatFlags {
    fn fire(flag: &Cell<bool>, sink: &dyn DeprecationSink, identifier: &str) {
        if !flag.replace(true) {
            sink.notify_deprecated_usage(identifier);
        }
    }
}

/// An in-memory model of a database schema: tables, sequences, and the
/// namespaces they live in.
///
/// The schema exists only for the lifetime of a schema-management
/// operation; nothing here persists or performs I/O.
#[derive(Debug, Clone)]
pub struct Schema {
    config: SchemaConfig,
    tables: ObjectRegistry<Table>,
    sequences: ObjectRegistry<Sequence>,
    /// Lowercased, quote-stripped namespace name to its first-seen display
    /// form.
    namespaces: IndexMap<String, String>,
    compat: CompatFlags,
    deprecations: Arc<dyn DeprecationSink>,
}

impl Default for Schema {
    fn default() -> Schema {
        Schema::new()
    }
}

impl Schema {
    /// Creates an empty schema with the default configuration.
    pub fn new() -> Schema {
        Schema::with_config(SchemaConfig::default())
    }

    /// Creates an empty schema with the given configuration.
    pub fn with_config(config: SchemaConfig) -> Schema {
        Schema::with_sink(config, Arc::new(TracingDeprecationSink))
    }

    /// Creates an empty schema that delivers deprecation signals to
    /// `deprecations`.
    pub fn with_sink(config: SchemaConfig, deprecations: Arc<dyn DeprecationSink>) -> Schema {
        let default_namespace = config.default_namespace.clone();
        Schema {
            tables: ObjectRegistry::new(ObjectKind::Table, default_namespace.clone()),
            sequences: ObjectRegistry::new(ObjectKind::Sequence, default_namespace),
            namespaces: IndexMap::new(),
            compat: CompatFlags::default(),
            deprecations,
            config,
        }
    }

    /// The schema's configuration.
    pub fn config(&self) -> &SchemaConfig {
        &self.config
    }

    // ===== Tables =====

    /// Constructs a table with the given name and adds it to the schema,
    /// returning the stored table.
    pub fn create_table(&mut self, name: &str) -> Result<&mut Table, SchemaError> {
        let mut table = Table::new(name)?;
        table.set_max_identifier_length(self.config.max_identifier_length);
        let name = table.name().clone();
        self.add_table(table)?;
        self.tables.get_mut(&name)
    }

    /// Adds an existing table to the schema. Fails without side effects if a
    /// table with the same canonical name already exists; otherwise the
    /// table and any implicit namespace are registered together.
    pub fn add_table(&mut self, table: Table) -> Result<(), SchemaError> {
        add_object(
            &mut self.tables,
            &mut self.namespaces,
            &self.config,
            &self.compat,
            &*self.deprecations,
            table,
        )
    }

    /// Returns the table stored under `name`.
    pub fn get_table(&self, name: &str) -> Result<&Table, SchemaError> {
        let name = Name::parse(name)?;
        resolve_key(&self.tables, &self.config, &self.compat, &*self.deprecations, &name)
            .and_then(|key| self.tables.get_by_key(&key))
            .ok_or_else(|| SchemaError::ObjectNotFound {
                kind: ObjectKind::Table,
                name: name.to_string(),
            })
    }

    /// Returns the table stored under `name`, mutably.
    pub fn get_table_mut(&mut self, name: &str) -> Result<&mut Table, SchemaError> {
        let name = Name::parse(name)?;
        match resolve_key(&self.tables, &self.config, &self.compat, &*self.deprecations, &name) {
            Some(key) => self
                .tables
                .get_by_key_mut(&key)
                .ok_or_else(|| SchemaError::ObjectNotFound {
                    kind: ObjectKind::Table,
                    name: name.to_string(),
                }),
            None => Err(SchemaError::ObjectNotFound {
                kind: ObjectKind::Table,
                name: name.to_string(),
            }),
        }
    }

    /// Reports whether a table is stored under `name`. Fails only if `name`
    /// itself is invalid.
    pub fn has_table(&self, name: &str) -> Result<bool, SchemaError> {
        let name = Name::parse(name)?;
        Ok(
            resolve_key(&self.tables, &self.config, &self.compat, &*self.deprecations, &name)
                .is_some(),
        )
    }

    /// Renames the table stored under `old` to `new`, updating both the
    /// registry key and the table's own name.
    pub fn rename_table(&mut self, old: &str, new: &str) -> Result<(), SchemaError> {
        let old = Name::parse(old)?;
        let new = Name::parse(new)?;
        self.tables.rename(&old, &new)?;
        Ok(())
    }

    /// Removes and returns the table stored under `name`.
    pub fn drop_table(&mut self, name: &str) -> Result<Table, SchemaError> {
        let name = Name::parse(name)?;
        resolve_key(&self.tables, &self.config, &self.compat, &*self.deprecations, &name)
            .and_then(|key| self.tables.remove_by_key(&key))
            .ok_or_else(|| SchemaError::ObjectNotFound {
                kind: ObjectKind::Table,
                name: name.to_string(),
            })
    }

    /// Iterates over the schema's tables in the order they were added.
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.tables.iter()
    }

    // ===== Sequences =====

    /// Constructs a sequence and adds it to the schema, returning the stored
    /// sequence.
    pub fn create_sequence(
        &mut self,
        name: &str,
        allocation_size: i64,
        initial_value: i64,
    ) -> Result<&mut Sequence, SchemaError> {
        let sequence = Sequence::new(name, allocation_size, initial_value)?;
        let name = sequence.name().clone();
        self.add_sequence(sequence)?;
        self.sequences.get_mut(&name)
    }

    /// Adds an existing sequence to the schema, with the same all-or-nothing
    /// behavior as [`Schema::add_table`].
    pub fn add_sequence(&mut self, sequence: Sequence) -> Result<(), SchemaError> {
        add_object(
            &mut self.sequences,
            &mut self.namespaces,
            &self.config,
            &self.compat,
            &*self.deprecations,
            sequence,
        )
    }

    /// Returns the sequence stored under `name`.
    pub fn get_sequence(&self, name: &str) -> Result<&Sequence, SchemaError> {
        let name = Name::parse(name)?;
        resolve_key(&self.sequences, &self.config, &self.compat, &*self.deprecations, &name)
            .and_then(|key| self.sequences.get_by_key(&key))
            .ok_or_else(|| SchemaError::ObjectNotFound {
                kind: ObjectKind::Sequence,
                name: name.to_string(),
            })
    }

    /// Reports whether a sequence is stored under `name`.
    pub fn has_sequence(&self, name: &str) -> Result<bool, SchemaError> {
        let name = Name::parse(name)?;
        Ok(resolve_key(
            &self.sequences,
            &self.config,
            &self.compat,
            &*self.deprecations,
            &name,
        )
        .is_some())
    }

    /// Removes and returns the sequence stored under `name`.
    pub fn drop_sequence(&mut self, name: &str) -> Result<Sequence, SchemaError> {
        let name = Name::parse(name)?;
        resolve_key(&self.sequences, &self.config, &self.compat, &*self.deprecations, &name)
            .and_then(|key| self.sequences.remove_by_key(&key))
            .ok_or_else(|| SchemaError::ObjectNotFound {
                kind: ObjectKind::Sequence,
                name: name.to_string(),
            })
    }

    /// Iterates over the schema's sequences in the order they were added.
    pub fn sequences(&self) -> impl Iterator<Item = &Sequence> {
        self.sequences.iter()
    }

    // ===== Namespaces =====

    /// Explicitly registers a namespace. The display form is stored exactly
    /// as given, quotes included; membership is tested with quotes stripped
    /// and case folded.
    pub fn create_namespace(&mut self, name: &str) -> Result<(), SchemaError> {
        let key = trim_quotes(name).to_lowercase();
        if self.namespaces.contains_key(&key) {
            return Err(SchemaError::DuplicateObject {
                kind: ObjectKind::Namespace,
                name: name.into(),
            });
        }
        self.namespaces.insert(key, name.into());
        Ok(())
    }

    /// Reports whether the schema knows the given namespace, accepting
    /// quoted spellings and ignoring case.
    pub fn has_namespace(&self, name: &str) -> bool {
        self.namespaces
            .contains_key(&trim_quotes(name).to_lowercase())
    }

    /// Iterates over the display forms of the known namespaces, in the order
    /// they were first seen.
    pub fn namespaces(&self) -> impl Iterator<Item = &str> {
        self.namespaces.values().map(String::as_str)
    }
}

/// Adds `object` to `registry`, registering its namespace implicitly and
/// evaluating the compatibility policy. All-or-nothing: on a duplicate key,
/// neither the object nor its namespace is registered.
fn add_object<T: SchemaObject>(
    registry: &mut ObjectRegistry<T>,
    namespaces: &mut IndexMap<String, String>,
    config: &SchemaConfig,
    compat: &CompatFlags,
    sink: &dyn DeprecationSink,
    object: T,
) -> Result<(), SchemaError> {
    let key = registry.canonical_key(object.name());
    if registry.contains_key(&key) {
        return Err(SchemaError::DuplicateObject {
            kind: registry.kind(),
            name: key,
        });
    }

    if config.default_namespace.is_none() {
        match key.split_once('.') {
            Some((_, local)) => {
                if registry.unqualified_twin(local).is_some() {
                    CompatFlags::fire(
                        &compat.qualified_add,
                        sink,
                        DEPRECATION_QUALIFIED_AFTER_UNQUALIFIED,
                    );
                }
            }
            None => {
                if registry.qualified_twin(&key).is_some() {
                    CompatFlags::fire(
                        &compat.unqualified_add,
                        sink,
                        DEPRECATION_UNQUALIFIED_AFTER_QUALIFIED,
                    );
                }
            }
        }
    }

    if let Some(namespace) = object.name().namespace() {
        if config.default_namespace.as_deref() != Some(namespace) {
            let namespace_key = trim_quotes(namespace).to_lowercase();
            namespaces
                .entry(namespace_key)
                .or_insert_with(|| namespace.into());
        }
    }

    registry.add(object)
}

/// Resolves `name` to the registry key it denotes, or `None` if no stored
/// object matches.
///
/// An exact canonical-key match wins. Without a default namespace, the
/// historical fallbacks apply, each signaling its deprecation category: a
/// qualified name resolves to an unqualified entry with the same local part,
/// and an unqualified name resolves to a qualified entry with the same local
/// part.
fn resolve_key<T: SchemaObject>(
    registry: &ObjectRegistry<T>,
    config: &SchemaConfig,
    compat: &CompatFlags,
    sink: &dyn DeprecationSink,
    name: &Name,
) -> Option<String> {
    let key = registry.canonical_key(name);
    if registry.contains_key(&key) {
        return Some(key);
    }
    if config.default_namespace.is_some() {
        return None;
    }
    match key.split_once('.') {
        Some((_, local)) => {
            let twin = registry.unqualified_twin(local)?;
            CompatFlags::fire(
                &compat.qualified_lookup,
                sink,
                DEPRECATION_QUALIFIED_AFTER_UNQUALIFIED,
            );
            Some(twin)
        }
        None => {
            let twin = registry.qualified_twin(&key)?;
            CompatFlags::fire(
                &compat.unqualified_lookup,
                sink,
                DEPRECATION_UNQUALIFIED_AFTER_QUALIFIED,
            );
            Some(twin)
        }
    }
}
