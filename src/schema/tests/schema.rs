// Copyright Materialize, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Schema container tests.

use std::cell::RefCell;
use std::sync::Arc;

use sql_schema::{
    ObjectKind, Schema, SchemaConfig, SchemaError, Sequence, Table,
    DEPRECATION_QUALIFIED_AFTER_UNQUALIFIED, DEPRECATION_UNQUALIFIED_AFTER_QUALIFIED,
};

/// A deprecation sink that records every notification it receives.
#[derive(Debug, Default)]
struct CollectingSink {
    notifications: RefCell<Vec<String>>,
}

impl sql_schema::DeprecationSink for CollectingSink {
    fn notify_deprecated_usage(&self, identifier: &str) {
        self.notifications.borrow_mut().push(identifier.into());
    }
}

impl CollectingSink {
    fn notifications(&self) -> Vec<String> {
        self.notifications.borrow().clone()
    }
}

fn schema_with_sink(config: SchemaConfig) -> (Schema, Arc<CollectingSink>) {
    let sink = Arc::new(CollectingSink::default());
    let schema = Schema::with_sink(config, sink.clone());
    (schema, sink)
}

fn default_namespace(name: &str) -> SchemaConfig {
    SchemaConfig {
        default_namespace: Some(name.into()),
        ..SchemaConfig::default()
    }
}

#[test]
fn test_add_table() {
    let mut schema = Schema::new();
    schema.add_table(Table::new("public.foo").unwrap()).unwrap();

    assert!(schema.has_table("public.foo").unwrap());
    assert_eq!(schema.get_table("public.foo").unwrap().name().to_string(), "public.foo");
    assert_eq!(schema.tables().count(), 1);
}

#[test]
fn test_table_matching_case_insensitive() {
    let mut schema = Schema::new();
    schema.create_table("Foo").unwrap();

    for lookup in ["foo", "FOO", "Foo"] {
        assert!(schema.has_table(lookup).unwrap());
        assert_eq!(schema.get_table(lookup).unwrap().name().local_name(), "Foo");
    }
}

#[test]
fn test_get_unknown_table() {
    let schema = Schema::new();
    assert_eq!(
        schema.get_table("unknown").unwrap_err(),
        SchemaError::ObjectNotFound {
            kind: ObjectKind::Table,
            name: "unknown".into(),
        },
    );
}

#[test]
fn test_create_table_twice() {
    let mut schema = Schema::new();
    schema.create_table("foo").unwrap();
    assert_eq!(
        schema.create_table("foo").unwrap_err(),
        SchemaError::DuplicateObject {
            kind: ObjectKind::Table,
            name: "foo".into(),
        },
    );
}

#[test]
fn test_rename_table() {
    let mut schema = Schema::new();
    schema.create_table("foo").unwrap();

    schema.rename_table("foo", "bar").unwrap();
    assert!(!schema.has_table("foo").unwrap());
    assert!(schema.has_table("bar").unwrap());
    assert_eq!(schema.get_table("bar").unwrap().name().to_string(), "bar");
}

#[test]
fn test_drop_table() {
    let mut schema = Schema::new();
    schema.create_table("foo").unwrap();

    let dropped = schema.drop_table("foo").unwrap();
    assert_eq!(dropped.name().to_string(), "foo");
    assert!(!schema.has_table("foo").unwrap());
    assert_eq!(
        schema.drop_table("foo").unwrap_err(),
        SchemaError::ObjectNotFound {
            kind: ObjectKind::Table,
            name: "foo".into(),
        },
    );
}

#[test]
fn test_create_table() {
    let mut schema = Schema::new();
    assert!(!schema.has_table("foo").unwrap());

    let table = schema.create_table("foo").unwrap();
    assert_eq!(table.name().to_string(), "foo");
    assert!(schema.has_table("foo").unwrap());
}

#[test]
fn test_has_table_for_quoted_name() {
    let mut schema = Schema::new();
    schema.create_table("foo").unwrap();
    assert!(schema.has_table("`foo`").unwrap());
    assert!(schema.has_table("\"foo\"").unwrap());
}

#[test]
fn test_add_sequence() {
    let mut schema = Schema::new();
    schema.add_sequence(Sequence::new("a_seq", 1, 1).unwrap()).unwrap();

    assert!(schema.has_sequence("a_seq").unwrap());
    assert_eq!(schema.get_sequence("a_seq").unwrap().name().to_string(), "a_seq");
    assert_eq!(schema.sequences().count(), 1);
}

#[test]
fn test_sequence_access_case_insensitive() {
    let mut schema = Schema::new();
    schema.create_sequence("a_Seq", 1, 1).unwrap();

    for lookup in ["a_seq", "a_Seq", "A_SEQ"] {
        assert!(schema.has_sequence(lookup).unwrap());
        assert_eq!(schema.get_sequence(lookup).unwrap().name().local_name(), "a_Seq");
    }
}

#[test]
fn test_get_unknown_sequence() {
    let schema = Schema::new();
    assert_eq!(
        schema.get_sequence("unknown").unwrap_err(),
        SchemaError::ObjectNotFound {
            kind: ObjectKind::Sequence,
            name: "unknown".into(),
        },
    );
}

#[test]
fn test_create_sequence() {
    let mut schema = Schema::new();
    let sequence = schema.create_sequence("a_seq", 10, 20).unwrap();

    assert_eq!(sequence.name().to_string(), "a_seq");
    assert_eq!(sequence.allocation_size(), 10);
    assert_eq!(sequence.initial_value(), 20);

    assert!(schema.has_sequence("a_seq").unwrap());
}

#[test]
fn test_drop_sequence() {
    let mut schema = Schema::new();
    schema.create_sequence("a_seq", 1, 1).unwrap();

    schema.drop_sequence("a_seq").unwrap();
    assert!(!schema.has_sequence("a_seq").unwrap());
}

#[test]
fn test_add_sequence_twice() {
    let mut schema = Schema::new();
    schema.create_sequence("a_seq", 1, 1).unwrap();
    assert_eq!(
        schema.create_sequence("a_seq", 1, 1).unwrap_err(),
        SchemaError::DuplicateObject {
            kind: ObjectKind::Sequence,
            name: "a_seq".into(),
        },
    );
}

#[test]
fn test_config_max_identifier_length() {
    let mut schema = Schema::with_config(SchemaConfig {
        max_identifier_length: 5,
        ..SchemaConfig::default()
    });

    let table = schema.create_table("smalltable").unwrap();
    table.add_column("long_id", "integer").unwrap();
    table.add_index(&["long_id"]).unwrap();

    let indexes = table.indexes();
    assert_eq!(indexes.len(), 1);
    assert_eq!(indexes[0].name().local_name().len(), 5);
}

#[test]
fn test_deep_clone() {
    let mut schema = Schema::new();
    schema.create_sequence("baz", 1, 1).unwrap();

    let table_a = schema.create_table("foo").unwrap();
    table_a.add_column("id", "integer").unwrap();

    let table_b = schema.create_table("bar").unwrap();
    table_b.add_column("id", "integer").unwrap();
    table_b.add_column("foo_id", "integer").unwrap();
    table_b
        .add_foreign_key_constraint("foo", &["foo_id"], &["id"])
        .unwrap();

    let schema_new = schema.clone();

    // Value-equal but independently allocated, recursively.
    let (seq, seq_new) = (
        schema.get_sequence("baz").unwrap(),
        schema_new.get_sequence("baz").unwrap(),
    );
    assert_eq!(seq, seq_new);
    assert!(!std::ptr::eq(seq, seq_new));

    for name in ["foo", "bar"] {
        let (table, table_new) = (
            schema.get_table(name).unwrap(),
            schema_new.get_table(name).unwrap(),
        );
        assert_eq!(table, table_new);
        assert!(!std::ptr::eq(table, table_new));
        assert!(!std::ptr::eq(
            table.get_column("id").unwrap(),
            table_new.get_column("id").unwrap(),
        ));
    }

    // The foreign key names its target; the clone resolves it against its
    // own registry.
    let fk = &schema_new.get_table("bar").unwrap().foreign_keys()[0];
    let target = schema_new
        .get_table(&fk.foreign_table().to_string())
        .unwrap();
    assert_eq!(target.name().to_string(), "foo");
}

#[test]
fn test_has_namespace() {
    let mut schema = Schema::with_config(default_namespace("public"));

    assert!(!schema.has_namespace("foo"));

    schema.create_table("foo").unwrap();
    assert!(!schema.has_namespace("foo"));

    schema.create_table("bar.baz").unwrap();
    assert!(!schema.has_namespace("baz"));
    assert!(schema.has_namespace("bar"));
    assert!(!schema.has_namespace("tab"));

    schema.create_table("tab.taz").unwrap();
    assert!(schema.has_namespace("tab"));
}

#[test]
fn test_create_namespace() {
    let mut schema = Schema::new();

    assert!(!schema.has_namespace("foo"));
    schema.create_namespace("foo").unwrap();

    for lookup in ["foo", "FOO", "`foo`", "`FOO`"] {
        assert!(schema.has_namespace(lookup));
    }

    schema.create_namespace("`bar`").unwrap();
    for lookup in ["bar", "BAR", "`bar`", "`BAR`"] {
        assert!(schema.has_namespace(lookup));
    }

    // Display forms keep the first-seen spelling, quotes included.
    let namespaces: Vec<_> = schema.namespaces().collect();
    assert_eq!(namespaces, ["foo", "`bar`"]);
}

#[test]
fn test_create_namespace_twice() {
    let mut schema = Schema::new();
    schema.create_namespace("foo").unwrap();
    assert_eq!(
        schema.create_namespace("FOO").unwrap_err(),
        SchemaError::DuplicateObject {
            kind: ObjectKind::Namespace,
            name: "FOO".into(),
        },
    );
}

#[test]
fn test_creates_namespace_through_adding_table_implicitly() {
    let mut schema = Schema::with_config(default_namespace("public"));

    schema.create_table("baz").unwrap();
    assert!(!schema.has_namespace("baz"));

    schema.create_table("foo.bar").unwrap();
    assert!(schema.has_namespace("foo"));
    assert!(!schema.has_namespace("bar"));

    schema.create_table("`baz`.bloo").unwrap();
    assert!(schema.has_namespace("baz"));
    assert!(!schema.has_namespace("bloo"));

    schema.create_table("`baz`.moo").unwrap();
    assert!(schema.has_namespace("baz"));
    assert!(!schema.has_namespace("moo"));
}

#[test]
fn test_creates_namespace_through_adding_sequence_implicitly() {
    let mut schema = Schema::with_config(default_namespace("public"));

    schema.create_sequence("baz", 1, 1).unwrap();
    assert!(!schema.has_namespace("baz"));

    schema.create_sequence("foo.bar", 1, 1).unwrap();
    assert!(schema.has_namespace("foo"));
    assert!(!schema.has_namespace("bar"));

    schema.create_sequence("`baz`.bloo", 1, 1).unwrap();
    assert!(schema.has_namespace("baz"));
    assert!(!schema.has_namespace("bloo"));
}

#[test]
fn test_add_qualified_name_after_unqualified() {
    let (mut schema, sink) = schema_with_sink(SchemaConfig::default());
    schema.create_table("t").unwrap();
    schema.create_table("public.t").unwrap();

    assert_eq!(
        sink.notifications(),
        [DEPRECATION_QUALIFIED_AFTER_UNQUALIFIED]
    );

    // The add-time flag is one-shot per container.
    schema.create_table("s").unwrap();
    schema.create_table("other.s").unwrap();
    assert_eq!(sink.notifications().len(), 1);
}

#[test]
fn test_add_unqualified_name_after_qualified() {
    let (mut schema, sink) = schema_with_sink(SchemaConfig::default());
    schema.create_table("public.t").unwrap();
    schema.create_table("t").unwrap();

    assert_eq!(
        sink.notifications(),
        [DEPRECATION_UNQUALIFIED_AFTER_QUALIFIED]
    );
}

#[test]
fn test_reference_by_qualified_name_among_unqualified() {
    let (mut schema, sink) = schema_with_sink(SchemaConfig::default());
    schema.create_table("t").unwrap();

    // Historical behavior: the qualified reference resolves to the
    // unqualified entry, with a one-time signal.
    assert!(schema.has_table("public.t").unwrap());
    assert!(schema.has_table("public.t").unwrap());
    assert_eq!(
        sink.notifications(),
        [DEPRECATION_QUALIFIED_AFTER_UNQUALIFIED]
    );
}

#[test]
fn test_reference_by_unqualified_name_among_qualified() {
    let (mut schema, sink) = schema_with_sink(SchemaConfig::default());
    schema.create_table("public.t").unwrap();

    assert!(schema.has_table("t").unwrap());
    assert_eq!(
        schema.get_table("t").unwrap().name().to_string(),
        "public.t"
    );
    assert_eq!(
        sink.notifications(),
        [DEPRECATION_UNQUALIFIED_AFTER_QUALIFIED]
    );
}

#[test]
fn test_add_and_lookup_flags_are_independent() {
    let (mut schema, sink) = schema_with_sink(SchemaConfig::default());
    schema.create_table("t").unwrap();
    schema.create_table("public.t").unwrap();
    schema.drop_table("public.t").unwrap();

    // The lookup-time flag has not fired yet, so resolving through the
    // fallback signals the same category a second time.
    assert!(schema.has_table("public.t").unwrap());
    assert_eq!(
        sink.notifications(),
        [
            DEPRECATION_QUALIFIED_AFTER_UNQUALIFIED,
            DEPRECATION_QUALIFIED_AFTER_UNQUALIFIED,
        ]
    );
}

#[test]
fn test_no_deprecation_with_default_namespace() {
    let (mut schema, sink) = schema_with_sink(default_namespace("public"));
    schema.create_table("t").unwrap();
    schema.create_table("public.s").unwrap();

    assert!(schema.has_table("t").unwrap());
    assert!(schema.has_table("public.t").unwrap());
    assert!(schema.has_table("s").unwrap());
    assert!(schema.has_table("public.s").unwrap());

    assert!(sink.notifications().is_empty());
}

#[test]
fn test_referencing_by_unqualified_name_with_default_namespace() {
    let (mut schema, sink) = schema_with_sink(default_namespace("public"));
    schema.create_table("public.t").unwrap();

    assert!(schema.has_table("t").unwrap());
    assert!(schema.has_table("public.t").unwrap());
    assert!(!schema.has_table("s").unwrap());
    assert!(!schema.has_table("public.s").unwrap());

    assert!(sink.notifications().is_empty());
}

#[test]
fn test_table_listing_is_insertion_ordered() {
    let mut schema = Schema::new();
    for name in ["c", "a", "b"] {
        schema.create_table(name).unwrap();
    }
    let names: Vec<_> = schema.tables().map(|t| t.name().to_string()).collect();
    assert_eq!(names, ["c", "a", "b"]);
}

#[test]
fn test_invalid_table_name() {
    let mut schema = Schema::new();
    assert!(matches!(
        schema.create_table(" ").unwrap_err(),
        SchemaError::InvalidObjectName { .. },
    ));
    assert!(matches!(
        schema.create_table("i.am.overqualified").unwrap_err(),
        SchemaError::TooManyQualifiers { count: 2, .. },
    ));
}
