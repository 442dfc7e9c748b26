// Copyright Materialize, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Tables and the objects they own.
//!
//! The column, index, and foreign key payloads here are deliberately thin:
//! just enough structure for them to participate in naming, deep copy, and
//! auto-generated identifier names. Foreign keys reference their target
//! table by name, never by pointer, so a cloned schema re-resolves them
//! against its own registries.

use crate::config::DEFAULT_MAX_IDENTIFIER_LENGTH;
use crate::error::{ObjectKind, SchemaError};
use crate::name::{generate_identifier_name, Name};
use crate::registry::SchemaObject;

/// A column of a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    name: Name,
    data_type: String,
}

impl Column {
    /// Constructs a column with the given name and data type name.
    pub fn new(name: &str, data_type: &str) -> Result<Column, SchemaError> {
        let name = Name::parse(name)?;
        if name.is_empty() {
            return Err(SchemaError::InvalidName {
                kind: ObjectKind::Column,
                name: String::new(),
            });
        }
        Ok(Column {
            name,
            data_type: data_type.into(),
        })
    }

    /// The column's name.
    pub fn name(&self) -> &Name {
        &self.name
    }

    /// The name of the column's data type.
    pub fn data_type(&self) -> &str {
        &self.data_type
    }
}

/// An index over a set of columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Index {
    name: Name,
    columns: Vec<String>,
}

impl Index {
    /// The index's name.
    pub fn name(&self) -> &Name {
        &self.name
    }

    /// The names of the indexed columns.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }
}

/// A foreign key constraint. The referenced table is recorded by name and
/// resolved against the owning schema's table registry on use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKey {
    name: Name,
    foreign_table: Name,
    local_columns: Vec<String>,
    foreign_columns: Vec<String>,
}

impl ForeignKey {
    /// The constraint's name.
    pub fn name(&self) -> &Name {
        &self.name
    }

    /// The name of the referenced table.
    pub fn foreign_table(&self) -> &Name {
        &self.foreign_table
    }

    /// The referencing columns of the owning table.
    pub fn local_columns(&self) -> &[String] {
        &self.local_columns
    }

    /// The referenced columns of the foreign table.
    pub fn foreign_columns(&self) -> &[String] {
        &self.foreign_columns
    }
}

/// A table: a named collection of columns, indexes, and foreign keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    name: Name,
    columns: Vec<Column>,
    indexes: Vec<Index>,
    foreign_keys: Vec<ForeignKey>,
    max_identifier_length: usize,
}

impl Table {
    /// Constructs an empty table with the given name.
    pub fn new(name: &str) -> Result<Table, SchemaError> {
        let name = Name::parse(name)?;
        if name.is_empty() {
            return Err(SchemaError::InvalidName {
                kind: ObjectKind::Table,
                name: String::new(),
            });
        }
        Ok(Table {
            name,
            columns: vec![],
            indexes: vec![],
            foreign_keys: vec![],
            max_identifier_length: DEFAULT_MAX_IDENTIFIER_LENGTH,
        })
    }

    /// Sets the length limit for identifiers generated on behalf of this
    /// table. [`Schema::create_table`](crate::schema::Schema::create_table)
    /// propagates the configured limit here.
    pub(crate) fn set_max_identifier_length(&mut self, max_identifier_length: usize) {
        self.max_identifier_length = max_identifier_length;
    }

    /// The table's name.
    pub fn name(&self) -> &Name {
        &self.name
    }

    /// Adds a column, failing if a column with the same name (compared
    /// case-insensitively) already exists.
    pub fn add_column(&mut self, name: &str, data_type: &str) -> Result<&mut Column, SchemaError> {
        let column = Column::new(name, data_type)?;
        let key = column.name.shortest_name(None);
        if self.columns.iter().any(|c| c.name.shortest_name(None) == key) {
            return Err(SchemaError::DuplicateObject {
                kind: ObjectKind::Column,
                name: key,
            });
        }
        self.columns.push(column);
        let index = self.columns.len() - 1;
        Ok(&mut self.columns[index])
    }

    /// Returns the column with the given name.
    pub fn get_column(&self, name: &str) -> Result<&Column, SchemaError> {
        let name = Name::parse(name)?;
        let key = name.shortest_name(None);
        self.columns
            .iter()
            .find(|c| c.name.shortest_name(None) == key)
            .ok_or_else(|| SchemaError::ObjectNotFound {
                kind: ObjectKind::Column,
                name: name.to_string(),
            })
    }

    /// The table's columns, in the order they were added.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Adds an index over the given columns, deriving its name from the
    /// table and column names within the table's identifier length limit.
    pub fn add_index(&mut self, column_names: &[&str]) -> Result<&Index, SchemaError> {
        let mut parts = vec![self.name.qualified_name()];
        parts.extend(column_names.iter().map(|c| c.to_string()));
        let name = generate_identifier_name(&parts, "idx", self.max_identifier_length);
        self.indexes.push(Index {
            name: Name::parse(&name)?,
            columns: column_names.iter().map(|c| c.to_string()).collect(),
        });
        let index = self.indexes.len() - 1;
        Ok(&self.indexes[index])
    }

    /// The table's indexes, in the order they were added.
    pub fn indexes(&self) -> &[Index] {
        &self.indexes
    }

    /// Adds a foreign key constraint referencing `foreign_table`, deriving
    /// its name like [`Table::add_index`] does.
    pub fn add_foreign_key_constraint(
        &mut self,
        foreign_table: &str,
        local_columns: &[&str],
        foreign_columns: &[&str],
    ) -> Result<&ForeignKey, SchemaError> {
        let mut parts = vec![self.name.qualified_name()];
        parts.extend(local_columns.iter().map(|c| c.to_string()));
        let name = generate_identifier_name(&parts, "fk", self.max_identifier_length);
        self.foreign_keys.push(ForeignKey {
            name: Name::parse(&name)?,
            foreign_table: Name::parse(foreign_table)?,
            local_columns: local_columns.iter().map(|c| c.to_string()).collect(),
            foreign_columns: foreign_columns.iter().map(|c| c.to_string()).collect(),
        });
        let index = self.foreign_keys.len() - 1;
        Ok(&self.foreign_keys[index])
    }

    /// The table's foreign keys, in the order they were added.
    pub fn foreign_keys(&self) -> &[ForeignKey] {
        &self.foreign_keys
    }
}

impl SchemaObject for Table {
    fn name(&self) -> &Name {
        &self.name
    }

    fn name_mut(&mut self) -> &mut Name {
        &mut self.name
    }
}
