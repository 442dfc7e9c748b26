// Copyright Materialize, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Sequences.

use crate::error::{ObjectKind, SchemaError};
use crate::name::Name;
use crate::registry::SchemaObject;

/// A sequence generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    name: Name,
    allocation_size: i64,
    initial_value: i64,
}

impl Sequence {
    /// Constructs a sequence with the given name, allocation size, and
    /// initial value.
    pub fn new(name: &str, allocation_size: i64, initial_value: i64) -> Result<Sequence, SchemaError> {
        let name = Name::parse(name)?;
        if name.is_empty() {
            return Err(SchemaError::InvalidName {
                kind: ObjectKind::Sequence,
                name: String::new(),
            });
        }
        Ok(Sequence {
            name,
            allocation_size,
            initial_value,
        })
    }

    /// The sequence's name.
    pub fn name(&self) -> &Name {
        &self.name
    }

    /// The number of values allocated per round trip to the database.
    pub fn allocation_size(&self) -> i64 {
        self.allocation_size
    }

    /// The first value the sequence produces.
    pub fn initial_value(&self) -> i64 {
        self.initial_value
    }
}

impl SchemaObject for Sequence {
    fn name(&self) -> &Name {
        &self.name
    }

    fn name_mut(&mut self) -> &mut Name {
        &mut self.name
    }
}
