// Copyright Materialize, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! A generic registry of named schema objects.
//!
//! A registry stores one kind of object (tables, sequences) keyed by the
//! canonical form of its name: the lowercased shortest name relative to the
//! configured default namespace. Lookups are therefore case-insensitive, and
//! qualified and unqualified spellings of a name in the default namespace
//! resolve to the same entry by construction. Iteration yields entries in
//! insertion order.

use indexmap::IndexMap;

use crate::error::{ObjectKind, SchemaError};
use crate::name::Name;

/// An object that can be stored in an [`ObjectRegistry`].
pub trait SchemaObject {
    /// The object's structured name.
    fn name(&self) -> &Name;

    /// Mutable access to the object's name, for renames. The registry key is
    /// managed separately; [`ObjectRegistry::rename`] keeps the two in sync.
    fn name_mut(&mut self) -> &mut Name;
}

/// An insertion-ordered, case-insensitive container of named objects.
#[derive(Debug, Clone)]
pub struct ObjectRegistry<T> {
    kind: ObjectKind,
    default_namespace: Option<String>,
    objects: IndexMap<String, T>,
}

impl<T: SchemaObject> ObjectRegistry<T> {
    /// Creates an empty registry for objects of `kind`, resolving names
    /// against `default_namespace`.
    pub fn new(kind: ObjectKind, default_namespace: Option<String>) -> ObjectRegistry<T> {
        ObjectRegistry {
            kind,
            default_namespace,
            objects: IndexMap::new(),
        }
    }

    /// The kind of object this registry stores.
    pub fn kind(&self) -> ObjectKind {
        self.kind
    }

    /// Computes the canonical registry key for `name`.
    pub(crate) fn canonical_key(&self, name: &Name) -> String {
        name.shortest_name(self.default_namespace.as_deref())
    }

    pub(crate) fn contains_key(&self, key: &str) -> bool {
        self.objects.contains_key(key)
    }

    pub(crate) fn get_by_key(&self, key: &str) -> Option<&T> {
        self.objects.get(key)
    }

    pub(crate) fn get_by_key_mut(&mut self, key: &str) -> Option<&mut T> {
        self.objects.get_mut(key)
    }

    pub(crate) fn remove_by_key(&mut self, key: &str) -> Option<T> {
        self.objects.shift_remove(key)
    }

    /// Returns the key of the unqualified entry whose local part is
    /// `local`, if one exists. `local` must already be lowercased.
    pub(crate) fn unqualified_twin(&self, local: &str) -> Option<String> {
        if self.objects.contains_key(local) {
            Some(local.into())
        } else {
            None
        }
    }

    /// Returns the key of a qualified entry whose local part is `local`, if
    /// one exists. `local` must already be lowercased.
    pub(crate) fn qualified_twin(&self, local: &str) -> Option<String> {
        self.objects
            .keys()
            .find(|key| matches!(key.split_once('.'), Some((_, l)) if l == local))
            .cloned()
    }

    /// Adds an object, failing if its canonical key is already occupied.
    pub fn add(&mut self, object: T) -> Result<(), SchemaError> {
        let key = self.canonical_key(object.name());
        if self.objects.contains_key(&key) {
            return Err(SchemaError::DuplicateObject {
                kind: self.kind,
                name: key,
            });
        }
        self.objects.insert(key, object);
        Ok(())
    }

    /// Returns the object stored under `name`.
    pub fn get(&self, name: &Name) -> Result<&T, SchemaError> {
        self.objects
            .get(&self.canonical_key(name))
            .ok_or_else(|| SchemaError::ObjectNotFound {
                kind: self.kind,
                name: name.to_string(),
            })
    }

    /// Returns the object stored under `name`, mutably. Callers may freely
    /// mutate everything but the object's name, which only
    /// [`ObjectRegistry::rename`] may change.
    pub fn get_mut(&mut self, name: &Name) -> Result<&mut T, SchemaError> {
        let key = self.canonical_key(name);
        self.objects
            .get_mut(&key)
            .ok_or_else(|| SchemaError::ObjectNotFound {
                kind: self.kind,
                name: name.to_string(),
            })
    }

    /// Reports whether an object is stored under `name`.
    pub fn has(&self, name: &Name) -> bool {
        self.objects.contains_key(&self.canonical_key(name))
    }

    /// Moves the object stored under `old` to the key of `new` and updates
    /// the object's own name, preserving its identity and all other state.
    pub fn rename(&mut self, old: &Name, new: &Name) -> Result<&mut T, SchemaError> {
        let old_key = self.canonical_key(old);
        if !self.objects.contains_key(&old_key) {
            return Err(SchemaError::ObjectNotFound {
                kind: self.kind,
                name: old.to_string(),
            });
        }
        let new_key = self.canonical_key(new);
        if new_key != old_key && self.objects.contains_key(&new_key) {
            return Err(SchemaError::DuplicateObject {
                kind: self.kind,
                name: new_key,
            });
        }
        match self.objects.shift_remove(&old_key) {
            Some(mut object) => {
                *object.name_mut() = new.clone();
                let (index, _) = self.objects.insert_full(new_key, object);
                Ok(&mut self.objects[index])
            }
            None => Err(SchemaError::ObjectNotFound {
                kind: self.kind,
                name: old.to_string(),
            }),
        }
    }

    /// Removes and returns the object stored under `name`.
    pub fn remove(&mut self, name: &Name) -> Result<T, SchemaError> {
        self.objects
            .shift_remove(&self.canonical_key(name))
            .ok_or_else(|| SchemaError::ObjectNotFound {
                kind: self.kind,
                name: name.to_string(),
            })
    }

    /// Iterates over the stored objects in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.objects.values()
    }

    /// The number of stored objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Reports whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}
