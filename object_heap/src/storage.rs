// Copyright 2026 the Object Heap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Container primitives backing Instance and List objects.
//!
//! Both containers hold [`ObjRef`] handles, never objects. Ownership of the referenced objects is
//! a heap-level policy (see [`Heap::destroy`](crate::Heap::destroy)), not something these types
//! enforce.

use alloc::boxed::Box;
use alloc::vec::Vec;

use hashbrown::HashMap;

use crate::object::ObjRef;

/// String-keyed table mapping names to objects.
///
/// Keys are unique; setting an existing key overwrites its value. Iteration order is unspecified.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Table {
    entries: HashMap<Box<str>, ObjRef>,
}

impl Table {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Returns the object mapped to `key`.
    #[inline]
    pub fn get(&self, key: &str) -> Option<ObjRef> {
        self.entries.get(key).copied()
    }

    /// Inserts or overwrites `key`, returning the previous mapping.
    pub fn set(&mut self, key: &str, value: ObjRef) -> Option<ObjRef> {
        if let Some(slot) = self.entries.get_mut(key) {
            return Some(core::mem::replace(slot, value));
        }
        self.entries.insert(key.into(), value);
        None
    }

    /// Returns `true` if `key` is mapped.
    #[inline]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Removes `key`, returning its mapping.
    pub fn remove(&mut self, key: &str) -> Option<ObjRef> {
        self.entries.remove(key)
    }

    /// Number of mapped keys.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is mapped.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates every `(key, value)` pair.
    pub fn iter(&self) -> impl Iterator<Item = (&str, ObjRef)> + '_ {
        self.entries.iter().map(|(k, v)| (&**k, *v))
    }

    /// Iterates every mapped value.
    pub fn values(&self) -> impl Iterator<Item = ObjRef> + '_ {
        self.entries.values().copied()
    }
}

/// Ordered sequence of objects.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct List {
    items: Vec<ObjRef>,
}

impl List {
    /// Creates an empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Appends `value` to the end of the list.
    #[inline]
    pub fn push(&mut self, value: ObjRef) {
        self.items.push(value);
    }

    /// Returns element `index`.
    #[inline]
    pub fn get(&self, index: usize) -> Option<ObjRef> {
        self.items.get(index).copied()
    }

    /// Replaces element `index`, returning the previous element.
    pub fn set(&mut self, index: usize, value: ObjRef) -> Option<ObjRef> {
        self.items
            .get_mut(index)
            .map(|slot| core::mem::replace(slot, value))
    }

    /// Number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the list has no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates elements in order.
    pub fn iter(&self) -> impl Iterator<Item = ObjRef> + '_ {
        self.items.iter().copied()
    }

    /// Returns the elements as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[ObjRef] {
        &self.items
    }
}

impl FromIterator<ObjRef> for List {
    fn from_iter<I: IntoIterator<Item = ObjRef>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}
