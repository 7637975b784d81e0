// Copyright 2026 the Object Heap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Variable lookup scoped to an Instance's table.
//!
//! The `name` argument of the object-based forms must be a String object; its contents are the
//! key. A missing name is an error for `get_var` and a plain `false` for `has_var`.

use alloc::boxed::Box;

use crate::error::HeapError;
use crate::heap::Heap;
use crate::object::{Kind, ObjRef};

impl Heap {
    /// Binds `name` to `value` in namespace `ns`, overwriting any previous binding.
    pub fn set_var(&mut self, ns: ObjRef, name: ObjRef, value: ObjRef) -> Result<(), HeapError> {
        self.require_namespace(ns)?;
        // `name` borrows the heap; copy the key out before mutating `ns`.
        let key: Box<str> = self.as_str(name)?.into();
        self.set_var_str(ns, &key, value)
    }

    /// Returns the object bound to `name` in namespace `ns`.
    pub fn get_var(&self, ns: ObjRef, name: ObjRef) -> Result<ObjRef, HeapError> {
        self.require_namespace(ns)?;
        self.get_var_str(ns, self.as_str(name)?)
    }

    /// Returns `true` if `name` is bound in namespace `ns`.
    pub fn has_var(&self, ns: ObjRef, name: ObjRef) -> Result<bool, HeapError> {
        self.require_namespace(ns)?;
        self.has_var_str(ns, self.as_str(name)?)
    }

    /// [`Heap::set_var`] with a plain string key.
    pub fn set_var_str(&mut self, ns: ObjRef, name: &str, value: ObjRef) -> Result<(), HeapError> {
        self.instance_mut(ns)?.set(name, value);
        Ok(())
    }

    /// [`Heap::get_var`] with a plain string key.
    pub fn get_var_str(&self, ns: ObjRef, name: &str) -> Result<ObjRef, HeapError> {
        self.as_instance(ns)?
            .get(name)
            .ok_or_else(|| HeapError::UnresolvedVariable { name: name.into() })
    }

    /// [`Heap::has_var`] with a plain string key.
    pub fn has_var_str(&self, ns: ObjRef, name: &str) -> Result<bool, HeapError> {
        Ok(self.as_instance(ns)?.contains(name))
    }

    // The namespace kind is checked before the name so a bad scope is reported first.
    fn require_namespace(&self, ns: ObjRef) -> Result<(), HeapError> {
        match self.kind(ns)? {
            Kind::Instance => Ok(()),
            found => Err(HeapError::TypeMismatch {
                expected: Kind::Instance,
                found,
            }),
        }
    }
}
