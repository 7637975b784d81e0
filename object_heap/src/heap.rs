// Copyright 2026 the Object Heap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The allocation registry and the object constructors/accessors.
//!
//! A [`Heap`] is scoped to one VM instance. Every constructor registers the new object in the
//! heap and hands back an [`ObjRef`]; the heap stays the sole owner of every object until the
//! object is destroyed or swept.

use alloc::string::String;
use alloc::vec::Vec;

use crate::config::HeapConfig;
use crate::error::HeapError;
use crate::object::{FuncId, Kind, NativeHandle, ObjRef, Object, Payload, Scalar};
use crate::storage::{List, Table};

#[derive(Clone, Debug)]
struct Slot {
    generation: u32,
    object: Option<Object>,
}

/// Running counters for a [`Heap`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeapStats {
    /// Objects currently registered.
    pub live: usize,
    /// Objects allocated over the heap's lifetime.
    pub allocated: u64,
    /// Objects freed over the heap's lifetime (destroy and sweep).
    pub freed: u64,
    /// Completed collections.
    pub collections: u64,
}

/// Per-VM object registry.
#[derive(Clone, Debug)]
pub struct Heap {
    slots: Vec<Slot>,
    free: Vec<u32>,
    pub(crate) config: HeapConfig,
    pub(crate) stats: HeapStats,
    pub(crate) allocations_since_collect: usize,
}

impl Default for Heap {
    fn default() -> Self {
        Self::new()
    }
}

#[cold]
#[inline(never)]
fn slots_exhausted() -> ! {
    panic!("object heap exhausted: more than {} slots", u32::MAX);
}

#[inline]
pub(crate) fn mismatch(expected: Kind, found: &Payload) -> HeapError {
    HeapError::TypeMismatch {
        expected,
        found: found.kind(),
    }
}

impl Heap {
    /// Creates an empty heap with [`HeapConfig::default`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(HeapConfig::default())
    }

    /// Creates an empty heap.
    #[must_use]
    pub fn with_config(config: HeapConfig) -> Self {
        Self {
            slots: Vec::with_capacity(config.initial_capacity),
            free: Vec::new(),
            config,
            stats: HeapStats::default(),
            allocations_since_collect: 0,
        }
    }

    /// Returns the heap configuration.
    #[inline]
    pub fn config(&self) -> &HeapConfig {
        &self.config
    }

    /// Returns the heap counters.
    #[inline]
    pub fn stats(&self) -> HeapStats {
        self.stats
    }

    /// Number of registered objects.
    #[inline]
    pub fn live(&self) -> usize {
        self.stats.live
    }

    /// Returns `true` if `obj` names a registered object.
    pub fn contains(&self, obj: ObjRef) -> bool {
        self.get(obj).is_ok()
    }

    /// Returns the object behind `obj`.
    pub fn get(&self, obj: ObjRef) -> Result<&Object, HeapError> {
        match self.slots.get(obj.index as usize) {
            Some(Slot {
                generation,
                object: Some(o),
            }) if *generation == obj.generation => Ok(o),
            _ => Err(HeapError::BadHandle),
        }
    }

    pub(crate) fn get_mut(&mut self, obj: ObjRef) -> Result<&mut Object, HeapError> {
        match self.slots.get_mut(obj.index as usize) {
            Some(Slot {
                generation,
                object: Some(o),
            }) if *generation == obj.generation => Ok(o),
            _ => Err(HeapError::BadHandle),
        }
    }

    /// Returns the kind of `obj`.
    pub fn kind(&self, obj: ObjRef) -> Result<Kind, HeapError> {
        self.get(obj).map(Object::kind)
    }

    /// Iterates every registered object in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (ObjRef, &Object)> + '_ {
        self.slots.iter().enumerate().filter_map(|(i, slot)| {
            let o = slot.object.as_ref()?;
            let index = u32::try_from(i).ok()?;
            Some((
                ObjRef {
                    index,
                    generation: slot.generation,
                },
                o,
            ))
        })
    }

    /// Registers `object` and returns its handle.
    ///
    /// Panics once more than `u32::MAX` slots would be needed, the same way a `Vec` panics on
    /// capacity overflow.
    pub(crate) fn register(&mut self, object: Object) -> ObjRef {
        self.stats.live += 1;
        self.stats.allocated += 1;
        self.allocations_since_collect += 1;

        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.object = Some(object);
            return ObjRef {
                index,
                generation: slot.generation,
            };
        }

        let Ok(index) = u32::try_from(self.slots.len()) else {
            slots_exhausted();
        };
        self.slots.push(Slot {
            generation: 0,
            object: Some(object),
        });
        ObjRef {
            index,
            generation: 0,
        }
    }

    /// Unregisters `obj`, returning the object. Stale handles yield `None`.
    ///
    /// A slot whose generation is exhausted is retired instead of reused, so a stale handle can
    /// never name a later object.
    pub(crate) fn unregister(&mut self, obj: ObjRef) -> Option<Object> {
        let slot = self.slots.get_mut(obj.index as usize)?;
        if slot.generation != obj.generation {
            return None;
        }
        let object = slot.object.take()?;
        if let Some(next) = slot.generation.checked_add(1) {
            slot.generation = next;
            self.free.push(obj.index);
        }
        self.stats.live -= 1;
        self.stats.freed += 1;
        Some(object)
    }

    pub(crate) fn objects_mut(&mut self) -> impl Iterator<Item = &mut Object> + '_ {
        self.slots.iter_mut().filter_map(|slot| slot.object.as_mut())
    }

    /// Slot-order view for the sweep.
    pub(crate) fn slot_handles(&self) -> Vec<ObjRef> {
        self.iter().map(|(r, _)| r).collect()
    }

    fn alloc(&mut self, payload: Payload) -> ObjRef {
        self.register(Object::new(payload))
    }

    // Constructors.

    /// Allocates a null object.
    pub fn new_null(&mut self) -> ObjRef {
        self.alloc(Payload::Null)
    }

    /// Allocates an Instance with an empty table.
    pub fn new_instance(&mut self) -> ObjRef {
        self.alloc(Payload::Instance(Table::new()))
    }

    /// Allocates an Instance that takes ownership of `table`.
    pub fn new_instance_with(&mut self, table: Table) -> ObjRef {
        self.alloc(Payload::Instance(table))
    }

    /// Allocates a Char.
    pub fn new_char(&mut self, c: char) -> ObjRef {
        self.alloc(Payload::Char(c))
    }

    /// Allocates an Int.
    pub fn new_int(&mut self, i: i64) -> ObjRef {
        self.alloc(Payload::Int(i))
    }

    /// Allocates a Double.
    pub fn new_double(&mut self, d: f64) -> ObjRef {
        self.alloc(Payload::Double(d))
    }

    /// Allocates a String holding a copy of `s`.
    pub fn new_string(&mut self, s: &str) -> ObjRef {
        self.alloc(Payload::Str(String::from(s)))
    }

    /// Allocates a Bool.
    pub fn new_bool(&mut self, b: bool) -> ObjRef {
        self.alloc(Payload::Bool(b))
    }

    /// Allocates a List that takes ownership of `list`.
    pub fn new_list(&mut self, list: List) -> ObjRef {
        self.alloc(Payload::List(list))
    }

    /// Allocates a List from `items`, in order.
    pub fn new_list_from(&mut self, items: impl IntoIterator<Item = ObjRef>) -> ObjRef {
        self.new_list(items.into_iter().collect())
    }

    /// Allocates a Func with no body; see [`Heap::attach_func_body`].
    pub fn new_func(&mut self) -> ObjRef {
        self.alloc(Payload::Func(None))
    }

    /// Allocates a NativeFunc wrapping a host handle.
    pub fn new_native_func(&mut self, handle: NativeHandle) -> ObjRef {
        self.alloc(Payload::NativeFunc(handle))
    }

    /// Allocates a NativeStruct wrapping a host handle.
    pub fn new_native_struct(&mut self, handle: NativeHandle) -> ObjRef {
        self.alloc(Payload::NativeStruct(handle))
    }

    // Accessors.

    /// Returns the character held by a Char.
    pub fn as_char(&self, obj: ObjRef) -> Result<char, HeapError> {
        match self.get(obj)?.payload() {
            Payload::Char(c) => Ok(*c),
            other => Err(mismatch(Kind::Char, other)),
        }
    }

    /// Returns the integer held by an Int.
    pub fn as_int(&self, obj: ObjRef) -> Result<i64, HeapError> {
        match self.get(obj)?.payload() {
            Payload::Int(i) => Ok(*i),
            other => Err(mismatch(Kind::Int, other)),
        }
    }

    /// Returns the float held by a Double, or an Int widened to `f64`.
    pub fn as_double(&self, obj: ObjRef) -> Result<f64, HeapError> {
        match self.get(obj)?.payload() {
            Payload::Double(d) => Ok(*d),
            Payload::Int(i) => Ok(*i as f64),
            other => Err(mismatch(Kind::Double, other)),
        }
    }

    /// Returns the contents of a String.
    pub fn as_str(&self, obj: ObjRef) -> Result<&str, HeapError> {
        match self.get(obj)?.payload() {
            Payload::Str(s) => Ok(s.as_str()),
            other => Err(mismatch(Kind::String, other)),
        }
    }

    /// Returns the truth value of a Bool, or of an Int (non-zero is `true`).
    pub fn as_bool(&self, obj: ObjRef) -> Result<bool, HeapError> {
        match self.get(obj)?.payload() {
            Payload::Bool(b) => Ok(*b),
            Payload::Int(i) => Ok(*i != 0),
            other => Err(mismatch(Kind::Bool, other)),
        }
    }

    /// Returns the element list of a List.
    pub fn as_list(&self, obj: ObjRef) -> Result<&List, HeapError> {
        match self.get(obj)?.payload() {
            Payload::List(l) => Ok(l),
            other => Err(mismatch(Kind::List, other)),
        }
    }

    /// Returns the host handle of a NativeStruct.
    pub fn as_struct(&self, obj: ObjRef) -> Result<NativeHandle, HeapError> {
        match self.get(obj)?.payload() {
            Payload::NativeStruct(h) => Ok(*h),
            other => Err(mismatch(Kind::NativeStruct, other)),
        }
    }

    /// Returns the host handle of a NativeFunc.
    pub fn as_native_func(&self, obj: ObjRef) -> Result<NativeHandle, HeapError> {
        match self.get(obj)?.payload() {
            Payload::NativeFunc(h) => Ok(*h),
            other => Err(mismatch(Kind::NativeFunc, other)),
        }
    }

    /// Returns the backing table of an Instance.
    pub fn as_instance(&self, obj: ObjRef) -> Result<&Table, HeapError> {
        match self.get(obj)?.payload() {
            Payload::Instance(t) => Ok(t),
            other => Err(mismatch(Kind::Instance, other)),
        }
    }

    /// Returns the body attached to a Func, if any.
    pub fn func_body(&self, obj: ObjRef) -> Result<Option<FuncId>, HeapError> {
        match self.get(obj)?.payload() {
            Payload::Func(body) => Ok(*body),
            other => Err(mismatch(Kind::Func, other)),
        }
    }

    pub(crate) fn instance_mut(&mut self, obj: ObjRef) -> Result<&mut Table, HeapError> {
        match self.get_mut(obj)?.payload_mut() {
            Payload::Instance(t) => Ok(t),
            other => Err(mismatch(Kind::Instance, other)),
        }
    }

    fn list_mut(&mut self, obj: ObjRef) -> Result<&mut List, HeapError> {
        match self.get_mut(obj)?.payload_mut() {
            Payload::List(l) => Ok(l),
            other => Err(mismatch(Kind::List, other)),
        }
    }

    // Mutators.

    /// Overwrites the inline value of a scalar object of the same kind.
    pub fn set_scalar(&mut self, obj: ObjRef, value: Scalar) -> Result<(), HeapError> {
        let o = self.get_mut(obj)?;
        if o.kind() != value.kind() {
            return Err(HeapError::TypeMismatch {
                expected: value.kind(),
                found: o.kind(),
            });
        }
        o.replace_payload(value.into_payload());
        Ok(())
    }

    /// Appends `value` to a List.
    pub fn list_push(&mut self, list: ObjRef, value: ObjRef) -> Result<(), HeapError> {
        self.list_mut(list)?.push(value);
        Ok(())
    }

    /// Replaces element `index` of a List, returning the previous element.
    pub fn list_set(
        &mut self,
        list: ObjRef,
        index: usize,
        value: ObjRef,
    ) -> Result<ObjRef, HeapError> {
        let l = self.list_mut(list)?;
        let len = l.len();
        l.set(index, value)
            .ok_or(HeapError::IndexOutOfBounds { index, len })
    }

    /// Attaches a compiled body to a Func.
    pub fn attach_func_body(&mut self, func: ObjRef, body: FuncId) -> Result<(), HeapError> {
        let o = self.get_mut(func)?;
        if o.kind() != Kind::Func {
            return Err(HeapError::TypeMismatch {
                expected: Kind::Func,
                found: o.kind(),
            });
        }
        o.replace_payload(Payload::Func(Some(body)));
        Ok(())
    }
}
