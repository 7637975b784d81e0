// Copyright 2026 the Object Heap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reachability marking.
//!
//! Marking is monotonic within a pass: an object whose mark is non-zero is treated as visited and
//! is never re-entered, which is what makes marking terminate on self-referential instances and
//! lists. Clearing marks between passes is the caller's job ([`Heap::clear_marks`]).

use alloc::vec::Vec;
use core::num::NonZeroU8;

use crate::heap::Heap;
use crate::object::{ObjRef, Payload};

/// A non-zero mark byte.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct MarkValue(NonZeroU8);

impl MarkValue {
    /// The mark used by [`Heap::collect`].
    pub const DEFAULT: Self = Self(NonZeroU8::MIN);

    /// Creates a mark value; `0` is not a mark and yields `None`.
    #[inline]
    pub const fn new(raw: u8) -> Option<Self> {
        match NonZeroU8::new(raw) {
            Some(m) => Some(Self(m)),
            None => None,
        }
    }

    /// Returns the raw mark byte.
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl Default for MarkValue {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl Heap {
    /// Marks `root` and everything reachable from it with `m`.
    ///
    /// A stale handle is the null object and is ignored. Objects that already carry a mark stop
    /// the traversal. Returns the number of objects newly marked.
    pub fn mark(&mut self, root: ObjRef, m: MarkValue) -> usize {
        self.mark_roots([root], m)
    }

    /// Marks every object reachable from `roots` with `m`.
    ///
    /// Returns the number of objects newly marked.
    pub fn mark_roots(&mut self, roots: impl IntoIterator<Item = ObjRef>, m: MarkValue) -> usize {
        let mut work: Vec<ObjRef> = roots.into_iter().collect();
        let mut marked = 0;

        while let Some(obj) = work.pop() {
            let Ok(o) = self.get_mut(obj) else {
                continue;
            };
            if o.mark != 0 {
                continue;
            }
            o.mark = m.get();
            marked += 1;

            match o.payload() {
                Payload::Instance(table) => work.extend(table.values()),
                Payload::List(list) => work.extend(list.iter()),
                Payload::Null
                | Payload::Char(_)
                | Payload::Int(_)
                | Payload::Double(_)
                | Payload::Str(_)
                | Payload::Bool(_)
                | Payload::Func(_)
                | Payload::NativeFunc(_)
                | Payload::NativeStruct(_) => {}
            }
        }

        marked
    }

    /// Returns `true` if `obj` is live and carries a non-zero mark.
    pub fn is_marked(&self, obj: ObjRef) -> bool {
        self.get(obj).is_ok_and(|o| o.mark != 0)
    }

    /// Resets every object's mark to 0.
    pub fn clear_marks(&mut self) {
        for o in self.objects_mut() {
            o.mark = 0;
        }
    }
}
