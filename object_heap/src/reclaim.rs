// Copyright 2026 the Object Heap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Explicit destruction of locally owned objects.
//!
//! `destroy` ignores marks and follows ownership, not reachability:
//! - Lists own their elements, which are destroyed with them.
//! - An Instance's table goes away with the instance, but the objects stored in it are left
//!   registered. Instances may refer to themselves, so only the collector reclaims those.
//! - Func and NativeFunc objects are shared and are never destroyed here.
//!
//! Use [`Heap::collect`] for anything that may be aliased or cyclic.

use alloc::vec;

use crate::error::HeapError;
use crate::heap::Heap;
use crate::object::{ObjRef, Payload};

impl Heap {
    /// Destroys `obj` and the objects it owns.
    ///
    /// Returns the number of objects freed. Elements that were already freed earlier in the same
    /// call (a list holding the same element twice, or holding itself) are skipped.
    pub fn destroy(&mut self, obj: ObjRef) -> Result<usize, HeapError> {
        if self.kind(obj)?.is_callable() {
            return Ok(0);
        }

        let mut work = vec![obj];
        let mut freed = 0;
        while let Some(next) = work.pop() {
            match self.kind(next) {
                Ok(kind) if !kind.is_callable() => {}
                _ => continue,
            }
            let Some(object) = self.unregister(next) else {
                continue;
            };
            freed += 1;
            if let Payload::List(list) = object.into_payload() {
                work.extend(list.iter());
            }
        }
        Ok(freed)
    }
}

#[cfg(test)]
mod tests {
    use crate::error::HeapError;
    use crate::heap::Heap;
    use crate::object::{FuncId, NativeHandle};
    use crate::storage::List;

    #[test]
    fn scalar_is_freed() {
        let mut h = Heap::new();
        let s = h.new_string("bye");
        assert_eq!(h.destroy(s), Ok(1));
        assert!(!h.contains(s));
        assert_eq!(h.destroy(s), Err(HeapError::BadHandle));
    }

    #[test]
    fn callables_survive() {
        let mut h = Heap::new();
        let f = h.new_func();
        h.attach_func_body(f, FuncId(1)).unwrap();
        let nf = h.new_native_func(NativeHandle(5));
        assert_eq!(h.destroy(f), Ok(0));
        assert_eq!(h.destroy(nf), Ok(0));
        assert_eq!(h.func_body(f), Ok(Some(FuncId(1))));
        assert_eq!(h.as_native_func(nf), Ok(NativeHandle(5)));
    }

    #[test]
    fn list_destroys_elements_but_not_callables() {
        let mut h = Heap::new();
        let a = h.new_int(1);
        let inner_el = h.new_bool(false);
        let inner = h.new_list_from([inner_el]);
        let f = h.new_func();
        let l = h.new_list_from([a, inner, f]);

        assert_eq!(h.destroy(l), Ok(4));
        assert!(!h.contains(a));
        assert!(!h.contains(inner));
        assert!(!h.contains(inner_el));
        assert!(h.contains(f));
        assert_eq!(h.live(), 1);
    }

    #[test]
    fn instance_leaves_table_values_registered() {
        let mut h = Heap::new();
        let ns = h.new_instance();
        let v = h.new_int(3);
        h.set_var_str(ns, "v", v).unwrap();
        h.set_var_str(ns, "me", ns).unwrap();

        assert_eq!(h.destroy(ns), Ok(1));
        assert!(!h.contains(ns));
        assert_eq!(h.as_int(v), Ok(3));
    }

    #[test]
    fn repeated_and_self_elements_are_freed_once() {
        let mut h = Heap::new();
        let a = h.new_int(1);
        let l = h.new_list(List::new());
        h.list_push(l, a).unwrap();
        h.list_push(l, a).unwrap();
        h.list_push(l, l).unwrap();

        assert_eq!(h.destroy(l), Ok(2));
        assert_eq!(h.live(), 0);
        assert_eq!(h.stats().freed, 2);
    }
}
