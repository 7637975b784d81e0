// Copyright 2026 the Object Heap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deep copy ("copy semantics") for object graphs.

use alloc::boxed::Box;
use alloc::vec::Vec;

use hashbrown::HashSet;

use crate::error::HeapError;
use crate::heap::Heap;
use crate::object::{ObjRef, Payload};
use crate::storage::{List, Table};

/// A container whose children are being copied.
///
/// `copies[i]` is the clone of `children[i]`; the container itself is allocated once every
/// child has a copy.
struct Frame {
    source: ObjRef,
    /// Table keys, parallel to `children`. `None` for lists.
    keys: Option<Vec<Box<str>>>,
    children: Vec<ObjRef>,
    copies: Vec<ObjRef>,
}

enum Step {
    Done(ObjRef),
    Descend(Frame),
}

impl Heap {
    /// Returns a structurally independent copy of `obj`.
    ///
    /// - Instance: a new instance whose table maps every key to a clone of the source value.
    /// - List: a new list of cloned elements, in order.
    /// - Func, NativeFunc: `obj` itself. Callables are shared, never copied.
    /// - Everything else: a new object with the same kind, mark, size hint and payload. String
    ///   contents are copied into a fresh buffer.
    ///
    /// Sharing is not preserved: an object reachable along two paths is copied twice. A
    /// container that (transitively) contains itself fails with [`HeapError::CyclicGraph`];
    /// objects allocated before the failure stay registered until the next collection.
    ///
    /// The graph is walked with an explicit stack, so nesting depth is bounded only by memory.
    pub fn clone_object(&mut self, obj: ObjRef) -> Result<ObjRef, HeapError> {
        let mut current = match self.clone_step(obj)? {
            Step::Done(copy) => return Ok(copy),
            Step::Descend(frame) => frame,
        };
        let mut on_path: HashSet<ObjRef> = HashSet::new();
        on_path.insert(obj);
        let mut parents: Vec<Frame> = Vec::new();

        loop {
            if let Some(&child) = current.children.get(current.copies.len()) {
                if on_path.contains(&child) {
                    return Err(HeapError::CyclicGraph { at: child });
                }
                match self.clone_step(child)? {
                    Step::Done(copy) => current.copies.push(copy),
                    Step::Descend(frame) => {
                        on_path.insert(child);
                        parents.push(core::mem::replace(&mut current, frame));
                    }
                }
                continue;
            }

            on_path.remove(&current.source);
            let copy = self.finish_frame(current);
            match parents.pop() {
                Some(mut parent) => {
                    parent.copies.push(copy);
                    current = parent;
                }
                None => return Ok(copy),
            }
        }
    }

    fn clone_step(&mut self, obj: ObjRef) -> Result<Step, HeapError> {
        let source = self.get(obj)?;
        let frame = match source.payload() {
            Payload::Func(_) | Payload::NativeFunc(_) => return Ok(Step::Done(obj)),
            Payload::Instance(table) => {
                let (keys, children): (Vec<Box<str>>, Vec<ObjRef>) =
                    table.iter().map(|(k, v)| (Box::<str>::from(k), v)).unzip();
                Frame {
                    source: obj,
                    keys: Some(keys),
                    copies: Vec::with_capacity(children.len()),
                    children,
                }
            }
            Payload::List(list) => {
                let children: Vec<ObjRef> = list.iter().collect();
                Frame {
                    source: obj,
                    keys: None,
                    copies: Vec::with_capacity(children.len()),
                    children,
                }
            }
            Payload::Null
            | Payload::Char(_)
            | Payload::Int(_)
            | Payload::Double(_)
            | Payload::Str(_)
            | Payload::Bool(_)
            | Payload::NativeStruct(_) => {
                let dup = source.duplicate_leaf();
                return Ok(Step::Done(self.register(dup)));
            }
        };
        Ok(Step::Descend(frame))
    }

    fn finish_frame(&mut self, frame: Frame) -> ObjRef {
        match frame.keys {
            Some(keys) => {
                let mut table = Table::new();
                for (key, value) in keys.iter().zip(frame.copies) {
                    table.set(key, value);
                }
                self.new_instance_with(table)
            }
            None => self.new_list(frame.copies.into_iter().collect::<List>()),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::error::HeapError;
    use crate::heap::Heap;
    use crate::mark::MarkValue;
    use crate::object::{NativeHandle, Scalar};
    use crate::storage::List;

    #[test]
    fn list_clone_is_independent() {
        let mut h = Heap::new();
        let one = h.new_int(1);
        let two = h.new_int(2);
        let l = h.new_list_from([one, two]);

        let c = h.clone_object(l).unwrap();
        assert_ne!(c, l);
        let elems: alloc::vec::Vec<_> = h.as_list(c).unwrap().iter().collect();
        assert_eq!(elems.len(), 2);
        assert_eq!(h.as_int(elems[0]), Ok(1));
        assert_eq!(h.as_int(elems[1]), Ok(2));
        assert_ne!(elems[0], one);

        h.set_scalar(one, Scalar::Int(10)).unwrap();
        assert_eq!(h.as_int(elems[0]), Ok(1));

        let extra = h.new_int(3);
        h.list_push(c, extra).unwrap();
        assert_eq!(h.as_list(l).map(|l| l.len()), Ok(2));
    }

    #[test]
    fn instance_clone_gets_its_own_table() {
        let mut h = Heap::new();
        let ns = h.new_instance();
        let count = h.new_int(0);
        h.set_var_str(ns, "count", count).unwrap();

        let c = h.clone_object(ns).unwrap();
        assert_ne!(c, ns);
        let copied = h.get_var_str(c, "count").unwrap();
        assert_ne!(copied, count);
        assert_eq!(h.as_int(copied), Ok(0));

        let other = h.new_int(9);
        h.set_var_str(c, "count", other).unwrap();
        h.set_var_str(c, "fresh", other).unwrap();
        assert_eq!(h.get_var_str(ns, "count"), Ok(count));
        assert_eq!(h.has_var_str(ns, "fresh"), Ok(false));
    }

    #[test]
    fn callables_are_aliased() {
        let mut h = Heap::new();
        let f = h.new_func();
        let nf = h.new_native_func(NativeHandle(1));
        let live = h.live();
        assert_eq!(h.clone_object(f), Ok(f));
        assert_eq!(h.clone_object(nf), Ok(nf));
        assert_eq!(h.live(), live);
    }

    #[test]
    fn leaf_clone_copies_mark_and_payload() {
        let mut h = Heap::new();
        let s = h.new_string("abc");
        h.mark(s, MarkValue::new(4).unwrap());
        let c = h.clone_object(s).unwrap();
        assert_ne!(c, s);
        assert_eq!(h.as_str(c), Ok("abc"));
        assert_eq!(h.get(c).map(|o| o.mark()), Ok(4));
        assert_eq!(h.get(c).map(|o| o.size_hint()), Ok(4));

        let st = h.new_native_struct(NativeHandle(77));
        let cst = h.clone_object(st).unwrap();
        assert_ne!(cst, st);
        assert_eq!(h.as_struct(cst), Ok(NativeHandle(77)));
    }

    #[test]
    fn string_clone_does_not_alias_buffer() {
        let mut h = Heap::new();
        let s = h.new_string("abc");
        let c = h.clone_object(s).unwrap();
        h.destroy(s).unwrap();
        assert_eq!(h.as_str(c), Ok("abc"));
    }

    #[test]
    fn self_containing_instance_is_rejected() {
        let mut h = Heap::new();
        let ns = h.new_instance();
        h.set_var_str(ns, "me", ns).unwrap();
        assert_eq!(
            h.clone_object(ns),
            Err(HeapError::CyclicGraph { at: ns })
        );
    }

    #[test]
    fn indirect_cycle_is_rejected() {
        let mut h = Heap::new();
        let outer = h.new_list(List::new());
        let inner = h.new_instance();
        h.list_push(outer, inner).unwrap();
        h.set_var_str(inner, "back", outer).unwrap();
        assert_eq!(
            h.clone_object(outer),
            Err(HeapError::CyclicGraph { at: outer })
        );
    }

    #[test]
    fn shared_children_are_copied_per_path() {
        let mut h = Heap::new();
        let leaf = h.new_int(3);
        let inner = h.new_list_from([leaf]);
        let outer = h.new_list_from([inner, inner]);

        let c = h.clone_object(outer).unwrap();
        let elems: alloc::vec::Vec<_> = h.as_list(c).unwrap().iter().collect();
        assert_eq!(elems.len(), 2);
        assert_ne!(elems[0], elems[1]);
        assert_ne!(elems[0], inner);
    }

    #[test]
    fn deep_chain_clones_without_recursion() {
        let mut h = Heap::new();
        let mut chain = h.new_int(7);
        for _ in 0..50_000 {
            chain = h.new_list_from([chain]);
        }
        let c = h.clone_object(chain).unwrap();

        let mut depth = 0;
        let mut cursor = c;
        while let Ok(list) = h.as_list(cursor) {
            assert_eq!(list.len(), 1);
            cursor = list.get(0).unwrap();
            depth += 1;
        }
        assert_eq!(depth, 50_000);
        assert_eq!(h.as_int(cursor), Ok(7));
    }
}
