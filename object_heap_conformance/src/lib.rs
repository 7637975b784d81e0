// Copyright 2026 the Object Heap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Internal conformance/regression helpers for `object_heap`.
//!
//! The scenarios themselves live under `tests/`. This library holds the structural comparison
//! they share, so that "equal by content" means the same thing everywhere.

use object_heap::{Heap, ObjRef, Payload};

/// Returns `true` if `a` and `b` hold equal content.
///
/// Scalars and strings compare by value, lists element-wise in order, instances key by key.
/// Callables and native handles compare by identity of what they name. Stale handles are never
/// equal to anything. Recursion stops at `depth` and reports `false`, so cyclic graphs are safe
/// to compare.
pub fn content_eq(heap: &Heap, a: ObjRef, b: ObjRef, depth: usize) -> bool {
    if a == b && heap.contains(a) {
        return true;
    }
    let (Ok(oa), Ok(ob)) = (heap.get(a), heap.get(b)) else {
        return false;
    };
    if depth == 0 {
        return false;
    }
    match (oa.payload(), ob.payload()) {
        (Payload::Null, Payload::Null) => true,
        (Payload::Char(x), Payload::Char(y)) => x == y,
        (Payload::Int(x), Payload::Int(y)) => x == y,
        (Payload::Double(x), Payload::Double(y)) => x.to_bits() == y.to_bits(),
        (Payload::Bool(x), Payload::Bool(y)) => x == y,
        (Payload::Str(x), Payload::Str(y)) => x == y,
        (Payload::Func(x), Payload::Func(y)) => x == y,
        (Payload::NativeFunc(x), Payload::NativeFunc(y))
        | (Payload::NativeStruct(x), Payload::NativeStruct(y)) => x == y,
        (Payload::List(x), Payload::List(y)) => {
            x.len() == y.len()
                && x
                    .iter()
                    .zip(y.iter())
                    .all(|(ea, eb)| content_eq(heap, ea, eb, depth - 1))
        }
        (Payload::Instance(x), Payload::Instance(y)) => {
            x.len() == y.len()
                && x.iter().all(|(key, va)| {
                    y.get(key)
                        .is_some_and(|vb| content_eq(heap, va, vb, depth - 1))
                })
        }
        _ => false,
    }
}
