// Copyright 2026 the Object Heap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Graph builders shared by the `object_heap` wind-tunnel benchmarks.

use object_heap::{Heap, ObjRef, OrFatal};

/// Builds a list of `len` Int objects `0..len`.
pub fn build_int_list(heap: &mut Heap, len: usize) -> ObjRef {
    let items: Vec<ObjRef> = (0..len)
        .map(|i| heap.new_int(i64::try_from(i).unwrap_or(i64::MAX)))
        .collect();
    heap.new_list_from(items)
}

/// Builds an Instance with `width` String-valued variables `var0..var{width}`.
pub fn build_namespace(heap: &mut Heap, width: usize) -> ObjRef {
    let ns = heap.new_instance();
    for i in 0..width {
        let v = heap.new_string("value");
        heap.set_var_str(ns, &format!("var{i}"), v).or_fatal();
    }
    ns
}

/// Builds a complete `fanout`-ary tree of lists with Double leaves.
pub fn build_nested_lists(heap: &mut Heap, depth: usize, fanout: usize) -> ObjRef {
    if depth == 0 {
        return heap.new_double(1.5);
    }
    let children: Vec<ObjRef> = (0..fanout)
        .map(|_| build_nested_lists(heap, depth - 1, fanout))
        .collect();
    heap.new_list_from(children)
}
