// Copyright 2026 the Object Heap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use object_heap::{Heap, HeapError, Kind, List, OrFatal};
use object_heap_conformance::content_eq;

#[test]
fn count_scenario() {
    let mut heap = Heap::new();
    let ns = heap.new_instance();
    let count = heap.new_string("count");
    let zero = heap.new_int(0);
    heap.set_var(ns, count, zero).or_fatal();

    let lookup = heap.new_string("count");
    let got = heap.get_var(ns, lookup).or_fatal();
    assert_eq!(heap.as_int(got), Ok(0));

    let missing = heap.new_string("missing");
    assert_eq!(heap.has_var(ns, missing), Ok(false));
}

#[test]
fn has_var_flips_after_set_var() {
    let mut heap = Heap::new();
    let ns = heap.new_instance();
    let x = heap.new_string("x");
    let value = heap.new_double(0.5);

    assert_eq!(heap.has_var(ns, x), Ok(false));
    heap.set_var(ns, x, value).or_fatal();
    assert_eq!(heap.has_var(ns, x), Ok(true));
    let got = heap.get_var(ns, x).or_fatal();
    assert!(content_eq(&heap, got, value, 4));
}

#[test]
fn rebinding_overwrites() {
    let mut heap = Heap::new();
    let ns = heap.new_instance();
    let a = heap.new_int(1);
    let b = heap.new_int(2);
    heap.set_var_str(ns, "v", a).or_fatal();
    heap.set_var_str(ns, "v", b).or_fatal();
    assert_eq!(heap.get_var_str(ns, "v"), Ok(b));
    assert_eq!(heap.as_instance(ns).map(|t| t.len()), Ok(1));
}

#[test]
fn non_instance_scope_is_a_type_error() {
    let mut heap = Heap::new();
    let scope = heap.new_int(0);
    let name = heap.new_string("x");
    assert_eq!(
        heap.has_var(scope, name),
        Err(HeapError::TypeMismatch {
            expected: Kind::Instance,
            found: Kind::Int,
        })
    );
}

#[test]
#[should_panic(expected = "fatal: unresolved variable \"undefined\"")]
fn unresolved_variable_is_fatal() {
    let mut heap = Heap::new();
    let ns = heap.new_instance();
    let name = heap.new_string("undefined");
    let _ = heap.get_var(ns, name).or_fatal();
}

#[test]
#[should_panic(expected = "fatal: type mismatch: expected instance, found list")]
fn set_var_on_list_is_fatal() {
    let mut heap = Heap::new();
    let scope = heap.new_list(List::new());
    let name = heap.new_string("x");
    let v = heap.new_null();
    heap.set_var(scope, name, v).or_fatal();
}
