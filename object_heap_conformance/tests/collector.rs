// Copyright 2026 the Object Heap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use object_heap::trace::{ScopeKind, TraceMask, TraceSink};
use object_heap::{FuncId, Heap, HeapConfig, Kind, List, MarkValue, NativeHandle, ObjRef};

#[test]
fn marking_twice_matches_marking_once() {
    let mut heap = Heap::new();
    let ns = heap.new_instance();
    let l = heap.new_list(List::new());
    let a = heap.new_int(1);
    heap.list_push(l, a).unwrap();
    heap.set_var_str(ns, "l", l).unwrap();
    heap.set_var_str(ns, "ns", ns).unwrap();
    heap.new_bool(true);

    let m = MarkValue::new(9).unwrap();
    heap.mark(ns, m);
    let once: Vec<(ObjRef, u8)> = heap.iter().map(|(r, o)| (r, o.mark())).collect();
    heap.mark(ns, m);
    let twice: Vec<(ObjRef, u8)> = heap.iter().map(|(r, o)| (r, o.mark())).collect();
    assert_eq!(once, twice);
    assert_eq!(once.iter().filter(|(_, m)| *m == 9).count(), 3);
}

#[test]
fn marking_terminates_on_mutual_recursion() {
    let mut heap = Heap::new();
    let a = heap.new_instance();
    let b = heap.new_list(List::new());
    heap.set_var_str(a, "b", b).unwrap();
    heap.list_push(b, a).unwrap();
    heap.list_push(b, b).unwrap();
    assert_eq!(heap.mark(a, MarkValue::DEFAULT), 2);
}

#[test]
fn destroy_then_collect_reclaims_everything() {
    let mut heap = Heap::new();
    let ns = heap.new_instance();
    let f = heap.new_func();
    heap.attach_func_body(f, FuncId(0)).unwrap();
    let nums = heap.new_list(List::new());
    for i in 0..4 {
        let n = heap.new_int(i);
        heap.list_push(nums, n).unwrap();
    }
    heap.set_var_str(ns, "f", f).unwrap();
    heap.set_var_str(ns, "nums", nums).unwrap();

    // The instance goes, its bindings stay until a sweep.
    assert_eq!(heap.destroy(ns), Ok(1));
    assert_eq!(heap.live(), 6);

    // Lists own their elements.
    assert_eq!(heap.destroy(nums), Ok(5));
    assert_eq!(heap.destroy(f), Ok(0));
    assert_eq!(heap.live(), 1);

    let stats = heap.collect(Vec::<ObjRef>::new(), None);
    assert_eq!(stats.freed, 1);
    assert_eq!(heap.live(), 0);
    assert_eq!(heap.stats().freed, 7);
}

#[test]
fn survivors_can_be_collected_repeatedly() {
    let mut heap = Heap::with_config(HeapConfig {
        collect_threshold: 3,
        ..HeapConfig::default()
    });
    let root = heap.new_instance();
    for round in 0..5 {
        let v = heap.new_int(round);
        heap.set_var_str(root, "latest", v).unwrap();
        heap.new_string("scratch");
        heap.new_native_struct(NativeHandle(7));
        assert!(heap.should_collect());
        let stats = heap.collect([root], None);
        assert_eq!(stats.live, 2);
        assert!(!heap.is_marked(root));
    }
    let latest = heap.get_var_str(root, "latest").unwrap();
    assert_eq!(heap.as_int(latest), Ok(4));
    assert_eq!(heap.stats().collections, 5);
}

#[derive(Default)]
struct KindCounter {
    phases: usize,
    freed: Vec<Kind>,
}

impl TraceSink for KindCounter {
    fn mask(&self) -> TraceMask {
        TraceMask::PHASE | TraceMask::FREE
    }

    fn scope_exit(&mut self, kind: ScopeKind, _live: usize) {
        if matches!(kind, ScopeKind::Mark { roots: 1 } | ScopeKind::Sweep) {
            self.phases += 1;
        }
    }

    fn freed(&mut self, _obj: ObjRef, kind: Kind, _size_hint: usize) {
        self.freed.push(kind);
    }
}

#[test]
fn trace_sink_observes_sweep() {
    let mut heap = Heap::new();
    let root = heap.new_null();
    heap.new_func();
    heap.new_char('c');

    let mut sink = KindCounter::default();
    heap.collect([root], Some(&mut sink));
    assert_eq!(sink.phases, 2);
    sink.freed.sort_by_key(|k| k.name());
    assert_eq!(sink.freed, vec![Kind::Char, Kind::Func]);
}
