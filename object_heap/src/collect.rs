// Copyright 2026 the Object Heap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Two-phase mark-then-sweep collection over the heap registry.
//!
//! This is the cycle-safe reclamation path. It frees every kind, including the callables and
//! instance table contents that [`Heap::destroy`] deliberately leaves alone.

use alloc::vec::Vec;

use crate::heap::Heap;
use crate::mark::MarkValue;
use crate::object::{Kind, ObjRef};
use crate::trace::{ScopeKind, TraceMask, TraceSink};

/// Summary of one [`Heap::collect`] call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CollectStats {
    /// Objects reachable from the roots.
    pub marked: usize,
    /// Objects reclaimed by the sweep.
    pub freed: usize,
    /// Objects still registered afterwards.
    pub live: usize,
}

struct Tracer<'a> {
    sink: Option<&'a mut dyn TraceSink>,
    mask: TraceMask,
}

impl<'a> Tracer<'a> {
    fn new(sink: Option<&'a mut dyn TraceSink>) -> Self {
        let mask = sink.as_ref().map_or(TraceMask::NONE, |s| s.mask());
        Self { sink, mask }
    }

    fn sink_for(&mut self, bit: TraceMask) -> Option<&mut (dyn TraceSink + 'a)> {
        if !self.mask.contains(bit) {
            return None;
        }
        self.sink.as_deref_mut()
    }

    fn enter(&mut self, kind: ScopeKind, live: usize) {
        if let Some(s) = self.sink_for(TraceMask::PHASE) {
            s.scope_enter(kind, live);
        }
    }

    fn exit(&mut self, kind: ScopeKind, live: usize) {
        if let Some(s) = self.sink_for(TraceMask::PHASE) {
            s.scope_exit(kind, live);
        }
    }

    fn freed(&mut self, obj: ObjRef, kind: Kind, size_hint: usize) {
        if let Some(s) = self.sink_for(TraceMask::FREE) {
            s.freed(obj, kind, size_hint);
        }
    }
}

impl Heap {
    /// Returns `true` once enough objects were allocated since the last collection.
    pub fn should_collect(&self) -> bool {
        self.allocations_since_collect >= self.config.collect_threshold
    }

    /// Frees every object not reachable from `roots`.
    ///
    /// Marks are cleared before the mark phase and again after the sweep, so the heap leaves a
    /// collection with every survivor unmarked.
    pub fn collect(
        &mut self,
        roots: impl IntoIterator<Item = ObjRef>,
        sink: Option<&mut dyn TraceSink>,
    ) -> CollectStats {
        let mut tracer = Tracer::new(sink);
        let roots: Vec<ObjRef> = roots.into_iter().collect();

        let mark_scope = ScopeKind::Mark { roots: roots.len() };
        tracer.enter(mark_scope, self.live());
        self.clear_marks();
        let marked = self.mark_roots(roots, MarkValue::DEFAULT);
        tracer.exit(mark_scope, self.live());

        tracer.enter(ScopeKind::Sweep, self.live());
        let mut freed = 0;
        for obj in self.slot_handles() {
            let Ok(o) = self.get(obj) else {
                continue;
            };
            if o.mark() != 0 {
                continue;
            }
            let (kind, size_hint) = (o.kind(), o.size_hint());
            if self.unregister(obj).is_some() {
                freed += 1;
                tracer.freed(obj, kind, size_hint);
            }
        }
        self.clear_marks();
        tracer.exit(ScopeKind::Sweep, self.live());

        self.stats.collections += 1;
        self.allocations_since_collect = 0;

        CollectStats {
            marked,
            freed,
            live: self.live(),
        }
    }
}
