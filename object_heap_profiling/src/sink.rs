// Copyright 2026 the Object Heap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::resolver::{DefaultLabelResolver, LabelResolver, default_phase_label};
use object_heap::trace::{ScopeKind, TraceMask, TraceSink};
use object_heap::{Kind, ObjRef};
use std::string::String;
use std::vec::Vec;

type BackendGuard = tracy_client::Span;

struct ScopeEntry {
    kind: ScopeKind,
    // Keep the label alive for backends that may borrow it.
    label: String,
    guard: Option<BackendGuard>,
}

/// A `TraceSink` that emits Tracy scopes for collector phases via `tracy-client`.
///
/// Each sweep also reports how many objects and bytes (by size hint) it reclaimed.
pub struct ProfilingTraceSink<R = DefaultLabelResolver> {
    resolver: R,
    stack: Vec<ScopeEntry>,
    freed_objects: usize,
    freed_bytes: usize,
}

impl ProfilingTraceSink<DefaultLabelResolver> {
    /// Create a new sink with the default phase labels.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<R: LabelResolver> ProfilingTraceSink<R> {
    /// Create a new sink with a custom label resolver.
    #[must_use]
    pub fn with_resolver(resolver: R) -> Self {
        Self {
            resolver,
            stack: Vec::new(),
            freed_objects: 0,
            freed_bytes: 0,
        }
    }

    fn on_scope_enter(&mut self, kind: ScopeKind) {
        if kind == ScopeKind::Sweep {
            self.freed_objects = 0;
            self.freed_bytes = 0;
        }
        let label = self
            .resolver
            .phase_label(kind)
            .unwrap_or_else(|| default_phase_label(kind));
        let guard = self.start_scope(kind, &label);
        self.stack.push(ScopeEntry { kind, label, guard });
    }

    fn on_scope_exit(&mut self, kind: ScopeKind, live: usize) {
        if kind == ScopeKind::Sweep {
            self.report_sweep(live);
        }
        if let Some(top) = self.stack.last()
            && top.kind == kind
        {
            if let Some(entry) = self.stack.pop() {
                let ScopeEntry {
                    label: _label,
                    guard: _guard,
                    ..
                } = entry;
                let _ = (_label, _guard);
            }
            return;
        }
        // If the stack got out of sync, drop any active scopes to avoid leaking.
        self.drop_active_scopes();
    }

    fn start_scope(&self, kind: ScopeKind, label: &str) -> Option<BackendGuard> {
        let function_name = match kind {
            ScopeKind::Mark { .. } => "object_heap.mark",
            ScopeKind::Sweep => "object_heap.sweep",
        };
        let client = tracy_client::Client::running()?;
        Some(client.span_alloc(Some(label), function_name, "object_heap", 0, 0))
    }

    fn report_sweep(&self, live: usize) {
        let Some(client) = tracy_client::Client::running() else {
            return;
        };
        let message = format!(
            "swept {} objects ({} bytes), {live} live",
            self.freed_objects, self.freed_bytes
        );
        client.message(&message, 0);
    }

    // Drop in LIFO order so nested spans close inner-to-outer.
    fn drop_active_scopes(&mut self) {
        while let Some(entry) = self.stack.pop() {
            let ScopeEntry {
                label: _label,
                guard: _guard,
                ..
            } = entry;
            let _ = (_label, _guard);
        }
    }
}

impl<R: LabelResolver> TraceSink for ProfilingTraceSink<R> {
    fn mask(&self) -> TraceMask {
        TraceMask::ALL
    }

    fn scope_enter(&mut self, kind: ScopeKind, _live: usize) {
        self.on_scope_enter(kind);
    }

    fn scope_exit(&mut self, kind: ScopeKind, live: usize) {
        self.on_scope_exit(kind, live);
    }

    fn freed(&mut self, _obj: ObjRef, _kind: Kind, size_hint: usize) {
        self.freed_objects += 1;
        self.freed_bytes += size_hint;
    }
}

impl<R> Default for ProfilingTraceSink<R>
where
    R: LabelResolver + Default,
{
    fn default() -> Self {
        Self::with_resolver(R::default())
    }
}

impl<R> std::fmt::Debug for ProfilingTraceSink<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProfilingTraceSink")
            .field("stack_depth", &self.stack.len())
            .field("freed_objects", &self.freed_objects)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::ProfilingTraceSink;
    use object_heap::Heap;
    use object_heap::trace::ScopeKind;

    #[test]
    fn start_scope_without_tracy_client_does_not_panic() {
        let sink = ProfilingTraceSink::new();
        let _guard = sink.start_scope(ScopeKind::Sweep, "test");
    }

    #[test]
    fn collect_through_sink_balances_scopes() {
        let mut heap = Heap::new();
        let root = heap.new_instance();
        heap.new_string("garbage");

        let mut sink = ProfilingTraceSink::new();
        let stats = heap.collect([root], Some(&mut sink));
        assert_eq!(stats.freed, 1);
        assert!(sink.stack.is_empty(), "every phase scope must be closed");
        assert_eq!(sink.freed_objects, 1);
        assert_eq!(sink.freed_bytes, "garbage".len() + 1);
    }
}
