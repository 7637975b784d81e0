// Copyright 2026 the Object Heap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use object_heap::trace::ScopeKind;
use std::string::String;

/// Optional label resolver for profiling scopes.
///
/// Return `None` to fall back to the default labels.
pub trait LabelResolver {
    /// Resolve a label for a collector phase.
    fn phase_label(&mut self, _kind: ScopeKind) -> Option<String> {
        None
    }
}

/// Default resolver that keeps the stable phase labels.
#[derive(Default, Debug)]
pub struct DefaultLabelResolver;

impl LabelResolver for DefaultLabelResolver {}

/// Resolver that prefixes every phase label with a heap name.
///
/// Useful when one process runs several VMs, each with its own heap.
#[derive(Debug)]
pub struct NamedHeapResolver {
    name: String,
}

impl NamedHeapResolver {
    /// Create a resolver for the heap called `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl LabelResolver for NamedHeapResolver {
    fn phase_label(&mut self, kind: ScopeKind) -> Option<String> {
        Some(format!("{}/{}", self.name, default_phase_label(kind)))
    }
}

pub(crate) fn default_phase_label(kind: ScopeKind) -> String {
    match kind {
        ScopeKind::Mark { roots } => format!("gc:mark roots={roots}"),
        ScopeKind::Sweep => String::from("gc:sweep"),
    }
}
