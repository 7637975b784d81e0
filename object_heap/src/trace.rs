// Copyright 2026 the Object Heap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Collection tracing hooks.
//!
//! The heap itself does no logging. Embedders that want visibility into collections pass a
//! [`TraceSink`] to [`Heap::collect`](crate::Heap::collect); the sink's [`TraceMask`] selects
//! which callbacks fire.

use crate::object::{Kind, ObjRef};

/// Bitmask selecting which trace callbacks a sink wants.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TraceMask(u8);

impl TraceMask {
    /// No callbacks.
    pub const NONE: Self = Self(0);
    /// Phase scopes ([`ScopeKind::Mark`], [`ScopeKind::Sweep`]).
    pub const PHASE: Self = Self(1 << 0);
    /// One [`TraceSink::freed`] call per reclaimed object.
    pub const FREE: Self = Self(1 << 1);
    /// All callbacks.
    pub const ALL: Self = Self(Self::PHASE.0 | Self::FREE.0);

    /// Returns `true` if this mask contains every bit in `other`.
    #[must_use]
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }
}

impl core::ops::BitOr for TraceMask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// A collector phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScopeKind {
    /// Propagating marks from the root set.
    Mark {
        /// Number of roots supplied to the collection.
        roots: usize,
    },
    /// Freeing unmarked objects.
    Sweep,
}

/// Receiver for collection events.
///
/// Only [`TraceSink::mask`] is required; the event callbacks default to doing nothing.
pub trait TraceSink {
    /// Which callbacks this sink wants.
    fn mask(&self) -> TraceMask;

    /// A phase is starting. `live` is the number of registered objects at that point.
    fn scope_enter(&mut self, _kind: ScopeKind, _live: usize) {}

    /// A phase finished. `live` is the number of registered objects at that point.
    fn scope_exit(&mut self, _kind: ScopeKind, _live: usize) {}

    /// An unreachable object was reclaimed by the sweep.
    fn freed(&mut self, _obj: ObjRef, _kind: Kind, _size_hint: usize) {}
}
