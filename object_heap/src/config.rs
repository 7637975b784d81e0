// Copyright 2026 the Object Heap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Heap configuration.

/// Tunables for a [`Heap`](crate::Heap).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct HeapConfig {
    /// Allocations since the last collection after which [`Heap::should_collect`] reports `true`.
    ///
    /// [`Heap::should_collect`]: crate::Heap::should_collect
    pub collect_threshold: usize,
    /// Number of registry slots reserved up front.
    pub initial_capacity: usize,
}

impl Default for HeapConfig {
    fn default() -> Self {
        Self {
            collect_threshold: 4096,
            initial_capacity: 256,
        }
    }
}
