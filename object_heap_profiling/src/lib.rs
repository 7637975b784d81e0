// Copyright 2026 the Object Heap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Profiling adapters for `object_heap` collections (currently Tracy).
//!
//! This crate is `std`-only and keeps `object_heap` itself free of profiling dependencies.
//! It listens for collector phase callbacks and emits matching profiling scopes.
//!
//! ## Backend
//! This crate currently supports the Tracy backend via `tracy-client`.
//!
//! ## Example
//! ```ignore
//! use object_heap_profiling::ProfilingTraceSink;
//!
//! let mut sink = ProfilingTraceSink::new();
//! let stats = heap.collect(roots, Some(&mut sink));
//! ```

mod resolver;
mod sink;

pub use resolver::{DefaultLabelResolver, LabelResolver, NamedHeapResolver};
pub use sink::ProfilingTraceSink;
