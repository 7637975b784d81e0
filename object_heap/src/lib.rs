// Copyright 2026 the Object Heap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `object_heap`: the value/object layer of a small embeddable scripting runtime.
//!
//! A [`Heap`] is a per-VM allocation registry. It owns every runtime [`Object`] (null, instances,
//! scalars, strings, lists, functions and host handles) and offers the graph operations an
//! interpreter needs:
//!
//! - construction and checked access ([`Heap::new_int`], [`Heap::as_int`], ...),
//! - reachability marking ([`Heap::mark`]),
//! - explicit destruction of locally owned objects ([`Heap::destroy`]),
//! - deep copy with shared callables ([`Heap::clone_object`]),
//! - namespace variables on instances ([`Heap::set_var`], [`Heap::get_var`], [`Heap::has_var`]),
//! - cycle-safe mark-then-sweep collection ([`Heap::collect`]).
//!
//! Every operation reports violated invariants as a [`HeapError`]. Interpreters that prefer to
//! stop on the first violation use [`OrFatal::or_fatal`].
//!
//! ## Example
//! ```
//! use object_heap::{Heap, OrFatal};
//!
//! let mut heap = Heap::new();
//! let ns = heap.new_instance();
//! let name = heap.new_string("count");
//! let zero = heap.new_int(0);
//! heap.set_var(ns, name, zero).or_fatal();
//!
//! let count = heap.get_var(ns, name).or_fatal();
//! assert_eq!(heap.as_int(count), Ok(0));
//!
//! // Bindings copy the key, so the `name` string is garbage after the lookup.
//! let stats = heap.collect([ns], None);
//! assert_eq!(stats.live, 2);
//! ```
//!
//! The crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

mod clone;
mod collect;
mod config;
mod error;
mod fatal;
mod heap;
mod mark;
mod namespace;
mod object;
mod reclaim;
mod storage;
pub mod trace;

pub use collect::CollectStats;
pub use config::HeapConfig;
pub use error::HeapError;
pub use fatal::OrFatal;
pub use heap::{Heap, HeapStats};
pub use mark::MarkValue;
pub use object::{FuncId, Kind, NativeHandle, ObjRef, Object, Payload, Scalar};
pub use storage::{List, Table};
