// Copyright 2026 the Object Heap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Heap errors.

use alloc::boxed::Box;
use core::fmt;

use crate::object::{Kind, ObjRef};

/// An object-layer error.
///
/// Every variant reports a violated runtime invariant: the layer above is expected to have
/// validated types already. Hosts that want the classic fail-fast behaviour can route results
/// through [`OrFatal`](crate::OrFatal).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HeapError {
    /// The handle does not name a live object.
    BadHandle,
    /// The object's kind is not accepted by the operation.
    TypeMismatch {
        /// Kind the operation requires.
        expected: Kind,
        /// Kind actually found.
        found: Kind,
    },
    /// `get_var` on a name that is not bound in the namespace.
    UnresolvedVariable {
        /// The missing name.
        name: Box<str>,
    },
    /// List index out of bounds.
    IndexOutOfBounds {
        /// Requested index.
        index: usize,
        /// List length.
        len: usize,
    },
    /// [`Heap::clone_object`](crate::Heap::clone_object) reached a container that is already
    /// being copied further up the path.
    CyclicGraph {
        /// The container that closes the cycle.
        at: ObjRef,
    },
}

impl fmt::Display for HeapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadHandle => write!(f, "object handle is stale or out of bounds"),
            Self::TypeMismatch { expected, found } => {
                write!(f, "type mismatch: expected {expected}, found {found}")
            }
            Self::UnresolvedVariable { name } => write!(f, "unresolved variable \"{name}\""),
            Self::IndexOutOfBounds { index, len } => {
                write!(f, "index out of bounds: index={index} len={len}")
            }
            Self::CyclicGraph { at } => write!(f, "cannot clone cyclic object graph through {at}"),
        }
    }
}

impl core::error::Error for HeapError {}
