// Copyright 2026 the Object Heap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Runtime object model for `object_heap`.
//!
//! Every language-level value is an [`Object`] living in a [`Heap`](crate::Heap) slot and is
//! referred to by an [`ObjRef`]. Scalar payloads are stored inline; Instance and List payloads own
//! their container, while the objects *inside* those containers are themselves heap objects
//! referenced by handle.

use alloc::string::String;
use core::fmt;
use core::mem::size_of;

use crate::storage::{List, Table};

/// A generational handle to an object registered in a [`Heap`](crate::Heap).
///
/// Handles are `Copy` and compare by identity: two handles are equal exactly when they name the
/// same allocation. Once the object is freed its handle goes stale, and a later allocation that
/// reuses the slot gets a different generation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub struct ObjRef {
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

impl ObjRef {
    /// Returns the registry slot index backing this handle.
    #[inline]
    pub const fn index(self) -> u32 {
        self.index
    }

    /// Returns the slot generation this handle was issued for.
    #[inline]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Display for ObjRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}v{}", self.index, self.generation)
    }
}

/// An opaque handle to host-owned data (native functions and native structures).
///
/// The heap never dereferences or frees what this handle names.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct NativeHandle(pub u64);

/// Identifier of a compiled function body attached to a `Func` object.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct FuncId(pub u32);

/// The kind of an [`Object`].
///
/// The set is closed; an object's kind is fixed when it is constructed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    /// The null value.
    Null,
    /// A namespace/record backed by a string-keyed table.
    Instance,
    /// A single character.
    Char,
    /// Signed integer.
    Int,
    /// 64-bit float.
    Double,
    /// Owned string.
    String,
    /// Boolean.
    Bool,
    /// Ordered list of objects.
    List,
    /// Bytecode function.
    Func,
    /// Host-provided function.
    NativeFunc,
    /// Host-provided opaque structure.
    NativeStruct,
}

impl Kind {
    /// Returns a stable lowercase name for diagnostics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Instance => "instance",
            Self::Char => "char",
            Self::Int => "int",
            Self::Double => "double",
            Self::String => "string",
            Self::Bool => "bool",
            Self::List => "list",
            Self::Func => "func",
            Self::NativeFunc => "native_func",
            Self::NativeStruct => "native_struct",
        }
    }

    /// Returns `true` for kinds that are shared rather than copied or freed by the object layer.
    #[inline]
    #[must_use]
    pub const fn is_callable(self) -> bool {
        matches!(self, Self::Func | Self::NativeFunc)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Kind-dependent object payload.
#[derive(Clone, Debug, PartialEq)]
pub enum Payload {
    /// No payload.
    Null,
    /// Owned backing table. Mapped values are heap objects.
    Instance(Table),
    /// Inline character.
    Char(char),
    /// Inline integer.
    Int(i64),
    /// Inline float.
    Double(f64),
    /// Exclusively owned string buffer.
    Str(String),
    /// Inline boolean.
    Bool(bool),
    /// Owned element sequence. Elements are heap objects.
    List(List),
    /// Function body, attached after construction by a compiler.
    Func(Option<FuncId>),
    /// Host function handle (not owned).
    NativeFunc(NativeHandle),
    /// Host structure handle (not owned).
    NativeStruct(NativeHandle),
}

impl Payload {
    /// Returns the kind selected by this payload.
    #[must_use]
    pub const fn kind(&self) -> Kind {
        match self {
            Self::Null => Kind::Null,
            Self::Instance(_) => Kind::Instance,
            Self::Char(_) => Kind::Char,
            Self::Int(_) => Kind::Int,
            Self::Double(_) => Kind::Double,
            Self::Str(_) => Kind::String,
            Self::Bool(_) => Kind::Bool,
            Self::List(_) => Kind::List,
            Self::Func(_) => Kind::Func,
            Self::NativeFunc(_) => Kind::NativeFunc,
            Self::NativeStruct(_) => Kind::NativeStruct,
        }
    }

    /// Advisory payload size in bytes.
    ///
    /// Strings count one extra byte for the terminator of the classic buffer layout.
    #[must_use]
    pub fn size_hint(&self) -> usize {
        match self {
            Self::Null | Self::Func(_) => 0,
            Self::Instance(_) => size_of::<Table>(),
            Self::Char(_) => size_of::<char>(),
            Self::Int(_) => size_of::<i64>(),
            Self::Double(_) => size_of::<f64>(),
            Self::Str(s) => s.len() + 1,
            Self::Bool(_) => size_of::<bool>(),
            Self::List(_) => size_of::<List>(),
            Self::NativeFunc(_) | Self::NativeStruct(_) => size_of::<NativeHandle>(),
        }
    }
}

/// Inline scalar written into an existing object with [`Heap::set_scalar`](crate::Heap::set_scalar).
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Scalar {
    /// Character.
    Char(char),
    /// Integer.
    Int(i64),
    /// Float.
    Double(f64),
    /// Boolean.
    Bool(bool),
}

impl Scalar {
    /// Returns the object kind this scalar is stored as.
    #[must_use]
    pub const fn kind(self) -> Kind {
        match self {
            Self::Char(_) => Kind::Char,
            Self::Int(_) => Kind::Int,
            Self::Double(_) => Kind::Double,
            Self::Bool(_) => Kind::Bool,
        }
    }

    pub(crate) fn into_payload(self) -> Payload {
        match self {
            Self::Char(c) => Payload::Char(c),
            Self::Int(i) => Payload::Int(i),
            Self::Double(d) => Payload::Double(d),
            Self::Bool(b) => Payload::Bool(b),
        }
    }
}

/// A runtime object.
#[derive(Clone, Debug, PartialEq)]
pub struct Object {
    payload: Payload,
    pub(crate) mark: u8,
    size_hint: usize,
}

impl Object {
    pub(crate) fn new(payload: Payload) -> Self {
        let size_hint = payload.size_hint();
        Self {
            payload,
            mark: 0,
            size_hint,
        }
    }

    /// Returns the object's kind.
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> Kind {
        self.payload.kind()
    }

    /// Returns the reachability mark (0 means unmarked).
    #[inline]
    #[must_use]
    pub const fn mark(&self) -> u8 {
        self.mark
    }

    /// Returns the advisory payload size in bytes.
    #[inline]
    #[must_use]
    pub const fn size_hint(&self) -> usize {
        self.size_hint
    }

    /// Returns the payload.
    #[inline]
    #[must_use]
    pub const fn payload(&self) -> &Payload {
        &self.payload
    }

    pub(crate) fn into_payload(self) -> Payload {
        self.payload
    }

    /// Mutable payload access for the crate.
    ///
    /// Callers must not replace the payload with a different variant.
    #[inline]
    pub(crate) fn payload_mut(&mut self) -> &mut Payload {
        &mut self.payload
    }

    /// Overwrites a payload with one of the same kind and refreshes the size hint.
    pub(crate) fn replace_payload(&mut self, payload: Payload) {
        debug_assert_eq!(
            self.kind(),
            payload.kind(),
            "object kind must not change after construction"
        );
        self.size_hint = payload.size_hint();
        self.payload = payload;
    }

    /// Bitwise-style duplicate used by the clone engine for leaf kinds.
    pub(crate) fn duplicate_leaf(&self) -> Self {
        Self {
            payload: self.payload.clone(),
            mark: self.mark,
            size_hint: self.size_hint,
        }
    }
}
