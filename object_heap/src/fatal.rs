// Copyright 2026 the Object Heap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fail-fast adapter for object-layer results.
//!
//! Interpreters that treat every object-layer error as a broken runtime invariant call
//! [`OrFatal::or_fatal`] at the use site. The panic message is `fatal: <error>`; building the
//! host with `panic = "abort"` turns it into process termination.

use crate::error::HeapError;

/// Converts a [`HeapError`] into a panic.
pub trait OrFatal<T> {
    /// Returns the success value or panics with the error's diagnostic.
    fn or_fatal(self) -> T;
}

impl<T> OrFatal<T> for Result<T, HeapError> {
    #[inline]
    #[track_caller]
    fn or_fatal(self) -> T {
        match self {
            Ok(v) => v,
            Err(err) => fatal(&err),
        }
    }
}

#[cold]
#[inline(never)]
#[track_caller]
fn fatal(err: &HeapError) -> ! {
    panic!("fatal: {err}")
}
