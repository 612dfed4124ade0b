// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! In-memory layout of engine structures
//!
//! Structures whose layout is part of the engine's on-disk or wire contract are spelled
//! out field by field. Everything else is opaque: ogview only ever holds pointers to it.

mod array;
mod opaque;
mod tuple;
mod varlena;

pub use array::*;
pub use opaque::*;
pub use tuple::*;
pub use varlena::*;
