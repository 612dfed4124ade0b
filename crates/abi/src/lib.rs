// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! C ABI definitions for the ogview foreign memory view layer
//!
//! This crate describes the engine side of the boundary: the in-memory layout of the
//! engine structures ogview looks at, the scalar types and constants the engine uses,
//! and the [`RuntimeCallbacks`](callbacks::RuntimeCallbacks) table through which every
//! macro and inline function of the engine is reached.
//!
//! Nothing in here interprets engine memory. Interpretation belongs to the engine and
//! is reached through the callbacks.

// #![cfg_attr(not(debug_assertions), deny(warnings))]

pub mod callbacks;
pub mod constants;
pub mod layout;
#[cfg(feature = "cshim")]
pub mod symbols;
pub mod types;
