// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! Engine constants

use crate::types::{Oid, TransactionId};

// ============================================================================
// Report severities (elog.h)
// ============================================================================

pub const DEBUG5: i32 = 10;
pub const DEBUG4: i32 = 11;
pub const DEBUG3: i32 = 12;
pub const DEBUG2: i32 = 13;
pub const DEBUG1: i32 = 14;
pub const LOG: i32 = 15;
pub const COMMERROR: i32 = 16;
pub const INFO: i32 = 17;
pub const NOTICE: i32 = 18;
pub const WARNING: i32 = 19;
pub const ERROR: i32 = 20;
pub const FATAL: i32 = 21;
pub const PANIC: i32 = 22;

// ============================================================================
// Identifiers
// ============================================================================

pub const INVALID_OID: Oid = 0;

pub const INVALID_TRANSACTION_ID: TransactionId = 0;
pub const BOOTSTRAP_TRANSACTION_ID: TransactionId = 1;
pub const FROZEN_TRANSACTION_ID: TransactionId = 2;

// ============================================================================
// Varlena headers
// ============================================================================

/// Size of the standard 4-byte header.
pub const VARHDRSZ: usize = 4;

/// Size of the 1-byte header.
pub const VARHDRSZ_SHORT: usize = 1;

/// Size of the header in front of an external (toast) pointer.
pub const VARHDRSZ_EXTERNAL: usize = 2;

/// Largest total size, header included, that fits the 1-byte header.
pub const VARATT_SHORT_MAX: usize = 0x7F;

/// Largest total size the 4-byte header can describe.
pub const VARSIZE_4B_MAX: usize = 0x3FFF_FFFF;

pub const VARTAG_INDIRECT: u8 = 1;
pub const VARTAG_EXPANDED_RO: u8 = 2;
pub const VARTAG_EXPANDED_RW: u8 = 3;
pub const VARTAG_ONDISK: u8 = 18;

// ============================================================================
// Heap tuples (htup_details.h)
// ============================================================================

pub const HEAP_HASNULL: u16 = 0x0001;
pub const HEAP_HASVARWIDTH: u16 = 0x0002;
pub const HEAP_HASEXTERNAL: u16 = 0x0004;
pub const HEAP_HASOID_OLD: u16 = 0x0008;
pub const HEAP_XMIN_COMMITTED: u16 = 0x0100;
pub const HEAP_XMIN_INVALID: u16 = 0x0200;
pub const HEAP_XMIN_FROZEN: u16 = HEAP_XMIN_COMMITTED | HEAP_XMIN_INVALID;

/// Number of attributes, stored in the low bits of `t_infomask2`.
pub const HEAP_NATTS_MASK: u16 = 0x07FF;

/// Offset of `t_bits` inside the tuple header.
pub const SIZEOF_HEAP_TUPLE_HEADER: usize = 23;

pub const MAX_HEAP_ATTRIBUTE_NUMBER: i32 = 1600;

// ============================================================================
// System attribute numbers (sysattr.h)
// ============================================================================

pub const SELF_ITEM_POINTER_ATTRIBUTE_NUMBER: i32 = -1;
pub const MIN_TRANSACTION_ID_ATTRIBUTE_NUMBER: i32 = -2;
pub const MIN_COMMAND_ID_ATTRIBUTE_NUMBER: i32 = -3;
pub const MAX_TRANSACTION_ID_ATTRIBUTE_NUMBER: i32 = -4;
pub const MAX_COMMAND_ID_ATTRIBUTE_NUMBER: i32 = -5;
pub const TABLE_OID_ATTRIBUTE_NUMBER: i32 = -6;

// ============================================================================
// Arrays (array.h)
// ============================================================================

pub const MAXDIM: i32 = 6;

/// Upper bound on the number of elements an array may hold.
pub const MAX_ARRAY_SIZE: usize = 0x3FFF_FFFF / core::mem::size_of::<usize>();

/// Alignment the engine applies to the start of array data.
pub const MAXIMUM_ALIGNOF: usize = 8;

// ============================================================================
// Boundary guard results
// ============================================================================

pub const FFI_OK: i32 = 0;
pub const FFI_CAUGHT_ERROR: i32 = 1;

/// Size of the message buffer of an error frame, terminating NUL included
pub const ERROR_FRAME_MESSAGE_LEN: usize = 512;
