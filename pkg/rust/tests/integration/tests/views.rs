// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use ogview::{
	abi::constants::{ERROR, FROZEN_TRANSACTION_ID, NOTICE},
	prelude::*,
};
use ogview_testing::{
	ArrayBuilder, AttributeType, ForeignArena, HeapTupleBuilder, ListBuilder, TupleDescBuilder, Value, VarlenaBuilder,
	catch_engine_error, reports,
};
use ogview_tests_integration::runtime;

/// `pg_class`-like row: oid, relname, relnatts, relacl
const ROW: [AttributeType; 4] = [AttributeType::OID, AttributeType::TEXT, AttributeType::INT2, AttributeType::TEXT];

#[test]
fn test_catalog_row() {
	let rt = runtime();
	let arena = ForeignArena::new("CacheMemoryContext");
	let desc = unsafe { TupleDesc::from_ptr(&rt, TupleDescBuilder::from_types(&ROW).build(&arena)) };
	let ptr = HeapTupleBuilder::new(&ROW)
		.value(Value::Oid(1259))
		.value(Value::text("pg_class"))
		.value(Value::Int2(33))
		.null()
		.xmin(FROZEN_TRANSACTION_ID + 10)
		.frozen()
		.build(&arena);
	let tuple = unsafe { HeapTuple::from_ptr(&rt, ptr) };

	assert_eq!(tuple.field(1, &desc).map(Datum::as_oid), Some(1259));
	let relname = unsafe { Varlena::from_ptr(&rt, tuple.field(2, &desc).unwrap().as_ptr()) };
	assert!(relname.is_short());
	assert_eq!(relname.payload(), Some(&b"pg_class"[..]));
	assert_eq!(tuple.field(3, &desc).map(Datum::as_i16), Some(33));
	assert_eq!(tuple.get_field(4, &desc).1, true);
	assert_eq!(tuple.header().xmin(), FROZEN_TRANSACTION_ID);

	let owner = unsafe { rt.memory_context_of(tuple.header().as_ptr() as *const _) };
	assert_eq!(owner, arena.context());
	assert_eq!(unsafe { ForeignArena::name_of(owner) }, "CacheMemoryContext");
}

#[test]
fn test_array_column() {
	let rt = runtime();
	let arena = ForeignArena::new("ExprContext");
	let ptr = ArrayBuilder::int8()
		.int8_elements(&[Some(10), None, Some(30), Some(40), None, Some(60)])
		.dims(&[3, 2])
		.build(&arena);
	let arr = unsafe { Array::from_ptr(&rt, ptr) };

	assert_eq!(arr.dims(), &[3, 2]);
	assert_eq!(arr.lower_bounds(), &[1, 1]);
	assert_eq!(arr.element_count(), 6);

	let data = arr.data_ptr().as_ptr() as *const i64;
	let mut stored = 0;
	let mut values = Vec::new();
	for i in 0..arr.element_count() as usize {
		if arr.is_null(i) {
			values.push(None);
		} else {
			values.push(Some(unsafe { *data.add(stored) }));
			stored += 1;
		}
	}
	assert_eq!(values, [Some(10), None, Some(30), Some(40), None, Some(60)]);
}

#[test]
fn test_building_a_value_in_place() {
	let rt = runtime();
	let arena = ForeignArena::new("test");
	let payload = b"written by rust";
	let buf = arena.alloc(payload.len() + 4);
	let value = unsafe { Varlena::from_ptr(&rt, buf.as_ptr().cast()) };

	value.set_size(payload.len() + 4);
	unsafe { value.payload_ptr().as_ptr().copy_from_nonoverlapping(payload.as_ptr(), payload.len()) };
	assert_eq!(value.payload(), Some(&payload[..]));
	assert_eq!(value.try_set_size_compact(200), Err(ViewError::CompactSizeOutOfRange {
		size: 200,
		max: 127,
	}));

	let external = unsafe { Varlena::from_ptr(&rt, VarlenaBuilder::external(1 << 20).build(&arena)) };
	assert!(external.is_external());
	assert_eq!(external.payload(), None);
}

#[test]
fn test_list_of_relation_oids() {
	let rt = runtime();
	let arena = ForeignArena::new("test");
	let list = unsafe { List::from_ptr(&rt, ListBuilder::oids(&[1259, 1249, 1247]).build(&arena)) };

	assert_eq!(list.oids().collect::<Vec<_>>(), [1259, 1249, 1247]);
	assert_eq!(list.try_nth_oid(3), Err(ViewError::IndexOutOfBounds {
		index: 3,
		len: 3,
	}));
}

#[test]
fn test_reports_and_errors() {
	let rt = runtime();
	elog!(rt, Severity::Notice, "{} rows scanned", 3);

	let err = catch_engine_error(|| {
		ereport!(rt, Severity::Error, SqlState::DIVISION_BY_ZERO, "division by zero");
	})
	.unwrap_err();
	assert_eq!(err.level, ERROR);
	assert_eq!(err.code, SqlState::DIVISION_BY_ZERO.packed());

	let captured = reports();
	assert_eq!(captured.len(), 2);
	assert_eq!(captured[0].level, NOTICE);
	assert_eq!(captured[0].message, "3 rows scanned");
	assert_eq!(captured[1].level, ERROR);
	assert!(captured[1].context.as_deref().is_some_and(|context| context.starts_with(file!())));
}

#[test]
fn test_guarded_section_recovers() {
	let rt = runtime();
	let arena = ForeignArena::new("test");
	let bad = unsafe { Array::from_ptr(&rt, ArrayBuilder::int4().dims(&[-1, 4]).build(&arena)) };

	let result = unsafe { rt.try_guard(|| bad.element_count()) };
	let err = result.unwrap_err();
	assert_eq!(err.code, SqlState::PROGRAM_LIMIT_EXCEEDED);
	assert!(reports().is_empty());

	assert_eq!(unsafe { rt.guard(|| 1 + 1) }, 2);
}

#[test]
fn test_entry_point_hands_error_back() {
	let rt = runtime();
	let arena = ForeignArena::new("test");
	let bad = unsafe { Array::from_ptr(&rt, ArrayBuilder::int4().dims(&[-1, 4]).build(&arena)) };

	let err = catch_engine_error(|| rt.boundary(|| unsafe { rt.guard(|| bad.element_count()) })).unwrap_err();
	assert_eq!(err.level, ERROR);
	assert_eq!(err.code, SqlState::PROGRAM_LIMIT_EXCEEDED.packed());

	let captured = reports();
	assert_eq!(captured.len(), 1);
	assert_eq!(captured[0].level, ERROR);
}
