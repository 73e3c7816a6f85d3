use std::sync::Arc;

use super::Factory;
use crate::codec::{ErrorCategory, Kind, Platform, Repr, Scalar, Slot, Type, TyppoError, Value};

fn factory() -> Factory {
	Factory::make(
		vec![
			Type::base("uint8_t", 1, Repr::Unsigned),
			Type::base("int32_t", 4, Repr::Integer),
			Type::structure("Point", [Slot::new("x", "int32_t"), Slot::new("y", "int32_t")]),
			Type::constant("MAX_POINTS", 16_i64),
		],
		Platform::Arm,
	)
}

#[test]
fn create_builds_empty_value_of_matching_kind() {
	let factory = factory();
	let value = factory.create("Point").expect("Point creates");
	assert!(matches!(value, Value::Struct(_)));
	assert_eq!(value.offset(), 0);
	assert!(value.slot("x").is_none());

	let scalar = factory.create("int32_t").expect("int32_t creates");
	assert_eq!(scalar.scalar(), None);
}

#[test]
fn create_unknown_type_is_schema_error() {
	let err = factory().create("Nope").expect_err("type is unknown");
	assert!(matches!(&err, TyppoError::UnknownType { name } if name == "Nope"));
	assert_eq!(err.category(), ErrorCategory::Schema);
}

#[test]
fn create_const_is_unsupported() {
	let err = factory().create("MAX_POINTS").expect_err("constants have no storage");
	assert_eq!(err.category(), ErrorCategory::UnsupportedKind);
}

#[test]
fn resolve_returns_absent_for_unknown_names() {
	let factory = factory();
	assert!(factory.resolve("Nope").is_none());
	assert_eq!(factory.resolve("Point*").map(|ty| ty.kind), Some(Kind::Base));
}

#[test]
fn target_platform_can_change_after_creation() {
	let mut factory = factory();
	assert_eq!(factory.size_of("Point*").expect("size"), 4);
	factory.set_target_platform(Platform::X86_64);
	assert_eq!(factory.target_platform(), Platform::X86_64);
	assert_eq!(factory.size_of("Point*").expect("size"), 8);
}

#[test]
fn load_types_can_replace_registry() {
	let mut factory = factory();
	factory.load_types(vec![Type::base("int64_t", 8, Repr::Integer)], true);
	assert!(factory.resolve("Point").is_none());
	assert_eq!(factory.size_of("int64_t").expect("size"), 8);
}

#[test]
fn wrap_returns_same_typed_value_unchanged() {
	let factory = factory();
	let ty = factory.require("Point").expect("Point resolves");
	let mut point = factory.create("Point").expect("Point creates");
	point.set_slot(&factory, "x", 1).expect("x sets");
	point.set_offset(&factory, 40).expect("offset sets");

	let wrapped = factory.wrap(&ty, point.clone()).expect("wrap succeeds");
	assert_eq!(wrapped, point);
	assert_eq!(wrapped.offset(), 40);
}

#[test]
fn wrap_scalar_into_base_type() {
	let factory = factory();
	let ty = factory.require("uint8_t").expect("uint8_t resolves");
	let value = factory.wrap(&ty, 200_u8).expect("wrap succeeds");
	assert_eq!(value.scalar(), Some(Scalar::UInt(200)));
	assert!(Arc::ptr_eq(value.ty(), &ty));
}

#[test]
fn read_places_root_at_offset() {
	let factory = factory();
	let mut buf = vec![0_u8; 12];
	buf[4..8].copy_from_slice(&(-7_i32).to_le_bytes());
	buf[8..12].copy_from_slice(&9_i32.to_le_bytes());

	let point = factory.read("Point", &buf, 4).expect("read succeeds");
	assert_eq!(point.offset(), 4);
	assert_eq!(point.slot("x").and_then(Value::scalar), Some(Scalar::Int(-7)));
	assert_eq!(point.slot("y").and_then(Value::scalar), Some(Scalar::Int(9)));
	assert_eq!(point.slot("y").map(Value::offset), Some(8));
}

#[test]
fn constants_are_looked_up_by_name() {
	let factory = factory();
	assert_eq!(factory.get_const("MAX_POINTS").expect("constant exists"), Scalar::Int(16));
	let err = factory.get_const("Point").expect_err("structs are not constants");
	assert!(matches!(err, TyppoError::MissingConstValue { .. }));
}
