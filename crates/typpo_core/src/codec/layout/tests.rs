use super::{FieldLayout, round_up};
use crate::codec::{ErrorCategory, Factory, FactoryOptions, Platform, Repr, Slot, Type, TyppoError};

fn factory(platform: Platform) -> Factory {
	Factory::make(
		vec![
			Type::base("int8_t", 1, Repr::Integer),
			Type::base("int16_t", 2, Repr::Integer),
			Type::base("int32_t", 4, Repr::Integer),
			Type::base("float", 4, Repr::Floating),
			Type::native("word", Repr::Unsigned),
			Type::structure(
				"Mixed",
				[Slot::new("a", "int32_t"), Slot::new("b", "int8_t"), Slot::new("c", "int32_t")],
			),
			Type::structure(
				"PackedMixed",
				[Slot::new("a", "int32_t"), Slot::new("b", "int8_t"), Slot::new("c", "int32_t")],
			)
			.packed(),
			Type::union("Number", [Slot::new("i", "int32_t"), Slot::new("f", "float")]),
			Type::union("Wide", [Slot::new("small", "int8_t"), Slot::new("mixed", "Mixed")]),
			Type::array("Triple", "int16_t", Some(3)),
			Type::array("Open", "int16_t", None),
		],
		platform,
	)
}

#[test]
fn round_up_to_multiples() {
	assert_eq!(round_up(5, 4), Some(8));
	assert_eq!(round_up(8, 4), Some(8));
	assert_eq!(round_up(3, 0), Some(3));
	assert_eq!(round_up(0, 12), Some(0));
	assert_eq!(round_up(usize::MAX, 4), None);
}

#[test]
fn unpacked_struct_aligns_fields_to_their_size() {
	let factory = factory(Platform::Arm);
	assert_eq!(factory.size_of("Mixed").expect("size"), 12);
	let offsets: Vec<usize> = factory.field_layout("Mixed").expect("layout").iter().map(|field| field.offset).collect();
	assert_eq!(offsets, vec![0, 4, 8]);
}

#[test]
fn packed_struct_has_no_gaps() {
	let factory = factory(Platform::Arm);
	assert_eq!(factory.size_of("PackedMixed").expect("size"), 9);
	let offsets: Vec<usize> = factory.field_layout("PackedMixed").expect("layout").iter().map(|field| field.offset).collect();
	assert_eq!(offsets, vec![0, 4, 5]);
}

#[test]
fn union_is_as_large_as_its_largest_slot() {
	let factory = factory(Platform::Arm);
	assert_eq!(factory.size_of("Number").expect("size"), 4);
	assert_eq!(factory.size_of("Wide").expect("size"), 12);
	assert!(factory.field_layout("Wide").expect("layout").iter().all(|field| field.offset == 0));
}

#[test]
fn pointer_size_follows_platform() {
	assert_eq!(factory(Platform::Arm).size_of("Mixed*").expect("size"), 4);
	assert_eq!(factory(Platform::Js).size_of("Mixed*").expect("size"), 4);
	assert_eq!(factory(Platform::X86_64).size_of("Mixed*").expect("size"), 8);
	assert_eq!(factory(Platform::X86_64).size_of("word").expect("size"), 8);
}

#[test]
fn array_names_and_records_multiply_element_size() {
	let factory = factory(Platform::Arm);
	assert_eq!(factory.size_of("int32_t[5]").expect("size"), 20);
	assert_eq!(factory.size_of("int32_t[]").expect("size"), 0);
	assert_eq!(factory.size_of("int8_t[2][3]").expect("size"), 6);
	assert_eq!(factory.size_of("Triple").expect("size"), 6);
	assert_eq!(factory.size_of("Open").expect("size"), 0);
}

#[test]
fn array_layout_uses_element_stride() {
	let factory = factory(Platform::Arm);
	let layout = factory.field_layout("Triple").expect("layout");
	assert_eq!(
		layout[2],
		FieldLayout {
			name: "[2]".to_owned(),
			type_name: "int16_t".to_owned(),
			offset: 4,
			size: 2,
		}
	);
}

#[test]
fn struct_slot_alignment_uses_whole_slot_size() {
	let mut factory = factory(Platform::X86_64);
	factory.load_types(vec![Type::structure("Outer", [Slot::new("tag", "int8_t"), Slot::new("inner", "Mixed")])], false);
	assert_eq!(factory.size_of("Outer").expect("size"), 24);
	factory.load_types(vec![Type::structure("Linked", [Slot::new("tag", "int8_t"), Slot::new("next", "Linked*")])], false);
	assert_eq!(factory.size_of("Linked").expect("size"), 16);
}

#[test]
fn unknown_slot_type_fails_at_lookup() {
	let mut factory = factory(Platform::Arm);
	factory.load_types(vec![Type::structure("Broken", [Slot::new("x", "Missing")])], false);
	let err = factory.size_of("Broken").expect_err("slot type is unknown");
	assert!(matches!(&err, TyppoError::UnknownType { name } if name == "Missing"));
	assert_eq!(err.category(), ErrorCategory::Schema);
}

#[test]
fn scalar_without_size_is_unsupported() {
	let mut factory = factory(Platform::Arm);
	let mut ty = Type::base("mystery", 1, Repr::Integer);
	ty.size = None;
	factory.load_types(vec![ty, Type::constant("LIMIT", 3_i64)], false);
	for name in ["mystery", "LIMIT"] {
		let err = factory.size_of(name).expect_err("kind has no computed size");
		assert_eq!(err.category(), ErrorCategory::UnsupportedKind);
	}
}

#[test]
fn self_containing_struct_hits_depth_limit() {
	let options = FactoryOptions {
		max_depth: 8,
		..FactoryOptions::default()
	};
	let factory = Factory::with_options(vec![Type::structure("Loop", [Slot::new("again", "Loop")])], Platform::Arm, options);
	let err = factory.size_of("Loop").expect_err("recursion is bounded");
	assert!(matches!(err, TyppoError::DepthExceeded { max_depth: 8, .. }));
}
