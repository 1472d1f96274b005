use bindump_testkit::ByteWriter;
use serde_json::json;

use crate::bindata::BinError;
use crate::bindata::decode::{DecodeOptions, decode_type};
use crate::bindata::schema::{Schema, TypeRef};
use crate::bindata::value::{Entry, Value};

fn schema(doc: serde_json::Value) -> Schema {
	Schema::from_doc(serde_json::from_value(doc).expect("doc deserializes")).expect("schema builds")
}

fn decode(schema: &Schema, name: &str, bytes: &[u8], options: &DecodeOptions) -> crate::bindata::Result<Value> {
	let ty = TypeRef::Record(schema.resolve(name).expect("type exists"));
	decode_type(schema, bytes, &ty, options)
}

fn keys(value: &Value) -> Vec<&str> {
	value.as_object().expect("object").iter().map(|entry| entry.key.as_ref()).collect()
}

fn shapes() -> Schema {
	schema(json!({
		"types": [
			{ "kind": "record", "name": "Cfg.Shape", "fields": [{ "name": "x", "type": "int32" }] },
			{ "kind": "record", "name": "Cfg.Circle", "base": "Cfg.Shape", "subtype_id": 1,
				"fields": [{ "name": "r", "type": "float" }] },
			{ "kind": "record", "name": "Cfg.Ring", "base": "Cfg.Circle", "subtype_id": 2,
				"fields": [{ "name": "inner", "type": "float" }] },
			{ "kind": "record", "name": "Cfg.Holder", "fields": [{ "name": "shape", "type": "Shape" }] }
		]
	}))
}

#[test]
fn base_fields_precede_derived_fields() {
	let schema = schema(json!({
		"types": [
			{ "kind": "record", "name": "B", "fields": [{ "name": "x", "type": "uint8" }] },
			{ "kind": "record", "name": "D", "base": "B", "fields": [{ "name": "y", "type": "uint8" }] }
		]
	}));

	let bytes = [0b1, 0x0b, 0b1, 0x0d];
	let value = decode(&schema, "D", &bytes, &DecodeOptions::default()).expect("decode");

	assert_eq!(
		value,
		Value::Object(vec![Entry::new("x", Value::U64(11)), Entry::new("y", Value::U64(13))])
	);
}

#[test]
fn discriminant_zero_keeps_declared_type() {
	let schema = shapes();
	let bytes = ByteWriter::new().varuint(0).u8(0b1).varint(-4).into_bytes();

	let value = decode(&schema, "Shape", &bytes, &DecodeOptions::default()).expect("decode");

	assert_eq!(keys(&value), ["$type", "x"]);
	assert_eq!(value.type_tag(), Some("Shape"));
	assert_eq!(value.get("x"), Some(&Value::I64(-4)));
}

#[test]
fn registered_grandchild_decodes_full_chain() {
	let schema = shapes();
	let bytes = ByteWriter::new()
		.varuint(2)
		.u8(0b1)
		.varint(1)
		.u8(0b1)
		.f32(2.5)
		.u8(0b1)
		.f32(0.5)
		.into_bytes();

	let value = decode(&schema, "Shape", &bytes, &DecodeOptions::default()).expect("decode");

	assert_eq!(keys(&value), ["$type", "x", "r", "inner"]);
	assert_eq!(value.type_tag(), Some("Ring"));
	assert_eq!(value.get("inner"), Some(&Value::F32(0.5)));
}

#[test]
fn nested_polymorphic_field_carries_its_own_tag() {
	let schema = shapes();
	let bytes = ByteWriter::new().u8(0b1).varuint(1).u8(0b0).u8(0b1).f32(1.0).into_bytes();

	let value = decode(&schema, "Holder", &bytes, &DecodeOptions::default()).expect("decode");
	let shape = value.get("shape").expect("shape");

	assert!(value.type_tag().is_none());
	assert_eq!(keys(shape), ["$type", "r"]);
	assert_eq!(shape.type_tag(), Some("Circle"));
}

#[test]
fn unknown_discriminant_is_an_error() {
	let schema = shapes();
	let err = decode(&schema, "Shape", &[0x09], &DecodeOptions::default()).expect_err("unknown id");
	assert!(matches!(err, BinError::UnknownSubtypeId { id: 9, type_name } if type_name == "Cfg.Shape"));
}

#[test]
fn disabled_polymorphism_skips_discriminant() {
	let schema = shapes();
	let options = DecodeOptions::default().without_polymorphism("Shape");
	let bytes = ByteWriter::new().u8(0b1).varint(3).into_bytes();

	let value = decode(&schema, "Shape", &bytes, &options).expect("decode");

	assert_eq!(keys(&value), ["x"]);
	assert_eq!(value.get("x"), Some(&Value::I64(3)));
}

#[test]
fn presence_group_shares_bit_with_next_field() {
	let schema = schema(json!({
		"types": [{ "kind": "record", "name": "Hashed", "fields": [
			{ "name": "HashPre", "type": "uint8", "presence_group": true },
			{ "name": "HashSuffix", "type": "uint32" },
			{ "name": "Name", "type": "string" }
		] }]
	}));

	let both = ByteWriter::new().u8(0b11).u8(7).varuint(300).string("n").into_bytes();
	let value = decode(&schema, "Hashed", &both, &DecodeOptions::default()).expect("present");
	assert_eq!(keys(&value), ["HashPre", "HashSuffix", "Name"]);
	assert_eq!(value.get("HashSuffix"), Some(&Value::U64(300)));

	let name_only = ByteWriter::new().u8(0b10).string("n").into_bytes();
	let value = decode(&schema, "Hashed", &name_only, &DecodeOptions::default()).expect("absent pair");
	assert_eq!(keys(&value), ["Name"]);
}

#[test]
fn wide_records_read_multi_byte_masks() {
	let fields: Vec<_> = (0..10).map(|idx| json!({ "name": format!("f{idx}"), "type": "uint8" })).collect();
	let schema = schema(json!({ "types": [{ "kind": "record", "name": "Wide", "fields": fields }] }));

	let value = decode(&schema, "Wide", &[0b0000_0001, 0b0000_0010, 0x2a, 0x2b], &DecodeOptions::default()).expect("decode");

	assert_eq!(keys(&value), ["f0", "f9"]);
	assert_eq!(value.get("f9"), Some(&Value::U64(0x2b)));
}

#[test]
fn fieldless_record_reads_no_mask() {
	let schema = schema(json!({
		"types": [
			{ "kind": "record", "name": "Empty" },
			{ "kind": "record", "name": "Outer", "fields": [
				{ "name": "e", "type": "Empty" },
				{ "name": "n", "type": "uint8" }
			] }
		]
	}));

	let value = decode(&schema, "Outer", &[0b11, 0x05], &DecodeOptions::default()).expect("decode");

	assert_eq!(value.get("e"), Some(&Value::Object(Vec::new())));
	assert_eq!(value.get("n"), Some(&Value::U64(5)));
}

#[test]
fn truncated_record_fails_without_partial_value() {
	let schema = shapes();
	let err = decode(&schema, "Holder", &[0b1, 0x01, 0b0, 0b1, 0x00], &DecodeOptions::default()).expect_err("short float");
	assert!(matches!(err, BinError::UnexpectedEndOfInput { need: 4, rem: 1, .. }));
}
