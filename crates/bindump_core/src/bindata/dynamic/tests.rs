use bindump_testkit::ByteWriter;
use serde_json::json;

use crate::bindata::BinError;
use crate::bindata::decode::{DecodeOptions, decode_type};
use crate::bindata::schema::{CustomScalar, Schema, TypeRef};
use crate::bindata::value::Value;

fn schema_with_operators() -> Schema {
	let doc = json!({
		"formula_operators": "Cfg.FormulaOp",
		"types": [{ "kind": "enum", "name": "Cfg.FormulaOp", "signed": true, "values": { "0": "Add", "2": "Mul" } }]
	});
	Schema::from_doc(serde_json::from_value(doc).expect("doc deserializes")).expect("schema builds")
}

fn decode_with(schema: &Schema, kind: CustomScalar, bytes: &[u8]) -> crate::bindata::Result<Value> {
	decode_type(schema, bytes, &TypeRef::Custom(kind), &DecodeOptions::default())
}

fn decode(kind: CustomScalar, bytes: &[u8]) -> crate::bindata::Result<Value> {
	decode_with(&schema_with_operators(), kind, bytes)
}

#[test]
fn dynamic_argument_covers_every_tag() {
	let cases = [
		(ByteWriter::new().varuint(1).u8(0xfe), Value::I64(-2)),
		(ByteWriter::new().varuint(2).u8(0xfe), Value::U64(254)),
		(ByteWriter::new().varuint(3).i16(-300), Value::I64(-300)),
		(ByteWriter::new().varuint(4).u16(0xbeef), Value::U64(0xbeef)),
		(ByteWriter::new().varuint(5).varint(-70_000), Value::I64(-70_000)),
		(ByteWriter::new().varuint(6).varuint(70_000), Value::U64(70_000)),
		(ByteWriter::new().varuint(7).f32(0.5), Value::F32(0.5)),
		(ByteWriter::new().varuint(8).f64(1e10), Value::F64(1e10)),
		(ByteWriter::new().varuint(9).bool(true), Value::Bool(true)),
		(ByteWriter::new().varuint(10).string("arg"), Value::String("arg".into())),
	];

	for (bytes, expected) in cases {
		let value = decode(CustomScalar::DynamicArgument, bytes.as_bytes()).expect("tag decodes");
		assert_eq!(value, expected);
	}
}

#[test]
fn dynamic_argument_rejects_unknown_tag() {
	let err = decode(CustomScalar::DynamicArgument, &[0x0b]).expect_err("tag 11");
	assert!(matches!(err, BinError::UnhandledVariant { encoding: "DynamicArgument", tag: 11 }));
}

#[test]
fn dynamic_int_is_string_or_varint() {
	let text = ByteWriter::new().bool(true).string("%Level").into_bytes();
	let number = ByteWriter::new().bool(false).varint(-9).into_bytes();

	assert_eq!(decode(CustomScalar::DynamicInt, &text).expect("string"), Value::String("%Level".into()));
	assert_eq!(decode(CustomScalar::DynamicInt, &number).expect("int"), Value::I64(-9));
}

#[test]
fn dynamic_float_plain_forms() {
	let number = ByteWriter::new().bool(false).bool(false).f32(2.25).into_bytes();
	let text = ByteWriter::new().bool(false).bool(true).string("Atk").into_bytes();

	assert_eq!(decode(CustomScalar::DynamicFloat, &number).expect("float"), Value::F32(2.25));
	assert_eq!(decode(CustomScalar::DynamicFloat, &text).expect("string"), Value::String("Atk".into()));
}

#[test]
fn dynamic_float_formula_mixes_operands_and_operators() {
	let bytes = ByteWriter::new()
		.bool(true)
		.varint(3)
		.bool(false)
		.bool(true)
		.string("Atk")
		.bool(true)
		.varint(2)
		.bool(false)
		.bool(false)
		.f32(1.5)
		.into_bytes();

	let value = decode(CustomScalar::DynamicFloat, &bytes).expect("formula");

	assert_eq!(
		value,
		Value::Array(vec![Value::String("Atk".into()), Value::String("Mul".into()), Value::F32(1.5)])
	);
}

#[test]
fn dynamic_float_formula_errors() {
	let negative = ByteWriter::new().bool(true).varint(-1).into_bytes();
	let err = decode(CustomScalar::DynamicFloat, &negative).expect_err("negative count");
	assert!(matches!(err, BinError::NegativeLength { len: -1, .. }));

	let unknown_op = ByteWriter::new().bool(true).varint(1).bool(true).varint(5).into_bytes();
	let err = decode(CustomScalar::DynamicFloat, &unknown_op).expect_err("unmapped operator");
	assert!(matches!(err, BinError::UnknownEnumValue { value: 5, .. }));

	let bare = Schema::from_json_str(r#"{ "types": [] }"#).expect("empty schema");
	let op = ByteWriter::new().bool(true).varint(1).bool(true).varint(0).into_bytes();
	let err = decode_with(&bare, CustomScalar::DynamicFloat, &op).expect_err("no operator enum");
	assert!(matches!(err, BinError::FormulaOperatorsUnset));
}

#[test]
fn dynamic_string_ignores_flag() {
	for flag in [false, true] {
		let bytes = ByteWriter::new().bool(flag).string("key").into_bytes();
		assert_eq!(decode(CustomScalar::DynamicString, &bytes).expect("string"), Value::String("key".into()));
	}
}
