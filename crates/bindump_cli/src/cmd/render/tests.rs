use bindump::bindata::{Entry, Value};

use super::to_json;

#[test]
fn objects_keep_order_and_duplicates() {
	let value = Value::Object(vec![
		Entry::new("$type", Value::String("ConfigHeal".into())),
		Entry::new("z", Value::U64(1)),
		Entry::new("a", Value::I64(-2)),
		Entry::new("z", Value::Bool(false)),
	]);

	let text = to_json(&value, true).expect("json");
	assert_eq!(text, r#"{"$type":"ConfigHeal","z":1,"a":-2,"z":false}"#);
}

#[test]
fn scalars_render_plainly() {
	let value = Value::Array(vec![Value::Null, Value::F32(1.5), Value::F64(-0.25), Value::String("q\"".into())]);

	let text = to_json(&value, true).expect("json");
	assert_eq!(text, r#"[null,1.5,-0.25,"q\""]"#);
}

#[test]
fn pretty_output_parses_back() {
	let value = Value::Object(vec![Entry::new("Level", Value::I64(5)), Entry::new("Tags", Value::Array(Vec::new()))]);

	let text = to_json(&value, false).expect("json");
	let parsed: serde_json::Value = serde_json::from_str(&text).expect("valid json");
	assert_eq!(parsed, serde_json::json!({ "Level": 5, "Tags": [] }));
	assert!(text.contains('\n'));
}
