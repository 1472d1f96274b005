use bindump::bindata::{Entry, Value};

use super::{PrintOptions, render_tree};

fn tagged_record() -> Value {
	Value::Object(vec![
		Entry::new("$type", Value::String("ConfigHeal".into())),
		Entry::new("Name", Value::String("heal".into())),
		Entry::new("Amounts", Value::Array(vec![Value::F32(1.5), Value::F32(2.0)])),
		Entry::new("Level", Value::I64(3)),
	])
}

#[test]
fn tree_shows_type_tag_and_nesting() {
	let text = render_tree(&tagged_record(), PrintOptions::default());

	let expected = "\
ConfigHeal {
  Name = \"heal\"
  Amounts =
    [
      1.5
      2
    ]
  Level = 3
}
";
	assert_eq!(text, expected);
}

#[test]
fn long_strings_and_arrays_are_truncated() {
	let options = PrintOptions {
		max_string_len: 3,
		max_array_items: 1,
		..PrintOptions::default()
	};
	let value = Value::Array(vec![Value::String("abcdef".into()), Value::Null, Value::Null]);

	let text = render_tree(&value, options);
	assert_eq!(text, "[\n  \"abc...\"\n  ... 2 more\n]\n");
}

#[test]
fn depth_limit_collapses_nested_values() {
	let options = PrintOptions {
		max_print_depth: 1,
		..PrintOptions::default()
	};
	let value = Value::Object(vec![Entry::new("inner", Value::Object(vec![Entry::new("x", Value::U64(1))]))]);

	let text = render_tree(&value, options);
	assert_eq!(text, "{\n  inner =\n    { ... 1 entries }\n}\n");
}

#[test]
fn entry_limit_reports_hidden_entries() {
	let options = PrintOptions {
		max_entries_per_object: 1,
		..PrintOptions::default()
	};

	let text = render_tree(&tagged_record(), options);
	assert!(text.starts_with("ConfigHeal {\n  Name = \"heal\"\n"));
	assert!(text.contains("... 2 more entries"));
}
