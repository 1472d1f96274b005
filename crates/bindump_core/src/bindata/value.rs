/// Key of the synthetic entry naming a polymorphic record's resolved type.
pub const TYPE_KEY: &str = "$type";

/// Runtime value emitted by schema-driven decoding.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	/// Explicit null marker.
	Null,
	/// Boolean scalar.
	Bool(bool),
	/// Signed integer scalar.
	I64(i64),
	/// Unsigned integer scalar.
	U64(u64),
	/// 32-bit float scalar.
	F32(f32),
	/// 64-bit float scalar.
	F64(f64),
	/// UTF-8 string.
	String(Box<str>),
	/// Ordered sequence.
	Array(Vec<Value>),
	/// Ordered key/value entries; keys may repeat when decoded from a map.
	Object(Vec<Entry>),
}

/// One named entry of an object value.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
	/// Entry key.
	pub key: Box<str>,
	/// Entry payload.
	pub value: Value,
}

impl Entry {
	/// Build an entry from any string-like key.
	pub fn new(key: impl Into<Box<str>>, value: Value) -> Self {
		Self { key: key.into(), value }
	}
}

impl Value {
	/// Short lowercase label for the value variant.
	pub fn kind(&self) -> &'static str {
		match self {
			Self::Null => "null",
			Self::Bool(_) => "bool",
			Self::I64(_) => "int",
			Self::U64(_) => "uint",
			Self::F32(_) | Self::F64(_) => "float",
			Self::String(_) => "string",
			Self::Array(_) => "array",
			Self::Object(_) => "object",
		}
	}

	/// Return object entries, if this is an object.
	pub fn as_object(&self) -> Option<&[Entry]> {
		match self {
			Self::Object(entries) => Some(entries),
			_ => None,
		}
	}

	/// Return array items, if this is an array.
	pub fn as_array(&self) -> Option<&[Value]> {
		match self {
			Self::Array(items) => Some(items),
			_ => None,
		}
	}

	/// Return the string payload, if this is a string.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::String(text) => Some(text),
			_ => None,
		}
	}

	/// First entry named `key` on an object value.
	pub fn get(&self, key: &str) -> Option<&Value> {
		self.as_object()?.iter().find(|entry| entry.key.as_ref() == key).map(|entry| &entry.value)
	}

	/// Resolved type name carried by a polymorphic record.
	pub fn type_tag(&self) -> Option<&str> {
		self.get(TYPE_KEY)?.as_str()
	}

	/// Render a scalar as map-key text; `None` for null and containers.
	pub fn key_text(&self) -> Option<String> {
		match self {
			Self::Bool(v) => Some(v.to_string()),
			Self::I64(v) => Some(v.to_string()),
			Self::U64(v) => Some(v.to_string()),
			Self::F32(v) => Some(v.to_string()),
			Self::F64(v) => Some(v.to_string()),
			Self::String(v) => Some(v.to_string()),
			Self::Null | Self::Array(_) | Self::Object(_) => None,
		}
	}
}
