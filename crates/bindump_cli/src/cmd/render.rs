use bindump::bindata::Value;
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

/// Serialize a [`Value`] as JSON, keeping object entries in decode order.
///
/// Map-derived objects may repeat keys; every entry is written.
pub struct JsonView<'a>(pub &'a Value);

impl Serialize for JsonView<'_> {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		match self.0 {
			Value::Null => serializer.serialize_unit(),
			Value::Bool(v) => serializer.serialize_bool(*v),
			Value::I64(v) => serializer.serialize_i64(*v),
			Value::U64(v) => serializer.serialize_u64(*v),
			Value::F32(v) => serializer.serialize_f32(*v),
			Value::F64(v) => serializer.serialize_f64(*v),
			Value::String(v) => serializer.serialize_str(v),
			Value::Array(items) => {
				let mut seq = serializer.serialize_seq(Some(items.len()))?;
				for item in items {
					seq.serialize_element(&JsonView(item))?;
				}
				seq.end()
			}
			Value::Object(entries) => {
				let mut map = serializer.serialize_map(Some(entries.len()))?;
				for entry in entries {
					map.serialize_entry(entry.key.as_ref(), &JsonView(&entry.value))?;
				}
				map.end()
			}
		}
	}
}

/// Render a value as JSON text.
pub fn to_json(value: &Value, compact: bool) -> serde_json::Result<String> {
	if compact {
		serde_json::to_string(&JsonView(value))
	} else {
		serde_json::to_string_pretty(&JsonView(value))
	}
}

#[cfg(test)]
mod tests;
