use crate::bindata::decode::DecodeContext;
use crate::bindata::schema::{Primitive, TypeId};
use crate::bindata::value::Value;
use crate::bindata::{BinError, Result};

impl DecodeContext<'_, '_> {
	/// Decode one built-in scalar.
	///
	/// 8-bit integers are single raw bytes; wider integers are varints whose
	/// zig-zag mapping follows signedness.
	pub(crate) fn decode_primitive(&mut self, kind: Primitive) -> Result<Value> {
		let cursor = &mut self.cursor;
		Ok(match kind {
			Primitive::Bool => Value::Bool(cursor.read_bool()?),
			Primitive::I8 => Value::I64(i64::from(cursor.read_i8()?)),
			Primitive::U8 => Value::U64(u64::from(cursor.read_u8()?)),
			Primitive::I16 | Primitive::I32 | Primitive::I64 => Value::I64(cursor.read_varint()?),
			Primitive::U16 | Primitive::U32 | Primitive::U64 => Value::U64(cursor.read_varuint()?),
			Primitive::F32 => Value::F32(cursor.read_f32_le()?),
			Primitive::F64 => Value::F64(cursor.read_f64_le()?),
			Primitive::String => Value::String(cursor.read_string()?),
		})
	}

	/// Decode an enum member as its symbolic name.
	pub(crate) fn decode_enum(&mut self, id: TypeId) -> Result<Value> {
		let schema = self.schema;
		let item = schema.get(id);
		let Some(def) = item.enum_def() else {
			return Err(BinError::UnsupportedFieldType {
				type_name: format!("{} as enum", item.name),
			});
		};

		let raw = if def.signed {
			self.cursor.read_varint()?
		} else {
			self.cursor.read_varuint()? as i64
		};
		Ok(Value::String(schema.enum_name(id, raw)?.into()))
	}
}
