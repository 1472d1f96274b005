use crate::bindata::decode::DecodeContext;
use crate::bindata::schema::CustomScalar;
use crate::bindata::value::Value;
use crate::bindata::{BinError, Result};

impl DecodeContext<'_, '_> {
	/// Decode one tagged-union scalar.
	pub(crate) fn decode_custom(&mut self, kind: CustomScalar) -> Result<Value> {
		match kind {
			CustomScalar::DynamicArgument => self.decode_dynamic_argument(),
			CustomScalar::DynamicInt => self.decode_dynamic_int(),
			CustomScalar::DynamicFloat => self.decode_dynamic_float(),
			CustomScalar::DynamicString => self.decode_dynamic_string(),
		}
	}

	fn decode_dynamic_argument(&mut self) -> Result<Value> {
		let cursor = &mut self.cursor;
		let tag = cursor.read_varuint()?;
		Ok(match tag {
			1 => Value::I64(i64::from(cursor.read_i8()?)),
			2 => Value::U64(u64::from(cursor.read_u8()?)),
			3 => Value::I64(i64::from(cursor.read_i16_le()?)),
			4 => Value::U64(u64::from(cursor.read_u16_le()?)),
			5 => Value::I64(cursor.read_varint()?),
			6 => Value::U64(cursor.read_varuint()?),
			7 => Value::F32(cursor.read_f32_le()?),
			8 => Value::F64(cursor.read_f64_le()?),
			9 => Value::Bool(cursor.read_bool()?),
			10 => Value::String(cursor.read_string()?),
			_ => {
				return Err(BinError::UnhandledVariant {
					encoding: CustomScalar::DynamicArgument.as_str(),
					tag,
				});
			}
		})
	}

	fn decode_dynamic_int(&mut self) -> Result<Value> {
		if self.cursor.read_bool()? {
			Ok(Value::String(self.cursor.read_string()?))
		} else {
			Ok(Value::I64(self.cursor.read_varint()?))
		}
	}

	fn decode_dynamic_float(&mut self) -> Result<Value> {
		if !self.cursor.read_bool()? {
			return self.decode_float_or_string();
		}

		let count = self.cursor.read_varint()?;
		if count < 0 {
			return Err(BinError::NegativeLength {
				len: count,
				at: self.cursor.pos(),
			});
		}
		let count = self.check_count(count as u64)?;

		let mut parts = Vec::with_capacity(self.capacity_for(count));
		for _ in 0..count {
			if self.cursor.read_bool()? {
				let code = self.cursor.read_varint()?;
				parts.push(Value::String(self.schema.formula_operator(code)?.into()));
			} else {
				parts.push(self.decode_float_or_string()?);
			}
		}
		Ok(Value::Array(parts))
	}

	fn decode_float_or_string(&mut self) -> Result<Value> {
		if self.cursor.read_bool()? {
			Ok(Value::String(self.cursor.read_string()?))
		} else {
			Ok(Value::F32(self.cursor.read_f32_le()?))
		}
	}

	fn decode_dynamic_string(&mut self) -> Result<Value> {
		// The flag never changes the payload layout.
		let _dynamic = self.cursor.read_bool()?;
		Ok(Value::String(self.cursor.read_string()?))
	}
}

#[cfg(test)]
mod tests;
