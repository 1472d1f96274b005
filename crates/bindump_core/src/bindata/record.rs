use tracing::{debug, trace};

use crate::bindata::decode::DecodeContext;
use crate::bindata::mask::PresenceMask;
use crate::bindata::schema::{TypeDef, TypeId};
use crate::bindata::value::{Entry, TYPE_KEY, Value};
use crate::bindata::{BinError, Result};

impl DecodeContext<'_, '_> {
	/// Decode a record of declared type `id`, resolving its subtype first.
	///
	/// Output keys are ordered hierarchy root first, resolved type last, with
	/// `$type` leading whenever a discriminant was read.
	pub(crate) fn decode_record(&mut self, id: TypeId) -> Result<Value> {
		let schema = self.schema;
		let declared = schema.get(id);
		if declared.enum_def().is_some() {
			return Err(BinError::UnsupportedFieldType {
				type_name: format!("{} as record", declared.name),
			});
		}

		let root = schema.hierarchy_root(id);
		let mut entries = Vec::new();

		let resolved = if declared.is_polymorphic() && self.options.polymorphism_enabled(declared.simple_name()) {
			let subtype_id = self.cursor.read_varuint()?;
			let resolved = match subtype_id {
				0 => id,
				_ => schema.subtype_by_id(root, subtype_id).ok_or_else(|| BinError::UnknownSubtypeId {
					type_name: schema.get(root).name.to_string(),
					id: subtype_id,
				})?,
			};
			debug!(declared = %declared.name, subtype_id, resolved = %schema.get(resolved).name, "subtype");

			entries.push(Entry::new(TYPE_KEY, Value::String(schema.get(resolved).simple_name().into())));
			resolved
		} else {
			id
		};

		self.decode_field_chain(resolved, root, &mut entries)?;
		Ok(Value::Object(entries))
	}

	fn decode_field_chain(&mut self, id: TypeId, root: TypeId, out: &mut Vec<Entry>) -> Result<()> {
		let schema = self.schema;
		let item = schema.get(id);
		if id != root {
			if let Some(base) = item.base {
				self.decode_field_chain(base, root, out)?;
			}
		}
		self.decode_own_fields(item, out)
	}

	fn decode_own_fields(&mut self, item: &TypeDef, out: &mut Vec<Entry>) -> Result<()> {
		if item.fields.is_empty() {
			return Ok(());
		}

		let mask = PresenceMask::read(&mut self.cursor, item.fields.len())?;
		trace!(record = %item.name, fields = item.fields.len(), "fields");

		let mut bit = 0;
		for field in &item.fields {
			if mask.test(bit) {
				let value = self.decode_value(&field.ty)?;
				out.push(Entry::new(field.name.clone(), value));
			} else {
				trace!(field = %field.name, bit, "absent");
			}

			// A presence-group field hands its bit on to the next field.
			if !field.presence_group {
				bit += 1;
			}
		}

		Ok(())
	}
}

#[cfg(test)]
mod tests;
