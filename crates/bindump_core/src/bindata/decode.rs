use std::collections::BTreeSet;

use tracing::trace;

use crate::bindata::bytes::Cursor;
use crate::bindata::schema::{CustomScalar, Schema, TypeRef};
use crate::bindata::value::{Entry, Value};
use crate::bindata::{BinError, Result};

/// Runtime limits and behavior switches for schema-driven decoding.
#[derive(Debug, Clone)]
pub struct DecodeOptions {
	/// Maximum nesting depth of values.
	pub max_depth: u32,
	/// Maximum element count accepted for one array, set, map, or formula.
	pub max_collection_len: usize,
	/// Error when bytes remain after the top-level value.
	pub strict_trailing: bool,
	/// Simple type names whose subtype discriminant is not read.
	pub polymorphism_disabled: BTreeSet<Box<str>>,
}

impl Default for DecodeOptions {
	fn default() -> Self {
		Self {
			max_depth: 64,
			max_collection_len: 1 << 24,
			strict_trailing: false,
			polymorphism_disabled: BTreeSet::new(),
		}
	}
}

impl DecodeOptions {
	/// Copy of these options with subtype resolution disabled for `simple_name`.
	pub fn without_polymorphism(&self, simple_name: &str) -> Self {
		let mut out = self.clone();
		out.polymorphism_disabled.insert(simple_name.into());
		out
	}

	/// Whether records named `simple_name` read a subtype discriminant.
	pub fn polymorphism_enabled(&self, simple_name: &str) -> bool {
		!self.polymorphism_disabled.contains(simple_name)
	}
}

/// Decode state for one call: schema, options, cursor, and nesting depth.
pub struct DecodeContext<'a, 'b> {
	pub(crate) schema: &'a Schema,
	pub(crate) options: &'a DecodeOptions,
	pub(crate) cursor: Cursor<'b>,
	depth: u32,
}

impl<'a, 'b> DecodeContext<'a, 'b> {
	/// Start decoding `bytes` from offset 0.
	pub fn new(schema: &'a Schema, bytes: &'b [u8], options: &'a DecodeOptions) -> Self {
		Self {
			schema,
			options,
			cursor: Cursor::new(bytes),
			depth: 0,
		}
	}

	/// Current byte offset.
	pub fn pos(&self) -> usize {
		self.cursor.pos()
	}

	/// Unread byte count.
	pub fn remaining(&self) -> usize {
		self.cursor.remaining()
	}

	/// Decode one value of declared type `ty`.
	pub fn decode_value(&mut self, ty: &TypeRef) -> Result<Value> {
		if self.depth >= self.options.max_depth {
			return Err(BinError::DepthExceeded {
				max_depth: self.options.max_depth,
			});
		}

		self.depth += 1;
		let out = self.dispatch(ty);
		self.depth -= 1;
		out
	}

	fn dispatch(&mut self, ty: &TypeRef) -> Result<Value> {
		match ty {
			TypeRef::Primitive(kind) => self.decode_primitive(*kind),
			TypeRef::Enum(id) => self.decode_enum(*id),
			TypeRef::Record(id) => self.decode_record(*id),
			TypeRef::Array(item) | TypeRef::Set(item) => self.decode_sequence(item),
			TypeRef::Map(key, value) => self.decode_map(key, value),
			TypeRef::Custom(kind) => self.decode_custom(*kind),
			TypeRef::Unsupported(name) => Err(BinError::UnsupportedFieldType { type_name: name.to_string() }),
		}
	}

	/// Read a varuint element count and check it against the collection limit.
	pub(crate) fn read_count(&mut self) -> Result<usize> {
		let count = self.cursor.read_varuint()?;
		self.check_count(count)
	}

	pub(crate) fn check_count(&self, count: u64) -> Result<usize> {
		let max = self.options.max_collection_len;
		match usize::try_from(count) {
			Ok(count) if count <= max => Ok(count),
			_ => Err(BinError::CollectionTooLarge { count, max }),
		}
	}

	/// Capacity hint that never trusts the stream beyond the bytes left.
	pub(crate) fn capacity_for(&self, count: usize) -> usize {
		count.min(self.cursor.remaining())
	}

	fn decode_sequence(&mut self, item: &TypeRef) -> Result<Value> {
		let count = self.read_count()?;
		trace!(count, "sequence");

		let mut out = Vec::with_capacity(self.capacity_for(count));
		for _ in 0..count {
			out.push(self.decode_value(item)?);
		}
		Ok(Value::Array(out))
	}

	fn decode_map(&mut self, key: &TypeRef, value: &TypeRef) -> Result<Value> {
		if !is_scalar_key(key) {
			return Err(self.unsupported_key(key));
		}

		let count = self.read_count()?;
		trace!(count, "map");

		let mut out = Vec::with_capacity(self.capacity_for(count));
		for _ in 0..count {
			let key_value = self.decode_value(key)?;
			let key_text = key_value.key_text().ok_or_else(|| self.unsupported_key(key))?;
			let item = self.decode_value(value)?;
			out.push(Entry::new(key_text, item));
		}
		Ok(Value::Object(out))
	}

	fn unsupported_key(&self, key: &TypeRef) -> BinError {
		BinError::UnsupportedFieldType {
			type_name: format!(
				"map key {} (map keys must be scalars; record and collection keys are not supported)",
				self.schema.display(key)
			),
		}
	}
}

fn is_scalar_key(key: &TypeRef) -> bool {
	matches!(
		key,
		TypeRef::Primitive(_)
			| TypeRef::Enum(_)
			| TypeRef::Custom(CustomScalar::DynamicArgument | CustomScalar::DynamicInt | CustomScalar::DynamicString)
	)
}

/// Decode one value of type `ty` from the start of `bytes`.
pub fn decode_type(schema: &Schema, bytes: &[u8], ty: &TypeRef, options: &DecodeOptions) -> Result<Value> {
	DecodeContext::new(schema, bytes, options).decode_value(ty)
}
