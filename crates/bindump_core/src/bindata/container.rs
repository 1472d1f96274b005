use std::fmt;
use std::str::FromStr;

use tracing::{debug, warn};

use crate::bindata::decode::{DecodeContext, DecodeOptions};
use crate::bindata::schema::{Primitive, Schema, TypeId, TypeRef};
use crate::bindata::value::Value;
use crate::bindata::{BinError, Result};

/// Top-level arrangement of records inside one input buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerMode {
	/// `s`: one record.
	Single,
	/// `l`: varuint count followed by records.
	List,
	/// `d`: string-keyed map of records.
	Map,
	/// `ld`: list of string-keyed maps of records.
	ListOfMaps,
	/// `dl`: string-keyed map of record lists.
	MapOfLists,
}

impl ContainerMode {
	/// Short mode code as accepted by [`ContainerSpec::from_str`].
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Single => "s",
			Self::List => "l",
			Self::Map => "d",
			Self::ListOfMaps => "ld",
			Self::MapOfLists => "dl",
		}
	}

	fn type_ref(self, record: TypeId) -> TypeRef {
		let record = TypeRef::Record(record);
		let keyed = |value: TypeRef| TypeRef::Map(Box::new(TypeRef::Primitive(Primitive::String)), Box::new(value));
		match self {
			Self::Single => record,
			Self::List => TypeRef::Array(Box::new(record)),
			Self::Map => keyed(record),
			Self::ListOfMaps => TypeRef::Array(Box::new(keyed(record))),
			Self::MapOfLists => keyed(TypeRef::Array(Box::new(record))),
		}
	}
}

/// Parsed mode string: container shape plus the polymorphism switch.
///
/// A trailing `-` (for example `l-`) turns off subtype resolution for the
/// top-level type for one decode call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerSpec {
	/// Container shape.
	pub mode: ContainerMode,
	/// Read a subtype discriminant for the top-level type.
	pub polymorphic: bool,
}

impl Default for ContainerSpec {
	fn default() -> Self {
		Self {
			mode: ContainerMode::Single,
			polymorphic: true,
		}
	}
}

impl FromStr for ContainerSpec {
	type Err = BinError;

	fn from_str(raw: &str) -> Result<Self> {
		let (code, polymorphic) = match raw.strip_suffix('-') {
			Some(code) => (code, false),
			None => (raw, true),
		};
		let mode = match code {
			"s" => ContainerMode::Single,
			"l" => ContainerMode::List,
			"d" => ContainerMode::Map,
			"ld" => ContainerMode::ListOfMaps,
			"dl" => ContainerMode::MapOfLists,
			_ => return Err(BinError::InvalidMode { mode: raw.to_owned() }),
		};
		Ok(Self { mode, polymorphic })
	}
}

impl fmt::Display for ContainerSpec {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.mode.as_str())?;
		if !self.polymorphic {
			f.write_str("-")?;
		}
		Ok(())
	}
}

/// Decode a whole buffer holding records of `type_name` arranged per `spec`.
pub fn decode_container(schema: &Schema, bytes: &[u8], type_name: &str, spec: ContainerSpec, options: &DecodeOptions) -> Result<Value> {
	let id = schema.resolve(type_name)?;
	let item = schema.get(id);
	if item.enum_def().is_some() {
		return Err(BinError::UnsupportedFieldType {
			type_name: format!("{} as top-level record", item.name),
		});
	}

	let scoped;
	let options = if spec.polymorphic {
		options
	} else {
		scoped = options.without_polymorphism(item.simple_name());
		&scoped
	};

	debug!(type_name = %item.name, mode = %spec, bytes = bytes.len(), "decode container");
	decode_top_level(schema, bytes, &spec.mode.type_ref(id), &item.name, options)
}

/// Decode exactly one record of type `id` from the start of `bytes`.
pub fn decode_record(schema: &Schema, bytes: &[u8], id: TypeId, options: &DecodeOptions) -> Result<Value> {
	decode_top_level(schema, bytes, &TypeRef::Record(id), &schema.get(id).name, options)
}

fn decode_top_level(schema: &Schema, bytes: &[u8], ty: &TypeRef, type_name: &str, options: &DecodeOptions) -> Result<Value> {
	let mut ctx = DecodeContext::new(schema, bytes, options);
	let value = ctx.decode_value(ty)?;

	let leftover = ctx.remaining();
	if leftover > 0 {
		if options.strict_trailing {
			return Err(BinError::TrailingBytes {
				type_name: type_name.to_owned(),
				leftover,
			});
		}
		warn!(type_name, at = ctx.pos(), leftover, "trailing bytes after top-level value");
	}

	Ok(value)
}
