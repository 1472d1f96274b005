use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::Path;

use crate::bindata::{BinError, Result};

mod doc;

pub use doc::{FieldDoc, SchemaDoc, TypeDoc, TypeRefDoc};

/// Index of a type inside a [`Schema`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(u32);

impl TypeId {
	/// Position of the type in [`Schema::types`].
	pub fn index(self) -> usize {
		self.0 as usize
	}
}

/// Built-in scalar kinds, including the `SimpleSafe*` and `FixedBool` wrapper aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
	/// Strict boolean byte.
	Bool,
	/// Fixed signed byte.
	I8,
	/// Fixed unsigned byte.
	U8,
	/// Zig-zag varint.
	I16,
	/// Varuint.
	U16,
	/// Zig-zag varint.
	I32,
	/// Varuint.
	U32,
	/// Zig-zag varint.
	I64,
	/// Varuint.
	U64,
	/// IEEE-754 single.
	F32,
	/// IEEE-754 double.
	F64,
	/// Length-prefixed UTF-8.
	String,
}

impl Primitive {
	/// Match a declared type name (unqualified) against the built-in aliases.
	pub fn from_name(name: &str) -> Option<Self> {
		Some(match name {
			"bool" | "Boolean" | "FixedBool" => Self::Bool,
			"int8" | "sbyte" | "SByte" => Self::I8,
			"uint8" | "byte" | "Byte" | "SimpleSafeUInt8" => Self::U8,
			"int16" | "short" | "Int16" | "SimpleSafeInt16" => Self::I16,
			"uint16" | "ushort" | "UInt16" | "SimpleSafeUInt16" => Self::U16,
			"int32" | "int" | "Int32" | "SimpleSafeInt32" => Self::I32,
			"uint32" | "uint" | "UInt32" | "SimpleSafeUInt32" => Self::U32,
			"int64" | "long" | "Int64" => Self::I64,
			"uint64" | "ulong" | "UInt64" => Self::U64,
			"float" | "single" | "Single" | "SimpleSafeFloat" => Self::F32,
			"double" | "Double" => Self::F64,
			"string" | "String" => Self::String,
			_ => return None,
		})
	}

	/// Canonical lowercase name.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Bool => "bool",
			Self::I8 => "int8",
			Self::U8 => "uint8",
			Self::I16 => "int16",
			Self::U16 => "uint16",
			Self::I32 => "int32",
			Self::U32 => "uint32",
			Self::I64 => "int64",
			Self::U64 => "uint64",
			Self::F32 => "float",
			Self::F64 => "double",
			Self::String => "string",
		}
	}
}

/// Domain-specific tagged-union scalars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomScalar {
	/// Kind-tagged primitive (`DynamicArgument`).
	DynamicArgument,
	/// String or varint (`DynamicInt`).
	DynamicInt,
	/// String, float, or formula (`DynamicFloat`).
	DynamicFloat,
	/// Flag-prefixed string (`DynamicString`).
	DynamicString,
}

impl CustomScalar {
	/// Match a declared type name (unqualified).
	pub fn from_name(name: &str) -> Option<Self> {
		Some(match name {
			"DynamicArgument" => Self::DynamicArgument,
			"DynamicInt" => Self::DynamicInt,
			"DynamicFloat" => Self::DynamicFloat,
			"DynamicString" => Self::DynamicString,
			_ => return None,
		})
	}

	/// Declared type name.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::DynamicArgument => "DynamicArgument",
			Self::DynamicInt => "DynamicInt",
			Self::DynamicFloat => "DynamicFloat",
			Self::DynamicString => "DynamicString",
		}
	}
}

/// Resolved declared type of a field, collection element, or map key/value.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeRef {
	/// Built-in scalar.
	Primitive(Primitive),
	/// Schema enum.
	Enum(TypeId),
	/// Schema record.
	Record(TypeId),
	/// Count-prefixed sequence.
	Array(Box<TypeRef>),
	/// Count-prefixed set, decoded like an array.
	Set(Box<TypeRef>),
	/// Count-prefixed key/value pairs.
	Map(Box<TypeRef>, Box<TypeRef>),
	/// Tagged-union scalar.
	Custom(CustomScalar),
	/// Declared type the decoder cannot read; fails only when a value is present.
	Unsupported(Box<str>),
}

/// One serialized field of a record.
#[derive(Debug, Clone)]
pub struct FieldDef {
	/// Display name emitted as the object key.
	pub name: Box<str>,
	/// Declared field type.
	pub ty: TypeRef,
	/// Field shares its presence bit with the next field.
	pub presence_group: bool,
}

/// Enum metadata.
#[derive(Debug, Clone)]
pub struct EnumDef {
	/// Underlying storage is a signed integer (zig-zag encoded).
	pub signed: bool,
	/// Symbolic member names by numeric value.
	pub values: BTreeMap<i64, Box<str>>,
}

/// Schema type category.
#[derive(Debug, Clone)]
pub enum TypeKind {
	/// Structured record with presence-masked fields.
	Record,
	/// Named integer enum.
	Enum(EnumDef),
}

/// One schema type.
#[derive(Debug, Clone)]
pub struct TypeDef {
	/// Possibly namespace-qualified type name.
	pub name: Box<str>,
	/// Record or enum.
	pub kind: TypeKind,
	/// Own serialized fields in declared order, excluding inherited ones.
	pub fields: Vec<FieldDef>,
	/// Direct base type, if it participates in the schema.
	pub base: Option<TypeId>,
	/// Discriminant this type is registered under in its hierarchy.
	pub subtype_id: Option<u64>,
	/// Direct subtypes keyed by discriminant.
	pub subtypes: BTreeMap<u64, TypeId>,
}

impl TypeDef {
	/// Unqualified name: the part after the last `.`.
	pub fn simple_name(&self) -> &str {
		simple_name(&self.name)
	}

	/// Whether decoding this type starts with a subtype discriminant.
	pub fn is_polymorphic(&self) -> bool {
		!self.subtypes.is_empty()
	}

	/// Enum metadata, if this is an enum.
	pub fn enum_def(&self) -> Option<&EnumDef> {
		match &self.kind {
			TypeKind::Enum(item) => Some(item),
			TypeKind::Record => None,
		}
	}
}

/// Immutable resolved type graph that drives decoding.
#[derive(Debug, Clone)]
pub struct Schema {
	types: Vec<TypeDef>,
	by_name: HashMap<Box<str>, TypeId>,
	formula_operators: Option<TypeId>,
}

impl Schema {
	/// Parse a JSON schema document.
	pub fn from_json_str(text: &str) -> Result<Self> {
		let doc: SchemaDoc = serde_json::from_str(text)?;
		Self::from_doc(doc)
	}

	/// Read and parse a JSON schema document from disk.
	pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
		let text = std::fs::read_to_string(path)?;
		Self::from_json_str(&text)
	}

	/// Resolve a deserialized schema document into a type graph.
	pub fn from_doc(doc: SchemaDoc) -> Result<Self> {
		doc::build(doc)
	}

	/// All types in declaration order.
	pub fn types(&self) -> &[TypeDef] {
		&self.types
	}

	/// Type by id.
	pub fn get(&self, id: TypeId) -> &TypeDef {
		&self.types[id.index()]
	}

	/// Look up a type by exact name, falling back to a unique simple-name match.
	pub fn resolve(&self, name: &str) -> Result<TypeId> {
		if let Some(id) = self.by_name.get(name) {
			return Ok(*id);
		}

		let mut matches = self.types.iter().enumerate().filter(|(_, item)| item.simple_name() == name);
		let first = matches.next();
		match (first, matches.count()) {
			(Some((idx, _)), 0) => Ok(TypeId(idx as u32)),
			(Some(_), rest) => Err(BinError::AmbiguousTypeName {
				name: name.to_owned(),
				candidates: rest + 1,
			}),
			(None, _) => Err(BinError::TypeNotFound { name: name.to_owned() }),
		}
	}

	/// Topmost ancestor reachable through `base` links.
	pub fn hierarchy_root(&self, id: TypeId) -> TypeId {
		let mut current = id;
		while let Some(base) = self.get(current).base {
			current = base;
		}
		current
	}

	/// Find the type registered under `id` anywhere below `root`.
	pub fn subtype_by_id(&self, root: TypeId, id: u64) -> Option<TypeId> {
		let mut stack = vec![root];
		while let Some(current) = stack.pop() {
			let item = self.get(current);
			if let Some(found) = item.subtypes.get(&id) {
				return Some(*found);
			}
			stack.extend(item.subtypes.values().copied());
		}
		None
	}

	/// Inheritance chain of `id`, hierarchy root first.
	pub fn chain(&self, id: TypeId) -> Vec<TypeId> {
		let mut out = vec![id];
		let mut current = id;
		while let Some(base) = self.get(current).base {
			out.push(base);
			current = base;
		}
		out.reverse();
		out
	}

	/// Symbolic name of `value` in enum `id`.
	pub fn enum_name(&self, id: TypeId, value: i64) -> Result<&str> {
		let item = self.get(id);
		item.enum_def()
			.and_then(|def| def.values.get(&value))
			.map(AsRef::as_ref)
			.ok_or_else(|| BinError::UnknownEnumValue {
				type_name: item.name.to_string(),
				value,
			})
	}

	/// Enum naming the `DynamicFloat` formula operators, if configured.
	pub fn formula_operators(&self) -> Option<TypeId> {
		self.formula_operators
	}

	/// Symbolic name of a `DynamicFloat` formula operator code.
	pub fn formula_operator(&self, code: i64) -> Result<&str> {
		let id = self.formula_operators.ok_or(BinError::FormulaOperatorsUnset)?;
		self.enum_name(id, code)
	}

	/// Render a type reference with schema type names.
	pub fn display<'a>(&'a self, ty: &'a TypeRef) -> TypeRefDisplay<'a> {
		TypeRefDisplay { schema: self, ty }
	}
}

/// [`fmt::Display`] adapter returned by [`Schema::display`].
pub struct TypeRefDisplay<'a> {
	schema: &'a Schema,
	ty: &'a TypeRef,
}

impl fmt::Display for TypeRefDisplay<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let schema = self.schema;
		match self.ty {
			TypeRef::Primitive(item) => f.write_str(item.as_str()),
			TypeRef::Enum(id) | TypeRef::Record(id) => f.write_str(&schema.get(*id).name),
			TypeRef::Array(item) => write!(f, "Array<{}>", schema.display(item)),
			TypeRef::Set(item) => write!(f, "Set<{}>", schema.display(item)),
			TypeRef::Map(key, value) => write!(f, "Map<{}, {}>", schema.display(key), schema.display(value)),
			TypeRef::Custom(item) => f.write_str(item.as_str()),
			TypeRef::Unsupported(name) => f.write_str(name),
		}
	}
}

/// Unqualified part of a dotted type name.
pub fn simple_name(name: &str) -> &str {
	name.rsplit('.').next().unwrap_or(name)
}
