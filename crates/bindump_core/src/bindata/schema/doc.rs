use std::collections::{BTreeMap, HashMap, HashSet};

use serde::Deserialize;

use super::{CustomScalar, EnumDef, FieldDef, Primitive, Schema, TypeDef, TypeId, TypeKind, TypeRef, simple_name};
use crate::bindata::{BinError, Result};

/// Serialized schema document produced by the metadata extractor.
#[derive(Debug, Clone, Deserialize)]
pub struct SchemaDoc {
	/// Enum naming the `DynamicFloat` formula operators.
	#[serde(default)]
	pub formula_operators: Option<String>,
	/// Declared types.
	pub types: Vec<TypeDoc>,
}

/// One declared type.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeDoc {
	/// Record type.
	Record {
		/// Type name.
		name: String,
		/// Base type name.
		#[serde(default)]
		base: Option<String>,
		/// Discriminant under the hierarchy root.
		#[serde(default)]
		subtype_id: Option<u64>,
		/// Own fields in serialized order.
		#[serde(default)]
		fields: Vec<FieldDoc>,
	},
	/// Enum type.
	Enum {
		/// Type name.
		name: String,
		/// Underlying storage is signed.
		signed: bool,
		/// Member names keyed by decimal value text.
		#[serde(default)]
		values: BTreeMap<String, String>,
	},
}

impl TypeDoc {
	fn name(&self) -> &str {
		match self {
			Self::Record { name, .. } | Self::Enum { name, .. } => name,
		}
	}
}

/// One declared record field.
#[derive(Debug, Clone, Deserialize)]
pub struct FieldDoc {
	/// Display name.
	pub name: String,
	/// Declared type.
	#[serde(rename = "type")]
	pub ty: TypeRefDoc,
	/// Presence bit is shared with the next field.
	#[serde(default)]
	pub presence_group: bool,
}

/// Declared type reference.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TypeRefDoc {
	/// Primitive alias, custom scalar, or schema type name.
	Name(String),
	/// `{ "array": T }`
	Array {
		/// Element type.
		array: Box<TypeRefDoc>,
	},
	/// `{ "set": T }`
	Set {
		/// Element type.
		set: Box<TypeRefDoc>,
	},
	/// `{ "map": [K, V] }`
	Map {
		/// Key and value types.
		map: (Box<TypeRefDoc>, Box<TypeRefDoc>),
	},
}

struct Names<'a> {
	by_name: &'a HashMap<Box<str>, TypeId>,
	by_simple: HashMap<&'a str, Vec<TypeId>>,
	docs: &'a [TypeDoc],
}

impl Names<'_> {
	/// Schema type by full name, or by simple name when exactly one type carries it.
	fn schema_type(&self, name: &str) -> Result<Option<TypeId>> {
		if let Some(id) = self.by_name.get(name) {
			return Ok(Some(*id));
		}
		match self.by_simple.get(name).map(Vec::as_slice) {
			None | Some([]) => Ok(None),
			Some([only]) => Ok(Some(*only)),
			Some(many) => Err(BinError::AmbiguousTypeName {
				name: name.to_owned(),
				candidates: many.len(),
			}),
		}
	}

	fn type_ref(&self, doc: &TypeRefDoc) -> Result<TypeRef> {
		Ok(match doc {
			TypeRefDoc::Name(name) => self.named(name)?,
			TypeRefDoc::Array { array } => TypeRef::Array(Box::new(self.type_ref(array)?)),
			TypeRefDoc::Set { set } => TypeRef::Set(Box::new(self.type_ref(set)?)),
			TypeRefDoc::Map { map: (key, value) } => TypeRef::Map(Box::new(self.type_ref(key)?), Box::new(self.type_ref(value)?)),
		})
	}

	// Built-in scalars shadow schema types of the same simple name: an exported
	// `Cfg.DynamicInt` wrapper is still the tagged union on the wire.
	fn named(&self, name: &str) -> Result<TypeRef> {
		let short = simple_name(name);
		if let Some(item) = Primitive::from_name(name).or_else(|| Primitive::from_name(short)) {
			return Ok(TypeRef::Primitive(item));
		}
		if let Some(item) = CustomScalar::from_name(short) {
			return Ok(TypeRef::Custom(item));
		}

		let found = match self.by_name.get(name) {
			Some(id) => Some(*id),
			None => self.schema_type(short)?,
		};
		Ok(match found {
			Some(id) => self.schema_ref(id),
			None => TypeRef::Unsupported(name.into()),
		})
	}

	fn schema_ref(&self, id: TypeId) -> TypeRef {
		match self.docs[id.index()] {
			TypeDoc::Record { .. } => TypeRef::Record(id),
			TypeDoc::Enum { .. } => TypeRef::Enum(id),
		}
	}
}

pub(super) fn build(doc: SchemaDoc) -> Result<Schema> {
	let mut by_name = HashMap::with_capacity(doc.types.len());
	for (idx, item) in doc.types.iter().enumerate() {
		let id = TypeId(u32::try_from(idx).map_err(|_| invalid("too many types"))?);
		if by_name.insert(Box::<str>::from(item.name()), id).is_some() {
			return Err(invalid(format!("duplicate type {}", item.name())));
		}
	}

	let (mut types, formula_operators) = {
		let mut by_simple: HashMap<&str, Vec<TypeId>> = HashMap::new();
		for (name, id) in &by_name {
			by_simple.entry(simple_name(name)).or_default().push(*id);
		}
		let names = Names {
			by_name: &by_name,
			by_simple,
			docs: &doc.types,
		};

		let mut types = Vec::with_capacity(doc.types.len());
		for item in &doc.types {
			types.push(build_type(item, &names)?);
		}

		let formula_operators = match &doc.formula_operators {
			Some(name) => {
				let id = names.schema_type(name)?.ok_or_else(|| BinError::TypeNotFound { name: name.clone() })?;
				if types[id.index()].enum_def().is_none() {
					return Err(invalid(format!("formula operators type {name} is not an enum")));
				}
				Some(id)
			}
			None => None,
		};

		(types, formula_operators)
	};

	link_subtypes(&mut types)?;

	Ok(Schema {
		types,
		by_name,
		formula_operators,
	})
}

fn build_type(item: &TypeDoc, names: &Names<'_>) -> Result<TypeDef> {
	match item {
		TypeDoc::Record {
			name,
			base,
			subtype_id,
			fields,
		} => {
			let base = match base {
				Some(base_name) => {
					let id = names.schema_type(base_name)?.ok_or_else(|| BinError::TypeNotFound { name: base_name.clone() })?;
					if !matches!(names.docs[id.index()], TypeDoc::Record { .. }) {
						return Err(invalid(format!("base {base_name} of {name} is not a record")));
					}
					Some(id)
				}
				None => None,
			};
			match (subtype_id, base) {
				(Some(0), _) => return Err(invalid(format!("{name} uses reserved subtype id 0"))),
				(Some(_), None) => return Err(invalid(format!("{name} has a subtype id but no base"))),
				_ => {}
			}

			let fields = fields
				.iter()
				.map(|field| {
					Ok(FieldDef {
						name: field.name.as_str().into(),
						ty: names.type_ref(&field.ty)?,
						presence_group: field.presence_group,
					})
				})
				.collect::<Result<Vec<_>>>()?;

			Ok(TypeDef {
				name: name.as_str().into(),
				kind: TypeKind::Record,
				fields,
				base,
				subtype_id: *subtype_id,
				subtypes: BTreeMap::new(),
			})
		}
		TypeDoc::Enum { name, signed, values } => {
			let mut parsed = BTreeMap::new();
			for (raw, member) in values {
				let value: i64 = raw
					.trim()
					.parse()
					.map_err(|_| invalid(format!("enum {name} has non-integer value {raw:?}")))?;
				parsed.insert(value, member.as_str().into());
			}

			Ok(TypeDef {
				name: name.as_str().into(),
				kind: TypeKind::Enum(EnumDef { signed: *signed, values: parsed }),
				fields: Vec::new(),
				base: None,
				subtype_id: None,
				subtypes: BTreeMap::new(),
			})
		}
	}
}

fn link_subtypes(types: &mut [TypeDef]) -> Result<()> {
	for (idx, item) in types.iter().enumerate() {
		let mut current = item.base;
		let mut hops = 0;
		while let Some(base) = current {
			hops += 1;
			if base.index() == idx || hops > types.len() {
				return Err(invalid(format!("inheritance cycle through {}", item.name)));
			}
			current = types[base.index()].base;
		}
	}

	let mut seen: HashSet<(usize, u64)> = HashSet::new();
	for idx in 0..types.len() {
		let (Some(base), Some(subtype_id)) = (types[idx].base, types[idx].subtype_id) else {
			continue;
		};

		let mut root = base;
		while let Some(next) = types[root.index()].base {
			root = next;
		}
		if !seen.insert((root.index(), subtype_id)) {
			return Err(invalid(format!(
				"subtype id {subtype_id} of {} is already used under {}",
				types[idx].name,
				types[root.index()].name
			)));
		}

		types[base.index()].subtypes.insert(subtype_id, TypeId(idx as u32));
	}

	Ok(())
}

fn invalid(reason: impl Into<String>) -> BinError {
	BinError::InvalidSchema { reason: reason.into() }
}
