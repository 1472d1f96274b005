use std::path::{Path, PathBuf};

use bindump::bindata::{Result, Schema, TypeDef, TypeId, TypeKind, TypeRef};

use crate::cmd::util::emit_json;

#[derive(clap::Args)]
pub struct Args {
	/// JSON schema document.
	pub schema: PathBuf,
	/// Show one type's inheritance chain and fields.
	#[arg(long = "type")]
	pub type_name: Option<String>,
	#[arg(long)]
	pub json: bool,
}

/// Print schema totals, or the flattened layout of one type.
pub fn run(args: Args) -> Result<()> {
	let Args { schema: path, type_name, json } = args;
	let schema = Schema::from_json_file(&path)?;

	match type_name {
		Some(name) => {
			let id = schema.resolve(&name)?;
			let layout = type_layout(&schema, id);
			if json {
				return emit_json(&layout);
			}
			print_layout(&layout);
		}
		None => {
			let summary = summarize(&schema, &path);
			if json {
				return emit_json(&summary);
			}
			println!("path: {}", summary.path);
			println!("types: {}", summary.types);
			println!("records: {}", summary.records);
			println!("enums: {}", summary.enums);
			println!("polymorphic: {}", summary.polymorphic);
			println!("unsupported_fields: {}", summary.unsupported_fields);
			println!("formula_operators: {}", summary.formula_operators.as_deref().unwrap_or("-"));
		}
	}

	Ok(())
}

#[derive(serde::Serialize)]
pub(crate) struct SchemaSummary {
	pub path: String,
	pub types: usize,
	pub records: usize,
	pub enums: usize,
	pub polymorphic: usize,
	pub unsupported_fields: usize,
	pub formula_operators: Option<String>,
}

pub(crate) fn summarize(schema: &Schema, path: &Path) -> SchemaSummary {
	let types = schema.types();
	let enums = types.iter().filter(|item| item.enum_def().is_some()).count();
	let unsupported_fields = types
		.iter()
		.flat_map(|item| &item.fields)
		.filter(|field| matches!(field.ty, TypeRef::Unsupported(_)))
		.count();

	SchemaSummary {
		path: path.display().to_string(),
		types: types.len(),
		records: types.len() - enums,
		enums,
		polymorphic: types.iter().filter(|item| item.is_polymorphic()).count(),
		unsupported_fields,
		formula_operators: schema.formula_operators().map(|id| schema.get(id).name.to_string()),
	}
}

#[derive(serde::Serialize)]
pub(crate) struct TypeLayout {
	pub name: String,
	pub kind: &'static str,
	pub chain: Vec<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub subtype_id: Option<u64>,
	pub subtypes: Vec<SubtypeJson>,
	pub fields: Vec<FieldJson>,
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub values: Vec<EnumValueJson>,
}

#[derive(serde::Serialize)]
pub(crate) struct SubtypeJson {
	pub id: u64,
	pub name: String,
}

#[derive(serde::Serialize)]
pub(crate) struct FieldJson {
	pub owner: String,
	pub name: String,
	#[serde(rename = "type")]
	pub ty: String,
	pub presence_group: bool,
}

#[derive(serde::Serialize)]
pub(crate) struct EnumValueJson {
	pub value: i64,
	pub name: String,
}

pub(crate) fn type_layout(schema: &Schema, id: TypeId) -> TypeLayout {
	let item = schema.get(id);
	let chain = schema.chain(id);

	let fields = chain
		.iter()
		.map(|owner| schema.get(*owner))
		.flat_map(|owner: &TypeDef| {
			owner.fields.iter().map(move |field| FieldJson {
				owner: owner.name.to_string(),
				name: field.name.to_string(),
				ty: schema.display(&field.ty).to_string(),
				presence_group: field.presence_group,
			})
		})
		.collect();

	let values = match &item.kind {
		TypeKind::Enum(def) => def
			.values
			.iter()
			.map(|(value, name)| EnumValueJson {
				value: *value,
				name: name.to_string(),
			})
			.collect(),
		TypeKind::Record => Vec::new(),
	};

	TypeLayout {
		name: item.name.to_string(),
		kind: match item.kind {
			TypeKind::Record => "record",
			TypeKind::Enum(_) => "enum",
		},
		chain: chain.iter().map(|link| schema.get(*link).name.to_string()).collect(),
		subtype_id: item.subtype_id,
		subtypes: item
			.subtypes
			.iter()
			.map(|(sub_id, sub)| SubtypeJson {
				id: *sub_id,
				name: schema.get(*sub).name.to_string(),
			})
			.collect(),
		fields,
		values,
	}
}

fn print_layout(layout: &TypeLayout) {
	println!("type: {}", layout.name);
	println!("kind: {}", layout.kind);
	println!("chain: {}", layout.chain.join(" -> "));
	if let Some(id) = layout.subtype_id {
		println!("subtype_id: {id}");
	}
	for sub in &layout.subtypes {
		println!("subtype: {} {}", sub.id, sub.name);
	}
	println!("field_count: {}", layout.fields.len());
	for field in &layout.fields {
		let group = if field.presence_group { " (shares next bit)" } else { "" };
		println!("  {} {}{}", field.ty, field.name, group);
	}
	for value in &layout.values {
		println!("  {} = {}", value.name, value.value);
	}
}
