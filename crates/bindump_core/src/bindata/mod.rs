mod bytes;
mod compression;
mod container;
mod decode;
mod dynamic;
mod error;
mod file;
mod mask;
mod record;
mod scalar;
mod schema;
mod value;

/// Forward-only primitive reader and varint helpers.
pub use bytes::{Cursor, Endianness, MAX_VARINT_BYTES, zigzag_decode};
/// Input packing selected by the caller.
pub use compression::{Compression, MAX_DECOMPRESSED_BYTES, decode_bytes};
/// Top-level container shapes and entry points.
pub use container::{ContainerMode, ContainerSpec, decode_container, decode_record};
/// Schema-driven decoding state and options.
pub use decode::{DecodeContext, DecodeOptions, decode_type};
/// Error and result aliases.
pub use error::{BinError, Result};
/// Input file loading.
pub use file::{BinFile, derive_type_name};
/// Optional-field presence bits.
pub use mask::PresenceMask;
/// Resolved type graph and its JSON document form.
pub use schema::{
	CustomScalar, EnumDef, FieldDef, FieldDoc, Primitive, Schema, SchemaDoc, TypeDef, TypeDoc, TypeId, TypeKind, TypeRef, TypeRefDisplay, TypeRefDoc,
	simple_name,
};
/// Decoded runtime value types.
pub use value::{Entry, TYPE_KEY, Value};
