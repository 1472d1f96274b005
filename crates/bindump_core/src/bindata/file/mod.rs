use std::fs;
use std::path::Path;

use tracing::debug;

use crate::bindata::compression::{Compression, decode_bytes};
use crate::bindata::container::{ContainerSpec, decode_container};
use crate::bindata::decode::DecodeOptions;
use crate::bindata::schema::Schema;
use crate::bindata::value::Value;
use crate::bindata::{BinError, Result};

/// BinData input loaded from disk, inflated when the caller asks for zstd.
pub struct BinFile {
	/// Compression the source bytes were unpacked with.
	pub compression: Compression,
	bytes: Vec<u8>,
}

impl BinFile {
	/// Read an input file and unpack it per `compression`.
	pub fn open(path: impl AsRef<Path>, compression: Compression) -> Result<Self> {
		let path = path.as_ref();
		let raw = fs::read(path)?;
		let raw_len = raw.len();
		let bytes = decode_bytes(raw, compression)?;
		debug!(path = %path.display(), compression = compression.as_str(), raw_len, len = bytes.len(), "opened input");

		Ok(Self { compression, bytes })
	}

	/// Wrap bytes already in memory.
	pub fn from_bytes(raw: Vec<u8>, compression: Compression) -> Result<Self> {
		let bytes = decode_bytes(raw, compression)?;
		Ok(Self { compression, bytes })
	}

	/// Return record bytes after decompression.
	pub fn bytes(&self) -> &[u8] {
		&self.bytes
	}

	/// Decode the whole buffer as records of `type_name` arranged per `spec`.
	pub fn decode(&self, schema: &Schema, type_name: &str, spec: ContainerSpec, options: &DecodeOptions) -> Result<Value> {
		decode_container(schema, &self.bytes, type_name, spec, options)
	}
}

/// Derive a type name from an input path: the file stem up to the first `_`.
///
/// `ConfigAbility_Avatar_Eula.bin` yields `ConfigAbility`.
pub fn derive_type_name(path: &Path) -> Result<String> {
	let not_derivable = || BinError::TypeNameNotDerivable {
		path: path.display().to_string(),
	};

	let stem = path.file_stem().and_then(|stem| stem.to_str()).ok_or_else(not_derivable)?;
	match stem.split_once('_') {
		Some((prefix, _)) if !prefix.is_empty() => Ok(prefix.to_owned()),
		_ => Err(not_derivable()),
	}
}
