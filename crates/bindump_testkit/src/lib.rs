//! Shared test helpers for workspace crates.

use std::path::{Path, PathBuf};

/// Resolve the workspace root path.
pub fn workspace_root() -> PathBuf {
	let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
	manifest_dir
		.join("..")
		.join("..")
		.canonicalize()
		.unwrap_or_else(|_| manifest_dir.join("..").join(".."))
}

/// Resolve the workspace target directory.
pub fn target_dir() -> PathBuf {
	std::env::var_os("CARGO_TARGET_DIR")
		.map(PathBuf::from)
		.unwrap_or_else(|| workspace_root().join("target"))
}

/// Create (if needed) and return a per-test scratch directory under the target dir.
pub fn scratch_dir(name: &str) -> PathBuf {
	let dir = target_dir().join("bindump-scratch").join(name);
	std::fs::create_dir_all(&dir).expect("scratch dir is creatable");
	dir
}

/// Write `bytes` to `<scratch_dir(test)>/<file>` and return the path.
pub fn write_scratch(test: &str, file: &str, bytes: &[u8]) -> PathBuf {
	let path = scratch_dir(test).join(file);
	std::fs::write(&path, bytes).expect("scratch file is writable");
	path
}

/// Serialize `doc` as JSON into a scratch file and return the path.
pub fn write_scratch_json(test: &str, file: &str, doc: &serde_json::Value) -> PathBuf {
	let text = serde_json::to_vec_pretty(doc).expect("json serializes");
	write_scratch(test, file, &text)
}

/// Byte builder producing BinData-encoded fixtures.
#[derive(Debug, Clone, Default)]
pub struct ByteWriter {
	buf: Vec<u8>,
}

impl ByteWriter {
	/// Create an empty writer.
	pub fn new() -> Self {
		Self::default()
	}

	/// Return the written bytes.
	pub fn into_bytes(self) -> Vec<u8> {
		self.buf
	}

	/// Borrow the written bytes.
	pub fn as_bytes(&self) -> &[u8] {
		&self.buf
	}

	/// Append raw bytes.
	pub fn bytes(mut self, bytes: &[u8]) -> Self {
		self.buf.extend_from_slice(bytes);
		self
	}

	/// Append one byte.
	pub fn u8(self, value: u8) -> Self {
		self.bytes(&[value])
	}

	/// Append a strict boolean byte.
	pub fn bool(self, value: bool) -> Self {
		self.u8(u8::from(value))
	}

	/// Append a little-endian `i16`.
	pub fn i16(self, value: i16) -> Self {
		self.bytes(&value.to_le_bytes())
	}

	/// Append a little-endian `u16`.
	pub fn u16(self, value: u16) -> Self {
		self.bytes(&value.to_le_bytes())
	}

	/// Append a little-endian `f32`.
	pub fn f32(self, value: f32) -> Self {
		self.bytes(&value.to_le_bytes())
	}

	/// Append a little-endian `f64`.
	pub fn f64(self, value: f64) -> Self {
		self.bytes(&value.to_le_bytes())
	}

	/// Append a minimal unsigned LEB128 varint.
	pub fn varuint(self, value: u64) -> Self {
		self.bytes(&encode_varuint(value))
	}

	/// Append a zig-zag signed varint.
	pub fn varint(self, value: i64) -> Self {
		self.varuint(zigzag_encode(value))
	}

	/// Append a varuint-length-prefixed UTF-8 string.
	pub fn string(self, value: &str) -> Self {
		self.varuint(value.len() as u64).bytes(value.as_bytes())
	}
}

/// Encode `value` as a minimal unsigned LEB128 varint.
pub fn encode_varuint(mut value: u64) -> Vec<u8> {
	let mut out = Vec::with_capacity(10);
	loop {
		let mut byte = (value & 0x7f) as u8;
		value >>= 7;
		if value != 0 {
			byte |= 0x80;
		}
		out.push(byte);
		if value == 0 {
			return out;
		}
	}
}

/// Map signed integers onto unsigned ones: 0 -> 0, -1 -> 1, 1 -> 2, ...
pub fn zigzag_encode(value: i64) -> u64 {
	((value << 1) ^ (value >> 63)) as u64
}
