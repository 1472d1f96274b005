use std::io::Read;

use crate::bindata::{BinError, Result};

/// Ceiling on inflated input size.
pub const MAX_DECOMPRESSED_BYTES: usize = 512 * 1024 * 1024;

/// How input bytes are packed on disk.
///
/// BinData carries no magic number, so this is always chosen by the caller and
/// never sniffed from the buffer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Compression {
	/// Raw record bytes.
	#[default]
	None,
	/// zstd-compressed record bytes.
	Zstd,
}

impl Compression {
	/// Render compression mode as a stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::None => "none",
			Self::Zstd => "zstd",
		}
	}
}

/// Unpack `raw` according to `compression`.
pub fn decode_bytes(raw: Vec<u8>, compression: Compression) -> Result<Vec<u8>> {
	decode_bytes_with_limit(raw, compression, MAX_DECOMPRESSED_BYTES)
}

pub(crate) fn decode_bytes_with_limit(raw: Vec<u8>, compression: Compression, limit: usize) -> Result<Vec<u8>> {
	match compression {
		Compression::None => Ok(raw),
		Compression::Zstd => inflate_zstd(&raw, limit),
	}
}

fn inflate_zstd(raw: &[u8], limit: usize) -> Result<Vec<u8>> {
	let decoder = zstd::stream::read::Decoder::new(raw)?;
	let cap = u64::try_from(limit).unwrap_or(u64::MAX).saturating_add(1);

	let mut out = Vec::new();
	decoder.take(cap).read_to_end(&mut out)?;
	if out.len() > limit {
		return Err(BinError::DecompressedTooLarge { limit });
	}
	Ok(out)
}

#[cfg(test)]
mod tests;
