use crate::bindata::Result;
use crate::bindata::bytes::Cursor;

/// Presence bits for one record's own fields, read ahead of the field payloads.
///
/// Bit `i` is bit `i % 8` (least significant first) of byte `i / 8`.
#[derive(Debug, Clone)]
pub struct PresenceMask {
	bits: Vec<u8>,
}

impl PresenceMask {
	/// Read the mask covering `field_count` fields.
	///
	/// Up to eight fields use a single byte; wider records use `ceil(n / 8)` bytes.
	pub fn read(cursor: &mut Cursor<'_>, field_count: usize) -> Result<Self> {
		let len = field_count.div_ceil(8).max(1);
		let bits = cursor.read_exact(len)?.to_vec();
		Ok(Self { bits })
	}

	/// Return whether field bit `index` is set.
	pub fn test(&self, index: usize) -> bool {
		self.bits.get(index / 8).is_some_and(|byte| byte & (1 << (index % 8)) != 0)
	}

	/// Number of mask bytes consumed from the stream.
	pub fn byte_len(&self) -> usize {
		self.bits.len()
	}
}
