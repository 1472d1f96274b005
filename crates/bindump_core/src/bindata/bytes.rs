use crate::bindata::{BinError, Result};

/// Longest accepted varint encoding in bytes, padding groups included.
pub const MAX_VARINT_BYTES: usize = 20;

/// Byte order for fixed-width multi-byte reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endianness {
	/// Least significant byte first.
	Little,
	/// Most significant byte first.
	Big,
}

/// Forward-only bounded cursor over an immutable byte slice.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
	bytes: &'a [u8],
	pos: usize,
}

impl<'a> Cursor<'a> {
	/// Create a cursor at position 0.
	pub fn new(bytes: &'a [u8]) -> Self {
		Self { bytes, pos: 0 }
	}

	/// Return current byte offset.
	pub fn pos(&self) -> usize {
		self.pos
	}

	/// Return remaining unread bytes.
	pub fn remaining(&self) -> usize {
		self.bytes.len().saturating_sub(self.pos)
	}

	/// Read exactly `n` bytes and advance cursor.
	pub fn read_exact(&mut self, n: usize) -> Result<&'a [u8]> {
		if n > self.remaining() {
			return Err(BinError::UnexpectedEndOfInput {
				at: self.pos,
				need: n,
				rem: self.remaining(),
			});
		}

		let start = self.pos;
		self.pos += n;
		Ok(&self.bytes[start..self.pos])
	}

	fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
		let raw = self.read_exact(N)?;
		let mut buf = [0_u8; N];
		buf.copy_from_slice(raw);
		Ok(buf)
	}

	/// Read one unsigned byte.
	pub fn read_u8(&mut self) -> Result<u8> {
		Ok(self.read_exact(1)?[0])
	}

	/// Read one signed byte.
	pub fn read_i8(&mut self) -> Result<i8> {
		Ok(i8::from_le_bytes(self.read_array()?))
	}

	/// Read a strict boolean byte: `0` or `1`.
	pub fn read_bool(&mut self) -> Result<bool> {
		let at = self.pos;
		match self.read_u8()? {
			0 => Ok(false),
			1 => Ok(true),
			byte => Err(BinError::InvalidBoolEncoding { at, byte }),
		}
	}

	/// Read a `u16` using the selected endianness.
	pub fn read_u16(&mut self, endianness: Endianness) -> Result<u16> {
		let buf = self.read_array()?;
		Ok(match endianness {
			Endianness::Little => u16::from_le_bytes(buf),
			Endianness::Big => u16::from_be_bytes(buf),
		})
	}

	/// Read a little-endian `u16`.
	pub fn read_u16_le(&mut self) -> Result<u16> {
		self.read_u16(Endianness::Little)
	}

	/// Read a big-endian `u16`.
	pub fn read_u16_be(&mut self) -> Result<u16> {
		self.read_u16(Endianness::Big)
	}

	/// Read a little-endian `i16`.
	pub fn read_i16_le(&mut self) -> Result<i16> {
		Ok(i16::from_le_bytes(self.read_array()?))
	}

	/// Read a little-endian `u32`.
	pub fn read_u32_le(&mut self) -> Result<u32> {
		Ok(u32::from_le_bytes(self.read_array()?))
	}

	/// Read a little-endian `i32`.
	pub fn read_i32_le(&mut self) -> Result<i32> {
		Ok(i32::from_le_bytes(self.read_array()?))
	}

	/// Read a little-endian `u64`.
	pub fn read_u64_le(&mut self) -> Result<u64> {
		Ok(u64::from_le_bytes(self.read_array()?))
	}

	/// Read a little-endian `i64`.
	pub fn read_i64_le(&mut self) -> Result<i64> {
		Ok(i64::from_le_bytes(self.read_array()?))
	}

	/// Read a little-endian IEEE-754 `f32`.
	pub fn read_f32_le(&mut self) -> Result<f32> {
		Ok(f32::from_le_bytes(self.read_array()?))
	}

	/// Read a little-endian IEEE-754 `f64`.
	pub fn read_f64_le(&mut self) -> Result<f64> {
		Ok(f64::from_le_bytes(self.read_array()?))
	}

	/// Read an unsigned LEB128 varint.
	pub fn read_varuint(&mut self) -> Result<u64> {
		let at = self.pos;
		let mut result = 0_u64;

		for group in 0..MAX_VARINT_BYTES {
			let byte = self.read_u8()?;
			let payload = u64::from(byte & 0x7f);

			if payload != 0 {
				let shift = 7 * group as u32;
				if shift >= u64::BITS || (payload << shift) >> shift != payload {
					return Err(BinError::VarintOverflow { at });
				}
				result |= payload << shift;
			}

			if byte & 0x80 == 0 {
				return Ok(result);
			}
		}

		Err(BinError::VarintOverflow { at })
	}

	/// Read a zig-zag encoded signed varint.
	pub fn read_varint(&mut self) -> Result<i64> {
		Ok(zigzag_decode(self.read_varuint()?))
	}

	/// Read a varuint length prefix followed by that many UTF-8 bytes.
	pub fn read_string(&mut self) -> Result<Box<str>> {
		let len_at = self.pos;
		let len = self.read_varuint()?;
		let len = usize::try_from(len).map_err(|_| BinError::UnexpectedEndOfInput {
			at: len_at,
			need: usize::MAX,
			rem: self.remaining(),
		})?;

		let at = self.pos;
		let raw = self.read_exact(len)?;
		let text = std::str::from_utf8(raw).map_err(|_| BinError::InvalidUtf8 { at, len })?;
		Ok(text.into())
	}
}

/// Invert the zig-zag mapping: 0 -> 0, 1 -> -1, 2 -> 1, 3 -> -2, ...
#[inline]
pub fn zigzag_decode(encoded: u64) -> i64 {
	((encoded >> 1) as i64) ^ -((encoded & 1) as i64)
}
