use super::{Compression, decode_bytes, decode_bytes_with_limit};
use crate::bindata::BinError;

#[test]
fn raw_bytes_pass_through() {
	let bytes = decode_bytes(vec![0x01, 0x0a], Compression::None).expect("raw");
	assert_eq!(bytes, [0x01, 0x0a]);
	assert_eq!(Compression::default(), Compression::None);
	assert_eq!(Compression::None.as_str(), "none");
}

#[test]
fn raw_bytes_that_look_like_zstd_are_not_inflated() {
	let raw = vec![0x28, 0xB5, 0x2F, 0xFD];
	let bytes = decode_bytes(raw.clone(), Compression::None).expect("raw");
	assert_eq!(bytes, raw);
}

#[test]
fn zstd_frames_are_inflated() {
	let payload: Vec<u8> = (0..4096_u32).map(|idx| (idx % 251) as u8).collect();
	let packed = zstd::encode_all(payload.as_slice(), 3).expect("compress");

	let bytes = decode_bytes(packed, Compression::Zstd).expect("inflate");
	assert_eq!(bytes, payload);
}

#[test]
fn inflate_limit_is_enforced() {
	let packed = zstd::encode_all(vec![0_u8; 10_000].as_slice(), 3).expect("compress");

	let err = decode_bytes_with_limit(packed.clone(), Compression::Zstd, 1024).expect_err("over limit");
	assert!(matches!(err, BinError::DecompressedTooLarge { limit: 1024 }));

	let exact = decode_bytes_with_limit(packed, Compression::Zstd, 10_000).expect("at limit");
	assert_eq!(exact.len(), 10_000);
}

#[test]
fn corrupt_frame_is_io_error() {
	let mut packed = zstd::encode_all(b"hello world".as_slice(), 3).expect("compress");
	packed.truncate(6);

	let err = decode_bytes(packed, Compression::Zstd).expect_err("corrupt");
	assert!(matches!(err, BinError::Io(_)));
}
