use thiserror::Error;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, BinError>;

/// Errors produced while loading schemas and decoding BinData records.
#[derive(Debug, Error)]
pub enum BinError {
	/// Filesystem or stream IO failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// Schema document was not valid JSON or did not match the expected shape.
	#[error("schema json: {0}")]
	SchemaJson(#[from] serde_json::Error),
	/// Schema document is well-formed JSON but describes an unusable type graph.
	#[error("invalid schema: {reason}")]
	InvalidSchema {
		/// Human-readable reason.
		reason: String,
	},
	/// Requested type name is not part of the schema.
	#[error("type not found: {name}")]
	TypeNotFound {
		/// Requested type name.
		name: String,
	},
	/// Simple type name matched more than one schema type.
	#[error("ambiguous type name {name}: {candidates} candidates")]
	AmbiguousTypeName {
		/// Requested simple name.
		name: String,
		/// Number of matching types.
		candidates: usize,
	},
	/// Not enough bytes remained for a requested read.
	#[error("unexpected end of input at offset {at}, need {need} bytes, remaining {rem}")]
	UnexpectedEndOfInput {
		/// Byte offset where the read was attempted.
		at: usize,
		/// Requested bytes.
		need: usize,
		/// Bytes still available.
		rem: usize,
	},
	/// Boolean byte was neither 0 nor 1.
	#[error("invalid boolean byte 0x{byte:02x} at offset {at}")]
	InvalidBoolEncoding {
		/// Offset of the offending byte.
		at: usize,
		/// Raw byte value.
		byte: u8,
	},
	/// Variable-length integer ran past its byte bound or out of 64-bit range.
	#[error("varint overflow at offset {at}")]
	VarintOverflow {
		/// Offset of the first varint byte.
		at: usize,
	},
	/// Length-prefixed string payload was not UTF-8.
	#[error("invalid utf-8 string of {len} bytes at offset {at}")]
	InvalidUtf8 {
		/// Offset of the string payload.
		at: usize,
		/// Payload byte length.
		len: usize,
	},
	/// Enum discriminant has no symbolic name in the schema.
	#[error("unknown value {value} for enum {type_name}")]
	UnknownEnumValue {
		/// Enum type name.
		type_name: String,
		/// Raw numeric value.
		value: i64,
	},
	/// Subtype discriminant is not registered under the hierarchy root.
	#[error("unknown subtype id {id} in hierarchy of {type_name}")]
	UnknownSubtypeId {
		/// Hierarchy root type name.
		type_name: String,
		/// Discriminant read from the stream.
		id: u64,
	},
	/// Declared field type is outside the decodable type set.
	#[error("unsupported field type {type_name}")]
	UnsupportedFieldType {
		/// Rendered type reference.
		type_name: String,
	},
	/// Tagged-union tag outside the known cases.
	#[error("unhandled {encoding} variant {tag}")]
	UnhandledVariant {
		/// Tagged-union encoding name.
		encoding: &'static str,
		/// Tag value read from the stream.
		tag: u64,
	},
	/// `DynamicFloat` formula used an operator but the schema names no operator enum.
	#[error("formula operator enum is not configured in the schema")]
	FormulaOperatorsUnset,
	/// Signed length prefix was negative.
	#[error("negative length {len} at offset {at}")]
	NegativeLength {
		/// Parsed length.
		len: i64,
		/// Offset after the length prefix.
		at: usize,
	},
	/// Decoder recursion depth exceeded configured limit.
	#[error("decode depth exceeded (max={max_depth})")]
	DepthExceeded {
		/// Configured depth ceiling.
		max_depth: u32,
	},
	/// Collection element count exceeded configured limit.
	#[error("collection too large: count={count}, max={max}")]
	CollectionTooLarge {
		/// Element count read from the stream.
		count: u64,
		/// Maximum permitted element count.
		max: usize,
	},
	/// Strict mode detected undecoded bytes after the top-level value.
	#[error("trailing bytes after {type_name}: leftover={leftover}")]
	TrailingBytes {
		/// Top-level type name.
		type_name: String,
		/// Unconsumed bytes.
		leftover: usize,
	},
	/// Decompression output exceeded configured safety limit.
	#[error("decompressed output exceeded limit {limit} bytes")]
	DecompressedTooLarge {
		/// Maximum allowed output bytes.
		limit: usize,
	},
	/// Container mode string was not recognised.
	#[error("invalid container mode: {mode}")]
	InvalidMode {
		/// User-provided mode string.
		mode: String,
	},
	/// Type name could not be derived from an input file name.
	#[error("cannot derive type name from {path}; pass it explicitly")]
	TypeNameNotDerivable {
		/// Input path as given.
		path: String,
	},
	/// Batch work item line was malformed.
	#[error("invalid work item: {line}")]
	InvalidWorkItem {
		/// Offending stdin line.
		line: String,
	},
	/// One or more batch items failed.
	#[error("{failed} of {total} batch items failed")]
	BatchFailed {
		/// Failed item count.
		failed: usize,
		/// Total item count.
		total: usize,
	},
}
