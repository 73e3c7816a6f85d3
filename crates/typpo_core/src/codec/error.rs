use thiserror::Error;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, TyppoError>;

/// Coarse failure class of a [`TyppoError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
	/// A referenced type, slot, or schema record is missing or malformed.
	Schema,
	/// A kind or scalar encoding has no layout or codec.
	UnsupportedKind,
	/// A value required for writing was never assigned.
	MissingField,
	/// An array's element count is wrong or cannot be determined.
	LengthMismatch,
	/// Factory configuration is invalid.
	Configuration,
	/// Buffer bounds or scalar range violation.
	Buffer,
	/// Filesystem or external input failure.
	Io,
}

/// Errors produced while resolving schemas, computing layouts, and encoding values.
#[derive(Debug, Error)]
pub enum TyppoError {
	/// Filesystem failure while loading a schema file.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// JSON schema text could not be parsed.
	#[error("json schema: {0}")]
	Json(#[from] serde_json::Error),
	/// YAML schema text could not be parsed.
	#[error("yaml schema: {0}")]
	Yaml(#[from] serde_yaml::Error),
	/// Schema file extension does not name a known format.
	#[error("unknown schema format for {path}")]
	UnknownSchemaFormat {
		/// Offending file path.
		path: String,
	},
	/// Type name is neither registered nor synthesizable.
	#[error("unknown type: {name}")]
	UnknownType {
		/// Requested type name.
		name: String,
	},
	/// Slot name does not exist on a struct or union.
	#[error("slot {slot} does not exist in type {type_name}")]
	UnknownSlot {
		/// Struct or union type name.
		type_name: String,
		/// Requested slot name.
		slot: String,
	},
	/// Array type record has no element type.
	#[error("array type {name} has no base element type")]
	MissingArrayBase {
		/// Array type name.
		name: String,
	},
	/// Union type declares no slots.
	#[error("union {type_name} declares no slots")]
	EmptyUnion {
		/// Union type name.
		type_name: String,
	},
	/// Input cannot be coerced into a value of the target type.
	#[error("cannot wrap {got} as {type_name} (expected {expected})")]
	WrapMismatch {
		/// Target type name.
		type_name: String,
		/// Accepted input shape.
		expected: &'static str,
		/// Provided input shape.
		got: &'static str,
	},
	/// Constant lookup on a type without a value.
	#[error("type {name} is not a constant with a value")]
	MissingConstValue {
		/// Requested constant name.
		name: String,
	},
	/// Layout or value creation requested for a kind without one.
	#[error("cannot {op} type {type_name} of kind {kind}")]
	UnsupportedKind {
		/// Type name.
		type_name: String,
		/// Kind label.
		kind: &'static str,
		/// Requested operation.
		op: &'static str,
	},
	/// No scalar accessor exists for this representation and width.
	#[error("unsupported scalar {repr} of {width} bytes in {type_name}")]
	UnsupportedScalar {
		/// Type name.
		type_name: String,
		/// Representation label.
		repr: &'static str,
		/// Byte width.
		width: usize,
	},
	/// Scalar type has no representation.
	#[error("scalar type {type_name} has no repr")]
	MissingRepr {
		/// Type name.
		type_name: String,
	},
	/// Operation does not apply to this value kind.
	#[error("{op} is not supported on {type_name} of kind {kind}")]
	UnsupportedOperation {
		/// Type name.
		type_name: String,
		/// Kind label.
		kind: &'static str,
		/// Requested operation.
		op: &'static str,
	},
	/// Struct slot was unset at write time.
	#[error("no value for field {slot} of {type_name}")]
	MissingField {
		/// Struct type name.
		type_name: String,
		/// Unset slot name.
		slot: String,
	},
	/// Scalar was written before being assigned.
	#[error("scalar {type_name} has no value")]
	UnsetScalar {
		/// Scalar type name.
		type_name: String,
	},
	/// Union was written before any slot was assigned.
	#[error("union {type_name} has no active slot")]
	NoActiveSlot {
		/// Union type name.
		type_name: String,
	},
	/// Element count disagrees with the declared array length.
	#[error("incorrect array length when writing {type_name}: expected {expected}, got {actual}")]
	LengthMismatch {
		/// Array type name.
		type_name: String,
		/// Declared length.
		expected: usize,
		/// Actual element count.
		actual: usize,
	},
	/// Array read requested without a declared length.
	#[error("cannot read array {type_name} of unknown length")]
	UnknownLength {
		/// Array type name.
		type_name: String,
	},
	/// Array read length exceeded the configured limit.
	#[error("array too large: count={count}, max={max}")]
	ArrayTooLarge {
		/// Requested element count.
		count: usize,
		/// Configured limit.
		max: usize,
	},
	/// Target platform identifier is not recognized.
	#[error("unknown platform: {id}")]
	UnknownPlatform {
		/// Provided identifier.
		id: String,
	},
	/// Type nesting exceeded the configured depth.
	#[error("type nesting depth exceeded (max={max_depth}) at {type_name}")]
	DepthExceeded {
		/// Configured ceiling.
		max_depth: u32,
		/// Type being sized when the limit was hit.
		type_name: String,
	},
	/// Access runs past the end of the buffer.
	#[error("buffer too small: access at {at} needs {need} bytes, buffer holds {len}")]
	BufferTooSmall {
		/// Byte offset of the access.
		at: usize,
		/// Requested width.
		need: usize,
		/// Buffer length.
		len: usize,
	},
	/// Scalar does not fit the encoding of its type.
	#[error("value {value} out of range for {type_name}")]
	ValueOutOfRange {
		/// Scalar type name.
		type_name: String,
		/// Rendered offending value.
		value: String,
	},
	/// Offset arithmetic for a placed value does not fit in `usize`.
	#[error("offset overflow: {offset} + {delta}")]
	OffsetOverflow {
		/// Base offset.
		offset: usize,
		/// Relative displacement that could not be added.
		delta: usize,
	},
	/// Value input text could not be parsed.
	#[error("invalid value input: {reason}")]
	InvalidValue {
		/// Parser diagnostic.
		reason: String,
	},
	/// Byte input text is not valid hex.
	#[error("invalid hex input: {input}")]
	InvalidHex {
		/// Offending input.
		input: String,
	},
}

impl TyppoError {
	/// Map this error onto its coarse category.
	pub fn category(&self) -> ErrorCategory {
		match self {
			Self::Json(_)
			| Self::Yaml(_)
			| Self::UnknownSchemaFormat { .. }
			| Self::UnknownType { .. }
			| Self::UnknownSlot { .. }
			| Self::MissingArrayBase { .. }
			| Self::EmptyUnion { .. }
			| Self::WrapMismatch { .. }
			| Self::MissingConstValue { .. } => ErrorCategory::Schema,
			Self::UnsupportedKind { .. } | Self::UnsupportedScalar { .. } | Self::MissingRepr { .. } | Self::UnsupportedOperation { .. } => {
				ErrorCategory::UnsupportedKind
			}
			Self::MissingField { .. } | Self::UnsetScalar { .. } | Self::NoActiveSlot { .. } => ErrorCategory::MissingField,
			Self::LengthMismatch { .. } | Self::UnknownLength { .. } | Self::ArrayTooLarge { .. } => ErrorCategory::LengthMismatch,
			Self::UnknownPlatform { .. } | Self::DepthExceeded { .. } => ErrorCategory::Configuration,
			Self::BufferTooSmall { .. } | Self::ValueOutOfRange { .. } | Self::OffsetOverflow { .. } => ErrorCategory::Buffer,
			Self::Io(_) | Self::InvalidHex { .. } | Self::InvalidValue { .. } => ErrorCategory::Io,
		}
	}
}
