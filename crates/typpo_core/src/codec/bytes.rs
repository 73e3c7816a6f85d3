use crate::codec::{Endianness, Repr, Result, Scalar, TyppoError};

/// Decode a primitive from an exact-width slice with the selected byte order.
macro_rules! decode {
	($ty:ty, $raw:expr, $endian:expr) => {{
		let mut arr = [0_u8; std::mem::size_of::<$ty>()];
		arr.copy_from_slice($raw);
		match $endian {
			Endianness::Little => <$ty>::from_le_bytes(arr),
			Endianness::Big => <$ty>::from_be_bytes(arr),
		}
	}};
}

/// Encode a primitive with the selected byte order.
macro_rules! encode {
	($value:expr, $endian:expr) => {
		match $endian {
			Endianness::Little => $value.to_le_bytes(),
			Endianness::Big => $value.to_be_bytes(),
		}
	};
}

/// Scalar encodings with a buffer accessor, keyed by representation and byte width.
const ACCESSORS: &[(Repr, usize, &str)] = &[
	(Repr::Integer, 1, "Int8"),
	(Repr::Integer, 2, "Int16"),
	(Repr::Integer, 4, "Int32"),
	(Repr::Integer, 8, "Int64"),
	(Repr::Unsigned, 1, "UInt8"),
	(Repr::Unsigned, 2, "UInt16"),
	(Repr::Unsigned, 4, "UInt32"),
	(Repr::Unsigned, 8, "UInt64"),
	(Repr::Floating, 4, "Float"),
	(Repr::Floating, 8, "Double"),
];

/// Stateless read/write accessor for one scalar encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScalarCodec {
	/// Scalar representation.
	pub repr: Repr,
	/// Byte width.
	pub width: usize,
	/// Byte order; ignored for single-byte widths.
	pub endian: Endianness,
	base: &'static str,
}

impl ScalarCodec {
	/// Look up the accessor for an encoding, if one exists.
	pub fn select(repr: Repr, width: usize, endian: Endianness) -> Option<Self> {
		ACCESSORS
			.iter()
			.find(|(item_repr, item_width, _)| *item_repr == repr && *item_width == width)
			.map(|&(_, _, base)| Self { repr, width, endian, base })
	}

	/// Accessor name such as `Int8`, `UInt16LE`, or `DoubleBE`.
	pub fn accessor_name(&self) -> String {
		if self.width == 1 {
			return self.base.to_owned();
		}
		let suffix = match self.endian {
			Endianness::Little => "LE",
			Endianness::Big => "BE",
		};
		format!("{}{suffix}", self.base)
	}

	/// Decode the scalar stored at `at`.
	pub fn read(&self, buf: &[u8], at: usize) -> Result<Scalar> {
		let end = checked_end(buf.len(), at, self.width)?;
		let raw = &buf[at..end];
		Ok(match (self.repr, self.width) {
			(Repr::Integer, 1) => Scalar::Int(i64::from(raw[0] as i8)),
			(Repr::Integer, 2) => Scalar::Int(i64::from(decode!(i16, raw, self.endian))),
			(Repr::Integer, 4) => Scalar::Int(i64::from(decode!(i32, raw, self.endian))),
			(Repr::Integer, _) => Scalar::Int(decode!(i64, raw, self.endian)),
			(Repr::Unsigned, 1) => Scalar::UInt(u64::from(raw[0])),
			(Repr::Unsigned, 2) => Scalar::UInt(u64::from(decode!(u16, raw, self.endian))),
			(Repr::Unsigned, 4) => Scalar::UInt(u64::from(decode!(u32, raw, self.endian))),
			(Repr::Unsigned, _) => Scalar::UInt(decode!(u64, raw, self.endian)),
			(Repr::Floating, 4) => Scalar::Float(f64::from(decode!(f32, raw, self.endian))),
			(Repr::Floating, _) => Scalar::Float(decode!(f64, raw, self.endian)),
		})
	}

	/// Encode `value` at `at`, rejecting values that do not fit the encoding.
	pub fn write(&self, buf: &mut [u8], at: usize, value: Scalar, type_name: &str) -> Result<()> {
		let end = checked_end(buf.len(), at, self.width)?;
		let out = &mut buf[at..end];
		match self.repr {
			Repr::Integer | Repr::Unsigned => {
				let int = value.as_i128().filter(|int| self.int_range().contains(int)).ok_or_else(|| TyppoError::ValueOutOfRange {
					type_name: type_name.to_owned(),
					value: value.to_string(),
				})?;
				match (self.repr, self.width) {
					(Repr::Integer, 1) => out[0] = (int as i8) as u8,
					(Repr::Integer, 2) => out.copy_from_slice(&encode!(int as i16, self.endian)),
					(Repr::Integer, 4) => out.copy_from_slice(&encode!(int as i32, self.endian)),
					(Repr::Integer, _) => out.copy_from_slice(&encode!(int as i64, self.endian)),
					(_, 1) => out[0] = int as u8,
					(_, 2) => out.copy_from_slice(&encode!(int as u16, self.endian)),
					(_, 4) => out.copy_from_slice(&encode!(int as u32, self.endian)),
					(_, _) => out.copy_from_slice(&encode!(int as u64, self.endian)),
				}
			}
			Repr::Floating if self.width == 4 => out.copy_from_slice(&encode!(value.as_f64() as f32, self.endian)),
			Repr::Floating => out.copy_from_slice(&encode!(value.as_f64(), self.endian)),
		}
		Ok(())
	}

	fn int_range(&self) -> std::ops::RangeInclusive<i128> {
		let bits = (self.width * 8) as u32;
		match self.repr {
			Repr::Unsigned => 0..=((1_i128 << bits) - 1),
			_ => -(1_i128 << (bits - 1))..=((1_i128 << (bits - 1)) - 1),
		}
	}
}

fn checked_end(len: usize, at: usize, need: usize) -> Result<usize> {
	at.checked_add(need)
		.filter(|end| *end <= len)
		.ok_or(TyppoError::BufferTooSmall { at, need, len })
}
