use std::fmt;

use serde::{Deserialize, Serialize};

/// Structural category of a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
	/// Scalar stored directly in the buffer.
	Base,
	/// Scalar whose canonical form lives in a foreign component.
	Alien,
	/// Ordered named fields laid out sequentially.
	Struct,
	/// Named fields overlaid at the same offset.
	Union,
	/// Homogeneous sequence of one element type.
	Array,
	/// Named constant with no storage.
	Const,
}

impl Kind {
	/// Lowercase label used in schema files and messages.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Base => "base",
			Self::Alien => "alien",
			Self::Struct => "struct",
			Self::Union => "union",
			Self::Array => "array",
			Self::Const => "const",
		}
	}

	/// Whether values of this kind hold a single scalar.
	pub fn is_scalar(self) -> bool {
		matches!(self, Self::Base | Self::Alien)
	}
}

/// Scalar representation for base and alien types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Repr {
	/// Two's complement signed integer.
	Integer,
	/// Unsigned integer.
	Unsigned,
	/// IEEE 754 float.
	Floating,
}

impl Repr {
	/// Lowercase label used in schema files and messages.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Integer => "integer",
			Self::Unsigned => "unsigned",
			Self::Floating => "floating",
		}
	}
}

/// Byte order of a scalar encoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Endianness {
	/// Least significant byte first.
	#[default]
	Little,
	/// Most significant byte first.
	Big,
}

/// Declared byte size of a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSize", into = "RawSize")]
pub enum TypeSize {
	/// Explicit byte count.
	Bytes(usize),
	/// Native word width of the target platform.
	Native,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RawSize {
	Bytes(usize),
	Word(String),
}

impl TryFrom<RawSize> for TypeSize {
	type Error = String;

	fn try_from(raw: RawSize) -> std::result::Result<Self, Self::Error> {
		match raw {
			RawSize::Bytes(bytes) => Ok(Self::Bytes(bytes)),
			RawSize::Word(word) if word == "native" => Ok(Self::Native),
			RawSize::Word(word) => Err(format!("invalid size {word:?}, expected a byte count or \"native\"")),
		}
	}
}

impl From<TypeSize> for RawSize {
	fn from(size: TypeSize) -> Self {
		match size {
			TypeSize::Bytes(bytes) => Self::Bytes(bytes),
			TypeSize::Native => Self::Word("native".to_owned()),
		}
	}
}

/// One named field of a struct or union.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
	/// Field name.
	pub name: String,
	/// Name of the field's type.
	#[serde(rename = "type")]
	pub type_name: String,
}

impl Slot {
	/// Build a slot from its name and type name.
	pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			type_name: type_name.into(),
		}
	}
}

/// One scalar payload.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
	/// Signed integer.
	Int(i64),
	/// Unsigned integer too large for `i64`, or read from an unsigned type.
	UInt(u64),
	/// Floating point number.
	Float(f64),
}

impl Scalar {
	/// Exact integer value, if this scalar holds an integral number.
	pub fn as_i128(self) -> Option<i128> {
		match self {
			Self::Int(v) => Some(i128::from(v)),
			Self::UInt(v) => Some(i128::from(v)),
			Self::Float(v) if v.is_finite() && v.fract() == 0.0 && v.abs() < 1.8e19 => Some(v as i128),
			Self::Float(_) => None,
		}
	}

	/// Numeric value widened to `f64`.
	pub fn as_f64(self) -> f64 {
		match self {
			Self::Int(v) => v as f64,
			Self::UInt(v) => v as f64,
			Self::Float(v) => v,
		}
	}
}

impl fmt::Display for Scalar {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Int(v) => write!(f, "{v}"),
			Self::UInt(v) => write!(f, "{v}"),
			Self::Float(v) => write!(f, "{v}"),
		}
	}
}

macro_rules! scalar_from {
	($variant:ident: $($ty:ty),+) => {
		$(impl From<$ty> for Scalar {
			fn from(value: $ty) -> Self {
				Self::$variant(value.into())
			}
		})+
	};
}

scalar_from!(Int: i8, i16, i32, i64);
scalar_from!(UInt: u8, u16, u32, u64);
scalar_from!(Float: f32, f64);

/// Immutable schema node describing one named type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Type {
	/// Unique registry key.
	pub name: String,
	/// Structural category.
	pub kind: Kind,
	/// Declared size; absent means computed from the structure.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub size: Option<TypeSize>,
	/// Scalar representation for base and alien types.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub repr: Option<Repr>,
	/// Scalar byte order.
	#[serde(default)]
	pub endian: Endianness,
	/// Suppress alignment padding between struct slots.
	#[serde(default)]
	pub packed: bool,
	/// Struct or union fields in declaration order.
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub slots: Vec<Slot>,
	/// Array element type name.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub base: Option<String>,
	/// Fixed array element count.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub length: Option<usize>,
	/// Value of a constant.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub value: Option<Scalar>,
}

impl Type {
	fn new(name: impl Into<String>, kind: Kind) -> Self {
		Self {
			name: name.into(),
			kind,
			size: None,
			repr: None,
			endian: Endianness::Little,
			packed: false,
			slots: Vec::new(),
			base: None,
			length: None,
			value: None,
		}
	}

	/// Scalar type with an explicit byte size.
	pub fn base(name: impl Into<String>, size: usize, repr: Repr) -> Self {
		Self {
			size: Some(TypeSize::Bytes(size)),
			repr: Some(repr),
			..Self::new(name, Kind::Base)
		}
	}

	/// Scalar type sized to the target platform's word.
	pub fn native(name: impl Into<String>, repr: Repr) -> Self {
		Self {
			size: Some(TypeSize::Native),
			repr: Some(repr),
			..Self::new(name, Kind::Base)
		}
	}

	/// Foreign scalar type with an explicit byte size.
	pub fn alien(name: impl Into<String>, size: usize, repr: Repr) -> Self {
		Self {
			kind: Kind::Alien,
			..Self::base(name, size, repr)
		}
	}

	/// Struct type with slots in declaration order.
	pub fn structure(name: impl Into<String>, slots: impl IntoIterator<Item = Slot>) -> Self {
		Self {
			slots: slots.into_iter().collect(),
			..Self::new(name, Kind::Struct)
		}
	}

	/// Union type whose slots overlay each other.
	pub fn union(name: impl Into<String>, slots: impl IntoIterator<Item = Slot>) -> Self {
		Self {
			slots: slots.into_iter().collect(),
			..Self::new(name, Kind::Union)
		}
	}

	/// Array type over `base`, optionally with a fixed length.
	pub fn array(name: impl Into<String>, base: impl Into<String>, length: Option<usize>) -> Self {
		Self {
			base: Some(base.into()),
			length,
			..Self::new(name, Kind::Array)
		}
	}

	/// Named constant.
	pub fn constant(name: impl Into<String>, value: impl Into<Scalar>) -> Self {
		Self {
			value: Some(value.into()),
			..Self::new(name, Kind::Const)
		}
	}

	/// Mark a struct as packed.
	pub fn packed(mut self) -> Self {
		self.packed = true;
		self
	}

	/// Override the scalar byte order.
	pub fn with_endian(mut self, endian: Endianness) -> Self {
		self.endian = endian;
		self
	}

	/// Override the declared size.
	pub fn with_size(mut self, size: TypeSize) -> Self {
		self.size = Some(size);
		self
	}

	/// Look up a slot by name.
	pub fn slot(&self, name: &str) -> Option<&Slot> {
		self.slots.iter().find(|slot| slot.name == name)
	}

	/// Position of a slot by name.
	pub fn slot_index(&self, name: &str) -> Option<usize> {
		self.slots.iter().position(|slot| slot.name == name)
	}
}
