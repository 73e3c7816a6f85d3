use std::sync::Arc;

use crate::codec::bytes::ScalarCodec;
use crate::codec::layout::{array_base, element_offset, offset_add, unsupported};
use crate::codec::{Factory, Kind, Result, Scalar, Type, TypeSize, TyppoError};

/// Source material accepted by [`Factory::wrap`] and the value setters.
#[derive(Debug, Clone)]
pub enum Input {
	/// Raw scalar for base and alien types.
	Scalar(Scalar),
	/// Named fields copied into a struct, or assigned in order to a union.
	Fields(Vec<(String, Input)>),
	/// Elements pushed onto an array.
	Items(Vec<Input>),
	/// Existing value, reused as-is when its type matches exactly.
	Value(Value),
}

impl Input {
	/// Build a field list from name/input pairs.
	pub fn fields<K: Into<String>, V: Into<Input>>(fields: impl IntoIterator<Item = (K, V)>) -> Self {
		Self::Fields(fields.into_iter().map(|(name, value)| (name.into(), value.into())).collect())
	}

	/// Build an item list.
	pub fn items<V: Into<Input>>(items: impl IntoIterator<Item = V>) -> Self {
		Self::Items(items.into_iter().map(Into::into).collect())
	}

	/// Convert a JSON document: objects become fields, arrays items, numbers and booleans scalars.
	pub fn from_json(json: &serde_json::Value) -> Result<Self> {
		match json {
			serde_json::Value::Bool(flag) => Ok(Self::Scalar(Scalar::UInt(u64::from(*flag)))),
			serde_json::Value::Number(number) => {
				let scalar = if let Some(int) = number.as_i64() {
					Scalar::Int(int)
				} else if let Some(uint) = number.as_u64() {
					Scalar::UInt(uint)
				} else {
					Scalar::Float(number.as_f64().unwrap_or(f64::NAN))
				};
				Ok(Self::Scalar(scalar))
			}
			serde_json::Value::Array(items) => Ok(Self::Items(items.iter().map(Self::from_json).collect::<Result<_>>()?)),
			serde_json::Value::Object(fields) => Ok(Self::Fields(
				fields
					.iter()
					.map(|(name, value)| Ok((name.clone(), Self::from_json(value)?)))
					.collect::<Result<_>>()?,
			)),
			serde_json::Value::Null | serde_json::Value::String(_) => Err(TyppoError::WrapMismatch {
				type_name: "<json>".to_owned(),
				expected: "number, boolean, array, or object",
				got: if json.is_null() { "null" } else { "string" },
			}),
		}
	}

	fn shape(&self) -> &'static str {
		match self {
			Self::Scalar(_) => "scalar",
			Self::Fields(_) => "fields",
			Self::Items(_) => "items",
			Self::Value(value) => value.ty().kind.as_str(),
		}
	}
}

macro_rules! input_from_scalar {
	($($ty:ty),+) => {
		$(impl From<$ty> for Input {
			fn from(value: $ty) -> Self {
				Self::Scalar(value.into())
			}
		})+
	};
}

input_from_scalar!(Scalar, i8, i16, i32, i64, u8, u16, u32, u64, f32, f64);

impl From<Value> for Input {
	fn from(value: Value) -> Self {
		Self::Value(value)
	}
}

/// Typed value bound to one schema type, placed at a byte offset.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	/// Base or alien scalar.
	Scalar(ScalarValue),
	/// Struct with named slots.
	Struct(StructValue),
	/// Union with at most one active slot.
	Union(UnionValue),
	/// Homogeneous element sequence.
	Array(ArrayValue),
}

/// Base or alien scalar value.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarValue {
	ty: Arc<Type>,
	offset: usize,
	val: Option<Scalar>,
}

/// Struct value; slots stay unset until assigned.
#[derive(Debug, Clone, PartialEq)]
pub struct StructValue {
	ty: Arc<Type>,
	offset: usize,
	slots: Vec<Option<Value>>,
}

/// Union value holding only the most recently assigned slot.
#[derive(Debug, Clone, PartialEq)]
pub struct UnionValue {
	ty: Arc<Type>,
	offset: usize,
	active: Option<(String, Box<Value>)>,
}

/// Array value.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayValue {
	ty: Arc<Type>,
	offset: usize,
	items: Vec<Value>,
}

impl Value {
	/// Empty value of the matching kind for `ty`.
	pub(crate) fn empty(ty: Arc<Type>) -> Result<Self> {
		Ok(match ty.kind {
			Kind::Base | Kind::Alien => Self::Scalar(ScalarValue { ty, offset: 0, val: None }),
			Kind::Struct => {
				let slots = vec![None; ty.slots.len()];
				Self::Struct(StructValue { ty, offset: 0, slots })
			}
			Kind::Union => Self::Union(UnionValue { ty, offset: 0, active: None }),
			Kind::Array => Self::Array(ArrayValue {
				ty,
				offset: 0,
				items: Vec::new(),
			}),
			Kind::Const => return Err(unsupported(&ty, "create")),
		})
	}

	pub(crate) fn wrap(factory: &Factory, ty: &Arc<Type>, input: Input) -> Result<Self> {
		let input = match input {
			Input::Value(value) if value.ty().as_ref() == ty.as_ref() => return Ok(value),
			other => other,
		};

		let mut out = Self::empty(Arc::clone(ty))?;
		match (ty.kind, input) {
			(Kind::Base | Kind::Alien, Input::Scalar(val)) => out = scalar(ty, Some(val)),
			(Kind::Base | Kind::Alien, Input::Value(Self::Scalar(other))) => out = scalar(ty, other.val),
			(Kind::Struct | Kind::Union, Input::Fields(fields)) => {
				for (name, value) in fields {
					out.set_slot(factory, &name, value)?;
				}
			}
			(Kind::Struct, Input::Value(Self::Struct(other))) => {
				for (slot, value) in other.ty.slots.iter().zip(other.slots) {
					if let Some(value) = value {
						out.set_slot(factory, &slot.name, value)?;
					}
				}
			}
			(Kind::Union, Input::Value(Self::Union(other))) => {
				if let Some((name, value)) = other.active {
					out.set_slot(factory, &name, *value)?;
				}
			}
			(Kind::Array, Input::Items(items)) => {
				for item in items {
					out.push(factory, item)?;
				}
			}
			(Kind::Array, Input::Value(Self::Array(other))) => {
				for item in other.items {
					out.push(factory, item)?;
				}
			}
			(kind, input) => {
				return Err(TyppoError::WrapMismatch {
					type_name: ty.name.clone(),
					expected: expected_shape(kind),
					got: input.shape(),
				});
			}
		}
		Ok(out)
	}

	/// Schema type of this value.
	pub fn ty(&self) -> &Arc<Type> {
		match self {
			Self::Scalar(item) => &item.ty,
			Self::Struct(item) => &item.ty,
			Self::Union(item) => &item.ty,
			Self::Array(item) => &item.ty,
		}
	}

	/// Byte offset of this value within its buffer.
	pub fn offset(&self) -> usize {
		match self {
			Self::Scalar(item) => item.offset,
			Self::Struct(item) => item.offset,
			Self::Union(item) => item.offset,
			Self::Array(item) => item.offset,
		}
	}

	/// Stored scalar of a base or alien value.
	pub fn scalar(&self) -> Option<Scalar> {
		match self {
			Self::Scalar(item) => item.val,
			_ => None,
		}
	}

	/// Assigned child of a struct slot, or the active union slot if it matches `name`.
	pub fn slot(&self, name: &str) -> Option<&Value> {
		match self {
			Self::Struct(item) => item.ty.slot_index(name).and_then(|index| item.slots[index].as_ref()),
			Self::Union(item) => item.active.as_ref().filter(|(active, _)| active == name).map(|(_, value)| value.as_ref()),
			_ => None,
		}
	}

	/// Active union slot name and value.
	pub fn active_slot(&self) -> Option<(&str, &Value)> {
		match self {
			Self::Union(item) => item.active.as_ref().map(|(name, value)| (name.as_str(), value.as_ref())),
			_ => None,
		}
	}

	/// Array elements; empty for other kinds.
	pub fn items(&self) -> &[Value] {
		match self {
			Self::Array(item) => &item.items,
			_ => &[],
		}
	}

	/// Replace this value's contents with `input` coerced to the same type.
	///
	/// Scalars accept raw numbers or another scalar value; other kinds accept
	/// whatever [`Factory::wrap`] does.
	pub fn set(&mut self, factory: &Factory, input: impl Into<Input>) -> Result<()> {
		let offset = self.offset();
		let mut next = Self::wrap(factory, &Arc::clone(self.ty()), input.into())?;
		next.set_offset(factory, offset)?;
		*self = next;
		Ok(())
	}

	/// Assign a struct slot or make a union slot active, then re-place children.
	pub fn set_slot(&mut self, factory: &Factory, name: &str, input: impl Into<Input>) -> Result<()> {
		let (ty, offset) = (Arc::clone(self.ty()), self.offset());
		let index = match self {
			Self::Struct(_) | Self::Union(_) => slot_index(&ty, name)?,
			_ => return Err(unsupported_op(&ty, "set_slot")),
		};
		let slot_ty = factory.require(&ty.slots[index].type_name)?;
		let value = Self::wrap(factory, &slot_ty, input.into())?;

		match self {
			Self::Struct(item) => {
				item.slots[index] = Some(value);
				item.place(factory, offset)
			}
			Self::Union(item) => {
				item.active = Some((name.to_owned(), Box::new(value)));
				item.place(factory, offset)
			}
			_ => Err(unsupported_op(&ty, "set_slot")),
		}
	}

	/// Append an element to an array.
	pub fn push(&mut self, factory: &Factory, input: impl Into<Input>) -> Result<()> {
		let ty = Arc::clone(self.ty());
		let Self::Array(item) = self else {
			return Err(unsupported_op(&ty, "push"));
		};
		let base = factory.require(array_base(&item.ty)?)?;
		let stride = factory.size_of_type(&base)?;
		let mut value = Self::wrap(factory, &base, input.into())?;
		value.set_offset(factory, element_offset(item.offset, item.items.len(), stride)?)?;
		item.items.push(value);
		Ok(())
	}

	/// Move this value to `offset` and recompute every descendant's offset.
	pub fn set_offset(&mut self, factory: &Factory, offset: usize) -> Result<()> {
		match self {
			Self::Scalar(item) => {
				item.offset = offset;
				Ok(())
			}
			Self::Struct(item) => item.place(factory, offset),
			Self::Union(item) => item.place(factory, offset),
			Self::Array(item) => item.place(factory, offset),
		}
	}

	/// Write this value's bytes into `buf` at its offset.
	pub fn write(&self, factory: &Factory, buf: &mut [u8]) -> Result<()> {
		match self {
			Self::Scalar(item) => {
				let val = item.val.ok_or_else(|| TyppoError::UnsetScalar { type_name: item.ty.name.clone() })?;
				scalar_codec(factory, &item.ty)?.write(buf, item.offset, val, &item.ty.name)
			}
			Self::Struct(item) => {
				for (slot, value) in item.ty.slots.iter().zip(&item.slots) {
					let value = value.as_ref().ok_or_else(|| TyppoError::MissingField {
						type_name: item.ty.name.clone(),
						slot: slot.name.clone(),
					})?;
					value.write(factory, buf)?;
				}
				Ok(())
			}
			Self::Union(item) => {
				let (_, value) = item.active.as_ref().ok_or_else(|| TyppoError::NoActiveSlot { type_name: item.ty.name.clone() })?;
				value.write(factory, buf)
			}
			Self::Array(item) => {
				if let Some(expected) = item.ty.length
					&& expected != item.items.len()
				{
					return Err(TyppoError::LengthMismatch {
						type_name: item.ty.name.clone(),
						expected,
						actual: item.items.len(),
					});
				}
				for value in &item.items {
					value.write(factory, buf)?;
				}
				Ok(())
			}
		}
	}

	/// Populate this value from `buf` at its offset.
	///
	/// Structs and arrays are rebuilt from fresh children. A union that was never
	/// assigned reads its first declared slot.
	pub fn read(&mut self, factory: &Factory, buf: &[u8]) -> Result<()> {
		match self {
			Self::Scalar(item) => {
				item.val = Some(scalar_codec(factory, &item.ty)?.read(buf, item.offset)?);
				Ok(())
			}
			Self::Struct(item) => {
				for (index, slot) in item.ty.slots.iter().enumerate() {
					item.slots[index] = Some(factory.create(&slot.type_name)?);
				}
				item.place(factory, item.offset)?;
				for value in item.slots.iter_mut().flatten() {
					value.read(factory, buf)?;
				}
				Ok(())
			}
			Self::Union(item) => {
				if item.active.is_none() {
					let first = item.ty.slots.first().ok_or_else(|| TyppoError::EmptyUnion { type_name: item.ty.name.clone() })?;
					let value = factory.create(&first.type_name)?;
					item.active = Some((first.name.clone(), Box::new(value)));
					item.place(factory, item.offset)?;
				}
				match item.active.as_mut() {
					Some((_, value)) => value.read(factory, buf),
					None => Err(TyppoError::NoActiveSlot { type_name: item.ty.name.clone() }),
				}
			}
			Self::Array(item) => {
				let length = item.ty.length.ok_or_else(|| TyppoError::UnknownLength { type_name: item.ty.name.clone() })?;
				let max = factory.options().max_array_elems;
				if length > max {
					return Err(TyppoError::ArrayTooLarge { count: length, max });
				}
				let base = array_base(&item.ty)?;
				let stride = factory.size_of(base)?;
				item.items = Vec::with_capacity(length);
				for index in 0..length {
					let mut value = factory.create(base)?;
					value.set_offset(factory, element_offset(item.offset, index, stride)?)?;
					value.read(factory, buf)?;
					item.items.push(value);
				}
				Ok(())
			}
		}
	}
}

impl StructValue {
	fn place(&mut self, factory: &Factory, offset: usize) -> Result<()> {
		self.offset = offset;
		let placements = factory.slot_placements(&self.ty, 0)?;
		for (value, (relative, _)) in self.slots.iter_mut().zip(placements) {
			if let Some(value) = value {
				value.set_offset(factory, offset_add(offset, relative)?)?;
			}
		}
		Ok(())
	}
}

impl UnionValue {
	fn place(&mut self, factory: &Factory, offset: usize) -> Result<()> {
		self.offset = offset;
		match self.active.as_mut() {
			Some((_, value)) => value.set_offset(factory, offset),
			None => Ok(()),
		}
	}
}

impl ArrayValue {
	fn place(&mut self, factory: &Factory, offset: usize) -> Result<()> {
		self.offset = offset;
		if self.items.is_empty() {
			return Ok(());
		}
		let stride = factory.size_of(array_base(&self.ty)?)?;
		for (index, value) in self.items.iter_mut().enumerate() {
			value.set_offset(factory, element_offset(offset, index, stride)?)?;
		}
		Ok(())
	}
}

fn scalar(ty: &Arc<Type>, val: Option<Scalar>) -> Value {
	Value::Scalar(ScalarValue {
		ty: Arc::clone(ty),
		offset: 0,
		val,
	})
}

fn scalar_codec(factory: &Factory, ty: &Type) -> Result<ScalarCodec> {
	let repr = ty.repr.ok_or_else(|| TyppoError::MissingRepr { type_name: ty.name.clone() })?;
	let width = match ty.size {
		Some(TypeSize::Bytes(width)) => width,
		Some(TypeSize::Native) => factory.native_size(),
		None => return Err(unsupported(ty, "encode")),
	};
	let codec = ScalarCodec::select(repr, width, ty.endian).ok_or_else(|| TyppoError::UnsupportedScalar {
		type_name: ty.name.clone(),
		repr: repr.as_str(),
		width,
	})?;
	log::trace!("{}: {}", ty.name, codec.accessor_name());
	Ok(codec)
}

fn slot_index(ty: &Type, name: &str) -> Result<usize> {
	ty.slot_index(name).ok_or_else(|| TyppoError::UnknownSlot {
		type_name: ty.name.clone(),
		slot: name.to_owned(),
	})
}

fn unsupported_op(ty: &Type, op: &'static str) -> TyppoError {
	TyppoError::UnsupportedOperation {
		type_name: ty.name.clone(),
		kind: ty.kind.as_str(),
		op,
	}
}

fn expected_shape(kind: Kind) -> &'static str {
	match kind {
		Kind::Base | Kind::Alien => "scalar",
		Kind::Struct | Kind::Union => "fields",
		Kind::Array => "items",
		Kind::Const => "nothing",
	}
}
