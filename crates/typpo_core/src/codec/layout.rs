use crate::codec::{Factory, Kind, Result, Type, TypeSize, TyppoError};

/// Placement of one struct slot, union slot, or array element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldLayout {
	/// Slot name, or `[index]` for array elements.
	pub name: String,
	/// Declared type name.
	pub type_name: String,
	/// Byte offset relative to the start of the parent.
	pub offset: usize,
	/// Byte size of the declared type.
	pub size: usize,
}

/// Round `input` up to a multiple of `to`; zero leaves it unchanged.
pub(crate) fn round_up(input: usize, to: usize) -> Option<usize> {
	if to == 0 {
		return Some(input);
	}
	input.checked_add((to - input % to) % to)
}

/// `offset + delta`, failing instead of wrapping.
pub(crate) fn offset_add(offset: usize, delta: usize) -> Result<usize> {
	offset.checked_add(delta).ok_or(TyppoError::OffsetOverflow { offset, delta })
}

/// Offset of element `index` in an array starting at `offset`.
pub(crate) fn element_offset(offset: usize, index: usize, stride: usize) -> Result<usize> {
	let delta = index.checked_mul(stride).ok_or(TyppoError::OffsetOverflow {
		offset,
		delta: usize::MAX,
	})?;
	offset_add(offset, delta)
}

impl Factory {
	/// Byte size of a named type, synthesizing pointer and array names on demand.
	pub fn size_of(&self, name: &str) -> Result<usize> {
		self.size_of_name(name, 0)
	}

	/// Byte size of a type record.
	pub fn size_of_type(&self, ty: &Type) -> Result<usize> {
		self.type_size(ty, 0)
	}

	/// Relative placement of every slot or element of a named type.
	///
	/// Scalars have no children and yield an empty list.
	pub fn field_layout(&self, name: &str) -> Result<Vec<FieldLayout>> {
		let ty = self.require(name)?;
		match ty.kind {
			Kind::Struct => {
				let placements = self.slot_placements(&ty, 0)?;
				Ok(ty
					.slots
					.iter()
					.zip(placements)
					.map(|(slot, (offset, size))| FieldLayout {
						name: slot.name.clone(),
						type_name: slot.type_name.clone(),
						offset,
						size,
					})
					.collect())
			}
			Kind::Union => ty
				.slots
				.iter()
				.map(|slot| {
					Ok(FieldLayout {
						name: slot.name.clone(),
						type_name: slot.type_name.clone(),
						offset: 0,
						size: self.size_of_name(&slot.type_name, 1)?,
					})
				})
				.collect(),
			Kind::Array => {
				let base = array_base(&ty)?;
				let stride = self.size_of_name(base, 1)?;
				let length = ty.length.unwrap_or(0);
				if length > self.options().max_array_elems {
					return Err(TyppoError::ArrayTooLarge {
						count: length,
						max: self.options().max_array_elems,
					});
				}
				(0..length)
					.map(|index| {
						Ok(FieldLayout {
							name: format!("[{index}]"),
							type_name: base.to_owned(),
							offset: element_offset(0, index, stride)?,
							size: stride,
						})
					})
					.collect()
			}
			Kind::Base | Kind::Alien => Ok(Vec::new()),
			Kind::Const => Err(unsupported(&ty, "lay out")),
		}
	}

	/// Relative `(offset, size)` of each struct slot in declaration order.
	///
	/// Unpacked structs round each slot up to a multiple of its own size, assuming
	/// fields are self-aligned.
	pub(crate) fn slot_placements(&self, ty: &Type, depth: u32) -> Result<Vec<(usize, usize)>> {
		let mut relative = 0_usize;
		let mut out = Vec::with_capacity(ty.slots.len());
		for slot in &ty.slots {
			let size = self.size_of_name(&slot.type_name, depth + 1)?;
			if !ty.packed {
				relative = round_up(relative, size).ok_or(TyppoError::OffsetOverflow { offset: relative, delta: size })?;
			}
			out.push((relative, size));
			relative = offset_add(relative, size)?;
		}
		Ok(out)
	}

	pub(crate) fn size_of_name(&self, name: &str, depth: u32) -> Result<usize> {
		let ty = self.require(name)?;
		self.type_size(&ty, depth)
	}

	fn type_size(&self, ty: &Type, depth: u32) -> Result<usize> {
		let max_depth = self.options().max_depth;
		if depth > max_depth {
			return Err(TyppoError::DepthExceeded {
				max_depth,
				type_name: ty.name.clone(),
			});
		}

		match ty.size {
			Some(TypeSize::Bytes(size)) => return Ok(size),
			Some(TypeSize::Native) => return Ok(self.native_size()),
			None => {}
		}

		match ty.kind {
			Kind::Struct => match self.slot_placements(ty, depth)?.last() {
				Some(&(offset, size)) => offset_add(offset, size),
				None => Ok(0),
			},
			Kind::Union => {
				let mut max = 0;
				for slot in &ty.slots {
					max = max.max(self.size_of_name(&slot.type_name, depth + 1)?);
				}
				Ok(max)
			}
			Kind::Array => match ty.length {
				Some(length) => {
					let stride = self.size_of_name(array_base(ty)?, depth + 1)?;
					length.checked_mul(stride).ok_or(TyppoError::ArrayTooLarge {
						count: length,
						max: self.options().max_array_elems,
					})
				}
				None => Ok(0),
			},
			Kind::Base | Kind::Alien | Kind::Const => Err(unsupported(ty, "size")),
		}
	}
}

/// Element type name of an array type.
pub(crate) fn array_base(ty: &Type) -> Result<&str> {
	ty.base.as_deref().ok_or_else(|| TyppoError::MissingArrayBase { name: ty.name.clone() })
}

pub(crate) fn unsupported(ty: &Type, op: &'static str) -> TyppoError {
	TyppoError::UnsupportedKind {
		type_name: ty.name.clone(),
		kind: ty.kind.as_str(),
		op,
	}
}

#[cfg(test)]
mod tests;
