use std::sync::Arc;

use crate::codec::{Input, Kind, Platform, Result, Scalar, Type, TypeRegistry, TyppoError, Value};

/// Runtime limits for layout computation and decoding.
#[derive(Debug, Clone)]
pub struct FactoryOptions {
	/// Maximum type nesting depth while computing sizes.
	pub max_depth: u32,
	/// Maximum element count accepted when reading arrays.
	pub max_array_elems: usize,
}

impl Default for FactoryOptions {
	fn default() -> Self {
		Self {
			max_depth: 32,
			max_array_elems: 1 << 20,
		}
	}
}

/// Entry point for resolving types and creating, wrapping, reading, and sizing values.
#[derive(Debug, Clone, Default)]
pub struct Factory {
	registry: TypeRegistry,
	platform: Platform,
	options: FactoryOptions,
}

impl Factory {
	/// Create a factory for `platform` with `types` registered.
	pub fn make(types: impl IntoIterator<Item = Type>, platform: Platform) -> Self {
		Self::with_options(types, platform, FactoryOptions::default())
	}

	/// Create a factory with explicit limits.
	pub fn with_options(types: impl IntoIterator<Item = Type>, platform: Platform, options: FactoryOptions) -> Self {
		let mut factory = Self {
			registry: TypeRegistry::new(),
			platform,
			options,
		};
		factory.load_types(types, false);
		factory
	}

	/// Merge type records into the registry, optionally discarding existing ones.
	pub fn load_types(&mut self, types: impl IntoIterator<Item = Type>, discard_old: bool) {
		let before = self.registry.len();
		self.registry.register(types, discard_old);
		log::debug!(
			"loaded types: discard_old={discard_old} before={before} after={}",
			self.registry.len()
		);
	}

	/// Change the target platform used for native sizes.
	pub fn set_target_platform(&mut self, platform: Platform) {
		log::debug!("target platform {} -> {}", self.platform, platform);
		self.platform = platform;
	}

	/// Current target platform.
	pub fn target_platform(&self) -> Platform {
		self.platform
	}

	/// Native word width of the current target platform.
	pub fn native_size(&self) -> usize {
		self.platform.native_size()
	}

	/// Configured limits.
	pub fn options(&self) -> &FactoryOptions {
		&self.options
	}

	/// Registered types.
	pub fn registry(&self) -> &TypeRegistry {
		&self.registry
	}

	/// Resolve a type name, synthesizing pointer and array types from their syntax.
	pub fn resolve(&self, name: &str) -> Option<Arc<Type>> {
		self.registry.resolve(name)
	}

	/// Resolve a type name or fail with [`TyppoError::UnknownType`].
	pub fn require(&self, name: &str) -> Result<Arc<Type>> {
		self.resolve(name).ok_or_else(|| TyppoError::UnknownType { name: name.to_owned() })
	}

	/// Create an empty value of a named type.
	pub fn create(&self, name: &str) -> Result<Value> {
		Value::empty(self.require(name)?)
	}

	/// Coerce `input` into a value of `ty`.
	///
	/// A value that already has exactly this type is returned unchanged.
	pub fn wrap(&self, ty: &Arc<Type>, input: impl Into<Input>) -> Result<Value> {
		Value::wrap(self, ty, input.into())
	}

	/// Create a value of a named type and populate it from `buf` at `offset`.
	pub fn read(&self, name: &str, buf: &[u8], offset: usize) -> Result<Value> {
		log::trace!("read {name} at {offset} from {} bytes", buf.len());
		let mut value = self.create(name)?;
		value.set_offset(self, offset)?;
		value.read(self, buf)?;
		Ok(value)
	}

	/// Value of a named constant.
	pub fn get_const(&self, name: &str) -> Result<Scalar> {
		let ty = self.require(name)?;
		match (ty.kind, ty.value) {
			(Kind::Const, Some(value)) => Ok(value),
			_ => Err(TyppoError::MissingConstValue { name: name.to_owned() }),
		}
	}
}

#[cfg(test)]
mod tests;
