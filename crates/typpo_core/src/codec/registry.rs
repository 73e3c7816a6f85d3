use std::collections::BTreeMap;
use std::sync::Arc;

use crate::codec::Type;
use crate::codec::decl::synthesize;

/// Named type definitions, shared read-only by every value built from them.
#[derive(Debug, Default, Clone)]
pub struct TypeRegistry {
	types: BTreeMap<String, Arc<Type>>,
}

impl TypeRegistry {
	/// Create an empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Merge `types` into the registry; later records replace same-named ones.
	///
	/// With `discard_old`, previously registered types are dropped first.
	pub fn register(&mut self, types: impl IntoIterator<Item = Type>, discard_old: bool) {
		if discard_old {
			self.types.clear();
		}
		for ty in types {
			self.types.insert(ty.name.clone(), Arc::new(ty));
		}
	}

	/// Exact lookup of a registered type.
	pub fn get(&self, name: &str) -> Option<&Arc<Type>> {
		self.types.get(name)
	}

	/// Resolve a name to a registered type, or synthesize a pointer/array type from its syntax.
	///
	/// Synthesized types are never stored.
	pub fn resolve(&self, name: &str) -> Option<Arc<Type>> {
		if let Some(ty) = self.types.get(name) {
			return Some(Arc::clone(ty));
		}
		synthesize(name).map(Arc::new)
	}

	/// Number of registered types.
	pub fn len(&self) -> usize {
		self.types.len()
	}

	/// Whether no types are registered.
	pub fn is_empty(&self) -> bool {
		self.types.is_empty()
	}

	/// Registered types ordered by name.
	pub fn iter(&self) -> impl Iterator<Item = &Arc<Type>> {
		self.types.values()
	}
}
