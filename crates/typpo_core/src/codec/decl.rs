use crate::codec::{Repr, Type};

/// Shape implied by a type name's declarator syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TypeDecl<'a> {
	/// Plain identifier, resolvable only through the registry.
	Named(&'a str),
	/// Trailing `*`: a native-width unsigned pointer.
	Pointer,
	/// Bracketed suffix: an array of `element`.
	Array {
		/// Element type name, which may itself carry declarator syntax.
		element: &'a str,
		/// Declared count, absent for `[]` or a non-numeric bound.
		length: Option<usize>,
	},
}

/// Parse a type name into pointer/array declarator metadata.
///
/// A trailing `*` wins over brackets, so `int[4]*` is a pointer while
/// `int*[4]` is an array of pointers. For multi-dimensional names the last
/// bracket group is the outer length: `int[2][3]` is three `int[2]` elements.
pub(crate) fn parse_type_decl(raw: &str) -> TypeDecl<'_> {
	let trimmed = raw.trim();
	if trimmed.ends_with('*') {
		return TypeDecl::Pointer;
	}

	if trimmed.ends_with(']')
		&& let Some(open) = trimmed.rfind('[')
	{
		let bound = trimmed[open + 1..trimmed.len() - 1].trim();
		return TypeDecl::Array {
			element: trimmed[..open].trim(),
			length: bound.parse::<usize>().ok(),
		};
	}

	if let Some(open) = trimmed.find('[') {
		return TypeDecl::Array {
			element: trimmed[..open].trim(),
			length: None,
		};
	}

	TypeDecl::Named(trimmed)
}

/// Build the short-lived type a declarator name stands for, if any.
pub(crate) fn synthesize(name: &str) -> Option<Type> {
	match parse_type_decl(name) {
		TypeDecl::Named(_) => None,
		TypeDecl::Pointer => Some(Type::native(name, Repr::Unsigned)),
		TypeDecl::Array { element, length } => Some(Type::array(name, element, length)),
	}
}
