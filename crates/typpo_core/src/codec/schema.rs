use std::path::Path;

use crate::codec::{Factory, Result, Type, TyppoError};

/// Text format of a schema document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaFormat {
	/// YAML sequence of type records.
	Yaml,
	/// JSON array of type records.
	Json,
}

impl SchemaFormat {
	/// Infer the format from a file extension.
	pub fn from_path(path: &Path) -> Option<Self> {
		match path.extension()?.to_str()? {
			"yaml" | "yml" => Some(Self::Yaml),
			"json" => Some(Self::Json),
			_ => None,
		}
	}
}

/// Parse an ordered sequence of type records.
pub fn parse_types(text: &str, format: SchemaFormat) -> Result<Vec<Type>> {
	Ok(match format {
		SchemaFormat::Yaml => serde_yaml::from_str(text)?,
		SchemaFormat::Json => serde_json::from_str(text)?,
	})
}

/// Read and parse a schema file; the format follows the extension.
pub fn load_type_file(path: impl AsRef<Path>) -> Result<Vec<Type>> {
	let path = path.as_ref();
	let format = SchemaFormat::from_path(path).ok_or_else(|| TyppoError::UnknownSchemaFormat {
		path: path.display().to_string(),
	})?;
	let text = std::fs::read_to_string(path)?;
	let types = parse_types(&text, format)?;
	log::debug!("parsed {} type records from {}", types.len(), path.display());
	Ok(types)
}

impl Factory {
	/// Load a schema file and merge its records into the registry.
	pub fn load_type_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
		let types = load_type_file(path)?;
		self.load_types(types, false);
		Ok(())
	}
}
