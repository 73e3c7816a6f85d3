use std::path::Path;

use typpo::codec::{Factory, Platform, Result, Scalar, TyppoError, Value, load_type_file};

/// Load a schema file into a factory targeting `platform`.
pub(crate) fn load_factory(schema: &Path, platform: Platform) -> Result<Factory> {
	let types = load_type_file(schema)?;
	log::debug!("schema {} has {} types", schema.display(), types.len());
	Ok(Factory::make(types, platform))
}

/// Parse hex text, ignoring whitespace and an optional `0x` prefix.
pub(crate) fn parse_hex(input: &str) -> Result<Vec<u8>> {
	let compact: String = input.chars().filter(|ch| !ch.is_whitespace()).collect();
	let digits = compact.strip_prefix("0x").or_else(|| compact.strip_prefix("0X")).unwrap_or(&compact);
	hex::decode(digits).map_err(|err| {
		log::debug!("hex decode failed: {err}");
		TyppoError::InvalidHex { input: input.to_owned() }
	})
}

/// Render bytes as lowercase hex without separators.
pub(crate) fn render_hex(bytes: &[u8]) -> String {
	hex::encode(bytes)
}

/// Convert a decoded value into a JSON document.
///
/// Unset scalars and union values without an active slot become `null`.
pub(crate) fn value_json(value: &Value) -> serde_json::Value {
	match value {
		Value::Scalar(_) => match value.scalar() {
			Some(Scalar::Int(int)) => serde_json::Value::from(int),
			Some(Scalar::UInt(uint)) => serde_json::Value::from(uint),
			Some(Scalar::Float(float)) => serde_json::Value::from(float),
			None => serde_json::Value::Null,
		},
		Value::Struct(_) => serde_json::Value::Object(
			value
				.ty()
				.slots
				.iter()
				.map(|slot| (slot.name.clone(), value.slot(&slot.name).map_or(serde_json::Value::Null, value_json)))
				.collect(),
		),
		Value::Union(_) => match value.active_slot() {
			Some((name, active)) => serde_json::Value::Object([(name.to_owned(), value_json(active))].into_iter().collect()),
			None => serde_json::Value::Null,
		},
		Value::Array(_) => serde_json::Value::Array(value.items().iter().map(value_json).collect()),
	}
}

/// Print a serializable payload as pretty JSON on stdout.
pub(crate) fn emit_json<T: serde::Serialize>(payload: &T) -> Result<()> {
	println!("{}", serde_json::to_string_pretty(payload)?);
	Ok(())
}
