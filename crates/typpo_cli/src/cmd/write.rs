use std::path::PathBuf;

use typpo::codec::{Factory, Input, Platform, TyppoError, Value};

use crate::cmd::util::{emit_json, load_factory, render_hex};

#[derive(clap::Args)]
pub struct Args {
	pub schema: PathBuf,
	pub type_name: String,
	#[arg(long)]
	pub value: String,
	#[arg(long, default_value_t = Platform::Arm)]
	pub target: Platform,
	#[arg(long)]
	pub json: bool,
}

/// Encode a JSON document as one value of a named type and print its bytes as hex.
pub fn run(args: Args) -> typpo::codec::Result<()> {
	let Args {
		schema,
		type_name,
		value,
		target,
		json,
	} = args;

	let factory = load_factory(&schema, target)?;
	let ty = factory.require(&type_name)?;
	let document: serde_json::Value = serde_json::from_str(&value).map_err(|err| TyppoError::InvalidValue { reason: err.to_string() })?;
	let value = factory.wrap(&ty, Input::from_json(&document)?)?;

	let mut buf = vec![0_u8; encoded_len(&factory, &value)?];
	value.write(&factory, &mut buf)?;
	let hex = render_hex(&buf);

	if json {
		return emit_json(&WriteJson {
			type_name,
			target: factory.target_platform().to_string(),
			size: buf.len(),
			hex,
		});
	}

	println!("{hex}");
	Ok(())
}

/// Bytes needed for `value`: its declared size, or further if open arrays extend past it.
fn encoded_len(factory: &Factory, value: &Value) -> typpo::codec::Result<usize> {
	let declared = factory.size_of_type(value.ty())?;
	Ok(declared.max(value_end(factory, value)?.saturating_sub(value.offset())))
}

/// Highest byte offset touched by any assigned scalar under `value`.
fn value_end(factory: &Factory, value: &Value) -> typpo::codec::Result<usize> {
	let children: Vec<&Value> = match value {
		Value::Scalar(_) => {
			let size = factory.size_of_type(value.ty())?;
			return value.offset().checked_add(size).ok_or(TyppoError::OffsetOverflow {
				offset: value.offset(),
				delta: size,
			});
		}
		Value::Struct(_) => value.ty().slots.iter().filter_map(|slot| value.slot(&slot.name)).collect(),
		Value::Union(_) => value.active_slot().map(|(_, active)| active).into_iter().collect(),
		Value::Array(_) => value.items().iter().collect(),
	};

	let mut end = value.offset();
	for child in children {
		end = end.max(value_end(factory, child)?);
	}
	Ok(end)
}

#[derive(serde::Serialize)]
struct WriteJson {
	#[serde(rename = "type")]
	type_name: String,
	target: String,
	size: usize,
	hex: String,
}
