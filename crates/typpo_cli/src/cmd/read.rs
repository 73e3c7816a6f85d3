use std::path::PathBuf;

use typpo::codec::{Platform, Scalar, Value};

use crate::cmd::util::{emit_json, load_factory, parse_hex, value_json};

#[derive(clap::Args)]
pub struct Args {
	pub schema: PathBuf,
	pub type_name: String,
	#[arg(long, conflicts_with = "file", required_unless_present = "file")]
	pub hex: Option<String>,
	#[arg(long)]
	pub file: Option<PathBuf>,
	#[arg(long, default_value_t = 0)]
	pub offset: usize,
	#[arg(long, default_value_t = Platform::Arm)]
	pub target: Platform,
	#[arg(long)]
	pub json: bool,
}

/// Decode one value of a named type from hex text or a file.
pub fn run(args: Args) -> typpo::codec::Result<()> {
	let Args {
		schema,
		type_name,
		hex,
		file,
		offset,
		target,
		json,
	} = args;

	let factory = load_factory(&schema, target)?;
	let buf = match (hex, file) {
		(Some(hex), _) => parse_hex(&hex)?,
		(None, Some(path)) => std::fs::read(path)?,
		(None, None) => Vec::new(),
	};
	let size = factory.size_of(&type_name)?;
	let value = factory.read(&type_name, &buf, offset)?;

	if json {
		return emit_json(&ReadJson {
			type_name,
			target: factory.target_platform().to_string(),
			offset,
			size,
			value: value_json(&value),
		});
	}

	println!("type: {type_name}");
	println!("target: {}", factory.target_platform());
	println!("offset: {offset}");
	println!("size: {size}");
	println!("value:");
	print_value(&value, 0);
	Ok(())
}

fn print_value(value: &Value, indent: usize) {
	let pad = " ".repeat(indent);
	match value {
		Value::Scalar(_) => println!("{pad}{}", render_scalar(value.scalar())),
		Value::Struct(_) => {
			println!("{pad}{} {{", value.ty().name);
			for slot in &value.ty().slots {
				print_child(&slot.name, value.slot(&slot.name), indent);
			}
			println!("{pad}}}");
		}
		Value::Union(_) => {
			println!("{pad}{} {{", value.ty().name);
			if let Some((name, active)) = value.active_slot() {
				print_child(name, Some(active), indent);
			}
			println!("{pad}}}");
		}
		Value::Array(_) => {
			println!("{pad}[");
			for item in value.items() {
				print_value(item, indent + 2);
			}
			println!("{pad}]");
		}
	}
}

fn print_child(name: &str, value: Option<&Value>, indent: usize) {
	let pad = " ".repeat(indent);
	match value {
		Some(child @ (Value::Struct(_) | Value::Union(_) | Value::Array(_))) => {
			println!("{pad}  {name} =");
			print_value(child, indent + 4);
		}
		Some(child) => println!("{pad}  {name} = {}", render_scalar(child.scalar())),
		None => println!("{pad}  {name} = <unset>"),
	}
}

fn render_scalar(value: Option<Scalar>) -> String {
	value.map_or_else(|| "<unset>".to_owned(), |scalar| scalar.to_string())
}

#[derive(serde::Serialize)]
struct ReadJson {
	#[serde(rename = "type")]
	type_name: String,
	target: String,
	offset: usize,
	size: usize,
	value: serde_json::Value,
}
