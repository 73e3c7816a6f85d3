use std::path::PathBuf;

use typpo::codec::{Factory, FieldLayout, Kind, Platform, ScalarCodec, Type};

use crate::cmd::util::{emit_json, load_factory};

#[derive(clap::Args)]
pub struct Args {
	pub schema: PathBuf,
	#[arg(long = "type")]
	pub type_name: Option<String>,
	#[arg(long, default_value_t = Platform::Arm)]
	pub target: Platform,
	#[arg(long)]
	pub json: bool,
}

/// List registered types, or print the layout of one type.
pub fn run(args: Args) -> typpo::codec::Result<()> {
	let Args {
		schema,
		type_name,
		target,
		json,
	} = args;

	let factory = load_factory(&schema, target)?;
	match type_name {
		Some(name) => run_single(&factory, &name, json),
		None => run_list(&factory, &schema, json),
	}
}

fn run_list(factory: &Factory, schema: &std::path::Path, json: bool) -> typpo::codec::Result<()> {
	let rows: Vec<TypeRowJson> = factory
		.registry()
		.iter()
		.map(|ty| TypeRowJson {
			name: ty.name.clone(),
			kind: ty.kind.as_str().to_owned(),
			size: type_size(factory, ty),
		})
		.collect();

	if json {
		return emit_json(&TypesJson {
			schema: schema.display().to_string(),
			target: factory.target_platform().to_string(),
			native_size: factory.native_size(),
			types: rows,
		});
	}

	println!("schema: {}", schema.display());
	println!("target: {}", factory.target_platform());
	println!("native_size: {}", factory.native_size());
	println!("types: {}", rows.len());
	println!();
	println!("name\tkind\tsize");
	for row in &rows {
		println!("{}\t{}\t{}", row.name, row.kind, row.size.map_or_else(|| "-".to_owned(), |size| size.to_string()));
	}
	Ok(())
}

fn run_single(factory: &Factory, name: &str, json: bool) -> typpo::codec::Result<()> {
	let ty = factory.require(name)?;
	if ty.kind == Kind::Const {
		let value = factory.get_const(name)?;
		if json {
			return emit_json(&ConstJson {
				name: ty.name.clone(),
				kind: ty.kind.as_str().to_owned(),
				value: value.to_string(),
			});
		}
		println!("name: {}", ty.name);
		println!("kind: {}", ty.kind.as_str());
		println!("value: {value}");
		return Ok(());
	}

	let size = factory.size_of(name)?;
	let accessor = accessor_name(&ty, size);
	let fields = factory.field_layout(name)?;

	if json {
		return emit_json(&LayoutJson {
			name: ty.name.clone(),
			kind: ty.kind.as_str().to_owned(),
			size,
			packed: ty.packed,
			accessor,
			fields: fields.into_iter().map(FieldJson::from).collect(),
		});
	}

	println!("name: {}", ty.name);
	println!("kind: {}", ty.kind.as_str());
	println!("size: {size}");
	if ty.packed {
		println!("packed: true");
	}
	if let Some(accessor) = accessor {
		println!("accessor: {accessor}");
	}
	if !fields.is_empty() {
		println!();
		println!("offset\tsize\tname\ttype");
		for field in &fields {
			println!("{}\t{}\t{}\t{}", field.offset, field.size, field.name, field.type_name);
		}
	}
	Ok(())
}

fn type_size(factory: &Factory, ty: &Type) -> Option<usize> {
	if ty.kind == Kind::Const {
		return None;
	}
	factory.size_of_type(ty).ok()
}

fn accessor_name(ty: &Type, width: usize) -> Option<String> {
	let repr = ty.repr.filter(|_| ty.kind.is_scalar())?;
	ScalarCodec::select(repr, width, ty.endian).map(|codec| codec.accessor_name())
}

#[derive(serde::Serialize)]
struct TypesJson {
	schema: String,
	target: String,
	native_size: usize,
	types: Vec<TypeRowJson>,
}

#[derive(serde::Serialize)]
struct TypeRowJson {
	name: String,
	kind: String,
	size: Option<usize>,
}

#[derive(serde::Serialize)]
struct ConstJson {
	name: String,
	kind: String,
	value: String,
}

#[derive(serde::Serialize)]
struct LayoutJson {
	name: String,
	kind: String,
	size: usize,
	packed: bool,
	accessor: Option<String>,
	fields: Vec<FieldJson>,
}

#[derive(serde::Serialize)]
struct FieldJson {
	name: String,
	#[serde(rename = "type")]
	type_name: String,
	offset: usize,
	size: usize,
}

impl From<FieldLayout> for FieldJson {
	fn from(field: FieldLayout) -> Self {
		Self {
			name: field.name,
			type_name: field.type_name,
			offset: field.offset,
			size: field.size,
		}
	}
}
