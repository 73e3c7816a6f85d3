#![allow(missing_docs)]

use clap::{Parser, Subcommand};

mod cmd;

#[derive(Parser)]
#[command(name = "typpo", about = "Schema-driven binary layout and codec tools")]
struct Cli {
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	Types(cmd::types::Args),
	Read(cmd::read::Args),
	Write(cmd::write::Args),
}

fn main() {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
		.format_timestamp_millis()
		.init();

	if let Err(err) = run() {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn run() -> typpo::codec::Result<()> {
	let cli = Cli::parse();

	match cli.command {
		Commands::Types(args) => cmd::types::run(args),
		Commands::Read(args) => cmd::read::run(args),
		Commands::Write(args) => cmd::write::run(args),
	}
}
