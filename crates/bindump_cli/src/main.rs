#![allow(missing_docs)]

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cmd;

#[derive(Parser)]
#[command(name = "bindump", about = "Schema-driven BinData record decoder")]
struct Cli {
	/// Raise log verbosity (-v debug, -vv trace); RUST_LOG takes precedence.
	#[arg(short, long, action = ArgAction::Count, global = true)]
	verbose: u8,
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Decode one input file.
	Decode(cmd::decode::Args),
	/// Decode work items read from stdin, one per line.
	Batch(cmd::batch::Args),
	/// Summarize a schema document or one of its types.
	Schema(cmd::schema::Args),
}

fn main() {
	let cli = Cli::parse();
	init_logging(cli.verbose);

	if let Err(err) = run(cli.command) {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn run(command: Commands) -> bindump::bindata::Result<()> {
	match command {
		Commands::Decode(args) => cmd::decode::run(args),
		Commands::Batch(args) => cmd::batch::run(args),
		Commands::Schema(args) => cmd::schema::run(args),
	}
}

fn init_logging(verbose: u8) {
	let level = match verbose {
		0 => "info",
		1 => "debug",
		_ => "trace",
	};
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(false)
		.init();
}
