use std::path::{Path, PathBuf};

use bindump::bindata::{BinFile, Compression, ContainerSpec, DecodeOptions, Result, Schema, derive_type_name};
use tracing::info;

use crate::cmd::util::{DecodeArgs, RenderArgs, render_value, write_output};

#[derive(clap::Args)]
pub struct Args {
	/// JSON schema document.
	pub schema: PathBuf,
	/// BinData input; pass `--zstd` when it is compressed.
	pub input: PathBuf,
	/// Container mode: s, l, d, ld, dl; a trailing `-` disables subtype ids.
	#[arg(long, default_value = "s")]
	pub mode: ContainerSpec,
	/// Top-level record type; derived from the input file name when omitted.
	#[arg(long = "type")]
	pub type_name: Option<String>,
	/// Write to this file instead of stdout.
	#[arg(long, short)]
	pub output: Option<PathBuf>,
	#[command(flatten)]
	pub render: RenderArgs,
	#[command(flatten)]
	pub decode: DecodeArgs,
}

/// Decode one file and print or write the rendered value.
pub fn run(args: Args) -> Result<()> {
	let schema = Schema::from_json_file(&args.schema)?;
	let job = Job {
		input: &args.input,
		output: args.output.as_deref(),
		spec: args.mode,
		type_name: args.type_name.as_deref(),
		compression: args.decode.compression(),
	};
	run_job(&schema, &job, &args.decode.to_options(), &args.render)
}

/// One input to decode: where from, where to, and how.
pub(crate) struct Job<'a> {
	pub input: &'a Path,
	pub output: Option<&'a Path>,
	pub spec: ContainerSpec,
	pub type_name: Option<&'a str>,
	pub compression: Compression,
}

pub(crate) fn run_job(schema: &Schema, job: &Job<'_>, options: &DecodeOptions, render: &RenderArgs) -> Result<()> {
	let type_name = match job.type_name {
		Some(name) => name.to_owned(),
		None => derive_type_name(job.input)?,
	};

	info!(input = %job.input.display(), type_name = %type_name, mode = %job.spec, "decoding");
	let file = BinFile::open(job.input, job.compression)?;
	let value = file.decode(schema, &type_name, job.spec, options)?;

	let text = render_value(&value, render)?;
	write_output(job.output, &text)
}

#[cfg(test)]
mod tests;
