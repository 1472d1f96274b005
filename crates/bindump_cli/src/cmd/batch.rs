use std::io::{self, BufRead};
use std::path::PathBuf;

use bindump::bindata::{BinError, Compression, ContainerSpec, DecodeOptions, Result, Schema};
use tracing::{error, info};

use crate::cmd::decode::{Job, run_job};
use crate::cmd::util::{DecodeArgs, RenderArgs};

#[derive(clap::Args)]
pub struct Args {
	/// JSON schema document.
	pub schema: PathBuf,
	#[command(flatten)]
	pub render: RenderArgs,
	#[command(flatten)]
	pub decode: DecodeArgs,
}

/// Decode work items from stdin until a blank line or EOF.
///
/// Each line is `input output [mode [type]]`. A failing item is logged and
/// the batch moves on; the command fails at the end if any item failed.
pub fn run(args: Args) -> Result<()> {
	let schema = Schema::from_json_file(&args.schema)?;
	let stdin = io::stdin().lock();
	run_lines(&schema, stdin, &args.decode.to_options(), args.decode.compression(), &args.render)
}

pub(crate) fn run_lines(
	schema: &Schema,
	reader: impl BufRead,
	options: &DecodeOptions,
	compression: Compression,
	render: &RenderArgs,
) -> Result<()> {
	let mut total = 0_usize;
	let mut failed = 0_usize;

	for line in reader.lines() {
		let line = line?;
		if line.trim().is_empty() {
			break;
		}

		total += 1;
		let result = WorkItem::parse(&line).and_then(|item| run_job(schema, &item.job(compression), options, render));
		if let Err(err) = result {
			failed += 1;
			error!(line = %line, "item failed: {err}");
		}
	}

	info!(total, failed, "batch finished");
	if failed > 0 {
		return Err(BinError::BatchFailed { failed, total });
	}
	Ok(())
}

/// One parsed stdin line. Omitted fields take their defaults on every line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct WorkItem {
	pub input: PathBuf,
	pub output: PathBuf,
	pub spec: ContainerSpec,
	pub type_name: Option<String>,
}

impl WorkItem {
	pub(crate) fn parse(line: &str) -> Result<Self> {
		let parts: Vec<&str> = line.split_whitespace().collect();
		let (input, output, mode, type_name) = match parts.as_slice() {
			[input, output] => (input, output, None, None),
			[input, output, mode] => (input, output, Some(mode), None),
			[input, output, mode, type_name] => (input, output, Some(mode), Some(type_name)),
			_ => return Err(BinError::InvalidWorkItem { line: line.to_owned() }),
		};

		let spec = match mode {
			Some(mode) => mode.parse()?,
			None => ContainerSpec::default(),
		};

		Ok(Self {
			input: PathBuf::from(*input),
			output: PathBuf::from(*output),
			spec,
			type_name: type_name.map(|name| (*name).to_owned()),
		})
	}

	fn job(&self, compression: Compression) -> Job<'_> {
		Job {
			input: &self.input,
			output: Some(self.output.as_path()),
			spec: self.spec,
			type_name: self.type_name.as_deref(),
			compression,
		}
	}
}
