use std::io;
use std::path::Path;

use bindump::bindata::{Compression, DecodeOptions, Result, Value};
use clap::ValueEnum;
use serde::Serialize;
use tracing::info;

use crate::cmd::print::{PrintOptions, render_tree};
use crate::cmd::render::to_json;

/// Text format for decoded values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
	/// JSON with decode-order keys.
	Json,
	/// Indented, truncated tree for reading.
	Tree,
}

/// Output rendering flags shared by `decode` and `batch`.
#[derive(Debug, Clone, clap::Args)]
pub struct RenderArgs {
	#[arg(long, value_enum, default_value_t = OutputFormat::Json)]
	pub format: OutputFormat,
	/// Single-line JSON.
	#[arg(long)]
	pub compact: bool,
}

/// Decoder limits shared by `decode` and `batch`.
#[derive(Debug, Clone, clap::Args)]
pub struct DecodeArgs {
	#[arg(long, default_value_t = 64)]
	pub max_depth: u32,
	/// Fail when bytes remain after the top-level value.
	#[arg(long)]
	pub strict_trailing: bool,
	/// Inputs are zstd-compressed.
	#[arg(long)]
	pub zstd: bool,
}

impl DecodeArgs {
	pub(crate) fn to_options(&self) -> DecodeOptions {
		DecodeOptions {
			max_depth: self.max_depth,
			strict_trailing: self.strict_trailing,
			..DecodeOptions::default()
		}
	}

	pub(crate) fn compression(&self) -> Compression {
		if self.zstd { Compression::Zstd } else { Compression::None }
	}
}

/// Render `value` in the requested format, newline-terminated.
pub(crate) fn render_value(value: &Value, render: &RenderArgs) -> Result<String> {
	match render.format {
		OutputFormat::Json => {
			let mut text = to_json(value, render.compact).map_err(io::Error::from)?;
			text.push('\n');
			Ok(text)
		}
		OutputFormat::Tree => Ok(render_tree(value, PrintOptions::default())),
	}
}

/// Write rendered text to `path`, or stdout when no path is given.
pub(crate) fn write_output(path: Option<&Path>, text: &str) -> Result<()> {
	match path {
		Some(path) => {
			std::fs::write(path, text)?;
			info!(path = %path.display(), bytes = text.len(), "wrote output");
		}
		None => print!("{text}"),
	}
	Ok(())
}

/// Print a serializable payload as pretty JSON on stdout.
pub(crate) fn emit_json<T: Serialize>(payload: &T) -> Result<()> {
	let text = serde_json::to_string_pretty(payload).map_err(io::Error::from)?;
	println!("{text}");
	Ok(())
}
