use std::path::PathBuf;

use clap::Parser;
use clap::ValueEnum;
use mdctx_core::BuilderOptions;
use mdctx_core::MdctxConfig;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Build a heading context tree from structured markdown.",
	long_about = "mdctx reads a markdown document whose headings organize prose and tables, \
	              and turns it into a tree of contexts: one per heading, with the documentation \
	              text, table rows and whole tables that belong to it.\n\nQuick start:\n  mdctx \
	              notes.md                Print an outline of the tree\n  mdctx notes.md \
	              --format json  Print every node as JSON\n  mdctx notes.md -e events.json \
	              Also write diagnostics to a file"
)]
#[allow(clippy::struct_excessive_bools)]
pub struct MdctxCli {
	/// The markdown file to read.
	pub input: PathBuf,

	/// Write the rendered tree to this file instead of stdout.
	#[arg(long, short)]
	pub output: Option<PathBuf>,

	/// Write the recorded diagnostics to this file as a JSON array.
	#[arg(long, short)]
	pub eventlog: Option<PathBuf>,

	/// Output format. Use `text` for an indented outline or `json` for the
	/// full list of nodes with their parent links.
	#[arg(long, value_enum, default_value_t = OutputFormat::Text)]
	pub format: OutputFormat,

	/// Exit with a failure status when any diagnostic is recorded.
	#[arg(long, default_value_t = false)]
	pub strict: bool,

	/// Skip the per-row detail nodes and only emit whole tables.
	#[arg(long, default_value_t = false)]
	pub no_rows: bool,

	/// Path to a config file. Defaults to the first `mdctx.toml`,
	/// `.mdctx.toml` or `.config/mdctx.toml` next to the input.
	#[arg(long)]
	pub config: Option<PathBuf>,

	/// Enable verbose output.
	#[arg(long, short, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, default_value_t = false)]
	pub no_color: bool,
}

impl MdctxCli {
	/// Builder options from the config file with command line flags applied
	/// on top.
	#[must_use]
	pub fn builder_options(&self, config: &MdctxConfig) -> BuilderOptions {
		let mut options = config.builder;
		if self.no_rows {
			options.emit_rows = false;
		}
		options
	}

	#[must_use]
	pub fn strict(&self, config: &MdctxConfig) -> bool {
		self.strict || config.diagnostics.strict
	}

	/// Directory searched for a config file when `--config` is not given.
	#[must_use]
	pub fn config_root(&self) -> PathBuf {
		self.input
			.parent()
			.filter(|parent| !parent.as_os_str().is_empty())
			.map_or_else(|| PathBuf::from("."), PathBuf::from)
	}
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
	#[default]
	Text,
	Json,
}
