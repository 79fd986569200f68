use std::path::Path;
use std::process;

use clap::Parser;
use mdctx_cli::MdctxCli;
use mdctx_cli::OutputFormat;
use mdctx_core::AnyEmptyResult;
use mdctx_core::ContextDiagnostic;
use mdctx_core::ContextTree;
use mdctx_core::MdctxConfig;
use mdctx_core::MdctxError;
use mdctx_core::build_contexts_with_options;
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,green) => {
		if color_enabled() {
			format!("{}", $text.green())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,yellow) => {
		if color_enabled() {
			format!("{}", $text.yellow())
		} else {
			format!("{}", $text)
		}
	};
}

fn main() {
	let args = MdctxCli::parse();

	// Respect NO_COLOR env var and --no-color flag.
	let use_color = !args.no_color && std::env::var_os("NO_COLOR").is_none();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	init_tracing(args.verbose, use_color);

	if let Err(e) = run(&args) {
		let code = match e.downcast::<MdctxError>() {
			Ok(error) => {
				let code = if matches!(*error, MdctxError::StrictDiagnostics(_)) {
					1
				} else {
					2
				};
				let report: miette::Report = (*error).into();
				eprintln!("{report:?}");
				code
			}
			Err(e) => {
				eprintln!("{} {e}", colored!("error:", red));
				2
			}
		};
		process::exit(code);
	}
}

/// Log to stderr. `RUST_LOG` wins over the default level.
fn init_tracing(verbose: bool, use_color: bool) {
	let default_level = if verbose { "info" } else { "warn" };
	let filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_ansi(use_color)
		.with_target(false)
		.without_time()
		.init();
}

fn run(args: &MdctxCli) -> AnyEmptyResult {
	let config = load_config(args)?;
	let options = args.builder_options(&config);

	tracing::info!(input = %args.input.display(), ?options, "building contexts");
	let content = std::fs::read_to_string(&args.input).map_err(MdctxError::from)?;
	let (tree, diagnostics) = build_contexts_with_options(&content, options)?;
	tracing::info!(
		nodes = tree.len(),
		diagnostics = diagnostics.len(),
		"built contexts"
	);

	let rendered = render(&tree, args.format)?;
	match &args.output {
		Some(path) => write_file(path, &rendered)?,
		None => print!("{rendered}"),
	}

	if let Some(path) = &args.eventlog {
		let log = serde_json::to_string_pretty(&diagnostics).map_err(MdctxError::from)?;
		write_file(path, &format!("{log}\n"))?;
	}

	print_summary(&diagnostics);

	if args.strict(&config) && !diagnostics.is_empty() {
		return Err(MdctxError::StrictDiagnostics(diagnostics.len()).into());
	}

	Ok(())
}

fn load_config(args: &MdctxCli) -> Result<MdctxConfig, MdctxError> {
	if let Some(path) = &args.config {
		return MdctxConfig::load_file(path);
	}

	Ok(MdctxConfig::load(&args.config_root())?.unwrap_or_default())
}

fn render(tree: &ContextTree, format: OutputFormat) -> Result<String, MdctxError> {
	match format {
		OutputFormat::Text => Ok(tree.outline()),
		OutputFormat::Json => Ok(format!("{}\n", serde_json::to_string_pretty(tree)?)),
	}
}

fn write_file(path: &Path, content: &str) -> Result<(), MdctxError> {
	if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
		std::fs::create_dir_all(parent)?;
	}
	std::fs::write(path, content)?;
	Ok(())
}

fn print_summary(diagnostics: &[ContextDiagnostic]) {
	if diagnostics.is_empty() {
		eprintln!("{}", colored!("No diagnostics.", green));
		return;
	}

	let errors = diagnostics.iter().filter(|d| d.is_error()).count();
	let warnings = diagnostics.len() - errors;
	let summary = format!("{errors} error(s), {warnings} warning(s)");
	if errors > 0 {
		eprintln!("{}", colored!(summary, red));
	} else {
		eprintln!("{}", colored!(summary, yellow));
	}
}
