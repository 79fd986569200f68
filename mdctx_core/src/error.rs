use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum MdctxError {
	#[error(transparent)]
	#[diagnostic(code(mdctx::io_error))]
	Io(#[from] std::io::Error),

	#[error("failure to load markdown: {0}")]
	#[diagnostic(code(mdctx::markdown))]
	Markdown(String),

	#[error("unbalanced parse event `{event}` while {state}")]
	#[diagnostic(
		code(mdctx::unbalanced_event),
		help("the upstream tokenizer must emit every exit event after its matching enter event")
	)]
	UnbalancedEvent { event: String, state: String },

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(mdctx::config_parse),
		help("check that mdctx.toml is valid TOML with [builder] and/or [diagnostics] sections")
	)]
	ConfigParse(String),

	#[error("failed to serialize output: {0}")]
	#[diagnostic(code(mdctx::json))]
	Json(String),

	#[error("{0} diagnostic(s) reported in strict mode")]
	#[diagnostic(
		code(mdctx::strict_diagnostics),
		help("fix the reported table and heading problems or run without `--strict`")
	)]
	StrictDiagnostics(usize),
}

impl From<serde_json::Error> for MdctxError {
	fn from(error: serde_json::Error) -> Self {
		Self::Json(error.to_string())
	}
}

pub type MdctxResult<T> = Result<T, MdctxError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
