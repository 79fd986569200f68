use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::BuilderOptions;
use crate::MdctxError;
use crate::MdctxResult;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] = ["mdctx.toml", ".mdctx.toml", ".config/mdctx.toml"];

/// Configuration loaded from `mdctx.toml`.
///
/// ```toml
/// [builder]
/// emit_rows = false
/// emit_empty_tables = true
///
/// [diagnostics]
/// strict = true
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct MdctxConfig {
	/// Which nodes the builder emits.
	pub builder: BuilderOptions,
	pub diagnostics: DiagnosticsConfig,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DiagnosticsConfig {
	/// Treat any recorded diagnostic as a failure.
	pub strict: bool,
}

impl MdctxConfig {
	/// Resolve the config path from known discovery candidates.
	#[must_use]
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file at `root`.
	/// Returns `None` if the file does not exist.
	pub fn load(root: &Path) -> MdctxResult<Option<MdctxConfig>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		Self::load_file(&config_path).map(Some)
	}

	/// Load the config from an explicit path.
	pub fn load_file(path: &Path) -> MdctxResult<MdctxConfig> {
		let content = std::fs::read_to_string(path)?;
		Self::from_toml(&content)
	}

	pub fn from_toml(content: &str) -> MdctxResult<MdctxConfig> {
		toml::from_str(content).map_err(|e| MdctxError::ConfigParse(e.to_string()))
	}
}
