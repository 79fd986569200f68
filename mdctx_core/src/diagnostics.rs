use std::fmt::Display;

use serde::Serialize;

/// A problem found while building contexts that does not stop the rest of
/// the document from being processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
#[non_exhaustive]
pub enum ContextDiagnostic {
	/// A table row had fewer cells than the table has column headers. The
	/// missing field is left out of the row.
	#[serde(rename_all = "camelCase")]
	MissingCell {
		/// Zero-based data row index within its table.
		row: usize,
		/// Zero-based column index of the missing cell.
		column: usize,
		/// Column header of the missing cell.
		header: String,
		heading_words: Vec<String>,
		heading_level: usize,
	},
	/// A heading line without a marker run followed by whitespace.
	MalformedHeading { line: String },
	/// A markdown block outside of the supported dialect. It is skipped.
	UnsupportedBlock { kind: String, line: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Severity {
	Warning,
	Error,
}

impl Display for Severity {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Warning => write!(f, "warning"),
			Self::Error => write!(f, "error"),
		}
	}
}

impl ContextDiagnostic {
	pub fn severity(&self) -> Severity {
		match self {
			Self::MissingCell { .. } => Severity::Error,
			Self::MalformedHeading { .. } | Self::UnsupportedBlock { .. } => Severity::Warning,
		}
	}

	pub fn is_error(&self) -> bool {
		self.severity() == Severity::Error
	}

	/// Log the diagnostic at the level matching its severity.
	pub(crate) fn log(&self) {
		match self.severity() {
			Severity::Error => tracing::error!("{self}"),
			Severity::Warning => tracing::warn!("{self}"),
		}
	}
}

impl Display for ContextDiagnostic {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::MissingCell {
				row,
				column,
				header,
				heading_words,
				..
			} => {
				write!(
					f,
					"table cell missing in row {row}, column {column} (`{header}`)"
				)?;
				if !heading_words.is_empty() {
					write!(f, " under heading `{}`", heading_words.join(" "))?;
				}
				Ok(())
			}
			Self::MalformedHeading { line } => {
				write!(f, "malformed heading `{line}` treated as level 1")
			}
			Self::UnsupportedBlock { kind, line } => {
				write!(f, "unsupported {kind} block on line {line} skipped")
			}
		}
	}
}
