use std::fmt::Display;

/// A structural event produced by the markdown tokenizer, delivered in
/// document order.
///
/// Enter events carry no payload. The exit events that the builder acts on
/// carry the raw source text the builder needs to normalize.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseEvent {
	EnterDocument,
	ExitDocument,
	EnterHeading,
	/// The raw heading line, including its `#` markers, e.g. `## Child`.
	ExitHeading {
		line: String,
	},
	EnterTable,
	ExitTable,
	EnterTableHeading,
	ExitTableHeading,
	EnterTableRow,
	ExitTableRow,
	EnterCell,
	/// The raw cell text, possibly still carrying pipes and padding.
	ExitCell {
		text: String,
	},
	EnterParagraph,
	/// Each raw line of the paragraph.
	ExitParagraph {
		lines: Vec<String>,
	},
	EnterList,
	/// Each raw line of the list, markers included.
	ExitList {
		lines: Vec<String>,
	},
}

impl ParseEvent {
	pub fn heading(line: impl Into<String>) -> Self {
		Self::ExitHeading { line: line.into() }
	}

	pub fn cell(text: impl Into<String>) -> Self {
		Self::ExitCell { text: text.into() }
	}

	pub fn paragraph<I, L>(lines: I) -> Self
	where
		I: IntoIterator<Item = L>,
		L: Into<String>,
	{
		Self::ExitParagraph {
			lines: lines.into_iter().map(Into::into).collect(),
		}
	}

	pub fn list<I, L>(lines: I) -> Self
	where
		I: IntoIterator<Item = L>,
		L: Into<String>,
	{
		Self::ExitList {
			lines: lines.into_iter().map(Into::into).collect(),
		}
	}

	/// The short name used in logs and errors.
	pub fn name(&self) -> &'static str {
		match self {
			Self::EnterDocument => "enterDocument",
			Self::ExitDocument => "exitDocument",
			Self::EnterHeading => "enterHeading",
			Self::ExitHeading { .. } => "exitHeading",
			Self::EnterTable => "enterTable",
			Self::ExitTable => "exitTable",
			Self::EnterTableHeading => "enterTableHeading",
			Self::ExitTableHeading => "exitTableHeading",
			Self::EnterTableRow => "enterTableRow",
			Self::ExitTableRow => "exitTableRow",
			Self::EnterCell => "enterCell",
			Self::ExitCell { .. } => "exitCell",
			Self::EnterParagraph => "enterParagraph",
			Self::ExitParagraph { .. } => "exitParagraph",
			Self::EnterList => "enterList",
			Self::ExitList { .. } => "exitList",
		}
	}
}

impl Display for ParseEvent {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.name())
	}
}
