/// Characters stripped from both ends of a table cell.
const CELL_NONTEXT: [char; 3] = [' ', '|', '\t'];

/// Heading marker character.
const HEADING_MARKER: char = '#';

/// Strip leading and trailing spaces, tabs and pipes from raw cell text.
///
/// Internal content is returned untouched.
///
/// ```
/// use mdctx_core::trim_cell;
///
/// assert_eq!(trim_cell(" | total |\t"), "total");
/// assert_eq!(trim_cell("a | b"), "a | b");
/// ```
pub fn trim_cell(text: &str) -> &str {
	text.trim_matches(CELL_NONTEXT)
}

/// Join the lines of a paragraph with single spaces.
pub fn normalize_paragraph<S: AsRef<str>>(lines: &[S]) -> String {
	lines
		.iter()
		.map(|line| line.as_ref().trim())
		.filter(|line| !line.is_empty())
		.collect::<Vec<_>>()
		.join(" ")
}

/// Join the lines of a list with newlines, keeping each line's markers and
/// indentation.
pub fn normalize_list<S: AsRef<str>>(lines: &[S]) -> String {
	lines
		.iter()
		.map(|line| line.as_ref().trim_end())
		.filter(|line| !line.is_empty())
		.collect::<Vec<_>>()
		.join("\n")
}

/// The level and words of a raw heading line such as `## Message Heartbeat`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingLine {
	pub level: usize,
	pub words: Vec<String>,
	/// The line had no marker run followed by whitespace. The level defaults
	/// to 1 and the text after any markers becomes a single word.
	pub malformed: bool,
}

/// Split a raw heading line into its level and words.
///
/// The level is the length of the `#` marker run that precedes the first
/// space or tab.
pub fn parse_heading_line(line: &str) -> HeadingLine {
	let line = line.trim();
	let level = line
		.chars()
		.take_while(|c| *c == HEADING_MARKER)
		.count();
	let rest = &line[level..];

	if level > 0 && rest.starts_with([' ', '\t']) {
		return HeadingLine {
			level,
			words: rest.split_whitespace().map(ToString::to_string).collect(),
			malformed: false,
		};
	}

	if level > 0 && rest.is_empty() {
		// A bare marker run is an empty heading, not a malformed one.
		return HeadingLine {
			level,
			words: vec![],
			malformed: false,
		};
	}

	let text = rest.trim();
	HeadingLine {
		level: 1,
		words: if text.is_empty() {
			vec![]
		} else {
			vec![text.to_string()]
		},
		malformed: true,
	}
}
