use markdown::ParseOptions;
use markdown::mdast::Node;
use markdown::to_mdast;

use crate::BuilderOptions;
use crate::ContextBuilder;
use crate::ContextDiagnostic;
use crate::ContextTree;
use crate::MdctxError;
use crate::MdctxResult;
use crate::ParseEvent;

/// Parse markdown content and build its context tree.
///
/// ```
/// use mdctx_core::build_contexts;
///
/// let (tree, diagnostics) = build_contexts("# Root\ntext one\n").unwrap();
/// assert_eq!(tree.len(), 2);
/// assert!(diagnostics.is_empty());
/// ```
pub fn build_contexts(
	content: impl AsRef<str>,
) -> MdctxResult<(ContextTree, Vec<ContextDiagnostic>)> {
	build_contexts_with_options(content, BuilderOptions::default())
}

/// Like [`build_contexts`] with explicit builder options.
pub fn build_contexts_with_options(
	content: impl AsRef<str>,
	options: BuilderOptions,
) -> MdctxResult<(ContextTree, Vec<ContextDiagnostic>)> {
	let (events, mut diagnostics) = markdown_events(content)?;
	let mut builder = ContextBuilder::with_options(ContextTree::new(), options);
	builder.handle_all(events)?;

	let (tree, builder_diagnostics) = builder.finish();
	diagnostics.extend(builder_diagnostics);

	Ok((tree, diagnostics))
}

/// Tokenize markdown content into the structural event stream consumed by
/// [`ContextBuilder`].
///
/// Headings, paragraphs, lists and GFM tables become events. Any other
/// top-level block is skipped and reported as
/// [`ContextDiagnostic::UnsupportedBlock`].
///
/// Cell text is taken from the raw source, so a GFM escaped pipe stays
/// escaped: a cell written as `x \| y` keeps the value `x \| y`.
pub fn markdown_events(
	content: impl AsRef<str>,
) -> MdctxResult<(Vec<ParseEvent>, Vec<ContextDiagnostic>)> {
	let content = content.as_ref();
	let options = ParseOptions::gfm();
	let mdast = to_mdast(content, &options).map_err(|e| MdctxError::Markdown(e.to_string()))?;

	let mut reader = EventReader {
		source: content,
		events: vec![],
		diagnostics: vec![],
	};
	reader.read_document(&mdast);

	Ok((reader.events, reader.diagnostics))
}

struct EventReader<'a> {
	source: &'a str,
	events: Vec<ParseEvent>,
	diagnostics: Vec<ContextDiagnostic>,
}

impl<'a> EventReader<'a> {
	fn read_document(&mut self, root: &Node) {
		self.events.push(ParseEvent::EnterDocument);
		if let Some(children) = root.children() {
			for child in children {
				self.read_block(child);
			}
		}
		self.events.push(ParseEvent::ExitDocument);
	}

	fn read_block(&mut self, node: &Node) {
		match node {
			Node::Heading(heading) => {
				let line = self.heading_line(&heading.children, heading.depth);
				self.events.push(ParseEvent::EnterHeading);
				self.events.push(ParseEvent::ExitHeading { line });
			}
			Node::Paragraph(_) => {
				let lines = self.lines(node);
				self.events.push(ParseEvent::EnterParagraph);
				self.events.push(ParseEvent::ExitParagraph { lines });
			}
			Node::List(_) => {
				let lines = self.lines(node);
				self.events.push(ParseEvent::EnterList);
				self.events.push(ParseEvent::ExitList { lines });
			}
			Node::Table(table) => self.read_table(&table.children),
			_ => {
				let diagnostic = ContextDiagnostic::UnsupportedBlock {
					kind: block_kind(node).to_string(),
					line: node.position().map_or(0, |position| position.start.line),
				};
				diagnostic.log();
				self.diagnostics.push(diagnostic);
			}
		}
	}

	fn read_table(&mut self, rows: &[Node]) {
		self.events.push(ParseEvent::EnterTable);

		for (index, row) in rows.iter().enumerate() {
			let (enter, exit) = if index == 0 {
				(ParseEvent::EnterTableHeading, ParseEvent::ExitTableHeading)
			} else {
				(ParseEvent::EnterTableRow, ParseEvent::ExitTableRow)
			};

			self.events.push(enter);
			for cell in row.children().map(Vec::as_slice).unwrap_or_default() {
				let text = self
					.slice(cell)
					.map_or_else(|| plain_text(cell), ToString::to_string);
				self.events.push(ParseEvent::EnterCell);
				self.events.push(ParseEvent::ExitCell { text });
			}
			self.events.push(exit);
		}

		self.events.push(ParseEvent::ExitTable);
	}

	/// Rebuild an ATX style heading line from the heading's depth and the raw
	/// text of its content. Setext headings and ATX closing sequences are
	/// normalized away.
	fn heading_line(&self, children: &[Node], depth: u8) -> String {
		let markers = "#".repeat(usize::from(depth));
		let text = self
			.span(children)
			.map_or_else(|| children.iter().map(plain_text).collect(), ToString::to_string);

		if text.trim().is_empty() {
			markers
		} else {
			format!("{markers} {}", text.trim())
		}
	}

	fn lines(&self, node: &Node) -> Vec<String> {
		self.slice(node)
			.map(|text| text.lines().map(ToString::to_string).collect())
			.unwrap_or_else(|| vec![plain_text(node)])
	}

	/// The raw source covered by a node.
	fn slice(&self, node: &Node) -> Option<&'a str> {
		let position = node.position()?;
		self.source.get(position.start.offset..position.end.offset)
	}

	/// The raw source from the start of the first node to the end of the last.
	fn span(&self, nodes: &[Node]) -> Option<&'a str> {
		let start = nodes.first()?.position()?.start.offset;
		let end = nodes.last()?.position()?.end.offset;
		self.source.get(start..end)
	}
}

/// Concatenated text of a node and its descendants.
fn plain_text(node: &Node) -> String {
	match node {
		Node::Text(text) => text.value.clone(),
		Node::InlineCode(code) => code.value.clone(),
		Node::Break(_) => " ".to_string(),
		_ => {
			node.children()
				.map(|children| children.iter().map(plain_text).collect())
				.unwrap_or_default()
		}
	}
}

fn block_kind(node: &Node) -> &'static str {
	match node {
		Node::Code(_) => "code",
		Node::Blockquote(_) => "blockquote",
		Node::Html(_) => "html",
		Node::ThematicBreak(_) => "thematic break",
		Node::Definition(_) => "definition",
		Node::FootnoteDefinition(_) => "footnote definition",
		Node::Math(_) => "math",
		_ => "markdown",
	}
}
