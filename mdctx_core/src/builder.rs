use serde::Deserialize;
use serde::Serialize;

use crate::BlockAccumulator;
use crate::Context;
use crate::ContextDiagnostic;
use crate::ContextSink;
use crate::ContextStack;
use crate::Detail;
use crate::DetailProperties;
use crate::DetailTable;
use crate::Documentation;
use crate::HeadingContext;
use crate::HeadingSnapshot;
use crate::MdctxError;
use crate::MdctxResult;
use crate::NodeId;
use crate::ParseEvent;
use crate::StackEntry;
use crate::normalize::HeadingLine;
use crate::normalize::parse_heading_line;
use crate::normalize::trim_cell;

/// Switches that control which nodes the builder emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct BuilderOptions {
	/// Emit a `Detail` node for every table row, ahead of the `DetailTable`.
	pub emit_rows: bool,
	/// Emit a `DetailTable` for a table that has a header row but no data
	/// rows.
	pub emit_empty_tables: bool,
}

impl Default for BuilderOptions {
	fn default() -> Self {
		Self {
			emit_rows: true,
			emit_empty_tables: true,
		}
	}
}

/// Which part of a table the cells currently belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TableSection {
	Idle,
	Heading,
	Row,
}

/// The table currently being read.
#[derive(Debug)]
struct TableState {
	section: TableSection,
	headers: Vec<String>,
	cells: Vec<String>,
	rows: Vec<DetailProperties>,
}

impl TableState {
	fn new() -> Self {
		Self {
			section: TableSection::Idle,
			headers: vec![],
			cells: vec![],
			rows: vec![],
		}
	}

	/// Pair the recorded headers with the current row's cells by position.
	/// Returns the row and the column index and header of every cell the row
	/// lacks. Cells beyond the last header are dropped.
	fn finish_row(&mut self) -> (DetailProperties, Vec<(usize, String)>) {
		let mut properties = DetailProperties::new();
		let mut missing = vec![];

		for (column, header) in self.headers.iter().enumerate() {
			match self.cells.get(column) {
				Some(value) => properties.insert(header.as_str(), value.as_str()),
				None => missing.push((column, header.clone())),
			}
		}

		self.cells.clear();
		self.section = TableSection::Idle;
		self.rows.push(properties.clone());

		(properties, missing)
	}
}

/// The level and parent of the last content node emitted since the most
/// recent heading.
#[derive(Debug, Clone, Copy)]
struct LastContent {
	level: usize,
	parent: Option<NodeId>,
}

/// Turns a stream of [`ParseEvent`]s into [`Context`] nodes delivered to a
/// [`ContextSink`].
///
/// Nodes are emitted in the order their closing events arrive. Headings are
/// linked to the nearest open heading with a smaller level. Documentation,
/// rows and tables are linked to the current heading, and consecutive content
/// nodes at the same level share a parent.
///
/// ```
/// use mdctx_core::Context;
/// use mdctx_core::ContextBuilder;
/// use mdctx_core::ParseEvent;
///
/// let mut builder = ContextBuilder::new(Vec::<Context>::new());
/// builder
/// 	.handle_all([
/// 		ParseEvent::EnterDocument,
/// 		ParseEvent::EnterHeading,
/// 		ParseEvent::heading("# Root"),
/// 		ParseEvent::EnterParagraph,
/// 		ParseEvent::paragraph(["text one"]),
/// 		ParseEvent::ExitDocument,
/// 	])
/// 	.unwrap();
///
/// let (nodes, diagnostics) = builder.finish();
/// assert_eq!(nodes.len(), 2);
/// assert!(diagnostics.is_empty());
/// ```
#[derive(Debug)]
pub struct ContextBuilder<S: ContextSink> {
	sink: S,
	options: BuilderOptions,
	contexts: ContextStack,
	blocks: BlockAccumulator,
	heading: HeadingSnapshot,
	last_content: Option<LastContent>,
	table: Option<TableState>,
	in_heading: bool,
	finished: bool,
	next_id: usize,
	diagnostics: Vec<ContextDiagnostic>,
}

impl<S: ContextSink> ContextBuilder<S> {
	pub fn new(sink: S) -> Self {
		Self::with_options(sink, BuilderOptions::default())
	}

	pub fn with_options(sink: S, options: BuilderOptions) -> Self {
		Self {
			sink,
			options,
			contexts: ContextStack::new(),
			blocks: BlockAccumulator::new(),
			heading: HeadingSnapshot::default(),
			last_content: None,
			table: None,
			in_heading: false,
			finished: false,
			next_id: 0,
			diagnostics: vec![],
		}
	}

	pub fn diagnostics(&self) -> &[ContextDiagnostic] {
		&self.diagnostics
	}

	/// Levels of the open headings from bottom to top.
	pub fn stack_levels(&self) -> Vec<usize> {
		self.contexts.levels()
	}

	/// Whether the end of the document has been handled.
	pub fn is_finished(&self) -> bool {
		self.finished
	}

	/// Consume the builder, returning the sink and every diagnostic recorded.
	pub fn finish(self) -> (S, Vec<ContextDiagnostic>) {
		(self.sink, self.diagnostics)
	}

	pub fn handle_all<I>(&mut self, events: I) -> MdctxResult<()>
	where
		I: IntoIterator<Item = ParseEvent>,
	{
		for event in events {
			self.handle(event)?;
		}

		Ok(())
	}

	/// Process one event.
	///
	/// Fails only when the event breaks the enter/exit ordering of the
	/// tokenizer, e.g. an exit-table without a matching enter-table.
	pub fn handle(&mut self, event: ParseEvent) -> MdctxResult<()> {
		if self.finished && event != ParseEvent::EnterDocument {
			return Err(unbalanced(&event, "the document has already ended"));
		}

		match event {
			ParseEvent::EnterDocument => self.reset(),
			ParseEvent::ExitDocument => {
				self.flush_documentation();
				self.finished = true;
			}
			ParseEvent::EnterHeading => {
				if self.in_heading {
					return Err(unbalanced(&event, "a heading is already open"));
				}
				if self.table.is_some() {
					return Err(unbalanced(&event, "a table is still open"));
				}
				self.flush_documentation();
				self.in_heading = true;
			}
			ParseEvent::ExitHeading { ref line } => {
				if !self.in_heading {
					return Err(unbalanced(&event, "no heading is open"));
				}
				self.in_heading = false;
				self.push_heading(line);
			}
			ParseEvent::EnterTable => {
				if self.table.is_some() {
					return Err(unbalanced(&event, "a table is already open"));
				}
				self.table = Some(TableState::new());
			}
			ParseEvent::ExitTable => {
				let Some(table) = self.table.take() else {
					return Err(unbalanced(&event, "no table is open"));
				};
				match table.section {
					TableSection::Idle => self.emit_table(table.rows),
					TableSection::Heading => {}
					TableSection::Row => {
						return Err(unbalanced(&event, "a table row is still open"));
					}
				}
			}
			ParseEvent::EnterTableHeading => {
				let table = self.open_table(&event)?;
				table.headers.clear();
				table.section = TableSection::Heading;
			}
			ParseEvent::ExitTableHeading => {
				let table = self.open_table(&event)?;
				if table.section != TableSection::Heading {
					return Err(unbalanced(&event, "no table heading is open"));
				}
				table.section = TableSection::Idle;
			}
			ParseEvent::EnterTableRow => {
				let table = self.open_table(&event)?;
				match table.section {
					TableSection::Idle => {
						table.cells.clear();
						table.section = TableSection::Row;
					}
					TableSection::Heading => {}
					TableSection::Row => {
						return Err(unbalanced(&event, "a table row is still open"));
					}
				}
			}
			ParseEvent::ExitTableRow => {
				let table = self.open_table(&event)?;
				match table.section {
					TableSection::Heading => {}
					TableSection::Row => {
						let row = table.rows.len();
						let (properties, missing) = table.finish_row();
						for (column, header) in missing {
							self.report(ContextDiagnostic::MissingCell {
								row,
								column,
								header,
								heading_words: self.heading.words.clone(),
								heading_level: self.heading.level,
							});
						}
						self.emit_row(properties);
					}
					TableSection::Idle => {
						return Err(unbalanced(&event, "no table row is open"));
					}
				}
			}
			ParseEvent::EnterCell => {}
			ParseEvent::ExitCell { ref text } => {
				let table = self.open_table(&event)?;
				let text = trim_cell(text).to_string();
				match table.section {
					TableSection::Heading => table.headers.push(text),
					TableSection::Row => table.cells.push(text),
					TableSection::Idle => {
						return Err(unbalanced(&event, "no table heading or row is open"));
					}
				}
			}
			ParseEvent::EnterParagraph | ParseEvent::EnterList => {}
			ParseEvent::ExitParagraph { lines } => self.blocks.push_paragraph(&lines),
			ParseEvent::ExitList { lines } => self.blocks.push_list(&lines),
		}

		Ok(())
	}

	fn reset(&mut self) {
		self.contexts.clear();
		self.blocks = BlockAccumulator::new();
		self.heading = HeadingSnapshot::default();
		self.last_content = None;
		self.table = None;
		self.in_heading = false;
		self.finished = false;
	}

	fn open_table(&mut self, event: &ParseEvent) -> MdctxResult<&mut TableState> {
		self.table
			.as_mut()
			.ok_or_else(|| unbalanced(event, "no table is open"))
	}

	fn push_heading(&mut self, line: &str) {
		let HeadingLine {
			level,
			words,
			malformed,
		} = parse_heading_line(line);

		if malformed {
			self.report(ContextDiagnostic::MalformedHeading {
				line: line.to_string(),
			});
		}

		let id = self.allocate_id();
		let parent = self.contexts.push(StackEntry { id, level });
		self.heading = HeadingSnapshot::new(words.clone(), level);
		self.last_content = None;

		self.emit(Context::Heading(HeadingContext {
			id,
			level,
			words,
			parent,
		}));
	}

	fn flush_documentation(&mut self) {
		let Some(text) = self.blocks.take() else {
			return;
		};

		let id = self.allocate_id();
		let parent = self.content_parent();
		self.emit(Context::Documentation(Documentation {
			id,
			heading: self.heading.clone(),
			text,
			parent,
		}));
	}

	fn emit_row(&mut self, properties: DetailProperties) {
		if !self.options.emit_rows {
			return;
		}

		let id = self.allocate_id();
		let parent = self.content_parent();
		self.emit(Context::Detail(Detail {
			id,
			heading: self.heading.clone(),
			properties,
			parent,
		}));
	}

	fn emit_table(&mut self, rows: Vec<DetailProperties>) {
		if rows.is_empty() && !self.options.emit_empty_tables {
			return;
		}

		let id = self.allocate_id();
		let parent = self.content_parent();
		self.emit(Context::DetailTable(DetailTable {
			id,
			heading: self.heading.clone(),
			rows,
			parent,
		}));
	}

	/// Resolve the parent of a content node at the current heading level.
	///
	/// A node following another content node at the same level becomes its
	/// sibling. Otherwise it becomes a child of the innermost open heading.
	fn content_parent(&mut self) -> Option<NodeId> {
		let level = self.heading.level;
		let parent = match self.last_content {
			Some(last) if last.level == level => last.parent,
			_ => self.contexts.top().map(|top| top.id),
		};

		self.last_content = Some(LastContent { level, parent });
		parent
	}

	fn allocate_id(&mut self) -> NodeId {
		let id = NodeId(self.next_id);
		self.next_id += 1;
		id
	}

	fn emit(&mut self, context: Context) {
		tracing::debug!(
			id = context.id().index(),
			kind = %context.kind(),
			level = context.level(),
			parent = ?context.parent().map(NodeId::index),
			"emit context"
		);
		self.sink.accept(context);
	}

	fn report(&mut self, diagnostic: ContextDiagnostic) {
		diagnostic.log();
		self.diagnostics.push(diagnostic);
	}
}

fn unbalanced(event: &ParseEvent, state: &str) -> MdctxError {
	MdctxError::UnbalancedEvent {
		event: event.name().to_string(),
		state: state.to_string(),
	}
}
