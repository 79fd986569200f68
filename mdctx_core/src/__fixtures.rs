use crate::Context;
use crate::ContextBuilder;
use crate::ContextDiagnostic;
use crate::ContextTree;
use crate::MdctxResult;
use crate::ParseEvent;

pub fn heading(line: &str) -> Vec<ParseEvent> {
	vec![ParseEvent::EnterHeading, ParseEvent::heading(line)]
}

pub fn paragraph(lines: &[&str]) -> Vec<ParseEvent> {
	vec![
		ParseEvent::EnterParagraph,
		ParseEvent::paragraph(lines.iter().copied()),
	]
}

pub fn list(lines: &[&str]) -> Vec<ParseEvent> {
	vec![ParseEvent::EnterList, ParseEvent::list(lines.iter().copied())]
}

fn cells(values: &[&str]) -> Vec<ParseEvent> {
	values
		.iter()
		.flat_map(|value| [ParseEvent::EnterCell, ParseEvent::cell(*value)])
		.collect()
}

/// A table with a header row and data rows. Cell text is padded with pipes
/// the way a tokenizer hands it over.
pub fn table(headers: &[&str], rows: &[&[&str]]) -> Vec<ParseEvent> {
	let mut events = vec![ParseEvent::EnterTable, ParseEvent::EnterTableHeading];
	let padded: Vec<String> = headers.iter().map(|header| format!("| {header} ")).collect();
	events.extend(cells(
		&padded.iter().map(String::as_str).collect::<Vec<_>>(),
	));
	events.push(ParseEvent::ExitTableHeading);

	for row in rows {
		events.push(ParseEvent::EnterTableRow);
		let padded: Vec<String> = row.iter().map(|value| format!("| {value} ")).collect();
		events.extend(cells(
			&padded.iter().map(String::as_str).collect::<Vec<_>>(),
		));
		events.push(ParseEvent::ExitTableRow);
	}

	events.push(ParseEvent::ExitTable);
	events
}

/// Wrap event groups in enter/exit document events.
pub fn document(groups: impl IntoIterator<Item = Vec<ParseEvent>>) -> Vec<ParseEvent> {
	let mut events = vec![ParseEvent::EnterDocument];
	events.extend(groups.into_iter().flatten());
	events.push(ParseEvent::ExitDocument);
	events
}

pub fn build(events: Vec<ParseEvent>) -> MdctxResult<(Vec<Context>, Vec<ContextDiagnostic>)> {
	let mut builder = ContextBuilder::new(Vec::new());
	builder.handle_all(events)?;
	Ok(builder.finish())
}

pub fn build_tree(events: Vec<ParseEvent>) -> MdctxResult<(ContextTree, Vec<ContextDiagnostic>)> {
	let mut builder = ContextBuilder::new(ContextTree::new());
	builder.handle_all(events)?;
	Ok(builder.finish())
}

pub fn words(words: &[&str]) -> Vec<String> {
	words.iter().map(ToString::to_string).collect()
}
