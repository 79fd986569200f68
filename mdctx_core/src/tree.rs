use std::fmt::Write;

use serde::Serialize;

use crate::Context;
use crate::ContextSink;
use crate::NodeId;

/// Owns every emitted node in emission order. A node's [`NodeId`] is its
/// index in the tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ContextTree {
	nodes: Vec<Context>,
}

impl ContextSink for ContextTree {
	fn accept(&mut self, context: Context) {
		debug_assert_eq!(context.id().index(), self.nodes.len());
		self.nodes.push(context);
	}
}

impl ContextTree {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	pub fn get(&self, id: NodeId) -> Option<&Context> {
		self.nodes.get(id.index())
	}

	pub fn iter(&self) -> std::slice::Iter<'_, Context> {
		self.nodes.iter()
	}

	pub fn nodes(&self) -> &[Context] {
		&self.nodes
	}

	pub fn parent(&self, id: NodeId) -> Option<&Context> {
		self.get(id)?.parent().and_then(|parent| self.get(parent))
	}

	/// Every ancestor of the node, nearest first.
	pub fn ancestors(&self, id: NodeId) -> Vec<&Context> {
		let mut ancestors = vec![];
		let mut current = self.parent(id);

		while let Some(node) = current {
			ancestors.push(node);
			current = self.parent(node.id());
		}

		ancestors
	}

	pub fn children(&self, id: NodeId) -> impl Iterator<Item = &Context> {
		// Children always follow their parent in emission order.
		self.nodes
			.iter()
			.skip(id.index() + 1)
			.filter(move |node| node.parent() == Some(id))
	}

	pub fn roots(&self) -> impl Iterator<Item = &Context> {
		self.nodes.iter().filter(|node| node.parent().is_none())
	}

	/// Render the tree as an indented outline, one node per line.
	pub fn outline(&self) -> String {
		let mut output = String::new();
		for root in self.roots() {
			self.write_outline(&mut output, root, 0);
		}
		output
	}

	fn write_outline(&self, output: &mut String, node: &Context, depth: usize) {
		let indent = "  ".repeat(depth);

		match node {
			Context::Heading(heading) => {
				writeln!(
					output,
					"{indent}{} {}",
					"#".repeat(heading.level),
					heading.words.join(" ")
				)
				.ok();
			}
			Context::Documentation(documentation) => {
				writeln!(
					output,
					"{indent}documentation: {}",
					documentation.text.replace('\n', " / ")
				)
				.ok();
			}
			Context::Detail(detail) => {
				writeln!(output, "{indent}detail: {}", format_row(&detail.properties)).ok();
			}
			Context::DetailTable(table) => {
				let rows: Vec<String> = table.rows.iter().map(|row| format_row(row)).collect();
				writeln!(output, "{indent}table: [{}]", rows.join(", ")).ok();
			}
		}

		for child in self.children(node.id()) {
			self.write_outline(output, child, depth + 1);
		}
	}
}

impl<'a> IntoIterator for &'a ContextTree {
	type IntoIter = std::slice::Iter<'a, Context>;
	type Item = &'a Context;

	fn into_iter(self) -> Self::IntoIter {
		self.nodes.iter()
	}
}

fn format_row(row: &[(String, String)]) -> String {
	let fields: Vec<String> = row
		.iter()
		.map(|(key, value)| format!("{key}={value}"))
		.collect();
	format!("{{{}}}", fields.join(", "))
}
