use std::fmt::Display;

use derive_more::Deref;
use serde::Serialize;
use serde::Serializer;

/// Handle of an emitted node: its zero-based position in the emission order.
///
/// Parents are always emitted before their children, so a parent's id is
/// always smaller than the id of any node that refers to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct NodeId(pub usize);

impl NodeId {
	pub fn index(self) -> usize {
		self.0
	}
}

impl Display for NodeId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "#{}", self.0)
	}
}

/// The heading words and level copied onto a content node when it is built.
///
/// Content seen before the first heading carries an empty snapshot with a
/// level of zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HeadingSnapshot {
	pub words: Vec<String>,
	pub level: usize,
}

impl HeadingSnapshot {
	pub fn new(words: Vec<String>, level: usize) -> Self {
		Self { words, level }
	}

	/// Whether any heading had been seen when this snapshot was taken.
	pub fn is_empty(&self) -> bool {
		self.level == 0
	}

	/// The first heading word, conventionally a keyword such as `Message`.
	pub fn keyword(&self) -> Option<&str> {
		self.words.first().map(String::as_str)
	}
}

/// One heading and its nesting level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeadingContext {
	pub id: NodeId,
	pub level: usize,
	pub words: Vec<String>,
	pub parent: Option<NodeId>,
}

/// Prose and list text attached to the most recent heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Documentation {
	pub id: NodeId,
	pub heading: HeadingSnapshot,
	pub text: String,
	pub parent: Option<NodeId>,
}

/// Ordered column header to cell value pairs of one table row.
///
/// Keys follow column order. A row never holds more entries than the table
/// has column headers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deref)]
pub struct DetailProperties(Vec<(String, String)>);

impl DetailProperties {
	pub fn new() -> Self {
		Self::default()
	}

	/// Append a property. A repeated key replaces the earlier value in place
	/// so keys stay unique within a row.
	pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
		let key = key.into();
		let value = value.into();

		match self.0.iter_mut().find(|(existing, _)| *existing == key) {
			Some(entry) => entry.1 = value,
			None => self.0.push((key, value)),
		}
	}

	pub fn get(&self, key: &str) -> Option<&str> {
		self.0
			.iter()
			.find(|(existing, _)| existing == key)
			.map(|(_, value)| value.as_str())
	}

	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.0.iter().map(|(key, _)| key.as_str())
	}
}

impl Serialize for DetailProperties {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.collect_map(self.0.iter().map(|(key, value)| (key, value)))
	}
}

impl<K, V> FromIterator<(K, V)> for DetailProperties
where
	K: Into<String>,
	V: Into<String>,
{
	fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
		let mut properties = Self::new();
		for (key, value) in iter {
			properties.insert(key, value);
		}
		properties
	}
}

/// One normalized table row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Detail {
	pub id: NodeId,
	pub heading: HeadingSnapshot,
	pub properties: DetailProperties,
	pub parent: Option<NodeId>,
}

/// Every row of one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailTable {
	pub id: NodeId,
	pub heading: HeadingSnapshot,
	pub rows: Vec<DetailProperties>,
	pub parent: Option<NodeId>,
}

/// A node emitted by the builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Context {
	Heading(HeadingContext),
	Documentation(Documentation),
	Detail(Detail),
	DetailTable(DetailTable),
}

impl Context {
	pub fn id(&self) -> NodeId {
		match self {
			Self::Heading(heading) => heading.id,
			Self::Documentation(documentation) => documentation.id,
			Self::Detail(detail) => detail.id,
			Self::DetailTable(table) => table.id,
		}
	}

	pub fn parent(&self) -> Option<NodeId> {
		match self {
			Self::Heading(heading) => heading.parent,
			Self::Documentation(documentation) => documentation.parent,
			Self::Detail(detail) => detail.parent,
			Self::DetailTable(table) => table.parent,
		}
	}

	/// The heading level this node belongs to. For a heading this is its own
	/// level.
	pub fn level(&self) -> usize {
		match self {
			Self::Heading(heading) => heading.level,
			Self::Documentation(documentation) => documentation.heading.level,
			Self::Detail(detail) => detail.heading.level,
			Self::DetailTable(table) => table.heading.level,
		}
	}

	/// The heading words this node belongs to. For a heading these are its
	/// own words.
	pub fn words(&self) -> &[String] {
		match self {
			Self::Heading(heading) => &heading.words,
			Self::Documentation(documentation) => &documentation.heading.words,
			Self::Detail(detail) => &detail.heading.words,
			Self::DetailTable(table) => &table.heading.words,
		}
	}

	pub fn kind(&self) -> ContextKind {
		match self {
			Self::Heading(_) => ContextKind::Heading,
			Self::Documentation(_) => ContextKind::Documentation,
			Self::Detail(_) => ContextKind::Detail,
			Self::DetailTable(_) => ContextKind::DetailTable,
		}
	}

	pub fn as_heading(&self) -> Option<&HeadingContext> {
		match self {
			Self::Heading(heading) => Some(heading),
			_ => None,
		}
	}

	pub fn as_documentation(&self) -> Option<&Documentation> {
		match self {
			Self::Documentation(documentation) => Some(documentation),
			_ => None,
		}
	}

	pub fn as_detail(&self) -> Option<&Detail> {
		match self {
			Self::Detail(detail) => Some(detail),
			_ => None,
		}
	}

	pub fn as_detail_table(&self) -> Option<&DetailTable> {
		match self {
			Self::DetailTable(table) => Some(table),
			_ => None,
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ContextKind {
	Heading,
	Documentation,
	Detail,
	DetailTable,
}

impl Display for ContextKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Heading => write!(f, "heading"),
			Self::Documentation => write!(f, "documentation"),
			Self::Detail => write!(f, "detail"),
			Self::DetailTable => write!(f, "detailTable"),
		}
	}
}
