use crate::NodeId;

/// An open heading on the [`ContextStack`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackEntry {
	pub id: NodeId,
	pub level: usize,
}

/// The chain of currently open headings, ordered by strictly increasing level
/// from bottom to top.
#[derive(Debug, Default)]
pub struct ContextStack {
	entries: Vec<StackEntry>,
}

impl ContextStack {
	pub fn new() -> Self {
		Self::default()
	}

	/// Open a new heading and return the parent it attaches to.
	///
	/// Every entry at the same or a deeper level is closed first. The new
	/// heading then attaches to the remaining top entry, or becomes a root
	/// when nothing remains.
	pub fn push(&mut self, entry: StackEntry) -> Option<NodeId> {
		while self.entries.last().is_some_and(|top| top.level >= entry.level) {
			self.entries.pop();
		}

		let parent = match self.entries.last() {
			None => None,
			Some(top) if top.level < entry.level => Some(top.id),
			Some(top) => {
				debug_assert!(
					top.level < entry.level,
					"stack top at level {} was not closed by a heading at level {}",
					top.level,
					entry.level
				);
				None
			}
		};

		self.entries.push(entry);
		debug_assert!(self.is_strictly_increasing());

		parent
	}

	pub fn top(&self) -> Option<&StackEntry> {
		self.entries.last()
	}

	/// Levels of the open headings from bottom to top.
	pub fn levels(&self) -> Vec<usize> {
		self.entries.iter().map(|entry| entry.level).collect()
	}

	pub fn depth(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn clear(&mut self) {
		self.entries.clear();
	}

	fn is_strictly_increasing(&self) -> bool {
		self.entries
			.windows(2)
			.all(|pair| pair[0].level < pair[1].level)
	}
}
