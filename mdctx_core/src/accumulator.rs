use crate::normalize::normalize_list;
use crate::normalize::normalize_paragraph;

/// Buffers the prose and list blocks seen since the last heading until they
/// are flushed as one documentation text.
#[derive(Debug, Default)]
pub struct BlockAccumulator {
	blocks: Vec<String>,
}

impl BlockAccumulator {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn push_paragraph<S: AsRef<str>>(&mut self, lines: &[S]) {
		self.push_block(normalize_paragraph(lines));
	}

	pub fn push_list<S: AsRef<str>>(&mut self, lines: &[S]) {
		self.push_block(normalize_list(lines));
	}

	fn push_block(&mut self, block: String) {
		if !block.is_empty() {
			self.blocks.push(block);
		}
	}

	pub fn is_empty(&self) -> bool {
		self.blocks.is_empty()
	}

	/// Join every buffered block with newlines and clear the buffer. Returns
	/// `None` when nothing was buffered.
	pub fn take(&mut self) -> Option<String> {
		if self.blocks.is_empty() {
			return None;
		}

		let text = self.blocks.join("\n");
		self.blocks.clear();
		Some(text)
	}
}
