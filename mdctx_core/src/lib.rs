//! `mdctx_core` turns heading-structured markdown into a tree of contexts:
//! one context per heading, each holding documentation text and table rows.
//!
//! ## Processing Pipeline
//!
//! ```text
//! Markdown file
//!   → Reader (markdown → ordered structural ParseEvents)
//!   → ContextBuilder (events → HeadingContext / Documentation / Detail / DetailTable)
//!       ├─ BlockAccumulator (buffers prose and lists until the next heading)
//!       └─ ContextStack (open headings, resolves each heading's parent)
//!   → ContextSink (receives each node in emission order, e.g. ContextTree)
//! ```
//!
//! ## Key Types
//!
//! - [`ParseEvent`]: A structural event from the tokenizer.
//! - [`ContextBuilder`]: Consumes events and emits [`Context`] nodes.
//! - [`Context`]: A heading, documentation block, table row or whole table.
//! - [`ContextTree`]: A sink that owns every emitted node and navigates
//!   parent links.
//! - [`ContextDiagnostic`]: A recoverable problem such as a missing table
//!   cell.
//! - [`MdctxConfig`]: Configuration loaded from `mdctx.toml`.
//!
//! ## Quick Start
//!
//! ```rust
//! use mdctx_core::build_contexts;
//!
//! let input = "# Root\ntext one\n\n## Child\n| A | B |\n|---|---|\n| 1 | 2 |\n";
//! let (tree, diagnostics) = build_contexts(input).unwrap();
//!
//! assert_eq!(tree.len(), 5);
//! assert!(diagnostics.is_empty());
//! ```

pub use accumulator::*;
pub use builder::*;
pub use config::*;
pub use context::*;
pub use diagnostics::*;
pub use error::*;
pub use events::*;
pub use normalize::HeadingLine;
pub use normalize::parse_heading_line;
pub use normalize::trim_cell;
pub use reader::*;
pub use sink::*;
pub use stack::*;
pub use tree::*;

mod accumulator;
mod builder;
pub mod config;
mod context;
mod diagnostics;
#[allow(unused_assignments)]
mod error;
mod events;
pub(crate) mod normalize;
mod reader;
mod sink;
mod stack;
mod tree;

#[cfg(test)]
mod __fixtures;
