//! Strata - editing core for a scriptable text editor
//!
//! This crate provides the data structures and algorithms behind document
//! editing: piece-table storage, a branching undo tree, multi-cursor batch
//! edits, search/replace, and line diff/merge.

pub mod cli;
pub mod config;
pub mod config_paths;
pub mod diff;
pub mod history;
pub mod multi_cursor;
pub mod search;
pub mod text;
pub mod tracing;
pub mod util;

// Re-export commonly used types
pub use config::StrataConfig;
pub use diff::{DiffHunk, DiffType, MergeResult};
pub use history::{Action, UndoManager};
pub use multi_cursor::{CursorEntry, MultiCursor};
pub use search::{SearchEngine, SearchMatch, SearchOptions};
pub use text::{Buffer, Cursor, PieceTable, Position, Selection};
