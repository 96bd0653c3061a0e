//! Undo/redo history.
//!
//! The command layer mutates a [`Buffer`](crate::text::Buffer) and then
//! records what it did with [`UndoManager::add_action`]. Undo and redo replay
//! recorded [`Action`]s against the same buffer.
//!
//! ```
//! use strata::history::{Action, UndoManager};
//! use strata::text::Buffer;
//!
//! let mut buf = Buffer::new();
//! let mut undo = UndoManager::new();
//!
//! buf.insert_char(0, 0, 'a');
//! undo.add_action(Action::Insert { line: 0, col: 0, ch: 'a' });
//!
//! assert!(undo.undo(&mut buf));
//! assert_eq!(buf.text(), "");
//! assert!(undo.redo(&mut buf));
//! assert_eq!(buf.text(), "a");
//! ```

mod action;
mod tree;

pub use action::Action;
pub use tree::{GroupReplay, NodeId, RedoOutcome, ReplayStep, UndoManager};
