//! Document text storage and editing primitives.
//!
//! # Architecture
//!
//! - [`PieceTable`]: line storage over an immutable original store and an
//!   append-only add store, with copy-on-write line access
//! - [`Buffer`]: character, text and range edits on top of the piece table
//! - [`Cursor`] / [`Position`]: a single clamped cursor
//! - [`Selection`]: anchor/head selections (char, line and block)
//!
//! # Example
//!
//! ```
//! use strata::text::Buffer;
//!
//! let mut buf = Buffer::from_text("hello world");
//! buf.insert_text(0, 5, ",\nbig");
//! assert_eq!(buf.all_lines(), vec!["hello,", "big world"]);
//! ```

mod buffer;
mod cursor;
mod piece_table;
mod selection;

pub use buffer::{Buffer, TextSpan};
pub use cursor::{Cursor, Position};
pub use piece_table::{Piece, PieceTable, Source};
pub use selection::{Selection, SelectionKind};
