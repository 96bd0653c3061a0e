//! Utility modules

pub mod text;

// Re-export text utilities at the util level
pub use text::{
    ceil_char_boundary, end_position, floor_char_boundary, is_word_boundary, is_word_char,
    next_char_boundary, prev_char_boundary, split_lines, LineEnding,
};
