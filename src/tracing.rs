//! Tracing setup and cursor-state diagnostics
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=strata::history=debug` - undo/redo transitions only
//! - `RUST_LOG=strata::multi_cursor=trace` - per-edit cursor movement

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::multi_cursor::MultiCursor;

/// Initialize a console subscriber filtered by RUST_LOG (default `warn`).
///
/// Logs go to stderr so command output on stdout stays clean.
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    // A subscriber may already be set (tests, embedding hosts)
    let _ = tracing_subscriber::registry().with(console_layer).try_init();
}

/// Lightweight snapshot of multi-cursor state for diffing
#[derive(Debug, Clone)]
pub struct CursorSnapshot {
    pub cursor_count: usize,
    pub cursors: Vec<CursorInfo>,
}

#[derive(Debug, Clone)]
pub struct CursorInfo {
    pub line: usize,
    pub column: usize,
    pub anchor: (usize, usize),
    pub has_selection: bool,
}

impl CursorSnapshot {
    pub fn from_multi_cursor(cursors: &MultiCursor) -> Self {
        Self {
            cursor_count: cursors.count(),
            cursors: cursors
                .cursors()
                .iter()
                .map(|c| CursorInfo {
                    line: c.line,
                    column: c.column,
                    anchor: (c.anchor.line, c.anchor.column),
                    has_selection: c.has_selection,
                })
                .collect(),
        }
    }

    /// Describe what changed between two snapshots
    pub fn diff(&self, other: &CursorSnapshot) -> Option<String> {
        if self.cursor_count != other.cursor_count {
            return Some(format!(
                "cursor count: {} → {}",
                self.cursor_count, other.cursor_count
            ));
        }

        let mut changes = Vec::new();
        for (i, (before, after)) in self.cursors.iter().zip(&other.cursors).enumerate() {
            if before.line != after.line || before.column != after.column {
                changes.push(format!(
                    "#{}: ({},{}) → ({},{})",
                    i, before.line, before.column, after.line, after.column
                ));
            }
            if before.has_selection != after.has_selection {
                let status = if after.has_selection {
                    "active"
                } else {
                    "cleared"
                };
                changes.push(format!("#{}: selection {}", i, status));
            }
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}
