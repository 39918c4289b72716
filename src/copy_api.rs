//! "Press `c` to copy".
//!
//! Decides *what* to copy from the active tab and delegates the clipboard
//! write to `platform::copy_to_clipboard`.
//!
//! - Data tabs copy the selected card as plain text (title, subtitle, blurb,
//!   labelled fields, tags), one item per line.
//! - The favorites tab copies `name (type)` of the selected favorite.
//!
//! No trailing newline (clipboard-friendly).

use crate::platform;
use crate::App;

/// Returns the string that would be copied for the current tab, if any.
///
/// Useful for testing or preview without touching the clipboard.
pub fn current_text(app: &App) -> Option<String> {
    app.copy_text()
        .map(|s| s.trim_end_matches('\n').to_string())
        .filter(|s| !s.is_empty())
}

/// Copies the current selection to the clipboard.
///
/// Returns `false` if there is nothing to copy or the clipboard is unavailable.
pub fn copy_current(app: &App) -> bool {
    match current_text(app) {
        Some(s) => platform::copy_to_clipboard(&s),
        None => false,
    }
}
