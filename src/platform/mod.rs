//! Platform abstraction (clipboard).

#[cfg(feature = "native")]
mod native;
#[cfg(feature = "native")]
pub use native::copy_to_clipboard;

/// Builds without the native stack have no clipboard.
#[cfg(not(feature = "native"))]
pub fn copy_to_clipboard(_content: &str) -> bool {
    false
}
