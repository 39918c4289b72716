//! Swapix - Star Wars catalog explorer
//!
//! A terminal UI over the public SWAPI GraphQL API. Each tab declares the
//! data it needs as a GraphQL fragment; queries compose those fragments,
//! responses are normalized into a record store, and views read their
//! fragment data back out of it.
//!
//! ## Layout
//!
//! - [`graphql`]: documents, transport, normalized store, request environment
//! - [`catalog`]: film/character/planet/starship fragments, cards, favorites
//! - [`app`] + [`ui`]: state machine and ratatui rendering
//!
//! The terminal binary needs the `native` feature:
//! ```bash
//! cargo run --features native --bin swapix
//! ```

pub mod config;
pub mod theme;
pub mod types;

pub mod catalog;
pub mod graphql;

pub mod app;
pub mod ui;

// Clipboard
pub mod copy_api;
pub mod platform;

pub use app::{App, InputMode};
pub use config::Config;
pub use types::{AppEvent, Tab};
