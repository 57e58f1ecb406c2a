//! Station directory, filtering and browser state for radiogrid.
//!
//! Everything here is terminal-agnostic; the TUI crate owns rendering,
//! input and playback.

pub mod config;
pub mod directory;
pub mod error;
pub mod favorites;
pub mod filter;
pub mod platform;
pub mod state;
pub mod station;
