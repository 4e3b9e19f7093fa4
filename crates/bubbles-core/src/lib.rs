//! Core logic for prompt-bubbles: catalog loading, filtering, placeholder
//! resolution, state persistence, and the view model shared by the TUI and CLI.

pub mod browser;
pub mod catalog;
pub mod clipboard;
pub mod config;
pub mod debounce;
pub mod filter;
pub mod keymap;
pub mod link;
pub mod placeholder;
pub mod state;
pub mod view;
