#![forbid(unsafe_code)]

//! LogSmith terminal demo.
//!
//! Generates a mock log, hands it to a [`logsmith::RenderEngine`] over a
//! crossterm-backed [`terminal::TerminalSurface`], and lets the user scroll
//! and filter it.

pub mod app;
pub mod cli;
pub mod keymap;
pub mod logging;
pub mod mock;
pub mod terminal;
