//! IdleMon - Terminal Shiny-Hunting Idle Game Library
//!
//! This module exposes the engine logic for testing and external use.

// Allow dead code in library - some functions are only used by the binary
#![allow(dead_code)]

pub mod animation;
pub mod clock;
pub mod config;
pub mod constants;
pub mod engine;
pub mod history;
pub mod shiny;
pub mod species;
pub mod sprites;
pub mod tally;

// UI module is not exposed as it's tightly coupled to the terminal
mod ui;
