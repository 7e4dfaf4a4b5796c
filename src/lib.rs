//! Navigation core for a keyboard-focused terminal file browser.
//!
//! waypoint is the data/control half of a TUI file browser: the directory
//! cache, the listing pipeline, the navigation state machine and the virtual
//! scroll window. Rendering, key decoding and process bootstrap live in the
//! consuming application; this crate hands them a read-only snapshot and
//! accepts a closed set of input intents in return.

pub mod app;
pub mod config;
pub mod core;
