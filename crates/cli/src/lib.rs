//! Terminal output helpers for trackmap tools
//!
//! - Status messages
//! - Formatting for durations, timestamps, coordinates and distances

#![warn(missing_docs)]

pub mod output;
