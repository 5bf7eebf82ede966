//! CLI output formatting
//!
//! Every command result implements [`CommandOutput`] so it can be printed
//! for humans or as JSON with the global `--json` flag.

pub mod progress;
pub mod table;

pub use table::TableFormatter;

use serde::Serialize;

/// A command result that renders for humans or as JSON
pub trait CommandOutput: Serialize {
    /// Plain-text rendering for the terminal
    fn to_human(&self) -> String;

    /// JSON rendering for `--json`
    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// Print `result` to stdout in the selected mode.
pub fn output<T: CommandOutput>(result: &T, json_mode: bool) {
    if json_mode {
        println!("{}", serde_json::to_string_pretty(&result.to_json()).unwrap_or_default());
    } else {
        println!("{}", result.to_human());
    }
}
