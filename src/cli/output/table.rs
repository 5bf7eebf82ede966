//! Table output formatting for CLI commands
//!
//! Index statistics, provider status and probe results rendered with
//! comfy-table. Colors are dropped when `NO_COLOR` is set or the terminal is
//! dumb.

use comfy_table::{presets, Attribute, Cell, Color, ContentArrangement, Table};
use std::env;

use crate::domain::models::{IndexStats, ProviderStatus, SearchResult};

/// Table formatter for CLI output
pub struct TableFormatter {
    use_colors: bool,
}

impl TableFormatter {
    /// Formatter that colors output when the terminal supports it
    pub fn new() -> Self {
        Self {
            use_colors: supports_color(),
        }
    }

    /// Formatter with colors forced on or off
    pub const fn with_colors(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// Totals followed by one row per indexed file
    pub fn format_index_stats(&self, stats: &IndexStats) -> String {
        let mut table = Self::create_base_table();
        table.set_header(vec![header("Metric"), header("Value")]);
        table.add_row(vec![
            Cell::new("Total chunks"),
            Cell::new(stats.total_chunks),
        ]);
        table.add_row(vec![Cell::new("Total files"), Cell::new(stats.total_files)]);
        for file in &stats.files {
            table.add_row(vec![Cell::new("File"), Cell::new(file)]);
        }
        table.to_string()
    }

    /// One row per known provider, plus the active one
    pub fn format_provider_status(&self, status: &ProviderStatus) -> String {
        let mut table = Self::create_base_table();
        table.set_header(vec![
            header("Provider"),
            header("Credential"),
            header("Available"),
            header("Role"),
        ]);

        let mut chain_position = 0;
        for provider in &status.providers {
            let role = if provider.available {
                chain_position += 1;
                if chain_position == 1 {
                    "active"
                } else {
                    "fallback"
                }
            } else {
                "-"
            };

            table.add_row(vec![
                Cell::new(&provider.name),
                self.flag_cell(provider.credential_set, "set", "missing"),
                self.flag_cell(provider.available, "yes", "no"),
                Cell::new(role),
            ]);
        }
        table.to_string()
    }

    /// Rank, source, chunk position and distance for search hits
    pub fn format_search_results(&self, results: &[SearchResult]) -> String {
        let mut table = Self::create_base_table();
        table.set_header(vec![
            header("#"),
            header("File"),
            header("Chunk"),
            header("Distance"),
            header("Preview"),
        ]);

        for (rank, result) in results.iter().enumerate() {
            let chunk = result
                .metadata
                .position()
                .map_or_else(|| "-".to_string(), |(i, n)| format!("{}/{n}", i + 1));
            table.add_row(vec![
                Cell::new(rank + 1),
                Cell::new(result.filename().unwrap_or("Unknown")),
                Cell::new(chunk),
                Cell::new(format!("{:.4}", result.distance)),
                Cell::new(truncate_text(&result.text, 60)),
            ]);
        }
        table.to_string()
    }

    fn flag_cell(&self, flag: bool, yes: &str, no: &str) -> Cell {
        let text = if flag { yes } else { no };
        if self.use_colors {
            Cell::new(text).fg(if flag { Color::Green } else { Color::Red })
        } else {
            Cell::new(text)
        }
    }

    fn create_base_table() -> Table {
        let mut table = Table::new();
        table
            .load_preset(presets::UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);
        table
    }
}

impl Default for TableFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn header(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Bold)
}

/// Check if color output is supported
fn supports_color() -> bool {
    if env::var("NO_COLOR").is_ok() {
        return false;
    }
    !matches!(env::var("TERM").as_deref(), Ok("dumb"))
}

/// Truncate text to `max_chars`, appending "..." when cut
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars.saturating_sub(3)) {
        Some((cut, _)) if text.chars().count() > max_chars => format!("{}...", &text[..cut]),
        _ => text.to_string(),
    }
}
