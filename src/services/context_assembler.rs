//! Renders retrieved chunks into a single prompt context.

use crate::domain::models::SearchResult;

/// Separator between rendered chunks
pub const BLOCK_SEPARATOR: &str = "\n\n---\n\n";

const UNKNOWN_SOURCE: &str = "Unknown";

/// Formats search results as labeled, clearly separated blocks.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContextAssembler;

impl ContextAssembler {
    /// Stateless; all settings are fixed
    pub const fn new() -> Self {
        Self
    }

    /// Render results in rank order. No results render as an empty string.
    pub fn render(&self, results: &[SearchResult]) -> String {
        results
            .iter()
            .map(render_block)
            .collect::<Vec<_>>()
            .join(BLOCK_SEPARATOR)
    }
}

fn render_block(result: &SearchResult) -> String {
    let source = result.filename().unwrap_or(UNKNOWN_SOURCE);
    match result.metadata.position() {
        Some((index, total)) => format!(
            "(from {source}, part {}/{total}):\n{}",
            index + 1,
            result.text
        ),
        None => format!("(from {source}):\n{}", result.text),
    }
}
