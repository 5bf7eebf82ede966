//! Corpus loader
//!
//! Populates a [`VectorIndex`] from the plain-text files directly inside a
//! folder. Files are processed one at a time and chunks are embedded
//! sequentially so remote rate limits are respected.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::domain::errors::{RagError, RagResult};
use crate::domain::models::{Chunk, Document, DocumentMetadata, LoadReport};
use crate::domain::ports::ChunkingService;
use crate::infrastructure::vector::VectorIndex;
use crate::services::provider_gateway::ProviderGateway;

/// Loads document folders into a vector index.
pub struct CorpusLoader {
    gateway: Arc<ProviderGateway>,
    chunker: Arc<dyn ChunkingService>,
    extensions: Vec<String>,
}

impl CorpusLoader {
    /// `extensions` are matched case-insensitively, with or without a
    /// leading dot.
    pub fn new(
        gateway: Arc<ProviderGateway>,
        chunker: Arc<dyn ChunkingService>,
        extensions: &[String],
    ) -> Self {
        let extensions = extensions
            .iter()
            .map(|ext| ext.trim().trim_start_matches('.').to_lowercase())
            .filter(|ext| !ext.is_empty())
            .collect();

        Self {
            gateway,
            chunker,
            extensions,
        }
    }

    /// Matching files directly inside `folder`, sorted by name.
    ///
    /// Entries that cannot be inspected are logged and left out; a failing
    /// listing keeps the files found so far.
    pub async fn discover(&self, folder: &Path) -> RagResult<Vec<PathBuf>> {
        let is_dir = tokio::fs::metadata(folder)
            .await
            .map(|meta| meta.is_dir())
            .unwrap_or(false);
        if !is_dir {
            return Err(RagError::CorpusNotFound(folder.to_path_buf()));
        }

        let mut entries = tokio::fs::read_dir(folder)
            .await
            .map_err(|source| RagError::Io {
                path: folder.to_path_buf(),
                source,
            })?;

        let mut files = Vec::new();
        loop {
            let entry = match entries.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(e) => {
                    tracing::warn!(folder = %folder.display(), error = %e, "directory listing interrupted");
                    break;
                }
            };

            let path = entry.path();
            if !self.is_document(&path) {
                continue;
            }
            // Follows symlinks, unlike `DirEntry::file_type`
            match tokio::fs::metadata(&path).await {
                Ok(meta) if meta.is_file() => files.push(path),
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "skipping entry that cannot be inspected");
                }
            }
        }

        files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        Ok(files)
    }

    fn is_document(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.contains(&ext.to_lowercase()))
    }

    /// Chunk, embed and index every document in `folder`.
    ///
    /// A file that cannot be read or embedded is skipped and reported; the
    /// index never holds part of a file. An embedding whose length differs
    /// from the index dimension aborts the whole load.
    pub async fn load_from_folder(
        &self,
        folder: &Path,
        index: &mut VectorIndex,
    ) -> RagResult<LoadReport> {
        let files = self.discover(folder).await?;
        tracing::info!(folder = %folder.display(), files = files.len(), "loading corpus");

        let mut report = LoadReport::default();

        for path in files {
            let filename = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();

            let text = match tokio::fs::read_to_string(&path).await {
                Ok(text) => text,
                Err(e) => {
                    tracing::warn!(file = %filename, error = %e, "skipping unreadable file");
                    report.record_skip(filename, format!("read failed: {e}"));
                    continue;
                }
            };

            let document = Document::new(
                text,
                DocumentMetadata::for_file(&filename, path.display().to_string()),
            );
            let chunks = self.chunker.chunk(&document.text, Some(&document.metadata));
            if chunks.is_empty() {
                tracing::warn!(file = %filename, "skipping file with no text");
                report.record_skip(filename, "no text content");
                continue;
            }

            let entries = match self.embed_chunks(chunks).await {
                Ok(entries) => entries,
                Err(e) => {
                    tracing::warn!(file = %filename, error = %e, "skipping file after embedding failure");
                    report.record_skip(filename, e.to_string());
                    continue;
                }
            };

            let added = index.add_all(entries)?;
            tracing::info!(file = %filename, chunks = added, "indexed file");
            report.files_indexed += 1;
            report.chunks_added += added;
        }

        tracing::info!(
            files_indexed = report.files_indexed,
            files_skipped = report.skipped.len(),
            chunks = report.chunks_added,
            "corpus loaded"
        );
        Ok(report)
    }

    async fn embed_chunks(&self, chunks: Vec<Chunk>) -> RagResult<Vec<(Vec<f32>, Chunk)>> {
        let mut entries = Vec::with_capacity(chunks.len());
        for chunk in chunks {
            tracing::trace!(preview = %chunk.preview(), "embedding chunk");
            let vector = self.gateway.embed_text(&chunk.text).await?;
            entries.push((vector, chunk));
        }
        Ok(entries)
    }
}
