//! Document Store — the directory of grant program PDFs.
//!
//! The store is read-only at runtime and enumerated fresh on every catalog
//! build; nothing is cached between requests, so adding or removing a PDF
//! takes effect on the next match. Content crosses the boundary as a
//! base64 payload ready for the extraction service.

use std::fs;
use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use thiserror::Error;
use tracing::debug;

/// MIME type declared for every payload this store produces.
pub const PDF_MEDIA_TYPE: &str = "application/pdf";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to read grant directory {dir}: {source}")]
    ListDir {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read grant document {name}: {source}")]
    ReadDocument {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

/// A PDF discovered in the store, before its content is loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    pub name: String,
    pub path: PathBuf,
}

/// A fully loaded document in the form the extraction service consumes:
/// base64 content plus its MIME type.
#[derive(Debug, Clone)]
pub struct DocumentPayload {
    pub file_name: String,
    pub media_type: String,
    pub data: String,
}

#[derive(Debug, Clone)]
pub struct DocumentStore {
    dir: PathBuf,
}

impl DocumentStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Enumerates the store, keeping only regular files with a `.pdf`
    /// extension (case-insensitive). Order is whatever the filesystem
    /// returns; no sorting is applied.
    pub fn documents(&self) -> Result<Vec<StoredDocument>, StoreError> {
        let entries = fs::read_dir(&self.dir).map_err(|source| StoreError::ListDir {
            dir: self.dir.clone(),
            source,
        })?;

        let mut documents = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| StoreError::ListDir {
                dir: self.dir.clone(),
                source,
            })?;
            let path = entry.path();
            if !path.is_file() || !is_pdf(&path) {
                continue;
            }
            // Names must survive the trip into log lines and skip reports,
            // so non-UTF-8 file names are ignored.
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            documents.push(StoredDocument {
                name: name.to_string(),
                path,
            });
        }

        debug!(
            "Document store {} holds {} PDF document(s)",
            self.dir.display(),
            documents.len()
        );
        Ok(documents)
    }

    /// Loads one document fully into memory and encodes it for the
    /// extraction service boundary.
    pub fn read(&self, document: &StoredDocument) -> Result<DocumentPayload, StoreError> {
        let bytes = fs::read(&document.path).map_err(|source| StoreError::ReadDocument {
            name: document.name.clone(),
            source,
        })?;
        Ok(encode_payload(&document.name, &bytes))
    }
}

/// Builds the base64 payload for a PDF byte buffer. Shared by the store
/// and the upload-analyze handler.
pub fn encode_payload(file_name: &str, bytes: &[u8]) -> DocumentPayload {
    DocumentPayload {
        file_name: file_name.to_string(),
        media_type: PDF_MEDIA_TYPE.to_string(),
        data: STANDARD.encode(bytes),
    }
}

fn is_pdf(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}
