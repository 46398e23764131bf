//! Error types shared across the report renderer.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[cfg(feature = "bookmarks")]
use crate::bookmarks::BookmarkError;

/// Errors that abort report generation.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The page geometry cannot hold any content.
    #[error("invalid page geometry: {0}")]
    InvalidGeometry(String),

    /// The payload could not be normalised into a report.
    #[error("invalid report payload: {0}")]
    Payload(#[from] PayloadError),

    /// The PDF backend rejected an operation.
    #[error("PDF generation failed: {0}")]
    Pdf(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The rendered document could not be post-processed with an outline.
    #[cfg(feature = "bookmarks")]
    #[error("failed to add bookmarks: {0}")]
    Bookmarks(#[from] BookmarkError),
}

impl From<printpdf::Error> for ReportError {
    fn from(err: printpdf::Error) -> Self {
        ReportError::Pdf(err.to_string())
    }
}

/// Errors raised while normalising a raw payload.
#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("report payload must be a JSON object, found {0}")]
    NotAnObject(&'static str),

    /// The document could not be read or is not valid JSON. Sections with an
    /// unexpected shape are skipped during normalisation and never end up here.
    #[error("report payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised while loading an optional asset.
///
/// The renderer never surfaces these to the caller; they are logged and the
/// asset is replaced by its fallback.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("asset not found at {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to decode image {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("invalid font file {}: {reason}", path.display())]
    InvalidFont { path: PathBuf, reason: String },
}
