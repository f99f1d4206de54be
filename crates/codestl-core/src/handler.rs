//! Request orchestration for the `/spotify-stl` endpoint.
//!
//! Validate the url, derive the artifact id, produce (or reuse) the zip
//! at its temp path, buffer it, delete it, hand the bytes back. The
//! HTTP encoding of the outcome lives in the server crate.

use crate::artifact;
use crate::config::ServerConfig;
use crate::pipeline::{Pipeline, PipelineError};
use std::fmt;
use std::fs;
use std::io;
use std::path::PathBuf;

/// Fixed 400 body text when the url parameter is absent or empty.
pub const MISSING_URL: &str = "Missing parameter 'url'";

/// A fully buffered zip artifact ready to send to the client.
#[derive(Debug)]
pub struct Artifact {
    /// Attachment filename stem (`<id>.zip` goes to the client).
    pub id: String,
    /// Raw zip bytes.
    pub bytes: Vec<u8>,
}

/// Handler failure, split by who caused it so the server can pick the
/// status code without string matching.
#[derive(Debug)]
pub enum HandlerError {
    /// Missing/empty url, or a url with no usable trailing segment. 400.
    BadInput(String),
    /// The fetch/convert pipeline failed. 500.
    Upstream(PipelineError),
    /// Reading back the generated archive failed. 500.
    Filesystem { path: PathBuf, source: io::Error },
}

impl fmt::Display for HandlerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // The message is the response body's `error` field, so no prefix.
            HandlerError::BadInput(msg) => write!(f, "{}", msg),
            HandlerError::Upstream(e) => write!(f, "{}", e),
            HandlerError::Filesystem { path, source } => {
                write!(f, "{}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for HandlerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HandlerError::BadInput(_) => None,
            HandlerError::Upstream(e) => Some(e),
            HandlerError::Filesystem { source, .. } => Some(source),
        }
    }
}

impl HandlerError {
    /// HTTP status code this error maps to.
    pub fn status(&self) -> u16 {
        match self {
            HandlerError::BadInput(_) => 400,
            HandlerError::Upstream(_) | HandlerError::Filesystem { .. } => 500,
        }
    }
}

/// Runs one request through the pipeline and returns the buffered zip.
///
/// A file already present at the artifact's zip path (leftover from a
/// request that died between generate and cleanup) is served as-is
/// without invoking the pipeline; content is not verified. On success
/// the on-disk zip is removed, so the reuse window only spans failures.
pub fn handle(
    url: Option<&str>,
    config: &ServerConfig,
    pipeline: &dyn Pipeline,
) -> Result<Artifact, HandlerError> {
    let url = match url {
        Some(u) if !u.is_empty() => u,
        _ => return Err(HandlerError::BadInput(MISSING_URL.to_string())),
    };

    let id = artifact::derive_artifact_id(url).ok_or_else(|| {
        HandlerError::BadInput(format!("url has no usable trailing path segment: {url}"))
    })?;

    let zip = artifact::zip_path(&config.temp_dir(), &id);
    if zip.exists() {
        tracing::debug!("reusing leftover artifact at {}", zip.display());
    } else {
        let representation = pipeline
            .fetch_representation(url)
            .map_err(HandlerError::Upstream)?;
        pipeline
            .generate_archive(&representation, &zip)
            .map_err(HandlerError::Upstream)?;
    }

    let bytes = fs::read(&zip).map_err(|source| HandlerError::Filesystem {
        path: zip.clone(),
        source,
    })?;

    // Bytes are buffered; a cleanup failure should not fail the response.
    if let Err(e) = fs::remove_file(&zip) {
        tracing::warn!("failed to remove {}: {}", zip.display(), e);
    }

    tracing::info!("artifact {} ready ({} bytes)", id, bytes.len());
    Ok(Artifact { id, bytes })
}
