//! The external conversion pipeline boundary.
//!
//! Two operations: fetch the source SVG for a URL, and turn it into a
//! zip archive holding the 3D model. The archive step is delegated to
//! an external converter command; this crate never inspects the zip.

mod convert;
mod fetch;

pub use convert::CodePipeline;

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Fetched source image for one artifact, handed to `generate_archive`.
#[derive(Debug, Clone)]
pub struct Representation {
    /// Raw SVG bytes as served by the code endpoint.
    pub svg: Vec<u8>,
}

/// Failure inside the fetch/generate pipeline. Mapped to a 500 response.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: curl::Error,
    },
    #[error("fetch {url} returned HTTP {code}")]
    FetchStatus { url: String, code: u32 },
    #[error("converter not found: {0}")]
    ConverterMissing(String),
    #[error("converter exited with {status}")]
    ConverterFailed { status: std::process::ExitStatus },
    #[error("converter produced no archive at {}", path.display())]
    MissingOutput { path: PathBuf },
    #[error("pipeline io: {0}")]
    Io(#[from] io::Error),
}

/// Fetch-and-convert operations behind the endpoint.
///
/// The server owns one implementation for its whole lifetime; tests
/// substitute their own.
pub trait Pipeline: Send + Sync {
    /// Obtains the source representation for `url`.
    fn fetch_representation(&self, url: &str) -> Result<Representation, PipelineError>;

    /// Writes a zip archive with the generated model to `output_path`.
    fn generate_archive(
        &self,
        representation: &Representation,
        output_path: &Path,
    ) -> Result<(), PipelineError>;
}
