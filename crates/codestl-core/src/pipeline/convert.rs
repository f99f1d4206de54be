//! Default pipeline: curl fetch + external converter command.

use super::{fetch, Pipeline, PipelineError, Representation};
use crate::config::{FetchConfig, ServerConfig};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Production pipeline: fetches the SVG over HTTP and shells out to the
/// configured converter (`<converter> <svg-path> <zip-path>`) for the
/// STL/zip generation.
#[derive(Debug)]
pub struct CodePipeline {
    converter: PathBuf,
    timeouts: FetchConfig,
}

impl CodePipeline {
    /// Resolves the configured converter on PATH and builds the pipeline.
    pub fn from_config(config: &ServerConfig) -> Result<Self, PipelineError> {
        let converter = which::which(&config.converter)
            .map_err(|_| PipelineError::ConverterMissing(config.converter.clone()))?;
        Ok(Self {
            converter,
            timeouts: config.fetch(),
        })
    }
}

impl Pipeline for CodePipeline {
    fn fetch_representation(&self, url: &str) -> Result<Representation, PipelineError> {
        let svg = fetch::fetch_body(url, &self.timeouts)?;
        tracing::debug!("fetched {} bytes from {}", svg.len(), url);
        Ok(Representation { svg })
    }

    fn generate_archive(
        &self,
        representation: &Representation,
        output_path: &Path,
    ) -> Result<(), PipelineError> {
        // The converter reads from a file, so spool the SVG next to the output.
        let dir = output_path.parent().unwrap_or_else(|| Path::new("."));
        let mut svg_file = tempfile::Builder::new()
            .prefix("codestl-")
            .suffix(".svg")
            .tempfile_in(dir)?;
        svg_file.write_all(&representation.svg)?;
        svg_file.flush()?;

        let status = Command::new(&self.converter)
            .arg(svg_file.path())
            .arg(output_path)
            .status()?;
        if !status.success() {
            return Err(PipelineError::ConverterFailed { status });
        }
        if !output_path.exists() {
            return Err(PipelineError::MissingOutput {
                path: output_path.to_path_buf(),
            });
        }
        tracing::debug!(
            "converter wrote {} for {}",
            output_path.display(),
            svg_file.path().display()
        );
        Ok(())
    }
}
