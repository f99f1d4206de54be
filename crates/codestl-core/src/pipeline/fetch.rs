//! HTTP GET of the source SVG via the curl crate (libcurl).

use super::PipelineError;
use crate::config::FetchConfig;
use std::time::Duration;

/// Downloads the body at `url` into memory.
///
/// Follows redirects; any non-2xx final status is an error. Runs in the
/// current thread.
pub fn fetch_body(url: &str, timeouts: &FetchConfig) -> Result<Vec<u8>, PipelineError> {
    let mut body: Vec<u8> = Vec::new();

    let mut easy = curl::easy::Easy::new();
    easy.url(url).map_err(|source| PipelineError::Fetch {
        url: url.to_string(),
        source,
    })?;
    easy.follow_location(true).map_err(curl_err(url))?;
    easy.connect_timeout(Duration::from_secs(timeouts.connect_timeout_secs))
        .map_err(curl_err(url))?;
    easy.timeout(Duration::from_secs(timeouts.timeout_secs))
        .map_err(curl_err(url))?;

    {
        let mut transfer = easy.transfer();
        transfer
            .write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })
            .map_err(curl_err(url))?;
        transfer.perform().map_err(curl_err(url))?;
    }

    let code = easy.response_code().map_err(curl_err(url))?;
    if !(200..300).contains(&code) {
        return Err(PipelineError::FetchStatus {
            url: url.to_string(),
            code,
        });
    }

    Ok(body)
}

fn curl_err(url: &str) -> impl FnOnce(curl::Error) -> PipelineError + '_ {
    move |source| PipelineError::Fetch {
        url: url.to_string(),
        source,
    }
}
