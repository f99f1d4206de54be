//! HTTP response builders: JSON errors and the zip attachment.

use anyhow::Result;
use codestl_core::handler::Artifact;
use serde_json::json;
use tiny_http::{Header, Request, Response};

pub fn respond_error(request: Request, status: u16, message: &str) -> Result<()> {
    let body = json!({ "error": message }).to_string();
    let response = Response::from_string(body)
        .with_status_code(status)
        .with_header(content_type("application/json"));
    request.respond(response)?;
    Ok(())
}

pub fn respond_zip(request: Request, artifact: &Artifact) -> Result<()> {
    // The artifact id is sanitized, so it cannot break out of the quotes.
    let disposition = format!("attachment; filename=\"{}.zip\"", artifact.id);
    let response = Response::from_data(artifact.bytes.clone())
        .with_header(content_type("application/zip"))
        .with_header(
            Header::from_bytes("Content-Disposition", disposition.as_bytes())
                .expect("static header name"),
        );
    request.respond(response)?;
    Ok(())
}

fn content_type(value: &str) -> Header {
    Header::from_bytes("Content-Type", value).expect("static header name")
}
