//! Request routing and JSON body decoding.

use super::{response, ServerContext};
use anyhow::Result;
use codestl_core::handler;
use serde::Deserialize;
use tiny_http::{Method, Request};

/// JSON body of `POST /spotify-stl`.
#[derive(Debug, Deserialize)]
struct StlRequest {
    url: Option<String>,
}

pub fn handle_request(request: Request, ctx: &ServerContext) -> Result<()> {
    let path = request.url().split('?').next().unwrap_or("").to_string();
    if path != "/spotify-stl" {
        return response::respond_error(request, 404, "not found");
    }
    if *request.method() != Method::Post {
        return response::respond_error(request, 405, "method not allowed");
    }
    respond_stl(request, ctx)
}

fn respond_stl(mut request: Request, ctx: &ServerContext) -> Result<()> {
    let mut body = String::new();
    if let Err(e) = request.as_reader().read_to_string(&mut body) {
        tracing::warn!("failed to read request body: {e}");
        return response::respond_error(request, 400, handler::MISSING_URL);
    }

    // A body that is not a JSON object carries no url either way.
    let url = serde_json::from_str::<StlRequest>(&body)
        .ok()
        .and_then(|r| r.url);

    match handler::handle(url.as_deref(), &ctx.config, ctx.pipeline.as_ref()) {
        Ok(artifact) => response::respond_zip(request, &artifact),
        Err(err) => {
            tracing::warn!("request for {:?} failed: {err}", url);
            response::respond_error(request, err.status(), &err.to_string())
        }
    }
}
