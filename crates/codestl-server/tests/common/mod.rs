//! Test helpers: a pipeline double and a minimal HTTP/1.1 client.

use codestl_core::config::ServerConfig;
use codestl_core::pipeline::{Pipeline, PipelineError, Representation};
use codestl_server::server::{BoundServer, ServerContext, ShutdownHandle};
use std::io::{Read, Write};
use std::net::{SocketAddr, TcpStream};
use std::path::Path;
use std::sync::atomic::AtomicUsize;
use std::sync::Arc;
use std::thread::JoinHandle;

/// Pipeline double: serves fixed bytes, or fails, and counts fetches.
pub struct MockPipeline {
    pub body: Vec<u8>,
    pub fail: Option<String>,
    pub fetches: Arc<AtomicUsize>,
}

impl MockPipeline {
    pub fn ok(body: &[u8]) -> Self {
        Self {
            body: body.to_vec(),
            fail: None,
            fetches: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            body: Vec::new(),
            fail: Some(message.to_string()),
            fetches: Arc::new(AtomicUsize::new(0)),
        }
    }
}

impl Pipeline for MockPipeline {
    fn fetch_representation(&self, _url: &str) -> Result<Representation, PipelineError> {
        self.fetches
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        if let Some(msg) = &self.fail {
            return Err(PipelineError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                msg.clone(),
            )));
        }
        Ok(Representation {
            svg: b"<svg/>".to_vec(),
        })
    }

    fn generate_archive(
        &self,
        _representation: &Representation,
        output_path: &Path,
    ) -> Result<(), PipelineError> {
        std::fs::write(output_path, &self.body)?;
        Ok(())
    }
}

/// Binds a server on a free port with `pipeline` and runs it in a
/// background thread until the handle is stopped.
pub fn start_server(
    pipeline: MockPipeline,
    temp_dir: &Path,
) -> (SocketAddr, ShutdownHandle, JoinHandle<()>) {
    let config = ServerConfig {
        port: 0,
        temp_dir: Some(temp_dir.to_path_buf()),
        ..ServerConfig::default()
    };
    let bound = BoundServer::bind(config.interface, config.port).expect("bind");
    let addr = bound.addr();
    let shutdown = bound.shutdown_handle();
    let ctx = ServerContext::new(config, Box::new(pipeline));
    let handle = std::thread::spawn(move || {
        bound.run(ctx).expect("server run");
    });
    (addr, shutdown, handle)
}

/// Parsed response from the raw client below.
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn body_str(&self) -> &str {
        std::str::from_utf8(&self.body).expect("utf-8 body")
    }
}

pub fn post(addr: SocketAddr, path: &str, body: &str) -> HttpResponse {
    request(addr, "POST", path, body)
}

pub fn get(addr: SocketAddr, path: &str) -> HttpResponse {
    request(addr, "GET", path, "")
}

fn request(addr: SocketAddr, method: &str, path: &str, body: &str) -> HttpResponse {
    let mut stream = TcpStream::connect(addr).expect("connect");
    let head = format!(
        "{method} {path} HTTP/1.1\r\nHost: {addr}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        body.len()
    );
    stream.write_all(head.as_bytes()).expect("write head");
    stream.write_all(body.as_bytes()).expect("write body");

    let mut raw = Vec::new();
    stream.read_to_end(&mut raw).expect("read response");
    parse_response(&raw)
}

fn parse_response(raw: &[u8]) -> HttpResponse {
    let split = raw
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .expect("header/body separator");
    let head = std::str::from_utf8(&raw[..split]).expect("utf-8 head");
    let body = raw[split + 4..].to_vec();

    let mut lines = head.lines();
    let status_line = lines.next().expect("status line");
    let status: u16 = status_line
        .split_whitespace()
        .nth(1)
        .expect("status code")
        .parse()
        .expect("numeric status");

    let headers = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(n, v)| (n.trim().to_string(), v.trim().to_string()))
        .collect();

    HttpResponse {
        status,
        headers,
        body,
    }
}
