//! Local preview server for an exported site.
//!
//! A small HTTP/1.1 file server: GET and HEAD only, one
//! request per connection, files served from the output directory. Routes
//! follow the exporter's layout, so `/` serves `index.html` and
//! `/project/2` serves `project/2.html`.

use anyhow::Result;
use std::path::{Component, Path, PathBuf};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

use crate::constants::PREFERRED_PORTS;
use crate::core::FolioError;

/// Largest request head accepted before the connection is dropped.
const MAX_REQUEST_HEAD: usize = 8 * 1024;

/// Bind `port` if given, otherwise the first free port in [`PREFERRED_PORTS`].
///
/// Each candidate is tried once.
///
/// # Errors
///
/// [`FolioError::Server`] if the requested port (or every preferred port)
/// is unavailable.
pub async fn bind(port: Option<u16>) -> Result<TcpListener, FolioError> {
    let candidates: Vec<u16> = match port {
        Some(port) => vec![port],
        None => PREFERRED_PORTS.to_vec(),
    };

    let mut failures = Vec::new();
    for candidate in &candidates {
        match TcpListener::bind(("127.0.0.1", *candidate)).await {
            Ok(listener) => return Ok(listener),
            Err(e) => {
                tracing::debug!("Port {} unavailable: {}", candidate, e);
                failures.push(format!("{candidate} ({e})"));
            }
        }
    }

    Err(FolioError::Server {
        reason: format!("No available port: tried {}", failures.join(", ")),
    })
}

/// A running preview server. Dropping the handle does not stop it; call
/// [`PreviewServer::stop`].
#[derive(Debug)]
pub struct PreviewServer {
    port: u16,
    task: JoinHandle<()>,
}

impl PreviewServer {
    /// Spawn the accept loop on `listener`, serving files under `root`.
    pub fn start(listener: TcpListener, root: PathBuf) -> Result<Self> {
        let port = listener.local_addr()?.port();
        let task = tokio::spawn(async move {
            loop {
                let (stream, peer) = match listener.accept().await {
                    Ok(accepted) => accepted,
                    Err(e) => {
                        tracing::warn!("Failed to accept connection: {}", e);
                        continue;
                    }
                };
                let root = root.clone();
                tokio::spawn(async move {
                    if let Err(e) = handle_connection(stream, &root).await {
                        tracing::debug!("Connection from {} failed: {}", peer, e);
                    }
                });
            }
        });

        tracing::info!("Preview server listening on port {}", port);
        Ok(Self {
            port,
            task,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn url(&self) -> String {
        format!("http://localhost:{}/", self.port)
    }

    /// Abort the accept loop. In-flight responses are dropped.
    pub fn stop(self) {
        self.task.abort();
        tracing::debug!("Preview server on port {} stopped", self.port);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Method {
    Get,
    Head,
}

async fn handle_connection(stream: TcpStream, root: &Path) -> std::io::Result<()> {
    let (reader, mut writer) = stream.into_split();
    let Some(request_line) = read_request_line(BufReader::new(reader)).await? else {
        tracing::debug!("Dropping connection with an empty or oversized request line");
        return Ok(());
    };

    let mut parts = request_line.split_whitespace();
    let method = match parts.next() {
        Some("GET") => Method::Get,
        Some("HEAD") => Method::Head,
        Some(_) => {
            return write_response(&mut writer, 405, "text/plain; charset=utf-8", b"Method Not Allowed", true)
                .await;
        }
        None => return Ok(()),
    };
    let target = parts.next().unwrap_or("/");
    let send_body = method == Method::Get;

    match resolve_path(root, target) {
        Some(path) => match tokio::fs::read(&path).await {
            Ok(body) => {
                tracing::debug!("200 {}", target);
                write_response(&mut writer, 200, content_type(&path), &body, send_body).await
            }
            Err(e) => {
                tracing::debug!("404 {} ({})", target, e);
                not_found(&mut writer, send_body).await
            }
        },
        None => {
            tracing::debug!("404 {}", target);
            not_found(&mut writer, send_body).await
        }
    }
}

/// Read the request line and drain the headers, buffering at most
/// [`MAX_REQUEST_HEAD`] bytes in total. `None` if the line is empty or
/// does not end within the limit.
async fn read_request_line<R: AsyncBufRead + Unpin>(reader: R) -> std::io::Result<Option<String>> {
    let mut head = reader.take(MAX_REQUEST_HEAD as u64);

    let mut request_line = String::new();
    if head.read_line(&mut request_line).await? == 0 || !request_line.ends_with('\n') {
        return Ok(None);
    }

    // Drain headers; nothing in them changes the response.
    loop {
        let mut header = String::new();
        let n = head.read_line(&mut header).await?;
        if n == 0 || header == "\r\n" || header == "\n" {
            break;
        }
    }

    Ok(Some(request_line))
}

async fn not_found<W: AsyncWrite + Unpin>(writer: &mut W, send_body: bool) -> std::io::Result<()> {
    write_response(writer, 404, "text/plain; charset=utf-8", b"Not Found", send_body).await
}

async fn write_response<W: AsyncWrite + Unpin>(
    writer: &mut W,
    status: u16,
    content_type: &str,
    body: &[u8],
    send_body: bool,
) -> std::io::Result<()> {
    let reason = match status {
        200 => "OK",
        404 => "Not Found",
        405 => "Method Not Allowed",
        _ => "Error",
    };
    let head = format!(
        "HTTP/1.1 {status} {reason}\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\nCache-Control: no-cache\r\nConnection: close\r\n\r\n",
        body.len()
    );
    writer.write_all(head.as_bytes()).await?;
    if send_body {
        writer.write_all(body).await?;
    }
    writer.shutdown().await
}

/// Map a request target to a file under `root`.
///
/// Returns `None` for traversal attempts and for targets with no backing
/// file. Query strings and fragments are ignored.
pub(crate) fn resolve_path(root: &Path, target: &str) -> Option<PathBuf> {
    let path = target.split(['?', '#']).next().unwrap_or_default();
    let decoded = percent_decode(path)?;

    let mut relative = PathBuf::new();
    for component in Path::new(decoded.trim_start_matches('/')).components() {
        match component {
            Component::Normal(part) => relative.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }

    let candidate = root.join(&relative);
    if candidate.is_dir() {
        let index = candidate.join("index.html");
        return index.is_file().then_some(index);
    }
    if candidate.is_file() {
        return Some(candidate);
    }
    // Extensionless routes such as /project/3
    if candidate.extension().is_none() {
        let html = candidate.with_extension("html");
        if html.is_file() {
            return Some(html);
        }
    }
    None
}

fn percent_decode(input: &str) -> Option<String> {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = input.get(i + 1..i + 3)?;
            out.push(u8::from_str_radix(hex, 16).ok()?);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(out).ok()
}

fn content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase).as_deref() {
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js") => "text/javascript; charset=utf-8",
        Some("json") => "application/json",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("ico") => "image/x-icon",
        Some("woff2") => "font/woff2",
        Some("txt") => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    }
}
