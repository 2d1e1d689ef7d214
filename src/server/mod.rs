//! Static file server for the game directory.
//!
//! Serves a directory tree over HTTP (GET and HEAD), one request at a time.
//! Audio extensions get the MIME types browsers expect, and every response
//! carries `Access-Control-Allow-Origin: *` so pages on other origins can
//! load the sounds.

mod files;
mod mime;

pub use files::{percent_decode, translate_path};
pub use mime::{DEFAULT_MIME, guess_type};

use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderValue, Method, StatusCode, Uri, header};
use axum::response::{Html, IntoResponse, Response};
use tokio::net::TcpListener;
use tokio::sync::Semaphore;
use tracing::{debug, info};

use crate::error::ServerError;
use files::{ListingEntry, html_escape};

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_HOST: &str = "0.0.0.0";

const HTML_UTF8: &str = "text/html; charset=utf-8";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory served as `/`.
    pub root: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            root: PathBuf::from("."),
        }
    }
}

struct ServerState {
    root: PathBuf,
    /// Single permit: requests are handled strictly one after another.
    permit: Semaphore,
}

/// Router serving `root`. Every path goes through the file handler.
pub fn router(root: PathBuf) -> Router {
    let state = Arc::new(ServerState {
        root,
        permit: Semaphore::new(1),
    });
    Router::new().fallback(handle_request).with_state(state)
}

/// Serve `config.root` until Ctrl+C on a single-threaded runtime.
pub fn run(config: &ServerConfig) -> Result<(), ServerError> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(ServerError::Runtime)?;

    rt.block_on(serve(config.clone()))
}

/// Bind `host:port` and serve until Ctrl+C.
pub async fn serve(config: ServerConfig) -> Result<(), ServerError> {
    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;
    serve_listener(listener, config.root, shutdown_signal()).await
}

/// Serve `root` on an already bound listener until `shutdown` resolves.
pub async fn serve_listener<F>(
    listener: TcpListener,
    root: PathBuf,
    shutdown: F,
) -> Result<(), ServerError>
where
    F: Future<Output = ()> + Send + 'static,
{
    if let Ok(addr) = listener.local_addr() {
        info!("Server running at http://localhost:{}/", addr.port());
    }
    info!("Serving {}", root.display());
    info!("Audio MIME types configured correctly");
    info!("Press Ctrl+C to stop");

    axum::serve(listener, router(root))
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(ServerError::Serve)?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        // No signal handler available; run until the process is killed.
        std::future::pending::<()>().await;
    }
}

async fn handle_request(
    State(state): State<Arc<ServerState>>,
    method: Method,
    uri: Uri,
) -> Response {
    let _permit = state.permit.acquire().await;
    let mut response = respond(&state.root, &method, &uri).await;
    response.headers_mut().insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    info!("\"{method} {uri}\" {}", response.status().as_u16());
    response
}

async fn respond(root: &Path, method: &Method, uri: &Uri) -> Response {
    let head = match *method {
        Method::GET => false,
        Method::HEAD => true,
        _ => return error_page(StatusCode::NOT_IMPLEMENTED, "Unsupported method"),
    };

    let url_path = uri.path();
    let fs_path = translate_path(root, url_path);
    debug!("{url_path} -> {}", fs_path.display());

    let Ok(meta) = tokio::fs::metadata(&fs_path).await else {
        return error_page(StatusCode::NOT_FOUND, "File not found");
    };

    if meta.is_dir() {
        if !url_path.ends_with('/') {
            let location = match uri.query() {
                Some(query) => format!("{url_path}/?{query}"),
                None => format!("{url_path}/"),
            };
            return redirect(location);
        }
        for index in files::INDEX_FILES {
            let candidate = fs_path.join(index);
            if tokio::fs::metadata(&candidate).await.is_ok_and(|m| m.is_file()) {
                return serve_file(&candidate, head).await;
            }
        }
        return list_directory(&fs_path, url_path, head).await;
    }

    // A trailing slash names a directory; a file there does not match.
    if url_path.ends_with('/') {
        return error_page(StatusCode::NOT_FOUND, "File not found");
    }
    serve_file(&fs_path, head).await
}

async fn serve_file(path: &Path, head: bool) -> Response {
    match tokio::fs::read(path).await {
        Ok(bytes) => ok_response(guess_type(path), bytes, head),
        Err(e) => {
            debug!("failed to read {}: {e}", path.display());
            error_page(StatusCode::NOT_FOUND, "File not found")
        }
    }
}

async fn list_directory(dir: &Path, url_path: &str, head: bool) -> Response {
    let mut read_dir = match tokio::fs::read_dir(dir).await {
        Ok(read_dir) => read_dir,
        Err(_) => return error_page(StatusCode::NOT_FOUND, "No permission to list directory"),
    };

    let mut entries = Vec::new();
    while let Ok(Some(entry)) = read_dir.next_entry().await {
        let is_dir = tokio::fs::metadata(entry.path())
            .await
            .is_ok_and(|m| m.is_dir());
        entries.push(ListingEntry {
            name: entry.file_name().to_string_lossy().into_owned(),
            is_dir,
        });
    }

    let html = files::render_listing(url_path, entries);
    ok_response(HTML_UTF8, html.into_bytes(), head)
}

fn ok_response(content_type: &str, bytes: Vec<u8>, head: bool) -> Response {
    let len = bytes.len().to_string();
    let body = if head { Body::empty() } else { Body::from(bytes) };
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (header::CONTENT_LENGTH, len),
        ],
        body,
    )
        .into_response()
}

fn redirect(location: String) -> Response {
    (StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, location)]).into_response()
}

fn error_page(status: StatusCode, message: &str) -> Response {
    let html = format!(
        "<!DOCTYPE HTML>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Error response</title>\n</head>\n<body>\n<h1>Error response</h1>\n\
         <p>Error code: {}</p>\n<p>Message: {}.</p>\n</body>\n</html>\n",
        status.as_u16(),
        html_escape(message)
    );
    (status, Html(html)).into_response()
}
