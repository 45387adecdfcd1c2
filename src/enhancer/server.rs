//! Form Server - local HTTP server for the prompt form
//! Serves the Web UI page and the JSON API behind it

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use http_body_util::{BodyExt, Full, Limited};
use hyper::body::{Bytes, Incoming};
use hyper::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::net::TcpListener;
use tokio::sync::{Mutex, RwLock};
use tracing::{error, info, warn};

use crate::assembler::{assemble, catalogue, Level, UserInput};
use crate::export::{export_filename_today, export_prompt};
use crate::session::{FormSession, SessionError};

use super::prompt_enhancer::PromptEnhancer;
use super::templates::FORM_UI_HTML;

/// Maximum request body size (1MB)
const MAX_BODY_SIZE: usize = 1024 * 1024;

/// Number of consecutive ports tried before giving up
const PORT_ATTEMPTS: u16 = 100;

/// State shared by all connections
struct AppState {
    session: Mutex<FormSession>,
    enhancer: Arc<PromptEnhancer>,
    export_dir: PathBuf,
}

/// Form HTTP Server
pub struct FormServer {
    port: Arc<RwLock<u16>>,
    state: Arc<AppState>,
    running: Arc<RwLock<bool>>,
}

impl FormServer {
    pub fn new(enhancer: Arc<PromptEnhancer>) -> Self {
        let port = enhancer.config().port;
        let export_dir = enhancer.config().export_dir.clone();
        Self {
            port: Arc::new(RwLock::new(port)),
            state: Arc::new(AppState {
                session: Mutex::new(FormSession::new()),
                enhancer,
                export_dir,
            }),
            running: Arc::new(RwLock::new(false)),
        }
    }

    /// Start HTTP server, returning the bound port
    pub async fn start(&self) -> Result<u16> {
        {
            let mut running = self.running.write().await;
            if *running {
                return Ok(*self.port.read().await);
            }
            *running = true;
        }

        let mut port = *self.port.read().await;
        let mut listener: Option<TcpListener> = None;

        // Try to bind to port, increment if in use
        for _ in 0..PORT_ATTEMPTS {
            match TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], port))).await {
                Ok(l) => {
                    listener = Some(l);
                    break;
                }
                Err(e) if e.kind() == std::io::ErrorKind::AddrInUse => {
                    warn!("Port {} is in use, trying {}", port, port.wrapping_add(1));
                    port = port.wrapping_add(1);
                }
                Err(e) => {
                    *self.running.write().await = false;
                    return Err(anyhow!("Failed to bind to port: {}", e));
                }
            }
        }

        let listener = match listener {
            Some(l) => l,
            None => {
                *self.running.write().await = false;
                return Err(anyhow!("Could not find available port"));
            }
        };

        // Port 0 asks the OS for a free port
        let port = listener.local_addr()?.port();
        *self.port.write().await = port;

        info!("Form server started: http://localhost:{}", port);

        let state = self.state.clone();

        tokio::spawn(async move {
            loop {
                let (stream, _) = match listener.accept().await {
                    Ok(conn) => conn,
                    Err(e) => {
                        error!("Failed to accept connection: {}", e);
                        continue;
                    }
                };

                let io = TokioIo::new(stream);
                let state = state.clone();

                tokio::spawn(async move {
                    let service = service_fn(|req| handle_request(req, state.clone()));

                    if let Err(e) = http1::Builder::new().serve_connection(io, service).await {
                        if !e.to_string().contains("connection closed") {
                            error!("Error serving connection: {}", e);
                        }
                    }
                });
            }
        });

        Ok(port)
    }

    /// Get server port
    pub async fn get_port(&self) -> u16 {
        *self.port.read().await
    }
}

/// Handle HTTP request
async fn handle_request(
    req: Request<Incoming>,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, hyper::Error> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    // Handle CORS preflight
    if method == Method::OPTIONS {
        return Ok(cors_response(empty_response(StatusCode::OK)));
    }

    let response = match (method, path.as_str()) {
        (Method::GET, "/") | (Method::GET, "/index.html") => serve_form_ui(),
        (Method::GET, "/api/levels") => json_body(StatusCode::OK, &catalogue()),
        (Method::GET, "/api/state") => get_state(&state).await,
        (Method::POST, "/api/level") => handle_select_level(req, &state).await,
        (Method::POST, "/api/generate") => handle_generate(req, &state).await,
        (Method::GET, "/api/export") => handle_download(&state).await,
        (Method::POST, "/api/export") => handle_save_export(&state).await,
        _ => Response::builder()
            .status(StatusCode::NOT_FOUND)
            .header(CONTENT_TYPE, "text/plain")
            .body(Full::new(Bytes::from("Not Found")))
            .unwrap(),
    };

    Ok(cors_response(response))
}

/// Add CORS headers (restricted to localhost only)
pub fn cors_response(mut response: Response<Full<Bytes>>) -> Response<Full<Bytes>> {
    let headers = response.headers_mut();
    headers.insert(
        "Access-Control-Allow-Origin",
        "http://localhost".parse().unwrap(),
    );
    headers.insert(
        "Access-Control-Allow-Methods",
        "GET, POST, OPTIONS".parse().unwrap(),
    );
    headers.insert(
        "Access-Control-Allow-Headers",
        "Content-Type".parse().unwrap(),
    );
    response
}

/// Serve Web UI HTML
pub fn serve_form_ui() -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::OK)
        .header(CONTENT_TYPE, "text/html; charset=utf-8")
        .body(Full::new(Bytes::from(FORM_UI_HTML)))
        .unwrap()
}

async fn get_state(state: &AppState) -> Response<Full<Bytes>> {
    let snapshot = state.session.lock().await.snapshot();
    json_body(StatusCode::OK, &snapshot)
}

async fn handle_select_level(req: Request<Incoming>, state: &AppState) -> Response<Full<Bytes>> {
    #[derive(Deserialize)]
    struct LevelRequest {
        level: String,
    }

    let body: LevelRequest = match read_json(req).await {
        Ok(b) => b,
        Err(resp) => return resp,
    };

    let level = match Level::parse(&body.level) {
        Some(level) => level,
        None => {
            return json_error_response(
                StatusCode::BAD_REQUEST,
                &format!("Unknown level: {}", body.level),
            );
        }
    };

    let mut session = state.session.lock().await;
    session.select_level(level);
    info!("Selected level: {}", level);
    json_body(StatusCode::OK, &session.snapshot())
}

async fn handle_generate(
    req: Request<Incoming>,
    state: &Arc<AppState>,
) -> Response<Full<Bytes>> {
    #[derive(Deserialize)]
    struct GenerateRequest {
        input: UserInput,
    }

    let body: GenerateRequest = match read_json(req).await {
        Ok(b) => b,
        Err(resp) => return resp,
    };

    let ticket = {
        let mut session = state.session.lock().await;
        match session.begin(&body.input) {
            Ok(ticket) => ticket,
            Err(e @ SessionError::AlreadyGenerating) => {
                return json_error_response(StatusCode::CONFLICT, &e.to_string());
            }
            Err(e) => return json_error_response(StatusCode::BAD_REQUEST, &e.to_string()),
        }
    };

    let draft = assemble(&body.input, ticket.level);
    info!("Assembled {} prompt ({} chars)", ticket.level, draft.len());

    // The task records the outcome itself; a dropped connection must not
    // leave the session in `Generating`. The lock is not held across the remote call.
    let task_state = state.clone();
    let completion = tokio::spawn(async move {
        let enhancer = task_state.enhancer.clone();
        let outcome = tokio::spawn(async move { enhancer.enhance_detailed(&draft).await }).await;

        let mut session = task_state.session.lock().await;
        match outcome {
            Ok(enhancement) => session.complete(ticket, enhancement),
            Err(e) => {
                error!("Prompt generation failed: {}", e);
                session.fail(ticket, e.to_string());
            }
        }
        session.snapshot()
    });

    match completion.await {
        Ok(snapshot) => json_body(StatusCode::OK, &snapshot),
        Err(e) => json_error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            &format!("Prompt generation failed: {}", e),
        ),
    }
}

async fn handle_download(state: &AppState) -> Response<Full<Bytes>> {
    let session = state.session.lock().await;
    let generated = match session.generated() {
        Some(g) => g,
        None => {
            return json_error_response(
                StatusCode::NOT_FOUND,
                &SessionError::NothingGenerated.to_string(),
            );
        }
    };

    let filename = export_filename_today(generated.level);
    Response::builder()
        .status(StatusCode::OK)
        .header(CONTENT_TYPE, "text/plain; charset=utf-8")
        .header(
            CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", filename),
        )
        .body(Full::new(Bytes::from(generated.prompt.clone())))
        .unwrap()
}

async fn handle_save_export(state: &AppState) -> Response<Full<Bytes>> {
    let generated = match state.session.lock().await.generated() {
        Some(g) => g.clone(),
        None => {
            return json_error_response(
                StatusCode::NOT_FOUND,
                &SessionError::NothingGenerated.to_string(),
            );
        }
    };

    match export_prompt(&state.export_dir, &generated) {
        Ok(path) => json_body(StatusCode::OK, &json!({ "path": path.display().to_string() })),
        Err(e) => {
            error!("Export failed: {:#}", e);
            json_error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                &format!("Export failed: {}", e),
            )
        }
    }
}

/// Read and decode a JSON body, mapping failures to a 400 response
async fn read_json<T: for<'de> Deserialize<'de>>(
    req: Request<Incoming>,
) -> Result<T, Response<Full<Bytes>>> {
    let body = read_body_with_limit(req, MAX_BODY_SIZE)
        .await
        .map_err(|e| json_error_response(StatusCode::BAD_REQUEST, &e))?;

    serde_json::from_slice(&body)
        .map_err(|_| json_error_response(StatusCode::BAD_REQUEST, "Invalid request body"))
}

/// Read request body with size limit (streaming enforcement to prevent memory exhaustion)
async fn read_body_with_limit(req: Request<Incoming>, max_size: usize) -> Result<Bytes, String> {
    let limited = Limited::new(req.into_body(), max_size);
    match limited.collect().await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(e) => {
            if e.to_string().contains("length limit exceeded") {
                Err(format!("Request body too large (max {} bytes)", max_size))
            } else {
                Err("Failed to read body".to_string())
            }
        }
    }
}

fn empty_response(status: StatusCode) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .body(Full::new(Bytes::new()))
        .unwrap()
}

fn json_body<T: Serialize>(status: StatusCode, value: &T) -> Response<Full<Bytes>> {
    match serde_json::to_string(value) {
        Ok(body) => json_response(status, &body),
        Err(e) => json_error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            &format!("Serialization failed: {}", e),
        ),
    }
}

/// Create JSON error response with safe serialization
pub fn json_error_response(status: StatusCode, error: &str) -> Response<Full<Bytes>> {
    let body = json!({ "error": error }).to_string();
    json_response(status, &body)
}

/// Create JSON response
pub fn json_response(status: StatusCode, body: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .header(CONTENT_TYPE, "application/json")
        .body(Full::new(Bytes::from(body.to_string())))
        .unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cors_response_preserves_status() {
        let resp = cors_response(empty_response(StatusCode::NOT_FOUND));
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            resp.headers().get("Access-Control-Allow-Origin").unwrap(),
            "http://localhost"
        );
    }

    #[test]
    fn test_json_error_response_escapes_message() {
        let resp = json_error_response(StatusCode::BAD_REQUEST, "bad \"quote\"");
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            resp.headers().get(CONTENT_TYPE).unwrap(),
            "application/json"
        );
    }

    #[test]
    fn test_serve_form_ui_is_html() {
        let resp = serve_form_ui();
        assert_eq!(resp.status(), StatusCode::OK);
        let content_type = resp.headers().get(CONTENT_TYPE).unwrap().to_str().unwrap();
        assert!(content_type.contains("text/html"));
    }
}
