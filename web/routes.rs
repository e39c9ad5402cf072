use std::any::Any;
use std::io::{Cursor, Read};
use std::panic::{self, AssertUnwindSafe};

use log::{debug, error, warn};
use thiserror::Error;
use tiny_http::{Header, Method, Request, Response, StatusCode};

use crate::handlers::{form, pages};
use crate::state::{AppState, SharedState};

/// Form bodies above this size are not read.
pub const MAX_BODY_BYTES: u64 = 64 * 1024;

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

/// A fully built response, independent of the connection it goes out on.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpReply {
    pub status:       u16,
    pub content_type: &'static str,
    pub body:         Vec<u8>,
}

impl HttpReply {
    pub fn into_response(self) -> Response<Cursor<Vec<u8>>> {
        let len = self.body.len();
        let headers: Vec<Header> =
            Header::from_bytes(&b"Content-Type"[..], self.content_type.as_bytes())
                .into_iter()
                .collect();
        Response::new(StatusCode(self.status), headers, Cursor::new(self.body), Some(len), None)
    }
}

pub fn html_response(status: u16, body: String) -> HttpReply {
    HttpReply {
        status,
        content_type: "text/html; charset=utf-8",
        body: body.into_bytes(),
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BodyError {
    #[error("request body exceeds {} bytes", MAX_BODY_BYTES)]
    TooLarge,
    #[error("failed to read request body: {0}")]
    Io(String),
}

fn read_body(request: &mut Request) -> Result<Vec<u8>, BodyError> {
    let mut body = Vec::new();
    request
        .as_reader()
        .take(MAX_BODY_BYTES + 1)
        .read_to_end(&mut body)
        .map_err(|e| BodyError::Io(e.to_string()))?;
    if body.len() as u64 > MAX_BODY_BYTES {
        return Err(BodyError::TooLarge);
    }
    Ok(body)
}

// ---------------------------------------------------------------------------
// Request dispatcher
// ---------------------------------------------------------------------------

/// Reads one request, routes it, and writes the reply.
///
/// A panic anywhere in routing or rendering is caught here, logged, and
/// answered with the 500 page; the worker thread and the server keep going.
pub fn dispatch(mut request: Request, state: SharedState) {
    let method = request.method().clone();
    let path = request.url().split('?').next().unwrap_or("").to_owned();
    debug!("{} {}", method, path);

    let body = if method == Method::Post {
        read_body(&mut request)
    } else {
        Ok(Vec::new())
    };

    let reply = guarded(&format!("{} {}", method, path), || {
        route(&method, &path, body.as_deref().map_err(BodyError::clone), &state)
    });

    if let Err(e) = request.respond(reply.into_response()) {
        warn!("failed to send response for {} {}: {}", method, path, e);
    }
}

/// Maps method and path to a handler. Unknown combinations get the 404 page.
pub fn route(method: &Method, path: &str, body: Result<&[u8], BodyError>, state: &AppState) -> HttpReply {
    match (method, path) {
        (Method::Get, "/")      => pages::home(),
        (Method::Get, "/about") => pages::about(),
        (Method::Get, "/team")  => pages::team(),

        (Method::Get,  "/form") => form::handle_get(state),
        (Method::Post, "/form") => form::handle_post(body, state),

        (Method::Get, "/static/js/script.js") => pages::script(),

        _ => pages::not_found(),
    }
}

/// Runs `f`, turning a panic into the 500 page.
fn guarded<F>(what: &str, f: F) -> HttpReply
where
    F: FnOnce() -> HttpReply,
{
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(reply) => reply,
        Err(payload) => {
            error!("unhandled failure while serving {}: {}", what, panic_message(payload.as_ref()));
            pages::server_error()
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "non-string panic payload"
    }
}
