use crate::render::{render_static, Page};
use crate::routes::{html_response, HttpReply};

// ---------------------------------------------------------------------------
// Static pages: GET /, /about, /team and the error pages
// ---------------------------------------------------------------------------

pub fn home() -> HttpReply {
    html_response(200, render_static(Page::Home))
}

pub fn about() -> HttpReply {
    html_response(200, render_static(Page::About))
}

pub fn team() -> HttpReply {
    html_response(200, render_static(Page::Team))
}

pub fn not_found() -> HttpReply {
    html_response(404, render_static(Page::NotFound))
}

pub fn server_error() -> HttpReply {
    html_response(500, render_static(Page::ServerError))
}

// ---------------------------------------------------------------------------
// GET /static/js/script.js
// ---------------------------------------------------------------------------

const SCRIPT: &str = include_str!("../assets/script.js");

pub fn script() -> HttpReply {
    HttpReply {
        status: 200,
        content_type: "application/javascript; charset=utf-8",
        body: SCRIPT.as_bytes().to_vec(),
    }
}
