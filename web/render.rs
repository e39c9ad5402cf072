//! Template renderer for the siklus web pages.
//!
//! Every page shares `web/assets/layout.html` (navbar, footer, script tag);
//! the page body comes from its own asset and is spliced into `{{CONTENT}}`.
//! Both are loaded at compile time. Global placeholders (title, active nav
//! link) are resolved here; page-specific placeholders are filled by the
//! caller's closure, and anything left over is blanked so raw `{{TOKEN}}`
//! strings never reach the browser.

const LAYOUT: &str = include_str!("assets/layout.html");

const HOME:         &str = include_str!("assets/home.html");
const ABOUT:        &str = include_str!("assets/about.html");
const TEAM:         &str = include_str!("assets/team.html");
const FORM:         &str = include_str!("assets/form.html");
const RESULT:       &str = include_str!("assets/result.html");
const NOT_FOUND:    &str = include_str!("assets/404.html");
const SERVER_ERROR: &str = include_str!("assets/500.html");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    About,
    Team,
    Form,
    Result,
    NotFound,
    ServerError,
}

impl Page {
    pub fn title(self) -> &'static str {
        match self {
            Page::Home        => "Home",
            Page::About       => "About",
            Page::Team        => "Our Team",
            Page::Form        => "Form Prediksi",
            Page::Result      => "Hasil Prediksi",
            Page::NotFound    => "Halaman Tidak Ditemukan",
            Page::ServerError => "Kesalahan Server",
        }
    }

    fn body(self) -> &'static str {
        match self {
            Page::Home        => HOME,
            Page::About       => ABOUT,
            Page::Team        => TEAM,
            Page::Form        => FORM,
            Page::Result      => RESULT,
            Page::NotFound    => NOT_FOUND,
            Page::ServerError => SERVER_ERROR,
        }
    }

    /// The navbar entry highlighted for this page. The result page counts as
    /// part of the form flow.
    fn nav_token(self) -> Option<&'static str> {
        match self {
            Page::Home                => Some("{{NAV_HOME}}"),
            Page::About               => Some("{{NAV_ABOUT}}"),
            Page::Team                => Some("{{NAV_TEAM}}"),
            Page::Form | Page::Result => Some("{{NAV_FORM}}"),
            Page::NotFound | Page::ServerError => None,
        }
    }
}

const ACTIVE_NAV: &str = "font-bold underline";

/// Renders a full page.
pub fn render_page<F>(page: Page, fill: F) -> String
where
    F: FnOnce(String) -> String,
{
    let mut html = LAYOUT.replace("{{CONTENT}}", page.body());

    html = html.replace("{{TITLE}}", page.title());
    if let Some(token) = page.nav_token() {
        html = html.replace(token, ACTIVE_NAV);
    }

    html = fill(html);

    blank_remaining(html)
}

/// A page with no page-specific placeholders.
pub fn render_static(page: Page) -> String {
    render_page(page, |html| html)
}

/// Replaces any `{{TOKEN}}` that wasn't substituted with an empty string.
fn blank_remaining(mut html: String) -> String {
    let mut from = 0;
    while let Some(rel) = html[from..].find("{{") {
        let start = from + rel;
        match html[start..].find("}}") {
            Some(end) => {
                html.replace_range(start..start + end + 2, "");
                from = start;
            }
            None => break,
        }
    }
    html
}
