/// Escapes text for use in HTML element content and double-quoted attributes.
///
/// Braces are encoded too, so escaped text can never form a `{{TOKEN}}`.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
     .replace('<', "&lt;")
     .replace('>', "&gt;")
     .replace('"', "&quot;")
     .replace('\'', "&#39;")
     .replace('{', "&#123;")
     .replace('}', "&#125;")
}
