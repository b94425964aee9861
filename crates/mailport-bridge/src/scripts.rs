//! Host→page script payloads
//!
//! The observer scripts are bundled verbatim and re-injected after every
//! navigation (they guard against duplicate installation themselves). The
//! builders below produce one-shot payloads; anything user-controlled goes
//! through [`escape_js_string`].

use mailport_core::{MailtoParams, BASE_URL};

/// Installs hover/unhover reporting on the document and its iframes.
pub const LINK_HOVER: &str = include_str!("../assets/link-hover.js");

/// Installs the debounced unread-count observer and its interval fallback.
pub const UNREAD_OBSERVER: &str = include_str!("../assets/unread-observer.js");

/// One-shot unread read, driven by the host's fallback timer.
pub const UNREAD_POLL: &str = include_str!("../assets/unread-poll.js");

/// Escape text for embedding inside a single-quoted JS string literal.
///
/// Also breaks up `</` so the payload can never terminate an enclosing
/// script element.
pub fn escape_js_string(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\'' => escaped.push_str("\\'"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            '<' if chars.peek() == Some(&'/') => escaped.push_str("\\x3C"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Apply custom CSS by (re)placing a dedicated style element.
pub fn inject_css(css: &str) -> String {
    format!(
        "(function() {{\n\
         var el = document.getElementById('__mailportCustomCss');\n\
         if (!el) {{\n\
             el = document.createElement('style');\n\
             el.id = '__mailportCustomCss';\n\
             document.head.appendChild(el);\n\
         }}\n\
         el.textContent = '{}';\n\
         }})();",
        escape_js_string(css)
    )
}

/// Navigate to the web app's compose screen, prefilled from a mailto: URL.
pub fn open_compose(params: &MailtoParams) -> String {
    let mut target = format!("{}#!!&app=io.ox/mail/compose:compose", BASE_URL);
    for (key, value) in [
        ("to", &params.to),
        ("cc", &params.cc),
        ("bcc", &params.bcc),
        ("subject", &params.subject),
        ("body", &params.body),
    ] {
        if !value.is_empty() {
            target.push('&');
            target.push_str(key);
            target.push('=');
            target.push_str(&urlencoding::encode(value));
        }
    }
    format!("location.href = '{}';", escape_js_string(&target))
}

/// Highlight the next occurrence of `query` in the page.
pub fn find_in_page(query: &str) -> String {
    format!("window.find('{}');", escape_js_string(query))
}

/// Clear the find-in-page selection.
pub fn clear_selection() -> String {
    "window.getSelection().removeAllRanges();".to_string()
}
