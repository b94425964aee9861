//! Navigation policy for the embedded webview
//!
//! Keeps mailbox.org traffic inside the webview, hands external links to
//! the default browser, and detects when the session has expired back to
//! the login page.

use crate::HOST_SUFFIX;
use url::Url;

/// How a navigation was initiated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationKind {
    /// The user activated a link; `command_key` is the open-in-new-tab modifier
    LinkActivated { command_key: bool },
    /// Redirects, form submissions, script-driven navigation
    Other,
}

/// What the host should do with a navigation request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Load in the webview
    Allow,
    /// Open in the default browser and cancel the in-view navigation
    OpenExternal,
    /// Open in a new shell tab and cancel the in-view navigation
    OpenNewTab,
    /// Hand the response to the download pipeline
    Download,
}

/// Whether `host` is the service domain or one of its subdomains.
fn is_service_host(host: &str) -> bool {
    host == HOST_SUFFIX || host.ends_with(&format!(".{}", HOST_SUFFIX))
}

/// Decide what to do with a navigation request.
pub fn decide(url: &Url, kind: NavigationKind) -> Decision {
    if let Some(host) = url.host_str() {
        if is_service_host(host) {
            // Cmd+click on an in-service link opens a new tab
            if let NavigationKind::LinkActivated { command_key: true } = kind {
                return Decision::OpenNewTab;
            }
            return Decision::Allow;
        }
    }

    // Internal schemes used by the web app itself
    if matches!(url.scheme(), "about" | "blob" | "data") {
        return Decision::Allow;
    }

    // External links go to the default browser
    if matches!(kind, NavigationKind::LinkActivated { .. }) {
        return Decision::OpenExternal;
    }

    // Redirects and form submissions within the page
    Decision::Allow
}

/// Decide what to do with a navigation response the webview cannot display.
pub fn response_decision(can_show_mime: bool) -> Decision {
    if can_show_mime {
        Decision::Allow
    } else {
        Decision::Download
    }
}

/// Whether the webview has landed back on the login page.
///
/// The base appsuite URL without an app hash means the session expired.
pub fn session_expired(url: &Url) -> bool {
    let s = url.as_str();
    let on_login_page = s.contains("/appsuite/") && !s.contains("#!!&app=");
    let on_signin = s.contains("/appsuite/signin");
    on_login_page || on_signin
}
