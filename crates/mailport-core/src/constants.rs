//! Shared constants

/// Base URL of the mailbox.org web application.
pub const BASE_URL: &str = "https://app.mailbox.org/appsuite/";

/// Host suffix used to identify mailbox.org domains (includes subdomains).
pub const HOST_SUFFIX: &str = "mailbox.org";

/// User-visible service name for loading/error messages.
pub const SERVICE_NAME: &str = "mailbox.org";

/// Application name, used as the fallback notification title.
pub const APP_NAME: &str = "Mailport";
