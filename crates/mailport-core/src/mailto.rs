//! mailto: URL parsing
//!
//! Parses a mailto: URL into parameters suitable for the web app's compose
//! screen. Supports to, cc, bcc, subject, and body per RFC 6068.

/// Compose parameters extracted from a mailto: URL
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MailtoParams {
    pub to: String,
    pub cc: String,
    pub bcc: String,
    pub subject: String,
    pub body: String,
}

impl MailtoParams {
    /// Parse a mailto: URL; returns None for any other scheme.
    pub fn parse(url: &str) -> Option<Self> {
        const SCHEME: &str = "mailto:";
        match url.get(..SCHEME.len()) {
            Some(prefix) if prefix.eq_ignore_ascii_case(SCHEME) => {}
            _ => return None,
        }
        let after_scheme = &url[SCHEME.len()..];

        let mut params = MailtoParams::default();

        let (address_part, query) = match after_scheme.split_once('?') {
            Some((addr, query)) => (addr, Some(query)),
            None => (after_scheme, None),
        };

        if !address_part.is_empty() {
            params.to = decode(address_part);
        }

        if let Some(query) = query {
            for pair in query.split('&') {
                let (key, value) = match pair.split_once('=') {
                    Some((k, v)) => (k, decode(v)),
                    None => (pair, String::new()),
                };
                match key.to_ascii_lowercase().as_str() {
                    // Additional to= values accumulate, comma-separated
                    "to" => {
                        if params.to.is_empty() {
                            params.to = value;
                        } else {
                            params.to.push(',');
                            params.to.push_str(&value);
                        }
                    }
                    "cc" => params.cc = value,
                    "bcc" => params.bcc = value,
                    "subject" => params.subject = value,
                    "body" => params.body = value,
                    _ => {}
                }
            }
        }

        Some(params)
    }
}

/// Percent-decode, falling back to the raw text on invalid sequences.
fn decode(value: &str) -> String {
    urlencoding::decode(value)
        .map(|cow| cow.into_owned())
        .unwrap_or_else(|_| value.to_string())
}
