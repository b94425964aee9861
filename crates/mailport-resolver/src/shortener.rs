//! Known URL-shortener domains

use url::Url;

/// Domains that issue redirect-only short URLs
const SHORTENER_DOMAINS: &[&str] = &[
    "bit.ly",
    "tinyurl.com",
    "t.co",
    "goo.gl",
    "ow.ly",
    "is.gd",
    "buff.ly",
    "j.mp",
    "lnkd.in",
    "db.tt",
    "qr.ae",
    "adf.ly",
    "bl.ink",
    "rb.gy",
    "shorturl.at",
    "cutt.ly",
    "short.io",
    "rebrand.ly",
    "tiny.cc",
    "v.gd",
    "t.ly",
    "s.id",
    "clck.ru",
    "yourls.org",
    "surl.li",
    "link.chtbl.com",
    "amzn.to",
    "amzn.eu",
    "youtu.be",
    "redd.it",
    "flip.it",
    "zpr.io",
];

/// Whether a URL's host is a known shortener domain or a subdomain of one.
///
/// Unparsable URLs and URLs without a host are not shortened.
pub fn is_shortened(url: &str) -> bool {
    let Ok(parsed) = Url::parse(url) else {
        return false;
    };
    let Some(host) = parsed.host_str() else {
        return false;
    };
    let host = host.to_ascii_lowercase();
    SHORTENER_DOMAINS
        .iter()
        .any(|domain| host == *domain || host.ends_with(&format!(".{}", domain)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_shorteners_match() {
        assert!(is_shortened("https://bit.ly/abc"));
        assert!(is_shortened("http://tinyurl.com/xyz"));
        assert!(is_shortened("https://youtu.be/dQw4w9WgXcQ"));
        assert!(is_shortened("https://amzn.to/3xyz"));
    }

    #[test]
    fn test_host_match_is_case_insensitive() {
        assert!(is_shortened("https://BIT.LY/abc"));
        assert!(is_shortened("https://Bit.Ly/abc"));
    }

    #[test]
    fn test_subdomain_suffix_matches() {
        assert!(is_shortened("https://www.bit.ly/abc"));
        assert!(is_shortened("https://link.chtbl.com/ep1"));
    }

    #[test]
    fn test_non_shorteners_do_not_match() {
        assert!(!is_shortened("https://example.com"));
        assert!(!is_shortened("https://mailbox.org/"));
        // Suffix must be on a label boundary
        assert!(!is_shortened("https://notbit.ly.example.com/"));
        assert!(!is_shortened("https://mybit.ly.com/"));
    }

    #[test]
    fn test_unparsable_or_hostless_urls() {
        assert!(!is_shortened(""));
        assert!(!is_shortened("not a url"));
        assert!(!is_shortened("mailto:a@bit.ly"));
        assert!(!is_shortened("data:text/plain,hi"));
    }
}
