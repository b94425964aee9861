//! Redirect resolution with a process-lifetime cache

use crate::ResolverResult;
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::debug;
use url::Url;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);
const MAX_CONNECTIONS_PER_HOST: usize = 2;
const USER_AGENT: &str = "Mozilla/5.0";

/// Seam between the hover UI and the network-backed resolver, so the
/// shell can be exercised without network access.
#[async_trait]
pub trait LinkResolve: Send + Sync {
    /// Synchronous check: does this URL look like a shortened link?
    fn is_candidate(&self, url: &str) -> bool;

    /// Resolve to the final destination, or None when nothing changed or
    /// the request failed.
    async fn resolve(&self, url: &str) -> Option<String>;
}

/// Resolves shortened URLs by following redirects
///
/// Results are memoized under the exact input string. Only changed
/// results are cached; a URL that does not redirect is re-requested on
/// the next resolve.
pub struct LinkResolver {
    client: reqwest::Client,
    cache: RwLock<HashMap<String, String>>,
}

impl LinkResolver {
    pub fn new() -> ResolverResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .pool_max_idle_per_host(MAX_CONNECTIONS_PER_HOST)
            .redirect(reqwest::redirect::Policy::limited(10))
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            cache: RwLock::new(HashMap::new()),
        })
    }

    /// Resolve `url` to its redirect target.
    ///
    /// Transport policy blocks plain HTTP, so an `http://` input is
    /// requested as `https://`; the cache is still keyed on the input as
    /// given.
    pub async fn resolve(&self, url: &str) -> Option<String> {
        if let Some(cached) = self.cache.read().await.get(url) {
            return Some(cached.clone());
        }

        let upgraded = upgrade_scheme(url);
        let request_url = Url::parse(&upgraded).ok()?;

        let final_url = match self.client.get(request_url).send().await {
            Ok(response) => response.url().as_str().to_string(),
            Err(e) => {
                debug!("Resolution failed for {}: {}", url, e);
                return None;
            }
        };

        let resolved = changed_result(url, &upgraded, final_url)?;
        debug!("Resolved {} -> {}", url, resolved);
        self.cache
            .write()
            .await
            .insert(url.to_string(), resolved.clone());
        Some(resolved)
    }

    #[cfg(test)]
    async fn seed_cache(&self, url: &str, resolved: &str) {
        self.cache
            .write()
            .await
            .insert(url.to_string(), resolved.to_string());
    }
}

#[async_trait]
impl LinkResolve for LinkResolver {
    fn is_candidate(&self, url: &str) -> bool {
        crate::is_shortened(url)
    }

    async fn resolve(&self, url: &str) -> Option<String> {
        LinkResolver::resolve(self, url).await
    }
}

/// Rewrite a leading `http://` to `https://`.
fn upgrade_scheme(url: &str) -> String {
    match url.strip_prefix("http://") {
        Some(rest) => format!("https://{}", rest),
        None => url.to_string(),
    }
}

/// A final URL counts as a resolution only when it differs from both the
/// original and the upgraded input.
fn changed_result(original: &str, upgraded: &str, final_url: String) -> Option<String> {
    if final_url != original && final_url != upgraded {
        Some(final_url)
    } else {
        None
    }
}
