use std::env;
use std::time::Duration;

use studio_core::ImageUrlResolver;
use studio_logging::studio_warn;
use url::Url;

use crate::ApiError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
/// Explicit API base URL.
pub const BASE_URL_ENV: &str = "STUDIO_API_BASE_URL";
/// Origin the site is served from, used when no explicit base URL is set.
pub const ORIGIN_ENV: &str = "STUDIO_ORIGIN";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Absolute http(s) URL without a trailing slash.
    pub base_url: String,
    pub api_prefix: String,
    /// Deadline for a whole call, connect through body.
    pub timeout: Duration,
    pub connect_timeout: Duration,
    /// Where a 401 sends the user.
    pub login_path: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_prefix: "/api".to_string(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            login_path: "/backend/login".to_string(),
        }
    }
}

impl ApiConfig {
    /// Config for `base_url`, or the local default when it is not a usable URL.
    pub fn new(base_url: &str) -> Self {
        Self::resolve(Some(base_url), None)
    }

    /// Resolve the base URL from the environment.
    pub fn from_env() -> Self {
        let explicit = env::var(BASE_URL_ENV).ok();
        let origin = env::var(ORIGIN_ENV).ok();
        Self::resolve(explicit.as_deref(), origin.as_deref())
    }

    /// Explicit value first, then the serving origin, then [`DEFAULT_BASE_URL`].
    /// Candidates that are not absolute http(s) URLs are skipped.
    pub fn resolve(explicit: Option<&str>, origin: Option<&str>) -> Self {
        let base_url = [explicit, origin]
            .into_iter()
            .flatten()
            .find_map(normalize_base)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self {
            base_url,
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// `{base_url}{api_prefix}{endpoint}` with `query` appended in order.
    pub fn endpoint_url(&self, endpoint: &str, query: &[(&str, String)]) -> Result<Url, ApiError> {
        let raw = format!("{}{}{}", self.base_url, self.api_prefix, endpoint);
        let mut url = Url::parse(&raw)
            .map_err(|err| ApiError::Network(format!("invalid request URL {raw}: {err}")))?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    pub fn login_url(&self) -> String {
        format!("{}{}", self.base_url, self.login_path)
    }

    /// Image resolver sharing this config's base URL.
    pub fn image_resolver(&self) -> ImageUrlResolver {
        ImageUrlResolver::new(&self.base_url)
    }
}

fn normalize_base(candidate: &str) -> Option<String> {
    let trimmed = candidate.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return None;
    }
    match Url::parse(trimmed) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => {
            Some(trimmed.to_string())
        }
        _ => {
            studio_warn!("ignoring unusable API base URL {:?}", candidate);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_base_url_wins() {
        let config = ApiConfig::resolve(Some("https://api.example.com/"), Some("https://site.example.com"));
        assert_eq!(config.base_url, "https://api.example.com");
    }

    #[test]
    fn origin_is_used_when_explicit_is_missing_or_invalid() {
        assert_eq!(
            ApiConfig::resolve(None, Some("https://site.example.com")).base_url,
            "https://site.example.com"
        );
        assert_eq!(
            ApiConfig::resolve(Some("not a url"), Some("https://site.example.com")).base_url,
            "https://site.example.com"
        );
    }

    #[test]
    fn falls_back_to_local_default() {
        assert_eq!(ApiConfig::resolve(None, None).base_url, DEFAULT_BASE_URL);
        assert_eq!(ApiConfig::resolve(Some("  "), Some("ftp://x")).base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn endpoint_url_joins_prefix_and_query() {
        let config = ApiConfig::new("https://api.example.com");
        let url = config
            .endpoint_url(
                "/projects",
                &[("category", "GAME".to_string()), ("limit", "3".to_string())],
            )
            .expect("valid url");
        assert_eq!(url.as_str(), "https://api.example.com/api/projects?category=GAME&limit=3");
        assert_eq!(config.login_url(), "https://api.example.com/backend/login");
    }
}
