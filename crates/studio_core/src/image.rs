/// Path under which the backend serves uploaded images.
pub const DEFAULT_UPLOAD_PREFIX: &str = "/static/uploads";

/// Returned for missing or empty image references.
pub const DEFAULT_PLACEHOLDER: &str = "/static/images/placeholder.webp";

/// Maps a stored image reference (bare filename, upload path, or absolute URL)
/// to something a browser can load.
///
/// `resolve` is total and idempotent: feeding its output back in returns the
/// same string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUrlResolver {
    base_url: String,
    upload_prefix: String,
    placeholder: String,
}

impl Default for ImageUrlResolver {
    fn default() -> Self {
        Self::new("")
    }
}

impl ImageUrlResolver {
    /// `base_url` may be empty, in which case resolved URLs are origin-relative.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim().trim_end_matches('/').to_string(),
            upload_prefix: DEFAULT_UPLOAD_PREFIX.to_string(),
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
        }
    }

    pub fn with_upload_prefix(mut self, prefix: &str) -> Self {
        let trimmed = prefix.trim().trim_matches('/');
        self.upload_prefix = if trimmed.is_empty() {
            String::new()
        } else {
            format!("/{trimmed}")
        };
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn upload_prefix(&self) -> &str {
        &self.upload_prefix
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn resolve(&self, filename: Option<&str>) -> String {
        let Some(name) = filename.map(str::trim).filter(|name| !name.is_empty()) else {
            return self.placeholder.clone();
        };
        if name == self.placeholder || is_absolute_http(name) || self.is_upload_path(name) {
            return name.to_string();
        }
        let file = name.trim_start_matches('/');
        format!("{}{}/{}", self.base_url, self.upload_prefix, file)
    }

    fn is_upload_path(&self, name: &str) -> bool {
        name.strip_prefix(self.upload_prefix.as_str())
            .is_some_and(|rest| rest.starts_with('/'))
    }
}

fn is_absolute_http(candidate: &str) -> bool {
    let lower = candidate
        .get(..8)
        .unwrap_or(candidate)
        .to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}
