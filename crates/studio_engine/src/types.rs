use serde_json::Value;
use studio_core::{ErrorInfo, PageData, RequestSeq, Slot};

/// Failure of one API call.
///
/// Pages never branch on the variant: everything is flattened into an
/// [`ErrorInfo`] by [`ApiError::to_error_info`] before it reaches core state.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// No response: DNS, connection refused or reset, invalid URL.
    #[error("{0}")]
    Network(String),
    #[error("Request timeout")]
    Timeout,
    /// A response arrived with a status outside 200..=299.
    #[error("{}", http_message(*status, detail.as_deref()))]
    Http {
        status: u16,
        /// The `detail` string of a JSON error body.
        detail: Option<String>,
        /// The decoded error body, or the raw text when it was not JSON.
        body: Option<Value>,
    },
    #[error("Invalid response: {0}")]
    Parse(String),
    #[error("Request cancelled")]
    Cancelled,
    /// The engine could not start its async runtime.
    #[error("Engine unavailable: {0}")]
    Runtime(String),
}

fn http_message(status: u16, detail: Option<&str>) -> String {
    match detail {
        Some(detail) if !detail.trim().is_empty() => detail.to_string(),
        _ => format!("HTTP Error {status}"),
    }
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn to_error_info(&self) -> ErrorInfo {
        let info = ErrorInfo::new(self.to_string());
        match self {
            ApiError::Http { status, body, .. } => {
                let info = info.with_status(*status);
                match body {
                    Some(body) => info.with_raw(body.clone()),
                    None => info,
                }
            }
            _ => info,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// A fetch issued with `EngineHandle::fetch` finished. Cancelled fetches
    /// never report.
    FetchSettled {
        slot: Slot,
        seq: RequestSeq,
        outcome: Result<PageData, ErrorInfo>,
    },
    /// A call outside any slot (a view count) was rejected with 401.
    Unauthorized,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn http_error_prefers_detail() {
        let err = ApiError::Http {
            status: 404,
            detail: Some("Project not found".into()),
            body: Some(json!({"detail": "Project not found"})),
        };
        let info = err.to_error_info();
        assert_eq!(info.message, "Project not found");
        assert_eq!(info.status, Some(404));
        assert_eq!(info.raw, Some(json!({"detail": "Project not found"})));
    }

    #[test]
    fn http_error_without_detail_uses_status() {
        let err = ApiError::Http {
            status: 502,
            detail: None,
            body: None,
        };
        assert_eq!(err.to_string(), "HTTP Error 502");
        assert_eq!(err.status(), Some(502));
    }

    #[test]
    fn transport_errors_carry_no_status() {
        let info = ApiError::Timeout.to_error_info();
        assert_eq!(info.message, "Request timeout");
        assert_eq!(info.status, None);
        assert_eq!(ApiError::Network("connection refused".into()).to_string(), "connection refused");
    }
}
