use crate::ErrorInfo;

/// Lifecycle of one fetch as seen by a page. Exactly one variant holds at a time.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestResult<T> {
    Idle,
    Loading,
    Success(T),
    Failure(ErrorInfo),
}

impl<T> Default for RequestResult<T> {
    fn default() -> Self {
        Self::Idle
    }
}

impl<T> RequestResult<T> {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// `Success` or `Failure`.
    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Success(_) | Self::Failure(_))
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Success(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ErrorInfo> {
        match self {
            Self::Failure(err) => Some(err),
            _ => None,
        }
    }
}

impl<T> From<Result<T, ErrorInfo>> for RequestResult<T> {
    fn from(outcome: Result<T, ErrorInfo>) -> Self {
        match outcome {
            Ok(data) => Self::Success(data),
            Err(err) => Self::Failure(err),
        }
    }
}
