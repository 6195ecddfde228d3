/// Errors returned by provider clients
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    NetworkError(String),
    RateLimitExceeded,
    InvalidResponse(String),
    NotFound,
    Timeout,
    Disabled,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            ApiError::RateLimitExceeded => write!(f, "Rate limit exceeded"),
            ApiError::InvalidResponse(msg) => write!(f, "Invalid response: {}", msg),
            ApiError::NotFound => write!(f, "Not found"),
            ApiError::Timeout => write!(f, "Request timeout"),
            ApiError::Disabled => write!(f, "API disabled"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<ApiError> for String {
    fn from(err: ApiError) -> String {
        err.to_string()
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else {
            ApiError::NetworkError(err.to_string())
        }
    }
}

impl ApiError {
    /// Map a non-success HTTP status
    pub fn from_status(status: reqwest::StatusCode) -> Self {
        match status.as_u16() {
            404 => ApiError::NotFound,
            429 => ApiError::RateLimitExceeded,
            code => ApiError::InvalidResponse(format!("HTTP {}", code)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::from_status(StatusCode::NOT_FOUND), ApiError::NotFound);
        assert_eq!(
            ApiError::from_status(StatusCode::TOO_MANY_REQUESTS),
            ApiError::RateLimitExceeded
        );
        assert_eq!(
            ApiError::from_status(StatusCode::BAD_GATEWAY),
            ApiError::InvalidResponse("HTTP 502".to_string())
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(ApiError::Timeout.to_string(), "Request timeout");
        let as_string: String = ApiError::InvalidResponse("missing data".to_string()).into();
        assert_eq!(as_string, "Invalid response: missing data");
    }
}
