use ::http::StatusCode;
use thiserror::Error;

pub const BAD_REQUEST_FALLBACK: &str = "Invalid request parameters";
pub const UNAUTHORIZED_MESSAGE: &str = "Unauthorized, please log in again";
pub const FORBIDDEN_MESSAGE: &str = "Access denied";
pub const NOT_FOUND_MESSAGE: &str = "Requested resource not found";
pub const TIMEOUT_MESSAGE: &str = "Network connection timed out";
pub const NETWORK_MESSAGE: &str = "Network error";
pub const MALFORMED_MESSAGE: &str = "Malformed response from server";

/// Every way a backend call can fail. `Display` is the user-facing message.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The backend understood the request and said no (`success == false`).
    #[error("{message}")]
    RequestRejected { message: String },
    #[error("{message}")]
    BadRequest { message: String },
    #[error("{message}")]
    Unauthorized { message: String },
    #[error("{message}")]
    Forbidden { message: String },
    #[error("{message}")]
    NotFound { message: String },
    /// 500 and every status without a dedicated variant.
    #[error("{message}")]
    ServerError { status: u16, message: String },
    /// Nothing usable came back: timeout, refused connection, dropped stream.
    #[error("{message}")]
    ConnectivityFailure { message: String, timed_out: bool },
    /// A 2xx whose body is not the envelope we expect.
    #[error("{message}")]
    MalformedResponse { message: String, detail: String },
}

impl ApiError {
    /// Map a non-2xx status onto the taxonomy. `server_message` is the optional
    /// `message` field of the error body; only some statuses use it.
    pub fn from_status(status: StatusCode, server_message: Option<String>) -> Self {
        match status {
            StatusCode::BAD_REQUEST => ApiError::BadRequest {
                message: server_message.unwrap_or_else(|| BAD_REQUEST_FALLBACK.to_string()),
            },
            StatusCode::UNAUTHORIZED => ApiError::Unauthorized {
                message: UNAUTHORIZED_MESSAGE.to_string(),
            },
            StatusCode::FORBIDDEN => ApiError::Forbidden {
                message: FORBIDDEN_MESSAGE.to_string(),
            },
            StatusCode::NOT_FOUND => ApiError::NotFound {
                message: NOT_FOUND_MESSAGE.to_string(),
            },
            StatusCode::INTERNAL_SERVER_ERROR => ApiError::ServerError {
                status: status.as_u16(),
                message: format!("Internal server error ({})", status.as_u16()),
            },
            other => ApiError::ServerError {
                status: other.as_u16(),
                message: server_message
                    .unwrap_or_else(|| format!("Connection error ({})", other.as_u16())),
            },
        }
    }

    /// A request that produced no response.
    pub fn from_transport(error: &reqwest::Error) -> Self {
        let timed_out = error.is_timeout();
        let message = if timed_out {
            TIMEOUT_MESSAGE
        } else {
            NETWORK_MESSAGE
        };
        ApiError::ConnectivityFailure {
            message: message.to_string(),
            timed_out,
        }
    }

    pub fn malformed(detail: impl Into<String>) -> Self {
        ApiError::MalformedResponse {
            message: MALFORMED_MESSAGE.to_string(),
            detail: detail.into(),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }

    /// HTTP status behind the error, if the backend answered with one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::BadRequest { .. } => Some(400),
            ApiError::Unauthorized { .. } => Some(401),
            ApiError::Forbidden { .. } => Some(403),
            ApiError::NotFound { .. } => Some(404),
            ApiError::ServerError { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Stable name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::RequestRejected { .. } => "request_rejected",
            ApiError::BadRequest { .. } => "bad_request",
            ApiError::Unauthorized { .. } => "unauthorized",
            ApiError::Forbidden { .. } => "forbidden",
            ApiError::NotFound { .. } => "not_found",
            ApiError::ServerError { .. } => "server_error",
            ApiError::ConnectivityFailure { .. } => "connectivity_failure",
            ApiError::MalformedResponse { .. } => "malformed_response",
        }
    }
}
