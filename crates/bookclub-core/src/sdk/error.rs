//! Map SDK load errors
//!
//! A failed script load carries no reason of its own, so the loader asks the
//! endpoint again and classifies the HTTP status it gets back. Messages are
//! user-facing and end up in an error modal.

use thiserror::Error;

/// Why the map SDK could not be loaded
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SdkLoadError {
    /// 400
    #[error("잘못된 요청입니다. 지도 SDK 요청 주소를 확인해주세요. (HTTP 400)")]
    BadRequest,

    /// 401
    #[error("인증 오류: 지도 앱 키가 유효하지 않습니다. (HTTP 401)")]
    Unauthorized,

    /// 403
    #[error("접근 거부: 등록되지 않은 도메인이거나 지도 서비스가 비활성화되어 있습니다. (HTTP 403)")]
    Forbidden,

    /// 429
    #[error("요청 한도 초과: 잠시 후 다시 시도해주세요. (HTTP 429)")]
    RateLimited,

    /// 500
    #[error("지도 서버 오류가 발생했습니다. (HTTP 500)")]
    ServerError,

    /// 502
    #[error("지도 게이트웨이 오류가 발생했습니다. (HTTP 502)")]
    GatewayError,

    /// 503
    #[error("지도 서비스 이용 불가: 잠시 후 다시 시도해주세요. (HTTP 503)")]
    ServiceUnavailable,

    /// Any other status, including 2xx when the script itself failed to run
    #[error("지도 SDK를 불러오지 못했습니다. (HTTP {0})")]
    UnknownHttpStatus(u16),

    /// The diagnostic request could not reach the endpoint at all
    #[error("네트워크 오류: 지도 서버에 연결할 수 없습니다. 인터넷 연결을 확인해주세요.")]
    NetworkUnreachable,
}

impl SdkLoadError {
    /// Classify the status returned by the diagnostic request
    pub fn from_status(status: u16) -> Self {
        match status {
            400 => Self::BadRequest,
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            429 => Self::RateLimited,
            500 => Self::ServerError,
            502 => Self::GatewayError,
            503 => Self::ServiceUnavailable,
            other => Self::UnknownHttpStatus(other),
        }
    }

    /// HTTP status behind this error, if the endpoint answered
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::BadRequest => Some(400),
            Self::Unauthorized => Some(401),
            Self::Forbidden => Some(403),
            Self::RateLimited => Some(429),
            Self::ServerError => Some(500),
            Self::GatewayError => Some(502),
            Self::ServiceUnavailable => Some(503),
            Self::UnknownHttpStatus(status) => Some(*status),
            Self::NetworkUnreachable => None,
        }
    }
}

/// The script element reported an error event
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Map SDK script failed to load: {0}")]
pub struct ScriptLoadFailed(pub String);

/// The diagnostic status request itself failed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Status probe failed: {0}")]
pub struct ProbeError(pub String);
