use serde::{Deserialize, Serialize};

// Kode respons; nilai numeriknya sekaligus menjadi status HTTP
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Success = 200,
    Created = 201,
    BadRequest = 400,
    Unauthorized = 401,
    Forbidden = 403,
    NotFound = 404,
    InternalServerError = 500,
}

// Struktur respons API terpadu: {code, status, message, data?, error?}
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub code: i32,
    pub status: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Success as i32,
            status: "success".to_string(),
            message: message.into(),
            data: Some(data),
            error: None,
            timestamp: chrono::Utc::now(),
        }
    }

    pub fn created(data: T, message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Created as i32,
            status: "success".to_string(),
            message: message.into(),
            data: Some(data),
            error: None,
            timestamp: chrono::Utc::now(),
        }
    }
}

impl ApiResponse<()> {
    pub fn success_empty(message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Success as i32,
            status: "success".to_string(),
            message: message.into(),
            data: None,
            error: None,
            timestamp: chrono::Utc::now(),
        }
    }

    pub fn error_empty(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code as i32,
            status: "error".to_string(),
            message: message.into(),
            data: None,
            error: None,
            timestamp: chrono::Utc::now(),
        }
    }

    /// Respons error dengan penyebab teknis (untuk visibilitas operator)
    pub fn error_detail(
        code: ErrorCode,
        message: impl Into<String>,
        cause: impl Into<String>,
    ) -> Self {
        Self {
            code: code as i32,
            status: "error".to_string(),
            message: message.into(),
            data: None,
            error: Some(cause.into()),
            timestamp: chrono::Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope() {
        let resp = ApiResponse::success(1, "ok");
        assert_eq!(resp.code, 200);
        assert_eq!(resp.status, "success");
        assert_eq!(resp.data, Some(1));
        assert!(resp.error.is_none());
    }

    #[test]
    fn test_error_envelope_mirrors_http_code() {
        let resp = ApiResponse::error_detail(ErrorCode::NotFound, "tidak ditemukan", "cause");
        assert_eq!(resp.code, 404);
        assert_eq!(resp.status, "error");
        assert_eq!(resp.error.as_deref(), Some("cause"));
    }
}
