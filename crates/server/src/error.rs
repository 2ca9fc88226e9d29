use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use tempocache_common::PayloadError;

/// Erros expostos pela camada HTTP.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("chave não encontrada: {0}")]
    NotFound(String),
    #[error(transparent)]
    BadRequest(#[from] PayloadError),
}

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_display() {
        let err = ApiError::NotFound("name".into());
        assert_eq!(err.to_string(), "chave não encontrada: name");
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn bad_request_from_payload() {
        let err: ApiError = PayloadError::NegativeTtl(-1).into();
        assert!(matches!(
            err,
            ApiError::BadRequest(PayloadError::NegativeTtl(-1))
        ));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "ttl negativo: -1");
    }
}
