use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use sockwarehouse_core::DomainError;
use sockwarehouse_infra::ServiceError;

pub fn service_error_to_response(err: ServiceError) -> axum::response::Response {
    match err {
        ServiceError::Domain(e) => domain_error_to_response(e),
        ServiceError::Store(e) => {
            tracing::error!(error = %e, "stock store failure");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "store_error", e.to_string())
        }
        e @ ServiceError::BatchProcessing(_) => {
            json_error(StatusCode::BAD_REQUEST, "batch_processing_failure", e.to_string())
        }
    }
}

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    let message = err.to_string();
    match err {
        DomainError::InvalidInput(_) => json_error(StatusCode::BAD_REQUEST, "invalid_input", message),
        DomainError::InvalidId(_) => json_error(StatusCode::BAD_REQUEST, "invalid_input", message),
        DomainError::InvalidOperation(_) => {
            json_error(StatusCode::BAD_REQUEST, "invalid_operation", message)
        }
        DomainError::NotFound(_) => json_error(StatusCode::NOT_FOUND, "not_found", message),
        DomainError::InsufficientStock { .. } => {
            json_error(StatusCode::UNPROCESSABLE_ENTITY, "insufficient_stock", message)
        }
    }
}

pub fn invalid_input(message: impl Into<String>) -> axum::response::Response {
    json_error(StatusCode::BAD_REQUEST, "invalid_input", message)
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

/// Batch uploads answer with plain text, on success and on failure.
pub fn batch_failure(message: impl core::fmt::Display) -> axum::response::Response {
    (
        StatusCode::BAD_REQUEST,
        format!("Failed to process file: {message}"),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_domain_errors_to_statuses() {
        let cases = [
            (DomainError::invalid_input("x"), StatusCode::BAD_REQUEST),
            (DomainError::invalid_operation("x"), StatusCode::BAD_REQUEST),
            (DomainError::not_found("x"), StatusCode::NOT_FOUND),
            (DomainError::insufficient_stock(1, 2), StatusCode::UNPROCESSABLE_ENTITY),
        ];
        for (err, status) in cases {
            assert_eq!(domain_error_to_response(err).status(), status);
        }
    }

    #[test]
    fn store_errors_are_internal() {
        let err = ServiceError::Store(sockwarehouse_infra::StoreError::Backend("down".into()));
        assert_eq!(
            service_error_to_response(err).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
