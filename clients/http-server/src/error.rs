use actix_web::{
    http::{header, StatusCode},
    HttpResponse, ResponseError,
};
use database::service::ServiceError;
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// Body of every error response
#[derive(Serialize, Debug, ToSchema)]
pub struct ErrorDetail {
    #[schema(example = "person 65a1f0c2b3d4e5f601234567 not found")]
    pub detail: String,
}

/// Errors surfaced to HTTP clients, every variant maps to a status and a `{"detail": ..}` body
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Incorrect email or password")]
    Unauthorized,

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Internal(String),
}

impl From<ServiceError> for ApiError {
    fn from(error: ServiceError) -> Self {
        match error {
            ServiceError::Validation(e) => ApiError::Validation(e.to_string()),
            ServiceError::NotFound(_) => ApiError::NotFound(error.to_string()),
            // Driver details are logged by the service and never sent to clients
            ServiceError::Store(_) => ApiError::Internal("internal store error".to_string()),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut response = HttpResponse::build(self.status_code());

        if let ApiError::Unauthorized = self {
            response.insert_header((header::WWW_AUTHENTICATE, "Basic"));
        }

        response.json(ErrorDetail {
            detail: self.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use actix_web::body::MessageBody;
    use serde_json::json;
    use database::{model::validation::ValidationError, store::StoreError};

    use super::*;

    #[test]
    fn unauthorized_carries_basic_challenge() {
        let response = ApiError::Unauthorized.error_response();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Basic"
        );
    }

    #[test]
    fn service_errors_map_to_statuses() {
        let validation: ApiError =
            ServiceError::Validation(ValidationError::new("email", "bad")).into();
        let not_found: ApiError = ServiceError::NotFound("abc".to_string()).into();

        assert_eq!(validation.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(not_found.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(not_found.to_string(), "person abc not found");
    }

    #[test]
    fn store_errors_hide_driver_details() {
        let error: ApiError =
            ServiceError::Store(StoreError::MissingId("mongodb://user:pw@host".to_string())).into();

        let response = error.error_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = response.into_body().try_into_bytes().unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body, json!({ "detail": "internal store error" }));
    }
}
