//! Error types for the app version service

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("Database error: {0}")]
  Database(#[from] sea_orm::DbErr),

  #[error("App version not found")]
  NotFound,

  #[error("Invalid app version: {0}")]
  Invalid(String),
}

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      Error::Database(err) => {
        tracing::error!("Store query failed: {err}");
        (StatusCode::INTERNAL_SERVER_ERROR, "Database error".to_string())
      }
      Error::NotFound => (StatusCode::NOT_FOUND, self.to_string()),
      Error::Invalid(_) => (StatusCode::BAD_REQUEST, self.to_string()),
    };

    let body = json::json!({
      "success": false,
      "error": message
    });

    (status, Json(body)).into_response()
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_status_codes() {
    assert_eq!(Error::NotFound.into_response().status(), StatusCode::NOT_FOUND);
    assert_eq!(
      Error::Invalid("empty version".into()).into_response().status(),
      StatusCode::BAD_REQUEST
    );
    assert_eq!(
      Error::Database(sea_orm::DbErr::Custom("offline".into()))
        .into_response()
        .status(),
      StatusCode::INTERNAL_SERVER_ERROR
    );
  }
}
