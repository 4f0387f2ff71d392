//! Ошибки сервисов и их HTTP-представление.
//!
//! Сервисы возвращают `anyhow::Result`; доменные отказы кладутся туда как
//! `ServiceError`, остальное считается внутренней ошибкой.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Данные не прошли проверку агрегата
    #[error("{0}")]
    Validation(String),

    #[error("{0} no encontrado")]
    NotFound(String),

    /// Недопустимая смена статуса или правка закрытого документа
    #[error("{0}")]
    InvalidTransition(String),
}

impl ServiceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::InvalidTransition(_) => StatusCode::CONFLICT,
        }
    }
}

/// Ошибка обработчика: тело `{"error": "..."}`
#[derive(Debug)]
pub struct ApiError(anyhow::Error);

impl<E> From<E> for ApiError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        ApiError(err.into())
    }
}

pub type ApiResult<T> = Result<Json<T>, ApiError>;

/// HTTP-статус и текст для клиента
fn describe(err: &anyhow::Error) -> (StatusCode, String) {
    match err.downcast_ref::<ServiceError>() {
        Some(service_error) => (service_error.status_code(), service_error.to_string()),
        None => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Error interno del servidor".to_string(),
        ),
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = describe(&self.0);
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("Request failed: {:#}", self.0);
        } else {
            tracing::debug!("Request rejected ({}): {}", status.as_u16(), message);
        }
        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Идентификатор из пути запроса
pub fn parse_id(id: &str) -> Result<Uuid, ServiceError> {
    Uuid::parse_str(id).map_err(|_| ServiceError::Validation(format!("Identificador inválido: {}", id)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_errors_map_to_statuses() {
        let cases = [
            (ServiceError::Validation("x".into()), StatusCode::BAD_REQUEST),
            (ServiceError::NotFound("Recurso".into()), StatusCode::NOT_FOUND),
            (ServiceError::InvalidTransition("x".into()), StatusCode::CONFLICT),
        ];
        for (err, expected) in cases {
            let (status, _) = describe(&anyhow::Error::from(err));
            assert_eq!(status, expected);
        }
    }

    #[test]
    fn test_other_errors_are_internal_and_hidden() {
        let (status, message) = describe(&anyhow::anyhow!("disk I/O error"));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!message.contains("disk"));
    }

    #[test]
    fn test_message_keeps_domain_text() {
        let err = anyhow::Error::from(ServiceError::InvalidTransition(
            "No se puede pasar de Anulado a Aprobado".into(),
        ));
        let (_, message) = describe(&err);
        assert_eq!(message, "No se puede pasar de Anulado a Aprobado");

        let (_, message) = describe(&ServiceError::NotFound("Recurso".into()).into());
        assert_eq!(message, "Recurso no encontrado");
    }

    #[test]
    fn test_into_response_sets_status() {
        let response = ApiError::from(ServiceError::NotFound("Almacén".into())).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_parse_id() {
        let id = Uuid::new_v4();
        assert_eq!(parse_id(&id.to_string()).unwrap(), id);
        assert!(matches!(parse_id("abc"), Err(ServiceError::Validation(_))));
    }
}
