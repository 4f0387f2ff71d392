//! Ошибки master–detail потока.
//!
//! `ValidationError`: локальная, блокирует действие и показывается рядом с полем.
//! `LoadError`: ошибка обмена с сервером, показывается вместо затронутой области.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Primero seleccione la fecha de inicio")]
    EndWithoutStart,

    #[error("La fecha final no puede ser anterior a la fecha de inicio")]
    EndBeforeStart,

    #[error("La fecha no puede ser posterior a hoy")]
    DateInFuture,

    #[error("La cantidad debe ser un número mayor que cero")]
    InvalidQuantity,

    #[error("El costo unitario debe ser un número no negativo")]
    InvalidUnitCost,

    #[error("El recurso ya está en la lista")]
    DuplicateRow,

    #[error("Fila no encontrada")]
    UnknownRow,

    #[error("No hay documento seleccionado")]
    NoSelection,

    #[error("El detalle aún no se ha cargado")]
    DetailNotReady,

    #[error("No hay recursos para guardar")]
    NothingToSave,

    #[error("Ya se está guardando")]
    SaveInFlight,

    #[error("El documento no se puede modificar en estado {0}")]
    NotEditable(String),

    #[error("{0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("Error de red: {0}")]
    Network(String),

    #[error("Error del servidor ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("Registro no encontrado")]
    NotFound,

    #[error("Respuesta inválida: {0}")]
    Decode(String),
}

impl LoadError {
    /// Ошибка по HTTP-статусу неуспешного ответа; тело ответа: текст сервера
    pub fn from_status(status: u16, body: &str) -> Self {
        if status == 404 {
            return LoadError::NotFound;
        }
        LoadError::Server {
            status,
            message: extract_server_message(body),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, LoadError::NotFound)
    }
}

/// Сервер отвечает `{"error": "..."}`; если тело другое, возвращаем его как есть
fn extract_server_message(body: &str) -> String {
    #[derive(serde::Deserialize)]
    struct ErrorResponse {
        error: Option<String>,
    }

    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(ErrorResponse { error: Some(msg) }) => msg,
        _ if body.trim().is_empty() => "sin detalle".to_string(),
        _ => body.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_404_maps_to_not_found() {
        assert_eq!(LoadError::from_status(404, ""), LoadError::NotFound);
        assert!(LoadError::from_status(404, "{}").is_not_found());
    }

    #[test]
    fn test_server_message_is_extracted_from_json() {
        let err = LoadError::from_status(409, r#"{"error":"No se puede pasar de Anulado a Aprobado"}"#);
        assert_eq!(
            err,
            LoadError::Server {
                status: 409,
                message: "No se puede pasar de Anulado a Aprobado".into()
            }
        );
    }

    #[test]
    fn test_plain_body_is_kept() {
        let err = LoadError::from_status(500, "  boom ");
        assert_eq!(err.to_string(), "Error del servidor (500): boom");
        let empty = LoadError::from_status(502, "");
        assert_eq!(empty.to_string(), "Error del servidor (502): sin detalle");
    }
}
