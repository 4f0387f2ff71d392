use serde::{Deserialize, Serialize};

/// Статус документа. Сериализуется строками интерфейса ("Pendiente", "Completado"...)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DocumentStatus {
    #[default]
    Pendiente,
    Aprobado,
    Completado,
    Anulado,
}

impl DocumentStatus {
    pub const ALL: [DocumentStatus; 4] = [
        DocumentStatus::Pendiente,
        DocumentStatus::Aprobado,
        DocumentStatus::Completado,
        DocumentStatus::Anulado,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentStatus::Pendiente => "Pendiente",
            DocumentStatus::Aprobado => "Aprobado",
            DocumentStatus::Completado => "Completado",
            DocumentStatus::Anulado => "Anulado",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
    }

    /// Допустимые переходы: Pendiente → Aprobado | Anulado, Aprobado → Completado | Anulado
    pub fn can_transition_to(&self, next: DocumentStatus) -> bool {
        matches!(
            (self, next),
            (DocumentStatus::Pendiente, DocumentStatus::Aprobado)
                | (DocumentStatus::Pendiente, DocumentStatus::Anulado)
                | (DocumentStatus::Aprobado, DocumentStatus::Completado)
                | (DocumentStatus::Aprobado, DocumentStatus::Anulado)
        )
    }

    /// Строки документа можно редактировать только до утверждения
    pub fn is_editable(&self) -> bool {
        matches!(self, DocumentStatus::Pendiente)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, DocumentStatus::Completado | DocumentStatus::Anulado)
    }
}

/// Тело запроса POST /api/<документ>/:id/status
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatusChangeRequest {
    pub status: DocumentStatus,
}

impl std::fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_as_ui_string() {
        let json = serde_json::to_string(&DocumentStatus::Completado).unwrap();
        assert_eq!(json, "\"Completado\"");
        let parsed: DocumentStatus = serde_json::from_str("\"Pendiente\"").unwrap();
        assert_eq!(parsed, DocumentStatus::Pendiente);
    }

    #[test]
    fn test_transitions() {
        use DocumentStatus::*;
        assert!(Pendiente.can_transition_to(Aprobado));
        assert!(Pendiente.can_transition_to(Anulado));
        assert!(!Pendiente.can_transition_to(Completado));
        assert!(Aprobado.can_transition_to(Completado));
        assert!(!Completado.can_transition_to(Anulado));
        assert!(!Anulado.can_transition_to(Pendiente));
        assert!(Completado.is_terminal());
        assert!(!Aprobado.is_editable());
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(DocumentStatus::parse("aprobado"), Some(DocumentStatus::Aprobado));
        assert_eq!(DocumentStatus::parse(" Anulado "), Some(DocumentStatus::Anulado));
        assert_eq!(DocumentStatus::parse("desconocido"), None);
    }
}
