use crate::domain::common::{
    lines_total, validate_lines, AggregateId, AggregateRoot, BaseAggregate, DocumentLine,
    DocumentStatus, EntityMetadata,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

crate::uuid_aggregate_id!(
    /// ID типа для документа Solicitud
    RequisitionId
);

/// Документ Solicitud (a004): заявка на материалы для объекта
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Requisition {
    #[serde(flatten)]
    pub base: BaseAggregate<RequisitionId>,

    /// Номер документа (напр. "SOL-000012")
    pub document_no: String,

    /// Дата документа
    pub document_date: NaiveDate,

    /// Объект / проект
    pub project: String,

    /// Кто запросил
    pub requested_by: String,

    /// Склад или площадка назначения (a003_warehouse)
    pub warehouse_id: String,

    pub status: DocumentStatus,

    /// Табличная часть «Recursos»
    pub lines: Vec<DocumentLine>,
}

impl Requisition {
    pub fn new_for_insert(
        document_no: String,
        document_date: NaiveDate,
        project: String,
        requested_by: String,
        warehouse_id: String,
        comment: Option<String>,
    ) -> Self {
        let description = format!("{} - {}", document_no, project);
        let mut base =
            BaseAggregate::new(RequisitionId::new_v4(), document_no.clone(), description);
        base.set_comment(comment);

        Self {
            base,
            document_no,
            document_date,
            project,
            requested_by,
            warehouse_id,
            status: DocumentStatus::Pendiente,
            lines: Vec::new(),
        }
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    /// Обновить шапку документа из DTO (строки меняются через set_lines)
    pub fn update(&mut self, dto: &RequisitionDto) {
        self.document_date = dto.document_date;
        self.project = dto.project.clone();
        self.requested_by = dto.requested_by.clone();
        self.warehouse_id = dto.warehouse_id.clone();
        self.base.set_comment(dto.comment.clone());
        self.base.description = format!("{} - {}", self.document_no, self.project);
    }

    /// Заменить табличную часть. Только для документов в статусе Pendiente
    pub fn set_lines(&mut self, lines: Vec<DocumentLine>) -> Result<(), String> {
        if !self.status.is_editable() {
            return Err(format!(
                "La solicitud {} está {} y no se puede modificar",
                self.document_no, self.status
            ));
        }
        validate_lines(&lines)?;
        self.lines = lines;
        Ok(())
    }

    pub fn change_status(&mut self, next: DocumentStatus) -> Result<(), String> {
        if !self.status.can_transition_to(next) {
            return Err(format!("No se puede pasar de {} a {}", self.status, next));
        }
        if next == DocumentStatus::Aprobado && self.lines.is_empty() {
            return Err("No se puede aprobar una solicitud sin recursos".into());
        }
        self.status = next;
        self.base.metadata.is_posted = next == DocumentStatus::Completado;
        Ok(())
    }

    pub fn total(&self) -> f64 {
        lines_total(&self.lines)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.document_no.trim().is_empty() {
            return Err("El número de documento no puede estar vacío".into());
        }
        if self.project.trim().is_empty() {
            return Err("El proyecto es obligatorio".into());
        }
        if self.requested_by.trim().is_empty() {
            return Err("El solicitante es obligatorio".into());
        }
        validate_lines(&self.lines)
    }

    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

impl AggregateRoot for Requisition {
    type Id = RequisitionId;

    fn id(&self) -> Self::Id {
        self.base.id
    }

    fn code(&self) -> &str {
        &self.base.code
    }

    fn description(&self) -> &str {
        &self.base.description
    }

    fn metadata(&self) -> &EntityMetadata {
        &self.base.metadata
    }

    fn metadata_mut(&mut self) -> &mut EntityMetadata {
        &mut self.base.metadata
    }

    fn aggregate_index() -> &'static str {
        "a004"
    }

    fn collection_name() -> &'static str {
        "requisition"
    }

    fn element_name() -> &'static str {
        "Solicitud"
    }

    fn list_name() -> &'static str {
        "Solicitudes"
    }
}

/// DTO шапки документа Solicitud
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RequisitionDto {
    pub id: Option<String>,
    pub document_date: NaiveDate,
    pub project: String,
    pub requested_by: String,
    pub warehouse_id: String,
    pub comment: Option<String>,
    #[serde(default)]
    pub lines: Vec<DocumentLine>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(id: &str, quantity: f64, unit_cost: f64) -> DocumentLine {
        DocumentLine {
            resource_id: id.into(),
            resource_code: format!("REC-{}", id),
            resource_description: format!("Recurso {}", id),
            unit: "und".into(),
            quantity,
            unit_cost,
        }
    }

    fn sample() -> Requisition {
        Requisition::new_for_insert(
            "SOL-000001".into(),
            NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            "Edificio Los Álamos".into(),
            "Ing. Quispe".into(),
            "wh-1".into(),
            None,
        )
    }

    #[test]
    fn test_new_requisition_is_pending_and_empty() {
        let r = sample();
        assert_eq!(r.status, DocumentStatus::Pendiente);
        assert_eq!(r.total(), 0.0);
        assert_eq!(r.base.code, "SOL-000001");
        assert!(r.validate().is_ok());
    }

    #[test]
    fn test_cannot_approve_without_lines() {
        let mut r = sample();
        assert!(r.change_status(DocumentStatus::Aprobado).is_err());
        r.set_lines(vec![line("a", 2.0, 5.0)]).unwrap();
        assert!(r.change_status(DocumentStatus::Aprobado).is_ok());
        assert_eq!(r.total(), 10.0);
    }

    #[test]
    fn test_lines_are_frozen_after_approval() {
        let mut r = sample();
        r.set_lines(vec![line("a", 1.0, 1.0)]).unwrap();
        r.change_status(DocumentStatus::Aprobado).unwrap();
        assert!(r.set_lines(vec![line("b", 1.0, 1.0)]).is_err());
        assert_eq!(r.lines[0].resource_id, "a");
    }

    #[test]
    fn test_completion_marks_posted() {
        let mut r = sample();
        r.set_lines(vec![line("a", 1.0, 1.0)]).unwrap();
        r.change_status(DocumentStatus::Aprobado).unwrap();
        r.change_status(DocumentStatus::Completado).unwrap();
        assert!(r.base.metadata.is_posted);
        assert!(r.change_status(DocumentStatus::Anulado).is_err());
    }

    #[test]
    fn test_serialized_date_is_iso() {
        let r = sample();
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["document_date"], "2024-01-10");
        assert_eq!(json["status"], "Pendiente");
    }
}
