use super::repository;
use crate::domain::a003_warehouse;
use crate::shared::error::ServiceError;
use crate::shared::list_filter::{apply_list_query, DocumentRow};
use crate::shared::numbering::{next_document_no, NUMBERING_LOCK};
use chrono::NaiveDate;
use contracts::domain::a004_requisition::aggregate::{Requisition, RequisitionDto};
use contracts::domain::common::{DocumentLine, DocumentStatus};
use contracts::shared::list_query::ListQuery;
use uuid::Uuid;

pub const NUMBER_PREFIX: &str = "SOL";

impl DocumentRow for Requisition {
    fn document_no(&self) -> &str {
        &self.document_no
    }

    fn document_date(&self) -> NaiveDate {
        self.document_date
    }

    fn status(&self) -> DocumentStatus {
        self.status
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.project.as_str(), self.requested_by.as_str()]
    }
}

/// Замена строк: закрытый документ дает конфликт, плохие строки: ошибку данных
fn apply_lines(doc: &mut Requisition, lines: Vec<DocumentLine>) -> Result<(), ServiceError> {
    if !doc.status.is_editable() {
        return Err(ServiceError::InvalidTransition(format!(
            "La solicitud {} está {} y no se puede modificar",
            doc.document_no, doc.status
        )));
    }
    doc.set_lines(lines).map_err(ServiceError::Validation)
}

fn apply_status(doc: &mut Requisition, next: DocumentStatus) -> Result<(), ServiceError> {
    doc.change_status(next)
        .map_err(ServiceError::InvalidTransition)
}

async fn ensure_warehouse(warehouse_id: &str) -> anyhow::Result<()> {
    if warehouse_id.trim().is_empty() {
        return Ok(());
    }
    if a003_warehouse::service::get_by_ref(warehouse_id).await.is_err() {
        return Err(ServiceError::Validation("El almacén de destino no existe".into()).into());
    }
    Ok(())
}

pub async fn create(dto: RequisitionDto) -> anyhow::Result<Requisition> {
    ensure_warehouse(&dto.warehouse_id).await?;

    let _guard = NUMBERING_LOCK.lock().await;
    let numbers = repository::list_document_numbers().await?;
    let document_no = next_document_no(NUMBER_PREFIX, numbers.iter().map(String::as_str));

    let mut aggregate = Requisition::new_for_insert(
        document_no,
        dto.document_date,
        dto.project,
        dto.requested_by,
        dto.warehouse_id,
        dto.comment,
    );
    if !dto.lines.is_empty() {
        apply_lines(&mut aggregate, dto.lines)?;
    }
    aggregate.validate().map_err(ServiceError::Validation)?;

    aggregate.before_write();
    repository::insert(&aggregate).await?;
    tracing::info!("Requisition created: {}", aggregate.document_no);
    Ok(aggregate)
}

/// Правка шапки; строки меняются через `set_lines`
pub async fn update(dto: RequisitionDto) -> anyhow::Result<Requisition> {
    let id = dto
        .id
        .as_deref()
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| ServiceError::Validation("Identificador inválido".into()))?;

    let mut aggregate = get(id).await?;
    if !aggregate.status.is_editable() {
        return Err(ServiceError::InvalidTransition(format!(
            "La solicitud {} está {} y no se puede modificar",
            aggregate.document_no, aggregate.status
        ))
        .into());
    }
    ensure_warehouse(&dto.warehouse_id).await?;
    aggregate.update(&dto);
    aggregate.validate().map_err(ServiceError::Validation)?;

    aggregate.before_write();
    aggregate.base.metadata.increment_version();
    repository::update(&aggregate).await?;
    Ok(aggregate)
}

pub async fn upsert(dto: RequisitionDto) -> anyhow::Result<Requisition> {
    if dto.id.is_some() {
        update(dto).await
    } else {
        create(dto).await
    }
}

pub async fn get(id: Uuid) -> anyhow::Result<Requisition> {
    repository::get_by_id(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("Solicitud".into()).into())
}

pub async fn list(query: &ListQuery) -> anyhow::Result<Vec<Requisition>> {
    Ok(apply_list_query(repository::list_all().await?, query))
}

pub async fn get_lines(id: Uuid) -> anyhow::Result<Vec<DocumentLine>> {
    Ok(get(id).await?.lines)
}

pub async fn set_lines(id: Uuid, lines: Vec<DocumentLine>) -> anyhow::Result<Requisition> {
    let mut aggregate = get(id).await?;
    apply_lines(&mut aggregate, lines)?;

    aggregate.before_write();
    aggregate.base.metadata.increment_version();
    repository::update(&aggregate).await?;
    tracing::info!(
        "Requisition {}: {} lines saved",
        aggregate.document_no,
        aggregate.lines.len()
    );
    Ok(aggregate)
}

pub async fn change_status(id: Uuid, next: DocumentStatus) -> anyhow::Result<Requisition> {
    let mut aggregate = get(id).await?;
    let previous = aggregate.status;
    apply_status(&mut aggregate, next)?;

    aggregate.before_write();
    aggregate.base.metadata.increment_version();
    repository::update(&aggregate).await?;
    tracing::info!("Requisition {}: {} -> {}", aggregate.document_no, previous, next);
    Ok(aggregate)
}

/// Удалить можно только документ в статусе Pendiente
pub async fn delete(id: Uuid) -> anyhow::Result<()> {
    let aggregate = get(id).await?;
    if !aggregate.status.is_editable() {
        return Err(ServiceError::InvalidTransition(format!(
            "Solo se puede eliminar una solicitud pendiente ({} está {})",
            aggregate.document_no, aggregate.status
        ))
        .into());
    }
    if !repository::soft_delete(id).await? {
        return Err(ServiceError::NotFound("Solicitud".into()).into());
    }
    tracing::info!("Requisition deleted: {}", aggregate.document_no);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(id: &str, quantity: f64) -> DocumentLine {
        DocumentLine {
            resource_id: id.into(),
            resource_code: format!("REC-{}", id),
            resource_description: format!("Recurso {}", id),
            unit: "und".into(),
            quantity,
            unit_cost: 10.0,
        }
    }

    fn requisition() -> Requisition {
        Requisition::new_for_insert(
            "SOL-000001".into(),
            NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
            "Edificio Miraflores".into(),
            "Ing. Quispe".into(),
            String::new(),
            None,
        )
    }

    #[test]
    fn test_lines_of_pending_requisition_are_replaced() {
        let mut doc = requisition();
        apply_lines(&mut doc, vec![line("1", 2.0), line("2", 1.0)]).unwrap();
        assert_eq!(doc.lines.len(), 2);
        assert_eq!(doc.total(), 30.0);
    }

    #[test]
    fn test_bad_lines_are_validation_errors() {
        let mut doc = requisition();
        let err = apply_lines(&mut doc, vec![line("1", 0.0)]).unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        assert!(doc.lines.is_empty());
    }

    #[test]
    fn test_closed_requisition_rejects_lines_with_conflict() {
        let mut doc = requisition();
        apply_lines(&mut doc, vec![line("1", 1.0)]).unwrap();
        apply_status(&mut doc, DocumentStatus::Aprobado).unwrap();

        let err = apply_lines(&mut doc, vec![line("2", 1.0)]).unwrap_err();
        assert!(matches!(err, ServiceError::InvalidTransition(_)));
    }

    #[test]
    fn test_status_rules() {
        let mut doc = requisition();
        // пустую заявку утвердить нельзя
        assert!(matches!(
            apply_status(&mut doc, DocumentStatus::Aprobado),
            Err(ServiceError::InvalidTransition(_))
        ));
        apply_lines(&mut doc, vec![line("1", 1.0)]).unwrap();
        apply_status(&mut doc, DocumentStatus::Aprobado).unwrap();
        apply_status(&mut doc, DocumentStatus::Completado).unwrap();
        assert!(doc.base.metadata.is_posted);
        assert!(apply_status(&mut doc, DocumentStatus::Anulado).is_err());
    }

    #[test]
    fn test_search_covers_project_and_requester() {
        let doc = requisition();
        assert!(doc.search_fields().contains(&"Ing. Quispe"));
        assert!(doc.search_fields().contains(&"Edificio Miraflores"));
    }
}
