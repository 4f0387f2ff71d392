use super::repository;
use crate::domain::a003_warehouse;
use crate::shared::error::ServiceError;
use crate::shared::list_filter::{apply_list_query, DocumentRow};
use crate::shared::numbering::{next_document_no, NUMBERING_LOCK};
use chrono::NaiveDate;
use contracts::domain::a005_transfer::aggregate::{Transfer, TransferDto};
use contracts::domain::common::{DocumentLine, DocumentStatus};
use contracts::shared::list_query::ListQuery;
use uuid::Uuid;

pub const NUMBER_PREFIX: &str = "TRF";

impl DocumentRow for Transfer {
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
        let mut fields = vec![self.kind.as_str()];
        if let Some(comment) = self.base.comment.as_deref() {
            fields.push(comment);
        }
        fields
    }
}

fn apply_lines(doc: &mut Transfer, lines: Vec<DocumentLine>) -> Result<(), ServiceError> {
    if !doc.status.is_editable() {
        return Err(ServiceError::InvalidTransition(format!(
            "La transferencia {} está {} y no se puede modificar",
            doc.document_no, doc.status
        )));
    }
    doc.set_lines(lines).map_err(ServiceError::Validation)
}

fn apply_status(doc: &mut Transfer, next: DocumentStatus) -> Result<(), ServiceError> {
    doc.change_status(next)
        .map_err(ServiceError::InvalidTransition)
}

/// Оба склада должны существовать
async fn ensure_warehouses(doc: &Transfer) -> anyhow::Result<()> {
    for (id, role) in [
        (&doc.origin_warehouse_id, "origen"),
        (&doc.destination_warehouse_id, "destino"),
    ] {
        if a003_warehouse::service::get_by_ref(id).await.is_err() {
            return Err(
                ServiceError::Validation(format!("El almacén de {} no existe", role)).into(),
            );
        }
    }
    Ok(())
}

pub async fn create(dto: TransferDto) -> anyhow::Result<Transfer> {
    let _guard = NUMBERING_LOCK.lock().await;
    let numbers = repository::list_document_numbers().await?;
    let document_no = next_document_no(NUMBER_PREFIX, numbers.iter().map(String::as_str));

    let mut aggregate = Transfer::new_for_insert(
        document_no,
        dto.document_date,
        dto.origin_warehouse_id.clone(),
        dto.destination_warehouse_id.clone(),
        dto.kind,
        None,
        dto.comment.clone(),
    );
    // update() обнуляет дату возврата у обычного перемещения
    aggregate.update(&dto);
    if !dto.lines.is_empty() {
        apply_lines(&mut aggregate, dto.lines)?;
    }
    aggregate.validate().map_err(ServiceError::Validation)?;
    ensure_warehouses(&aggregate).await?;

    aggregate.before_write();
    repository::insert(&aggregate).await?;
    tracing::info!(
        "Transfer created: {} ({})",
        aggregate.document_no,
        aggregate.kind.as_str()
    );
    Ok(aggregate)
}

pub async fn update(dto: TransferDto) -> anyhow::Result<Transfer> {
    let id = dto
        .id
        .as_deref()
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| ServiceError::Validation("Identificador inválido".into()))?;

    let mut aggregate = get(id).await?;
    if !aggregate.status.is_editable() {
        return Err(ServiceError::InvalidTransition(format!(
            "La transferencia {} está {} y no se puede modificar",
            aggregate.document_no, aggregate.status
        ))
        .into());
    }
    aggregate.update(&dto);
    aggregate.validate().map_err(ServiceError::Validation)?;
    ensure_warehouses(&aggregate).await?;

    aggregate.before_write();
    aggregate.base.metadata.increment_version();
    repository::update(&aggregate).await?;
    Ok(aggregate)
}

pub async fn upsert(dto: TransferDto) -> anyhow::Result<Transfer> {
    if dto.id.is_some() {
        update(dto).await
    } else {
        create(dto).await
    }
}

pub async fn get(id: Uuid) -> anyhow::Result<Transfer> {
    repository::get_by_id(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("Transferencia".into()).into())
}

pub async fn list(query: &ListQuery) -> anyhow::Result<Vec<Transfer>> {
    Ok(apply_list_query(repository::list_all().await?, query))
}

/// GET by-warehouse/:id; неизвестный склад дает 404
pub async fn list_by_warehouse(warehouse_id: Uuid) -> anyhow::Result<Vec<Transfer>> {
    a003_warehouse::service::get(warehouse_id).await?;
    let items = repository::list_by_warehouse(&warehouse_id.to_string()).await?;
    Ok(apply_list_query(items, &ListQuery::default()))
}

pub async fn get_lines(id: Uuid) -> anyhow::Result<Vec<DocumentLine>> {
    Ok(get(id).await?.lines)
}

pub async fn set_lines(id: Uuid, lines: Vec<DocumentLine>) -> anyhow::Result<Transfer> {
    let mut aggregate = get(id).await?;
    apply_lines(&mut aggregate, lines)?;

    aggregate.before_write();
    aggregate.base.metadata.increment_version();
    repository::update(&aggregate).await?;
    tracing::info!(
        "Transfer {}: {} lines saved",
        aggregate.document_no,
        aggregate.lines.len()
    );
    Ok(aggregate)
}

pub async fn change_status(id: Uuid, next: DocumentStatus) -> anyhow::Result<Transfer> {
    let mut aggregate = get(id).await?;
    let previous = aggregate.status;
    apply_status(&mut aggregate, next)?;

    aggregate.before_write();
    aggregate.base.metadata.increment_version();
    repository::update(&aggregate).await?;
    tracing::info!("Transfer {}: {} -> {}", aggregate.document_no, previous, next);
    Ok(aggregate)
}

pub async fn delete(id: Uuid) -> anyhow::Result<()> {
    let aggregate = get(id).await?;
    if !aggregate.status.is_editable() {
        return Err(ServiceError::InvalidTransition(format!(
            "Solo se puede eliminar una transferencia pendiente ({} está {})",
            aggregate.document_no, aggregate.status
        ))
        .into());
    }
    if !repository::soft_delete(id).await? {
        return Err(ServiceError::NotFound("Transferencia".into()).into());
    }
    tracing::info!("Transfer deleted: {}", aggregate.document_no);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a005_transfer::aggregate::TransferKind;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, day).unwrap()
    }

    fn loan() -> Transfer {
        Transfer::new_for_insert(
            "TRF-000001".into(),
            date(10),
            "a".into(),
            "b".into(),
            TransferKind::Prestamo,
            Some(date(20)),
            Some("Mezcladora para vaciado".into()),
        )
    }

    fn line(quantity: f64) -> DocumentLine {
        DocumentLine {
            resource_id: "r1".into(),
            resource_code: "SRV-001".into(),
            resource_description: "Alquiler de mezcladora".into(),
            unit: "día".into(),
            quantity,
            unit_cost: 120.0,
        }
    }

    #[test]
    fn test_search_fields_include_kind_and_comment() {
        let doc = loan();
        let fields = doc.search_fields();
        assert!(fields.contains(&"Préstamo"));
        assert!(fields.contains(&"Mezcladora para vaciado"));
    }

    #[test]
    fn test_completed_transfer_is_locked() {
        let mut doc = loan();
        apply_lines(&mut doc, vec![line(5.0)]).unwrap();
        apply_status(&mut doc, DocumentStatus::Aprobado).unwrap();
        apply_status(&mut doc, DocumentStatus::Completado).unwrap();

        assert!(matches!(
            apply_lines(&mut doc, vec![line(1.0)]),
            Err(ServiceError::InvalidTransition(_))
        ));
        assert!(matches!(
            apply_status(&mut doc, DocumentStatus::Pendiente),
            Err(ServiceError::InvalidTransition(_))
        ));
    }

    #[test]
    fn test_update_drops_return_date_for_plain_transfer() {
        let mut doc = loan();
        let dto = TransferDto {
            id: None,
            document_date: date(10),
            origin_warehouse_id: "a".into(),
            destination_warehouse_id: "b".into(),
            kind: TransferKind::Transferencia,
            return_date: Some(date(30)),
            comment: None,
            lines: vec![],
        };
        doc.update(&dto);
        assert_eq!(doc.return_date, None);
        assert!(doc.validate().is_ok());
    }
}
