use super::repository;
use crate::domain::{a002_supplier, a003_warehouse, a004_requisition};
use crate::shared::error::ServiceError;
use crate::shared::list_filter::{apply_list_query, DocumentRow};
use crate::shared::numbering::{next_document_no, NUMBERING_LOCK};
use chrono::NaiveDate;
use contracts::domain::a004_requisition::aggregate::Requisition;
use contracts::domain::a006_purchase_order::aggregate::{
    PurchaseOrder, PurchaseOrderDto, PurchaseOrderFromRequisitionDto,
};
use contracts::domain::common::{DocumentLine, DocumentStatus};
use contracts::shared::list_query::ListQuery;
use uuid::Uuid;

pub const NUMBER_PREFIX: &str = "OC";

impl DocumentRow for PurchaseOrder {
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
        let mut fields = vec![self.delivery_address.as_str()];
        if let Some(comment) = self.base.comment.as_deref() {
            fields.push(comment);
        }
        fields
    }
}

fn apply_lines(doc: &mut PurchaseOrder, lines: Vec<DocumentLine>) -> Result<(), ServiceError> {
    if !doc.status.is_editable() {
        return Err(ServiceError::InvalidTransition(format!(
            "La orden {} está {} y no se puede modificar",
            doc.document_no, doc.status
        )));
    }
    doc.set_lines(lines).map_err(ServiceError::Validation)
}

fn apply_status(doc: &mut PurchaseOrder, next: DocumentStatus) -> Result<(), ServiceError> {
    doc.change_status(next)
        .map_err(ServiceError::InvalidTransition)
}

/// Заказ из заявки: неутвержденная заявка дает конфликт, прочее: ошибку данных
fn build_from_requisition(
    requisition: &Requisition,
    document_no: String,
    document_date: NaiveDate,
    supplier_id: String,
    delivery_address: String,
) -> Result<PurchaseOrder, ServiceError> {
    if requisition.status != DocumentStatus::Aprobado {
        return Err(ServiceError::InvalidTransition(format!(
            "Solo se puede generar una orden desde una solicitud aprobada ({} está {})",
            requisition.document_no, requisition.status
        )));
    }
    PurchaseOrder::from_requisition(
        requisition,
        document_no,
        document_date,
        supplier_id,
        delivery_address,
    )
    .map_err(ServiceError::Validation)
}

async fn ensure_supplier(supplier_id: &str) -> anyhow::Result<()> {
    if a002_supplier::service::get_by_ref(supplier_id).await.is_err() {
        return Err(ServiceError::Validation("Debe seleccionar un proveedor existente".into()).into());
    }
    Ok(())
}

async fn next_number() -> anyhow::Result<String> {
    let numbers = repository::list_document_numbers().await?;
    Ok(next_document_no(NUMBER_PREFIX, numbers.iter().map(String::as_str)))
}

pub async fn create(dto: PurchaseOrderDto) -> anyhow::Result<PurchaseOrder> {
    ensure_supplier(&dto.supplier_id).await?;

    let _guard = NUMBERING_LOCK.lock().await;
    let mut aggregate = PurchaseOrder::new_for_insert(
        next_number().await?,
        dto.document_date,
        dto.supplier_id,
        dto.delivery_address,
        dto.comment,
    );
    if !dto.lines.is_empty() {
        apply_lines(&mut aggregate, dto.lines)?;
    }
    aggregate.validate().map_err(ServiceError::Validation)?;

    aggregate.before_write();
    repository::insert(&aggregate).await?;
    tracing::info!("Purchase order created: {}", aggregate.document_no);
    Ok(aggregate)
}

/// POST from-requisition: строки копируются из утвержденной заявки
pub async fn create_from_requisition(
    dto: PurchaseOrderFromRequisitionDto,
) -> anyhow::Result<PurchaseOrder> {
    let requisition_id = Uuid::parse_str(&dto.requisition_id)
        .map_err(|_| ServiceError::Validation("Identificador de solicitud inválido".into()))?;
    let requisition = a004_requisition::service::get(requisition_id).await?;
    ensure_supplier(&dto.supplier_id).await?;

    // Без адреса доставки берется адрес склада заявки
    let delivery_address = if dto.delivery_address.trim().is_empty() {
        a003_warehouse::service::get_by_ref(&requisition.warehouse_id)
            .await
            .map(|w| w.address)
            .unwrap_or_default()
    } else {
        dto.delivery_address
    };

    let _guard = NUMBERING_LOCK.lock().await;
    let mut aggregate = build_from_requisition(
        &requisition,
        next_number().await?,
        chrono::Local::now().date_naive(),
        dto.supplier_id,
        delivery_address,
    )?;
    aggregate.validate().map_err(ServiceError::Validation)?;

    aggregate.before_write();
    repository::insert(&aggregate).await?;
    tracing::info!(
        "Purchase order {} generated from {}",
        aggregate.document_no,
        requisition.document_no
    );
    Ok(aggregate)
}

pub async fn update(dto: PurchaseOrderDto) -> anyhow::Result<PurchaseOrder> {
    let id = dto
        .id
        .as_deref()
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| ServiceError::Validation("Identificador inválido".into()))?;

    let mut aggregate = get(id).await?;
    if !aggregate.status.is_editable() {
        return Err(ServiceError::InvalidTransition(format!(
            "La orden {} está {} y no se puede modificar",
            aggregate.document_no, aggregate.status
        ))
        .into());
    }
    ensure_supplier(&dto.supplier_id).await?;
    aggregate.update(&dto);
    aggregate.validate().map_err(ServiceError::Validation)?;

    aggregate.before_write();
    aggregate.base.metadata.increment_version();
    repository::update(&aggregate).await?;
    Ok(aggregate)
}

pub async fn upsert(dto: PurchaseOrderDto) -> anyhow::Result<PurchaseOrder> {
    if dto.id.is_some() {
        update(dto).await
    } else {
        create(dto).await
    }
}

pub async fn get(id: Uuid) -> anyhow::Result<PurchaseOrder> {
    repository::get_by_id(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("Orden de compra".into()).into())
}

pub async fn list(query: &ListQuery) -> anyhow::Result<Vec<PurchaseOrder>> {
    Ok(apply_list_query(repository::list_all().await?, query))
}

/// GET by-requisition/:id; неизвестная заявка дает 404
pub async fn list_by_requisition(requisition_id: Uuid) -> anyhow::Result<Vec<PurchaseOrder>> {
    a004_requisition::service::get(requisition_id).await?;
    let items = repository::list_by_requisition(&requisition_id.to_string()).await?;
    Ok(apply_list_query(items, &ListQuery::default()))
}

pub async fn get_lines(id: Uuid) -> anyhow::Result<Vec<DocumentLine>> {
    Ok(get(id).await?.lines)
}

pub async fn set_lines(id: Uuid, lines: Vec<DocumentLine>) -> anyhow::Result<PurchaseOrder> {
    let mut aggregate = get(id).await?;
    apply_lines(&mut aggregate, lines)?;

    aggregate.before_write();
    aggregate.base.metadata.increment_version();
    repository::update(&aggregate).await?;
    tracing::info!(
        "Purchase order {}: {} lines saved",
        aggregate.document_no,
        aggregate.lines.len()
    );
    Ok(aggregate)
}

pub async fn change_status(id: Uuid, next: DocumentStatus) -> anyhow::Result<PurchaseOrder> {
    let mut aggregate = get(id).await?;
    let previous = aggregate.status;
    apply_status(&mut aggregate, next)?;

    aggregate.before_write();
    aggregate.base.metadata.increment_version();
    repository::update(&aggregate).await?;
    tracing::info!("Purchase order {}: {} -> {}", aggregate.document_no, previous, next);
    Ok(aggregate)
}

pub async fn delete(id: Uuid) -> anyhow::Result<()> {
    let aggregate = get(id).await?;
    if !aggregate.status.is_editable() {
        return Err(ServiceError::InvalidTransition(format!(
            "Solo se puede eliminar una orden pendiente ({} está {})",
            aggregate.document_no, aggregate.status
        ))
        .into());
    }
    if !repository::soft_delete(id).await? {
        return Err(ServiceError::NotFound("Orden de compra".into()).into());
    }
    tracing::info!("Purchase order deleted: {}", aggregate.document_no);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, 1).unwrap()
    }

    fn requisition_with_lines() -> Requisition {
        let mut r = Requisition::new_for_insert(
            "SOL-000004".into(),
            date(),
            "Puente Chillón".into(),
            "Ing. Rojas".into(),
            String::new(),
            None,
        );
        r.set_lines(vec![DocumentLine {
            resource_id: "r1".into(),
            resource_code: "CEM-001".into(),
            resource_description: "Cemento Portland tipo I".into(),
            unit: "bolsa".into(),
            quantity: 100.0,
            unit_cost: 29.9,
        }])
        .unwrap();
        r
    }

    #[test]
    fn test_pending_requisition_is_a_conflict() {
        let r = requisition_with_lines();
        let err = build_from_requisition(&r, "OC-000001".into(), date(), "s1".into(), String::new())
            .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidTransition(_)));
    }

    #[test]
    fn test_order_copies_lines_and_links_requisition() {
        let mut r = requisition_with_lines();
        r.change_status(DocumentStatus::Aprobado).unwrap();
        let order = build_from_requisition(
            &r,
            "OC-000001".into(),
            date(),
            "s1".into(),
            "Av. Argentina 2450".into(),
        )
        .unwrap();
        assert_eq!(order.status, DocumentStatus::Pendiente);
        assert_eq!(order.requisition_id, Some(r.to_string_id()));
        assert_eq!(order.lines, r.lines);
        assert_eq!(order.total(), r.total());
    }

    #[test]
    fn test_missing_supplier_is_a_validation_error() {
        let mut r = requisition_with_lines();
        r.change_status(DocumentStatus::Aprobado).unwrap();
        let err = build_from_requisition(&r, "OC-000001".into(), date(), " ".into(), String::new())
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[test]
    fn test_approved_order_lines_are_locked() {
        let mut r = requisition_with_lines();
        r.change_status(DocumentStatus::Aprobado).unwrap();
        let mut order =
            build_from_requisition(&r, "OC-000002".into(), date(), "s1".into(), String::new())
                .unwrap();
        apply_status(&mut order, DocumentStatus::Aprobado).unwrap();
        assert!(matches!(
            apply_lines(&mut order, vec![]),
            Err(ServiceError::InvalidTransition(_))
        ));
    }
}
