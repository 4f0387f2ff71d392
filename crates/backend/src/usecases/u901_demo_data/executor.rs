use crate::domain::{
    a001_resource, a002_supplier, a003_warehouse, a004_requisition, a005_transfer,
    a006_purchase_order,
};
use anyhow::Result;
use chrono::{Duration, NaiveDate};
use contracts::domain::a001_resource::aggregate::Resource;
use contracts::domain::a003_warehouse::aggregate::Warehouse;
use contracts::domain::a004_requisition::aggregate::RequisitionDto;
use contracts::domain::a005_transfer::aggregate::{TransferDto, TransferKind};
use contracts::domain::a006_purchase_order::aggregate::PurchaseOrderFromRequisitionDto;
use contracts::domain::common::{AggregateId, DocumentLine, DocumentStatus};
use contracts::shared::list_query::ListQuery;
use serde::Serialize;

/// Ответ POST /api/testdata
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct DemoDataSummary {
    pub resources: usize,
    pub suppliers: usize,
    pub warehouses: usize,
    pub requisitions: usize,
    pub transfers: usize,
    pub purchase_orders: usize,
}

/// Строки по кодам ресурсов; неизвестные коды пропускаются
fn lines_for(resources: &[Resource], items: &[(&str, f64)]) -> Vec<DocumentLine> {
    items
        .iter()
        .filter_map(|(code, quantity)| {
            resources
                .iter()
                .find(|r| r.base.code == *code)
                .map(|r| r.line_for(*quantity))
        })
        .collect()
}

fn warehouse_id(warehouses: &[Warehouse], code: &str) -> String {
    warehouses
        .iter()
        .find(|w| w.base.code == code)
        .map(|w| w.base.id.as_string())
        .unwrap_or_default()
}

/// Каталог заводится по кодам без дублей; документы только в пустую базу
pub async fn seed_demo_data() -> Result<DemoDataSummary> {
    let resources = a001_resource::service::insert_test_data().await?;
    let suppliers = a002_supplier::service::insert_test_data().await?;
    let warehouses = a003_warehouse::service::insert_test_data().await?;

    let mut summary = DemoDataSummary {
        resources: resources.len(),
        suppliers: suppliers.len(),
        warehouses: warehouses.len(),
        ..Default::default()
    };

    let existing = a004_requisition::service::list(&ListQuery::default()).await?;
    if !existing.is_empty() {
        tracing::info!("Demo documents skipped: {} requisitions already exist", existing.len());
        return Ok(summary);
    }

    let today = chrono::Local::now().date_naive();
    let days_ago = |days: i64| -> NaiveDate { today - Duration::days(days) };
    let central = warehouse_id(&warehouses, "ALM-CEN");
    let miraflores = warehouse_id(&warehouses, "OBR-MIR");
    let surco = warehouse_id(&warehouses, "OBR-SUR");

    // Solicitudes
    let approved = a004_requisition::service::create(RequisitionDto {
        id: None,
        document_date: days_ago(20),
        project: "Edificio Miraflores".into(),
        requested_by: "Ing. Carla Quispe".into(),
        warehouse_id: miraflores.clone(),
        comment: Some("Vaciado de losa, piso 4".into()),
        lines: lines_for(&resources, &[("CEM-001", 120.0), ("ACE-001", 80.0), ("AGR-001", 15.0)]),
    })
    .await?;
    let approved =
        a004_requisition::service::change_status(approved.base.id.value(), DocumentStatus::Aprobado)
            .await?;

    a004_requisition::service::create(RequisitionDto {
        id: None,
        document_date: days_ago(7),
        project: "Condominio Surco".into(),
        requested_by: "Maestro de obra J. Huamán".into(),
        warehouse_id: surco.clone(),
        comment: None,
        lines: lines_for(&resources, &[("LAD-001", 3.0), ("ACE-002", 25.0), ("AGR-003", 10.0)]),
    })
    .await?;

    let cancelled = a004_requisition::service::create(RequisitionDto {
        id: None,
        document_date: days_ago(2),
        project: "Edificio Miraflores".into(),
        requested_by: "Ing. Carla Quispe".into(),
        warehouse_id: miraflores.clone(),
        comment: Some("Duplicada".into()),
        lines: lines_for(&resources, &[("AGR-002", 12.0)]),
    })
    .await?;
    a004_requisition::service::change_status(cancelled.base.id.value(), DocumentStatus::Anulado)
        .await?;
    summary.requisitions = 3;

    // Transferencias
    let delivered = a005_transfer::service::create(TransferDto {
        id: None,
        document_date: days_ago(10),
        origin_warehouse_id: central.clone(),
        destination_warehouse_id: miraflores.clone(),
        kind: TransferKind::Transferencia,
        return_date: None,
        comment: None,
        lines: lines_for(&resources, &[("CEM-001", 50.0), ("ACE-002", 10.0)]),
    })
    .await?;
    let id = delivered.base.id.value();
    a005_transfer::service::change_status(id, DocumentStatus::Aprobado).await?;
    a005_transfer::service::change_status(id, DocumentStatus::Completado).await?;

    a005_transfer::service::create(TransferDto {
        id: None,
        document_date: days_ago(3),
        origin_warehouse_id: central,
        destination_warehouse_id: surco,
        kind: TransferKind::Prestamo,
        return_date: Some(today + Duration::days(10)),
        comment: Some("Mezcladora para cimentación".into()),
        lines: lines_for(&resources, &[("SRV-001", 5.0)]),
    })
    .await?;
    summary.transfers = 2;

    // Orden de compra desde la solicitud aprobada
    if let Some(supplier) = suppliers.first() {
        let order = a006_purchase_order::service::create_from_requisition(
            PurchaseOrderFromRequisitionDto {
                requisition_id: approved.base.id.as_string(),
                supplier_id: supplier.base.id.as_string(),
                delivery_address: String::new(),
            },
        )
        .await?;
        a006_purchase_order::service::change_status(order.base.id.value(), DocumentStatus::Aprobado)
            .await?;
        summary.purchase_orders = 1;
    }

    tracing::info!("Demo data seeded: {:?}", summary);
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resource(code: &str, unit_cost: f64) -> Resource {
        Resource::new_for_insert(
            code.into(),
            format!("Recurso {}", code),
            "und".into(),
            unit_cost,
            "Agregados".into(),
            None,
        )
    }

    #[test]
    fn test_lines_for_uses_catalog_prices() {
        let resources = vec![resource("AGR-001", 65.0), resource("CEM-001", 29.9)];
        let lines = lines_for(&resources, &[("CEM-001", 10.0), ("XXX-999", 1.0), ("AGR-001", 2.0)]);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].resource_code, "CEM-001");
        assert_eq!(lines[0].unit_cost, 29.9);
        assert_eq!(lines[1].amount(), 130.0);
    }

    #[test]
    fn test_unknown_warehouse_code_gives_empty_id() {
        assert_eq!(warehouse_id(&[], "ALM-CEN"), "");
    }
}
