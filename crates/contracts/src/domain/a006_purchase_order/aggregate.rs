use crate::domain::a004_requisition::aggregate::Requisition;
use crate::domain::common::{
    lines_total, validate_lines, AggregateId, AggregateRoot, BaseAggregate, DocumentLine,
    DocumentStatus, EntityMetadata,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

crate::uuid_aggregate_id!(
    /// ID типа для документа Orden de Compra
    PurchaseOrderId
);

/// Документ Orden de Compra (a006): заказ поставщику
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PurchaseOrder {
    #[serde(flatten)]
    pub base: BaseAggregate<PurchaseOrderId>,

    /// Номер документа (напр. "OC-000007")
    pub document_no: String,
    pub document_date: NaiveDate,

    /// Поставщик (a002_supplier)
    pub supplier_id: String,

    /// Заявка-основание (a004_requisition), если заказ создан из неё
    pub requisition_id: Option<String>,

    /// Адрес доставки (обычно адрес склада или объекта)
    pub delivery_address: String,

    pub status: DocumentStatus,
    pub lines: Vec<DocumentLine>,
}

impl PurchaseOrder {
    pub fn new_for_insert(
        document_no: String,
        document_date: NaiveDate,
        supplier_id: String,
        delivery_address: String,
        comment: Option<String>,
    ) -> Self {
        let mut base = BaseAggregate::new(
            PurchaseOrderId::new_v4(),
            document_no.clone(),
            document_no.clone(),
        );
        base.set_comment(comment);

        Self {
            base,
            document_no,
            document_date,
            supplier_id,
            requisition_id: None,
            delivery_address,
            status: DocumentStatus::Pendiente,
            lines: Vec::new(),
        }
    }

    /// Сформировать заказ на основании утверждённой заявки.
    /// Строки копируются из заявки, статус нового заказа Pendiente.
    pub fn from_requisition(
        requisition: &Requisition,
        document_no: String,
        document_date: NaiveDate,
        supplier_id: String,
        delivery_address: String,
    ) -> Result<Self, String> {
        if requisition.status != DocumentStatus::Aprobado {
            return Err(format!(
                "Solo se puede generar una orden desde una solicitud aprobada ({} está {})",
                requisition.document_no, requisition.status
            ));
        }
        if requisition.lines.is_empty() {
            return Err("La solicitud no tiene recursos".into());
        }
        if supplier_id.trim().is_empty() {
            return Err("Debe seleccionar un proveedor".into());
        }

        let mut order = Self::new_for_insert(
            document_no,
            document_date,
            supplier_id,
            delivery_address,
            Some(format!("Generada desde {}", requisition.document_no)),
        );
        order.requisition_id = Some(requisition.to_string_id());
        order.lines = requisition.lines.clone();
        Ok(order)
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    pub fn update(&mut self, dto: &PurchaseOrderDto) {
        self.document_date = dto.document_date;
        self.supplier_id = dto.supplier_id.clone();
        self.delivery_address = dto.delivery_address.clone();
        self.base.set_comment(dto.comment.clone());
    }

    pub fn set_lines(&mut self, lines: Vec<DocumentLine>) -> Result<(), String> {
        if !self.status.is_editable() {
            return Err(format!(
                "La orden {} está {} y no se puede modificar",
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
            return Err("No se puede aprobar una orden sin recursos".into());
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
        if self.supplier_id.trim().is_empty() {
            return Err("Debe seleccionar un proveedor".into());
        }
        validate_lines(&self.lines)
    }

    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

impl AggregateRoot for PurchaseOrder {
    type Id = PurchaseOrderId;

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
        "a006"
    }

    fn collection_name() -> &'static str {
        "purchase_order"
    }

    fn element_name() -> &'static str {
        "Orden de Compra"
    }

    fn list_name() -> &'static str {
        "Órdenes de Compra"
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PurchaseOrderDto {
    pub id: Option<String>,
    pub document_date: NaiveDate,
    pub supplier_id: String,
    pub delivery_address: String,
    pub comment: Option<String>,
    #[serde(default)]
    pub lines: Vec<DocumentLine>,
}

/// Тело запроса POST /api/purchase_order/from-requisition
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PurchaseOrderFromRequisitionDto {
    pub requisition_id: String,
    pub supplier_id: String,
    #[serde(default)]
    pub delivery_address: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approved_requisition() -> Requisition {
        let mut r = Requisition::new_for_insert(
            "SOL-000004".into(),
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            "Puente Chilina".into(),
            "Ing. Rojas".into(),
            "wh-obra".into(),
            None,
        );
        r.set_lines(vec![DocumentLine {
            resource_id: "res-1".into(),
            resource_code: "REC-0001".into(),
            resource_description: "Arena gruesa".into(),
            unit: "m3".into(),
            quantity: 12.0,
            unit_cost: 45.0,
        }])
        .unwrap();
        r
    }

    #[test]
    fn test_from_requisition_requires_approval() {
        let r = approved_requisition();
        let result = PurchaseOrder::from_requisition(
            &r,
            "OC-000001".into(),
            NaiveDate::from_ymd_opt(2024, 2, 2).unwrap(),
            "sup-1".into(),
            String::new(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_from_requisition_copies_lines() {
        let mut r = approved_requisition();
        r.change_status(DocumentStatus::Aprobado).unwrap();
        let order = PurchaseOrder::from_requisition(
            &r,
            "OC-000001".into(),
            NaiveDate::from_ymd_opt(2024, 2, 2).unwrap(),
            "sup-1".into(),
            "Av. Progreso 500".into(),
        )
        .unwrap();
        assert_eq!(order.lines, r.lines);
        assert_eq!(order.total(), 540.0);
        assert_eq!(order.requisition_id, Some(r.to_string_id()));
        assert_eq!(order.status, DocumentStatus::Pendiente);
        assert_eq!(order.base.comment.as_deref(), Some("Generada desde SOL-000004"));
    }

    #[test]
    fn test_from_requisition_requires_supplier() {
        let mut r = approved_requisition();
        r.change_status(DocumentStatus::Aprobado).unwrap();
        let result = PurchaseOrder::from_requisition(
            &r,
            "OC-000001".into(),
            NaiveDate::from_ymd_opt(2024, 2, 2).unwrap(),
            "  ".into(),
            String::new(),
        );
        assert!(result.is_err());
    }
}
