//! Трейты элементов master–detail и их реализации для агрегатов

use contracts::domain::a001_resource::aggregate::Resource;
use contracts::domain::a002_supplier::aggregate::Supplier;
use contracts::domain::a003_warehouse::aggregate::Warehouse;
use contracts::domain::a004_requisition::aggregate::Requisition;
use contracts::domain::a005_transfer::aggregate::Transfer;
use contracts::domain::a006_purchase_order::aggregate::PurchaseOrder;
use contracts::domain::common::{AggregateId, DocumentLine, DocumentStatus};
use chrono::NaiveDate;

/// Запись главного списка. Локально не изменяется: только повторная загрузка
/// или подстановка канонической записи, которую вернул сервер.
pub trait ListItem: Clone + PartialEq + Send + Sync + 'static {
    fn id(&self) -> String;

    /// Дата для фильтра по периоду; `None`: запись фильтром по дате не отсекается
    fn record_date(&self) -> Option<NaiveDate> {
        None
    }

    fn status(&self) -> Option<DocumentStatus> {
        None
    }
}

/// Строка, которую редактирует Detail/Editor View
pub trait LineItem: Clone + PartialEq + Send + Sync + 'static {
    fn key(&self) -> String;
    fn quantity(&self) -> f64;
    fn unit_cost(&self) -> f64;
    fn set_quantity(&mut self, quantity: f64);
    fn set_unit_cost(&mut self, unit_cost: f64);

    fn amount(&self) -> f64 {
        self.quantity() * self.unit_cost()
    }
}

impl LineItem for DocumentLine {
    fn key(&self) -> String {
        self.resource_id.clone()
    }

    fn quantity(&self) -> f64 {
        self.quantity
    }

    fn unit_cost(&self) -> f64 {
        self.unit_cost
    }

    fn set_quantity(&mut self, quantity: f64) {
        self.quantity = quantity;
    }

    fn set_unit_cost(&mut self, unit_cost: f64) {
        self.unit_cost = unit_cost;
    }
}

impl ListItem for Requisition {
    fn id(&self) -> String {
        self.base.id.as_string()
    }

    fn record_date(&self) -> Option<NaiveDate> {
        Some(self.document_date)
    }

    fn status(&self) -> Option<DocumentStatus> {
        Some(self.status)
    }
}

impl ListItem for Transfer {
    fn id(&self) -> String {
        self.base.id.as_string()
    }

    fn record_date(&self) -> Option<NaiveDate> {
        Some(self.document_date)
    }

    fn status(&self) -> Option<DocumentStatus> {
        Some(self.status)
    }
}

impl ListItem for PurchaseOrder {
    fn id(&self) -> String {
        self.base.id.as_string()
    }

    fn record_date(&self) -> Option<NaiveDate> {
        Some(self.document_date)
    }

    fn status(&self) -> Option<DocumentStatus> {
        Some(self.status)
    }
}

// Справочники фильтруются по дате создания записи
impl ListItem for Resource {
    fn id(&self) -> String {
        self.base.id.as_string()
    }

    fn record_date(&self) -> Option<NaiveDate> {
        Some(self.base.metadata.created_at.date_naive())
    }
}

impl ListItem for Supplier {
    fn id(&self) -> String {
        self.base.id.as_string()
    }

    fn record_date(&self) -> Option<NaiveDate> {
        Some(self.base.metadata.created_at.date_naive())
    }
}

impl ListItem for Warehouse {
    fn id(&self) -> String {
        self.base.id.as_string()
    }

    fn record_date(&self) -> Option<NaiveDate> {
        Some(self.base.metadata.created_at.date_naive())
    }
}
