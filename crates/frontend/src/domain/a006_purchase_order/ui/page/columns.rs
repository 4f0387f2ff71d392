use crate::shared::master_detail::{CellValue, Column};
use contracts::domain::a006_purchase_order::aggregate::PurchaseOrder;

/// Происхождение заказа для колонки "Origen"
pub fn order_origin(order: &PurchaseOrder) -> &'static str {
    if order.requisition_id.is_some() {
        "Solicitud"
    } else {
        "Directa"
    }
}

pub fn purchase_order_columns() -> Vec<Column<PurchaseOrder>> {
    vec![
        Column::date("document_date", "Fecha", |o: &PurchaseOrder| CellValue::Date(Some(o.document_date))),
        Column::text("document_no", "Número", |o: &PurchaseOrder| CellValue::Text(o.document_no.clone()))
            .filterable()
            .min_width(110.0),
        Column::text("origin", "Origen", |o: &PurchaseOrder| CellValue::Text(order_origin(o).into()))
            .filterable()
            .min_width(90.0),
        Column::text("delivery_address", "Entrega", |o: &PurchaseOrder| {
            CellValue::Text(o.delivery_address.clone())
        })
        .filterable()
        .min_width(200.0),
        Column::status("status", "Estado", |o: &PurchaseOrder| CellValue::Status(o.status)).filterable(),
        Column::money("total", "Total", |o: &PurchaseOrder| CellValue::Money(o.total())),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_order_origin() {
        let mut order = PurchaseOrder::new_for_insert(
            "OC-000001".into(),
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            "sup-1".into(),
            "Obra Los Álamos".into(),
            None,
        );
        assert_eq!(order_origin(&order), "Directa");
        order.requisition_id = Some("req-1".into());
        assert_eq!(order_origin(&order), "Solicitud");
        assert_eq!(
            purchase_order_columns()[2].cell(&order).display(),
            "Solicitud"
        );
    }
}
