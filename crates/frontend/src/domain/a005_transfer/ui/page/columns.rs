use crate::shared::master_detail::{CellValue, Column};
use contracts::domain::a005_transfer::aggregate::Transfer;

pub fn transfer_columns() -> Vec<Column<Transfer>> {
    vec![
        Column::date("document_date", "Fecha", |t: &Transfer| CellValue::Date(Some(t.document_date))),
        Column::text("document_no", "Número", |t: &Transfer| CellValue::Text(t.document_no.clone()))
            .filterable()
            .min_width(110.0),
        Column::text("kind", "Tipo", |t: &Transfer| CellValue::Text(t.kind.as_str().to_string()))
            .filterable(),
        Column::date("return_date", "Devolución", |t: &Transfer| CellValue::Date(t.return_date)),
        Column::status("status", "Estado", |t: &Transfer| CellValue::Status(t.status)).filterable(),
        Column::number("lines", "Ítems", |t: &Transfer| CellValue::Number(t.lines.len() as f64)),
        Column::money("total", "Valor", |t: &Transfer| CellValue::Money(t.total())),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::master_detail::columns::{filter_items, sort_items};
    use crate::shared::master_detail::{FilterState, SortState};
    use chrono::NaiveDate;
    use contracts::domain::a005_transfer::aggregate::TransferKind;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    fn transfer(no: &str, kind: TransferKind, return_day: Option<u32>) -> Transfer {
        Transfer::new_for_insert(
            no.into(),
            d(1),
            "wh-central".into(),
            "wh-obra".into(),
            kind,
            return_day.map(d),
            None,
        )
    }

    #[test]
    fn test_loans_filter_and_return_date_sort() {
        let items = vec![
            transfer("TRF-000001", TransferKind::Transferencia, None),
            transfer("TRF-000002", TransferKind::Prestamo, Some(20)),
            transfer("TRF-000003", TransferKind::Prestamo, Some(10)),
        ];

        let mut filters = FilterState::default();
        filters.column_filters.insert("kind".into(), "présta".into());
        let mut loans = filter_items(&items, &filters, &transfer_columns());
        assert_eq!(loans.len(), 2);

        sort_items(&mut loans, &SortState::by("return_date", true), &transfer_columns());
        let numbers: Vec<&str> = loans.iter().map(|t| t.document_no.as_str()).collect();
        assert_eq!(numbers, vec!["TRF-000003", "TRF-000002"]);
    }
}
