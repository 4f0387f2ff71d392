use crate::shared::master_detail::{CellValue, Column};
use contracts::domain::a004_requisition::aggregate::Requisition;

pub fn requisition_columns() -> Vec<Column<Requisition>> {
    vec![
        Column::date("document_date", "Fecha", |r: &Requisition| CellValue::Date(Some(r.document_date))),
        Column::text("document_no", "Número", |r: &Requisition| CellValue::Text(r.document_no.clone()))
            .filterable()
            .min_width(110.0),
        Column::text("project", "Proyecto", |r: &Requisition| CellValue::Text(r.project.clone()))
            .filterable()
            .min_width(200.0),
        Column::text("requested_by", "Solicitante", |r: &Requisition| {
            CellValue::Text(r.requested_by.clone())
        })
        .filterable()
        .min_width(140.0),
        Column::status("status", "Estado", |r: &Requisition| CellValue::Status(r.status)).filterable(),
        Column::money("total", "Total", |r: &Requisition| CellValue::Money(r.total())),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::master_detail::{Coordinator, FilterState, SortState};
    use chrono::NaiveDate;
    use contracts::domain::common::{DocumentLine, DocumentStatus};

    fn requisition(no: &str, day: u32, project: &str) -> Requisition {
        Requisition::new_for_insert(
            no.into(),
            NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            project.into(),
            "Ing. Quispe".into(),
            "wh-1".into(),
            None,
        )
    }

    fn numbers(items: Vec<Requisition>) -> Vec<String> {
        items.into_iter().map(|r| r.document_no).collect()
    }

    #[test]
    fn test_period_and_project_filter_with_newest_first() {
        let mut c: Coordinator<Requisition, DocumentLine> =
            Coordinator::new(SortState::by("document_date", false));
        c.apply_list(Ok(vec![
            requisition("SOL-000001", 5, "Puente Chilina"),
            requisition("SOL-000002", 12, "Edificio Los Álamos"),
            requisition("SOL-000003", 20, "Puente Grau"),
        ]));

        let mut filters = FilterState::default();
        filters.start_date = NaiveDate::from_ymd_opt(2024, 1, 1);
        filters.end_date = NaiveDate::from_ymd_opt(2024, 1, 31);
        filters.column_filters.insert("project".into(), "puente".into());

        assert_eq!(
            numbers(c.visible_items(&filters, &requisition_columns())),
            vec!["SOL-000003", "SOL-000001"]
        );
    }

    #[test]
    fn test_status_column_filter() {
        let mut approved = requisition("SOL-000004", 8, "Canal Zamácola");
        approved.status = DocumentStatus::Aprobado;
        let items = vec![requisition("SOL-000005", 9, "Canal Zamácola"), approved];

        let mut filters = FilterState::default();
        filters.column_filters.insert("status".into(), "aprob".into());
        let found = crate::shared::master_detail::columns::filter_items(
            &items,
            &filters,
            &requisition_columns(),
        );
        assert_eq!(numbers(found), vec!["SOL-000004"]);
    }
}
