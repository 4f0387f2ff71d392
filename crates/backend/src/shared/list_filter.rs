//! Отбор списков документов по `?date_from&date_to&status&search`.

use chrono::NaiveDate;
use contracts::domain::common::DocumentStatus;
use contracts::shared::list_query::ListQuery;

/// Поля документа, по которым работает отбор
pub trait DocumentRow {
    fn document_no(&self) -> &str;
    fn document_date(&self) -> NaiveDate;
    fn status(&self) -> DocumentStatus;
    /// Текстовые поля для `search` (номер документа входит всегда)
    fn search_fields(&self) -> Vec<&str>;
}

fn matches<T: DocumentRow>(row: &T, query: &ListQuery) -> bool {
    if !query.matches_date(row.document_date()) || !query.matches_status(row.status()) {
        return false;
    }
    let mut fields = row.search_fields();
    fields.push(row.document_no());
    query.matches_search(&fields)
}

/// Отбор и порядок по умолчанию: новые сверху, при равной дате по номеру
pub fn apply_list_query<T: DocumentRow>(items: Vec<T>, query: &ListQuery) -> Vec<T> {
    let mut items: Vec<T> = items.into_iter().filter(|r| matches(r, query)).collect();
    items.sort_by(|a, b| {
        b.document_date()
            .cmp(&a.document_date())
            .then_with(|| b.document_no().cmp(a.document_no()))
    });
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row {
        no: &'static str,
        date: NaiveDate,
        status: DocumentStatus,
        project: &'static str,
    }

    impl DocumentRow for Row {
        fn document_no(&self) -> &str {
            self.no
        }
        fn document_date(&self) -> NaiveDate {
            self.date
        }
        fn status(&self) -> DocumentStatus {
            self.status
        }
        fn search_fields(&self) -> Vec<&str> {
            vec![self.project]
        }
    }

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { no: "SOL-000001", date: d(1), status: DocumentStatus::Aprobado, project: "Edificio Miraflores" },
            Row { no: "SOL-000002", date: d(5), status: DocumentStatus::Pendiente, project: "Puente Chillón" },
            Row { no: "SOL-000003", date: d(5), status: DocumentStatus::Anulado, project: "Edificio Surco" },
            Row { no: "SOL-000004", date: d(20), status: DocumentStatus::Pendiente, project: "Colegio Ate" },
        ]
    }

    fn numbers(items: &[Row]) -> Vec<&str> {
        items.iter().map(|r| r.no).collect()
    }

    #[test]
    fn test_empty_query_sorts_newest_first() {
        let result = apply_list_query(rows(), &ListQuery::default());
        assert_eq!(
            numbers(&result),
            vec!["SOL-000004", "SOL-000003", "SOL-000002", "SOL-000001"]
        );
    }

    #[test]
    fn test_period_bounds_are_inclusive() {
        let query = ListQuery {
            date_from: Some(d(1)),
            date_to: Some(d(5)),
            ..Default::default()
        };
        let result = apply_list_query(rows(), &query);
        assert_eq!(numbers(&result), vec!["SOL-000003", "SOL-000002", "SOL-000001"]);
    }

    #[test]
    fn test_status_and_search_combine() {
        let query = ListQuery {
            status: Some(DocumentStatus::Pendiente),
            search: Some("puente".into()),
            ..Default::default()
        };
        let result = apply_list_query(rows(), &query);
        assert_eq!(numbers(&result), vec!["SOL-000002"]);
    }

    #[test]
    fn test_search_matches_document_no() {
        let query = ListQuery {
            search: Some("000004".into()),
            ..Default::default()
        };
        assert_eq!(numbers(&apply_list_query(rows(), &query)), vec!["SOL-000004"]);
    }
}
