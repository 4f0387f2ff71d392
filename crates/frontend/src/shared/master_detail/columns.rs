//! Явная схема колонок главного списка.
//!
//! Каждая колонка знает, как достать значение из записи, как его показать,
//! как сравнить для сортировки и можно ли по ней фильтровать.

use super::filter_state::FilterState;
use super::item::ListItem;
use crate::shared::date_utils::format_date;
use crate::shared::number_format::{format_money, format_quantity};
use chrono::NaiveDate;
use contracts::domain::common::DocumentStatus;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    Date,
    Number,
    Money,
    Status,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Date(Option<NaiveDate>),
    Number(f64),
    Money(f64),
    Status(DocumentStatus),
}

impl CellValue {
    pub fn display(&self) -> String {
        match self {
            CellValue::Text(s) => s.clone(),
            CellValue::Date(Some(d)) => format_date(*d),
            CellValue::Date(None) => "—".to_string(),
            CellValue::Number(n) => format_quantity(*n),
            CellValue::Money(m) => format_money(*m),
            CellValue::Status(s) => s.as_str().to_string(),
        }
    }

    /// Полный порядок для сортировки. Значения разных видов сравниваются по тексту.
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (CellValue::Text(a), CellValue::Text(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
            (CellValue::Date(a), CellValue::Date(b)) => a.cmp(b),
            (CellValue::Number(a), CellValue::Number(b))
            | (CellValue::Money(a), CellValue::Money(b)) => a.total_cmp(b),
            (CellValue::Status(a), CellValue::Status(b)) => a.as_str().cmp(b.as_str()),
            _ => self.display().cmp(&other.display()),
        }
    }

    /// Подстрочный поиск без учета регистра по отображаемому тексту
    pub fn matches(&self, needle: &str) -> bool {
        let needle = needle.trim();
        if needle.is_empty() {
            return true;
        }
        self.display()
            .to_lowercase()
            .contains(&needle.to_lowercase())
    }
}

pub struct Column<T> {
    pub key: &'static str,
    pub title: &'static str,
    pub kind: ColumnKind,
    pub value: fn(&T) -> CellValue,
    pub filterable: bool,
    pub min_width: f64,
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Column<T> {}

impl<T> Column<T> {
    fn new(key: &'static str, title: &'static str, kind: ColumnKind, value: fn(&T) -> CellValue) -> Self {
        Self {
            key,
            title,
            kind,
            value,
            filterable: false,
            min_width: 100.0,
        }
    }

    pub fn text(key: &'static str, title: &'static str, value: fn(&T) -> CellValue) -> Self {
        Self::new(key, title, ColumnKind::Text, value)
    }

    pub fn date(key: &'static str, title: &'static str, value: fn(&T) -> CellValue) -> Self {
        Self::new(key, title, ColumnKind::Date, value).min_width(110.0)
    }

    pub fn number(key: &'static str, title: &'static str, value: fn(&T) -> CellValue) -> Self {
        Self::new(key, title, ColumnKind::Number, value).min_width(80.0)
    }

    pub fn money(key: &'static str, title: &'static str, value: fn(&T) -> CellValue) -> Self {
        Self::new(key, title, ColumnKind::Money, value).min_width(110.0)
    }

    pub fn status(key: &'static str, title: &'static str, value: fn(&T) -> CellValue) -> Self {
        Self::new(key, title, ColumnKind::Status, value).min_width(110.0)
    }

    pub fn filterable(mut self) -> Self {
        self.filterable = true;
        self
    }

    pub fn min_width(mut self, width: f64) -> Self {
        self.min_width = width;
        self
    }

    pub fn cell(&self, item: &T) -> CellValue {
        (self.value)(item)
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self.kind, ColumnKind::Number | ColumnKind::Money)
    }
}

/// Состояние сортировки списка; принадлежит координатору страницы
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortState {
    pub column: Option<String>,
    pub ascending: bool,
}

impl SortState {
    pub fn by(column: &str, ascending: bool) -> Self {
        Self {
            column: Some(column.to_string()),
            ascending,
        }
    }

    /// Клик по той же колонке меняет направление, по новой: сортирует по возрастанию
    pub fn toggle(&mut self, column: &str) {
        if self.column.as_deref() == Some(column) {
            self.ascending = !self.ascending;
        } else {
            self.column = Some(column.to_string());
            self.ascending = true;
        }
    }

    pub fn indicator(&self, column: &str) -> &'static str {
        match (self.column.as_deref() == Some(column), self.ascending) {
            (true, true) => " ▲",
            (true, false) => " ▼",
            (false, _) => " ⇅",
        }
    }
}

/// Отбор по периоду и по фильтрам колонок
pub fn filter_items<T: ListItem>(items: &[T], filters: &FilterState, columns: &[Column<T>]) -> Vec<T> {
    items
        .iter()
        .filter(|item| match item.record_date() {
            Some(date) => filters.matches_date(date),
            None => true,
        })
        .filter(|item| {
            filters.column_filters.iter().all(|(key, needle)| {
                columns
                    .iter()
                    .find(|c| c.key == key && c.filterable)
                    .map_or(true, |c| c.cell(item).matches(needle))
            })
        })
        .cloned()
        .collect()
}

/// Сортировка по состоянию; неизвестная колонка оставляет порядок как есть
pub fn sort_items<T>(items: &mut [T], sort: &SortState, columns: &[Column<T>]) {
    let Some(column) = sort
        .column
        .as_deref()
        .and_then(|key| columns.iter().find(|c| c.key == key))
    else {
        return;
    };
    items.sort_by(|a, b| {
        let cmp = column.cell(a).compare(&column.cell(b));
        if sort.ascending {
            cmp
        } else {
            cmp.reverse()
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: &'static str,
        date: NaiveDate,
        project: &'static str,
        total: f64,
    }

    impl ListItem for Row {
        fn id(&self) -> String {
            self.id.to_string()
        }

        fn record_date(&self) -> Option<NaiveDate> {
            Some(self.date)
        }
    }

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { id: "a", date: d(5), project: "Puente Chilina", total: 900.0 },
            Row { id: "b", date: d(12), project: "Edificio Los Álamos", total: 50.0 },
            Row { id: "c", date: d(20), project: "puente Grau", total: 300.0 },
        ]
    }

    fn columns() -> Vec<Column<Row>> {
        vec![
            Column::date("date", "Fecha", |r: &Row| CellValue::Date(Some(r.date))),
            Column::text("project", "Proyecto", |r: &Row| CellValue::Text(r.project.to_string()))
                .filterable(),
            Column::money("total", "Total", |r: &Row| CellValue::Money(r.total)),
        ]
    }

    fn ids(rows: &[Row]) -> Vec<&'static str> {
        rows.iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_filter_by_period_and_column() {
        let mut filters = FilterState::default();
        filters.start_date = Some(d(10));
        assert_eq!(ids(&filter_items(&rows(), &filters, &columns())), vec!["b", "c"]);

        filters
            .column_filters
            .insert("project".into(), "PUENTE".into());
        assert_eq!(ids(&filter_items(&rows(), &filters, &columns())), vec!["c"]);
    }

    #[test]
    fn test_filter_on_non_filterable_column_is_ignored() {
        let mut filters = FilterState::default();
        filters.column_filters.insert("total".into(), "zzz".into());
        assert_eq!(filter_items(&rows(), &filters, &columns()).len(), 3);
    }

    #[test]
    fn test_sort_toggle_and_order() {
        let cols = columns();
        let mut sort = SortState::default();
        sort.toggle("total");
        assert!(sort.ascending);

        let mut items = rows();
        sort_items(&mut items, &sort, &cols);
        assert_eq!(ids(&items), vec!["b", "c", "a"]);

        sort.toggle("total");
        sort_items(&mut items, &sort, &cols);
        assert_eq!(ids(&items), vec!["a", "c", "b"]);
        assert_eq!(sort.indicator("total"), " ▼");

        sort.toggle("project");
        assert!(sort.ascending);
        sort_items(&mut items, &sort, &cols);
        assert_eq!(ids(&items), vec!["b", "a", "c"]);
        assert_eq!(sort.indicator("total"), " ⇅");
    }

    #[test]
    fn test_cell_display() {
        assert_eq!(CellValue::Date(Some(d(7))).display(), "07/01/2024");
        assert_eq!(CellValue::Date(None).display(), "—");
        assert_eq!(CellValue::Money(1500.0).display(), "1,500.00");
        assert_eq!(CellValue::Status(DocumentStatus::Aprobado).display(), "Aprobado");
    }
}
