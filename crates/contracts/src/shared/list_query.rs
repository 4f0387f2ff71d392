use crate::domain::common::DocumentStatus;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Параметры запроса списка документов (`?date_from&date_to&status&search`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_from: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_to: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<DocumentStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl ListQuery {
    pub fn is_empty(&self) -> bool {
        self.date_from.is_none()
            && self.date_to.is_none()
            && self.status.is_none()
            && self.search.as_deref().map_or(true, |s| s.trim().is_empty())
    }

    /// Попадает ли дата в диапазон (границы включительно)
    pub fn matches_date(&self, date: NaiveDate) -> bool {
        self.date_from.map_or(true, |from| date >= from)
            && self.date_to.map_or(true, |to| date <= to)
    }

    pub fn matches_status(&self, status: DocumentStatus) -> bool {
        self.status.map_or(true, |s| s == status)
    }

    /// Поиск без учета регистра по любому из переданных полей
    pub fn matches_search(&self, fields: &[&str]) -> bool {
        match self.search.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(needle) => {
                let needle = needle.to_lowercase();
                fields.iter().any(|f| f.to_lowercase().contains(&needle))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    #[test]
    fn test_date_range_is_inclusive() {
        let q = ListQuery {
            date_from: Some(d(10)),
            date_to: Some(d(20)),
            ..Default::default()
        };
        assert!(q.matches_date(d(10)));
        assert!(q.matches_date(d(20)));
        assert!(!q.matches_date(d(9)));
        assert!(!q.matches_date(d(21)));
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let q = ListQuery {
            search: Some("álamos".into()),
            ..Default::default()
        };
        assert!(q.matches_search(&["SOL-000001", "Edificio Los Álamos"]));
        assert!(!q.matches_search(&["SOL-000002", "Puente Chilina"]));
        assert!(ListQuery::default().matches_search(&["x"]));
    }

    #[test]
    fn test_empty_fields_are_not_serialized() {
        let q = ListQuery {
            status: Some(DocumentStatus::Aprobado),
            ..Default::default()
        };
        let json = serde_json::to_value(&q).unwrap();
        assert_eq!(json, serde_json::json!({ "status": "Aprobado" }));
        assert!(!q.is_empty());
        assert!(ListQuery::default().is_empty());
    }
}
