//! Staged-строки редактора: локальная копия строк выбранного документа.
//!
//! `committed`: строки в том виде, в каком их последний раз отдал сервер,
//! `rows`: то, что видит и правит пользователь. Отмена возвращает `rows` к `committed`.

use super::errors::ValidationError;
use super::item::LineItem;

pub fn validate_quantity(quantity: f64) -> Result<(), ValidationError> {
    if quantity.is_finite() && quantity > 0.0 {
        Ok(())
    } else {
        Err(ValidationError::InvalidQuantity)
    }
}

pub fn validate_unit_cost(unit_cost: f64) -> Result<(), ValidationError> {
    if unit_cost.is_finite() && unit_cost >= 0.0 {
        Ok(())
    } else {
        Err(ValidationError::InvalidUnitCost)
    }
}

/// Разбор числа из поля ввода; допускается запятая как десятичный разделитель
pub fn parse_decimal(input: &str) -> Option<f64> {
    let normalized = input.trim().replace(',', ".");
    if normalized.is_empty() {
        return None;
    }
    normalized.parse::<f64>().ok()
}

#[derive(Debug, Clone, PartialEq)]
pub struct StagedRows<R> {
    committed: Vec<R>,
    rows: Vec<R>,
}

impl<R> Default for StagedRows<R> {
    fn default() -> Self {
        Self {
            committed: Vec::new(),
            rows: Vec::new(),
        }
    }
}

impl<R: LineItem> StagedRows<R> {
    /// Новые строки с сервера: становятся и зафиксированными, и текущими
    pub fn reset(&mut self, rows: Vec<R>) {
        self.committed = rows.clone();
        self.rows = rows;
    }

    pub fn clear(&mut self) {
        self.committed.clear();
        self.rows.clear();
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn committed(&self) -> &[R] {
        &self.committed
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_dirty(&self) -> bool {
        self.rows != self.committed
    }

    /// Итог: сумма quantity × unit_cost ровно по текущим строкам
    pub fn total(&self) -> f64 {
        self.rows.iter().map(LineItem::amount).sum()
    }

    pub fn add(&mut self, row: R) -> Result<(), ValidationError> {
        validate_quantity(row.quantity())?;
        validate_unit_cost(row.unit_cost())?;
        if self.rows.iter().any(|r| r.key() == row.key()) {
            return Err(ValidationError::DuplicateRow);
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn remove(&mut self, key: &str) -> Result<(), ValidationError> {
        let before = self.rows.len();
        self.rows.retain(|r| r.key() != key);
        if self.rows.len() == before {
            return Err(ValidationError::UnknownRow);
        }
        Ok(())
    }

    pub fn set_quantity(&mut self, key: &str, quantity: f64) -> Result<(), ValidationError> {
        validate_quantity(quantity)?;
        self.row_mut(key)?.set_quantity(quantity);
        Ok(())
    }

    pub fn set_unit_cost(&mut self, key: &str, unit_cost: f64) -> Result<(), ValidationError> {
        validate_unit_cost(unit_cost)?;
        self.row_mut(key)?.set_unit_cost(unit_cost);
        Ok(())
    }

    /// Отменить правки без обращения к серверу
    pub fn cancel(&mut self) {
        self.rows = self.committed.clone();
    }

    fn row_mut(&mut self, key: &str) -> Result<&mut R, ValidationError> {
        self.rows
            .iter_mut()
            .find(|r| r.key() == key)
            .ok_or(ValidationError::UnknownRow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::common::DocumentLine;

    fn line(id: &str, quantity: f64, unit_cost: f64) -> DocumentLine {
        DocumentLine {
            resource_id: id.into(),
            resource_code: id.to_uppercase(),
            resource_description: format!("Recurso {}", id),
            unit: "und".into(),
            quantity,
            unit_cost,
        }
    }

    #[test]
    fn test_total_covers_exactly_current_rows() {
        let mut staged = StagedRows::default();
        staged.reset(vec![line("a", 2.0, 10.0), line("b", 1.5, 4.0)]);
        assert_eq!(staged.total(), 26.0);

        staged.set_quantity("a", 3.0).unwrap();
        staged.remove("b").unwrap();
        staged.add(line("c", 1.0, 0.5)).unwrap();
        assert_eq!(staged.total(), 30.5);
        assert!(staged.is_dirty());
    }

    #[test]
    fn test_cancel_restores_committed_rows() {
        let mut staged = StagedRows::default();
        staged.reset(vec![line("a", 2.0, 10.0)]);
        staged.set_unit_cost("a", 12.0).unwrap();
        staged.add(line("b", 1.0, 1.0)).unwrap();

        staged.cancel();
        assert_eq!(staged.rows(), &[line("a", 2.0, 10.0)]);
        assert!(!staged.is_dirty());
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let mut staged = StagedRows::default();
        staged.reset(vec![line("a", 2.0, 10.0)]);

        assert_eq!(staged.set_quantity("a", 0.0), Err(ValidationError::InvalidQuantity));
        assert_eq!(staged.set_quantity("a", f64::INFINITY), Err(ValidationError::InvalidQuantity));
        assert_eq!(staged.set_unit_cost("a", -1.0), Err(ValidationError::InvalidUnitCost));
        assert_eq!(staged.set_quantity("x", 1.0), Err(ValidationError::UnknownRow));
        assert_eq!(staged.add(line("a", 1.0, 1.0)), Err(ValidationError::DuplicateRow));
        assert_eq!(staged.rows(), &[line("a", 2.0, 10.0)]);
    }

    #[test]
    fn test_parse_decimal_accepts_comma() {
        assert_eq!(parse_decimal("2,5"), Some(2.5));
        assert_eq!(parse_decimal(" 10 "), Some(10.0));
        assert_eq!(parse_decimal(""), None);
        assert_eq!(parse_decimal("abc"), None);
    }
}
