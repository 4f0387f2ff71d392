use serde::{Deserialize, Serialize};

/// Строка табличной части документа (Solicitud, Transferencia, Orden de Compra)
///
/// Наименование и единица измерения ресурса копируются в строку при добавлении,
/// чтобы печатная форма не зависела от последующих изменений справочника.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DocumentLine {
    /// UUID ресурса (a001_resource)
    pub resource_id: String,
    /// Код ресурса на момент добавления строки
    pub resource_code: String,
    /// Наименование ресурса на момент добавления строки
    pub resource_description: String,
    /// Единица измерения ("m3", "bolsa", "und")
    pub unit: String,
    /// Количество
    pub quantity: f64,
    /// Цена за единицу
    pub unit_cost: f64,
}

impl DocumentLine {
    /// Сумма строки
    pub fn amount(&self) -> f64 {
        self.quantity * self.unit_cost
    }

    /// Валидация строки
    pub fn validate(&self) -> Result<(), String> {
        if self.resource_id.trim().is_empty() {
            return Err("La línea no tiene recurso".into());
        }
        if !self.quantity.is_finite() || self.quantity <= 0.0 {
            return Err(format!(
                "Cantidad inválida para {}: debe ser mayor que cero",
                self.resource_description
            ));
        }
        if !self.unit_cost.is_finite() || self.unit_cost < 0.0 {
            return Err(format!(
                "Costo unitario inválido para {}",
                self.resource_description
            ));
        }
        Ok(())
    }
}

/// Итог по строкам документа
pub fn lines_total(lines: &[DocumentLine]) -> f64 {
    lines.iter().map(DocumentLine::amount).sum()
}

/// Проверка всех строк и отсутствия дублей по ресурсу
pub fn validate_lines(lines: &[DocumentLine]) -> Result<(), String> {
    let mut seen = std::collections::HashSet::new();
    for line in lines {
        line.validate()?;
        if !seen.insert(line.resource_id.as_str()) {
            return Err(format!(
                "El recurso {} aparece más de una vez",
                line.resource_description
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(id: &str, quantity: f64, unit_cost: f64) -> DocumentLine {
        DocumentLine {
            resource_id: id.to_string(),
            resource_code: format!("REC-{}", id),
            resource_description: format!("Recurso {}", id),
            unit: "und".to_string(),
            quantity,
            unit_cost,
        }
    }

    #[test]
    fn test_amount_and_total() {
        let lines = vec![line("1", 2.0, 10.5), line("2", 3.0, 4.0)];
        assert_eq!(lines[0].amount(), 21.0);
        assert_eq!(lines_total(&lines), 33.0);
        assert_eq!(lines_total(&[]), 0.0);
    }

    #[test]
    fn test_validate_rejects_non_positive_quantity() {
        assert!(line("1", 0.0, 1.0).validate().is_err());
        assert!(line("1", -1.0, 1.0).validate().is_err());
        assert!(line("1", f64::NAN, 1.0).validate().is_err());
        assert!(line("1", 1.0, -0.5).validate().is_err());
        assert!(line("1", 1.0, 0.0).validate().is_ok());
    }

    #[test]
    fn test_validate_lines_rejects_duplicates() {
        let lines = vec![line("1", 1.0, 1.0), line("1", 2.0, 1.0)];
        assert!(validate_lines(&lines).is_err());
        assert!(validate_lines(&lines[..1]).is_ok());
    }
}
