use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, DocumentLine, EntityMetadata};
use serde::{Deserialize, Serialize};

// ============================================================================
// ID Type
// ============================================================================

crate::uuid_aggregate_id!(
    /// Уникальный идентификатор ресурса
    ResourceId
);

// ============================================================================
// Aggregate Root
// ============================================================================

/// Ресурс (Recurso): материал или услуга со стоимостью за единицу
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Resource {
    #[serde(flatten)]
    pub base: BaseAggregate<ResourceId>,

    /// Единица измерения ("m3", "bolsa", "kg", "und")
    pub unit: String,

    /// Стоимость за единицу
    pub unit_cost: f64,

    /// Категория ("Agregados", "Cemento", "Acero", "Servicios")
    pub category: String,
}

impl Resource {
    /// Создать новый ресурс для вставки в БД
    pub fn new_for_insert(
        code: String,
        description: String,
        unit: String,
        unit_cost: f64,
        category: String,
        comment: Option<String>,
    ) -> Self {
        let mut base = BaseAggregate::new(ResourceId::new_v4(), code, description);
        base.set_comment(comment);

        Self {
            base,
            unit,
            unit_cost,
            category,
        }
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    /// Обновить данные из DTO
    pub fn update(&mut self, dto: &ResourceDto) {
        if let Some(code) = dto.code.as_ref().filter(|c| !c.trim().is_empty()) {
            self.base.code = code.clone();
        }
        self.base.description = dto.description.clone();
        self.base.set_comment(dto.comment.clone());
        self.unit = dto.unit.clone();
        self.unit_cost = dto.unit_cost;
        self.category = dto.category.clone();
    }

    /// Валидация данных
    pub fn validate(&self) -> Result<(), String> {
        if self.base.description.trim().is_empty() {
            return Err("La descripción no puede estar vacía".into());
        }
        if self.base.code.trim().is_empty() {
            return Err("El código no puede estar vacío".into());
        }
        if self.unit.trim().is_empty() {
            return Err("La unidad de medida es obligatoria".into());
        }
        if !self.unit_cost.is_finite() || self.unit_cost < 0.0 {
            return Err("El costo unitario debe ser un número no negativo".into());
        }
        Ok(())
    }

    /// Хук перед записью
    pub fn before_write(&mut self) {
        self.base.touch();
    }

    /// Строка документа по ресурсу с текущей ценой справочника
    pub fn line_for(&self, quantity: f64) -> DocumentLine {
        DocumentLine {
            resource_id: self.to_string_id(),
            resource_code: self.base.code.clone(),
            resource_description: self.base.description.clone(),
            unit: self.unit.clone(),
            quantity,
            unit_cost: self.unit_cost,
        }
    }
}

impl AggregateRoot for Resource {
    type Id = ResourceId;

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
        "a001"
    }

    fn collection_name() -> &'static str {
        "resource"
    }

    fn element_name() -> &'static str {
        "Recurso"
    }

    fn list_name() -> &'static str {
        "Recursos"
    }
}

// ============================================================================
// DTO
// ============================================================================

/// DTO формы ресурса (создание и редактирование)
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ResourceDto {
    pub id: Option<String>,
    pub code: Option<String>,
    pub description: String,
    pub unit: String,
    pub unit_cost: f64,
    pub category: String,
    pub comment: Option<String>,
}

impl From<&Resource> for ResourceDto {
    fn from(r: &Resource) -> Self {
        Self {
            id: Some(r.base.id.as_string()),
            code: Some(r.base.code.clone()),
            description: r.base.description.clone(),
            unit: r.unit.clone(),
            unit_cost: r.unit_cost,
            category: r.category.clone(),
            comment: r.base.comment.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Resource {
        Resource::new_for_insert(
            "REC-0001".into(),
            "Cemento Portland tipo I".into(),
            "bolsa".into(),
            28.5,
            "Cemento".into(),
            Some("   ".into()),
        )
    }

    #[test]
    fn test_new_resource_is_valid() {
        let r = sample();
        assert!(r.validate().is_ok());
        assert_eq!(r.base.comment, None);
        assert_eq!(Resource::full_name(), "a001_resource");
        assert_eq!(Resource::api_path(), "/api/resource");
    }

    #[test]
    fn test_line_for_copies_resource_snapshot() {
        let r = sample();
        let line = r.line_for(10.0);
        assert_eq!(line.resource_id, r.to_string_id());
        assert_eq!(line.resource_code, "REC-0001");
        assert_eq!(line.unit, "bolsa");
        assert_eq!(line.amount(), 285.0);
    }

    #[test]
    fn test_validate_rejects_negative_cost() {
        let mut r = sample();
        r.unit_cost = -1.0;
        assert!(r.validate().is_err());
    }

    #[test]
    fn test_update_keeps_code_when_dto_code_is_empty() {
        let mut r = sample();
        let mut dto = ResourceDto::from(&r);
        dto.code = Some(String::new());
        dto.description = "Cemento Portland tipo IP".into();
        r.update(&dto);
        assert_eq!(r.base.code, "REC-0001");
        assert_eq!(r.base.description, "Cemento Portland tipo IP");
    }
}
