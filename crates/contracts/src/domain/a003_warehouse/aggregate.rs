use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};

crate::uuid_aggregate_id!(
    /// Уникальный идентификатор склада
    WarehouseId
);

/// Склад или строительная площадка (Almacén / Obra)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Warehouse {
    #[serde(flatten)]
    pub base: BaseAggregate<WarehouseId>,

    pub address: String,

    /// true: площадка объекта (obra), false, центральный склад
    pub is_site: bool,
}

impl Warehouse {
    pub fn new_for_insert(
        code: String,
        description: String,
        address: String,
        is_site: bool,
        comment: Option<String>,
    ) -> Self {
        let mut base = BaseAggregate::new(WarehouseId::new_v4(), code, description);
        base.set_comment(comment);

        Self {
            base,
            address,
            is_site,
        }
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    pub fn update(&mut self, dto: &WarehouseDto) {
        if let Some(code) = dto.code.as_ref().filter(|c| !c.trim().is_empty()) {
            self.base.code = code.clone();
        }
        self.base.description = dto.description.clone();
        self.base.set_comment(dto.comment.clone());
        self.address = dto.address.clone();
        self.is_site = dto.is_site;
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.base.description.trim().is_empty() {
            return Err("El nombre del almacén no puede estar vacío".into());
        }
        if self.base.code.trim().is_empty() {
            return Err("El código no puede estar vacío".into());
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

impl AggregateRoot for Warehouse {
    type Id = WarehouseId;

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
        "a003"
    }

    fn collection_name() -> &'static str {
        "warehouse"
    }

    fn element_name() -> &'static str {
        "Almacén"
    }

    fn list_name() -> &'static str {
        "Almacenes"
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct WarehouseDto {
    pub id: Option<String>,
    pub code: Option<String>,
    pub description: String,
    pub address: String,
    pub is_site: bool,
    pub comment: Option<String>,
}

impl From<&Warehouse> for WarehouseDto {
    fn from(w: &Warehouse) -> Self {
        Self {
            id: Some(w.base.id.as_string()),
            code: Some(w.base.code.clone()),
            description: w.base.description.clone(),
            address: w.address.clone(),
            is_site: w.is_site,
            comment: w.base.comment.clone(),
        }
    }
}
