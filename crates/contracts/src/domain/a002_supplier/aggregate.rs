use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};

crate::uuid_aggregate_id!(
    /// Уникальный идентификатор поставщика
    SupplierId
);

/// Поставщик (Proveedor)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Supplier {
    #[serde(flatten)]
    pub base: BaseAggregate<SupplierId>,

    /// Налоговый номер (RUC, 11 цифр)
    pub tax_id: String,
    pub phone: String,
    pub email: String,
    pub address: String,
}

impl Supplier {
    pub fn new_for_insert(
        code: String,
        description: String,
        tax_id: String,
        phone: String,
        email: String,
        address: String,
        comment: Option<String>,
    ) -> Self {
        let mut base = BaseAggregate::new(SupplierId::new_v4(), code, description);
        base.set_comment(comment);

        Self {
            base,
            tax_id,
            phone,
            email,
            address,
        }
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    pub fn update(&mut self, dto: &SupplierDto) {
        if let Some(code) = dto.code.as_ref().filter(|c| !c.trim().is_empty()) {
            self.base.code = code.clone();
        }
        self.base.description = dto.description.clone();
        self.base.set_comment(dto.comment.clone());
        self.tax_id = dto.tax_id.clone();
        self.phone = dto.phone.clone();
        self.email = dto.email.clone();
        self.address = dto.address.clone();
    }

    /// Валидация данных
    pub fn validate(&self) -> Result<(), String> {
        if self.base.description.trim().is_empty() {
            return Err("La razón social no puede estar vacía".into());
        }
        if self.base.code.trim().is_empty() {
            return Err("El código no puede estar vacío".into());
        }

        // RUC может быть пустым для поставщиков, заведённых вручную
        if !self.tax_id.trim().is_empty() {
            let digits: String = self.tax_id.chars().filter(|c| c.is_ascii_digit()).collect();
            if digits.len() != 11 {
                return Err("El RUC debe contener 11 dígitos".into());
            }
        }

        if !self.email.trim().is_empty() && !self.email.contains('@') {
            return Err("Correo electrónico inválido".into());
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

impl AggregateRoot for Supplier {
    type Id = SupplierId;

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
        "a002"
    }

    fn collection_name() -> &'static str {
        "supplier"
    }

    fn element_name() -> &'static str {
        "Proveedor"
    }

    fn list_name() -> &'static str {
        "Proveedores"
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct SupplierDto {
    pub id: Option<String>,
    pub code: Option<String>,
    pub description: String,
    pub tax_id: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub comment: Option<String>,
}

impl From<&Supplier> for SupplierDto {
    fn from(s: &Supplier) -> Self {
        Self {
            id: Some(s.base.id.as_string()),
            code: Some(s.base.code.clone()),
            description: s.base.description.clone(),
            tax_id: s.tax_id.clone(),
            phone: s.phone.clone(),
            email: s.email.clone(),
            address: s.address.clone(),
            comment: s.base.comment.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(tax_id: &str) -> Supplier {
        Supplier::new_for_insert(
            "PRV-001".into(),
            "Distribuidora Andina S.A.C.".into(),
            tax_id.into(),
            "01 555 0101".into(),
            "ventas@andina.pe".into(),
            "Av. Industrial 120, Lima".into(),
            None,
        )
    }

    #[test]
    fn test_tax_id_must_have_eleven_digits() {
        assert!(sample("20123456789").validate().is_ok());
        assert!(sample("2012345").validate().is_err());
        assert!(sample("").validate().is_ok());
    }

    #[test]
    fn test_email_must_contain_at_sign() {
        let mut s = sample("20123456789");
        s.email = "ventas.andina.pe".into();
        assert!(s.validate().is_err());
    }
}
