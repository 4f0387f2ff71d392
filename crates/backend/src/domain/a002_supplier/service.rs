use super::repository;
use crate::shared::error::ServiceError;
use contracts::domain::a002_supplier::aggregate::{Supplier, SupplierDto};
use uuid::Uuid;

/// RUC хранится только цифрами
fn normalize_tax_id(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

fn new_from_dto(dto: SupplierDto) -> Result<Supplier, ServiceError> {
    let tax_id = normalize_tax_id(&dto.tax_id);
    let code = dto
        .code
        .filter(|c| !c.trim().is_empty())
        .unwrap_or_else(|| {
            if tax_id.is_empty() {
                format!("PRV-{}", &Uuid::new_v4().simple().to_string()[..8].to_uppercase())
            } else {
                format!("PRV-{}", tax_id)
            }
        });
    let aggregate = Supplier::new_for_insert(
        code,
        dto.description,
        tax_id,
        dto.phone,
        dto.email.trim().to_string(),
        dto.address,
        dto.comment,
    );
    aggregate.validate().map_err(ServiceError::Validation)?;
    Ok(aggregate)
}

pub async fn create(dto: SupplierDto) -> anyhow::Result<Supplier> {
    let mut aggregate = new_from_dto(dto)?;
    if repository::get_by_code(&aggregate.base.code).await?.is_some() {
        return Err(
            ServiceError::Validation(format!("El código {} ya existe", aggregate.base.code)).into(),
        );
    }
    aggregate.before_write();
    repository::insert(&aggregate).await?;
    tracing::info!("Supplier created: {} {}", aggregate.base.code, aggregate.base.description);
    Ok(aggregate)
}

pub async fn update(dto: SupplierDto) -> anyhow::Result<Supplier> {
    let id = dto
        .id
        .as_deref()
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| ServiceError::Validation("Identificador inválido".into()))?;

    let mut aggregate = get(id).await?;
    aggregate.update(&dto);
    aggregate.tax_id = normalize_tax_id(&aggregate.tax_id);
    aggregate.validate().map_err(ServiceError::Validation)?;

    aggregate.before_write();
    aggregate.base.metadata.increment_version();
    repository::update(&aggregate).await?;
    Ok(aggregate)
}

pub async fn upsert(dto: SupplierDto) -> anyhow::Result<Supplier> {
    if dto.id.is_some() {
        update(dto).await
    } else {
        create(dto).await
    }
}

pub async fn get(id: Uuid) -> anyhow::Result<Supplier> {
    repository::get_by_id(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("Proveedor".into()).into())
}

/// Поставщик по строковому id из документа
pub async fn get_by_ref(id: &str) -> anyhow::Result<Supplier> {
    let uuid = Uuid::parse_str(id).map_err(|_| ServiceError::NotFound("Proveedor".into()))?;
    get(uuid).await
}

pub async fn list_all() -> anyhow::Result<Vec<Supplier>> {
    repository::list_all().await
}

pub async fn delete(id: Uuid) -> anyhow::Result<()> {
    if !repository::soft_delete(id).await? {
        return Err(ServiceError::NotFound("Proveedor".into()).into());
    }
    Ok(())
}

pub async fn insert_test_data() -> anyhow::Result<Vec<Supplier>> {
    let data = vec![
        SupplierDto {
            id: None,
            code: Some("PRV-001".into()),
            description: "Aceros Arequipa S.A.".into(),
            tax_id: "20370146994".into(),
            phone: "01 517 1800".into(),
            email: "ventas@acerosarequipa.com".into(),
            address: "Av. Enrique Meiggs 297, Callao".into(),
            comment: None,
        },
        SupplierDto {
            id: None,
            code: Some("PRV-002".into()),
            description: "Unión de Concreteras S.A.".into(),
            tax_id: "20297543653".into(),
            phone: "01 411 3000".into(),
            email: "pedidos@unicon.com.pe".into(),
            address: "Av. Separadora Industrial 2575, Ate".into(),
            comment: Some("Entrega en obra con mixer".into()),
        },
        SupplierDto {
            id: None,
            code: Some("PRV-003".into()),
            description: "Ferretería El Constructor".into(),
            tax_id: String::new(),
            phone: "987 654 321".into(),
            email: String::new(),
            address: "Jr. Huallaga 850, Cercado de Lima".into(),
            comment: Some("Compras menores al contado".into()),
        },
    ];

    let mut suppliers = Vec::with_capacity(data.len());
    for dto in data {
        let code = dto.code.clone().unwrap_or_default();
        let supplier = match repository::get_by_code(&code).await? {
            Some(existing) => existing,
            None => create(dto).await?,
        };
        suppliers.push(supplier);
    }
    Ok(suppliers)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto(tax_id: &str) -> SupplierDto {
        SupplierDto {
            description: "Distribuidora Norte".into(),
            tax_id: tax_id.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_tax_id_is_normalized() {
        assert_eq!(normalize_tax_id("20-370146994 "), "20370146994");
        let supplier = new_from_dto(dto("20 370 146 994")).unwrap();
        assert_eq!(supplier.tax_id, "20370146994");
        assert_eq!(supplier.base.code, "PRV-20370146994");
    }

    #[test]
    fn test_supplier_without_ruc_gets_random_code() {
        let supplier = new_from_dto(dto("")).unwrap();
        assert!(supplier.base.code.starts_with("PRV-"));
        assert!(supplier.tax_id.is_empty());
    }

    #[test]
    fn test_short_ruc_is_rejected() {
        assert!(matches!(
            new_from_dto(dto("12345")),
            Err(ServiceError::Validation(_))
        ));
    }
}
