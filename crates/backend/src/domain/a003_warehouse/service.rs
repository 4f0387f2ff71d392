use super::repository;
use crate::shared::error::ServiceError;
use contracts::domain::a003_warehouse::aggregate::{Warehouse, WarehouseDto};
use uuid::Uuid;

fn new_from_dto(dto: WarehouseDto) -> Result<Warehouse, ServiceError> {
    let prefix = if dto.is_site { "OBR" } else { "ALM" };
    let code = dto
        .code
        .filter(|c| !c.trim().is_empty())
        .unwrap_or_else(|| {
            format!(
                "{}-{}",
                prefix,
                &Uuid::new_v4().simple().to_string()[..6].to_uppercase()
            )
        });
    let aggregate =
        Warehouse::new_for_insert(code, dto.description, dto.address, dto.is_site, dto.comment);
    aggregate.validate().map_err(ServiceError::Validation)?;
    Ok(aggregate)
}

pub async fn create(dto: WarehouseDto) -> anyhow::Result<Warehouse> {
    let mut aggregate = new_from_dto(dto)?;
    if repository::get_by_code(&aggregate.base.code).await?.is_some() {
        return Err(
            ServiceError::Validation(format!("El código {} ya existe", aggregate.base.code)).into(),
        );
    }
    aggregate.before_write();
    repository::insert(&aggregate).await?;
    tracing::info!("Warehouse created: {} {}", aggregate.base.code, aggregate.base.description);
    Ok(aggregate)
}

pub async fn update(dto: WarehouseDto) -> anyhow::Result<Warehouse> {
    let id = dto
        .id
        .as_deref()
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| ServiceError::Validation("Identificador inválido".into()))?;

    let mut aggregate = get(id).await?;
    aggregate.update(&dto);
    aggregate.validate().map_err(ServiceError::Validation)?;

    aggregate.before_write();
    aggregate.base.metadata.increment_version();
    repository::update(&aggregate).await?;
    Ok(aggregate)
}

pub async fn upsert(dto: WarehouseDto) -> anyhow::Result<Warehouse> {
    if dto.id.is_some() {
        update(dto).await
    } else {
        create(dto).await
    }
}

pub async fn get(id: Uuid) -> anyhow::Result<Warehouse> {
    repository::get_by_id(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("Almacén".into()).into())
}

/// Склад по строковому id из документа; пустой или чужой id дает NotFound
pub async fn get_by_ref(id: &str) -> anyhow::Result<Warehouse> {
    let uuid = Uuid::parse_str(id).map_err(|_| ServiceError::NotFound("Almacén".into()))?;
    get(uuid).await
}

pub async fn list_all() -> anyhow::Result<Vec<Warehouse>> {
    repository::list_all().await
}

pub async fn delete(id: Uuid) -> anyhow::Result<()> {
    if !repository::soft_delete(id).await? {
        return Err(ServiceError::NotFound("Almacén".into()).into());
    }
    Ok(())
}

fn test_warehouse(code: &str, description: &str, address: &str, is_site: bool) -> WarehouseDto {
    WarehouseDto {
        id: None,
        code: Some(code.into()),
        description: description.into(),
        address: address.into(),
        is_site,
        comment: None,
    }
}

pub async fn insert_test_data() -> anyhow::Result<Vec<Warehouse>> {
    let data = vec![
        test_warehouse("ALM-CEN", "Almacén central", "Av. Argentina 2450, Callao", false),
        test_warehouse("OBR-MIR", "Obra Edificio Miraflores", "Calle Berlín 340, Miraflores", true),
        test_warehouse("OBR-SUR", "Obra Condominio Surco", "Av. Caminos del Inca 1200, Surco", true),
    ];

    let mut warehouses = Vec::with_capacity(data.len());
    for dto in data {
        let code = dto.code.clone().unwrap_or_default();
        let warehouse = match repository::get_by_code(&code).await? {
            Some(existing) => existing,
            None => create(dto).await?,
        };
        warehouses.push(warehouse);
    }
    Ok(warehouses)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_code_depends_on_kind() {
        let mut dto = test_warehouse("", "Obra Chorrillos", "", true);
        dto.code = None;
        assert!(new_from_dto(dto).unwrap().base.code.starts_with("OBR-"));

        let dto = test_warehouse(" ", "Depósito Lurín", "", false);
        assert!(new_from_dto(dto).unwrap().base.code.starts_with("ALM-"));
    }

    #[test]
    fn test_name_is_required() {
        let dto = test_warehouse("ALM-X", "  ", "", false);
        assert!(matches!(new_from_dto(dto), Err(ServiceError::Validation(_))));
    }
}
