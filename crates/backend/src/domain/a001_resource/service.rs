use super::repository;
use crate::shared::error::ServiceError;
use contracts::domain::a001_resource::aggregate::{Resource, ResourceDto};
use uuid::Uuid;

fn generated_code() -> String {
    format!("REC-{}", &Uuid::new_v4().simple().to_string()[..8].to_uppercase())
}

/// Новый агрегат из DTO с проверкой; код генерируется, если не задан
fn new_from_dto(dto: ResourceDto) -> Result<Resource, ServiceError> {
    let code = dto
        .code
        .filter(|c| !c.trim().is_empty())
        .unwrap_or_else(generated_code);
    let aggregate = Resource::new_for_insert(
        code,
        dto.description,
        dto.unit,
        dto.unit_cost,
        dto.category,
        dto.comment,
    );
    aggregate.validate().map_err(ServiceError::Validation)?;
    Ok(aggregate)
}

async fn ensure_code_is_free(code: &str, own_id: Option<Uuid>) -> anyhow::Result<()> {
    if let Some(existing) = repository::get_by_code(code).await? {
        if Some(existing.base.id.value()) != own_id {
            return Err(ServiceError::Validation(format!("El código {} ya existe", code)).into());
        }
    }
    Ok(())
}

pub async fn create(dto: ResourceDto) -> anyhow::Result<Resource> {
    let mut aggregate = new_from_dto(dto)?;
    ensure_code_is_free(&aggregate.base.code, None).await?;
    aggregate.before_write();
    repository::insert(&aggregate).await?;
    tracing::info!("Resource created: {} {}", aggregate.base.code, aggregate.base.description);
    Ok(aggregate)
}

pub async fn update(dto: ResourceDto) -> anyhow::Result<Resource> {
    let id = dto
        .id
        .as_deref()
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| ServiceError::Validation("Identificador inválido".into()))?;

    let mut aggregate = get(id).await?;
    aggregate.update(&dto);
    aggregate.validate().map_err(ServiceError::Validation)?;
    ensure_code_is_free(&aggregate.base.code, Some(id)).await?;

    aggregate.before_write();
    aggregate.base.metadata.increment_version();
    repository::update(&aggregate).await?;
    Ok(aggregate)
}

/// POST: с `id` обновление, без него создание
pub async fn upsert(dto: ResourceDto) -> anyhow::Result<Resource> {
    if dto.id.is_some() {
        update(dto).await
    } else {
        create(dto).await
    }
}

pub async fn get(id: Uuid) -> anyhow::Result<Resource> {
    repository::get_by_id(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("Recurso".into()).into())
}

pub async fn list_all() -> anyhow::Result<Vec<Resource>> {
    repository::list_all().await
}

/// Мягкое удаление
pub async fn delete(id: Uuid) -> anyhow::Result<()> {
    if !repository::soft_delete(id).await? {
        return Err(ServiceError::NotFound("Recurso".into()).into());
    }
    Ok(())
}

fn test_resource(code: &str, description: &str, unit: &str, unit_cost: f64, category: &str) -> ResourceDto {
    ResourceDto {
        id: None,
        code: Some(code.into()),
        description: description.into(),
        unit: unit.into(),
        unit_cost,
        category: category.into(),
        comment: None,
    }
}

/// Демонстрационный каталог; уже заведенные коды пропускаются
pub async fn insert_test_data() -> anyhow::Result<Vec<Resource>> {
    let data = vec![
        test_resource("AGR-001", "Arena gruesa", "m3", 65.0, "Agregados"),
        test_resource("AGR-002", "Piedra chancada 1/2\"", "m3", 78.5, "Agregados"),
        test_resource("AGR-003", "Hormigón", "m3", 55.0, "Agregados"),
        test_resource("CEM-001", "Cemento Portland tipo I (42.5 kg)", "bolsa", 29.9, "Cemento"),
        test_resource("ACE-001", "Fierro corrugado 1/2\" x 9 m", "varilla", 42.3, "Acero"),
        test_resource("ACE-002", "Alambre negro N° 16", "kg", 6.8, "Acero"),
        test_resource("LAD-001", "Ladrillo King Kong 18 huecos", "millar", 980.0, "Albañilería"),
        test_resource("SRV-001", "Alquiler de mezcladora", "día", 120.0, "Servicios"),
    ];

    let mut resources = Vec::with_capacity(data.len());
    for dto in data {
        let code = dto.code.clone().unwrap_or_default();
        let resource = match repository::get_by_code(&code).await? {
            Some(existing) => existing,
            None => create(dto).await?,
        };
        resources.push(resource);
    }
    Ok(resources)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_code_is_generated() {
        let mut dto = test_resource("", "Arena fina", "m3", 60.0, "Agregados");
        dto.code = None;
        let resource = new_from_dto(dto).unwrap();
        assert!(resource.base.code.starts_with("REC-"));
        assert_eq!(resource.base.code.len(), "REC-".len() + 8);
    }

    #[test]
    fn test_blank_code_is_generated() {
        let dto = test_resource("  ", "Arena fina", "m3", 60.0, "Agregados");
        assert!(new_from_dto(dto).unwrap().base.code.starts_with("REC-"));
    }

    #[test]
    fn test_invalid_dto_is_a_validation_error() {
        let dto = test_resource("AGR-009", "Arena fina", "m3", -1.0, "Agregados");
        assert!(matches!(new_from_dto(dto), Err(ServiceError::Validation(_))));

        let dto = test_resource("AGR-009", "", "m3", 1.0, "Agregados");
        assert!(matches!(new_from_dto(dto), Err(ServiceError::Validation(_))));
    }
}
