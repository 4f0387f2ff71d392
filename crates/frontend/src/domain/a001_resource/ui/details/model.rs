use crate::shared::master_detail::{HttpCollection, LoadError, RemoteCollection};
use contracts::domain::a001_resource::aggregate::{Resource, ResourceDto};
use contracts::domain::common::AggregateId;

pub const RESOURCES: HttpCollection<Resource, ResourceDto> = HttpCollection::new("resource");

pub async fn fetch_by_id(id: &str) -> Result<Resource, LoadError> {
    RESOURCES.fetch_by_id(id).await
}

pub async fn save_form(dto: &ResourceDto) -> Result<Resource, LoadError> {
    if dto.id.is_some() {
        RESOURCES.update(dto).await
    } else {
        RESOURCES.add(dto).await
    }
}

pub fn to_dto(resource: &Resource) -> ResourceDto {
    ResourceDto {
        id: Some(resource.base.id.as_string()),
        code: Some(resource.base.code.clone()),
        description: resource.base.description.clone(),
        unit: resource.unit.clone(),
        unit_cost: resource.unit_cost,
        category: resource.category.clone(),
        comment: resource.base.comment.clone(),
    }
}
