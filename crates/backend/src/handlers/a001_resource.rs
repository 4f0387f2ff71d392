use axum::{extract::Path, Json};
use contracts::domain::a001_resource::aggregate::{Resource, ResourceDto};

use crate::domain::a001_resource;
use crate::shared::error::{parse_id, ApiError, ApiResult};

/// GET /api/resource
pub async fn list_all() -> ApiResult<Vec<Resource>> {
    Ok(Json(a001_resource::service::list_all().await?))
}

/// GET /api/resource/:id
pub async fn get_by_id(Path(id): Path<String>) -> ApiResult<Resource> {
    let uuid = parse_id(&id)?;
    Ok(Json(a001_resource::service::get(uuid).await?))
}

/// POST /api/resource
pub async fn upsert(Json(dto): Json<ResourceDto>) -> ApiResult<Resource> {
    tracing::debug!("Resource upsert: id={:?}, description={}", dto.id, dto.description);
    Ok(Json(a001_resource::service::upsert(dto).await?))
}

/// DELETE /api/resource/:id
pub async fn delete(Path(id): Path<String>) -> Result<(), ApiError> {
    let uuid = parse_id(&id)?;
    a001_resource::service::delete(uuid).await?;
    Ok(())
}
