use axum::{extract::Path, Json};
use contracts::domain::a003_warehouse::aggregate::{Warehouse, WarehouseDto};

use crate::domain::a003_warehouse;
use crate::shared::error::{parse_id, ApiError, ApiResult};

/// GET /api/warehouse
pub async fn list_all() -> ApiResult<Vec<Warehouse>> {
    Ok(Json(a003_warehouse::service::list_all().await?))
}

/// GET /api/warehouse/:id
pub async fn get_by_id(Path(id): Path<String>) -> ApiResult<Warehouse> {
    let uuid = parse_id(&id)?;
    Ok(Json(a003_warehouse::service::get(uuid).await?))
}

/// POST /api/warehouse
pub async fn upsert(Json(dto): Json<WarehouseDto>) -> ApiResult<Warehouse> {
    tracing::debug!("Warehouse upsert: id={:?}, description={}", dto.id, dto.description);
    Ok(Json(a003_warehouse::service::upsert(dto).await?))
}

/// DELETE /api/warehouse/:id
pub async fn delete(Path(id): Path<String>) -> Result<(), ApiError> {
    let uuid = parse_id(&id)?;
    a003_warehouse::service::delete(uuid).await?;
    Ok(())
}
