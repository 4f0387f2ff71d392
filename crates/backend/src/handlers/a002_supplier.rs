use axum::{extract::Path, Json};
use contracts::domain::a002_supplier::aggregate::{Supplier, SupplierDto};

use crate::domain::a002_supplier;
use crate::shared::error::{parse_id, ApiError, ApiResult};

/// GET /api/supplier
pub async fn list_all() -> ApiResult<Vec<Supplier>> {
    Ok(Json(a002_supplier::service::list_all().await?))
}

/// GET /api/supplier/:id
pub async fn get_by_id(Path(id): Path<String>) -> ApiResult<Supplier> {
    let uuid = parse_id(&id)?;
    Ok(Json(a002_supplier::service::get(uuid).await?))
}

/// POST /api/supplier
pub async fn upsert(Json(dto): Json<SupplierDto>) -> ApiResult<Supplier> {
    tracing::debug!("Supplier upsert: id={:?}, description={}", dto.id, dto.description);
    Ok(Json(a002_supplier::service::upsert(dto).await?))
}

/// DELETE /api/supplier/:id
pub async fn delete(Path(id): Path<String>) -> Result<(), ApiError> {
    let uuid = parse_id(&id)?;
    a002_supplier::service::delete(uuid).await?;
    Ok(())
}
