use axum::extract::{Path, Query};
use axum::Json;
use contracts::domain::a005_transfer::aggregate::{Transfer, TransferDto};
use contracts::domain::common::{DocumentLine, StatusChangeRequest};
use contracts::shared::list_query::ListQuery;

use crate::domain::a005_transfer;
use crate::shared::error::{parse_id, ApiError, ApiResult};

/// GET /api/transfer?date_from&date_to&status&search
pub async fn list(Query(query): Query<ListQuery>) -> ApiResult<Vec<Transfer>> {
    Ok(Json(a005_transfer::service::list(&query).await?))
}

/// GET /api/transfer/:id
pub async fn get_by_id(Path(id): Path<String>) -> ApiResult<Transfer> {
    let uuid = parse_id(&id)?;
    Ok(Json(a005_transfer::service::get(uuid).await?))
}

/// POST /api/transfer
pub async fn upsert(Json(dto): Json<TransferDto>) -> ApiResult<Transfer> {
    Ok(Json(a005_transfer::service::upsert(dto).await?))
}

/// DELETE /api/transfer/:id
pub async fn delete(Path(id): Path<String>) -> Result<(), ApiError> {
    let uuid = parse_id(&id)?;
    a005_transfer::service::delete(uuid).await?;
    Ok(())
}

/// GET /api/transfer/:id/lines
pub async fn get_lines(Path(id): Path<String>) -> ApiResult<Vec<DocumentLine>> {
    let uuid = parse_id(&id)?;
    Ok(Json(a005_transfer::service::get_lines(uuid).await?))
}

/// PUT /api/transfer/:id/lines
pub async fn set_lines(
    Path(id): Path<String>,
    Json(lines): Json<Vec<DocumentLine>>,
) -> ApiResult<Transfer> {
    let uuid = parse_id(&id)?;
    Ok(Json(a005_transfer::service::set_lines(uuid, lines).await?))
}

/// POST /api/transfer/:id/status
pub async fn change_status(
    Path(id): Path<String>,
    Json(request): Json<StatusChangeRequest>,
) -> ApiResult<Transfer> {
    let uuid = parse_id(&id)?;
    Ok(Json(
        a005_transfer::service::change_status(uuid, request.status).await?,
    ))
}

/// GET /api/transfer/by-warehouse/:warehouse_id
pub async fn list_by_warehouse(Path(warehouse_id): Path<String>) -> ApiResult<Vec<Transfer>> {
    let uuid = parse_id(&warehouse_id)?;
    Ok(Json(a005_transfer::service::list_by_warehouse(uuid).await?))
}
