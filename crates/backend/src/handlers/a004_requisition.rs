use axum::extract::{Path, Query};
use axum::Json;
use contracts::domain::a004_requisition::aggregate::{Requisition, RequisitionDto};
use contracts::domain::common::{DocumentLine, StatusChangeRequest};
use contracts::shared::list_query::ListQuery;

use crate::domain::a004_requisition;
use crate::shared::error::{parse_id, ApiError, ApiResult};

/// GET /api/requisition?date_from&date_to&status&search
pub async fn list(Query(query): Query<ListQuery>) -> ApiResult<Vec<Requisition>> {
    Ok(Json(a004_requisition::service::list(&query).await?))
}

/// GET /api/requisition/:id
pub async fn get_by_id(Path(id): Path<String>) -> ApiResult<Requisition> {
    let uuid = parse_id(&id)?;
    Ok(Json(a004_requisition::service::get(uuid).await?))
}

/// POST /api/requisition
pub async fn upsert(Json(dto): Json<RequisitionDto>) -> ApiResult<Requisition> {
    Ok(Json(a004_requisition::service::upsert(dto).await?))
}

/// DELETE /api/requisition/:id
pub async fn delete(Path(id): Path<String>) -> Result<(), ApiError> {
    let uuid = parse_id(&id)?;
    a004_requisition::service::delete(uuid).await?;
    Ok(())
}

/// GET /api/requisition/:id/lines
pub async fn get_lines(Path(id): Path<String>) -> ApiResult<Vec<DocumentLine>> {
    let uuid = parse_id(&id)?;
    Ok(Json(a004_requisition::service::get_lines(uuid).await?))
}

/// PUT /api/requisition/:id/lines
pub async fn set_lines(
    Path(id): Path<String>,
    Json(lines): Json<Vec<DocumentLine>>,
) -> ApiResult<Requisition> {
    let uuid = parse_id(&id)?;
    Ok(Json(a004_requisition::service::set_lines(uuid, lines).await?))
}

/// POST /api/requisition/:id/status
pub async fn change_status(
    Path(id): Path<String>,
    Json(request): Json<StatusChangeRequest>,
) -> ApiResult<Requisition> {
    let uuid = parse_id(&id)?;
    Ok(Json(
        a004_requisition::service::change_status(uuid, request.status).await?,
    ))
}
