use axum::extract::{Path, Query};
use axum::Json;
use contracts::domain::a006_purchase_order::aggregate::{
    PurchaseOrder, PurchaseOrderDto, PurchaseOrderFromRequisitionDto,
};
use contracts::domain::common::{DocumentLine, StatusChangeRequest};
use contracts::shared::list_query::ListQuery;

use crate::domain::a006_purchase_order;
use crate::shared::error::{parse_id, ApiError, ApiResult};

/// GET /api/purchase_order?date_from&date_to&status&search
pub async fn list(Query(query): Query<ListQuery>) -> ApiResult<Vec<PurchaseOrder>> {
    Ok(Json(a006_purchase_order::service::list(&query).await?))
}

/// GET /api/purchase_order/:id
pub async fn get_by_id(Path(id): Path<String>) -> ApiResult<PurchaseOrder> {
    let uuid = parse_id(&id)?;
    Ok(Json(a006_purchase_order::service::get(uuid).await?))
}

/// POST /api/purchase_order
pub async fn upsert(Json(dto): Json<PurchaseOrderDto>) -> ApiResult<PurchaseOrder> {
    Ok(Json(a006_purchase_order::service::upsert(dto).await?))
}

/// DELETE /api/purchase_order/:id
pub async fn delete(Path(id): Path<String>) -> Result<(), ApiError> {
    let uuid = parse_id(&id)?;
    a006_purchase_order::service::delete(uuid).await?;
    Ok(())
}

/// GET /api/purchase_order/:id/lines
pub async fn get_lines(Path(id): Path<String>) -> ApiResult<Vec<DocumentLine>> {
    let uuid = parse_id(&id)?;
    Ok(Json(a006_purchase_order::service::get_lines(uuid).await?))
}

/// PUT /api/purchase_order/:id/lines
pub async fn set_lines(
    Path(id): Path<String>,
    Json(lines): Json<Vec<DocumentLine>>,
) -> ApiResult<PurchaseOrder> {
    let uuid = parse_id(&id)?;
    Ok(Json(a006_purchase_order::service::set_lines(uuid, lines).await?))
}

/// POST /api/purchase_order/:id/status
pub async fn change_status(
    Path(id): Path<String>,
    Json(request): Json<StatusChangeRequest>,
) -> ApiResult<PurchaseOrder> {
    let uuid = parse_id(&id)?;
    Ok(Json(
        a006_purchase_order::service::change_status(uuid, request.status).await?,
    ))
}

/// GET /api/purchase_order/by-requisition/:requisition_id
pub async fn list_by_requisition(
    Path(requisition_id): Path<String>,
) -> ApiResult<Vec<PurchaseOrder>> {
    let uuid = parse_id(&requisition_id)?;
    Ok(Json(
        a006_purchase_order::service::list_by_requisition(uuid).await?,
    ))
}

/// POST /api/purchase_order/from-requisition
pub async fn create_from_requisition(
    Json(dto): Json<PurchaseOrderFromRequisitionDto>,
) -> ApiResult<PurchaseOrder> {
    Ok(Json(
        a006_purchase_order::service::create_from_requisition(dto).await?,
    ))
}
