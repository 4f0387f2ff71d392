use axum::Json;

use crate::shared::error::ApiResult;
use crate::usecases::u901_demo_data::{seed_demo_data, DemoDataSummary};

/// POST /api/testdata
pub async fn insert_test_data() -> ApiResult<DemoDataSummary> {
    Ok(Json(seed_demo_data().await?))
}
