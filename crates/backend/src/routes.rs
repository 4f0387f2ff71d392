use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers;

/// Конфигурация всех роутов приложения
pub fn configure_routes() -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // CATALOGS
        // ========================================
        .route(
            "/api/resource",
            get(handlers::a001_resource::list_all).post(handlers::a001_resource::upsert),
        )
        .route(
            "/api/resource/:id",
            get(handlers::a001_resource::get_by_id).delete(handlers::a001_resource::delete),
        )
        .route(
            "/api/supplier",
            get(handlers::a002_supplier::list_all).post(handlers::a002_supplier::upsert),
        )
        .route(
            "/api/supplier/:id",
            get(handlers::a002_supplier::get_by_id).delete(handlers::a002_supplier::delete),
        )
        .route(
            "/api/warehouse",
            get(handlers::a003_warehouse::list_all).post(handlers::a003_warehouse::upsert),
        )
        .route(
            "/api/warehouse/:id",
            get(handlers::a003_warehouse::get_by_id).delete(handlers::a003_warehouse::delete),
        )
        // ========================================
        // DOCUMENTS
        // ========================================
        // Requisition
        .route(
            "/api/requisition",
            get(handlers::a004_requisition::list).post(handlers::a004_requisition::upsert),
        )
        .route(
            "/api/requisition/:id",
            get(handlers::a004_requisition::get_by_id).delete(handlers::a004_requisition::delete),
        )
        .route(
            "/api/requisition/:id/lines",
            get(handlers::a004_requisition::get_lines).put(handlers::a004_requisition::set_lines),
        )
        .route(
            "/api/requisition/:id/status",
            post(handlers::a004_requisition::change_status),
        )
        // Transfer
        .route(
            "/api/transfer",
            get(handlers::a005_transfer::list).post(handlers::a005_transfer::upsert),
        )
        .route(
            "/api/transfer/by-warehouse/:warehouse_id",
            get(handlers::a005_transfer::list_by_warehouse),
        )
        .route(
            "/api/transfer/:id",
            get(handlers::a005_transfer::get_by_id).delete(handlers::a005_transfer::delete),
        )
        .route(
            "/api/transfer/:id/lines",
            get(handlers::a005_transfer::get_lines).put(handlers::a005_transfer::set_lines),
        )
        .route(
            "/api/transfer/:id/status",
            post(handlers::a005_transfer::change_status),
        )
        // Purchase order
        .route(
            "/api/purchase_order",
            get(handlers::a006_purchase_order::list).post(handlers::a006_purchase_order::upsert),
        )
        .route(
            "/api/purchase_order/from-requisition",
            post(handlers::a006_purchase_order::create_from_requisition),
        )
        .route(
            "/api/purchase_order/by-requisition/:requisition_id",
            get(handlers::a006_purchase_order::list_by_requisition),
        )
        .route(
            "/api/purchase_order/:id",
            get(handlers::a006_purchase_order::get_by_id)
                .delete(handlers::a006_purchase_order::delete),
        )
        .route(
            "/api/purchase_order/:id/lines",
            get(handlers::a006_purchase_order::get_lines)
                .put(handlers::a006_purchase_order::set_lines),
        )
        .route(
            "/api/purchase_order/:id/status",
            post(handlers::a006_purchase_order::change_status),
        )
        // ========================================
        // UTILITIES
        // ========================================
        .route("/api/testdata", post(handlers::testdata::insert_test_data))
}
