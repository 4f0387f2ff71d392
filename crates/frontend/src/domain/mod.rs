pub mod a001_resource;
pub mod a002_supplier;
pub mod a003_warehouse;
pub mod a004_requisition;
pub mod a005_transfer;
pub mod a006_purchase_order;
