//! Общие типы агрегатов: идентификаторы, метаданные, строки и статусы документов

pub mod aggregate_id;
pub mod aggregate_root;
pub mod base_aggregate;
pub mod document_line;
pub mod document_status;
pub mod entity_metadata;

// Re-exports
pub use aggregate_id::AggregateId;
pub use aggregate_root::AggregateRoot;
pub use base_aggregate::BaseAggregate;
pub use document_line::{lines_total, validate_lines, DocumentLine};
pub use document_status::{DocumentStatus, StatusChangeRequest};
pub use entity_metadata::EntityMetadata;
