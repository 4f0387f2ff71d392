pub mod document;
pub mod list_query;
