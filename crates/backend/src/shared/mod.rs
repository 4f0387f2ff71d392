pub mod config;
pub mod data;
pub mod error;
pub mod list_filter;
pub mod numbering;
pub mod request_log;
