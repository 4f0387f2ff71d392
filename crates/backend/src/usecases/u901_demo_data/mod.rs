//! Демонстрационные данные: каталог и документы во всех статусах.

pub mod executor;

pub use executor::{seed_demo_data, DemoDataSummary};
