//! Форма поставщика: model.rs (API), view_model.rs (состояние и команды), view.rs (UI)

mod model;
mod view;
mod view_model;

pub use view::SupplierDetails;
