//! Форма ресурса (создание и редактирование)
//!
//! - model.rs: обращения к API
//! - view_model.rs: состояние формы и команды
//! - view.rs: компонент Leptos

mod model;
mod view;
mod view_model;

pub use view::ResourceDetails;
pub use view_model::ResourceDetailsViewModel;
