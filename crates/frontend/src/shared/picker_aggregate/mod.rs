//! Выбор записей справочников (ресурсы, поставщики, склады).
//!
//! ```rust,ignore
//! <GenericAggregatePicker
//!     items=resources
//!     detail_title="Unidad"
//!     on_confirm=Callback::new(move |r: Resource| add_line(r))
//!     on_cancel=Callback::new(move |_| show_picker.set(false))
//! />
//! ```

pub mod component;
pub mod traits;

pub use component::GenericAggregatePicker;
pub use traits::{AggregatePickerResult, TableDisplayable};
