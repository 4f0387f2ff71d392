//! Ядро master–detail: фильтры, список, выбор, staged-строки и загрузка.
//!
//! Все модули, кроме `loader`, `reactive` и `controller`, не зависят от браузера и тестируются
//! обычными `#[test]`.

pub mod columns;
pub mod controller;
pub mod coordinator;
pub mod errors;
pub mod filter_state;
pub mod item;
pub mod loader;
pub mod reactive;
pub mod staged;

pub use columns::{CellValue, Column, ColumnKind, SortState};
pub use controller::{ListSource, MasterDetailController};
pub use coordinator::{
    Coordinator, DetailState, DetailTicket, ListState, ListTicket, ResponseOutcome, SaveRequest,
};
pub use errors::{LoadError, ValidationError};
pub use filter_state::{FilterState, FilterStore};
pub use item::{LineItem, ListItem};
pub use loader::{HttpCollection, RemoteCollection};
pub use reactive::{use_filter_store, FilterHandle};
