//! Связка `FilterStore` с реактивной системой Leptos.
//!
//! Хранилище живет в `StoredValue` страницы, его состояние зеркалируется в
//! `RwSignal` через подписку. Подписка снимается в `on_cleanup`.

use super::errors::ValidationError;
use super::filter_state::{FilterState, FilterStore};
use chrono::NaiveDate;
use leptos::prelude::*;

#[derive(Clone, Copy)]
pub struct FilterHandle {
    store: StoredValue<FilterStore>,
    state: RwSignal<FilterState>,
    today: NaiveDate,
}

/// Создать хранилище фильтров страницы
pub fn use_filter_store(today: NaiveDate) -> FilterHandle {
    let store = StoredValue::new(FilterStore::new(today));
    let state = RwSignal::new(FilterState::default());

    let subscription = store.try_update_value(|s| {
        s.subscribe(move |next: &FilterState| state.set(next.clone()))
    });

    on_cleanup(move || {
        if let Some(id) = subscription {
            store.try_update_value(|s| s.unsubscribe(id));
        }
    });

    FilterHandle {
        store,
        state,
        today,
    }
}

impl FilterHandle {
    /// Реактивное состояние (для `move ||` в представлениях)
    pub fn state(&self) -> FilterState {
        self.state.get()
    }

    pub fn signal(&self) -> ReadSignal<FilterState> {
        self.state.read_only()
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn set_start(&self, start: Option<NaiveDate>) -> Result<(), ValidationError> {
        self.store
            .try_update_value(|s| s.set_start(start))
            .unwrap_or(Ok(()))
    }

    pub fn set_end(&self, end: Option<NaiveDate>) -> Result<(), ValidationError> {
        self.store
            .try_update_value(|s| s.set_end(end))
            .unwrap_or(Ok(()))
    }

    pub fn set_range(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<(), ValidationError> {
        self.store
            .try_update_value(|s| s.set_range(start, end))
            .unwrap_or(Ok(()))
    }

    pub fn set_column_filter(&self, column: &str, value: &str) {
        self.store
            .try_update_value(|s| s.set_column_filter(column, value));
    }

    pub fn clear(&self) {
        self.store.try_update_value(|s| s.clear());
    }
}
