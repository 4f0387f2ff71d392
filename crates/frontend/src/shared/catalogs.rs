//! Справочники, которые нужны страницам документов: ресурсы, поставщики, склады.
//!
//! Загружаются один раз при открытии страницы, без кэша между вкладками.

use crate::shared::master_detail::{HttpCollection, RemoteCollection};
use crate::shared::picker_aggregate::TableDisplayable;
use contracts::domain::a001_resource::aggregate::{Resource, ResourceDto};
use contracts::domain::a002_supplier::aggregate::{Supplier, SupplierDto};
use contracts::domain::a003_warehouse::aggregate::{Warehouse, WarehouseDto};
use contracts::shared::list_query::ListQuery;
use leptos::prelude::*;
use serde::de::DeserializeOwned;

pub const RESOURCES: HttpCollection<Resource, ResourceDto> = HttpCollection::new("resource");
pub const SUPPLIERS: HttpCollection<Supplier, SupplierDto> = HttpCollection::new("supplier");
pub const WAREHOUSES: HttpCollection<Warehouse, WarehouseDto> = HttpCollection::new("warehouse");

/// Наименование записи справочника по id; неизвестный id показывается как есть
pub fn description_of<T: TableDisplayable>(items: &[T], id: &str) -> String {
    if id.is_empty() {
        return "—".to_string();
    }
    items
        .iter()
        .find(|item| item.id() == id)
        .map(|item| item.description())
        .unwrap_or_else(|| id.to_string())
}

pub struct Catalog<T: Send + Sync + 'static> {
    pub items: RwSignal<Vec<T>>,
    pub loading: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
}

impl<T: Send + Sync + 'static> Clone for Catalog<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Send + Sync + 'static> Copy for Catalog<T> {}

impl<T> Catalog<T>
where
    T: TableDisplayable + Clone + Send + Sync + 'static,
{
    /// Реактивное наименование по id
    pub fn description_of(&self, id: impl Fn() -> String + Send + Sync + 'static) -> Signal<String> {
        let items = self.items;
        Signal::derive(move || items.with(|all| description_of(all, &id())))
    }

    pub fn find(&self, id: &str) -> Option<T> {
        self.items
            .with_untracked(|all| all.iter().find(|item| item.id() == id).cloned())
    }
}

pub fn use_catalog<T, D>(collection: HttpCollection<T, D>) -> Catalog<T>
where
    T: DeserializeOwned + Send + Sync + 'static,
    D: serde::Serialize + 'static,
{
    let catalog = Catalog {
        items: RwSignal::new(Vec::new()),
        loading: RwSignal::new(true),
        error: RwSignal::new(None),
    };
    wasm_bindgen_futures::spawn_local(async move {
        match collection.fetch_all(&ListQuery::default()).await {
            Ok(items) => {
                catalog.items.try_set(items);
            }
            Err(e) => {
                log::warn!("catalog {} failed to load: {}", collection.collection(), e);
                catalog.error.try_set(Some(e.to_string()));
            }
        }
        catalog.loading.try_set(false);
    });
    catalog
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::common::AggregateId;

    #[test]
    fn test_description_of() {
        let w = Warehouse::new_for_insert(
            "A-01".into(),
            "Almacén central".into(),
            String::new(),
            false,
            None,
        );
        let id = w.base.id.as_string();
        let items = vec![w];
        assert_eq!(description_of(&items, &id), "Almacén central");
        assert_eq!(description_of(&items, "missing"), "missing");
        assert_eq!(description_of(&items, ""), "—");
    }
}
