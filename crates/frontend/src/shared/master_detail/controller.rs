//! Реактивная обвязка координатора для страниц документов.
//!
//! Координатор лежит в `RwSignal`, запросы идут через `HttpCollection`,
//! ответы возвращаются в координатор вместе с тикетом. Если вкладку уже
//! закрыли, `try_update` на уничтоженном сигнале просто ничего не делает.

use super::columns::{Column, SortState};
use super::coordinator::{Coordinator, DetailState, DetailTicket, ListState};
use super::errors::LoadError;
use super::filter_state::FilterState;
use super::item::ListItem;
use super::loader::{HttpCollection, RemoteCollection};
use contracts::domain::common::{DocumentLine, DocumentStatus};
use contracts::shared::list_query::ListQuery;
use leptos::prelude::*;
use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen_futures::spawn_local;

/// Откуда грузится главный список
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListSource {
    All,
    /// `GET /api/<collection>/<parent>/<id>`
    ByParent { parent: &'static str, id: String },
}

pub struct MasterDetailController<I: ListItem, D: 'static> {
    coordinator: RwSignal<Coordinator<I, DocumentLine>>,
    /// Итог последнего действия над документом (смена статуса, удаление)
    notice: RwSignal<Option<String>>,
    source: RwSignal<ListSource>,
    collection: HttpCollection<I, D>,
}

impl<I: ListItem, D: 'static> Clone for MasterDetailController<I, D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<I: ListItem, D: 'static> Copy for MasterDetailController<I, D> {}

impl<I, D> MasterDetailController<I, D>
where
    I: ListItem + DeserializeOwned,
    D: Serialize + 'static,
{
    pub fn new(collection: HttpCollection<I, D>, sort: SortState) -> Self {
        Self {
            coordinator: RwSignal::new(Coordinator::new(sort)),
            notice: RwSignal::new(None),
            source: RwSignal::new(ListSource::All),
            collection,
        }
    }

    pub fn collection(&self) -> HttpCollection<I, D> {
        self.collection
    }

    // ------------------------------------------------------------------
    // Загрузка
    // ------------------------------------------------------------------

    pub fn load_list(&self) {
        let this = *self;
        let source = self.source.get_untracked();
        let Some(ticket) = self.coordinator.try_update(|c| c.begin_list_load()) else {
            return;
        };
        spawn_local(async move {
            let result = match &source {
                ListSource::All => this.collection.fetch_all(&ListQuery::default()).await,
                ListSource::ByParent { parent, id } => {
                    this.collection.fetch_by_parent_id(parent, id).await
                }
            };
            this.coordinator
                .try_update(|c| c.finish_list_load(ticket, result));
        });
    }

    /// Сменить источник списка и перезагрузить его
    pub fn set_source(&self, source: ListSource) {
        self.source.set(source);
        self.load_list();
    }

    pub fn select(&self, id: String) {
        let Some(ticket) = self.coordinator.try_update(|c| c.select(&id)).flatten() else {
            return;
        };
        self.load_detail(ticket);
    }

    fn load_detail(&self, ticket: DetailTicket) {
        let this = *self;
        spawn_local(async move {
            let result = this.collection.fetch_lines(&ticket.id).await;
            this.coordinator.try_update(|c| c.apply_detail(&ticket, result));
        });
    }

    pub fn deselect(&self) {
        self.coordinator.update(|c| c.deselect());
    }

    // ------------------------------------------------------------------
    // Правки строк
    // ------------------------------------------------------------------

    // Текст ошибки валидации координатор кладет в message, здесь только лог
    pub fn add_line(&self, line: DocumentLine) {
        self.coordinator.update(|c| {
            if let Err(e) = c.add_row(line) {
                log::debug!("line not added: {}", e);
            }
        });
    }

    pub fn remove_line(&self, key: String) {
        self.coordinator.update(|c| {
            if let Err(e) = c.remove_row(&key) {
                log::debug!("line {} not removed: {}", key, e);
            }
        });
    }

    pub fn set_quantity(&self, key: String, quantity: f64) {
        self.coordinator.update(|c| {
            if let Err(e) = c.set_quantity(&key, quantity) {
                log::debug!("quantity for {} rejected: {}", key, e);
            }
        });
    }

    pub fn set_unit_cost(&self, key: String, unit_cost: f64) {
        self.coordinator.update(|c| {
            if let Err(e) = c.set_unit_cost(&key, unit_cost) {
                log::debug!("unit cost for {} rejected: {}", key, e);
            }
        });
    }

    pub fn cancel(&self) {
        self.coordinator.update(|c| c.cancel());
    }

    pub fn save(&self) {
        let Some(Ok(request)) = self.coordinator.try_update(|c| c.begin_save()) else {
            return;
        };
        let this = *self;
        spawn_local(async move {
            let result = this
                .collection
                .save_lines(&request.id, &request.rows)
                .await;
            if let Some(ticket) = this
                .coordinator
                .try_update(|c| c.complete_save(&request, result))
                .flatten()
            {
                this.load_detail(ticket);
            }
        });
    }

    // ------------------------------------------------------------------
    // Действия над документом
    // ------------------------------------------------------------------

    pub fn change_status(&self, status: DocumentStatus) {
        let Some(id) = self.selected_id_untracked() else {
            return;
        };
        let this = *self;
        self.notice.set(None);
        spawn_local(async move {
            match this.collection.change_status(&id, status).await {
                Ok(item) => {
                    log::info!("document {} moved to {}", id, status);
                    this.merge(item);
                }
                Err(e) => {
                    this.notice.try_set(Some(e.to_string()));
                }
            }
        });
    }

    pub fn delete_selected(&self) {
        let Some(id) = self.selected_id_untracked() else {
            return;
        };
        let this = *self;
        spawn_local(async move {
            match this.collection.delete(&id).await {
                Ok(()) => {
                    this.coordinator.try_update(|c| c.remove_item(&id));
                }
                Err(e) => {
                    this.notice.try_set(Some(e.to_string()));
                }
            }
        });
    }

    /// Каноническая запись после мутации, выполненной вне контроллера
    pub fn merge(&self, item: I) {
        self.coordinator.try_update(|c| c.merge_item(item));
    }

    /// Новая запись: в список и сразу в выбор
    pub fn merge_and_select(&self, item: I) {
        let id = item.id();
        self.merge(item);
        self.select(id);
    }

    /// Выбор записи справочника: строк нет, деталь сразу готова
    pub fn select_record(&self, id: String) {
        self.coordinator.update(|c| {
            c.select_with_rows(&id, Vec::new());
        });
    }

    pub fn toggle_sort(&self, column: String) {
        self.coordinator.update(|c| c.toggle_sort(&column));
    }

    pub fn set_notice(&self, notice: Option<String>) {
        self.notice.set(notice);
    }

    /// Выбрана ли еще запись `id`; для ответов, пришедших после смены выбора
    pub fn is_selected_untracked(&self, id: &str) -> bool {
        self.coordinator
            .try_with_untracked(|c| c.is_selected(id))
            .unwrap_or(false)
    }

    fn selected_id_untracked(&self) -> Option<String> {
        self.coordinator
            .with_untracked(|c| c.selected_id().map(str::to_string))
    }
}

// Производные сигналы для представлений
impl<I: ListItem, D: 'static> MasterDetailController<I, D> {
    pub fn visible(
        &self,
        filters: ReadSignal<FilterState>,
        columns: StoredValue<Vec<Column<I>>>,
    ) -> Signal<Vec<I>> {
        let coordinator = self.coordinator;
        Signal::derive(move || {
            let filters = filters.get();
            columns.with_value(|cols| coordinator.with(|c| c.visible_items(&filters, cols)))
        })
    }

    pub fn items(&self) -> Signal<Vec<I>> {
        let coordinator = self.coordinator;
        Signal::derive(move || coordinator.with(|c| c.items().to_vec()))
    }

    pub fn loading(&self) -> Signal<bool> {
        let coordinator = self.coordinator;
        Signal::derive(move || coordinator.with(|c| *c.list_state() == ListState::Loading))
    }

    pub fn list_error(&self) -> Signal<Option<LoadError>> {
        let coordinator = self.coordinator;
        Signal::derive(move || {
            coordinator.with(|c| match c.list_state() {
                ListState::Failed(e) => Some(e.clone()),
                _ => None,
            })
        })
    }

    pub fn sort(&self) -> Signal<SortState> {
        let coordinator = self.coordinator;
        Signal::derive(move || coordinator.with(|c| c.sort().clone()))
    }

    pub fn selected_id(&self) -> Signal<Option<String>> {
        let coordinator = self.coordinator;
        Signal::derive(move || coordinator.with(|c| c.selected_id().map(str::to_string)))
    }

    pub fn selected_item(&self) -> Signal<Option<I>> {
        let coordinator = self.coordinator;
        Signal::derive(move || coordinator.with(|c| c.selected_item().cloned()))
    }

    pub fn detail(&self) -> Signal<DetailState> {
        let coordinator = self.coordinator;
        Signal::derive(move || coordinator.with(|c| c.detail().clone()))
    }

    pub fn rows(&self) -> Signal<Vec<DocumentLine>> {
        let coordinator = self.coordinator;
        Signal::derive(move || coordinator.with(|c| c.rows().to_vec()))
    }

    pub fn total(&self) -> Signal<f64> {
        let coordinator = self.coordinator;
        Signal::derive(move || coordinator.with(|c| c.total()))
    }

    pub fn editable(&self) -> Signal<bool> {
        let coordinator = self.coordinator;
        Signal::derive(move || coordinator.with(|c| c.is_editable()))
    }

    pub fn can_save(&self) -> Signal<bool> {
        let coordinator = self.coordinator;
        Signal::derive(move || coordinator.with(|c| c.can_save()))
    }

    pub fn saving(&self) -> Signal<bool> {
        let coordinator = self.coordinator;
        Signal::derive(move || coordinator.with(|c| c.is_saving()))
    }

    pub fn dirty(&self) -> Signal<bool> {
        let coordinator = self.coordinator;
        Signal::derive(move || coordinator.with(|c| c.is_dirty()))
    }

    pub fn message(&self) -> Signal<Option<String>> {
        let coordinator = self.coordinator;
        Signal::derive(move || coordinator.with(|c| c.message().map(str::to_string)))
    }

    pub fn notice(&self) -> Signal<Option<String>> {
        self.notice.into()
    }
}
