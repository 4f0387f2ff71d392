//! Координатор страницы master–detail.
//!
//! Владеет списком, выбором, состоянием детали, staged-строками и сортировкой.
//! Не знает про Leptos и HTTP: страница вызывает методы, запускает запросы
//! и возвращает ответы обратно вместе с выданным тикетом.
//!
//! Каждый запрос детали получает возрастающий номер. Ответ применяется только
//! если его номер последний и выбранная запись не изменилась; иначе ответ
//! отбрасывается. Поэтому на экране никогда не смешиваются строки двух документов.
//! Загрузки списка нумеруются отдельно: применяется только последняя.

use super::columns::{filter_items, sort_items, Column, SortState};
use super::errors::{LoadError, ValidationError};
use super::filter_state::FilterState;
use super::item::{LineItem, ListItem};
use super::staged::StagedRows;

#[derive(Debug, Clone, PartialEq)]
pub enum ListState {
    Idle,
    Loading,
    Ready,
    Failed(LoadError),
}

#[derive(Debug, Clone, PartialEq)]
pub enum DetailState {
    /// Ничего не выбрано (или выбранная запись исчезла из списка)
    NoSelection,
    Loading,
    Ready,
    /// Сервер ответил 404: показываем пустую деталь, это не ошибка
    Empty,
    Failed(LoadError),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    pub selected_id: Option<String>,
}

/// Тикет запроса детали
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailTicket {
    pub id: String,
    pub seq: u64,
}

/// Тикет загрузки списка
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListTicket {
    pub seq: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseOutcome {
    Applied,
    Discarded,
}

/// Неизменяемый снимок строк для сохранения
#[derive(Debug, Clone, PartialEq)]
pub struct SaveRequest<R> {
    pub id: String,
    pub rows: Vec<R>,
    pub total: f64,
    pub seq: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Coordinator<I, R> {
    items: Vec<I>,
    list_state: ListState,
    selection: SelectionState,
    detail: DetailState,
    staged: StagedRows<R>,
    sort: SortState,
    /// id документа, чьи строки сейчас сохраняются
    saving: Option<String>,
    seq: u64,
    list_seq: u64,
    message: Option<String>,
}

impl<I: ListItem, R: LineItem> Default for Coordinator<I, R> {
    fn default() -> Self {
        Self::new(SortState::default())
    }
}

impl<I: ListItem, R: LineItem> Coordinator<I, R> {
    pub fn new(sort: SortState) -> Self {
        Self {
            items: Vec::new(),
            list_state: ListState::Idle,
            selection: SelectionState::default(),
            detail: DetailState::NoSelection,
            staged: StagedRows::default(),
            sort,
            saving: None,
            seq: 0,
            list_seq: 0,
            message: None,
        }
    }

    // ------------------------------------------------------------------
    // Список
    // ------------------------------------------------------------------

    pub fn items(&self) -> &[I] {
        &self.items
    }

    pub fn list_state(&self) -> &ListState {
        &self.list_state
    }

    pub fn begin_list_load(&mut self) -> ListTicket {
        self.list_seq += 1;
        self.list_state = ListState::Loading;
        ListTicket { seq: self.list_seq }
    }

    /// Ответ на загрузку списка; более ранние загрузки отбрасываются
    pub fn finish_list_load(
        &mut self,
        ticket: ListTicket,
        result: Result<Vec<I>, LoadError>,
    ) -> ResponseOutcome {
        if ticket.seq != self.list_seq {
            log::debug!(
                "discarding stale list response (seq {}, current {})",
                ticket.seq,
                self.list_seq
            );
            return ResponseOutcome::Discarded;
        }
        self.apply_list(result);
        ResponseOutcome::Applied
    }

    /// Подставить список без проверки тикета
    pub fn apply_list(&mut self, result: Result<Vec<I>, LoadError>) {
        match result {
            Ok(items) => {
                self.items = items;
                self.list_state = ListState::Ready;
                let still_present = self
                    .selection
                    .selected_id
                    .as_deref()
                    .is_some_and(|id| self.items.iter().any(|i| i.id() == id));
                if self.selection.selected_id.is_some() && !still_present {
                    log::debug!("selected record is gone after reload, clearing selection");
                    self.deselect();
                }
            }
            Err(e) => {
                log::warn!("list load failed: {}", e);
                self.list_state = ListState::Failed(e);
            }
        }
    }

    /// Подставить каноническую запись, которую вернул сервер
    pub fn merge_item(&mut self, item: I) {
        let id = item.id();
        match self.items.iter_mut().find(|i| i.id() == id) {
            Some(existing) => *existing = item,
            None => self.items.push(item),
        }
    }

    pub fn remove_item(&mut self, id: &str) {
        self.items.retain(|i| i.id() != id);
        if self.selection.selected_id.as_deref() == Some(id) {
            self.deselect();
        }
    }

    pub fn sort(&self) -> &SortState {
        &self.sort
    }

    pub fn toggle_sort(&mut self, column: &str) {
        self.sort.toggle(column);
    }

    /// Видимые строки: отбор по фильтрам, затем сортировка
    pub fn visible_items(&self, filters: &FilterState, columns: &[Column<I>]) -> Vec<I> {
        let mut visible = filter_items(&self.items, filters, columns);
        sort_items(&mut visible, &self.sort, columns);
        visible
    }

    // ------------------------------------------------------------------
    // Выбор и деталь
    // ------------------------------------------------------------------

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selection.selected_id.as_deref()
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected_id() == Some(id)
    }

    pub fn selected_item(&self) -> Option<&I> {
        let id = self.selected_id()?;
        self.items.iter().find(|i| i.id() == id)
    }

    pub fn detail(&self) -> &DetailState {
        &self.detail
    }

    /// Выбрать запись и запросить её строки.
    /// Строки прежнего выбора сбрасываются сразу; неизвестный id снимает выбор.
    pub fn select(&mut self, id: &str) -> Option<DetailTicket> {
        if !self.items.iter().any(|i| i.id() == id) {
            self.deselect();
            return None;
        }
        self.selection.selected_id = Some(id.to_string());
        self.staged.clear();
        self.detail = DetailState::Loading;
        self.message = None;
        Some(self.next_ticket(id))
    }

    /// Выбрать запись, строки которой уже есть в загруженном списке
    pub fn select_with_rows(&mut self, id: &str, rows: Vec<R>) -> bool {
        if !self.items.iter().any(|i| i.id() == id) {
            self.deselect();
            return false;
        }
        self.selection.selected_id = Some(id.to_string());
        self.seq += 1;
        self.staged.reset(rows);
        self.detail = DetailState::Ready;
        self.message = None;
        true
    }

    pub fn apply_detail(
        &mut self,
        ticket: &DetailTicket,
        result: Result<Vec<R>, LoadError>,
    ) -> ResponseOutcome {
        if ticket.seq != self.seq || self.selected_id() != Some(ticket.id.as_str()) {
            log::debug!(
                "discarding stale detail response for {} (seq {}, current {})",
                ticket.id,
                ticket.seq,
                self.seq
            );
            return ResponseOutcome::Discarded;
        }
        match result {
            Ok(rows) => {
                self.staged.reset(rows);
                self.detail = DetailState::Ready;
            }
            Err(LoadError::NotFound) => {
                self.staged.clear();
                self.detail = DetailState::Empty;
            }
            Err(e) => {
                log::error!("detail load failed for {}: {}", ticket.id, e);
                self.staged.clear();
                self.detail = DetailState::Failed(e);
            }
        }
        ResponseOutcome::Applied
    }

    pub fn deselect(&mut self) {
        self.selection.selected_id = None;
        self.staged.clear();
        self.detail = DetailState::NoSelection;
        self.message = None;
        // ответы на уже отправленные запросы станут устаревшими
        self.seq += 1;
    }

    // ------------------------------------------------------------------
    // Staged-строки
    // ------------------------------------------------------------------

    pub fn rows(&self) -> &[R] {
        self.staged.rows()
    }

    pub fn total(&self) -> f64 {
        self.staged.total()
    }

    pub fn is_dirty(&self) -> bool {
        self.staged.is_dirty()
    }

    /// Последнее сообщение об ошибке валидации или сохранения
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Идет ли сохранение строк выбранного документа
    pub fn is_saving(&self) -> bool {
        self.saving.is_some() && self.saving.as_deref() == self.selected_id()
    }

    /// Можно ли править строки выбранной записи (только документы в статусе Pendiente)
    pub fn is_editable(&self) -> bool {
        self.detail == DetailState::Ready
            && self
                .selected_item()
                .is_some_and(|item| item.status().map_or(true, |s| s.is_editable()))
    }

    pub fn add_row(&mut self, row: R) -> Result<(), ValidationError> {
        self.edit(|staged| staged.add(row))
    }

    pub fn remove_row(&mut self, key: &str) -> Result<(), ValidationError> {
        self.edit(|staged| staged.remove(key))
    }

    pub fn set_quantity(&mut self, key: &str, quantity: f64) -> Result<(), ValidationError> {
        self.edit(|staged| staged.set_quantity(key, quantity))
    }

    pub fn set_unit_cost(&mut self, key: &str, unit_cost: f64) -> Result<(), ValidationError> {
        self.edit(|staged| staged.set_unit_cost(key, unit_cost))
    }

    /// Отменить правки: строки возвращаются к последнему зафиксированному состоянию
    pub fn cancel(&mut self) {
        self.staged.cancel();
        self.message = None;
    }

    // ------------------------------------------------------------------
    // Сохранение
    // ------------------------------------------------------------------

    pub fn can_save(&self) -> bool {
        self.save_precondition().is_ok()
    }

    pub fn begin_save(&mut self) -> Result<SaveRequest<R>, ValidationError> {
        if let Err(e) = self.save_precondition() {
            self.message = Some(e.to_string());
            return Err(e);
        }
        let id = self
            .selection
            .selected_id
            .clone()
            .ok_or(ValidationError::NoSelection)?;
        self.saving = Some(id.clone());
        self.message = None;
        Ok(SaveRequest {
            id,
            rows: self.staged.rows().to_vec(),
            total: self.staged.total(),
            seq: self.seq,
        })
    }

    /// Завершение сохранения.
    /// Успех: каноническая запись попадает в список, staged сбрасываются,
    /// возвращается тикет на перезагрузку строк. Ошибка: staged остаются.
    pub fn complete_save(
        &mut self,
        request: &SaveRequest<R>,
        result: Result<I, LoadError>,
    ) -> Option<DetailTicket> {
        let same_selection = self.is_selected(&request.id);
        if self.saving.as_deref() == Some(request.id.as_str()) {
            self.saving = None;
        }
        match result {
            Ok(item) => {
                self.merge_item(item);
                if !same_selection {
                    return None;
                }
                self.staged.clear();
                self.detail = DetailState::Loading;
                Some(self.next_ticket(&request.id))
            }
            Err(e) => {
                log::error!("save failed for {}: {}", request.id, e);
                if same_selection {
                    self.message = Some(e.to_string());
                }
                None
            }
        }
    }

    fn save_precondition(&self) -> Result<(), ValidationError> {
        let item = self.selected_item().ok_or(ValidationError::NoSelection)?;
        if self.detail != DetailState::Ready {
            return Err(ValidationError::DetailNotReady);
        }
        if let Some(status) = item.status() {
            if !status.is_editable() {
                return Err(ValidationError::NotEditable(status.to_string()));
            }
        }
        if self.staged.is_empty() {
            return Err(ValidationError::NothingToSave);
        }
        if self.is_saving() {
            return Err(ValidationError::SaveInFlight);
        }
        Ok(())
    }

    fn edit(
        &mut self,
        op: impl FnOnce(&mut StagedRows<R>) -> Result<(), ValidationError>,
    ) -> Result<(), ValidationError> {
        let result = self.edit_guard().and_then(|_| op(&mut self.staged));
        self.message = result.as_ref().err().map(ToString::to_string);
        result
    }

    fn edit_guard(&self) -> Result<(), ValidationError> {
        let item = self.selected_item().ok_or(ValidationError::NoSelection)?;
        if self.detail != DetailState::Ready {
            return Err(ValidationError::DetailNotReady);
        }
        match item.status() {
            Some(status) if !status.is_editable() => {
                Err(ValidationError::NotEditable(status.to_string()))
            }
            _ => Ok(()),
        }
    }

    fn next_ticket(&mut self, id: &str) -> DetailTicket {
        self.seq += 1;
        DetailTicket {
            id: id.to_string(),
            seq: self.seq,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use contracts::domain::common::{DocumentLine, DocumentStatus};

    #[derive(Debug, Clone, PartialEq)]
    struct Doc {
        id: &'static str,
        status: DocumentStatus,
    }

    impl ListItem for Doc {
        fn id(&self) -> String {
            self.id.to_string()
        }

        fn record_date(&self) -> Option<NaiveDate> {
            NaiveDate::from_ymd_opt(2024, 1, 15)
        }

        fn status(&self) -> Option<DocumentStatus> {
            Some(self.status)
        }
    }

    fn doc(id: &'static str) -> Doc {
        Doc {
            id,
            status: DocumentStatus::Pendiente,
        }
    }

    fn line(id: &str, quantity: f64, unit_cost: f64) -> DocumentLine {
        DocumentLine {
            resource_id: id.into(),
            resource_code: id.to_uppercase(),
            resource_description: format!("Recurso {}", id),
            unit: "und".into(),
            quantity,
            unit_cost,
        }
    }

    fn loaded() -> Coordinator<Doc, DocumentLine> {
        let mut c = Coordinator::default();
        let ticket = c.begin_list_load();
        c.finish_list_load(ticket, Ok(vec![doc("A"), doc("B")]));
        c
    }

    #[test]
    fn test_second_selection_discards_first_response() {
        let mut c = loaded();
        let ticket_a = c.select("A").unwrap();
        let ticket_b = c.select("B").unwrap();
        assert!(c.rows().is_empty());

        // ответ A пришел после выбора B
        let outcome = c.apply_detail(&ticket_a, Ok(vec![line("a1", 1.0, 1.0)]));
        assert_eq!(outcome, ResponseOutcome::Discarded);
        assert!(c.rows().is_empty());
        assert_eq!(c.detail(), &DetailState::Loading);

        let outcome = c.apply_detail(&ticket_b, Ok(vec![line("b1", 2.0, 3.0)]));
        assert_eq!(outcome, ResponseOutcome::Applied);
        assert_eq!(c.rows(), &[line("b1", 2.0, 3.0)]);
        assert_eq!(c.total(), 6.0);
    }

    #[test]
    fn test_reselecting_same_id_discards_older_ticket() {
        let mut c = loaded();
        let first = c.select("A").unwrap();
        let second = c.select("A").unwrap();
        assert_eq!(c.apply_detail(&first, Ok(vec![])), ResponseOutcome::Discarded);
        assert_eq!(c.apply_detail(&second, Ok(vec![])), ResponseOutcome::Applied);
    }

    #[test]
    fn test_unknown_selection_means_no_selection() {
        let mut c = loaded();
        assert!(c.select("Z").is_none());
        assert_eq!(c.detail(), &DetailState::NoSelection);
        assert_eq!(c.selected_id(), None);
        assert!(!c.can_save());
    }

    #[test]
    fn test_selection_cleared_when_record_disappears() {
        let mut c = loaded();
        let ticket = c.select("B").unwrap();
        c.apply_list(Ok(vec![doc("A")]));
        assert_eq!(c.selected_id(), None);
        assert_eq!(c.detail(), &DetailState::NoSelection);
        assert_eq!(c.apply_detail(&ticket, Ok(vec![])), ResponseOutcome::Discarded);
    }

    #[test]
    fn test_not_found_detail_is_empty_not_error() {
        let mut c = loaded();
        let ticket = c.select("A").unwrap();
        c.apply_detail(&ticket, Err(LoadError::NotFound));
        assert_eq!(c.detail(), &DetailState::Empty);
        assert!(c.rows().is_empty());
    }

    #[test]
    fn test_network_failure_shows_failed_state() {
        let mut c = loaded();
        let ticket = c.select("A").unwrap();
        c.apply_detail(&ticket, Err(LoadError::Network("offline".into())));
        assert!(matches!(c.detail(), DetailState::Failed(LoadError::Network(_))));
    }

    #[test]
    fn test_save_is_never_possible_without_rows_or_selection() {
        let mut c = loaded();
        assert_eq!(c.begin_save(), Err(ValidationError::NoSelection));

        let ticket = c.select("A").unwrap();
        assert_eq!(c.begin_save(), Err(ValidationError::DetailNotReady));

        c.apply_detail(&ticket, Ok(vec![]));
        assert!(!c.can_save());
        assert_eq!(c.begin_save(), Err(ValidationError::NothingToSave));

        c.add_row(line("x", 1.0, 2.0)).unwrap();
        assert!(c.can_save());
    }

    #[test]
    fn test_save_snapshot_and_success_reload() {
        let mut c = loaded();
        let ticket = c.select("A").unwrap();
        c.apply_detail(&ticket, Ok(vec![line("a1", 1.0, 10.0)]));
        c.set_quantity("a1", 4.0).unwrap();

        let request = c.begin_save().unwrap();
        assert_eq!(request.total, 40.0);
        assert!(!c.can_save());
        assert_eq!(c.begin_save(), Err(ValidationError::SaveInFlight));

        // правка после отправки не меняет уже снятый снимок
        c.set_quantity("a1", 5.0).unwrap();
        assert_eq!(request.rows, vec![line("a1", 4.0, 10.0)]);

        let reload = c.complete_save(&request, Ok(doc("A"))).unwrap();
        assert!(c.rows().is_empty());
        assert_eq!(c.detail(), &DetailState::Loading);
        assert_eq!(
            c.apply_detail(&reload, Ok(vec![line("a1", 4.0, 10.0)])),
            ResponseOutcome::Applied
        );
        assert!(!c.is_dirty());
    }

    #[test]
    fn test_save_failure_keeps_staged_rows() {
        let mut c = loaded();
        let ticket = c.select("A").unwrap();
        c.apply_detail(&ticket, Ok(vec![line("a1", 1.0, 10.0)]));
        c.add_row(line("a2", 2.0, 1.0)).unwrap();

        let request = c.begin_save().unwrap();
        let reload = c.complete_save(
            &request,
            Err(LoadError::Server {
                status: 500,
                message: "db locked".into(),
            }),
        );
        assert!(reload.is_none());
        assert_eq!(c.rows().len(), 2);
        assert!(c.can_save());
        assert!(c.message().unwrap().contains("db locked"));
    }

    #[test]
    fn test_cancel_reverts_to_committed_rows() {
        let mut c = loaded();
        let ticket = c.select("A").unwrap();
        c.apply_detail(&ticket, Ok(vec![line("a1", 1.0, 10.0)]));
        c.remove_row("a1").unwrap();
        assert_eq!(c.total(), 0.0);

        c.cancel();
        assert_eq!(c.rows(), &[line("a1", 1.0, 10.0)]);
    }

    #[test]
    fn test_approved_document_is_read_only() {
        let mut c: Coordinator<Doc, DocumentLine> = Coordinator::default();
        c.apply_list(Ok(vec![Doc {
            id: "A",
            status: DocumentStatus::Aprobado,
        }]));
        assert!(c.select_with_rows("A", vec![line("a1", 1.0, 1.0)]));
        assert!(!c.is_editable());
        assert!(matches!(
            c.set_quantity("a1", 2.0),
            Err(ValidationError::NotEditable(_))
        ));
        assert!(!c.can_save());
    }

    #[test]
    fn test_switching_selection_mid_save_leaves_new_document_savable() {
        let mut c = loaded();
        let ticket_a = c.select("A").unwrap();
        c.apply_detail(&ticket_a, Ok(vec![line("a1", 1.0, 10.0)]));
        c.set_quantity("a1", 2.0).unwrap();
        let request_a = c.begin_save().unwrap();

        let ticket_b = c.select("B").unwrap();
        assert!(!c.is_saving());
        c.apply_detail(&ticket_b, Ok(vec![line("b1", 3.0, 1.0)]));
        assert!(c.can_save());

        assert!(c.complete_save(&request_a, Ok(doc("A"))).is_none());
        assert!(!c.is_saving());
        assert!(c.can_save());
        assert!(c.begin_save().is_ok());
    }

    #[test]
    fn test_returning_to_document_being_saved_shows_save_in_flight() {
        let mut c = loaded();
        let ticket_a = c.select("A").unwrap();
        c.apply_detail(&ticket_a, Ok(vec![line("a1", 1.0, 10.0)]));
        let request_a = c.begin_save().unwrap();

        c.select("B").unwrap();
        c.select_with_rows("A", vec![line("a1", 1.0, 10.0)]);
        assert!(c.is_saving());
        assert_eq!(c.begin_save(), Err(ValidationError::SaveInFlight));

        c.complete_save(&request_a, Ok(doc("A")));
        assert!(!c.is_saving());
    }

    #[test]
    fn test_older_list_load_is_discarded() {
        let mut c: Coordinator<Doc, DocumentLine> = Coordinator::default();
        let first = c.begin_list_load();
        let second = c.begin_list_load();

        assert_eq!(
            c.finish_list_load(second, Ok(vec![doc("B")])),
            ResponseOutcome::Applied
        );
        assert_eq!(
            c.finish_list_load(first, Ok(vec![doc("A"), doc("C")])),
            ResponseOutcome::Discarded
        );
        assert_eq!(c.items(), &[doc("B")]);
        assert_eq!(c.list_state(), &ListState::Ready);
    }

    #[test]
    fn test_is_selected_follows_current_selection() {
        let mut c = loaded();
        c.select("A").unwrap();
        assert!(c.is_selected("A"));
        c.select("B").unwrap();
        assert!(!c.is_selected("A"));
        c.deselect();
        assert!(!c.is_selected("B"));
    }

    #[test]
    fn test_merge_item_replaces_canonical_record() {
        let mut c = loaded();
        c.merge_item(Doc {
            id: "B",
            status: DocumentStatus::Anulado,
        });
        assert_eq!(c.items().len(), 2);
        assert_eq!(c.items()[1].status, DocumentStatus::Anulado);

        c.remove_item("A");
        assert_eq!(c.items().len(), 1);
    }
}
