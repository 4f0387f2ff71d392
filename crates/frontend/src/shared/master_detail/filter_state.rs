//! Хранилище состояния фильтров страницы.
//!
//! Инварианты после любого успешного изменения:
//! - нет даты начала => нет даты окончания;
//! - `start_date <= end_date <= today`.
//!
//! Неуспешное изменение возвращает `ValidationError`, состояние не меняется,
//! подписчики не уведомляются. Хранилище не ходит на сервер.

use super::errors::ValidationError;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub column_filters: BTreeMap<String, String>,
}

impl FilterState {
    /// Фильтр по периоду активен, если задана хотя бы одна граница
    pub fn is_filtering(&self) -> bool {
        self.start_date.is_some() || self.end_date.is_some()
    }

    /// Поле "hasta" показывается только когда выбрана дата начала
    pub fn end_date_visible(&self) -> bool {
        self.start_date.is_some()
    }

    pub fn column_filter(&self, column: &str) -> Option<&str> {
        self.column_filters.get(column).map(String::as_str)
    }

    /// Попадает ли дата записи в выбранный период (границы включительно)
    pub fn matches_date(&self, date: NaiveDate) -> bool {
        self.start_date.map_or(true, |s| date >= s) && self.end_date.map_or(true, |e| date <= e)
    }

    /// Количество активных фильтров (для бейджа панели)
    pub fn active_filters_count(&self) -> usize {
        usize::from(self.start_date.is_some())
            + usize::from(self.end_date.is_some())
            + self.column_filters.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Arc<dyn Fn(&FilterState) + Send + Sync>;

pub struct FilterStore {
    state: FilterState,
    today: NaiveDate,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl FilterStore {
    /// Пустое состояние; `today` задает верхнюю границу дат
    pub fn new(today: NaiveDate) -> Self {
        Self {
            state: FilterState::default(),
            today,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn is_filtering(&self) -> bool {
        self.state.is_filtering()
    }

    pub fn active_filters_count(&self) -> usize {
        self.state.active_filters_count()
    }

    /// Изменить дату начала.
    /// `None` очищает начало и окончание одним изменением.
    /// Если новое начало позже текущего окончания, окончание сбрасывается.
    pub fn set_start(&mut self, start: Option<NaiveDate>) -> Result<(), ValidationError> {
        let mut next = self.state.clone();
        match start {
            None => {
                next.start_date = None;
                next.end_date = None;
            }
            Some(start) => {
                if start > self.today {
                    return Err(ValidationError::DateInFuture);
                }
                next.start_date = Some(start);
                if next.end_date.is_some_and(|end| end < start) {
                    next.end_date = None;
                }
            }
        }
        self.commit(next);
        Ok(())
    }

    /// Изменить дату окончания. Требует дату начала, `start <= end <= today`.
    pub fn set_end(&mut self, end: Option<NaiveDate>) -> Result<(), ValidationError> {
        let mut next = self.state.clone();
        if let Some(end) = end {
            self.check_end(self.state.start_date, end)?;
        }
        next.end_date = end;
        self.commit(next);
        Ok(())
    }

    /// Атомарно задать обе границы (например, из быстрых пресетов периода)
    pub fn set_range(
        &mut self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<(), ValidationError> {
        if let Some(start) = start {
            if start > self.today {
                return Err(ValidationError::DateInFuture);
            }
        }
        if let Some(end) = end {
            self.check_end(start, end)?;
        }
        let mut next = self.state.clone();
        next.start_date = start;
        next.end_date = end;
        self.commit(next);
        Ok(())
    }

    /// Фильтр по колонке; пустое значение удаляет фильтр
    pub fn set_column_filter(&mut self, column: &str, value: &str) {
        let mut next = self.state.clone();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            next.column_filters.remove(column);
        } else {
            next.column_filters
                .insert(column.to_string(), trimmed.to_string());
        }
        self.commit(next);
    }

    /// Сбросить все фильтры
    pub fn clear(&mut self) {
        self.commit(FilterState::default());
    }

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: Fn(&FilterState) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Arc::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    fn check_end(&self, start: Option<NaiveDate>, end: NaiveDate) -> Result<(), ValidationError> {
        let start = start.ok_or(ValidationError::EndWithoutStart)?;
        if end < start {
            return Err(ValidationError::EndBeforeStart);
        }
        if end > self.today {
            return Err(ValidationError::DateInFuture);
        }
        Ok(())
    }

    fn commit(&mut self, next: FilterState) {
        if next == self.state {
            return;
        }
        self.state = next;
        let listeners: Vec<Listener> = self.listeners.iter().map(|(_, l)| l.clone()).collect();
        for listener in listeners {
            listener(&self.state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn d(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, month, day).unwrap()
    }

    fn store() -> FilterStore {
        FilterStore::new(d(2, 1))
    }

    #[test]
    fn test_date_range_scenario() {
        let mut s = store();

        s.set_start(Some(d(1, 10))).unwrap();
        assert!(s.state().end_date_visible());
        assert_eq!(s.state().end_date, None);

        assert_eq!(
            s.set_end(Some(d(1, 5))),
            Err(ValidationError::EndBeforeStart)
        );
        assert_eq!(s.state().end_date, None);

        s.set_end(Some(d(1, 20))).unwrap();
        assert!(s.is_filtering());
        assert_eq!(s.state().end_date, Some(d(1, 20)));

        s.clear();
        assert_eq!(s.state().start_date, None);
        assert_eq!(s.state().end_date, None);
        assert!(!s.is_filtering());
    }

    #[test]
    fn test_clearing_start_clears_end_in_one_update() {
        let mut s = store();
        s.set_range(Some(d(1, 1)), Some(d(1, 15))).unwrap();

        let seen = Arc::new(std::sync::Mutex::new(Vec::new()));
        let seen_clone = seen.clone();
        s.subscribe(move |state| {
            seen_clone
                .lock()
                .unwrap()
                .push((state.start_date, state.end_date));
        });

        s.set_start(None).unwrap();
        assert_eq!(*seen.lock().unwrap(), vec![(None, None)]);
        assert!(!s.state().end_date_visible());
    }

    #[test]
    fn test_end_requires_start() {
        let mut s = store();
        assert_eq!(
            s.set_end(Some(d(1, 5))),
            Err(ValidationError::EndWithoutStart)
        );
        assert_eq!(
            s.set_range(None, Some(d(1, 5))),
            Err(ValidationError::EndWithoutStart)
        );
        assert_eq!(s.state(), &FilterState::default());
    }

    #[test]
    fn test_dates_after_today_are_rejected() {
        let mut s = store();
        assert_eq!(s.set_start(Some(d(3, 1))), Err(ValidationError::DateInFuture));
        s.set_start(Some(d(1, 1))).unwrap();
        assert_eq!(s.set_end(Some(d(2, 2))), Err(ValidationError::DateInFuture));
        s.set_end(Some(d(2, 1))).unwrap();
        assert_eq!(s.state().end_date, Some(d(2, 1)));
    }

    #[test]
    fn test_moving_start_past_end_drops_end() {
        let mut s = store();
        s.set_range(Some(d(1, 1)), Some(d(1, 10))).unwrap();
        s.set_start(Some(d(1, 20))).unwrap();
        assert_eq!(s.state().start_date, Some(d(1, 20)));
        assert_eq!(s.state().end_date, None);

        s.set_end(Some(d(1, 25))).unwrap();
        s.set_start(Some(d(1, 22))).unwrap();
        assert_eq!(s.state().end_date, Some(d(1, 25)));
    }

    #[test]
    fn test_rejected_update_does_not_notify() {
        let mut s = store();
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_clone = calls.clone();
        s.subscribe(move |_| {
            calls_clone.fetch_add(1, Ordering::SeqCst);
        });

        let _ = s.set_end(Some(d(1, 5)));
        s.set_start(None).unwrap(); // уже пусто: без изменений
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        s.set_start(Some(d(1, 5))).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let mut s = store();
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_clone = calls.clone();
        let id = s.subscribe(move |_| {
            calls_clone.fetch_add(1, Ordering::SeqCst);
        });

        s.set_column_filter("project", "Álamos");
        assert!(s.unsubscribe(id));
        assert!(!s.unsubscribe(id));
        s.set_column_filter("project", "");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_column_filters_and_badge_count() {
        let mut s = store();
        s.set_column_filter("project", "  Puente ");
        s.set_column_filter("requested_by", "   ");
        assert_eq!(s.state().column_filter("project"), Some("Puente"));
        assert_eq!(s.state().column_filter("requested_by"), None);
        assert_eq!(s.active_filters_count(), 1);

        s.set_range(Some(d(1, 1)), Some(d(1, 31))).unwrap();
        assert_eq!(s.active_filters_count(), 3);
        assert!(s.state().matches_date(d(1, 31)));
        assert!(!s.state().matches_date(d(2, 1)));
    }
}
