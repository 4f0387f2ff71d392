use leptos::prelude::*;
use std::collections::HashMap;
use web_sys::window;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    pub key: String,
    pub title: String,
}

/// Какая вкладка станет активной после закрытия `closed`
fn next_active_after_close(tabs: &[Tab], active: Option<&str>, closed: &str) -> Option<String> {
    if active != Some(closed) {
        return active.map(str::to_string);
    }
    tabs.iter()
        .filter(|t| t.key != closed)
        .last()
        .map(|t| t.key.clone())
}

/// Глобальное состояние оболочки: открытые вкладки, активная вкладка, боковая панель.
/// Ключ активной вкладки играет роль маршрута и отражается в `?active=` адресной строки.
#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub opened: RwSignal<Vec<Tab>>,
    pub active: RwSignal<Option<String>>,
    pub left_open: RwSignal<bool>,
}

impl Default for AppGlobalContext {
    fn default() -> Self {
        Self::new()
    }
}

impl AppGlobalContext {
    pub fn new() -> Self {
        Self {
            opened: RwSignal::new(vec![]),
            active: RwSignal::new(None),
            left_open: RwSignal::new(true),
        }
    }

    pub fn init_router_integration(&self) {
        let search = window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        let params: HashMap<String, String> =
            serde_qs::from_str(search.trim_start_matches('?')).unwrap_or_default();
        if let Some(active_key) = params.get("active").cloned() {
            let title = crate::layout::tabs::tab_label_for_key(&active_key).to_string();
            self.open_tab(&active_key, &title);
        }

        let this = *self;
        Effect::new(move |_| {
            let Some(active_key) = this.active.get() else {
                return;
            };
            let query = serde_qs::to_string(&HashMap::from([("active", active_key)]))
                .unwrap_or_default();
            let new_url = format!("?{}", query);
            let current = window()
                .and_then(|w| w.location().search().ok())
                .unwrap_or_default();
            if current != new_url {
                if let Some(history) = window().and_then(|w| w.history().ok()) {
                    let _ = history.replace_state_with_url(
                        &wasm_bindgen::JsValue::NULL,
                        "",
                        Some(&new_url),
                    );
                }
            }
        });
    }

    pub fn open_tab(&self, key: &str, title: &str) {
        log::debug!("open_tab: key='{}', title='{}'", key, title);
        let exists = self
            .opened
            .with_untracked(|tabs| tabs.iter().any(|tab| tab.key == key));
        if !exists {
            self.opened.update(|tabs| {
                tabs.push(Tab {
                    key: key.to_string(),
                    title: title.to_string(),
                })
            });
        }
        self.activate_tab(key);
    }

    pub fn activate_tab(&self, key: &str) {
        self.active.set(Some(key.to_string()));
    }

    pub fn update_tab_title(&self, key: &str, new_title: &str) {
        self.opened.update(|tabs| {
            if let Some(tab) = tabs.iter_mut().find(|t| t.key == key) {
                tab.title = new_title.to_string();
            }
        });
    }

    pub fn close_tab(&self, key: &str) {
        log::debug!("close_tab: key='{}'", key);
        let next = self.opened.with_untracked(|tabs| {
            self.active
                .with_untracked(|active| next_active_after_close(tabs, active.as_deref(), key))
        });
        self.opened.update(|tabs| tabs.retain(|tab| tab.key != key));
        if self.active.get_untracked() != next {
            self.active.set(next);
        }
    }

    pub fn toggle_left(&self) {
        self.left_open.update(|val| *val = !*val);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tabs(keys: &[&str]) -> Vec<Tab> {
        keys.iter()
            .map(|k| Tab {
                key: k.to_string(),
                title: k.to_string(),
            })
            .collect()
    }

    #[test]
    fn test_closing_active_tab_activates_last_remaining() {
        let t = tabs(&["a001_resource", "a004_requisition", "a005_transfer"]);
        assert_eq!(
            next_active_after_close(&t, Some("a005_transfer"), "a005_transfer"),
            Some("a004_requisition".to_string())
        );
        assert_eq!(
            next_active_after_close(&t, Some("a004_requisition"), "a004_requisition"),
            Some("a005_transfer".to_string())
        );
    }

    #[test]
    fn test_closing_inactive_tab_keeps_active() {
        let t = tabs(&["a001_resource", "a004_requisition"]);
        assert_eq!(
            next_active_after_close(&t, Some("a001_resource"), "a004_requisition"),
            Some("a001_resource".to_string())
        );
        assert_eq!(next_active_after_close(&tabs(&["x"]), Some("x"), "x"), None);
    }
}
