use super::registry::render_tab_content;
use crate::layout::global_context::{AppGlobalContext, Tab};
use leptos::prelude::*;

/// Вкладка: содержимое создается один раз при открытии,
/// неактивные вкладки скрываются классом, а не размонтируются.
#[component]
pub fn TabPage(tab: Tab, tabs_store: AppGlobalContext) -> impl IntoView {
    let key = tab.key.clone();
    let key_for_check = key.clone();
    let is_active = move || tabs_store.active.with(|a| a.as_deref() == Some(key_for_check.as_str()));

    view! {
        <div class="tabs__item" class:tabs__item--hidden=move || !is_active() data-tab-key=key.clone()>
            {render_tab_content(&key)}
        </div>
    }
}
