use crate::layout::center::tabs::Tab;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::TabPage;
use leptos::prelude::*;

/// Центральная область: полоса вкладок и их содержимое
#[component]
pub fn Center() -> impl IntoView {
    let tabs_store = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    view! {
        <div data-zone="center" class="app-tabs" style="flex: 1; overflow: auto;">
            <div class="tabs__strip">
                <For
                    each=move || tabs_store.opened.get()
                    key=|tab| (tab.key.clone(), tab.title.clone())
                    children=move |tab| view! { <Tab tab=tab /> }
                />
            </div>
            <Show
                when=move || tabs_store.opened.with(|t| !t.is_empty())
                fallback=|| view! {
                    <div class="tabs__empty">"Seleccione una sección en el menú lateral"</div>
                }
            >
                <For
                    each=move || tabs_store.opened.get()
                    key=|tab| tab.key.clone()
                    children=move |tab| view! { <TabPage tab=tab tabs_store=tabs_store /> }
                />
            </Show>
        </div>
    }
}
