//! Панель фильтров master–detail страницы.
//!
//! Все значения берутся из `FilterHandle`; видимость поля "Hasta" вычисляется
//! из состояния хранилища на каждом рендере.

use crate::layout::global_context::AppGlobalContext;
use crate::shared::components::date_input::DateInput;
use crate::shared::date_utils::{parse_date_input, to_input_value};
use crate::shared::icons::icon;
use crate::shared::master_detail::columns::Column;
use crate::shared::master_detail::reactive::FilterHandle;
use leptos::ev;
use leptos::prelude::*;
use thaw::*;
use wasm_bindgen::JsCast;

/// Маршруты (ключи вкладок), на которых показывается панель фильтров
pub const FILTER_PANEL_ROUTES: &[&str] = &[
    "a001_resource",
    "a002_supplier",
    "a003_warehouse",
    "a004_requisition",
    "a005_transfer",
    "a006_purchase_order",
];

pub fn filter_panel_allowed(route: Option<&str>) -> bool {
    route.is_some_and(|r| FILTER_PANEL_ROUTES.contains(&r))
}

/// Поля текстовых фильтров: только колонки с признаком `filterable`
pub fn filter_fields<T>(columns: &[Column<T>]) -> Vec<(&'static str, &'static str)> {
    columns
        .iter()
        .filter(|c| c.filterable)
        .map(|c| (c.key, c.title))
        .collect()
}

#[component]
pub fn FilterPanel(
    filters: FilterHandle,
    /// (ключ колонки, заголовок) для текстовых фильтров
    #[prop(optional)]
    fields: Vec<(&'static str, &'static str)>,
    /// Показывать фильтр по периоду
    #[prop(optional, default = true)]
    with_dates: bool,
    #[prop(optional, into)] is_expanded: Option<RwSignal<bool>>,
) -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let is_expanded = is_expanded.unwrap_or_else(|| RwSignal::new(false));
    let date_error = RwSignal::new(None::<String>);
    let panel_ref = NodeRef::<leptos::html::Div>::new();

    // Клик вне панели сворачивает ее
    let handle = window_event_listener(ev::mousedown, move |e| {
        let Some(panel) = panel_ref.get_untracked() else {
            return;
        };
        let target = e.target().and_then(|t| t.dyn_into::<web_sys::Node>().ok());
        if !panel.contains(target.as_ref()) {
            is_expanded.set(false);
        }
    });
    on_cleanup(move || handle.remove());

    let today = StoredValue::new(to_input_value(Some(filters.today())));

    let on_start = move |raw: String| match parse_date_input(&raw) {
        Ok(date) => date_error.set(filters.set_start(date).err().map(|e| e.to_string())),
        Err(msg) => date_error.set(Some(msg)),
    };
    let on_end = move |raw: String| match parse_date_input(&raw) {
        Ok(date) => date_error.set(filters.set_end(date).err().map(|e| e.to_string())),
        Err(msg) => date_error.set(Some(msg)),
    };
    let clear_all = move |_| {
        filters.clear();
        date_error.set(None);
    };

    let active_count = move || filters.signal().with(|s| s.active_filters_count());
    let fields = StoredValue::new(fields);

    view! {
        <Show when=move || filter_panel_allowed(ctx.active.get().as_deref())>
            <div class="filter-panel" node_ref=panel_ref>
                <div class="filter-panel-header">
                    <div
                        class="filter-panel-header__left"
                        on:click=move |_| is_expanded.update(|e| *e = !*e)
                    >
                        <svg
                            width="16"
                            height="16"
                            viewBox="0 0 24 24"
                            fill="none"
                            stroke="currentColor"
                            stroke-width="2"
                            stroke-linecap="round"
                            stroke-linejoin="round"
                            class=move || {
                                if is_expanded.get() {
                                    "filter-panel__chevron filter-panel__chevron--expanded"
                                } else {
                                    "filter-panel__chevron"
                                }
                            }
                        >
                            <polyline points="6 9 12 15 18 9"></polyline>
                        </svg>
                        {icon("filter")}
                        <span class="filter-panel__title">"Filtros"</span>
                        {move || {
                            let count = active_count();
                            (count > 0).then(|| view! {
                                <span class="badge badge--primary">{count}</span>
                            })
                        }}
                    </div>
                    <div class="filter-panel-header__right">
                        <Button
                            appearance=ButtonAppearance::Subtle
                            size=ButtonSize::Small
                            on_click=clear_all
                            disabled=Signal::derive(move || active_count() == 0)
                        >
                            "Limpiar filtros"
                        </Button>
                    </div>
                </div>

                <Show when=move || is_expanded.get()>
                    <div class="filter-panel-content">
                        <Flex gap=FlexGap::Small align=FlexAlign::End>
                            {with_dates.then(|| {
                                view! {
                                    <div class="form-group">
                                        <Label>"Desde"</Label>
                                        <DateInput
                                            value=Signal::derive(move || {
                                                to_input_value(filters.signal().with(|s| s.start_date))
                                            })
                                            max=today.get_value()
                                            on_change=on_start
                                        />
                                    </div>
                                    <Show when=move || filters.signal().with(|s| s.end_date_visible())>
                                        <div class="form-group">
                                            <Label>"Hasta"</Label>
                                            <DateInput
                                                value=Signal::derive(move || {
                                                    to_input_value(filters.signal().with(|s| s.end_date))
                                                })
                                                min=Signal::derive(move || {
                                                    to_input_value(filters.signal().with(|s| s.start_date))
                                                })
                                                max=today.get_value()
                                                on_change=on_end
                                            />
                                        </div>
                                    </Show>
                                }
                            })}

                            <For
                                each=move || fields.get_value()
                                key=|(key, _)| *key
                                children=move |(key, title)| view! {
                                    <div class="form-group">
                                        <Label>{title}</Label>
                                        <input
                                            class="form-control"
                                            type="text"
                                            placeholder="Buscar..."
                                            prop:value=move || {
                                                filters
                                                    .signal()
                                                    .with(|s| s.column_filter(key).unwrap_or_default().to_string())
                                            }
                                            on:input=move |ev| {
                                                filters.set_column_filter(key, &event_target_value(&ev));
                                            }
                                        />
                                    </div>
                                }
                            />
                        </Flex>

                        {move || date_error.get().map(|msg| view! {
                            <div class="field-error">{msg}</div>
                        })}

                        <div class="filter-tags">
                            {move || {
                                filters
                                    .signal()
                                    .with(|s| s.column_filters.clone())
                                    .into_iter()
                                    .map(|(column, value)| {
                                        let title = fields
                                            .with_value(|f| {
                                                f.iter().find(|(k, _)| *k == column).map(|(_, t)| *t)
                                            })
                                            .unwrap_or("");
                                        view! {
                                            <FilterTag
                                                label=format!("{}: {}", title, value)
                                                on_remove=Callback::new(move |_| {
                                                    filters.set_column_filter(&column, "")
                                                })
                                            />
                                        }
                                    })
                                    .collect_view()
                            }}
                        </div>
                    </div>
                </Show>
            </div>
        </Show>
    }
}

/// Чип активного фильтра колонки
#[component]
pub fn FilterTag(#[prop(into)] label: String, on_remove: Callback<()>) -> impl IntoView {
    view! {
        <div class="filter-tag">
            <span>{label}</span>
            <svg
                width="12"
                height="12"
                viewBox="0 0 24 24"
                fill="none"
                stroke="currentColor"
                stroke-width="2"
                stroke-linecap="round"
                stroke-linejoin="round"
                class="filter-tag__remove"
                on:click=move |e| {
                    e.stop_propagation();
                    on_remove.run(());
                }
            >
                <line x1="18" y1="6" x2="6" y2="18"></line>
                <line x1="6" y1="6" x2="18" y2="18"></line>
            </svg>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::master_detail::columns::CellValue;

    #[test]
    fn test_panel_only_on_allowed_routes() {
        assert!(filter_panel_allowed(Some("a004_requisition")));
        assert!(!filter_panel_allowed(Some("a004_requisition_details_1")));
        assert!(!filter_panel_allowed(Some("settings")));
        assert!(!filter_panel_allowed(None));
    }

    #[test]
    fn test_filter_fields_take_only_filterable_columns() {
        let columns: Vec<Column<String>> = vec![
            Column::text("code", "Código", |s: &String| CellValue::Text(s.clone())).filterable(),
            Column::money("total", "Total", |_: &String| CellValue::Money(0.0)),
        ];
        assert_eq!(filter_fields(&columns), vec![("code", "Código")]);
    }
}
