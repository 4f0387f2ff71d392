//! Сортируемая ячейка заголовка таблицы
//!
//! ```rust,ignore
//! <SortableHeaderCell
//!     label="Total"
//!     column="total"
//!     sort=Signal::derive(move || coordinator.with(|c| c.sort().clone()))
//!     on_sort=Callback::new(move |key| toggle_sort(key))
//!     align="right"
//! />
//! ```

use crate::shared::master_detail::columns::SortState;
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn SortableHeaderCell(
    #[prop(into)] label: String,
    /// Ключ колонки
    column: &'static str,
    #[prop(into)] sort: Signal<SortState>,
    on_sort: Callback<String>,
    #[prop(optional, default = 100.0)] min_width: f64,
    /// left/right
    #[prop(optional, default = "left")]
    align: &'static str,
) -> impl IntoView {
    let header_style = if align == "right" {
        "cursor: pointer; justify-content: flex-end; padding-right: 12px;"
    } else {
        "cursor: pointer; padding-right: 12px;"
    };

    let indicator_class = move || {
        if sort.with(|s| s.column.as_deref() == Some(column)) {
            "table__sort-indicator table__sort-indicator--active"
        } else {
            "table__sort-indicator"
        }
    };

    view! {
        <TableHeaderCell resizable=false min_width=min_width>
            <div
                class="table__sortable-header"
                style=header_style
                on:click=move |_| on_sort.run(column.to_string())
            >
                {label}
                <span class=indicator_class>
                    {move || sort.with(|s| s.indicator(column))}
                </span>
            </div>
        </TableHeaderCell>
    }
}
