//! Главный список master–detail страницы.
//!
//! Компонент только рисует: выбор, сортировку и фильтры держит координатор страницы.

use crate::shared::components::table::SortableHeaderCell;
use crate::shared::components::ui::StatusBadge;
use crate::shared::master_detail::columns::{CellValue, Column, SortState};
use crate::shared::master_detail::item::ListItem;
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn MasterList<T>(
    #[prop(into)] items: Signal<Vec<T>>,
    columns: Vec<Column<T>>,
    #[prop(into)] selected_id: Signal<Option<String>>,
    #[prop(into)] sort: Signal<SortState>,
    on_select: Callback<String>,
    on_sort: Callback<String>,
    #[prop(optional, into)] loading: Signal<bool>,
    #[prop(optional, default = "No hay registros")] empty_text: &'static str,
) -> impl IntoView
where
    T: ListItem,
{
    let columns = StoredValue::new(columns);
    let min_table_width = columns.with_value(|c| c.iter().map(|c| c.min_width).sum::<f64>());

    view! {
        <div class="table-wrapper master-list">
            <Table attr:style=format!("width: 100%; min-width: {}px;", min_table_width)>
                <TableHeader>
                    <TableRow>
                        {columns.get_value().into_iter().map(|col| {
                            view! {
                                <SortableHeaderCell
                                    label=col.title
                                    column=col.key
                                    sort=sort
                                    on_sort=on_sort
                                    min_width=col.min_width
                                    align=if col.is_numeric() { "right" } else { "left" }
                                />
                            }
                        }).collect_view()}
                    </TableRow>
                </TableHeader>
                <TableBody>
                    <For
                        each=move || items.get()
                        key=|item| item.id()
                        children=move |item| {
                            let id = item.id();
                            let id_for_class = id.clone();
                            let is_selected = move || selected_id.get().as_deref() == Some(id_for_class.as_str());
                            view! {
                                <TableRow
                                    class:table__row--selected=is_selected
                                    on:click=move |_| on_select.run(id.clone())
                                    attr:style="cursor: pointer;"
                                >
                                    {columns.get_value().into_iter().map(|col| render_cell(col.cell(&item), col.is_numeric())).collect_view()}
                                </TableRow>
                            }
                        }
                    />
                </TableBody>
            </Table>
            {move || {
                if loading.get() {
                    Some(view! {
                        <Flex gap=FlexGap::Small style="align-items: center; justify-content: center; padding: var(--spacing-xl);">
                            <Spinner />
                            <span>"Cargando..."</span>
                        </Flex>
                    }.into_any())
                } else if items.with(|i| i.is_empty()) {
                    Some(view! { <div class="table__empty">{empty_text}</div> }.into_any())
                } else {
                    None
                }
            }}
        </div>
    }
}

fn render_cell(value: CellValue, numeric: bool) -> AnyView {
    match value {
        CellValue::Status(status) => view! {
            <TableCell>
                <TableCellLayout>
                    <StatusBadge status=status />
                </TableCellLayout>
            </TableCell>
        }
        .into_any(),
        other if numeric => view! {
            <TableCell class="text-right">
                <TableCellLayout>
                    <span style="font-variant-numeric: tabular-nums;">{other.display()}</span>
                </TableCellLayout>
            </TableCell>
        }
        .into_any(),
        other => view! {
            <TableCell>
                <TableCellLayout truncate=true>{other.display()}</TableCellLayout>
            </TableCell>
        }
        .into_any(),
    }
}
