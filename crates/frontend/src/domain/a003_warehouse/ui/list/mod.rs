use crate::domain::a003_warehouse::ui::form::WarehouseForm;
use crate::shared::components::filter_panel::{filter_fields, FilterPanel};
use crate::shared::components::master_list::MasterList;
use crate::shared::date_utils::today;
use crate::shared::icons::icon;
use crate::shared::master_detail::{
    use_filter_store, CellValue, Column, HttpCollection, MasterDetailController, SortState,
};
use crate::shared::modal::Modal;
use crate::shared::page_frame::{PageFrame, PAGE_CAT_LIST};
use contracts::domain::a003_warehouse::aggregate::{Warehouse, WarehouseDto};
use leptos::prelude::*;
use thaw::*;

pub fn warehouse_kind(w: &Warehouse) -> &'static str {
    if w.is_site {
        "Obra"
    } else {
        "Almacén"
    }
}

pub fn warehouse_columns() -> Vec<Column<Warehouse>> {
    vec![
        Column::text("code", "Código", |w: &Warehouse| CellValue::Text(w.base.code.clone()))
            .min_width(90.0),
        Column::text("description", "Nombre", |w: &Warehouse| {
            CellValue::Text(w.base.description.clone())
        })
        .filterable()
        .min_width(220.0),
        Column::text("kind", "Tipo", |w: &Warehouse| CellValue::Text(warehouse_kind(w).into()))
            .filterable()
            .min_width(80.0),
        Column::text("address", "Dirección", |w: &Warehouse| CellValue::Text(w.address.clone()))
            .min_width(220.0),
    ]
}

#[component]
#[allow(non_snake_case)]
pub fn WarehouseList() -> impl IntoView {
    let controller = MasterDetailController::new(
        HttpCollection::<Warehouse, WarehouseDto>::new("warehouse"),
        SortState::by("code", true),
    );
    let filters = use_filter_store(today());
    let visible = controller.visible(filters.signal(), StoredValue::new(warehouse_columns()));
    let selected_id = controller.selected_id();
    let selected = controller.selected_item();
    // Some(None): новая запись
    let form_for = RwSignal::new(None::<Option<Warehouse>>);

    controller.load_list();

    let on_saved = Callback::new(move |saved: Warehouse| {
        form_for.set(None);
        controller.merge(saved);
    });

    view! {
        <PageFrame page_id="a003_warehouse--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    {icon("warehouses")}
                    <h1 class="page__title">"Almacenes y obras"</h1>
                </div>
                <div class="page__header-right">
                    <Button appearance=ButtonAppearance::Primary on_click=move |_| form_for.set(Some(None))>
                        {icon("plus")}
                        " Nuevo almacén"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        disabled=Signal::derive(move || selected_id.get().is_none())
                        on_click=move |_| {
                            if let Some(w) = selected.get_untracked() {
                                form_for.set(Some(Some(w)));
                            }
                        }
                    >
                        "Editar"
                    </Button>
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| controller.load_list()>
                        {icon("refresh")}
                        " Actualizar"
                    </Button>
                </div>
            </div>

            <div class="page__content">
                <FilterPanel filters=filters fields=filter_fields(&warehouse_columns()) with_dates=false />

                {move || controller.list_error().get().map(|e| view! { <div class="alert alert--error">{e.to_string()}</div> })}

                <MasterList
                    items=visible
                    columns=warehouse_columns()
                    selected_id=selected_id
                    sort=controller.sort()
                    on_select=Callback::new(move |id: String| controller.select_record(id))
                    on_sort=Callback::new(move |column: String| controller.toggle_sort(column))
                    loading=controller.loading()
                    empty_text="No hay almacenes"
                />
            </div>

            {move || form_for.get().map(|existing| view! {
                <Modal title="Almacén" on_close=Callback::new(move |_| form_for.set(None))>
                    <WarehouseForm
                        existing=existing
                        on_saved=on_saved
                        on_cancel=Callback::new(move |_| form_for.set(None))
                    />
                </Modal>
            })}
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::master_detail::columns::filter_items;
    use crate::shared::master_detail::FilterState;

    #[test]
    fn test_filter_sites_by_kind() {
        let items = vec![
            Warehouse::new_for_insert("A-01".into(), "Almacén central".into(), "Av. Ejército 101".into(), false, None),
            Warehouse::new_for_insert("O-07".into(), "Obra Los Álamos".into(), "Cerro Colorado".into(), true, None),
        ];
        let mut filters = FilterState::default();
        filters.column_filters.insert("kind".into(), "obra".into());
        let found = filter_items(&items, &filters, &warehouse_columns());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].base.code, "O-07");
    }
}
