use crate::domain::a002_supplier::ui::details::SupplierDetails;
use crate::shared::components::filter_panel::{filter_fields, FilterPanel};
use crate::shared::components::master_list::MasterList;
use crate::shared::date_utils::today;
use crate::shared::export::{download_csv, list_to_csv};
use crate::shared::icons::icon;
use crate::shared::master_detail::{
    use_filter_store, CellValue, Column, HttpCollection, MasterDetailController, SortState,
};
use crate::shared::modal::Modal;
use crate::shared::page_frame::{PageFrame, PAGE_CAT_LIST};
use contracts::domain::a002_supplier::aggregate::{Supplier, SupplierDto};
use leptos::prelude::*;
use thaw::*;

pub fn supplier_columns() -> Vec<Column<Supplier>> {
    vec![
        Column::text("code", "Código", |s: &Supplier| CellValue::Text(s.base.code.clone()))
            .min_width(90.0),
        Column::text("description", "Razón social", |s: &Supplier| {
            CellValue::Text(s.base.description.clone())
        })
        .filterable()
        .min_width(240.0),
        Column::text("tax_id", "RUC", |s: &Supplier| CellValue::Text(s.tax_id.clone())).filterable(),
        Column::text("phone", "Teléfono", |s: &Supplier| CellValue::Text(s.phone.clone())),
        Column::text("email", "Correo", |s: &Supplier| CellValue::Text(s.email.clone())).min_width(160.0),
    ]
}

#[component]
#[allow(non_snake_case)]
pub fn SupplierList() -> impl IntoView {
    let controller = MasterDetailController::new(
        HttpCollection::<Supplier, SupplierDto>::new("supplier"),
        SortState::by("description", true),
    );
    let filters = use_filter_store(today());
    let columns = StoredValue::new(supplier_columns());
    let visible = controller.visible(filters.signal(), columns);
    let selected_id = controller.selected_id();
    let (show_form, set_show_form) = signal(false);
    let (editing_id, set_editing_id) = signal::<Option<String>>(None);

    controller.load_list();

    let open_form = move |id: Option<String>| {
        set_editing_id.set(id);
        set_show_form.set(true);
    };
    let on_saved = Callback::new(move |saved: Supplier| {
        set_show_form.set(false);
        controller.merge(saved);
    });

    view! {
        <PageFrame page_id="a002_supplier--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    {icon("suppliers")}
                    <h1 class="page__title">"Proveedores"</h1>
                </div>
                <div class="page__header-right">
                    <Button appearance=ButtonAppearance::Primary on_click=move |_| open_form(None)>
                        {icon("plus")}
                        " Nuevo proveedor"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        disabled=Signal::derive(move || selected_id.get().is_none())
                        on_click=move |_| open_form(selected_id.get_untracked())
                    >
                        "Editar"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| {
                            let csv = columns.with_value(|cols| list_to_csv(&visible.get_untracked(), cols));
                            if let Err(e) = download_csv(&csv, "proveedores.csv") {
                                controller.set_notice(Some(e));
                            }
                        }
                    >
                        {icon("download")}
                        " CSV"
                    </Button>
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| controller.load_list()>
                        {icon("refresh")}
                        " Actualizar"
                    </Button>
                </div>
            </div>

            <div class="page__content">
                <FilterPanel filters=filters fields=filter_fields(&supplier_columns()) with_dates=false />

                {move || controller.notice().get().map(|n| view! { <div class="alert alert--error">{n}</div> })}
                {move || controller.list_error().get().map(|e| view! { <div class="alert alert--error">{e.to_string()}</div> })}

                <MasterList
                    items=visible
                    columns=supplier_columns()
                    selected_id=selected_id
                    sort=controller.sort()
                    on_select=Callback::new(move |id: String| controller.select_record(id))
                    on_sort=Callback::new(move |column: String| controller.toggle_sort(column))
                    loading=controller.loading()
                    empty_text="No hay proveedores"
                />
            </div>

            <Show when=move || show_form.get()>
                <Modal title="Proveedor" on_close=Callback::new(move |_| set_show_form.set(false))>
                    <SupplierDetails
                        id=editing_id.get_untracked()
                        on_saved=on_saved
                        on_cancel=Callback::new(move |_| set_show_form.set(false))
                    />
                </Modal>
            </Show>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::master_detail::columns::filter_items;
    use crate::shared::master_detail::FilterState;

    #[test]
    fn test_search_by_ruc() {
        let a = Supplier::new_for_insert(
            "P-001".into(),
            "Aceros Arequipa S.A.".into(),
            "20370146994".into(),
            String::new(),
            String::new(),
            String::new(),
            None,
        );
        let b = Supplier::new_for_insert(
            "P-002".into(),
            "Unicon S.A.C.".into(),
            "20100017491".into(),
            String::new(),
            String::new(),
            String::new(),
            None,
        );
        let mut filters = FilterState::default();
        filters.column_filters.insert("tax_id".into(), "2010".into());
        let found = filter_items(&[a, b], &filters, &supplier_columns());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].base.code, "P-002");
    }
}
