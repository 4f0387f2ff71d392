use crate::domain::a001_resource::ui::details::ResourceDetails;
use crate::shared::components::filter_panel::{filter_fields, FilterPanel};
use crate::shared::components::master_list::MasterList;
use crate::shared::components::ui::Badge;
use crate::shared::date_utils::today;
use crate::shared::export::{download_csv, list_to_csv};
use crate::shared::icons::icon;
use crate::shared::master_detail::{
    use_filter_store, CellValue, Column, HttpCollection, MasterDetailController, SortState,
};
use crate::shared::modal::Modal;
use crate::shared::page_frame::{PageFrame, PAGE_CAT_LIST};
use contracts::domain::a001_resource::aggregate::{Resource, ResourceDto};
use leptos::prelude::*;
use thaw::*;

pub fn resource_columns() -> Vec<Column<Resource>> {
    vec![
        Column::text("code", "Código", |r: &Resource| CellValue::Text(r.base.code.clone()))
            .filterable()
            .min_width(90.0),
        Column::text("description", "Descripción", |r: &Resource| {
            CellValue::Text(r.base.description.clone())
        })
        .filterable()
        .min_width(260.0),
        Column::text("unit", "Unidad", |r: &Resource| CellValue::Text(r.unit.clone())).min_width(70.0),
        Column::text("category", "Categoría", |r: &Resource| CellValue::Text(r.category.clone()))
            .filterable(),
        Column::money("unit_cost", "Costo unit.", |r: &Resource| CellValue::Money(r.unit_cost)),
    ]
}

#[component]
#[allow(non_snake_case)]
pub fn ResourceList() -> impl IntoView {
    let controller = MasterDetailController::new(
        HttpCollection::<Resource, ResourceDto>::new("resource"),
        SortState::by("code", true),
    );
    let filters = use_filter_store(today());
    let columns = StoredValue::new(resource_columns());
    let visible = controller.visible(filters.signal(), columns);
    let selected_id = controller.selected_id();
    // Some(None): новый ресурс, Some(Some(id)), редактирование
    let editing = RwSignal::new(None::<Option<String>>);

    controller.load_list();

    let export_csv = move |_| {
        let items = visible.get_untracked();
        let csv = columns.with_value(|cols| list_to_csv(&items, cols));
        if let Err(e) = download_csv(&csv, "recursos.csv") {
            controller.set_notice(Some(e));
        }
    };

    let delete_selected = move |_| {
        let confirmed = web_sys::window()
            .and_then(|w| w.confirm_with_message("¿Eliminar el recurso seleccionado?").ok())
            .unwrap_or(false);
        if confirmed {
            controller.delete_selected();
        }
    };

    let close_form = move || editing.set(None);
    let on_saved = Callback::new(move |saved: Resource| {
        close_form();
        controller.merge(saved);
    });

    view! {
        <PageFrame page_id="a001_resource--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    {icon("resources")}
                    <h1 class="page__title">"Recursos"</h1>
                    <Badge variant="primary">{move || visible.with(|v| v.len()).to_string()}</Badge>
                </div>
                <div class="page__header-right">
                    <Button appearance=ButtonAppearance::Primary on_click=move |_| editing.set(Some(None))>
                        {icon("plus")}
                        " Nuevo recurso"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        disabled=Signal::derive(move || selected_id.get().is_none())
                        on_click=move |_| {
                            if let Some(id) = selected_id.get_untracked() {
                                editing.set(Some(Some(id)));
                            }
                        }
                    >
                        "Editar"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        disabled=Signal::derive(move || selected_id.get().is_none())
                        on_click=delete_selected
                    >
                        {icon("trash")}
                        " Eliminar"
                    </Button>
                    <Button appearance=ButtonAppearance::Secondary on_click=export_csv>
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
                <FilterPanel filters=filters fields=filter_fields(&resource_columns()) />

                {move || controller.notice().get().map(|n| view! { <div class="alert alert--error">{n}</div> })}
                {move || controller.list_error().get().map(|e| view! { <div class="alert alert--error">{e.to_string()}</div> })}

                <MasterList
                    items=visible
                    columns=resource_columns()
                    selected_id=selected_id
                    sort=controller.sort()
                    on_select=Callback::new(move |id: String| controller.select_record(id))
                    on_sort=Callback::new(move |column: String| controller.toggle_sort(column))
                    loading=controller.loading()
                    empty_text="No hay recursos"
                />
            </div>

            {move || editing.get().map(|target: Option<String>| view! {
                <Modal title="Recurso" on_close=Callback::new(move |_| close_form())>
                    <ResourceDetails
                        id=target
                        on_saved=on_saved
                        on_cancel=Callback::new(move |_| close_form())
                    />
                </Modal>
            })}
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::master_detail::{Coordinator, FilterState};
    use contracts::domain::common::DocumentLine;

    fn resource(code: &str, description: &str, category: &str, cost: f64) -> Resource {
        Resource::new_for_insert(
            code.into(),
            description.into(),
            "und".into(),
            cost,
            category.into(),
            None,
        )
    }

    #[test]
    fn test_catalogue_filter_by_category_and_sort_by_cost() {
        let mut c: Coordinator<Resource, DocumentLine> = Coordinator::new(SortState::by("unit_cost", false));
        c.apply_list(Ok(vec![
            resource("R-001", "Arena gruesa", "Agregados", 45.0),
            resource("R-002", "Cemento Sol", "Cemento", 28.5),
            resource("R-003", "Piedra chancada", "Agregados", 60.0),
        ]));

        let mut filters = FilterState::default();
        filters.column_filters.insert("category".into(), "agreg".into());
        let codes: Vec<String> = c
            .visible_items(&filters, &resource_columns())
            .into_iter()
            .map(|r| r.base.code)
            .collect();
        assert_eq!(codes, vec!["R-003", "R-001"]);
    }

    #[test]
    fn test_filterable_columns() {
        let keys: Vec<&str> = filter_fields(&resource_columns()).into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["code", "description", "category"]);
    }
}
