mod columns;

pub use columns::transfer_columns;

use crate::domain::a005_transfer::ui::header_form::TransferHeaderForm;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::{detail_tab_label, print_tab_key};
use crate::shared::catalogs::{use_catalog, RESOURCES, WAREHOUSES};
use crate::shared::components::detail_editor::ControlledDetailEditor;
use crate::shared::components::filter_panel::{filter_fields, FilterPanel};
use crate::shared::components::master_list::MasterList;
use crate::shared::components::status_actions::StatusActions;
use crate::shared::components::ui::StatusBadge;
use crate::shared::date_utils::{format_date, today};
use crate::shared::icons::icon;
use crate::shared::master_detail::{
    use_filter_store, HttpCollection, ListItem, ListSource, MasterDetailController, SortState,
};
use crate::shared::modal::Modal;
use crate::shared::page_frame::{PageFrame, PAGE_CAT_MASTER_DETAIL};
use contracts::domain::a005_transfer::aggregate::{Transfer, TransferDto, TransferKind};
use contracts::domain::common::{AggregateId, DocumentStatus};
use leptos::prelude::*;
use thaw::*;

#[component]
#[allow(non_snake_case)]
pub fn TransferPage() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let controller = MasterDetailController::new(
        HttpCollection::<Transfer, TransferDto>::new("transfer"),
        SortState::by("document_date", false),
    );
    let filters = use_filter_store(today());
    let visible = controller.visible(filters.signal(), StoredValue::new(transfer_columns()));
    let selected = controller.selected_item();

    let resources = use_catalog(RESOURCES);
    let warehouses = use_catalog(WAREHOUSES);

    let show_new = RwSignal::new(false);
    let warehouse_filter = RwSignal::new(String::new());

    controller.load_list();

    let selected_status = Signal::derive(move || selected.with(|s| s.as_ref().map(|t| t.status)));
    let origin_name = warehouses.description_of(move || {
        selected.with(|s| s.as_ref().map(|t| t.origin_warehouse_id.clone()).unwrap_or_default())
    });
    let destination_name = warehouses.description_of(move || {
        selected.with(|s| {
            s.as_ref()
                .map(|t| t.destination_warehouse_id.clone())
                .unwrap_or_default()
        })
    });

    // Список по складу берется с сервера: by-warehouse/{id}
    let on_warehouse_filter = move |ev: leptos::ev::Event| {
        let id = event_target_value(&ev);
        warehouse_filter.set(id.clone());
        controller.deselect();
        if id.is_empty() {
            controller.set_source(ListSource::All);
        } else {
            controller.set_source(ListSource::ByParent {
                parent: "by-warehouse",
                id,
            });
        }
    };

    let open_print = move |_| {
        if let Some(t) = selected.get_untracked() {
            let label = match t.kind {
                TransferKind::Transferencia => "Transferencia",
                TransferKind::Prestamo => "Préstamo",
            };
            ctx.open_tab(
                &print_tab_key("a005_transfer", &t.id()),
                &detail_tab_label(label, &t.document_no),
            );
        }
    };

    view! {
        <PageFrame page_id="a005_transfer--master_detail" category=PAGE_CAT_MASTER_DETAIL>
            <div class="page__header">
                <div class="page__header-left">
                    {icon("transfers")}
                    <h1 class="page__title">"Transferencias"</h1>
                </div>
                <div class="page__header-right">
                    <select
                        class="form-control"
                        prop:value=move || warehouse_filter.get()
                        on:change=on_warehouse_filter
                    >
                        <option value="">"Todos los almacenes"</option>
                        {move || warehouses.items.get().into_iter().map(|w| {
                            let id = w.base.id.as_string();
                            view! { <option value=id>{w.base.description}</option> }
                        }).collect_view()}
                    </select>
                    <Button appearance=ButtonAppearance::Primary on_click=move |_| show_new.set(true)>
                        {icon("plus")}
                        " Nueva transferencia"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        disabled=controller.loading()
                        on_click=move |_| controller.load_list()
                    >
                        {icon("refresh")}
                        " Actualizar"
                    </Button>
                </div>
            </div>

            <div class="page__content">
                <FilterPanel filters=filters fields=filter_fields(&transfer_columns()) />

                {move || controller.notice().get().map(|n| view! { <div class="alert alert--info">{n}</div> })}
                {move || controller.list_error().get().map(|e| view! { <div class="alert alert--error">{e.to_string()}</div> })}

                <div class="master-detail">
                    <div class="master-detail__master">
                        <MasterList
                            items=visible
                            columns=transfer_columns()
                            selected_id=controller.selected_id()
                            sort=controller.sort()
                            on_select=Callback::new(move |id: String| controller.select(id))
                            on_sort=Callback::new(move |column: String| controller.toggle_sort(column))
                            loading=controller.loading()
                            empty_text="No hay transferencias"
                        />
                    </div>

                    <div class="master-detail__detail">
                        {move || selected.get().map(|t| view! {
                            <div class="document-summary">
                                <div class="document-summary__title">
                                    <strong>{t.document_no.clone()}</strong>
                                    " · "
                                    {t.kind.as_str()}
                                    " · "
                                    {format_date(t.document_date)}
                                    <StatusBadge status=t.status />
                                </div>
                                <div class="document-summary__row">
                                    <span>"Origen: "</span>{move || origin_name.get()}
                                </div>
                                <div class="document-summary__row">
                                    <span>"Destino: "</span>{move || destination_name.get()}
                                </div>
                                {t.return_date.map(|d| view! {
                                    <div class="document-summary__row">
                                        <span>"Devolución: "</span>{format_date(d)}
                                    </div>
                                })}
                            </div>
                        })}

                        <Show when=move || selected_status.get().is_some()>
                            <Flex gap=FlexGap::Small justify=FlexJustify::SpaceBetween class="document-actions">
                                <StatusActions
                                    status=selected_status
                                    on_change=Callback::new(move |next: DocumentStatus| controller.change_status(next))
                                />
                                <Button appearance=ButtonAppearance::Secondary size=ButtonSize::Small on_click=open_print>
                                    {icon("printer")}
                                    " Imprimir"
                                </Button>
                            </Flex>
                        </Show>

                        <ControlledDetailEditor controller=controller resources=resources.items />
                    </div>
                </div>
            </div>

            <Show when=move || show_new.get()>
                <Modal title="Nueva transferencia" on_close=Callback::new(move |_| show_new.set(false))>
                    <TransferHeaderForm
                        warehouses=warehouses.items
                        on_created=Callback::new(move |created: Transfer| {
                            show_new.set(false);
                            controller.merge_and_select(created);
                        })
                        on_cancel=Callback::new(move |_| show_new.set(false))
                    />
                </Modal>
            </Show>
        </PageFrame>
    }
}
