mod columns;

pub use columns::purchase_order_columns;

use crate::domain::a006_purchase_order::ui::header_form::PurchaseOrderHeaderForm;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::{detail_tab_label, print_tab_key};
use crate::shared::catalogs::{use_catalog, RESOURCES, SUPPLIERS};
use crate::shared::components::detail_editor::ControlledDetailEditor;
use crate::shared::components::filter_panel::{filter_fields, FilterPanel};
use crate::shared::components::master_list::MasterList;
use crate::shared::components::status_actions::StatusActions;
use crate::shared::components::ui::StatusBadge;
use crate::shared::date_utils::{format_date, today};
use crate::shared::export::{download_csv, list_to_csv};
use crate::shared::icons::icon;
use crate::shared::master_detail::{
    use_filter_store, HttpCollection, ListItem, MasterDetailController, SortState,
};
use crate::shared::modal::Modal;
use crate::shared::page_frame::{PageFrame, PAGE_CAT_MASTER_DETAIL};
use contracts::domain::a006_purchase_order::aggregate::{PurchaseOrder, PurchaseOrderDto};
use contracts::domain::common::DocumentStatus;
use leptos::prelude::*;
use thaw::*;

#[component]
#[allow(non_snake_case)]
pub fn PurchaseOrderPage() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let controller = MasterDetailController::new(
        HttpCollection::<PurchaseOrder, PurchaseOrderDto>::new("purchase_order"),
        SortState::by("document_date", false),
    );
    let filters = use_filter_store(today());
    let columns = StoredValue::new(purchase_order_columns());
    let visible = controller.visible(filters.signal(), columns);
    let selected = controller.selected_item();

    let resources = use_catalog(RESOURCES);
    let suppliers = use_catalog(SUPPLIERS);
    let show_new = RwSignal::new(false);

    controller.load_list();

    let selected_status = Signal::derive(move || selected.with(|s| s.as_ref().map(|o| o.status)));
    let supplier_name = suppliers.description_of(move || {
        selected.with(|s| s.as_ref().map(|o| o.supplier_id.clone()).unwrap_or_default())
    });

    let open_print = move |_| {
        if let Some(o) = selected.get_untracked() {
            ctx.open_tab(
                &print_tab_key("a006_purchase_order", &o.id()),
                &detail_tab_label("OC", &o.document_no),
            );
        }
    };

    let export_csv = move |_| {
        let csv = columns.with_value(|cols| list_to_csv(&visible.get_untracked(), cols));
        if let Err(e) = download_csv(&csv, "ordenes_de_compra.csv") {
            controller.set_notice(Some(e));
        }
    };

    view! {
        <PageFrame page_id="a006_purchase_order--master_detail" category=PAGE_CAT_MASTER_DETAIL>
            <div class="page__header">
                <div class="page__header-left">
                    {icon("purchase-orders")}
                    <h1 class="page__title">"Órdenes de compra"</h1>
                </div>
                <div class="page__header-right">
                    <Button appearance=ButtonAppearance::Primary on_click=move |_| show_new.set(true)>
                        {icon("plus")}
                        " Nueva orden"
                    </Button>
                    <Button appearance=ButtonAppearance::Secondary on_click=export_csv>
                        {icon("download")}
                        " CSV"
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
                <FilterPanel filters=filters fields=filter_fields(&purchase_order_columns()) />

                {move || controller.notice().get().map(|n| view! { <div class="alert alert--info">{n}</div> })}
                {move || controller.list_error().get().map(|e| view! { <div class="alert alert--error">{e.to_string()}</div> })}

                <div class="master-detail">
                    <div class="master-detail__master">
                        <MasterList
                            items=visible
                            columns=purchase_order_columns()
                            selected_id=controller.selected_id()
                            sort=controller.sort()
                            on_select=Callback::new(move |id: String| controller.select(id))
                            on_sort=Callback::new(move |column: String| controller.toggle_sort(column))
                            loading=controller.loading()
                            empty_text="No hay órdenes de compra"
                        />
                    </div>

                    <div class="master-detail__detail">
                        {move || selected.get().map(|o| view! {
                            <div class="document-summary">
                                <div class="document-summary__title">
                                    <strong>{o.document_no.clone()}</strong>
                                    " · "
                                    {format_date(o.document_date)}
                                    <StatusBadge status=o.status />
                                </div>
                                <div class="document-summary__row">
                                    <span>"Proveedor: "</span>{move || supplier_name.get()}
                                </div>
                                <div class="document-summary__row">
                                    <span>"Entrega: "</span>{o.delivery_address.clone()}
                                </div>
                                {o.base.comment.clone().map(|c| view! {
                                    <div class="document-summary__row document-summary__row--muted">{c}</div>
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
                <Modal title="Nueva orden de compra" on_close=Callback::new(move |_| show_new.set(false))>
                    <PurchaseOrderHeaderForm
                        suppliers=suppliers.items
                        on_created=Callback::new(move |created: PurchaseOrder| {
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
