//! Solicitudes: список заявок, строки выбранной заявки и действия над ней.

mod columns;

pub use columns::requisition_columns;

use crate::domain::a004_requisition::ui::header_form::RequisitionHeaderForm;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::{detail_tab_label, print_tab_key};
use crate::shared::catalogs::{use_catalog, RESOURCES, SUPPLIERS, WAREHOUSES};
use crate::shared::components::detail_editor::ControlledDetailEditor;
use crate::shared::components::filter_panel::{filter_fields, FilterPanel};
use crate::shared::components::master_list::MasterList;
use crate::shared::components::status_actions::StatusActions;
use crate::shared::components::ui::StatusBadge;
use crate::shared::date_utils::{format_date, today};
use crate::shared::export::{download_csv, list_to_csv};
use crate::shared::icons::icon;
use crate::shared::master_detail::{
    use_filter_store, HttpCollection, ListItem, MasterDetailController, RemoteCollection, SortState,
};
use crate::shared::modal::Modal;
use crate::shared::number_format::format_soles;
use crate::shared::page_frame::{PageFrame, PAGE_CAT_MASTER_DETAIL};
use crate::shared::picker_aggregate::GenericAggregatePicker;
use contracts::domain::a002_supplier::aggregate::Supplier;
use contracts::domain::a004_requisition::aggregate::{Requisition, RequisitionDto};
use contracts::domain::a006_purchase_order::aggregate::{
    PurchaseOrder, PurchaseOrderDto, PurchaseOrderFromRequisitionDto,
};
use contracts::domain::common::{AggregateId, DocumentStatus};
use leptos::prelude::*;
use thaw::*;

const PURCHASE_ORDERS: HttpCollection<PurchaseOrder, PurchaseOrderDto> =
    HttpCollection::new("purchase_order");

#[component]
#[allow(non_snake_case)]
pub fn RequisitionPage() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let controller = MasterDetailController::new(
        HttpCollection::<Requisition, RequisitionDto>::new("requisition"),
        SortState::by("document_date", false),
    );
    let filters = use_filter_store(today());
    let columns = StoredValue::new(requisition_columns());
    let visible = controller.visible(filters.signal(), columns);
    let selected = controller.selected_item();

    let resources = use_catalog(RESOURCES);
    let warehouses = use_catalog(WAREHOUSES);
    let suppliers = use_catalog(SUPPLIERS);

    let show_new = RwSignal::new(false);
    let show_supplier_picker = RwSignal::new(false);
    // Заказы, созданные из выбранной заявки
    let linked_orders = RwSignal::new(Vec::<PurchaseOrder>::new());

    controller.load_list();

    let selected_status = Signal::derive(move || selected.with(|s| s.as_ref().map(|r| r.status)));
    let warehouse_name = warehouses.description_of(move || {
        selected.with(|s| s.as_ref().map(|r| r.warehouse_id.clone()).unwrap_or_default())
    });

    let load_linked_orders = move |requisition_id: String| {
        wasm_bindgen_futures::spawn_local(async move {
            match PURCHASE_ORDERS
                .fetch_by_parent_id("by-requisition", &requisition_id)
                .await
            {
                Ok(orders) if controller.is_selected_untracked(&requisition_id) => {
                    linked_orders.try_set(orders);
                }
                Ok(_) => log::debug!(
                    "linked orders for {} arrived after selection changed",
                    requisition_id
                ),
                Err(e) => log::warn!("linked orders for {} not loaded: {}", requisition_id, e),
            }
        });
    };

    let on_select = Callback::new(move |id: String| {
        linked_orders.set(Vec::new());
        controller.select(id.clone());
        load_linked_orders(id);
    });

    let generate_order = move |supplier: Supplier| {
        show_supplier_picker.set(false);
        let Some(requisition) = selected.get_untracked() else {
            return;
        };
        let delivery_address = warehouses
            .find(&requisition.warehouse_id)
            .map(|w| w.address)
            .unwrap_or_default();
        let requisition_id = requisition.id();
        let body = PurchaseOrderFromRequisitionDto {
            requisition_id: requisition_id.clone(),
            supplier_id: supplier.base.id.as_string(),
            delivery_address,
        };
        wasm_bindgen_futures::spawn_local(async move {
            match PURCHASE_ORDERS.post_action("from-requisition", &body).await {
                Ok(order) => {
                    controller.set_notice(Some(format!(
                        "Se generó la orden de compra {}",
                        order.document_no
                    )));
                    if controller.is_selected_untracked(&requisition_id) {
                        linked_orders.try_update(|orders| orders.push(order));
                    }
                }
                Err(e) => controller.set_notice(Some(e.to_string())),
            }
        });
    };

    let open_print = move |_| {
        if let Some(r) = selected.get_untracked() {
            ctx.open_tab(
                &print_tab_key("a004_requisition", &r.id()),
                &detail_tab_label("Solicitud", &r.document_no),
            );
        }
    };

    let delete_selected = move |_| {
        let confirmed = web_sys::window()
            .and_then(|w| w.confirm_with_message("¿Eliminar la solicitud seleccionada?").ok())
            .unwrap_or(false);
        if confirmed {
            controller.delete_selected();
        }
    };

    let export_csv = move |_| {
        let csv = columns.with_value(|cols| list_to_csv(&visible.get_untracked(), cols));
        if let Err(e) = download_csv(&csv, "solicitudes.csv") {
            controller.set_notice(Some(e));
        }
    };

    view! {
        <PageFrame page_id="a004_requisition--master_detail" category=PAGE_CAT_MASTER_DETAIL>
            <div class="page__header">
                <div class="page__header-left">
                    {icon("requisitions")}
                    <h1 class="page__title">"Solicitudes"</h1>
                </div>
                <div class="page__header-right">
                    <Button appearance=ButtonAppearance::Primary on_click=move |_| show_new.set(true)>
                        {icon("plus")}
                        " Nueva solicitud"
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
                <FilterPanel filters=filters fields=filter_fields(&requisition_columns()) />

                {move || controller.notice().get().map(|n| view! { <div class="alert alert--info">{n}</div> })}
                {move || controller.list_error().get().map(|e| view! { <div class="alert alert--error">{e.to_string()}</div> })}

                <div class="master-detail">
                    <div class="master-detail__master">
                        <MasterList
                            items=visible
                            columns=requisition_columns()
                            selected_id=controller.selected_id()
                            sort=controller.sort()
                            on_select=on_select
                            on_sort=Callback::new(move |column: String| controller.toggle_sort(column))
                            loading=controller.loading()
                            empty_text="No hay solicitudes en el período"
                        />
                    </div>

                    <div class="master-detail__detail">
                        {move || selected.get().map(|r| view! {
                            <div class="document-summary">
                                <div class="document-summary__title">
                                    <strong>{r.document_no.clone()}</strong>
                                    " · "
                                    {format_date(r.document_date)}
                                    <StatusBadge status=r.status />
                                </div>
                                <div class="document-summary__row">
                                    <span>"Proyecto: "</span>{r.project.clone()}
                                </div>
                                <div class="document-summary__row">
                                    <span>"Solicitado por: "</span>{r.requested_by.clone()}
                                </div>
                                <div class="document-summary__row">
                                    <span>"Almacén destino: "</span>{move || warehouse_name.get()}
                                </div>
                                <div class="document-summary__row">
                                    <span>"Total registrado: "</span>{format_soles(r.total())}
                                </div>
                            </div>
                        })}

                        <Show when=move || selected_status.get().is_some()>
                            <Flex gap=FlexGap::Small justify=FlexJustify::SpaceBetween class="document-actions">
                                <StatusActions
                                    status=selected_status
                                    on_change=Callback::new(move |next: DocumentStatus| controller.change_status(next))
                                />
                                <Flex gap=FlexGap::Small>
                                    <Show when=move || selected_status.get() == Some(DocumentStatus::Aprobado)>
                                        <Button
                                            appearance=ButtonAppearance::Primary
                                            size=ButtonSize::Small
                                            on_click=move |_| show_supplier_picker.set(true)
                                        >
                                            {icon("purchase-orders")}
                                            " Generar OC"
                                        </Button>
                                    </Show>
                                    <Button appearance=ButtonAppearance::Secondary size=ButtonSize::Small on_click=open_print>
                                        {icon("printer")}
                                        " Imprimir"
                                    </Button>
                                    <Button
                                        appearance=ButtonAppearance::Subtle
                                        size=ButtonSize::Small
                                        disabled=Signal::derive(move || selected_status.get() != Some(DocumentStatus::Pendiente))
                                        on_click=delete_selected
                                    >
                                        {icon("trash")}
                                    </Button>
                                </Flex>
                            </Flex>
                        </Show>

                        <ControlledDetailEditor controller=controller resources=resources.items />

                        <Show when=move || !linked_orders.with(|o| o.is_empty())>
                            <div class="linked-documents">
                                <h4>"Órdenes de compra generadas"</h4>
                                <ul>
                                    {move || linked_orders.get().into_iter().map(|o| view! {
                                        <li>
                                            {o.document_no.clone()}
                                            " · "
                                            {format_date(o.document_date)}
                                            " · "
                                            {o.status.as_str()}
                                            " · "
                                            {format_soles(o.total())}
                                        </li>
                                    }).collect_view()}
                                </ul>
                            </div>
                        </Show>
                    </div>
                </div>
            </div>

            <Show when=move || show_new.get()>
                <Modal title="Nueva solicitud" on_close=Callback::new(move |_| show_new.set(false))>
                    <RequisitionHeaderForm
                        warehouses=warehouses.items
                        on_created=Callback::new(move |created: Requisition| {
                            show_new.set(false);
                            controller.merge_and_select(created);
                        })
                        on_cancel=Callback::new(move |_| show_new.set(false))
                    />
                </Modal>
            </Show>

            <Show when=move || show_supplier_picker.get()>
                <Modal
                    title="Proveedor de la orden de compra"
                    on_close=Callback::new(move |_| show_supplier_picker.set(false))
                >
                    <GenericAggregatePicker
                        items=suppliers.items
                        loading=suppliers.loading
                        error=suppliers.error
                        detail_title="RUC"
                        on_confirm=Callback::new(generate_order)
                        on_cancel=Callback::new(move |_| show_supplier_picker.set(false))
                    />
                </Modal>
            </Show>
        </PageFrame>
    }
}
