use crate::shared::date_utils::{parse_date_input, to_input_value, today};
use crate::shared::icons::icon;
use crate::shared::master_detail::{HttpCollection, RemoteCollection};
use contracts::domain::a002_supplier::aggregate::Supplier;
use contracts::domain::a006_purchase_order::aggregate::{PurchaseOrder, PurchaseOrderDto};
use contracts::domain::common::AggregateId;
use leptos::prelude::*;
use thaw::*;

const PURCHASE_ORDERS: HttpCollection<PurchaseOrder, PurchaseOrderDto> =
    HttpCollection::new("purchase_order");

/// Шапка заказа поставщику без заявки-основания
#[component]
pub fn PurchaseOrderHeaderForm(
    #[prop(into)] suppliers: Signal<Vec<Supplier>>,
    on_created: Callback<PurchaseOrder>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let form = RwSignal::new(PurchaseOrderDto {
        id: None,
        document_date: today(),
        supplier_id: String::new(),
        delivery_address: String::new(),
        comment: None,
        lines: Vec::new(),
    });
    let error = RwSignal::new(None::<String>);

    let create = move |_| {
        let dto = form.get_untracked();
        if dto.supplier_id.is_empty() {
            error.set(Some("Debe seleccionar un proveedor".into()));
            return;
        }
        wasm_bindgen_futures::spawn_local(async move {
            match PURCHASE_ORDERS.add(&dto).await {
                Ok(created) => on_created.run(created),
                Err(e) => error.set(Some(e.to_string())),
            }
        });
    };

    view! {
        <div class="details-container purchase-order-header-form">
            {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}

            <div class="details-form">
                <div class="form-row">
                    <div class="form-group">
                        <label for="document_date">"Fecha"</label>
                        <input
                            type="date"
                            id="document_date"
                            max=to_input_value(Some(today()))
                            prop:value=move || to_input_value(Some(form.get().document_date))
                            on:change=move |ev| {
                                if let Ok(Some(date)) = parse_date_input(&event_target_value(&ev)) {
                                    form.update(|f| f.document_date = date);
                                }
                            }
                        />
                    </div>
                    <div class="form-group">
                        <label for="supplier_id">"Proveedor"</label>
                        <select
                            id="supplier_id"
                            prop:value=move || form.get().supplier_id
                            on:change=move |ev| form.update(|f| f.supplier_id = event_target_value(&ev))
                        >
                            <option value="">"— Seleccione —"</option>
                            {move || suppliers.get().into_iter().map(|s| {
                                let id = s.base.id.as_string();
                                view! { <option value=id>{s.base.description}</option> }
                            }).collect_view()}
                        </select>
                    </div>
                </div>
                <div class="form-group">
                    <label for="delivery_address">"Dirección de entrega"</label>
                    <input
                        type="text"
                        id="delivery_address"
                        prop:value=move || form.get().delivery_address
                        on:input=move |ev| form.update(|f| f.delivery_address = event_target_value(&ev))
                    />
                </div>
            </div>

            <Flex gap=FlexGap::Small justify=FlexJustify::End class="details-actions">
                <Button appearance=ButtonAppearance::Primary on_click=create>
                    {icon("plus")}
                    " Crear orden"
                </Button>
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_cancel.run(())>
                    "Cancelar"
                </Button>
            </Flex>
        </div>
    }
}
