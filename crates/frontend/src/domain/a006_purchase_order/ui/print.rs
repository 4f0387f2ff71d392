use crate::shared::catalogs::SUPPLIERS;
use crate::shared::components::document_print::DocumentPrintLoader;
use crate::shared::master_detail::{HttpCollection, RemoteCollection};
use crate::shared::page_frame::{PageFrame, PAGE_CAT_PRINT};
use contracts::domain::a006_purchase_order::aggregate::{PurchaseOrder, PurchaseOrderDto};
use contracts::shared::document::DocumentSnapshot;
use leptos::prelude::*;

const PURCHASE_ORDERS: HttpCollection<PurchaseOrder, PurchaseOrderDto> =
    HttpCollection::new("purchase_order");

async fn load_snapshot(id: &str) -> Result<DocumentSnapshot, String> {
    let order = PURCHASE_ORDERS.fetch_by_id(id).await.map_err(|e| e.to_string())?;
    let supplier = match SUPPLIERS.fetch_by_id(&order.supplier_id).await {
        Ok(s) if s.tax_id.is_empty() => s.base.description,
        Ok(s) => format!("{} (RUC {})", s.base.description, s.tax_id),
        Err(e) => {
            log::warn!("supplier {} not loaded for print: {}", order.supplier_id, e);
            order.supplier_id.clone()
        }
    };
    Ok(DocumentSnapshot::for_purchase_order(&order, &supplier))
}

#[component]
pub fn PurchaseOrderPrint(id: String) -> impl IntoView {
    let state = RwSignal::new(None::<Result<DocumentSnapshot, String>>);
    wasm_bindgen_futures::spawn_local(async move {
        state.try_set(Some(load_snapshot(&id).await));
    });

    view! {
        <PageFrame page_id="a006_purchase_order--print" category=PAGE_CAT_PRINT>
            <DocumentPrintLoader state=state />
        </PageFrame>
    }
}
