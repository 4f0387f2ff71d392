use crate::shared::catalogs::WAREHOUSES;
use crate::shared::components::document_print::DocumentPrintLoader;
use crate::shared::master_detail::{HttpCollection, RemoteCollection};
use crate::shared::page_frame::{PageFrame, PAGE_CAT_PRINT};
use contracts::domain::a005_transfer::aggregate::{Transfer, TransferDto};
use contracts::shared::document::DocumentSnapshot;
use leptos::prelude::*;

const TRANSFERS: HttpCollection<Transfer, TransferDto> = HttpCollection::new("transfer");

async fn warehouse_name(id: &str) -> String {
    match WAREHOUSES.fetch_by_id(id).await {
        Ok(w) => w.base.description,
        Err(e) => {
            log::warn!("warehouse {} not loaded for print: {}", id, e);
            id.to_string()
        }
    }
}

/// Guía de transferencia или Vale de préstamo, в зависимости от вида перемещения
#[component]
pub fn TransferPrint(id: String) -> impl IntoView {
    let state = RwSignal::new(None::<Result<DocumentSnapshot, String>>);
    wasm_bindgen_futures::spawn_local(async move {
        let result = match TRANSFERS.fetch_by_id(&id).await {
            Ok(transfer) => {
                let origin = warehouse_name(&transfer.origin_warehouse_id).await;
                let destination = warehouse_name(&transfer.destination_warehouse_id).await;
                Ok(DocumentSnapshot::for_transfer(&transfer, &origin, &destination))
            }
            Err(e) => Err(e.to_string()),
        };
        state.try_set(Some(result));
    });

    view! {
        <PageFrame page_id="a005_transfer--print" category=PAGE_CAT_PRINT>
            <DocumentPrintLoader state=state />
        </PageFrame>
    }
}
