use crate::shared::catalogs::WAREHOUSES;
use crate::shared::components::document_print::DocumentPrintLoader;
use crate::shared::master_detail::{HttpCollection, RemoteCollection};
use crate::shared::page_frame::{PageFrame, PAGE_CAT_PRINT};
use contracts::domain::a004_requisition::aggregate::{Requisition, RequisitionDto};
use contracts::shared::document::DocumentSnapshot;
use leptos::prelude::*;

const REQUISITIONS: HttpCollection<Requisition, RequisitionDto> = HttpCollection::new("requisition");

async fn load_snapshot(id: &str) -> Result<DocumentSnapshot, String> {
    let requisition = REQUISITIONS.fetch_by_id(id).await.map_err(|e| e.to_string())?;
    let warehouse_name = match WAREHOUSES.fetch_by_id(&requisition.warehouse_id).await {
        Ok(w) => w.base.description,
        Err(e) => {
            log::warn!("warehouse {} not loaded for print: {}", requisition.warehouse_id, e);
            requisition.warehouse_id.clone()
        }
    };
    Ok(DocumentSnapshot::for_requisition(&requisition, &warehouse_name))
}

/// Печатная форма заявки, строится из сохраненного документа
#[component]
pub fn RequisitionPrint(id: String) -> impl IntoView {
    let state = RwSignal::new(None::<Result<DocumentSnapshot, String>>);
    wasm_bindgen_futures::spawn_local(async move {
        let result = load_snapshot(&id).await;
        state.try_set(Some(result));
    });

    view! {
        <PageFrame page_id="a004_requisition--print" category=PAGE_CAT_PRINT>
            <DocumentPrintLoader state=state />
        </PageFrame>
    }
}
