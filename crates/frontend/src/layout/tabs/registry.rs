//! Реестр содержимого вкладок: ключ вкладки → представление.

use crate::domain::a001_resource::ui::list::ResourceList;
use crate::domain::a002_supplier::ui::list::SupplierList;
use crate::domain::a003_warehouse::ui::list::WarehouseList;
use crate::domain::a004_requisition::ui::page::RequisitionPage;
use crate::domain::a004_requisition::ui::print::RequisitionPrint;
use crate::domain::a005_transfer::ui::page::TransferPage;
use crate::domain::a005_transfer::ui::print::TransferPrint;
use crate::domain::a006_purchase_order::ui::page::PurchaseOrderPage;
use crate::domain::a006_purchase_order::ui::print::PurchaseOrderPrint;
use leptos::prelude::*;

pub fn render_tab_content(key: &str) -> AnyView {
    match key {
        "a001_resource" => view! { <ResourceList /> }.into_any(),
        "a002_supplier" => view! { <SupplierList /> }.into_any(),
        "a003_warehouse" => view! { <WarehouseList /> }.into_any(),
        "a004_requisition" => view! { <RequisitionPage /> }.into_any(),
        "a005_transfer" => view! { <TransferPage /> }.into_any(),
        "a006_purchase_order" => view! { <PurchaseOrderPage /> }.into_any(),

        k if k.starts_with("a004_requisition_print_") => {
            let id = k.trim_start_matches("a004_requisition_print_").to_string();
            view! { <RequisitionPrint id=id /> }.into_any()
        }
        k if k.starts_with("a005_transfer_print_") => {
            let id = k.trim_start_matches("a005_transfer_print_").to_string();
            view! { <TransferPrint id=id /> }.into_any()
        }
        k if k.starts_with("a006_purchase_order_print_") => {
            let id = k.trim_start_matches("a006_purchase_order_print_").to_string();
            view! { <PurchaseOrderPrint id=id /> }.into_any()
        }

        _ => {
            log::warn!("unknown tab key: {}", key);
            view! { <div class="placeholder">{format!("Página no encontrada: {}", key)}</div> }
                .into_any()
        }
    }
}
