//! Боковое меню с раскрывающимися группами

use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::tab_label_for_key;
use crate::shared::icons::icon;
use leptos::prelude::*;

#[derive(Clone, Debug, PartialEq)]
struct MenuGroup {
    id: &'static str,
    label: &'static str,
    icon: &'static str,
    items: Vec<(&'static str, &'static str, &'static str)>, // (id, label, icon)
}

fn menu_groups() -> Vec<MenuGroup> {
    vec![
        MenuGroup {
            id: "documents",
            label: "Documentos",
            icon: "requisitions",
            items: vec![
                ("a004_requisition", tab_label_for_key("a004_requisition"), "requisitions"),
                ("a005_transfer", tab_label_for_key("a005_transfer"), "transfers"),
                ("a006_purchase_order", tab_label_for_key("a006_purchase_order"), "purchase-orders"),
            ],
        },
        MenuGroup {
            id: "catalogs",
            label: "Catálogos",
            icon: "database",
            items: vec![
                ("a001_resource", tab_label_for_key("a001_resource"), "resources"),
                ("a002_supplier", tab_label_for_key("a002_supplier"), "suppliers"),
                ("a003_warehouse", tab_label_for_key("a003_warehouse"), "warehouses"),
            ],
        },
    ]
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let expanded_groups = RwSignal::new(vec!["documents", "catalogs"]);

    view! {
        <div class="app-sidebar__content">
            {menu_groups().into_iter().map(|group| {
                let gid = group.id;
                view! {
                    <div>
                        <div
                            class="app-sidebar__item"
                            style:padding-left="12px"
                            on:click=move |_| {
                                expanded_groups.update(|items| {
                                    if let Some(pos) = items.iter().position(|x| *x == gid) {
                                        items.remove(pos);
                                    } else {
                                        items.push(gid);
                                    }
                                });
                            }
                        >
                            <div class="app-sidebar__item-content">
                                {icon(group.icon)}
                                <span>{group.label}</span>
                            </div>
                            <div
                                class="app-sidebar__chevron"
                                class:app-sidebar__chevron--expanded=move || expanded_groups.get().contains(&gid)
                            >
                                {icon("chevron-right")}
                            </div>
                        </div>

                        <Show when=move || expanded_groups.get().contains(&gid)>
                            <div class="app-sidebar__children">
                                {group.items.clone().into_iter().map(|(id, label, icon_name)| view! {
                                    <div
                                        class="app-sidebar__item"
                                        class:app-sidebar__item--active=move || ctx.active.get().as_deref() == Some(id)
                                        style:padding-left="10px"
                                        on:click=move |_| ctx.open_tab(id, label)
                                    >
                                        <div class="app-sidebar__item-content">
                                            {icon(icon_name)}
                                            <span>{label}</span>
                                        </div>
                                    </div>
                                }).collect_view()}
                            </div>
                        </Show>
                    </div>
                }
            }).collect_view()}
        </div>
    }
}
