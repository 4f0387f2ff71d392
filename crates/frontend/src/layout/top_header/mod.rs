//! Верхняя панель: переключатель меню, название, загрузка демо-данных

use crate::layout::global_context::AppGlobalContext;
use crate::shared::api_utils::api_url;
use crate::shared::icons::icon;
use gloo_net::http::Request;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// POST /api/testdata: справочники и документы для демонстрации
async fn seed_test_data() -> Result<(), String> {
    let response = Request::post(&api_url("/api/testdata"))
        .send()
        .await
        .map_err(|e| format!("Error de red: {}", e))?;
    if !response.ok() {
        return Err(format!("Error del servidor: {}", response.status()));
    }
    Ok(())
}

#[component]
pub fn TopHeader() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let seeding = RwSignal::new(false);
    let notice = RwSignal::new(None::<String>);

    let seed = move |_| {
        seeding.set(true);
        spawn_local(async move {
            let result = seed_test_data().await;
            seeding.set(false);
            notice.set(Some(match result {
                Ok(()) => "Datos de prueba cargados. Actualice las listas abiertas.".to_string(),
                Err(e) => {
                    log::error!("seeding failed: {}", e);
                    e
                }
            }));
        });
    };

    view! {
        <div class="top-header">
            <div class="top-header__brand">
                <button
                    class="top-header__icon-btn"
                    on:click=move |_| ctx.toggle_left()
                    title=move || if ctx.left_open.get() { "Ocultar menú" } else { "Mostrar menú" }
                >
                    {icon("menu")}
                </button>
                <span class="top-header__title">"Obras · Materiales"</span>
            </div>

            <div class="top-header__actions">
                {move || notice.get().map(|n| view! { <span class="top-header__notice">{n}</span> })}
                <button
                    class="top-header__icon-btn"
                    on:click=seed
                    disabled=move || seeding.get()
                    title="Cargar datos de prueba"
                >
                    {icon("database")}
                </button>
            </div>
        </div>
    }
}
