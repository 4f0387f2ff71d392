pub mod app;
pub mod domain;
pub mod layout;
pub mod shared;

use wasm_bindgen::prelude::wasm_bindgen;

/// Точка входа WASM: логирование в консоль браузера и монтирование приложения
#[wasm_bindgen(start)]
pub fn start() {
    _ = console_log::init_with_level(log::Level::Debug);
    console_error_panic_hook::set_once();
    log::info!("ERP de obra: inicio del cliente");

    leptos::mount::mount_to_body(app::App);
}
