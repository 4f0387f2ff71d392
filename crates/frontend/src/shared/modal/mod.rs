use crate::shared::icons::icon;
use leptos::ev;
use leptos::prelude::*;

/// Модальное окно поверх вкладки.
///
/// Закрывается по Escape, кнопкой в заголовке и кликом по подложке,
/// если нажатие и отпускание произошли на самой подложке.
#[component]
pub fn Modal(
    #[prop(into)] title: String,
    on_close: Callback<()>,
    /// Кнопки действий в заголовке (Guardar, Cancelar и т.п.)
    #[prop(optional)]
    action_buttons: Option<ChildrenFn>,
    #[prop(optional)] modal_style: Option<&'static str>,
    children: Children,
) -> impl IntoView {
    let handle = window_event_listener(ev::keydown, move |e| {
        if e.key() == "Escape" {
            on_close.run(());
        }
    });
    on_cleanup(move || handle.remove());

    let pressed_on_overlay = RwSignal::new(false);
    let is_overlay = |e: &ev::MouseEvent| match (e.target(), e.current_target()) {
        (Some(t), Some(ct)) => t == ct,
        _ => false,
    };

    view! {
        <div
            class="modal-overlay"
            on:mousedown=move |e| pressed_on_overlay.set(is_overlay(&e))
            on:click=move |e| {
                if pressed_on_overlay.get_untracked() && is_overlay(&e) {
                    on_close.run(());
                }
                pressed_on_overlay.set(false);
            }
        >
            <div class="modal" style=modal_style.unwrap_or_default()>
                <div class="modal-header">
                    <h2 class="modal-title">{title}</h2>
                    <div class="modal-header-actions">
                        {move || action_buttons.as_ref().map(|buttons| buttons())}
                        <button class="button button--icon modal__close" on:click=move |_| on_close.run(())>
                            {icon("x")}
                        </button>
                    </div>
                </div>
                <div class="modal-body">{children()}</div>
            </div>
        </div>
    }
}
