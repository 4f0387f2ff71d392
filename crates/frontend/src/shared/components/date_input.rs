use leptos::prelude::*;

/// Поле даты с нативным календарем браузера.
/// Значение и границы в формате yyyy-mm-dd; пустая строка: нет ограничения.
#[component]
pub fn DateInput(
    #[prop(into)] value: Signal<String>,
    /// Получает yyyy-mm-dd или пустую строку при очистке
    on_change: impl Fn(String) + 'static,
    #[prop(optional, into)] min: MaybeProp<String>,
    #[prop(optional, into)] max: MaybeProp<String>,
    #[prop(optional, into)] id: Option<String>,
) -> impl IntoView {
    view! {
        <input
            type="date"
            class="date-input"
            id=id
            prop:value=value
            min=move || min.get().filter(|s| !s.is_empty())
            max=move || max.get().filter(|s| !s.is_empty())
            on:change=move |ev| {
                on_change(event_target_value(&ev));
            }
        />
    }
}
