use super::traits::{matches_search, TableDisplayable};
use leptos::prelude::*;
use thaw::*;

/// Выбор записи справочника из списка с поиском.
///
/// Клик выделяет строку, двойной клик или "Seleccionar" подтверждает выбор.
#[component]
pub fn GenericAggregatePicker<T>(
    #[prop(into)] items: Signal<Vec<T>>,
    #[prop(optional, into)] loading: Signal<bool>,
    #[prop(optional, into)] error: Signal<Option<String>>,
    #[prop(optional)] initial_selected_id: Option<String>,
    on_confirm: Callback<T>,
    on_cancel: Callback<()>,
    /// Заголовок третьей колонки; пустой: колонка скрыта
    #[prop(optional)]
    detail_title: &'static str,
) -> impl IntoView
where
    T: TableDisplayable + Clone + Send + Sync + 'static,
{
    let selected_id = RwSignal::new(initial_selected_id);
    let search = RwSignal::new(String::new());

    let visible = move || {
        let needle = search.get();
        items.with(|all| {
            all.iter()
                .filter(|item| matches_search(*item, &needle))
                .cloned()
                .collect::<Vec<T>>()
        })
    };

    let confirm_selected = move || {
        let Some(id) = selected_id.get_untracked() else {
            return;
        };
        if let Some(item) = items.with_untracked(|all| all.iter().find(|i| i.id() == id).cloned()) {
            on_confirm.run(item);
        }
    };

    view! {
        <div class="picker-container">
            <div class="picker-search">
                <Input value=search placeholder="Buscar por código o descripción..." />
            </div>

            <div class="picker-content">
                {move || {
                    if loading.get() {
                        view! {
                            <Flex gap=FlexGap::Small style="align-items: center; justify-content: center;">
                                <Spinner />
                                <span>"Cargando..."</span>
                            </Flex>
                        }.into_any()
                    } else if let Some(err) = error.get() {
                        view! { <div class="alert alert--error">{err}</div> }.into_any()
                    } else {
                        let rows = visible();
                        if rows.is_empty() {
                            view! { <div class="picker-empty">"Sin resultados"</div> }.into_any()
                        } else {
                            view! {
                                <table class="picker-table">
                                    <thead>
                                        <tr>
                                            <th>"Código"</th>
                                            <th>"Descripción"</th>
                                            {(!detail_title.is_empty()).then(|| view! { <th>{detail_title}</th> })}
                                        </tr>
                                    </thead>
                                    <tbody>
                                        {rows.into_iter().map(|item| {
                                            let id = item.id();
                                            let id_for_class = id.clone();
                                            let item_for_dblclick = item.clone();
                                            view! {
                                                <tr
                                                    class="picker-row"
                                                    class:selected=move || selected_id.get().as_deref() == Some(id_for_class.as_str())
                                                    on:click=move |_| selected_id.set(Some(id.clone()))
                                                    on:dblclick=move |_| on_confirm.run(item_for_dblclick.clone())
                                                >
                                                    <td>{item.code()}</td>
                                                    <td>{item.description()}</td>
                                                    {(!detail_title.is_empty()).then(|| view! { <td>{item.detail()}</td> })}
                                                </tr>
                                            }
                                        }).collect_view()}
                                    </tbody>
                                </table>
                            }.into_any()
                        }
                    }
                }}
            </div>

            <Flex justify=FlexJustify::End gap=FlexGap::Small>
                <Button
                    appearance=ButtonAppearance::Primary
                    disabled=Signal::derive(move || selected_id.get().is_none())
                    on_click=move |_| confirm_selected()
                >
                    "Seleccionar"
                </Button>
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_cancel.run(())>
                    "Cancelar"
                </Button>
            </Flex>
        </div>
    }
}
