//! Редактор строк выбранного документа.
//!
//! Показывает staged-строки координатора и поднимает события правок.
//! Кнопка "Guardar" отключается, а не предупреждает: условие приходит из `can_save`.

use crate::shared::components::table::TableCellMoney;
use crate::shared::master_detail::coordinator::DetailState;
use crate::shared::master_detail::{ListItem, MasterDetailController};
use crate::shared::master_detail::staged::parse_decimal;
use crate::shared::modal::Modal;
use crate::shared::number_format::{format_quantity, format_soles};
use crate::shared::picker_aggregate::GenericAggregatePicker;
use contracts::domain::a001_resource::aggregate::Resource;
use contracts::domain::common::DocumentLine;
use leptos::prelude::*;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thaw::*;

/// Значение поля ввода числа; нечисловой ввод уходит в валидацию как NaN
fn input_number(raw: &str) -> f64 {
    parse_decimal(raw).unwrap_or(f64::NAN)
}

#[component]
pub fn DetailEditor(
    #[prop(into)] state: Signal<DetailState>,
    #[prop(into)] rows: Signal<Vec<DocumentLine>>,
    #[prop(into)] total: Signal<f64>,
    #[prop(into)] editable: Signal<bool>,
    #[prop(into)] can_save: Signal<bool>,
    #[prop(into)] saving: Signal<bool>,
    #[prop(into)] dirty: Signal<bool>,
    #[prop(into)] message: Signal<Option<String>>,
    /// Справочник ресурсов для добавления строк
    #[prop(into)]
    resources: Signal<Vec<Resource>>,
    on_add: Callback<Resource>,
    on_remove: Callback<String>,
    on_quantity: Callback<(String, f64)>,
    on_unit_cost: Callback<(String, f64)>,
    on_save: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let show_picker = RwSignal::new(false);

    let table = move || {
        view! {
            <Table attr:style="width: 100%;">
                <TableHeader>
                    <TableRow>
                        <TableHeaderCell resizable=false min_width=90.0>"Código"</TableHeaderCell>
                        <TableHeaderCell resizable=false min_width=220.0>"Recurso"</TableHeaderCell>
                        <TableHeaderCell resizable=false min_width=70.0>"Unidad"</TableHeaderCell>
                        <TableHeaderCell resizable=false min_width=100.0>"Cantidad"</TableHeaderCell>
                        <TableHeaderCell resizable=false min_width=110.0>"Costo unit."</TableHeaderCell>
                        <TableHeaderCell resizable=false min_width=110.0>"Importe"</TableHeaderCell>
                        <TableHeaderCell resizable=false min_width=40.0>""</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    <For
                        each=move || rows.get()
                        key=|row| (row.resource_id.clone(), row.quantity.to_bits(), row.unit_cost.to_bits())
                        children=move |row| {
                            let key_q = row.resource_id.clone();
                            let key_c = row.resource_id.clone();
                            let key_r = row.resource_id.clone();
                            let amount = row.quantity * row.unit_cost;
                            view! {
                                <TableRow>
                                    <TableCell><TableCellLayout>{row.resource_code.clone()}</TableCellLayout></TableCell>
                                    <TableCell>
                                        <TableCellLayout truncate=true>{row.resource_description.clone()}</TableCellLayout>
                                    </TableCell>
                                    <TableCell><TableCellLayout>{row.unit.clone()}</TableCellLayout></TableCell>
                                    <TableCell class="text-right">
                                        {move || if editable.get() {
                                            let key = key_q.clone();
                                            view! {
                                                <input
                                                    class="form-control form-control--number"
                                                    type="text"
                                                    inputmode="decimal"
                                                    prop:value=format_quantity(row.quantity)
                                                    on:change=move |ev| {
                                                        on_quantity.run((key.clone(), input_number(&event_target_value(&ev))))
                                                    }
                                                />
                                            }.into_any()
                                        } else {
                                            view! { <span>{format_quantity(row.quantity)}</span> }.into_any()
                                        }}
                                    </TableCell>
                                    <TableCell class="text-right">
                                        {move || if editable.get() {
                                            let key = key_c.clone();
                                            view! {
                                                <input
                                                    class="form-control form-control--number"
                                                    type="text"
                                                    inputmode="decimal"
                                                    prop:value=format!("{:.2}", row.unit_cost)
                                                    on:change=move |ev| {
                                                        on_unit_cost.run((key.clone(), input_number(&event_target_value(&ev))))
                                                    }
                                                />
                                            }.into_any()
                                        } else {
                                            view! { <span>{format!("{:.2}", row.unit_cost)}</span> }.into_any()
                                        }}
                                    </TableCell>
                                    <TableCellMoney value=amount />
                                    <TableCell>
                                        <Show when=move || editable.get()>
                                            {
                                                let key = key_r.clone();
                                                view! {
                                                    <Button
                                                        appearance=ButtonAppearance::Subtle
                                                        size=ButtonSize::Small
                                                        on_click=move |_| on_remove.run(key.clone())
                                                    >
                                                        "✕"
                                                    </Button>
                                                }
                                            }
                                        </Show>
                                    </TableCell>
                                </TableRow>
                            }
                        }
                    />
                </TableBody>
            </Table>
        }
    };

    view! {
        <div class="detail-editor">
            {move || match state.get() {
                DetailState::NoSelection => view! {
                    <div class="detail-editor__placeholder">"Seleccione un documento de la lista"</div>
                }.into_any(),
                DetailState::Loading => view! {
                    <Flex gap=FlexGap::Small style="align-items: center; justify-content: center; padding: var(--spacing-xl);">
                        <Spinner />
                        <span>"Cargando detalle..."</span>
                    </Flex>
                }.into_any(),
                DetailState::Empty => view! {
                    <div class="detail-editor__placeholder">"El documento no tiene detalle"</div>
                }.into_any(),
                DetailState::Failed(err) => view! {
                    <div class="alert alert--error">{err.to_string()}</div>
                }.into_any(),
                DetailState::Ready => table().into_any(),
            }}

            {move || message.get().map(|msg| view! { <div class="field-error">{msg}</div> })}

            <Flex justify=FlexJustify::SpaceBetween align=FlexAlign::Center style="margin-top: 8px;">
                <Flex gap=FlexGap::Small>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        size=ButtonSize::Small
                        disabled=Signal::derive(move || !editable.get())
                        on_click=move |_| show_picker.set(true)
                    >
                        "+ Agregar recurso"
                    </Button>
                </Flex>
                <div class="detail-editor__total">
                    "Total: " <strong>{move || format_soles(total.get())}</strong>
                </div>
                <Flex gap=FlexGap::Small>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        disabled=Signal::derive(move || !dirty.get() || saving.get())
                        on_click=move |_| on_cancel.run(())
                    >
                        "Cancelar"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Primary
                        disabled=Signal::derive(move || !can_save.get())
                        on_click=move |_| on_save.run(())
                    >
                        {move || if saving.get() { "Guardando..." } else { "Guardar" }}
                    </Button>
                </Flex>
            </Flex>

            <Show when=move || show_picker.get()>
                <Modal title="Agregar recurso" on_close=Callback::new(move |_| show_picker.set(false))>
                    <GenericAggregatePicker
                        items=resources
                        detail_title="Unidad"
                        on_confirm=Callback::new(move |r: Resource| {
                            show_picker.set(false);
                            on_add.run(r);
                        })
                        on_cancel=Callback::new(move |_| show_picker.set(false))
                    />
                </Modal>
            </Show>
        </div>
    }
}

/// Редактор строк, подключенный к контроллеру страницы документа
#[component]
pub fn ControlledDetailEditor<I, D>(
    controller: MasterDetailController<I, D>,
    #[prop(into)] resources: Signal<Vec<Resource>>,
) -> impl IntoView
where
    I: ListItem + DeserializeOwned,
    D: Serialize + 'static,
{
    view! {
        <DetailEditor
            state=controller.detail()
            rows=controller.rows()
            total=controller.total()
            editable=controller.editable()
            can_save=controller.can_save()
            saving=controller.saving()
            dirty=controller.dirty()
            message=controller.message()
            resources=resources
            on_add=Callback::new(move |r: Resource| controller.add_line(r.line_for(1.0)))
            on_remove=Callback::new(move |key: String| controller.remove_line(key))
            on_quantity=Callback::new(move |(key, q): (String, f64)| controller.set_quantity(key, q))
            on_unit_cost=Callback::new(move |(key, c): (String, f64)| controller.set_unit_cost(key, c))
            on_save=Callback::new(move |_| controller.save())
            on_cancel=Callback::new(move |_| controller.cancel())
        />
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_number_turns_garbage_into_nan() {
        assert_eq!(input_number("3,5"), 3.5);
        assert!(input_number("tres").is_nan());
        assert!(input_number("").is_nan());
    }
}
