use crate::shared::icons::icon;
use crate::shared::master_detail::{HttpCollection, RemoteCollection};
use contracts::domain::a003_warehouse::aggregate::{Warehouse, WarehouseDto};
use contracts::domain::common::AggregateId;
use leptos::prelude::*;
use thaw::*;

const WAREHOUSES: HttpCollection<Warehouse, WarehouseDto> = HttpCollection::new("warehouse");

fn to_dto(w: &Warehouse) -> WarehouseDto {
    WarehouseDto {
        id: Some(w.base.id.as_string()),
        code: Some(w.base.code.clone()),
        description: w.base.description.clone(),
        address: w.address.clone(),
        is_site: w.is_site,
        comment: w.base.comment.clone(),
    }
}

/// Форма склада или площадки объекта.
/// Для редактирования получает уже загруженную запись из списка.
#[component]
pub fn WarehouseForm(
    existing: Option<Warehouse>,
    on_saved: Callback<Warehouse>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let is_edit = existing.is_some();
    let form = RwSignal::new(existing.as_ref().map(to_dto).unwrap_or_default());
    let error = RwSignal::new(None::<String>);

    let save = move |_| {
        let dto = form.get_untracked();
        if dto.description.trim().is_empty() {
            error.set(Some("El nombre del almacén es obligatorio".into()));
            return;
        }
        wasm_bindgen_futures::spawn_local(async move {
            let result = if dto.id.is_some() {
                WAREHOUSES.update(&dto).await
            } else {
                WAREHOUSES.add(&dto).await
            };
            match result {
                Ok(saved) => on_saved.run(saved),
                Err(e) => error.set(Some(e.to_string())),
            }
        });
    };

    view! {
        <div class="details-container warehouse-details">
            <div class="details-header">
                <h3>{if is_edit { "Editar almacén" } else { "Nuevo almacén" }}</h3>
            </div>

            {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}

            <div class="details-form">
                <div class="form-group">
                    <label for="description">"Nombre"</label>
                    <input
                        type="text"
                        id="description"
                        prop:value=move || form.get().description
                        on:input=move |ev| form.update(|f| f.description = event_target_value(&ev))
                        placeholder="Almacén central / Obra Los Álamos"
                    />
                </div>
                <div class="form-group">
                    <label for="address">"Dirección"</label>
                    <input
                        type="text"
                        id="address"
                        prop:value=move || form.get().address
                        on:input=move |ev| form.update(|f| f.address = event_target_value(&ev))
                    />
                </div>
                <div class="form-group form-group--inline">
                    <input
                        type="checkbox"
                        id="is_site"
                        prop:checked=move || form.get().is_site
                        on:change=move |ev| form.update(|f| f.is_site = event_target_checked(&ev))
                    />
                    <label for="is_site">"Es una obra (almacén de campo)"</label>
                </div>
            </div>

            <Flex gap=FlexGap::Small justify=FlexJustify::End class="details-actions">
                <Button appearance=ButtonAppearance::Primary on_click=save>
                    {icon("save")}
                    {if is_edit { " Guardar" } else { " Crear" }}
                </Button>
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_cancel.run(())>
                    "Cancelar"
                </Button>
            </Flex>
        </div>
    }
}
