use super::view_model::ResourceDetailsViewModel;
use crate::shared::icons::icon;
use contracts::domain::a001_resource::aggregate::Resource;
use leptos::prelude::*;
use thaw::*;

const CATEGORIES: &[&str] = &["Agregados", "Cemento", "Acero", "Madera", "Herramientas", "Servicios"];

#[component]
pub fn ResourceDetails(
    id: Option<String>,
    on_saved: Callback<Resource>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let vm = ResourceDetailsViewModel::new();
    vm.load_if_needed(id);

    view! {
        <div class="details-container resource-details">
            <div class="details-header">
                <h3>{move || if vm.is_edit_mode() { "Editar recurso" } else { "Nuevo recurso" }}</h3>
            </div>

            {move || vm.error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}

            <div class="details-form">
                <Show when=move || vm.is_edit_mode()>
                    <div class="form-group">
                        <label for="code">"Código"</label>
                        <input
                            type="text"
                            id="code"
                            prop:value=move || vm.form.get().code.unwrap_or_default()
                            on:input=move |ev| vm.form.update(|f| f.code = Some(event_target_value(&ev)))
                        />
                    </div>
                </Show>

                <div class="form-group">
                    <label for="description">"Descripción"</label>
                    <input
                        type="text"
                        id="description"
                        prop:value=move || vm.form.get().description
                        on:input=move |ev| vm.form.update(|f| f.description = event_target_value(&ev))
                        placeholder="Ej. Cemento Portland tipo I"
                    />
                </div>

                <div class="form-row">
                    <div class="form-group">
                        <label for="unit">"Unidad"</label>
                        <input
                            type="text"
                            id="unit"
                            prop:value=move || vm.form.get().unit
                            on:input=move |ev| vm.form.update(|f| f.unit = event_target_value(&ev))
                            placeholder="bolsa, m3, kg, und"
                            maxlength="12"
                        />
                    </div>

                    <div class="form-group">
                        <label for="unit_cost">"Costo unitario (S/)"</label>
                        <input
                            type="text"
                            id="unit_cost"
                            class="form-control--number"
                            prop:value=move || vm.unit_cost_text.get()
                            on:input=move |ev| vm.unit_cost_text.set(event_target_value(&ev))
                        />
                    </div>

                    <div class="form-group">
                        <label for="category">"Categoría"</label>
                        <select
                            id="category"
                            prop:value=move || vm.form.get().category
                            on:change=move |ev| vm.form.update(|f| f.category = event_target_value(&ev))
                        >
                            <option value="">"—"</option>
                            {CATEGORIES.iter().map(|c| view! { <option value=*c>{*c}</option> }).collect_view()}
                        </select>
                    </div>
                </div>

                <div class="form-group">
                    <label for="comment">"Comentario"</label>
                    <textarea
                        id="comment"
                        rows="3"
                        prop:value=move || vm.form.get().comment.unwrap_or_default()
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            vm.form.update(|f| f.comment = if value.is_empty() { None } else { Some(value) });
                        }
                    />
                </div>
            </div>

            <Flex gap=FlexGap::Small justify=FlexJustify::End class="details-actions">
                <Button
                    appearance=ButtonAppearance::Primary
                    disabled=Signal::derive(move || vm.saving.get())
                    on_click=move |_| vm.save_command(on_saved)
                >
                    {icon("save")}
                    {move || if vm.is_edit_mode() { " Guardar" } else { " Crear" }}
                </Button>
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_cancel.run(())>
                    "Cancelar"
                </Button>
            </Flex>
        </div>
    }
}
