use super::view_model::SupplierDetailsViewModel;
use crate::shared::icons::icon;
use contracts::domain::a002_supplier::aggregate::Supplier;
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn SupplierDetails(
    id: Option<String>,
    on_saved: Callback<Supplier>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let vm = SupplierDetailsViewModel::new();
    vm.load_if_needed(id);

    view! {
        <div class="details-container supplier-details">
            <div class="details-header">
                <h3>{move || if vm.is_edit_mode() { "Editar proveedor" } else { "Nuevo proveedor" }}</h3>
            </div>

            {move || vm.error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}

            <div class="details-form">
                <div class="form-group">
                    <label for="description">"Razón social"</label>
                    <input
                        type="text"
                        id="description"
                        prop:value=move || vm.form.get().description
                        on:input=move |ev| vm.form.update(|f| f.description = event_target_value(&ev))
                    />
                </div>

                <div class="form-row">
                    <div class="form-group">
                        <label for="tax_id">"RUC"</label>
                        <input
                            type="text"
                            id="tax_id"
                            maxlength="11"
                            prop:value=move || vm.form.get().tax_id
                            on:input=move |ev| vm.form.update(|f| f.tax_id = event_target_value(&ev))
                            placeholder="11 dígitos"
                        />
                    </div>
                    <div class="form-group">
                        <label for="phone">"Teléfono"</label>
                        <input
                            type="text"
                            id="phone"
                            prop:value=move || vm.form.get().phone
                            on:input=move |ev| vm.form.update(|f| f.phone = event_target_value(&ev))
                        />
                    </div>
                    <div class="form-group">
                        <label for="email">"Correo"</label>
                        <input
                            type="email"
                            id="email"
                            prop:value=move || vm.form.get().email
                            on:input=move |ev| vm.form.update(|f| f.email = event_target_value(&ev))
                        />
                    </div>
                </div>

                <div class="form-group">
                    <label for="address">"Dirección"</label>
                    <input
                        type="text"
                        id="address"
                        prop:value=move || vm.form.get().address
                        on:input=move |ev| vm.form.update(|f| f.address = event_target_value(&ev))
                    />
                </div>

                <div class="form-group">
                    <label for="comment">"Comentario"</label>
                    <textarea
                        id="comment"
                        rows="2"
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
                    disabled=Signal::derive(move || !vm.is_form_valid())
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
