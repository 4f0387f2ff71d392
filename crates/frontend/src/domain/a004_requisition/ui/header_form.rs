use crate::shared::date_utils::{parse_date_input, to_input_value, today};
use crate::shared::icons::icon;
use crate::shared::master_detail::{HttpCollection, RemoteCollection};
use contracts::domain::a003_warehouse::aggregate::Warehouse;
use contracts::domain::a004_requisition::aggregate::{Requisition, RequisitionDto};
use contracts::domain::common::AggregateId;
use leptos::prelude::*;
use thaw::*;

const REQUISITIONS: HttpCollection<Requisition, RequisitionDto> = HttpCollection::new("requisition");

fn empty_form() -> RequisitionDto {
    RequisitionDto {
        id: None,
        document_date: today(),
        project: String::new(),
        requested_by: String::new(),
        warehouse_id: String::new(),
        comment: None,
        lines: Vec::new(),
    }
}

pub fn validate_header(form: &RequisitionDto) -> Result<(), String> {
    if form.project.trim().is_empty() {
        return Err("El proyecto es obligatorio".into());
    }
    if form.requested_by.trim().is_empty() {
        return Err("Indique quién solicita".into());
    }
    if form.warehouse_id.is_empty() {
        return Err("Seleccione el almacén de destino".into());
    }
    if form.document_date > today() {
        return Err("La fecha no puede ser posterior a hoy".into());
    }
    Ok(())
}

/// Шапка новой заявки. Строки добавляются потом в редакторе детали.
#[component]
pub fn RequisitionHeaderForm(
    #[prop(into)] warehouses: Signal<Vec<Warehouse>>,
    on_created: Callback<Requisition>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let form = RwSignal::new(empty_form());
    let error = RwSignal::new(None::<String>);

    let create = move |_| {
        let dto = form.get_untracked();
        if let Err(msg) = validate_header(&dto) {
            error.set(Some(msg));
            return;
        }
        wasm_bindgen_futures::spawn_local(async move {
            match REQUISITIONS.add(&dto).await {
                Ok(created) => on_created.run(created),
                Err(e) => error.set(Some(e.to_string())),
            }
        });
    };

    view! {
        <div class="details-container requisition-header-form">
            {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}

            <div class="details-form">
                <div class="form-row">
                    <div class="form-group">
                        <label for="document_date">"Fecha"</label>
                        <input
                            type="date"
                            id="document_date"
                            max=to_input_value(Some(today()))
                            prop:value=move || to_input_value(Some(form.get().document_date))
                            on:change=move |ev| match parse_date_input(&event_target_value(&ev)) {
                                Ok(Some(date)) => form.update(|f| f.document_date = date),
                                Ok(None) => error.set(Some("La fecha es obligatoria".into())),
                                Err(msg) => error.set(Some(msg)),
                            }
                        />
                    </div>
                    <div class="form-group">
                        <label for="warehouse_id">"Almacén destino"</label>
                        <select
                            id="warehouse_id"
                            prop:value=move || form.get().warehouse_id
                            on:change=move |ev| form.update(|f| f.warehouse_id = event_target_value(&ev))
                        >
                            <option value="">"— Seleccione —"</option>
                            {move || warehouses.get().into_iter().map(|w| {
                                let id = w.base.id.as_string();
                                view! { <option value=id>{w.base.description}</option> }
                            }).collect_view()}
                        </select>
                    </div>
                </div>
                <div class="form-group">
                    <label for="project">"Proyecto / obra"</label>
                    <input
                        type="text"
                        id="project"
                        prop:value=move || form.get().project
                        on:input=move |ev| form.update(|f| f.project = event_target_value(&ev))
                    />
                </div>
                <div class="form-group">
                    <label for="requested_by">"Solicitado por"</label>
                    <input
                        type="text"
                        id="requested_by"
                        prop:value=move || form.get().requested_by
                        on:input=move |ev| form.update(|f| f.requested_by = event_target_value(&ev))
                    />
                </div>
                <div class="form-group">
                    <label for="comment">"Comentario"</label>
                    <textarea
                        id="comment"
                        rows="2"
                        prop:value=move || form.get().comment.unwrap_or_default()
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            form.update(|f| f.comment = if value.is_empty() { None } else { Some(value) });
                        }
                    />
                </div>
            </div>

            <Flex gap=FlexGap::Small justify=FlexJustify::End class="details-actions">
                <Button appearance=ButtonAppearance::Primary on_click=create>
                    {icon("plus")}
                    " Crear solicitud"
                </Button>
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_cancel.run(())>
                    "Cancelar"
                </Button>
            </Flex>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_header() {
        let mut form = empty_form();
        assert!(validate_header(&form).is_err());

        form.project = "Edificio Los Álamos".into();
        form.requested_by = "Ing. Quispe".into();
        assert_eq!(
            validate_header(&form),
            Err("Seleccione el almacén de destino".to_string())
        );

        form.warehouse_id = "wh-1".into();
        assert!(validate_header(&form).is_ok());

        form.document_date = today().succ_opt().unwrap();
        assert!(validate_header(&form).is_err());
    }
}
