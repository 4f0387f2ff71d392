use crate::shared::date_utils::{parse_date_input, to_input_value, today};
use crate::shared::icons::icon;
use crate::shared::master_detail::{HttpCollection, RemoteCollection};
use contracts::domain::a003_warehouse::aggregate::Warehouse;
use contracts::domain::a005_transfer::aggregate::{Transfer, TransferDto, TransferKind};
use contracts::domain::common::AggregateId;
use leptos::prelude::*;
use thaw::*;

const TRANSFERS: HttpCollection<Transfer, TransferDto> = HttpCollection::new("transfer");

fn empty_form() -> TransferDto {
    TransferDto {
        id: None,
        document_date: today(),
        origin_warehouse_id: String::new(),
        destination_warehouse_id: String::new(),
        kind: TransferKind::Transferencia,
        return_date: None,
        comment: None,
        lines: Vec::new(),
    }
}

pub fn validate_header(form: &TransferDto) -> Result<(), String> {
    if form.origin_warehouse_id.is_empty() || form.destination_warehouse_id.is_empty() {
        return Err("Debe indicar almacén de origen y de destino".into());
    }
    if form.origin_warehouse_id == form.destination_warehouse_id {
        return Err("El almacén de origen y destino deben ser distintos".into());
    }
    if form.kind == TransferKind::Prestamo {
        match form.return_date {
            None => return Err("Un préstamo requiere fecha de devolución".into()),
            Some(d) if d < form.document_date => {
                return Err("La fecha de devolución no puede ser anterior a la del documento".into())
            }
            Some(_) => {}
        }
    }
    Ok(())
}

fn warehouse_options(warehouses: Vec<Warehouse>) -> impl IntoView {
    warehouses
        .into_iter()
        .map(|w| {
            let id = w.base.id.as_string();
            view! { <option value=id>{w.base.description}</option> }
        })
        .collect_view()
}

#[component]
pub fn TransferHeaderForm(
    #[prop(into)] warehouses: Signal<Vec<Warehouse>>,
    on_created: Callback<Transfer>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let form = RwSignal::new(empty_form());
    let error = RwSignal::new(None::<String>);
    let is_loan = move || form.with(|f| f.kind == TransferKind::Prestamo);

    let create = move |_| {
        let dto = form.get_untracked();
        if let Err(msg) = validate_header(&dto) {
            error.set(Some(msg));
            return;
        }
        wasm_bindgen_futures::spawn_local(async move {
            match TRANSFERS.add(&dto).await {
                Ok(created) => on_created.run(created),
                Err(e) => error.set(Some(e.to_string())),
            }
        });
    };

    view! {
        <div class="details-container transfer-header-form">
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
                            on:change=move |ev| {
                                if let Ok(Some(date)) = parse_date_input(&event_target_value(&ev)) {
                                    form.update(|f| f.document_date = date);
                                }
                            }
                        />
                    </div>
                    <div class="form-group">
                        <label for="kind">"Tipo"</label>
                        <select
                            id="kind"
                            on:change=move |ev| {
                                let kind = if event_target_value(&ev) == TransferKind::Prestamo.as_str() {
                                    TransferKind::Prestamo
                                } else {
                                    TransferKind::Transferencia
                                };
                                form.update(|f| {
                                    f.kind = kind;
                                    if kind == TransferKind::Transferencia {
                                        f.return_date = None;
                                    }
                                });
                            }
                        >
                            <option value=TransferKind::Transferencia.as_str()>"Transferencia"</option>
                            <option value=TransferKind::Prestamo.as_str()>"Préstamo"</option>
                        </select>
                    </div>
                    <Show when=is_loan>
                        <div class="form-group">
                            <label for="return_date">"Fecha de devolución"</label>
                            <input
                                type="date"
                                id="return_date"
                                min=move || to_input_value(Some(form.get().document_date))
                                prop:value=move || to_input_value(form.get().return_date)
                                on:change=move |ev| match parse_date_input(&event_target_value(&ev)) {
                                    Ok(date) => form.update(|f| f.return_date = date),
                                    Err(msg) => error.set(Some(msg)),
                                }
                            />
                        </div>
                    </Show>
                </div>
                <div class="form-row">
                    <div class="form-group">
                        <label for="origin">"Almacén origen"</label>
                        <select
                            id="origin"
                            prop:value=move || form.get().origin_warehouse_id
                            on:change=move |ev| form.update(|f| f.origin_warehouse_id = event_target_value(&ev))
                        >
                            <option value="">"— Seleccione —"</option>
                            {move || warehouse_options(warehouses.get())}
                        </select>
                    </div>
                    <div class="form-group">
                        <label for="destination">"Almacén destino"</label>
                        <select
                            id="destination"
                            prop:value=move || form.get().destination_warehouse_id
                            on:change=move |ev| form.update(|f| f.destination_warehouse_id = event_target_value(&ev))
                        >
                            <option value="">"— Seleccione —"</option>
                            {move || warehouse_options(warehouses.get())}
                        </select>
                    </div>
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
                    " Crear transferencia"
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
    use chrono::Duration;

    #[test]
    fn test_loan_requires_return_date_after_document_date() {
        let mut form = empty_form();
        form.origin_warehouse_id = "wh-1".into();
        form.destination_warehouse_id = "wh-1".into();
        assert!(validate_header(&form).is_err());

        form.destination_warehouse_id = "wh-2".into();
        assert!(validate_header(&form).is_ok());

        form.kind = TransferKind::Prestamo;
        assert_eq!(
            validate_header(&form),
            Err("Un préstamo requiere fecha de devolución".to_string())
        );

        form.return_date = Some(form.document_date - Duration::days(1));
        assert!(validate_header(&form).is_err());

        form.return_date = Some(form.document_date + Duration::days(14));
        assert!(validate_header(&form).is_ok());
    }
}
