//! Печатная форма документа (Solicitud, Guía, Vale de préstamo, Orden de Compra).
//!
//! Строится только из `DocumentSnapshot`, то есть из сохраненных данных.

use crate::shared::date_utils::format_date;
use crate::shared::export::{document_to_csv, download_csv};
use crate::shared::icons::icon;
use crate::shared::number_format::{format_money, format_quantity, format_soles};
use contracts::shared::document::DocumentSnapshot;
use leptos::prelude::*;
use thaw::*;

fn print_window() {
    if let Some(window) = web_sys::window() {
        if let Err(e) = window.print() {
            log::error!("print failed: {:?}", e);
        }
    }
}

#[component]
pub fn DocumentPrint(snapshot: DocumentSnapshot) -> impl IntoView {
    let csv_error = RwSignal::new(None::<String>);
    let for_csv = snapshot.clone();
    let export_csv = move |_| {
        let content = document_to_csv(&for_csv);
        csv_error.set(download_csv(&content, &for_csv.file_name("csv")).err());
    };

    let DocumentSnapshot {
        title,
        document_no,
        document_date,
        status,
        header,
        lines,
        total,
        ..
    } = snapshot;

    view! {
        <div class="document-print">
            <Flex justify=FlexJustify::End gap=FlexGap::Small class="no-print">
                <Button appearance=ButtonAppearance::Secondary size=ButtonSize::Small on_click=export_csv>
                    {icon("download")} " CSV"
                </Button>
                <Button appearance=ButtonAppearance::Primary size=ButtonSize::Small on_click=move |_| print_window()>
                    {icon("printer")} " Imprimir"
                </Button>
            </Flex>
            {move || csv_error.get().map(|e| view! { <div class="alert alert--error no-print">{e}</div> })}

            <div class="document-print__title">
                <h2>{title}</h2>
                <div class="document-print__number">{document_no}</div>
            </div>

            <table class="document-print__header">
                <tbody>
                    <tr><th>"Fecha"</th><td>{format_date(document_date)}</td></tr>
                    <tr><th>"Estado"</th><td>{status.as_str()}</td></tr>
                    {header.into_iter().map(|(label, value)| view! {
                        <tr><th>{label}</th><td>{value}</td></tr>
                    }).collect_view()}
                </tbody>
            </table>

            <table class="document-print__lines">
                <thead>
                    <tr>
                        <th>"N°"</th>
                        <th>"Código"</th>
                        <th>"Descripción"</th>
                        <th>"Unidad"</th>
                        <th class="text-right">"Cantidad"</th>
                        <th class="text-right">"Costo unit."</th>
                        <th class="text-right">"Importe"</th>
                    </tr>
                </thead>
                <tbody>
                    {lines.into_iter().enumerate().map(|(idx, line)| {
                        let amount = line.amount();
                        view! {
                            <tr>
                                <td>{idx + 1}</td>
                                <td>{line.resource_code}</td>
                                <td>{line.resource_description}</td>
                                <td>{line.unit}</td>
                                <td class="text-right">{format_quantity(line.quantity)}</td>
                                <td class="text-right">{format_money(line.unit_cost)}</td>
                                <td class="text-right">{format_money(amount)}</td>
                            </tr>
                        }
                    }).collect_view()}
                </tbody>
                <tfoot>
                    <tr>
                        <td colspan="6" class="text-right"><strong>"Total"</strong></td>
                        <td class="text-right"><strong>{format_soles(total)}</strong></td>
                    </tr>
                </tfoot>
            </table>

            <div class="document-print__signatures">
                <div>"Elaborado por"</div>
                <div>"Recibido por"</div>
            </div>
        </div>
    }
}

/// Печатная форма, которая еще загружается: `None`: идет загрузка
#[component]
pub fn DocumentPrintLoader(
    #[prop(into)] state: Signal<Option<Result<DocumentSnapshot, String>>>,
) -> impl IntoView {
    move || match state.get() {
        None => view! {
            <Flex gap=FlexGap::Small style="align-items: center; padding: var(--spacing-xl);">
                <Spinner />
                <span>"Cargando documento..."</span>
            </Flex>
        }
        .into_any(),
        Some(Err(e)) => view! { <div class="alert alert--error">{e}</div> }.into_any(),
        Some(Ok(snapshot)) => view! { <DocumentPrint snapshot=snapshot /> }.into_any(),
    }
}

