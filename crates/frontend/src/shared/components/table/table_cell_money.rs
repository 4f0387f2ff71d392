use crate::shared::number_format::{format_money, format_soles};
use leptos::prelude::*;
use thaw::*;

/// Денежная ячейка: выравнивание вправо, два знака, опционально с "S/ "
#[component]
pub fn TableCellMoney(
    #[prop(into)] value: Signal<f64>,
    #[prop(optional, default = false)] show_currency: bool,
    #[prop(optional, default = false)] bold: bool,
) -> impl IntoView {
    let text = move || {
        let v = value.get();
        if show_currency {
            format_soles(v)
        } else {
            format_money(v)
        }
    };
    let style = if bold {
        "font-variant-numeric: tabular-nums; font-weight: 600;"
    } else {
        "font-variant-numeric: tabular-nums;"
    };

    view! {
        <TableCell class="text-right">
            <TableCellLayout>
                <span style=style>{text}</span>
            </TableCellLayout>
        </TableCell>
    }
}
