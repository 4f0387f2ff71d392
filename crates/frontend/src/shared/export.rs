//! Экспорт в CSV для Excel: разделитель `;`, UTF-8 BOM, экранирование ячеек.
//!
//! Содержимое файла собирается чистыми функциями, браузер нужен только для скачивания.

use crate::shared::date_utils::format_date;
use crate::shared::master_detail::columns::Column;
use contracts::shared::document::DocumentSnapshot;
use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

const BOM: char = '\u{FEFF}';

/// Экранирует ячейку, если в ней есть разделитель, кавычки или перевод строки
pub fn escape_csv_cell(cell: &str) -> String {
    if cell.contains(';') || cell.contains('"') || cell.contains('\n') || cell.contains('\r') {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}

fn push_row<S: AsRef<str>>(out: &mut String, cells: &[S]) {
    let row: Vec<String> = cells.iter().map(|c| escape_csv_cell(c.as_ref())).collect();
    out.push_str(&row.join(";"));
    out.push('\n');
}

/// CSV видимых строк списка по схеме колонок
pub fn list_to_csv<T>(items: &[T], columns: &[Column<T>]) -> String {
    let mut out = String::new();
    out.push(BOM);
    let headers: Vec<&str> = columns.iter().map(|c| c.title).collect();
    push_row(&mut out, &headers);
    for item in items {
        let cells: Vec<String> = columns.iter().map(|c| c.cell(item).display()).collect();
        push_row(&mut out, &cells);
    }
    out
}

/// CSV документа: шапка, пустая строка, таблица строк и итог
pub fn document_to_csv(doc: &DocumentSnapshot) -> String {
    let mut out = String::new();
    out.push(BOM);
    push_row(&mut out, &[doc.title.as_str(), doc.document_no.as_str()]);
    push_row(&mut out, &["Fecha".to_string(), format_date(doc.document_date)]);
    push_row(&mut out, &["Estado", doc.status.as_str()]);
    for (label, value) in &doc.header {
        push_row(&mut out, &[label, value]);
    }
    out.push('\n');

    push_row(
        &mut out,
        &["Código", "Recurso", "Unidad", "Cantidad", "Costo unit.", "Importe"],
    );
    for line in &doc.lines {
        push_row(
            &mut out,
            &[
                line.resource_code.clone(),
                line.resource_description.clone(),
                line.unit.clone(),
                format!("{:.2}", line.quantity),
                format!("{:.2}", line.unit_cost),
                format!("{:.2}", line.amount()),
            ],
        );
    }
    let total = format!("{:.2}", doc.total);
    push_row(&mut out, &["", "", "", "", "Total", total.as_str()]);
    out
}

/// Скачать CSV через временную ссылку
pub fn download_csv(content: &str, filename: &str) -> Result<(), String> {
    let array = js_sys::Array::new();
    array.push(&wasm_bindgen::JsValue::from_str(content));
    let properties = BlobPropertyBag::new();
    properties.set_type("text/csv;charset=utf-8;");
    let blob = Blob::new_with_str_sequence_and_options(&array, &properties)
        .map_err(|e| format!("No se pudo crear el archivo: {:?}", e))?;

    let window = web_sys::window().ok_or("No window object")?;
    let document = window.document().ok_or("No document object")?;
    let body = document.body().ok_or("No body element")?;

    let url = Url::create_object_url_with_blob(&blob).map_err(|e| format!("{:?}", e))?;
    let anchor = document
        .create_element("a")
        .map_err(|e| format!("{:?}", e))?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(|e| format!("{:?}", e))?;
    anchor.set_href(&url);
    anchor.set_download(filename);
    anchor
        .style()
        .set_property("display", "none")
        .map_err(|e| format!("{:?}", e))?;

    body.append_child(&anchor).map_err(|e| format!("{:?}", e))?;
    anchor.click();
    body.remove_child(&anchor).map_err(|e| format!("{:?}", e))?;
    Url::revoke_object_url(&url).map_err(|e| format!("{:?}", e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::master_detail::columns::CellValue;
    use chrono::NaiveDate;
    use contracts::domain::common::{DocumentLine, DocumentStatus};
    use contracts::shared::document::DocumentKind;

    #[test]
    fn test_escape_csv_cell() {
        assert_eq!(escape_csv_cell("Arena"), "Arena");
        assert_eq!(escape_csv_cell("a;b"), "\"a;b\"");
        assert_eq!(escape_csv_cell("dice \"hola\""), "\"dice \"\"hola\"\"\"");
        assert_eq!(escape_csv_cell("dos\nlíneas"), "\"dos\nlíneas\"");
    }

    #[test]
    fn test_list_to_csv_uses_column_display() {
        let columns: Vec<Column<(String, f64)>> = vec![
            Column::text("name", "Nombre", |r: &(String, f64)| CellValue::Text(r.0.clone())),
            Column::money("cost", "Costo", |r: &(String, f64)| CellValue::Money(r.1)),
        ];
        let csv = list_to_csv(&[("Fierro 1/2; corrugado".to_string(), 1234.5)], &columns);
        assert_eq!(
            csv,
            "\u{FEFF}Nombre;Costo\n\"Fierro 1/2; corrugado\";1,234.50\n"
        );
    }

    #[test]
    fn test_document_to_csv_has_header_lines_and_total() {
        let doc = DocumentSnapshot {
            kind: DocumentKind::Requisition,
            title: "Solicitud de Materiales".into(),
            document_no: "SOL-0001".into(),
            document_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            status: DocumentStatus::Pendiente,
            header: vec![("Proyecto".into(), "Edificio Los Álamos".into())],
            lines: vec![DocumentLine {
                resource_id: "r1".into(),
                resource_code: "CEM-01".into(),
                resource_description: "Cemento Portland".into(),
                unit: "bolsa".into(),
                quantity: 10.0,
                unit_cost: 28.5,
            }],
            total: 285.0,
        };
        let csv = document_to_csv(&doc);
        let lines: Vec<&str> = csv.trim_start_matches('\u{FEFF}').lines().collect();
        assert_eq!(lines[0], "Solicitud de Materiales;SOL-0001");
        assert_eq!(lines[1], "Fecha;15/01/2024");
        assert_eq!(lines[2], "Estado;Pendiente");
        assert_eq!(lines[3], "Proyecto;Edificio Los Álamos");
        assert_eq!(lines[4], "");
        assert_eq!(lines[6], "CEM-01;Cemento Portland;bolsa;10.00;28.50;285.00");
        assert_eq!(lines[7], ";;;;Total;285.00");
    }
}
