//! Снимок документа для печатной формы и экспорта в CSV.
//!
//! Снимок строится из уже сохраненного документа и не меняется после создания:
//! печать и экспорт никогда не видят несохраненные (staged) строки.

use crate::domain::a004_requisition::aggregate::Requisition;
use crate::domain::a005_transfer::aggregate::{Transfer, TransferKind};
use crate::domain::a006_purchase_order::aggregate::PurchaseOrder;
use crate::domain::common::{lines_total, DocumentLine, DocumentStatus};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentKind {
    Requisition,
    Transfer,
    LoanReceipt,
    PurchaseOrder,
}

impl DocumentKind {
    /// Заголовок печатной формы
    pub fn title(&self) -> &'static str {
        match self {
            DocumentKind::Requisition => "Solicitud de Materiales",
            DocumentKind::Transfer => "Guía de Transferencia",
            DocumentKind::LoanReceipt => "Vale de préstamo",
            DocumentKind::PurchaseOrder => "Orden de Compra",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentSnapshot {
    pub kind: DocumentKind,
    pub title: String,
    pub document_no: String,
    pub document_date: NaiveDate,
    pub status: DocumentStatus,
    /// Реквизиты шапки в порядке вывода: (подпись, значение)
    pub header: Vec<(String, String)>,
    pub lines: Vec<DocumentLine>,
    pub total: f64,
}

impl DocumentSnapshot {
    fn new(
        kind: DocumentKind,
        document_no: &str,
        document_date: NaiveDate,
        status: DocumentStatus,
        header: Vec<(String, String)>,
        lines: &[DocumentLine],
    ) -> Self {
        Self {
            kind,
            title: kind.title().to_string(),
            document_no: document_no.to_string(),
            document_date,
            status,
            header,
            lines: lines.to_vec(),
            total: lines_total(lines),
        }
    }

    pub fn for_requisition(doc: &Requisition, warehouse_name: &str) -> Self {
        let header = vec![
            ("Proyecto".to_string(), doc.project.clone()),
            ("Solicitado por".to_string(), doc.requested_by.clone()),
            ("Almacén destino".to_string(), warehouse_name.to_string()),
        ];
        Self::new(
            DocumentKind::Requisition,
            &doc.document_no,
            doc.document_date,
            doc.status,
            with_comment(header, doc.base.comment.as_deref()),
            &doc.lines,
        )
    }

    /// Перемещение вида Préstamo печатается как «Vale de préstamo»
    pub fn for_transfer(doc: &Transfer, origin_name: &str, destination_name: &str) -> Self {
        let kind = match doc.kind {
            TransferKind::Transferencia => DocumentKind::Transfer,
            TransferKind::Prestamo => DocumentKind::LoanReceipt,
        };
        let mut header = vec![
            ("Almacén origen".to_string(), origin_name.to_string()),
            ("Almacén destino".to_string(), destination_name.to_string()),
        ];
        if let Some(return_date) = doc.return_date {
            header.push((
                "Fecha de devolución".to_string(),
                return_date.format("%d/%m/%Y").to_string(),
            ));
        }
        Self::new(
            kind,
            &doc.document_no,
            doc.document_date,
            doc.status,
            with_comment(header, doc.base.comment.as_deref()),
            &doc.lines,
        )
    }

    pub fn for_purchase_order(doc: &PurchaseOrder, supplier_name: &str) -> Self {
        let header = vec![
            ("Proveedor".to_string(), supplier_name.to_string()),
            ("Dirección de entrega".to_string(), doc.delivery_address.clone()),
        ];
        Self::new(
            DocumentKind::PurchaseOrder,
            &doc.document_no,
            doc.document_date,
            doc.status,
            with_comment(header, doc.base.comment.as_deref()),
            &doc.lines,
        )
    }

    /// Имя файла для экспорта, например "SOL-000004.csv"
    pub fn file_name(&self, extension: &str) -> String {
        let safe: String = self
            .document_no
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
            .collect();
        format!("{}.{}", safe, extension)
    }
}

fn with_comment(mut header: Vec<(String, String)>, comment: Option<&str>) -> Vec<(String, String)> {
    if let Some(comment) = comment {
        header.push(("Observaciones".to_string(), comment.to_string()));
    }
    header
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(id: &str, quantity: f64, unit_cost: f64) -> DocumentLine {
        DocumentLine {
            resource_id: id.into(),
            resource_code: id.to_uppercase(),
            resource_description: format!("Recurso {}", id),
            unit: "und".into(),
            quantity,
            unit_cost,
        }
    }

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    #[test]
    fn test_loan_transfer_prints_as_loan_receipt() {
        let mut t = Transfer::new_for_insert(
            "TRF-000002".into(),
            date(1),
            "wh-a".into(),
            "wh-b".into(),
            TransferKind::Prestamo,
            Some(date(15)),
            None,
        );
        t.set_lines(vec![line("a", 2.0, 3.5)]).unwrap();
        let snap = DocumentSnapshot::for_transfer(&t, "Central", "Obra Norte");
        assert_eq!(snap.kind, DocumentKind::LoanReceipt);
        assert_eq!(snap.title, "Vale de préstamo");
        assert_eq!(snap.total, 7.0);
        assert!(snap
            .header
            .iter()
            .any(|(k, v)| k == "Fecha de devolución" && v == "15/05/2024"));
    }

    #[test]
    fn test_requisition_snapshot_is_detached_from_source() {
        let mut r = Requisition::new_for_insert(
            "SOL-000009".into(),
            date(3),
            "Colegio Miraflores".into(),
            "Arq. Salas".into(),
            "wh-a".into(),
            Some("Urgente".into()),
        );
        r.set_lines(vec![line("a", 1.0, 10.0), line("b", 2.0, 5.0)]).unwrap();
        let snap = DocumentSnapshot::for_requisition(&r, "Central");
        r.set_lines(vec![]).unwrap();
        assert_eq!(snap.lines.len(), 2);
        assert_eq!(snap.total, 20.0);
        assert_eq!(snap.header.last().unwrap().1, "Urgente");
        assert_eq!(snap.file_name("csv"), "SOL-000009.csv");
    }
}
