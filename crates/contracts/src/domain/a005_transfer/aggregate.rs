use crate::domain::common::{
    lines_total, validate_lines, AggregateId, AggregateRoot, BaseAggregate, DocumentLine,
    DocumentStatus, EntityMetadata,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

crate::uuid_aggregate_id!(
    /// ID типа для документа Transferencia
    TransferId
);

/// Вид перемещения
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TransferKind {
    /// Обычное перемещение между складами
    #[default]
    Transferencia,
    /// Временная выдача с обязательной датой возврата (печатается «Vale de préstamo»)
    #[serde(rename = "Préstamo")]
    Prestamo,
}

impl TransferKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransferKind::Transferencia => "Transferencia",
            TransferKind::Prestamo => "Préstamo",
        }
    }
}

/// Документ Transferencia (a005): перемещение ресурсов между складами
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transfer {
    #[serde(flatten)]
    pub base: BaseAggregate<TransferId>,

    /// Номер документа (напр. "TRF-000003")
    pub document_no: String,
    pub document_date: NaiveDate,

    /// Склад-отправитель (a003_warehouse)
    pub origin_warehouse_id: String,
    /// Склад-получатель (a003_warehouse)
    pub destination_warehouse_id: String,

    pub kind: TransferKind,

    /// Дата возврата, только для préstamo
    pub return_date: Option<NaiveDate>,

    pub status: DocumentStatus,
    pub lines: Vec<DocumentLine>,
}

impl Transfer {
    pub fn new_for_insert(
        document_no: String,
        document_date: NaiveDate,
        origin_warehouse_id: String,
        destination_warehouse_id: String,
        kind: TransferKind,
        return_date: Option<NaiveDate>,
        comment: Option<String>,
    ) -> Self {
        let description = format!("{} - {}", document_no, kind.as_str());
        let mut base = BaseAggregate::new(TransferId::new_v4(), document_no.clone(), description);
        base.set_comment(comment);

        Self {
            base,
            document_no,
            document_date,
            origin_warehouse_id,
            destination_warehouse_id,
            kind,
            return_date,
            status: DocumentStatus::Pendiente,
            lines: Vec::new(),
        }
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    pub fn update(&mut self, dto: &TransferDto) {
        self.document_date = dto.document_date;
        self.origin_warehouse_id = dto.origin_warehouse_id.clone();
        self.destination_warehouse_id = dto.destination_warehouse_id.clone();
        self.kind = dto.kind;
        self.return_date = match dto.kind {
            TransferKind::Prestamo => dto.return_date,
            TransferKind::Transferencia => None,
        };
        self.base.set_comment(dto.comment.clone());
        self.base.description = format!("{} - {}", self.document_no, self.kind.as_str());
    }

    pub fn set_lines(&mut self, lines: Vec<DocumentLine>) -> Result<(), String> {
        if !self.status.is_editable() {
            return Err(format!(
                "La transferencia {} está {} y no se puede modificar",
                self.document_no, self.status
            ));
        }
        validate_lines(&lines)?;
        self.lines = lines;
        Ok(())
    }

    pub fn change_status(&mut self, next: DocumentStatus) -> Result<(), String> {
        if !self.status.can_transition_to(next) {
            return Err(format!("No se puede pasar de {} a {}", self.status, next));
        }
        if next == DocumentStatus::Aprobado && self.lines.is_empty() {
            return Err("No se puede aprobar una transferencia sin recursos".into());
        }
        self.status = next;
        self.base.metadata.is_posted = next == DocumentStatus::Completado;
        Ok(())
    }

    pub fn total(&self) -> f64 {
        lines_total(&self.lines)
    }

    /// Участвует ли склад в перемещении (как отправитель или получатель)
    pub fn touches_warehouse(&self, warehouse_id: &str) -> bool {
        self.origin_warehouse_id == warehouse_id || self.destination_warehouse_id == warehouse_id
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.document_no.trim().is_empty() {
            return Err("El número de documento no puede estar vacío".into());
        }
        if self.origin_warehouse_id.trim().is_empty()
            || self.destination_warehouse_id.trim().is_empty()
        {
            return Err("Debe indicar almacén de origen y de destino".into());
        }
        if self.origin_warehouse_id == self.destination_warehouse_id {
            return Err("El almacén de origen y destino deben ser distintos".into());
        }
        if self.kind == TransferKind::Prestamo {
            match self.return_date {
                None => return Err("Un préstamo requiere fecha de devolución".into()),
                Some(d) if d < self.document_date => {
                    return Err(
                        "La fecha de devolución no puede ser anterior a la del documento".into(),
                    )
                }
                Some(_) => {}
            }
        }
        validate_lines(&self.lines)
    }

    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

impl AggregateRoot for Transfer {
    type Id = TransferId;

    fn id(&self) -> Self::Id {
        self.base.id
    }

    fn code(&self) -> &str {
        &self.base.code
    }

    fn description(&self) -> &str {
        &self.base.description
    }

    fn metadata(&self) -> &EntityMetadata {
        &self.base.metadata
    }

    fn metadata_mut(&mut self) -> &mut EntityMetadata {
        &mut self.base.metadata
    }

    fn aggregate_index() -> &'static str {
        "a005"
    }

    fn collection_name() -> &'static str {
        "transfer"
    }

    fn element_name() -> &'static str {
        "Transferencia"
    }

    fn list_name() -> &'static str {
        "Transferencias"
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransferDto {
    pub id: Option<String>,
    pub document_date: NaiveDate,
    pub origin_warehouse_id: String,
    pub destination_warehouse_id: String,
    #[serde(default)]
    pub kind: TransferKind,
    pub return_date: Option<NaiveDate>,
    pub comment: Option<String>,
    #[serde(default)]
    pub lines: Vec<DocumentLine>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn sample(kind: TransferKind, return_date: Option<NaiveDate>) -> Transfer {
        Transfer::new_for_insert(
            "TRF-000001".into(),
            date(5),
            "wh-central".into(),
            "wh-obra".into(),
            kind,
            return_date,
            None,
        )
    }

    #[test]
    fn test_origin_must_differ_from_destination() {
        let mut t = sample(TransferKind::Transferencia, None);
        assert!(t.validate().is_ok());
        t.destination_warehouse_id = "wh-central".into();
        assert!(t.validate().is_err());
    }

    #[test]
    fn test_loan_requires_return_date_after_document_date() {
        assert!(sample(TransferKind::Prestamo, None).validate().is_err());
        assert!(sample(TransferKind::Prestamo, Some(date(1))).validate().is_err());
        assert!(sample(TransferKind::Prestamo, Some(date(20))).validate().is_ok());
    }

    #[test]
    fn test_kind_serializes_with_accent() {
        let json = serde_json::to_string(&TransferKind::Prestamo).unwrap();
        assert_eq!(json, "\"Préstamo\"");
    }

    #[test]
    fn test_touches_warehouse() {
        let t = sample(TransferKind::Transferencia, None);
        assert!(t.touches_warehouse("wh-obra"));
        assert!(t.touches_warehouse("wh-central"));
        assert!(!t.touches_warehouse("wh-otro"));
    }

    #[test]
    fn test_update_drops_return_date_for_plain_transfer() {
        let mut t = sample(TransferKind::Prestamo, Some(date(20)));
        let dto = TransferDto {
            id: Some(t.to_string_id()),
            document_date: date(5),
            origin_warehouse_id: "wh-central".into(),
            destination_warehouse_id: "wh-obra".into(),
            kind: TransferKind::Transferencia,
            return_date: Some(date(20)),
            comment: None,
            lines: vec![],
        };
        t.update(&dto);
        assert_eq!(t.return_date, None);
        assert_eq!(t.base.description, "TRF-000001 - Transferencia");
    }
}
