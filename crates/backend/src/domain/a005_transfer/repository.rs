use chrono::{NaiveDate, Utc};
use contracts::domain::a005_transfer::aggregate::{Transfer, TransferId, TransferKind};
use contracts::domain::common::{BaseAggregate, DocumentLine, DocumentStatus, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;

use sea_orm::{ColumnTrait, Condition, EntityTrait, QueryFilter, QuerySelect, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a005_transfer")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub code: String,
    pub description: String,
    pub comment: Option<String>,
    pub document_no: String,
    pub document_date: NaiveDate,
    pub origin_warehouse_id: String,
    pub destination_warehouse_id: String,
    pub kind: String,
    pub return_date: Option<NaiveDate>,
    pub status: String,
    pub lines_json: String,
    pub is_deleted: bool,
    pub is_posted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

fn parse_kind(s: &str) -> TransferKind {
    if s == TransferKind::Prestamo.as_str() {
        TransferKind::Prestamo
    } else {
        TransferKind::Transferencia
    }
}

impl From<Model> for Transfer {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            is_deleted: m.is_deleted,
            is_posted: m.is_posted,
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());
        let lines: Vec<DocumentLine> = serde_json::from_str(&m.lines_json).unwrap_or_else(|e| {
            tracing::warn!("Transfer {}: broken lines_json: {}", m.document_no, e);
            Vec::new()
        });

        Transfer {
            base: BaseAggregate::with_metadata(
                TransferId(uuid),
                m.code,
                m.description,
                m.comment,
                metadata,
            ),
            document_no: m.document_no,
            document_date: m.document_date,
            origin_warehouse_id: m.origin_warehouse_id,
            destination_warehouse_id: m.destination_warehouse_id,
            kind: parse_kind(&m.kind),
            return_date: m.return_date,
            status: DocumentStatus::parse(&m.status).unwrap_or_default(),
            lines,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

fn to_active(aggregate: &Transfer) -> anyhow::Result<ActiveModel> {
    Ok(ActiveModel {
        id: Set(aggregate.base.id.value().to_string()),
        code: Set(aggregate.base.code.clone()),
        description: Set(aggregate.base.description.clone()),
        comment: Set(aggregate.base.comment.clone()),
        document_no: Set(aggregate.document_no.clone()),
        document_date: Set(aggregate.document_date),
        origin_warehouse_id: Set(aggregate.origin_warehouse_id.clone()),
        destination_warehouse_id: Set(aggregate.destination_warehouse_id.clone()),
        kind: Set(aggregate.kind.as_str().to_string()),
        return_date: Set(aggregate.return_date),
        status: Set(aggregate.status.as_str().to_string()),
        lines_json: Set(serde_json::to_string(&aggregate.lines)?),
        is_deleted: Set(aggregate.base.metadata.is_deleted),
        is_posted: Set(aggregate.base.metadata.is_posted),
        created_at: Set(Some(aggregate.base.metadata.created_at)),
        updated_at: Set(Some(aggregate.base.metadata.updated_at)),
        version: Set(aggregate.base.metadata.version),
    })
}

pub async fn list_all() -> anyhow::Result<Vec<Transfer>> {
    let items = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

/// Перемещения, где склад отправитель или получатель
pub async fn list_by_warehouse(warehouse_id: &str) -> anyhow::Result<Vec<Transfer>> {
    let items = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .filter(
            Condition::any()
                .add(Column::OriginWarehouseId.eq(warehouse_id))
                .add(Column::DestinationWarehouseId.eq(warehouse_id)),
        )
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Transfer>> {
    let result = Entity::find_by_id(id.to_string())
        .filter(Column::IsDeleted.eq(false))
        .one(conn())
        .await?;
    Ok(result.map(Into::into))
}

pub async fn list_document_numbers() -> anyhow::Result<Vec<String>> {
    let numbers = Entity::find()
        .select_only()
        .column(Column::DocumentNo)
        .into_tuple::<String>()
        .all(conn())
        .await?;
    Ok(numbers)
}

pub async fn insert(aggregate: &Transfer) -> anyhow::Result<()> {
    to_active(aggregate)?.insert(conn()).await?;
    Ok(())
}

pub async fn update(aggregate: &Transfer) -> anyhow::Result<()> {
    let mut active = to_active(aggregate)?;
    active.created_at = sea_orm::ActiveValue::NotSet;
    active.update(conn()).await?;
    Ok(())
}

pub async fn soft_delete(id: Uuid) -> anyhow::Result<bool> {
    use sea_orm::sea_query::Expr;
    let result = Entity::update_many()
        .col_expr(Column::IsDeleted, Expr::value(true))
        .col_expr(Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(Column::Id.eq(id.to_string()))
        .filter(Column::IsDeleted.eq(false))
        .exec(conn())
        .await?;
    Ok(result.rows_affected > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_roundtrips_through_column_text() {
        for kind in [TransferKind::Transferencia, TransferKind::Prestamo] {
            assert_eq!(parse_kind(kind.as_str()), kind);
        }
        assert_eq!(parse_kind("desconocido"), TransferKind::Transferencia);
    }
}
