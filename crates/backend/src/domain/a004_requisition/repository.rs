use chrono::{NaiveDate, Utc};
use contracts::domain::a004_requisition::aggregate::{Requisition, RequisitionId};
use contracts::domain::common::{BaseAggregate, DocumentLine, DocumentStatus, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;

use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QuerySelect, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a004_requisition")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub code: String,
    pub description: String,
    pub comment: Option<String>,
    pub document_no: String,
    pub document_date: NaiveDate,
    pub project: String,
    pub requested_by: String,
    pub warehouse_id: String,
    pub status: String,
    /// Табличная часть, JSON-массив DocumentLine
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

impl From<Model> for Requisition {
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
            tracing::warn!("Requisition {}: broken lines_json: {}", m.document_no, e);
            Vec::new()
        });

        Requisition {
            base: BaseAggregate::with_metadata(
                RequisitionId(uuid),
                m.code,
                m.description,
                m.comment,
                metadata,
            ),
            document_no: m.document_no,
            document_date: m.document_date,
            project: m.project,
            requested_by: m.requested_by,
            warehouse_id: m.warehouse_id,
            status: DocumentStatus::parse(&m.status).unwrap_or_default(),
            lines,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

fn to_active(aggregate: &Requisition) -> anyhow::Result<ActiveModel> {
    Ok(ActiveModel {
        id: Set(aggregate.base.id.value().to_string()),
        code: Set(aggregate.base.code.clone()),
        description: Set(aggregate.base.description.clone()),
        comment: Set(aggregate.base.comment.clone()),
        document_no: Set(aggregate.document_no.clone()),
        document_date: Set(aggregate.document_date),
        project: Set(aggregate.project.clone()),
        requested_by: Set(aggregate.requested_by.clone()),
        warehouse_id: Set(aggregate.warehouse_id.clone()),
        status: Set(aggregate.status.as_str().to_string()),
        lines_json: Set(serde_json::to_string(&aggregate.lines)?),
        is_deleted: Set(aggregate.base.metadata.is_deleted),
        is_posted: Set(aggregate.base.metadata.is_posted),
        created_at: Set(Some(aggregate.base.metadata.created_at)),
        updated_at: Set(Some(aggregate.base.metadata.updated_at)),
        version: Set(aggregate.base.metadata.version),
    })
}

pub async fn list_all() -> anyhow::Result<Vec<Requisition>> {
    let items = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Requisition>> {
    let result = Entity::find_by_id(id.to_string())
        .filter(Column::IsDeleted.eq(false))
        .one(conn())
        .await?;
    Ok(result.map(Into::into))
}

/// Все выданные номера, включая удаленные документы
pub async fn list_document_numbers() -> anyhow::Result<Vec<String>> {
    let numbers = Entity::find()
        .select_only()
        .column(Column::DocumentNo)
        .into_tuple::<String>()
        .all(conn())
        .await?;
    Ok(numbers)
}

pub async fn insert(aggregate: &Requisition) -> anyhow::Result<()> {
    to_active(aggregate)?.insert(conn()).await?;
    Ok(())
}

pub async fn update(aggregate: &Requisition) -> anyhow::Result<()> {
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
