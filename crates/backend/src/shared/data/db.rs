use once_cell::sync::OnceCell;
use sea_orm::{ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement};
use std::path::Path;

static DB_CONN: OnceCell<DatabaseConnection> = OnceCell::new();

/// Схема справочников и документов. Строки документов хранятся в `lines_json`.
const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS a001_resource (
        id TEXT PRIMARY KEY NOT NULL,
        code TEXT NOT NULL DEFAULT '',
        description TEXT NOT NULL,
        comment TEXT,
        unit TEXT NOT NULL DEFAULT 'und',
        unit_cost REAL NOT NULL DEFAULT 0,
        category TEXT NOT NULL DEFAULT '',
        is_deleted INTEGER NOT NULL DEFAULT 0,
        is_posted INTEGER NOT NULL DEFAULT 0,
        created_at TEXT,
        updated_at TEXT,
        version INTEGER NOT NULL DEFAULT 0
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS a002_supplier (
        id TEXT PRIMARY KEY NOT NULL,
        code TEXT NOT NULL DEFAULT '',
        description TEXT NOT NULL,
        comment TEXT,
        tax_id TEXT NOT NULL DEFAULT '',
        phone TEXT NOT NULL DEFAULT '',
        email TEXT NOT NULL DEFAULT '',
        address TEXT NOT NULL DEFAULT '',
        is_deleted INTEGER NOT NULL DEFAULT 0,
        is_posted INTEGER NOT NULL DEFAULT 0,
        created_at TEXT,
        updated_at TEXT,
        version INTEGER NOT NULL DEFAULT 0
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS a003_warehouse (
        id TEXT PRIMARY KEY NOT NULL,
        code TEXT NOT NULL DEFAULT '',
        description TEXT NOT NULL,
        comment TEXT,
        address TEXT NOT NULL DEFAULT '',
        is_site INTEGER NOT NULL DEFAULT 0,
        is_deleted INTEGER NOT NULL DEFAULT 0,
        is_posted INTEGER NOT NULL DEFAULT 0,
        created_at TEXT,
        updated_at TEXT,
        version INTEGER NOT NULL DEFAULT 0
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS a004_requisition (
        id TEXT PRIMARY KEY NOT NULL,
        code TEXT NOT NULL DEFAULT '',
        description TEXT NOT NULL,
        comment TEXT,
        document_no TEXT NOT NULL UNIQUE,
        document_date TEXT NOT NULL,
        project TEXT NOT NULL DEFAULT '',
        requested_by TEXT NOT NULL DEFAULT '',
        warehouse_id TEXT NOT NULL DEFAULT '',
        status TEXT NOT NULL DEFAULT 'Pendiente',
        lines_json TEXT NOT NULL DEFAULT '[]',
        is_deleted INTEGER NOT NULL DEFAULT 0,
        is_posted INTEGER NOT NULL DEFAULT 0,
        created_at TEXT,
        updated_at TEXT,
        version INTEGER NOT NULL DEFAULT 0
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS a005_transfer (
        id TEXT PRIMARY KEY NOT NULL,
        code TEXT NOT NULL DEFAULT '',
        description TEXT NOT NULL,
        comment TEXT,
        document_no TEXT NOT NULL UNIQUE,
        document_date TEXT NOT NULL,
        origin_warehouse_id TEXT NOT NULL DEFAULT '',
        destination_warehouse_id TEXT NOT NULL DEFAULT '',
        kind TEXT NOT NULL DEFAULT 'Transferencia',
        return_date TEXT,
        status TEXT NOT NULL DEFAULT 'Pendiente',
        lines_json TEXT NOT NULL DEFAULT '[]',
        is_deleted INTEGER NOT NULL DEFAULT 0,
        is_posted INTEGER NOT NULL DEFAULT 0,
        created_at TEXT,
        updated_at TEXT,
        version INTEGER NOT NULL DEFAULT 0
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS a006_purchase_order (
        id TEXT PRIMARY KEY NOT NULL,
        code TEXT NOT NULL DEFAULT '',
        description TEXT NOT NULL,
        comment TEXT,
        document_no TEXT NOT NULL UNIQUE,
        document_date TEXT NOT NULL,
        supplier_id TEXT NOT NULL DEFAULT '',
        requisition_id TEXT,
        delivery_address TEXT NOT NULL DEFAULT '',
        status TEXT NOT NULL DEFAULT 'Pendiente',
        lines_json TEXT NOT NULL DEFAULT '[]',
        is_deleted INTEGER NOT NULL DEFAULT 0,
        is_posted INTEGER NOT NULL DEFAULT 0,
        created_at TEXT,
        updated_at TEXT,
        version INTEGER NOT NULL DEFAULT 0
    );
    "#,
    "CREATE INDEX IF NOT EXISTS idx_a005_transfer_origin ON a005_transfer (origin_warehouse_id);",
    "CREATE INDEX IF NOT EXISTS idx_a005_transfer_destination ON a005_transfer (destination_warehouse_id);",
    "CREATE INDEX IF NOT EXISTS idx_a006_purchase_order_requisition ON a006_purchase_order (requisition_id);",
];

/// URL sqlite для файла БД (`mode=rwc` создает файл при отсутствии)
fn sqlite_url(db_file: &Path) -> anyhow::Result<String> {
    let absolute_path = if db_file.is_absolute() {
        db_file.to_path_buf()
    } else {
        std::env::current_dir()?.join(db_file)
    };
    // Windows: C:\x -> /C:/x
    let normalized = absolute_path.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    Ok(format!("sqlite://{}{}?mode=rwc", prefix, normalized))
}

pub async fn initialize_database(db_file: &Path) -> anyhow::Result<()> {
    if let Some(parent) = db_file.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let db_url = sqlite_url(db_file)?;
    tracing::info!("Opening database: {}", db_url);
    let conn = Database::connect(&db_url).await?;

    for sql in SCHEMA {
        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            sql.to_string(),
        ))
        .await?;
    }

    DB_CONN
        .set(conn)
        .map_err(|_| anyhow::anyhow!("Database connection already initialized"))?;
    Ok(())
}

pub fn get_connection() -> &'static DatabaseConnection {
    DB_CONN
        .get()
        .expect("Database connection has not been initialized")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqlite_url_for_absolute_unix_path() {
        let url = sqlite_url(Path::new("/srv/erp/app.db")).unwrap();
        assert_eq!(url, "sqlite:///srv/erp/app.db?mode=rwc");
    }

    #[test]
    fn test_sqlite_url_for_relative_path_is_absolute() {
        let url = sqlite_url(Path::new("target/db/app.db")).unwrap();
        assert!(url.starts_with("sqlite:///"));
        assert!(url.ends_with("target/db/app.db?mode=rwc"));
    }

    #[test]
    fn test_schema_creates_every_table() {
        let tables = [
            "a001_resource",
            "a002_supplier",
            "a003_warehouse",
            "a004_requisition",
            "a005_transfer",
            "a006_purchase_order",
        ];
        for table in tables {
            let needle = format!("CREATE TABLE IF NOT EXISTS {} (", table);
            assert!(SCHEMA.iter().any(|sql| sql.contains(&needle)), "{}", table);
        }
    }
}
