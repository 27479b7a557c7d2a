//! Database migrations

use crate::error::{Error, Result};
use crate::search::fold_case;
use libsql::params::Params;
use libsql::{Connection, Value};

/// Current schema version
const CURRENT_VERSION: i32 = 3;

struct Migration {
    version: i32,
    statements: &'static [&'static str],
    /// Fill the `*_folded` search columns of existing rows
    backfill_search_columns: bool,
}

const MIGRATIONS: [Migration; 3] = [
    Migration {
        version: 1,
        statements: &V1_BLOG_SCHEMA,
        backfill_search_columns: false,
    },
    Migration {
        version: 2,
        statements: &V2_CONTACT_MESSAGES,
        backfill_search_columns: false,
    },
    Migration {
        version: 3,
        statements: &V3_FOLDED_SEARCH_COLUMNS,
        backfill_search_columns: true,
    },
];

/// Run all pending migrations
pub async fn run(conn: &Connection) -> Result<()> {
    run_up_to(conn, CURRENT_VERSION).await
}

async fn run_up_to(conn: &Connection, target: i32) -> Result<()> {
    let version = get_version(conn).await?;

    for migration in MIGRATIONS
        .iter()
        .filter(|migration| migration.version > version && migration.version <= target)
    {
        apply(conn, migration).await?;
    }

    Ok(())
}

/// Get the current schema version
async fn get_version(conn: &Connection) -> Result<i32> {
    let mut rows = conn
        .query(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            (),
        )
        .await?;

    let exists: bool = if let Some(row) = rows.next().await? {
        row.get::<i32>(0)? != 0
    } else {
        false
    };

    if !exists {
        return Ok(0);
    }

    let mut rows = conn
        .query("SELECT COALESCE(MAX(version), 0) FROM schema_version", ())
        .await?;

    let version: i32 = if let Some(row) = rows.next().await? {
        row.get(0)?
    } else {
        0
    };

    Ok(version)
}

/// Version 1: categories and posts
const V1_BLOG_SCHEMA: [&str; 6] = [
    "CREATE TABLE IF NOT EXISTS schema_version (
        version INTEGER PRIMARY KEY
    )",
    "CREATE TABLE IF NOT EXISTS categories (
        id TEXT PRIMARY KEY,
        name_fa TEXT NOT NULL,
        name_en TEXT NOT NULL,
        slug TEXT NOT NULL UNIQUE
    )",
    "CREATE TABLE IF NOT EXISTS posts (
        id TEXT PRIMARY KEY,
        title_fa TEXT NOT NULL,
        title_en TEXT NOT NULL,
        subtitle_fa TEXT NOT NULL,
        subtitle_en TEXT NOT NULL,
        body_fa TEXT NOT NULL,
        body_en TEXT NOT NULL,
        slug TEXT NOT NULL UNIQUE,
        created_at INTEGER NOT NULL,
        is_selected INTEGER NOT NULL DEFAULT 0,
        category_id TEXT REFERENCES categories(id) ON DELETE SET NULL,
        creator_name TEXT NOT NULL,
        creator_title TEXT NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS idx_posts_created ON posts(created_at DESC)",
    "CREATE INDEX IF NOT EXISTS idx_posts_selected ON posts(is_selected)",
    "CREATE INDEX IF NOT EXISTS idx_posts_category ON posts(category_id)",
];

/// Version 2: contact form inbox
const V2_CONTACT_MESSAGES: [&str; 2] = [
    "CREATE TABLE IF NOT EXISTS contact_messages (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        email TEXT NOT NULL,
        subject TEXT NOT NULL,
        message TEXT NOT NULL,
        created_at INTEGER NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS idx_contact_messages_created ON contact_messages(created_at DESC)",
];

/// Version 3: case-folded copies of the searchable columns
const V3_FOLDED_SEARCH_COLUMNS: [&str; 9] = [
    "ALTER TABLE posts ADD COLUMN title_fa_folded TEXT NOT NULL DEFAULT ''",
    "ALTER TABLE posts ADD COLUMN title_en_folded TEXT NOT NULL DEFAULT ''",
    "ALTER TABLE posts ADD COLUMN subtitle_fa_folded TEXT NOT NULL DEFAULT ''",
    "ALTER TABLE posts ADD COLUMN subtitle_en_folded TEXT NOT NULL DEFAULT ''",
    "ALTER TABLE posts ADD COLUMN body_fa_folded TEXT NOT NULL DEFAULT ''",
    "ALTER TABLE posts ADD COLUMN body_en_folded TEXT NOT NULL DEFAULT ''",
    "ALTER TABLE posts ADD COLUMN creator_name_folded TEXT NOT NULL DEFAULT ''",
    "ALTER TABLE categories ADD COLUMN name_fa_folded TEXT NOT NULL DEFAULT ''",
    "ALTER TABLE categories ADD COLUMN name_en_folded TEXT NOT NULL DEFAULT ''",
];

/// Run one migration in a transaction.
///
/// libsql has no `execute_batch` here, so statements run one by one.
async fn apply(conn: &Connection, migration: &Migration) -> Result<()> {
    conn.execute("BEGIN TRANSACTION", ()).await?;

    if let Err(e) = apply_steps(conn, migration).await {
        conn.execute("ROLLBACK", ()).await.ok();
        return Err(e);
    }

    if let Err(e) = conn.execute("COMMIT", ()).await {
        conn.execute("ROLLBACK", ()).await.ok();
        return Err(e.into());
    }

    tracing::info!(
        "Migrated database to version {} (latest {CURRENT_VERSION})",
        migration.version
    );
    Ok(())
}

async fn apply_steps(conn: &Connection, migration: &Migration) -> Result<()> {
    for stmt in migration.statements {
        conn.execute(stmt, ()).await?;
    }
    if migration.backfill_search_columns {
        backfill_search_columns(conn).await?;
    }
    conn.execute(
        "INSERT INTO schema_version (version) VALUES (?)",
        libsql::params![i64::from(migration.version)],
    )
    .await?;
    Ok(())
}

/// Fold `source` columns (after the leading id) of every row of `table`
/// into the matching `*_folded` columns.
async fn backfill_table(conn: &Connection, table: &str, source: &[&str]) -> Result<()> {
    let mut pending = Vec::new();
    {
        let mut rows = conn
            .query(&format!("SELECT id, {} FROM {table}", source.join(", ")), ())
            .await?;
        while let Some(row) = rows.next().await? {
            let mut values = Vec::with_capacity(source.len() + 1);
            for idx in 1..=source.len() {
                let idx = i32::try_from(idx)
                    .map_err(|_| Error::Database(format!("Too many columns in {table}")))?;
                values.push(Value::Text(fold_case(&row.get::<String>(idx)?)));
            }
            values.push(Value::Text(row.get::<String>(0)?));
            pending.push(values);
        }
    }

    let assignments = source
        .iter()
        .map(|column| format!("{column}_folded = ?"))
        .collect::<Vec<_>>()
        .join(", ");
    let update = format!("UPDATE {table} SET {assignments} WHERE id = ?");
    for values in pending {
        conn.execute(&update, Params::Positional(values)).await?;
    }
    Ok(())
}

async fn backfill_search_columns(conn: &Connection) -> Result<()> {
    backfill_table(
        conn,
        "posts",
        &[
            "title_fa",
            "title_en",
            "subtitle_fa",
            "subtitle_en",
            "body_fa",
            "body_en",
            "creator_name",
        ],
    )
    .await?;
    backfill_table(conn, "categories", &["name_fa", "name_en"]).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use libsql::Builder;

    async fn setup() -> Connection {
        let db = Builder::new_local(":memory:").build().await.unwrap();
        db.connect().unwrap()
    }

    async fn table_exists(conn: &Connection, name: &str) -> bool {
        let mut rows = conn
            .query(
                "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?)",
                [name],
            )
            .await
            .unwrap();

        rows.next()
            .await
            .unwrap()
            .is_some_and(|row| row.get::<i32>(0).unwrap() != 0)
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_migrations() {
        let conn = setup().await;
        run(&conn).await.unwrap();

        let version = get_version(&conn).await.unwrap();
        assert_eq!(version, CURRENT_VERSION);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_migrations_idempotent() {
        let conn = setup().await;
        run(&conn).await.unwrap();
        run(&conn).await.unwrap(); // Should not fail

        let version = get_version(&conn).await.unwrap();
        assert_eq!(version, CURRENT_VERSION);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_migrations_create_tables() {
        let conn = setup().await;
        run(&conn).await.unwrap();

        for table in ["categories", "posts", "contact_messages"] {
            assert!(table_exists(&conn, table).await, "missing table {table}");
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_folded_columns_backfilled_for_existing_rows() {
        let conn = setup().await;
        run_up_to(&conn, 2).await.unwrap();

        conn.execute(
            "INSERT INTO categories (id, name_fa, name_en, slug)
             VALUES ('c1', 'دسته', 'ÉCOLE', 'ecole')",
            (),
        )
        .await
        .unwrap();
        conn.execute(
            "INSERT INTO posts (id, title_fa, title_en, subtitle_fa, subtitle_en, body_fa,
                body_en, slug, created_at, category_id, creator_name, creator_title)
             VALUES ('p1', 'عنوان', 'CAFÉ CULTURE', 'ز', 'Sub', 'م', 'Body', 'cafe', 1,
                'c1', 'ÖZIL', 'Editor')",
            (),
        )
        .await
        .unwrap();

        run(&conn).await.unwrap();
        assert_eq!(get_version(&conn).await.unwrap(), CURRENT_VERSION);

        let mut rows = conn
            .query(
                "SELECT p.title_en_folded, p.creator_name_folded, p.title_fa_folded,
                        c.name_en_folded
                 FROM posts p JOIN categories c ON c.id = p.category_id",
                (),
            )
            .await
            .unwrap();
        let row = rows.next().await.unwrap().unwrap();
        assert_eq!(row.get::<String>(0).unwrap(), "café culture");
        assert_eq!(row.get::<String>(1).unwrap(), "özil");
        assert_eq!(row.get::<String>(2).unwrap(), "عنوان");
        assert_eq!(row.get::<String>(3).unwrap(), "école");
    }
}
