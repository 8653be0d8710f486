use tokio_rusqlite::{Connection, Result, rusqlite};
use tracing::info;

/// Current schema version.  Bump this whenever the schema changes and add a
/// corresponding migration arm in `run_migrations`.
const SCHEMA_VERSION: u32 = 1;

/// Initialize the database schema and run any pending migrations.
pub async fn create_tables(conn: &Connection) -> Result<()> {
    create_schema(conn).await?;
    run_migrations(conn).await?;
    Ok(())
}

/// Create all tables for a brand-new database (version 1 schema).
async fn create_schema(conn: &Connection) -> Result<()> {
    conn.call(|conn: &mut rusqlite::Connection| {
        // Products table — `available` stored as 0/1, `price` as REAL.
        conn.execute(
            "CREATE TABLE IF NOT EXISTS products (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                name        TEXT    NOT NULL,
                description TEXT    NOT NULL,
                price       REAL    NOT NULL,
                available   INTEGER NOT NULL DEFAULT 1,
                category    TEXT    NOT NULL,
                created_at  INTEGER NOT NULL,
                updated_at  INTEGER NOT NULL
            )",
            [],
        )?;

        // --- Indexes --------------------------------------------------------
        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_products_name      ON products(name)",
            [],
        )?;
        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_products_category  ON products(category)",
            [],
        )?;
        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_products_available ON products(available)",
            [],
        )?;
        conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;

        Ok(())
    })
    .await
}

/// Apply any schema migrations required to reach `SCHEMA_VERSION`.
///
/// Uses `PRAGMA user_version` as the migration counter.
/// Each migration arm must be idempotent — safe to run on a DB that was
/// created at any earlier version.
async fn run_migrations(conn: &Connection) -> Result<()> {
    let current_version: u32 = conn
        .call(|conn| {
            let v: u32 = conn
                .query_row("PRAGMA user_version", [], |r| r.get(0))
                .unwrap_or(0);
            Ok::<_, rusqlite::Error>(v)
        })
        .await?;

    if current_version >= SCHEMA_VERSION {
        return Ok(());
    }

    info!(
        "Database schema at version {}; target version {}. Running migrations…",
        current_version, SCHEMA_VERSION
    );

    // No migrations yet — v1 is the first schema. Future arms go here.

    conn.call(|conn| {
        conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;
        Ok::<_, rusqlite::Error>(())
    })
    .await?;

    Ok(())
}
