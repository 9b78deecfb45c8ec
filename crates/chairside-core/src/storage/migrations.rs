//! Database schema migrations for chairside.
//!
//! Migrations are versioned and applied automatically when opening the
//! database. The `schema_version` table tracks the current migration
//! version.

use rusqlite::{Connection, Result as SqliteResult};

/// Apply all pending migrations to bring the database to the current schema version.
///
/// # Errors
/// Returns an error if migration fails.
pub fn migrate(conn: &Connection) -> SqliteResult<()> {
    // Ensure schema_version table exists
    create_schema_version_table(conn)?;

    // Get current version
    let current_version = get_schema_version(conn);

    // Apply migrations sequentially
    if current_version < 1 {
        migrate_v1(conn)?;
    }
    if current_version < 2 {
        migrate_v2(conn)?;
    }
    if current_version < 3 {
        migrate_v3(conn)?;
    }

    Ok(())
}

/// Create the schema_version table if it doesn't exist.
fn create_schema_version_table(conn: &Connection) -> SqliteResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY
        );",
    )
}

/// Get the current schema version from the database.
///
/// Returns 0 if no version is set (initial database).
fn get_schema_version(conn: &Connection) -> i32 {
    conn.query_row("SELECT version FROM schema_version", [], |row| {
        row.get::<_, i32>(0)
    })
    .unwrap_or_else(|e| {
        if matches!(e, rusqlite::Error::QueryReturnedNoRows) {
            0
        } else {
            tracing::warn!("failed to read schema_version: {e}");
            0
        }
    })
}

/// Set the schema version in the database.
fn set_schema_version(conn: &Connection, version: i32) -> SqliteResult<()> {
    conn.execute("DELETE FROM schema_version", [])?;
    conn.execute(
        "INSERT INTO schema_version (version) VALUES (?1)",
        [version],
    )?;
    Ok(())
}

/// Migration v1: Initial schema (baseline).
///
/// This migration represents the original schema before any migrations
/// were tracked. It's a no-op since the tables are created by
/// SalonDb::migrate() directly.
fn migrate_v1(conn: &Connection) -> SqliteResult<()> {
    set_schema_version(conn, 1)?;
    Ok(())
}

/// Migration v2: Deposit tracking on appointments.
///
/// Adds:
/// - deposit_minor: deposit collected at booking, in currency minor units
fn migrate_v2(conn: &Connection) -> SqliteResult<()> {
    let tx = conn.unchecked_transaction()?;

    tx.execute_batch("ALTER TABLE appointments ADD COLUMN deposit_minor INTEGER;")?;

    tx.execute("DELETE FROM schema_version", [])?;
    tx.execute("INSERT INTO schema_version (version) VALUES (?1)", [2])?;

    tx.commit()?;
    Ok(())
}

/// Migration v3: Lead sources and portfolio-to-service links.
///
/// Adds:
/// - leads.source: where the lead came from (e.g. "instagram")
/// - portfolio_items.service_id: optional link to the service shown
fn migrate_v3(conn: &Connection) -> SqliteResult<()> {
    let tx = conn.unchecked_transaction()?;

    tx.execute_batch(
        "ALTER TABLE leads ADD COLUMN source TEXT;
         ALTER TABLE portfolio_items ADD COLUMN service_id TEXT;",
    )?;

    tx.execute("DELETE FROM schema_version", [])?;
    tx.execute("INSERT INTO schema_version (version) VALUES (?1)", [3])?;

    tx.commit()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_v1_schema(conn: &Connection) {
        conn.execute_batch(
            "CREATE TABLE appointments (
                id              TEXT PRIMARY KEY,
                professional_id TEXT NOT NULL,
                service_id      TEXT NOT NULL,
                client_id       TEXT NOT NULL,
                start_time      TEXT NOT NULL,
                end_time        TEXT NOT NULL,
                status          TEXT NOT NULL DEFAULT 'confirmed',
                note            TEXT,
                created_at      TEXT NOT NULL,
                updated_at      TEXT NOT NULL
            );
            CREATE TABLE leads (
                id         TEXT PRIMARY KEY,
                name       TEXT NOT NULL,
                contact    TEXT NOT NULL,
                message    TEXT,
                status     TEXT NOT NULL DEFAULT 'new',
                client_id  TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            CREATE TABLE portfolio_items (
                id         TEXT PRIMARY KEY,
                title      TEXT NOT NULL,
                caption    TEXT,
                image_ref  TEXT NOT NULL,
                created_at TEXT NOT NULL
            );",
        )
        .unwrap();
    }

    /// Test migration from scratch (v0 -> v3)
    #[test]
    fn test_migrate_from_scratch() {
        let conn = Connection::open_in_memory().unwrap();
        create_v1_schema(&conn);

        conn.execute(
            "INSERT INTO appointments (id, professional_id, service_id, client_id,
                                       start_time, end_time, created_at, updated_at)
             VALUES ('a1', 'p1', 's1', 'c1',
                     '2024-01-01T10:00:00+00:00', '2024-01-01T10:45:00+00:00',
                     '2024-01-01T09:00:00+00:00', '2024-01-01T09:00:00+00:00')",
            [],
        )
        .unwrap();

        migrate(&conn).unwrap();

        let version = get_schema_version(&conn);
        assert_eq!(version, 3);

        // New columns exist and default to NULL for existing rows
        let deposit: Option<i64> = conn
            .query_row(
                "SELECT deposit_minor FROM appointments WHERE id = 'a1'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert!(deposit.is_none());

        let stmt = conn
            .prepare("SELECT source FROM leads")
            .unwrap();
        drop(stmt);
        let stmt = conn
            .prepare("SELECT service_id FROM portfolio_items")
            .unwrap();
        drop(stmt);
    }

    /// Test that migrations are idempotent
    #[test]
    fn test_migrate_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        create_v1_schema(&conn);

        migrate(&conn).unwrap();
        migrate(&conn).unwrap();

        let version = get_schema_version(&conn);
        assert_eq!(version, 3);
    }

    /// Test incremental migration (v2 -> v3)
    #[test]
    fn test_incremental_migration() {
        let conn = Connection::open_in_memory().unwrap();
        create_v1_schema(&conn);

        conn.execute(
            "CREATE TABLE schema_version (version INTEGER PRIMARY KEY)",
            [],
        )
        .unwrap();
        conn.execute("INSERT INTO schema_version (version) VALUES (1)", [])
            .unwrap();

        migrate(&conn).unwrap();

        let version = get_schema_version(&conn);
        assert_eq!(version, 3);

        let stmt = conn
            .prepare("SELECT deposit_minor FROM appointments")
            .unwrap();
        drop(stmt);
    }
}
