//! Database schema and migrations

use rusqlite::Connection;

use crate::Result;

/// Current schema version
pub const SCHEMA_VERSION: i32 = 2;

/// Initialize the database schema
///
/// # Errors
///
/// Returns error if migration fails
pub fn init(conn: &Connection) -> Result<()> {
    let version: i32 = conn
        .query_row("PRAGMA user_version", [], |row| row.get(0))
        .unwrap_or(0);

    if version < 1 {
        migrate_v1(conn)?;
    }
    if version < 2 {
        migrate_v2(conn)?;
    }

    Ok(())
}

fn migrate_v1(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r"
        -- Signs: letters, graphemes, words and phrases
        CREATE TABLE IF NOT EXISTS signs (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT UNIQUE NOT NULL
        );

        -- Gestures: renderable assets owned by a sign
        CREATE TABLE IF NOT EXISTS gestures (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            sign_id INTEGER NOT NULL,
            gesture_path TEXT NOT NULL,
            FOREIGN KEY(sign_id) REFERENCES signs(id)
        );

        PRAGMA user_version = 1;
        ",
    )?;

    tracing::info!("migrated to schema v1");
    Ok(())
}

fn migrate_v2(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r"
        -- Gestures never outlive their sign
        CREATE TABLE gestures_v2 (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            sign_id INTEGER NOT NULL REFERENCES signs(id) ON DELETE CASCADE,
            gesture_path TEXT NOT NULL
        );

        INSERT INTO gestures_v2 (id, sign_id, gesture_path)
            SELECT id, sign_id, gesture_path FROM gestures;

        DROP TABLE gestures;
        ALTER TABLE gestures_v2 RENAME TO gestures;

        CREATE INDEX IF NOT EXISTS idx_gestures_sign ON gestures(sign_id);

        -- Names are compared uppercased with underscores for spaces
        UPDATE signs SET name = UPPER(REPLACE(TRIM(name), ' ', '_'));

        PRAGMA user_version = 2;
        ",
    )?;

    tracing::info!("migrated to schema v2");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_sets_version() {
        let conn = Connection::open_in_memory().unwrap();
        init(&conn).unwrap();

        let version: i32 = conn
            .query_row("PRAGMA user_version", [], |row| row.get(0))
            .unwrap();
        assert_eq!(version, SCHEMA_VERSION);

        // Idempotent
        init(&conn).unwrap();
    }

    #[test]
    fn test_v1_database_is_upgraded() {
        let conn = Connection::open_in_memory().unwrap();
        migrate_v1(&conn).unwrap();
        conn.execute_batch(
            r"
            INSERT INTO signs (name) VALUES ('thank you');
            INSERT INTO gestures (sign_id, gesture_path) VALUES (1, 'Gestures/THANK_YOU');
            ",
        )
        .unwrap();

        init(&conn).unwrap();

        let name: String = conn
            .query_row("SELECT name FROM signs WHERE id = 1", [], |row| row.get(0))
            .unwrap();
        assert_eq!(name, "THANK_YOU");

        let path: String = conn
            .query_row("SELECT gesture_path FROM gestures WHERE sign_id = 1", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(path, "Gestures/THANK_YOU");
    }
}
