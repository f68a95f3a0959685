//! Sign repository: seeding and loading the sign/gesture tables

use rusqlite::{Connection, ErrorCode, OptionalExtension};

use super::{DbConn, DbPool};
use crate::translate::{SignDictionary, SignEntry, normalize_name};
use crate::{Error, Result};

/// Sign repository
#[derive(Clone)]
pub struct SignRepo {
    pool: DbPool,
}

impl SignRepo {
    /// Create a new sign repository
    #[must_use]
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> Result<DbConn> {
        self.pool.get().map_err(|e| Error::Database(e.to_string()))
    }

    /// Number of stored signs
    ///
    /// # Errors
    ///
    /// Returns error if database operation fails
    pub fn count(&self) -> Result<usize> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM signs", [], |row| row.get(0))?;
        usize::try_from(count).map_err(|e| Error::Database(e.to_string()))
    }

    /// Insert a sign and its gestures
    ///
    /// # Errors
    ///
    /// Returns `Error::Dictionary` if the normalized name already exists, or a
    /// database error
    pub fn insert(&self, entry: &SignEntry) -> Result<i64> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        let id = insert_entry(&tx, entry)?;
        tx.commit()?;
        Ok(id)
    }

    /// Seed the tables with `entries`
    ///
    /// A non-empty store is left untouched unless `reset` is set, in which
    /// case all signs and gestures are replaced. Returns the number of signs
    /// inserted.
    ///
    /// # Errors
    ///
    /// Returns error if the entries contain duplicates or a database operation
    /// fails; nothing is written in that case
    pub fn seed(&self, entries: &[SignEntry], reset: bool) -> Result<usize> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        if reset {
            tx.execute_batch(
                r"
                DELETE FROM gestures;
                DELETE FROM signs;
                DELETE FROM sqlite_sequence WHERE name IN ('signs', 'gestures');
                ",
            )?;
            tracing::info!("cleared sign tables");
        } else {
            let existing: i64 = tx.query_row("SELECT COUNT(*) FROM signs", [], |row| row.get(0))?;
            if existing > 0 {
                tracing::debug!(existing, "sign tables already seeded");
                return Ok(0);
            }
        }

        for entry in entries {
            insert_entry(&tx, entry)?;
        }
        tx.commit()?;

        tracing::info!(signs = entries.len(), "seeded sign tables");
        Ok(entries.len())
    }

    /// Find a sign by name (case-insensitive, spaces or underscores)
    ///
    /// # Errors
    ///
    /// Returns error if database operation fails
    pub fn find(&self, name: &str) -> Result<Option<SignEntry>> {
        let conn = self.conn()?;
        let key = normalize_name(name);

        let sign_id: Option<i64> = conn
            .query_row("SELECT id FROM signs WHERE name = ?1", [&key], |row| {
                row.get(0)
            })
            .optional()?;

        let Some(sign_id) = sign_id else {
            return Ok(None);
        };

        let mut stmt =
            conn.prepare("SELECT gesture_path FROM gestures WHERE sign_id = ?1 ORDER BY id")?;
        let gesture_paths = stmt
            .query_map([sign_id], |row| row.get::<_, String>(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(Some(SignEntry::new(key, gesture_paths)))
    }

    /// Load every sign that owns at least one gesture, in insertion order
    ///
    /// # Errors
    ///
    /// Returns error if database operation fails
    pub fn load_entries(&self) -> Result<Vec<SignEntry>> {
        let conn = self.conn()?;

        let mut stmt = conn.prepare(
            r"
            SELECT s.id, s.name, g.gesture_path
            FROM signs s
            JOIN gestures g ON g.sign_id = s.id
            ORDER BY s.id, g.id
            ",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
            ))
        })?;

        let mut entries: Vec<SignEntry> = Vec::new();
        let mut last_id = None;
        for row in rows {
            let (sign_id, name, path) = row?;
            if last_id == Some(sign_id) {
                if let Some(entry) = entries.last_mut() {
                    entry.gesture_paths.push(path);
                    continue;
                }
            }
            entries.push(SignEntry::new(name, vec![path]));
            last_id = Some(sign_id);
        }

        Ok(entries)
    }

    /// Load the whole store into an in-memory dictionary
    ///
    /// # Errors
    ///
    /// Returns error if the store cannot be read or holds conflicting names
    pub fn load_dictionary(&self) -> Result<SignDictionary> {
        let dictionary = SignDictionary::from_entries(self.load_entries()?)?;
        tracing::info!(signs = dictionary.len(), "loaded sign dictionary");
        Ok(dictionary)
    }
}

/// Insert one sign and its gestures on an open connection or transaction
fn insert_entry(conn: &Connection, entry: &SignEntry) -> Result<i64> {
    let name = normalize_name(&entry.name);
    if name.is_empty() {
        return Err(Error::Dictionary(format!("blank sign name: {:?}", entry.name)));
    }

    match conn.execute("INSERT INTO signs (name) VALUES (?1)", [&name]) {
        Ok(_) => {}
        Err(rusqlite::Error::SqliteFailure(e, _)) if e.code == ErrorCode::ConstraintViolation => {
            return Err(Error::Dictionary(format!("duplicate sign: {name}")));
        }
        Err(e) => return Err(e.into()),
    }
    let sign_id = conn.last_insert_rowid();

    for path in &entry.gesture_paths {
        conn.execute(
            "INSERT INTO gestures (sign_id, gesture_path) VALUES (?1, ?2)",
            rusqlite::params![sign_id, path],
        )?;
    }

    Ok(sign_id)
}
