//! Record store: the `series` table behind a small CRUD contract.

use std::path::Path;
use std::time::Duration;

use chrono::NaiveDateTime;
use rusqlite::types::ValueRef;
use rusqlite::{Connection, OptionalExtension, Row, params};

use crate::category::{Category, OrderField};
use crate::series::{NewSeries, Series, SeriesId, Status};
use crate::{MiruError, Result};

/// Persistence contract consumed by the walker, the row controllers and the app.
///
/// Every mutating call is its own transaction and has committed by the time
/// it returns.
pub trait SeriesStore {
    fn insert(&self, series: &NewSeries) -> Result<SeriesId>;

    fn get(&self, id: SeriesId) -> Result<Option<Series>>;

    /// Write back name, counts and status of an existing row.
    fn update(&self, series: &Series) -> Result<()>;

    fn delete(&self, id: SeriesId) -> Result<()>;

    /// All series in `category`, ordered by `order`.
    fn query(&self, category: Category, order: OrderField) -> Result<Vec<Series>>;

    /// Sum of `seen` over `category`; 0 when the category is empty.
    fn sum_seen(&self, category: Category) -> Result<u64>;
}

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS series (
    id INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT,
    name VARCHAR(64) NOT NULL,
    episodes INTEGER DEFAULT 1,
    seen INTEGER DEFAULT 0,
    added DATETIME,
    completed DATETIME,
    status VARCHAR(7),
    CONSTRAINT series_status CHECK (status IN ('hold', 'dropped', 'planned'))
);
"#;

const COLUMNS: &str = "id, name, episodes, seen, added, completed, status";

/// SQLite-backed [`SeriesStore`].
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) the database file at `path` and ensure the schema exists.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        tracing::info!(path = %path.display(), "opened series database");
        Self::init(conn)
    }

    /// Process-lifetime database; nothing survives exit.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        tracing::info!("opened in-memory series database");
        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.busy_timeout(Duration::from_secs(5))?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }
}

impl SeriesStore for SqliteStore {
    fn insert(&self, series: &NewSeries) -> Result<SeriesId> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "INSERT INTO series (name, episodes, seen, status) VALUES (?1, ?2, ?3, ?4)",
            params![
                series.name,
                series.episodes,
                series.seen,
                series.status.map(Status::as_str)
            ],
        )?;
        let id = SeriesId(tx.last_insert_rowid());
        tx.commit()?;
        tracing::debug!(%id, name = %series.name, "inserted series");
        Ok(id)
    }

    fn get(&self, id: SeriesId) -> Result<Option<Series>> {
        let mut stmt = self
            .conn
            .prepare_cached(&format!("SELECT {COLUMNS} FROM series WHERE id = ?1"))?;
        let series = stmt.query_row(params![id.0], series_from_row).optional()?;
        Ok(series)
    }

    fn update(&self, series: &Series) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        let changed = tx.execute(
            "UPDATE series SET name = ?2, episodes = ?3, seen = ?4, status = ?5 WHERE id = ?1",
            params![
                series.id.0,
                series.name,
                series.episodes,
                series.seen,
                series.status.map(Status::as_str)
            ],
        )?;
        if changed == 0 {
            return Err(MiruError::NotFound(series.id));
        }
        tx.commit()?;
        tracing::debug!(
            id = %series.id,
            seen = series.seen,
            episodes = series.episodes,
            status = series.status.map(Status::as_str).unwrap_or("active"),
            "updated series"
        );
        Ok(())
    }

    fn delete(&self, id: SeriesId) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        let changed = tx.execute("DELETE FROM series WHERE id = ?1", params![id.0])?;
        if changed == 0 {
            return Err(MiruError::NotFound(id));
        }
        tx.commit()?;
        tracing::debug!(%id, "deleted series");
        Ok(())
    }

    fn query(&self, category: Category, order: OrderField) -> Result<Vec<Series>> {
        let sql = format!(
            "SELECT {COLUMNS} FROM series WHERE {} ORDER BY {}",
            category.sql_predicate(),
            order.sql_order()
        );
        let mut stmt = self.conn.prepare_cached(&sql)?;
        let rows = stmt
            .query_map([], series_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    fn sum_seen(&self, category: Category) -> Result<u64> {
        let sql = format!(
            "SELECT COALESCE(SUM(seen), 0) FROM series WHERE {}",
            category.sql_predicate()
        );
        let total: i64 = self.conn.query_row(&sql, [], |row| row.get(0))?;
        Ok(total.max(0) as u64)
    }
}

fn series_from_row(row: &Row<'_>) -> rusqlite::Result<Series> {
    let episodes: Option<i64> = row.get(2)?;
    let seen: Option<i64> = row.get(3)?;
    let status: Option<String> = row.get(6)?;
    Ok(Series {
        id: SeriesId(row.get(0)?),
        name: row.get(1)?,
        episodes: to_count(episodes.unwrap_or(1)),
        seen: to_count(seen.unwrap_or(0)),
        added: timestamp(row.get_ref(4)?),
        completed: timestamp(row.get_ref(5)?),
        status: status.as_deref().and_then(Status::parse),
    })
}

fn to_count(value: i64) -> u32 {
    value.clamp(0, i64::from(u32::MAX)) as u32
}

/// Read a `DATETIME` column written as text; anything unparsable reads as unset.
fn timestamp(value: ValueRef<'_>) -> Option<NaiveDateTime> {
    let text = value.as_str_or_null().ok()??;
    ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
}
