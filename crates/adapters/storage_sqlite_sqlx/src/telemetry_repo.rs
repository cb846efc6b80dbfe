//! `SQLite` implementation of [`TelemetryStore`] and [`TelemetrySink`].

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use smarthome_app::ports::{TelemetrySink, TelemetryStore};
use smarthome_domain::error::SmartHomeError;
use smarthome_domain::telemetry::TelemetryRecord;

use crate::error::StorageError;

struct Wrapper(TelemetryRecord);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self(TelemetryRecord {
            timestamp: row.try_get("timestamp")?,
            topic: row.try_get("topic")?,
            message: row.try_get("message")?,
        }))
    }
}

const INSERT: &str = "INSERT INTO sensor_data (timestamp, topic, message) VALUES (?, ?, ?)";
const SELECT_LATEST: &str =
    "SELECT timestamp, topic, message FROM sensor_data ORDER BY id DESC LIMIT ?";

/// `SQLite`-backed sensor log.
///
/// Ordering is by row id, so "latest" means most recently inserted even
/// when timestamps collide or go backwards.
#[derive(Clone)]
pub struct SqliteTelemetryStore {
    pool: SqlitePool,
}

impl SqliteTelemetryStore {
    /// Create a new store using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl TelemetrySink for SqliteTelemetryStore {
    async fn append(&self, record: TelemetryRecord) -> Result<(), SmartHomeError> {
        sqlx::query(INSERT)
            .bind(&record.timestamp)
            .bind(&record.topic)
            .bind(&record.message)
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(())
    }
}

impl TelemetryStore for SqliteTelemetryStore {
    async fn latest(&self, limit: usize) -> Result<Vec<TelemetryRecord>, SmartHomeError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_LATEST)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }
}
