//! Repository Implementation

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::FromRow;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{codec, StorageError};

/// Inbound data-point submission, before an id is assigned
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataPointRequest {
    pub device_id: String,
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "data_payload")]
    pub payload: Map<String, Value>,
}

/// Persisted data point
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataPoint {
    #[serde(rename = "data_point_id")]
    pub id: String,
    pub device_id: String,
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "data_payload")]
    pub payload: Map<String, Value>,
}

/// Decode outcome for one stored row.
///
/// Stored payload text that no longer parses surfaces as `Corrupt`
/// instead of being dropped or zeroed out, so callers choose how to
/// treat it.
#[derive(Debug, Clone)]
pub enum RowDecode {
    Intact(DataPoint),
    Corrupt { id: String, device_id: String },
}

/// Row image as persisted
#[derive(Debug, FromRow)]
struct StoredRow {
    data_point_id: String,
    device_id: String,
    timestamp: DateTime<Utc>,
    data_payload: String,
}

impl StoredRow {
    fn into_decoded(self) -> RowDecode {
        match codec::decode(&self.data_payload) {
            Ok(payload) => RowDecode::Intact(DataPoint {
                id: self.data_point_id,
                device_id: self.device_id,
                timestamp: self.timestamp,
                payload,
            }),
            Err(err) => {
                warn!(id = %self.data_point_id, %err, "stored payload failed to decode");
                RowDecode::Corrupt {
                    id: self.data_point_id,
                    device_id: self.device_id,
                }
            }
        }
    }
}

/// SQLite-backed repository for data points
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    /// Open a connection pool against `database_url` and ensure the
    /// schema exists.
    pub async fn connect(database_url: &str) -> Result<Self, StorageError> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        // An in-memory database is private to its connection, so it
        // must not fan out across a pool.
        let max_connections = if database_url.contains(":memory:") { 1 } else { 5 };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS data_points (
                data_point_id TEXT PRIMARY KEY,
                device_id     TEXT NOT NULL,
                timestamp     TEXT NOT NULL,
                data_payload  TEXT NOT NULL
            )",
        )
        .execute(&pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_data_points_device_id
             ON data_points (device_id)",
        )
        .execute(&pool)
        .await?;

        info!("Connected data-point repository at {}", database_url);
        Ok(Self { pool })
    }

    /// Persist one data point and return its generated id.
    ///
    /// The payload is encoded before the insert; an encoding failure
    /// leaves no partial write behind.
    pub async fn save(&self, request: &DataPointRequest) -> Result<String, StorageError> {
        let id = Uuid::new_v4().to_string();
        let encoded = codec::encode(&request.payload)?;

        sqlx::query(
            "INSERT INTO data_points (data_point_id, device_id, timestamp, data_payload)
             VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(&id)
        .bind(&request.device_id)
        .bind(request.timestamp)
        .bind(&encoded)
        .execute(&self.pool)
        .await?;

        debug!(%id, device_id = %request.device_id, "saved data point");
        Ok(id)
    }

    /// Fetch every data point whose device_id exactly equals the
    /// argument. Unknown devices yield an empty vec, not an error.
    ///
    /// No ordering is imposed beyond whatever the store returns.
    pub async fn find_by_device(&self, device_id: &str) -> Result<Vec<RowDecode>, StorageError> {
        let rows = sqlx::query_as::<_, StoredRow>(
            "SELECT data_point_id, device_id, timestamp, data_payload
             FROM data_points
             WHERE device_id = ?1",
        )
        .bind(device_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(StoredRow::into_decoded).collect())
    }

    /// Total number of persisted data points.
    pub async fn count(&self) -> Result<i64, StorageError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM data_points")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
