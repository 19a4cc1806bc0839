use log::debug;
use sqlx::any::AnyPoolOptions;
use sqlx::{AnyPool, Row};
use std::sync::Once;
use tempfile::TempDir;
use thiserror::Error;

use crate::config::Config;
use crate::queries::{ddl, parts};
use crate::schema::Part;

static INSTALL_DRIVERS: Once = Once::new();

/// Database error with a coarse retryability classification
///
/// The HTTP boundary keeps the boolean write contract; the kind decides
/// whether a failure is logged as transient noise or a real fault.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Connection-level failure that may succeed on retry
    #[error("transient database error: {0}")]
    Transient(#[source] sqlx::Error),
    /// Query or schema failure that will not fix itself
    #[error("database error: {0}")]
    Permanent(#[source] sqlx::Error),
    #[error("{0}")]
    Unsupported(String),
}

impl StoreError {
    pub fn is_transient(&self) -> bool {
        matches!(self, StoreError::Transient(_))
    }

    fn classify(err: sqlx::Error) -> Self {
        let transient = matches!(
            err,
            sqlx::Error::Io(_)
                | sqlx::Error::PoolTimedOut
                | sqlx::Error::PoolClosed
                | sqlx::Error::WorkerCrashed
        );
        if transient {
            StoreError::Transient(err)
        } else {
            StoreError::Permanent(err)
        }
    }
}

/// Which SQL dialect the connected database speaks
///
/// Chosen from the connection URL scheme; every query is built for exactly
/// one of these two backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlBackend {
    Mysql,
    Sqlite,
}

impl SqlBackend {
    fn from_url(url: &str) -> Result<Self, StoreError> {
        if url.starts_with("mysql:") {
            Ok(SqlBackend::Mysql)
        } else if url.starts_with("sqlite:") {
            Ok(SqlBackend::Sqlite)
        } else {
            Err(StoreError::Unsupported(format!(
                "Unsupported database URL (expected mysql: or sqlite:): {}",
                url
            )))
        }
    }
}

/// Store for the paired part tables
///
/// Owns the connection pool it is constructed with; handlers receive it
/// through shared state rather than a process-wide global.
pub struct SessionStore {
    pool: AnyPool,
    backend: SqlBackend,
}

impl SessionStore {
    /// Connect to the database behind `url` (`mysql:` or `sqlite:`)
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let backend = SqlBackend::from_url(url)?;
        INSTALL_DRIVERS.call_once(sqlx::any::install_default_drivers);
        let pool = AnyPoolOptions::new()
            .max_connections(5)
            .connect(url)
            .await
            .map_err(StoreError::classify)?;
        Ok(Self { pool, backend })
    }

    /// Connect using the MySQL credentials from the environment config
    pub async fn connect_from_config(config: &Config) -> Result<Self, StoreError> {
        Self::connect(&config.mysql_url()).await
    }

    /// Create both part tables if they don't exist yet
    pub async fn init_schema(&self) -> Result<(), StoreError> {
        for part in [Part::A, Part::B] {
            let sql = match self.backend {
                SqlBackend::Sqlite => ddl::create_part_table(part),
                SqlBackend::Mysql => ddl::create_part_table_mysql(part),
            };
            sqlx::query(&sql)
                .execute(&self.pool)
                .await
                .map_err(StoreError::classify)?;
        }
        Ok(())
    }

    /// Create a new test session: one fresh row in each part table
    ///
    /// Both inserts run in a single transaction; the pair of auto-assigned
    /// ids is returned after commit. The two ids are not linked anywhere in
    /// the schema - callers keep the pairing from this response.
    pub async fn create_session(&self, start_time: f64) -> Result<(i64, i64), StoreError> {
        let mut tx = self.pool.begin().await.map_err(StoreError::classify)?;

        let id_a = self.insert_start(&mut tx, Part::A, start_time).await?;
        let id_b = self.insert_start(&mut tx, Part::B, start_time).await?;

        tx.commit().await.map_err(StoreError::classify)?;
        debug!("Created session pair: part A id {}, part B id {}", id_a, id_b);
        Ok((id_a, id_b))
    }

    async fn insert_start(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Any>,
        part: Part,
        start_time: f64,
    ) -> Result<i64, StoreError> {
        let sql = match self.backend {
            SqlBackend::Sqlite => parts::insert_start(part, start_time),
            SqlBackend::Mysql => parts::insert_start_mysql(part, start_time),
        };
        sqlx::query(&sql)
            .execute(&mut **tx)
            .await
            .map_err(StoreError::classify)?;

        // Read the auto-assigned id on the same connection, inside the
        // transaction, so concurrent inserts can't interleave.
        let id_sql = match self.backend {
            SqlBackend::Sqlite => "SELECT last_insert_rowid()",
            SqlBackend::Mysql => "SELECT CAST(LAST_INSERT_ID() AS SIGNED)",
        };
        sqlx::query_scalar(id_sql)
            .fetch_one(&mut **tx)
            .await
            .map_err(StoreError::classify)
    }

    /// Fetch the stored scoring JSON for a part row
    ///
    /// Returns None when the row doesn't exist, and when it exists but has
    /// not been uploaded yet (NULL column) - callers can't tell the two
    /// apart, matching the create-then-upload lifecycle.
    pub async fn part_result(&self, id: i64, part: Part) -> Result<Option<String>, StoreError> {
        let sql = match self.backend {
            SqlBackend::Sqlite => parts::select_result(part, id),
            SqlBackend::Mysql => parts::select_result_mysql(part, id),
        };
        let row = sqlx::query(&sql)
            .fetch_optional(&self.pool)
            .await
            .map_err(StoreError::classify)?;
        match row {
            Some(row) => row
                .try_get::<Option<String>, _>(0)
                .map_err(StoreError::classify),
            None => Ok(None),
        }
    }

    /// Record an upload: links, upload time, and the scoring JSON
    ///
    /// Returns the number of rows updated; 0 means no row with that id.
    pub async fn update_part(
        &self,
        id: i64,
        part: Part,
        video_link: &str,
        audio_link: &str,
        upload_time: f64,
        speechace_json: &str,
    ) -> Result<u64, StoreError> {
        let sql = match self.backend {
            SqlBackend::Sqlite => {
                parts::update_upload(part, id, video_link, audio_link, upload_time, speechace_json)
            }
            SqlBackend::Mysql => parts::update_upload_mysql(
                part,
                id,
                video_link,
                audio_link,
                upload_time,
                speechace_json,
            ),
        };
        let result = sqlx::query(&sql)
            .execute(&self.pool)
            .await
            .map_err(StoreError::classify)?;
        Ok(result.rows_affected())
    }
}

/// Create a store backed by a SQLite database in a temporary directory
///
/// The TempDir guard must be kept alive for the lifetime of the store.
pub async fn create_test_store_in_temporary_file() -> (SessionStore, TempDir) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let db_path = dir.path().join("speaking_test.sqlite");
    let url = format!("sqlite://{}?mode=rwc", db_path.display());
    let store = SessionStore::connect(&url)
        .await
        .expect("Failed to open test database");
    store
        .init_schema()
        .await
        .expect("Failed to create test schema");
    (store, dir)
}
