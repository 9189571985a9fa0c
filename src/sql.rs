use sqlx::any::{AnyPoolOptions, install_default_drivers};
use sqlx::{Any, Pool};

use crate::config::DatabaseConfig;
use crate::error::ConnectError;

pub type BookPool = Pool<Any>;

// portable between mysql and sqlite
pub const BOOKS_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS books (
	id VARCHAR(255) PRIMARY KEY,
	title VARCHAR(255),
	author VARCHAR(255),
	quantity BIGINT
)
"#;

/// Open the pool and make sure the `books` table exists.
pub async fn connect(config: &DatabaseConfig) -> Result<BookPool, ConnectError> {
	install_default_drivers();

	let mut options = AnyPoolOptions::new()
		.max_connections(config.max_connections)
		.acquire_timeout(config.acquire_timeout());

	// every in-memory sqlite connection is its own database, keep exactly one alive
	if config.is_sqlite_memory() {
		options = options
			.max_connections(1)
			.min_connections(1)
			.idle_timeout(None)
			.max_lifetime(None);
	}

	let pool = options
		.connect(&config.url()).await
		.map_err(ConnectError::Connect)?;

	tracing::info!(url = %config.redacted_url(), "connected to the database");

	ensure_schema(&pool).await?;
	Ok(pool)
}

/// Idempotent, safe to run on every start.
pub async fn ensure_schema(pool: &BookPool) -> Result<(), ConnectError> {
	sqlx::query(BOOKS_SCHEMA)
		.execute(pool).await
		.map_err(ConnectError::Schema)?;

	tracing::info!("books table ready");
	Ok(())
}
