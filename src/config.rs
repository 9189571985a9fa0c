//! Service configuration.
//!
//! Every setting is a command line flag that falls back to an environment
//! variable. `load` reads a `.env` file first when there is one.

use std::str::FromStr;
use std::time::Duration;

use clap::{Args, Parser};
use sqlx::ConnectOptions;
use sqlx::any::AnyConnectOptions;
use sqlx::mysql::MySqlConnectOptions;

#[derive(Parser, Debug, Clone)]
#[command(name = "bookshelf")]
#[command(about = "Book inventory over HTTP")]
#[command(version)]
pub struct Config {
	/// Address the HTTP listener binds to
	#[arg(long, env = "LISTEN_ADDR", default_value = "127.0.0.1:8080")]
	pub listen: String,

	#[command(flatten)]
	pub database: DatabaseConfig,
}

#[derive(Args, Debug, Clone)]
pub struct DatabaseConfig {
	/// Full connection URL, takes precedence over the individual parts
	#[arg(long = "database-url", env = "DATABASE_URL")]
	pub url: Option<String>,

	#[arg(long = "db-host", env = "DB_HOST", default_value = "localhost")]
	pub host: String,

	#[arg(long = "db-port", env = "DB_PORT", default_value_t = 3306)]
	pub port: u16,

	#[arg(long = "db-user", env = "DB_USER", default_value = "root")]
	pub user: String,

	#[arg(long = "db-password", env = "DB_PASSWORD", default_value = "", hide_env_values = true)]
	pub password: String,

	#[arg(long = "db-name", env = "DB_NAME", default_value = "books")]
	pub name: String,

	#[arg(long = "db-max-connections", env = "DB_MAX_CONNECTIONS", default_value_t = 5)]
	pub max_connections: u32,

	#[arg(long = "db-acquire-timeout-secs", env = "DB_ACQUIRE_TIMEOUT_SECS", default_value_t = 3)]
	pub acquire_timeout_secs: u64,
}

impl Config {
	/// Load `.env` (if any) then parse flags and environment.
	pub fn load() -> Self {
		if let Err(e) = dotenvy::dotenv() {
			if !e.not_found() {
				tracing::warn!(error = %e, "ignoring unreadable .env file");
			}
		}
		Config::parse()
	}
}

impl DatabaseConfig {
	/// Settings for a private in-memory SQLite database, used by tests.
	pub fn in_memory() -> Self {
		DatabaseConfig{
			url: Some("sqlite::memory:".to_string()),
			host: "localhost".to_string(),
			port: 3306,
			user: "root".to_string(),
			password: String::new(),
			name: "books".to_string(),
			max_connections: 1,
			acquire_timeout_secs: 3,
		}
	}

	pub fn url(&self) -> String {
		match &self.url {
			Some(url) => url.clone(),
			None => self.mysql_options().to_url_lossy().to_string(),
		}
	}

	/// Connection URL safe to log.
	pub fn redacted_url(&self) -> String {
		let mut url = match &self.url {
			Some(raw) => match AnyConnectOptions::from_str(raw) {
				Ok(options) => options.database_url,
				Err(_) => return "<invalid database url>".to_string(),
			},
			None => self.mysql_options().to_url_lossy(),
		};
		if url.password().is_some() {
			// only fails for urls that cannot carry credentials at all
			let _ = url.set_password(Some("***"));
		}
		url.to_string()
	}

	fn mysql_options(&self) -> MySqlConnectOptions {
		MySqlConnectOptions::new()
			.host(&self.host)
			.port(self.port)
			.username(&self.user)
			.password(&self.password)
			.database(&self.name)
	}

	pub fn acquire_timeout(&self) -> Duration {
		Duration::from_secs(self.acquire_timeout_secs)
	}

	pub fn is_sqlite_memory(&self) -> bool {
		let url = self.url();
		url.starts_with("sqlite::memory:") || url.contains("mode=memory")
	}
}
