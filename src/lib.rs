// book inventory service

pub mod config;
pub mod error;
pub mod repo;
pub mod routes;
pub mod sql;
pub mod types;

pub use config::{Config, DatabaseConfig};
pub use error::{ApiError, ConnectError, RepoError};
pub use repo::BookRepo;
pub use routes::router;
pub use sql::{BookPool, connect};
pub use types::{Book, BookChanges};
