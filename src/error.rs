//! Error types for the book service.
//!
//! `RepoError` is what the repository reports, `ApiError` is what a handler
//! sends back. The status code of every failure is decided here.

use axum::{
	http::StatusCode,
	response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::routes::Pretty;
use crate::types::BookId;

/// Startup failures. The service does not serve when one of these happens.
#[derive(Debug, Error)]
pub enum ConnectError {
	#[error("could not connect to the database: {0}")]
	Connect(#[source] sqlx::Error),

	#[error("could not create table: {0}")]
	Schema(#[source] sqlx::Error),
}

#[derive(Debug, Error)]
pub enum RepoError {
	#[error("book with this ID already exists")]
	Conflict(BookId),

	#[error("book not found")]
	NotFound(BookId),

	#[error("{0}")]
	Storage(#[from] sqlx::Error),
}

pub type RepoResult<T> = Result<T, RepoError>;

#[derive(Debug, Error)]
pub enum ApiError {
	#[error("{0}")]
	MalformedRequest(String),

	#[error(transparent)]
	Repo(#[from] RepoError),
}

impl ApiError {
	pub fn status(&self) -> StatusCode {
		match self {
			ApiError::MalformedRequest(_) => StatusCode::BAD_REQUEST,
			ApiError::Repo(RepoError::Conflict(_)) => StatusCode::CONFLICT,
			ApiError::Repo(RepoError::NotFound(_)) => StatusCode::NOT_FOUND,
			ApiError::Repo(RepoError::Storage(_)) => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
	pub error: String,
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let status = self.status();
		if status.is_server_error() {
			tracing::error!(error = %self, "request failed");
		}
		(status, Pretty(ErrorBody{ error: self.to_string() })).into_response()
	}
}
