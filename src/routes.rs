use axum::{
	Json, Router,
	extract::{Path, State, rejection::JsonRejection},
	http::{StatusCode, header},
	response::{IntoResponse, Response},
	routing::{get, put},
};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tower_http::trace::TraceLayer;

use crate::error::ApiError;
use crate::repo::BookRepo;
use crate::types::{Book, BookChanges};

#[cfg(test)]
mod proptests;

pub fn router(repo: BookRepo) -> Router {
	Router::new()
		.route("/books", get(list_books).post(create_book) )
		.route("/books/:id", put(update_book).delete(delete_book) )
		.layer(TraceLayer::new_for_http())
		.with_state(repo)
}

/// JSON body indented by four spaces.
pub struct Pretty<T>(pub T);

fn to_indented_json<T: Serialize>(value: &T) -> serde_json::Result<Vec<u8>> {
	let mut body = Vec::with_capacity(128);
	let formatter = PrettyFormatter::with_indent(b"    ");
	let mut ser = serde_json::Serializer::with_formatter(&mut body, formatter);
	value.serialize(&mut ser)?;
	Ok(body)
}

impl<T: Serialize> IntoResponse for Pretty<T> {
	fn into_response(self) -> Response {
		match to_indented_json(&self.0) {
			Ok(body) => (
				[(header::CONTENT_TYPE, "application/json; charset=utf-8")],
				body,
			).into_response(),
			Err(e) => {
				tracing::error!(error = %e, "could not serialize response");
				StatusCode::INTERNAL_SERVER_ERROR.into_response()
			},
		}
	}
}

// every kind of unreadable body is a 400, not axum's 415/422
fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
	payload
		.map(|Json(value)| value)
		.map_err(|rejection| ApiError::MalformedRequest(rejection.body_text()))
}

async fn list_books(State(repo): State<BookRepo>) -> Result<Pretty<Vec<Book>>, ApiError> {
	Ok(Pretty(repo.list_all().await?))
}

async fn create_book(
	State(repo): State<BookRepo>,
	payload: Result<Json<Book>, JsonRejection>,
) -> Result<(StatusCode, Pretty<Book>), ApiError> {
	let book = body(payload)?;
	let created = repo.create(&book).await?;
	Ok((StatusCode::CREATED, Pretty(created)))
}

async fn update_book(
	State(repo): State<BookRepo>,
	Path(id): Path<String>,
	payload: Result<Json<BookChanges>, JsonRejection>,
) -> Result<Pretty<Book>, ApiError> {
	let changes = body(payload)?;
	let updated = repo.update(&id, changes).await?;
	Ok(Pretty(updated))
}

async fn delete_book(
	State(repo): State<BookRepo>,
	Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
	repo.delete(&id).await?;
	Ok(StatusCode::NO_CONTENT)
}
