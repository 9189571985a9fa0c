//! Property-based tests for the HTTP surface.

use axum::{
	body::{Body, to_bytes},
	http::{Method, Request, StatusCode, header},
};
use proptest::prelude::*;
use tower::ServiceExt;

use crate::config::DatabaseConfig;
use crate::repo::proptests::book_strategy;
use crate::repo::BookRepo;
use crate::routes::router;
use crate::sql::connect;
use crate::types::Book;

proptest! {
	#![proptest_config(ProptestConfig {
		cases: 64,
		.. ProptestConfig::default()
	})]

	// POST echoes the book with 201 and GET lists it unchanged
	#[test]
	fn post_then_get_round_trips(book in book_strategy()) {
		let rt = tokio::runtime::Builder::new_current_thread()
			.enable_all()
			.build()
			.unwrap();

		let (created_status, created, listed_status, listed) = rt.block_on(async {
			let app = router(BookRepo::new(connect(&DatabaseConfig::in_memory()).await.unwrap()));

			let req = Request::builder()
				.method(Method::POST)
				.uri("/books")
				.header(header::CONTENT_TYPE, "application/json")
				.body(Body::from(serde_json::to_vec(&book).unwrap()))
				.unwrap();
			let resp = app.clone().oneshot(req).await.unwrap();
			let created_status = resp.status();
			let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
			let created: Book = serde_json::from_slice(&bytes).unwrap();

			let req = Request::builder().uri("/books").body(Body::empty()).unwrap();
			let resp = app.oneshot(req).await.unwrap();
			let listed_status = resp.status();
			let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
			let listed: Vec<Book> = serde_json::from_slice(&bytes).unwrap();

			(created_status, created, listed_status, listed)
		});

		prop_assert_eq!(created_status, StatusCode::CREATED);
		prop_assert_eq!(&created, &book);
		prop_assert_eq!(listed_status, StatusCode::OK);
		prop_assert_eq!(listed, vec![book]);
	}
}
