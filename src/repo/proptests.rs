//! Property-based tests for the repository.

use proptest::prelude::*;

use crate::config::DatabaseConfig;
use crate::repo::BookRepo;
use crate::sql::connect;
use crate::types::Book;

// unicode without control characters, empty included
pub(crate) fn book_strategy() -> impl Strategy<Value = Book> {
	("\\PC{0,40}", "\\PC{0,40}", "\\PC{0,40}", any::<i64>())
		.prop_map(|(id, title, author, quantity)| Book{ id, title, author, quantity })
}

fn runtime() -> tokio::runtime::Runtime {
	tokio::runtime::Builder::new_current_thread()
		.enable_all()
		.build()
		.unwrap()
}

fn seed() -> Book {
	Book{
		id: "seed".to_string(),
		title: "Emma".to_string(),
		author: "Austen".to_string(),
		quantity: 1,
	}
}

proptest! {
	#![proptest_config(ProptestConfig {
		cases: 64,
		.. ProptestConfig::default()
	})]

	// a fresh id is listed exactly once, exactly as it was created
	#[test]
	fn create_then_list_contains_the_book_once(book in book_strategy()) {
		prop_assume!(book.id != "seed");

		let (created, listed) = runtime().block_on(async {
			let repo = BookRepo::new(connect(&DatabaseConfig::in_memory()).await.unwrap());
			repo.create(&seed()).await.unwrap();
			let created = repo.create(&book).await.unwrap();
			(created, repo.list_all().await.unwrap())
		});

		prop_assert_eq!(&created, &book);
		prop_assert_eq!(listed.len(), 2);
		prop_assert_eq!(listed.iter().filter(|b| **b == book).count(), 1);
	}

	// a second create of the same id never touches the stored row
	#[test]
	fn duplicate_create_leaves_the_row(book in book_strategy(), other in book_strategy()) {
		let listed = runtime().block_on(async {
			let repo = BookRepo::new(connect(&DatabaseConfig::in_memory()).await.unwrap());
			repo.create(&book).await.unwrap();
			let again = Book{ id: book.id.clone(), ..other };
			assert!(repo.create(&again).await.is_err());
			repo.list_all().await.unwrap()
		});

		prop_assert_eq!(listed, vec![book]);
	}
}
