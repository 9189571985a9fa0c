//! Reads and writes of the `books` table.
//!
//! Nothing is cached, every call goes to the database and every failure is
//! returned as is, without retrying.

use crate::error::{RepoError, RepoResult};
use crate::sql::BookPool;
use crate::types::{Book, BookChanges};

#[cfg(test)]
pub(crate) mod proptests;

#[derive(Clone)]
pub struct BookRepo {
	pool: BookPool,
}

impl BookRepo {
	pub fn new(pool: BookPool) -> Self {
		BookRepo{ pool }
	}

	pub fn pool(&self) -> &BookPool {
		&self.pool
	}

	pub async fn list_all(&self) -> RepoResult<Vec<Book>> {
		let books = sqlx::query_as::<_, Book>("SELECT id, title, author, quantity FROM books")
			.fetch_all(&self.pool).await?;

		tracing::debug!(count = books.len(), "listed books");
		Ok(books)
	}

	/// Insert a book whose id is not taken yet.
	///
	/// The existence check is part of the insert itself, so there is no window
	/// between check and write. Nothing inserted means the id was taken. A
	/// primary key violation (a racing insert on a backend that does not
	/// serialize the statement) is a conflict as well.
	pub async fn create(&self, book: &Book) -> RepoResult<Book> {
		let inserted = sqlx::query(
			"INSERT INTO books (id, title, author, quantity) \
			SELECT ?, ?, ?, ? WHERE NOT EXISTS (SELECT 1 FROM books WHERE id = ?)"
		)
			.bind(book.id.as_str())
			.bind(book.title.as_str())
			.bind(book.author.as_str())
			.bind(book.quantity)
			.bind(book.id.as_str())
			.execute(&self.pool).await;

		let result = match inserted {
			Ok(result) => result,
			Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
				return Err(RepoError::Conflict(book.id.clone()));
			},
			Err(e) => return Err(e.into()),
		};
		if result.rows_affected() == 0 {
			return Err(RepoError::Conflict(book.id.clone()));
		}

		tracing::info!(id = %book.id, "created book");
		Ok(book.clone())
	}

	/// Overwrite title, author and quantity of an existing book.
	pub async fn update(&self, id: &str, changes: BookChanges) -> RepoResult<Book> {
		let result = sqlx::query("UPDATE books SET title = ?, author = ?, quantity = ? WHERE id = ?")
			.bind(changes.title.as_str())
			.bind(changes.author.as_str())
			.bind(changes.quantity)
			.bind(id)
			.execute(&self.pool).await?;

		if result.rows_affected() == 0 {
			return Err(RepoError::NotFound(id.to_string()));
		}

		tracing::info!(id, "updated book");
		Ok(changes.into_book(id.to_string()))
	}

	pub async fn delete(&self, id: &str) -> RepoResult<()> {
		let result = sqlx::query("DELETE FROM books WHERE id = ?")
			.bind(id)
			.execute(&self.pool).await?;

		if result.rows_affected() == 0 {
			return Err(RepoError::NotFound(id.to_string()));
		}

		tracing::info!(id, "deleted book");
		Ok(())
	}
}
