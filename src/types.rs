use serde::{Deserialize, Serialize};

pub type BookId = String;

/// A row of the `books` table, also the JSON shape of the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Book {
	pub id: BookId,
	pub title: String,
	pub author: String,
	pub quantity: i64,
}

/// Body of an update. Every field is overwritten, there is no partial update.
// an `id` in the body is ignored, the path decides which row changes
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BookChanges {
	pub title: String,
	pub author: String,
	pub quantity: i64,
}

impl BookChanges {
	pub fn into_book(self, id: BookId) -> Book {
		Book{
			id,
			title: self.title,
			author: self.author,
			quantity: self.quantity,
		}
	}
}
