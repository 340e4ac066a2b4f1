//! Book storage.
//!
//! [`BookStore`] is the seam between the import pipeline and persistence.
//! [`SqliteBookStore`] is the production implementation; tests run it
//! against an in-memory database.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use crate::models::{Book, NewBook};

const BOOKS_TABLE: &str = "books";

const CREATE_BOOKS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS books (
        id TEXT PRIMARY KEY NOT NULL,
        title TEXT NOT NULL,
        stock INTEGER NOT NULL CHECK (stock >= 0),
        is_active_entity INTEGER NOT NULL DEFAULT 1,
        created_at TEXT NOT NULL
    );
"#;

/// Transactional storage of books.
#[async_trait]
pub trait BookStore: Send + Sync {
    /// Insert every book or none of them.
    ///
    /// Returns the stored books in input order.
    async fn insert_books(&self, books: Vec<NewBook>) -> StoreResult<Vec<Book>>;

    /// All books, oldest first.
    async fn list_books(&self) -> StoreResult<Vec<Book>>;

    async fn get_book(&self, id: &str) -> StoreResult<Option<Book>>;

    async fn count_books(&self) -> StoreResult<u64>;
}

/// SQLite-backed [`BookStore`].
#[derive(Debug, Clone)]
pub struct SqliteBookStore {
    pool: SqlitePool,
}

impl SqliteBookStore {
    /// Connect and make sure the schema exists.
    ///
    /// Use `sqlite://path/to.db?mode=rwc` for a file (created if missing).
    pub async fn connect(database_url: &str) -> StoreResult<Self> {
        // An in-memory database lives and dies with its connection, so it
        // must never be spread over several.
        let options = if database_url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };

        let pool = options.connect(database_url).await?;

        Self::from_pool(pool).await
    }

    /// Fresh in-memory store.
    pub async fn in_memory() -> StoreResult<Self> {
        Self::connect("sqlite::memory:").await
    }

    pub async fn from_pool(pool: SqlitePool) -> StoreResult<Self> {
        sqlx::query(CREATE_BOOKS_TABLE).execute(&pool).await?;
        tracing::debug!("Book table ready");
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl BookStore for SqliteBookStore {
    async fn insert_books(&self, books: Vec<NewBook>) -> StoreResult<Vec<Book>> {
        let mut tx = self.pool.begin().await?;
        let mut stored = Vec::with_capacity(books.len());

        for book in books {
            let record = Book {
                id: Uuid::new_v4().to_string(),
                title: book.title,
                stock: book.stock,
                is_active_entity: true,
                created_at: Utc::now().to_rfc3339(),
            };

            sqlx::query(
                "INSERT INTO books (id, title, stock, is_active_entity, created_at) \
                 VALUES (?, ?, ?, ?, ?)",
            )
            .bind(&record.id)
            .bind(&record.title)
            .bind(record.stock)
            .bind(record.is_active_entity)
            .bind(&record.created_at)
            .execute(&mut *tx)
            .await?;

            stored.push(record);
        }

        // Dropping `tx` on any early return above rolls everything back.
        tx.commit().await?;

        tracing::debug!(count = stored.len(), "Books committed");
        Ok(stored)
    }

    async fn list_books(&self) -> StoreResult<Vec<Book>> {
        let rows = sqlx::query(
            "SELECT id, title, stock, is_active_entity, created_at \
             FROM books ORDER BY created_at, rowid",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(book_from_row).collect()
    }

    async fn get_book(&self, id: &str) -> StoreResult<Option<Book>> {
        let row = sqlx::query(
            "SELECT id, title, stock, is_active_entity, created_at FROM books WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(book_from_row).transpose()
    }

    async fn count_books(&self) -> StoreResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?;

        u64::try_from(count).map_err(|e| StoreError::Corrupt {
            table: BOOKS_TABLE,
            message: e.to_string(),
        })
    }
}

fn book_from_row(row: &SqliteRow) -> StoreResult<Book> {
    Ok(Book {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        stock: row.try_get("stock")?,
        is_active_entity: row.try_get("is_active_entity")?,
        created_at: row.try_get("created_at")?,
    })
}
