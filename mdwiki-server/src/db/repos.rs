//! Page repository
//!
//! - create: plain INSERT, duplicate names surface as `DbError::Conflict`
//! - save: UPDATE ... RETURNING name, missing ids surface as `DbError::NotFound`

use sqlx::{FromRow, SqlitePool};

use mdwiki_core::{Page, PageName};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    #[error("already exists: {resource} '{id}'")]
    Conflict { resource: &'static str, id: String },
}

#[derive(Debug, FromRow)]
struct PageRow {
    id: i64,
    name: String,
    content: String,
}

impl From<PageRow> for Page {
    fn from(row: PageRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            content: row.content,
        }
    }
}

/// Page repository
pub struct PageRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> PageRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// All page names, sorted ascending.
    pub async fn all_names(&self) -> Result<Vec<String>, DbError> {
        let names = sqlx::query_scalar("SELECT name FROM pages ORDER BY name")
            .fetch_all(self.pool)
            .await?;
        Ok(names)
    }

    /// Look up a page by its name.
    pub async fn find_by_name(&self, name: &PageName) -> Result<Option<Page>, DbError> {
        let row = sqlx::query_as::<_, PageRow>(
            "SELECT id, name, content FROM pages WHERE name = ?",
        )
        .bind(name.as_str())
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Page::from))
    }

    /// Insert a new page.
    pub async fn create(&self, name: &PageName, markdown: &str) -> Result<Page, DbError> {
        let row = sqlx::query_as::<_, PageRow>(
            "INSERT INTO pages (name, content) VALUES (?, ?) RETURNING id, name, content",
        )
        .bind(name.as_str())
        .bind(markdown)
        .fetch_one(self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => DbError::Conflict {
                resource: "page",
                id: name.to_string(),
            },
            other => DbError::Sqlx(other),
        })?;

        tracing::debug!(id = row.id, name = %row.name, "page created");
        Ok(row.into())
    }

    /// Replace the content of an existing page, returning its name.
    pub async fn save(&self, id: i64, markdown: &str) -> Result<String, DbError> {
        let name: String =
            sqlx::query_scalar("UPDATE pages SET content = ? WHERE id = ? RETURNING name")
                .bind(markdown)
                .bind(id)
                .fetch_optional(self.pool)
                .await?
                .ok_or_else(|| DbError::NotFound {
                    resource: "page",
                    id: id.to_string(),
                })?;

        tracing::debug!(id, name = %name, "page saved");
        Ok(name)
    }

    /// Delete a page by id. Returns whether a row was removed.
    pub async fn delete(&self, id: i64) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM pages WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Number of stored pages.
    pub async fn count(&self) -> Result<i64, DbError> {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM pages")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }
}
