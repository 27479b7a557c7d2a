//! Category repository implementation

use crate::error::{Error, Result};
use crate::models::Category;
use crate::search::fold_case;
use libsql::Connection;

use super::rows::{parse_category, CATEGORY_SELECT};

/// Trait for category storage operations (async)
#[allow(async_fn_in_trait)]
pub trait CategoryRepository {
    /// Validate and insert a category
    async fn create(&self, category: Category) -> Result<Category>;

    /// Get a category by slug
    async fn get_by_slug(&self, slug: &str) -> Result<Option<Category>>;

    /// List categories ordered by English name
    async fn list(&self) -> Result<Vec<Category>>;

    /// Delete a category; referencing posts keep existing without one
    async fn delete(&self, slug: &str) -> Result<()>;
}

/// libSQL implementation of `CategoryRepository`
pub struct LibSqlCategoryRepository<'a> {
    conn: &'a Connection,
}

impl<'a> LibSqlCategoryRepository<'a> {
    /// Create a new repository with the given connection
    pub const fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}

impl CategoryRepository for LibSqlCategoryRepository<'_> {
    async fn create(&self, category: Category) -> Result<Category> {
        let category = category.validate()?;

        self.conn
            .execute(
                "INSERT INTO categories (id, name_fa, name_en, slug, name_fa_folded, name_en_folded)
                 VALUES (?, ?, ?, ?, ?, ?)",
                libsql::params![
                    category.id.as_str(),
                    category.name_fa.as_str(),
                    category.name_en.as_str(),
                    category.slug.as_str(),
                    fold_case(&category.name_fa),
                    fold_case(&category.name_en)
                ],
            )
            .await
            .map_err(|error| {
                Error::from_unique_violation(
                    error,
                    format!("category slug '{}' already exists", category.slug),
                )
            })?;

        tracing::debug!(slug = %category.slug, "Created category");
        Ok(category)
    }

    async fn get_by_slug(&self, slug: &str) -> Result<Option<Category>> {
        let mut rows = self
            .conn
            .query(&format!("{CATEGORY_SELECT} WHERE slug = ?"), [slug])
            .await?;

        match rows.next().await? {
            Some(row) => Ok(Some(parse_category(&row)?)),
            None => Ok(None),
        }
    }

    async fn list(&self) -> Result<Vec<Category>> {
        let mut rows = self
            .conn
            .query(
                &format!("{CATEGORY_SELECT} ORDER BY name_en COLLATE NOCASE, slug"),
                (),
            )
            .await?;

        let mut categories = Vec::new();
        while let Some(row) = rows.next().await? {
            categories.push(parse_category(&row)?);
        }
        Ok(categories)
    }

    async fn delete(&self, slug: &str) -> Result<()> {
        let rows = self
            .conn
            .execute("DELETE FROM categories WHERE slug = ?", [slug])
            .await?;

        if rows == 0 {
            return Err(Error::NotFound(format!("category '{slug}'")));
        }

        tracing::info!(slug, "Deleted category");
        Ok(())
    }
}
