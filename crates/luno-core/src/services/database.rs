//! Shared database service wrapper used by the CLI.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::contact::ContactForm;
use crate::db::{
    CategoryRepository, ContactRepository, Database, LibSqlCategoryRepository,
    LibSqlContactRepository, LibSqlPostRepository, PostRepository,
};
use crate::models::{Category, ContactMessage, NewPost, Post};
use crate::search::{filter_posts, SearchStrategy};
use crate::Result;

/// Thread-safe service for DB and repository operations.
#[derive(Clone)]
pub struct DatabaseService {
    db: Arc<Mutex<Database>>,
    db_path: Option<PathBuf>,
}

impl DatabaseService {
    /// Open a database service at the given filesystem path.
    pub async fn open_path(db_path: impl Into<PathBuf>) -> Result<Self> {
        let db_path = db_path.into();
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        tracing::debug!("Opening database at {}", db_path.display());
        let db = Database::open(&db_path).await?;
        Ok(Self {
            db: Arc::new(Mutex::new(db)),
            db_path: Some(db_path),
        })
    }

    /// Open an in-memory database service (primarily for tests).
    pub async fn open_in_memory() -> Result<Self> {
        let db = Database::open_in_memory().await?;
        Ok(Self {
            db: Arc::new(Mutex::new(db)),
            db_path: None,
        })
    }

    /// Filesystem path, `None` for in-memory databases.
    pub fn db_path(&self) -> Option<&PathBuf> {
        self.db_path.as_ref()
    }

    /// List every post newest-first.
    pub async fn list_posts(&self) -> Result<Vec<Post>> {
        let db = self.db.lock().await;
        LibSqlPostRepository::new(db.connection()).list_all().await
    }

    /// List one page of posts newest-first.
    pub async fn list_posts_page(&self, limit: usize, offset: usize) -> Result<Vec<Post>> {
        let db = self.db.lock().await;
        LibSqlPostRepository::new(db.connection())
            .list(limit, offset)
            .await
    }

    /// Posts shown on the home page.
    pub async fn list_selected_posts(&self) -> Result<Vec<Post>> {
        let db = self.db.lock().await;
        LibSqlPostRepository::new(db.connection())
            .list_selected()
            .await
    }

    /// Fetch a post by slug.
    pub async fn get_post(&self, slug: &str) -> Result<Option<Post>> {
        let db = self.db.lock().await;
        LibSqlPostRepository::new(db.connection())
            .get_by_slug(slug)
            .await
    }

    /// Search posts; an absent or empty query lists every post.
    pub async fn search_posts(
        &self,
        query: Option<&str>,
        strategy: SearchStrategy,
    ) -> Result<Vec<Post>> {
        match strategy {
            SearchStrategy::Memory => Ok(filter_posts(query, self.list_posts().await?)),
            SearchStrategy::Pushdown => {
                let db = self.db.lock().await;
                LibSqlPostRepository::new(db.connection())
                    .search(query.unwrap_or_default())
                    .await
            }
        }
    }

    pub async fn create_post(&self, post: NewPost) -> Result<Post> {
        let db = self.db.lock().await;
        LibSqlPostRepository::new(db.connection()).create(post).await
    }

    pub async fn set_post_selected(&self, slug: &str, selected: bool) -> Result<Post> {
        let db = self.db.lock().await;
        LibSqlPostRepository::new(db.connection())
            .set_selected(slug, selected)
            .await
    }

    pub async fn delete_post(&self, slug: &str) -> Result<()> {
        let db = self.db.lock().await;
        LibSqlPostRepository::new(db.connection()).delete(slug).await
    }

    pub async fn create_category(&self, category: Category) -> Result<Category> {
        let db = self.db.lock().await;
        LibSqlCategoryRepository::new(db.connection())
            .create(category)
            .await
    }

    pub async fn list_categories(&self) -> Result<Vec<Category>> {
        let db = self.db.lock().await;
        LibSqlCategoryRepository::new(db.connection()).list().await
    }

    /// Delete a category. Posts that referenced it lose their category.
    pub async fn delete_category(&self, slug: &str) -> Result<()> {
        let db = self.db.lock().await;
        LibSqlCategoryRepository::new(db.connection())
            .delete(slug)
            .await
    }

    /// Validate and store a contact form submission.
    pub async fn submit_contact(&self, form: &ContactForm) -> Result<ContactMessage> {
        let db = self.db.lock().await;
        LibSqlContactRepository::new(db.connection())
            .create(form)
            .await
    }

    pub async fn list_contact_messages(&self, limit: usize) -> Result<Vec<ContactMessage>> {
        let db = self.db.lock().await;
        LibSqlContactRepository::new(db.connection())
            .list(limit)
            .await
    }
}
