//! Post repository implementation

use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::models::{NewPost, Post};
use crate::search::{fold_case, SearchPredicate, SearchQuery};
use libsql::params::Params;
use libsql::{Connection, Rows, Value};

use super::category_repository::{CategoryRepository, LibSqlCategoryRepository};
use super::rows::{parse_post, POST_ORDER, POST_SELECT};

/// Trait for post storage operations (async)
#[allow(async_fn_in_trait)]
pub trait PostRepository {
    /// Validate and insert a post, resolving its category by slug
    async fn create(&self, post: NewPost) -> Result<Post>;

    /// Get a post by its unique slug
    async fn get_by_slug(&self, slug: &str) -> Result<Option<Post>>;

    /// Every post, newest first
    async fn list_all(&self) -> Result<Vec<Post>>;

    /// A page of posts, newest first
    async fn list(&self, limit: usize, offset: usize) -> Result<Vec<Post>>;

    /// Posts flagged for the home page, newest first
    async fn list_selected(&self) -> Result<Vec<Post>>;

    /// Search posts with the OR-predicate evaluated in SQL
    async fn search(&self, query: &str) -> Result<Vec<Post>>;

    /// Set or clear the selected flag
    async fn set_selected(&self, slug: &str, selected: bool) -> Result<Post>;

    /// Delete a post
    async fn delete(&self, slug: &str) -> Result<()>;
}

/// libSQL implementation of `PostRepository`
pub struct LibSqlPostRepository<'a> {
    conn: &'a Connection,
}

impl<'a> LibSqlPostRepository<'a> {
    /// Create a new repository with the given connection
    pub const fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    async fn collect_posts(mut rows: Rows) -> Result<Vec<Post>> {
        let mut posts = Vec::new();
        while let Some(row) = rows.next().await? {
            posts.push(parse_post(&row)?);
        }
        Ok(posts)
    }
}

impl PostRepository for LibSqlPostRepository<'_> {
    async fn create(&self, post: NewPost) -> Result<Post> {
        let post = post.validate()?;

        let category = match post.category_slug.as_deref() {
            Some(slug) => Some(
                LibSqlCategoryRepository::new(self.conn)
                    .get_by_slug(slug)
                    .await?
                    .ok_or_else(|| Error::NotFound(format!("category '{slug}'")))?,
            ),
            None => None,
        };

        let post = Post::from_new(post, category);
        self.conn
            .execute(
                "INSERT INTO posts (
                    id, title_fa, title_en, subtitle_fa, subtitle_en, body_fa, body_en,
                    slug, created_at, is_selected, category_id, creator_name, creator_title,
                    title_fa_folded, title_en_folded, subtitle_fa_folded, subtitle_en_folded,
                    body_fa_folded, body_en_folded, creator_name_folded
                 ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
                libsql::params![
                    post.id.as_str(),
                    post.title_fa.as_str(),
                    post.title_en.as_str(),
                    post.subtitle_fa.as_str(),
                    post.subtitle_en.as_str(),
                    post.body_fa.as_str(),
                    post.body_en.as_str(),
                    post.slug.as_str(),
                    post.created_at,
                    i64::from(post.is_selected),
                    post.category.as_ref().map(|category| category.id.as_str()),
                    post.creator_name.as_str(),
                    post.creator_title.as_str(),
                    fold_case(&post.title_fa),
                    fold_case(&post.title_en),
                    fold_case(&post.subtitle_fa),
                    fold_case(&post.subtitle_en),
                    fold_case(&post.body_fa),
                    fold_case(&post.body_en),
                    fold_case(&post.creator_name)
                ],
            )
            .await
            .map_err(|error| {
                Error::from_unique_violation(
                    error,
                    format!("post slug '{}' already exists", post.slug),
                )
            })?;

        tracing::debug!(slug = %post.slug, "Created post");
        Ok(post)
    }

    async fn get_by_slug(&self, slug: &str) -> Result<Option<Post>> {
        let mut rows = self
            .conn
            .query(&format!("{POST_SELECT} WHERE p.slug = ?"), [slug])
            .await?;

        match rows.next().await? {
            Some(row) => Ok(Some(parse_post(&row)?)),
            None => Ok(None),
        }
    }

    async fn list_all(&self) -> Result<Vec<Post>> {
        let rows = self
            .conn
            .query(&format!("{POST_SELECT} {POST_ORDER}"), ())
            .await?;
        Self::collect_posts(rows).await
    }

    async fn list(&self, limit: usize, offset: usize) -> Result<Vec<Post>> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let offset = i64::try_from(offset).unwrap_or(i64::MAX);
        let rows = self
            .conn
            .query(
                &format!("{POST_SELECT} {POST_ORDER} LIMIT ? OFFSET ?"),
                libsql::params![limit, offset],
            )
            .await?;
        Self::collect_posts(rows).await
    }

    async fn list_selected(&self) -> Result<Vec<Post>> {
        let rows = self
            .conn
            .query(
                &format!("{POST_SELECT} WHERE p.is_selected = 1 {POST_ORDER}"),
                (),
            )
            .await?;
        Self::collect_posts(rows).await
    }

    async fn search(&self, query: &str) -> Result<Vec<Post>> {
        let Some(query) = SearchQuery::parse(Some(query)) else {
            return self.list_all().await;
        };

        let (predicate, params) = SearchPredicate::any_field_contains(&query).to_sql();
        let params = Params::Positional(params.into_iter().map(Value::Text).collect());
        let rows = self
            .conn
            .query(
                &format!("{POST_SELECT} WHERE {predicate} {POST_ORDER}"),
                params,
            )
            .await?;

        // The category join is many-to-one, so rows are unique already
        let mut seen = HashSet::new();
        let posts: Vec<Post> = Self::collect_posts(rows)
            .await?
            .into_iter()
            .filter(|post| seen.insert(post.id))
            .collect();

        tracing::debug!(
            query = query.as_str(),
            matched = posts.len(),
            "Searched posts in database"
        );
        Ok(posts)
    }

    async fn set_selected(&self, slug: &str, selected: bool) -> Result<Post> {
        let rows = self
            .conn
            .execute(
                "UPDATE posts SET is_selected = ? WHERE slug = ?",
                libsql::params![i64::from(selected), slug],
            )
            .await?;

        if rows == 0 {
            return Err(Error::NotFound(format!("post '{slug}'")));
        }

        self.get_by_slug(slug)
            .await?
            .ok_or_else(|| Error::NotFound(format!("post '{slug}'")))
    }

    async fn delete(&self, slug: &str) -> Result<()> {
        let rows = self
            .conn
            .execute("DELETE FROM posts WHERE slug = ?", [slug])
            .await?;

        if rows == 0 {
            return Err(Error::NotFound(format!("post '{slug}'")));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use crate::models::Category;
    use crate::search::filter_posts;
    use pretty_assertions::assert_eq;

    async fn setup() -> Database {
        Database::open_in_memory().await.unwrap()
    }

    fn new_post(title_en: &str) -> NewPost {
        NewPost {
            title_fa: "عنوان".to_string(),
            title_en: title_en.to_string(),
            subtitle_fa: "زیرعنوان".to_string(),
            subtitle_en: "Subtitle".to_string(),
            body_fa: "متن".to_string(),
            body_en: "Body".to_string(),
            creator_name: "Reza".to_string(),
            creator_title: "Editor".to_string(),
            ..NewPost::default()
        }
    }

    async fn seed_programming(db: &Database) {
        LibSqlCategoryRepository::new(db.connection())
            .create(Category::new("برنامه نویسی", "Programming", ""))
            .await
            .unwrap();
    }

    fn slugs(posts: &[Post]) -> Vec<&str> {
        posts.iter().map(|post| post.slug.as_str()).collect()
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_create_and_get_with_category() {
        let db = setup().await;
        seed_programming(&db).await;
        let repo = LibSqlPostRepository::new(db.connection());

        let created = repo
            .create(NewPost {
                category_slug: Some("programming".to_string()),
                ..new_post("Rust Basics")
            })
            .await
            .unwrap();

        let fetched = repo.get_by_slug("rust-basics").await.unwrap().unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.category.unwrap().name_en, "Programming");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_unknown_category_is_not_found() {
        let db = setup().await;
        let repo = LibSqlPostRepository::new(db.connection());

        let error = repo
            .create(NewPost {
                category_slug: Some("missing".to_string()),
                ..new_post("Rust Basics")
            })
            .await
            .unwrap_err();
        assert!(matches!(error, Error::NotFound(_)));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_duplicate_slug_conflicts() {
        let db = setup().await;
        let repo = LibSqlPostRepository::new(db.connection());

        repo.create(new_post("Rust Basics")).await.unwrap();
        let error = repo.create(new_post("Rust basics!")).await.unwrap_err();
        assert!(matches!(error, Error::Conflict(_)));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_list_newest_first() {
        let db = setup().await;
        let repo = LibSqlPostRepository::new(db.connection());

        for title in ["First", "Second", "Third"] {
            repo.create(new_post(title)).await.unwrap();
        }

        let posts = repo.list_all().await.unwrap();
        assert_eq!(slugs(&posts), vec!["third", "second", "first"]);

        let page = repo.list(1, 1).await.unwrap();
        assert_eq!(slugs(&page), vec!["second"]);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_selected_posts() {
        let db = setup().await;
        let repo = LibSqlPostRepository::new(db.connection());

        repo.create(NewPost {
            is_selected: true,
            ..new_post("Featured")
        })
        .await
        .unwrap();
        repo.create(new_post("Plain")).await.unwrap();

        assert_eq!(slugs(&repo.list_selected().await.unwrap()), vec!["featured"]);

        let plain = repo.set_selected("plain", true).await.unwrap();
        assert!(plain.is_selected);
        repo.set_selected("featured", false).await.unwrap();
        assert_eq!(slugs(&repo.list_selected().await.unwrap()), vec!["plain"]);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_delete_post() {
        let db = setup().await;
        let repo = LibSqlPostRepository::new(db.connection());

        repo.create(new_post("Gone")).await.unwrap();
        repo.delete("gone").await.unwrap();

        assert!(repo.get_by_slug("gone").await.unwrap().is_none());
        assert!(matches!(
            repo.delete("gone").await.unwrap_err(),
            Error::NotFound(_)
        ));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_search_pushdown_matches_fields_and_category() {
        let db = setup().await;
        seed_programming(&db).await;
        let repo = LibSqlPostRepository::new(db.connection());

        repo.create(new_post("Rust Basics")).await.unwrap();
        repo.create(NewPost {
            title_fa: "مقاله پایتون".to_string(),
            title_en: "Snakes".to_string(),
            creator_name: "Ali".to_string(),
            category_slug: Some("programming".to_string()),
            ..new_post("")
        })
        .await
        .unwrap();

        assert_eq!(slugs(&repo.search("PROGRAMMING").await.unwrap()), vec!["snakes"]);
        assert_eq!(slugs(&repo.search("ali").await.unwrap()), vec!["snakes"]);
        assert_eq!(slugs(&repo.search("پایتون").await.unwrap()), vec!["snakes"]);
        assert_eq!(slugs(&repo.search("rust").await.unwrap()), vec!["rust-basics"]);
        assert!(repo.search("python").await.unwrap().is_empty());
        assert_eq!(repo.search("").await.unwrap().len(), 2);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_search_treats_like_wildcards_literally() {
        let db = setup().await;
        let repo = LibSqlPostRepository::new(db.connection());

        repo.create(NewPost {
            body_en: "100% safe".to_string(),
            ..new_post("Percent")
        })
        .await
        .unwrap();
        repo.create(new_post("Other")).await.unwrap();

        assert_eq!(slugs(&repo.search("0%").await.unwrap()), vec!["percent"]);
        assert!(repo.search("_").await.unwrap().is_empty());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_deleting_category_keeps_posts_and_drops_category_match() {
        let db = setup().await;
        seed_programming(&db).await;
        let repo = LibSqlPostRepository::new(db.connection());

        repo.create(NewPost {
            category_slug: Some("programming".to_string()),
            creator_name: "Ali".to_string(),
            ..new_post("Snakes")
        })
        .await
        .unwrap();

        LibSqlCategoryRepository::new(db.connection())
            .delete("programming")
            .await
            .unwrap();

        let post = repo.get_by_slug("snakes").await.unwrap().unwrap();
        assert!(post.category.is_none());
        assert!(repo.search("programming").await.unwrap().is_empty());
        assert_eq!(slugs(&repo.search("ali").await.unwrap()), vec!["snakes"]);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_pushdown_agrees_with_in_memory_filter() {
        let db = setup().await;
        seed_programming(&db).await;
        let repo = LibSqlPostRepository::new(db.connection());

        repo.create(new_post("Rust Basics")).await.unwrap();
        repo.create(NewPost {
            category_slug: Some("programming".to_string()),
            ..new_post("Async Programming")
        })
        .await
        .unwrap();
        repo.create(NewPost {
            creator_name: "Programmer Sara".to_string(),
            ..new_post("Career Notes")
        })
        .await
        .unwrap();

        let all = repo.list_all().await.unwrap();
        for query in ["program", "RUST", "reza", "عنوان", "nothing"] {
            assert_eq!(
                repo.search(query).await.unwrap(),
                filter_posts(Some(query), all.clone()),
                "query {query}"
            );
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_pushdown_folds_non_ascii_uppercase() {
        let db = setup().await;
        LibSqlCategoryRepository::new(db.connection())
            .create(Category::new("دسته", "ÉCOLE ÉTÉ", "ecole"))
            .await
            .unwrap();
        let repo = LibSqlPostRepository::new(db.connection());

        repo.create(NewPost {
            slug: "cafe-culture".to_string(),
            ..new_post("CAFÉ CULTURE")
        })
        .await
        .unwrap();
        repo.create(NewPost {
            creator_name: "ÖZIL".to_string(),
            category_slug: Some("ecole".to_string()),
            ..new_post("Football")
        })
        .await
        .unwrap();

        let all = repo.list_all().await.unwrap();
        for (query, expected) in [
            ("CAFÉ", vec!["cafe-culture"]),
            ("café", vec!["cafe-culture"]),
            ("özil", vec!["football"]),
            ("ÉTÉ", vec!["football"]),
        ] {
            let found = repo.search(query).await.unwrap();
            assert_eq!(slugs(&found), expected, "query {query}");
            assert_eq!(found, filter_posts(Some(query), all.clone()), "query {query}");
        }
    }
}
