//! Blog post model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::Category;
use crate::util::{normalize_text_option, slugify, unix_millis_now};
use crate::validation::{is_valid_slug, required_text, FieldErrors};

pub const MAX_TITLE_CHARS: usize = 200;
pub const MAX_SUBTITLE_CHARS: usize = 300;
pub const MAX_SLUG_CHARS: usize = 220;
pub const MAX_CREATOR_CHARS: usize = 100;

/// A unique identifier for a post, using UUID v7 (time-sortable)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PostId(Uuid);

impl PostId {
    /// Create a new unique post ID using UUID v7
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Get the string representation of this ID
    #[must_use]
    pub fn as_str(&self) -> String {
        self.0.to_string()
    }
}

impl Default for PostId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PostId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// A blog post with bilingual content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Unique identifier
    pub id: PostId,
    pub title_fa: String,
    pub title_en: String,
    pub subtitle_fa: String,
    pub subtitle_en: String,
    pub body_fa: String,
    pub body_en: String,
    /// Unique URL-safe slug
    pub slug: String,
    /// Creation timestamp (Unix ms)
    pub created_at: i64,
    /// Shown on the home page when set
    pub is_selected: bool,
    /// Resolved category, `None` when unset or the category was deleted
    pub category: Option<Category>,
    pub creator_name: String,
    pub creator_title: String,
}

impl Post {
    /// Build a post from validated input, stamping id and creation time.
    #[must_use]
    pub fn from_new(new: NewPost, category: Option<Category>) -> Self {
        Self {
            id: PostId::new(),
            title_fa: new.title_fa,
            title_en: new.title_en,
            subtitle_fa: new.subtitle_fa,
            subtitle_en: new.subtitle_en,
            body_fa: new.body_fa,
            body_en: new.body_en,
            slug: new.slug,
            created_at: unix_millis_now(),
            is_selected: new.is_selected,
            category,
            creator_name: new.creator_name,
            creator_title: new.creator_title,
        }
    }

    /// Canonical path of the post's detail page
    #[must_use]
    pub fn absolute_url(&self) -> String {
        format!("/blog/{}/", self.slug)
    }
}

impl fmt::Display for Post {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title_en)
    }
}

/// Input for creating a post.
///
/// The category is referenced by slug and resolved by the repository.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPost {
    pub title_fa: String,
    pub title_en: String,
    pub subtitle_fa: String,
    pub subtitle_en: String,
    pub body_fa: String,
    pub body_en: String,
    /// Leave blank to derive from `title_en`
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub is_selected: bool,
    #[serde(default)]
    pub category_slug: Option<String>,
    pub creator_name: String,
    pub creator_title: String,
}

impl NewPost {
    /// Trim every field, derive a blank slug, and check lengths and slug shape.
    pub fn validate(self) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();

        let title_fa = required_text(&mut errors, "title_fa", &self.title_fa, MAX_TITLE_CHARS);
        let title_en = required_text(&mut errors, "title_en", &self.title_en, MAX_TITLE_CHARS);
        let subtitle_fa = required_text(
            &mut errors,
            "subtitle_fa",
            &self.subtitle_fa,
            MAX_SUBTITLE_CHARS,
        );
        let subtitle_en = required_text(
            &mut errors,
            "subtitle_en",
            &self.subtitle_en,
            MAX_SUBTITLE_CHARS,
        );
        let body_fa = required_text(&mut errors, "body_fa", &self.body_fa, usize::MAX);
        let body_en = required_text(&mut errors, "body_en", &self.body_en, usize::MAX);
        let creator_name = required_text(
            &mut errors,
            "creator_name",
            &self.creator_name,
            MAX_CREATOR_CHARS,
        );
        let creator_title = required_text(
            &mut errors,
            "creator_title",
            &self.creator_title,
            MAX_CREATOR_CHARS,
        );

        let slug = match self.slug.trim() {
            "" => slugify(&title_en),
            explicit => explicit.to_string(),
        };
        if slug.chars().count() > MAX_SLUG_CHARS {
            errors.add(
                "slug",
                format!("Ensure this value has at most {MAX_SLUG_CHARS} characters."),
            );
        } else if !is_valid_slug(&slug) {
            errors.add(
                "slug",
                "Enter a valid slug of lowercase letters, numbers, and hyphens.",
            );
        }

        errors.into_result(Self {
            title_fa,
            title_en,
            subtitle_fa,
            subtitle_en,
            body_fa,
            body_en,
            slug,
            is_selected: self.is_selected,
            category_slug: normalize_text_option(self.category_slug),
            creator_name,
            creator_title,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> NewPost {
        NewPost {
            title_fa: "مبانی راست".to_string(),
            title_en: "Rust Basics".to_string(),
            subtitle_fa: "شروع".to_string(),
            subtitle_en: "Getting started".to_string(),
            body_fa: "متن".to_string(),
            body_en: "Ownership and borrowing".to_string(),
            creator_name: "Reza".to_string(),
            creator_title: "Engineer".to_string(),
            ..NewPost::default()
        }
    }

    #[test]
    fn test_post_id_unique() {
        assert_ne!(PostId::new(), PostId::new());
    }

    #[test]
    fn test_post_id_parse() {
        let id = PostId::new();
        let parsed: PostId = id.as_str().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_validate_derives_slug_from_english_title() {
        let post = sample().validate().unwrap();
        assert_eq!(post.slug, "rust-basics");
    }

    #[test]
    fn test_validate_trims_fields_and_blank_category() {
        let post = NewPost {
            title_en: "  Rust Basics  ".to_string(),
            category_slug: Some("  ".to_string()),
            ..sample()
        }
        .validate()
        .unwrap();

        assert_eq!(post.title_en, "Rust Basics");
        assert_eq!(post.category_slug, None);
    }

    #[test]
    fn test_validate_rejects_bad_slug() {
        let errors = NewPost {
            slug: "Not A Slug".to_string(),
            ..sample()
        }
        .validate()
        .unwrap_err();

        assert!(errors.get("slug").is_some());
    }

    #[test]
    fn test_validate_requires_slug_source() {
        // A Farsi-only English title leaves nothing to slugify.
        let errors = NewPost {
            title_en: "پایتون".to_string(),
            ..sample()
        }
        .validate()
        .unwrap_err();

        assert!(errors.get("slug").is_some());
    }

    #[test]
    fn test_validate_collects_every_missing_field() {
        let errors = NewPost::default().validate().unwrap_err();
        let fields: Vec<_> = errors.fields().collect();
        assert!(fields.contains(&"title_fa"));
        assert!(fields.contains(&"body_en"));
        assert!(fields.contains(&"creator_title"));
        assert!(fields.contains(&"slug"));
    }

    #[test]
    fn test_validate_title_length_cap() {
        let errors = NewPost {
            title_fa: "ب".repeat(MAX_TITLE_CHARS + 1),
            ..sample()
        }
        .validate()
        .unwrap_err();

        assert!(errors.get("title_fa").is_some());
    }

    #[test]
    fn test_from_new_and_absolute_url() {
        let post = Post::from_new(sample().validate().unwrap(), None);
        assert_eq!(post.absolute_url(), "/blog/rust-basics/");
        assert_eq!(post.to_string(), "Rust Basics");
        assert!(post.created_at > 0);
        assert!(!post.is_selected);
    }
}
