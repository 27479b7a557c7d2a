//! Multi-field, bilingual search over blog posts.
//!
//! A query matches a post when it is a case-insensitive substring of any
//! field in [`SearchField::ALL`]. Fields are ORed; there is no tokenization,
//! stemming, or ranking. The same field set drives the in-memory filter
//! ([`filter_posts`]) and the SQL predicate pushed down to the database
//! ([`SearchPredicate`]).

mod predicate;

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::Post;

pub use predicate::{Condition, SearchPredicate, SearchTerm};

/// A searchable field, spanning a post and its category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchField {
    TitleFa,
    TitleEn,
    SubtitleFa,
    SubtitleEn,
    BodyFa,
    BodyEn,
    CreatorName,
    CategoryNameFa,
    CategoryNameEn,
}

impl SearchField {
    /// Every field a query is matched against.
    pub const ALL: [Self; 9] = [
        Self::TitleFa,
        Self::TitleEn,
        Self::SubtitleFa,
        Self::SubtitleEn,
        Self::BodyFa,
        Self::BodyEn,
        Self::CreatorName,
        Self::CategoryNameFa,
        Self::CategoryNameEn,
    ];

    /// Read this field from `post`. Category fields are `None` without a category.
    pub fn value(self, post: &Post) -> Option<&str> {
        match self {
            Self::TitleFa => Some(&post.title_fa),
            Self::TitleEn => Some(&post.title_en),
            Self::SubtitleFa => Some(&post.subtitle_fa),
            Self::SubtitleEn => Some(&post.subtitle_en),
            Self::BodyFa => Some(&post.body_fa),
            Self::BodyEn => Some(&post.body_en),
            Self::CreatorName => Some(&post.creator_name),
            Self::CategoryNameFa => post.category.as_ref().map(|c| c.name_fa.as_str()),
            Self::CategoryNameEn => post.category.as_ref().map(|c| c.name_en.as_str()),
        }
    }

    /// Case-folded copy of this field in the `posts p LEFT JOIN categories c`
    /// query, written with [`fold_case`] when the row is stored.
    pub const fn column(self) -> &'static str {
        match self {
            Self::TitleFa => "p.title_fa_folded",
            Self::TitleEn => "p.title_en_folded",
            Self::SubtitleFa => "p.subtitle_fa_folded",
            Self::SubtitleEn => "p.subtitle_en_folded",
            Self::BodyFa => "p.body_fa_folded",
            Self::BodyEn => "p.body_en_folded",
            Self::CreatorName => "p.creator_name_folded",
            Self::CategoryNameFa => "c.name_fa_folded",
            Self::CategoryNameEn => "c.name_en_folded",
        }
    }
}

/// Case folding shared by the in-memory filter and the stored search columns.
///
/// SQLite's `lower()` only folds ASCII, so the database never folds text
/// itself; both sides of a pushed-down comparison are folded here.
pub fn fold_case(text: &str) -> String {
    text.to_lowercase()
}

/// A non-empty search query, lowercased once up front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    needle: String,
}

impl SearchQuery {
    /// `None` for an absent or empty query, which means "no filtering".
    ///
    /// The query is not trimmed here; request parsing decides whether
    /// surrounding whitespace is significant.
    pub fn parse(raw: Option<&str>) -> Option<Self> {
        match raw {
            None | Some("") => None,
            Some(raw) => Some(Self {
                needle: fold_case(raw),
            }),
        }
    }

    /// The lowercased needle.
    pub fn as_str(&self) -> &str {
        &self.needle
    }

    pub fn matches(&self, post: &Post) -> bool {
        SearchField::ALL
            .iter()
            .any(|field| self.matches_field(*field, post))
    }

    /// Fields of `post` that contain the query, in [`SearchField::ALL`] order.
    #[cfg(test)]
    pub fn matched_fields(&self, post: &Post) -> Vec<SearchField> {
        SearchField::ALL
            .into_iter()
            .filter(|field| self.matches_field(*field, post))
            .collect()
    }

    fn matches_field(&self, field: SearchField, post: &Post) -> bool {
        field
            .value(post)
            .is_some_and(|value| fold_case(value).contains(&self.needle))
    }
}

/// Filter `posts` down to those matching `query`.
///
/// An absent or empty query returns `posts` unchanged. Otherwise the result
/// keeps the input order (newest first, as supplied by the datastore) and
/// contains each matching post once, keyed by id.
pub fn filter_posts(query: Option<&str>, posts: Vec<Post>) -> Vec<Post> {
    let Some(query) = SearchQuery::parse(query) else {
        return posts;
    };

    let scanned = posts.len();
    let mut seen = HashSet::with_capacity(scanned);
    let matched: Vec<Post> = posts
        .into_iter()
        .filter(|post| query.matches(post))
        .filter(|post| seen.insert(post.id))
        .collect();

    tracing::debug!(
        query = query.as_str(),
        scanned,
        matched = matched.len(),
        "Filtered posts in memory"
    );
    matched
}

/// Where a search query is evaluated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchStrategy {
    /// Load every post and run [`filter_posts`]
    #[default]
    Memory,
    /// Evaluate a [`SearchPredicate`] inside the database
    Pushdown,
}

impl fmt::Display for SearchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Memory => "memory",
            Self::Pushdown => "pushdown",
        })
    }
}

impl FromStr for SearchStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" | "in-memory" => Ok(Self::Memory),
            "pushdown" | "sql" => Ok(Self::Pushdown),
            other => Err(format!(
                "unknown search strategy '{other}' (expected 'memory' or 'pushdown')"
            )),
        }
    }
}
