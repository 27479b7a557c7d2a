//! Category model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::util::slugify;
use crate::validation::{is_valid_slug, required_text, FieldErrors};

pub const MAX_NAME_CHARS: usize = 100;
pub const MAX_SLUG_CHARS: usize = 120;

/// A unique identifier for a category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategoryId(Uuid);

impl CategoryId {
    /// Create a new unique category ID
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

impl Default for CategoryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CategoryId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// A bilingual taxonomy label optionally attached to posts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier
    pub id: CategoryId,
    /// Farsi display name
    pub name_fa: String,
    /// English display name
    pub name_en: String,
    /// Unique URL-safe slug
    pub slug: String,
}

impl Category {
    /// Create a new category.
    ///
    /// When `slug` is blank it is derived from the English name.
    #[must_use]
    pub fn new(name_fa: impl Into<String>, name_en: impl Into<String>, slug: &str) -> Self {
        let name_en = name_en.into();
        let slug = if slug.trim().is_empty() {
            slugify(&name_en)
        } else {
            slug.trim().to_string()
        };

        Self {
            id: CategoryId::new(),
            name_fa: name_fa.into(),
            name_en,
            slug,
        }
    }
}

impl Category {
    /// Trim names and check lengths and slug shape.
    pub fn validate(self) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();
        let name_fa = required_text(&mut errors, "name_fa", &self.name_fa, MAX_NAME_CHARS);
        let name_en = required_text(&mut errors, "name_en", &self.name_en, MAX_NAME_CHARS);

        if self.slug.chars().count() > MAX_SLUG_CHARS {
            errors.add(
                "slug",
                format!("Ensure this value has at most {MAX_SLUG_CHARS} characters."),
            );
        } else if !is_valid_slug(&self.slug) {
            errors.add(
                "slug",
                "Enter a valid slug of lowercase letters, numbers, and hyphens.",
            );
        }

        errors.into_result(Self {
            name_fa,
            name_en,
            ..self
        })
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name_en)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_derived_from_english_name() {
        let category = Category::new("برنامه نویسی", "Web Programming", "");
        assert_eq!(category.slug, "web-programming");
    }

    #[test]
    fn test_explicit_slug_kept() {
        let category = Category::new("برنامه نویسی", "Programming", " dev ");
        assert_eq!(category.slug, "dev");
    }

    #[test]
    fn test_display_uses_english_name() {
        let category = Category::new("برنامه نویسی", "Programming", "");
        assert_eq!(category.to_string(), "Programming");
    }

    #[test]
    fn test_validate_rejects_unsluggable_name() {
        let errors = Category::new("اخبار", "اخبار", "").validate().unwrap_err();
        assert!(errors.get("slug").is_some());
        assert!(errors.get("name_en").is_none());
    }

    #[test]
    fn test_category_id_parse() {
        let id = CategoryId::new();
        let parsed: CategoryId = id.as_str().parse().unwrap();
        assert_eq!(id, parsed);
    }
}
