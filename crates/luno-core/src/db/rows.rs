//! Row decoding shared by the repositories.

use libsql::{Row, Value};

use crate::error::{Error, Result};
use crate::models::{Category, Post};

/// Post columns joined with their optional category, in decode order.
pub const POST_SELECT: &str = "SELECT p.id, p.title_fa, p.title_en, p.subtitle_fa, p.subtitle_en,
            p.body_fa, p.body_en, p.slug, p.created_at, p.is_selected,
            p.creator_name, p.creator_title,
            c.id, c.name_fa, c.name_en, c.slug
     FROM posts p
     LEFT JOIN categories c ON c.id = p.category_id";

/// Newest first; rowid breaks ties between posts created in the same millisecond.
pub const POST_ORDER: &str = "ORDER BY p.created_at DESC, p.rowid DESC";

pub const CATEGORY_SELECT: &str = "SELECT id, name_fa, name_en, slug FROM categories";

pub fn parse_id<T: std::str::FromStr>(raw: &str) -> Result<T> {
    raw.parse()
        .map_err(|_| Error::Database(format!("Invalid stored id: {raw}")))
}

fn optional_text(row: &Row, idx: i32) -> Result<Option<String>> {
    match row.get_value(idx)? {
        Value::Null => Ok(None),
        Value::Text(text) => Ok(Some(text)),
        other => Err(Error::Database(format!(
            "Expected text in column {idx}, found {other:?}"
        ))),
    }
}

/// Decode a row produced by [`POST_SELECT`].
pub fn parse_post(row: &Row) -> Result<Post> {
    let category = match optional_text(row, 12)? {
        Some(category_id) => Some(Category {
            id: parse_id(&category_id)?,
            name_fa: row.get(13)?,
            name_en: row.get(14)?,
            slug: row.get(15)?,
        }),
        None => None,
    };

    let id: String = row.get(0)?;
    Ok(Post {
        id: parse_id(&id)?,
        title_fa: row.get(1)?,
        title_en: row.get(2)?,
        subtitle_fa: row.get(3)?,
        subtitle_en: row.get(4)?,
        body_fa: row.get(5)?,
        body_en: row.get(6)?,
        slug: row.get(7)?,
        created_at: row.get(8)?,
        is_selected: row.get::<i64>(9)? != 0,
        creator_name: row.get(10)?,
        creator_title: row.get(11)?,
        category,
    })
}

/// Decode a row produced by [`CATEGORY_SELECT`].
pub fn parse_category(row: &Row) -> Result<Category> {
    let id: String = row.get(0)?;
    Ok(Category {
        id: parse_id(&id)?,
        name_fa: row.get(1)?,
        name_en: row.get(2)?,
        slug: row.get(3)?,
    })
}
