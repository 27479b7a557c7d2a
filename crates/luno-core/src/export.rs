//! Post export helpers (JSON and Markdown).

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::Post;

/// Export output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportFormat {
    Json,
    Markdown,
}

impl ExportFormat {
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Markdown => "md",
        }
    }
}

/// Flat, serializable post record used in exports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportPost {
    pub id: String,
    pub slug: String,
    pub url: String,
    pub created_at: i64,
    pub is_selected: bool,
    pub category: Option<String>,
    pub creator_name: String,
    pub creator_title: String,
    pub title_fa: String,
    pub title_en: String,
    pub subtitle_fa: String,
    pub subtitle_en: String,
    pub body_fa: String,
    pub body_en: String,
}

#[must_use]
pub fn post_to_export_item(post: &Post) -> ExportPost {
    ExportPost {
        id: post.id.to_string(),
        slug: post.slug.clone(),
        url: post.absolute_url(),
        created_at: post.created_at,
        is_selected: post.is_selected,
        category: post.category.as_ref().map(|category| category.slug.clone()),
        creator_name: post.creator_name.clone(),
        creator_title: post.creator_title.clone(),
        title_fa: post.title_fa.clone(),
        title_en: post.title_en.clone(),
        subtitle_fa: post.subtitle_fa.clone(),
        subtitle_en: post.subtitle_en.clone(),
        body_fa: post.body_fa.clone(),
        body_en: post.body_en.clone(),
    }
}

/// Render posts as pretty-printed JSON.
pub fn render_json_export(posts: &[Post]) -> serde_json::Result<String> {
    let items = posts.iter().map(post_to_export_item).collect::<Vec<_>>();
    serde_json::to_string_pretty(&items)
}

/// Render posts in Markdown: a frontmatter block, then English and Farsi sections.
#[must_use]
pub fn render_markdown_export(posts: &[Post]) -> String {
    let mut output = String::new();

    for (index, post) in posts.iter().enumerate() {
        if index > 0 {
            output.push('\n');
        }

        let item = post_to_export_item(post);
        let _ = writeln!(output, "---");
        let _ = writeln!(output, "id: {}", item.id);
        let _ = writeln!(output, "slug: {}", item.slug);
        let _ = writeln!(output, "created_at: {}", item.created_at);
        let _ = writeln!(output, "selected: {}", item.is_selected);
        if let Some(category) = &item.category {
            let _ = writeln!(output, "category: {category}");
        }
        let _ = writeln!(output, "author: {} ({})", item.creator_name, item.creator_title);
        let _ = writeln!(output, "---");
        let _ = writeln!(output);
        let _ = writeln!(output, "# {}", item.title_en);
        let _ = writeln!(output);
        let _ = writeln!(output, "_{}_", item.subtitle_en);
        let _ = writeln!(output);
        let _ = writeln!(output, "{}", item.body_en);
        let _ = writeln!(output);
        let _ = writeln!(output, "# {}", item.title_fa);
        let _ = writeln!(output);
        let _ = writeln!(output, "_{}_", item.subtitle_fa);
        let _ = writeln!(output);
        let _ = writeln!(output, "{}", item.body_fa);
    }

    output
}

/// Render posts based on selected export format.
pub fn render_posts_export(posts: &[Post], format: ExportFormat) -> serde_json::Result<String> {
    match format {
        ExportFormat::Json => render_json_export(posts),
        ExportFormat::Markdown => Ok(render_markdown_export(posts)),
    }
}

/// Build a deterministic default file name for export flows.
#[must_use]
pub fn suggested_export_file_name(format: ExportFormat, timestamp_ms: i64) -> String {
    format!("luno-export-{timestamp_ms}.{}", format.extension())
}
