use std::env;
use std::path::{Path, PathBuf};

use chrono::Utc;
use luno_core::services::DatabaseService;
use luno_core::util::format_date;
use luno_core::{ContactMessage, Post};
use serde::Serialize;

use crate::error::CliError;

#[derive(Debug, Serialize)]
pub struct PostListItem {
    pub slug: String,
    pub url: String,
    pub title_en: String,
    pub title_fa: String,
    pub subtitle_en: String,
    pub category: Option<String>,
    pub creator_name: String,
    pub is_selected: bool,
    pub created_at: i64,
    pub relative_time: String,
}

#[derive(Debug, Serialize)]
pub struct ContactMessageItem {
    pub id: String,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub created_at: i64,
    pub created_date: String,
}

pub async fn open_database(path: &Path) -> Result<DatabaseService, CliError> {
    Ok(DatabaseService::open_path(path.to_path_buf()).await?)
}

/// Print posts either as a JSON array or as aligned text lines.
pub fn print_posts(posts: &[Post], as_json: bool) -> Result<(), CliError> {
    if as_json {
        let json_items = posts.iter().map(post_to_list_item).collect::<Vec<_>>();
        println!("{}", serde_json::to_string_pretty(&json_items)?);
    } else if posts.is_empty() {
        println!("No posts found.");
    } else {
        for line in format_post_lines(posts) {
            println!("{line}");
        }
    }
    Ok(())
}

pub fn format_post_lines(posts: &[Post]) -> Vec<String> {
    let now_ms = Utc::now().timestamp_millis();
    posts
        .iter()
        .map(|post| {
            let marker = if post.is_selected { '*' } else { ' ' };
            let title = truncate_chars(&post.title_en, 40);
            let relative_time = format_relative_time(post.created_at, now_ms);
            let slug = &post.slug;

            match &post.category {
                Some(category) => format!(
                    "{marker} {slug:<30}  {title:<40}  {relative_time:<10}  [{}]",
                    category.name_en
                ),
                None => format!("{marker} {slug:<30}  {title:<40}  {relative_time}"),
            }
        })
        .collect()
}

pub fn post_to_list_item(post: &Post) -> PostListItem {
    let now_ms = Utc::now().timestamp_millis();
    PostListItem {
        slug: post.slug.clone(),
        url: post.absolute_url(),
        title_en: post.title_en.clone(),
        title_fa: post.title_fa.clone(),
        subtitle_en: post.subtitle_en.clone(),
        category: post.category.as_ref().map(|category| category.slug.clone()),
        creator_name: post.creator_name.clone(),
        is_selected: post.is_selected,
        created_at: post.created_at,
        relative_time: format_relative_time(post.created_at, now_ms),
    }
}

/// Full detail view of a post, English first.
pub fn format_post_detail(post: &Post) -> String {
    let category = post.category.as_ref().map_or_else(
        || "-".to_string(),
        |category| format!("{} / {}", category.name_en, category.name_fa),
    );

    [
        format!("{}  ({})", post.title_en, post.absolute_url()),
        post.title_fa.clone(),
        format!(
            "By {}, {} on {}",
            post.creator_name,
            post.creator_title,
            format_date(post.created_at)
        ),
        format!("Category: {category}"),
        format!("Selected: {}", if post.is_selected { "yes" } else { "no" }),
        String::new(),
        post.subtitle_en.clone(),
        String::new(),
        post.body_en.clone(),
        String::new(),
        post.subtitle_fa.clone(),
        String::new(),
        post.body_fa.clone(),
    ]
    .join("\n")
}

pub fn contact_to_item(message: &ContactMessage) -> ContactMessageItem {
    ContactMessageItem {
        id: message.id.to_string(),
        name: message.name.clone(),
        email: message.email.clone(),
        subject: message.subject.clone(),
        message: message.message.clone(),
        created_at: message.created_at,
        created_date: format_date(message.created_at),
    }
}

pub fn format_contact_lines(messages: &[ContactMessage]) -> Vec<String> {
    messages
        .iter()
        .map(|message| {
            format!(
                "{}  {:<24}  {}",
                format_date(message.created_at),
                truncate_chars(&format!("{} <{}>", message.name, message.email), 24),
                truncate_chars(&message.subject, 60)
            )
        })
        .collect()
}

pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");

    if collapsed.chars().count() <= max_chars {
        collapsed
    } else {
        let take_len = max_chars.saturating_sub(3);
        let mut truncated = collapsed.chars().take(take_len).collect::<String>();
        truncated.push_str("...");
        truncated
    }
}

pub fn format_relative_time(timestamp_ms: i64, now_ms: i64) -> String {
    let diff = now_ms.saturating_sub(timestamp_ms);
    let minute = 60_000;
    let hour = 60 * minute;
    let day = 24 * hour;
    let week = 7 * day;
    let month = 30 * day;
    let year = 365 * day;

    if diff < minute {
        "just now".to_string()
    } else if diff < hour {
        format!("{}m ago", diff / minute)
    } else if diff < day {
        format!("{}h ago", diff / hour)
    } else if diff < week {
        format!("{}d ago", diff / day)
    } else if diff < month {
        format!("{}w ago", diff / week)
    } else if diff < year {
        format!("{}mo ago", diff / month)
    } else {
        format!("{}y ago", diff / year)
    }
}

/// Request-level query normalization: surrounding whitespace is dropped and
/// a blank query means "no filter".
pub fn normalize_search_query(query: Option<&str>) -> Option<String> {
    query
        .map(str::trim)
        .filter(|query| !query.is_empty())
        .map(str::to_string)
}

pub fn normalize_slug(slug: &str) -> Result<String, CliError> {
    let trimmed = slug.trim();
    if trimmed.is_empty() {
        Err(CliError::EmptySlug)
    } else {
        Ok(trimmed.to_string())
    }
}

pub fn resolve_db_path(cli_db_path: Option<PathBuf>, config_db_path: Option<PathBuf>) -> PathBuf {
    cli_db_path
        .or(config_db_path)
        .unwrap_or_else(default_db_path)
}

pub fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| env::current_dir().unwrap_or_default())
        .join("luno")
        .join("luno.db")
}
