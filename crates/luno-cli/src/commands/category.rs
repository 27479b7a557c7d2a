use std::path::Path;

use luno_core::Category;

use crate::commands::common::{normalize_slug, open_database};
use crate::error::CliError;

pub async fn run_category_add(
    name_fa: &str,
    name_en: &str,
    slug: Option<&str>,
    db_path: &Path,
) -> Result<(), CliError> {
    let db = open_database(db_path).await?;
    let category = db
        .create_category(Category::new(name_fa, name_en, slug.unwrap_or_default()))
        .await?;
    println!("Created category {} ({})", category.slug, category);
    Ok(())
}

pub async fn run_category_list(as_json: bool, db_path: &Path) -> Result<(), CliError> {
    let db = open_database(db_path).await?;
    let categories = db.list_categories().await?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&categories)?);
    } else if categories.is_empty() {
        println!("No categories found.");
    } else {
        for category in &categories {
            println!(
                "{:<24}  {:<24}  {}",
                category.slug, category.name_en, category.name_fa
            );
        }
    }
    Ok(())
}

pub async fn run_category_delete(slug: &str, db_path: &Path) -> Result<(), CliError> {
    let slug = normalize_slug(slug)?;
    let db = open_database(db_path).await?;
    db.delete_category(&slug).await?;
    println!("Deleted category {slug}; its posts are now uncategorized");
    Ok(())
}
