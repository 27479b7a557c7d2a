use std::path::Path;

use luno_core::NewPost;

use crate::cli::PostArgs;
use crate::commands::common::{normalize_slug, open_database};
use crate::error::CliError;

pub fn post_args_to_new_post(args: PostArgs) -> NewPost {
    NewPost {
        title_fa: args.title_fa,
        title_en: args.title_en,
        subtitle_fa: args.subtitle_fa,
        subtitle_en: args.subtitle_en,
        body_fa: args.body_fa,
        body_en: args.body_en,
        slug: args.slug.unwrap_or_default(),
        is_selected: args.selected,
        category_slug: args.category,
        creator_name: args.creator_name,
        creator_title: args.creator_title,
    }
}

pub async fn run_post_add(args: PostArgs, db_path: &Path) -> Result<(), CliError> {
    let db = open_database(db_path).await?;
    let post = db.create_post(post_args_to_new_post(args)).await?;
    println!("Created post {} at {}", post.slug, post.absolute_url());
    Ok(())
}

pub async fn run_post_select(slug: &str, selected: bool, db_path: &Path) -> Result<(), CliError> {
    let slug = normalize_slug(slug)?;
    let db = open_database(db_path).await?;
    let post = db.set_post_selected(&slug, selected).await?;

    if post.is_selected {
        println!("Selected {}", post.slug);
    } else {
        println!("Unselected {}", post.slug);
    }
    Ok(())
}

pub async fn run_post_delete(slug: &str, db_path: &Path) -> Result<(), CliError> {
    let slug = normalize_slug(slug)?;
    let db = open_database(db_path).await?;
    db.delete_post(&slug).await?;
    println!("Deleted post {slug}");
    Ok(())
}
