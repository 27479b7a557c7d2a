use std::path::Path;

use crate::commands::common::{format_post_detail, normalize_slug, open_database};
use crate::error::CliError;

pub async fn run_show(slug: &str, as_json: bool, db_path: &Path) -> Result<(), CliError> {
    let slug = normalize_slug(slug)?;
    let db = open_database(db_path).await?;
    let post = db
        .get_post(&slug)
        .await?
        .ok_or(CliError::PostNotFound(slug))?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&post)?);
    } else {
        println!("{}", format_post_detail(&post));
    }
    Ok(())
}
