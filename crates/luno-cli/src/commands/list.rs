use std::path::Path;

use crate::commands::common::{open_database, print_posts};
use crate::error::CliError;

pub async fn run_list(
    limit: usize,
    offset: usize,
    as_json: bool,
    db_path: &Path,
) -> Result<(), CliError> {
    let db = open_database(db_path).await?;
    let posts = db.list_posts_page(limit, offset).await?;
    print_posts(&posts, as_json)
}
