use std::path::Path;

use luno_core::{Post, SearchStrategy};

use crate::commands::common::{normalize_search_query, open_database, print_posts};
use crate::error::CliError;

/// Posts for a search request. The query is trimmed and a blank query lists
/// every post.
pub async fn search_posts(
    query: Option<&str>,
    strategy: SearchStrategy,
    db_path: &Path,
) -> Result<Vec<Post>, CliError> {
    let query = normalize_search_query(query);
    let db = open_database(db_path).await?;
    let posts = db.search_posts(query.as_deref(), strategy).await?;

    tracing::debug!(%strategy, results = posts.len(), "Search finished");
    Ok(posts)
}

pub async fn run_search(
    query: Option<&str>,
    strategy: SearchStrategy,
    as_json: bool,
    db_path: &Path,
) -> Result<(), CliError> {
    let posts = search_posts(query, strategy, db_path).await?;
    print_posts(&posts, as_json)
}
