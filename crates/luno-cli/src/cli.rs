use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use luno_core::SearchStrategy;

#[derive(Parser)]
#[command(name = "luno")]
#[command(about = "Browse and manage the Luno bilingual blog from the command line")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Optional path to local database file
    #[arg(long, global = true, value_name = "PATH")]
    pub db_path: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show posts selected for the home page
    Home {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List posts, newest first
    List {
        /// Number of posts to show (defaults to LUNO_LIST_LIMIT)
        #[arg(short, long)]
        limit: Option<usize>,
        /// Number of posts to skip
        #[arg(long, default_value = "0")]
        offset: usize,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Search titles, subtitles, bodies, authors, and category names
    Search {
        /// Search query, trimmed of surrounding whitespace; lists every post
        /// when omitted or blank
        query: Option<String>,
        /// Where to evaluate the query (defaults to LUNO_SEARCH_STRATEGY)
        #[arg(long, value_enum)]
        strategy: Option<SearchMode>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show a single post
    Show {
        /// Post slug
        slug: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Manage posts
    Post {
        #[command(subcommand)]
        command: PostCommands,
    },
    /// Manage categories
    Category {
        #[command(subcommand)]
        command: CategoryCommands,
    },
    /// Contact form inbox
    Contact {
        #[command(subcommand)]
        command: ContactCommands,
    },
    /// Export posts
    Export {
        /// Export format
        #[arg(long, value_enum, default_value_t = ExportFormat::Json)]
        format: ExportFormat,
        /// Output file, or a directory to write a timestamped export into
        /// (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum SearchMode {
    Memory,
    Pushdown,
}

impl From<SearchMode> for SearchStrategy {
    fn from(mode: SearchMode) -> Self {
        match mode {
            SearchMode::Memory => Self::Memory,
            SearchMode::Pushdown => Self::Pushdown,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum ExportFormat {
    Json,
    Markdown,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}

#[derive(Subcommand)]
pub enum PostCommands {
    /// Create a post
    Add(PostArgs),
    /// Mark a post as selected for the home page
    Select {
        /// Post slug
        slug: String,
        /// Clear the flag instead
        #[arg(long)]
        off: bool,
    },
    /// Delete a post
    Delete {
        /// Post slug
        slug: String,
    },
}

#[derive(clap::Args)]
pub struct PostArgs {
    #[arg(long, value_name = "TEXT")]
    pub title_fa: String,
    #[arg(long, value_name = "TEXT")]
    pub title_en: String,
    #[arg(long, value_name = "TEXT")]
    pub subtitle_fa: String,
    #[arg(long, value_name = "TEXT")]
    pub subtitle_en: String,
    #[arg(long, value_name = "TEXT")]
    pub body_fa: String,
    #[arg(long, value_name = "TEXT")]
    pub body_en: String,
    /// URL slug (derived from the English title when omitted)
    #[arg(long)]
    pub slug: Option<String>,
    /// Category slug
    #[arg(long, value_name = "SLUG")]
    pub category: Option<String>,
    #[arg(long, value_name = "NAME")]
    pub creator_name: String,
    #[arg(long, value_name = "TITLE")]
    pub creator_title: String,
    /// Show on the home page
    #[arg(long)]
    pub selected: bool,
}

#[derive(Subcommand)]
pub enum CategoryCommands {
    /// Create a category
    Add {
        #[arg(long, value_name = "TEXT")]
        name_fa: String,
        #[arg(long, value_name = "TEXT")]
        name_en: String,
        /// URL slug (derived from the English name when omitted)
        #[arg(long)]
        slug: Option<String>,
    },
    /// List categories
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete a category; its posts are kept without a category
    Delete {
        /// Category slug
        slug: String,
    },
}

#[derive(Subcommand)]
pub enum ContactCommands {
    /// Submit a contact message
    Send {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        subject: String,
        #[arg(long)]
        message: String,
    },
    /// List received messages, newest first
    List {
        /// Number of messages to show (defaults to LUNO_LIST_LIMIT)
        #[arg(short, long)]
        limit: Option<usize>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
