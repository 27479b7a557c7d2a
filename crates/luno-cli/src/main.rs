//! Luno CLI - Command-line front end for the bilingual blog
//!
//! Browse, search, and manage posts, categories, and contact messages stored
//! in a local libSQL database.

mod cli;
mod commands;
mod error;

use clap::Parser;
use luno_core::config::LunoConfig;
use luno_core::contact::ContactForm;
use tracing_subscriber::EnvFilter;

use crate::cli::{CategoryCommands, Cli, Commands, ContactCommands, PostCommands};
use crate::commands::category::{run_category_add, run_category_delete, run_category_list};
use crate::commands::common::resolve_db_path;
use crate::commands::completions::run_completions;
use crate::commands::contact::{run_contact_list, run_contact_send};
use crate::commands::export::run_export;
use crate::commands::home::run_home;
use crate::commands::list::run_list;
use crate::commands::post::{run_post_add, run_post_delete, run_post_select};
use crate::commands::search::run_search;
use crate::commands::show::run_show;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    let env_filter = EnvFilter::from_default_env();
    let env_filter = match "luno=info".parse() {
        Ok(directive) => env_filter.add_directive(directive),
        Err(_) => env_filter,
    };
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = LunoConfig::from_env()?;
    let db_path = resolve_db_path(cli.db_path, config.db_path.clone());

    match cli.command {
        Commands::Home { json } => run_home(json, &db_path).await?,
        Commands::List {
            limit,
            offset,
            json,
        } => {
            let limit = limit.unwrap_or(config.list_limit);
            run_list(limit, offset, json, &db_path).await?;
        }
        Commands::Search {
            query,
            strategy,
            json,
        } => {
            let strategy = strategy.map_or(config.search_strategy, Into::into);
            run_search(query.as_deref(), strategy, json, &db_path).await?;
        }
        Commands::Show { slug, json } => run_show(&slug, json, &db_path).await?,
        Commands::Post { command } => match command {
            PostCommands::Add(args) => run_post_add(args, &db_path).await?,
            PostCommands::Select { slug, off } => run_post_select(&slug, !off, &db_path).await?,
            PostCommands::Delete { slug } => run_post_delete(&slug, &db_path).await?,
        },
        Commands::Category { command } => match command {
            CategoryCommands::Add {
                name_fa,
                name_en,
                slug,
            } => run_category_add(&name_fa, &name_en, slug.as_deref(), &db_path).await?,
            CategoryCommands::List { json } => run_category_list(json, &db_path).await?,
            CategoryCommands::Delete { slug } => run_category_delete(&slug, &db_path).await?,
        },
        Commands::Contact { command } => match command {
            ContactCommands::Send {
                name,
                email,
                subject,
                message,
            } => {
                let form = ContactForm {
                    name,
                    email,
                    subject,
                    message,
                };
                run_contact_send(form, &db_path).await?;
            }
            ContactCommands::List { limit, json } => {
                let limit = limit.unwrap_or(config.list_limit);
                run_contact_list(limit, json, &db_path).await?;
            }
        },
        Commands::Export { format, output } => {
            run_export(format, output.as_deref(), &db_path).await?;
        }
        Commands::Completions { shell, output } => {
            run_completions(shell, output.as_deref())?;
        }
    }

    Ok(())
}
