use std::path::{Path, PathBuf};

use chrono::Utc;
use luno_core::export::{self, render_posts_export, suggested_export_file_name};

use crate::cli::ExportFormat;
use crate::commands::common::open_database;
use crate::error::CliError;

impl From<ExportFormat> for export::ExportFormat {
    fn from(format: ExportFormat) -> Self {
        match format {
            ExportFormat::Json => Self::Json,
            ExportFormat::Markdown => Self::Markdown,
        }
    }
}

pub async fn run_export(
    format: ExportFormat,
    output_path: Option<&Path>,
    db_path: &Path,
) -> Result<(), CliError> {
    let db = open_database(db_path).await?;
    let posts = db.list_posts().await?;
    let rendered = render_posts_export(&posts, format.into())?;

    if let Some(path) = output_path {
        let path = resolve_export_path(path, format.into(), Utc::now().timestamp_millis());
        std::fs::write(&path, rendered)?;
        println!("{}", path.display());
    } else {
        println!("{rendered}");
    }

    Ok(())
}

/// An existing directory receives a timestamped `luno-export-*` file.
pub fn resolve_export_path(
    output_path: &Path,
    format: export::ExportFormat,
    timestamp_ms: i64,
) -> PathBuf {
    if output_path.is_dir() {
        output_path.join(suggested_export_file_name(format, timestamp_ms))
    } else {
        output_path.to_path_buf()
    }
}
