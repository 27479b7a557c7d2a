use std::path::Path;

use luno_core::contact::ContactForm;

use crate::commands::common::{contact_to_item, format_contact_lines, open_database};
use crate::error::CliError;

pub async fn run_contact_send(form: ContactForm, db_path: &Path) -> Result<(), CliError> {
    let db = open_database(db_path).await?;
    let message = db.submit_contact(&form).await?;
    println!("{message}");
    Ok(())
}

pub async fn run_contact_list(limit: usize, as_json: bool, db_path: &Path) -> Result<(), CliError> {
    let db = open_database(db_path).await?;
    let messages = db.list_contact_messages(limit).await?;

    if as_json {
        let json_items = messages.iter().map(contact_to_item).collect::<Vec<_>>();
        println!("{}", serde_json::to_string_pretty(&json_items)?);
    } else if messages.is_empty() {
        println!("No messages found.");
    } else {
        for line in format_contact_lines(&messages) {
            println!("{line}");
        }
    }
    Ok(())
}
