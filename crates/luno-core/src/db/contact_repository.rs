//! Contact message repository implementation

use crate::contact::ContactForm;
use crate::error::{Error, Result};
use crate::models::ContactMessage;
use libsql::{Connection, Row};

use super::rows::parse_id;

/// Trait for contact inbox operations (async)
#[allow(async_fn_in_trait)]
pub trait ContactRepository {
    /// Validate a submitted form and store it
    async fn create(&self, form: &ContactForm) -> Result<ContactMessage>;

    /// Most recent messages first
    async fn list(&self, limit: usize) -> Result<Vec<ContactMessage>>;
}

/// libSQL implementation of `ContactRepository`
pub struct LibSqlContactRepository<'a> {
    conn: &'a Connection,
}

impl<'a> LibSqlContactRepository<'a> {
    /// Create a new repository with the given connection
    pub const fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    fn parse_message(row: &Row) -> Result<ContactMessage> {
        let id: String = row.get(0)?;
        Ok(ContactMessage {
            id: parse_id(&id)?,
            name: row.get(1)?,
            email: row.get(2)?,
            subject: row.get(3)?,
            message: row.get(4)?,
            created_at: row.get(5)?,
        })
    }
}

impl ContactRepository for LibSqlContactRepository<'_> {
    async fn create(&self, form: &ContactForm) -> Result<ContactMessage> {
        let message = ContactMessage::new(form.validate().map_err(Error::Validation)?);

        self.conn
            .execute(
                "INSERT INTO contact_messages (id, name, email, subject, message, created_at)
                 VALUES (?, ?, ?, ?, ?, ?)",
                libsql::params![
                    message.id.as_str(),
                    message.name.as_str(),
                    message.email.as_str(),
                    message.subject.as_str(),
                    message.message.as_str(),
                    message.created_at
                ],
            )
            .await?;

        tracing::info!(id = %message.id, "Stored contact message");
        Ok(message)
    }

    async fn list(&self, limit: usize) -> Result<Vec<ContactMessage>> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let mut rows = self
            .conn
            .query(
                "SELECT id, name, email, subject, message, created_at
                 FROM contact_messages
                 ORDER BY created_at DESC, rowid DESC
                 LIMIT ?",
                [limit],
            )
            .await?;

        let mut messages = Vec::new();
        while let Some(row) = rows.next().await? {
            messages.push(Self::parse_message(&row)?);
        }
        Ok(messages)
    }
}
