//! Contact message model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::contact::ValidContactForm;
use crate::util::{format_date, unix_millis_now};

/// A unique identifier for a contact message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContactMessageId(Uuid);

impl ContactMessageId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    #[must_use]
    pub fn as_str(&self) -> String {
        self.0.to_string()
    }
}

impl Default for ContactMessageId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ContactMessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ContactMessageId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// A message submitted through the contact form. Write-once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub id: ContactMessageId,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    /// Creation timestamp (Unix ms)
    pub created_at: i64,
}

impl ContactMessage {
    /// Stamp a validated form with an id and the current time.
    #[must_use]
    pub fn new(form: ValidContactForm) -> Self {
        let ValidContactForm {
            name,
            email,
            subject,
            message,
        } = form;

        Self {
            id: ContactMessageId::new(),
            name,
            email,
            subject,
            message,
            created_at: unix_millis_now(),
        }
    }
}

impl fmt::Display for ContactMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Message from {} on {}",
            self.name,
            format_date(self.created_at)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contact::ContactForm;

    #[test]
    fn test_display_includes_name_and_date() {
        let form = ContactForm {
            name: "Sara".to_string(),
            email: "sara@example.com".to_string(),
            subject: "Hello".to_string(),
            message: "Nice blog".to_string(),
        };
        let mut message = ContactMessage::new(form.validate().unwrap());
        message.created_at = 1_700_000_000_000;

        assert_eq!(message.to_string(), "Message from Sara on 2023-11-14");
    }
}
