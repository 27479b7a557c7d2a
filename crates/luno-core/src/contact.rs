//! Contact form validation.
//!
//! Raw form input is validated as a whole so callers can report every invalid
//! field at once; only a [`ValidContactForm`] can be persisted.

use serde::{Deserialize, Serialize};

use crate::validation::{is_valid_email, required_text, FieldErrors, MAX_EMAIL_LEN};

pub const MAX_NAME_CHARS: usize = 100;
pub const MAX_SUBJECT_CHARS: usize = 200;

/// Raw contact form submission
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// Contact form that passed validation, with every value trimmed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactForm {
    pub fn validate(&self) -> Result<ValidContactForm, FieldErrors> {
        let mut errors = FieldErrors::new();

        let name = required_text(&mut errors, "name", &self.name, MAX_NAME_CHARS);
        let email = required_text(&mut errors, "email", &self.email, MAX_EMAIL_LEN);
        if errors.get("email").is_none() && !is_valid_email(&email) {
            errors.add("email", "Enter a valid email address.");
        }
        let subject = required_text(&mut errors, "subject", &self.subject, MAX_SUBJECT_CHARS);
        let message = required_text(&mut errors, "message", &self.message, usize::MAX);

        errors.into_result(ValidContactForm {
            name,
            email,
            subject,
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn form() -> ContactForm {
        ContactForm {
            name: " Sara ".to_string(),
            email: "sara@example.com ".to_string(),
            subject: "Collaboration".to_string(),
            message: "Hi there,\nlet's talk.\n".to_string(),
        }
    }

    #[test]
    fn valid_form_is_trimmed() {
        let valid = form().validate().unwrap();
        assert_eq!(
            valid,
            ValidContactForm {
                name: "Sara".to_string(),
                email: "sara@example.com".to_string(),
                subject: "Collaboration".to_string(),
                message: "Hi there,\nlet's talk.".to_string(),
            }
        );
    }

    #[test]
    fn invalid_email_is_reported() {
        let errors = ContactForm {
            email: "not-an-email".to_string(),
            ..form()
        }
        .validate()
        .unwrap_err();

        assert_eq!(errors.get("email"), Some("Enter a valid email address."));
    }

    #[test]
    fn every_field_is_checked() {
        let errors = ContactForm::default().validate().unwrap_err();
        let fields: Vec<_> = errors.fields().collect();
        assert_eq!(fields, vec!["email", "message", "name", "subject"]);
    }

    #[test]
    fn overlong_subject_is_rejected() {
        let errors = ContactForm {
            subject: "s".repeat(MAX_SUBJECT_CHARS + 1),
            ..form()
        }
        .validate()
        .unwrap_err();

        assert!(errors.get("subject").is_some());
        assert!(errors.get("name").is_none());
    }
}
