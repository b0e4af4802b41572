//! Contact-form submissions.
//!
//! A [`Submission`] is exactly what the visitor sent: every field optional,
//! nothing trimmed. [`ValidSubmission`] is only obtainable through
//! [`ValidSubmission::try_from`], so composing an email from unchecked
//! input does not type-check.

use serde::Deserialize;

use crate::error::ContactError;
use crate::validate::validate;

/// Raw form payload. Field names follow the page's form (`weddingDate`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
    pub service: Option<String>,
    pub wedding_date: Option<String>,
}

/// A submission that passed [`validate`].
///
/// Required fields are unwrapped; optional fields are `None` when absent or
/// blank. Values are otherwise kept as sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidSubmission {
    pub name: String,
    pub email: String,
    pub message: String,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub service: Option<String>,
    pub wedding_date: Option<String>,
}

impl ValidSubmission {
    /// The domain part of the submitter's address, for logging without
    /// recording the full address.
    pub fn email_domain(&self) -> &str {
        self.email
            .rsplit_once('@')
            .map_or("", |(_, domain)| domain)
    }
}

impl TryFrom<Submission> for ValidSubmission {
    type Error = ContactError;

    fn try_from(submission: Submission) -> Result<Self, Self::Error> {
        let errors = validate(&submission);
        if !errors.is_empty() {
            return Err(ContactError::Invalid { errors });
        }

        let Submission {
            name,
            email,
            phone,
            subject,
            message,
            service,
            wedding_date,
        } = submission;

        Ok(Self {
            name: name.unwrap_or_default(),
            email: email.unwrap_or_default(),
            message: message.unwrap_or_default(),
            phone: non_blank(phone),
            subject: non_blank(subject),
            service: non_blank(service),
            wedding_date: non_blank(wedding_date),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn valid() -> Submission {
        Submission {
            name: Some("Anna".to_owned()),
            email: Some("anna@example.com".to_owned()),
            message: Some("We are getting married in June!".to_owned()),
            ..Submission::default()
        }
    }

    #[test]
    fn deserializes_camel_case_fields() {
        let json = r#"{"name":"Anna","weddingDate":"2027-06-12","service":"Bridal trial"}"#;
        let submission: Submission = serde_json::from_str(json).unwrap();
        assert_eq!(submission.wedding_date.as_deref(), Some("2027-06-12"));
        assert_eq!(submission.service.as_deref(), Some("Bridal trial"));
        assert_eq!(submission.email, None);
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let json = r#"{"name":"Anna","website":"spam"}"#;
        let submission: Submission = serde_json::from_str(json).unwrap();
        assert_eq!(submission.name.as_deref(), Some("Anna"));
    }

    #[test]
    fn try_from_keeps_values_and_drops_blank_optionals() {
        let mut submission = valid();
        submission.phone = Some("   ".to_owned());
        submission.subject = Some("Trial run".to_owned());

        let checked = ValidSubmission::try_from(submission).unwrap();
        assert_eq!(checked.name, "Anna");
        assert_eq!(checked.phone, None);
        assert_eq!(checked.subject.as_deref(), Some("Trial run"));
    }

    #[test]
    fn try_from_rejects_invalid() {
        let submission = Submission {
            name: Some("A".to_owned()),
            ..valid()
        };
        let result = ValidSubmission::try_from(submission);
        assert!(matches!(result, Err(ContactError::Invalid { ref errors }) if errors.len() == 1));
    }

    #[test]
    fn email_domain_extracts_host() {
        let checked = ValidSubmission::try_from(valid()).unwrap();
        assert_eq!(checked.email_domain(), "example.com");
    }
}
