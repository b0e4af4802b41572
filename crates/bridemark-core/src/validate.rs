//! Contact-form field constraints.
//!
//! The contract is the strict one: name, email, and message are all
//! required; phone and the remaining fields are free text. Lengths are
//! measured on trimmed input, in characters.

use std::sync::LazyLock;

use regex::Regex;

use crate::submission::Submission;

/// Minimum trimmed length of the name field.
pub const MIN_NAME_CHARS: usize = 2;
/// Minimum trimmed length of the message field.
pub const MIN_MESSAGE_CHARS: usize = 10;

pub const NAME_ERROR: &str = "Name must be at least 2 characters long";
pub const EMAIL_ERROR: &str = "Valid email is required";
pub const MESSAGE_ERROR: &str = "Message must be at least 10 characters long";

#[allow(clippy::expect_used)]
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^[^\s@,;:<>()\[\]\\"]+@[^\s@,;:<>()\[\]\\"]+\.[^\s@,;:<>()\[\]\\"]+$"#)
        .expect("email pattern is a valid regex")
});

/// Check a submission and return every violated constraint.
///
/// An empty vector means the submission is valid. Errors are ordered name,
/// email, message.
pub fn validate(submission: &Submission) -> Vec<String> {
    let mut errors = Vec::new();

    if trimmed_chars(submission.name.as_deref()) < MIN_NAME_CHARS {
        errors.push(NAME_ERROR.to_owned());
    }

    if !submission.email.as_deref().is_some_and(is_valid_email) {
        errors.push(EMAIL_ERROR.to_owned());
    }

    if trimmed_chars(submission.message.as_deref()) < MIN_MESSAGE_CHARS {
        errors.push(MESSAGE_ERROR.to_owned());
    }

    errors
}

/// `local@domain.tld`-shaped check. Address-list and comment punctuation
/// (`,;:<>()[]\"`) is refused since mail headers cannot carry it unquoted.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

fn trimmed_chars(value: Option<&str>) -> usize {
    value.map_or(0, |v| v.trim().chars().count())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> Submission {
        Submission {
            name: Some("Anna".to_owned()),
            email: Some("anna@example.com".to_owned()),
            message: Some("Looking for a bridal trial in May.".to_owned()),
            ..Submission::default()
        }
    }

    #[test]
    fn valid_submission_has_no_errors() {
        assert!(validate(&valid()).is_empty());
    }

    #[test]
    fn short_names_are_rejected() {
        for name in [None, Some(""), Some("J"), Some("  J  "), Some("     ")] {
            let submission = Submission {
                name: name.map(str::to_owned),
                ..valid()
            };
            assert_eq!(validate(&submission), vec![NAME_ERROR], "name = {name:?}");
        }
    }

    #[test]
    fn two_character_name_is_enough() {
        let submission = Submission {
            name: Some("Jo".to_owned()),
            ..valid()
        };
        assert!(validate(&submission).is_empty());
    }

    #[test]
    fn name_length_counts_characters_not_bytes() {
        let submission = Submission {
            name: Some("Ző".to_owned()),
            ..valid()
        };
        assert!(validate(&submission).is_empty());

        let submission = Submission {
            name: Some("é".to_owned()),
            ..valid()
        };
        assert_eq!(validate(&submission), vec![NAME_ERROR]);
    }

    #[test]
    fn invalid_emails_are_rejected() {
        for email in [
            None,
            Some(""),
            Some("anna"),
            Some("anna@example"),
            Some("@example.com"),
            Some("anna@.com"),
            Some("an na@example.com"),
            Some("anna@@example.com"),
            Some(" anna@example.com"),
            Some("anna,smith@example.com"),
            Some("anna<x>@example.com"),
            Some("ann(a)@example.com"),
            Some("anna;x@example.com"),
            Some("\"anna\"@example.com"),
        ] {
            let submission = Submission {
                email: email.map(str::to_owned),
                ..valid()
            };
            assert_eq!(validate(&submission), vec![EMAIL_ERROR], "email = {email:?}");
        }
    }

    #[test]
    fn plausible_emails_are_accepted() {
        for email in ["a@b.co", "first.last+tag@mail.example.org", "x@y.z"] {
            assert!(is_valid_email(email), "{email}");
        }
    }

    #[test]
    fn short_messages_are_rejected() {
        for message in [None, Some(""), Some("Hi there"), Some("   123456789   ")] {
            let submission = Submission {
                message: message.map(str::to_owned),
                ..valid()
            };
            assert_eq!(validate(&submission), vec![MESSAGE_ERROR], "message = {message:?}");
        }
    }

    #[test]
    fn ten_character_message_is_enough() {
        let submission = Submission {
            message: Some("1234567890".to_owned()),
            ..valid()
        };
        assert!(validate(&submission).is_empty());
    }

    #[test]
    fn phone_is_optional() {
        let submission = Submission {
            phone: None,
            ..valid()
        };
        assert!(validate(&submission).is_empty());
    }

    #[test]
    fn name_and_phone_only_reports_email_and_message() {
        let submission = Submission {
            name: Some("Jo".to_owned()),
            phone: Some("5551234".to_owned()),
            ..Submission::default()
        };
        assert_eq!(validate(&submission), vec![EMAIL_ERROR, MESSAGE_ERROR]);
    }

    #[test]
    fn empty_submission_reports_all_in_order() {
        assert_eq!(
            validate(&Submission::default()),
            vec![NAME_ERROR, EMAIL_ERROR, MESSAGE_ERROR]
        );
    }
}
