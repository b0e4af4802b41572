//! HTML email composition.
//!
//! Turns a [`ValidSubmission`] into the inquiry sent to the studio inbox
//! and, when enabled, a confirmation sent back to the visitor. Every
//! user-supplied value is HTML-escaped before it is embedded; free-text
//! fields then have their line breaks rendered as `<br>`.

use std::fmt::Write as _;

use bridemark_mail::Email;

use crate::submission::ValidSubmission;

pub const CONFIRMATION_SUBJECT: &str = "Thank you for contacting us";

/// Addresses and switches the composer needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailSettings {
    /// Service identity used as `From` on every email.
    pub sender: String,
    /// Inbox that receives inquiries.
    pub recipient: String,
    /// Whether to send the visitor a confirmation copy.
    pub send_confirmation: bool,
}

/// The emails produced for one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedMail {
    pub inquiry: Email,
    pub confirmation: Option<Email>,
}

/// Compose the inquiry and optional confirmation for a submission.
pub fn compose(submission: &ValidSubmission, settings: &MailSettings) -> ComposedMail {
    let confirmation = settings
        .send_confirmation
        .then(|| confirmation(submission, settings));

    ComposedMail {
        inquiry: inquiry(submission, settings),
        confirmation,
    }
}

/// The email delivered to the studio inbox.
pub fn inquiry(submission: &ValidSubmission, settings: &MailSettings) -> Email {
    let subject = submission.subject.clone().unwrap_or_else(|| {
        format!("New Contact Form Submission from {}", submission.name.trim())
    });

    let mut html = String::from("<h2>New Contact Form Submission</h2>\n");
    push_row(&mut html, "Name", &submission.name);
    push_row(&mut html, "Email", &submission.email);
    if let Some(phone) = &submission.phone {
        push_row(&mut html, "Phone", phone);
    }
    if let Some(service) = &submission.service {
        push_row(&mut html, "Service", service);
    }
    if let Some(date) = &submission.wedding_date {
        push_row(&mut html, "Wedding Date", date);
    }
    push_row(
        &mut html,
        "Subject",
        submission.subject.as_deref().unwrap_or("No subject"),
    );
    html.push_str("<hr>\n<p><strong>Message:</strong></p>\n");
    let _ = writeln!(html, "<p>{}</p>", text_to_html(&submission.message));

    Email {
        from: settings.sender.clone(),
        to: settings.recipient.clone(),
        reply_to: Some(submission.email.clone()),
        subject,
        html,
    }
}

/// The copy delivered back to the visitor.
pub fn confirmation(submission: &ValidSubmission, settings: &MailSettings) -> Email {
    let mut html = String::from("<h2>Thank you for reaching out!</h2>\n");
    let _ = writeln!(html, "<p>Hi {},</p>", escape_html(&submission.name));
    html.push_str(
        "<p>We've received your message and will get back to you as soon as possible.</p>\n",
    );
    html.push_str("<hr>\n<p><em>Your message:</em></p>\n");
    let _ = writeln!(html, "<p>{}</p>", text_to_html(&submission.message));

    Email {
        from: settings.sender.clone(),
        to: submission.email.clone(),
        reply_to: None,
        subject: CONFIRMATION_SUBJECT.to_owned(),
        html,
    }
}

fn push_row(html: &mut String, label: &str, value: &str) {
    let _ = writeln!(html, "<p><strong>{label}:</strong> {}</p>", escape_html(value));
}

/// Escape the five HTML-significant characters.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape free text and render its line breaks.
///
/// `\r\n` and `\n` both become `<br>`.
pub fn text_to_html(input: &str) -> String {
    escape_html(input).replace("\r\n", "\n").replace('\n', "<br>")
}
