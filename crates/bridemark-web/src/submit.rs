//! Contact form submission: the payload sent to the API and how its
//! response maps onto an [`Outcome`].

use serde::{Deserialize, Serialize};

use crate::modal::Outcome;

pub const DEFAULT_ENDPOINT: &str = "/api/contact";

pub const THANK_YOU: &str = "Thank you for your inquiry! Regina will get back to you within 24 hours via WhatsApp or phone call.";
pub const GENERIC_FAILURE: &str = "We couldn't send your message. Please try again later.";
pub const CONNECTION_FAILURE: &str = "We couldn't reach the server. Please check your connection, or contact Regina directly via WhatsApp or phone.";

/// Form fields as posted to the contact API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactPayload {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wedding_date: Option<String>,
    pub message: String,
}

impl ContactPayload {
    /// Build from `(field name, value)` pairs, as read off a form.
    /// Unknown fields are ignored; blank optional fields are omitted.
    pub fn from_fields<'a, I>(fields: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, String)>,
    {
        let mut payload = Self::default();
        for (key, value) in fields {
            let optional = (!value.trim().is_empty()).then(|| value.clone());
            match key {
                "name" => payload.name = value,
                "email" => payload.email = value,
                "message" => payload.message = value,
                "phone" => payload.phone = optional,
                "subject" => payload.subject = optional,
                "service" => payload.service = optional,
                "weddingDate" | "wedding_date" | "date" => payload.wedding_date = optional,
                _ => {}
            }
        }
        payload
    }
}

#[derive(Debug, Default, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    success: bool,
    message: Option<String>,
    #[serde(default)]
    errors: Vec<String>,
}

/// Interpret an HTTP response from the contact API.
pub fn outcome_for(status: u16, body: &str) -> Outcome {
    let parsed: ApiResponse = serde_json::from_str(body).unwrap_or_default();
    match status {
        200..=299 if parsed.success => {
            Outcome::Success(parsed.message.unwrap_or_else(|| THANK_YOU.to_owned()))
        }
        _ if !parsed.errors.is_empty() => Outcome::Error(parsed.errors.join("\n")),
        _ => Outcome::Error(parsed.message.unwrap_or_else(|| GENERIC_FAILURE.to_owned())),
    }
}

/// Outcome when the request itself failed.
pub fn connection_failed(reason: &str) -> Outcome {
    tracing::warn!(%reason, "contact request failed before a response");
    Outcome::ConnectionError(CONNECTION_FAILURE.to_owned())
}
