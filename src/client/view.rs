//! Terminal rendering of vault lists and action feedback.
//!
//! Every user-supplied string passes through [`sanitize`] before it is printed, so a
//! stored name cannot smuggle terminal escape sequences onto the operator's screen.

use std::borrow::Cow;
use std::fmt::{self, Write as _};

use chrono::Local;

use super::ClientError;
use crate::models::{api_key::ApiKeyResponse, hackathon::HackathonRecord};

pub const NO_KEYS: &str = "No API keys stored yet. Add your first one above!";
pub const NO_HACKATHONS: &str = "No hackathons saved yet.";

/// Escape control characters (ESC, CR, BEL, ...) as `\u{..}`.
///
/// Newlines and tabs are escaped too; a record always renders on its own lines.
pub fn sanitize(text: &str) -> Cow<'_, str> {
    if !text.chars().any(char::is_control) {
        return Cow::Borrowed(text);
    }

    let mut escaped = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        if c.is_control() {
            escaped.extend(c.escape_unicode());
        } else {
            escaped.push(c);
        }
    }
    Cow::Owned(escaped)
}

/// Placeholder for empty optional fields. Display only; never sent back.
pub fn display_or_na(value: &str) -> Cow<'_, str> {
    if value.trim().is_empty() {
        Cow::Borrowed("N/A")
    } else {
        sanitize(value)
    }
}

/// Render the full API key list.
pub fn render_api_keys(keys: &[ApiKeyResponse]) -> String {
    if keys.is_empty() {
        return NO_KEYS.to_string();
    }

    let mut out = String::new();
    for key in keys {
        let _ = writeln!(out, "{}  ({})", sanitize(&key.name), key.id);
        let _ = writeln!(
            out,
            "  added: {}",
            key.created_at.with_timezone(&Local).format("%Y-%m-%d %H:%M")
        );
        if !key.description.is_empty() {
            let _ = writeln!(out, "  {}", sanitize(&key.description));
        }
        let _ = writeln!(out, "  key:   {}", sanitize(&key.api_key));
        out.push('\n');
    }
    out.truncate(out.trim_end().len());
    out
}

/// Render the full hackathon list.
pub fn render_hackathons(hackathons: &[HackathonRecord]) -> String {
    if hackathons.is_empty() {
        return NO_HACKATHONS.to_string();
    }

    let mut out = String::new();
    for hackathon in hackathons {
        let _ = writeln!(
            out,
            "{}  ({})",
            sanitize(&hackathon.fields.hackathon_name),
            hackathon.id
        );
        for (label, value) in hackathon.fields.optional_fields() {
            let _ = writeln!(out, "  {:<22} {}", format!("{label}:"), display_or_na(value));
        }
        out.push('\n');
    }
    out.truncate(out.trim_end().len());
    out
}

/// Outcome of an operator action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    Success(String),
    Error(String),
}

impl Feedback {
    pub fn success(text: impl Into<String>) -> Self {
        Feedback::Success(text.into())
    }

    /// Short message for a failed action.
    ///
    /// Server-provided messages are shown as-is; transport failures collapse to
    /// `fallback`.
    pub fn failure(fallback: &str, error: &ClientError) -> Self {
        let text = match error {
            ClientError::Api { message, .. } => message.clone(),
            ClientError::Validation(message) => message.clone(),
            ClientError::Http(_) | ClientError::InvalidUrl(_) => fallback.to_string(),
        };
        Feedback::Error(text)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Feedback::Error(_))
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Feedback::Success(text) => write!(f, "✔ {}", sanitize(text)),
            Feedback::Error(text) => write!(f, "✖ {}", sanitize(text)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::hackathon::HackathonFields;
    use chrono::Utc;
    use reqwest::StatusCode;
    use uuid::Uuid;

    #[test]
    fn test_sanitize_escapes_control_characters() {
        assert_eq!(sanitize("plain text"), "plain text");
        assert_eq!(sanitize("\u{1b}[31mred"), "\\u{1b}[31mred");
        assert_eq!(sanitize("a\nb"), "a\\u{a}b");
        assert!(matches!(sanitize("ok"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_empty_fields_display_na() {
        assert_eq!(display_or_na(""), "N/A");
        assert_eq!(display_or_na("  "), "N/A");
        assert_eq!(display_or_na("Online"), "Online");
    }

    #[test]
    fn test_empty_lists_show_placeholder() {
        assert_eq!(render_api_keys(&[]), NO_KEYS);
        assert_eq!(render_hackathons(&[]), NO_HACKATHONS);
    }

    #[test]
    fn test_render_api_keys() {
        let key = ApiKeyResponse {
            id: Uuid::nil(),
            name: "Open\u{1b}AI".to_string(),
            description: String::new(),
            api_key: "sk-test-123".to_string(),
            created_at: Utc::now(),
        };

        let rendered = render_api_keys(&[key]);

        assert!(rendered.contains("Open\\u{1b}AI"));
        assert!(!rendered.contains('\u{1b}'));
        assert!(rendered.contains("key:   sk-test-123"));
    }

    #[test]
    fn test_render_hackathons_uses_na_for_display_only() {
        let now = Utc::now();
        let record = HackathonRecord {
            id: Uuid::nil(),
            fields: HackathonFields::named("HackX"),
            created_at: now,
            updated_at: now,
        };

        let rendered = render_hackathons(std::slice::from_ref(&record));

        assert!(rendered.starts_with("HackX"));
        assert!(rendered.contains("Organizer:"));
        assert!(rendered.contains("N/A"));
        assert_eq!(record.fields.organizer, "");
    }

    #[test]
    fn test_feedback_messages() {
        let api = ClientError::Api {
            status: StatusCode::BAD_REQUEST,
            message: "Name and API key are required".to_string(),
        };

        let feedback = Feedback::failure("Failed to add API key", &api);
        assert!(feedback.is_error());
        assert_eq!(feedback.to_string(), "✖ Name and API key are required");

        assert_eq!(
            Feedback::success("API key added successfully!").to_string(),
            "✔ API key added successfully!"
        );
    }
}
