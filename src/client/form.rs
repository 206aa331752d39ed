//! Hackathon form state.
//!
//! The form is either creating a new hackathon or editing an existing one. The mode
//! decides which request a submit sends and how the submit button is labelled.

use uuid::Uuid;

use super::{ClientError, VaultClient};
use crate::models::hackathon::{HackathonFields, HackathonRecord};

/// What a submit of the hackathon form does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormMode {
    #[default]
    Creating,
    Editing(Uuid),
}

impl FormMode {
    pub fn submit_label(&self) -> &'static str {
        match self {
            FormMode::Creating => "Add Hackathon",
            FormMode::Editing(_) => "Update Hackathon",
        }
    }

    pub fn success_message(&self) -> &'static str {
        match self {
            FormMode::Creating => "Hackathon added successfully!",
            FormMode::Editing(_) => "Hackathon updated successfully!",
        }
    }
}

/// The hackathon form: current mode plus the values being edited.
#[derive(Debug, Clone, Default)]
pub struct HackathonForm {
    mode: FormMode,
    pub fields: HackathonFields,
}

impl HackathonForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    /// Load a stored record for editing.
    pub fn edit(&mut self, record: &HackathonRecord) {
        self.mode = FormMode::Editing(record.id);
        self.fields = record.fields.clone();
    }

    /// Drop any edit in progress and return to an empty create form.
    pub fn cancel(&mut self) {
        *self = Self::default();
    }

    /// Send the form: create in `Creating` mode, update in `Editing` mode.
    ///
    /// On success the form resets to `Creating`. On failure the mode and values are
    /// kept so the operator can correct and resubmit.
    pub async fn submit(&mut self, client: &VaultClient) -> Result<HackathonRecord, ClientError> {
        if self.fields.hackathon_name.trim().is_empty() {
            return Err(ClientError::Validation(
                "Hackathon name is required".to_string(),
            ));
        }

        let record = match self.mode {
            FormMode::Creating => client.create_hackathon(&self.fields).await?,
            FormMode::Editing(id) => client.update_hackathon(id, &self.fields).await?,
        };

        self.cancel();
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn record(name: &str) -> HackathonRecord {
        let now = Utc::now();
        HackathonRecord {
            id: Uuid::new_v4(),
            fields: HackathonFields {
                location: "Online".to_string(),
                ..HackathonFields::named(name)
            },
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_new_form_creates() {
        let form = HackathonForm::new();

        assert_eq!(form.mode(), FormMode::Creating);
        assert_eq!(form.mode().submit_label(), "Add Hackathon");
    }

    #[test]
    fn test_edit_then_cancel() {
        let stored = record("HackX");
        let mut form = HackathonForm::new();

        form.edit(&stored);
        assert_eq!(form.mode(), FormMode::Editing(stored.id));
        assert_eq!(form.mode().submit_label(), "Update Hackathon");
        assert_eq!(form.fields.location, "Online");

        form.cancel();
        assert_eq!(form.mode(), FormMode::Creating);
        assert_eq!(form.fields, HackathonFields::default());
    }

    #[tokio::test]
    async fn test_blank_name_keeps_mode() {
        let stored = record("HackX");
        let client = VaultClient::new("http://127.0.0.1:9").unwrap();
        let mut form = HackathonForm::new();
        form.edit(&stored);
        form.fields.hackathon_name = " ".to_string();

        let result = form.submit(&client).await;

        assert!(matches!(result, Err(ClientError::Validation(_))));
        assert_eq!(form.mode(), FormMode::Editing(stored.id));
    }
}
