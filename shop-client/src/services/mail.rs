//! Outgoing mail API

use shared::dto::MailPayload;
use shared::validation::{MAX_NAME_LEN, validate_email, validate_required_text};

use crate::{ApiClient, ClientResult};

pub struct MailService<'a> {
    api: &'a ApiClient,
}

impl<'a> MailService<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// Ask the backend to deliver a plain-text mail
    pub async fn send(&self, to: &str, subject: &str, body: &str) -> ClientResult<()> {
        validate_email(to, "to")?;
        validate_required_text(subject, "subject", MAX_NAME_LEN)?;

        let payload = MailPayload {
            to: to.trim().to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        };
        let _: serde_json::Value = self.api.post("/api/mail/send", &payload).await?;
        tracing::info!(to = %payload.to, subject = %payload.subject, "mail sent");
        Ok(())
    }
}
