//! Confirmation sender that appends messages to a JSON-lines outbox file.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use crate::collaborators::{ConfirmationDetails, ConfirmationSender, Delivery};
use crate::error::NotifyError;

/// Writes each confirmation as one JSON line for a mailer to pick up.
///
/// Without an outbox path the sender is unconfigured and every send is
/// [`Delivery::Skipped`].
#[derive(Debug, Clone, Default)]
pub struct OutboxSender {
    outbox: Option<PathBuf>,
}

impl OutboxSender {
    pub fn new(outbox: Option<PathBuf>) -> Self {
        Self { outbox }
    }
}

impl ConfirmationSender for OutboxSender {
    fn send_confirmation(&self, details: &ConfirmationDetails) -> Result<Delivery, NotifyError> {
        let Some(path) = &self.outbox else {
            tracing::warn!(to = %details.to_email, "confirmation outbox not configured, message not sent");
            return Ok(Delivery::Skipped);
        };

        let mut line = serde_json::to_string(details)?;
        line.push('\n');

        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        file.write_all(line.as_bytes())?;

        tracing::info!(to = %details.to_email, outbox = %path.display(), "confirmation queued");
        Ok(Delivery::Sent)
    }
}
