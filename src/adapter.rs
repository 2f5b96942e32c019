use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::domain::normalize::{normalize_list, normalize_one};
use crate::domain::status::{AdapterStatus, StatusEvent};
use crate::domain::ticket::TicketSummary;
use crate::error::AppResult;
use crate::events::StatusPublisher;
use crate::services::TicketConnector;

/// ServiceNow change-request adapter as seen by the orchestration platform.
///
/// Wraps a [`TicketConnector`] and reshapes its responses into
/// [`TicketSummary`] records. Status changes go out through the shared
/// [`StatusPublisher`] tagged with the adapter id.
pub struct ServiceNowAdapter {
    id: String,
    connector: Arc<dyn TicketConnector>,
    publisher: Arc<StatusPublisher>,
}

impl ServiceNowAdapter {
    pub fn new(
        id: impl Into<String>,
        connector: Arc<dyn TicketConnector>,
        publisher: Arc<StatusPublisher>,
    ) -> Self {
        Self {
            id: id.into(),
            connector,
            publisher,
        }
    }

    pub async fn connect(&self) -> AdapterStatus {
        self.healthcheck().await
    }

    /// Probes the instance once and announces the outcome.
    #[instrument(skip(self), fields(adapter = %self.id))]
    pub async fn healthcheck(&self) -> AdapterStatus {
        match self.connector.get().await {
            Ok(_) => self.emit_online(),
            Err(err) => {
                warn!(error = %err, "ServiceNow healthcheck failed");
                self.emit_offline()
            }
        }
    }

    /// Lists change requests from the configured table.
    #[instrument(skip(self), fields(adapter = %self.id))]
    pub async fn get_record(&self) -> AppResult<Vec<TicketSummary>> {
        let response = self.connector.get().await?;
        Ok(normalize_list(&response)?)
    }

    /// Creates a change request and returns its summary.
    #[instrument(skip(self), fields(adapter = %self.id))]
    pub async fn post_record(&self) -> AppResult<TicketSummary> {
        let response = self.connector.post().await?;
        Ok(normalize_one(&response)?)
    }

    fn emit_online(&self) -> AdapterStatus {
        self.emit_status(AdapterStatus::Online);
        info!("ServiceNow: Instance is available.");
        AdapterStatus::Online
    }

    fn emit_offline(&self) -> AdapterStatus {
        self.emit_status(AdapterStatus::Offline);
        warn!("ServiceNow: Instance is unavailable.");
        AdapterStatus::Offline
    }

    fn emit_status(&self, status: AdapterStatus) {
        let event = StatusEvent {
            id: self.id.clone(),
        };
        self.publisher.publish(status, &event);
    }
}
