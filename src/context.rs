use std::sync::Arc;

use crate::adapter::ServiceNowAdapter;
use crate::config::AppConfig;
use crate::events::StatusPublisher;
use crate::services::TicketConnector;

#[derive(Clone)]
pub struct AppContext {
    pub config: AppConfig,
    pub connector: Arc<dyn TicketConnector>,
    pub publisher: Arc<StatusPublisher>,
}

impl AppContext {
    pub fn new(
        config: AppConfig,
        connector: Arc<dyn TicketConnector>,
        publisher: Arc<StatusPublisher>,
    ) -> Self {
        Self {
            config,
            connector,
            publisher,
        }
    }

    pub fn adapter(&self) -> ServiceNowAdapter {
        ServiceNowAdapter::new(
            self.config.adapter_id.clone(),
            Arc::clone(&self.connector),
            Arc::clone(&self.publisher),
        )
    }
}
