use async_trait::async_trait;

use crate::domain::ticket::RawResponse;
use crate::error::AppResult;

/// Table API access for a single change-request table.
///
/// Implementations report transport-level failures as errors and hand back
/// successful responses untouched.
#[async_trait]
pub trait TicketConnector: Send + Sync {
    async fn get(&self) -> AppResult<RawResponse>;
    async fn post(&self) -> AppResult<RawResponse>;
}
