use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdapterStatus {
    Online,
    Offline,
}

impl AdapterStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdapterStatus::Online => "ONLINE",
            AdapterStatus::Offline => "OFFLINE",
        }
    }
}

/// Payload published with every status change; identifies the adapter instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusEvent {
    pub id: String,
}
