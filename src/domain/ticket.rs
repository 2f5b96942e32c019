use serde::Serialize;
use serde_json::Value;

/// Status line and body text of a ServiceNow table API call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status_code: u16,
    pub body: Option<String>,
}

impl RawResponse {
    pub fn new(status_code: u16, body: impl Into<String>) -> Self {
        Self {
            status_code,
            body: Some(body.into()),
        }
    }
}

/// Minimal view of a change request.
///
/// Values are carried over untouched from the ServiceNow record, so they keep
/// whatever JSON type the instance returned. Fields the record did not carry
/// are left out when serialized.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TicketSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_ticket_number: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_start: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_end: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_ticket_key: Option<Value>,
}
