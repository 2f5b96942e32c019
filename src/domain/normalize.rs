use serde_json::Value;
use tracing::debug;

use crate::domain::ticket::{RawResponse, TicketSummary};
use crate::error::NormalizationError;

const RESULT_FIELD: &str = "result";

/// Maps every record of a table listing to a [`TicketSummary`], keeping input order.
pub fn normalize_list(raw: &RawResponse) -> Result<Vec<TicketSummary>, NormalizationError> {
    let records = match result_field(raw)? {
        Value::Array(records) => records,
        other => {
            return Err(NormalizationError::MalformedResponse(format!(
                "`{RESULT_FIELD}` must be a list, found {}",
                kind_of(&other)
            )));
        }
    };

    let tickets = records
        .into_iter()
        .enumerate()
        .map(|(index, record)| summarize(index, record))
        .collect::<Result<Vec<_>, _>>()?;

    debug!(
        status = raw.status_code,
        records = tickets.len(),
        "normalized ticket listing"
    );
    Ok(tickets)
}

/// Maps the first record of a response to a [`TicketSummary`].
///
/// ServiceNow answers a create call with `result` holding the new record as a
/// bare object; that form counts as a single-record list.
pub fn normalize_one(raw: &RawResponse) -> Result<TicketSummary, NormalizationError> {
    let first = match result_field(raw)? {
        Value::Array(records) => records
            .into_iter()
            .next()
            .ok_or(NormalizationError::EmptyResult)?,
        record @ Value::Object(_) => record,
        other => {
            return Err(NormalizationError::MalformedResponse(format!(
                "`{RESULT_FIELD}` must be a record or a list, found {}",
                kind_of(&other)
            )));
        }
    };

    let ticket = summarize(0, first)?;
    debug!(status = raw.status_code, "normalized created ticket");
    Ok(ticket)
}

fn result_field(raw: &RawResponse) -> Result<Value, NormalizationError> {
    let body = raw.body.as_deref().ok_or_else(|| {
        NormalizationError::MalformedResponse("response has no body".to_string())
    })?;

    let payload: Value = serde_json::from_str(body).map_err(|err| {
        NormalizationError::MalformedResponse(format!("body is not valid JSON: {err}"))
    })?;

    match payload {
        Value::Object(mut fields) => fields
            .remove(RESULT_FIELD)
            .ok_or(NormalizationError::MissingField(RESULT_FIELD)),
        other => Err(NormalizationError::MalformedResponse(format!(
            "body must be a JSON object, found {}",
            kind_of(&other)
        ))),
    }
}

fn summarize(index: usize, record: Value) -> Result<TicketSummary, NormalizationError> {
    let mut fields = match record {
        Value::Object(fields) => fields,
        other => {
            return Err(NormalizationError::MalformedResponse(format!(
                "record {index} must be an object, found {}",
                kind_of(&other)
            )));
        }
    };

    Ok(TicketSummary {
        change_ticket_number: fields.remove("number"),
        active: fields.remove("active"),
        priority: fields.remove("priority"),
        description: fields.remove("description"),
        work_start: fields.remove("work_start"),
        work_end: fields.remove("work_end"),
        change_ticket_key: fields.remove("sys_id"),
    })
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
