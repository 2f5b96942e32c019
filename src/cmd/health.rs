use serde::Serialize;

use crate::context::AppContext;
use crate::domain::status::{AdapterStatus, StatusEvent};

#[derive(Serialize)]
struct StatusLine<'a> {
    event: &'static str,
    id: &'a str,
}

/// Runs one healthcheck, echoing every published status event to stdout.
pub async fn run(ctx: &AppContext) -> AdapterStatus {
    for status in [AdapterStatus::Online, AdapterStatus::Offline] {
        ctx.publisher.subscribe(status, move |event| {
            println!("{}", status_line(status, event));
        });
    }

    ctx.adapter().connect().await
}

fn status_line(status: AdapterStatus, event: &StatusEvent) -> String {
    let line = StatusLine {
        event: status.as_str(),
        id: &event.id,
    };
    serde_json::to_string(&line).unwrap_or_else(|_| format!("{} {}", status.as_str(), event.id))
}
