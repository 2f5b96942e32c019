use crate::context::AppContext;
use crate::error::AppResult;

/// Lists change requests and renders them as a JSON array.
pub async fn run_get(ctx: &AppContext) -> AppResult<String> {
    let tickets = ctx.adapter().get_record().await?;
    Ok(serde_json::to_string_pretty(&tickets)?)
}

/// Creates a change request and renders its summary as a JSON object.
pub async fn run_post(ctx: &AppContext) -> AppResult<String> {
    let ticket = ctx.adapter().post_record().await?;
    Ok(serde_json::to_string_pretty(&ticket)?)
}
