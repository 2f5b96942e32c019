use async_trait::async_trait;
use base64::prelude::{BASE64_STANDARD, Engine as _};
use reqwest::{
    Client, RequestBuilder, Response,
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
};
use tracing::debug;

use crate::domain::ticket::RawResponse;
use crate::error::{AppError, AppResult};
use crate::services::TicketConnector;

const HIBERNATION_MARKER: &str = "Instance Hibernating page";
const EMPTY_RECORD: &str = "{}";

pub struct ServiceNowClient {
    http: Client,
    base_url: Option<String>,
    username: Option<String>,
    password: Option<String>,
    table: String,
}

impl ServiceNowClient {
    pub fn new(
        base_url: Option<String>,
        username: Option<String>,
        password: Option<String>,
        table: String,
    ) -> Self {
        Self {
            http: Client::new(),
            base_url,
            username,
            password,
            table,
        }
    }

    fn api_details(&self) -> AppResult<(&str, &str, &str)> {
        let base_url = self.base_url.as_deref().ok_or_else(|| {
            AppError::Configuration("ServiceNow instance URL not configured".to_string())
        })?;
        let username = self.username.as_deref().ok_or_else(|| {
            AppError::Configuration("ServiceNow username not configured".to_string())
        })?;
        let password = self.password.as_deref().ok_or_else(|| {
            AppError::Configuration("ServiceNow password not configured".to_string())
        })?;
        Ok((base_url, username, password))
    }

    fn auth_header(username: &str, password: &str) -> String {
        let credentials = format!("{username}:{password}");
        let encoded = BASE64_STANDARD.encode(credentials);
        format!("Basic {encoded}")
    }

    fn table_endpoint(base_url: &str, table: &str) -> String {
        format!(
            "{}/api/now/table/{}",
            base_url.trim_end_matches('/'),
            table.trim_matches('/')
        )
    }

    fn request(
        &self,
        build: impl FnOnce(&Client, String) -> RequestBuilder,
    ) -> AppResult<RequestBuilder> {
        let (base_url, username, password) = self.api_details()?;
        let endpoint = Self::table_endpoint(base_url, &self.table);
        Ok(build(&self.http, endpoint)
            .header(AUTHORIZATION, Self::auth_header(username, password))
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json"))
    }

    async fn send(request: RequestBuilder) -> AppResult<RawResponse> {
        let response = request
            .send()
            .await
            .map_err(|err| AppError::Transport(format!("failed to call ServiceNow: {err}")))?;
        Self::process_response(response).await
    }

    async fn process_response(response: Response) -> AppResult<RawResponse> {
        let status = response.status();
        let body = response.text().await.map_err(|err| {
            AppError::Transport(format!("failed to read ServiceNow response: {err}"))
        })?;

        if status.as_u16() == 200 && body.contains(HIBERNATION_MARKER) {
            return Err(AppError::Transport(
                "ServiceNow instance is hibernating".to_string(),
            ));
        }
        if !status.is_success() {
            return Err(AppError::Transport(format!(
                "ServiceNow responded with {status}: {body}"
            )));
        }

        debug!(
            status = status.as_u16(),
            bytes = body.len(),
            "ServiceNow call succeeded"
        );
        Ok(RawResponse::new(status.as_u16(), body))
    }
}

#[async_trait]
impl TicketConnector for ServiceNowClient {
    async fn get(&self) -> AppResult<RawResponse> {
        let request = self.request(|http, endpoint| {
            http.get(endpoint).query(&[("sysparm_limit", "1")])
        })?;
        Self::send(request).await
    }

    async fn post(&self) -> AppResult<RawResponse> {
        let request = self.request(|http, endpoint| http.post(endpoint).body(EMPTY_RECORD))?;
        Self::send(request).await
    }
}

#[cfg(test)]
mod tests {
    use mockito::{Matcher, Server};
    use serde_json::json;

    use super::*;

    fn client(base_url: String) -> ServiceNowClient {
        ServiceNowClient::new(
            Some(base_url),
            Some("admin".to_string()),
            Some("secret".to_string()),
            "change_request".to_string(),
        )
    }

    #[test]
    fn builds_table_endpoint() {
        assert_eq!(
            ServiceNowClient::table_endpoint("https://dev1.service-now.com/", "change_request"),
            "https://dev1.service-now.com/api/now/table/change_request"
        );
    }

    #[test]
    fn encodes_basic_auth() {
        assert_eq!(
            ServiceNowClient::auth_header("admin", "secret"),
            "Basic YWRtaW46c2VjcmV0"
        );
    }

    #[tokio::test]
    async fn get_requests_a_single_page() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/now/table/change_request")
            .match_query(Matcher::UrlEncoded("sysparm_limit".into(), "1".into()))
            .match_header("authorization", "Basic YWRtaW46c2VjcmV0")
            .match_header("accept", "application/json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"result":[]}"#)
            .create_async()
            .await;

        let response = client(server.url()).get().await.unwrap();

        mock.assert_async().await;
        assert_eq!(response, RawResponse::new(200, r#"{"result":[]}"#));
    }

    #[tokio::test]
    async fn post_creates_a_record() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/api/now/table/change_request")
            .match_header("authorization", "Basic YWRtaW46c2VjcmV0")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(json!({})))
            .with_status(201)
            .with_body(r#"{"result":{"number":"CHG0030001"}}"#)
            .create_async()
            .await;

        let response = client(server.url()).post().await.unwrap();

        mock.assert_async().await;
        assert_eq!(response.status_code, 201);
        assert_eq!(
            response.body.as_deref(),
            Some(r#"{"result":{"number":"CHG0030001"}}"#)
        );
    }

    #[tokio::test]
    async fn reports_hibernating_instance() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/now/table/change_request")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("<html><title>Instance Hibernating page</title></html>")
            .create_async()
            .await;

        let err = client(server.url()).get().await.unwrap_err();

        assert!(
            matches!(err, AppError::Transport(ref message) if message.contains("hibernating"))
        );
    }

    #[tokio::test]
    async fn maps_error_status_to_transport_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/now/table/change_request")
            .match_query(Matcher::Any)
            .with_status(401)
            .with_body(r#"{"error":{"message":"User Not Authenticated"}}"#)
            .create_async()
            .await;

        let err = client(server.url()).get().await.unwrap_err();

        match err {
            AppError::Transport(message) => {
                assert!(message.contains("401"));
                assert!(message.contains("User Not Authenticated"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_credentials_fail_before_any_request() {
        let client = ServiceNowClient::new(
            Some("https://dev1.service-now.com".to_string()),
            None,
            None,
            "change_request".to_string(),
        );

        let err = client.get().await.unwrap_err();

        assert!(matches!(err, AppError::Configuration(_)));
    }
}
