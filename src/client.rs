use crate::config::WidgetConfig;
use crate::error::{ClientError, ClientResult};
use crate::types::{ChatReply, ChatRequest, DocumentListing, HealthReply, ReloadReply};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, header};
use serde::de::DeserializeOwned;

/// The remote half of the widget: every network call the controller makes.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait ChatBackend: Send + Sync {
    /// `POST /chat` with `{ "message": ... }`.
    async fn chat(&self, message: &str) -> ClientResult<ChatReply>;

    /// `POST /clear`; any success status counts, the body is ignored.
    async fn clear(&self) -> ClientResult<()>;

    /// `POST /reload`, returning the server's fresh document listing.
    async fn reload(&self) -> ClientResult<DocumentListing>;

    /// `GET /health`.
    async fn health(&self) -> ClientResult<bool>;
}

pub struct HttpBackend {
    client: Client,
    config: WidgetConfig,
}

impl HttpBackend {
    pub fn new(config: WidgetConfig) -> ClientResult<Self> {
        Ok(Self {
            client: build_client(&config)?,
            config,
        })
    }

    fn post(&self, path: &str) -> RequestBuilder {
        self.client
            .post(self.config.endpoint(path))
            .header(header::CONTENT_TYPE, "application/json")
    }

    async fn execute(&self, request: RequestBuilder) -> ClientResult<(u16, String)> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        Ok((status.as_u16(), body))
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn build_client(config: &WidgetConfig) -> ClientResult<Client> {
    // The backend keeps the conversation in a cookie session.
    let mut builder = Client::builder().cookie_store(true);
    if let Some(timeout) = config.request_timeout {
        builder = builder.timeout(timeout);
    }
    Ok(builder.build()?)
}

#[cfg(target_arch = "wasm32")]
fn build_client(_config: &WidgetConfig) -> ClientResult<Client> {
    Ok(Client::builder().build()?)
}

/// Checks the status before touching the body; any non-2xx is a failure.
pub fn decode_body<T: DeserializeOwned>(status: u16, body: &str) -> ClientResult<T> {
    ensure_success(status)?;
    Ok(serde_json::from_str(body)?)
}

pub fn ensure_success(status: u16) -> ClientResult<()> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(ClientError::Status(status))
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl ChatBackend for HttpBackend {
    async fn chat(&self, message: &str) -> ClientResult<ChatReply> {
        tracing::debug!(len = message.len(), "dispatching chat request");
        let request = self.post("chat").json(&ChatRequest { message });
        let (status, body) = self.execute(request).await?;
        decode_body(status, &body)
    }

    async fn clear(&self) -> ClientResult<()> {
        let (status, _) = self.execute(self.post("clear")).await?;
        ensure_success(status)
    }

    async fn reload(&self) -> ClientResult<DocumentListing> {
        let (status, body) = self.execute(self.post("reload")).await?;
        decode_body::<ReloadReply>(status, &body).map(DocumentListing::from)
    }

    async fn health(&self) -> ClientResult<bool> {
        let request = self.client.get(self.config.endpoint("health"));
        let (status, body) = self.execute(request).await?;
        decode_body::<HealthReply>(status, &body).map(|reply| reply.is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_success_bodies() {
        let reply: ChatReply =
            decode_body(200, r#"{"response":"Buy low.","doc_count":3}"#).expect("decode");
        assert_eq!(reply.response, "Buy low.");
        assert_eq!(reply.doc_count, Some(3));
    }

    #[test]
    fn non_success_status_is_a_failure_even_with_a_valid_body() {
        let err = decode_body::<ChatReply>(400, r#"{"response":"x"}"#).unwrap_err();
        assert!(matches!(err, ClientError::Status(400)));
        assert!(matches!(ensure_success(500), Err(ClientError::Status(500))));
        assert!(ensure_success(204).is_ok());
    }

    #[test]
    fn malformed_body_is_a_decode_failure() {
        let err = decode_body::<ChatReply>(200, "<html>oops</html>").unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));

        let err = decode_body::<ChatReply>(200, r#"{"error":"Empty message"}"#).unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));
    }

    #[test]
    fn health_status_is_case_insensitive() {
        let reply: HealthReply = decode_body(200, r#"{"status":"OK"}"#).expect("decode");
        assert!(reply.is_ok());
    }

    #[test]
    fn builds_client_from_config() {
        let backend = HttpBackend::new(WidgetConfig::default());
        assert!(backend.is_ok());
    }
}
