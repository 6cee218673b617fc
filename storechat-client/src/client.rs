//! Chat function client struct and builder.

use std::future::Future;
use std::time::Duration;

use reqwest::{Response, StatusCode};
use storechat_stream::{decode, decode_cancellable, decode_stream};
use storechat_types::{ChatError, ChatMessage, ChatRequest, ChatStream, ChatTransport, DeltaSink};
use tokio_util::sync::CancellationToken;

use crate::config::ChatConfig;
use crate::error::{map_http_status, map_reqwest_error};

/// Client for the hosted streaming chat function.
///
/// # Example
///
/// ```no_run
/// use storechat_client::ChatClient;
///
/// let client = ChatClient::new("https://xyz.supabase.co", "publishable-key")
///     .timeout(std::time::Duration::from_secs(60));
/// ```
pub struct ChatClient {
    /// Endpoint, key and timeout.
    pub(crate) config: ChatConfig,
    /// Shared HTTP client.
    pub(crate) client: reqwest::Client,
}

impl ChatClient {
    /// Create a client for `base_url` using the default function path.
    #[must_use]
    pub fn new(base_url: impl Into<String>, publishable_key: impl Into<String>) -> Self {
        Self::from_config(ChatConfig::new(base_url, publishable_key))
    }

    /// Create a client from a full configuration.
    #[must_use]
    pub fn from_config(config: ChatConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// Override the function path (default `/functions/v1/chat`).
    #[must_use]
    pub fn function_path(mut self, path: impl Into<String>) -> Self {
        self.config.function_path = path.into();
        self
    }

    /// Bound the whole request, response body included.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    /// Full URL the client posts to.
    pub fn chat_url(&self) -> String {
        self.config.endpoint()
    }

    /// Send `messages` and stream the reply into `sink`.
    ///
    /// A rejected status or a missing body is reported through
    /// [`DeltaSink::on_error`] and returns `Ok(())`. `Err` is returned only
    /// when no response was received at all; the sink is untouched then.
    pub async fn stream_chat<S>(&self, messages: &[ChatMessage], sink: &mut S) -> Result<(), ChatError>
    where
        S: DeltaSink + ?Sized,
    {
        let response = self.send(messages).await?;
        match accept(response).await {
            Ok(response) => decode(response.bytes_stream(), sink).await,
            Err(err) => sink.on_error(&err.to_string()),
        }
        Ok(())
    }

    /// Like [`stream_chat`](Self::stream_chat), but cancelling `token`
    /// aborts the request or the read and reports `stream cancelled`
    /// through the sink.
    pub async fn stream_chat_cancellable<S>(
        &self,
        messages: &[ChatMessage],
        sink: &mut S,
        token: &CancellationToken,
    ) -> Result<(), ChatError>
    where
        S: DeltaSink + ?Sized,
    {
        let Some(response) = token.run_until_cancelled(self.send(messages)).await else {
            sink.on_error(&ChatError::Cancelled.to_string());
            return Ok(());
        };
        match accept(response?).await {
            Ok(response) => decode_cancellable(response.bytes_stream(), sink, token).await,
            Err(err) => sink.on_error(&err.to_string()),
        }
        Ok(())
    }

    /// Send `messages` and return the reply as a [`ChatStream`] of events.
    ///
    /// Rejection and a missing body are returned as `Err` here, since no
    /// stream exists to carry them.
    pub async fn open_stream(&self, messages: &[ChatMessage]) -> Result<ChatStream, ChatError> {
        let response = self.send(messages).await?;
        let response = accept(response).await?;
        Ok(ChatStream {
            receiver: Box::pin(decode_stream(response.bytes_stream())),
        })
    }

    async fn send(&self, messages: &[ChatMessage]) -> Result<Response, ChatError> {
        let url = self.chat_url();
        tracing::debug!(url = %url, messages = messages.len(), "sending chat request");

        let mut request = self
            .client
            .post(&url)
            .bearer_auth(&self.config.publishable_key)
            .header("content-type", "application/json")
            .json(&ChatRequest::new(messages));
        if let Some(timeout) = self.config.timeout {
            request = request.timeout(timeout);
        }

        let response = request
            .send()
            .await
            .map_err(|e| map_reqwest_error(e, self.config.timeout))?;
        tracing::debug!(status = %response.status(), "chat response received");
        Ok(response)
    }
}

/// Reject non-success statuses and empty bodies.
async fn accept(response: Response) -> Result<Response, ChatError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let err = map_http_status(status, &body);
        tracing::warn!(status = status.as_u16(), error = %err, "chat request rejected");
        return Err(err);
    }
    if status == StatusCode::NO_CONTENT || response.content_length() == Some(0) {
        tracing::warn!(status = status.as_u16(), "chat response has no body");
        return Err(ChatError::BodyUnavailable);
    }
    Ok(response)
}

impl ChatTransport for ChatClient {
    fn stream_chat<S: DeltaSink>(
        &self,
        messages: &[ChatMessage],
        sink: &mut S,
    ) -> impl Future<Output = Result<(), ChatError>> + Send {
        ChatClient::stream_chat(self, messages, sink)
    }
}
