use std::time::Duration;

use async_stream::try_stream;
use futures_core::Stream;
use futures_util::StreamExt;
use reqwest::{
    Client as HttpClient, Response,
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue},
};
use serde::{Serialize, de::DeserializeOwned};

use crate::{
    api_v1::{
        ChatCompletionChunkResponse, ChatCompletionRequest, ChatCompletionResponse,
        CompletionRequest, CompletionResponse,
    },
    error::OpenAiError,
};

pub(crate) const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub(crate) const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// How often and how patiently to retry transient failures.
///
/// Only the request itself is retried: once a streaming response has started
/// delivering chunks, a broken connection surfaces as an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Additional attempts after the first one.
    pub max_retries: u32,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            initial_backoff: Duration::from_millis(500),
            max_backoff: Duration::from_secs(8),
        }
    }
}

impl RetryPolicy {
    /// A policy that never retries.
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Delay before retry number `attempt` (zero-based): `initial * 2^attempt`,
    /// capped at `max_backoff`.
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt);
        self.initial_backoff
            .saturating_mul(factor)
            .min(self.max_backoff)
    }
}

/// Minimal HTTP client for OpenAI’s *completions* and *chat/completions*
/// endpoints.
///
/// * Accepts and returns the `api_v1` request / response structs defined
///   in this crate.
/// * Shares a single `reqwest::Client`, so cloning `OpenAiClient` is cheap.
#[derive(Clone)]
pub struct OpenAiClient {
    api_key: String,
    http: HttpClient,
    base: String,
    retry: RetryPolicy,
}

impl OpenAiClient {
    /// Convenience constructor building a default `reqwest` client with the
    /// given request timeout.
    pub fn new(api_key: impl Into<String>, timeout: Duration) -> Result<Self, OpenAiError> {
        let http = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self::with_http(api_key, http, None))
    }

    /// Build with a custom `reqwest::Client` in case the caller needs proxy
    /// settings, custom TLS, etc.
    pub fn with_http(
        api_key: impl Into<String>,
        http: HttpClient,
        base_url: Option<String>,
    ) -> Self {
        let base = base_url
            .map(|url| url.trim_end_matches('/').to_owned())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_owned());

        Self {
            api_key: api_key.into(),
            http,
            base,
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl AsRef<str>) -> Self {
        self.base = base_url.as_ref().trim_end_matches('/').to_owned();
        self
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base
    }

    /// Perform a **text** completion (`POST /completions`).
    pub async fn completion(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, OpenAiError> {
        self.post_json("completions", &request).await
    }

    /// Perform a **non-streaming** chat completion.
    pub async fn chat_completion(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, OpenAiError> {
        self.post_json("chat/completions", &request).await
    }

    /// Perform a **streaming** chat completion.
    pub fn chat_completion_stream(
        &self,
        mut request: ChatCompletionRequest,
    ) -> impl Stream<Item = Result<ChatCompletionChunkResponse, OpenAiError>> + '_ {
        request.stream = Some(true);

        try_stream! {
            let resp = self
                .send_with_retry("chat/completions", &request, Some("text/event-stream"))
                .await?;

            let mut bytes_stream = resp.bytes_stream();
            let mut buf = Vec::new();

            while let Some(chunk) = bytes_stream.next().await {
                let chunk = chunk?;
                buf.extend_from_slice(&chunk);

                while let Some(frame) = next_frame(&mut buf) {
                    let frame_str = std::str::from_utf8(&frame)
                        .map_err(|e| OpenAiError::Format(format!("stream is not UTF-8: {e}")))?;

                    match parse_sse_frame(frame_str) {
                        SseFrame::Done => return,
                        SseFrame::Data(data) => {
                            let parsed: ChatCompletionChunkResponse = serde_json::from_str(&data)?;
                            yield parsed;
                        }
                        SseFrame::Ignore => {}
                    }
                }
            }
        }
    }

    async fn post_json<Req, Resp>(&self, path: &str, request: &Req) -> Result<Resp, OpenAiError>
    where
        Req: Serialize + ?Sized,
        Resp: DeserializeOwned,
    {
        let resp = self.send_with_retry(path, request, None).await?;
        let bytes = resp.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn send_with_retry<Req>(
        &self,
        path: &str,
        request: &Req,
        accept: Option<&'static str>,
    ) -> Result<Response, OpenAiError>
    where
        Req: Serialize + ?Sized,
    {
        let mut attempt = 0;

        loop {
            match self.send_once(path, request, accept).await {
                Ok(resp) => return Ok(resp),
                Err(err) if attempt < self.retry.max_retries && err.is_retryable() => {
                    let delay = self.retry.backoff(attempt);
                    #[cfg(feature = "tracing")]
                    tracing::warn!(
                        path,
                        attempt = attempt + 1,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "retrying OpenAI request"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn send_once<Req>(
        &self,
        path: &str,
        request: &Req,
        accept: Option<&'static str>,
    ) -> Result<Response, OpenAiError>
    where
        Req: Serialize + ?Sized,
    {
        let mut headers = self.headers()?;
        if let Some(accept) = accept {
            headers.insert(ACCEPT, HeaderValue::from_static(accept));
        }

        let url = format!("{}/{}", self.base, path);
        #[cfg(feature = "tracing")]
        tracing::debug!(%url, "sending OpenAI request");

        let resp = self
            .http
            .post(url)
            .headers(headers)
            .json(request)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(OpenAiError::Api { status, body });
        }

        Ok(resp)
    }

    fn headers(&self) -> Result<HeaderMap, OpenAiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", self.api_key))
            .map_err(|_| OpenAiError::Format("API key is not a valid header value".into()))?;
        bearer.set_sensitive(true);
        headers.insert(AUTHORIZATION, bearer);

        Ok(headers)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum SseFrame {
    Data(String),
    Done,
    Ignore,
}

/// Split the next complete SSE frame (terminated by a blank line) off `buf`.
fn next_frame(buf: &mut Vec<u8>) -> Option<Vec<u8>> {
    let lf = buf.windows(2).position(|w| w == b"\n\n").map(|p| (p, 2));
    let crlf = buf.windows(4).position(|w| w == b"\r\n\r\n").map(|p| (p, 4));

    let (pos, len) = match (lf, crlf) {
        (Some(a), Some(b)) => {
            if a.0 <= b.0 {
                a
            } else {
                b
            }
        }
        (Some(a), None) => a,
        (None, Some(b)) => b,
        (None, None) => return None,
    };

    Some(buf.drain(..pos + len).collect())
}

/// Interpret one SSE frame.  Multiple `data:` lines are joined with `\n`;
/// comments and `event:` lines are ignored.
pub(crate) fn parse_sse_frame(frame: &str) -> SseFrame {
    let data: Vec<&str> = frame
        .lines()
        .filter_map(|line| line.strip_prefix("data:"))
        .map(str::trim)
        .collect();

    if data.is_empty() {
        return SseFrame::Ignore;
    }

    let data = data.join("\n");
    if data == "[DONE]" {
        SseFrame::Done
    } else if data.is_empty() {
        SseFrame::Ignore
    } else {
        SseFrame::Data(data)
    }
}
