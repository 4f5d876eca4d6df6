//! [`Client`] for the Hugging Face text-generation API and related types.

use std::{borrow::Cow, sync::Arc, time::Duration};

use futures::{future::BoxFuture, FutureExt};
use serde::{Deserialize, Serialize};

use crate::{key, GenerationRequest, Key, Response};

/// Result type for the client. See also [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Anything that can turn a [`GenerationRequest`] into a [`Response`]. This is
/// implemented by [`Client`]. A [`Session`] accepts any backend in
/// [`Session::submit_with`].
///
/// [`Session`]: crate::Session
/// [`Session::submit_with`]: crate::Session::submit_with
pub trait Backend {
    /// Generate text for `request`. One attempt, no retries.
    fn generate<'a>(
        &'a self,
        request: &'a GenerationRequest<'a>,
    ) -> BoxFuture<'a, Result<Response>>;
}

/// Options for building a [`Client`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(any(feature = "partial-eq", test), derive(PartialEq))]
#[serde(default)]
pub struct ClientOptions {
    /// Timeout for the whole request, from connect until the body is read.
    pub timeout: Duration,
    /// Base URL to use instead of the [`Provider`]'s. `/models/{repo_id}` is
    /// appended. This is useful for testing or for dedicated endpoints.
    ///
    /// [`Provider`]: crate::Provider
    pub base_url: Option<Cow<'static, str>>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout: Client::DEFAULT_TIMEOUT,
            base_url: None,
        }
    }
}

/// Client for the Hugging Face text-generation API.
///
/// See [`Self::new`] for creating a new client and [`Self::generate`] to get
/// started.
#[derive(Clone)]
pub struct Client {
    /// Inner [`reqwest::Client`]. The API [`Key`] is **set automatically on
    /// requests**. **Do not use** `client.inner.post` directly. Use
    /// [`Self::post`] instead to safely set the [`Key`] as sensitive.
    pub inner: reqwest::Client,
    /// API [`Key`]. It can be set to a new [`Key`] to change the key used for
    /// requests.
    pub key: Arc<Key>,
    /// Base URL override. See [`ClientOptions::base_url`].
    pub base_url: Option<Cow<'static, str>>,
}

static_assertions::assert_impl_all!(Client: Send, Sync, Clone);

impl Client {
    /// Our user agent.
    pub const USER_AGENT: &'static str =
        concat!(env!("CARGO_PKG_NAME"), "-", env!("CARGO_PKG_VERSION"));
    /// Default request timeout. Generating a long poem on a cold model can
    /// take a while.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

    /// Create a new client from any type that can be converted into a [`Key`]
    /// with default [`ClientOptions`].
    ///
    /// ## Note:
    /// - It's safest to use a [`String`]. If you use a [`&str`] you must
    ///   zeroize it after creating the client.
    pub fn new<K>(key: K) -> Result<Self>
    where
        K: TryInto<Key, Error = key::MissingCredential>,
    {
        Self::with_options(key, ClientOptions::default())
    }

    /// Create a new client with custom [`ClientOptions`].
    pub fn with_options<K>(key: K, options: ClientOptions) -> Result<Self>
    where
        K: TryInto<Key, Error = key::MissingCredential>,
    {
        Self::from_key(key.try_into()?, options)
    }

    /// Create a new client with the given key.
    pub fn from_key(key: Key, options: ClientOptions) -> Result<Self> {
        #[cfg(feature = "log")]
        {
            log::info!(concat!(
                "Creating ",
                env!("CARGO_PKG_NAME"),
                " client..."
            ));
            log::debug!(concat!("Crate version: ", env!("CARGO_PKG_VERSION")));
            log::debug!("Request timeout: {:?}", options.timeout);
        }

        // Headers for all requests.
        let mut headers = reqwest::header::HeaderMap::new();

        // Content type needs to be set to JSON.
        headers.insert(
            reqwest::header::CONTENT_TYPE,
            reqwest::header::HeaderValue::from_static("application/json"),
        );

        let inner = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(Self::USER_AGENT)
            .timeout(options.timeout)
            .build()?;

        Ok(Self {
            inner,
            key: Arc::new(key),
            base_url: options.base_url,
        })
    }

    /// Endpoint URL for `request`'s model and provider.
    pub fn url(&self, request: &GenerationRequest<'_>) -> String {
        let base = self
            .base_url
            .as_deref()
            .unwrap_or(request.provider.base_url());
        format!(
            "{}/models/{}",
            base.trim_end_matches('/'),
            request.model.repo_id()
        )
    }

    /// Create a [`reqwest::RequestBuilder`] with the API key set as a sensitive
    /// header value.
    pub fn request_raw<U>(
        &self,
        method: reqwest::Method,
        url: U,
    ) -> Result<reqwest::RequestBuilder>
    where
        U: reqwest::IntoUrl,
    {
        #[cfg(feature = "log")]
        {
            log::debug!("{} request to {}", method, url.as_str());
        }

        let mut val =
            reqwest::header::HeaderValue::from_str(&self.key.bearer())
                .map_err(|_| Error::InvalidKey)?;
        val.set_sensitive(true);

        Ok(self
            .inner
            .request(method, url)
            .header(reqwest::header::AUTHORIZATION, val))
    }

    /// Send a POST request with the API key set as a sensitive header value.
    pub async fn post<U, B>(&self, url: U, body: B) -> Result<reqwest::Response>
    where
        U: reqwest::IntoUrl,
        B: serde::Serialize,
    {
        let req = self.request_raw(reqwest::Method::POST, url)?;

        #[cfg(feature = "log")]
        {
            if let Ok(json) = serde_json::to_string_pretty(&body) {
                log::debug!("Sending body:\n{}", json);
            } else {
                log::warn!("Could not serialize body. Request will fail.");
            }
        }

        Ok(req.json(&body).send().await?)
    }

    /// Generate text for a [`GenerationRequest`]. The prompt is built from the
    /// request, sent once, and the body resolved into a [`Response`].
    pub async fn generate(
        &self,
        request: &GenerationRequest<'_>,
    ) -> Result<Response> {
        let url = self.url(request);
        let response = self.post(url, request.body()).await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            #[cfg(feature = "log")]
            log::warn!("Hugging Face returned {}: {}", status, body);

            return Err(RemoteError::from_body(status.as_u16(), &body).into());
        }

        Ok(Response::from_body(&body))
    }
}

impl Backend for Client {
    fn generate<'a>(
        &'a self,
        request: &'a GenerationRequest<'a>,
    ) -> BoxFuture<'a, Result<Response>> {
        Client::generate(self, request).boxed()
    }
}

/// [`Client`] error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No credential was supplied.
    #[error(transparent)]
    MissingCredential(#[from] key::MissingCredential),
    /// The credential contains characters not allowed in a header.
    #[error("Invalid credential: not a valid header value")]
    InvalidKey,
    /// HTTP error, including timeouts.
    #[error("HTTP error: {0}")]
    HTTP(#[from] reqwest::Error),
    /// Data could not be parsed.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    /// Hugging Face error.
    #[error("Hugging Face error: {0}")]
    HuggingFace(#[from] RemoteError),
}

/// Error reported by the inference service.
#[derive(Debug, Clone, thiserror::Error, Serialize, Deserialize, PartialEq)]
#[error("{message} ({status})")]
pub struct RemoteError {
    /// HTTP status code.
    pub status: u16,
    /// Message from the service, or the raw body if it had none.
    pub message: String,
}

// The service reports errors either as a string or as an object.
#[derive(Deserialize)]
#[serde(untagged)]
enum ErrorBody {
    Flat { error: String },
    Nested { error: ErrorMessage },
}

#[derive(Deserialize)]
struct ErrorMessage {
    message: String,
}

impl RemoteError {
    /// Build from a status code and a response body.
    pub fn from_body(status: u16, body: &str) -> Self {
        let message = match serde_json::from_str::<ErrorBody>(body) {
            Ok(ErrorBody::Flat { error }) => error,
            Ok(ErrorBody::Nested { error }) => error.message,
            Err(_) if body.trim().is_empty() => "no response body".to_string(),
            Err(_) => body.trim().to_string(),
        };

        Self { status, message }
    }
}
