use std::collections::BTreeMap;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::error::ApiError;
use crate::request::Request;
use crate::response;
use crate::sign::AuthScheme;

/// Default API endpoint.
pub const DEFAULT_API_BASE: &str = "http://api.odnoklassniki.ru/fb.do";

/// Configuration for [`OkClient`]: one credential set plus endpoint and
/// timeout knobs. One client instance per credential set.
#[derive(Debug, Clone)]
pub struct OkClientConfig {
    pub auth: AuthScheme,
    pub api_base: String,
    pub timeout: Duration,
}

impl OkClientConfig {
    /// Create configuration for non-session (Plain) authentication
    pub fn plain(
        application_key: impl Into<String>,
        application_secret_key: impl Into<String>,
    ) -> Self {
        Self::new(AuthScheme::Plain {
            application_key: application_key.into(),
            application_secret_key: application_secret_key.into(),
        })
    }

    /// Create configuration for Session authentication
    pub fn session(
        application_key: impl Into<String>,
        session_secret_key: impl Into<String>,
        session_key: impl Into<String>,
    ) -> Self {
        Self::new(AuthScheme::Session {
            application_key: application_key.into(),
            session_secret_key: session_secret_key.into(),
            session_key: session_key.into(),
        })
    }

    /// Create configuration for OAuth 2.0 authentication
    pub fn oauth2(
        application_key: impl Into<String>,
        application_secret_key: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Self {
        Self::new(AuthScheme::OAuth2 {
            application_key: application_key.into(),
            application_secret_key: application_secret_key.into(),
            access_token: access_token.into(),
        })
    }

    fn new(auth: AuthScheme) -> Self {
        Self {
            auth,
            api_base: DEFAULT_API_BASE.to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Override the API base URL
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Set a custom request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Create configuration from environment variables.
    ///
    /// Expects:
    /// - `OK_API_PUBLIC_KEY`: application public key (required)
    /// - `OK_API_SECRET_KEY`: application secret key (Plain and OAuth 2.0)
    /// - `OK_API_ACCESS_TOKEN`: selects OAuth 2.0 authentication
    /// - `OK_API_SESSION_SECRET_KEY` + `OK_API_SESSION_KEY`: select Session
    ///   authentication
    /// - `OK_API_BASE_URL`: API base URL override (optional)
    pub fn from_env() -> Result<Self, ApiError> {
        fn required(name: &str) -> Result<String, ApiError> {
            std::env::var(name).map_err(|_| ApiError::Build(format!("{name} not set")))
        }

        let application_key = required("OK_API_PUBLIC_KEY")?;

        let auth = if let Ok(access_token) = std::env::var("OK_API_ACCESS_TOKEN") {
            AuthScheme::OAuth2 {
                application_key,
                application_secret_key: required("OK_API_SECRET_KEY")?,
                access_token,
            }
        } else if let (Ok(session_secret_key), Ok(session_key)) = (
            std::env::var("OK_API_SESSION_SECRET_KEY"),
            std::env::var("OK_API_SESSION_KEY"),
        ) {
            AuthScheme::Session {
                application_key,
                session_secret_key,
                session_key,
            }
        } else {
            AuthScheme::Plain {
                application_key,
                application_secret_key: required("OK_API_SECRET_KEY")?,
            }
        };

        let mut config = Self::new(auth);
        if let Ok(api_base) = std::env::var("OK_API_BASE_URL") {
            config.api_base = api_base;
        }
        Ok(config)
    }
}

/// Odnoklassniki REST API client.
///
/// Each invocation canonicalizes and signs its own parameter set; the only
/// state shared between concurrent calls is the reqwest connection pool.
pub struct OkClient {
    http_client: reqwest::Client,
    auth: AuthScheme,
    api_base: String,
}

impl OkClient {
    /// Create client from configuration
    pub fn from_config(config: OkClientConfig) -> Result<Self, ApiError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::Build(e.to_string()))?;

        Ok(Self {
            http_client,
            auth: config.auth,
            api_base: config.api_base,
        })
    }

    /// Invoke an API method and return the decoded JSON payload.
    ///
    /// Issues exactly one GET to the configured endpoint; transport
    /// failures and server-reported error codes surface as distinct
    /// [`ApiError`] variants, never retried.
    pub async fn invoke(&self, request: Request) -> Result<Value, ApiError> {
        let method = request.method().to_string();
        let query = self.signed_query(request);

        debug!(%method, api_base = %self.api_base, "GET");

        let resp = self
            .http_client
            .get(&self.api_base)
            .query(&query)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ApiError::Timeout(e.to_string())
                } else if e.is_connect() {
                    ApiError::Connection(e.to_string())
                } else {
                    ApiError::Transport(e)
                }
            })?;

        let status = resp.status();
        let body = resp.bytes().await.map_err(ApiError::Transport)?;

        response::classify(status, &body)
    }

    /// Invoke an API method and deserialize the payload into `T`
    pub async fn invoke_as<T: DeserializeOwned>(&self, request: Request) -> Result<T, ApiError> {
        let value = self.invoke(request).await?;
        serde_json::from_value(value).map_err(|e| ApiError::Deserialization(e.to_string()))
    }

    /// Blocking version of [`invoke`](Self::invoke) for sync contexts.
    ///
    /// Uses the current tokio runtime if one exists, or creates a
    /// temporary runtime otherwise.
    pub fn invoke_blocking(&self, request: Request) -> Result<Value, ApiError> {
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle.block_on(self.invoke(request)),
            Err(_) => tokio::runtime::Runtime::new()?.block_on(self.invoke(request)),
        }
    }

    /// Blocking version of [`invoke_as`](Self::invoke_as) for sync contexts
    pub fn invoke_as_blocking<T: DeserializeOwned>(
        &self,
        request: Request,
    ) -> Result<T, ApiError> {
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle.block_on(self.invoke_as(request)),
            Err(_) => tokio::runtime::Runtime::new()?.block_on(self.invoke_as(request)),
        }
    }

    /// Assemble the final signed query: caller parameters plus the
    /// scheme-mandated fields (`method`, `application_key`, `format`,
    /// scheme identity) and the computed `sig`. Injected fields overwrite
    /// caller-supplied duplicates.
    pub fn signed_query(&self, request: Request) -> BTreeMap<String, String> {
        let (method, mut params) = request.into_parts();

        params.insert("method".to_string(), method);
        params.insert(
            "application_key".to_string(),
            self.auth.application_key().to_string(),
        );
        params.insert("format".to_string(), "JSON".to_string());
        match &self.auth {
            AuthScheme::Plain { .. } => {}
            AuthScheme::Session { session_key, .. } => {
                params.insert("session_key".to_string(), session_key.clone());
            }
            AuthScheme::OAuth2 { access_token, .. } => {
                params.insert("access_token".to_string(), access_token.clone());
            }
        }

        let sig = self.auth.sign(&params);
        params.insert("sig".to_string(), sig);
        params
    }
}
