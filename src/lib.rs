//! Odnoklassniki REST API client.
//!
//! Signs every request under one of three authentication schemes (Plain,
//! Session, OAuth 2.0), issues a single GET to the `fb.do` endpoint and
//! classifies the JSON response into a typed outcome:
//!
//! - server error codes map to distinct error kinds (authentication,
//!   invalid request, generic API error) through the server's static code
//!   tables;
//! - transport failures (DNS, connect, timeout) surface as connectivity
//!   errors carrying the underlying cause, never retried;
//! - everything else is the decoded payload, returned verbatim — including
//!   the API's empty-list convention for "no results".
//!
//! # Examples
//!
//! ## OAuth 2.0
//!
//! ```no_run
//! use odnoklassniki::{OkClient, OkClientConfig, Request};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = OkClientConfig::oauth2("CBAJ...BABA", "123...XYZ", "kjdhfl...sd8fg");
//! let client = OkClient::from_config(config)?;
//!
//! let request = Request::builder()
//!     .method("users.getCurrentUser")
//!     .build()?;
//!
//! let user: serde_json::Value = client.invoke(request).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Session authentication with method parameters
//!
//! ```no_run
//! use odnoklassniki::{OkClient, OkClientConfig, Request};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = OkClientConfig::session("CBAJ...BABA", "123...XYZ", "kjdhfl...sd8fg");
//! let client = OkClient::from_config(config)?;
//!
//! let request = Request::builder()
//!     .method_parts("group", "getInfo")
//!     .param("uids", "123")
//!     .param("fields", "name,description")
//!     .build()?;
//!
//! let groups = client.invoke(request).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Blocking usage (build scripts)
//!
//! ```no_run
//! use odnoklassniki::{OkClient, OkClientConfig, Request};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = OkClientConfig::from_env()?;
//! let client = OkClient::from_config(config)?;
//!
//! let request = Request::builder()
//!     .method("users.getCurrentUser")
//!     .build()?;
//!
//! let user = client.invoke_blocking(request)?;
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod request;
mod response;
mod sign;

// Re-export public API
pub use client::{OkClient, OkClientConfig, DEFAULT_API_BASE};
pub use error::{
    code_name, ApiError, ErrorCategory, AUTH_ERROR_CODES, INVALID_REQUEST_ERROR_CODES,
};
pub use request::{Request, RequestBuilder};
pub use sign::{canonical_string, AuthScheme};

// Re-export commonly used types from dependencies
pub use http::StatusCode;
