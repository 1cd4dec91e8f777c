//! Request signing for the Odnoklassniki REST API.
//!
//! Every request carries a `sig` query parameter computed over the other
//! parameters. The scheme decides the formula:
//!
//! 1. Plain: `md5(canonical_params + application_secret_key)`
//! 2. Session: `md5(canonical_params + session_secret_key)`
//! 3. OAuth 2.0: `md5(canonical_params_without_access_token
//!    + md5(access_token + application_secret_key))`
//!
//! MD5 over UTF-8 bytes, rendered as lowercase hex. The algorithm is
//! mandated by the server and must be reproduced bit-for-bit.

use std::collections::BTreeMap;

use md5::{Digest, Md5};

pub(crate) const ACCESS_TOKEN_PARAM: &str = "access_token";

/// Authentication scheme with its credential material.
///
/// One client holds exactly one scheme; the scheme decides which identity
/// parameters ride along with the request and how the signature is keyed.
#[derive(Debug, Clone)]
pub enum AuthScheme {
    /// Non-session application auth
    Plain {
        application_key: String,
        application_secret_key: String,
    },
    /// Session auth
    Session {
        application_key: String,
        session_secret_key: String,
        session_key: String,
    },
    /// OAuth 2.0 auth
    OAuth2 {
        application_key: String,
        application_secret_key: String,
        access_token: String,
    },
}

impl AuthScheme {
    /// The application public key, common to all schemes.
    pub fn application_key(&self) -> &str {
        match self {
            AuthScheme::Plain {
                application_key, ..
            }
            | AuthScheme::Session {
                application_key, ..
            }
            | AuthScheme::OAuth2 {
                application_key, ..
            } => application_key,
        }
    }

    /// Sign a full parameter set.
    ///
    /// Pure over the credentials and the parameters; the input is not
    /// mutated and identical input always yields the identical signature.
    /// For OAuth 2.0 the `access_token` parameter is excluded from the
    /// signed string but still keys the signature through the inner digest.
    pub fn sign(&self, params: &BTreeMap<String, String>) -> String {
        match self {
            AuthScheme::Plain {
                application_secret_key,
                ..
            } => {
                let composed = canonical_string(params, None);
                md5_hex(&format!("{composed}{application_secret_key}"))
            }
            AuthScheme::Session {
                session_secret_key, ..
            } => {
                let composed = canonical_string(params, None);
                md5_hex(&format!("{composed}{session_secret_key}"))
            }
            AuthScheme::OAuth2 {
                application_secret_key,
                access_token,
                ..
            } => {
                let composed = canonical_string(params, Some(ACCESS_TOKEN_PARAM));
                let token_and_secret =
                    md5_hex(&format!("{access_token}{application_secret_key}"));
                md5_hex(&format!("{composed}{token_and_secret}"))
            }
        }
    }
}

/// Compose the canonical signature input: parameters sorted by key in
/// ascending byte-wise order, concatenated as `key=value` with no
/// separator. The ordering must match what the server recomputes.
pub fn canonical_string(params: &BTreeMap<String, String>, exclude: Option<&str>) -> String {
    let mut composed = String::new();
    for (name, value) in params {
        if exclude == Some(name.as_str()) {
            continue;
        }
        composed.push_str(name);
        composed.push('=');
        composed.push_str(value);
    }
    composed
}

fn md5_hex(input: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}
