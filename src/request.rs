use std::collections::BTreeMap;

use crate::error::ApiError;

/// A single API method invocation: the dotted method name plus the
/// caller's query parameters.
#[derive(Debug, Clone)]
pub struct Request {
    method: String,
    params: BTreeMap<String, String>,
}

impl Request {
    /// Create a new request builder
    pub fn builder() -> RequestBuilder {
        RequestBuilder::default()
    }

    /// Get the dotted API method name (e.g. `users.getCurrentUser`)
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Get the caller-supplied parameters
    pub fn params(&self) -> &BTreeMap<String, String> {
        &self.params
    }

    /// Take the method name and parameters
    pub fn into_parts(self) -> (String, BTreeMap<String, String>) {
        (self.method, self.params)
    }
}

/// Builder for constructing API requests with a fluent API
#[derive(Debug, Default)]
pub struct RequestBuilder {
    method: Option<String>,
    params: BTreeMap<String, String>,
}

impl RequestBuilder {
    /// Set the API method by its dotted name, e.g. `"users.getCurrentUser"`
    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    /// Set the API method from its group and name,
    /// e.g. `("users", "getCurrentUser")`
    pub fn method_parts(mut self, group: impl AsRef<str>, name: impl AsRef<str>) -> Self {
        self.method = Some(format!("{}.{}", group.as_ref(), name.as_ref()));
        self
    }

    /// Add a query parameter
    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Add several query parameters
    pub fn params<I, K, V>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (name, value) in params {
            self.params.insert(name.into(), value.into());
        }
        self
    }

    /// Build the request
    pub fn build(self) -> Result<Request, ApiError> {
        let method = self
            .method
            .ok_or_else(|| ApiError::Build("API method name is required".into()))?;
        if method.is_empty() {
            return Err(ApiError::Build("API method name must not be empty".into()));
        }

        Ok(Request {
            method,
            params: self.params,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dotted_method() {
        let request = Request::builder()
            .method("users.getCurrentUser")
            .build()
            .unwrap();
        assert_eq!(request.method(), "users.getCurrentUser");
        assert!(request.params().is_empty());
    }

    #[test]
    fn test_method_parts() {
        let request = Request::builder()
            .method_parts("group", "getInfo")
            .param("uids", "123")
            .param("fields", "name,description")
            .build()
            .unwrap();
        assert_eq!(request.method(), "group.getInfo");
        assert_eq!(request.params().get("uids").map(String::as_str), Some("123"));
    }

    #[test]
    fn test_params_bulk() {
        let request = Request::builder()
            .method("users.getInfo")
            .params([("uids", "1,2,3"), ("fields", "uid")])
            .build()
            .unwrap();
        assert_eq!(request.params().len(), 2);
    }

    #[test]
    fn test_missing_method_is_build_error() {
        let result = Request::builder().param("uids", "123").build();
        assert!(matches!(result, Err(ApiError::Build(_))));
    }

    #[test]
    fn test_empty_method_is_build_error() {
        let result = Request::builder().method("").build();
        assert!(matches!(result, Err(ApiError::Build(_))));
    }

    #[test]
    fn test_duplicate_param_keeps_last() {
        let request = Request::builder()
            .method("users.getInfo")
            .param("fields", "uid")
            .param("fields", "uid,name")
            .build()
            .unwrap();
        assert_eq!(
            request.params().get("fields").map(String::as_str),
            Some("uid,name")
        );
    }
}
