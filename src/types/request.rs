//! Outgoing REST request parameters.

use http::Method;

/// An outgoing REST request as seen by the prefilter.
///
/// One instance exists per dispatch and is mutated in place: the prefilter
/// may rewrite the method, extend the URL, and augment the body before the
/// transport takes over. The body, when present, is an
/// `application/x-www-form-urlencoded` string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RestRequest {
    pub method: Method,
    pub url: String,
    /// Form-encoded payload, if any.
    pub body: Option<String>,
}

impl RestRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            body: None,
        }
    }

    /// Shorthand for a GET request with no body.
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url)
    }

    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Whether the request carries a non-empty payload.
    ///
    /// An empty-string body counts as no body: the payload is form-encoded
    /// text, and an empty form contributes nothing to either the query
    /// string or the final body.
    #[inline]
    pub fn has_body(&self) -> bool {
        self.body.as_deref().is_some_and(|b| !b.is_empty())
    }
}
