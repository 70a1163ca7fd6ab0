//! reqwest-backed dispatch for rewritten REST requests.
//!
//! [`RestClient`] is the transport seam the prefilter installs into: it
//! holds the single active [`AjaxPrefilter`] slot, runs the rewrite
//! synchronously on each outgoing request, and hands the result to
//! `reqwest`. With no prefilter installed, requests go out untouched.
//!
//! The client itself adds nothing beyond dispatch: no retry, no caching,
//! no backoff. Transport failures surface as
//! [`CustomizeError::Http`](crate::CustomizeError::Http).

use crate::error::{CustomizeError, Result};
use crate::prefilter::{AjaxPrefilter, HeaderHandle};
use crate::types::RestRequest;
use http::header::{HeaderMap, CONTENT_TYPE};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded; charset=UTF-8";

/// HTTP dispatch with an optional preview prefilter.
#[derive(Default)]
pub struct RestClient {
    client: reqwest::Client,
    prefilter: Option<AjaxPrefilter>,
}

impl RestClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing reqwest client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self {
            client,
            prefilter: None,
        }
    }

    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    /// Install the preview prefilter.
    ///
    /// At most one prefilter is active; installing again replaces the
    /// previous one.
    pub fn install_prefilter(&mut self, prefilter: AjaxPrefilter) {
        self.prefilter = Some(prefilter);
    }

    pub fn has_prefilter(&self) -> bool {
        self.prefilter.is_some()
    }

    /// Run the installed prefilter over `request`, returning any headers it
    /// set.
    ///
    /// This is the synchronous half of [`dispatch`](Self::dispatch); tests
    /// and alternative transports can call it directly.
    pub fn apply(&self, request: &mut RestRequest) -> Result<HeaderMap> {
        let mut handle = HeaderHandle::new();
        if let Some(prefilter) = &self.prefilter {
            prefilter.prefilter(request, &mut handle)?;
        }
        Ok(handle.into_headers())
    }

    /// Rewrite and send one request.
    pub async fn dispatch(&self, mut request: RestRequest) -> Result<reqwest::Response> {
        let headers = self.apply(&mut request)?;

        let mut builder = self
            .client
            .request(request.method, &request.url)
            .headers(headers);
        if let Some(body) = request.body {
            builder = builder.header(CONTENT_TYPE, FORM_CONTENT_TYPE).body(body);
        }

        builder
            .send()
            .await
            .map_err(|err| CustomizeError::Http(err.to_string()))
    }
}
