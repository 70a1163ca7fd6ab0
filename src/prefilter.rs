//! The Ajax prefilter: rewrites outgoing REST requests for the preview
//! session.
//!
//! Every request the transport is about to send passes through
//! [`AjaxPrefilter::prefilter`] exactly once. Requests outside the REST API
//! root are left byte-for-byte untouched. For API requests the rewrite is a
//! fixed sequence:
//!
//! 1. remember the original method, warning (via `tracing`) when it is a
//!    write;
//! 2. tunnel non-POST methods: set `X-HTTP-Method-Override` and force the
//!    wire method to POST, before any body work;
//! 3. repair the query string: a GET payload is re-appended to the URL,
//!    since the server resolves parameter placement from the declared
//!    method, which is now POST;
//! 4. inject the current preview-state snapshot into the body.
//!
//! The prefilter performs no I/O, never suspends, and never rejects a
//! request; its only failure mode is snapshot encoding, which propagates to
//! the caller of the affected request.

use crate::error::Result;
use crate::query::CustomizeQueryVars;
use crate::session::PreviewSession;
use crate::settings::SettingRegistry;
use crate::types::RestRequest;
use http::header::{HeaderMap, HeaderName, HeaderValue};
use http::Method;
use std::sync::Arc;

/// Header carrying the original method of a tunneled request.
pub const METHOD_OVERRIDE_HEADER: &str = "X-HTTP-Method-Override";

/// Sink for headers set while a request is being rewritten.
///
/// The transport hands this in alongside the request; it is the one control
/// surface the prefilter has beyond mutating the request itself.
pub trait RequestHandle {
    /// Set a header on the request before it is sent.
    fn set_request_header(&mut self, name: &str, value: &str);
}

/// [`RequestHandle`] backed by an [`http::HeaderMap`].
#[derive(Debug, Default)]
pub struct HeaderHandle {
    headers: HeaderMap,
}

impl HeaderHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn into_headers(self) -> HeaderMap {
        self.headers
    }
}

impl RequestHandle for HeaderHandle {
    fn set_request_header(&mut self, name: &str, value: &str) {
        // Names and values originate from http::Method, so parse failures
        // cannot occur for anything the prefilter sets itself.
        if let (Ok(name), Ok(value)) = (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            self.headers.insert(name, value);
        }
    }
}

/// Rewrites outgoing REST requests to carry the preview session state.
///
/// One prefilter is installed per transport; each invocation operates on
/// its own request with no shared mutable state, so concurrent in-flight
/// requests need no locking.
pub struct AjaxPrefilter {
    session: Arc<PreviewSession>,
    settings: Arc<dyn SettingRegistry>,
}

impl AjaxPrefilter {
    pub fn new(session: Arc<PreviewSession>, settings: Arc<dyn SettingRegistry>) -> Self {
        Self { session, settings }
    }

    #[inline]
    pub fn session(&self) -> &PreviewSession {
        &self.session
    }

    /// Rewrite one outgoing request in place.
    ///
    /// Requests whose URL does not start with the session's REST API root
    /// are returned untouched. Everything else leaves as a POST carrying
    /// the method override header (when tunneled) and the encoded preview
    /// snapshot in its body.
    pub fn prefilter(&self, request: &mut RestRequest, handle: &mut dyn RequestHandle) -> Result<()> {
        // Not an API request: do not interfere.
        if !request.url.starts_with(self.session.rest_api_root()) {
            return Ok(());
        }

        let rest_method = request.method.clone();

        if rest_method != Method::GET && rest_method != Method::HEAD {
            tracing::warn!(
                "performing write request ({}) to the REST API in the preview session",
                rest_method
            );
        }

        // The preview transport only carries POST end-to-end, so tunnel
        // everything else behind an override header. This must precede the
        // body work below: body encoding depends on the final method.
        if rest_method != Method::POST {
            handle.set_request_header(METHOD_OVERRIDE_HEADER, rest_method.as_str());
            request.method = Method::POST;
        }

        // The server reads parameter placement off the declared method,
        // which is now POST. A GET payload has to ride the query string as
        // well or it becomes invisible under the new declaration.
        if rest_method == Method::GET && request.has_body() {
            let body = request.body.clone().unwrap_or_default();
            request
                .url
                .push(if request.url.contains('?') { '&' } else { '?' });
            request.url.push_str(&body);
        }

        // Every API request carries the current preview snapshot.
        let vars = CustomizeQueryVars::snapshot(&self.session, self.settings.as_ref())?;
        let encoded = vars.encode();
        match request.body.as_mut().filter(|b| !b.is_empty()) {
            Some(body) => {
                body.push('&');
                body.push_str(&encoded);
            }
            None => request.body = Some(encoded),
        }

        Ok(())
    }
}
