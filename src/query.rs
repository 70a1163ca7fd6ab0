//! Preview-state snapshot encoding.
//!
//! Every intercepted request carries the preview session's
//! modified-but-unsaved state so the server renders against it instead of
//! the persisted state. [`CustomizeQueryVars`] is that snapshot: the live
//! setting values as a JSON map plus the session identity fields, encoded
//! as a standard form body.
//!
//! A snapshot is a pure function of the live settings at call time. It is
//! recomputed for every request and never cached, since settings can change
//! between any two dispatches.

use crate::error::Result;
use crate::session::PreviewSession;
use crate::settings::SettingRegistry;
use serde_json::{Map, Value};
use url::form_urlencoded;

/// Query vars carried by every preview request.
///
/// Field order here is the wire order: `wp_customize`, `theme`,
/// `customized`, `nonce`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CustomizeQueryVars {
    /// Always `"on"`; marks the request as a preview request.
    pub wp_customize: String,
    /// Identifier of the previewed theme.
    pub theme: String,
    /// JSON-encoded map of setting id to current in-memory value.
    pub customized: String,
    /// Customizer preview nonce.
    pub nonce: String,
}

impl CustomizeQueryVars {
    /// Snapshot the current preview state.
    ///
    /// Iterates every live setting and JSON-encodes the id-to-value map for
    /// the `customized` field. A non-serializable value propagates as
    /// [`CustomizeError::Json`](crate::CustomizeError::Json); no partial
    /// snapshot is produced.
    pub fn snapshot(session: &PreviewSession, settings: &dyn SettingRegistry) -> Result<Self> {
        let mut customized = Map::new();
        settings.each(&mut |id, value| {
            customized.insert(id.to_string(), value.clone());
        });

        Ok(Self {
            wp_customize: "on".to_string(),
            theme: session.theme().to_string(),
            customized: serde_json::to_string(&Value::Object(customized))?,
            nonce: session.nonce().to_string(),
        })
    }

    /// Encode as an `application/x-www-form-urlencoded` string.
    pub fn encode(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .append_pair("wp_customize", &self.wp_customize)
            .append_pair("theme", &self.theme)
            .append_pair("customized", &self.customized)
            .append_pair("nonce", &self.nonce)
            .finish()
    }
}
