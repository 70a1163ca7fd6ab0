//! Preview session context and startup validation.
//!
//! A [`PreviewSession`] holds the three facts the interception layer needs:
//! the preview security nonce, the previewed theme id, and the REST API
//! root prefix that identifies API traffic. All three are validated eagerly
//! at construction and immutable afterwards.
//!
//! Validation is deliberately fail-fast: a misconfigured preview must never
//! silently send un-augmented requests, so [`PreviewSession::attach`]
//! installs the prefilter only after every check has passed, and installs
//! nothing otherwise.

use crate::api::RestApiRegistry;
use crate::error::{CustomizeError, Result};
use serde::{Deserialize, Serialize};

#[cfg(not(target_arch = "wasm32"))]
use crate::client::RestClient;
#[cfg(not(target_arch = "wasm32"))]
use crate::prefilter::AjaxPrefilter;
#[cfg(not(target_arch = "wasm32"))]
use crate::settings::SettingRegistry;
#[cfg(not(target_arch = "wasm32"))]
use std::sync::Arc;

/// Arguments bundle for constructing a preview session.
///
/// Deserializable so the host page can hand it over as part of its
/// bootstrap payload.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SessionArgs {
    /// Customizer preview nonce.
    pub preview_nonce: String,
    /// Identifier of the previewed theme.
    pub previewed_theme: String,
    /// Absolute URL prefix identifying REST API requests.
    pub rest_api_root: String,
}

/// Immutable context of a live preview session.
#[derive(Debug)]
pub struct PreviewSession {
    nonce: String,
    theme: String,
    rest_api_root: String,
}

impl PreviewSession {
    /// Validate `args` against the API registry and build the session.
    ///
    /// Fails with [`CustomizeError::Config`] when the registry has no
    /// collections or models registered yet, or when any of the three
    /// argument fields is empty.
    pub fn new(args: SessionArgs, api: &RestApiRegistry) -> Result<Self> {
        if !api.is_initialized() {
            return Err(CustomizeError::Config(
                "REST API registry has not been initialized yet".into(),
            ));
        }

        let fields = [
            ("rest_api_root", &args.rest_api_root),
            ("preview_nonce", &args.preview_nonce),
            ("previewed_theme", &args.previewed_theme),
        ];
        for (name, value) in fields {
            if value.is_empty() {
                return Err(CustomizeError::Config(format!("Missing {name} arg")));
            }
        }

        Ok(Self {
            nonce: args.preview_nonce,
            theme: args.previewed_theme,
            rest_api_root: args.rest_api_root,
        })
    }

    /// Construct the session and install its prefilter in one step.
    ///
    /// On any validation failure the client is left without a prefilter and
    /// keeps dispatching requests unmodified.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn attach(
        args: SessionArgs,
        settings: Arc<dyn SettingRegistry>,
        api: &RestApiRegistry,
        client: &mut RestClient,
    ) -> Result<Arc<Self>> {
        let session = Arc::new(Self::new(args, api)?);
        client.install_prefilter(AjaxPrefilter::new(session.clone(), settings));
        Ok(session)
    }

    /// Subscribe an add-logger to every collection currently registered.
    ///
    /// Each added model is reported through `tracing` at info level. This is
    /// observability only; it never alters what the collections do.
    pub fn observe_collections(&self, api: &RestApiRegistry) {
        for collection in api.collections() {
            let name = collection.name().to_string();
            collection.on_add(move |model| {
                tracing::info!("added to {}: {}", name, model);
            });
        }
    }

    #[inline]
    pub fn nonce(&self) -> &str {
        &self.nonce
    }

    #[inline]
    pub fn theme(&self) -> &str {
        &self.theme
    }

    #[inline]
    pub fn rest_api_root(&self) -> &str {
        &self.rest_api_root
    }
}
