//! Customizer-aware REST API request interception.
//!
//! This crate makes a generic resource-oriented REST client cooperate with a
//! live preview session whose setting edits exist only in memory. Every
//! outgoing API request is rewritten in place so that:
//!
//! - it carries the session's current unsaved state (the `customized`
//!   snapshot) and the server renders against that state, not the persisted
//!   one;
//! - it survives a POST-only transport, with the true method tunneled in an
//!   `X-HTTP-Method-Override` header and GET payloads re-appended to the
//!   query string.
//!
//! The moving parts:
//!
//! - [`PreviewSession`]: the validated, immutable session context (nonce,
//!   previewed theme, REST API root). Construction fails fast on missing
//!   fields or an uninitialized API registry, and nothing gets installed.
//! - [`AjaxPrefilter`]: the per-request rewrite hook.
//! - [`CustomizeQueryVars`]: the on-demand preview-state snapshot.
//! - [`CustomizeSettings`] / [`RestApiRegistry`]: the injected collaborator
//!   handles (live settings, collections and models).
//! - [`RestClient`] (non-wasm): thin reqwest-backed dispatch that runs the
//!   prefilter before send.
//!
//! # Example
//!
//! ```no_run
//! use customize_rest::{
//!     CustomizeSettings, PreviewSession, RestApiRegistry, RestClient, SessionArgs,
//! };
//! use std::sync::Arc;
//!
//! # fn main() -> customize_rest::Result<()> {
//! let api = RestApiRegistry::new();
//! api.register_collection("posts");
//! api.register_model("post");
//!
//! let settings = Arc::new(CustomizeSettings::new());
//! let mut client = RestClient::new();
//! let session = PreviewSession::attach(
//!     SessionArgs {
//!         preview_nonce: "abc123".into(),
//!         previewed_theme: "twentysixteen".into(),
//!         rest_api_root: "https://example.com/wp-json/".into(),
//!     },
//!     settings.clone(),
//!     &api,
//!     &mut client,
//! )?;
//! session.observe_collections(&api);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod error;
pub mod prefilter;
pub mod query;
pub mod session;
pub mod settings;
pub mod types;

#[cfg(not(target_arch = "wasm32"))]
pub mod client;

pub use api::{ResourceCollection, RestApiRegistry};
pub use error::{CustomizeError, Result};
pub use prefilter::{AjaxPrefilter, HeaderHandle, RequestHandle, METHOD_OVERRIDE_HEADER};
pub use query::CustomizeQueryVars;
pub use session::{PreviewSession, SessionArgs};
pub use settings::{CustomizeSettings, SettingRegistry};
pub use types::RestRequest;

#[cfg(not(target_arch = "wasm32"))]
pub use client::RestClient;
