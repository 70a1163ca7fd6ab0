//! End-to-end tests of the interception layer through the public API.

use customize_rest::{
    CustomizeError, CustomizeQueryVars, CustomizeSettings, PreviewSession, RestApiRegistry,
    RestClient, RestRequest, SessionArgs, METHOD_OVERRIDE_HEADER,
};
use http::Method;
use serde_json::json;
use std::sync::Arc;

const ROOT: &str = "https://example.com/wp-json/";

fn ready_api() -> RestApiRegistry {
    let api = RestApiRegistry::new();
    api.register_collection("posts");
    api.register_collection("pages");
    api.register_model("post");
    api.register_model("page");
    api
}

fn args() -> SessionArgs {
    SessionArgs {
        preview_nonce: "abc123".into(),
        previewed_theme: "twentysixteen".into(),
        rest_api_root: ROOT.into(),
    }
}

fn attached_client(settings: Arc<CustomizeSettings>) -> (RestClient, Arc<PreviewSession>) {
    let api = ready_api();
    let mut client = RestClient::new();
    let session = PreviewSession::attach(args(), settings, &api, &mut client).unwrap();
    (client, session)
}

#[test]
fn test_attach_installs_prefilter() {
    let (client, session) = attached_client(Arc::new(CustomizeSettings::new()));
    assert!(client.has_prefilter());
    assert_eq!(session.rest_api_root(), ROOT);
}

#[test]
fn test_failed_attach_leaves_requests_unmodified() {
    let api = ready_api();
    let mut client = RestClient::new();

    let mut bad = args();
    bad.preview_nonce.clear();
    let err = PreviewSession::attach(bad, Arc::new(CustomizeSettings::new()), &api, &mut client)
        .unwrap_err();
    assert!(err.is_fatal());
    assert!(!client.has_prefilter());

    // A subsequent API request passes through byte-for-byte.
    let mut req = RestRequest::get(format!("{ROOT}posts?x=1")).with_body("foo=bar");
    let before = req.clone();
    let headers = client.apply(&mut req).unwrap();
    assert_eq!(req, before);
    assert!(headers.is_empty());
}

#[test]
fn test_unrelated_traffic_passes_through() {
    let (client, _session) = attached_client(Arc::new(CustomizeSettings::new()));

    let mut req = RestRequest::get("https://example.com/wp-content/themes/style.css");
    let before = req.clone();
    let headers = client.apply(&mut req).unwrap();
    assert_eq!(req, before);
    assert!(headers.is_empty());
}

#[test]
fn test_full_rewrite_of_get_with_body() {
    let settings = Arc::new(CustomizeSettings::new());
    settings.set("blogname", json!("Preview Title"));
    let (client, session) = attached_client(settings.clone());

    let mut req = RestRequest::get(format!("{ROOT}posts?x=1")).with_body("filter[s]=hello");
    let headers = client.apply(&mut req).unwrap();

    assert_eq!(req.method, Method::POST);
    assert_eq!(headers.get(METHOD_OVERRIDE_HEADER).unwrap(), "GET");
    assert_eq!(req.url, format!("{ROOT}posts?x=1&filter[s]=hello"));

    let expected = CustomizeQueryVars::snapshot(&session, settings.as_ref())
        .unwrap()
        .encode();
    assert_eq!(req.body.unwrap(), format!("filter[s]=hello&{expected}"));
}

#[test]
fn test_delete_is_tunneled_with_snapshot() {
    let (client, _session) = attached_client(Arc::new(CustomizeSettings::new()));

    let mut req = RestRequest::new(Method::DELETE, format!("{ROOT}posts/9"));
    let headers = client.apply(&mut req).unwrap();

    assert_eq!(req.method, Method::POST);
    assert_eq!(headers.get(METHOD_OVERRIDE_HEADER).unwrap(), "DELETE");
    assert_eq!(req.url, format!("{ROOT}posts/9"));

    let body = req.body.unwrap();
    assert!(body.starts_with("wp_customize=on&theme=twentysixteen&customized="));
    assert!(body.ends_with("&nonce=abc123"));
}

#[test]
fn test_snapshot_keys_track_settings_between_requests() {
    let settings = Arc::new(CustomizeSettings::new());
    let (client, _session) = attached_client(settings.clone());

    let mut first = RestRequest::get(format!("{ROOT}posts"));
    client.apply(&mut first).unwrap();
    assert!(first.body.unwrap().contains("customized=%7B%7D"));

    settings.set("show_on_front", json!("page"));
    let mut second = RestRequest::get(format!("{ROOT}posts"));
    client.apply(&mut second).unwrap();
    assert!(second.body.unwrap().contains("show_on_front"));
}

#[tokio::test]
async fn test_dispatch_surfaces_transport_failure() {
    let (client, _session) = attached_client(Arc::new(CustomizeSettings::new()));

    // Nothing listens on the discard port; the rewrite succeeds but the
    // send does not.
    let req = RestRequest::get("http://127.0.0.1:9/wp-json/posts");
    let err = client.dispatch(req).await.unwrap_err();
    assert!(matches!(err, CustomizeError::Http(_)));
    assert!(!err.is_fatal());
}

#[test]
fn test_collection_add_observers() {
    let api = ready_api();
    let session = PreviewSession::new(args(), &api).unwrap();
    session.observe_collections(&api);

    let posts = api.collection("posts").unwrap();
    let seen = Arc::new(parking_lot::Mutex::new(Vec::new()));
    let sink = seen.clone();
    posts.on_add(move |model| sink.lock().push(model.clone()));

    posts.add(json!({"id": 1, "title": "Hello"}));
    posts.add(json!({"id": 2, "title": "World"}));

    assert_eq!(seen.lock().len(), 2);
    assert_eq!(posts.items().len(), 2);
}
