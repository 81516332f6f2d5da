#![allow(dead_code)]

use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use yume_admin_core::auth::{CredentialKey, CredentialStore, MemoryStore, RecordingNavigator};
use yume_admin_core::{Config, SessionClient};

pub struct Harness {
    pub client: SessionClient,
    pub store: Arc<MemoryStore>,
    pub navigator: Arc<RecordingNavigator>,
}

impl Harness {
    pub fn access(&self) -> Option<String> {
        self.store.get(CredentialKey::AccessToken).unwrap()
    }

    pub fn refresh(&self) -> Option<String> {
        self.store.get(CredentialKey::RefreshToken).unwrap()
    }
}

pub fn config_for(base_url: &str) -> Config {
    Config {
        api_base_url: base_url.to_string(),
        request_timeout_secs: 5,
        ..Config::default()
    }
}

pub fn harness_with(config: Config, access: Option<&str>, refresh: Option<&str>) -> Harness {
    let store = Arc::new(MemoryStore::with_tokens(access, refresh));
    let navigator = Arc::new(RecordingNavigator::new());
    let client = SessionClient::new(config, store.clone(), navigator.clone()).unwrap();
    Harness {
        client,
        store,
        navigator,
    }
}

pub fn harness(server: &MockServer, access: Option<&str>, refresh: Option<&str>) -> Harness {
    harness_with(config_for(&server.uri()), access, refresh)
}

/// Mount a refresh endpoint that exchanges `refresh` for `access`.
pub async fn mount_refresh(server: &MockServer, refresh: &str, access: &str, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/refresh"))
        .and(body_json(json!({ "token": refresh })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "accessToken": access })))
        .expect(expected_calls)
        .mount(server)
        .await;
}

pub async fn requests_to(server: &MockServer, method_name: &str, request_path: &str) -> usize {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|r| r.method.as_str() == method_name && r.url.path() == request_path)
        .count()
}
