mod auth_support;

use std::sync::Arc;

use gmail_auth::auth::{AuthorizedClient, FileTokenStore, TokenStore};
use gmail_auth::config::GmailAuthConfig;
use gmail_auth::scopes::Scope;
use gmail_auth::{authenticate_with, GmailAuthError, GmailService};
use pretty_assertions::assert_eq;
use serde::Deserialize;
use tempfile::TempDir;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use auth_support::{credential, write_client_secret, ScriptedPrompt};

#[derive(Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
struct Profile {
    email_address: String,
    messages_total: u64,
}

fn settings(server: &MockServer, temp: &TempDir) -> GmailAuthConfig {
    GmailAuthConfig::new()
        .with_token_dir(temp.path().join("tokens"))
        .with_user("alice@example.com")
        .with_api_base_url(format!("{}/gmail/v1", server.uri()))
}

async fn mount_profile(server: &MockServer, access_token: &str) {
    Mock::given(method("GET"))
        .and(path("/gmail/v1/users/me/profile"))
        .and(header("authorization", format!("Bearer {access_token}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "emailAddress": "alice@example.com",
            "messagesTotal": 42
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn first_run_authorizes_caches_and_calls_gmail() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token"))
        .and(body_string_contains("code=first-code"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "AT1",
            "token_type": "Bearer",
            "refresh_token": "RT1",
            "expires_in": 3600
        })))
        .expect(1)
        .mount(&server)
        .await;
    mount_profile(&server, "AT1").await;

    let temp = TempDir::new().expect("tempdir");
    let secret = write_client_secret(temp.path(), &format!("{}/token", server.uri()));
    let settings = settings(&server, &temp);
    let prompt = Arc::new(ScriptedPrompt::code("first-code"));

    let gmail = authenticate_with(&settings, &secret, &[Scope::Send], prompt.clone())
        .await
        .expect("authenticate");
    let profile: Profile = gmail.get_json("users/me/profile").await.expect("profile");

    assert_eq!(
        profile,
        Profile {
            email_address: "alice@example.com".to_string(),
            messages_total: 42,
        }
    );
    assert_eq!(prompt.calls(), 1);

    let cache = settings
        .token_location(&[Scope::Send.as_str().to_string()])
        .path();
    let cached = FileTokenStore::new().load(&cache).expect("cached token");
    assert_eq!(cached.access_token, "AT1");
    assert_eq!(cached.refresh_token, "RT1");
}

#[tokio::test]
async fn second_run_reuses_cache_without_prompting() {
    let server = MockServer::start().await;
    mount_profile(&server, "cached").await;
    let temp = TempDir::new().expect("tempdir");
    let secret = write_client_secret(temp.path(), &format!("{}/token", server.uri()));
    let settings = settings(&server, &temp);
    let cache = settings
        .token_location(&[Scope::Readonly.as_str().to_string()])
        .path();
    FileTokenStore::new()
        .save(&cache, &credential("cached", "RT1"))
        .expect("seed cache");
    let prompt = Arc::new(ScriptedPrompt::failing("should not be asked"));

    let gmail = authenticate_with(&settings, &secret, &[Scope::Readonly], prompt.clone())
        .await
        .expect("authenticate");
    let profile: Profile = gmail.get_json("users/me/profile").await.expect("profile");

    assert_eq!(profile.messages_total, 42);
    assert_eq!(prompt.calls(), 0);
}

#[tokio::test]
async fn different_scope_set_needs_its_own_consent() {
    let server = MockServer::start().await;
    let temp = TempDir::new().expect("tempdir");
    let secret = write_client_secret(temp.path(), &format!("{}/token", server.uri()));
    let settings = settings(&server, &temp);
    let send_cache = settings
        .token_location(&[Scope::Send.as_str().to_string()])
        .path();
    FileTokenStore::new()
        .save(&send_cache, &credential("send-only", "RT1"))
        .expect("seed cache");
    let prompt = Arc::new(ScriptedPrompt::failing("closed stdin"));

    let err = authenticate_with(&settings, &secret, &[Scope::Modify], prompt.clone())
        .await
        .unwrap_err();

    assert!(matches!(err, GmailAuthError::InteractiveInput(_)));
    assert_eq!(prompt.calls(), 1);
}

#[tokio::test]
async fn missing_client_secret_is_a_config_error() {
    let server = MockServer::start().await;
    let temp = TempDir::new().expect("tempdir");
    let settings = settings(&server, &temp);
    let prompt = Arc::new(ScriptedPrompt::code("unused"));

    let err = authenticate_with(
        &settings,
        &temp.path().join("absent.json"),
        &[Scope::Send],
        prompt.clone(),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, GmailAuthError::ConfigRead { .. }));
    assert_eq!(prompt.calls(), 0);
}

#[tokio::test]
async fn invalid_base_url_is_a_service_construction_error() {
    let server = MockServer::start().await;
    let temp = TempDir::new().expect("tempdir");
    let secret = write_client_secret(temp.path(), &format!("{}/token", server.uri()));
    let settings = settings(&server, &temp).with_api_base_url("ftp://mail.example.com/");
    let cache = settings
        .token_location(&[Scope::Send.as_str().to_string()])
        .path();
    FileTokenStore::new()
        .save(&cache, &credential("cached", "RT1"))
        .expect("seed cache");

    let err = authenticate_with(
        &settings,
        &secret,
        &[Scope::Send],
        Arc::new(ScriptedPrompt::failing("no")),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, GmailAuthError::ServiceConstruction(_)));
}

#[tokio::test]
async fn unauthorized_api_response_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/gmail/v1/users/me/labels"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Invalid Credentials"))
        .mount(&server)
        .await;
    let client = AuthorizedClient::new(
        reqwest::Client::new(),
        credential("revoked", "RT1"),
        Arc::new(NoRefresh),
    );
    let gmail = GmailService::with_base_url(client, &format!("{}/gmail/v1/", server.uri()))
        .expect("service");

    let err = gmail
        .get_json::<serde_json::Value>("users/me/labels")
        .await
        .unwrap_err();

    match &err {
        GmailAuthError::Api { status, message } => {
            assert_eq!(*status, 401);
            assert!(message.contains("Invalid Credentials"));
        }
        other => panic!("expected api error, got {other:?}"),
    }
    assert!(err.needs_reauthorization());
}

struct NoRefresh;

#[async_trait::async_trait]
impl gmail_auth::auth::TokenRefresher for NoRefresh {
    async fn refresh(
        &self,
        _credential: &gmail_auth::auth::Credential,
    ) -> Result<gmail_auth::auth::Credential, gmail_auth::auth::AuthError> {
        Err(gmail_auth::auth::AuthError::MissingRefreshToken)
    }
}
