#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, LOCATION};
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use ya_api::auth::jwt::generate_session_token;
use ya_api::auth::password::hash_password;
use ya_api::config::{ServerConfig, SessionConfig};
use ya_api::router::{build_app_router, Site};
use ya_api::state::AppState;
use ya_core::identity::Identity;
use ya_db::models::user::CreateUser;
use ya_db::store::UserStore;
use ya_db::{MemoryStore, Storage};

pub const TEST_SECRET: &str = "test-secret-that-is-long-enough-for-hmac";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        request_timeout_secs: 30,
        news_count_on_home_page: 10,
        database_url: None,
        session: SessionConfig {
            secret: TEST_SECRET.to_string(),
            expiry_mins: 60,
            cookie_secure: false,
        },
    }
}

/// One site backed by an in-memory store the test can seed and inspect.
pub struct TestApp {
    pub site: Site,
    pub store: Arc<MemoryStore>,
    pub state: AppState,
}

impl TestApp {
    pub fn new(site: Site) -> Self {
        Self::with_storage(site, |store| store as Arc<dyn Storage>)
    }

    /// Serve through `wrap(store)` while seeding and inspecting `store`
    /// directly.
    pub fn with_storage<F>(site: Site, wrap: F) -> Self
    where
        F: FnOnce(Arc<MemoryStore>) -> Arc<dyn Storage>,
    {
        let store = Arc::new(MemoryStore::new());
        let state = AppState::new(wrap(store.clone()), test_config());
        Self { site, store, state }
    }

    /// A fresh router over the shared state; `oneshot` consumes it.
    pub fn router(&self) -> Router {
        build_app_router(self.site, self.state.clone())
    }

    /// Create a user that can only be used through [`TestApp::login_cookie`].
    pub async fn create_user(&self, username: &str) -> Identity {
        self.store
            .create_user(CreateUser {
                username: username.to_string(),
                password_hash: "!unusable".to_string(),
            })
            .await
            .expect("user creation should succeed")
            .identity()
    }

    /// Create a user with a real password hash.
    pub async fn create_user_with_password(&self, username: &str, password: &str) -> Identity {
        let password_hash = hash_password(password).expect("hashing should succeed");
        self.store
            .create_user(CreateUser {
                username: username.to_string(),
                password_hash,
            })
            .await
            .expect("user creation should succeed")
            .identity()
    }

    /// `Cookie` header value for a logged-in session, skipping the login
    /// form.
    pub fn login_cookie(&self, identity: &Identity) -> String {
        let token = generate_session_token(identity, &self.state.config.session)
            .expect("token generation should succeed");
        format!("sessionid={token}")
    }

    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> Response<Body> {
        self.send(Method::GET, uri, cookie, None).await
    }

    pub async fn post_form(
        &self,
        uri: &str,
        form: &[(&str, &str)],
        cookie: Option<&str>,
    ) -> Response<Body> {
        let body = encode_form(form);
        self.send(Method::POST, uri, cookie, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, cookie: Option<&str>) -> Response<Body> {
        self.send(Method::DELETE, uri, cookie, None).await
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        cookie: Option<&str>,
        form: Option<String>,
    ) -> Response<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(COOKIE, cookie);
        }
        let body = match form {
            Some(form) => {
                builder = builder.header(CONTENT_TYPE, "application/x-www-form-urlencoded");
                Body::from(form)
            }
            None => Body::empty(),
        };
        self.router()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap()
    }
}

/// `application/x-www-form-urlencoded` body.
pub fn encode_form(form: &[(&str, &str)]) -> String {
    form.iter()
        .map(|(k, v)| {
            let (k, v) = (urlencoding::encode(k), urlencoding::encode(v));
            format!("{k}={v}")
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Parse a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// The `Location` header of a redirect.
pub fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get(LOCATION)
        .expect("redirect must carry a Location header")
        .to_str()
        .unwrap()
}
