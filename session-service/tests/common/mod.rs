use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::ClaimsCodec;
use auth::PasswordHasher;
use auth::TokenDeliveryPolicy;
use auth::TokenTtl;
use axum::body::Body;
use axum::http::header;
use axum::http::Request;
use axum::response::Response;
use axum::Router;
use chrono::DateTime;
use chrono::Utc;
use http_body_util::BodyExt;
use session_service::domain::session::errors::CredentialStoreError;
use session_service::domain::session::models::Credential;
use session_service::domain::session::ports::CredentialStore;
use session_service::domain::session::service::SessionService;
use session_service::inbound::http::router::create_router;
use tower::ServiceExt;
use uuid::Uuid;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const ACCESS_TTL_MINUTES: i64 = 15;
pub const REFRESH_TTL_MINUTES: i64 = 60 * 24 * 7;

#[derive(Debug, Clone)]
struct StoredUser {
    id: Uuid,
    username: String,
    email: String,
    password_hash: String,
    last_authenticated_at: Option<DateTime<Utc>>,
}

/// In-memory credential store standing in for the document store.
#[derive(Default)]
pub struct InMemoryCredentialStore {
    users: Mutex<Vec<StoredUser>>,
}

impl InMemoryCredentialStore {
    pub fn add_user(&self, username: &str, email: &str, password: &str) -> String {
        let hash = PasswordHasher::new()
            .hash(password)
            .expect("Failed to hash test password");
        let user = StoredUser {
            id: Uuid::new_v4(),
            username: username.to_string(),
            email: email.to_string(),
            password_hash: hash,
            last_authenticated_at: None,
        };
        let id = user.id.to_string();
        self.users.lock().unwrap().push(user);
        id
    }

    pub fn last_authenticated_at(&self, username: &str) -> Option<DateTime<Utc>> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.username == username)
            .and_then(|u| u.last_authenticated_at)
    }

    fn credential(user: &StoredUser) -> Credential {
        Credential {
            subject_id: user.id.to_string(),
            password_hash: user.password_hash.clone(),
            last_authenticated_at: user.last_authenticated_at,
        }
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<Credential>, CredentialStoreError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.username == username)
            .map(Self::credential))
    }

    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<Credential>, CredentialStoreError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .map(Self::credential))
    }

    async fn record_authentication(
        &self,
        subject_id: &str,
        at: DateTime<Utc>,
    ) -> Result<(), CredentialStoreError> {
        let mut users = self.users.lock().unwrap();
        if let Some(user) = users.iter_mut().find(|u| u.id.to_string() == subject_id) {
            user.last_authenticated_at = Some(at);
        }
        Ok(())
    }
}

/// Test application serving the auth router in-process.
pub struct TestApp {
    router: Router,
    pub store: Arc<InMemoryCredentialStore>,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(InMemoryCredentialStore::default());
        let codec = Arc::new(ClaimsCodec::new(TEST_SECRET).expect("Failed to build codec"));
        let ttl = TokenTtl::from_minutes(ACCESS_TTL_MINUTES, REFRESH_TTL_MINUTES)
            .expect("Failed to build ttl");

        let session_service = Arc::new(SessionService::new(Arc::clone(&store), codec, ttl));
        let router = create_router(session_service, TokenDeliveryPolicy::new());

        Self { router, store }
    }

    pub fn codec(&self) -> ClaimsCodec {
        ClaimsCodec::new(TEST_SECRET).expect("Failed to build codec")
    }

    pub async fn post_json(&self, path: &str, body: serde_json::Value) -> Response {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("Failed to build request");

        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_form(&self, path: &str, body: &str) -> Response {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .expect("Failed to build request");

        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to execute request")
    }

    pub async fn get(&self, path: &str) -> Response {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .expect("Failed to build request");

        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to execute request")
    }

    pub async fn get_with_bearer(&self, path: &str, token: &str) -> Response {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .body(Body::empty())
            .expect("Failed to build request");

        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to execute request")
    }
}

pub async fn response_json(response: Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read response body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("Failed to parse response body")
}
