#![allow(dead_code)]

use std::{
    collections::{HashMap, HashSet},
    net::SocketAddr,
    sync::{Arc, Mutex},
    time::{SystemTime, UNIX_EPOCH},
};

use axum::{
    Json, Router,
    body::Body,
    extract::{Path, Query, State},
    http::{HeaderMap, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use fc_api::{ApiConfig, ApiState, router};
use http_body_util::BodyExt;
use jsonwebtoken::{EncodingKey, Header};
use serde::Deserialize;
use serde_json::{Value, json};
use tower::ServiceExt;

/// Project key the fake provider accepts
pub const TEST_API_KEY: &str = "test-anon-key";

/// Secret the fake provider signs access tokens with
pub const TEST_JWT_SECRET: &str = "test_jwt_secret_minimum_32_characters_long";

/// Address nothing listens on, for provider outage tests
pub const UNREACHABLE_PROVIDER_URL: &str = "http://127.0.0.1:1";

// ============================================================================
// Fake provider
// ============================================================================

#[derive(Default)]
struct Store {
    /// email -> (account id, password)
    accounts: HashMap<String, (String, String)>,
    tables: HashMap<String, Vec<Value>>,
    next_row_id: i64,
    failing_inserts: HashSet<String>,
    api_keys_seen: Vec<Option<String>>,
}

/// In-process stand-in for the auth service and table API, served on an
/// ephemeral local port so the real HTTP client is exercised.
#[derive(Clone)]
pub struct FakeProvider {
    store: Arc<Mutex<Store>>,
    addr: SocketAddr,
}

impl FakeProvider {
    pub async fn start() -> Self {
        let store = Arc::new(Mutex::new(Store {
            next_row_id: 1,
            ..Store::default()
        }));

        let app = Router::new()
            .route("/auth/v1/signup", post(fake_signup))
            .route("/auth/v1/token", post(fake_token))
            .route(
                "/rest/v1/{table}",
                get(fake_select).post(fake_insert).delete(fake_delete),
            )
            .with_state(store.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind fake provider");
        let addr = listener.local_addr().expect("Fake provider has no address");

        tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("Fake provider stopped");
        });

        Self { store, addr }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Insert a row directly, bypassing the API; returns it with its id
    pub fn seed(&self, table: &str, row: Value) -> Value {
        let mut store = self.store.lock().unwrap();
        store.insert_row(table, row)
    }

    pub fn rows(&self, table: &str) -> Vec<Value> {
        let store = self.store.lock().unwrap();
        store.tables.get(table).cloned().unwrap_or_default()
    }

    /// Make every insert into `table` fail with a constraint violation
    pub fn fail_inserts(&self, table: &str) {
        let mut store = self.store.lock().unwrap();
        store.failing_inserts.insert(table.to_string());
    }

    /// Create an account directly; returns its id
    pub fn register(&self, email: &str, password: &str) -> String {
        let mut store = self.store.lock().unwrap();
        store.create_account(email, password)
    }

    pub fn account_id(&self, email: &str) -> Option<String> {
        let store = self.store.lock().unwrap();
        store.accounts.get(email).map(|(id, _)| id.clone())
    }

    /// `apikey` header of every request received so far
    pub fn api_keys_seen(&self) -> Vec<Option<String>> {
        self.store.lock().unwrap().api_keys_seen.clone()
    }
}

impl Store {
    fn insert_row(&mut self, table: &str, mut row: Value) -> Value {
        if let Some(object) = row.as_object_mut() {
            object
                .entry("id")
                .or_insert_with(|| json!(self.next_row_id));
            object
                .entry("created_at")
                .or_insert_with(|| json!("2024-09-01T10:00:00.000000+00:00"));
        }
        self.next_row_id += 1;

        self.tables
            .entry(table.to_string())
            .or_default()
            .push(row.clone());

        row
    }

    fn create_account(&mut self, email: &str, password: &str) -> String {
        let id = uuid::Uuid::new_v4().to_string();
        self.accounts
            .insert(email.to_string(), (id.clone(), password.to_string()));
        id
    }

    fn record_key(&mut self, headers: &HeaderMap) -> bool {
        let key = headers
            .get("apikey")
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        let valid = key.as_deref() == Some(TEST_API_KEY);
        self.api_keys_seen.push(key);
        valid
    }
}

fn missing_key() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "message": "Invalid API key" })),
    )
        .into_response()
}

fn session_for(id: &str, email: &str) -> Value {
    json!({
        "access_token": create_access_token(id, email, TEST_JWT_SECRET),
        "token_type": "bearer",
        "expires_in": 3600,
        "refresh_token": "fake-refresh-token",
        "user": {
            "id": id,
            "aud": "authenticated",
            "role": "authenticated",
            "email": email,
        }
    })
}

#[derive(Deserialize)]
struct FakeCredentials {
    email: String,
    password: String,
}

async fn fake_signup(
    State(store): State<Arc<Mutex<Store>>>,
    headers: HeaderMap,
    Json(body): Json<FakeCredentials>,
) -> Response {
    let mut store = store.lock().unwrap();
    if !store.record_key(&headers) {
        return missing_key();
    }

    if store.accounts.contains_key(&body.email) {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({
                "code": 422,
                "error_code": "user_already_exists",
                "msg": "User already registered"
            })),
        )
            .into_response();
    }

    if body.password.len() < 6 {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({
                "code": 422,
                "error_code": "weak_password",
                "msg": "Password should be at least 6 characters."
            })),
        )
            .into_response();
    }

    let id = store.create_account(&body.email, &body.password);

    Json(session_for(&id, &body.email)).into_response()
}

async fn fake_token(
    State(store): State<Arc<Mutex<Store>>>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
    Json(body): Json<FakeCredentials>,
) -> Response {
    let mut store = store.lock().unwrap();
    if !store.record_key(&headers) {
        return missing_key();
    }

    let account = store
        .accounts
        .get(&body.email)
        .filter(|(_, password)| *password == body.password)
        .map(|(id, _)| id.clone());

    match account {
        Some(id) if query.get("grant_type").map(String::as_str) == Some("password") => {
            Json(session_for(&id, &body.email)).into_response()
        }
        _ => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_grant",
                "error_description": "Invalid login credentials"
            })),
        )
            .into_response(),
    }
}

/// `col=eq.value` pairs from the query string
fn equality_filters(query: &HashMap<String, String>) -> Vec<(String, String)> {
    query
        .iter()
        .filter(|(column, _)| column.as_str() != "select")
        .filter_map(|(column, value)| {
            value
                .strip_prefix("eq.")
                .map(|v| (column.clone(), v.to_string()))
        })
        .collect()
}

fn column_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn matches(row: &Value, filters: &[(String, String)]) -> bool {
    filters.iter().all(|(column, expected)| {
        row.get(column)
            .is_some_and(|value| column_text(value) == *expected)
    })
}

async fn fake_select(
    State(store): State<Arc<Mutex<Store>>>,
    headers: HeaderMap,
    Path(table): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let mut store = store.lock().unwrap();
    if !store.record_key(&headers) {
        return missing_key();
    }

    let filters = equality_filters(&query);
    let columns: Option<Vec<&str>> = query
        .get("select")
        .filter(|s| s.as_str() != "*")
        .map(|s| s.split(',').collect());

    let rows: Vec<Value> = store
        .tables
        .get(&table)
        .into_iter()
        .flatten()
        .filter(|row| matches(row, &filters))
        .map(|row| match &columns {
            Some(columns) => Value::Object(
                columns
                    .iter()
                    .filter_map(|c| row.get(*c).map(|v| (c.to_string(), v.clone())))
                    .collect(),
            ),
            None => row.clone(),
        })
        .collect();

    Json(rows).into_response()
}

async fn fake_insert(
    State(store): State<Arc<Mutex<Store>>>,
    headers: HeaderMap,
    Path(table): Path<String>,
    Json(row): Json<Value>,
) -> Response {
    let mut store = store.lock().unwrap();
    if !store.record_key(&headers) {
        return missing_key();
    }

    if store.failing_inserts.contains(&table) {
        return (
            StatusCode::CONFLICT,
            Json(json!({
                "code": "23503",
                "details": "Key is not present in referenced table.",
                "hint": null,
                "message": format!("insert or update on table \"{table}\" violates foreign key constraint")
            })),
        )
            .into_response();
    }

    let inserted = store.insert_row(&table, row);

    (StatusCode::CREATED, Json(vec![inserted])).into_response()
}

async fn fake_delete(
    State(store): State<Arc<Mutex<Store>>>,
    headers: HeaderMap,
    Path(table): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let mut store = store.lock().unwrap();
    if !store.record_key(&headers) {
        return missing_key();
    }

    let filters = equality_filters(&query);
    if let Some(rows) = store.tables.get_mut(&table) {
        rows.retain(|row| !matches(row, &filters));
    }

    StatusCode::NO_CONTENT.into_response()
}

// ============================================================================
// Application state
// ============================================================================

/// Test state builder for creating an `ApiState` pointed at a provider
pub struct TestStateBuilder {
    provider_url: String,
    jwt_secret: Option<String>,
}

impl TestStateBuilder {
    pub fn new(provider_url: impl Into<String>) -> Self {
        Self {
            provider_url: provider_url.into(),
            jwt_secret: None,
        }
    }

    /// Require provider-issued tokens on data routes
    pub fn with_jwt_secret(mut self, secret: &str) -> Self {
        self.jwt_secret = Some(secret.to_string());
        self
    }

    pub fn config(&self) -> ApiConfig {
        let mut vars = vec![
            ("SUPABASE_URL".to_string(), self.provider_url.clone()),
            ("SUPABASE_KEY".to_string(), TEST_API_KEY.to_string()),
        ];
        if let Some(secret) = &self.jwt_secret {
            vars.push(("SUPABASE_JWT_SECRET".to_string(), secret.clone()));
        }

        ApiConfig::from_vars(vars).expect("Invalid test configuration")
    }

    pub fn build(self) -> ApiState {
        ApiState::new(&self.config()).expect("Failed to create test state")
    }
}

/// Router with state, as the handlers see it in production minus the outer layers
pub fn test_app(state: ApiState) -> Router {
    router::router().with_state(state)
}

/// Provider plus a client for an app wired to it
pub async fn setup() -> (FakeProvider, TestClient) {
    let provider = FakeProvider::start().await;
    let state = TestStateBuilder::new(provider.url()).build();

    (provider, TestClient::new(test_app(state)))
}

// ============================================================================
// HTTP client
// ============================================================================

/// Helper to make requests to the test app
pub struct TestClient {
    router: Router,
}

impl TestClient {
    pub fn new(router: Router) -> Self {
        Self { router }
    }

    /// Send a request and get the response
    pub async fn request(&self, mut request: Request<Body>) -> TestResponse {
        // Add ConnectInfo extension for rate limiting to work in tests
        use axum::extract::ConnectInfo;
        use std::net::{IpAddr, Ipv4Addr};

        let test_addr = SocketAddr::new(IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)), 8080);
        request.extensions_mut().insert(ConnectInfo(test_addr));

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to execute request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read response body")
            .to_bytes();

        TestResponse {
            status,
            body: body_bytes.to_vec(),
            headers,
        }
    }

    fn builder(method: &str, uri: &str, token: Option<&str>) -> axum::http::request::Builder {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("x-forwarded-for", "127.0.0.1"); // Required for rate limiting in tests

        match token {
            Some(token) => builder.header("authorization", format!("Bearer {token}")),
            None => builder,
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.get_with_token(uri, None).await
    }

    pub async fn get_with_token(&self, uri: &str, token: Option<&str>) -> TestResponse {
        let request = Self::builder("GET", uri, token)
            .body(Body::empty())
            .expect("Failed to build request");

        self.request(request).await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.delete_with_token(uri, None).await
    }

    pub async fn delete_with_token(&self, uri: &str, token: Option<&str>) -> TestResponse {
        let request = Self::builder("DELETE", uri, token)
            .body(Body::empty())
            .expect("Failed to build request");

        self.request(request).await
    }

    /// Send a POST request with JSON body
    pub async fn post_json<T: serde::Serialize>(&self, uri: &str, body: &T) -> TestResponse {
        self.post_json_with_token(uri, body, None).await
    }

    pub async fn post_json_with_token<T: serde::Serialize>(
        &self,
        uri: &str,
        body: &T,
        token: Option<&str>,
    ) -> TestResponse {
        let json_body = serde_json::to_string(body).expect("Failed to serialize body");
        self.post_raw(uri, json_body, token).await
    }

    /// Send a POST request with a body that is not necessarily valid JSON
    pub async fn post_raw(
        &self,
        uri: &str,
        body: impl Into<Body>,
        token: Option<&str>,
    ) -> TestResponse {
        let request = Self::builder("POST", uri, token)
            .header("content-type", "application/json")
            .body(body.into())
            .expect("Failed to build request");

        self.request(request).await
    }
}

/// Test response wrapper
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
    pub headers: axum::http::HeaderMap,
}

impl TestResponse {
    /// Get response body as string
    pub fn text(&self) -> String {
        String::from_utf8(self.body.clone()).expect("Response body is not valid UTF-8")
    }

    /// Parse response body as JSON
    pub fn json<T: for<'de> Deserialize<'de>>(&self) -> T {
        serde_json::from_slice(&self.body).expect("Failed to parse JSON response")
    }

    /// Assert status code
    pub fn assert_status(&self, expected: StatusCode) {
        assert_eq!(
            self.status,
            expected,
            "Expected status {}, got {}. Body: {}",
            expected,
            self.status,
            self.text()
        );
    }

    /// The `error` field of a `{"error": ...}` body
    pub fn error(&self) -> String {
        let body: Value = self.json();
        body["error"]
            .as_str()
            .unwrap_or_else(|| panic!("No error field in {body}"))
            .to_string()
    }
}

// ============================================================================
// Tokens
// ============================================================================

fn now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Clock before epoch")
        .as_secs()
}

/// Access token shaped like the provider's: HS256, audience `authenticated`
pub fn create_access_token(user_id: &str, email: &str, secret: &str) -> String {
    let claims = json!({
        "sub": user_id,
        "email": email,
        "aud": "authenticated",
        "role": "authenticated",
        "exp": now() + 3600,
    });

    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("Failed to sign test token")
}

/// Test data helpers
pub mod test_data {
    /// Unique username so tests never share an account
    pub fn unique_username(base: &str) -> String {
        let uuid = uuid::Uuid::new_v4();
        format!("{}_{}", base, &uuid.to_string()[..8])
    }
}
