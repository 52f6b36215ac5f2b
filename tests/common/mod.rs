#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use actix_http::Request;
use actix_web::{
    body::MessageBody,
    dev::{Service, ServiceResponse},
    http::{header, StatusCode},
    middleware::Logger,
    test, web, App,
};
use async_trait::async_trait;
use edge_taskflow::{
    ai::{ChatMessage, LanguageModel, TextGenerator},
    cors, routes,
    state::AppState,
    store::MemoryStore,
    AppError,
};
use parking_lot::Mutex;
use serde_json::{json, Value};

/// Model double that answers every prompt with the same text and counts calls.
pub struct ScriptedModel {
    reply: Mutex<Result<String, AppError>>,
    calls: AtomicUsize,
    last_prompt: Mutex<Vec<ChatMessage>>,
}

impl ScriptedModel {
    pub fn replying(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Mutex::new(Ok(reply.to_string())),
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Mutex::new(Err(AppError::UpstreamError(message.to_string()))),
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Vec<ChatMessage> {
        self.last_prompt.lock().clone()
    }
}

#[async_trait]
impl LanguageModel for ScriptedModel {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_prompt.lock() = messages.to_vec();
        self.reply.lock().clone()
    }
}

pub struct TestContext {
    pub store: Arc<MemoryStore>,
    pub state: web::Data<AppState>,
}

impl TestContext {
    pub fn new(ai: TextGenerator) -> Self {
        let store = Arc::new(MemoryStore::new());
        let state = web::Data::new(AppState::new(store.clone(), ai));
        Self { store, state }
    }

    /// Context whose model is not configured.
    pub fn without_model() -> Self {
        Self::new(TextGenerator::unavailable())
    }

    pub fn with_model(model: Arc<ScriptedModel>) -> Self {
        Self::new(TextGenerator::new(Some(model)))
    }

    pub fn with_session_ttl(ai: TextGenerator, ttl_secs: u64) -> Self {
        let store = Arc::new(MemoryStore::new());
        let state = web::Data::new(AppState::new(store.clone(), ai).with_session_ttl(ttl_secs));
        Self { store, state }
    }
}

/// Builds the application exactly as `main` does, on top of the given state.
pub async fn init_app(
    state: web::Data<AppState>,
) -> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error> {
    test::init_service(
        App::new()
            .app_data(state)
            .wrap(cors::Preflight)
            .wrap(Logger::default())
            .wrap(cors::headers())
            .configure(routes::config)
            .default_service(web::to(routes::not_found)),
    )
    .await
}

pub async fn register<S, B>(app: &S, email: &str, password: &str) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({ "email": email, "password": password }))
        .to_request();
    send(app, req).await
}

pub async fn login<S, B>(app: &S, email: &str, password: &str) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": email, "password": password }))
        .to_request();
    send(app, req).await
}

/// Registers and logs a user in, returning the session token.
pub async fn register_and_login<S, B>(app: &S, email: &str, password: &str) -> String
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let (status, body) = register(app, email, password).await;
    assert_eq!(status, StatusCode::OK, "register failed: {}", body);
    let (status, body) = login(app, email, password).await;
    assert_eq!(status, StatusCode::OK, "login failed: {}", body);
    body["token"]
        .as_str()
        .expect("login response carries a token")
        .to_string()
}

pub async fn create_task<S, B>(
    app: &S,
    token: &str,
    title: &str,
    description: &str,
) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/api/tasks")
        .insert_header((header::AUTHORIZATION, token))
        .set_json(json!({ "title": title, "description": description }))
        .to_request();
    send(app, req).await
}

pub async fn list_tasks<S, B>(app: &S, token: &str) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let req = test::TestRequest::get()
        .uri("/api/tasks")
        .insert_header((header::AUTHORIZATION, token))
        .to_request();
    send(app, req).await
}

/// Sends a request and decodes the body as JSON (`Value::Null` for empty bodies,
/// a JSON string for non-JSON bodies).
pub async fn send<S, B>(app: &S, req: Request) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let resp = test::call_service(app, req).await;
    let status = resp.status();
    let bytes = test::read_body(resp).await;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, body)
}
