// tests/common/mod.rs

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use parent_committee::{
    config::{AppState, Settings, StorageBackend},
    db::{MemoryStore, Store},
    models::auth::Claims,
    routes::build_router,
};

pub const JWT_SECRET: &str = "segredo-de-teste";
pub const JWT_AUDIENCE: &str = "authenticated";

pub struct TestApp {
    pub router: Router,
    pub memory: Arc<MemoryStore>,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

pub struct TestRequest<'a> {
    app: &'a TestApp,
    builder: axum::http::request::Builder,
    body: Option<Value>,
}

fn settings() -> Settings {
    Settings {
        storage: StorageBackend::Memory,
        jwt_secret: JWT_SECRET.into(),
        jwt_audience: JWT_AUDIENCE.into(),
        bind_addr: "127.0.0.1:0".into(),
        public_base_url: "http://localhost:3000".into(),
        cors_allowed_origin: None,
    }
}

pub fn token_for(user_id: Uuid) -> String {
    let now = Utc::now().timestamp() as usize;
    let claims = Claims {
        sub: user_id,
        email: Some(format!("{}@example.com", user_id.simple())),
        aud: JWT_AUDIENCE.into(),
        exp: now + 3600,
        iat: now,
    };
    encode(&Header::default(), &claims, &EncodingKey::from_secret(JWT_SECRET.as_ref())).unwrap()
}

impl TestApp {
    pub fn new() -> Self {
        let memory = Arc::new(MemoryStore::new());
        let state = AppState::from_store(Store::memory(memory.clone()), &settings()).unwrap();
        let router = build_router(state).unwrap();
        Self { router, memory }
    }

    pub fn request(&self, method: Method, uri: &str) -> TestRequest<'_> {
        TestRequest {
            app: self,
            builder: Request::builder().method(method).uri(uri),
            body: None,
        }
    }

    pub fn get(&self, uri: &str) -> TestRequest<'_> {
        self.request(Method::GET, uri)
    }

    pub fn post(&self, uri: &str) -> TestRequest<'_> {
        self.request(Method::POST, uri)
    }

    pub fn put(&self, uri: &str) -> TestRequest<'_> {
        self.request(Method::PUT, uri)
    }

    pub fn delete(&self, uri: &str) -> TestRequest<'_> {
        self.request(Method::DELETE, uri)
    }

    /// Abre uma turma pelo wizard e devolve (id, código de convite).
    pub async fn bootstrap_class(&self, owner: Uuid, payload: Value) -> (Uuid, String) {
        let res = self.post("/api/classes").token(owner).json(payload).send().await;
        assert_eq!(res.status, StatusCode::CREATED, "{}", res.body);
        let class = &res.body["class"];
        (
            class["id"].as_str().unwrap().parse().unwrap(),
            class["inviteCode"].as_str().unwrap().to_string(),
        )
    }
}

impl<'a> TestRequest<'a> {
    pub fn token(mut self, user_id: Uuid) -> Self {
        self.builder = self
            .builder
            .header(header::AUTHORIZATION, format!("Bearer {}", token_for(user_id)));
        self
    }

    pub fn class(mut self, class_id: Uuid) -> Self {
        self.builder = self.builder.header("x-class-id", class_id.to_string());
        self
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.builder = self.builder.header(name, value);
        self
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub async fn send(self) -> TestResponse {
        let request = match self.body {
            Some(body) => self
                .builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => self.builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse { status, headers, body }
    }
}

/// Turma de exemplo: 100 por criança, 5 crianças, 1 professora, Purim.
pub fn sample_class() -> Value {
    json!({
        "name": "גן חבצלת",
        "schoolName": "בית ספר הרצל",
        "city": "תל אביב",
        "schoolYear": 2025,
        "budgetType": "per-child",
        "budgetAmount": 100,
        "estimatedChildren": 20,
        "children": [
            { "name": "Noa Cohen", "birthday": "15/03/2020", "parent1Name": "Dana Cohen", "parent1Phone": "050-1234567" },
            { "name": "Ari Levi", "parent1Name": "Yael Levi", "parent2Name": "Moshe Levi", "parent2Phone": "052-7654321" },
            { "name": "Tamar Mizrahi", "birthday": "2020-07-01" },
            { "name": "Yoni Peretz", "address": "Herzl 10" },
            { "name": "Maya Shapiro", "birthday": "3/3" }
        ],
        "staff": [
            { "name": "Rivka", "role": "teacher", "birthday": "3/11" },
            { "name": "", "role": "assistant" }
        ],
        "events": [
            { "eventType": "purim", "amountPerKid": 20, "amountPerStaff": 50 }
        ]
    })
}
