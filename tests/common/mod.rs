#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use yoklama::router::init_router;
use yoklama::state::{AppConfig, AppState, build_app_state};
use yoklama_config::{
    CorsConfig, DemoConfig, JwtConfig, RateLimitConfig, ScheduleConfig, StorageConfig,
};
use yoklama_core::{KeyValueStore, MemoryStore};

pub const DEMO_EMAIL: &str = "ogretmen@okul.edu.tr";
pub const DEMO_PASSWORD: &str = "demo123";

pub fn test_config(rate_limit: RateLimitConfig) -> AppConfig {
    AppConfig {
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
            access_token_expiry: 3600,
        },
        cors: CorsConfig {
            allowed_origins: vec!["http://localhost:5173".to_string()],
        },
        rate_limit,
        demo: DemoConfig {
            latency: Duration::ZERO,
            report_delay: Duration::ZERO,
            bcrypt_cost: 4,
            ..DemoConfig::default()
        },
        schedule: ScheduleConfig::default(),
        storage: StorageConfig::default(),
    }
}

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub store: Arc<dyn KeyValueStore>,
}

pub async fn setup_with_store(store: Arc<dyn KeyValueStore>, config: AppConfig) -> TestApp {
    let state = build_app_state(store.clone(), config).await.unwrap();
    TestApp {
        router: init_router(state.clone()),
        state,
        store,
    }
}

pub async fn setup_test_app() -> TestApp {
    setup_with_store(
        Arc::new(MemoryStore::new()),
        test_config(RateLimitConfig::disabled()),
    )
    .await
}

impl TestApp {
    /// Sends a JSON request and returns the status with the parsed body
    /// (`Value::Null` when the body is empty or not JSON).
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    pub async fn get(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.request("GET", uri, Some(token), None).await
    }

    pub async fn login_as(&self, email: &str, password: &str) -> String {
        let (status, body) = self
            .request(
                "POST",
                "/api/auth/login",
                None,
                Some(json!({ "email": email, "password": password })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {}", body);
        body["accessToken"].as_str().unwrap().to_string()
    }

    /// Session token for the demo teacher.
    pub async fn login(&self) -> String {
        self.login_as(DEMO_EMAIL, DEMO_PASSWORD).await
    }
}
