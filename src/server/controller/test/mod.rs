use axum::{
    body::Body,
    http::{header, HeaderMap, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower::ServiceExt;

use crate::server::{
    model::user::User,
    router::router,
    service::{
        mail::{MailService, RecordingMailer},
        storage::RecordingStorage,
        token::TokenService,
    },
    state::{AppState, LookupApis},
};


/// Router wired to an in-memory database and recording mail and storage backends.
struct TestApp {
    router: Router,
    tokens: TokenService,
    storage: RecordingStorage,
}

impl TestApp {
    fn new(db: &DatabaseConnection) -> Self {
        let tokens = TokenService::new(
            "access-secret".to_string(),
            "refresh-secret".to_string(),
            "verification-secret".to_string(),
            "reset-secret".to_string(),
        );
        let storage = RecordingStorage::default();
        let mail = MailService::new(
            Arc::new(RecordingMailer::default()),
            "http://localhost:5173".to_string(),
        );

        let state = AppState::new(
            db.clone(),
            reqwest::Client::new(),
            tokens.clone(),
            mail,
            Arc::new(storage.clone()),
            LookupApis {
                nhtsa_api_url: "http://127.0.0.1:9".to_string(),
                google_geocode_url: "http://127.0.0.1:9".to_string(),
                google_maps_api_key: None,
            },
        );

        Self {
            router: router().with_state(state),
            tokens,
            storage,
        }
    }

    fn bearer(&self, user: entity::user::Model) -> String {
        let token = self.tokens.issue_access(&User::from_entity(user)).unwrap();
        format!("Bearer {}", token)
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, HeaderMap, Vec<u8>) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.into_body().collect().await.unwrap().to_bytes();

        (status, headers, body.to_vec())
    }

    async fn send_json(&self, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let (status, _, body) = self.send(request).await;
        let json = if body.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&body).unwrap()
        };

        (status, json)
    }
}

fn json_request(method: &str, uri: &str, auth: Option<&str>, body: serde_json::Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(auth) = auth {
        builder = builder.header(header::AUTHORIZATION, auth);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get_request(uri: &str, auth: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(auth) = auth {
        builder = builder.header(header::AUTHORIZATION, auth);
    }
    builder.body(Body::empty()).unwrap()
}
