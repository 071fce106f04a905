//! Shared helpers for driving the router in-process

#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header::CONTENT_TYPE, Method, Request, StatusCode};
use axum::Router;
use otpdesk::http_server::{HttpServer, HttpServerConfig};
use otpdesk::store::{InMemoryStore, JsonFileStore, RecordStore};
use serde_json::Value;
use tower::ServiceExt;

pub fn memory_router() -> (Arc<InMemoryStore>, Router) {
    let store = Arc::new(InMemoryStore::new());
    let router = HttpServer::build_router(&HttpServerConfig::default(), store.clone());
    (store, router)
}

pub fn file_router(dir: &Path) -> Router {
    let store: Arc<dyn RecordStore> = Arc::new(JsonFileStore::new(dir));
    HttpServer::build_router(&HttpServerConfig::default(), store)
}

pub async fn send(router: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

pub async fn post(router: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(router, Method::POST, uri, Some(body)).await
}

pub async fn get(router: &Router, uri: &str) -> (StatusCode, Value) {
    send(router, Method::GET, uri, None).await
}
