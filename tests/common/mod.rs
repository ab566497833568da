#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, Response, StatusCode, header},
};
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;
use watchlist::api::AppState;
use watchlist::config::Config;

/// App state over a database inside `dir`, which outlives the state.
pub async fn spawn_state(dir: &TempDir) -> Arc<AppState> {
    let path = dir.path().join("watchlist.db");

    let mut config = Config::default();
    config.general.database_path = format!("sqlite:{}", path.display());

    watchlist::api::create_app_state_from_config(config)
        .await
        .expect("Failed to create app state")
}

/// Drives the router one request at a time, carrying the session cookie
/// between requests the way a browser would.
pub struct TestClient {
    pub app: Router,
    pub state: Arc<AppState>,
    cookie: Option<String>,
    _dir: TempDir,
}

impl TestClient {
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let state = spawn_state(&dir).await;
        Self {
            app: watchlist::api::router(state.clone()),
            state,
            cookie: None,
            _dir: dir,
        }
    }

    pub async fn get(&mut self, uri: &str) -> Response<Body> {
        let request = self.request("GET", uri).body(Body::empty()).unwrap();
        self.send(request).await
    }

    pub async fn post_form(&mut self, uri: &str, body: &str) -> Response<Body> {
        let request = self
            .request("POST", uri)
            .header(header::CONTENT_TYPE, mime::APPLICATION_WWW_FORM_URLENCODED.as_ref())
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    pub async fn login(&mut self) {
        let response = self
            .post_form("/login", "username=admin&password=password")
            .await;
        assert_redirect(&response, "/");
    }

    fn request(&self, method: &str, uri: &str) -> axum::http::request::Builder {
        let builder = Request::builder().method(method).uri(uri);
        match &self.cookie {
            Some(cookie) => builder.header(header::COOKIE, cookie),
            None => builder,
        }
    }

    async fn send(&mut self, request: Request<Body>) -> Response<Body> {
        let response = self.app.clone().oneshot(request).await.unwrap();

        if let Some(set_cookie) = response.headers().get(header::SET_COOKIE) {
            let pair = set_cookie
                .to_str()
                .unwrap()
                .split(';')
                .next()
                .unwrap()
                .to_string();
            let has_value = pair.split_once('=').is_some_and(|(_, v)| !v.is_empty());
            self.cookie = has_value.then_some(pair);
        }

        response
    }
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub fn assert_redirect(response: &Response<Body>, location: &str) {
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        location
    );
}
