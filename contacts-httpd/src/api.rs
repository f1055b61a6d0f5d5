use std::sync::Arc;
use std::time::Duration;

use axum::http::header::CONTENT_TYPE;
use axum::http::Method;
use axum::response::{IntoResponse, Json};
use axum::routing::get;
use axum::Router;
use serde_json::json;
use tokio::sync::RwLock;
use tower_http::cors::{self, CorsLayer};

mod axum_extra;
mod contacts;
mod error;

use crate::store::ContactStore;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// State shared by the API handlers.
///
/// Handlers hold the store lock for the duration of an operation, so requests
/// are applied one after the other.
#[derive(Clone)]
pub struct Context {
    store: Arc<RwLock<ContactStore>>,
}

impl Context {
    pub fn new(store: ContactStore) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
        }
    }

    #[cfg(test)]
    pub fn store(&self) -> &Arc<RwLock<ContactStore>> {
        &self.store
    }
}

pub fn router(ctx: Context) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .merge(contacts::router(ctx))
        .layer(
            CorsLayer::new()
                .max_age(Duration::from_secs(86400))
                .allow_origin(cors::Any)
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                .allow_headers([CONTENT_TYPE]),
        )
}

async fn root_handler() -> impl IntoResponse {
    let response = json!({
        "path": "/api",
        "version": VERSION,
        "links": [
            {
                "href": "/contacts",
                "rel": "contacts",
                "type": "GET"
            }
        ]
    });

    Json(response)
}

#[cfg(test)]
mod routes {
    use axum::http::StatusCode;

    use crate::api::test::{self, get};

    #[tokio::test]
    async fn test_root_links() {
        let app = super::router(test::seed());
        let response = get(&app, "/").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.json().await["links"][0]["href"], "/contacts");
    }
}
