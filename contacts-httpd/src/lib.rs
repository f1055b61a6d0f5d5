pub mod contact;
pub mod error;
pub mod store;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use axum::body::{Body, HttpBody as _};
use axum::http::{Request, Response};
use axum::middleware;
use axum::Router;
use colored::Colorize as _;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::Span;

use error::Error;
use store::ContactStore;
use tracing_extra::{tracing_middleware, ColoredStatus, RequestId, TracingInfo};

mod api;
mod tracing_extra;

/// Default port to listen on.
pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone)]
pub struct Options {
    /// Address to listen on.
    pub listen: SocketAddr,
    /// Directory of static files served for paths outside the API.
    pub assets: Option<PathBuf>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            listen: ([0, 0, 0, 0], DEFAULT_PORT).into(),
            assets: None,
        }
    }
}

/// Run the Server.
pub async fn run(options: Options) -> anyhow::Result<()> {
    let listen = options.listen;
    let request_id = RequestId::new();

    if let Some(assets) = &options.assets {
        tracing::info!("serving assets from {}", assets.display());
    }

    let app = router(&options, ContactStore::seeded())?
        .layer(middleware::from_fn(tracing_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(move |_request: &Request<Body>| {
                    tracing::info_span!("request", id = %request_id.clone().next())
                })
                .on_response(|response: &Response<Body>, latency: Duration, _span: &Span| {
                    if let Some(info) = response.extensions().get::<TracingInfo>() {
                        let size = response
                            .body()
                            .size_hint()
                            .exact()
                            .map(|n| n.to_string())
                            .unwrap_or_else(|| "0".to_string());

                        tracing::info!(
                            "{} \"{} {} {:?}\" {} {:?} {}",
                            info.peer(),
                            info.method,
                            info.uri,
                            info.version,
                            ColoredStatus(response.status()),
                            latency,
                            size.as_str().dimmed(),
                        );
                    } else {
                        tracing::info!("Processed");
                    }
                }),
        )
        .into_make_service_with_connect_info::<SocketAddr>();

    let listener = TcpListener::bind(listen)
        .await
        .map_err(|source| Error::Bind {
            addr: listen,
            source,
        })?;

    tracing::info!("listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .await
        .map_err(anyhow::Error::from)
}

/// Create a router consisting of the API and, optionally, static assets.
fn router(options: &Options, store: ContactStore) -> Result<Router, Error> {
    let ctx = api::Context::new(store);
    let app = Router::new().nest("/api", api::router(ctx));

    match &options.assets {
        Some(dir) if !dir.is_dir() => Err(Error::Assets(dir.clone())),
        Some(dir) => Ok(app.fallback_service(ServeDir::new(dir))),
        None => Ok(app),
    }
}

pub mod logger {
    use tracing::dispatcher::Dispatch;

    pub fn init() -> Result<(), tracing::subscriber::SetGlobalDefaultError> {
        tracing::dispatcher::set_global_default(Dispatch::new(subscriber()))
    }

    #[cfg(feature = "logfmt")]
    pub fn subscriber() -> impl tracing::Subscriber {
        use tracing_subscriber::layer::SubscriberExt as _;
        use tracing_subscriber::EnvFilter;

        tracing_subscriber::Registry::default()
            .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
            .with(tracing_logfmt::layer())
    }

    #[cfg(not(feature = "logfmt"))]
    pub fn subscriber() -> impl tracing::Subscriber {
        tracing_subscriber::FmtSubscriber::builder()
            .with_target(false)
            .with_max_level(tracing::Level::INFO)
            .finish()
    }
}

#[cfg(test)]
mod routes {
    use std::fs;

    use axum::http::StatusCode;
    use pretty_assertions::assert_eq;

    use crate::api::test::get;
    use crate::store::ContactStore;

    #[tokio::test]
    async fn test_invalid_route_returns_404() {
        let app = super::router(&super::Options::default(), ContactStore::seeded()).unwrap();
        let response = get(&app, "/aa/a").await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_api_is_nested() {
        let app = super::router(&super::Options::default(), ContactStore::seeded()).unwrap();
        let response = get(&app, "/api/contacts").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.json().await.as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_assets_are_served() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("index.html"), "<h1>Contacts</h1>").unwrap();

        let options = super::Options {
            assets: Some(tmp.path().to_path_buf()),
            ..super::Options::default()
        };
        let app = super::router(&options, ContactStore::seeded()).unwrap();

        let response = get(&app, "/index.html").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(&response.body().await[..], b"<h1>Contacts</h1>");

        let response = get(&app, "/api/contacts").await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = get(&app, "/missing.css").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_missing_assets_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let options = super::Options {
            assets: Some(tmp.path().join("views")),
            ..super::Options::default()
        };

        assert!(matches!(
            super::router(&options, ContactStore::seeded()),
            Err(super::Error::Assets(_))
        ));
    }
}
