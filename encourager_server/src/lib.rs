#![forbid(unsafe_code)]

//! Verse lookup HTTP service.
//!
//! Routes:
//! - `GET /api/verse/random?lang=&index=` - random or clamped index pick
//! - `GET /api/health` - liveness

pub mod routes;

use axum::{http::HeaderValue, routing::get};
use encourager_core::{Catalog, RandomSource, ThreadRandom, VerseLookup};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

pub use axum::Router;

/// Lookup shared across handlers
pub type SharedLookup = Arc<VerseLookup<Catalog, Box<dyn RandomSource>>>;

/// Build the lookup served by the router
pub fn build_lookup(catalog: Catalog) -> SharedLookup {
    build_lookup_with(catalog, Box::new(ThreadRandom))
}

/// Build a lookup with an explicit random source
pub fn build_lookup_with(catalog: Catalog, random: Box<dyn RandomSource>) -> SharedLookup {
    let errors = catalog.validate();
    for error in &errors {
        tracing::warn!("Catalog validation: {}", error);
    }
    Arc::new(VerseLookup::new(catalog, random))
}

/// Cross-origin policy: `*` allows any origin, otherwise exactly one
pub fn cors_layer(allowed_origin: &str) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if allowed_origin.trim() == "*" {
        return layer.allow_origin(Any);
    }

    match HeaderValue::from_str(allowed_origin.trim()) {
        Ok(origin) => layer.allow_origin(AllowOrigin::list([origin])),
        Err(e) => {
            tracing::warn!(
                "Invalid allowed origin {:?}: {}. Cross-origin requests will be refused.",
                allowed_origin,
                e
            );
            layer
        }
    }
}

/// Create the service router
pub fn create_router(lookup: SharedLookup, allowed_origin: &str) -> Router {
    Router::new()
        .route("/api/verse/random", get(routes::random_verse))
        .route("/api/health", get(routes::health))
        .layer(cors_layer(allowed_origin))
        .with_state(lookup)
}

/// Serve `app` on `listener` until the process exits
pub async fn serve(listener: TcpListener, app: Router) -> std::io::Result<()> {
    axum::serve(listener, app).await
}
