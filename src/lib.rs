//! Documentation of a happy-thoughts message board API.
//!
//!
//!
//! # General Infrastructure
//! - Small axum service in front of a single MongoDB collection
//! - Three operations: list the 20 newest thoughts, post a thought, like a thought
//! - No auth, no pagination beyond the fixed limit, no deletes
//! - One Mongo client opened at startup and shared across all requests
//!
//!
//!
//! # Notes
//!
//! ## MongoDB
//! Every operation is exactly one round trip to the store. The service keeps no
//! state of its own, so durability and atomicity both come from Mongo: likes are
//! a server-side `$inc`, which is what keeps concurrent likes on the same record
//! from losing updates. A read-increment-write at this layer would race.
//!
//! ## Status codes
//! Validation failures return 422 with the offending fields, unknown ids return
//! 404, and store failures return 500. All three share the
//! `{"message": "Error", "error": ...}` envelope so clients only parse one
//! failure shape.
//!
//!
//!
//! # Setup
//!
//! Run against a local Mongo instance.
//! ```sh
//! MONGO_URL=mongodb://localhost:27017/project-happy cargo run
//! ```
//!
//! View current docs.
//! ```sh
//! cargo doc --open
//! ```
use std::time::Duration;

use axum::{
    Router,
    http::{Method, header::CONTENT_TYPE},
    routing::{get, post},
};

use signal::{
    ctrl_c,
    unix::{SignalKind, signal},
};
use tokio::{net::TcpListener, signal};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

pub mod config;
pub mod database;
pub mod error;
pub mod routes;
pub mod state;
pub mod thoughts;

use routes::{create_thought_handler, hello_handler, like_thought_handler, list_thoughts_handler};
use state::State;

pub async fn start_server() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Initializing state...");
    let state = State::new().await;

    info!("Starting server...");

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    let app = Router::new()
        .route("/", get(hello_handler))
        .route("/thoughts", get(list_thoughts_handler).post(create_thought_handler))
        .route("/thoughts/{thought_id}/like", post(like_thought_handler))
        .layer(cors)
        .with_state(state.clone());

    let address = format!("0.0.0.0:{}", state.config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await.unwrap();
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();

    println!("Server shutting down...");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        ctrl_c().await.expect("Failed to install Ctrl+C handler");

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal(SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;

        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
