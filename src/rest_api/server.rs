//! REST server
//!
//! Owns the axum router and the listener lifecycle. All routes share
//! one path and differ only by method.

use std::io;

use axum::routing::{delete, get, post, put};
use axum::Router;
use tokio::net::TcpListener;

use crate::observability::{self, Event};
use crate::rest_api::config::HttpConfig;
use crate::rest_api::students;
use crate::store::Database;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
}

/// HTTP server serving the student routes.
pub struct RestServer {
    addr: String,
    router: Router,
}

impl RestServer {
    /// Build the server against an open database.
    pub fn new(config: &HttpConfig, db: Database) -> Self {
        Self {
            addr: config.socket_addr(),
            router: build_router(db),
        }
    }

    /// Address the server will bind to
    pub fn socket_addr(&self) -> &str {
        &self.addr
    }

    /// Consume the server and return its router.
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind the listener and serve until shutdown.
    pub async fn start(self) -> io::Result<()> {
        observability::log_event_with_fields(Event::Serving, &[("addr", self.addr.as_str())]);

        let listener = TcpListener::bind(self.addr.as_str()).await?;
        axum::serve(listener, self.router).await
    }
}

fn build_router(db: Database) -> Router {
    Router::new()
        .route("/students", get(students::list_students))
        .route("/students", post(students::create_student))
        .route("/students", put(students::update_student))
        .route("/students", delete(students::delete_student))
        .with_state(AppState { db })
}
