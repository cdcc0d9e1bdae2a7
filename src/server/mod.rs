mod handlers;

use std::{net::SocketAddr, sync::Arc, time::Duration};

use axum::{Router, extract::State, routing::get};
use sea_orm::Iterable;
use tokio::signal;
use tower::ServiceBuilder;
use tower_governor::{GovernorLayer, governor::GovernorConfigBuilder};
use tower_http::{
  cors::{Any, CorsLayer},
  trace::TraceLayer,
};

use crate::{entity::Platform, prelude::*, state::AppState};

/// Routes without rate limiting. `/apps/{type}` is registered once per
/// platform, so unknown platforms never reach a handler.
pub fn router(app: Arc<AppState>) -> Router {
  let mut router = Router::new()
    .route("/health", get(handlers::health))
    .route("/apps/version/latest", get(handlers::latest_app_version));

  for platform in Platform::iter() {
    router = router.route(
      &format!("/apps/{}", platform.slug()),
      get(move |State(app): State<Arc<AppState>>| {
        handlers::app_info(app, platform)
      }),
    );
  }

  router
    .layer(
      ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(
        CorsLayer::new()
          .allow_origin(Any)
          .allow_methods(Any)
          .allow_headers(Any),
      ),
    )
    .with_state(app)
}

pub async fn serve(app: Arc<AppState>) -> anyhow::Result<()> {
  let governor_conf = Arc::new(
    GovernorConfigBuilder::default()
      .per_second(app.config.rate_limit_per_second)
      .burst_size(app.config.rate_limit_burst)
      .finish()
      .context("Failed to build rate limiter config")?,
  );

  let limiter = governor_conf.limiter().clone();
  let addr = app.config.addr();

  let router = router(app)
    .layer(GovernorLayer::new(governor_conf))
    .into_make_service_with_connect_info::<SocketAddr>();

  let listener = tokio::net::TcpListener::bind(addr)
    .await
    .with_context(|| format!("Failed to bind {addr}"))?;
  info!("HTTP server listening on {addr}");

  let limiter = async {
    loop {
      tokio::time::sleep(Duration::from_secs(60)).await;
      limiter.retain_recent();
    }
  };

  let server = async {
    axum::serve(listener, router)
      .with_graceful_shutdown(shutdown_signal())
      .await
      .context("Axum server error")
  };

  tokio::select! {
    result = server => {
      match &result {
        Ok(()) => info!("Server stopped gracefully"),
        Err(err) => error!("Server stopped with error: {err}"),
      }
      result
    }
    _ = limiter => {
      error!("Rate limiter cleaner stopped unexpectedly!");
      Ok(())
    }
  }
}

async fn shutdown_signal() {
  let ctrl_c = async {
    if let Err(err) = signal::ctrl_c().await {
      error!("Failed to listen for Ctrl+C: {err}");
    }
  };

  #[cfg(unix)]
  let terminate = async {
    match signal::unix::signal(signal::unix::SignalKind::terminate()) {
      Ok(mut sig) => {
        sig.recv().await;
      }
      Err(err) => {
        error!("Failed to install SIGTERM handler: {err}");
        std::future::pending::<()>().await;
      }
    }
  };

  #[cfg(not(unix))]
  let terminate = std::future::pending::<()>();

  tokio::select! {
    _ = ctrl_c => {},
    _ = terminate => {},
  }

  info!("Received shutdown signal");
}
