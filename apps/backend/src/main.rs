use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use roshambo::config::{EnvSource, ServerConfig};
use roshambo::middleware::{cors_middleware, RequestLog};
use roshambo::vision::{
    BlindClassifier, FingerGestureClassifier, GestureClassifier, RemoteHandDetector,
};
use roshambo::{routes, AppError, AppState};
use tracing::{info, warn};

mod telemetry;

fn build_classifier(config: &ServerConfig) -> Result<Arc<dyn GestureClassifier>, AppError> {
    match &config.classifier_url {
        Some(url) => {
            let detector = RemoteHandDetector::new(url.clone())?;
            info!(%url, "using remote hand detector");
            Ok(Arc::new(FingerGestureClassifier::new(detector)))
        }
        None => {
            warn!("CLASSIFIER_URL not set; gestures will never be recognised");
            Ok(Arc::new(BlindClassifier))
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    let config = match ServerConfig::from_source(&EnvSource) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("❌ {}", AppError::from(err));
            std::process::exit(1);
        }
    };
    let classifier = match build_classifier(&config) {
        Ok(classifier) => classifier,
        Err(err) => {
            eprintln!("❌ {err}");
            std::process::exit(1);
        }
    };

    info!(
        host = %config.host,
        port = config.port,
        win_threshold = config.game.win_threshold,
        max_order = config.predictor.max_order,
        "starting roshambo backend"
    );

    let app_state = AppState::new(config.game.clone(), config.predictor.clone(), classifier);
    let registry = app_state.websocket_registry();
    let data = web::Data::new(app_state);
    let origins = config.cors_allowed_origins.clone();

    let server = HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware(&origins))
            .wrap(RequestLog)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .disable_signals()
    .bind((config.host.as_str(), config.port))?
    .run();

    // Websockets never finish on their own; close them before a graceful stop.
    let handle = server.handle();
    actix_web::rt::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let closed = registry.close_all_connections();
            info!(connections = closed.len(), "shutting down");
            handle.stop(true).await;
        }
    });

    server.await
}
