use crate::classify::{pcm_from_upload, BhavaClassifier, ClassifyError, Prediction};
use axum::extract::{DefaultBodyLimit, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use bytes::Bytes;
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

const LOG_TARGET: &str = "server";
const MAX_UPLOAD_BYTES: usize = 32 * 1024 * 1024;

pub type SharedClassifier = Arc<dyn BhavaClassifier>;

#[derive(thiserror::Error, Debug)]
pub enum ServerError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

struct ApiError(ClassifyError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            ClassifyError::InvalidAudio(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::BAD_GATEWAY,
        };
        let body = ErrorBody {
            error: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

pub fn router(classifier: SharedClassifier) -> Router {
    Router::new()
        .route("/predict/", post(predict))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(classifier)
}

async fn predict(
    State(classifier): State<SharedClassifier>,
    body: Bytes,
) -> Result<Json<Prediction>, ApiError> {
    let pcm = pcm_from_upload(&body).map_err(ApiError)?;
    let samples = pcm.len();
    let predicted_bhava = classifier.classify(pcm).await.map_err(ApiError)?;
    tracing::info!(target: LOG_TARGET, samples, predicted = %predicted_bhava, "prediction served");
    Ok(Json(Prediction { predicted_bhava }))
}

/// Serves until `shutdown` resolves.
pub async fn serve<S>(bind_addr: &str, classifier: SharedClassifier, shutdown: S) -> Result<(), ServerError>
where
    S: Future<Output = ()> + Send + 'static,
{
    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: bind_addr.to_owned(),
            source,
        })?;
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(target: LOG_TARGET, %addr, "listening");
    }
    axum::serve(listener, router(classifier))
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(ServerError::Serve)
}
