use crate::bhava::Rasa;
use crate::classify::{pcm_to_bytes, BhavaClassifier, ClassifyError, Prediction};
use crate::util::{is_http_retryable, retry_with_backoff, RetryConfig};
use bytes::Bytes;
use futures::future::BoxFuture;
use futures::FutureExt;
use reqwest::Client;
use url::Url;

const LOG_TARGET: &str = "classify::remote";
pub const PREDICT_PATH: &str = "predict/";

/// Client for a `POST /predict/` endpoint.
#[derive(Clone)]
pub struct RemoteClassifier {
    client: Client,
    endpoint: Url,
    retry: RetryConfig,
}

impl RemoteClassifier {
    /// `base` is the server root, e.g. `http://127.0.0.1:8000/`.
    pub fn new(base: &str) -> Result<Self, ClassifyError> {
        let endpoint = Url::parse(base)?.join(PREDICT_PATH)?;
        Ok(Self {
            client: Client::new(),
            endpoint,
            retry: RetryConfig::default(),
        })
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    async fn post_once(&self, body: Bytes) -> Result<Rasa, ClassifyError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
            .body(body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let text = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_owned());
            return Err(ClassifyError::HttpStatus(status, text));
        }

        let prediction: Prediction = response.json().await?;
        Ok(prediction.predicted_bhava)
    }
}

fn is_retryable(err: &ClassifyError) -> bool {
    match err {
        ClassifyError::HttpStatus(status, _) => is_http_retryable(*status),
        ClassifyError::Http(e) => e.is_timeout() || e.is_connect(),
        _ => false,
    }
}

impl BhavaClassifier for RemoteClassifier {
    fn classify(&self, pcm: Vec<i16>) -> BoxFuture<'_, Result<Rasa, ClassifyError>> {
        let body = Bytes::from(pcm_to_bytes(&pcm));
        async move {
            let rasa = retry_with_backoff(&self.retry, || self.post_once(body.clone()), is_retryable).await?;
            tracing::debug!(target: LOG_TARGET, endpoint = %self.endpoint, rasa = %rasa, "remote prediction");
            Ok(rasa)
        }
        .boxed()
    }
}
