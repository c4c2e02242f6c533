use crate::upload::types::{Blob, PredictResponse, TransportError};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use tracing::{debug, info};

#[async_trait]
pub trait PredictClient: Send + Sync {
    async fn predict(&self, file: &Blob) -> Result<PredictResponse, TransportError>;
}

#[derive(Clone)]
pub struct HttpPredictClient {
    endpoint: String,
    client: reqwest::Client,
}

impl HttpPredictClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: reqwest::Client::new(),
        }
    }

    async fn build_form(file: &Blob) -> Result<Form, TransportError> {
        let mut part = Part::bytes(file.read().await?).file_name(file.name.clone());
        if let Some(mime) = &file.mime {
            part = part.mime_str(mime)?;
        }
        Ok(Form::new().part("file", part))
    }
}

#[async_trait]
impl PredictClient for HttpPredictClient {
    async fn predict(&self, file: &Blob) -> Result<PredictResponse, TransportError> {
        info!(
            endpoint = %self.endpoint,
            file = %file.name,
            size = file.size(),
            "Sending prediction request"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(Self::build_form(file).await?)
            .send()
            .await?;

        // The service answers failures with a JSON body too, so the status is only logged.
        let status = response.status();
        let body = response.bytes().await?;
        debug!(%status, bytes = body.len(), "Response received");

        let parsed: PredictResponse = serde_json::from_slice(&body)?;
        debug!(
            success = parsed.success,
            emotion = ?parsed.emotion,
            error = ?parsed.error,
            "Response decoded"
        );
        Ok(parsed)
    }
}
