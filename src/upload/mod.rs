mod client;
mod types;

pub use client::{HttpPredictClient, PredictClient};
pub use types::{
    Blob, PredictResponse, Prediction, TransportError, UploadError, SERVICE_FALLBACK_MESSAGE,
    TRANSPORT_MESSAGE, VALIDATION_MESSAGE,
};
