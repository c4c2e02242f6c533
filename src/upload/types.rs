use derivative::Derivative;
use serde::de::{DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

pub const VALIDATION_MESSAGE: &str = "Please select a file first";
pub const SERVICE_FALLBACK_MESSAGE: &str = "Failed to detect emotion";
pub const TRANSPORT_MESSAGE: &str = "Failed to connect to server";

#[derive(Clone)]
enum BlobSource {
    /// Read by the upload worker, never on the UI thread.
    File(PathBuf),
    Memory(Arc<[u8]>),
}

/// The file the user picked: its name, size and where its bytes live.
#[derive(Derivative, Clone)]
#[derivative(Debug)]
pub struct Blob {
    pub name: String,
    pub mime: Option<String>,
    size: u64,
    #[derivative(Debug = "ignore")]
    source: BlobSource,
}

fn guess_mime(name: &str) -> Option<String> {
    mime_guess::from_path(name)
        .first()
        .map(|mime| mime.essence_str().to_string())
}

impl Blob {
    pub fn new(name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        let name = name.into();
        let bytes: Arc<[u8]> = bytes.into();
        Self {
            mime: guess_mime(&name),
            size: bytes.len() as u64,
            name,
            source: BlobSource::Memory(bytes),
        }
    }

    /// Only stats the file; the bytes are loaded when the request is built.
    pub fn from_path(path: &Path) -> Result<Self, UploadError> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        let read_error = |source| UploadError::Read {
            name: name.clone(),
            source,
        };
        let metadata = fs::metadata(path).map_err(read_error)?;
        if !metadata.is_file() {
            return Err(read_error(io::Error::new(
                io::ErrorKind::InvalidInput,
                "not a regular file",
            )));
        }

        Ok(Self {
            mime: guess_mime(&name),
            size: metadata.len(),
            name,
            source: BlobSource::File(path.to_path_buf()),
        })
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub async fn read(&self) -> Result<Vec<u8>, TransportError> {
        match &self.source {
            BlobSource::File(path) => {
                tokio::fs::read(path)
                    .await
                    .map_err(|source| TransportError::Read {
                        name: self.name.clone(),
                        source,
                    })
            }
            BlobSource::Memory(bytes) => Ok(bytes.to_vec()),
        }
    }
}

/// JavaScript truthiness: `null`, `false`, `0`, `NaN` and `""` are false.
fn truthy<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => false,
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    })
}

/// A field of the wrong type is treated as absent.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Body returned by the inference service, on success and on failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PredictResponse {
    #[serde(default, deserialize_with = "truthy")]
    pub success: bool,
    #[serde(default, deserialize_with = "lenient")]
    pub emotion: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub error: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub confidence: Option<f32>,
    #[serde(default, deserialize_with = "lenient")]
    pub probabilities: BTreeMap<String, f32>,
}

#[derive(Debug, Clone)]
pub struct Prediction {
    pub emotion: String,
    pub confidence: Option<f32>,
    /// Most likely label first.
    pub probabilities: Vec<(String, f32)>,
}

impl Prediction {
    pub fn new(
        emotion: String,
        confidence: Option<f32>,
        probabilities: BTreeMap<String, f32>,
    ) -> Self {
        let mut probabilities: Vec<(String, f32)> = probabilities.into_iter().collect();
        probabilities.sort_by(|a, b| b.1.total_cmp(&a.1));
        Self {
            emotion,
            confidence,
            probabilities,
        }
    }
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to read {name}: {source}")]
    Read {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("{}", VALIDATION_MESSAGE)]
    Validation,
    #[error("{0}")]
    Service(String),
    #[error("{}", TRANSPORT_MESSAGE)]
    Transport(#[source] TransportError),
    #[error("A request is already in progress")]
    Busy,
    #[error("Failed to read {name}: {source}")]
    Read {
        name: String,
        #[source]
        source: std::io::Error,
    },
}
