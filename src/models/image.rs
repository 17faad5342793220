use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use base64::Engine;
use bytes::Bytes;

use crate::consts::MAX_SIZE;
use crate::error::{Error, ImgbbResult};

/// What gets sent as the `image` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImagePayload {
    /// Raw bytes, sent as a file part.
    File(Bytes),

    /// A remote URL or a base64 string, sent as a plain field.
    Source(Arc<str>),
}

impl ImagePayload {
    pub fn len(&self) -> usize {
        match self {
            ImagePayload::File(bytes) => bytes.len(),
            ImagePayload::Source(source) => source.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A validated image ready to be uploaded.
///
/// Every constructor checks the payload size, so an `Image` that exists is
/// never empty and never above 32 MiB.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    /// Uploaded file name, or the `name` field for source payloads
    name: String,

    /// Payload length in bytes
    size: usize,

    /// Lifetime on the service; `None` means the image never expires
    expiration: Option<Duration>,

    payload: ImagePayload,
}

impl Image {
    /// Creates an image uploaded as a file part.
    pub fn new(
        name: impl Into<String>,
        expiration: Option<Duration>,
        file: impl Into<Bytes>,
    ) -> ImgbbResult<Self> {
        Self::with_payload(name.into(), expiration, ImagePayload::File(file.into()))
    }

    /// Creates an image from a remote URL or an already encoded base64 string.
    pub fn from_source(
        name: impl Into<String>,
        expiration: Option<Duration>,
        source: impl Into<Arc<str>>,
    ) -> ImgbbResult<Self> {
        Self::with_payload(name.into(), expiration, ImagePayload::Source(source.into()))
    }

    /// Creates a source image by base64 encoding `file`.
    pub fn from_base64(
        name: impl Into<String>,
        expiration: Option<Duration>,
        file: impl AsRef<[u8]>,
    ) -> ImgbbResult<Self> {
        let file = file.as_ref();
        if file.is_empty() {
            return Err(Error::file_empty());
        }
        let encoded = base64::engine::general_purpose::STANDARD.encode(file);
        Self::from_source(name, expiration, encoded)
    }

    /// Reads an image from disk, named after the file.
    pub async fn from_path(
        path: impl AsRef<Path>,
        expiration: Option<Duration>,
    ) -> ImgbbResult<Self> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .and_then(|s| s.to_str())
            .ok_or_else(|| Error::internal(format!("invalid file name: {}", path.display())))?
            .to_string();

        let metadata = tokio::fs::metadata(path)
            .await
            .map_err(|e| Error::internal(format!("read image metadata: {e}")))?;
        if metadata.len() > MAX_SIZE as u64 {
            return Err(Error::file_too_large());
        }

        let file = tokio::fs::read(path)
            .await
            .map_err(|e| Error::internal(format!("read image file: {e}")))?;

        Self::new(name, expiration, file)
    }

    fn with_payload(
        name: String,
        expiration: Option<Duration>,
        payload: ImagePayload,
    ) -> ImgbbResult<Self> {
        let size = payload.len();
        if size == 0 {
            return Err(Error::file_empty());
        }
        if size > MAX_SIZE {
            return Err(Error::file_too_large());
        }

        Ok(Self {
            name,
            size,
            // the service counts whole seconds
            expiration: expiration.filter(|ttl| ttl.as_secs() > 0),
            payload,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn expiration(&self) -> Option<Duration> {
        self.expiration
    }

    pub fn payload(&self) -> &ImagePayload {
        &self.payload
    }
}
