use std::fmt;

use log::{debug, warn};
use tokio::select;
use tokio_util::sync::CancellationToken;

use crate::config::ClientConfig;
use crate::error::{Error, ErrorKind, ImgbbResult};
use crate::models::image::{Image, ImagePayload};
use crate::models::response::Response;
use crate::uploader::parse::read_response;
use crate::uploader::request::{prepare_request, PreparedRequest};

/// Upload client for the image hosting API.
///
/// The HTTP client is supplied by the caller and only ever used to execute
/// requests. `Client` holds no mutable state, clones are cheap and uploads
/// may run concurrently.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,

    /// API key, never logged
    key: String,

    config: ClientConfig,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("key", &"<redacted>")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Creates a client for the public upload endpoint.
    pub fn new(http: reqwest::Client, key: impl Into<String>) -> Self {
        Self {
            http,
            key: key.into(),
            config: ClientConfig::default(),
        }
    }

    pub fn with_config(
        http: reqwest::Client,
        key: impl Into<String>,
        config: ClientConfig,
    ) -> ImgbbResult<Self> {
        config.validate()?;

        Ok(Self {
            http,
            key: key.into(),
            config,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Uploads `image` and returns the service's description of it.
    ///
    /// Dropping the returned future aborts the exchange. The configured
    /// timeout, if any, bounds it as well.
    pub async fn upload(&self, image: &Image) -> ImgbbResult<Response> {
        debug!(
            "uploading {} ({} bytes, {}) to {}",
            image.name(),
            image.size(),
            match image.payload() {
                ImagePayload::File(_) => "file",
                ImagePayload::Source(_) => "source",
            },
            self.config.endpoint
        );

        let PreparedRequest { request, failure } =
            prepare_request(&self.http, &self.config, &self.key, image)?;

        let response = match self.http.execute(request).await {
            Ok(response) => response,
            Err(err) => {
                warn!("upload to {} failed: {err}", self.config.endpoint);
                return Err(failure.explain(Error::internal(format!(
                    "http client request do: {err}"
                ))));
            }
        };

        read_response(response).await.map_err(|err| match err.kind() {
            ErrorKind::Internal => failure.explain(err),
            _ => err,
        })
    }

    /// Like [`upload`](Self::upload), but gives up as soon as `token` is
    /// cancelled.
    pub async fn upload_with_cancel(
        &self,
        image: &Image,
        token: &CancellationToken,
    ) -> ImgbbResult<Response> {
        select! {
            biased;

            _ = token.cancelled() => {
                debug!("upload of {} cancelled", image.name());
                Err(Error::internal("http client request do: upload cancelled"))
            }
            result = self.upload(image) => result,
        }
    }
}
