use std::io;
use std::sync::{Arc, OnceLock};

use log::{debug, trace};
use reqwest::header::{HOST, ORIGIN, REFERER};
use reqwest::multipart::{Form, Part};
use reqwest::{Body, Request};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio_util::io::ReaderStream;

use crate::config::ClientConfig;
use crate::consts;
use crate::error::{Error, ImgbbResult};
use crate::models::image::{Image, ImagePayload};

const FILE_CONTENT_TYPE: &str = "application/octet-stream";

/// First write failure of a body producer.
///
/// The producer runs detached from the request, so its errors cannot be
/// returned directly. They are parked here and consulted once the exchange
/// has failed. Writing into the in-memory pipe only fails with `BrokenPipe`,
/// which is never recorded; the cell fills only for writers that can fail
/// on their own.
#[derive(Debug, Clone, Default)]
pub(crate) struct ProducerFailure(Arc<OnceLock<String>>);

impl ProducerFailure {
    fn record(&self, message: String) {
        let _ = self.0.set(message);
    }

    pub fn get(&self) -> Option<&str> {
        self.0.get().map(String::as_str)
    }

    /// Replaces a downstream failure with the producer's own, if any.
    pub fn explain(&self, err: Error) -> Error {
        match self.get() {
            Some(message) => Error::internal(message),
            None => err,
        }
    }
}

pub(crate) struct PreparedRequest {
    pub request: Request,
    pub failure: ProducerFailure,
}

/// The fixed text fields, followed by the image part read from `image`.
fn upload_form(key: &str, image: &Image, content: Body) -> ImgbbResult<Form> {
    let mut form = Form::new()
        .text("key", key.to_string())
        .text("type", "file")
        .text("action", "upload");

    if let Some(expiration) = image.expiration() {
        form = form.text("expiration", expiration.as_secs().to_string());
    }

    let part = Part::stream_with_length(content, image.size() as u64);
    let form = match image.payload() {
        ImagePayload::File(_) => form.part(
            "image",
            part.file_name(image.name().to_string())
                .mime_str(FILE_CONTENT_TYPE)
                .map_err(|e| Error::internal(format!("new request: {e}")))?,
        ),
        ImagePayload::Source(_) => form
            .text("name", image.name().to_string())
            .part("image", part),
    };

    Ok(form)
}

/// Builds the upload request and starts the task producing the image part.
///
/// The image bytes go through a bounded in-memory pipe: the producer blocks
/// once `buffer_size` bytes are waiting and the transport pulls `chunk_size`
/// pieces from the other end.
pub(crate) fn prepare_request(
    http: &reqwest::Client,
    config: &ClientConfig,
    key: &str,
    image: &Image,
) -> ImgbbResult<PreparedRequest> {
    let (pipe_writer, pipe_reader) = tokio::io::duplex(config.buffer_size);
    let content = Body::wrap_stream(ReaderStream::with_capacity(pipe_reader, config.chunk_size));

    let mut builder = http
        .post(&config.endpoint)
        .header(HOST, consts::HOST)
        .header(ORIGIN, consts::ORIGIN)
        .header(REFERER, consts::REFERER)
        .multipart(upload_form(key, image, content)?);
    if let Some(timeout) = config.timeout {
        builder = builder.timeout(timeout);
    }

    let request = builder
        .build()
        .map_err(|e| Error::internal(format!("new request: {e}")))?;

    let failure = ProducerFailure::default();
    tokio::spawn(produce(image.payload().clone(), pipe_writer, failure.clone()));

    Ok(PreparedRequest { request, failure })
}

async fn write_payload<W: AsyncWrite + Unpin>(payload: &ImagePayload, writer: &mut W) -> io::Result<()> {
    let content = match payload {
        ImagePayload::File(file) => &file[..],
        ImagePayload::Source(source) => source.as_bytes(),
    };
    writer.write_all(content).await?;
    writer.shutdown().await
}

async fn produce<W: AsyncWrite + Unpin>(payload: ImagePayload, mut writer: W, failure: ProducerFailure) {
    // the writer is dropped on every path, which ends the part for the reader
    match write_payload(&payload, &mut writer).await {
        Ok(()) => trace!("image part written, {} bytes", payload.len()),
        // the transport hung up first and will report why itself
        Err(err) if err.kind() == io::ErrorKind::BrokenPipe => {
            debug!("image part abandoned by the transport")
        }
        Err(err) => {
            debug!("image producer stopped: {err}");
            failure.record(format!("write multipart body: {err}"));
        }
    }
}
