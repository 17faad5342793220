use std::fmt;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

/// Which stage of an upload produced an [`Error`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The image payload has no bytes.
    FileEmpty,

    /// The image payload is larger than 32 MiB.
    FileTooLarge,

    /// The client configuration was rejected.
    Config,

    /// Building, sending or decoding the exchange failed on our side.
    Internal,

    /// The service answered with a well-formed error payload.
    #[default]
    Service,
}

/// Detail attached to an [`Error`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorInfo {
    #[serde(deserialize_with = "crate::serde::null_as_default")]
    pub message: String,

    #[serde(default, deserialize_with = "crate::serde::number_or_string")]
    pub code: i64,

    #[serde(deserialize_with = "crate::serde::null_as_default")]
    pub context: String,
}

impl fmt::Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if self.code != 0 {
            write!(f, " (code {})", self.code)?;
        }
        if !self.context.is_empty() {
            write!(f, " (context {})", self.context)?;
        }
        Ok(())
    }
}

/// Failure of an upload.
///
/// Local failures and errors reported by the service share this shape so
/// callers can branch on the status alone. Two errors compare equal when
/// their status code and status text match; `info` and `kind` are ignored,
/// which makes `err == Error::with_status(StatusCode::BAD_REQUEST)` a
/// class check.
#[derive(thiserror::Error, Debug, Clone, Serialize, Deserialize)]
#[error("{status_code} {status_text}: {info}")]
pub struct Error {
    /// Zero when the service left it out; the parser then fills in the
    /// HTTP status
    #[serde(default, deserialize_with = "crate::serde::number_or_string")]
    pub status_code: u16,

    #[serde(
        rename = "status_txt",
        default,
        deserialize_with = "crate::serde::null_as_default"
    )]
    pub status_text: String,

    #[serde(
        rename = "error",
        default,
        deserialize_with = "crate::serde::null_as_default"
    )]
    pub info: ErrorInfo,

    /// Not part of the wire format, decoded payloads are always `Service`.
    #[serde(skip)]
    pub kind: ErrorKind,
}

impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        self.status_code == other.status_code && self.status_text == other.status_text
    }
}

impl Eq for Error {}

impl Error {
    pub fn new(kind: ErrorKind, status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status_code: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            info: ErrorInfo {
                message: message.into(),
                ..Default::default()
            },
            kind,
        }
    }

    /// An error carrying only a status, meant for comparisons.
    pub fn with_status(status: StatusCode) -> Self {
        Self::new(ErrorKind::Service, status, String::new())
    }

    pub(crate) fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub(crate) fn file_empty() -> Self {
        Self::new(ErrorKind::FileEmpty, StatusCode::BAD_REQUEST, "image file is empty")
    }

    pub(crate) fn file_too_large() -> Self {
        Self::new(
            ErrorKind::FileTooLarge,
            StatusCode::BAD_REQUEST,
            "image is too large (max image size is 32mb)",
        )
    }

    pub(crate) fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Config, StatusCode::BAD_REQUEST, message)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// True for failures raised before any network activity.
    pub fn is_validation(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::FileEmpty | ErrorKind::FileTooLarge | ErrorKind::Config
        )
    }
}

pub type ImgbbResult<T> = Result<T, Error>;
