use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// Successful upload response.
///
/// Missing and `null` fields decode as zero values, the service leaves out
/// whatever does not apply to an upload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Response {
    #[serde(deserialize_with = "crate::serde::null_as_default")]
    pub data: Data,

    #[serde(rename = "status", default, deserialize_with = "crate::serde::number_or_string")]
    pub status_code: u16,

    #[serde(deserialize_with = "crate::serde::null_as_default")]
    pub success: bool,
}

/// Information about the uploaded image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Data {
    #[serde(deserialize_with = "crate::serde::null_as_default")]
    pub id: String,

    #[serde(deserialize_with = "crate::serde::null_as_default")]
    pub title: String,

    /// Page showing the image on the service
    #[serde(deserialize_with = "crate::serde::null_as_default")]
    pub url_viewer: String,

    /// Direct link to the original file
    #[serde(deserialize_with = "crate::serde::null_as_default")]
    pub url: String,

    #[serde(deserialize_with = "crate::serde::null_as_default")]
    pub display_url: String,

    #[serde(default, deserialize_with = "crate::serde::number_or_string")]
    pub width: u32,

    #[serde(default, deserialize_with = "crate::serde::number_or_string")]
    pub height: u32,

    /// Stored size in bytes
    #[serde(default, deserialize_with = "crate::serde::number_or_string")]
    pub size: u64,

    /// Upload time as unix seconds
    #[serde(default, deserialize_with = "crate::serde::number_or_string")]
    pub time: i64,

    /// Lifetime in seconds, 0 when the image does not expire
    #[serde(default, deserialize_with = "crate::serde::number_or_string")]
    pub expiration: i64,

    #[serde(deserialize_with = "crate::serde::null_as_default")]
    pub image: Info,

    #[serde(deserialize_with = "crate::serde::null_as_default")]
    pub thumb: Info,

    // missing for images too small to get a medium variant
    #[serde(deserialize_with = "crate::serde::null_as_default")]
    pub medium: Info,

    #[serde(deserialize_with = "crate::serde::null_as_default")]
    pub delete_url: String,
}

impl Data {
    pub fn uploaded_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.time, 0)
    }

    /// When the service drops the image, `None` if it never expires.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        if self.expiration <= 0 {
            return None;
        }
        self.uploaded_at()?
            .checked_add_signed(TimeDelta::try_seconds(self.expiration)?)
    }
}

/// One stored variant of the image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Info {
    #[serde(deserialize_with = "crate::serde::null_as_default")]
    pub filename: String,

    #[serde(deserialize_with = "crate::serde::null_as_default")]
    pub name: String,

    #[serde(deserialize_with = "crate::serde::null_as_default")]
    pub mime: String,

    #[serde(deserialize_with = "crate::serde::null_as_default")]
    pub extension: String,

    #[serde(deserialize_with = "crate::serde::null_as_default")]
    pub url: String,
}
