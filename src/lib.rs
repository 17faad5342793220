//! Client for the imgbb image hosting upload API.
//!
//! ```no_run
//! # async fn run() -> imgbb_uploader::ImgbbResult<()> {
//! use std::time::Duration;
//! use imgbb_uploader::{Client, Image};
//!
//! let client = Client::new(reqwest::Client::new(), "api-key");
//! let image = Image::from_path("cat.png", Some(Duration::from_secs(600))).await?;
//!
//! let response = client.upload(&image).await?;
//! println!("{}", response.data.url);
//! # Ok(())
//! # }
//! ```

mod config;
mod consts;
mod error;
mod models;
mod serde;
mod uploader;

pub use config::ClientConfig;
pub use consts::{ENDPOINT, MAX_SIZE};
pub use error::{Error, ErrorInfo, ErrorKind, ImgbbResult};
pub use models::image::{Image, ImagePayload};
pub use models::response::{Data, Info, Response};
pub use uploader::client::Client;
